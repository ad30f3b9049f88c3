use crate::domain::catcher::CatcherSummary;
use crate::domain::dates::format_wire;
use crate::domain::errors::StatsServiceError;
use crate::domain::plot::PlotImage;
use crate::domain::ports::{HeadshotSource, ServiceHealth, StatsService};
use crate::infrastructure::plot_decoder::placeholder_plot_png;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

// (id, name, team, matchup, shadow CS rate, shadow pitches, extra, lost)
const SAMPLE_CATCHERS: [(i64, &str, &str, &str, f64, u32, i64, i64); 8] = [
    (669221, "Sean Murphy", "ATL", "NYM vs ATL", 0.412, 34, 4, 1),
    (668939, "Adley Rutschman", "BAL", "BAL vs TB", 0.388, 41, 3, 2),
    (672515, "Gabriel Moreno", "ARI", "ARI vs SD", 0.457, 29, 5, 0),
    (663728, "Cal Raleigh", "SEA", "HOU vs SEA", 0.301, 38, 1, 4),
    (592663, "J.T. Realmuto", "PHI", "PHI vs WSH", 0.355, 31, 2, 2),
    (665489, "William Contreras", "MIL", "MIL vs CHC", 0.274, 36, 0, 3),
    (608700, "Kyle Higashioka", "TEX", "TEX vs LAA", 0.429, 27, 3, 1),
    (596117, "Austin Hedges", "CLE", "DET vs CLE", 0.483, 25, 6, 1),
];

fn sample_cohort(date: NaiveDate) -> Vec<CatcherSummary> {
    let wire = format_wire(date);
    SAMPLE_CATCHERS
        .iter()
        .enumerate()
        .map(
            |(i, &(id, name, team, matchup, rate, shadow, extra, lost))| CatcherSummary {
                id,
                game_pk: 745_000 + i as i64,
                player_name: name.to_string(),
                matchup: matchup.to_string(),
                date: wire.clone(),
                called_strike_rate: rate,
                shadow_zone_pitches: shadow,
                extra_strikes: extra,
                lost_strikes: lost,
                team: Some(team.to_string()),
                total_strike_rate: None,
                total_called_pitches: Some(shadow + 40),
            },
        )
        .collect()
}

/// In-process stats backend with a fixed sample cohort.
///
/// Dates can be overridden with explicit cohorts or artificial latency, which
/// is how tests exercise out-of-order completions.
pub struct MockStatsService {
    overrides: Mutex<HashMap<NaiveDate, Vec<CatcherSummary>>>,
    delays: Mutex<HashMap<NaiveDate, Duration>>,
    offline: bool,
}

impl Default for MockStatsService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStatsService {
    pub fn new() -> Self {
        Self {
            overrides: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            offline: false,
        }
    }

    /// Every request fails as if the backend were unreachable.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    pub fn with_cohort(self, date: NaiveDate, catchers: Vec<CatcherSummary>) -> Self {
        if let Ok(mut map) = self.overrides.lock() {
            map.insert(date, catchers);
        }
        self
    }

    pub fn with_delay(self, date: NaiveDate, delay: Duration) -> Self {
        if let Ok(mut map) = self.delays.lock() {
            map.insert(date, delay);
        }
        self
    }

    fn delay_for(&self, date: NaiveDate) -> Option<Duration> {
        self.delays.lock().ok().and_then(|m| m.get(&date).copied())
    }

    fn cohort_for(&self, date: NaiveDate) -> Vec<CatcherSummary> {
        self.overrides
            .lock()
            .ok()
            .and_then(|m| m.get(&date).cloned())
            .unwrap_or_else(|| sample_cohort(date))
    }

    fn check_online(&self) -> Result<(), StatsServiceError> {
        if self.offline {
            return Err(StatsServiceError::Transport {
                reason: "mock backend is offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl StatsService for MockStatsService {
    async fn fetch_catchers(&self, date: NaiveDate) -> Result<Vec<CatcherSummary>> {
        if let Some(delay) = self.delay_for(date) {
            tokio::time::sleep(delay).await;
        }
        self.check_online()?;

        let catchers = self.cohort_for(date);
        info!("MockStatsService: serving {} catchers for {}", catchers.len(), date);
        Ok(catchers)
    }

    async fn fetch_plot(&self, catcher_id: i64, game_pk: i64, date: NaiveDate) -> Result<PlotImage> {
        if let Some(delay) = self.delay_for(date) {
            tokio::time::sleep(delay).await;
        }
        self.check_online()?;

        let known = self
            .cohort_for(date)
            .iter()
            .any(|c| c.id == catcher_id && c.game_pk == game_pk);
        if !known {
            return Err(StatsServiceError::Api {
                status: 404,
                message: "No data found for this catcher/game".to_string(),
            }
            .into());
        }

        Ok(PlotImage::new("image/png", placeholder_plot_png(320, 320)?))
    }

    async fn health(&self) -> Result<ServiceHealth> {
        self.check_online()?;
        Ok(ServiceHealth {
            status: "ok".to_string(),
            timestamp: Some(Utc::now().to_rfc3339()),
        })
    }
}

/// Headshot source that never has an image.
pub struct NoHeadshots;

#[async_trait]
impl HeadshotSource for NoHeadshots {
    fn headshot_url(&self, _player_id: i64) -> String {
        String::new()
    }

    async fn fetch_headshot(&self, _player_id: i64) -> Option<Vec<u8>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    }

    #[tokio::test]
    async fn test_sample_cohort_is_stamped_with_date() {
        let service = MockStatsService::new();
        let catchers = service.fetch_catchers(date()).await.unwrap();
        assert_eq!(catchers.len(), SAMPLE_CATCHERS.len());
        assert!(catchers.iter().all(|c| c.date == "2025-07-15"));
    }

    #[tokio::test]
    async fn test_plot_for_known_catcher_is_png() {
        let service = MockStatsService::new();
        let first = service.fetch_catchers(date()).await.unwrap().remove(0);
        let plot = service.fetch_plot(first.id, first.game_pk, date()).await.unwrap();
        assert!(plot.is_png());
    }

    #[tokio::test]
    async fn test_unknown_catcher_plot_is_not_found() {
        let service = MockStatsService::new();
        let err = service.fetch_plot(1, 2, date()).await.unwrap_err();
        match err.downcast_ref::<StatsServiceError>() {
            Some(StatsServiceError::Api { status, .. }) => assert_eq!(*status, 404),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_offline_mock_fails_with_transport_error() {
        let service = MockStatsService::offline();
        let err = service.fetch_catchers(date()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StatsServiceError>(),
            Some(StatsServiceError::Transport { .. })
        ));
    }
}
