use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-game framing summary for one catcher, as served by the stats backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatcherSummary {
    pub id: i64,
    pub game_pk: i64,
    pub player_name: String,
    #[serde(default)]
    pub matchup: String,
    #[serde(default)]
    pub date: String,
    /// Called-strike rate on shadow-zone pitches, in [0, 1].
    pub called_strike_rate: f64,
    #[serde(default)]
    pub shadow_zone_pitches: u32,
    pub extra_strikes: i64,
    pub lost_strikes: i64,

    // Reference fields the backend also emits; older payloads omit them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_strike_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_called_pitches: Option<u32>,
}

impl CatcherSummary {
    /// Strikes gained minus strikes lost.
    pub fn net_impact(&self) -> i64 {
        self.extra_strikes - self.lost_strikes
    }

    pub fn key(&self) -> CardKey {
        CardKey {
            player_id: self.id,
            game_pk: self.game_pk,
        }
    }
}

/// A catcher can appear once per game, so cards are keyed by both ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardKey {
    pub player_id: i64,
    pub game_pk: i64,
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.player_id, self.game_pk)
    }
}

/// Every catcher summary loaded for one date, in display order.
///
/// This is the comparison population for grading. It is never patched in
/// place: a new date produces a new cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    date: NaiveDate,
    catchers: Vec<CatcherSummary>,
}

impl Cohort {
    pub fn new(date: NaiveDate, catchers: Vec<CatcherSummary>) -> Self {
        Self { date, catchers }
    }

    pub fn empty(date: NaiveDate) -> Self {
        Self::new(date, Vec::new())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn catchers(&self) -> &[CatcherSummary] {
        &self.catchers
    }

    pub fn len(&self) -> usize {
        self.catchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catchers.is_empty()
    }

    pub fn find(&self, key: CardKey) -> Option<&CatcherSummary> {
        self.catchers.iter().find(|c| c.key() == key)
    }
}

#[cfg(test)]
pub(crate) fn sample_catcher(id: i64, extra: i64, lost: i64, rate: f64) -> CatcherSummary {
    CatcherSummary {
        id,
        game_pk: 700_000 + id,
        player_name: format!("Catcher {}", id),
        matchup: "NYY vs BOS".to_string(),
        date: "2025-07-15".to_string(),
        called_strike_rate: rate,
        shadow_zone_pitches: 40,
        extra_strikes: extra,
        lost_strikes: lost,
        team: None,
        total_strike_rate: None,
        total_called_pitches: None,
    }
}
