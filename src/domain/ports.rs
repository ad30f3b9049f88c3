use crate::domain::catcher::CatcherSummary;
use crate::domain::plot::PlotImage;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ServiceHealth {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// The remote framing stats backend.
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Every catcher with enough called pitches on `date`.
    async fn fetch_catchers(&self, date: NaiveDate) -> Result<Vec<CatcherSummary>>;

    /// Rendered shadow-zone plot for one catcher in one game.
    async fn fetch_plot(&self, catcher_id: i64, game_pk: i64, date: NaiveDate) -> Result<PlotImage>;

    async fn health(&self) -> Result<ServiceHealth>;
}

/// Player headshot images. Missing headshots are not an error.
#[async_trait]
pub trait HeadshotSource: Send + Sync {
    fn headshot_url(&self, player_id: i64) -> String;

    async fn fetch_headshot(&self, player_id: i64) -> Option<Vec<u8>>;
}
