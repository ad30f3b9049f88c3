//! Dashboard window and session configuration parsing from environment variables.

use crate::domain::dates::{default_date, parse_date};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;

/// Dashboard environment configuration
#[derive(Debug, Clone)]
pub struct DashboardEnvConfig {
    pub initial_date: NaiveDate,
    pub window_width: f32,
    pub window_height: f32,
    pub log_panel_capacity: usize,
}

impl DashboardEnvConfig {
    pub fn from_env() -> Result<Self> {
        let initial_date = match env::var("INITIAL_DATE") {
            Ok(raw) if !raw.trim().is_empty() => {
                parse_date(&raw).context("Failed to parse INITIAL_DATE")?
            }
            _ => default_date(),
        };

        Ok(Self {
            initial_date,
            window_width: env::var("WINDOW_WIDTH")
                .unwrap_or_else(|_| "1200".to_string())
                .parse::<f32>()
                .context("Failed to parse WINDOW_WIDTH")?,
            window_height: env::var("WINDOW_HEIGHT")
                .unwrap_or_else(|_| "800".to_string())
                .parse::<f32>()
                .context("Failed to parse WINDOW_HEIGHT")?,
            log_panel_capacity: env::var("LOG_PANEL_CAPACITY")
                .unwrap_or_else(|_| "500".to_string())
                .parse::<usize>()
                .context("Failed to parse LOG_PANEL_CAPACITY")?,
        })
    }
}
