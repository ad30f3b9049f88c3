//! Configuration module for the framing dashboard.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by area: the stats Service and the Dashboard window.

mod dashboard_config;
mod service_config;

pub use dashboard_config::DashboardEnvConfig;
pub use service_config::{
    DEFAULT_HEADSHOT_URL_TEMPLATE, DEFAULT_STATS_API_BASE_URL, ServiceEnvConfig,
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Where catcher data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Mock,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(Mode::Live),
            "mock" => Ok(Mode::Mock),
            _ => anyhow::bail!("Invalid MODE: {}. Must be 'live' or 'mock'", s),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    // Service (from ServiceEnvConfig)
    pub api_base_url: Url,
    pub headshot_url_template: String,
    pub headshots_enabled: bool,
    pub connect_timeout: Duration,

    // Dashboard (from DashboardEnvConfig)
    pub initial_date: NaiveDate,
    pub window_width: f32,
    pub window_height: f32,
    pub log_panel_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let mode_str = env::var("MODE").unwrap_or_else(|_| "live".to_string());
        let mode = Mode::from_str(&mode_str)?;

        let service = ServiceEnvConfig::from_env().context("Failed to load service config")?;
        let dashboard =
            DashboardEnvConfig::from_env().context("Failed to load dashboard config")?;

        Ok(Self {
            mode,

            api_base_url: service.api_base_url,
            headshot_url_template: service.headshot_url_template,
            headshots_enabled: service.headshots_enabled,
            connect_timeout: service.connect_timeout,

            initial_date: dashboard.initial_date,
            window_width: dashboard.window_width,
            window_height: dashboard.window_height,
            log_panel_capacity: dashboard.log_panel_capacity,
        })
    }
}
