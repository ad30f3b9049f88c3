//! Stats backend configuration parsing from environment variables.
//!
//! Covers where catcher data and plots come from, and where headshots live.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_STATS_API_BASE_URL: &str = "https://framing-summary-production.up.railway.app";
pub const DEFAULT_HEADSHOT_URL_TEMPLATE: &str = "https://img.mlbstatic.com/mlb-photos/image/upload/d_people:generic:headshot:67:current.png/w_213,q_auto:best/v1/people/{id}/headshot/67/current";

/// Stats backend environment configuration
#[derive(Debug, Clone)]
pub struct ServiceEnvConfig {
    pub api_base_url: Url,
    pub headshot_url_template: String,
    pub headshots_enabled: bool,
    pub connect_timeout: Duration,
}

impl ServiceEnvConfig {
    pub fn from_env() -> Result<Self> {
        let base = env::var("STATS_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_STATS_API_BASE_URL.to_string());
        let api_base_url = Url::parse(base.trim())
            .with_context(|| format!("Invalid STATS_API_BASE_URL: {}", base))?;
        if api_base_url.cannot_be_a_base() {
            anyhow::bail!("STATS_API_BASE_URL must be an http(s) base URL: {}", base);
        }

        let headshot_url_template = env::var("HEADSHOT_URL_TEMPLATE")
            .unwrap_or_else(|_| DEFAULT_HEADSHOT_URL_TEMPLATE.to_string());
        if !headshot_url_template.contains("{id}") {
            anyhow::bail!("HEADSHOT_URL_TEMPLATE must contain an {{id}} placeholder");
        }

        let connect_timeout_secs = env::var("HTTP_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .context("Failed to parse HTTP_CONNECT_TIMEOUT_SECS")?;

        Ok(Self {
            api_base_url,
            headshot_url_template,
            headshots_enabled: env::var("HEADSHOTS_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .trim()
                .parse::<bool>()
                .context("Failed to parse HEADSHOTS_ENABLED")?,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }
}
