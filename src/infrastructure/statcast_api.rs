use crate::domain::catcher::CatcherSummary;
use crate::domain::dates::format_wire;
use crate::domain::errors::StatsServiceError;
use crate::domain::plot::PlotImage;
use crate::domain::ports::{ServiceHealth, StatsService};
use crate::infrastructure::core::endpoint_url;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct PlotBody {
    image: Option<String>,
}

/// Client for the framing stats backend's JSON API.
pub struct HttpStatsService {
    client: Client,
    base_url: Url,
}

impl HttpStatsService {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    async fn get(&self, url: Url) -> Result<Response, StatsServiceError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StatsServiceError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        // Non-JSON bodies (proxy error pages) fall back to the generic message.
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_default();
        warn!(status = status.as_u16(), %message, body_len = body.len(), "Stats service returned an error");

        Err(StatsServiceError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StatsServiceError> {
        response.json::<T>().await.map_err(|e| StatsServiceError::Decode {
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl StatsService for HttpStatsService {
    #[instrument(skip(self))]
    async fn fetch_catchers(&self, date: NaiveDate) -> Result<Vec<CatcherSummary>> {
        let wire_date = format_wire(date);
        let url = endpoint_url(
            &self.base_url,
            &["api", "statcast", "catchers"],
            &[("date", wire_date.as_str())],
        )?;

        info!("Fetching catcher cohort...");
        let response = self.get(url).await?;
        let catchers: Vec<CatcherSummary> = Self::decode(response).await?;
        info!("Fetched {} catchers", catchers.len());

        Ok(catchers)
    }

    #[instrument(skip(self))]
    async fn fetch_plot(&self, catcher_id: i64, game_pk: i64, date: NaiveDate) -> Result<PlotImage> {
        let wire_date = format_wire(date);
        let catcher_segment = catcher_id.to_string();
        let game_segment = game_pk.to_string();
        let url = endpoint_url(
            &self.base_url,
            &["api", "plot", catcher_segment.as_str(), game_segment.as_str()],
            &[("date", wire_date.as_str())],
        )?;

        info!("Requesting shadow zone plot...");
        let response = self.get(url).await?;
        let body: PlotBody = Self::decode(response).await?;

        let data_url = body
            .image
            .filter(|s| !s.trim().is_empty())
            .ok_or(StatsServiceError::MissingImage {
                catcher_id,
                game_pk,
            })?;

        let plot = PlotImage::from_data_url(&data_url).context("Failed to decode plot image")?;
        info!("Received {} byte {} plot", plot.bytes.len(), plot.mime);

        Ok(plot)
    }

    async fn health(&self) -> Result<ServiceHealth> {
        let url = endpoint_url(&self.base_url, &["api", "health"], &[])?;
        let response = self.get(url).await?;
        Ok(Self::decode(response).await?)
    }
}
