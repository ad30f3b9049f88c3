use crate::config::{Config, Mode};
use crate::domain::ports::{HeadshotSource, StatsService};
use crate::infrastructure::core::HttpClientFactory;
use crate::infrastructure::headshots::MlbHeadshotSource;
use crate::infrastructure::mock::{MockStatsService, NoHeadshots};
use crate::infrastructure::statcast_api::HttpStatsService;
use std::sync::Arc;
use tracing::info;

pub struct ServiceFactory;

impl ServiceFactory {
    pub fn create_services(config: &Config) -> (Arc<dyn StatsService>, Arc<dyn HeadshotSource>) {
        match config.mode {
            Mode::Mock => {
                info!("Using in-process mock stats service");
                (Arc::new(MockStatsService::new()), Arc::new(NoHeadshots))
            }
            Mode::Live => {
                info!("Using stats service at {}", config.api_base_url);
                let client = HttpClientFactory::create_client(config.connect_timeout);

                let headshots: Arc<dyn HeadshotSource> = if config.headshots_enabled {
                    Arc::new(MlbHeadshotSource::new(
                        client.clone(),
                        config.headshot_url_template.clone(),
                    ))
                } else {
                    Arc::new(NoHeadshots)
                };

                (
                    Arc::new(HttpStatsService::new(client, config.api_base_url.clone())),
                    headshots,
                )
            }
        }
    }
}
