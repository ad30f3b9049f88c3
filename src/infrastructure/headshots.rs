use crate::domain::ports::HeadshotSource;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// MLB static headshot CDN, addressed through a `{id}` URL template.
pub struct MlbHeadshotSource {
    client: Client,
    template: String,
}

impl MlbHeadshotSource {
    pub fn new(client: Client, template: impl Into<String>) -> Self {
        Self {
            client,
            template: template.into(),
        }
    }
}

#[async_trait]
impl HeadshotSource for MlbHeadshotSource {
    fn headshot_url(&self, player_id: i64) -> String {
        self.template.replace("{id}", &player_id.to_string())
    }

    async fn fetch_headshot(&self, player_id: i64) -> Option<Vec<u8>> {
        let url = self.headshot_url(player_id);
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(player_id, "Headshot request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(player_id, status = response.status().as_u16(), "No headshot");
            return None;
        }

        match response.bytes().await {
            Ok(bytes) if !bytes.is_empty() => Some(bytes.to_vec()),
            Ok(_) => None,
            Err(e) => {
                debug!(player_id, "Headshot body unreadable: {}", e);
                None
            }
        }
    }
}
