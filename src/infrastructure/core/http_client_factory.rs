use anyhow::Result;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the shared HTTP client.
    ///
    /// Only the connect phase is bounded. Plot generation on the backend can
    /// take close to a minute.
    pub fn create_client(connect_timeout: Duration) -> Client {
        Client::builder()
            .pool_max_idle_per_host(5)
            .connect_timeout(connect_timeout)
            .user_agent(concat!("framing-summary/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}

/// Appends path segments and query parameters to a base URL.
///
/// Any path already on the base is kept as a prefix, so the backend can be
/// mounted under a sub-path.
pub fn endpoint_url(base: &Url, segments: &[&str], params: &[(&str, &str)]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Base URL cannot carry a path: {}", base))?
        .pop_if_empty()
        .extend(segments);

    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }

    Ok(url)
}
