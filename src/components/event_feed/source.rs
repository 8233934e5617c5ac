use crate::error::{feed_error, BoardResult};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

/// Transport for the raw feed text
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the feed. Transport failures come back as empty text, which
    /// parses to no records.
    async fn fetch_text(&self) -> String;
}

/// Fetches the published CSV over HTTP
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: Client,
    url: Url,
}

impl HttpFeedSource {
    pub fn new(url: &str) -> BoardResult<Self> {
        let url = Url::parse(url).map_err(|e| feed_error(&format!("Invalid feed URL {}: {}", url, e)))?;
        Ok(Self {
            client: Client::new(),
            url,
        })
    }

    async fn try_fetch(&self) -> BoardResult<String> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| feed_error(&format!("Failed to fetch feed: {}", e)))?;

        if !response.status().is_success() {
            return Err(feed_error(&format!(
                "Failed to fetch feed: HTTP {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| feed_error(&format!("Failed to read feed body: {}", e)))
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_text(&self) -> String {
        match self.try_fetch().await {
            Ok(text) => {
                debug!("Fetched {} bytes of feed text", text.len());
                text
            }
            Err(e) => {
                error!("{}", e);
                String::new()
            }
        }
    }
}
