//! Tabular feed reader
//!
//! The catalog source is a read-only document export served as
//! character-delimited text. There is no write path.

use async_trait::async_trait;

use crate::error::{AppError, AppResult};

/// Read-only source of the raw delimited catalog payload
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch(&self) -> AppResult<String>;
}

/// HTTP-backed feed reader
pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl FeedProvider for HttpFeed {
    async fn fetch(&self) -> AppResult<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::Feed(format!("Failed to fetch feed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Feed(format!("Feed returned an error status: {}", e)))?;

        response
            .text()
            .await
            .map_err(|e| AppError::Feed(format!("Failed to read feed body: {}", e)))
    }
}
