//! Image-folder listing provider
//!
//! The listing service maps image base names to direct URLs. The catalog
//! must survive the service being down or answering with an error object,
//! so fetching never fails: any problem degrades to an empty mapping and
//! items fall back to placeholder images.

use async_trait::async_trait;
use chrono::Utc;

use crate::sheet::images::ImageManifest;

/// Source of the name -> URL image mapping
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageManifestProvider: Send + Sync {
    /// Fetch the current mapping; unavailable provider yields an empty map
    async fn fetch(&self) -> ImageManifest;
}

/// HTTP-backed listing client
pub struct HttpImageManifest {
    client: reqwest::Client,
    url: String,
}

impl HttpImageManifest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    async fn try_fetch(&self) -> Result<ImageManifest, reqwest::Error> {
        // cache-buster so newly added images show up between polls
        let response = self
            .client
            .get(&self.url)
            .query(&[("t", Utc::now().timestamp_millis())])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        if body.get("error").is_some() {
            tracing::warn!("Image listing service returned an error object");
            return Ok(ImageManifest::new());
        }
        Ok(serde_json::from_value(body).unwrap_or_default())
    }
}

#[async_trait]
impl ImageManifestProvider for HttpImageManifest {
    async fn fetch(&self) -> ImageManifest {
        match self.try_fetch().await {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!("Could not load image manifest: {}", e);
                ImageManifest::new()
            }
        }
    }
}
