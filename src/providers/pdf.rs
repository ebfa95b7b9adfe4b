//! PDF render collaborator
//!
//! The core hands the renderer a fully-formed booking payload and gets
//! opaque binary content back; document layout is not this crate's concern.

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::BookingRequest;

/// Turns a booking into a PDF document
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, booking: &BookingRequest) -> AppResult<Vec<u8>>;
}

/// Client for an external render service that accepts the booking as JSON
/// and responds with the document bytes
pub struct HttpPdfRenderer {
    client: reqwest::Client,
    url: String,
}

impl HttpPdfRenderer {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl PdfRenderer for HttpPdfRenderer {
    async fn render(&self, booking: &BookingRequest) -> AppResult<Vec<u8>> {
        let response = self
            .client
            .post(&self.url)
            .json(booking)
            .send()
            .await
            .map_err(|e| AppError::Pdf(format!("Render service unreachable: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Pdf(format!("Render service error: {}", e)))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Pdf(format!("Failed to read rendered document: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
