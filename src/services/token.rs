//! Confirmation tokens
//!
//! A booking's essential fields travel inside the confirmation link itself
//! rather than a server-side session: the payload is serialized to JSON
//! and URL-safe base64 encoded. Decoding a tampered or truncated token is
//! a terminal invalid-link error.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::error::{AppError, AppResult};
use crate::models::BookingRequest;

/// Encode a booking into a URL-safe confirmation token
pub fn encode(booking: &BookingRequest) -> AppResult<String> {
    let json = serde_json::to_vec(booking)
        .map_err(|e| AppError::Internal(format!("Failed to serialize booking: {}", e)))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a confirmation token back into the booking it was built from
pub fn decode(token: &str) -> AppResult<BookingRequest> {
    let json = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| AppError::InvalidToken(format!("bad encoding ({})", e)))?;
    serde_json::from_slice(&json)
        .map_err(|e| AppError::InvalidToken(format!("bad payload ({})", e)))
}
