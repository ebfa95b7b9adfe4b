//! Booking confirmation endpoints
//!
//! The manager email carries a link whose token encodes the whole booking.
//! Opening the link shows the decoded booking; confirming it re-sends the
//! approved booking to the requester. A damaged token is a terminal
//! invalid-link error on both routes.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::BookingRequest, services::token};

#[derive(Serialize, ToSchema)]
pub struct ConfirmationSentResponse {
    /// Requester address the confirmation was sent to
    pub sent_to: String,
}

/// Decode a confirmation token into the booking it carries
#[utoipa::path(
    get,
    path = "/confirmations/{token}",
    tag = "confirmations",
    params(
        ("token" = String, Path, description = "Confirmation token from the inquiry email")
    ),
    responses(
        (status = 200, description = "Decoded booking", body = BookingRequest),
        (status = 400, description = "Invalid or corrupted link")
    )
)]
pub async fn get_confirmation(Path(token): Path<String>) -> AppResult<Json<BookingRequest>> {
    Ok(Json(token::decode(&token)?))
}

/// Approve a booking: email the confirmation (with PDF) to the requester
#[utoipa::path(
    post,
    path = "/confirmations/{token}/send",
    tag = "confirmations",
    params(
        ("token" = String, Path, description = "Confirmation token from the inquiry email")
    ),
    responses(
        (status = 200, description = "Confirmation sent", body = ConfirmationSentResponse),
        (status = 400, description = "Invalid or corrupted link"),
        (status = 502, description = "Mail or PDF collaborator failed")
    )
)]
pub async fn send_confirmation(
    State(state): State<crate::AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<ConfirmationSentResponse>> {
    let booking = token::decode(&token)?;
    state.services.booking.send_confirmation(&booking).await?;

    tracing::info!("Confirmation sent for booking by {}", booking.name);

    Ok(Json(ConfirmationSentResponse {
        sent_to: booking.email,
    }))
}
