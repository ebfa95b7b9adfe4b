//! Booking submission endpoints

use axum::{
    extract::{Path, State},
    http::header,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BookingRequest, CheckoutInfo},
    services::booking::{inquiry_filename, BookingService},
};

#[derive(Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub booking: BookingRequest,
    /// Token embedded in the confirmation link sent to the manager
    pub confirmation_token: String,
}

/// Submit the cart as a booking inquiry.
///
/// Builds the priced booking from the cart, mails the inquiry PDF to the
/// equipment manager and clears the cart. If the mail cannot be sent the
/// cart is kept and the response offers the manual PDF download instead.
#[utoipa::path(
    post,
    path = "/carts/{id}/checkout",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Cart ID")
    ),
    request_body = CheckoutInfo,
    responses(
        (status = 200, description = "Booking submitted", body = CheckoutResponse),
        (status = 400, description = "Empty cart, missing period or invalid form fields"),
        (status = 502, description = "Mail or PDF collaborator failed")
    )
)]
pub async fn checkout(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(info): Json<CheckoutInfo>,
) -> AppResult<Json<CheckoutResponse>> {
    let cart = state.services.cart.get(id).await?;
    let booking = BookingService::build_request(&cart, &info)?;

    let confirmation_token = state.services.booking.submit(&booking).await?;

    // the inquiry is out; a follow-up visit starts from an empty cart
    state.services.cart.clear(id).await?;

    tracing::info!(
        "Booking submitted for {} ({} lines, {} days)",
        booking.name,
        booking.lines.len(),
        booking.day_count
    );

    Ok(Json(CheckoutResponse {
        booking,
        confirmation_token,
    }))
}

/// Download the booking PDF without submitting.
///
/// Fallback path for when the mail relay is down; the cart is left intact.
#[utoipa::path(
    post,
    path = "/carts/{id}/checkout/pdf",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Cart ID")
    ),
    request_body = CheckoutInfo,
    responses(
        (status = 200, description = "Booking PDF", content_type = "application/pdf"),
        (status = 400, description = "Empty cart, missing period or invalid form fields"),
        (status = 502, description = "PDF collaborator failed")
    )
)]
pub async fn checkout_pdf(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(info): Json<CheckoutInfo>,
) -> AppResult<([(header::HeaderName, String); 2], Vec<u8>)> {
    let cart = state.services.cart.get(id).await?;
    let booking = BookingService::build_request(&cart, &info)?;

    let document = state.services.booking.render_pdf(&booking).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", inquiry_filename(&booking)),
        ),
    ];
    Ok((headers, document))
}
