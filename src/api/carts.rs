//! Cart endpoints
//!
//! Carts are addressed by a server-issued UUID; clients keep the ID and
//! the server keeps the snapshot. Totals are reported alongside the cart
//! and stay absent until a rental period is chosen.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Cart, RentalPeriod},
    services::CartService,
};

#[derive(Serialize, ToSchema)]
pub struct CreateCartResponse {
    pub cart_id: Uuid,
}

/// Cart plus the derived figures the storefront displays
#[derive(Serialize, ToSchema)]
pub struct CartResponse {
    pub cart: Cart,
    /// Billable days, absent until a rental period is chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_count: Option<u32>,
    /// Total over all lines, absent until a rental period is chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Decimal>,
}

impl CartResponse {
    fn from_cart(cart: Cart) -> Self {
        let day_count = cart.rental_period.map(|p| p.day_count());
        let total_price = CartService::total_price(&cart);
        Self {
            cart,
            day_count,
            total_price,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct AddItemRequest {
    /// Catalog item ID
    pub item_id: u32,
    /// Desired quantity; replaces any existing quantity for the item
    pub quantity: u32,
}

/// Create a new empty cart
#[utoipa::path(
    post,
    path = "/carts",
    tag = "carts",
    responses(
        (status = 201, description = "Cart created", body = CreateCartResponse)
    )
)]
pub async fn create_cart() -> (StatusCode, Json<CreateCartResponse>) {
    (
        StatusCode::CREATED,
        Json(CreateCartResponse {
            cart_id: Uuid::new_v4(),
        }),
    )
}

/// Get a cart with its derived totals
#[utoipa::path(
    get,
    path = "/carts/{id}",
    tag = "carts",
    params(
        ("id" = Uuid, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "Cart contents", body = CartResponse)
    )
)]
pub async fn get_cart(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CartResponse>> {
    let cart = state.services.cart.get(id).await?;
    Ok(Json(CartResponse::from_cart(cart)))
}

/// Add an item to a cart, or change its quantity
#[utoipa::path(
    post,
    path = "/carts/{id}/items",
    tag = "carts",
    params(
        ("id" = Uuid, Path, description = "Cart ID")
    ),
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Unknown equipment item")
    )
)]
pub async fn add_item(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddItemRequest>,
) -> AppResult<Json<CartResponse>> {
    let equipment = state.services.catalog.item(request.item_id).ok_or_else(|| {
        AppError::NotFound(format!("Equipment item {} not found", request.item_id))
    })?;

    if request.quantity > equipment.available_count {
        tracing::debug!(
            "Cart {} requests {} x '{}' with only {} available",
            id,
            request.quantity,
            equipment.name,
            equipment.available_count
        );
    }

    let cart = state
        .services
        .cart
        .add_or_update(id, equipment, request.quantity)
        .await?;
    Ok(Json(CartResponse::from_cart(cart)))
}

/// Remove an item from a cart
#[utoipa::path(
    delete,
    path = "/carts/{id}/items/{item_id}",
    tag = "carts",
    params(
        ("id" = Uuid, Path, description = "Cart ID"),
        ("item_id" = u32, Path, description = "Equipment item ID")
    ),
    responses(
        (status = 200, description = "Updated cart", body = CartResponse)
    )
)]
pub async fn remove_item(
    State(state): State<crate::AppState>,
    Path((id, item_id)): Path<(Uuid, u32)>,
) -> AppResult<Json<CartResponse>> {
    let cart = state.services.cart.remove(id, item_id).await?;
    Ok(Json(CartResponse::from_cart(cart)))
}

/// Set the rental period shared by all cart lines
#[utoipa::path(
    put,
    path = "/carts/{id}/period",
    tag = "carts",
    params(
        ("id" = Uuid, Path, description = "Cart ID")
    ),
    request_body = RentalPeriod,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "End date before start date")
    )
)]
pub async fn set_period(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(period): Json<RentalPeriod>,
) -> AppResult<Json<CartResponse>> {
    let cart = state.services.cart.set_rental_period(id, period).await?;
    Ok(Json(CartResponse::from_cart(cart)))
}

/// Delete a cart
#[utoipa::path(
    delete,
    path = "/carts/{id}",
    tag = "carts",
    params(
        ("id" = Uuid, Path, description = "Cart ID")
    ),
    responses(
        (status = 204, description = "Cart deleted")
    )
)]
pub async fn clear_cart(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.cart.clear(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
