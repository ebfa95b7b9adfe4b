//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, carts, confirmations, equipment, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rental House API",
        version = "1.0.0",
        description = "Equipment rental storefront REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::equipment_events,
        // Carts
        carts::create_cart,
        carts::get_cart,
        carts::add_item,
        carts::remove_item,
        carts::set_period,
        carts::clear_cart,
        // Bookings
        bookings::checkout,
        bookings::checkout_pdf,
        // Confirmations
        confirmations::get_confirmation,
        confirmations::send_confirmation,
    ),
    components(
        schemas(
            // Equipment
            crate::models::EquipmentItem,
            crate::models::Category,
            // Carts
            crate::models::Cart,
            crate::models::CartLine,
            crate::models::RentalPeriod,
            carts::CreateCartResponse,
            carts::CartResponse,
            carts::AddItemRequest,
            // Bookings
            crate::models::CheckoutInfo,
            crate::models::BookingRequest,
            crate::models::BookingLine,
            bookings::CheckoutResponse,
            confirmations::ConfirmationSentResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment catalog"),
        (name = "carts", description = "Cart management"),
        (name = "bookings", description = "Booking submission"),
        (name = "confirmations", description = "Booking confirmation links")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
