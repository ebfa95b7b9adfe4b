//! Rental House Server - Equipment Rental Storefront
//!
//! A Rust REST API server for browsing a spreadsheet-fed equipment catalog
//! and submitting rental bookings by email.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rentalhouse_server::{
    api,
    config::AppConfig,
    providers::{
        CartStore, HttpFeed, HttpImageManifest, HttpPdfRenderer, MemoryCartStore, RedisCartStore,
        SmtpMailer,
    },
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "rentalhouse_server={},tower_http=debug",
            config.logging.level
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Rental House Server v{}", env!("CARGO_PKG_VERSION"));

    // Cart snapshots go to Redis when configured, otherwise stay in memory
    let cart_store: Arc<dyn CartStore> = if config.redis.url.is_empty() {
        tracing::warn!("No Redis URL configured, carts will not survive a restart");
        Arc::new(MemoryCartStore::new())
    } else {
        let store = RedisCartStore::new(&config.redis.url)
            .await
            .expect("Failed to connect to Redis");
        tracing::info!("Connected to Redis");
        Arc::new(store)
    };

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services over the external collaborators
    let services = Services::new(
        &config,
        Arc::new(HttpFeed::new(config.feed.url.clone())),
        Arc::new(HttpImageManifest::new(config.images.manifest_url.clone())),
        cart_store,
        Arc::new(HttpPdfRenderer::new(config.booking.pdf_service_url.clone())),
        Arc::new(SmtpMailer::new(config.email.clone())),
    );

    // First catalog load; a dead feed falls back to the bundled snapshot
    services.catalog.load_initial().await;

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Equipment catalog
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment/events", get(api::equipment::equipment_events))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        // Carts
        .route("/carts", post(api::carts::create_cart))
        .route("/carts/:id", get(api::carts::get_cart))
        .route("/carts/:id", delete(api::carts::clear_cart))
        .route("/carts/:id/items", post(api::carts::add_item))
        .route("/carts/:id/items/:item_id", delete(api::carts::remove_item))
        .route("/carts/:id/period", put(api::carts::set_period))
        // Bookings
        .route("/carts/:id/checkout", post(api::bookings::checkout))
        .route("/carts/:id/checkout/pdf", post(api::bookings::checkout_pdf))
        // Confirmations
        .route(
            "/confirmations/:token",
            get(api::confirmations::get_confirmation),
        )
        .route(
            "/confirmations/:token/send",
            post(api::confirmations::send_confirmation),
        )
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
