//! Rental House - Equipment Rental Storefront
//!
//! A Rust REST API server for a school equipment rental house: the catalog
//! is rebuilt from a read-only spreadsheet feed, carts are priced with
//! weekly-block discounts, and bookings go out as PDF email inquiries with
//! a confirmation-link flow.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod providers;
pub mod services;
pub mod sheet;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
