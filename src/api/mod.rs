//! API handlers for Rental House REST endpoints

pub mod bookings;
pub mod carts;
pub mod confirmations;
pub mod equipment;
pub mod health;
pub mod openapi;
