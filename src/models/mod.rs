//! Data models for the Rental House server

pub mod booking;
pub mod cart;
pub mod equipment;

// Re-export commonly used types
pub use booking::{BookingLine, BookingRequest, CheckoutInfo};
pub use cart::{Cart, CartLine, RentalPeriod};
pub use equipment::{Category, EquipmentItem};
