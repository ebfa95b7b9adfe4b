//! Booking submission models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::equipment::Category;

/// Requester form fields collected at checkout
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CheckoutInfo {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Cohort / class of the requester (e.g. "Film Year 1")
    #[validate(length(min = 1, message = "Class is required"))]
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// One priced booking line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingLine {
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    /// Day rate at submission time, excluding tax
    pub day_rate: Decimal,
    /// Price for this line over the whole rental period, times quantity
    pub line_price: Decimal,
}

/// A complete booking submission payload.
///
/// Built fresh at submission time from the current cart and requester
/// fields; immutable once constructed. This is also the payload carried by
/// confirmation links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub day_count: u32,
    pub lines: Vec<BookingLine>,
    pub total_price: Decimal,
}
