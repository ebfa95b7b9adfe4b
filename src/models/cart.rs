//! Cart models
//!
//! A cart holds at most one line per equipment item and a single rental
//! period shared by every line.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::equipment::EquipmentItem;

/// The rental window shared by all cart lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RentalPeriod {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl RentalPeriod {
    /// Number of billable rental days, never less than 1.
    ///
    /// A same-day rental (date_to == date_from) counts as one day.
    pub fn day_count(&self) -> u32 {
        let days = (self.date_to - self.date_from).num_days();
        days.max(1) as u32
    }
}

/// One selected item with its quantity.
///
/// The equipment snapshot is captured at add time; catalog rebuilds do not
/// reach into existing carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub equipment: EquipmentItem,
    pub quantity: u32,
}

/// A shopping cart. Empty lines and an unset period is the initial state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    #[serde(default)]
    pub lines: Vec<CartLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_period: Option<RentalPeriod>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Inserts a line for the item, or replaces the quantity on the
    /// existing line for that item id. Quantity is not clamped against
    /// availability here.
    pub fn add_or_update(&mut self, equipment: EquipmentItem, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.equipment.id == equipment.id) {
            line.equipment = equipment;
            line.quantity = quantity;
        } else {
            self.lines.push(CartLine { equipment, quantity });
        }
    }

    /// Removes the line for the item id. Returns true if a line was removed.
    pub fn remove(&mut self, item_id: u32) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.equipment.id != item_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.rental_period = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use rust_decimal_macros::dec;

    fn item(id: u32) -> EquipmentItem {
        EquipmentItem {
            id,
            name: format!("Item {}", id),
            category: Category::Camera,
            description: None,
            day_rate: dec!(100),
            weekly_rate: dec!(425),
            image: None,
            restricted: false,
            available_count: 1,
            notes: None,
        }
    }

    #[test]
    fn repeat_add_replaces_quantity_instead_of_appending() {
        let mut cart = Cart::default();
        cart.add_or_update(item(1), 2);
        cart.add_or_update(item(1), 5);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 5);
    }

    #[test]
    fn removing_last_line_empties_the_cart() {
        let mut cart = Cart::default();
        cart.add_or_update(item(1), 1);
        assert!(!cart.is_empty());
        assert!(cart.remove(1));
        assert!(cart.is_empty());
        assert!(!cart.remove(1));
    }

    #[test]
    fn day_count_is_never_below_one() {
        let d = |s: &str| s.parse::<NaiveDate>().unwrap();
        let same_day = RentalPeriod {
            date_from: d("2026-03-02"),
            date_to: d("2026-03-02"),
        };
        assert_eq!(same_day.day_count(), 1);

        let week = RentalPeriod {
            date_from: d("2026-03-02"),
            date_to: d("2026-03-09"),
        };
        assert_eq!(week.day_count(), 7);
    }
}
