//! Cart aggregation service
//!
//! Maintains selected items with quantities and one shared rental period
//! per cart. Every mutation persists a snapshot through the injected store
//! so a cart survives reloads; a corrupted snapshot loads as an empty
//! cart, never as an error.

use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Cart, EquipmentItem, RentalPeriod};
use crate::pricing;
use crate::providers::CartStore;

#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn CartStore>,
}

impl CartService {
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self { store }
    }

    /// Load a cart snapshot; missing or unparseable snapshots are empty carts
    pub async fn get(&self, cart_id: Uuid) -> AppResult<Cart> {
        match self.store.get(&cart_id.to_string()).await? {
            Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Discarding corrupt cart snapshot for {}: {}", cart_id, e);
                Cart::default()
            })),
            None => Ok(Cart::default()),
        }
    }

    async fn save(&self, cart_id: Uuid, cart: &Cart) -> AppResult<()> {
        let raw = serde_json::to_string(cart)
            .map_err(|e| AppError::Internal(format!("Failed to serialize cart: {}", e)))?;
        self.store.set(&cart_id.to_string(), &raw).await
    }

    /// Insert a line or replace the quantity on the existing line for the
    /// same item. Quantity is not clamped against availability; warning
    /// the user is the caller's concern.
    pub async fn add_or_update(
        &self,
        cart_id: Uuid,
        equipment: EquipmentItem,
        quantity: u32,
    ) -> AppResult<Cart> {
        if quantity == 0 {
            return Err(AppError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }
        let mut cart = self.get(cart_id).await?;
        cart.add_or_update(equipment, quantity);
        self.save(cart_id, &cart).await?;
        Ok(cart)
    }

    /// Remove the line for an item; removing the last line leaves an empty cart
    pub async fn remove(&self, cart_id: Uuid, item_id: u32) -> AppResult<Cart> {
        let mut cart = self.get(cart_id).await?;
        cart.remove(item_id);
        self.save(cart_id, &cart).await?;
        Ok(cart)
    }

    /// Set the rental window shared by all lines
    pub async fn set_rental_period(
        &self,
        cart_id: Uuid,
        period: RentalPeriod,
    ) -> AppResult<Cart> {
        if period.date_to < period.date_from {
            return Err(AppError::Validation(
                "Rental end date must not be before the start date".to_string(),
            ));
        }
        let mut cart = self.get(cart_id).await?;
        cart.rental_period = Some(period);
        self.save(cart_id, &cart).await?;
        Ok(cart)
    }

    /// Drop the cart entirely
    pub async fn clear(&self, cart_id: Uuid) -> AppResult<()> {
        self.store.clear(&cart_id.to_string()).await
    }

    /// Total over all lines for the shared rental period; `None` until a
    /// period is chosen. Checkout must not proceed without one.
    pub fn total_price(cart: &Cart) -> Option<Decimal> {
        let days = cart.rental_period?.day_count();
        Some(
            cart.lines
                .iter()
                .map(|line| {
                    pricing::price(line.equipment.day_rate, days) * Decimal::from(line.quantity)
                })
                .sum(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::providers::MemoryCartStore;
    use rust_decimal_macros::dec;

    fn item(id: u32, day_rate: Decimal) -> EquipmentItem {
        EquipmentItem {
            id,
            name: format!("Item {}", id),
            category: Category::Camera,
            description: None,
            day_rate,
            weekly_rate: pricing::weekly_rate(day_rate),
            image: None,
            restricted: false,
            available_count: 2,
            notes: None,
        }
    }

    fn period(from: &str, to: &str) -> RentalPeriod {
        RentalPeriod {
            date_from: from.parse().unwrap(),
            date_to: to.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn repeat_add_keeps_a_single_line_with_the_latest_quantity() {
        let service = CartService::new(Arc::new(MemoryCartStore::new()));
        let cart_id = Uuid::new_v4();

        service.add_or_update(cart_id, item(1, dec!(100)), 1).await.unwrap();
        let cart = service.add_or_update(cart_id, item(1, dec!(100)), 3).await.unwrap();

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 3);
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let service = CartService::new(Arc::new(MemoryCartStore::new()));
        let result = service
            .add_or_update(Uuid::new_v4(), item(1, dec!(100)), 0)
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn snapshots_survive_a_new_service_instance() {
        let store = Arc::new(MemoryCartStore::new());
        let cart_id = Uuid::new_v4();

        let service = CartService::new(store.clone());
        service.add_or_update(cart_id, item(1, dec!(100)), 2).await.unwrap();
        service
            .set_rental_period(cart_id, period("2026-09-07", "2026-09-09"))
            .await
            .unwrap();

        // simulate a reload: fresh service over the same store
        let reloaded = CartService::new(store);
        let cart = reloaded.get(cart_id).await.unwrap();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.rental_period, Some(period("2026-09-07", "2026-09-09")));
    }

    #[tokio::test]
    async fn corrupt_snapshot_loads_as_an_empty_cart() {
        let store = Arc::new(MemoryCartStore::new());
        let cart_id = Uuid::new_v4();
        store.set(&cart_id.to_string(), "{not json").await.unwrap();

        let service = CartService::new(store);
        let cart = service.get(cart_id).await.unwrap();
        assert!(cart.is_empty());
        assert!(cart.rental_period.is_none());
    }

    #[tokio::test]
    async fn backwards_rental_period_is_rejected() {
        let service = CartService::new(Arc::new(MemoryCartStore::new()));
        let result = service
            .set_rental_period(Uuid::new_v4(), period("2026-09-09", "2026-09-07"))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn totals_require_a_rental_period() {
        let service = CartService::new(Arc::new(MemoryCartStore::new()));
        let cart_id = Uuid::new_v4();

        let cart = service.add_or_update(cart_id, item(1, dec!(100)), 2).await.unwrap();
        assert_eq!(CartService::total_price(&cart), None);

        let cart = service
            .set_rental_period(cart_id, period("2026-09-07", "2026-09-14"))
            .await
            .unwrap();
        // 7 days at rate 100 = 625 per unit, 2 units
        assert_eq!(CartService::total_price(&cart), Some(dec!(1250)));
    }

    #[tokio::test]
    async fn clear_resets_to_the_initial_state() {
        let service = CartService::new(Arc::new(MemoryCartStore::new()));
        let cart_id = Uuid::new_v4();

        service.add_or_update(cart_id, item(1, dec!(100)), 1).await.unwrap();
        service.clear(cart_id).await.unwrap();

        let cart = service.get(cart_id).await.unwrap();
        assert!(cart.is_empty());
        assert!(cart.rental_period.is_none());
    }
}
