//! Cart snapshot store
//!
//! Carts survive page reloads through a key-value snapshot written on
//! every mutation. The store is a narrow get/set/clear port so the cart
//! aggregator can be tested without any real storage behind it.

use async_trait::async_trait;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};

/// Snapshots are kept for 30 days of inactivity
const CART_TTL_SECS: u64 = 30 * 24 * 3600;

/// Key-value persistence port for cart snapshots
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;
    async fn clear(&self, key: &str) -> AppResult<()>;
}

/// Redis-backed store
#[derive(Clone)]
pub struct RedisCartStore {
    client: redis::Client,
}

impl RedisCartStore {
    /// Create a store and verify the connection
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }

    fn storage_key(key: &str) -> String {
        format!("cart:{}", key)
    }
}

#[async_trait]
impl CartStore for RedisCartStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection().await?;
        conn.get(Self::storage_key(key))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read cart snapshot: {}", e)))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(Self::storage_key(key), value, CART_TTL_SECS)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write cart snapshot: {}", e)))?;
        Ok(())
    }

    async fn clear(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .del(Self::storage_key(key))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to clear cart snapshot: {}", e)))?;
        Ok(())
    }
}

/// In-memory store, used in tests and when no Redis URL is configured
#[derive(Default)]
pub struct MemoryCartStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Internal("Cart store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Internal("Cart store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self, key: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Internal("Cart store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
