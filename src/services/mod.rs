//! Business logic services

pub mod booking;
pub mod cart;
pub mod catalog;
pub mod token;

pub use booking::BookingService;
pub use cart::CartService;
pub use catalog::{CatalogService, CatalogSubscription, Snapshot};

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::providers::{
    CartStore, FeedProvider, ImageManifestProvider, MailTransport, PdfRenderer,
};

/// All services wired together, shared through the application state
pub struct Services {
    pub catalog: CatalogService,
    pub cart: CartService,
    pub booking: BookingService,
}

impl Services {
    pub fn new(
        config: &AppConfig,
        feed: Arc<dyn FeedProvider>,
        images: Arc<dyn ImageManifestProvider>,
        cart_store: Arc<dyn CartStore>,
        pdf: Arc<dyn PdfRenderer>,
        mailer: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            catalog: CatalogService::new(
                feed,
                images,
                Duration::from_secs(config.feed.poll_interval_secs),
            ),
            cart: CartService::new(cart_store),
            booking: BookingService::new(pdf, mailer, config.booking.clone()),
        }
    }
}
