//! External collaborators behind injected ports
//!
//! Everything the core calls out to lives here: the tabular feed, the
//! image-folder listing, the PDF render service, the mail relay and the
//! cart snapshot store. Each is a trait with a production implementation;
//! services only ever see the trait.

pub mod feed;
pub mod images;
pub mod mail;
pub mod pdf;
pub mod store;

pub use feed::{FeedProvider, HttpFeed};
pub use images::{HttpImageManifest, ImageManifestProvider};
pub use mail::{MailTransport, OutgoingEmail, SmtpMailer};
pub use pdf::{HttpPdfRenderer, PdfRenderer};
pub use store::{CartStore, MemoryCartStore, RedisCartStore};
