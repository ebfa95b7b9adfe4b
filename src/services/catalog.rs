//! Catalog service
//!
//! Owns the published catalog: fetches the feed and the image manifest,
//! runs the sheet pipeline, and republishes a fresh immutable snapshot
//! whenever the result differs materially from the last one. Polling is
//! tied to subscribers: the first subscription starts the timer, dropping
//! the last one stops it.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};

use crate::error::AppResult;
use crate::models::EquipmentItem;
use crate::providers::{FeedProvider, ImageManifestProvider};
use crate::sheet;

/// An immutable, shareable catalog snapshot
pub type Snapshot = Arc<Vec<EquipmentItem>>;

/// Bundled snapshot used once if the very first load fails or comes back empty
static FALLBACK_CATALOG: &str = include_str!("../../data/fallback_catalog.json");

#[derive(Clone)]
pub struct CatalogService {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    feed: Arc<dyn FeedProvider>,
    images: Arc<dyn ImageManifestProvider>,
    poll_interval: Duration,
    snapshot_tx: watch::Sender<Snapshot>,
    poller: Mutex<PollerState>,
}

#[derive(Default)]
struct PollerState {
    subscribers: usize,
    task: Option<JoinHandle<()>>,
}

/// A live subscription to catalog snapshots. Holding it keeps the poll
/// timer running; dropping the last one stops it.
pub struct CatalogSubscription {
    rx: watch::Receiver<Snapshot>,
    _guard: SubscriberGuard,
}

struct SubscriberGuard {
    inner: Arc<CatalogInner>,
}

impl CatalogService {
    pub fn new(
        feed: Arc<dyn FeedProvider>,
        images: Arc<dyn ImageManifestProvider>,
        poll_interval: Duration,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(Snapshot::default());
        Self {
            inner: Arc::new(CatalogInner {
                feed,
                images,
                poll_interval,
                snapshot_tx,
                poller: Mutex::new(PollerState::default()),
            }),
        }
    }

    /// Initial catalog load. Falls back to the bundled snapshot when the
    /// first fetch fails or yields zero items; the fallback is one-shot
    /// and not retried here (the poll loop keeps trying the live feed).
    pub async fn load_initial(&self) {
        match build_snapshot(&self.inner).await {
            Ok(items) if !items.is_empty() => {
                tracing::info!("Loaded catalog with {} items", items.len());
                self.inner.snapshot_tx.send_replace(Arc::new(items));
            }
            Ok(_) => {
                tracing::warn!("Catalog feed yielded no items, using bundled snapshot");
                self.inner.snapshot_tx.send_replace(Arc::new(fallback_items()));
            }
            Err(e) => {
                tracing::warn!("Catalog feed unavailable ({}), using bundled snapshot", e);
                self.inner.snapshot_tx.send_replace(Arc::new(fallback_items()));
            }
        }
    }

    /// The last published snapshot
    pub fn current(&self) -> Snapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Look up an item by id in the current snapshot
    pub fn item(&self, id: u32) -> Option<EquipmentItem> {
        self.current().iter().find(|item| item.id == id).cloned()
    }

    /// Subscribe to snapshot updates. The first live subscription starts
    /// the poll timer; re-subscribing after it stopped restarts it.
    pub fn subscribe(&self) -> CatalogSubscription {
        let rx = self.inner.snapshot_tx.subscribe();
        {
            let mut poller = self
                .inner
                .poller
                .lock()
                .expect("catalog poller lock poisoned");
            poller.subscribers += 1;
            if poller.task.is_none() {
                tracing::debug!("Starting catalog poll timer");
                poller.task = Some(tokio::spawn(poll_loop(self.inner.clone())));
            }
        }
        CatalogSubscription {
            rx,
            _guard: SubscriberGuard {
                inner: self.inner.clone(),
            },
        }
    }

    #[cfg(test)]
    fn polling_active(&self) -> bool {
        self.inner
            .poller
            .lock()
            .map(|p| p.task.is_some())
            .unwrap_or(false)
    }
}

impl CatalogSubscription {
    /// Wait for the next published snapshot
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// The latest snapshot, marking it as seen
    pub fn latest(&mut self) -> Snapshot {
        self.rx.borrow_and_update().clone()
    }

    /// Turn the subscription into a stream of snapshots (starting with the
    /// current one); the stream keeps the poll timer alive until dropped
    pub fn into_stream(self) -> impl Stream<Item = Snapshot> {
        let CatalogSubscription { rx, _guard } = self;
        WatchStream::new(rx).map(move |snapshot| {
            let _keep_alive = &_guard;
            snapshot
        })
    }
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        if let Ok(mut poller) = self.inner.poller.lock() {
            poller.subscribers = poller.subscribers.saturating_sub(1);
            if poller.subscribers == 0 {
                if let Some(task) = poller.task.take() {
                    tracing::debug!("Stopping catalog poll timer");
                    task.abort();
                }
            }
        }
    }
}

/// Run the full pipeline once: manifest + feed -> parse -> normalize ->
/// aggregate. Manifest failures degrade to an empty mapping inside the
/// provider; feed failures propagate.
async fn build_snapshot(inner: &CatalogInner) -> AppResult<Vec<EquipmentItem>> {
    let manifest = inner.images.fetch().await;
    let raw = inner.feed.fetch().await?;
    let rows = sheet::parse_delimited(&raw);
    let drafts = sheet::normalize_rows(&rows, &manifest);
    Ok(sheet::aggregate(drafts))
}

/// Whether two snapshots differ materially (name, image, category, day
/// rate or description on any item)
fn items_changed(a: &[EquipmentItem], b: &[EquipmentItem]) -> bool {
    if a.len() != b.len() {
        return true;
    }
    a.iter().zip(b.iter()).any(|(x, y)| {
        x.name != y.name
            || x.image != y.image
            || x.category != y.category
            || x.day_rate != y.day_rate
            || x.description != y.description
    })
}

fn fallback_items() -> Vec<EquipmentItem> {
    serde_json::from_str(FALLBACK_CATALOG).unwrap_or_else(|e| {
        tracing::error!("Bundled catalog snapshot is unreadable: {}", e);
        Vec::new()
    })
}

async fn poll_loop(inner: Arc<CatalogInner>) {
    let mut interval = tokio::time::interval(inner.poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // consume the immediate first tick; polls start one interval out
    interval.tick().await;

    loop {
        interval.tick().await;
        match build_snapshot(&inner).await {
            Ok(items) if !items.is_empty() => {
                let changed = items_changed(&inner.snapshot_tx.borrow(), &items);
                if changed {
                    tracing::info!("Catalog changed, publishing {} items", items.len());
                    inner.snapshot_tx.send_replace(Arc::new(items));
                }
            }
            // an empty poll result is ignored, the last snapshot stands
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("Catalog poll failed, retrying next tick: {}", e);
            }
        }
    }
}
