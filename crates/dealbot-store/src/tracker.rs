use crate::{KvStore, MemoryStore, StoreError, TrackOutcome, TrackStore, TrackedList};
use dealbot_core::config::{StoreBackend, StoreConfig};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User whose list [`Tracker::health_check`] reads. Real Telegram ids are positive.
pub const HEALTH_CHECK_USER: i64 = 0;

/// Get-or-default and add operations over a [`TrackStore`].
///
/// The read-modify-write in [`Tracker::add_track`] is not serialized:
/// two concurrent adds for the same user can lose one update.
#[derive(Clone)]
pub struct Tracker {
    store: Arc<dyn TrackStore>,
}

impl Tracker {
    pub fn new(store: Arc<dyn TrackStore>) -> Self {
        Self { store }
    }

    /// Build the backend selected in config.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn TrackStore> = match config.backend {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::Kv => Arc::new(KvStore::from_config(config)?),
        };
        info!("Tracked-item store: {}", store.name());
        Ok(Self::new(store))
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// The user's list, or an empty one. Store failures are logged, never returned.
    pub async fn get_tracks(&self, user_id: i64) -> TrackedList {
        match self.store.load(user_id).await {
            Ok(Some(list)) => list,
            Ok(None) => TrackedList::new(user_id),
            Err(e) => {
                warn!("failed to load tracks for user {user_id}: {e}");
                TrackedList::new(user_id)
            }
        }
    }

    /// Append `url` to the user's list and persist it.
    ///
    /// A failed read aborts the add, so an unreachable store can never be
    /// overwritten with a one-item list.
    pub async fn add_track(&self, user_id: i64, url: &str) -> Result<TrackOutcome, StoreError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(StoreError::InvalidUrl("empty url".into()));
        }

        let mut list = match self.store.load(user_id).await {
            Ok(list) => list.unwrap_or_else(|| TrackedList::new(user_id)),
            Err(e) => {
                warn!("failed to load tracks for user {user_id} before add: {e}");
                return Err(e);
            }
        };

        if !list.push(url) {
            debug!("user {user_id} already tracks {url}");
            return Ok(TrackOutcome::AlreadyTracked);
        }

        if let Err(e) = self.store.save(&list).await {
            warn!("failed to save tracks for user {user_id}: {e}");
            return Err(e);
        }

        info!("user {user_id} now tracks {} url(s)", list.len());
        Ok(TrackOutcome::Added)
    }

    /// Check the backend with a real read of [`HEALTH_CHECK_USER`]'s list.
    /// For the KV backend this is a `GET {base}/kv/user:0`; nothing is written.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.store.load(HEALTH_CHECK_USER).await.map(|_| ())
    }
}
