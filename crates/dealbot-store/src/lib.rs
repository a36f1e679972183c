//! # dealbot-store
//!
//! Per-user tracked URL lists.
//!
//! - `tracked` — the `TrackedList` value and add outcomes
//! - `memory` — process-local backend
//! - `kv` — remote HTTP key-value backend
//! - `tracker` — the get-or-default / add facade handlers use

pub mod error;
pub mod kv;
pub mod memory;
pub mod tracked;
pub mod tracker;


pub use error::StoreError;
pub use kv::KvStore;
pub use memory::MemoryStore;
pub use tracked::{TrackOutcome, TrackedList};
pub use tracker::{Tracker, HEALTH_CHECK_USER};

use async_trait::async_trait;

/// Persistence adapter for tracked lists.
///
/// Adapters report every failure; deciding what the user sees is left
/// to [`Tracker`].
#[async_trait]
pub trait TrackStore: Send + Sync {
    /// Backend name for logs and `status`.
    fn name(&self) -> &str;

    /// Fetch a user's list. `Ok(None)` means nothing stored yet.
    async fn load(&self, user_id: i64) -> Result<Option<TrackedList>, StoreError>;

    /// Replace the stored list for `list.user_id()`.
    async fn save(&self, list: &TrackedList) -> Result<(), StoreError>;
}
