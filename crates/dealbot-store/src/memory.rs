//! Process-local backend. Contents are lost on restart.

use crate::{StoreError, TrackStore, TrackedList};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Tracked lists held in a map, one entry per user.
#[derive(Default)]
pub struct MemoryStore {
    lists: Mutex<HashMap<i64, Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a stored list.
    #[cfg(test)]
    pub(crate) async fn user_count(&self) -> usize {
        self.lists.lock().await.len()
    }
}

#[async_trait]
impl TrackStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self, user_id: i64) -> Result<Option<TrackedList>, StoreError> {
        let lists = self.lists.lock().await;
        Ok(lists
            .get(&user_id)
            .map(|urls| TrackedList::from_urls(user_id, urls.iter().cloned())))
    }

    async fn save(&self, list: &TrackedList) -> Result<(), StoreError> {
        self.lists
            .lock()
            .await
            .insert(list.user_id(), list.urls().to_vec());
        Ok(())
    }
}
