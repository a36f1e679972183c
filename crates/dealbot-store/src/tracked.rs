/// URLs one user asked to track, in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedList {
    user_id: i64,
    urls: Vec<String>,
}

/// Result of a successful add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// URL appended and persisted.
    Added,
    /// URL was already in the list; nothing written.
    AlreadyTracked,
}

impl TrackedList {
    /// An empty list for `user_id`.
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            urls: Vec::new(),
        }
    }

    /// Build from stored URLs, dropping repeats but keeping first-seen order.
    pub fn from_urls(user_id: i64, urls: impl IntoIterator<Item = String>) -> Self {
        let mut list = Self::new(user_id);
        for url in urls {
            list.push(&url);
        }
        list
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|u| u == url)
    }

    /// Append `url` unless present. Returns whether the list changed.
    pub fn push(&mut self, url: &str) -> bool {
        if self.contains(url) {
            return false;
        }
        self.urls.push(url.to_string());
        true
    }
}
