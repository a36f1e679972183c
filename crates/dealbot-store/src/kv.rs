//! Remote key-value backend.
//!
//! - `GET  {base}/kv/user:{id}` → `200` with `{"tracks": [...]}`, or `404`
//! - `POST {base}/kv/user:{id}` with the same shape → `200`

use crate::{StoreError, TrackStore, TrackedList};
use async_trait::async_trait;
use dealbot_core::config::StoreConfig;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Stored value shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct KvRecord {
    #[serde(default)]
    tracks: Vec<String>,
}

/// Key under which a user's list is stored.
pub fn user_key(user_id: i64) -> String {
    format!("user:{user_id}")
}

/// HTTP client for the KV service.
pub struct KvStore {
    client: reqwest::Client,
    base_url: String,
}

impl KvStore {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    fn key_url(&self, user_id: i64) -> String {
        format!("{}/kv/{}", self.base_url, user_key(user_id))
    }
}

#[async_trait]
impl TrackStore for KvStore {
    fn name(&self) -> &str {
        "kv"
    }

    async fn load(&self, user_id: i64) -> Result<Option<TrackedList>, StoreError> {
        let url = self.key_url(user_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("GET {url} failed: {e}")))?;

        let status = resp.status();
        match status {
            StatusCode::OK => {
                let body = resp
                    .text()
                    .await
                    .map_err(|e| StoreError::Transport(format!("GET {url} body read: {e}")))?;
                let record: KvRecord = serde_json::from_str(&body)
                    .map_err(|e| StoreError::Decode(format!("{}: {e}", user_key(user_id))))?;
                Ok(Some(TrackedList::from_urls(user_id, record.tracks)))
            }
            StatusCode::NOT_FOUND => {
                debug!("kv: no record for {}", user_key(user_id));
                Ok(None)
            }
            _ => Err(StoreError::Status {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn save(&self, list: &TrackedList) -> Result<(), StoreError> {
        let url = self.key_url(list.user_id());
        let record = KvRecord {
            tracks: list.urls().to_vec(),
        };
        let resp = self
            .client
            .post(&url)
            .json(&record)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("POST {url} failed: {e}")))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn store_for(server: &MockServer) -> KvStore {
        KvStore::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_user_key_format() {
        assert_eq!(user_key(42), "user:42");
        assert_eq!(user_key(-7), "user:-7");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let store = KvStore::new("http://kv.local/", Duration::from_secs(1)).unwrap();
        assert_eq!(store.key_url(3), "http://kv.local/kv/user:3");
    }

    #[tokio::test]
    async fn test_load_existing_record() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/kv/user:42");
                then.status(200)
                    .json_body(json!({"tracks": ["https://a.example/1", "https://b.example/2"]}));
            })
            .await;

        let list = store_for(&server).load(42).await.unwrap().unwrap();
        mock.assert_async().await;
        assert_eq!(list.user_id(), 42);
        assert_eq!(list.urls(), ["https://a.example/1", "https://b.example/2"]);
    }

    #[tokio::test]
    async fn test_load_missing_tracks_field_is_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/kv/user:1");
                then.status(200).json_body(json!({"other": true}));
            })
            .await;

        let list = store_for(&server).load(1).await.unwrap().unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_load_not_found_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/kv/user:5");
                then.status(404);
            })
            .await;

        assert!(store_for(&server).load(5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_server_error_is_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/kv/user:5");
                then.status(500).body("boom");
            })
            .await;

        let err = store_for(&server).load(5).await.unwrap_err();
        match err {
            StoreError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_malformed_body_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/kv/user:8");
                then.status(200).body("not json");
            })
            .await;

        let err = store_for(&server).load(8).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_save_posts_record_shape() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/kv/user:42")
                    .json_body(json!({"tracks": ["https://a.example/1"]}));
                then.status(200);
            })
            .await;

        let list = TrackedList::from_urls(42, vec!["https://a.example/1".to_string()]);
        store_for(&server).save(&list).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_save_non_200_is_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/kv/user:42");
                then.status(503);
            })
            .await;

        let list = TrackedList::from_urls(42, vec!["x".to_string()]);
        let err = store_for(&server).save(&list).await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let store = KvStore::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = store.load(1).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)), "got {err:?}");
    }
}
