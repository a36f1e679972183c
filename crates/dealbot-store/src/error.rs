use dealbot_core::error::BotError;
use thiserror::Error;

/// Failure reasons from a [`TrackStore`](crate::TrackStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Request never got a response (connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(String),

    /// Backing store answered with an unexpected status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not a tracked-list record.
    #[error("decode error: {0}")]
    Decode(String),

    /// URL rejected before touching the store.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl From<StoreError> for BotError {
    fn from(e: StoreError) -> Self {
        BotError::Store(e.to_string())
    }
}
