use thiserror::Error;

/// Top-level error type for dealbot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Tracked-item store error.
    #[error("store error: {0}")]
    Store(String),

}
