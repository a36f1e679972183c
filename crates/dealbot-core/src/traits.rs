use crate::{
    error::BotError,
    message::{IncomingMessage, OutgoingMessage},
};
use async_trait::async_trait;

/// Messaging channel trait.
///
/// Every messaging platform implements this trait to receive commands
/// and send replies. The gateway only talks to channels through it.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, BotError>;

    /// Send a reply back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), BotError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), BotError>;
}
