use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An incoming message from a channel.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Per-message id, carried on every log line about this message.
    pub id: Uuid,
    /// Channel name (e.g. "telegram").
    pub channel: String,
    /// Platform user id. Tracked lists are keyed by this.
    pub sender_id: i64,
    /// Human-readable sender name.
    pub sender_name: Option<String>,
    /// Message text content.
    pub text: String,
    /// When the bot received the message.
    pub timestamp: DateTime<Utc>,
    /// Chat to route the reply to (Telegram chat_id).
    pub reply_target: i64,
}

impl IncomingMessage {
    /// Build a message received right now.
    pub fn new(channel: &str, sender_id: i64, reply_target: i64, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: channel.to_string(),
            sender_id,
            sender_name: None,
            text: text.to_string(),
            timestamp: Utc::now(),
            reply_target,
        }
    }

    /// Milliseconds since the message was received.
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.timestamp).num_milliseconds()
    }

    /// First 60 characters of the text, for log lines.
    pub fn preview(&self) -> String {
        if self.text.chars().count() > 60 {
            let truncated: String = self.text.chars().take(60).collect();
            format!("{truncated}...")
        } else {
            self.text.clone()
        }
    }
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub reply_target: i64,
    /// Suppress link previews under the reply.
    pub disable_preview: bool,
}

impl OutgoingMessage {
    /// A reply to `incoming` with link previews suppressed.
    pub fn reply_to(incoming: &IncomingMessage, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reply_target: incoming.reply_target,
            disable_preview: true,
        }
    }
}
