//! Telegram Bot API channel.
//!
//! Uses long polling via `getUpdates` and `sendMessage` for responses.
//! Docs: <https://core.telegram.org/bots/api>

mod polling;
pub(crate) mod send;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use dealbot_core::config::TelegramConfig;
use std::sync::Arc;
use tokio::sync::Mutex;

/// An entry in the bot's autocomplete menu (`setMyCommands`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCommand {
    /// Command name without the leading `/`.
    pub command: String,
    pub description: String,
}

/// Telegram channel using the Bot API with long polling.
pub struct TelegramChannel {
    client: reqwest::Client,
    base_url: String,
    /// Tracks the last update_id to avoid reprocessing.
    last_update_id: Arc<Mutex<Option<i64>>>,
    menu: Vec<MenuCommand>,
}

impl TelegramChannel {
    /// Create a new Telegram channel from config.
    pub fn new(config: &TelegramConfig) -> Self {
        let base_url = format!(
            "{}/bot{}",
            config.api_url.trim_end_matches('/'),
            config.bot_token
        );
        Self {
            client: reqwest::Client::new(),
            base_url,
            last_update_id: Arc::new(Mutex::new(None)),
            menu: Vec::new(),
        }
    }

    /// Commands to register with Telegram when the channel starts.
    pub fn with_menu(mut self, menu: Vec<MenuCommand>) -> Self {
        self.menu = menu;
        self
    }
}
