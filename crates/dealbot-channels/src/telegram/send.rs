//! Outbound Bot API calls: messages and command registration.

use super::TelegramChannel;
use dealbot_core::error::BotError;
use tracing::{debug, info, warn};

/// Telegram's per-message text limit.
const MAX_MESSAGE_LEN: usize = 4096;

impl TelegramChannel {
    /// Send a Markdown text message to a chat, split into chunks if needed.
    /// A chunk Telegram cannot parse as Markdown is re-sent as plain text;
    /// any other rejection, or a rejected resend, is an error.
    pub(crate) async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        disable_preview: bool,
    ) -> Result<(), BotError> {
        let url = format!("{}/sendMessage", self.base_url);

        for chunk in split_message(text, MAX_MESSAGE_LEN) {
            let body = serde_json::json!({
                "chat_id": chat_id,
                "text": chunk,
                "parse_mode": "Markdown",
                "disable_web_page_preview": disable_preview,
            });

            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| BotError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if status.is_success() {
                continue;
            }

            let error_text = resp.text().await.unwrap_or_default();
            if !error_text.contains("can't parse entities") {
                return Err(BotError::Channel(format!(
                    "telegram send got {status}: {error_text}"
                )));
            }

            debug!("Markdown parse failed, retrying as plain text");
            let plain_body = serde_json::json!({
                "chat_id": chat_id,
                "text": chunk,
                "disable_web_page_preview": disable_preview,
            });
            let resp = self
                .client
                .post(&url)
                .json(&plain_body)
                .send()
                .await
                .map_err(|e| BotError::Channel(format!("telegram send (plain) failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                return Err(BotError::Channel(format!(
                    "telegram send (plain) got {status}: {error_text}"
                )));
            }
        }

        Ok(())
    }

    /// Register the command menu with Telegram.
    /// Best-effort: logs failures but does not propagate errors.
    pub(crate) async fn register_commands(&self) {
        if self.menu.is_empty() {
            return;
        }

        let commands: Vec<serde_json::Value> = self
            .menu
            .iter()
            .map(|c| serde_json::json!({ "command": c.command, "description": c.description }))
            .collect();
        let body = serde_json::json!({ "commands": commands });

        let url = format!("{}/setMyCommands", self.base_url);
        match self.client.post(&url).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("registered {} Telegram bot commands", self.menu.len());
            }
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                warn!("failed to register Telegram bot commands: {body}");
            }
            Err(e) => {
                warn!("failed to register Telegram bot commands: {e}");
            }
        }
    }
}

/// Split a long message into chunks that respect Telegram's limit.
/// Prefers newline boundaries and never cuts inside a UTF-8 character.
pub(crate) fn split_message(text: &str, max_len: usize) -> Vec<&str> {
    if text.len() <= max_len {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + max_len).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let break_at = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .map(|i| start + i + 1)
                .unwrap_or(end)
        } else {
            end
        };
        chunks.push(&text[start..break_at]);
        start = break_at;
    }

    chunks
}
