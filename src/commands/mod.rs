//! Bot commands: an explicit name → handler table, matched exactly.

mod search;
mod track;


use crate::replies;
use dealbot_channels::telegram::MenuCommand;
use dealbot_core::{config::AffiliateConfig, error::BotError};
use dealbot_store::Tracker;

/// Grouped context for command execution.
pub struct CommandContext<'a> {
    pub tracker: &'a Tracker,
    pub affiliate: &'a AffiliateConfig,
    pub sender_id: i64,
    pub text: &'a str,
}

/// Known bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Search,
    Track,
    MyTracks,
}

/// One row of the command table.
pub struct CommandEntry {
    pub name: &'static str,
    pub command: Command,
    pub description: &'static str,
    /// Shown in Telegram's autocomplete menu.
    pub in_menu: bool,
}

pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: "/start",
        command: Command::Start,
        description: "Show what I can do",
        in_menu: true,
    },
    CommandEntry {
        name: "/help",
        command: Command::Start,
        description: "Show what I can do",
        in_menu: false,
    },
    CommandEntry {
        name: "/search",
        command: Command::Search,
        description: "Compare prices for a product",
        in_menu: true,
    },
    CommandEntry {
        name: "/track",
        command: Command::Track,
        description: "Track a product link for price drops",
        in_menu: true,
    },
    CommandEntry {
        name: "/mytracks",
        command: Command::MyTracks,
        description: "List your tracked products",
        in_menu: true,
    },
];

impl Command {
    /// Parse a command from message text. Returns `None` for anything not in
    /// [`COMMANDS`].
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        // Strip @botname suffix (e.g. "/track@deal_bot" → "/track").
        let cmd = first.split('@').next().unwrap_or(first);
        COMMANDS
            .iter()
            .find(|entry| entry.name == cmd)
            .map(|entry| entry.command)
    }
}

/// Everything after the command word, trimmed.
pub fn argument(text: &str) -> &str {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(i) => text[i..].trim(),
        None => "",
    }
}

/// Entries for Telegram's `setMyCommands`.
pub fn menu() -> Vec<MenuCommand> {
    COMMANDS
        .iter()
        .filter(|entry| entry.in_menu)
        .map(|entry| MenuCommand {
            command: entry.name.trim_start_matches('/').to_string(),
            description: entry.description.to_string(),
        })
        .collect()
}

/// Handle a command and return the reply text.
pub async fn handle(cmd: Command, ctx: &CommandContext<'_>) -> Result<String, BotError> {
    match cmd {
        Command::Start => Ok(replies::WELCOME.to_string()),
        Command::Search => Ok(search::handle_search(ctx.affiliate, argument(ctx.text))),
        Command::Track => track::handle_track(ctx.tracker, ctx.sender_id, argument(ctx.text)).await,
        Command::MyTracks => Ok(track::handle_mytracks(ctx.tracker, ctx.sender_id).await),
    }
}
