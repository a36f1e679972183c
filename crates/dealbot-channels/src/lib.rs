//! # dealbot-channels
//!
//! Messaging platform integrations for dealbot.

pub mod telegram;
