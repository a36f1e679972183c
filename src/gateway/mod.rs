//! Gateway — the main event loop connecting channels, commands, and the store.
//!
//! Every message is handled in its own task. A handler error or panic turns
//! into a logged apology and never reaches the channel loop.


use crate::commands::{self, Command, CommandContext};
use crate::replies;
use dealbot_core::{
    config::AffiliateConfig,
    error::BotError,
    message::{IncomingMessage, OutgoingMessage},
    traits::Channel,
};
use dealbot_store::Tracker;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Routes messages between channels and command handlers.
pub struct Gateway {
    channels: HashMap<String, Arc<dyn Channel>>,
    tracker: Tracker,
    affiliate: AffiliateConfig,
    uptime: Instant,
}

impl Gateway {
    pub fn new(
        channels: HashMap<String, Arc<dyn Channel>>,
        tracker: Tracker,
        affiliate: AffiliateConfig,
    ) -> Self {
        Self {
            channels,
            tracker,
            affiliate,
            uptime: Instant::now(),
        }
    }

    /// Run the main event loop until Ctrl-C or every channel closes.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "dealbot gateway running | channels: {} | store: {}",
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
            self.tracker.store_name(),
        );

        let (tx, mut rx) = mpsc::channel::<IncomingMessage>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(msg) = channel_rx.recv().await {
                    if tx.send(msg).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        loop {
            tokio::select! {
                incoming = rx.recv() => match incoming {
                    Some(incoming) => {
                        let gw = self.clone();
                        tokio::spawn(async move {
                            gw.dispatch_message(incoming).await;
                        });
                    }
                    None => {
                        warn!("all channels closed");
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Handle one message in an isolated task and send the reply.
    pub(crate) async fn dispatch_message(self: Arc<Self>, incoming: IncomingMessage) {
        info!(
            "[{}] {} {} says: {}",
            incoming.channel,
            incoming.id,
            incoming.sender_name.as_deref().unwrap_or("unknown"),
            incoming.preview()
        );

        let gw = self.clone();
        let msg = incoming.clone();
        let handler = tokio::spawn(async move { gw.respond(&msg).await });

        let reply = match handler.await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                error!(
                    "handler failed for {} ({}) on {}: {e}",
                    incoming.id, incoming.sender_id, incoming.channel
                );
                replies::APOLOGY.to_string()
            }
            Err(e) => {
                error!(
                    "handler panicked for {} ({}) on {}: {e}",
                    incoming.id, incoming.sender_id, incoming.channel
                );
                replies::APOLOGY.to_string()
            }
        };

        self.send_text(&incoming, &reply).await;
    }

    /// Compute the reply for a message.
    pub(crate) async fn respond(&self, incoming: &IncomingMessage) -> Result<String, BotError> {
        let Some(cmd) = Command::parse(&incoming.text) else {
            return Ok(replies::UNKNOWN_COMMAND.to_string());
        };

        let ctx = CommandContext {
            tracker: &self.tracker,
            affiliate: &self.affiliate,
            sender_id: incoming.sender_id,
            text: &incoming.text,
        };
        commands::handle(cmd, &ctx).await
    }

    async fn shutdown(&self) {
        info!("Shutting down after {}s...", self.uptime.elapsed().as_secs());

        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }

        info!("Shutdown complete.");
    }

    /// Send a text reply back to the sender's chat.
    async fn send_text(&self, incoming: &IncomingMessage, text: &str) {
        let Some(channel) = self.channels.get(&incoming.channel) else {
            warn!("no channel named {} for reply", incoming.channel);
            return;
        };
        match channel.send(OutgoingMessage::reply_to(incoming, text)).await {
            Ok(()) => debug!("replied to {} in {}ms", incoming.id, incoming.elapsed_ms()),
            Err(e) => error!("failed to send reply to {}: {e}", incoming.id),
        }
    }
}
