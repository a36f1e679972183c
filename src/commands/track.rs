use crate::replies;
use dealbot_core::error::BotError;
use dealbot_store::{StoreError, TrackOutcome, Tracker};
use tracing::warn;

/// `/track <url>`: remember the first argument for this user.
pub(super) async fn handle_track(
    tracker: &Tracker,
    sender_id: i64,
    args: &str,
) -> Result<String, BotError> {
    let Some(raw) = args.split_whitespace().next() else {
        return Ok(replies::TRACK_USAGE.to_string());
    };
    if !is_product_url(raw) {
        return Ok(replies::TRACK_INVALID_URL.to_string());
    }

    match tracker.add_track(sender_id, raw).await {
        Ok(TrackOutcome::Added) => Ok(replies::TRACK_ADDED.to_string()),
        Ok(TrackOutcome::AlreadyTracked) => Ok(replies::TRACK_ALREADY.to_string()),
        Err(e @ StoreError::InvalidUrl(_)) => Err(e.into()),
        Err(e) => {
            warn!("track for user {sender_id} failed: {e}");
            Ok(replies::TRACK_FAILED.to_string())
        }
    }
}

/// `/mytracks`: the user's tracked URLs in the order they were added.
pub(super) async fn handle_mytracks(tracker: &Tracker, sender_id: i64) -> String {
    let list = tracker.get_tracks(sender_id).await;
    if list.is_empty() {
        return replies::NO_TRACKS.to_string();
    }
    replies::tracked_list(list.urls())
}

/// Absolute http(s) URL with a host.
fn is_product_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host_str().is_some(),
        Err(_) => false,
    }
}
