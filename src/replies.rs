//! User-facing reply texts (Telegram Markdown).

use crate::affiliate::AffiliateLinkSet;

pub const WELCOME: &str = "🛍️ *Welcome!* Use:\n\
/search [product] - Compare prices\n\
/track [URL] - Track price drops\n\
/mytracks - Show your tracked products";

pub const SEARCH_USAGE: &str = "Please tell me what to look for, e.g. `/search wireless earbuds`";
pub const TRACK_USAGE: &str = "Please send a product link, e.g. `/track https://shop.example/item`";
pub const TRACK_INVALID_URL: &str = "That doesn't look like a link. Send a full http(s) URL.";
pub const TRACK_ADDED: &str = "✅ Tracking this product! I'll alert you if the price drops.";
pub const TRACK_ALREADY: &str = "👍 You're already tracking this product.";
pub const TRACK_FAILED: &str = "⚠️ Couldn't save that right now. Please try again later.";
pub const NO_TRACKS: &str = "You're not tracking anything yet. Use /track [URL] to start.";
pub const UNKNOWN_COMMAND: &str = "I didn't get that. Send /start to see what I can do.";
pub const APOLOGY: &str = "😔 Sorry, something went wrong. Please try again.";

/// Backslash-escape the legacy Markdown entity characters so user and URL
/// text is delivered verbatim.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `/search` results block.
pub fn search_results(links: &AffiliateLinkSet) -> String {
    let mut out = String::from("🔍 Results:");
    for link in links.iter() {
        out.push_str(&format!("\n{}: {}", link.retailer.name(), escape_markdown(&link.url)));
    }
    out
}

/// `/mytracks` listing, numbered in insertion order.
pub fn tracked_list(urls: &[String]) -> String {
    let mut out = format!("📋 You're tracking {}:\n", urls.len());
    for (i, url) in urls.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, escape_markdown(url)));
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown_entity_chars() {
        assert_eq!(escape_markdown("a_b*c`d[e]"), "a\\_b\\*c\\`d\\[e]");
        assert_eq!(escape_markdown("https://shop.example/a"), "https://shop.example/a");
    }

    #[test]
    fn test_tracked_list_escapes_underscores() {
        let urls = vec!["https://shop.example/item_a?ref_=1".to_string()];
        assert_eq!(
            tracked_list(&urls),
            "📋 You're tracking 1:\n1. https://shop.example/item\\_a?ref\\_=1"
        );
    }
}
