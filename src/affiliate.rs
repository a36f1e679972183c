//! Affiliate search links.
//!
//! Pure string building: no I/O, no validation. Callers reject empty
//! queries before getting here.

use dealbot_core::config::AffiliateConfig;
use std::fmt;

/// Retailers a search is fanned out to, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retailer {
    Amazon,
    AliExpress,
}

impl Retailer {
    pub const ALL: [Retailer; 2] = [Retailer::Amazon, Retailer::AliExpress];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::AliExpress => "AliExpress",
        }
    }

    /// Search page URL for `query` carrying this retailer's affiliate id.
    fn search_url(&self, query: &str, ids: &AffiliateConfig) -> String {
        match self {
            Self::Amazon => format!("https://www.amazon.com/s?k={query}&tag={}", ids.amazon_tag),
            Self::AliExpress => format!(
                "https://www.aliexpress.com/wholesale?SearchText={query}&aff_fcid={}",
                ids.aliexpress_id
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateLink {
    pub retailer: Retailer,
    pub url: String,
}

/// One link per retailer for a single query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateLinkSet {
    links: Vec<AffiliateLink>,
}

impl AffiliateLinkSet {
    pub fn iter(&self) -> impl Iterator<Item = &AffiliateLink> {
        self.links.iter()
    }
}

/// One `Store: url` line per retailer, unescaped (CLI output).
impl fmt::Display for AffiliateLinkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .iter()
            .map(|l| format!("{}: {}", l.retailer.name(), l.url))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Build the search links for `query`. The query is embedded as given.
pub fn generate_affiliate_links(query: &str, ids: &AffiliateConfig) -> AffiliateLinkSet {
    let links = Retailer::ALL
        .iter()
        .map(|retailer| AffiliateLink {
            retailer: *retailer,
            url: retailer.search_url(query, ids),
        })
        .collect();
    AffiliateLinkSet { links }
}
