use crate::affiliate::generate_affiliate_links;
use crate::replies;
use dealbot_core::config::AffiliateConfig;

/// `/search <product>`: affiliate links for the product, or usage if empty.
pub(super) fn handle_search(affiliate: &AffiliateConfig, query: &str) -> String {
    if query.is_empty() {
        return replies::SEARCH_USAGE.to_string();
    }
    let links = generate_affiliate_links(query, affiliate);
    replies::search_results(&links)
}
