//! Affiliate link formatting.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::product::Product;

/// Affiliate link attached to a product in advise responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLink {
    pub retailer: String,
    pub url: String,
}

/// Builds retailer search links carrying the configured affiliate tag.
#[derive(Debug, Clone)]
pub struct AffiliateLinkBuilder {
    tag: String,
}

impl AffiliateLinkBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Link for a product. Unknown retailers get an Amazon search link.
    pub fn link_for(&self, product: &Product) -> AffiliateLink {
        let (retailer, base, query_key, tag_key) = match product.retailer.to_ascii_lowercase().as_str() {
            "flipkart" => ("flipkart", "https://www.flipkart.com/search", "q", "affid"),
            _ => ("amazon", "https://www.amazon.in/s", "k", "tag"),
        };

        let url = Url::parse_with_params(base, &[(query_key, product.name.as_str()), (tag_key, self.tag.as_str())])
            .map(String::from)
            // Static bases; only a bad base can fail.
            .unwrap_or_else(|_| base.to_string());

        AffiliateLink {
            retailer: retailer.to_string(),
            url,
        }
    }
}
