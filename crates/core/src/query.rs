//! Free-text shopping query -> [`ProductFilter`].
//!
//! The parser is deliberately shallow: it pulls out a budget ("under 50000",
//! "below ₹45,000", "<= 60k", "within 1.5 lakh"), maps a handful of category
//! words, and keeps the remaining non-stop-words as keywords.

use crate::error::{DomainError, DomainResult};
use crate::product::ProductFilter;

/// Upper bound on accepted query length (characters).
pub const MAX_QUERY_CHARS: usize = 500;

const BUDGET_MARKERS: &[&str] = &["under", "below", "within", "upto", "max", "budget", "<", "<=", "less"];

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "for", "me", "i", "want", "need", "best", "good", "buy", "with", "to", "up",
    "than", "show", "find", "suggest", "recommend", "please", "in", "of", "and", "is", "my", "some",
    "cheap", "top", "rs", "inr", "price", "around", "on", "which", "what", "should", "get",
    "thousand", "lakh", "lakhs", "lac",
];

const CATEGORIES: &[(&str, &str)] = &[
    ("laptop", "laptop"),
    ("laptops", "laptop"),
    ("notebook", "laptop"),
    ("phone", "smartphone"),
    ("phones", "smartphone"),
    ("smartphone", "smartphone"),
    ("smartphones", "smartphone"),
    ("mobile", "smartphone"),
    ("mobiles", "smartphone"),
    ("headphone", "audio"),
    ("headphones", "audio"),
    ("earbuds", "audio"),
    ("tv", "television"),
    ("television", "television"),
];

/// A validated shopping query plus the filter derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingQuery {
    text: String,
    filter: ProductFilter,
}

impl ShoppingQuery {
    /// Validate and parse a raw query.
    ///
    /// Rejects blank input and input longer than [`MAX_QUERY_CHARS`].
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(DomainError::validation("query must not be empty"));
        }
        if text.chars().count() > MAX_QUERY_CHARS {
            return Err(DomainError::validation(format!(
                "query must be at most {MAX_QUERY_CHARS} characters"
            )));
        }

        Ok(Self {
            text: text.to_string(),
            filter: derive_filter(text),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }
}

fn derive_filter(text: &str) -> ProductFilter {
    let lowered = text.to_lowercase().replace('₹', " ₹");
    let tokens: Vec<&str> = lowered.split_whitespace().collect();

    let mut filter = ProductFilter::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];

        // "<=50000" / "<50k" glued to the number.
        let unglued = token.trim_start_matches(['<', '=']);
        if unglued.len() != token.len() && !unglued.is_empty() {
            if let Some(amount) = parse_amount(unglued, tokens.get(i + 1).copied()) {
                filter.max_price = Some(amount);
                i += 1;
                continue;
            }
        }

        if BUDGET_MARKERS.contains(&token) {
            if let Some((amount, consumed)) = budget_after(&tokens[i + 1..]) {
                filter.max_price = Some(amount);
                i += 1 + consumed;
                continue;
            }
            i += 1;
            continue;
        }

        let word = token.trim_matches(|c: char| !c.is_alphanumeric());
        if let Some((_, category)) = CATEGORIES.iter().find(|(w, _)| *w == word) {
            if filter.category.is_none() {
                filter.category = Some(category.to_string());
            }
        } else if word.chars().count() >= 2
            && !STOP_WORDS.contains(&word)
            && parse_amount(word, None).is_none()
            && !filter.keywords.iter().any(|k| k == word)
        {
            filter.keywords.push(word.to_string());
        }
        i += 1;
    }

    filter
}

/// Look for an amount in the tokens right after a budget marker.
///
/// Skips filler ("than", "to", "rs", "of") and returns the amount plus the
/// number of tokens consumed.
fn budget_after(rest: &[&str]) -> Option<(u64, usize)> {
    for (idx, token) in rest.iter().enumerate().take(3) {
        if let Some(amount) = parse_amount(token, rest.get(idx + 1).copied()) {
            let unit_consumed = rest
                .get(idx + 1)
                .is_some_and(|next| unit_multiplier(next).is_some() && !has_digit(next));
            return Some((amount, idx + 1 + usize::from(unit_consumed)));
        }
        if !matches!(*token, "than" | "to" | "rs" | "rs." | "inr" | "₹" | "of" | "=") {
            return None;
        }
    }
    None
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

fn unit_multiplier(unit: &str) -> Option<f64> {
    match unit.trim_end_matches(['.', ',', '!', '?']) {
        "k" | "thousand" => Some(1_000.0),
        "l" | "lakh" | "lakhs" | "lac" => Some(100_000.0),
        _ => None,
    }
}

/// Parse a money token such as `50000`, `50,000`, `₹45,999`, `rs.60000`, `60k`, `1.5l`.
///
/// `next` is the following token, consulted for a detached unit (`50 k`, `1 lakh`).
fn parse_amount(token: &str, next: Option<&str>) -> Option<u64> {
    let mut s = token.trim_end_matches(['.', '!', '?', ',']);
    for prefix in ["₹", "rs.", "rs", "inr"] {
        if let Some(stripped) = s.strip_prefix(prefix) {
            s = stripped;
        }
    }
    let s = s.replace(',', "");
    if !s.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (number, suffix) = s.split_at(split);
    let value: f64 = number.parse().ok()?;

    let multiplier = if suffix.is_empty() {
        next.and_then(|n| if has_digit(n) { None } else { unit_multiplier(n) })
            .unwrap_or(1.0)
    } else {
        unit_multiplier(suffix)?
    };

    let amount = value * multiplier;
    if !amount.is_finite() || amount < 0.0 || amount > u64::MAX as f64 {
        return None;
    }
    Some(amount.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_is_rejected() {
        assert!(matches!(ShoppingQuery::parse("   "), Err(DomainError::Validation(_))));
    }

    #[test]
    fn overlong_query_is_rejected() {
        let raw = "a".repeat(MAX_QUERY_CHARS + 1);
        assert!(ShoppingQuery::parse(&raw).is_err());
    }

    #[test]
    fn laptop_under_50000() {
        let q = ShoppingQuery::parse("laptop under 50000").unwrap();
        assert_eq!(q.text(), "laptop under 50000");
        assert_eq!(q.filter().max_price, Some(50_000));
        assert_eq!(q.filter().category.as_deref(), Some("laptop"));
        assert!(q.filter().keywords.is_empty());
    }

    #[test]
    fn rupee_symbol_and_grouping() {
        let q = ShoppingQuery::parse("gaming laptop below ₹65,000").unwrap();
        assert_eq!(q.filter().max_price, Some(65_000));
        assert_eq!(q.filter().keywords, vec!["gaming".to_string()]);
    }

    #[test]
    fn suffixes_and_detached_units() {
        assert_eq!(ShoppingQuery::parse("phone under 20k").unwrap().filter().max_price, Some(20_000));
        assert_eq!(ShoppingQuery::parse("tv within 1.5 lakh").unwrap().filter().max_price, Some(150_000));
        assert_eq!(ShoppingQuery::parse("earbuds <=3000").unwrap().filter().max_price, Some(3_000));
        assert_eq!(
            ShoppingQuery::parse("laptop less than rs 40000").unwrap().filter().max_price,
            Some(40_000)
        );
    }

    #[test]
    fn stop_words_are_dropped() {
        let q = ShoppingQuery::parse("Please suggest the best Samsung phone for me").unwrap();
        assert_eq!(q.filter().keywords, vec!["samsung".to_string()]);
        assert_eq!(q.filter().category.as_deref(), Some("smartphone"));
        assert_eq!(q.filter().max_price, None);
    }

    #[test]
    fn marker_without_amount_is_ignored() {
        let q = ShoppingQuery::parse("laptop under budget").unwrap();
        assert_eq!(q.filter().max_price, None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: a plain "under N" budget always round-trips to N.
            #[test]
            fn plain_budget_is_extracted(n in 1u64..100_000_000u64) {
                let q = ShoppingQuery::parse(&format!("laptop under {n}")).unwrap();
                prop_assert_eq!(q.filter().max_price, Some(n));
            }

            /// Property: "Nk" budgets are scaled by one thousand.
            #[test]
            fn k_suffix_scales(n in 1u64..100_000u64) {
                let q = ShoppingQuery::parse(&format!("phone below {n}k")).unwrap();
                prop_assert_eq!(q.filter().max_price, Some(n * 1_000));
            }

            /// Property: parsing arbitrary non-blank text never panics and keywords are lowercase.
            #[test]
            fn arbitrary_text_parses(raw in "[a-zA-Z0-9₹<=,. ]{1,120}") {
                if let Ok(q) = ShoppingQuery::parse(&raw) {
                    for k in &q.filter().keywords {
                        prop_assert_eq!(k.clone(), k.to_lowercase());
                    }
                }
            }
        }
    }
}
