//! Query normalization and intent vocabularies.
//!
//! The word lists live here as plain constants so the scoring code in
//! [`crate::ranker`] never hard-codes a vocabulary literal and the lists can
//! grow without touching it.

use std::sync::LazyLock;

use regex::Regex;

use crate::item::MenuItem;

/// Words that signal the user wants non-veg items.
pub const NON_VEG_WORDS: &[&str] = &[
    "non-veg", "nonveg", "nv", "meat", "chicken", "egg", "fish", "mutton",
];

/// Words that signal the user wants veg items.
pub const VEG_WORDS: &[&str] = &["veg", "vegetarian", "v"];

/// Words that signal price sensitivity.
pub const CHEAP_WORDS: &[&str] = &[
    "cheap",
    "budget",
    "under",
    "affordable",
    "low",
    "price",
    "below",
    "less",
];

/// Filler words stripped before keyword matching.
pub const STOP_WORDS: &[&str] = &["items", "item", "food", "foods", "than", "rs", "max"];

/// Which order statistic the derived ceiling takes from the sorted prices.
/// Tuning constant inherited from the product, not a design invariant.
pub const CHEAP_PRICE_PERCENTILE: f64 = 0.45;

/// Ceiling used when price sensitivity is detected but there are no
/// candidate prices to derive one from.
pub const DEFAULT_PRICE_CEILING: f64 = 100.0;

static PRICE_LIMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:under|below|rs|₹|max|less than)\s*(\d+)").expect("price limit pattern")
});

/// Everything the ranker needs to know about a query.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    pub wants_veg: bool,
    pub wants_non_veg: bool,
    pub wants_cheap: bool,
    pub explicit_ceiling: Option<f64>,
    pub keywords: Vec<String>,
}

impl ParsedQuery {
    /// Normalizes and tokenizes `raw`. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return None;
        }

        let words: Vec<&str> = normalized.split_whitespace().collect();

        let wants_non_veg = words.iter().any(|w| NON_VEG_WORDS.contains(w));
        // Non-veg wins so that a collapsed "non-veg" never reads as veg.
        let wants_veg = !wants_non_veg && words.iter().any(|w| VEG_WORDS.contains(w));
        let wants_cheap = words.iter().any(|w| CHEAP_WORDS.contains(w));

        let explicit_ceiling = PRICE_LIMIT
            .captures(&normalized)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .map(f64::from);

        let keywords = words
            .iter()
            .copied()
            .filter(|w| {
                !NON_VEG_WORDS.contains(w)
                    && !VEG_WORDS.contains(w)
                    && !CHEAP_WORDS.contains(w)
                    && !STOP_WORDS.contains(w)
                    && !w.chars().all(|c| c.is_ascii_digit())
            })
            .map(|w| w.to_string())
            .collect();

        Some(Self {
            wants_veg,
            wants_non_veg,
            wants_cheap,
            explicit_ceiling,
            keywords,
        })
    }

    pub fn has_intent(&self) -> bool {
        self.wants_veg || self.wants_non_veg || self.wants_cheap || self.explicit_ceiling.is_some()
    }

    /// Resolves the effective price ceiling for `candidates`.
    ///
    /// An explicit "under N" style limit wins. Otherwise a price-sensitive
    /// query gets a ceiling derived from the candidate price distribution so
    /// "cheap" keeps the cheaper half-ish without dropping the midrange.
    pub fn price_ceiling(&self, candidates: &[&MenuItem]) -> f64 {
        if let Some(limit) = self.explicit_ceiling {
            return limit;
        }
        if self.wants_cheap {
            return derived_ceiling(candidates);
        }
        f64::INFINITY
    }
}

fn derived_ceiling(candidates: &[&MenuItem]) -> f64 {
    if candidates.is_empty() {
        return DEFAULT_PRICE_CEILING;
    }

    let mut prices: Vec<f64> = candidates.iter().map(|item| item.price).collect();
    prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let index = (prices.len() as f64 * CHEAP_PRICE_PERCENTILE).ceil() as usize;
    prices[index.min(prices.len() - 1)]
}

/// Lowercases, trims, and collapses the two-word non-veg phrasings into the
/// single token the vocabularies use.
fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .trim()
        .replace("non vegetarian", "non-veg")
        .replace("non veg", "non-veg")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(prices: &[f64]) -> Vec<MenuItem> {
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| MenuItem {
                id: format!("{i}"),
                name: format!("Item {i}"),
                price: *price,
                tags: vec![],
                available: None,
            })
            .collect()
    }

    fn ceiling_for(parsed: &ParsedQuery, prices: &[f64]) -> f64 {
        let menu = items(prices);
        let refs: Vec<&MenuItem> = menu.iter().collect();
        parsed.price_ceiling(&refs)
    }

    #[test]
    fn blank_queries_parse_to_none() {
        assert!(ParsedQuery::parse("").is_none());
        assert!(ParsedQuery::parse("   ").is_none());
    }

    #[test]
    fn non_veg_phrase_collapses_before_tokenizing() {
        let parsed = ParsedQuery::parse("non veg meal").unwrap();
        assert!(parsed.wants_non_veg);
        assert!(!parsed.wants_veg);

        let parsed = ParsedQuery::parse("Non Vegetarian food").unwrap();
        assert!(parsed.wants_non_veg);
    }

    #[test]
    fn veg_loses_to_non_veg() {
        let parsed = ParsedQuery::parse("nonveg").unwrap();
        assert!(parsed.wants_non_veg);
        assert!(!parsed.wants_veg);

        let parsed = ParsedQuery::parse("vegetarian").unwrap();
        assert!(parsed.wants_veg);
    }

    #[test]
    fn explicit_limit_is_extracted() {
        let parsed = ParsedQuery::parse("snacks under 50").unwrap();
        assert_eq!(parsed.explicit_ceiling, Some(50.0));
        assert_eq!(ceiling_for(&parsed, &[10.0, 200.0]), 50.0);

        let parsed = ParsedQuery::parse("below120").unwrap();
        assert_eq!(parsed.explicit_ceiling, Some(120.0));
    }

    #[test]
    fn cheap_without_limit_derives_from_prices() {
        let parsed = ParsedQuery::parse("cheap").unwrap();
        assert_eq!(parsed.explicit_ceiling, None);
        // ceil(3 * 0.45) = 2 -> third cheapest price
        assert_eq!(ceiling_for(&parsed, &[60.0, 70.0, 80.0]), 80.0);
        assert_eq!(parsed.price_ceiling(&[]), DEFAULT_PRICE_CEILING);
    }

    #[test]
    fn no_price_signal_means_unbounded() {
        let parsed = ParsedQuery::parse("paneer").unwrap();
        assert_eq!(ceiling_for(&parsed, &[60.0]), f64::INFINITY);
    }

    #[test]
    fn intent_and_stop_words_are_not_keywords() {
        let parsed = ParsedQuery::parse("cheap veg snack items under 100").unwrap();
        assert_eq!(parsed.keywords, vec!["snack"]);
        assert!(parsed.wants_veg);
        assert!(parsed.wants_cheap);
    }

    #[test]
    fn plain_words_survive_as_keywords() {
        let parsed = ParsedQuery::parse("spicy paneer wrap").unwrap();
        assert_eq!(parsed.keywords, vec!["spicy", "paneer", "wrap"]);
        assert!(!parsed.has_intent());
    }
}
