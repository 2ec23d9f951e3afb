//! Deterministic fallback ranking.
//!
//! Mirrors the rules the smart-search prompt gives the hosted model (dietary
//! tags, price sensitivity, descriptive keywords) so falling back does not
//! feel like a different product. Pure function of its inputs: same query
//! and candidates always produce the same ordering.

use crate::MAX_RESULTS;
use crate::intent::ParsedQuery;
use crate::item::MenuItem;

const NAME_MATCH: f64 = 10.0;
const NAME_PREFIX_BONUS: f64 = 5.0;
const TAG_MATCH: f64 = 5.0;
const INTENT_BASE: f64 = 1.0;
const CHEAP_BONUS_NUMERATOR: f64 = 1000.0;

/// Keyword/intent heuristic ranker. Total: never fails, returns an empty
/// list when nothing qualifies.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRanker;

struct ScoredCandidate<'a> {
    item: &'a MenuItem,
    score: f64,
}

impl LocalRanker {
    /// Ranks `candidates` against `query`, best match first, at most
    /// [`MAX_RESULTS`] items.
    pub fn rank(&self, query: &str, candidates: &[MenuItem]) -> Vec<MenuItem> {
        let Some(parsed) = ParsedQuery::parse(query) else {
            return Vec::new();
        };

        let available: Vec<&MenuItem> = candidates
            .iter()
            .filter(|item| item.is_available())
            .collect();

        // Ceiling comes from the items actually in play, so a sold-out
        // item's price cannot shape it.
        let ceiling = parsed.price_ceiling(&available);

        let mut scored: Vec<ScoredCandidate> = available
            .iter()
            .filter_map(|&item| {
                score(item, &parsed, ceiling).map(|score| ScoredCandidate { item, score })
            })
            .collect();

        // Stable sort keeps input order on equal scores.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(MAX_RESULTS);

        scored.into_iter().map(|c| c.item.clone()).collect()
    }
}

/// Scores one item, or `None` when it is filtered out entirely.
fn score(item: &MenuItem, parsed: &ParsedQuery, ceiling: f64) -> Option<f64> {
    if parsed.wants_veg && !item.is_veg() {
        return None;
    }
    if parsed.wants_non_veg && !item.is_non_veg() {
        return None;
    }
    if item.price > ceiling {
        return None;
    }

    let name = item.name.to_lowercase();
    let mut total = 0.0;

    for keyword in &parsed.keywords {
        if name.contains(keyword.as_str()) {
            total += NAME_MATCH;
            if name.starts_with(keyword.as_str()) {
                total += NAME_PREFIX_BONUS;
            }
        }
        if item
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(keyword.as_str()))
        {
            total += TAG_MATCH;
        }
    }

    if total == 0.0 {
        if !parsed.has_intent() {
            // Nothing matched and nothing was asked for categorically.
            return None;
        }
        // A dietary or price match alone qualifies, just barely.
        total = INTENT_BASE;
    }

    if parsed.wants_cheap {
        total += CHEAP_BONUS_NUMERATOR / item.price.max(1.0);
    }

    Some(total)
}
