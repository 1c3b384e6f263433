//! Local substring ranker.
//!
//! Pure fallback scoring used when the remote source fails (and for the
//! fixture corpus in tests): no index, no fuzzing, just case-insensitive
//! substring containment with a prefix bonus.

use tracing::trace;

use crate::item::{Item, ItemType};

/// Bonus when the haystack starts with the query.
const PREFIX_BONUS: f32 = 3.0;

/// Base score for any substring match.
const MATCH_SCORE: f32 = 1.0;

/// Nudge for people results on multi-character queries.
const PEOPLE_BONUS: f32 = 0.2;

/// Filter and order `items` by relevance to `query`.
///
/// 1. Whitespace-only queries are the identity: everything, input order.
/// 2. Non-matching items are excluded outright (no partial credit).
/// 3. Matches are scored (prefix + match + people bonus) and sorted by
///    descending score; ties keep input order (the sort is stable).
pub fn rank(query: &str, items: &[Item]) -> Vec<Item> {
    if query.trim().is_empty() {
        return items.to_vec();
    }

    // The needle is lowercased but deliberately not trimmed; only the
    // emptiness test above trims.
    let needle = query.to_lowercase();
    let multi_char = needle.chars().count() > 1;

    let mut scored: Vec<(f32, Item)> = items
        .iter()
        .filter_map(|item| {
            let hay = item.haystack();
            if !hay.contains(&needle) {
                return None;
            }
            let mut score = MATCH_SCORE;
            if hay.starts_with(&needle) {
                score += PREFIX_BONUS;
            }
            if item.kind == ItemType::People && multi_char {
                score += PEOPLE_BONUS;
            }
            Some((score, item.clone()))
        })
        .collect();

    // Stable: score collisions are common for non-people matches and must
    // preserve input order.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    trace!(query = %query, matched = scored.len(), "ranked local items");
    scored.into_iter().map(|(_, item)| item).collect()
}
