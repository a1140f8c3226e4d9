//! Search Engine
//!
//! Name lookup over a built [`ActorIndex`]. Matching is deterministic:
//!
//! - names and queries are compared after NFKC normalization, trimming and
//!   lowercasing;
//! - an exact match beats a prefix match, which beats a substring match;
//! - within one strength, index order decides (world discovery order, then
//!   storage order inside a world).
//!
//! There is no edit-distance or popularity ranking.

use crate::types::{ActorIndex, ActorIndexEntry};
use unicode_normalization::UnicodeNormalization;

/// How well a name matched a query. Ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchStrength {
    Substring,
    Prefix,
    Exact,
}

/// Comparison form of a name or query.
pub fn normalize(s: &str) -> String {
    s.nfkc().collect::<String>().trim().to_lowercase()
}

fn strength(key: &str, query: &str) -> Option<MatchStrength> {
    if key == query {
        Some(MatchStrength::Exact)
    } else if key.starts_with(query) {
        Some(MatchStrength::Prefix)
    } else if key.contains(query) {
        Some(MatchStrength::Substring)
    } else {
        None
    }
}

impl ActorIndex {
    /// Best match for `query`, or None. Never mutates the index.
    pub fn search_actor(&self, query: &str) -> Option<&ActorIndexEntry> {
        let query = normalize(query);
        if query.is_empty() {
            return None;
        }

        let mut best: Option<(MatchStrength, usize)> = None;
        for (i, key) in self.keys.iter().enumerate() {
            let Some(found) = strength(key, &query) else {
                continue;
            };
            if best.map_or(true, |(current, _)| found > current) {
                best = Some((found, i));
                if found == MatchStrength::Exact {
                    break;
                }
            }
        }
        best.map(|(_, i)| &self.entries[i])
    }

    /// Every match for `query`, strongest first, index order within a strength.
    pub fn search_actors(&self, query: &str) -> Vec<&ActorIndexEntry> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(MatchStrength, usize)> = self
            .keys
            .iter()
            .enumerate()
            .filter_map(|(i, key)| strength(key, &query).map(|s| (s, i)))
            .collect();
        // Stable sort keeps index order inside each strength.
        hits.sort_by(|a, b| b.0.cmp(&a.0));
        hits.into_iter().map(|(_, i)| &self.entries[i]).collect()
    }
}
