// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Victim selection.
//!
//! The controller rescans every resident at eviction time (O(n), an
//! explicit simplification: capacity bounds n and evictions are rare
//! relative to lookups) and removes the minimum-score item. Scores are
//! recomputed against the snapshot's `now`, never read from storage, so
//! the selection is always consistent with the current clock.
//!
//! Ties on the exact score break toward the earliest `last_access`
//! (oldest), then the smallest key, so victim selection is fully
//! deterministic and reproducible in tests.

use std::cmp::Ordering;

use crate::score::ScoreModel;

/// Per-item metadata captured under the cache lock for scoring.
#[derive(Debug, Clone)]
pub(crate) struct EntrySnapshot<K> {
    pub key: K,
    pub last_access: f64,
    pub dissonance: f64,
}

/// Emitted to registered observers when an item is evicted.
#[derive(Debug, Clone, PartialEq)]
pub struct EvictionEvent<K> {
    /// Key of the evicted item
    pub key: K,
    /// Its score at the moment of selection
    pub score: f64,
    /// Its dissonance at the moment of selection
    pub dissonance: f64,
    /// Clock reading the selection was made at
    pub at: f64,
}

/// Select the eviction victim among `entries` as of time `now`.
///
/// Returns `None` when there is nothing to evict; an empty store is a
/// no-op, never an error.
pub(crate) fn select_victim<K: Ord + Clone>(
    model: &ScoreModel,
    entries: &[EntrySnapshot<K>],
    now: f64,
) -> Option<EvictionEvent<K>> {
    let victim = entries.iter().min_by(|a, b| {
        let sa = model.score(now, a.last_access, a.dissonance);
        let sb = model.score(now, b.last_access, b.dissonance);
        sa.partial_cmp(&sb)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.last_access
                    .partial_cmp(&b.last_access)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.key.cmp(&b.key))
    })?;

    Some(EvictionEvent {
        key: victim.key.clone(),
        score: model.score(now, victim.last_access, victim.dissonance),
        dissonance: victim.dissonance,
        at: now,
    })
}
