//! Configuration for the dissonance cache.
//!
//! # Example
//!
//! ```
//! use dissonance_cache::CacheConfig;
//!
//! // Minimal config (uses defaults)
//! let config = CacheConfig { capacity: 128, ..Default::default() };
//! assert_eq!(config.epsilon, 1e-5);
//! assert_eq!(config.dissonance_weight, 10.0);
//!
//! // Full config
//! let config = CacheConfig {
//!     capacity: 1024,
//!     epsilon: 1e-4,
//!     dissonance_weight: 25.0,
//!     default_dissonance: 0.2,
//! };
//! ```

use serde::Deserialize;

/// Configuration for [`DissonanceCache`](crate::DissonanceCache).
///
/// All hyperparameters have sensible defaults; only `capacity` usually
/// needs tuning. `epsilon` and `dissonance_weight` parameterize the
/// [score model](crate::score::ScoreModel) and must both be positive for
/// the eviction ordering guarantees to hold.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of resident items (must be > 0)
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Recency floor preventing division by zero for a just-touched item
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// How strongly dissonance protects an item from eviction
    #[serde(default = "default_dissonance_weight")]
    pub dissonance_weight: f64,

    /// Dissonance assigned by `put` when the caller does not specify one
    #[serde(default = "default_dissonance")]
    pub default_dissonance: f64,
}

fn default_capacity() -> usize {
    1024
}
fn default_epsilon() -> f64 {
    1e-5
}
fn default_dissonance_weight() -> f64 {
    10.0
}
fn default_dissonance() -> f64 {
    0.1
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            epsilon: default_epsilon(),
            dissonance_weight: default_dissonance_weight(),
            default_dissonance: default_dissonance(),
        }
    }
}
