//! # Dissonance Cache
//!
//! A bounded key-value cache whose eviction policy blends recency (classic
//! LRU) with a per-item "dissonance" weight that protects old-but-unresolved
//! entries from being dropped.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  DissonanceCache (cache.rs)                 │
//! │  • put / get / remove under one coarse lock                 │
//! │  • get refreshes recency; put validates dissonance          │
//! │  • full store on a new key → evict first, then insert       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                   (snapshot of residents)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │               Eviction Controller (eviction.rs)             │
//! │  • O(n) rescan, minimum score is the victim                 │
//! │  • deterministic tie-break: oldest, then smallest key       │
//! │  • EvictionEvent dispatched to observers after unlock       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                    (score at comparison time)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Score Model (score.rs)                    │
//! │  • score = 1/(elapsed + ε) + dissonance × W                 │
//! │  • pure function of (now, last_access, dissonance)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scores are a continuous function of the current time, so they are never
//! trusted across time: the controller recomputes every resident's score at
//! the instant of the eviction decision. The clock is injected via
//! [`TimeSource`], which makes victim selection fully deterministic under
//! test ([`ManualClock`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use dissonance_cache::{CacheConfig, DissonanceCache, ManualClock};
//! use std::sync::Arc;
//!
//! let clock = Arc::new(ManualClock::new(0.0));
//! let config = CacheConfig { capacity: 3, ..Default::default() };
//! let cache: DissonanceCache<String, String> =
//!     DissonanceCache::new(config, clock.clone()).unwrap();
//!
//! cache.on_evict(|event| {
//!     // Telemetry hook: (key, score, dissonance, at)
//!     let _ = (&event.key, event.score, event.dissonance, event.at);
//! });
//!
//! // Routine entries at t=0..2, one unresolved anomaly at t=1
//! cache.put_with_dissonance("breakfast".into(), "toast".into(), 0.1).unwrap();
//! clock.set(1.0);
//! cache.put_with_dissonance("anomaly_a".into(), "error_404".into(), 0.9).unwrap();
//! clock.set(2.0);
//! cache.put_with_dissonance("lunch".into(), "sandwich".into(), 0.1).unwrap();
//!
//! // Full at capacity 3: the next put evicts the minimum-score resident.
//! // Plain LRU would drop the oldest; the anomaly's dissonance protects it.
//! clock.set(3.0);
//! cache.put_with_dissonance("dinner".into(), "pizza".into(), 0.1).unwrap();
//!
//! assert_eq!(cache.get("breakfast"), None);
//! assert!(cache.get("anomaly_a").is_some());
//! ```
//!
//! ## Features
//!
//! - **Dissonance protection**: high-dissonance items resist eviction
//!   regardless of age, for a sufficiently large weight
//! - **Injectable clock**: deterministic scoring in tests, wall clock in
//!   production
//! - **Eviction observers**: callbacks replace ad-hoc console output and
//!   run outside the critical section
//! - **Deterministic tie-break**: equal scores resolve to the oldest item,
//!   then the smallest key
//! - **Metrics**: backend-agnostic counters/gauges via the `metrics` crate
//!
//! ## Configuration
//!
//! See [`CacheConfig`] for the hyperparameters (capacity, epsilon,
//! dissonance weight, default dissonance).
//!
//! ## Modules
//!
//! - [`cache`]: the bounded item store, [`DissonanceCache`]
//! - [`eviction`]: victim selection and [`EvictionEvent`]
//! - [`score`]: the pure scoring function, [`ScoreModel`]
//! - [`clock`]: [`TimeSource`], [`SystemClock`], [`ManualClock`]
//! - [`config`]: [`CacheConfig`]
//! - [`metrics`]: instrumentation helpers

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod eviction;
pub mod metrics;
pub mod score;

pub use cache::DissonanceCache;
pub use clock::{ManualClock, SystemClock, TimeSource};
pub use config::CacheConfig;
pub use error::CacheError;
pub use eviction::EvictionEvent;
pub use score::ScoreModel;
