// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for the dissonance cache.
//!
//! Uses the `metrics` crate for backend-agnostic collection. The host
//! application is responsible for choosing the exporter (Prometheus,
//! OTEL, etc.)
//!
//! # Metric Naming Convention
//! - `dissonance_cache_` prefix for all metrics
//! - `_total` suffix for counters

use metrics::{counter, gauge, histogram};

/// Record a cache hit or miss
pub fn record_lookup(hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    counter!(
        "dissonance_cache_lookups_total",
        "outcome" => outcome
    )
    .increment(1);
}

/// Record an insertion of a new key
pub fn record_insertion() {
    counter!("dissonance_cache_insertions_total").increment(1);
}

/// Record an in-place update of an existing key
pub fn record_update() {
    counter!("dissonance_cache_updates_total").increment(1);
}

/// Record an eviction with the victim's score and dissonance
pub fn record_eviction(score: f64, dissonance: f64) {
    counter!("dissonance_cache_evictions_total").increment(1);
    histogram!("dissonance_cache_victim_score").record(score);
    histogram!("dissonance_cache_victim_dissonance").record(dissonance);
}

/// Record an explicit removal
pub fn record_removal() {
    counter!("dissonance_cache_removals_total").increment(1);
}

/// Record rejected input (dissonance out of range)
pub fn record_validation_failure() {
    counter!("dissonance_cache_validation_failures_total").increment(1);
}

/// Set current resident item count
pub fn set_resident_items(count: usize) {
    gauge!("dissonance_cache_resident_items").set(count as f64);
}
