//! Integration tests for the dissonance cache.
//!
//! All tests drive a [`ManualClock`], so victim selection is fully
//! deterministic — no sleeps, no wall-clock dependence.
//!
//! # Test Organization
//! - `protocol_*` - End-to-end eviction behavior over multi-step timelines
//! - `observer_*` - Eviction event delivery
//! - `config_*`   - Construction and configuration paths

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};

use dissonance_cache::{CacheConfig, CacheError, DissonanceCache, EvictionEvent, ManualClock};

fn cache_with_clock(
    capacity: usize,
    clock: Arc<ManualClock>,
) -> DissonanceCache<String, Value> {
    let config = CacheConfig {
        capacity,
        ..Default::default()
    };
    DissonanceCache::new(config, clock).unwrap()
}

// =============================================================================
// Protocol scenarios
// =============================================================================

/// The canonical four-put timeline: capacity 3, defaults (ε=1e-5, W=10).
///
/// Standard LRU would evict the oldest entry on every overflow. Here the
/// old-but-unresolved anomaly outscores both routine entries and survives.
#[test]
fn protocol_dissonance_outranks_recency() {
    let clock = Arc::new(ManualClock::new(0.0));
    let cache = cache_with_clock(3, clock.clone());

    cache
        .put_with_dissonance("Breakfast".into(), json!("Toast"), 0.1)
        .unwrap();
    clock.set(1.0);
    cache
        .put_with_dissonance("Anomaly_A".into(), json!("Error_404"), 0.9)
        .unwrap();
    clock.set(2.0);
    cache
        .put_with_dissonance("Lunch".into(), json!("Sandwich"), 0.1)
        .unwrap();

    // t=3: scores are Breakfast ≈ 1.33, Anomaly_A ≈ 9.50, Lunch ≈ 2.00.
    // The eviction happens before Dinner is inserted.
    clock.set(3.0);
    cache
        .put_with_dissonance("Dinner".into(), json!("Pizza"), 0.1)
        .unwrap();

    assert_eq!(cache.len(), 3);
    assert_eq!(cache.peek("Breakfast"), None);
    assert_eq!(cache.peek("Anomaly_A"), Some(json!("Error_404")));
    assert_eq!(cache.peek("Lunch"), Some(json!("Sandwich")));
    assert_eq!(cache.peek("Dinner"), Some(json!("Pizza")));
}

/// A fully-conflicted item is never the victim while a fully-resolved one
/// is resident, whatever their relative ages, once every resident is at
/// least a second idle (recency range below the dissonance weight).
#[test]
fn protocol_maximal_dissonance_never_evicted_over_resolved() {
    let clock = Arc::new(ManualClock::new(0.0));
    let cache = cache_with_clock(4, clock.clone());

    cache
        .put_with_dissonance("protected".into(), json!(1), 1.0)
        .unwrap();
    for (i, key) in ["r1", "r2", "r3"].iter().enumerate() {
        clock.set(100.0 + i as f64);
        cache
            .put_with_dissonance((*key).into(), json!(i), 0.0)
            .unwrap();
    }

    // Churn through many overflows; the protected item predates them all.
    for i in 0..20 {
        clock.set(200.0 + i as f64);
        cache
            .put_with_dissonance(format!("churn{i}"), json!(i), 0.0)
            .unwrap();
        assert!(
            cache.peek("protected").is_some(),
            "protected item evicted while resolved items were resident (round {i})"
        );
    }
}

/// A recency touch changes a later eviction decision.
#[test]
fn protocol_get_touch_rescues_item() {
    let clock = Arc::new(ManualClock::new(0.0));
    let cache = cache_with_clock(2, clock.clone());

    cache
        .put_with_dissonance("first".into(), json!(1), 0.0)
        .unwrap();
    clock.set(1.0);
    cache
        .put_with_dissonance("second".into(), json!(2), 0.0)
        .unwrap();

    // "first" is older, but touching it makes "second" the stalest.
    clock.set(10.0);
    assert_eq!(cache.get("first"), Some(json!(1)));

    clock.set(11.0);
    cache
        .put_with_dissonance("third".into(), json!(3), 0.0)
        .unwrap();

    assert!(cache.peek("first").is_some());
    assert_eq!(cache.peek("second"), None);
}

/// Relative order of two untouched residents drifts with time alone:
/// the same pair yields a different victim depending only on when the
/// overflow happens.
#[test]
fn protocol_victim_depends_on_when_eviction_runs() {
    // Early overflow: the fresh resolved item still wins on recency.
    let clock = Arc::new(ManualClock::new(0.0));
    let cache = cache_with_clock(2, clock.clone());
    cache
        .put_with_dissonance("old_protected".into(), json!(1), 0.5)
        .unwrap();
    clock.set(10.0);
    cache
        .put_with_dissonance("fresh_routine".into(), json!(2), 0.0)
        .unwrap();
    clock.set(10.001);
    cache
        .put_with_dissonance("trigger".into(), json!(3), 0.0)
        .unwrap();
    assert_eq!(cache.peek("old_protected"), None, "recency should win early");

    // Same timeline, late overflow: both recency terms have decayed and
    // the protected item's weighted dissonance dominates.
    let clock = Arc::new(ManualClock::new(0.0));
    let cache = cache_with_clock(2, clock.clone());
    cache
        .put_with_dissonance("old_protected".into(), json!(1), 0.5)
        .unwrap();
    clock.set(10.0);
    cache
        .put_with_dissonance("fresh_routine".into(), json!(2), 0.0)
        .unwrap();
    clock.set(60.0);
    cache
        .put_with_dissonance("trigger".into(), json!(3), 0.0)
        .unwrap();
    assert_eq!(cache.peek("fresh_routine"), None, "dissonance should win late");
    assert!(cache.peek("old_protected").is_some());
}

#[test]
fn protocol_capacity_one_always_replaces() {
    let clock = Arc::new(ManualClock::new(0.0));
    let cache = cache_with_clock(1, clock.clone());

    for i in 0..5 {
        clock.set(i as f64);
        cache.put(format!("k{i}"), json!(i)).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek(&format!("k{i}")), Some(json!(i)));
    }
}

#[test]
fn protocol_remove_frees_a_slot_without_eviction() {
    let clock = Arc::new(ManualClock::new(0.0));
    let cache = cache_with_clock(2, clock.clone());

    let events: Arc<Mutex<Vec<EvictionEvent<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    cache.on_evict(move |event| sink.lock().push(event.clone()));

    cache.put("a".into(), json!(1)).unwrap();
    cache.put("b".into(), json!(2)).unwrap();
    assert!(cache.remove("a"));

    clock.set(1.0);
    cache.put("c".into(), json!(3)).unwrap();

    assert_eq!(cache.len(), 2);
    assert!(events.lock().is_empty(), "no overflow, no eviction events");
}

// =============================================================================
// Observer delivery
// =============================================================================

#[test]
fn observer_event_carries_score_and_dissonance() {
    let clock = Arc::new(ManualClock::new(0.0));
    let cache = cache_with_clock(3, clock.clone());

    let events: Arc<Mutex<Vec<EvictionEvent<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    cache.on_evict(move |event| sink.lock().push(event.clone()));

    cache
        .put_with_dissonance("Breakfast".into(), json!("Toast"), 0.1)
        .unwrap();
    clock.set(1.0);
    cache
        .put_with_dissonance("Anomaly_A".into(), json!("Error_404"), 0.9)
        .unwrap();
    clock.set(2.0);
    cache
        .put_with_dissonance("Lunch".into(), json!("Sandwich"), 0.1)
        .unwrap();
    clock.set(3.0);
    cache
        .put_with_dissonance("Dinner".into(), json!("Pizza"), 0.1)
        .unwrap();

    let events = events.lock();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.key, "Breakfast");
    assert_eq!(event.dissonance, 0.1);
    assert_eq!(event.at, 3.0);
    // 1/(3 + 1e-5) + 0.1 * 10
    assert!((event.score - 1.333_33).abs() < 0.01);
}

#[test]
fn observer_all_registered_callbacks_fire() {
    let clock = Arc::new(ManualClock::new(0.0));
    let cache = cache_with_clock(1, clock.clone());

    let first = Arc::new(Mutex::new(0usize));
    let second = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&first);
    cache.on_evict(move |_| *sink.lock() += 1);
    let sink = Arc::clone(&second);
    cache.on_evict(move |_| *sink.lock() += 1);

    cache.put("a".into(), json!(1)).unwrap();
    clock.set(1.0);
    cache.put("b".into(), json!(2)).unwrap();

    assert_eq!(*first.lock(), 1);
    assert_eq!(*second.lock(), 1);
}

#[test]
fn observer_sees_one_event_per_overflow() {
    let clock = Arc::new(ManualClock::new(0.0));
    let cache = cache_with_clock(2, clock.clone());

    let count = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&count);
    cache.on_evict(move |_| *sink.lock() += 1);

    for i in 0..10 {
        clock.set(i as f64);
        cache.put(format!("k{i}"), json!(i)).unwrap();
    }

    // First two puts fill the store, the remaining eight each evict once.
    assert_eq!(*count.lock(), 8);
}

// =============================================================================
// Construction / configuration
// =============================================================================

#[test]
fn config_zero_capacity_fails_construction() {
    let config = CacheConfig {
        capacity: 0,
        ..Default::default()
    };
    let result: Result<DissonanceCache<String, Value>, _> =
        DissonanceCache::new(config, Arc::new(ManualClock::new(0.0)));

    assert_eq!(result.err(), Some(CacheError::InvalidCapacity));
}

#[test]
fn config_default_dissonance_applies_on_plain_put() {
    let clock = Arc::new(ManualClock::new(0.0));
    let config = CacheConfig {
        capacity: 4,
        default_dissonance: 0.25,
        ..Default::default()
    };
    let cache: DissonanceCache<String, Value> = DissonanceCache::new(config, clock).unwrap();

    cache.put("k".into(), json!(1)).unwrap();
    assert_eq!(cache.dissonance("k"), Some(0.25));
}

#[test]
fn config_custom_weight_changes_protection() {
    // With W = 0 the policy degenerates to pure recency LRU and the
    // oldest item goes, dissonance notwithstanding.
    let clock = Arc::new(ManualClock::new(0.0));
    let config = CacheConfig {
        capacity: 2,
        dissonance_weight: 0.0,
        ..Default::default()
    };
    let cache: DissonanceCache<String, Value> =
        DissonanceCache::new(config, clock.clone()).unwrap();

    cache
        .put_with_dissonance("old_conflicted".into(), json!(1), 1.0)
        .unwrap();
    clock.set(1.0);
    cache
        .put_with_dissonance("fresh".into(), json!(2), 0.0)
        .unwrap();
    clock.set(2.0);
    cache
        .put_with_dissonance("trigger".into(), json!(3), 0.0)
        .unwrap();

    assert_eq!(cache.peek("old_conflicted"), None);
}

#[test]
fn config_system_clock_constructor() {
    let cache: DissonanceCache<String, Value> = DissonanceCache::with_capacity(2).unwrap();

    cache.put("k".into(), json!("v")).unwrap();
    assert_eq!(cache.get("k"), Some(json!("v")));
    assert_eq!(cache.capacity(), 2);
}
