// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! The bounded item store.
//!
//! [`DissonanceCache`] owns the key → item map and enforces the capacity
//! bound. A single coarse `parking_lot::Mutex` guards the map: every
//! public operation takes it exactly once, so no two operations ever
//! observe the store mid-mutation. This is a policy demonstration, not a
//! high-throughput design.
//!
//! Eviction events are collected under the lock and dispatched to
//! observers only after it is released, so a slow or blocking observer
//! cannot stall the critical section.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::clock::{SystemClock, TimeSource};
use crate::config::CacheConfig;
use crate::error::CacheError;
use crate::eviction::{select_victim, EntrySnapshot, EvictionEvent};
use crate::metrics;
use crate::score::ScoreModel;

/// A resident item. The eviction score is never stored here; it is
/// recomputed from `last_access` and `dissonance` at decision time.
#[derive(Debug, Clone)]
struct CacheItem<V> {
    value: V,
    last_access: f64,
    dissonance: f64,
}

type EvictionObserver<K> = Arc<dyn Fn(&EvictionEvent<K>) + Send + Sync>;

/// Bounded key-value cache with dissonance-weighted eviction.
///
/// Standard LRU only cares about *when* an item was last used. This cache
/// additionally protects items that are unresolved ("high dissonance"),
/// even when they are old: the victim is the resident with the lowest
/// `1/(elapsed + ε) + dissonance × W` score at the moment a `put` on a
/// new key finds the store full.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use dissonance_cache::{CacheConfig, DissonanceCache, ManualClock};
///
/// let clock = Arc::new(ManualClock::new(0.0));
/// let config = CacheConfig { capacity: 3, ..Default::default() };
/// let cache: DissonanceCache<String, String> =
///     DissonanceCache::new(config, clock.clone()).unwrap();
///
/// cache.put("breakfast".into(), "toast".into()).unwrap();
/// assert_eq!(cache.get("breakfast"), Some("toast".into()));
/// assert_eq!(cache.get("lunch"), None);
/// ```
pub struct DissonanceCache<K, V> {
    config: CacheConfig,
    model: ScoreModel,
    clock: Arc<dyn TimeSource>,
    items: Mutex<HashMap<K, CacheItem<V>>>,
    observers: Mutex<Vec<EvictionObserver<K>>>,
}

impl<K, V> DissonanceCache<K, V>
where
    K: Eq + Hash + Ord + Clone,
    V: Clone,
{
    /// Create a cache with the given configuration and time source.
    ///
    /// Fails with [`CacheError::InvalidCapacity`] when `config.capacity`
    /// is zero.
    pub fn new(config: CacheConfig, clock: Arc<dyn TimeSource>) -> Result<Self, CacheError> {
        if config.capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        Ok(Self {
            model: ScoreModel::from_config(&config),
            config,
            clock,
            items: Mutex::new(HashMap::new()),
            observers: Mutex::new(Vec::new()),
        })
    }

    /// Create a cache with default hyperparameters on the system clock.
    pub fn with_capacity(capacity: usize) -> Result<Self, CacheError> {
        let config = CacheConfig {
            capacity,
            ..Default::default()
        };
        Self::new(config, Arc::new(SystemClock))
    }

    /// Insert or update `key` with the configured default dissonance.
    pub fn put(&self, key: K, value: V) -> Result<(), CacheError> {
        self.put_with_dissonance(key, value, self.config.default_dissonance)
    }

    /// Insert or update `key` with an explicit dissonance in `[0.0, 1.0]`.
    ///
    /// An existing key is updated in place (value, dissonance, recency).
    /// A new key on a full store evicts the minimum-score resident first,
    /// then inserts, so the store is never observably over capacity.
    ///
    /// Fails with [`CacheError::InvalidDissonance`] before any mutation
    /// when `dissonance` is outside `[0.0, 1.0]`.
    pub fn put_with_dissonance(
        &self,
        key: K,
        value: V,
        dissonance: f64,
    ) -> Result<(), CacheError> {
        if !dissonance.is_finite() || !(0.0..=1.0).contains(&dissonance) {
            metrics::record_validation_failure();
            warn!(dissonance, "Rejected put: dissonance outside [0.0, 1.0]");
            return Err(CacheError::InvalidDissonance { value: dissonance });
        }

        let now = self.clock.now();
        let mut evicted = None;
        {
            let mut items = self.items.lock();
            if let Some(item) = items.get_mut(&key) {
                item.value = value;
                item.dissonance = dissonance;
                item.last_access = now;
                metrics::record_update();
            } else {
                if items.len() >= self.config.capacity {
                    evicted = self.evict_locked(&mut items, now);
                }
                items.insert(
                    key,
                    CacheItem {
                        value,
                        last_access: now,
                        dissonance,
                    },
                );
                metrics::record_insertion();
            }
            metrics::set_resident_items(items.len());
        }

        // Observers run outside the critical section
        if let Some(event) = evicted {
            self.notify(&event);
        }
        Ok(())
    }

    /// Look up `key`, refreshing its recency on a hit.
    ///
    /// A miss returns `None`, never an error. The touch is the one place
    /// besides insertion where recency state advances.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let mut items = self.items.lock();
        match items.get_mut(key) {
            Some(item) => {
                item.last_access = now;
                trace!(now, "Recency touch on hit");
                metrics::record_lookup(true);
                Some(item.value.clone())
            }
            None => {
                metrics::record_lookup(false);
                None
            }
        }
    }

    /// Look up `key` without touching its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.lock().get(key).map(|item| item.value.clone())
    }

    /// Current dissonance of `key`, if resident. Does not touch recency.
    pub fn dissonance<Q>(&self, key: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.lock().get(key).map(|item| item.dissonance)
    }

    /// Delete `key` if present. Returns whether anything was removed.
    /// Not an eviction: no event is emitted.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut items = self.items.lock();
        let removed = items.remove(key).is_some();
        if removed {
            metrics::record_removal();
            metrics::set_resident_items(items.len());
        }
        removed
    }

    /// Drop every resident item. Emits no eviction events.
    pub fn clear(&self) {
        let mut items = self.items.lock();
        items.clear();
        metrics::set_resident_items(0);
    }

    /// Number of resident items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Configured capacity bound.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Register an eviction observer.
    ///
    /// Callbacks receive `(key, score, dissonance, at)` for every victim
    /// the controller removes, after the store lock has been released.
    pub fn on_evict<F>(&self, callback: F)
    where
        F: Fn(&EvictionEvent<K>) + Send + Sync + 'static,
    {
        self.observers.lock().push(Arc::new(callback));
    }

    /// Select and remove the minimum-score resident. Caller holds the
    /// item lock; the returned event is dispatched after release.
    fn evict_locked(
        &self,
        items: &mut HashMap<K, CacheItem<V>>,
        now: f64,
    ) -> Option<EvictionEvent<K>> {
        let entries: Vec<EntrySnapshot<K>> = items
            .iter()
            .map(|(key, item)| EntrySnapshot {
                key: key.clone(),
                last_access: item.last_access,
                dissonance: item.dissonance,
            })
            .collect();

        let event = select_victim(&self.model, &entries, now)?;
        items.remove(&event.key);
        debug!(
            score = event.score,
            dissonance = event.dissonance,
            at = event.at,
            "Evicted lowest-scoring entry"
        );
        metrics::record_eviction(event.score, event.dissonance);
        Some(event)
    }

    fn notify(&self, event: &EvictionEvent<K>) {
        // Snapshot the observer list so callbacks never run under a lock
        let observers: Vec<EvictionObserver<K>> = self.observers.lock().clone();
        for observer in &observers {
            observer(event);
        }
    }
}
