//! Interning cache for immutable SQL values.
//!
//! The cache is a fixed array of slots indexed by a value's hash code. A
//! lookup either finds an equal value in the slot and hands it back, or
//! replaces whatever the slot held with the new value. Evicted values live
//! on for as long as callers hold them. Nothing here affects equality or
//! ordering; a disabled cache simply hands out fresh instances.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::consts::{
    CACHE_CAPACITY_ENV, CACHE_ENABLED_ENV, DEFAULT_CACHE_CAPACITY, MAX_CACHE_CAPACITY,
};
use crate::DateValue;

/// A value that can be interned by [`ValueCache`].
pub trait Cacheable: Eq {
    /// 32-bit hash, consistent with `Eq`, used to pick a slot.
    fn hash_code(&self) -> i32;
}

/// Settings for a [`ValueCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When false every lookup returns a fresh instance
    pub enabled: bool,
    /// Number of slots, rounded up to a power of two and capped at
    /// `MAX_CACHE_CAPACITY`
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Reads `SQL_DATE_OBJECT_CACHE` and `SQL_DATE_OBJECT_CACHE_SIZE`,
    /// keeping the default for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(CACHE_ENABLED_ENV) {
            match raw.trim().parse::<bool>() {
                Ok(enabled) => config.enabled = enabled,
                Err(_) => warn!(key = CACHE_ENABLED_ENV, value = %raw, "ignoring invalid cache setting"),
            }
        }
        if let Some(raw) = lookup(CACHE_CAPACITY_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) if (1..=MAX_CACHE_CAPACITY).contains(&capacity) => {
                    config.capacity = capacity;
                }
                _ => warn!(key = CACHE_CAPACITY_ENV, value = %raw, "ignoring invalid cache setting"),
            }
        }
        config
    }

    // MAX_CACHE_CAPACITY is a power of two, so rounding never overflows.
    fn slot_count(&self) -> usize {
        self.capacity.clamp(1, MAX_CACHE_CAPACITY).next_power_of_two()
    }
}

/// Bounded, thread-safe lookup-or-insert cache.
#[derive(Debug)]
pub struct ValueCache<T> {
    enabled: bool,
    mask: usize,
    slots: Mutex<Vec<Option<Arc<T>>>>,
}

impl<T: Cacheable> ValueCache<T> {
    pub fn new(config: CacheConfig) -> Self {
        let slot_count = if config.enabled { config.slot_count() } else { 0 };
        Self {
            enabled: config.enabled,
            mask: slot_count.saturating_sub(1),
            slots: Mutex::new(vec![None; slot_count]),
        }
    }

    /// Returns the cached instance equal to `value`, or caches and returns
    /// `value` itself.
    pub fn canonicalize(&self, value: T) -> Arc<T> {
        if !self.enabled {
            return Arc::new(value);
        }
        // Reinterpret the sign bit so negative hash codes spread too.
        let index = value.hash_code() as u32 as usize & self.mask;
        let mut slots = self.lock();
        let Some(slot) = slots.get_mut(index) else {
            return Arc::new(value);
        };
        if let Some(cached) = slot.as_ref().filter(|cached| ***cached == value) {
            trace!(index, "value cache hit");
            return Arc::clone(cached);
        }
        trace!(index, evicted = slot.is_some(), "value cache insert");
        let fresh = Arc::new(value);
        *slot = Some(Arc::clone(&fresh));
        fresh
    }

    /// Drops every cached instance.
    pub fn clear(&self) {
        self.lock().iter_mut().for_each(|slot| *slot = None);
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.lock().iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots (0 when disabled)
    pub fn capacity(&self) -> usize {
        if self.enabled { self.mask + 1 } else { 0 }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    // Slots only ever hold whole `Arc`s, so a panic elsewhere while the
    // lock was held cannot leave them half written.
    fn lock(&self) -> MutexGuard<'_, Vec<Option<Arc<T>>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

static DATE_CACHE: OnceLock<ValueCache<DateValue>> = OnceLock::new();

/// Installs the process-wide date cache.
///
/// Returns `false` if the cache already exists, either from an earlier call
/// or because a date was created first.
pub fn init(config: CacheConfig) -> bool {
    let installed = DATE_CACHE.set(ValueCache::new(config)).is_ok();
    if installed {
        debug!(enabled = config.enabled, capacity = config.capacity, "date cache initialized");
    }
    installed
}

/// The process-wide date cache, created from the environment on first use.
pub fn date_cache() -> &'static ValueCache<DateValue> {
    DATE_CACHE.get_or_init(|| {
        let config = CacheConfig::from_env();
        debug!(enabled = config.enabled, capacity = config.capacity, "date cache initialized");
        ValueCache::new(config)
    })
}

/// Releases everything held by the process-wide date cache.
pub fn shutdown() {
    if let Some(cache) = DATE_CACHE.get() {
        cache.clear();
        debug!("date cache cleared");
    }
}
