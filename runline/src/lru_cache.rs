// Copyright 2025 the Runline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small least-recently-used cache.

/// A borrowed stand-in for a cache key.
///
/// Lookups compare against stored keys without constructing an owned key;
/// the owned key is only built on a miss.
pub(crate) trait LookupKey<K> {
    fn matches(&self, key: &K) -> bool;
    fn into_key(self) -> K;
}

struct Slot<K, V> {
    last_used: u64,
    key: K,
    value: V,
}

/// A least-recently-used cache with a linear scan over its slots.
///
/// Meant for a handful of entries (fonts in use by one layout context).
pub(crate) struct LruCache<K, V> {
    slots: Vec<Slot<K, V>>,
    clock: u64,
    capacity: usize,
}

impl<K, V> LruCache<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            clock: 0,
            capacity: capacity.max(1),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns the value stored for `key`, creating it with `make` on a miss.
    ///
    /// On a miss with a full cache the least recently used slot is replaced.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: impl LookupKey<K>,
        make: impl FnOnce() -> V,
    ) -> &V {
        self.clock += 1;
        let clock = self.clock;

        let index = match self.slots.iter().position(|slot| key.matches(&slot.key)) {
            Some(index) => index,
            None if self.slots.len() < self.capacity => {
                self.slots.push(Slot {
                    last_used: clock,
                    key: key.into_key(),
                    value: make(),
                });
                self.slots.len() - 1
            }
            None => {
                let index = self
                    .slots
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, slot)| slot.last_used)
                    .map_or(0, |(index, _)| index);
                self.slots[index] = Slot {
                    last_used: clock,
                    key: key.into_key(),
                    value: make(),
                };
                index
            }
        };
        let slot = &mut self.slots[index];
        slot.last_used = clock;
        &slot.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ById(u64);

    impl LookupKey<u64> for ById {
        fn matches(&self, key: &u64) -> bool {
            self.0 == *key
        }

        fn into_key(self) -> u64 {
            self.0
        }
    }

    #[test]
    fn hit_does_not_rebuild() {
        let mut cache = LruCache::new(2);
        assert_eq!(*cache.get_or_insert_with(ById(7), || "seven"), "seven");
        let value = cache.get_or_insert_with(ById(7), || panic!("rebuilt a cached value"));
        assert_eq!(*value, "seven");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = LruCache::new(2);
        cache.get_or_insert_with(ById(1), || 1);
        cache.get_or_insert_with(ById(2), || 2);
        // Touch 1 so that 2 becomes the oldest.
        cache.get_or_insert_with(ById(1), || unreachable!());
        cache.get_or_insert_with(ById(3), || 3);
        assert_eq!(cache.len(), 2);

        cache.get_or_insert_with(ById(1), || panic!("1 was evicted"));
        let mut rebuilt = false;
        cache.get_or_insert_with(ById(2), || {
            rebuilt = true;
            20
        });
        assert!(rebuilt, "2 should have been evicted");
    }
}
