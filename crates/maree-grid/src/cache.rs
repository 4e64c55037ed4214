// SPDX-FileCopyrightText: 2026 The Marée contributors
//
// SPDX-License-Identifier: MPL-2.0

//! Bounded LRU cache of cell values.
//!
//! Entries live in an arena; the recency list is threaded through the
//! entries as indices, so promotion and eviction never move memory and the
//! whole cache stays in one allocation apart from the value slices.

use std::collections::HashMap;

use num::complex::Complex64;

const NIL: u32 = u32::MAX;

#[derive(Debug)]
struct Entry {
    cell: usize,
    values: Box<[Option<Complex64>]>,
    prev: u32,
    next: u32,
}

/// Cell cache keyed by flat cell index, bounded by `max_entries`.
#[derive(Debug)]
pub(crate) struct LruCache {
    max_entries: usize,
    map: HashMap<usize, u32>,
    arena: Vec<Entry>,
    free: Vec<u32>,
    head: u32,
    tail: u32,
}

impl LruCache {
    pub(crate) fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            map: HashMap::new(),
            arena: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }

    pub(crate) fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub(crate) fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries;
        while self.map.len() > self.max_entries {
            self.evict_tail();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    fn unlink(&mut self, index: u32) {
        let (prev, next) = {
            let entry = &self.arena[index as usize];
            (entry.prev, entry.next)
        };
        if prev == NIL {
            self.head = next;
        } else {
            self.arena[prev as usize].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.arena[next as usize].prev = prev;
        }
    }

    fn push_front(&mut self, index: u32) {
        let old_head = self.head;
        {
            let entry = &mut self.arena[index as usize];
            entry.prev = NIL;
            entry.next = old_head;
        }
        if old_head != NIL {
            self.arena[old_head as usize].prev = index;
        }
        self.head = index;
        if self.tail == NIL {
            self.tail = index;
        }
    }

    fn evict_tail(&mut self) {
        let tail = self.tail;
        if tail == NIL {
            return;
        }
        self.unlink(tail);
        let cell = self.arena[tail as usize].cell;
        self.map.remove(&cell);
        self.free.push(tail);
    }

    /// Returns the cached values of a cell, promoting it to the list head.
    pub(crate) fn get(&mut self, cell: usize) -> Option<&[Option<Complex64>]> {
        let index = *self.map.get(&cell)?;
        self.unlink(index);
        self.push_front(index);
        Some(&self.arena[index as usize].values)
    }

    /// Inserts a freshly read cell, evicting the least recently used entry
    /// when the cache is full.
    pub(crate) fn insert(&mut self, cell: usize, values: Box<[Option<Complex64>]>) {
        if let Some(&index) = self.map.get(&cell) {
            self.arena[index as usize].values = values;
            self.unlink(index);
            self.push_front(index);
            return;
        }

        if self.map.len() >= self.max_entries {
            self.evict_tail();
        }

        let index = if let Some(index) = self.free.pop() {
            self.arena[index as usize] = Entry {
                cell,
                values,
                prev: NIL,
                next: NIL,
            };
            index
        } else {
            self.arena.push(Entry {
                cell,
                values,
                prev: NIL,
                next: NIL,
            });
            (self.arena.len() - 1) as u32
        };

        self.map.insert(cell, index);
        self.push_front(index);
    }

    /// Checks that the map and the recency list agree (test support).
    #[cfg(test)]
    fn check_consistency(&self) {
        let mut count = 0;
        let mut index = self.head;
        let mut previous = NIL;
        while index != NIL {
            let entry = &self.arena[index as usize];
            assert_eq!(entry.prev, previous);
            assert_eq!(self.map.get(&entry.cell), Some(&index));
            previous = index;
            index = entry.next;
            count += 1;
        }
        assert_eq!(previous, self.tail);
        assert_eq!(count, self.map.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(seed: f64) -> Box<[Option<Complex64>]> {
        vec![Some(Complex64::new(seed, -seed))].into_boxed_slice()
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = LruCache::new(4);
        cache.insert(7, values(1.0));
        assert_eq!(cache.get(7).unwrap()[0], Some(Complex64::new(1.0, -1.0)));
        assert!(cache.get(8).is_none());
        cache.check_consistency();
    }

    #[test]
    fn test_eviction_order() {
        let mut cache = LruCache::new(2);
        cache.insert(1, values(1.0));
        cache.insert(2, values(2.0));
        cache.insert(3, values(3.0));
        // 1 was the least recently used.
        assert!(cache.get(1).is_none());
        assert!(cache.get(2).is_some());
        assert!(cache.get(3).is_some());
        assert_eq!(cache.len(), 2);
        cache.check_consistency();
    }

    #[test]
    fn test_get_promotes() {
        let mut cache = LruCache::new(2);
        cache.insert(1, values(1.0));
        cache.insert(2, values(2.0));
        // Touch 1 so 2 becomes the eviction candidate.
        cache.get(1);
        cache.insert(3, values(3.0));
        assert!(cache.get(1).is_some());
        assert!(cache.get(2).is_none());
        cache.check_consistency();
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut cache = LruCache::new(8);
        for cell in 0..100 {
            cache.insert(cell, values(cell as f64));
            assert!(cache.len() <= 8);
        }
        cache.check_consistency();
    }

    #[test]
    fn test_shrink_capacity_evicts() {
        let mut cache = LruCache::new(8);
        for cell in 0..8 {
            cache.insert(cell, values(cell as f64));
        }
        cache.set_max_entries(3);
        assert_eq!(cache.len(), 3);
        // The most recent survive.
        assert!(cache.get(7).is_some());
        assert!(cache.get(0).is_none());
        cache.check_consistency();
    }

    #[test]
    fn test_arena_slot_reuse() {
        let mut cache = LruCache::new(2);
        for cell in 0..32 {
            cache.insert(cell, values(cell as f64));
        }
        // Two live entries plus at most one spare slot in the arena.
        assert!(cache.arena.len() <= 3);
        cache.check_consistency();
    }
}
