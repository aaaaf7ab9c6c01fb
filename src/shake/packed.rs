//! Dense, order-irrelevant collection with identity-based removal.

use std::hash::Hash;
use std::ops::Index;

use rustc_hash::FxHashMap;

/// Packed buffer of unique items.
///
/// Items live contiguously; removal swaps the last item into the hole, so
/// iteration order is unspecified. Capacity is tracked in whole
/// `increment`s: it grows by one increment when full and
/// [`try_shrink`](Self::try_shrink) gives one back while a full increment
/// is unused. It never drops below one increment.
#[derive(Debug, Clone)]
pub struct PackedBuffer<T> {
    items: Vec<T>,
    /// Slot of each item in `items`.
    slots: FxHashMap<T, usize>,
    capacity: usize,
    increment: usize,
}

impl<T: Copy + Eq + Hash> PackedBuffer<T> {
    /// Empty buffer reserving one `increment` (at least 1).
    pub fn new(increment: usize) -> Self {
        let increment = increment.max(1);
        Self {
            items: Vec::with_capacity(increment),
            slots: FxHashMap::default(),
            capacity: increment,
            increment,
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the buffer holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the next insert has to grow the buffer.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Reserved slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Growth/shrink step.
    pub fn increment(&self) -> usize {
        self.increment
    }

    /// Whether `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        self.slots.contains_key(item)
    }

    /// Append `item` unless already present. Returns `true` if inserted.
    pub fn insert(&mut self, item: T) -> bool {
        if self.contains(&item) {
            return false;
        }
        if self.is_full() {
            self.capacity += self.increment;
            self.items.reserve_exact(self.capacity - self.items.len());
            log::debug!("packed buffer grew to {}", self.capacity);
        }
        let _ = self.slots.insert(item, self.items.len());
        self.items.push(item);
        true
    }

    /// Remove `item` by swapping the last item into its slot. Returns
    /// `true` if it was present.
    pub fn remove(&mut self, item: &T) -> bool {
        let Some(slot) = self.slots.remove(item) else {
            return false;
        };
        let _ = self.items.swap_remove(slot);
        if let Some(&moved) = self.items.get(slot) {
            let _ = self.slots.insert(moved, slot);
        }
        true
    }

    /// Release one increment of capacity if at least that much is unused.
    /// Returns `true` if the buffer shrank.
    pub fn try_shrink(&mut self) -> bool {
        if self.capacity <= self.increment
            || self.capacity - self.items.len() < self.increment
        {
            return false;
        }
        self.capacity -= self.increment;
        self.items.shrink_to(self.capacity);
        log::debug!("packed buffer shrank to {}", self.capacity);
        true
    }

    /// Remove every item and return to a single increment of capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.slots.clear();
        self.capacity = self.increment;
        self.items.shrink_to(self.capacity);
    }

    /// Items in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate over items in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Index<usize> for PackedBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T: Copy + Eq + Hash> IntoIterator for &'a PackedBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
