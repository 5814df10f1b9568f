// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Insertion-ordered multiset addressed by opaque keys.
//!
//! A [`Bag`] holds the observers of a multicast source. Every insertion
//! yields a fresh [`BagKey`]; keys are never reused by the same bag, so a
//! stale key can only ever miss.
//!
//! ```
//! use fluxion_core::Bag;
//!
//! let mut bag = Bag::new();
//! let a = bag.insert("a");
//! let b = bag.insert("b");
//!
//! assert_eq!(bag.remove(a), Some("a"));
//! assert_eq!(bag.remove(a), None);
//! assert_eq!(bag.iter().copied().collect::<Vec<_>>(), vec!["b"]);
//! # let _ = b;
//! ```

use alloc::vec::Vec;
use core::fmt;

/// Key identifying one entry of a [`Bag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BagKey(u64);

impl fmt::Display for BagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct Bag<T> {
    next_key: u64,
    entries: Vec<(BagKey, T)>,
}

impl<T> Bag<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_key: 0,
            entries: Vec::new(),
        }
    }

    /// Appends `value` and returns its key.
    pub fn insert(&mut self, value: T) -> BagKey {
        let key = BagKey(self.next_key);
        self.next_key += 1;
        self.entries.push((key, value));
        key
    }

    /// Removes the entry for `key`, keeping the order of the others.
    ///
    /// Returns `None` if the key was never issued by this bag or has
    /// already been removed.
    pub fn remove(&mut self, key: BagKey) -> Option<T> {
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    #[must_use]
    pub fn contains(&self, key: BagKey) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Moves every entry into a new bag, leaving this one empty.
    ///
    /// The key counter stays with `self`, so keys issued before the take can
    /// never collide with keys issued after it.
    pub fn take(&mut self) -> Self {
        Self {
            next_key: self.next_key,
            entries: core::mem::take(&mut self.entries),
        }
    }
}

impl<T> Default for Bag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for Bag<T> {
    type Item = T;
    type IntoIter = core::iter::Map<alloc::vec::IntoIter<(BagKey, T)>, fn((BagKey, T)) -> T>;

    fn into_iter(self) -> Self::IntoIter {
        let value_of: fn((BagKey, T)) -> T = |(_, value)| value;
        self.entries.into_iter().map(value_of)
    }
}

impl<T> fmt::Debug for Bag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bag")
            .field("len", &self.entries.len())
            .field("next_key", &self.next_key)
            .finish()
    }
}
