use alloc::vec::Vec;
use core::cmp;

use crate::key::{ItemKey, KeyMap};
use crate::{Interval, IntervalIndex, WindowError, WindowRange};

/// A partial key → index map covering only a [`WindowRange`].
///
/// Keys outside the window are absent; callers fall back to the last index they knew for that
/// key (see [`KeyIndexMap::index_or`]).
#[derive(Clone, Debug)]
pub struct KeyIndexMap<K> {
    map: KeyMap<K, usize>,
    keys: Vec<K>,
    keys_start: usize,
}

impl<K> Default for KeyIndexMap<K> {
    fn default() -> Self {
        Self {
            map: KeyMap::default(),
            keys: Vec::new(),
            keys_start: 0,
        }
    }
}

impl<K: ItemKey + Clone> KeyIndexMap<K> {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the map for every index of `window` that exists in `intervals`.
    ///
    /// `key_for(interval, index)` returns the key of the item at global `index`; hosts that have
    /// no key for an interval usually derive one from the index.
    pub fn build<T>(
        intervals: &IntervalIndex<T>,
        window: WindowRange,
        mut key_for: impl FnMut(&Interval<T>, usize) -> K,
    ) -> Result<Self, WindowError> {
        let total = intervals.total_size();
        if window.is_empty() || total == 0 || window.start >= total {
            return Ok(Self::default());
        }
        let first = window.start;
        let last = cmp::min(window.end - 1, total - 1);

        let mut out = Self {
            map: KeyMap::default(),
            keys: Vec::with_capacity(last - first + 1),
            keys_start: first,
        };
        intervals.for_each_in_range(first, last, |interval| {
            let start = first.max(interval.start_index);
            let end = last.min(interval.end() - 1);
            for index in start..=end {
                let key = key_for(interval, index);
                out.map.insert(key.clone(), index);
                out.keys.push(key);
            }
        })?;
        vtrace!(first, last, keys = out.keys.len(), "KeyIndexMap::build");
        Ok(out)
    }

    /// Index of `key`, if the key lies inside the window.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.map.get(key).copied()
    }

    /// Index of `key`, or `last_known` when the key is outside the window.
    pub fn index_or(&self, key: &K, last_known: usize) -> usize {
        self.index_of(key).unwrap_or(last_known)
    }

    /// Key of the item at `index`, if the index lies inside the window.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        let offset = index.checked_sub(self.keys_start)?;
        self.keys.get(offset)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
