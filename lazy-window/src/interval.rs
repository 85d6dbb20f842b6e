use alloc::vec::Vec;
use core::cell::Cell;

use crate::WindowError;

/// A contiguous run of global indexes sharing one payload.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T> {
    pub start_index: usize,
    /// Number of items in the run; always > 0.
    pub size: usize,
    pub value: T,
}

impl<T> Interval<T> {
    /// First global index past this interval.
    pub fn end(&self) -> usize {
        self.start_index + self.size
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index < self.end()
    }
}

/// An append-only list of [`Interval`]s addressed by global index.
///
/// Lookups remember the last interval they hit, so sequential access (the common case while
/// scrolling) resolves in `O(1)`; random access falls back to a binary search over interval
/// starts.
///
/// The structure is rebuilt wholesale when the item sequence changes structurally; it never
/// inserts in the middle.
#[derive(Clone, Debug)]
pub struct IntervalIndex<T> {
    intervals: Vec<Interval<T>>,
    total_size: usize,
    last_interval: Cell<Option<usize>>,
}

impl<T> Default for IntervalIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntervalIndex<T> {
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
            total_size: 0,
            last_interval: Cell::new(None),
        }
    }

    /// Appends an interval of `size` items. Zero-sized intervals are dropped.
    pub fn append(&mut self, size: usize, value: T) {
        if size == 0 {
            return;
        }
        self.intervals.push(Interval {
            start_index: self.total_size,
            size,
            value,
        });
        self.total_size += size;
    }

    /// Total number of items, which is also the first invalid global index.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Number of stored (non-empty) intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Interval<T>> {
        self.intervals.iter()
    }

    /// Returns the interval containing `index` and the index local to that interval.
    pub fn resolve(&self, index: usize) -> Result<(&Interval<T>, usize), WindowError> {
        let pos = self.position_of(index)?;
        let interval = &self.intervals[pos];
        Ok((interval, index - interval.start_index))
    }

    /// Returns the interval containing `index`.
    pub fn get(&self, index: usize) -> Result<&Interval<T>, WindowError> {
        self.resolve(index).map(|(interval, _)| interval)
    }

    /// Visits every interval intersecting `from..=to` once, in ascending order.
    pub fn for_each_in_range(
        &self,
        from: usize,
        to: usize,
        mut visit: impl FnMut(&Interval<T>),
    ) -> Result<(), WindowError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if to < from {
            return Err(WindowError::InvalidRange { from, to });
        }

        let mut pos = self.position_of(from)?;
        let mut item_index = self.intervals[pos].start_index;
        while item_index <= to {
            let interval = &self.intervals[pos];
            visit(interval);
            item_index += interval.size;
            pos += 1;
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), WindowError> {
        if index >= self.total_size {
            return Err(WindowError::OutOfRange {
                index,
                len: self.total_size,
            });
        }
        Ok(())
    }

    fn position_of(&self, index: usize) -> Result<usize, WindowError> {
        self.check_index(index)?;

        if let Some(last) = self.last_interval.get() {
            if self.intervals[last].contains(index) {
                return Ok(last);
            }
        }

        let pos = binary_search(&self.intervals, index);
        vtrace!(index, pos, "IntervalIndex: locality miss");
        self.last_interval.set(Some(pos));
        Ok(pos)
    }
}

/// Finds the interval whose start is the greatest value `<= index`.
///
/// `intervals` must be non-empty and `index` must be below the total size.
fn binary_search<T>(intervals: &[Interval<T>], index: usize) -> usize {
    let mut left = 0usize;
    let mut right = intervals.len() - 1;
    while left < right {
        let middle = left + (right - left) / 2;
        let middle_value = intervals[middle].start_index;
        if middle_value == index {
            return middle;
        }
        if middle_value < index {
            left = middle + 1;
            // Don't step into the next interval before its lower bound is confirmed.
            if index < intervals[left].start_index {
                return middle;
            }
        } else {
            right = middle.saturating_sub(1);
        }
    }
    left
}
