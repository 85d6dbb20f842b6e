use crate::WindowRange;

/// Sliding window size used for list key lookups.
pub const DEFAULT_SLIDING_WINDOW_SIZE: usize = 30;

/// Items kept on each side of the sliding window.
pub const DEFAULT_EXTRA_ITEM_COUNT: usize = 100;

/// Sizing of the key lookup window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearestRangeOptions {
    /// Bucket width; the window only moves when the anchor crosses a bucket boundary.
    pub sliding_window_size: usize,
    pub extra_item_count: usize,
}

impl Default for NearestRangeOptions {
    fn default() -> Self {
        Self {
            sliding_window_size: DEFAULT_SLIDING_WINDOW_SIZE,
            extra_item_count: DEFAULT_EXTRA_ITEM_COUNT,
        }
    }
}

impl NearestRangeOptions {
    pub fn new(sliding_window_size: usize, extra_item_count: usize) -> Self {
        Self {
            sliding_window_size,
            extra_item_count,
        }
    }
}

/// Computes the window of indexes around `anchor`.
///
/// The anchor is first snapped down to a multiple of `sliding_window_size`, so every anchor in
/// the same bucket yields the same window. A zero window size is treated as one.
pub fn estimate_window(
    anchor: usize,
    sliding_window_size: usize,
    extra_item_count: usize,
) -> WindowRange {
    let window = sliding_window_size.max(1);
    let bucket_start = window.saturating_mul(anchor / window);
    WindowRange {
        start: bucket_start.saturating_sub(extra_item_count),
        end: bucket_start
            .saturating_add(window)
            .saturating_add(extra_item_count),
    }
}

/// Memoized window around the first visible item.
///
/// [`NearestRangeState::update`] reports whether the window value actually changed, so callers
/// only rebuild their key → index map when the anchor crosses a bucket boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NearestRangeState {
    value: WindowRange,
    anchor: usize,
    options: NearestRangeOptions,
}

impl Default for NearestRangeState {
    fn default() -> Self {
        Self::new(0, NearestRangeOptions::default())
    }
}

impl NearestRangeState {
    pub fn new(anchor: usize, options: NearestRangeOptions) -> Self {
        Self {
            value: estimate_window(
                anchor,
                options.sliding_window_size,
                options.extra_item_count,
            ),
            anchor,
            options,
        }
    }

    pub fn range(&self) -> WindowRange {
        self.value
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub fn options(&self) -> NearestRangeOptions {
        self.options
    }

    /// Moves the anchor. Returns `true` when the window changed.
    pub fn update(&mut self, anchor: usize) -> bool {
        if anchor == self.anchor {
            return false;
        }
        self.anchor = anchor;
        self.recompute()
    }

    /// Replaces the window sizing. Returns `true` when the window changed.
    pub fn set_options(&mut self, options: NearestRangeOptions) -> bool {
        if options == self.options {
            return false;
        }
        self.options = options;
        self.recompute()
    }

    fn recompute(&mut self) -> bool {
        let next = estimate_window(
            self.anchor,
            self.options.sliding_window_size,
            self.options.extra_item_count,
        );
        if next == self.value {
            return false;
        }
        vdebug!(
            anchor = self.anchor,
            start = next.start,
            end = next.end,
            "NearestRangeState: window moved"
        );
        self.value = next;
        true
    }
}
