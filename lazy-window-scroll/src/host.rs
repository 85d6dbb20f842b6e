/// Capabilities a scrollable list must expose to be driven by
/// [`AnimateScrollToItem`](crate::AnimateScrollToItem).
///
/// Offsets are in pixels along the scroll axis. The host owns the layout; the animator never
/// tracks item positions itself and re-queries the host on every tick.
pub trait ScrollHost {
    fn item_count(&self) -> usize;

    fn first_visible_item_index(&self) -> usize;

    /// How far the first visible item is scrolled past the viewport start.
    fn first_visible_item_scroll_offset(&self) -> i32;

    fn last_visible_item_index(&self) -> usize;

    /// Offset of item `index` from the viewport start, or `None` when it is not laid out.
    fn target_item_offset(&self, index: usize) -> Option<i32>;

    /// Estimated distance to scroll so that item `index` sits at `offset`.
    ///
    /// Positive values scroll forward. [`estimated_distance`] is a reasonable implementation
    /// for hosts that know an average item size.
    fn expected_distance_to(&self, index: usize, offset: i32) -> f32;

    /// Scrolls by `delta` and returns the amount actually consumed.
    fn scroll_by(&mut self, delta: f32) -> f32;

    /// Jumps so that item `index` sits at `offset`, without animation.
    fn snap_to_item(&mut self, index: usize, offset: i32);
}

/// Estimates the scroll distance to `(index, offset)` from the first visible item, assuming
/// every item has `average_item_size`.
pub fn estimated_distance(
    average_item_size: f32,
    first_visible_index: usize,
    first_visible_offset: i32,
    index: usize,
    offset: i32,
) -> f32 {
    let items = index as f64 - first_visible_index as f64;
    (average_item_size as f64 * items - first_visible_offset as f64 + offset as f64) as f32
}
