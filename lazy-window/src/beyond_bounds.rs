use crate::{
    BeyondBoundsDirection, LayoutDirection, ListLayout, MaterializedRange, Orientation, WindowError,
};

/// Default cap on the number of growth steps in [`BeyondBoundsExpander::layout`].
pub const DEFAULT_MAX_BEYOND_BOUNDS_STEPS: usize = 1_000;

/// Expansion state of the materialized range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BeyondBoundsState {
    /// No expansion in progress (or nothing to expand).
    #[default]
    Empty,
    Active(MaterializedRange),
}

/// What the predicate passed to [`BeyondBoundsExpander::layout`] can observe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeyondBoundsScope {
    /// Whether another step in the requested direction is possible.
    pub has_more_content: bool,
    /// The range materialized for this step, if any.
    pub range: Option<MaterializedRange>,
}

/// Host-side hook invoked for every step of an expansion.
pub trait BeyondBoundsHost {
    /// Synchronously remeasures the list with `extra` materialized in addition to the visible
    /// items. `None` means "back to the visible items only"; items materialized solely for the
    /// expansion must be released.
    fn remeasure(&mut self, extra: Option<MaterializedRange>);
}

impl<F: FnMut(Option<MaterializedRange>)> BeyondBoundsHost for F {
    fn remeasure(&mut self, extra: Option<MaterializedRange>) {
        self(extra)
    }
}

/// Grows the materialized range past the viewport one item at a time.
///
/// Used for queries (focus search, accessibility traversal) that need a neighbor which is not
/// materialized yet. Each step triggers one synchronous remeasure, since the caller's predicate
/// usually depends on the freshly measured item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BeyondBoundsExpander {
    layout: ListLayout,
    item_count: usize,
    state: BeyondBoundsState,
    max_steps: usize,
}

impl BeyondBoundsExpander {
    pub fn new(layout: ListLayout, item_count: usize) -> Self {
        Self {
            layout,
            item_count,
            state: BeyondBoundsState::Empty,
            max_steps: DEFAULT_MAX_BEYOND_BOUNDS_STEPS,
        }
    }

    /// Caps the number of growth steps taken by [`Self::layout`].
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn list_layout(&self) -> ListLayout {
        self.layout
    }

    pub fn set_list_layout(&mut self, layout: ListLayout) {
        self.layout = layout;
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
    }

    pub fn state(&self) -> BeyondBoundsState {
        self.state
    }

    /// Starts an expansion from the visible range.
    ///
    /// Without items or visible items the state stays [`BeyondBoundsState::Empty`].
    pub fn begin_expansion(
        &mut self,
        visible: Option<MaterializedRange>,
    ) -> Result<BeyondBoundsState, WindowError> {
        let visible = match visible {
            Some(range) if self.item_count > 0 => range,
            _ => {
                self.state = BeyondBoundsState::Empty;
                return Ok(self.state);
            }
        };
        if visible.start > visible.end {
            return Err(WindowError::InvalidRange {
                from: visible.start,
                to: visible.end,
            });
        }
        if visible.end >= self.item_count {
            return Err(WindowError::OutOfRange {
                index: visible.end,
                len: self.item_count,
            });
        }
        vdebug!(
            start = visible.start,
            end = visible.end,
            "BeyondBoundsExpander::begin_expansion"
        );
        self.state = BeyondBoundsState::Active(visible);
        Ok(self.state)
    }

    /// Whether `direction` moves toward higher indexes, or `None` when it is orthogonal to the
    /// scroll axis.
    pub fn is_forward(&self, direction: BeyondBoundsDirection) -> Option<bool> {
        let reverse = self.layout.reverse_layout;
        match (direction, self.layout.orientation) {
            (BeyondBoundsDirection::Before, _) => Some(reverse),
            (BeyondBoundsDirection::After, _) => Some(!reverse),
            (BeyondBoundsDirection::Above, Orientation::Vertical) => Some(reverse),
            (BeyondBoundsDirection::Below, Orientation::Vertical) => Some(!reverse),
            (BeyondBoundsDirection::Left, Orientation::Horizontal) => {
                match self.layout.layout_direction {
                    LayoutDirection::Ltr => Some(reverse),
                    LayoutDirection::Rtl => Some(!reverse),
                }
            }
            (BeyondBoundsDirection::Right, Orientation::Horizontal) => {
                match self.layout.layout_direction {
                    LayoutDirection::Ltr => Some(!reverse),
                    LayoutDirection::Rtl => Some(reverse),
                }
            }
            (BeyondBoundsDirection::Above | BeyondBoundsDirection::Below, _)
            | (BeyondBoundsDirection::Left | BeyondBoundsDirection::Right, _) => None,
        }
    }

    /// `false` for directions orthogonal to the axis, otherwise whether one more step stays
    /// within the data.
    pub fn has_more_content(
        &self,
        range: MaterializedRange,
        direction: BeyondBoundsDirection,
    ) -> bool {
        match self.is_forward(direction) {
            None => false,
            Some(true) => range.end.saturating_add(1) < self.item_count,
            Some(false) => range.start > 0,
        }
    }

    /// Returns `range` extended by exactly one index in `direction`, or `None` when no more
    /// content exists that way.
    pub fn grow_one_step(
        &self,
        range: MaterializedRange,
        direction: BeyondBoundsDirection,
    ) -> Option<MaterializedRange> {
        if !self.has_more_content(range, direction) {
            return None;
        }
        if self.is_forward(direction)? {
            Some(MaterializedRange::new(range.start, range.end + 1))
        } else {
            Some(MaterializedRange::new(range.start - 1, range.end))
        }
    }

    /// Grows the active range by one step. Returns the new range, or `None` when idle or at the
    /// end of the data.
    pub fn grow(&mut self, direction: BeyondBoundsDirection) -> Option<MaterializedRange> {
        let BeyondBoundsState::Active(range) = self.state else {
            return None;
        };
        let next = self.grow_one_step(range, direction)?;
        vtrace!(start = next.start, end = next.end, "BeyondBoundsExpander::grow");
        self.state = BeyondBoundsState::Active(next);
        Some(next)
    }

    /// Ends the expansion and asks `host` to remeasure without the extra items.
    pub fn retract(&mut self, host: &mut impl BeyondBoundsHost) -> BeyondBoundsState {
        if let BeyondBoundsState::Active(_range) = self.state {
            vdebug!(
                start = _range.start,
                end = _range.end,
                "BeyondBoundsExpander::retract"
            );
            self.state = BeyondBoundsState::Empty;
            host.remeasure(None);
        }
        self.state
    }

    /// Runs a full expansion: grow, remeasure, ask `predicate`; repeat until it returns
    /// `Some`, the data ends, or the step cap is hit. Always retracts before returning.
    ///
    /// With no items or nothing visible the predicate is called once with an empty scope.
    pub fn layout<T>(
        &mut self,
        direction: BeyondBoundsDirection,
        visible: Option<MaterializedRange>,
        host: &mut impl BeyondBoundsHost,
        mut predicate: impl FnMut(&BeyondBoundsScope) -> Option<T>,
    ) -> Result<Option<T>, WindowError> {
        let BeyondBoundsState::Active(_) = self.begin_expansion(visible)? else {
            return Ok(predicate(&BeyondBoundsScope {
                has_more_content: false,
                range: None,
            }));
        };

        let mut found = None;
        let mut steps = 0usize;
        while found.is_none() && steps < self.max_steps {
            let Some(range) = self.grow(direction) else {
                break;
            };
            steps += 1;
            host.remeasure(Some(range));
            found = predicate(&BeyondBoundsScope {
                has_more_content: self.has_more_content(range, direction),
                range: Some(range),
            });
        }
        if found.is_none() && steps == self.max_steps {
            vwarn!(steps, "BeyondBoundsExpander::layout: step cap reached");
        }

        self.retract(host);
        Ok(found)
    }
}
