//! A headless windowed-list virtualization core.
//!
//! For spring-driven scroll-to-item animation, see the `lazy-window-scroll` crate.
//!
//! This crate holds the index bookkeeping a lazy list needs to render only what is on screen:
//! interval lookup with a locality cache, bucketed key windows, a per-environment content cache,
//! prefetch bookkeeping, and beyond-bounds expansion of the materialized range.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the item sequence (as intervals with payloads)
//! - the materialization/measurement of item content
//! - a remeasure hook for synchronous beyond-bounds steps
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod beyond_bounds;
mod content;
mod error;
mod interval;
mod key;
mod key_index;
mod prefetch;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use beyond_bounds::{
    BeyondBoundsExpander, BeyondBoundsHost, BeyondBoundsScope, BeyondBoundsState,
    DEFAULT_MAX_BEYOND_BOUNDS_STEPS,
};
pub use content::MaterializedContentCache;
pub use error::WindowError;
pub use interval::{Interval, IntervalIndex};
pub use key::ItemKey;
pub use key_index::KeyIndexMap;
pub use prefetch::{
    PrefetchHandle, PrefetchRequest, PrefetchScheduler, PrefetchState, PrefetchStrategy,
    ScrollPrefetcher,
};
pub use types::{
    BeyondBoundsDirection, LayoutDirection, ListLayout, MaterializedRange, Orientation,
    ScrollDirection, WindowRange,
};
pub use window::{
    DEFAULT_EXTRA_ITEM_COUNT, DEFAULT_SLIDING_WINDOW_SIZE, NearestRangeOptions, NearestRangeState,
    estimate_window,
};
