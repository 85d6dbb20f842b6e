//! Spring-driven scroll-to-item animation for the `lazy-window` crate.
//!
//! The `lazy-window` crate keeps item bookkeeping UI-agnostic. This crate adds the piece that
//! needs a live, scrollable list: animating to an item whose position is not known until it is
//! laid out.
//!
//! - [`ScrollHost`]: what the list must expose (visible range, item offsets, `scroll_by`, snap)
//! - [`AnimateScrollToItem`]: a frame-driven animation with bounded iterations and teleports
//! - [`ScrollController`]: owns at most one animation and handles supersede/cancel
//!
//! Nothing here spawns tasks or reads a clock. Adapters call `tick(frame_time_nanos)` from their
//! frame loop.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod anchor;
mod animate;
mod controller;
mod host;
mod spring;


pub use anchor::ScrollAnchor;
pub use animate::{
    AnimateScrollToItem, DEFAULT_BOUND_DISTANCE, DEFAULT_ITEMS_FOR_TELEPORT,
    DEFAULT_MINIMUM_DISTANCE, DEFAULT_TARGET_DISTANCE, ScrollOutcome, ScrollStatus, ScrollTarget,
    ScrollToItemOptions,
};
pub use controller::ScrollController;
pub use host::{ScrollHost, estimated_distance};
pub use spring::{
    DAMPING_RATIO_NO_BOUNCY, DEFAULT_VISIBILITY_THRESHOLD, STIFFNESS_MEDIUM, SpringAnimation,
    SpringSpec,
};
