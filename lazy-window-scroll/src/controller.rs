use lazy_window::WindowError;

use crate::{
    AnimateScrollToItem, ScrollHost, ScrollOutcome, ScrollStatus, ScrollTarget,
    ScrollToItemOptions,
};

/// A framework-neutral controller that owns at most one scroll-to-item animation.
///
/// This type does not hold the list. Adapters drive it by calling:
/// - `animate_scroll_to_item` / `scroll_to_item` for programmatic scrolling
/// - `on_user_scroll` when the user drags or wheels (this cancels any animation)
/// - `tick(host, frame_time_nanos)` each frame while `is_animating()`
///
/// Starting a new animation supersedes the running one.
#[derive(Clone, Debug, Default)]
pub struct ScrollController {
    options: ScrollToItemOptions,
    animation: Option<AnimateScrollToItem>,
    last_outcome: Option<ScrollOutcome>,
}

impl ScrollController {
    pub fn new(options: ScrollToItemOptions) -> Self {
        Self {
            options,
            animation: None,
            last_outcome: None,
        }
    }

    pub fn options(&self) -> &ScrollToItemOptions {
        &self.options
    }

    /// Applies to animations started after this call.
    pub fn set_options(&mut self, options: ScrollToItemOptions) {
        self.options = options;
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&AnimateScrollToItem> {
        self.animation.as_ref()
    }

    /// Outcome of the most recently finished (or cancelled) animation.
    pub fn last_outcome(&self) -> Option<ScrollOutcome> {
        self.last_outcome
    }

    pub fn cancel_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            animation.cancel();
            self.last_outcome = animation.outcome();
        }
    }

    /// Starts animating toward item `index` at `offset`, superseding any running animation.
    ///
    /// Fails without touching the running animation when `index` is negative.
    pub fn animate_scroll_to_item(&mut self, index: i64, offset: i32) -> Result<(), WindowError> {
        let target = ScrollTarget::new(index, offset)?;
        self.cancel_animation();
        self.animation = Some(AnimateScrollToItem::new(target, self.options));
        Ok(())
    }

    /// Jumps to item `index` at `offset` immediately, cancelling any running animation.
    pub fn scroll_to_item<H: ScrollHost>(
        &mut self,
        host: &mut H,
        index: i64,
        offset: i32,
    ) -> Result<(), WindowError> {
        let target = ScrollTarget::new(index, offset)?;
        self.cancel_animation();
        host.snap_to_item(target.index, target.offset);
        Ok(())
    }

    /// Forwards a user scroll to the host and cancels any running animation.
    ///
    /// Returns the amount the host consumed.
    pub fn on_user_scroll<H: ScrollHost>(&mut self, host: &mut H, delta: f32) -> f32 {
        self.cancel_animation();
        host.scroll_by(delta)
    }

    /// Advances the running animation, if any.
    ///
    /// Returns `None` when idle. A finished animation is released on the tick that finishes it.
    pub fn tick<H: ScrollHost>(
        &mut self,
        host: &mut H,
        frame_time_nanos: u64,
    ) -> Option<ScrollStatus> {
        let animation = self.animation.as_mut()?;
        let status = animation.tick(host, frame_time_nanos);
        if let ScrollStatus::Finished(outcome) = status {
            self.animation = None;
            self.last_outcome = Some(outcome);
        }
        Some(status)
    }
}
