use lazy_window::WindowError;

use crate::{ScrollAnchor, ScrollHost, SpringAnimation, SpringSpec};

/// Distance a single seeking iteration aims for when the target is far away.
pub const DEFAULT_TARGET_DISTANCE: f32 = 2500.0;
/// Distance after which a seeking iteration is cut short and re-planned.
pub const DEFAULT_BOUND_DISTANCE: f32 = 1500.0;
/// Smallest distance a seeking iteration aims for.
pub const DEFAULT_MINIMUM_DISTANCE: f32 = 50.0;
/// How far (in items) the target may trail the visible edge before the animator teleports.
pub const DEFAULT_ITEMS_FOR_TELEPORT: usize = 100;

// Hosts may round consumed deltas to whole pixels.
const CONSUMED_EPSILON: f32 = 0.5;

/// Tuning for [`AnimateScrollToItem`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollToItemOptions {
    pub target_distance: f32,
    pub bound_distance: f32,
    pub minimum_distance: f32,
    pub items_for_teleport: usize,
    pub spring: SpringSpec,
}

impl Default for ScrollToItemOptions {
    fn default() -> Self {
        Self {
            target_distance: DEFAULT_TARGET_DISTANCE,
            bound_distance: DEFAULT_BOUND_DISTANCE,
            minimum_distance: DEFAULT_MINIMUM_DISTANCE,
            items_for_teleport: DEFAULT_ITEMS_FOR_TELEPORT,
            spring: SpringSpec::default(),
        }
    }
}

impl ScrollToItemOptions {
    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_items_for_teleport(mut self, items_for_teleport: usize) -> Self {
        self.items_for_teleport = items_for_teleport;
        self
    }
}

/// Where a scroll-to-item animation should end: item `index` at `offset` pixels from the
/// viewport start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTarget {
    pub index: usize,
    pub offset: i32,
}

impl ScrollTarget {
    /// Validates a caller-supplied index. Negative indices are rejected.
    pub fn new(index: i64, offset: i32) -> Result<Self, WindowError> {
        let index = usize::try_from(index).map_err(|_| WindowError::InvalidArgument { index })?;
        Ok(Self { index, offset })
    }

    pub fn anchor(&self) -> ScrollAnchor {
        ScrollAnchor::new(self.index, self.offset)
    }
}

/// How a scroll-to-item animation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollOutcome {
    /// The target became visible, the final approach ran, and the host was snapped onto it.
    Reached,
    /// The list moved past the target and was snapped back onto it.
    Overshot,
    /// The list could not scroll any further before the target became visible.
    HitBounds,
    /// The list had no items; the host was asked to snap to the target directly.
    Empty,
    /// The animation was cancelled or superseded.
    Cancelled,
}

/// Result of advancing an animation by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollStatus {
    Running,
    Finished(ScrollOutcome),
}

impl ScrollStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, ScrollStatus::Finished(_))
    }
}

#[derive(Clone, Copy, Debug)]
struct Run {
    spring: SpringAnimation,
    start_nanos: Option<u64>,
    prev_value: f32,
}

impl Run {
    fn new(target: f32, velocity: f32, spec: SpringSpec) -> Self {
        Self {
            spring: SpringAnimation::new(0.0, target, velocity, spec),
            start_nanos: None,
            prev_value: 0.0,
        }
    }

    fn play_time(&mut self, frame_time_nanos: u64) -> u64 {
        let start = *self.start_nanos.get_or_insert(frame_time_nanos);
        frame_time_nanos.saturating_sub(start)
    }

    /// Clamps `value` so the run never travels past its target.
    fn coerce(&self, value: f32) -> f32 {
        let target = self.spring.target();
        if target > 0.0 {
            value.min(target)
        } else if target < 0.0 {
            value.max(target)
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Start,
    Seeking { run: Option<Run> },
    Converging { run: Run },
    Done(ScrollOutcome),
}

/// A frame-driven animation that scrolls a [`ScrollHost`] until item `index` sits at `offset`.
///
/// Far targets are approached in bounded spring iterations of at most
/// [`ScrollToItemOptions::target_distance`] pixels, each cut short after
/// [`ScrollToItemOptions::bound_distance`]. From the second iteration on, when the target is more
/// than [`ScrollToItemOptions::items_for_teleport`] items beyond the visible edge, the host is
/// snapped to within that many items so the number of iterations does not grow with list length.
/// Once the target is laid out, a final spring converges onto it and the host is snapped to the
/// exact position.
///
/// Call [`tick`](Self::tick) once per frame with a monotonic frame time. Dropping the animation
/// or calling [`cancel`](Self::cancel) stops it between frames.
#[derive(Clone, Debug)]
pub struct AnimateScrollToItem {
    target: ScrollTarget,
    options: ScrollToItemOptions,
    phase: Phase,
    forward: bool,
    velocity: f32,
    iterations: usize,
    teleports: usize,
}

impl AnimateScrollToItem {
    pub fn new(target: ScrollTarget, options: ScrollToItemOptions) -> Self {
        Self {
            target,
            options,
            phase: Phase::Start,
            forward: true,
            velocity: 0.0,
            iterations: 0,
            teleports: 0,
        }
    }

    pub fn target(&self) -> ScrollTarget {
        self.target
    }

    pub fn options(&self) -> &ScrollToItemOptions {
        &self.options
    }

    /// Seeking iterations started so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn teleports(&self) -> usize {
        self.teleports
    }

    pub fn outcome(&self) -> Option<ScrollOutcome> {
        match self.phase {
            Phase::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// Stops the animation. The host keeps its current position.
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            vdebug!(index = self.target.index, "scroll to item cancelled");
            self.phase = Phase::Done(ScrollOutcome::Cancelled);
        }
    }

    /// Advances the animation to `frame_time_nanos`.
    pub fn tick<H: ScrollHost>(&mut self, host: &mut H, frame_time_nanos: u64) -> ScrollStatus {
        if let Phase::Start = self.phase {
            self.phase = self.start(host);
        }
        let phase = self.phase;
        let next = match phase {
            Phase::Done(outcome) => return ScrollStatus::Finished(outcome),
            Phase::Start => Phase::Start,
            Phase::Seeking { run } => self.seek(host, run, frame_time_nanos),
            Phase::Converging { run } => self.converge(host, run, frame_time_nanos),
        };
        self.phase = next;
        match next {
            Phase::Done(outcome) => {
                vdebug!(
                    index = self.target.index,
                    iterations = self.iterations,
                    teleports = self.teleports,
                    ?outcome,
                    "scroll to item finished"
                );
                ScrollStatus::Finished(outcome)
            }
            _ => ScrollStatus::Running,
        }
    }

    fn start<H: ScrollHost>(&mut self, host: &mut H) -> Phase {
        let ScrollTarget { index, offset } = self.target;
        if host.item_count() == 0 {
            host.snap_to_item(index, offset);
            return Phase::Done(ScrollOutcome::Empty);
        }
        if let Some(item_offset) = host.target_item_offset(index) {
            return self.begin_converging(item_offset, 0.0);
        }
        self.forward = index > host.first_visible_item_index();
        vtrace!(index, forward = self.forward, "scroll to item seeking");
        Phase::Seeking { run: None }
    }

    fn begin_converging(&self, item_offset: i32, velocity: f32) -> Phase {
        let target = item_offset as f32 + self.target.offset as f32;
        vdebug!(index = self.target.index, target, "scroll to item converging");
        Phase::Converging {
            run: Run::new(target, velocity, self.options.spring),
        }
    }

    fn plan_iteration<H: ScrollHost>(&self, host: &H) -> f32 {
        let expected = host
            .expected_distance_to(self.target.index, self.target.offset)
            .abs();
        let distance = if expected < self.options.target_distance {
            expected.max(self.options.minimum_distance)
        } else {
            self.options.target_distance
        };
        if self.forward { distance } else { -distance }
    }

    fn seek<H: ScrollHost>(
        &mut self,
        host: &mut H,
        run: Option<Run>,
        frame_time_nanos: u64,
    ) -> Phase {
        let index = self.target.index;
        let mut run = match run {
            Some(run) => run,
            None => {
                if host.item_count() == 0 {
                    return Phase::Done(ScrollOutcome::HitBounds);
                }
                self.iterations += 1;
                let target = self.plan_iteration(host);
                vtrace!(iteration = self.iterations, target, "scroll to item iteration");
                Run::new(target, self.velocity, self.options.spring)
            }
        };

        let play_time = run.play_time(frame_time_nanos);
        let (value, velocity) = run.spring.sample(play_time);
        self.velocity = velocity;
        let mut cut_short = false;

        if host.target_item_offset(index).is_none() {
            let delta = run.coerce(value) - run.prev_value;
            let consumed = host.scroll_by(delta);
            if host.target_item_offset(index).is_none() {
                if (delta - consumed).abs() > CONSUMED_EPSILON {
                    return Phase::Done(ScrollOutcome::HitBounds);
                }
                run.prev_value += delta;

                let bound = self.options.bound_distance;
                cut_short = if self.forward { value > bound } else { value < -bound };

                if self.iterations >= 2 {
                    self.maybe_teleport(host);
                }
            }
        }

        if ScrollAnchor::capture(host).is_past(self.target.anchor(), self.forward) {
            vdebug!(index, "scroll to item overshot, snapping back");
            host.snap_to_item(index, self.target.offset);
            return Phase::Done(ScrollOutcome::Overshot);
        }
        if let Some(item_offset) = host.target_item_offset(index) {
            return self.begin_converging(item_offset, self.velocity);
        }

        if cut_short || run.spring.is_finished_at(play_time) {
            Phase::Seeking { run: None }
        } else {
            Phase::Seeking { run: Some(run) }
        }
    }

    fn maybe_teleport<H: ScrollHost>(&mut self, host: &mut H) {
        let index = self.target.index;
        let items = self.options.items_for_teleport;
        let teleport_to = if self.forward {
            let last = host.last_visible_item_index();
            (index > last && index - last > items).then(|| index - items)
        } else {
            let first = host.first_visible_item_index();
            (first > index && first - index > items).then(|| index + items)
        };
        if let Some(teleport_to) = teleport_to {
            vdebug!(
                from = host.first_visible_item_index(),
                to = teleport_to,
                "scroll to item teleport"
            );
            self.teleports += 1;
            host.snap_to_item(teleport_to, 0);
        }
    }

    fn converge<H: ScrollHost>(
        &mut self,
        host: &mut H,
        mut run: Run,
        frame_time_nanos: u64,
    ) -> Phase {
        let play_time = run.play_time(frame_time_nanos);
        let (value, velocity) = run.spring.sample(play_time);
        self.velocity = velocity;

        let coerced = run.coerce(value);
        let delta = coerced - run.prev_value;
        let consumed = host.scroll_by(delta);
        let blocked = (delta - consumed).abs() > CONSUMED_EPSILON;
        if blocked || coerced != value || run.spring.is_finished_at(play_time) {
            host.snap_to_item(self.target.index, self.target.offset);
            return Phase::Done(ScrollOutcome::Reached);
        }
        run.prev_value += delta;
        Phase::Converging { run }
    }
}
