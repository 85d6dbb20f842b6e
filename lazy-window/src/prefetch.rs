//! Speculative materialization of items just outside the visible window.
//!
//! This module owns the bookkeeping only. The host runs the actual materialization out of band
//! (typically in idle time between frames on the UI thread) by draining
//! [`PrefetchScheduler::next_request`] and completing each [`PrefetchRequest`]. The layout
//! pass later adopts finished work with [`PrefetchScheduler::take`].
//!
//! Handles are single-threaded (`Rc`), cancellable at any time without blocking, and release
//! any materialized resource on cancellation by dropping it.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::key::KeyMap;
use crate::{MaterializedRange, ScrollDirection};

/// Lifecycle of a prefetch request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefetchState {
    /// Scheduled, not yet picked up by the executor.
    Pending,
    /// Handed to the executor via [`PrefetchScheduler::next_request`].
    Running,
    /// Materialized and waiting for the layout pass.
    Materialized,
    /// The layout pass took the resource.
    Consumed,
    Cancelled,
}

impl PrefetchState {
    fn is_outstanding(self) -> bool {
        matches!(self, Self::Pending | Self::Running | Self::Materialized)
    }
}

struct Slot<R> {
    index: usize,
    state: PrefetchState,
    resource: Option<R>,
}

type SharedSlot<R> = Rc<RefCell<Slot<R>>>;

/// A cancellable handle to a scheduled prefetch.
pub struct PrefetchHandle<R> {
    slot: SharedSlot<R>,
}

impl<R> Clone for PrefetchHandle<R> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<R> fmt::Debug for PrefetchHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("PrefetchHandle")
            .field("index", &slot.index)
            .field("state", &slot.state)
            .finish()
    }
}

impl<R> PrefetchHandle<R> {
    pub fn index(&self) -> usize {
        self.slot.borrow().index
    }

    pub fn state(&self) -> PrefetchState {
        self.slot.borrow().state
    }

    pub fn is_cancelled(&self) -> bool {
        self.state() == PrefetchState::Cancelled
    }

    /// Cancels the request. Idempotent.
    ///
    /// A request that has not started is dropped; a materialized resource is released. Content
    /// already taken by the layout pass is left alone.
    pub fn cancel(&self) {
        let released = {
            let mut slot = self.slot.borrow_mut();
            match slot.state {
                PrefetchState::Pending | PrefetchState::Running => {
                    slot.state = PrefetchState::Cancelled;
                    None
                }
                PrefetchState::Materialized => {
                    slot.state = PrefetchState::Cancelled;
                    slot.resource.take()
                }
                PrefetchState::Consumed | PrefetchState::Cancelled => None,
            }
        };
        if released.is_some() {
            vtrace!(index = self.index(), "PrefetchHandle: released materialized item");
        }
        drop(released);
    }
}

/// A unit of prefetch work handed to the host's executor.
///
/// Dropping a request without completing it counts as a cancellation.
pub struct PrefetchRequest<R> {
    slot: SharedSlot<R>,
}

impl<R> fmt::Debug for PrefetchRequest<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefetchRequest")
            .field("index", &self.index())
            .finish()
    }
}

impl<R> PrefetchRequest<R> {
    pub fn index(&self) -> usize {
        self.slot.borrow().index
    }

    /// `true` if the request was cancelled after it was handed out.
    ///
    /// Executors may poll this between chunks of work and bail out early.
    pub fn is_cancelled(&self) -> bool {
        self.slot.borrow().state == PrefetchState::Cancelled
    }

    /// Stores the materialized resource.
    ///
    /// Returns `false` (and releases `resource`) when the request was cancelled meanwhile.
    pub fn complete(self, resource: R) -> bool {
        let mut slot = self.slot.borrow_mut();
        if slot.state != PrefetchState::Running {
            vwarn!(
                index = slot.index,
                "PrefetchRequest: completed after cancellation, releasing"
            );
            drop(slot);
            drop(resource);
            return false;
        }
        slot.state = PrefetchState::Materialized;
        slot.resource = Some(resource);
        true
    }
}

impl<R> Drop for PrefetchRequest<R> {
    fn drop(&mut self) {
        let mut slot = self.slot.borrow_mut();
        if slot.state == PrefetchState::Running {
            slot.state = PrefetchState::Cancelled;
        }
    }
}

/// Bookkeeping for outstanding prefetch requests, at most one per index.
///
/// Cancelled and consumed requests are forgotten by [`Self::purge`], which
/// [`ScrollPrefetcher::on_scroll`] calls on every scroll. Hosts that schedule directly should
/// call it once per frame.
pub struct PrefetchScheduler<R> {
    slots: KeyMap<usize, SharedSlot<R>>,
    queue: VecDeque<usize>,
}

impl<R> Default for PrefetchScheduler<R> {
    fn default() -> Self {
        Self {
            slots: KeyMap::default(),
            queue: VecDeque::new(),
        }
    }
}

impl<R> fmt::Debug for PrefetchScheduler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefetchScheduler")
            .field("slots", &self.slots.len())
            .field("queue", &self.queue)
            .finish()
    }
}

impl<R> PrefetchScheduler<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers intent to materialize `index` ahead of the layout pass.
    ///
    /// If a request for `index` is still outstanding, its handle is returned instead of
    /// scheduling a second one.
    pub fn schedule(&mut self, index: usize) -> PrefetchHandle<R> {
        if let Some(slot) = self.slots.get(&index) {
            if slot.borrow().state.is_outstanding() {
                return PrefetchHandle {
                    slot: Rc::clone(slot),
                };
            }
        }

        vtrace!(index, "PrefetchScheduler::schedule");
        let slot = Rc::new(RefCell::new(Slot {
            index,
            state: PrefetchState::Pending,
            resource: None,
        }));
        self.slots.insert(index, Rc::clone(&slot));
        self.queue.push_back(index);
        PrefetchHandle { slot }
    }

    /// Pops the next pending request for the executor, skipping cancelled ones.
    pub fn next_request(&mut self) -> Option<PrefetchRequest<R>> {
        while let Some(index) = self.queue.pop_front() {
            let Some(slot) = self.slots.get(&index) else {
                continue;
            };
            let mut inner = slot.borrow_mut();
            if inner.state != PrefetchState::Pending {
                continue;
            }
            inner.state = PrefetchState::Running;
            drop(inner);
            return Some(PrefetchRequest {
                slot: Rc::clone(slot),
            });
        }
        None
    }

    /// Takes the materialized resource for `index`, if prefetch finished it.
    pub fn take(&mut self, index: usize) -> Option<R> {
        let slot = self.slots.get(&index)?;
        let resource = {
            let mut inner = slot.borrow_mut();
            if inner.state != PrefetchState::Materialized {
                return None;
            }
            inner.state = PrefetchState::Consumed;
            inner.resource.take()
        };
        self.slots.remove(&index);
        resource
    }

    /// State of the latest request for `index`.
    pub fn state(&self, index: usize) -> Option<PrefetchState> {
        self.slots.get(&index).map(|slot| slot.borrow().state)
    }

    /// `true` if an outstanding request exists for `index`.
    pub fn is_scheduled(&self, index: usize) -> bool {
        self.state(index).is_some_and(PrefetchState::is_outstanding)
    }

    /// Number of requests still waiting for the executor.
    pub fn pending_len(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.borrow().state == PrefetchState::Pending)
            .count()
    }

    /// Number of tracked requests in any state.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Cancels every outstanding request.
    pub fn cancel_all(&mut self) {
        for slot in self.slots.values() {
            PrefetchHandle {
                slot: Rc::clone(slot),
            }
            .cancel();
        }
        self.queue.clear();
    }

    /// Forgets cancelled and consumed requests.
    pub fn purge(&mut self) {
        self.slots
            .retain(|_, slot| slot.borrow().state.is_outstanding());
        let slots = &self.slots;
        self.queue.retain(|index| slots.contains_key(index));
    }
}

/// How many items to prefetch in the direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefetchStrategy {
    pub prefetch_count: usize,
    pub enabled: bool,
}

impl Default for PrefetchStrategy {
    fn default() -> Self {
        Self {
            prefetch_count: 2,
            enabled: true,
        }
    }
}

impl PrefetchStrategy {
    pub fn new(prefetch_count: usize) -> Self {
        Self {
            prefetch_count,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            prefetch_count: 0,
            enabled: false,
        }
    }
}

/// Schedules prefetches from scroll events according to a [`PrefetchStrategy`].
///
/// Items past the last visible item are requested while scrolling forward, items before the
/// first visible one while scrolling backward. Reversing direction cancels the requests made
/// for the old direction.
pub struct ScrollPrefetcher<R> {
    strategy: PrefetchStrategy,
    direction: Option<ScrollDirection>,
    handles: Vec<PrefetchHandle<R>>,
}

impl<R> fmt::Debug for ScrollPrefetcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollPrefetcher")
            .field("strategy", &self.strategy)
            .field("direction", &self.direction)
            .field("handles", &self.handles)
            .finish()
    }
}

impl<R> ScrollPrefetcher<R> {
    pub fn new(strategy: PrefetchStrategy) -> Self {
        Self {
            strategy,
            direction: None,
            handles: Vec::new(),
        }
    }

    pub fn strategy(&self) -> PrefetchStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: PrefetchStrategy) {
        self.strategy = strategy;
        if !strategy.enabled {
            self.cancel_all();
        }
    }

    /// Handles currently owned by the prefetcher.
    pub fn handles(&self) -> &[PrefetchHandle<R>] {
        &self.handles
    }

    /// Updates requests after a scroll in `direction` with `visible` on screen.
    pub fn on_scroll(
        &mut self,
        scheduler: &mut PrefetchScheduler<R>,
        direction: ScrollDirection,
        visible: MaterializedRange,
        item_count: usize,
    ) {
        scheduler.purge();
        if !self.strategy.enabled {
            self.cancel_all();
            return;
        }
        if self.direction.is_some_and(|prev| prev != direction) {
            vdebug!("ScrollPrefetcher: direction changed, cancelling");
            self.cancel_all();
        }
        self.direction = Some(direction);

        let count = self.strategy.prefetch_count;
        let wanted = |index: usize| match direction {
            ScrollDirection::Forward => {
                index > visible.end && index - visible.end <= count && index < item_count
            }
            ScrollDirection::Backward => index < visible.start && visible.start - index <= count,
        };

        // Keep requests still ahead of us or now on screen (layout adopts those).
        self.handles.retain(|handle| {
            let index = handle.index();
            if handle.is_cancelled() {
                return false;
            }
            if wanted(index) || visible.contains(index) {
                return true;
            }
            handle.cancel();
            false
        });

        for step in 1..=count {
            let index = match direction {
                ScrollDirection::Forward => match visible.end.checked_add(step) {
                    Some(index) if index < item_count => index,
                    _ => break,
                },
                ScrollDirection::Backward => match visible.start.checked_sub(step) {
                    Some(index) => index,
                    None => break,
                },
            };
            if self.handles.iter().any(|handle| handle.index() == index) {
                continue;
            }
            self.handles.push(scheduler.schedule(index));
        }
    }

    pub fn cancel_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.cancel();
        }
        self.direction = None;
    }
}
