use crate::*;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;

use proptest::prelude::*;

fn build_index(sizes: &[usize]) -> IntervalIndex<usize> {
    let mut index = IntervalIndex::new();
    for (i, &size) in sizes.iter().enumerate() {
        index.append(size, i);
    }
    index
}

/// Brute-force reference: payload (the position in `sizes`) and local index of `item`.
fn expected_resolve(sizes: &[usize], item: usize) -> Option<(usize, usize)> {
    let mut start = 0usize;
    for (i, &size) in sizes.iter().enumerate() {
        if item < start + size {
            return Some((i, item - start));
        }
        start += size;
    }
    None
}

#[derive(Debug)]
struct Tracked {
    released: Rc<Cell<usize>>,
}

impl Tracked {
    fn new(released: &Rc<Cell<usize>>) -> Self {
        Self {
            released: Rc::clone(released),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

// --- IntervalIndex -------------------------------------------------------------------------

#[test]
fn zero_sized_intervals_are_dropped() {
    let mut index = IntervalIndex::new();
    index.append(5, "a");
    index.append(0, "b");
    index.append(3, "c");

    assert_eq!(index.total_size(), 8);
    assert_eq!(index.len(), 2);

    let (interval, local) = index.resolve(5).unwrap();
    assert_eq!(interval.value, "c");
    assert_eq!(interval.start_index, 5);
    assert_eq!(local, 0);

    let mut seen = Vec::new();
    index
        .for_each_in_range(0, 7, |interval| seen.push(interval.value))
        .unwrap();
    assert_eq!(seen, vec!["a", "c"]);
}

#[test]
fn resolve_past_total_size_is_out_of_range() {
    let mut index = IntervalIndex::new();
    index.append(4, ());
    assert_eq!(
        index.resolve(4).unwrap_err(),
        WindowError::OutOfRange { index: 4, len: 4 }
    );

    let empty = IntervalIndex::<()>::new();
    assert!(empty.is_empty());
    assert_eq!(
        empty.get(0).unwrap_err(),
        WindowError::OutOfRange { index: 0, len: 0 }
    );
}

#[test]
fn for_each_in_range_validates_bounds() {
    let index = build_index(&[3, 3, 3]);
    assert_eq!(
        index.for_each_in_range(0, 9, |_| {}),
        Err(WindowError::OutOfRange { index: 9, len: 9 })
    );
    assert_eq!(
        index.for_each_in_range(5, 2, |_| {}),
        Err(WindowError::InvalidRange { from: 5, to: 2 })
    );
}

#[test]
fn for_each_in_range_visits_partially_covered_intervals_once() {
    let index = build_index(&[3, 3, 3, 3]);
    let mut seen = Vec::new();
    index
        .for_each_in_range(4, 7, |interval| seen.push(interval.value))
        .unwrap();
    assert_eq!(seen, vec![1, 2]);

    seen.clear();
    index
        .for_each_in_range(5, 5, |interval| seen.push(interval.value))
        .unwrap();
    assert_eq!(seen, vec![1]);
}

#[test]
fn resolve_handles_every_interval_boundary() {
    let sizes = [1, 2, 7, 1, 1, 4, 9, 3];
    let index = build_index(&sizes);
    for item in (0..index.total_size()).rev() {
        let (interval, local) = index.resolve(item).unwrap();
        assert_eq!(Some((interval.value, local)), expected_resolve(&sizes, item));
    }
}

proptest! {
    #[test]
    fn resolve_matches_linear_scan(
        sizes in proptest::collection::vec(0usize..6, 0..40),
        probes in proptest::collection::vec(any::<usize>(), 0..64),
    ) {
        let index = build_index(&sizes);
        let total = index.total_size();
        prop_assert_eq!(total, sizes.iter().sum::<usize>());
        for item in 0..total {
            let (interval, local) = index.resolve(item).unwrap();
            prop_assert!(interval.contains(item));
            prop_assert_eq!(Some((interval.value, local)), expected_resolve(&sizes, item));
        }
        if total > 0 {
            // Random access order must give the same answers as a cold index.
            for probe in probes {
                let item = probe % total;
                let warm = index.resolve(item).unwrap().0.value;
                let cold = build_index(&sizes).resolve(item).unwrap().0.value;
                prop_assert_eq!(warm, cold);
            }
        }
    }

    #[test]
    fn range_iteration_visits_exactly_the_intersecting_intervals(
        sizes in proptest::collection::vec(1usize..5, 1..30),
        a in any::<usize>(),
        b in any::<usize>(),
    ) {
        let index = build_index(&sizes);
        let total = index.total_size();
        let (from, to) = {
            let (x, y) = (a % total, b % total);
            (x.min(y), x.max(y))
        };

        let mut seen = Vec::new();
        index.for_each_in_range(from, to, |interval| seen.push(interval.value)).unwrap();

        let expected: Vec<usize> = index
            .iter()
            .filter(|interval| interval.start_index <= to && interval.end() > from)
            .map(|interval| interval.value)
            .collect();
        prop_assert_eq!(seen, expected);
    }
}

// --- Window estimation ---------------------------------------------------------------------

#[test]
fn estimate_window_snaps_to_bucket() {
    assert_eq!(estimate_window(37, 20, 5), WindowRange { start: 15, end: 45 });
    assert_eq!(estimate_window(0, 20, 5), WindowRange { start: 0, end: 25 });
    assert_eq!(estimate_window(3, 0, 2), WindowRange { start: 1, end: 6 });
}

#[test]
fn nearest_range_defaults_match_list_sizing() {
    let state = NearestRangeState::default();
    assert_eq!(state.range(), WindowRange { start: 0, end: 130 });

    let mut state = NearestRangeState::new(0, NearestRangeOptions::default());
    assert!(!state.update(5));
    assert_eq!(state.range(), WindowRange { start: 0, end: 130 });

    assert!(state.update(35));
    assert_eq!(state.range(), WindowRange { start: 0, end: 160 });

    assert!(state.update(1000));
    assert_eq!(state.range(), WindowRange { start: 890, end: 1120 });
    assert!(!state.update(1019));
}

#[test]
fn nearest_range_reports_option_changes() {
    let mut state = NearestRangeState::new(45, NearestRangeOptions::new(20, 5));
    assert_eq!(state.range(), WindowRange { start: 35, end: 65 });
    assert!(!state.set_options(NearestRangeOptions::new(20, 5)));
    assert!(state.set_options(NearestRangeOptions::new(10, 0)));
    assert_eq!(state.range(), WindowRange { start: 40, end: 50 });
}

proptest! {
    #[test]
    fn window_is_stable_within_a_bucket(
        window in 1usize..64,
        extra in 0usize..200,
        bucket in 0usize..1000,
    ) {
        let first = estimate_window(bucket * window, window, extra);
        prop_assert!(first.end - first.start >= window);
        for anchor in bucket * window..(bucket + 1) * window {
            prop_assert_eq!(estimate_window(anchor, window, extra), first);
        }
    }
}

// --- KeyIndexMap ---------------------------------------------------------------------------

fn keyed_intervals() -> IntervalIndex<Option<&'static str>> {
    let mut index = IntervalIndex::new();
    index.append(10, Some("header"));
    index.append(40, None);
    index.append(50, Some("row"));
    index
}

fn key_for(interval: &Interval<Option<&'static str>>, index: usize) -> String {
    match interval.value {
        Some(prefix) => alloc::format!("{prefix}-{}", index - interval.start_index),
        None => alloc::format!("#{index}"),
    }
}

#[test]
fn key_index_map_covers_only_the_window() {
    let intervals = keyed_intervals();
    let window = estimate_window(37, 20, 5);
    let map = KeyIndexMap::build(&intervals, window, key_for).unwrap();

    assert_eq!(map.len(), 30);
    assert_eq!(map.index_of(&String::from("#15")), Some(15));
    assert_eq!(map.index_of(&String::from("#44")), Some(44));
    assert_eq!(map.index_of(&String::from("#45")), None);
    assert_eq!(map.index_of(&String::from("header-3")), None);
    assert_eq!(map.index_or(&String::from("header-3"), 3), 3);
    assert_eq!(map.key_at(20).map(String::as_str), Some("#20"));
    assert_eq!(map.key_at(14), None);
}

#[test]
fn key_index_map_clamps_window_to_item_count() {
    let intervals = keyed_intervals();
    let map = KeyIndexMap::build(&intervals, estimate_window(95, 30, 10), key_for).unwrap();
    assert_eq!(map.len(), 100 - 80);
    assert_eq!(map.index_of(&String::from("row-49")), Some(99));
    assert_eq!(map.index_of(&String::from("row-0")), None);
    assert_eq!(map.key_at(80).map(String::as_str), Some("row-30"));

    let past_end = KeyIndexMap::build(&intervals, WindowRange { start: 200, end: 300 }, key_for)
        .unwrap();
    assert!(past_end.is_empty());
    assert!(KeyIndexMap::<String>::empty().is_empty());
}

// --- MaterializedContentCache --------------------------------------------------------------

#[test]
fn content_is_materialized_at_most_once_per_environment() {
    let mut cache = MaterializedContentCache::<(u32, u32), u64, usize>::new();
    assert!(cache.invalidate_if_environment_changed((100, 1)));

    let calls = Cell::new(0usize);
    for _ in 0..3 {
        for index in 0..5usize {
            let content = *cache.get_or_materialize(index, index as u64, |i, _| {
                calls.set(calls.get() + 1);
                i * 10
            });
            assert_eq!(content, index * 10);
        }
    }
    assert_eq!(calls.get(), 5);
    assert_eq!(cache.materialization_count(), 5);
    assert_eq!(cache.len(), 5);

    assert!(!cache.invalidate_if_environment_changed((100, 1)));
    cache.get_or_materialize(2, 2, |_, _| unreachable!("cached"));
}

#[test]
fn environment_change_clears_and_releases_content() {
    let released = Rc::new(Cell::new(0usize));
    let mut cache = MaterializedContentCache::<u32, u64, Tracked>::new();
    cache.invalidate_if_environment_changed(1);
    for index in 0..4usize {
        cache.get_or_materialize(index, index as u64, |_, _| Tracked::new(&released));
    }
    assert_eq!(released.get(), 0);

    assert!(cache.invalidate_if_environment_changed(2));
    assert_eq!(released.get(), 4);
    assert!(cache.is_empty());
    assert_eq!(cache.environment(), Some(&2));

    let calls = Cell::new(0usize);
    cache.get_or_materialize(0, 0, |_, _| {
        calls.set(calls.get() + 1);
        Tracked::new(&released)
    });
    assert_eq!(calls.get(), 1);
}

#[test]
fn reordered_key_is_rematerialized() {
    let mut cache = MaterializedContentCache::<(), &'static str, (usize, &'static str)>::new();
    cache.invalidate_if_environment_changed(());

    assert_eq!(*cache.get_or_materialize(3, "x", |i, k| (i, *k)), (3, "x"));
    assert!(cache.contains(3, &"x"));
    assert!(!cache.contains(4, &"x"));

    // "x" moved from index 3 to 4 within the same environment.
    assert_eq!(*cache.get_or_materialize(4, "x", |i, k| (i, *k)), (4, "x"));
    assert_eq!(cache.materialization_count(), 2);
    assert_eq!(cache.get(4, &"x"), Some(&(4, "x")));
    assert_eq!(cache.get(3, &"x"), None);
}

#[test]
fn adopted_content_is_served_without_materializing() {
    let mut cache = MaterializedContentCache::<(), u64, &'static str>::new();
    cache.invalidate_if_environment_changed(());
    cache.adopt(7, 7, "prefetched");
    assert_eq!(
        *cache.get_or_materialize(7, 7, |_, _| unreachable!("adopted")),
        "prefetched"
    );
    assert_eq!(cache.materialization_count(), 0);
}

#[test]
fn begin_pass_releases_content_the_last_pass_did_not_use() {
    let released = Rc::new(Cell::new(0usize));
    let mut cache = MaterializedContentCache::<(), usize, Tracked>::new();
    cache.invalidate_if_environment_changed(());

    for pass in 0..1000usize {
        cache.invalidate_if_environment_changed(());
        cache.begin_pass();
        for index in pass..pass + 10 {
            cache.get_or_materialize(index, index, |_, _| Tracked::new(&released));
        }
        // The previous pass's items plus the one that just scrolled into view.
        assert!(cache.len() <= 11, "pass {pass}: {} entries", cache.len());
    }
    assert_eq!(released.get(), 998);
    assert_eq!(cache.materialization_count(), 1009);

    assert_eq!(cache.begin_pass(), 1);
    cache.get_or_materialize(1000, 1000, |_, _| unreachable!("still cached"));
    assert_eq!(cache.begin_pass(), 9);
    assert_eq!(released.get(), 1008);
    assert_eq!(cache.len(), 1);
}

#[test]
fn adopted_content_survives_one_pass_boundary() {
    let mut cache = MaterializedContentCache::<(), u64, &'static str>::new();
    cache.invalidate_if_environment_changed(());
    cache.adopt(12, 12, "prefetched");

    assert_eq!(cache.begin_pass(), 0);
    assert!(cache.contains(12, &12));
    assert_eq!(cache.begin_pass(), 1);
    assert!(cache.is_empty());
}

// --- Prefetch ------------------------------------------------------------------------------

#[test]
fn duplicate_schedule_returns_the_outstanding_request() {
    let mut scheduler = PrefetchScheduler::<u32>::new();
    let a = scheduler.schedule(4);
    let b = scheduler.schedule(4);
    assert_eq!(a.index(), 4);
    assert_eq!(scheduler.pending_len(), 1);

    b.cancel();
    assert!(a.is_cancelled());
    assert!(!scheduler.is_scheduled(4));

    let c = scheduler.schedule(4);
    assert_eq!(c.state(), PrefetchState::Pending);
    assert!(a.is_cancelled());
}

#[test]
fn executor_completes_and_layout_takes_prefetched_item() {
    let mut scheduler = PrefetchScheduler::<&'static str>::new();
    let handle = scheduler.schedule(10);
    scheduler.schedule(11);

    let request = scheduler.next_request().unwrap();
    assert_eq!(request.index(), 10);
    assert_eq!(handle.state(), PrefetchState::Running);
    assert!(request.complete("item-10"));
    assert_eq!(handle.state(), PrefetchState::Materialized);

    assert_eq!(scheduler.take(11), None);
    assert_eq!(scheduler.take(10), Some("item-10"));
    assert_eq!(handle.state(), PrefetchState::Consumed);
    assert_eq!(scheduler.state(10), None);

    // Cancelling consumed content is a no-op.
    handle.cancel();
    assert_eq!(handle.state(), PrefetchState::Consumed);
}

#[test]
fn cancel_before_start_drops_the_request() {
    let mut scheduler = PrefetchScheduler::<u32>::new();
    let first = scheduler.schedule(1);
    scheduler.schedule(2);
    first.cancel();
    first.cancel();

    let request = scheduler.next_request().unwrap();
    assert_eq!(request.index(), 2);
    drop(request);
    assert_eq!(scheduler.state(2), Some(PrefetchState::Cancelled));
    assert!(scheduler.next_request().is_none());

    scheduler.purge();
    assert_eq!(scheduler.state(1), None);
    assert_eq!(scheduler.state(2), None);
}

#[test]
fn cancel_releases_materialized_resources() {
    let released = Rc::new(Cell::new(0usize));
    let mut scheduler = PrefetchScheduler::<Tracked>::new();

    let done = scheduler.schedule(1);
    let in_flight = scheduler.schedule(2);

    let request = scheduler.next_request().unwrap();
    assert!(request.complete(Tracked::new(&released)));
    assert_eq!(released.get(), 0);
    done.cancel();
    assert_eq!(released.get(), 1);
    done.cancel();
    assert_eq!(released.get(), 1);

    let request = scheduler.next_request().unwrap();
    in_flight.cancel();
    assert!(request.is_cancelled());
    assert!(!request.complete(Tracked::new(&released)));
    assert_eq!(released.get(), 2);
    assert!(scheduler.take(2).is_none());
}

#[test]
fn scroll_prefetcher_follows_direction_of_travel() {
    let mut scheduler = PrefetchScheduler::<()>::new();
    let mut prefetcher = ScrollPrefetcher::new(PrefetchStrategy::new(2));

    prefetcher.on_scroll(
        &mut scheduler,
        ScrollDirection::Forward,
        MaterializedRange::new(5, 10),
        100,
    );
    let indexes: Vec<usize> = prefetcher.handles().iter().map(|h| h.index()).collect();
    assert_eq!(indexes, vec![11, 12]);

    // Next item scrolled into view: 11 stays (layout adopts it), 13 is added.
    prefetcher.on_scroll(
        &mut scheduler,
        ScrollDirection::Forward,
        MaterializedRange::new(6, 11),
        100,
    );
    let indexes: Vec<usize> = prefetcher.handles().iter().map(|h| h.index()).collect();
    assert_eq!(indexes, vec![11, 12, 13]);

    prefetcher.on_scroll(
        &mut scheduler,
        ScrollDirection::Backward,
        MaterializedRange::new(6, 11),
        100,
    );
    assert_eq!(scheduler.state(12), Some(PrefetchState::Cancelled));
    assert_eq!(scheduler.state(13), Some(PrefetchState::Cancelled));
    let indexes: Vec<usize> = prefetcher.handles().iter().map(|h| h.index()).collect();
    assert_eq!(indexes, vec![5, 4]);
}

#[test]
fn scroll_prefetcher_respects_bounds_and_strategy() {
    let mut scheduler = PrefetchScheduler::<()>::new();
    let mut prefetcher = ScrollPrefetcher::new(PrefetchStrategy::default());
    prefetcher.on_scroll(
        &mut scheduler,
        ScrollDirection::Forward,
        MaterializedRange::new(95, 99),
        100,
    );
    assert!(prefetcher.handles().is_empty());

    prefetcher.on_scroll(
        &mut scheduler,
        ScrollDirection::Backward,
        MaterializedRange::new(1, 5),
        100,
    );
    let indexes: Vec<usize> = prefetcher.handles().iter().map(|h| h.index()).collect();
    assert_eq!(indexes, vec![0]);

    prefetcher.set_strategy(PrefetchStrategy::disabled());
    assert!(prefetcher.handles().is_empty());
    assert_eq!(scheduler.state(0), Some(PrefetchState::Cancelled));
    prefetcher.on_scroll(
        &mut scheduler,
        ScrollDirection::Backward,
        MaterializedRange::new(1, 5),
        100,
    );
    assert!(prefetcher.handles().is_empty());
}

#[test]
fn scroll_prefetcher_forgets_finished_requests() {
    let mut scheduler = PrefetchScheduler::<usize>::new();
    let mut prefetcher = ScrollPrefetcher::new(PrefetchStrategy::default());

    for first in 0..990usize {
        prefetcher.on_scroll(
            &mut scheduler,
            ScrollDirection::Forward,
            MaterializedRange::new(first, first + 9),
            1000,
        );
        if first % 2 == 0 {
            while let Some(request) = scheduler.next_request() {
                let index = request.index();
                request.complete(index);
            }
            let expected = (first > 0).then_some(first + 9);
            assert_eq!(scheduler.take(first + 9), expected);
        }
        assert!(scheduler.len() <= 16, "step {first}: {} slots", scheduler.len());
    }
    assert!(!scheduler.is_empty());
}

// --- Beyond bounds -------------------------------------------------------------------------

#[test]
fn direction_table_covers_every_layout_combination() {
    use BeyondBoundsDirection::*;

    for reverse in [false, true] {
        for layout_direction in [LayoutDirection::Ltr, LayoutDirection::Rtl] {
            let vertical = BeyondBoundsExpander::new(
                ListLayout::vertical()
                    .reversed(reverse)
                    .with_layout_direction(layout_direction),
                10,
            );
            let horizontal = BeyondBoundsExpander::new(
                ListLayout::horizontal()
                    .reversed(reverse)
                    .with_layout_direction(layout_direction),
                10,
            );

            for expander in [&vertical, &horizontal] {
                assert_eq!(expander.is_forward(Before), Some(reverse));
                assert_eq!(expander.is_forward(After), Some(!reverse));
            }

            assert_eq!(vertical.is_forward(Above), Some(reverse));
            assert_eq!(vertical.is_forward(Below), Some(!reverse));
            assert_eq!(vertical.is_forward(Left), None);
            assert_eq!(vertical.is_forward(Right), None);

            let ltr = layout_direction == LayoutDirection::Ltr;
            assert_eq!(horizontal.is_forward(Left), Some(ltr == reverse));
            assert_eq!(horizontal.is_forward(Right), Some(ltr != reverse));
            assert_eq!(horizontal.is_forward(Above), None);
            assert_eq!(horizontal.is_forward(Below), None);
        }
    }
}

#[test]
fn orthogonal_direction_has_no_more_content() {
    let expander = BeyondBoundsExpander::new(ListLayout::vertical(), 10);
    let range = MaterializedRange::new(3, 5);
    assert!(!expander.has_more_content(range, BeyondBoundsDirection::Left));
    assert_eq!(
        expander.grow_one_step(range, BeyondBoundsDirection::Right),
        None
    );
    assert!(expander.has_more_content(range, BeyondBoundsDirection::Below));
}

#[test]
fn growth_is_one_item_per_step_until_the_data_ends() {
    let mut remeasures = Vec::new();
    let mut host = |extra: Option<MaterializedRange>| remeasures.push(extra);

    for (direction, expected_end) in [
        (BeyondBoundsDirection::After, MaterializedRange::new(5, 10)),
        (BeyondBoundsDirection::Before, MaterializedRange::new(0, 7)),
    ] {
        let mut expander = BeyondBoundsExpander::new(ListLayout::vertical(), 11);
        expander
            .begin_expansion(Some(MaterializedRange::new(5, 7)))
            .unwrap();

        let mut size = 3;
        while let Some(range) = expander.grow(direction) {
            size += 1;
            assert_eq!(range.size(), size);
            assert!(range.contains(5) && range.contains(7));
        }
        assert_eq!(expander.state(), BeyondBoundsState::Active(expected_end));
        assert!(!expander.has_more_content(expected_end, direction));

        assert_eq!(expander.retract(&mut host), BeyondBoundsState::Empty);
        assert_eq!(expander.retract(&mut host), BeyondBoundsState::Empty);
    }
    assert_eq!(remeasures, vec![None, None]);
}

#[test]
fn layout_stops_when_predicate_is_satisfied() {
    let mut remeasures = Vec::new();
    let mut host = |extra: Option<MaterializedRange>| remeasures.push(extra);
    let mut expander = BeyondBoundsExpander::new(ListLayout::vertical(), 11);

    let mut calls = 0;
    let found = expander
        .layout(
            BeyondBoundsDirection::Below,
            Some(MaterializedRange::new(5, 7)),
            &mut host,
            |scope| {
                calls += 1;
                assert!(scope.has_more_content);
                (calls == 2).then_some(scope.range)
            },
        )
        .unwrap();

    assert_eq!(found, Some(Some(MaterializedRange::new(5, 9))));
    assert_eq!(expander.state(), BeyondBoundsState::Empty);
    assert_eq!(
        remeasures,
        vec![
            Some(MaterializedRange::new(5, 8)),
            Some(MaterializedRange::new(5, 9)),
            None,
        ]
    );
}

#[test]
fn layout_walks_to_the_start_and_reports_exhaustion() {
    let mut host = |_: Option<MaterializedRange>| {};
    let mut expander = BeyondBoundsExpander::new(ListLayout::vertical().reversed(true), 11);

    let mut last = None;
    let found: Option<()> = expander
        .layout(
            BeyondBoundsDirection::Below,
            Some(MaterializedRange::new(5, 7)),
            &mut host,
            |scope| {
                last = Some(*scope);
                None
            },
        )
        .unwrap();

    assert_eq!(found, None);
    let last = last.unwrap();
    assert!(!last.has_more_content);
    assert_eq!(last.range, Some(MaterializedRange::new(0, 7)));
}

#[test]
fn layout_without_items_calls_predicate_with_empty_scope() {
    let mut remeasures = 0;
    let mut host = |_: Option<MaterializedRange>| remeasures += 1;
    let mut expander = BeyondBoundsExpander::new(ListLayout::vertical(), 0);

    let scope = expander
        .layout(BeyondBoundsDirection::After, None, &mut host, |scope| Some(*scope))
        .unwrap();
    assert_eq!(
        scope,
        Some(BeyondBoundsScope {
            has_more_content: false,
            range: None,
        })
    );
    assert_eq!(remeasures, 0);
}

#[test]
fn layout_honours_the_step_cap() {
    let mut steps = 0;
    let mut host = |extra: Option<MaterializedRange>| {
        if extra.is_some() {
            steps += 1;
        }
    };
    let mut expander = BeyondBoundsExpander::new(ListLayout::vertical(), 1000).with_max_steps(3);
    let found: Option<()> = expander
        .layout(
            BeyondBoundsDirection::After,
            Some(MaterializedRange::new(0, 4)),
            &mut host,
            |_| None,
        )
        .unwrap();
    assert_eq!(found, None);
    assert_eq!(steps, 3);
}

#[test]
fn begin_expansion_rejects_ranges_outside_the_data() {
    let mut expander = BeyondBoundsExpander::new(ListLayout::horizontal(), 5);
    assert_eq!(
        expander.begin_expansion(Some(MaterializedRange { start: 2, end: 5 })),
        Err(WindowError::OutOfRange { index: 5, len: 5 })
    );
    assert_eq!(
        expander.begin_expansion(Some(MaterializedRange { start: 3, end: 1 })),
        Err(WindowError::InvalidRange { from: 3, to: 1 })
    );
    assert_eq!(expander.begin_expansion(None), Ok(BeyondBoundsState::Empty));
}
