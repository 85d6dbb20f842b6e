// Example: prefetching ahead of a scroll, then expanding past the visible range until an
// item matching a focus search is laid out.
use lazy_window::{
    BeyondBoundsDirection, BeyondBoundsExpander, ListLayout, MaterializedRange, PrefetchScheduler,
    PrefetchStrategy, ScrollDirection, ScrollPrefetcher,
};

fn main() -> Result<(), lazy_window::WindowError> {
    let item_count = 200;

    let mut scheduler = PrefetchScheduler::new();
    let mut prefetcher = ScrollPrefetcher::new(PrefetchStrategy::new(3));
    for first in [0usize, 4, 8] {
        let visible = MaterializedRange::new(first, first + 9);
        prefetcher.on_scroll(&mut scheduler, ScrollDirection::Forward, visible, item_count);
        while let Some(request) = scheduler.next_request() {
            let index = request.index();
            request.complete(format!("row {index}"));
        }
        let ready: Vec<usize> = prefetcher.handles().iter().map(|h| h.index()).collect();
        println!("visible={visible:?} prefetched={ready:?}");
    }
    println!("take(18)={:?}", scheduler.take(18));

    let mut expander = BeyondBoundsExpander::new(ListLayout::vertical(), item_count);
    let mut remeasures = 0usize;
    let mut host = |extra: Option<MaterializedRange>| {
        remeasures += 1;
        println!("remeasure extra={extra:?}");
    };
    let focus = expander.layout(
        BeyondBoundsDirection::Below,
        Some(MaterializedRange::new(8, 17)),
        &mut host,
        |scope| {
            let range = scope.range?;
            (range.end % 7 == 0).then_some(range.end)
        },
    )?;
    println!("focus_target={focus:?} remeasures={remeasures}");
    Ok(())
}
