// Example: driving a scroll-to-item animation from a frame loop against a simple list.
use lazy_window_scroll::{ScrollController, ScrollHost, ScrollStatus, estimated_distance};

struct List {
    count: usize,
    item_size: f64,
    viewport: f64,
    position: f64,
}

impl List {
    fn max_position(&self) -> f64 {
        (self.count as f64 * self.item_size - self.viewport).max(0.0)
    }
}

impl ScrollHost for List {
    fn item_count(&self) -> usize {
        self.count
    }

    fn first_visible_item_index(&self) -> usize {
        ((self.position / self.item_size) as usize).min(self.count.saturating_sub(1))
    }

    fn first_visible_item_scroll_offset(&self) -> i32 {
        (self.position - self.first_visible_item_index() as f64 * self.item_size).round() as i32
    }

    fn last_visible_item_index(&self) -> usize {
        let end = ((self.position + self.viewport) / self.item_size).ceil() as usize;
        end.saturating_sub(1).min(self.count.saturating_sub(1))
    }

    fn target_item_offset(&self, index: usize) -> Option<i32> {
        (index >= self.first_visible_item_index() && index <= self.last_visible_item_index())
            .then(|| (index as f64 * self.item_size - self.position).round() as i32)
    }

    fn expected_distance_to(&self, index: usize, offset: i32) -> f32 {
        estimated_distance(
            self.item_size as f32,
            self.first_visible_item_index(),
            self.first_visible_item_scroll_offset(),
            index,
            offset,
        )
    }

    fn scroll_by(&mut self, delta: f32) -> f32 {
        let next = (self.position + delta as f64).clamp(0.0, self.max_position());
        let consumed = next - self.position;
        self.position = next;
        consumed as f32
    }

    fn snap_to_item(&mut self, index: usize, offset: i32) {
        let target = index as f64 * self.item_size + offset as f64;
        self.position = target.clamp(0.0, self.max_position());
    }
}

fn main() -> Result<(), lazy_window::WindowError> {
    let mut list = List {
        count: 10_000,
        item_size: 48.0,
        viewport: 800.0,
        position: 0.0,
    };
    let mut controller = ScrollController::default();
    controller.animate_scroll_to_item(7_500, 0)?;

    let mut frame_time = 0u64;
    while let Some(status) = controller.tick(&mut list, frame_time) {
        if frame_time % 160_000_000 == 0 {
            println!(
                "t={}ms first_visible={}",
                frame_time / 1_000_000,
                list.first_visible_item_index()
            );
        }
        if let ScrollStatus::Finished(outcome) = status {
            println!("finished: {outcome:?}");
        }
        frame_time += 16_000_000;
    }

    println!(
        "done: first_visible={} offset={}",
        list.first_visible_item_index(),
        list.first_visible_item_scroll_offset()
    );
    Ok(())
}
