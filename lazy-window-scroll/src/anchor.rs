use core::cmp::Ordering;

use crate::ScrollHost;

/// The scroll position expressed as (first visible item, offset into it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    pub index: usize,
    pub offset: i32,
}

impl ScrollAnchor {
    pub fn new(index: usize, offset: i32) -> Self {
        Self { index, offset }
    }

    /// Captures the host's current first visible item.
    pub fn capture(host: &impl ScrollHost) -> Self {
        Self {
            index: host.first_visible_item_index(),
            offset: host.first_visible_item_scroll_offset(),
        }
    }

    /// Whether this anchor has moved past `target` when travelling `forward` (or backward).
    pub fn is_past(&self, target: ScrollAnchor, forward: bool) -> bool {
        let ordering = self.cmp(&target);
        if forward {
            ordering == Ordering::Greater
        } else {
            ordering == Ordering::Less
        }
    }
}

impl PartialOrd for ScrollAnchor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScrollAnchor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index
            .cmp(&other.index)
            .then(self.offset.cmp(&other.offset))
    }
}
