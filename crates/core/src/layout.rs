//! Slot geometry derived from the container width and content ratio.

/// Fraction of the container width occupied by a slot when the caller does
/// not supply one.
pub const DEFAULT_CONTENT_RATIO: f64 = 0.7;

const MIN_CONTENT_RATIO: f64 = 0.1;
const MAX_CONTENT_RATIO: f64 = 1.0;

/// Horizontal geometry shared by all three slots.
///
/// Given container width `W` and content ratio `r`:
/// `item_width = W·r`, `item_spacing = W·(1−r)/2`, and one page step is
/// `page_width = item_width + item_spacing/2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    pub container_width: f64,
    /// Effective ratio after clamping into `[0.1, 1.0]`.
    pub content_ratio: f64,
    pub item_width: f64,
    pub item_spacing: f64,
    pub page_width: f64,
}

impl SlotLayout {
    pub fn new(container_width: f64, content_ratio: f64) -> Self {
        let ratio = if content_ratio.is_finite() {
            content_ratio.clamp(MIN_CONTENT_RATIO, MAX_CONTENT_RATIO)
        } else {
            DEFAULT_CONTENT_RATIO
        };
        let item_width = container_width * ratio;
        let item_spacing = container_width * (1.0 - ratio) / 2.0;
        Self {
            container_width,
            content_ratio: ratio,
            item_width,
            item_spacing,
            page_width: item_width + item_spacing / 2.0,
        }
    }

    /// Drag distance that commits a page change.
    pub fn drag_threshold(&self) -> f64 {
        self.item_width / 3.0
    }

    /// Offset where an invisible neighbor slot waits, far outside the
    /// viewport so re-entry animations cannot flash it into view.
    pub fn park_offset(&self) -> f64 {
        self.container_width * 2.0
    }

    /// Offset where an available neighbor slot is poised at the container
    /// edge, ready to slide in on the next swipe.
    pub fn standby_offset(&self) -> f64 {
        self.page_width
    }
}
