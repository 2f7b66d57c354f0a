//! Integration test: walk an integer page model from 5 to the upper bound
//! at 10 with repeated swipe-next gestures, and verify that fetches fire
//! once per swipe after the animation window, that availability flips at
//! the bounds, and that commits past the bound are rejected.

use swipedeck_core::{
    ANIMATION_DURATION, Carousel, FETCH_DELAY_BUFFER, PageHooks, SlotRole, TransitionPhase,
};

/// Pages are integers in `[0, 10]`; a fetch records the value it was
/// handed and stages the neighbor for the host to apply.
struct BoundedPages {
    page: i32,
    staged: Option<i32>,
    fetch_log: Vec<i32>,
}

impl BoundedPages {
    fn at(page: i32) -> Self {
        Self {
            page,
            staged: None,
            fetch_log: Vec::new(),
        }
    }
}

impl PageHooks<i32> for BoundedPages {
    fn is_next_available(&self) -> bool {
        self.page < 10
    }

    fn is_prev_available(&self) -> bool {
        self.page > 0
    }

    fn fetch_next(&mut self, current: &i32) {
        self.fetch_log.push(*current);
        self.staged = Some(current + 1);
    }

    fn fetch_prev(&mut self, current: &i32) {
        self.fetch_log.push(*current);
        self.staged = Some(current - 1);
    }
}

/// One full swipe-next: drag past the threshold, release, tick through the
/// animation window, then apply whatever the hooks staged.
fn swipe_next(carousel: &mut Carousel<i32>, hooks: &mut BoundedPages, start: f64) -> f64 {
    let threshold = carousel.pager().layout().drag_threshold();
    carousel.drag(-(threshold + 5.0), start);
    carousel.release(start + 0.02);

    let due = start + ANIMATION_DURATION + FETCH_DELAY_BUFFER;
    carousel.tick(hooks, due - 0.01);
    carousel.tick(hooks, due + 0.01);

    if let Some(page) = hooks.staged.take() {
        hooks.page = page;
        carousel.set_data(Some(page), hooks, due + 0.02);
    }
    due + 0.1
}

#[test]
fn swipe_next_walks_to_the_upper_bound_and_stops() {
    let mut hooks = BoundedPages::at(5);
    let mut carousel = Carousel::new(1000.0, 0.7, Some(5), &hooks, 0.0);
    assert!(carousel.pager().slot(SlotRole::Next).visible);
    assert!(carousel.pager().slot(SlotRole::Previous).visible);

    let mut now = 1.0;
    now = swipe_next(&mut carousel, &mut hooks, now);
    assert_eq!(hooks.fetch_log, vec![5]);
    assert_eq!(carousel.data(), Some(&6));
    assert_eq!(carousel.phase(), TransitionPhase::Idle);

    for _ in 0..4 {
        now = swipe_next(&mut carousel, &mut hooks, now);
    }
    assert_eq!(hooks.page, 10);
    assert_eq!(hooks.fetch_log, vec![5, 6, 7, 8, 9]);

    // At the bound the next slot is gone; previous is still there.
    assert!(!carousel.pager().slot(SlotRole::Next).visible);
    assert!(carousel.pager().slot(SlotRole::Previous).visible);

    // Further next-direction commits are rejected regardless of drag distance.
    let threshold = carousel.pager().layout().drag_threshold();
    carousel.drag(-(threshold * 20.0), now);
    assert_eq!(carousel.phase(), TransitionPhase::Dragging);
    assert_eq!(carousel.pager().live_offset(now), 0.0);
    carousel.release(now + 0.02);
    carousel.tick(&mut hooks, now + 5.0);
    assert_eq!(hooks.fetch_log, vec![5, 6, 7, 8, 9]);
    assert_eq!(hooks.page, 10);
}

#[test]
fn swipe_back_from_the_upper_bound() {
    let mut hooks = BoundedPages::at(10);
    let mut carousel = Carousel::new(1000.0, 0.7, Some(10), &hooks, 0.0);

    let threshold = carousel.pager().layout().drag_threshold();
    carousel.drag(threshold + 5.0, 1.0);
    carousel.release(1.02);
    let due = 1.0 + ANIMATION_DURATION + FETCH_DELAY_BUFFER;
    carousel.tick(&mut hooks, due + 0.01);
    assert_eq!(hooks.fetch_log, vec![10]);

    let page = hooks.staged.take().unwrap();
    assert_eq!(page, 9);
    hooks.page = page;
    carousel.set_data(Some(page), &hooks, due + 0.02);

    // Both neighbors exist again at 9.
    assert!(carousel.pager().slot(SlotRole::Next).visible);
    assert!(carousel.pager().slot(SlotRole::Previous).visible);
}
