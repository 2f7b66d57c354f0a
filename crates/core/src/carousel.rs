//! Host wrapper tying the pure state machine to a concrete payload and its
//! hooks.
//!
//! The carousel owns a copy of the bound page value; the caller remains the
//! source of truth and pushes updates through [`Carousel::set_data`], which
//! is gated on `PartialEq` so repeated renders with unchanged data are
//! no-ops.

use crate::hooks::PageHooks;
use crate::layout::SlotLayout;
use crate::pager::{Pager, PagerEffect, PagerEvent, SwipeDirection, TransitionPhase};

#[derive(Debug, Clone)]
pub struct Carousel<T: Clone + PartialEq> {
    pager: Pager,
    data: Option<T>,
    /// Retained copy shown while the pager has the display frozen, so the
    /// outgoing slot's content cannot change before it has animated away.
    frozen: Option<T>,
}

impl<T: Clone + PartialEq> Carousel<T> {
    /// Mount the carousel. Queries both availability predicates once.
    pub fn new(
        container_width: f64,
        content_ratio: f64,
        data: Option<T>,
        hooks: &impl PageHooks<T>,
        now: f64,
    ) -> Self {
        let pager = Pager::new(SlotLayout::new(container_width, content_ratio));
        let mut carousel = Self {
            pager,
            data,
            frozen: None,
        };
        carousel.notify_data_changed(hooks, now);
        carousel
    }

    /// Push a new bound value. Ignored when equal to the current one; an
    /// identity change runs the full data-change reaction (reset, re-park,
    /// availability re-query).
    pub fn set_data(&mut self, data: Option<T>, hooks: &impl PageHooks<T>, now: f64) {
        if self.data == data {
            return;
        }
        self.data = data;
        self.notify_data_changed(hooks, now);
    }

    fn notify_data_changed(&mut self, hooks: &impl PageHooks<T>, now: f64) {
        self.frozen = self.data.clone();
        let event = PagerEvent::DataChanged {
            has_data: self.data.is_some(),
            next_available: hooks.is_next_available(),
            prev_available: hooks.is_prev_available(),
        };
        self.pager.handle(event, now);
    }

    /// Feed one horizontal drag translation sample (logical pixels from the
    /// drag origin, negative = leftward).
    pub fn drag(&mut self, translation_x: f64, now: f64) {
        self.pager
            .handle(PagerEvent::DragMoved { translation_x }, now);
    }

    /// The pointer was released.
    pub fn release(&mut self, now: f64) {
        self.pager.handle(PagerEvent::DragReleased, now);
    }

    /// Advance animations and fire the deferred fetch hook when due. Call
    /// once per frame.
    pub fn tick(&mut self, hooks: &mut impl PageHooks<T>, now: f64) {
        if let Some(PagerEffect::Fetch(direction)) = self.pager.handle(PagerEvent::Tick, now) {
            if let Some(current) = &self.data {
                match direction {
                    SwipeDirection::Next => hooks.fetch_next(current),
                    SwipeDirection::Previous => hooks.fetch_prev(current),
                }
            }
        }
    }

    /// The container was resized.
    pub fn resize(&mut self, container_width: f64, content_ratio: f64) {
        let layout = SlotLayout::new(container_width, content_ratio);
        if *self.pager.layout() != layout {
            self.pager.set_layout(layout);
        }
    }

    /// The payload to display right now: the frozen copy during a
    /// transition, the live value otherwise.
    pub fn displayed(&self) -> Option<&T> {
        if self.pager.is_data_frozen() {
            self.frozen.as_ref()
        } else {
            self.data.as_ref()
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.pager.phase()
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::FlagHooks;
    use crate::pager::{ANIMATION_DURATION, FETCH_DELAY_BUFFER};
    use std::cell::Cell;

    /// Hooks over an integer page in `[0, 10]`, counting every call.
    struct CountingHooks {
        page: i32,
        next_queries: Cell<u32>,
        prev_queries: Cell<u32>,
        fetched_next: Vec<i32>,
        fetched_prev: Vec<i32>,
    }

    impl CountingHooks {
        fn at(page: i32) -> Self {
            Self {
                page,
                next_queries: Cell::new(0),
                prev_queries: Cell::new(0),
                fetched_next: Vec::new(),
                fetched_prev: Vec::new(),
            }
        }
    }

    impl PageHooks<i32> for CountingHooks {
        fn is_next_available(&self) -> bool {
            self.next_queries.set(self.next_queries.get() + 1);
            self.page < 10
        }

        fn is_prev_available(&self) -> bool {
            self.prev_queries.set(self.prev_queries.get() + 1);
            self.page > 0
        }

        fn fetch_next(&mut self, current: &i32) {
            self.fetched_next.push(*current);
        }

        fn fetch_prev(&mut self, current: &i32) {
            self.fetched_prev.push(*current);
        }
    }

    fn commit_drag(carousel: &mut Carousel<i32>, now: f64) {
        let threshold = carousel.pager().layout().drag_threshold();
        carousel.drag(-(threshold + 1.0), now);
        carousel.release(now + 0.01);
    }

    #[test]
    fn mount_queries_availability_exactly_once() {
        let hooks = CountingHooks::at(5);
        let carousel = Carousel::new(1000.0, 0.7, Some(5), &hooks, 0.0);
        assert_eq!(hooks.next_queries.get(), 1);
        assert_eq!(hooks.prev_queries.get(), 1);
        assert_eq!(carousel.displayed(), Some(&5));
    }

    #[test]
    fn availability_maps_to_slot_visibility_at_the_bounds() {
        use crate::pager::SlotRole;

        let at_zero = Carousel::new(1000.0, 0.7, Some(0), &CountingHooks::at(0), 0.0);
        assert!(!at_zero.pager().slot(SlotRole::Previous).visible);
        assert!(at_zero.pager().slot(SlotRole::Next).visible);

        let at_ten = Carousel::new(1000.0, 0.7, Some(10), &CountingHooks::at(10), 0.0);
        assert!(at_ten.pager().slot(SlotRole::Previous).visible);
        assert!(!at_ten.pager().slot(SlotRole::Next).visible);

        let mid = Carousel::new(1000.0, 0.7, Some(5), &CountingHooks::at(5), 0.0);
        assert!(mid.pager().slot(SlotRole::Previous).visible);
        assert!(mid.pager().slot(SlotRole::Next).visible);
    }

    #[test]
    fn equal_data_is_a_no_op() {
        let hooks = CountingHooks::at(5);
        let mut carousel = Carousel::new(1000.0, 0.7, Some(5), &hooks, 0.0);
        carousel.set_data(Some(5), &hooks, 1.0);
        carousel.set_data(Some(5), &hooks, 2.0);
        // Still just the mount-time query.
        assert_eq!(hooks.next_queries.get(), 1);
        assert_eq!(hooks.prev_queries.get(), 1);
    }

    #[test]
    fn fetch_receives_the_committed_page_value() {
        let mut hooks = CountingHooks::at(5);
        let mut carousel = Carousel::new(1000.0, 0.7, Some(5), &hooks, 0.0);
        commit_drag(&mut carousel, 0.1);
        let due = 0.1 + ANIMATION_DURATION + FETCH_DELAY_BUFFER;
        carousel.tick(&mut hooks, due - 0.05);
        assert!(hooks.fetched_next.is_empty());
        carousel.tick(&mut hooks, due);
        assert_eq!(hooks.fetched_next, vec![5]);
        carousel.tick(&mut hooks, due + 1.0);
        assert_eq!(hooks.fetched_next, vec![5]);
    }

    #[test]
    fn data_change_after_fetch_unlocks_the_gate() {
        let mut hooks = CountingHooks::at(5);
        let mut carousel = Carousel::new(1000.0, 0.7, Some(5), &hooks, 0.0);
        commit_drag(&mut carousel, 0.1);
        assert!(carousel.pager().is_in_swiping());

        let due = 0.1 + ANIMATION_DURATION + FETCH_DELAY_BUFFER;
        carousel.tick(&mut hooks, due);
        hooks.page = 6;
        carousel.set_data(Some(6), &hooks, due + 0.01);
        assert!(!carousel.pager().is_in_swiping());
        assert_eq!(carousel.phase(), TransitionPhase::Idle);
        assert_eq!(carousel.displayed(), Some(&6));
    }

    #[test]
    fn displayed_stays_frozen_until_the_fetch_fires() {
        let mut hooks = CountingHooks::at(5);
        let mut carousel = Carousel::new(1000.0, 0.7, Some(5), &hooks, 0.0);
        commit_drag(&mut carousel, 0.1);
        assert!(carousel.pager().is_data_frozen());
        assert_eq!(carousel.displayed(), Some(&5));

        let due = 0.1 + ANIMATION_DURATION + FETCH_DELAY_BUFFER;
        carousel.tick(&mut hooks, due);
        assert!(!carousel.pager().is_data_frozen());
    }

    #[test]
    fn resize_with_equal_layout_keeps_state() {
        let hooks = CountingHooks::at(5);
        let mut carousel = Carousel::new(1000.0, 0.7, Some(5), &hooks, 0.0);
        let before = carousel.pager().clone();
        carousel.resize(1000.0, 0.7);
        assert_eq!(*carousel.pager(), before);
        carousel.resize(800.0, 0.7);
        assert_eq!(carousel.pager().layout().container_width, 800.0);
    }

    #[test]
    fn flag_hooks_overload_drives_the_same_machine() {
        let fetched = Cell::new(0);
        let mut hooks: FlagHooks<_, _> = FlagHooks::new(
            true,
            false,
            || fetched.set(fetched.get() + 1),
            || {},
        );
        let mut carousel = Carousel::new(1000.0, 0.7, Some(()), &hooks, 0.0);
        let threshold = carousel.pager().layout().drag_threshold();
        carousel.drag(-(threshold + 1.0), 0.1);
        carousel.tick(&mut hooks, 0.1 + ANIMATION_DURATION + FETCH_DELAY_BUFFER);
        assert_eq!(fetched.get(), 1);
    }
}
