//! The swipe-driven paging state machine.
//!
//! Pure and clock-free: every event carries `now` (seconds) supplied by the
//! frontend, and the only output besides mutated slot state is an optional
//! [`PagerEffect`] asking the host to invoke a fetch hook.
//!
//! Sign convention: dragging left (negative `translation_x`) reveals the
//! *next* page, dragging right reveals *previous*.

use crate::anim::{Animated, Easing};
use crate::layout::SlotLayout;

/// Duration of the commit / slide-in offset animation, in seconds.
pub const ANIMATION_DURATION: f64 = 0.3;

/// Extra delay past the animation before the fetch hook fires, so the hook
/// can never land mid-animation.
pub const FETCH_DELAY_BUFFER: f64 = 0.1;

/// Live drag offset is `translation_x / DRAG_DAMPING` — the rubber-band feel.
const DRAG_DAMPING: f64 = 3.0;

const SPRING_BACK_DURATION: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Dragging,
    Committing,
    AwaitingFetch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    Previous,
    Current,
    Next,
}

/// One of the three visual slots. `offset` is the signed distance of the
/// slot's resting position from the container center.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotState {
    pub role: SlotRole,
    pub offset: Animated,
    pub visible: bool,
}

/// Input to [`Pager::handle`]. `DataChanged` carries the availability flags
/// the host obtained from its hooks — the pager itself never calls out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagerEvent {
    DragMoved { translation_x: f64 },
    DragReleased,
    Tick,
    DataChanged {
        has_data: bool,
        next_available: bool,
        prev_available: bool,
    },
}

/// Side effect requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerEffect {
    Fetch(SwipeDirection),
}

/// The cancellable deferred fetch trigger. Polled from `Tick`; cleared by
/// any accepted data change, so it cannot fire on stale state, and dropping
/// the pager discards it outright.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DeferredFetch {
    due: f64,
    direction: SwipeDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pager {
    layout: SlotLayout,
    phase: TransitionPhase,
    direction: Option<SwipeDirection>,
    data_frozen: bool,
    has_data: bool,
    next_available: bool,
    prev_available: bool,
    live_offset: Animated,
    prev_slot: SlotState,
    current_slot: SlotState,
    next_slot: SlotState,
    deferred: Option<DeferredFetch>,
}

impl Pager {
    pub fn new(layout: SlotLayout) -> Self {
        let park = layout.park_offset();
        Self {
            layout,
            phase: TransitionPhase::Idle,
            direction: None,
            data_frozen: true,
            has_data: false,
            next_available: false,
            prev_available: false,
            live_offset: Animated::still(0.0),
            prev_slot: SlotState {
                role: SlotRole::Previous,
                offset: Animated::still(-park),
                visible: false,
            },
            current_slot: SlotState {
                role: SlotRole::Current,
                offset: Animated::still(0.0),
                visible: true,
            },
            next_slot: SlotState {
                role: SlotRole::Next,
                offset: Animated::still(park),
                visible: false,
            },
            deferred: None,
        }
    }

    /// Feed one event into the state machine.
    pub fn handle(&mut self, event: PagerEvent, now: f64) -> Option<PagerEffect> {
        match event {
            PagerEvent::DragMoved { translation_x } => {
                self.on_drag(translation_x, now);
                None
            }
            PagerEvent::DragReleased => {
                self.on_release(now);
                None
            }
            PagerEvent::Tick => self.on_tick(now),
            PagerEvent::DataChanged {
                has_data,
                next_available,
                prev_available,
            } => {
                self.on_data_changed(has_data, next_available, prev_available, now);
                None
            }
        }
    }

    fn on_drag(&mut self, translation_x: f64, now: f64) {
        match self.phase {
            // The gate: one commit in flight, further samples are no-ops.
            TransitionPhase::Committing | TransitionPhase::AwaitingFetch => return,
            TransitionPhase::Idle | TransitionPhase::Dragging => {}
        }
        self.phase = TransitionPhase::Dragging;

        let damped = translation_x / DRAG_DAMPING;
        let gated = if damped < 0.0 && !self.next_available {
            0.0
        } else if damped > 0.0 && !self.prev_available {
            0.0
        } else {
            damped
        };
        self.live_offset.snap_to(gated);

        let threshold = self.layout.drag_threshold();
        if translation_x <= -threshold && self.next_available {
            self.commit(SwipeDirection::Next, now);
        } else if translation_x >= threshold && self.prev_available {
            self.commit(SwipeDirection::Previous, now);
        }
    }

    fn on_release(&mut self, now: f64) {
        match self.phase {
            TransitionPhase::Dragging => {
                // Threshold never crossed: spring the live offset back.
                self.phase = TransitionPhase::Idle;
                self.live_offset
                    .animate_to(0.0, now, SPRING_BACK_DURATION, Easing::SpringOut);
            }
            TransitionPhase::Idle
            | TransitionPhase::Committing
            | TransitionPhase::AwaitingFetch => {}
        }
    }

    fn commit(&mut self, direction: SwipeDirection, now: f64) {
        self.direction = Some(direction);
        self.phase = TransitionPhase::Committing;

        let shift = match direction {
            SwipeDirection::Next => -self.layout.page_width,
            SwipeDirection::Previous => self.layout.page_width,
        };

        // Fold the live drag into the tween start so the hand-off from
        // finger to animation has no visual jump.
        let live = self.live_offset.get(now);
        self.live_offset.snap_to(0.0);

        for slot in [
            &mut self.prev_slot,
            &mut self.current_slot,
            &mut self.next_slot,
        ] {
            if !slot.visible {
                continue;
            }
            let to = slot.offset.target() + shift;
            let from = slot.offset.get(now) + live;
            slot.offset.snap_to(from);
            slot.offset
                .animate_to(to, now, ANIMATION_DURATION, Easing::EaseOut);
        }

        // With no data there is nothing to hand to the fetch hook; the gate
        // stays locked until the next data change.
        if self.has_data {
            self.deferred = Some(DeferredFetch {
                due: now + ANIMATION_DURATION + FETCH_DELAY_BUFFER,
                direction,
            });
            self.phase = TransitionPhase::AwaitingFetch;
        }
    }

    fn on_tick(&mut self, now: f64) -> Option<PagerEffect> {
        self.live_offset.settle(now);
        self.prev_slot.offset.settle(now);
        self.current_slot.offset.settle(now);
        self.next_slot.offset.settle(now);

        match self.deferred {
            Some(deferred) if now >= deferred.due => {
                self.deferred = None;
                self.data_frozen = false;
                Some(PagerEffect::Fetch(deferred.direction))
            }
            Some(_) | None => None,
        }
    }

    fn on_data_changed(
        &mut self,
        has_data: bool,
        next_available: bool,
        prev_available: bool,
        now: f64,
    ) {
        // Cancel any pending fetch trigger before it can fire on stale state.
        self.deferred = None;
        self.data_frozen = true;
        self.has_data = has_data;
        self.phase = TransitionPhase::Idle;
        self.live_offset.snap_to(0.0);
        self.current_slot.offset.snap_to(0.0);

        // The slot that just slid to center becomes the new off-screen
        // standby for future swipes in its direction.
        if let Some(direction) = self.direction.take() {
            let park = self.layout.park_offset();
            let slot = match direction {
                SwipeDirection::Next => &mut self.next_slot,
                SwipeDirection::Previous => &mut self.prev_slot,
            };
            let parked = match direction {
                SwipeDirection::Next => park,
                SwipeDirection::Previous => -park,
            };
            slot.offset.snap_to(parked);
            slot.visible = false;
        }

        self.next_available = next_available;
        self.prev_available = prev_available;
        self.apply_availability(now);
    }

    /// The availability resolver: position each neighbor slot according to
    /// whether a page exists in its direction.
    fn apply_availability(&mut self, now: f64) {
        let park = self.layout.park_offset();
        let standby = self.layout.standby_offset();
        resolve_slot(&mut self.next_slot, self.next_available, park, standby, now);
        resolve_slot(
            &mut self.prev_slot,
            self.prev_available,
            -park,
            -standby,
            now,
        );
    }

    // ── accessors ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn direction(&self) -> Option<SwipeDirection> {
        self.direction
    }

    /// The mutual-exclusion gate: true from commit until the next accepted
    /// data change.
    pub fn is_in_swiping(&self) -> bool {
        matches!(
            self.phase,
            TransitionPhase::Committing | TransitionPhase::AwaitingFetch
        )
    }

    /// While frozen, hosts display a retained copy of the page payload so
    /// the outgoing slot's content cannot change mid-animation.
    pub fn is_data_frozen(&self) -> bool {
        self.data_frozen
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    /// Replace the layout after a container resize. Offsets snap to their
    /// new resting positions; no animation across a resize.
    pub fn set_layout(&mut self, layout: SlotLayout) {
        self.layout = layout;
        let park = layout.park_offset();
        let standby = layout.standby_offset();
        self.live_offset.snap_to(0.0);
        self.current_slot.offset.snap_to(0.0);
        self.next_slot
            .offset
            .snap_to(if self.next_slot.visible { standby } else { park });
        self.prev_slot
            .offset
            .snap_to(if self.prev_slot.visible { -standby } else { -park });
    }

    pub fn slots(&self) -> [&SlotState; 3] {
        [&self.prev_slot, &self.current_slot, &self.next_slot]
    }

    pub fn slot(&self, role: SlotRole) -> &SlotState {
        match role {
            SlotRole::Previous => &self.prev_slot,
            SlotRole::Current => &self.current_slot,
            SlotRole::Next => &self.next_slot,
        }
    }

    /// Damped drag offset shared by all three slots.
    pub fn live_offset(&self, now: f64) -> f64 {
        self.live_offset.get(now)
    }

    /// Whether anything is still moving (frontends keep repainting while
    /// this is true or a fetch trigger is pending).
    pub fn is_animating(&self, now: f64) -> bool {
        self.live_offset.is_animating(now)
            || self.prev_slot.offset.is_animating(now)
            || self.current_slot.offset.is_animating(now)
            || self.next_slot.offset.is_animating(now)
            || self.deferred.is_some()
    }
}

fn resolve_slot(slot: &mut SlotState, available: bool, park: f64, standby: f64, now: f64) {
    if available {
        if !slot.visible {
            slot.visible = true;
            slot.offset.snap_to(park);
        }
        if (slot.offset.target() - standby).abs() > f64::EPSILON {
            slot.offset
                .animate_to(standby, now, ANIMATION_DURATION, Easing::EaseOut);
        }
    } else {
        slot.visible = false;
        slot.offset.snap_to(park);
    }
}
