//! swipedeck core: a swipe-driven paging carousel as a pure state machine.
//!
//! The widget shows one page of data at a time in three visual slots
//! (previous / current / next) and lazily asks its collaborator for
//! neighboring pages only when the user swipes. Frontends feed drag
//! translation samples, release events, and ticks (each carrying `now` in
//! seconds); the core answers with slot offsets, a fetch request once the
//! swipe-out animation has completed, and a [`RenderCommand`] list via
//! [`render_carousel`].
//!
//! [`RenderCommand`]: swipedeck_protocol::RenderCommand

pub mod anim;
pub mod carousel;
pub mod hooks;
pub mod layout;
pub mod pager;
pub mod render;

pub use anim::{Animated, Easing, Tween};
pub use carousel::Carousel;
pub use hooks::{FlagHooks, PageHooks};
pub use layout::{DEFAULT_CONTENT_RATIO, SlotLayout};
pub use pager::{
    ANIMATION_DURATION, FETCH_DELAY_BUFFER, Pager, PagerEffect, PagerEvent, SlotRole, SlotState,
    SwipeDirection, TransitionPhase,
};
pub use render::render_carousel;
