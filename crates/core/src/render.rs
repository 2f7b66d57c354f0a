//! Slot renderer: turns carousel state into render commands.
//!
//! The `content` closure is invoked once per visible slot, receiving the
//! displayed payload for the current slot and `None` for placeholder slots,
//! and draws in slot-local coordinates (origin at the slot's top-left).

use swipedeck_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use crate::carousel::Carousel;
use crate::pager::SlotRole;

const SLOT_VERTICAL_INSET: f64 = 8.0;

/// Render the carousel into `viewport`. Output is clipped to the viewport
/// so parked slots never paint.
pub fn render_carousel<T, F>(
    carousel: &Carousel<T>,
    viewport: &Viewport,
    now: f64,
    content: F,
) -> Vec<RenderCommand>
where
    T: Clone + PartialEq,
    F: Fn(Option<&T>) -> Vec<RenderCommand>,
{
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec::new();
    }

    let pager = carousel.pager();
    let layout = pager.layout();
    let item_w = layout.item_width;
    let item_h = (viewport.height - 2.0 * SLOT_VERTICAL_INSET).max(0.0);
    let center_x = viewport.width / 2.0;
    let live = pager.live_offset(now);

    let mut commands = Vec::with_capacity(24);
    commands.push(RenderCommand::BeginGroup {
        id: "carousel".to_string(),
        label: None,
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
        color: ThemeToken::Background,
        border_color: None,
        label: None,
    });
    commands.push(RenderCommand::SetClip {
        rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
    });

    for slot in pager.slots() {
        if !slot.visible {
            continue;
        }
        let x = center_x - item_w / 2.0 + slot.offset.get(now) + live;

        // Skip slots entirely outside the viewport (parked neighbors).
        if x + item_w < 0.0 || x > viewport.width {
            continue;
        }

        commands.push(RenderCommand::PushTransform {
            translate: Point::new(x, SLOT_VERTICAL_INSET),
            scale: Point::new(1.0, 1.0),
        });

        let data = match slot.role {
            SlotRole::Current => carousel.displayed(),
            SlotRole::Previous | SlotRole::Next => None,
        };

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(0.0, 0.0, item_w, item_h),
            color: ThemeToken::SlotBackground,
            border_color: Some(ThemeToken::SlotBorder),
            label: None,
        });

        if data.is_some() {
            commands.extend(content(data));
        } else {
            placeholder(&mut commands, item_w, item_h);
            commands.extend(content(None));
        }

        commands.push(RenderCommand::PopTransform);
    }

    commands.push(RenderCommand::ClearClip);
    commands.push(RenderCommand::EndGroup);
    commands
}

/// The absent-data variant: an empty-frame card with crossed diagonals and
/// a muted caption.
fn placeholder(commands: &mut Vec<RenderCommand>, w: f64, h: f64) {
    let inset = (w.min(h) * 0.08).max(4.0);
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(inset, inset, w - 2.0 * inset, h - 2.0 * inset),
        color: ThemeToken::PlaceholderBackground,
        border_color: Some(ThemeToken::Border),
        label: None,
    });
    commands.push(RenderCommand::DrawLine {
        from: Point::new(inset, inset),
        to: Point::new(w - inset, h - inset),
        color: ThemeToken::PlaceholderLine,
        width: 1.0,
    });
    commands.push(RenderCommand::DrawLine {
        from: Point::new(w - inset, inset),
        to: Point::new(inset, h - inset),
        color: ThemeToken::PlaceholderLine,
        width: 1.0,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(w / 2.0, h / 2.0),
        text: "loading".to_string(),
        color: ThemeToken::PlaceholderText,
        font_size: 13.0,
        align: TextAlign::Center,
    });
}
