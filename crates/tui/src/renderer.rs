use std::io::stdout;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};
use swipedeck_core::{Carousel, PageHooks, TransitionPhase, render_carousel};
use swipedeck_protocol::{RenderCommand, TextAlign, ThemeToken, Viewport};

// Logical pixels per terminal cell. Drag translation and render command
// coordinates both live in logical pixels; cells are the output grid.
const CELL_W: f64 = 4.0;
const CELL_H: f64 = 8.0;

const FIRST_PAGE: i32 = 0;
const LAST_PAGE: i32 = 10;

struct DemoHooks {
    page: i32,
    staged: Option<i32>,
}

impl PageHooks<i32> for DemoHooks {
    fn is_next_available(&self) -> bool {
        self.page < LAST_PAGE
    }

    fn is_prev_available(&self) -> bool {
        self.page > FIRST_PAGE
    }

    fn fetch_next(&mut self, current: &i32) {
        self.staged = Some(current + 1);
    }

    fn fetch_prev(&mut self, current: &i32) {
        self.staged = Some(current - 1);
    }
}

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Black,
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::SlotBackground => Color::Rgb(30, 30, 46),
        ThemeToken::SlotBorder => Color::DarkGray,
        ThemeToken::PlaceholderBackground => Color::Rgb(24, 24, 37),
        ThemeToken::PlaceholderLine => Color::DarkGray,
        ThemeToken::PlaceholderText => Color::Gray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
    }
}

fn phase_label(phase: TransitionPhase) -> &'static str {
    match phase {
        TransitionPhase::Idle => "idle",
        TransitionPhase::Dragging => "dragging",
        TransitionPhase::Committing => "committing",
        TransitionPhase::AwaitingFetch => "awaiting fetch",
    }
}

pub fn run_demo() -> Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let started = Instant::now();
    let mut page = 5;
    let hooks = DemoHooks { page, staged: None };
    let term_size = terminal.size()?;
    let mut carousel = Carousel::new(
        f64::from(term_size.width) * CELL_W,
        swipedeck_core::DEFAULT_CONTENT_RATIO,
        Some(page),
        &hooks,
        0.0,
    );

    let mut drag_origin: Option<u16> = None;

    loop {
        let now = started.elapsed().as_secs_f64();
        let term_size = terminal.size()?;
        let content_rows = term_size.height.saturating_sub(2);
        let viewport = Viewport {
            x: 0.0,
            y: 0.0,
            width: f64::from(term_size.width) * CELL_W,
            height: f64::from(content_rows) * CELL_H,
            dpr: 1.0,
        };

        carousel.resize(viewport.width, swipedeck_core::DEFAULT_CONTENT_RATIO);

        // Advance animations; fire and apply any staged fetch.
        let mut hooks = DemoHooks { page, staged: None };
        carousel.tick(&mut hooks, now);
        if let Some(staged) = hooks.staged.take() {
            page = staged;
            hooks.page = page;
            carousel.set_data(Some(page), &hooks, now);
        }

        let item_w = carousel.pager().layout().item_width;
        let item_h = viewport.height - 16.0;
        let commands = render_carousel(&carousel, &viewport, now, |data| {
            page_content(data, item_w, item_h)
        });

        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(" swipedeck — drag with the mouse | ←→ swipe | q quit ")
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let content_area = Rect::new(0, 1, area.width, area.height.saturating_sub(2));
            draw_commands(frame, content_area, &commands);

            let status_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);
            let status = Block::default()
                .title(format!(
                    " page {page} of {LAST_PAGE} | phase: {} ",
                    phase_label(carousel.phase())
                ))
                .style(Style::default().fg(Color::Gray).bg(Color::Black));
            frame.render_widget(status, status_area);
        })?;

        if event::poll(std::time::Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    // Arrow keys synthesize a full swipe gesture.
                    KeyCode::Right => {
                        let threshold = carousel.pager().layout().drag_threshold();
                        carousel.drag(-(threshold + 1.0), now);
                        carousel.release(now);
                    }
                    KeyCode::Left => {
                        let threshold = carousel.pager().layout().drag_threshold();
                        carousel.drag(threshold + 1.0, now);
                        carousel.release(now);
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(_) => {
                        drag_origin = Some(mouse.column);
                    }
                    MouseEventKind::Drag(_) => {
                        if let Some(origin) = drag_origin {
                            let dx = f64::from(mouse.column) - f64::from(origin);
                            carousel.drag(dx * CELL_W, now);
                        }
                    }
                    MouseEventKind::Up(_) => {
                        drag_origin = None;
                        carousel.release(now);
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Slot-local content: the page number, centered.
fn page_content(data: Option<&i32>, w: f64, h: f64) -> Vec<RenderCommand> {
    use swipedeck_protocol::{Point, TextAlign};
    let Some(page) = data else {
        return Vec::new();
    };
    vec![RenderCommand::DrawText {
        position: Point::new(w / 2.0, h / 2.0),
        text: format!("[ page {page} ]"),
        color: ThemeToken::TextPrimary,
        font_size: 14.0,
        align: TextAlign::Center,
    }]
}

/// Map render commands onto terminal cells. Lines are below cell
/// resolution and groups carry no visuals, so both are skipped; clip and
/// transform state is tracked so slot offsets land in the right columns.
fn draw_commands(frame: &mut ratatui::Frame<'_>, area: Rect, commands: &[RenderCommand]) {
    let mut translate_stack: Vec<(f64, f64)> = vec![(0.0, 0.0)];
    let mut clip_stack: Vec<(f64, f64, f64, f64)> = Vec::new();
    let mut clip = (
        0.0,
        0.0,
        f64::from(area.width) * CELL_W,
        f64::from(area.height) * CELL_H,
    );

    for cmd in commands {
        let (tx, ty) = translate_stack.last().copied().unwrap_or((0.0, 0.0));
        match cmd {
            RenderCommand::DrawRect {
                rect, color, label, ..
            } => {
                let x = rect.x + tx;
                let y = rect.y + ty;
                let (cx, cy, cw, ch) = clip;
                let x0 = x.max(cx);
                let y0 = y.max(cy);
                let x1 = (x + rect.w).min(cx + cw);
                let y1 = (y + rect.h).min(cy + ch);
                if x1 <= x0 || y1 <= y0 {
                    continue;
                }

                let col0 = (x0 / CELL_W) as u16;
                let col1 = ((x1 / CELL_W).ceil() as u16).min(area.width);
                let row0 = (y0 / CELL_H) as u16;
                let row1 = ((y1 / CELL_H).ceil() as u16).min(area.height);
                if col1 <= col0 || row1 <= row0 {
                    continue;
                }

                let bg = theme_to_color(*color);
                let cell_rect = Rect::new(
                    area.x + col0,
                    area.y + row0,
                    col1 - col0,
                    row1 - row0,
                );
                frame.render_widget(Block::default().style(Style::default().bg(bg)), cell_rect);

                if let Some(text) = label {
                    put_text(frame, area, col0, row0, text, Color::White, Some(bg));
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                ..
            } => {
                let x = position.x + tx;
                let y = position.y + ty;
                let (cx, cy, cw, ch) = clip;
                if x < cx || x > cx + cw || y < cy || y > cy + ch {
                    continue;
                }
                let col = aligned_col((x / CELL_W) as i32, *align, text);
                let row = (y / CELL_H) as u16;
                if col < 0 || row >= area.height {
                    continue;
                }
                put_text(
                    frame,
                    area,
                    col as u16,
                    row,
                    text,
                    theme_to_color(*color),
                    None,
                );
            }

            RenderCommand::DrawLine { .. } => {}

            RenderCommand::SetClip { rect } => {
                clip_stack.push(clip);
                clip = (rect.x + tx, rect.y + ty, rect.w, rect.h);
            }

            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    clip = prev;
                }
            }

            RenderCommand::PushTransform { translate, .. } => {
                translate_stack.push((tx + translate.x, ty + translate.y));
            }

            RenderCommand::PopTransform => {
                if translate_stack.len() > 1 {
                    translate_stack.pop();
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}

/// Starting column for a text run. Cells hold one character each, so
/// alignment counts characters, not bytes.
fn aligned_col(col: i32, align: TextAlign, text: &str) -> i32 {
    let chars = text.chars().count() as i32;
    match align {
        TextAlign::Center => col - chars / 2,
        TextAlign::Right => col - chars,
        TextAlign::Left => col,
    }
}

fn put_text(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    col: u16,
    row: u16,
    text: &str,
    fg: Color,
    bg: Option<Color>,
) {
    if row >= area.height {
        return;
    }
    let buf = frame.buffer_mut();
    for (i, ch) in text.chars().enumerate() {
        let x = area.x + col + i as u16;
        let y = area.y + row;
        if x < area.x + area.width && y < area.y + area.height {
            let cell = &mut buf[(x, y)];
            cell.set_char(ch).set_fg(fg);
            if let Some(bg) = bg {
                cell.set_bg(bg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centering_counts_characters_not_bytes() {
        // "héllo" is 5 characters but 6 bytes; byte-wise centering would
        // land one cell off.
        assert_eq!(aligned_col(10, TextAlign::Center, "héllo"), 8);
        assert_eq!(aligned_col(10, TextAlign::Center, "hello"), 8);
        assert_eq!(aligned_col(10, TextAlign::Right, "héllo"), 5);
        assert_eq!(aligned_col(10, TextAlign::Left, "héllo"), 10);
    }
}
