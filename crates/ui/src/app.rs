use eframe::egui;
use swipedeck_core::{Carousel, PageHooks, TransitionPhase, render_carousel};
use swipedeck_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use crate::renderer;
use crate::theme::ThemeMode;

const FIRST_PAGE: i32 = 0;
const LAST_PAGE: i32 = 10;

/// Initial width used until the first frame reports the real panel size.
const NOMINAL_WIDTH: f64 = 800.0;

/// Demo collaborator: integer pages in `[FIRST_PAGE, LAST_PAGE]`. A fetch
/// stages the neighboring page; the app applies it via `set_data`, which is
/// how a real caller would respond from its own state update.
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

/// Main demo application state.
pub struct DeckApp {
    carousel: Carousel<i32>,
    page: i32,
    content_ratio: f32,
    /// Accumulated drag translation since the pointer went down.
    drag_accum: f32,
    theme_mode: ThemeMode,
}

impl DeckApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let page = 5;
        let hooks = DemoHooks { page, staged: None };
        let carousel = Carousel::new(
            NOMINAL_WIDTH,
            swipedeck_core::DEFAULT_CONTENT_RATIO,
            Some(page),
            &hooks,
            0.0,
        );

        Self {
            carousel,
            page,
            content_ratio: swipedeck_core::DEFAULT_CONTENT_RATIO as f32,
            drag_accum: 0.0,
            theme_mode: ThemeMode::Dark,
        }
    }

    fn phase_label(&self) -> &'static str {
        match self.carousel.phase() {
            TransitionPhase::Idle => "idle",
            TransitionPhase::Dragging => "dragging",
            TransitionPhase::Committing => "committing",
            TransitionPhase::AwaitingFetch => "awaiting fetch",
        }
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("swipedeck");
                ui.separator();

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "🌙 Dark",
                    ThemeMode::Light => "☀ Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = match self.theme_mode {
                        ThemeMode::Dark => {
                            ctx.set_visuals(egui::Visuals::light());
                            ThemeMode::Light
                        }
                        ThemeMode::Light => {
                            ctx.set_visuals(egui::Visuals::dark());
                            ThemeMode::Dark
                        }
                    };
                }

                ui.separator();
                ui.label("width ratio");
                ui.add(egui::Slider::new(&mut self.content_ratio, 0.1..=1.0));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("page {} of {LAST_PAGE}", self.page));
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "Phase: {} | Drag left/right to page | Offsets re-derive on each fetch",
                    self.phase_label(),
                ));
            });
        });

        // Central panel: the carousel
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_rect_before_wrap();
            self.carousel
                .resize(f64::from(available.width()), f64::from(self.content_ratio));

            // Pointer drags become translation samples
            let response = ui.allocate_rect(available, egui::Sense::click_and_drag());
            if response.drag_started() {
                self.drag_accum = 0.0;
            }
            if response.dragged() {
                self.drag_accum += response.drag_delta().x;
                self.carousel.drag(f64::from(self.drag_accum), now);
            }
            if response.drag_stopped() {
                self.carousel.release(now);
            }

            // Tick animations; apply whatever the fetch staged
            let mut hooks = DemoHooks {
                page: self.page,
                staged: None,
            };
            self.carousel.tick(&mut hooks, now);
            if let Some(page) = hooks.staged.take() {
                self.page = page;
                hooks.page = page;
                self.carousel.set_data(Some(page), &hooks, now);
            }

            let viewport = Viewport {
                x: 0.0,
                y: 0.0,
                width: f64::from(available.width()),
                height: f64::from(available.height()),
                dpr: f64::from(ctx.pixels_per_point()),
            };
            let item_w = self.carousel.pager().layout().item_width;
            let item_h = viewport.height - 16.0;
            let commands = render_carousel(&self.carousel, &viewport, now, |data| {
                page_content(data, item_w, item_h)
            });

            let mut painter = ui.painter_at(available);
            renderer::render_commands(&mut painter, &commands, available.min, self.theme_mode);

            if self.carousel.pager().is_animating(now) || response.dragged() {
                ctx.request_repaint();
            }
        });
    }
}

/// Slot-local content for the demo: a big page number with a caption.
fn page_content(data: Option<&i32>, w: f64, h: f64) -> Vec<RenderCommand> {
    let Some(page) = data else {
        // Neighbor slots keep the built-in placeholder.
        return Vec::new();
    };
    vec![
        RenderCommand::DrawText {
            position: Point::new(w / 2.0, h / 2.0 - 10.0),
            text: page.to_string(),
            color: ThemeToken::TextPrimary,
            font_size: 64.0,
            align: TextAlign::Center,
        },
        RenderCommand::DrawText {
            position: Point::new(w / 2.0, h / 2.0 + 36.0),
            text: format!("page {page}"),
            color: ThemeToken::TextMuted,
            font_size: 14.0,
            align: TextAlign::Center,
        },
        RenderCommand::DrawRect {
            rect: Rect::new(w / 2.0 - 24.0, h - 24.0, 48.0, 4.0),
            color: ThemeToken::Border,
            border_color: None,
            label: None,
        },
    ]
}
