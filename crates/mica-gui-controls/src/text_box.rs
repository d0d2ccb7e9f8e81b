//! Text box renderer
//!
//! Draws the chrome, the placeholder or the display text (with any input
//! method composition spliced in), the selection, and a blinking caret. Each
//! text box keeps a horizontal text scroll so the caret stays inside the
//! content area.

use crate::anim::{AnimationStore, FrameStore};
use crate::elevation::{draw_elevation_border, ElevationBrushCache, ElevationStroke};
use crate::frame::RenderFrame;
use crate::palette::{KindPalette, VisualState};
use mica_gui::{Color, Point, Rect, TextLayoutRequest, TextRun, ViewData, WidgetId, WidgetState};
use std::ops::Range;
use std::time::Instant;

/// Text as shown on screen, composition included. Indices are chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    pub text: String,
    /// Chars of `text` that belong to the composition
    pub composition: Option<Range<usize>>,
    pub caret: usize,
}

/// Splice the active composition into the text at the lower selection bound.
pub fn display_text(data: &ViewData) -> DisplayText {
    let selection = data.selection_range();
    match &data.composition {
        Some(composition) if !composition.text.is_empty() => {
            let at = selection.start;
            let byte = data
                .text
                .char_indices()
                .nth(at)
                .map(|(i, _)| i)
                .unwrap_or(data.text.len());
            let mut text = data.text.clone();
            text.insert_str(byte, &composition.text);
            let len = composition.text.chars().count();
            DisplayText {
                text,
                composition: Some(at..at + len),
                caret: at + composition.cursor.min(len),
            }
        }
        _ => DisplayText {
            text: data.text.clone(),
            composition: None,
            caret: data.caret().min(data.text.chars().count()),
        },
    }
}

/// Blink phase of the caret of one focused text box
#[derive(Debug, Clone, Copy)]
struct CaretBlink {
    visible: bool,
    last_toggle: Instant,
    epoch: u64,
}

#[derive(Debug, Default)]
pub struct TextBoxRenderer {
    fill: AnimationStore<Color>,
    text_scroll: FrameStore<f32>,
    carets: FrameStore<CaretBlink>,
    brushes: ElevationBrushCache,
    needs_redraw: bool,
    next_deadline: Option<Instant>,
}

impl TextBoxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.fill.begin_frame();
        self.text_scroll.begin_frame();
        self.carets.begin_frame();
        self.needs_redraw = false;
        self.next_deadline = None;
    }

    pub fn end_frame(&mut self) -> bool {
        self.text_scroll.end_frame();
        self.carets.end_frame();
        self.fill.end_frame()
    }

    pub fn clear_resources(&mut self) {
        self.brushes.clear();
    }

    /// A caret appeared or blinked this frame
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Earliest upcoming blink among the focused text boxes
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    /// Current horizontal text scroll of `id`
    pub fn text_scroll(&self, id: WidgetId) -> f32 {
        self.text_scroll.get(id).copied().unwrap_or(0.0)
    }

    pub fn render(
        &mut self,
        frame: &mut RenderFrame<'_>,
        id: WidgetId,
        data: &ViewData,
        bounds: Rect,
        state: &WidgetState,
    ) -> bool {
        let palette = *frame.palette();
        let metrics = frame.metrics.text_box;
        let now = frame.now;
        let focused = state.focused && !data.disabled;

        let colors = KindPalette::text_box(&palette)
            .resolve(focused, VisualState::of(data, state))
            .with_overrides(data);
        let fill = self
            .fill
            .animate(id, colors.fill, frame.metrics.timings.color, now);

        let rect = bounds.snap_to_pixels(frame.scale());
        let hairline = frame.hairline();
        let radius = data.corner_radius;

        frame.surface.fill_rounded_rect(rect.inset(hairline), radius, fill);
        if data.disabled || data.border_color.is_visible() {
            let width = if data.border_color.is_visible() {
                data.border_width.max(hairline)
            } else {
                hairline
            };
            frame
                .surface
                .stroke_rounded_rect(rect.inset(width * 0.5), radius, colors.stroke, width);
        } else {
            let stroke = ElevationStroke {
                lit: palette.control_stroke,
                shaded: palette.text_box_underline,
                flip: false,
                edge: frame.metrics.button.elevation_edge,
                width: hairline,
            };
            draw_elevation_border(frame.surface, &mut self.brushes, rect, radius, stroke);
        }

        if focused {
            let line = Rect::new([rect.min[0], rect.max[1] - metrics.focus_line_width], rect.max);
            frame.surface.push_clip(rect, radius);
            frame.surface.fill_rounded_rect(line, 0.0, palette.accent_fill);
            frame.surface.pop_clip();
        }

        let content = rect.inset_xy(metrics.padding_x, metrics.padding_y);
        let display = display_text(data);
        let request = TextLayoutRequest::single_line(&display.text, data.font_size);
        let measurer = frame.measurer;
        let text_size = measurer.measure(&request);
        let caret = measurer.caret_rect(&request, display.caret);

        let scroll = self.text_scroll.entry(id, || 0.0);
        if focused {
            let view = content.width();
            if caret.min[0] - *scroll > view - metrics.caret_width {
                *scroll = caret.min[0] + metrics.caret_width - view;
            }
            if caret.min[0] < *scroll {
                *scroll = caret.min[0];
            }
        }
        let max_scroll = (text_size.width + metrics.caret_width - content.width()).max(0.0);
        *scroll = scroll.clamp(0.0, max_scroll);
        let scroll = *scroll;

        let origin = Point::new(
            content.min[0] - scroll,
            content.center().y - text_size.height * 0.5,
        );

        frame.surface.push_clip(content, 0.0);

        if display.text.is_empty() {
            if !data.placeholder.is_empty() {
                let color = if data.disabled {
                    palette.text_disabled
                } else {
                    palette.text_secondary
                };
                frame.surface.draw_text(&TextRun::new(
                    data.placeholder.clone(),
                    content,
                    data.font_size,
                    color,
                ));
            }
        } else {
            if display.composition.is_none() && data.has_selection() {
                let selection = data.selection_range();
                for r in measurer.selection_rects(&request, selection.start, selection.end) {
                    frame.surface.fill_rounded_rect(
                        r.translate(origin.x, origin.y),
                        0.0,
                        palette.selection_fill,
                    );
                }
            }

            let text_rect = Rect::new(
                [origin.x, content.min[1]],
                [origin.x + text_size.width.max(content.width()), content.max[1]],
            );
            frame.surface.draw_text(&TextRun::new(
                display.text.clone(),
                text_rect,
                data.font_size,
                colors.text,
            ));

            if let Some(range) = display.composition.clone() {
                for r in measurer.selection_rects(&request, range.start, range.end) {
                    let y = origin.y + r.max[1];
                    frame.surface.draw_line(
                        Point::new(origin.x + r.min[0], y),
                        Point::new(origin.x + r.max[0], y),
                        colors.text,
                        hairline.max(1.0),
                    );
                }
            }
        }

        if focused {
            let interval = metrics.caret_blink_interval;
            let started = !self.carets.contains(id);
            let blink = self.carets.entry(id, || CaretBlink {
                visible: true,
                last_toggle: now,
                epoch: state.caret_epoch,
            });
            let mut changed = started;
            if blink.epoch != state.caret_epoch {
                *blink = CaretBlink {
                    visible: true,
                    last_toggle: now,
                    epoch: state.caret_epoch,
                };
                changed = true;
            } else if now.saturating_duration_since(blink.last_toggle) >= interval {
                blink.visible = !blink.visible;
                blink.last_toggle = now;
                changed = true;
            }
            let blink = *blink;

            self.needs_redraw |= changed;
            let deadline = blink.last_toggle + interval;
            self.next_deadline = Some(self.next_deadline.map_or(deadline, |d| d.min(deadline)));

            if blink.visible {
                let caret_rect = Rect::new(
                    [origin.x + caret.min[0], origin.y + caret.min[1]],
                    [
                        origin.x + caret.min[0] + metrics.caret_width,
                        origin.y + caret.max[1],
                    ],
                );
                frame.surface.fill_rounded_rect(caret_rect, 0.0, colors.text);
            }
        }

        frame.surface.pop_clip();

        self.fill.is_active(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_gui::{
        Clock, Composition, ControlMetrics, DrawCommand, DrawList, ManualClock, MonospaceMeasurer,
        Theme, WidgetKind, WidgetTree,
    };

    struct Fixture {
        tree: WidgetTree,
        id: WidgetId,
        theme: Theme,
        metrics: ControlMetrics,
        measurer: MonospaceMeasurer,
        clock: ManualClock,
        renderer: TextBoxRenderer,
    }

    impl Fixture {
        fn new(data: ViewData) -> Self {
            let mut tree = WidgetTree::new(ViewData::default());
            let root = tree.root();
            let id = tree.append_child(root, data).unwrap();
            Self {
                tree,
                id,
                theme: Theme::dark(),
                metrics: ControlMetrics::default(),
                measurer: MonospaceMeasurer::default(),
                clock: ManualClock::new(),
                renderer: TextBoxRenderer::new(),
            }
        }

        fn draw(&mut self, state: WidgetState) -> DrawList {
            let mut surface = DrawList::default();
            let data = self.tree.get(self.id).unwrap();
            let mut frame = RenderFrame {
                surface: &mut surface,
                theme: &self.theme,
                metrics: &self.metrics,
                measurer: &self.measurer,
                now: self.clock.now(),
            };
            self.renderer.begin_frame();
            self.renderer
                .render(&mut frame, self.id, data, data.layout, &state);
            self.renderer.end_frame();
            surface
        }

        fn caret(&self, surface: &DrawList) -> Option<Rect> {
            let width = self.metrics.text_box.caret_width;
            surface.commands().iter().find_map(|cmd| match cmd {
                DrawCommand::FillRoundedRect { rect, .. } if (rect.width() - width).abs() < 1e-4 => {
                    Some(*rect)
                }
                _ => None,
            })
        }
    }

    fn focused(epoch: u64) -> WidgetState {
        WidgetState {
            focused: true,
            caret_epoch: epoch,
            ..WidgetState::default()
        }
    }

    #[test]
    fn test_composition_spliced_at_lower_selection_bound() {
        let data = ViewData::new(WidgetKind::TextBox)
            .with_text("hello")
            .with_selection_start(4)
            .with_selection_end(1)
            .with_composition(Some(Composition {
                text: "XY".to_string(),
                cursor: 1,
            }));
        let display = display_text(&data);
        assert_eq!(display.text, "hXYello");
        assert_eq!(display.composition, Some(1..3));
        assert_eq!(display.caret, 2);
    }

    #[test]
    fn test_caret_blinks_on_interval_and_restarts_on_edit() {
        let mut fx = Fixture::new(
            ViewData::new(WidgetKind::TextBox)
                .with_bounds(0.0, 0.0, 200.0, 32.0)
                .with_text("abc")
                .with_selection_start(3)
                .with_selection_end(3),
        );
        let start = fx.clock.now();

        let surface = fx.draw(focused(0));
        assert!(fx.renderer.needs_redraw());
        assert!(fx.caret(&surface).is_some());
        assert_eq!(
            fx.renderer.next_deadline(),
            Some(start + fx.metrics.text_box.caret_blink_interval)
        );

        fx.clock.advance_secs(0.1);
        let surface = fx.draw(focused(0));
        assert!(!fx.renderer.needs_redraw());
        assert!(fx.caret(&surface).is_some());

        fx.clock.advance_secs(0.5);
        let surface = fx.draw(focused(0));
        assert!(fx.renderer.needs_redraw());
        assert!(fx.caret(&surface).is_none());

        let surface = fx.draw(focused(1));
        assert!(fx.renderer.needs_redraw());
        assert!(fx.caret(&surface).is_some());

        let surface = fx.draw(WidgetState::default());
        assert!(!fx.renderer.needs_redraw());
        assert_eq!(fx.renderer.next_deadline(), None);
        assert!(fx.caret(&surface).is_none());
    }

    #[test]
    fn test_text_scroll_keeps_caret_in_view() {
        let text = "x".repeat(30);
        let mut fx = Fixture::new(
            ViewData::new(WidgetKind::TextBox)
                .with_bounds(0.0, 0.0, 100.0, 32.0)
                .with_font_size(10.0)
                .with_text(text)
                .with_selection_start(30)
                .with_selection_end(30),
        );
        let content_max = 100.0 - fx.metrics.text_box.padding_x;

        let surface = fx.draw(focused(0));
        let caret = fx.caret(&surface).unwrap();
        assert!(caret.max[0] <= content_max + 1e-3);
        assert!(caret.min[0] >= fx.metrics.text_box.padding_x);
        assert!(fx.renderer.text_scroll(fx.id) > 0.0);

        {
            let data = fx.tree.get_mut(fx.id).unwrap();
            data.selection_start = 0;
            data.selection_end = 0;
        }
        let surface = fx.draw(focused(1));
        assert_eq!(fx.renderer.text_scroll(fx.id), 0.0);
        let caret = fx.caret(&surface).unwrap();
        assert_eq!(caret.min[0], fx.metrics.text_box.padding_x);
    }

    #[test]
    fn test_placeholder_and_balanced_clips() {
        let mut fx = Fixture::new(
            ViewData::new(WidgetKind::TextBox)
                .with_bounds(0.0, 0.0, 200.0, 32.0)
                .with_placeholder("Search"),
        );
        let surface = fx.draw(focused(0));
        let placeholder = surface.texts().next().unwrap();
        assert_eq!(placeholder.text, "Search");
        assert_eq!(placeholder.color, fx.theme.palette().text_secondary);
        assert_eq!(surface.clip_depth(), 0);
        let pushes = surface
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::PushClip { .. }))
            .count();
        assert_eq!(pushes, 2);
    }
}
