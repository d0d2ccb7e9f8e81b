//! Button and toggle button renderer
//!
//! Draws a pixel-snapped rounded rect with an animated fill, an elevation
//! border and centered text. A checked toggle button uses the accent colors.

use crate::anim::AnimationStore;
use crate::elevation::{draw_elevation_border, ElevationBrushCache, ElevationStroke};
use crate::frame::RenderFrame;
use crate::palette::{KindPalette, VisualState};
use mica_gui::{Color, Rect, TextRun, ViewData, WidgetId, WidgetKind, WidgetState};

#[derive(Debug, Default)]
pub struct ButtonRenderer {
    background: AnimationStore<Color>,
    brushes: ElevationBrushCache,
}

impl ButtonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.background.begin_frame();
    }

    /// True while any button color is still animating.
    pub fn end_frame(&mut self) -> bool {
        self.background.end_frame()
    }

    /// Drop theme-dependent resources.
    pub fn clear_resources(&mut self) {
        self.brushes.clear();
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
        let accent = data.is_accent || (data.kind == WidgetKind::ToggleButton && data.checked);
        let colors = KindPalette::button(&palette)
            .resolve(accent, VisualState::of(data, state))
            .with_overrides(data);

        let fill = self.background.animate(
            id,
            colors.fill,
            frame.metrics.timings.color,
            frame.now,
        );
        let animating = self.background.is_active(id);

        let rect = bounds.snap_to_pixels(frame.scale());
        let stroke_width = frame.hairline();
        let radius = data.corner_radius;

        // Accent fills run under the border; everything else sits inside it.
        let fill_rect = if accent { rect } else { rect.inset(stroke_width) };
        frame.surface.fill_rounded_rect(fill_rect, radius, fill);

        if data.border_color.is_visible() {
            let width = data.border_width.max(stroke_width);
            frame
                .surface
                .stroke_rounded_rect(rect.inset(width * 0.5), radius, colors.stroke, width);
        } else if data.disabled {
            if colors.stroke.is_visible() {
                frame.surface.stroke_rounded_rect(
                    rect.inset(stroke_width * 0.5),
                    radius,
                    colors.stroke,
                    stroke_width,
                );
            }
        } else {
            let (lit, shaded) = if accent {
                (palette.accent_stroke, palette.accent_stroke_secondary)
            } else {
                (palette.control_stroke, palette.control_stroke_secondary)
            };
            let stroke = ElevationStroke {
                lit,
                shaded,
                flip: accent || frame.theme.is_light(),
                edge: frame.metrics.button.elevation_edge,
                width: stroke_width,
            };
            draw_elevation_border(frame.surface, &mut self.brushes, rect, radius, stroke);
        }

        if state.focused && state.show_focus && !data.disabled {
            let offset = frame.metrics.button.focus_ring_offset;
            let width = frame.metrics.button.focus_ring_width;
            frame.surface.stroke_rounded_rect(
                rect.inflate(offset + width * 0.5),
                radius + offset,
                palette.focus_stroke,
                width,
            );
        }

        if !data.text.is_empty() {
            frame.surface.draw_text(
                &TextRun::new(data.text.clone(), rect, data.font_size, colors.text).centered(),
            );
        }

        animating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_gui::{
        Clock, ControlMetrics, DrawCommand, DrawList, ManualClock, MonospaceMeasurer, Theme,
        WidgetTree,
    };

    struct Fixture {
        tree: WidgetTree,
        id: WidgetId,
        clock: ManualClock,
        metrics: ControlMetrics,
        measurer: MonospaceMeasurer,
        renderer: ButtonRenderer,
    }

    impl Fixture {
        fn new(data: ViewData) -> Self {
            let mut tree = WidgetTree::new(ViewData::default());
            let root = tree.root();
            let id = tree.append_child(root, data).unwrap();
            Self {
                tree,
                id,
                clock: ManualClock::new(),
                metrics: ControlMetrics::default(),
                measurer: MonospaceMeasurer::default(),
                renderer: ButtonRenderer::new(),
            }
        }

        fn frame(&mut self, surface: &mut DrawList, theme: &Theme, state: WidgetState) -> bool {
            let data = self.tree.get(self.id).unwrap();
            let mut frame = RenderFrame {
                surface,
                theme,
                metrics: &self.metrics,
                measurer: &self.measurer,
                now: self.clock.now(),
            };
            self.renderer.begin_frame();
            let bounds = data.layout;
            self.renderer.render(&mut frame, self.id, data, bounds, &state);
            self.renderer.end_frame()
        }
    }

    fn first_fill(surface: &DrawList) -> Color {
        surface
            .commands()
            .iter()
            .find_map(|cmd| match cmd {
                DrawCommand::FillRoundedRect { color, .. } => Some(*color),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_hover_color_animates_then_settles() {
        let theme = Theme::dark();
        let mut fx = Fixture::new(
            ViewData::new(WidgetKind::Button)
                .with_bounds(0.0, 0.0, 120.0, 32.0)
                .with_text("OK"),
        );
        let mut surface = DrawList::default();

        assert!(!fx.frame(&mut surface, &theme, WidgetState::default()));
        assert_eq!(first_fill(&surface), theme.palette().control_fill);

        let hovered = WidgetState {
            hovered: true,
            ..WidgetState::default()
        };
        surface.clear();
        fx.clock.advance_secs(0.02);
        assert!(fx.frame(&mut surface, &theme, hovered));

        surface.clear();
        fx.clock.advance_secs(0.04);
        assert!(fx.frame(&mut surface, &theme, hovered));
        let midway = first_fill(&surface);
        assert_ne!(midway, theme.palette().control_fill_hover);

        surface.clear();
        fx.clock.advance_secs(0.1);
        assert!(!fx.frame(&mut surface, &theme, hovered));
        assert_eq!(first_fill(&surface), theme.palette().control_fill_hover);
    }

    #[test]
    fn test_elevation_brush_created_once_across_frames() {
        let mut theme = Theme::dark();
        let mut fx = Fixture::new(ViewData::new(WidgetKind::Button).with_bounds(0.0, 0.0, 120.0, 32.0));
        let mut surface = DrawList::default();
        for _ in 0..4 {
            fx.frame(&mut surface, &theme, WidgetState::default());
        }
        assert_eq!(surface.brushes_created(), 1);
        assert_eq!(surface.gradient_strokes(), 4);

        theme.set_mode(mica_gui::ThemeMode::Light);
        fx.renderer.clear_resources();
        fx.frame(&mut surface, &theme, WidgetState::default());
        assert_eq!(surface.brushes_created(), 2);
    }

    #[test]
    fn test_missing_brush_skips_only_the_border() {
        let theme = Theme::dark();
        let mut fx = Fixture::new(
            ViewData::new(WidgetKind::Button)
                .with_bounds(0.0, 0.0, 120.0, 32.0)
                .with_text("Save"),
        );
        let mut surface = DrawList::default().with_resource_failures();
        fx.frame(&mut surface, &theme, WidgetState::default());
        assert_eq!(surface.gradient_strokes(), 0);
        assert_eq!(surface.texts().count(), 1);
        assert_eq!(first_fill(&surface), theme.palette().control_fill);
    }

    #[test]
    fn test_focus_ring_needs_keyboard_focus_visuals() {
        let theme = Theme::dark();
        let mut fx = Fixture::new(ViewData::new(WidgetKind::Button).with_bounds(0.0, 0.0, 120.0, 32.0));
        let ring_count = |surface: &DrawList, color: Color| {
            surface
                .commands()
                .iter()
                .filter(|cmd| matches!(cmd, DrawCommand::StrokeRoundedRect { color: c, .. } if *c == color))
                .count()
        };

        let mut surface = DrawList::default();
        let focused = WidgetState {
            focused: true,
            ..WidgetState::default()
        };
        fx.frame(&mut surface, &theme, focused);
        assert_eq!(ring_count(&surface, theme.palette().focus_stroke), 0);

        surface.clear();
        fx.frame(
            &mut surface,
            &theme,
            WidgetState {
                show_focus: true,
                ..focused
            },
        );
        assert_eq!(ring_count(&surface, theme.palette().focus_stroke), 1);
    }

    #[test]
    fn test_checked_toggle_button_uses_accent_fill_uninset() {
        let theme = Theme::dark();
        let bounds = Rect::from_xywh(0.0, 0.0, 120.0, 32.0);
        let mut fx = Fixture::new(
            ViewData::new(WidgetKind::ToggleButton)
                .with_layout(bounds)
                .with_checked(true),
        );
        let mut surface = DrawList::new(2.0);
        fx.frame(&mut surface, &theme, WidgetState::default());
        match &surface.commands()[0] {
            DrawCommand::FillRoundedRect { rect, color, .. } => {
                assert_eq!(*rect, bounds);
                assert_eq!(*color, theme.palette().accent_fill);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
