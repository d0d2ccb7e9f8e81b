//! Check box renderer
//!
//! The check glyph fades and grows with an eased check progress; the box
//! shrinks slightly while pressed.

use crate::anim::AnimationStore;
use crate::frame::RenderFrame;
use crate::palette::{KindPalette, VisualState};
use mica_gui::{
    checkbox_layout, ease_out_cubic, Color, Point, Rect, TextRun, Transition, ViewData, WidgetId,
    WidgetState,
};

/// Check mark vertices as fractions of the box
const CHECK_POINTS: [[f32; 2]; 3] = [[0.27, 0.52], [0.43, 0.68], [0.74, 0.34]];
const CHECK_STROKE_WIDTH: f32 = 1.5;

#[derive(Debug, Default)]
pub struct CheckBoxRenderer {
    progress: AnimationStore<f32>,
    press_scale: AnimationStore<f32>,
    fill: AnimationStore<Color>,
}

impl CheckBoxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.progress.begin_frame();
        self.press_scale.begin_frame();
        self.fill.begin_frame();
    }

    pub fn end_frame(&mut self) -> bool {
        let progress = self.progress.end_frame();
        let press = self.press_scale.end_frame();
        let fill = self.fill.end_frame();
        progress || press || fill
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
        let metrics = frame.metrics.check_box;
        let timings = frame.metrics.timings;
        let now = frame.now;

        let colors = KindPalette::check_box(&palette)
            .resolve(data.checked, VisualState::of(data, state))
            .with_overrides(data);

        let progress = self.progress.animate_with(
            id,
            if data.checked { 1.0 } else { 0.0 },
            Transition::new(timings.check, ease_out_cubic),
            now,
        );
        let pressed = state.pressed && !data.disabled;
        let scale = self.press_scale.animate(
            id,
            if pressed { metrics.pressed_scale } else { 1.0 },
            timings.press,
            now,
        );
        let fill = self.fill.animate(id, colors.fill, timings.color, now);

        let layout = checkbox_layout(bounds, &metrics);
        let glyph = layout.glyph.scale_from_center(scale);
        let radius = metrics.corner_radius * scale;
        let hairline = frame.hairline();

        frame.surface.fill_rounded_rect(glyph, radius, fill);
        if colors.stroke.is_visible() {
            frame
                .surface
                .stroke_rounded_rect(glyph.inset(hairline * 0.5), radius, colors.stroke, hairline);
        }

        if progress > 0.001 {
            let glyph_color = if data.disabled {
                palette.text_on_accent_disabled
            } else {
                palette.text_on_accent
            };
            let center = glyph.center();
            let grow = 0.6 + 0.4 * progress;
            let points: Vec<Point> = CHECK_POINTS
                .iter()
                .map(|[fx, fy]| {
                    let x = glyph.min[0] + fx * glyph.width();
                    let y = glyph.min[1] + fy * glyph.height();
                    Point::new(
                        center.x + (x - center.x) * grow,
                        center.y + (y - center.y) * grow,
                    )
                })
                .collect();
            frame.surface.draw_polyline(
                &points,
                glyph_color.scale_alpha(progress),
                CHECK_STROKE_WIDTH.max(hairline),
            );
        }

        if !data.text.is_empty() {
            frame.surface.draw_text(&TextRun::new(
                data.text.clone(),
                layout.text,
                data.font_size,
                colors.text,
            ));
        }

        self.progress.is_active(id) || self.press_scale.is_active(id) || self.fill.is_active(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_gui::{
        Clock, ControlMetrics, DrawCommand, DrawList, ManualClock, MonospaceMeasurer, Theme,
        WidgetKind, WidgetTree,
    };

    fn check_alpha(surface: &DrawList) -> Option<f32> {
        surface.commands().iter().find_map(|cmd| match cmd {
            DrawCommand::Polyline { color, .. } => Some(color.a),
            _ => None,
        })
    }

    #[test]
    fn test_check_glyph_fades_in_with_eased_progress() {
        let mut tree = WidgetTree::new(ViewData::default());
        let root = tree.root();
        let id = tree
            .append_child(
                root,
                ViewData::new(WidgetKind::CheckBox)
                    .with_bounds(0.0, 0.0, 160.0, 32.0)
                    .with_text("Remember me"),
            )
            .unwrap();
        let theme = Theme::dark();
        let metrics = ControlMetrics::default();
        let measurer = MonospaceMeasurer::default();
        let clock = ManualClock::new();
        let mut renderer = CheckBoxRenderer::new();

        let mut draw = |surface: &mut DrawList, data: &ViewData| -> bool {
            let mut frame = RenderFrame {
                surface,
                theme: &theme,
                metrics: &metrics,
                measurer: &measurer,
                now: clock.now(),
            };
            renderer.begin_frame();
            renderer.render(&mut frame, id, data, data.layout, &WidgetState::default());
            renderer.end_frame()
        };

        let mut surface = DrawList::default();
        draw(&mut surface, tree.get(id).unwrap());
        assert_eq!(check_alpha(&surface), None);

        tree.get_mut(id).unwrap().checked = true;
        surface.clear();
        assert!(draw(&mut surface, tree.get(id).unwrap()));

        clock.advance_secs(0.1);
        surface.clear();
        assert!(draw(&mut surface, tree.get(id).unwrap()));
        let alpha = check_alpha(&surface).unwrap();
        let expected = theme.palette().text_on_accent.a * ease_out_cubic(0.5);
        assert!((alpha - expected).abs() < 1e-3);

        clock.advance_secs(0.2);
        surface.clear();
        assert!(!draw(&mut surface, tree.get(id).unwrap()));
        assert_eq!(check_alpha(&surface), Some(theme.palette().text_on_accent.a));
        assert_eq!(surface.texts().next().unwrap().text, "Remember me");
    }
}
