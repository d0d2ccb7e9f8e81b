//! Toggle switch renderer
//!
//! Track and knob colors blend between the off and on palettes in gamma space
//! as the eased progress moves; while pressed the knob stretches toward the
//! side it is about to travel to.

use crate::anim::AnimationStore;
use crate::frame::RenderFrame;
use crate::palette::{KindPalette, VisualState};
use mica_gui::{
    ease_out_cubic, lerp_color, toggle_layout, Point, Rect, TextRun, Transition, ViewData,
    WidgetId, WidgetState,
};

const ON_LABEL: &str = "On";
const OFF_LABEL: &str = "Off";

#[derive(Debug, Default)]
pub struct ToggleSwitchRenderer {
    progress: AnimationStore<f32>,
}

impl ToggleSwitchRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.progress.begin_frame();
    }

    pub fn end_frame(&mut self) -> bool {
        self.progress.end_frame()
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
        let metrics = frame.metrics.toggle;
        let visual = VisualState::of(data, state);

        let progress = self.progress.animate_with(
            id,
            if data.checked { 1.0 } else { 0.0 },
            Transition::new(frame.metrics.timings.toggle, ease_out_cubic),
            frame.now,
        );

        let table = KindPalette::toggle_switch(&palette);
        let off = table.resolve(false, visual);
        let on = table.resolve(true, visual);
        let track_fill = lerp_color(off.fill, on.fill, progress);
        let track_stroke = lerp_color(off.stroke, on.stroke, progress);
        let (knob_off, knob_on) = if visual.disabled {
            (palette.text_disabled, palette.text_on_accent_disabled)
        } else {
            (palette.text_secondary, palette.text_on_accent)
        };
        let knob_color = lerp_color(knob_off, knob_on, progress);

        let layout = toggle_layout(bounds, progress, &metrics);
        let half_track = metrics.track_height * 0.5;
        let hairline = frame.hairline();
        frame
            .surface
            .fill_rounded_rect(layout.track, half_track, track_fill);
        if track_stroke.is_visible() {
            frame.surface.stroke_rounded_rect(
                layout.track.inset(hairline * 0.5),
                half_track,
                track_stroke,
                hairline,
            );
        }

        let knob_size = if !visual.disabled && (visual.hovered || visual.pressed) {
            metrics.knob_hover_size
        } else {
            metrics.knob_size
        };
        let (stretch, shift) = if visual.pressed && !visual.disabled {
            let stretch = metrics.knob_press_stretch;
            (stretch, stretch * 0.5 * (1.0 - 2.0 * progress))
        } else {
            (0.0, 0.0)
        };
        let knob_center = Point::new(layout.knob_center.x + shift, layout.knob_center.y);
        let knob = Rect::from_center(knob_center, (knob_size + stretch) * 0.5, knob_size * 0.5);
        frame
            .surface
            .fill_rounded_rect(knob, knob_size * 0.5, knob_color);

        // `text` mirrors the checked state, so the label comes from the state.
        let label = if data.checked { ON_LABEL } else { OFF_LABEL };
        let label_color = if data.foreground.is_visible() {
            data.foreground
        } else {
            off.text
        };
        frame.surface.draw_text(&TextRun::new(
            label,
            layout.text,
            data.font_size,
            label_color,
        ));

        self.progress.is_active(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_gui::{
        Clock, ControlMetrics, DrawCommand, DrawList, ManualClock, MonospaceMeasurer, Theme,
        WidgetKind, WidgetTree,
    };

    fn knob(surface: &DrawList) -> Rect {
        surface
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRoundedRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .last()
            .unwrap()
    }

    #[test]
    fn test_pressed_knob_stretches_toward_travel() {
        let mut tree = WidgetTree::new(ViewData::default());
        let root = tree.root();
        let id = tree
            .append_child(
                root,
                ViewData::new(WidgetKind::ToggleSwitch).with_bounds(0.0, 0.0, 200.0, 32.0),
            )
            .unwrap();
        let theme = Theme::dark();
        let metrics = ControlMetrics::default();
        let measurer = MonospaceMeasurer::default();
        let clock = ManualClock::new();
        let mut renderer = ToggleSwitchRenderer::new();

        let mut draw = |data: &ViewData, state: WidgetState| {
            let mut surface = DrawList::default();
            let mut frame = RenderFrame {
                surface: &mut surface,
                theme: &theme,
                metrics: &metrics,
                measurer: &measurer,
                now: clock.now(),
            };
            renderer.begin_frame();
            renderer.render(&mut frame, id, data, data.layout, &state);
            renderer.end_frame();
            surface
        };

        let rest = knob(&draw(tree.get(id).unwrap(), WidgetState::default()));
        let pressed_state = WidgetState {
            pressed: true,
            ..WidgetState::default()
        };
        let pressed = draw(tree.get(id).unwrap(), pressed_state);
        let pressed_knob = knob(&pressed);

        let t = metrics.toggle;
        assert!((pressed_knob.width() - (t.knob_hover_size + t.knob_press_stretch)).abs() < 1e-4);
        assert!(pressed_knob.center().x > rest.center().x);
        assert_eq!(pressed.texts().next().unwrap().text, "Off");

        tree.get_mut(id).unwrap().checked = true;
        draw(tree.get(id).unwrap(), pressed_state);
        clock.advance_secs(1.0);
        let on = draw(tree.get(id).unwrap(), pressed_state);
        let on_knob = knob(&on);
        let expected_center = t.track_width - t.track_height * 0.5 - t.knob_press_stretch * 0.5;
        assert!((on_knob.center().x - expected_center).abs() < 1e-4);
        assert_eq!(on.texts().next().unwrap().text, "On");
    }
}
