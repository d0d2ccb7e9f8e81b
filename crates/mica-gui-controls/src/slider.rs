//! Slider renderer
//!
//! Uses the same [`slider_layout`] as hit-testing, so the drawn thumb is
//! always where a press will find it.

use crate::anim::AnimationStore;
use crate::frame::RenderFrame;
use crate::palette::{KindPalette, VisualState};
use mica_gui::{slider_layout, Color, DragMode, Rect, ViewData, WidgetId, WidgetState};

#[derive(Debug, Default)]
pub struct SliderRenderer {
    thumb_scale: AnimationStore<f32>,
    thumb_color: AnimationStore<Color>,
}

impl SliderRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.thumb_scale.begin_frame();
        self.thumb_color.begin_frame();
    }

    pub fn end_frame(&mut self) -> bool {
        let scale = self.thumb_scale.end_frame();
        let color = self.thumb_color.end_frame();
        scale || color
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
        let metrics = frame.metrics.slider;
        let timings = frame.metrics.timings;
        let layout = slider_layout(bounds, data.value, data.min, data.max, &metrics);

        let mut visual = VisualState::of(data, state);
        visual.pressed |= state.drag == DragMode::SliderThumb;

        let (track_color, fill_color) = if data.disabled {
            (palette.control_strong_stroke_disabled, palette.accent_fill_disabled)
        } else {
            (palette.slider_track, palette.accent_fill)
        };
        let track_color = if data.background.is_visible() {
            data.background
        } else {
            track_color
        };
        let pill = metrics.track_height * 0.5;
        frame.surface.fill_rounded_rect(layout.track, pill, track_color);
        if layout.fill.width() > 0.0 {
            frame.surface.fill_rounded_rect(layout.fill, pill, fill_color);
        }

        // Outer ring does not animate
        let hairline = frame.hairline();
        let r = metrics.thumb_radius;
        let center = layout.thumb_center;
        frame
            .surface
            .fill_ellipse(center, r, r, palette.slider_thumb_outer);
        frame.surface.stroke_ellipse(
            center,
            r - hairline * 0.5,
            r - hairline * 0.5,
            palette.control_stroke,
            hairline,
        );

        let scale_target = if visual.disabled {
            metrics.normal_scale
        } else if visual.pressed {
            metrics.pressed_scale
        } else if visual.hovered {
            metrics.hover_scale
        } else {
            metrics.normal_scale
        };
        let scale = self
            .thumb_scale
            .animate(id, scale_target, timings.slider_thumb, frame.now);
        let inner_target = KindPalette::slider_thumb(&palette).resolve(true, visual).fill;
        let inner_color = self
            .thumb_color
            .animate(id, inner_target, timings.color, frame.now);
        let inner = metrics.inner_thumb_radius * scale;
        frame.surface.fill_ellipse(center, inner, inner, inner_color);

        if state.focused && state.show_focus && !data.disabled {
            let ring = r + frame.metrics.button.focus_ring_offset;
            frame.surface.stroke_ellipse(
                center,
                ring,
                ring,
                palette.focus_stroke,
                frame.metrics.button.focus_ring_width,
            );
        }

        self.thumb_scale.is_active(id) || self.thumb_color.is_active(id)
    }
}
