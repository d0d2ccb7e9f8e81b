//! Radio button renderer

use crate::anim::AnimationStore;
use crate::frame::RenderFrame;
use crate::palette::{KindPalette, VisualState};
use mica_gui::{
    ease_out_cubic, radio_layout, Color, Rect, TextRun, Transition, ViewData, WidgetId,
    WidgetState,
};

#[derive(Debug, Default)]
pub struct RadioRenderer {
    progress: AnimationStore<f32>,
    glyph_size: AnimationStore<f32>,
    fill: AnimationStore<Color>,
}

impl RadioRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.progress.begin_frame();
        self.glyph_size.begin_frame();
        self.fill.begin_frame();
    }

    pub fn end_frame(&mut self) -> bool {
        let progress = self.progress.end_frame();
        let glyph = self.glyph_size.end_frame();
        let fill = self.fill.end_frame();
        progress || glyph || fill
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
        let metrics = frame.metrics.radio;
        let timings = frame.metrics.timings;
        let visual = VisualState::of(data, state);
        let colors = KindPalette::radio(&palette)
            .resolve(data.checked, visual)
            .with_overrides(data);

        let progress = self.progress.animate_with(
            id,
            if data.checked { 1.0 } else { 0.0 },
            Transition::new(timings.check, ease_out_cubic),
            frame.now,
        );
        let size_target = if visual.disabled {
            metrics.glyph_size
        } else if visual.pressed {
            metrics.glyph_pressed_size
        } else if visual.hovered {
            metrics.glyph_hover_size
        } else {
            metrics.glyph_size
        };
        let glyph_size = self
            .glyph_size
            .animate(id, size_target, timings.press, frame.now);
        let fill = self.fill.animate(id, colors.fill, timings.color, frame.now);

        let layout = radio_layout(bounds, &metrics);
        let center = layout.glyph.center();
        let outer = metrics.outer_size * 0.5;
        let hairline = frame.hairline();

        frame.surface.fill_ellipse(center, outer, outer, fill);
        if colors.stroke.is_visible() {
            let r = outer - hairline * 0.5;
            frame
                .surface
                .stroke_ellipse(center, r, r, colors.stroke, hairline);
        }

        if progress > 0.001 {
            let dot = if data.disabled {
                palette.text_on_accent_disabled
            } else {
                palette.text_on_accent
            };
            let r = glyph_size * 0.5 * progress;
            frame
                .surface
                .fill_ellipse(center, r, r, dot.scale_alpha(progress));
        } else if visual.pressed && !visual.disabled {
            // Transient dot while an unchecked radio is held down
            let r = metrics.press_glyph_size * 0.5;
            frame.surface.fill_ellipse(center, r, r, colors.stroke);
        }

        if !data.text.is_empty() {
            frame.surface.draw_text(&TextRun::new(
                data.text.clone(),
                layout.text,
                data.font_size,
                colors.text,
            ));
        }

        self.progress.is_active(id) || self.glyph_size.is_active(id) || self.fill.is_active(id)
    }
}
