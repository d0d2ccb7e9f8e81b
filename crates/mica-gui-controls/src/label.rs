//! Label and container renderer: background, optional border, text.

use crate::frame::RenderFrame;
use mica_gui::{Rect, TextRun, ViewData};

#[derive(Debug, Default, Clone, Copy)]
pub struct LabelRenderer;

impl LabelRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut RenderFrame<'_>, data: &ViewData, bounds: Rect) -> bool {
        let palette = *frame.palette();

        if data.background.is_visible() {
            frame
                .surface
                .fill_rounded_rect(bounds, data.corner_radius, data.background);
        }
        if data.border_color.is_visible() && data.border_width > 0.0 {
            frame.surface.stroke_rounded_rect(
                bounds.inset(data.border_width * 0.5),
                data.corner_radius,
                data.border_color,
                data.border_width,
            );
        }

        if !data.text.is_empty() {
            let color = if data.foreground.is_visible() {
                data.foreground
            } else if data.disabled {
                palette.text_disabled
            } else {
                palette.text_primary
            };
            frame.surface.draw_text(&TextRun::new(
                data.text.clone(),
                bounds,
                data.font_size,
                color,
            ));
        }

        false
    }
}
