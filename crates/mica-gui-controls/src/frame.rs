use mica_gui::{ControlMetrics, DrawSurface, Palette, TextMeasurer, Theme};
use std::time::Instant;

/// Everything a control renderer needs for one frame.
///
/// `now` is sampled once per frame so every transition in the frame sees the
/// same time.
pub struct RenderFrame<'a> {
    pub surface: &'a mut dyn DrawSurface,
    pub theme: &'a Theme,
    pub metrics: &'a ControlMetrics,
    pub measurer: &'a dyn TextMeasurer,
    pub now: Instant,
}

impl RenderFrame<'_> {
    pub fn palette(&self) -> &Palette {
        self.theme.palette()
    }

    /// Physical pixels per DIP, never zero
    pub fn scale(&self) -> f32 {
        let scale = self.surface.scale_factor();
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        }
    }

    /// One physical pixel in DIPs
    pub fn hairline(&self) -> f32 {
        1.0 / self.scale()
    }
}
