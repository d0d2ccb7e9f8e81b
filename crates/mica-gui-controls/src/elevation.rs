//! Fluent elevation border: a 1px stroke whose color shifts over the last few
//! pixels of one edge.

use mica_gui::{Color, DrawSurface, GradientBrush, GradientStop, Point, Rect};

const MAX_CACHED_BRUSHES: usize = 8;

/// Gradient brushes keyed by their two stop colors.
///
/// Geometry is passed at stroke time, so widgets with matching colors share a
/// brush. Cleared when the theme changes.
#[derive(Debug, Default)]
pub struct ElevationBrushCache {
    entries: Vec<(Color, Color, GradientBrush)>,
}

impl ElevationBrushCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached brush for `(lit, shaded)`, created on a miss. `None` when the
    /// surface cannot create it.
    pub fn get_or_create(
        &mut self,
        surface: &mut dyn DrawSurface,
        lit: Color,
        shaded: Color,
    ) -> Option<GradientBrush> {
        if let Some((_, _, brush)) = self
            .entries
            .iter()
            .find(|(a, b, _)| *a == lit && *b == shaded)
        {
            return Some(brush.clone());
        }

        let brush = surface.create_linear_gradient(&[
            GradientStop {
                offset: 0.0,
                color: lit,
            },
            GradientStop {
                offset: 1.0,
                color: shaded,
            },
        ])?;

        if self.entries.len() >= MAX_CACHED_BRUSHES {
            self.entries.remove(0);
        }
        self.entries.push((lit, shaded, brush.clone()));
        Some(brush)
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("dropping {} cached elevation brushes", self.entries.len());
        }
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How an elevation border is stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationStroke {
    /// Color away from the weighted edge
    pub lit: Color,
    /// Color on the weighted edge
    pub shaded: Color,
    /// Weight the top edge instead of the bottom one
    pub flip: bool,
    /// Gradient extent in DIPs from the weighted edge
    pub edge: f32,
    pub width: f32,
}

/// Stroke `rect` with an elevation gradient. Returns false when the brush
/// could not be created and nothing was drawn.
pub fn draw_elevation_border(
    surface: &mut dyn DrawSurface,
    cache: &mut ElevationBrushCache,
    rect: Rect,
    radius: f32,
    stroke: ElevationStroke,
) -> bool {
    let Some(brush) = cache.get_or_create(surface, stroke.lit, stroke.shaded) else {
        log::trace!("elevation brush unavailable, skipping border");
        return false;
    };

    let x = rect.center().x;
    let edge = stroke.edge.min(rect.height()).max(0.0);
    let (start, end) = if stroke.flip {
        (
            Point::new(x, rect.min[1] + edge),
            Point::new(x, rect.min[1]),
        )
    } else {
        (
            Point::new(x, rect.max[1] - edge),
            Point::new(x, rect.max[1]),
        )
    };

    let half = stroke.width * 0.5;
    surface.stroke_rounded_rect_gradient(
        rect.inset(half),
        (radius - half).max(0.0),
        &brush,
        start,
        end,
        stroke.width,
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_gui::{DrawCommand, DrawList};

    fn stroke(flip: bool) -> ElevationStroke {
        ElevationStroke {
            lit: Color::white(),
            shaded: Color::black(),
            flip,
            edge: 3.0,
            width: 1.0,
        }
    }

    #[test]
    fn test_brush_reused_for_same_colors() {
        let mut surface = DrawList::default();
        let mut cache = ElevationBrushCache::new();
        let rect = Rect::from_xywh(0.0, 0.0, 100.0, 32.0);
        for _ in 0..3 {
            assert!(draw_elevation_border(&mut surface, &mut cache, rect, 4.0, stroke(false)));
        }
        assert_eq!(surface.brushes_created(), 1);
        assert_eq!(surface.gradient_strokes(), 3);

        cache.clear();
        draw_elevation_border(&mut surface, &mut cache, rect, 4.0, stroke(false));
        assert_eq!(surface.brushes_created(), 2);
    }

    #[test]
    fn test_flip_weights_top_edge() {
        let mut surface = DrawList::default();
        let mut cache = ElevationBrushCache::new();
        let rect = Rect::from_xywh(0.0, 10.0, 100.0, 32.0);
        draw_elevation_border(&mut surface, &mut cache, rect, 4.0, stroke(true));
        match &surface.commands()[0] {
            DrawCommand::GradientStroke { start, end, .. } => {
                assert_eq!(start.y, 13.0);
                assert_eq!(end.y, 10.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_failed_brush_skips_draw() {
        let mut surface = DrawList::default().with_resource_failures();
        let mut cache = ElevationBrushCache::new();
        let rect = Rect::from_xywh(0.0, 0.0, 100.0, 32.0);
        assert!(!draw_elevation_border(&mut surface, &mut cache, rect, 4.0, stroke(false)));
        assert!(surface.commands().is_empty());
        assert!(cache.is_empty());
    }
}
