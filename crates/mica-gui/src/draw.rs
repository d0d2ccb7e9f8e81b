//! Abstract 2D drawing surface.
//!
//! Control renderers talk to a [`DrawSurface`]; the graphics backend behind it
//! (device, swap chain, compositor) lives outside this crate. [`DrawList`] is a
//! recording implementation used by tests and headless runs.

use crate::color::Color;
use crate::primitives::{Point, Rect};

/// Horizontal text alignment inside a text rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment inside a text rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// A single run of text to be shaped and drawn by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub rect: Rect,
    pub font_size: f32,
    pub color: Color,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
}

impl TextRun {
    pub fn new(text: impl Into<String>, rect: Rect, font_size: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            rect,
            font_size,
            color,
            h_align: HorizontalAlign::Left,
            v_align: VerticalAlign::Center,
        }
    }

    pub fn centered(mut self) -> Self {
        self.h_align = HorizontalAlign::Center;
        self.v_align = VerticalAlign::Center;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

/// Backend-owned linear gradient resource.
///
/// Geometry is supplied at stroke time, so one brush can be reused for any
/// widget whose stops match.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientBrush {
    pub id: u64,
    pub stops: Vec<GradientStop>,
}

/// Hardware-accelerated 2D surface the control renderers paint onto.
///
/// Resource creation may fail; callers skip the dependent draw when it does.
pub trait DrawSurface {
    /// Physical pixels per DIP
    fn scale_factor(&self) -> f32;

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, width: f32);

    fn fill_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32, color: Color);

    fn stroke_ellipse(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        color: Color,
        width: f32,
    );

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);

    fn draw_polyline(&mut self, points: &[Point], color: Color, width: f32);

    fn draw_text(&mut self, run: &TextRun);

    fn create_linear_gradient(&mut self, stops: &[GradientStop]) -> Option<GradientBrush>;

    /// Stroke a rounded rect with a gradient running from `start` to `end`.
    fn stroke_rounded_rect_gradient(
        &mut self,
        rect: Rect,
        radius: f32,
        brush: &GradientBrush,
        start: Point,
        end: Point,
        width: f32,
    );

    /// Clip subsequent drawing to a rounded rect until the matching `pop_clip`.
    fn push_clip(&mut self, rect: Rect, radius: f32);

    fn pop_clip(&mut self);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRoundedRect {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    StrokeRoundedRect {
        rect: Rect,
        radius: f32,
        color: Color,
        width: f32,
    },
    FillEllipse {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        color: Color,
    },
    StrokeEllipse {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        color: Color,
        width: f32,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
    Polyline {
        points: Vec<Point>,
        color: Color,
        width: f32,
    },
    Text(TextRun),
    GradientStroke {
        rect: Rect,
        radius: f32,
        brush_id: u64,
        start: Point,
        end: Point,
        width: f32,
    },
    PushClip {
        rect: Rect,
        radius: f32,
    },
    PopClip,
}

/// Recording [`DrawSurface`].
#[derive(Debug, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    scale_factor: f32,
    fail_resources: bool,
    brushes_created: usize,
    next_brush_id: u64,
    clip_depth: usize,
}

impl DrawList {
    pub fn new(scale_factor: f32) -> Self {
        Self {
            commands: Vec::new(),
            scale_factor,
            fail_resources: false,
            brushes_created: 0,
            next_brush_id: 1,
            clip_depth: 0,
        }
    }

    /// Make every resource creation fail, as a lost device would.
    pub fn with_resource_failures(mut self) -> Self {
        self.fail_resources = true;
        self
    }

    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_depth = 0;
    }

    /// Number of gradient brushes successfully created so far
    pub fn brushes_created(&self) -> usize {
        self.brushes_created
    }

    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn gradient_strokes(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::GradientStroke { .. }))
            .count()
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl DrawSurface for DrawList {
    fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillRoundedRect {
            rect,
            radius,
            color,
        });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeRoundedRect {
            rect,
            radius,
            color,
            width,
        });
    }

    fn fill_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32, color: Color) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            radius_x,
            radius_y,
            color,
        });
    }

    fn stroke_ellipse(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        color: Color,
        width: f32,
    ) {
        self.commands.push(DrawCommand::StrokeEllipse {
            center,
            radius_x,
            radius_y,
            color,
            width,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn draw_polyline(&mut self, points: &[Point], color: Color, width: f32) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.commands.push(DrawCommand::Text(run.clone()));
    }

    fn create_linear_gradient(&mut self, stops: &[GradientStop]) -> Option<GradientBrush> {
        if self.fail_resources || stops.is_empty() {
            return None;
        }
        let id = self.next_brush_id;
        self.next_brush_id += 1;
        self.brushes_created += 1;
        Some(GradientBrush {
            id,
            stops: stops.to_vec(),
        })
    }

    fn stroke_rounded_rect_gradient(
        &mut self,
        rect: Rect,
        radius: f32,
        brush: &GradientBrush,
        start: Point,
        end: Point,
        width: f32,
    ) {
        self.commands.push(DrawCommand::GradientStroke {
            rect,
            radius,
            brush_id: brush.id,
            start,
            end,
            width,
        });
    }

    fn push_clip(&mut self, rect: Rect, radius: f32) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip { rect, radius });
    }

    fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            log::warn!("pop_clip without a matching push_clip");
            return;
        }
        self.clip_depth -= 1;
        self.commands.push(DrawCommand::PopClip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_resources_return_none() {
        let mut list = DrawList::new(1.0).with_resource_failures();
        let stops = [GradientStop {
            offset: 0.0,
            color: Color::white(),
        }];
        assert!(list.create_linear_gradient(&stops).is_none());
        assert_eq!(list.brushes_created(), 0);
    }

    #[test]
    fn test_brush_ids_are_unique() {
        let mut list = DrawList::default();
        let stops = [GradientStop {
            offset: 0.0,
            color: Color::white(),
        }];
        let first = list.create_linear_gradient(&stops).map(|brush| brush.id);
        let second = list.create_linear_gradient(&stops).map(|brush| brush.id);
        assert_ne!(first, second);
        assert_eq!(list.brushes_created(), 2);
    }

    #[test]
    fn test_unbalanced_pop_is_ignored() {
        let mut list = DrawList::default();
        list.pop_clip();
        assert!(list.commands().is_empty());
        list.push_clip(Rect::from_xywh(0.0, 0.0, 1.0, 1.0), 0.0);
        list.pop_clip();
        assert_eq!(list.clip_depth(), 0);
        assert_eq!(list.commands().len(), 2);
    }
}
