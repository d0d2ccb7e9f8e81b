//! Text measurement queries.
//!
//! Shaping belongs to the backend; the text box renderer and caret-scrolling
//! logic only need caret and selection rectangles, which this trait provides.

use crate::primitives::{Rect, Size};

/// A run of text to measure. Indices passed alongside are in chars.
#[derive(Debug, Clone, Copy)]
pub struct TextLayoutRequest<'a> {
    pub text: &'a str,
    pub font_size: f32,
    /// Wrap width, `None` for a single line
    pub wrap_width: Option<f32>,
}

impl<'a> TextLayoutRequest<'a> {
    pub fn single_line(text: &'a str, font_size: f32) -> Self {
        Self {
            text,
            font_size,
            wrap_width: None,
        }
    }
}

/// Backend-agnostic text metrics.
///
/// Rectangles are relative to the top-left of the laid out text.
pub trait TextMeasurer {
    fn measure(&self, request: &TextLayoutRequest<'_>) -> Size;

    /// Zero-width caret rectangle before the char at `index`
    fn caret_rect(&self, request: &TextLayoutRequest<'_>, index: usize) -> Rect;

    /// One rectangle per line covered by `start..end`
    fn selection_rects(&self, request: &TextLayoutRequest<'_>, start: usize, end: usize)
        -> Vec<Rect>;
}

/// Fixed-advance measurer for headless runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    /// Glyph advance as a fraction of the font size
    pub advance_ratio: f32,
    pub line_height_ratio: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.25,
        }
    }
}

impl MonospaceMeasurer {
    fn advance(&self, font_size: f32) -> f32 {
        font_size * self.advance_ratio
    }

    fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height_ratio
    }

    fn chars_per_line(&self, request: &TextLayoutRequest<'_>) -> usize {
        let advance = self.advance(request.font_size);
        match request.wrap_width {
            Some(width) if advance > 0.0 => ((width / advance).floor() as usize).max(1),
            _ => usize::MAX,
        }
    }

    /// (line, column) of a char index
    fn position(&self, request: &TextLayoutRequest<'_>, index: usize) -> (usize, usize) {
        let per_line = self.chars_per_line(request);
        let len = request.text.chars().count();
        let index = index.min(len);
        if per_line == usize::MAX {
            return (0, index);
        }
        // A caret at the end of a full line stays on that line.
        if index > 0 && index == len && index % per_line == 0 {
            return (index / per_line - 1, per_line);
        }
        (index / per_line, index % per_line)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, request: &TextLayoutRequest<'_>) -> Size {
        let len = request.text.chars().count();
        let per_line = self.chars_per_line(request);
        let (lines, widest) = if per_line == usize::MAX || len <= per_line {
            (1, len)
        } else {
            (len.div_ceil(per_line), per_line)
        };
        Size::new(
            widest as f32 * self.advance(request.font_size),
            lines as f32 * self.line_height(request.font_size),
        )
    }

    fn caret_rect(&self, request: &TextLayoutRequest<'_>, index: usize) -> Rect {
        let (line, column) = self.position(request, index);
        let x = column as f32 * self.advance(request.font_size);
        let line_height = self.line_height(request.font_size);
        let y = line as f32 * line_height;
        Rect::new([x, y], [x, y + line_height])
    }

    fn selection_rects(
        &self,
        request: &TextLayoutRequest<'_>,
        start: usize,
        end: usize,
    ) -> Vec<Rect> {
        let (start, end) = (start.min(end), start.max(end));
        if start == end {
            return Vec::new();
        }
        let (first_line, first_col) = self.position(request, start);
        let (last_line, last_col) = self.position(request, end);
        let advance = self.advance(request.font_size);
        let line_height = self.line_height(request.font_size);
        let per_line = self.chars_per_line(request);

        (first_line..=last_line)
            .map(|line| {
                let from = if line == first_line { first_col } else { 0 };
                let to = if line == last_line { last_col } else { per_line };
                let y = line as f32 * line_height;
                Rect::new(
                    [from as f32 * advance, y],
                    [to as f32 * advance, y + line_height],
                )
            })
            .filter(|r| r.width() > 0.0)
            .collect()
    }
}
