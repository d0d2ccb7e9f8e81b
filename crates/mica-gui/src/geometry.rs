//! Sub-element geometry of the controls.
//!
//! Pure functions. The renderers and the hit-tester both call these with the
//! same [`ControlMetrics`](crate::ControlMetrics), which is what keeps a click on
//! a visible thumb landing on that thumb.

use crate::config::{CheckBoxMetrics, RadioMetrics, ScrollMetrics, SliderMetrics, ToggleMetrics};
use crate::primitives::{Point, Rect, Size};
use crate::tree::{ScrollBarVisibility, ViewData};

/// Clamp without panicking on inverted or NaN ranges.
fn clamp_between(value: f32, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    value.max(lo).min(hi)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderLayout {
    pub track: Rect,
    /// From the track start to the thumb center
    pub fill: Rect,
    pub thumb: Rect,
    pub thumb_center: Point,
    pub percent: f32,
}

/// Position of `value` in `[min, max]` as 0..=1. Zero-width ranges map to 0.
pub fn slider_percent(value: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range.abs() <= f32::EPSILON || !range.is_finite() {
        return 0.0;
    }
    let percent = (clamp_between(value, min, max) - min) / range;
    if percent.is_finite() {
        percent.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Track along the full width, vertically centered; the thumb travels inset by
/// its radius so it never leaves `bounds`.
pub fn slider_layout(
    bounds: Rect,
    value: f32,
    min: f32,
    max: f32,
    metrics: &SliderMetrics,
) -> SliderLayout {
    let percent = slider_percent(value, min, max);
    let r = metrics.thumb_radius;
    let center_y = bounds.center().y;
    let half_track = metrics.track_height * 0.5;

    let track = Rect::new(
        [bounds.min[0], center_y - half_track],
        [bounds.max[0], center_y + half_track],
    );
    let usable = (bounds.width() - 2.0 * r).max(0.0);
    let thumb_center = Point::new(bounds.min[0] + r + percent * usable, center_y);
    let fill = Rect::new(track.min, [thumb_center.x, track.max[1]]);
    let thumb = Rect::from_center(thumb_center, r, r);

    SliderLayout {
        track,
        fill,
        thumb,
        thumb_center,
        percent,
    }
}

/// Inverse of [`slider_layout`]: the value whose thumb center sits at `x`.
///
/// Clamped to the range and snapped to `step` when it is positive.
pub fn slider_value_at(
    bounds: Rect,
    x: f32,
    min: f32,
    max: f32,
    step: f32,
    metrics: &SliderMetrics,
) -> f32 {
    let r = metrics.thumb_radius;
    let usable = (bounds.width() - 2.0 * r).max(0.0);
    let percent = if usable > 0.0 {
        ((x - bounds.min[0] - r) / usable).clamp(0.0, 1.0)
    } else {
        0.0
    };
    snap_slider_value(min + percent * (max - min), min, max, step)
}

pub fn snap_slider_value(value: f32, min: f32, max: f32, step: f32) -> f32 {
    let mut value = value;
    if step > 0.0 {
        let steps = ((value - min) / step).round();
        value = min + steps * step;
    }
    clamp_between(value, min, max)
}

/// Thumb drag target: the thumb enlarged by the hit slop.
pub fn slider_thumb_hit(layout: &SliderLayout, point: Point, metrics: &SliderMetrics) -> bool {
    layout.thumb.inflate(metrics.thumb_hit_slop).contains(point)
}

/// A leading glyph (check box, radio dot) followed by a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphLayout {
    pub glyph: Rect,
    pub text: Rect,
}

fn glyph_layout(bounds: Rect, size: f32, gap: f32) -> GlyphLayout {
    let top = bounds.center().y - size * 0.5;
    let glyph = Rect::from_xywh(bounds.min[0], top, size, size);
    let text_x = glyph.max[0] + gap;
    let text = Rect::new(
        [text_x.min(bounds.max[0]), bounds.min[1]],
        [bounds.max[0], bounds.max[1]],
    );
    GlyphLayout { glyph, text }
}

pub fn checkbox_layout(bounds: Rect, metrics: &CheckBoxMetrics) -> GlyphLayout {
    glyph_layout(bounds, metrics.box_size, metrics.gap)
}

pub fn radio_layout(bounds: Rect, metrics: &RadioMetrics) -> GlyphLayout {
    glyph_layout(bounds, metrics.outer_size, metrics.gap)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleLayout {
    pub track: Rect,
    pub knob_center: Point,
    pub text: Rect,
}

/// Knob center travels `track_h / 2 + progress * (track_w - track_h)`.
pub fn toggle_layout(bounds: Rect, progress: f32, metrics: &ToggleMetrics) -> ToggleLayout {
    let track = Rect::from_xywh(
        bounds.min[0],
        bounds.center().y - metrics.track_height * 0.5,
        metrics.track_width,
        metrics.track_height,
    );
    let half = metrics.track_height * 0.5;
    let travel = (metrics.track_width - metrics.track_height).max(0.0);
    let knob_center = Point::new(
        track.min[0] + half + progress.clamp(0.0, 1.0) * travel,
        track.center().y,
    );
    let text_x = (track.max[0] + metrics.gap).min(bounds.max[0]);
    let text = Rect::new([text_x, bounds.min[1]], bounds.max);
    ToggleLayout {
        track,
        knob_center,
        text,
    }
}

/// One scrollbar axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollAxisLayout {
    pub visible: bool,
    /// Edge-aligned bar rectangle
    pub bar: Rect,
    /// `bar` inset by the track padding
    pub track: Rect,
    pub thumb: Rect,
    pub max_offset: f32,
    pub track_length: f32,
    pub thumb_length: f32,
    /// Effective viewport extent along this axis
    pub viewport: f32,
}

impl ScrollAxisLayout {
    /// Scroll offset per pixel of thumb travel
    pub fn drag_ratio(&self) -> f32 {
        let travel = self.track_length - self.thumb_length;
        if travel > 0.0 && self.max_offset > 0.0 {
            self.max_offset / travel
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollViewLayout {
    /// Bounds minus the visible bars
    pub viewport: Rect,
    pub vertical: ScrollAxisLayout,
    pub horizontal: ScrollAxisLayout,
}

#[derive(Clone, Copy)]
enum Axis {
    Vertical,
    Horizontal,
}

fn axis_layout(
    axis: Axis,
    bar: Rect,
    visible: bool,
    content: f32,
    viewport: f32,
    offset: f32,
    metrics: &ScrollMetrics,
) -> ScrollAxisLayout {
    let track = bar.inset(metrics.track_padding);
    let (track_start, track_length) = match axis {
        Axis::Vertical => (track.min[1], track.height()),
        Axis::Horizontal => (track.min[0], track.width()),
    };
    let track_length = track_length.max(0.0);

    let max_offset = (content - viewport).max(0.0);
    let ratio = if content > 0.0 {
        (viewport / content).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let thumb_length = (track_length * ratio)
        .max(metrics.min_thumb_length)
        .min(track_length);
    let thumb_start = if max_offset > 0.0 {
        track_start + (clamp_scroll_offset(offset, max_offset) / max_offset) * (track_length - thumb_length)
    } else {
        track_start
    };

    let thumb = match axis {
        Axis::Vertical => Rect::new(
            [track.min[0], thumb_start],
            [track.max[0], thumb_start + thumb_length],
        ),
        Axis::Horizontal => Rect::new(
            [thumb_start, track.min[1]],
            [thumb_start + thumb_length, track.max[1]],
        ),
    };

    ScrollAxisLayout {
        visible,
        bar,
        track,
        thumb,
        max_offset,
        track_length,
        thumb_length,
        viewport,
    }
}

/// Bars, tracks and thumbs of a scroll view.
///
/// With both bars shown the viewport loses one bar thickness on each axis and
/// the bars stop short of the shared corner. A single bar overlays the
/// content and leaves the viewport at full size.
pub fn scroll_view_layout(
    bounds: Rect,
    content: Size,
    offset: Point,
    show_vertical: bool,
    show_horizontal: bool,
    metrics: &ScrollMetrics,
) -> ScrollViewLayout {
    let t = metrics.bar_thickness;
    let corner = if show_vertical && show_horizontal { t } else { 0.0 };
    let viewport_w = (bounds.width() - corner).max(0.0);
    let viewport_h = (bounds.height() - corner).max(0.0);
    let viewport = Rect::from_min_size(bounds.min, [viewport_w, viewport_h]);

    let v_bar = Rect::new(
        [bounds.max[0] - t, bounds.min[1]],
        [bounds.max[0], bounds.min[1] + viewport_h],
    );
    let h_bar = Rect::new(
        [bounds.min[0], bounds.max[1] - t],
        [bounds.min[0] + viewport_w, bounds.max[1]],
    );

    ScrollViewLayout {
        viewport,
        vertical: axis_layout(
            Axis::Vertical,
            v_bar,
            show_vertical,
            content.height,
            viewport_h,
            offset.y,
            metrics,
        ),
        horizontal: axis_layout(
            Axis::Horizontal,
            h_bar,
            show_horizontal,
            content.width,
            viewport_w,
            offset.x,
            metrics,
        ),
    }
}

/// Whether a bar with this policy is shown for the given extents.
pub fn scrollbar_visible(
    policy: ScrollBarVisibility,
    content: f32,
    viewport: f32,
    metrics: &ScrollMetrics,
) -> bool {
    match policy {
        ScrollBarVisibility::Visible => true,
        ScrollBarVisibility::Hidden | ScrollBarVisibility::Disabled => false,
        ScrollBarVisibility::Auto => content - viewport > metrics.auto_epsilon,
    }
}

/// Resolve both bar policies of a scroll view and lay it out.
///
/// `Auto` policies compare content against the full bounds.
pub fn scroll_layout_for(data: &ViewData, bounds: Rect, metrics: &ScrollMetrics) -> ScrollViewLayout {
    let content = data.content_size;
    let show_v = scrollbar_visible(data.v_scrollbar, content.height, bounds.height(), metrics);
    let show_h = scrollbar_visible(data.h_scrollbar, content.width, bounds.width(), metrics);
    scroll_view_layout(bounds, content, data.scroll_offset(), show_v, show_h, metrics)
}

pub fn clamp_scroll_offset(offset: f32, max_offset: f32) -> f32 {
    offset.max(0.0).min(max_offset.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::WidgetKind;

    #[test]
    fn test_slider_zero_range_percent() {
        assert_eq!(slider_percent(5.0, 3.0, 3.0), 0.0);
        assert_eq!(slider_percent(50.0, 0.0, 100.0), 0.5);
        assert_eq!(slider_percent(500.0, 0.0, 100.0), 1.0);
    }

    #[test]
    fn test_slider_thumb_stays_inside_bounds() {
        let metrics = SliderMetrics::default();
        let bounds = Rect::from_xywh(0.0, 0.0, 200.0, 20.0);
        let start = slider_layout(bounds, 0.0, 0.0, 100.0, &metrics);
        let end = slider_layout(bounds, 100.0, 0.0, 100.0, &metrics);
        assert_eq!(start.thumb_center, Point::new(10.0, 10.0));
        assert_eq!(start.thumb.min[0], 0.0);
        assert_eq!(end.thumb.max[0], 200.0);
        assert_eq!(end.fill.max[0], 190.0);
        assert_eq!(start.track.height(), metrics.track_height);
    }

    #[test]
    fn test_slider_value_at_inverts_layout() {
        let metrics = SliderMetrics::default();
        let bounds = Rect::from_xywh(40.0, 0.0, 200.0, 20.0);
        for value in [0.0, 12.5, 50.0, 99.0] {
            let layout = slider_layout(bounds, value, 0.0, 100.0, &metrics);
            let back = slider_value_at(bounds, layout.thumb_center.x, 0.0, 100.0, 0.0, &metrics);
            assert!((back - value).abs() < 1e-3);
        }
    }

    #[test]
    fn test_slider_step_snapping_and_clamp() {
        let metrics = SliderMetrics::default();
        let bounds = Rect::from_xywh(0.0, 0.0, 200.0, 20.0);
        let v = slider_value_at(bounds, 100.0, 0.0, 100.0, 10.0, &metrics);
        assert_eq!(v, 50.0);
        assert_eq!(slider_value_at(bounds, 1000.0, 0.0, 100.0, 0.0, &metrics), 100.0);
        assert_eq!(snap_slider_value(97.0, 0.0, 100.0, 15.0), 90.0);
        assert_eq!(snap_slider_value(99.0, 0.0, 100.0, 15.0), 100.0);
    }

    #[test]
    fn test_checkbox_layout() {
        let layout = checkbox_layout(
            Rect::from_xywh(10.0, 0.0, 120.0, 32.0),
            &CheckBoxMetrics::default(),
        );
        assert_eq!(layout.glyph, Rect::from_xywh(10.0, 6.0, 20.0, 20.0));
        assert_eq!(layout.text.min[0], 38.0);
        assert_eq!(layout.text.max[0], 130.0);
    }

    #[test]
    fn test_toggle_knob_travel() {
        let metrics = ToggleMetrics::default();
        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 20.0);
        assert_eq!(toggle_layout(bounds, 0.0, &metrics).knob_center.x, 10.0);
        assert_eq!(toggle_layout(bounds, 1.0, &metrics).knob_center.x, 30.0);
    }

    #[test]
    fn test_scroll_thumb_length_and_position() {
        let metrics = ScrollMetrics::default();
        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 206.0);
        let layout = scroll_view_layout(
            bounds,
            Size::new(0.0, 412.0),
            Point::new(0.0, 206.0),
            true,
            false,
            &metrics,
        );
        let v = layout.vertical;
        assert_eq!(v.track_length, 200.0);
        assert_eq!(v.thumb_length, 100.0);
        assert_eq!(v.max_offset, 206.0);
        assert_eq!(v.thumb.max[1], v.track.max[1]);
        assert_eq!(layout.viewport.width(), 100.0);
    }

    #[test]
    fn test_scroll_thumb_respects_minimum_and_zero_content() {
        let metrics = ScrollMetrics::default();
        let bounds = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let long = scroll_view_layout(bounds, Size::new(0.0, 100_000.0), Point::zero(), true, false, &metrics);
        assert_eq!(long.vertical.thumb_length, metrics.min_thumb_length);

        let empty = scroll_view_layout(bounds, Size::zero(), Point::new(0.0, 30.0), true, false, &metrics);
        assert_eq!(empty.vertical.max_offset, 0.0);
        assert_eq!(empty.vertical.thumb.min[1], empty.vertical.track.min[1]);
        assert_eq!(empty.vertical.drag_ratio(), 0.0);
    }

    #[test]
    fn test_auto_visibility_uses_epsilon() {
        let metrics = ScrollMetrics::default();
        let mut data = ViewData::new(WidgetKind::ScrollView)
            .with_content_size(Size::new(200.0, 0.0))
            .with_h_scrollbar(ScrollBarVisibility::Auto);
        let bounds = Rect::from_xywh(0.0, 0.0, 200.0, 100.0);
        assert!(!scroll_layout_for(&data, bounds, &metrics).horizontal.visible);

        data.content_size.width = 200.0 + metrics.auto_epsilon * 2.0;
        assert!(scroll_layout_for(&data, bounds, &metrics).horizontal.visible);
    }

    #[test]
    fn test_single_bar_keeps_full_cross_axis() {
        let metrics = ScrollMetrics::default();
        let data = ViewData::new(WidgetKind::ScrollView).with_content_size(Size::new(200.0, 500.0));
        let layout = scroll_layout_for(&data, Rect::from_xywh(0.0, 0.0, 200.0, 200.0), &metrics);
        assert!(layout.vertical.visible);
        assert!(!layout.horizontal.visible);
        assert_eq!(layout.viewport, Rect::from_xywh(0.0, 0.0, 200.0, 200.0));
        assert_eq!(layout.vertical.max_offset, 300.0);
        assert_eq!(layout.horizontal.max_offset, 0.0);
        assert_eq!(layout.vertical.bar.max[1], 200.0);
    }

    #[test]
    fn test_both_bars_shrink_viewport() {
        let metrics = ScrollMetrics::default();
        let t = metrics.bar_thickness;
        let data = ViewData::new(WidgetKind::ScrollView).with_content_size(Size::new(400.0, 500.0));
        let layout = scroll_layout_for(&data, Rect::from_xywh(0.0, 0.0, 200.0, 200.0), &metrics);
        assert!(layout.vertical.visible);
        assert!(layout.horizontal.visible);
        assert_eq!(layout.viewport.width(), 200.0 - t);
        assert_eq!(layout.viewport.height(), 200.0 - t);
        assert_eq!(layout.vertical.max_offset, 500.0 - (200.0 - t));
        assert_eq!(layout.horizontal.bar.max[0], 200.0 - t);
    }

    #[test]
    fn test_policies() {
        let m = ScrollMetrics::default();
        assert!(scrollbar_visible(ScrollBarVisibility::Visible, 0.0, 100.0, &m));
        assert!(!scrollbar_visible(ScrollBarVisibility::Hidden, 500.0, 100.0, &m));
        assert!(!scrollbar_visible(ScrollBarVisibility::Disabled, 500.0, 100.0, &m));
    }
}
