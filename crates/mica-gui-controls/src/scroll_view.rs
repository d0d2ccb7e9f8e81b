//! Scroll view renderer
//!
//! The background is drawn with the rest of the content. Thumbs are queued
//! and drawn by [`ScrollViewRenderer::render_overlays`] after every widget,
//! so scrolled children never cover them.

use crate::frame::RenderFrame;
use mica_gui::{
    scroll_layout_for, Color, DragMode, DrawSurface, HitRegion, Rect, ViewData, WidgetState,
};

#[derive(Debug, Default)]
pub struct ScrollViewRenderer {
    pending_thumbs: Vec<(Rect, Color)>,
}

impl ScrollViewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.pending_thumbs.clear();
    }

    /// Thumbs waiting for the overlay pass
    pub fn pending(&self) -> usize {
        self.pending_thumbs.len()
    }

    /// Scroll views never animate; thumb tones switch instantly.
    pub fn render(
        &mut self,
        frame: &mut RenderFrame<'_>,
        data: &ViewData,
        bounds: Rect,
        state: &WidgetState,
    ) -> bool {
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

        let layout = scroll_layout_for(data, bounds, &frame.metrics.scroll);
        let axes = [
            (
                layout.vertical,
                HitRegion::VerticalScrollBar,
                DragMode::VerticalScrollBar,
            ),
            (
                layout.horizontal,
                HitRegion::HorizontalScrollBar,
                DragMode::HorizontalScrollBar,
            ),
        ];
        for (axis, region, drag) in axes {
            if !axis.visible || axis.thumb.is_empty() {
                continue;
            }
            let hot = (state.hovered && state.hover_region == region) || state.drag == drag;
            let color = if hot {
                palette.scrollbar_thumb_hover
            } else {
                palette.scrollbar_thumb
            };
            self.pending_thumbs.push((axis.thumb, color));
        }

        false
    }

    /// Draw the queued thumbs as pills.
    pub fn render_overlays(&mut self, surface: &mut dyn DrawSurface) {
        for (thumb, color) in self.pending_thumbs.drain(..) {
            let radius = thumb.width().min(thumb.height()) * 0.5;
            surface.fill_rounded_rect(thumb, radius, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_gui::{
        Clock, ControlMetrics, DrawCommand, DrawList, ManualClock, MonospaceMeasurer,
        ScrollBarVisibility, Size, Theme, WidgetKind,
    };

    fn scroll_view() -> ViewData {
        ViewData::new(WidgetKind::ScrollView)
            .with_bounds(0.0, 0.0, 200.0, 200.0)
            .with_content_size(Size::new(100.0, 500.0))
            .with_background(Color::from_rgb_hex(0x202020))
    }

    fn draw(data: &ViewData, state: WidgetState) -> (DrawList, Theme) {
        let theme = Theme::dark();
        let metrics = ControlMetrics::default();
        let measurer = MonospaceMeasurer::default();
        let clock = ManualClock::new();
        let mut renderer = ScrollViewRenderer::new();
        let mut surface = DrawList::default();
        {
            let mut frame = RenderFrame {
                surface: &mut surface,
                theme: &theme,
                metrics: &metrics,
                measurer: &measurer,
                now: clock.now(),
            };
            renderer.begin_frame();
            renderer.render(&mut frame, data, data.layout, &state);
        }
        assert_eq!(renderer.pending(), 1);
        surface.push_clip(data.layout, 0.0);
        surface.pop_clip();
        renderer.render_overlays(&mut surface);
        assert_eq!(renderer.pending(), 0);
        (surface, theme)
    }

    fn thumb_color(surface: &DrawList) -> Color {
        surface
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRoundedRect { color, .. } => Some(*color),
                _ => None,
            })
            .last()
            .unwrap()
    }

    #[test]
    fn test_thumbs_drawn_after_content() {
        let (surface, theme) = draw(&scroll_view(), WidgetState::default());
        let commands = surface.commands();
        assert!(matches!(commands.last(), Some(DrawCommand::FillRoundedRect { .. })));
        assert!(matches!(commands[commands.len() - 2], DrawCommand::PopClip));
        assert_eq!(thumb_color(&surface), theme.palette().scrollbar_thumb);
    }

    #[test]
    fn test_thumb_hover_tone_follows_region_and_drag() {
        let hovered_content = WidgetState {
            hovered: true,
            ..WidgetState::default()
        };
        let (surface, theme) = draw(&scroll_view(), hovered_content);
        assert_eq!(thumb_color(&surface), theme.palette().scrollbar_thumb);

        let hovered_bar = WidgetState {
            hovered: true,
            hover_region: HitRegion::VerticalScrollBar,
            ..WidgetState::default()
        };
        let (surface, theme) = draw(&scroll_view(), hovered_bar);
        assert_eq!(thumb_color(&surface), theme.palette().scrollbar_thumb_hover);

        let dragging = WidgetState {
            drag: DragMode::VerticalScrollBar,
            ..WidgetState::default()
        };
        let (surface, theme) = draw(&scroll_view(), dragging);
        assert_eq!(thumb_color(&surface), theme.palette().scrollbar_thumb_hover);
    }

    #[test]
    fn test_hidden_policy_queues_no_thumb() {
        let data = scroll_view().with_v_scrollbar(ScrollBarVisibility::Hidden);
        let theme = Theme::dark();
        let metrics = ControlMetrics::default();
        let measurer = MonospaceMeasurer::default();
        let mut renderer = ScrollViewRenderer::new();
        let mut surface = DrawList::default();
        let mut frame = RenderFrame {
            surface: &mut surface,
            theme: &theme,
            metrics: &metrics,
            measurer: &measurer,
            now: ManualClock::new().now(),
        };
        renderer.begin_frame();
        renderer.render(&mut frame, &data, data.layout, &WidgetState::default());
        assert_eq!(renderer.pending(), 0);
    }
}
