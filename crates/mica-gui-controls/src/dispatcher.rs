//! Frame-level entry point for drawing controls.
//!
//! [`ControlRenderer`] owns one renderer per widget kind and routes every
//! widget to the right one. A frame looks like:
//!
//! ```text
//! begin_frame(theme, interaction)
//! render(..) for every widget, parents before children
//! render_overlays(..)
//! end_frame(..) -> FrameOutcome
//! ```
//!
//! [`ControlRenderer::render_tree`] runs the whole sequence for a
//! [`WidgetTree`].

use crate::button::ButtonRenderer;
use crate::check_box::CheckBoxRenderer;
use crate::frame::RenderFrame;
use crate::label::LabelRenderer;
use crate::plugin::{CustomRenderer, PluginRegistry};
use crate::radio::RadioRenderer;
use crate::scroll_view::ScrollViewRenderer;
use crate::slider::SliderRenderer;
use crate::text_box::TextBoxRenderer;
use crate::toggle_switch::ToggleSwitchRenderer;
use mica_gui::{
    scroll_layout_for, Clock, Color, ControlMetrics, DrawSurface, HitRegion, Interaction, Point,
    Rect, SystemClock, TextMeasurer, Theme, ThemeMode, Transition, TransitionState, ViewData,
    WidgetId, WidgetKind, WidgetTree,
};
use std::time::Instant;

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// A transition is in flight; draw the next frame as soon as possible.
    pub animating: bool,
    /// Something changed on screen this frame without animating (caret blink).
    pub needs_redraw: bool,
    /// Earliest time a redraw is needed even without input
    pub next_wakeup: Option<Instant>,
}

/// Translucent highlight following the hovered clickable widget
#[derive(Debug)]
struct HoverOverlay {
    opacity: TransitionState<f32>,
    bounds: Rect,
    radius: f32,
    candidate: Option<(Rect, f32)>,
}

impl Default for HoverOverlay {
    fn default() -> Self {
        Self {
            opacity: TransitionState::new(0.0),
            bounds: Rect::default(),
            radius: 0.0,
            candidate: None,
        }
    }
}

pub struct ControlRenderer {
    clock: Box<dyn Clock>,
    metrics: ControlMetrics,
    measurer: Box<dyn TextMeasurer>,
    theme: Theme,
    theme_key: Option<(u64, ThemeMode, Color)>,
    interaction: Interaction,
    now: Instant,

    buttons: ButtonRenderer,
    check_boxes: CheckBoxRenderer,
    radios: RadioRenderer,
    sliders: SliderRenderer,
    toggles: ToggleSwitchRenderer,
    text_boxes: TextBoxRenderer,
    scroll_views: ScrollViewRenderer,
    labels: LabelRenderer,
    plugins: PluginRegistry,
    hover: HoverOverlay,
}

impl ControlRenderer {
    /// `metrics` must be the same values the [`EventDispatcher`](mica_gui::EventDispatcher)
    /// uses, so drawn geometry matches hit targets.
    pub fn new(metrics: ControlMetrics, measurer: impl TextMeasurer + 'static) -> Self {
        let clock: Box<dyn Clock> = Box::new(SystemClock);
        let now = clock.now();
        Self {
            clock,
            metrics,
            measurer: Box::new(measurer),
            theme: Theme::default(),
            theme_key: None,
            interaction: Interaction::default(),
            now,
            buttons: ButtonRenderer::new(),
            check_boxes: CheckBoxRenderer::new(),
            radios: RadioRenderer::new(),
            sliders: SliderRenderer::new(),
            toggles: ToggleSwitchRenderer::new(),
            text_boxes: TextBoxRenderer::new(),
            scroll_views: ScrollViewRenderer::new(),
            labels: LabelRenderer::new(),
            plugins: PluginRegistry::new(),
            hover: HoverOverlay::default(),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self.now = self.clock.now();
        self
    }

    pub fn register_plugin(&mut self, key: impl Into<String>, renderer: Box<dyn CustomRenderer>) {
        self.plugins.register(key, renderer);
    }

    pub fn metrics(&self) -> &ControlMetrics {
        &self.metrics
    }

    /// Time sampled by the last `begin_frame`
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Horizontal text scroll of a text box
    pub fn text_scroll(&self, id: WidgetId) -> f32 {
        self.text_boxes.text_scroll(id)
    }

    pub fn begin_frame(&mut self, theme: &Theme, interaction: &Interaction) {
        self.now = self.clock.now();

        let key = (theme.version(), theme.mode(), theme.accent());
        if self.theme_key != Some(key) {
            if self.theme_key.is_some() {
                log::debug!(
                    "theme changed (version {}, {:?}), dropping cached brushes",
                    key.0,
                    key.1
                );
            }
            self.buttons.clear_resources();
            self.text_boxes.clear_resources();
            self.theme = theme.clone();
            self.theme_key = Some(key);
        }

        self.interaction = *interaction;
        self.hover.candidate = None;

        self.buttons.begin_frame();
        self.check_boxes.begin_frame();
        self.radios.begin_frame();
        self.sliders.begin_frame();
        self.toggles.begin_frame();
        self.text_boxes.begin_frame();
        self.scroll_views.begin_frame();
        self.plugins.begin_frame();
    }

    /// Draw one widget at absolute `bounds`. Returns whether it is animating.
    pub fn render(
        &mut self,
        surface: &mut dyn DrawSurface,
        id: WidgetId,
        data: &ViewData,
        bounds: Rect,
    ) -> bool {
        let state = self.interaction.state_of(id);

        // Later candidates are drawn above earlier ones, so the last wins.
        if state.hovered
            && state.hover_region == HitRegion::Content
            && data.kind.is_clickable()
            && !data.disabled
        {
            self.hover.candidate = Some((bounds, data.corner_radius));
        }

        let mut frame = RenderFrame {
            surface,
            theme: &self.theme,
            metrics: &self.metrics,
            measurer: self.measurer.as_ref(),
            now: self.now,
        };

        match &data.kind {
            WidgetKind::Container | WidgetKind::Label => self.labels.render(&mut frame, data, bounds),
            WidgetKind::Button | WidgetKind::ToggleButton => {
                self.buttons.render(&mut frame, id, data, bounds, &state)
            }
            WidgetKind::CheckBox => self.check_boxes.render(&mut frame, id, data, bounds, &state),
            WidgetKind::RadioButton => self.radios.render(&mut frame, id, data, bounds, &state),
            WidgetKind::Slider => self.sliders.render(&mut frame, id, data, bounds, &state),
            WidgetKind::ToggleSwitch => self.toggles.render(&mut frame, id, data, bounds, &state),
            WidgetKind::TextBox => self.text_boxes.render(&mut frame, id, data, bounds, &state),
            WidgetKind::ScrollView => self.scroll_views.render(&mut frame, data, bounds, &state),
            WidgetKind::Custom(key) => self
                .plugins
                .render(key, &mut frame, id, data, bounds, &state)
                .unwrap_or(false),
        }
    }

    /// Draw everything that belongs above the content (scrollbar thumbs).
    pub fn render_overlays(&mut self, surface: &mut dyn DrawSurface) {
        self.scroll_views.render_overlays(surface);
    }

    /// Finish the frame: sweep state of widgets that were not drawn and draw
    /// the hover overlay.
    pub fn end_frame(&mut self, surface: &mut dyn DrawSurface) -> FrameOutcome {
        let buttons = self.buttons.end_frame();
        let check_boxes = self.check_boxes.end_frame();
        let radios = self.radios.end_frame();
        let sliders = self.sliders.end_frame();
        let toggles = self.toggles.end_frame();
        let text_boxes = self.text_boxes.end_frame();
        let plugins = self.plugins.end_frame();
        let hover = self.draw_hover_overlay(surface);

        let animating =
            buttons || check_boxes || radios || sliders || toggles || text_boxes || plugins || hover;
        if animating {
            log::trace!("frame still animating");
        }

        FrameOutcome {
            animating,
            needs_redraw: animating || self.text_boxes.needs_redraw(),
            next_wakeup: self.text_boxes.next_deadline(),
        }
    }

    fn draw_hover_overlay(&mut self, surface: &mut dyn DrawSurface) -> bool {
        let transition = Transition::linear(self.metrics.timings.hover_overlay);
        let overlay = &mut self.hover;
        if !overlay.opacity.is_initialized() {
            overlay.opacity.update(0.0, transition, self.now);
        }

        let target = match overlay.candidate {
            Some((bounds, radius)) => {
                overlay.bounds = bounds;
                overlay.radius = radius;
                1.0
            }
            None => 0.0,
        };
        let (opacity, active) = overlay.opacity.update(target, transition, self.now);

        if opacity > 0.001 && !overlay.bounds.is_empty() {
            let color = self.theme.palette().hover_overlay.scale_alpha(opacity);
            surface.fill_rounded_rect(overlay.bounds, overlay.radius, color);
        }
        active
    }

    /// Run a whole frame over `tree`.
    ///
    /// Children are positioned against their parent's content origin. Scroll
    /// view content is shifted by the scroll offset and clipped to the
    /// viewport.
    pub fn render_tree(
        &mut self,
        surface: &mut dyn DrawSurface,
        tree: &WidgetTree,
        theme: &Theme,
        interaction: &Interaction,
    ) -> FrameOutcome {
        self.begin_frame(theme, interaction);
        self.render_subtree(surface, tree, tree.root(), Point::zero());
        self.render_overlays(surface);
        self.end_frame(surface)
    }

    fn render_subtree(
        &mut self,
        surface: &mut dyn DrawSurface,
        tree: &WidgetTree,
        id: WidgetId,
        origin: Point,
    ) {
        let Some(data) = tree.get(id) else {
            return;
        };
        let bounds = data.layout.translate(origin.x, origin.y);
        self.render(surface, id, data, bounds);

        let children = tree.children(id);
        if children.is_empty() {
            return;
        }

        if data.kind.is_scroll_container() {
            let viewport = scroll_layout_for(data, bounds, &self.metrics.scroll).viewport;
            let child_origin = bounds.min_point() - data.scroll_offset();
            surface.push_clip(viewport, data.corner_radius);
            for &child in children {
                self.render_subtree(surface, tree, child, child_origin);
            }
            surface.pop_clip();
        } else {
            let child_origin = bounds.min_point();
            for &child in children {
                self.render_subtree(surface, tree, child, child_origin);
            }
        }
    }
}

impl std::fmt::Debug for ControlRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlRenderer")
            .field("metrics", &self.metrics)
            .field("theme_key", &self.theme_key)
            .field("interaction", &self.interaction)
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}
