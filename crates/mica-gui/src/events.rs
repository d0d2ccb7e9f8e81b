//! Input and gesture dispatch.
//!
//! [`EventDispatcher`] turns pointer, wheel and keyboard input into widget
//! state changes: scrollbar and slider drags, touch panning, clicks with the
//! built-in toggle/radio flips, focus traversal and text editing. Widgets are
//! referenced by [`WidgetId`] only, and every id is checked against the tree
//! before use.

use crate::config::ControlMetrics;
use crate::geometry::{
    clamp_scroll_offset, scroll_layout_for, slider_layout, slider_thumb_hit, slider_value_at,
    snap_slider_value, ScrollAxisLayout, ScrollViewLayout,
};
use crate::hit_test::{hit_test, HitRegion};
use crate::input::{Key, Modifiers, MouseButton, NamedKey, PointerKind};
use crate::primitives::{Point, Rect};
use crate::tree::{Composition, ScrollBarVisibility, ViewData, WidgetId, WidgetKind, WidgetTree};

/// Active drag, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    None,
    VerticalScrollBar,
    HorizontalScrollBar,
    SliderThumb,
}

/// Notifications produced while handling input. Drain them with
/// [`EventDispatcher::drain_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    HoverChanged {
        previous: Option<WidgetId>,
        current: Option<WidgetId>,
    },
    FocusChanged {
        previous: Option<WidgetId>,
        current: Option<WidgetId>,
    },
    Clicked(WidgetId),
    ValueChanged {
        widget: WidgetId,
        value: f32,
    },
    TextChanged(WidgetId),
    /// Interaction was abandoned; repaint everything
    Invalidate,
}

/// Per-widget view of the interaction state, handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WidgetState {
    pub hovered: bool,
    pub pressed: bool,
    pub focused: bool,
    /// Focus rings are drawn only for keyboard-originated focus
    pub show_focus: bool,
    pub hover_region: HitRegion,
    pub drag: DragMode,
    /// Changes whenever the caret of the focused text box should restart blinking
    pub caret_epoch: u64,
}

/// Snapshot of the dispatcher state for one frame. Ids are validated against
/// the tree when the snapshot is taken.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Interaction {
    pub hovered: Option<WidgetId>,
    pub hover_region: HitRegion,
    pub pressed: Option<WidgetId>,
    pub focused: Option<WidgetId>,
    pub show_focus_visuals: bool,
    pub drag: DragMode,
    pub pointer: Option<Point>,
    pub caret_epoch: u64,
}

impl Interaction {
    pub fn state_of(&self, id: WidgetId) -> WidgetState {
        let hovered = self.hovered == Some(id);
        WidgetState {
            hovered,
            pressed: self.pressed == Some(id),
            focused: self.focused == Some(id),
            show_focus: self.show_focus_visuals,
            hover_region: if hovered {
                self.hover_region
            } else {
                HitRegion::Content
            },
            drag: if self.pressed == Some(id) {
                self.drag
            } else {
                DragMode::None
            },
            caret_epoch: self.caret_epoch,
        }
    }
}

/// Widget receiving subsequent pointer events until release
#[derive(Debug, Clone, Copy)]
struct Capture {
    widget: WidgetId,
    pointer: PointerKind,
    /// Pointer minus thumb center for slider thumb drags, zero otherwise
    grab_offset: f32,
    press_origin: Point,
    /// Touch capture moved to a scroll container
    panning: bool,
}

/// Stateful input handler shared by all widgets of one tree.
pub struct EventDispatcher {
    metrics: ControlMetrics,
    drag: DragMode,
    capture: Option<Capture>,
    hovered: Option<WidgetId>,
    hover_region: HitRegion,
    focused: Option<WidgetId>,
    show_focus_visuals: bool,
    last_pointer: Option<Point>,
    caret_epoch: u64,
    events: Vec<UiEvent>,
    redraw_requested: bool,
}

impl EventDispatcher {
    /// `metrics` must be the same value the renderer uses.
    pub fn new(metrics: ControlMetrics) -> Self {
        Self {
            metrics,
            drag: DragMode::None,
            capture: None,
            hovered: None,
            hover_region: HitRegion::Content,
            focused: None,
            show_focus_visuals: false,
            last_pointer: None,
            caret_epoch: 0,
            events: Vec::new(),
            redraw_requested: false,
        }
    }

    pub fn metrics(&self) -> &ControlMetrics {
        &self.metrics
    }

    pub fn drag_mode(&self) -> DragMode {
        self.drag
    }

    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Widget currently holding pointer capture
    pub fn pressed(&self) -> Option<WidgetId> {
        self.capture.map(|c| c.widget)
    }

    pub fn show_focus_visuals(&self) -> bool {
        self.show_focus_visuals
    }

    /// Snapshot for the renderer, with ids that no longer exist dropped.
    pub fn interaction(&self, tree: &WidgetTree) -> Interaction {
        let live = |id: Option<WidgetId>| id.filter(|&id| tree.contains(id));
        let pressed = live(self.pressed());
        Interaction {
            hovered: live(self.hovered),
            hover_region: self.hover_region,
            pressed,
            focused: live(self.focused),
            show_focus_visuals: self.show_focus_visuals,
            drag: if pressed.is_some() {
                self.drag
            } else {
                DragMode::None
            },
            pointer: self.last_pointer,
            caret_epoch: self.caret_epoch,
        }
    }

    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether anything changed since the last call
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    pub fn pointer_down(
        &mut self,
        tree: &mut WidgetTree,
        point: Point,
        button: MouseButton,
        kind: PointerKind,
    ) {
        self.last_pointer = Some(point);
        self.clear_focus_visuals();
        self.update_hover(tree, point);

        if button != MouseButton::Left {
            return;
        }

        // A second press without a release (lost pointer-up) starts over.
        self.capture = None;
        self.drag = DragMode::None;

        let Some(hit) = hit_test(tree, point, &self.metrics) else {
            self.set_focus(None);
            return;
        };
        let Some(data) = tree.get(hit.widget) else {
            return;
        };
        let disabled = data.disabled;
        let kind_tag = data.kind.clone();

        if hit.region.is_scrollbar() {
            if !disabled {
                self.press_scrollbar(tree, hit.widget, hit.bounds, hit.region, point, kind);
            }
            return;
        }

        if kind_tag == WidgetKind::Slider && !disabled {
            let layout = slider_layout(hit.bounds, data.value, data.min, data.max, &self.metrics.slider);
            if slider_thumb_hit(&layout, point, &self.metrics.slider) {
                self.drag = DragMode::SliderThumb;
                self.begin_capture(hit.widget, kind, point, point.x - layout.thumb_center.x);
                log::debug!("slider {:?}: thumb drag started", hit.widget);
            } else {
                let value = slider_value_at(
                    hit.bounds,
                    point.x,
                    data.min,
                    data.max,
                    data.step,
                    &self.metrics.slider,
                );
                self.set_slider_value(tree, hit.widget, value);
                self.begin_capture(hit.widget, kind, point, 0.0);
            }
        } else {
            self.begin_capture(hit.widget, kind, point, 0.0);
        }

        if kind_tag.is_focusable() && !disabled {
            self.set_focus(Some(hit.widget));
        } else {
            self.set_focus(None);
        }
        self.request_redraw();
    }

    pub fn pointer_move(&mut self, tree: &mut WidgetTree, point: Point, kind: PointerKind) {
        // Delta against the end of the previous event, before any early return.
        let previous = self.last_pointer.replace(point);
        let delta = previous.map(|p| point - p).unwrap_or_default();

        if kind == PointerKind::Mouse {
            self.clear_focus_visuals();
        }
        self.update_hover(tree, point);

        let Some(mut capture) = self.capture else {
            return;
        };
        if !tree.contains(capture.widget) {
            log::debug!("captured widget {:?} is gone, releasing", capture.widget);
            self.capture = None;
            self.drag = DragMode::None;
            return;
        }

        match self.drag {
            DragMode::VerticalScrollBar => {
                self.drag_scrollbar(tree, capture.widget, delta.y, HitRegion::VerticalScrollBar)
            }
            DragMode::HorizontalScrollBar => {
                self.drag_scrollbar(tree, capture.widget, delta.x, HitRegion::HorizontalScrollBar)
            }
            DragMode::SliderThumb => self.track_slider(tree, capture, point),
            DragMode::None => {
                let Some(kind) = tree
                    .get(capture.widget)
                    .filter(|d| !d.disabled)
                    .map(|d| d.kind.clone())
                else {
                    return;
                };
                match kind {
                    WidgetKind::Slider => self.track_slider(tree, capture, point),
                    WidgetKind::ScrollView => self.pan(tree, capture.widget, delta),
                    _ if capture.pointer == PointerKind::Touch => {
                        if point.distance(capture.press_origin) <= self.metrics.input.touch_slop {
                            return;
                        }
                        let scroller = tree
                            .ancestors(capture.widget)
                            .find(|&a| tree.get(a).is_some_and(|d| d.kind.is_scroll_container()));
                        if let Some(scroller) = scroller {
                            log::debug!(
                                "touch pan: capture moves from {:?} to scroll view {:?}",
                                capture.widget,
                                scroller
                            );
                            capture.widget = scroller;
                            capture.panning = true;
                            self.capture = Some(capture);
                            self.pan(tree, scroller, delta);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    pub fn pointer_up(
        &mut self,
        tree: &mut WidgetTree,
        point: Point,
        button: MouseButton,
        kind: PointerKind,
    ) {
        self.last_pointer = Some(point);
        if kind == PointerKind::Mouse {
            self.clear_focus_visuals();
        }
        if button != MouseButton::Left {
            return;
        }

        let drag = std::mem::take(&mut self.drag);
        let Some(capture) = self.capture.take() else {
            return;
        };
        self.request_redraw();

        if drag != DragMode::None {
            log::debug!("{:?} drag on {:?} ended", drag, capture.widget);
            return;
        }
        if capture.panning || !tree.contains(capture.widget) {
            return;
        }

        let released_on = hit_test(tree, point, &self.metrics)
            .filter(|hit| hit.region == HitRegion::Content)
            .map(|hit| hit.widget);
        if released_on == Some(capture.widget) {
            self.click(tree, capture.widget);
        }
    }

    /// Pointer left the window
    pub fn pointer_leave(&mut self) {
        self.clear_focus_visuals();
        self.last_pointer = None;
        self.set_hovered(None, HitRegion::Content);
    }

    /// Scroll the nearest scroll container under `point` (or under the hovered
    /// widget) by `delta` notches. Positive deltas move towards the end.
    pub fn wheel(&mut self, tree: &mut WidgetTree, point: Option<Point>, delta: Point) {
        self.clear_focus_visuals();
        let start = point
            .and_then(|p| hit_test(tree, p, &self.metrics))
            .map(|hit| hit.widget)
            .or(self.hovered.filter(|&id| tree.contains(id)));
        let Some(start) = start else {
            return;
        };

        let speed = self.metrics.input.wheel_speed;
        let scrollers: Vec<WidgetId> = std::iter::once(start)
            .chain(tree.ancestors(start))
            .filter(|&id| tree.get(id).is_some_and(|d| d.kind.is_scroll_container()))
            .collect();

        // Nearest container that can still move takes the wheel.
        for scroller in scrollers {
            if self.scroll_by(tree, scroller, Point::new(delta.x * speed, delta.y * speed)) {
                return;
            }
        }
    }

    /// Keyboard input. Returns whether the key was consumed.
    pub fn key_down(&mut self, tree: &mut WidgetTree, key: &Key, modifiers: Modifiers) -> bool {
        let Key::Named(named) = key else {
            return false;
        };

        if named.is_navigation() && !self.show_focus_visuals {
            self.show_focus_visuals = true;
            self.request_redraw();
        }

        if *named == NamedKey::Tab {
            self.move_focus(tree, !modifiers.shift);
            return true;
        }

        let Some(focused) = self.focused.filter(|&id| tree.contains(id)) else {
            return false;
        };
        let Some(data) = tree.get(focused).filter(|d| !d.disabled) else {
            return false;
        };
        let kind = data.kind.clone();
        let (value, min, max, step) = (data.value, data.min, data.max, data.step);

        match kind {
            WidgetKind::TextBox => self.edit_key(tree, focused, *named, modifiers),
            WidgetKind::Slider => {
                let increment = if step > 0.0 {
                    step
                } else {
                    (max - min).abs() * self.metrics.input.keyboard_step_fraction
                };
                let next = match named {
                    NamedKey::ArrowRight | NamedKey::ArrowUp => value + increment,
                    NamedKey::ArrowLeft | NamedKey::ArrowDown => value - increment,
                    NamedKey::Home => min,
                    NamedKey::End => max,
                    _ => return false,
                };
                self.set_slider_value(tree, focused, snap_slider_value(next, min, max, step));
                true
            }
            kind if kind.is_clickable() => {
                if matches!(named, NamedKey::Space | NamedKey::Enter) {
                    self.click(tree, focused);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Committed text for the focused text box
    pub fn text_input(&mut self, tree: &mut WidgetTree, text: &str) {
        let insert: String = text.chars().filter(|c| !c.is_control()).collect();
        if insert.is_empty() {
            return;
        }
        let Some(id) = self.focused_text_box(tree) else {
            return;
        };
        if let Some(data) = tree.get_mut(id) {
            let range = data.selection_range();
            replace_chars(&mut data.text, range.clone(), &insert);
            let caret = range.start + insert.chars().count();
            data.selection_start = caret;
            data.selection_end = caret;
        }
        self.text_changed(tree, id);
    }

    /// Update or clear the input method composition of the focused text box.
    pub fn set_composition(&mut self, tree: &mut WidgetTree, composition: Option<Composition>) {
        let Some(id) = self.focused_text_box(tree) else {
            return;
        };
        if let Some(data) = tree.get_mut(id) {
            data.composition = composition.filter(|c| !c.text.is_empty());
        }
        self.caret_epoch += 1;
        self.request_redraw();
    }

    /// Run the click behavior of `id`: built-in state flip first, then the
    /// callback. Disabled widgets ignore clicks.
    pub fn click(&mut self, tree: &mut WidgetTree, id: WidgetId) -> bool {
        let Some(data) = tree.get_mut(id).filter(|d| !d.disabled) else {
            return false;
        };

        match data.kind.clone() {
            WidgetKind::ToggleSwitch => {
                data.checked = !data.checked;
                // Mirrored for consumers that read the toggle state as text.
                data.text = data.checked.to_string();
            }
            WidgetKind::ToggleButton | WidgetKind::CheckBox => {
                data.checked = !data.checked;
            }
            WidgetKind::RadioButton => {
                data.checked = true;
                let group = data.group_name.clone();
                let siblings: Vec<WidgetId> = tree.siblings(id).collect();
                for sibling in siblings {
                    if let Some(other) = tree.get_mut(sibling) {
                        if other.kind == WidgetKind::RadioButton && other.group_name == group {
                            other.checked = false;
                        }
                    }
                }
                log::trace!("radio {:?} selected in group {:?}", id, group);
            }
            _ => {}
        }

        let callback = tree.get(id).and_then(|d| d.on_click.clone());
        self.events.push(UiEvent::Clicked(id));
        self.request_redraw();
        if let Some(callback) = callback {
            callback();
        }
        true
    }

    /// Abandon all pointer interaction (window lost focus or capture).
    pub fn reset(&mut self) {
        self.capture = None;
        self.drag = DragMode::None;
        self.last_pointer = None;
        self.set_hovered(None, HitRegion::Content);
        self.events.push(UiEvent::Invalidate);
        self.request_redraw();
    }

    /// Move keyboard focus, emitting [`UiEvent::FocusChanged`] on change.
    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        if self.focused == id {
            return;
        }
        let previous = std::mem::replace(&mut self.focused, id);
        self.caret_epoch += 1;
        self.events.push(UiEvent::FocusChanged {
            previous,
            current: id,
        });
        self.request_redraw();
    }

    fn begin_capture(&mut self, widget: WidgetId, pointer: PointerKind, origin: Point, grab_offset: f32) {
        self.capture = Some(Capture {
            widget,
            pointer,
            grab_offset,
            press_origin: origin,
            panning: false,
        });
    }

    fn clear_focus_visuals(&mut self) {
        if self.show_focus_visuals {
            self.show_focus_visuals = false;
            self.request_redraw();
        }
    }

    fn update_hover(&mut self, tree: &WidgetTree, point: Point) {
        match hit_test(tree, point, &self.metrics) {
            Some(hit) => self.set_hovered(Some(hit.widget), hit.region),
            None => self.set_hovered(None, HitRegion::Content),
        }
    }

    fn set_hovered(&mut self, hovered: Option<WidgetId>, region: HitRegion) {
        if hovered != self.hovered {
            let previous = std::mem::replace(&mut self.hovered, hovered);
            self.events.push(UiEvent::HoverChanged {
                previous,
                current: hovered,
            });
            self.request_redraw();
        }
        if region != self.hover_region {
            self.hover_region = region;
            self.request_redraw();
        }
    }

    fn axis_of(layout: &ScrollViewLayout, region: HitRegion) -> ScrollAxisLayout {
        match region {
            HitRegion::HorizontalScrollBar => layout.horizontal,
            _ => layout.vertical,
        }
    }

    fn press_scrollbar(
        &mut self,
        tree: &mut WidgetTree,
        id: WidgetId,
        bounds: Rect,
        region: HitRegion,
        point: Point,
        kind: PointerKind,
    ) {
        let Some(data) = tree.get(id) else {
            return;
        };
        let layout = scroll_layout_for(data, bounds, &self.metrics.scroll);
        let axis = Self::axis_of(&layout, region);
        let vertical = region == HitRegion::VerticalScrollBar;
        let (pos, thumb_start, thumb_end) = if vertical {
            (point.y, axis.thumb.min[1], axis.thumb.max[1])
        } else {
            (point.x, axis.thumb.min[0], axis.thumb.max[0])
        };

        if pos >= thumb_start && pos <= thumb_end {
            self.drag = if vertical {
                DragMode::VerticalScrollBar
            } else {
                DragMode::HorizontalScrollBar
            };
            self.begin_capture(id, kind, point, 0.0);
            log::debug!("scroll view {:?}: {:?} drag started", id, self.drag);
        } else {
            let page = if pos < thumb_start {
                -axis.viewport
            } else {
                axis.viewport
            };
            log::debug!("scroll view {:?}: page step {}", id, page);
            let delta = if vertical {
                Point::new(0.0, page)
            } else {
                Point::new(page, 0.0)
            };
            self.scroll_by(tree, id, delta);
        }
        self.request_redraw();
    }

    fn drag_scrollbar(&mut self, tree: &mut WidgetTree, id: WidgetId, pixels: f32, region: HitRegion) {
        let Some(bounds) = tree.absolute_bounds(id) else {
            return;
        };
        let Some(data) = tree.get(id) else {
            return;
        };
        let layout = scroll_layout_for(data, bounds, &self.metrics.scroll);
        let ratio = Self::axis_of(&layout, region).drag_ratio();
        let delta = pixels * ratio;
        let delta = if region == HitRegion::VerticalScrollBar {
            Point::new(0.0, delta)
        } else {
            Point::new(delta, 0.0)
        };
        self.scroll_by(tree, id, delta);
    }

    /// Drag content: moving the pointer down reveals content above.
    fn pan(&mut self, tree: &mut WidgetTree, id: WidgetId, delta: Point) {
        self.scroll_by(tree, id, Point::new(-delta.x, -delta.y));
    }

    /// Add `delta` to the scroll offsets, clamped. Returns whether anything moved.
    fn scroll_by(&mut self, tree: &mut WidgetTree, id: WidgetId, delta: Point) -> bool {
        let Some(bounds) = tree.absolute_bounds(id) else {
            return false;
        };
        let Some(data) = tree.get_mut(id) else {
            return false;
        };
        let layout = scroll_layout_for(data, bounds, &self.metrics.scroll);

        let mut moved = false;
        if data.v_scrollbar != ScrollBarVisibility::Disabled && delta.y != 0.0 {
            let next = clamp_scroll_offset(data.scroll_y + delta.y, layout.vertical.max_offset);
            moved |= next != data.scroll_y;
            data.scroll_y = next;
        }
        if data.h_scrollbar != ScrollBarVisibility::Disabled && delta.x != 0.0 {
            let next = clamp_scroll_offset(data.scroll_x + delta.x, layout.horizontal.max_offset);
            moved |= next != data.scroll_x;
            data.scroll_x = next;
        }
        if moved {
            self.request_redraw();
        }
        moved
    }

    fn track_slider(&mut self, tree: &mut WidgetTree, capture: Capture, point: Point) {
        let Some(bounds) = tree.absolute_bounds(capture.widget) else {
            return;
        };
        let Some(data) = tree.get(capture.widget) else {
            return;
        };
        let value = slider_value_at(
            bounds,
            point.x - capture.grab_offset,
            data.min,
            data.max,
            data.step,
            &self.metrics.slider,
        );
        self.set_slider_value(tree, capture.widget, value);
    }

    fn set_slider_value(&mut self, tree: &mut WidgetTree, id: WidgetId, value: f32) {
        let Some(data) = tree.get_mut(id) else {
            return;
        };
        if (data.value - value).abs() <= f32::EPSILON {
            return;
        }
        data.value = value;
        let callback = data.on_value_changed.clone();
        self.events.push(UiEvent::ValueChanged { widget: id, value });
        self.request_redraw();
        if let Some(callback) = callback {
            callback(value);
        }
    }

    fn move_focus(&mut self, tree: &WidgetTree, forward: bool) {
        let order: Vec<WidgetId> = tree
            .descendants(tree.root())
            .into_iter()
            .filter(|&id| {
                tree.get(id)
                    .is_some_and(|d| d.kind.is_focusable() && !d.disabled)
            })
            .collect();
        if order.is_empty() {
            return;
        }

        let current = self
            .focused
            .and_then(|f| order.iter().position(|&id| id == f));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => order.len() - 1,
            (Some(i), true) => (i + 1) % order.len(),
            (Some(i), false) => (i + order.len() - 1) % order.len(),
        };
        self.set_focus(Some(order[next]));
    }

    fn focused_text_box(&self, tree: &WidgetTree) -> Option<WidgetId> {
        self.focused.filter(|&id| {
            tree.get(id)
                .is_some_and(|d| d.kind == WidgetKind::TextBox && !d.disabled)
        })
    }

    fn edit_key(&mut self, tree: &mut WidgetTree, id: WidgetId, key: NamedKey, modifiers: Modifiers) -> bool {
        let Some(data) = tree.get_mut(id) else {
            return false;
        };
        let len = data.text.chars().count();
        let range = data.selection_range();
        let caret = data.caret().min(len);

        let edited = match key {
            NamedKey::Backspace => {
                if !range.is_empty() {
                    replace_chars(&mut data.text, range.clone(), "");
                    collapse(data, range.start);
                    true
                } else if caret > 0 {
                    replace_chars(&mut data.text, caret - 1..caret, "");
                    collapse(data, caret - 1);
                    true
                } else {
                    false
                }
            }
            NamedKey::Delete => {
                if !range.is_empty() {
                    replace_chars(&mut data.text, range.clone(), "");
                    collapse(data, range.start);
                    true
                } else if caret < len {
                    replace_chars(&mut data.text, caret..caret + 1, "");
                    collapse(data, caret);
                    true
                } else {
                    false
                }
            }
            NamedKey::ArrowLeft | NamedKey::ArrowRight | NamedKey::Home | NamedKey::End => {
                let target = match key {
                    NamedKey::ArrowLeft if !modifiers.shift && !range.is_empty() => range.start,
                    NamedKey::ArrowRight if !modifiers.shift && !range.is_empty() => range.end,
                    NamedKey::ArrowLeft => caret.saturating_sub(1),
                    NamedKey::ArrowRight => (caret + 1).min(len),
                    NamedKey::Home => 0,
                    _ => len,
                };
                if modifiers.shift {
                    data.selection_end = target;
                } else {
                    collapse(data, target);
                }
                self.caret_epoch += 1;
                self.request_redraw();
                return true;
            }
            _ => return false,
        };

        if edited {
            self.text_changed(tree, id);
        }
        true
    }

    fn text_changed(&mut self, tree: &WidgetTree, id: WidgetId) {
        self.caret_epoch += 1;
        self.events.push(UiEvent::TextChanged(id));
        self.request_redraw();
        let Some(data) = tree.get(id) else {
            return;
        };
        if let Some(callback) = data.on_text_changed.clone() {
            callback(&data.text);
        }
    }
}

fn collapse(data: &mut ViewData, caret: usize) {
    data.selection_start = caret;
    data.selection_end = caret;
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Replace the chars in `range` with `with`.
fn replace_chars(text: &mut String, range: std::ops::Range<usize>, with: &str) {
    let start = byte_index(text, range.start);
    let end = byte_index(text, range.end);
    text.replace_range(start..end, with);
}
