//! Widget tree: the external object model this crate reads and mutates.
//!
//! Nodes live in a generational arena, so a [`WidgetId`] held by the input
//! dispatcher or a renderer store never keeps a node alive and never resolves
//! to a different node after removal.

use crate::color::Color;
use crate::primitives::{Point, Rect, Size};
use mica_gui_macros::WithBuilders;
use slotmap::SlotMap;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

slotmap::new_key_type! {
    /// Identity of a widget node. Stale ids simply fail to resolve.
    pub struct WidgetId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("parent widget {0:?} is not in the tree")]
    UnknownParent(WidgetId),
    #[error("widget {0:?} is not in the tree")]
    UnknownWidget(WidgetId),
    #[error("the root widget cannot be removed")]
    RootRemoval,
}

/// Closed set of widget kinds. Renderers and the dispatcher match on this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum WidgetKind {
    #[default]
    Container,
    Label,
    Button,
    ToggleButton,
    CheckBox,
    RadioButton,
    Slider,
    ToggleSwitch,
    TextBox,
    ScrollView,
    /// Drawn by a plugin registered under this key
    Custom(String),
}

impl WidgetKind {
    /// Kinds that react to a click (and get the hover overlay)
    pub fn is_clickable(&self) -> bool {
        matches!(
            self,
            WidgetKind::Button
                | WidgetKind::ToggleButton
                | WidgetKind::CheckBox
                | WidgetKind::RadioButton
                | WidgetKind::ToggleSwitch
        )
    }

    /// Kinds that take keyboard focus
    pub fn is_focusable(&self) -> bool {
        self.is_clickable() || matches!(self, WidgetKind::Slider | WidgetKind::TextBox)
    }

    pub fn is_scroll_container(&self) -> bool {
        matches!(self, WidgetKind::ScrollView)
    }
}

/// Per-axis scrollbar policy of a scroll view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBarVisibility {
    Visible,
    Hidden,
    /// No bar and no scrolling on this axis
    Disabled,
    /// Shown only while content exceeds the viewport
    #[default]
    Auto,
}

/// In-progress input method composition of a text box
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Composition {
    pub text: String,
    /// Caret inside the composition, in chars
    pub cursor: usize,
}

pub type ClickCallback = Rc<dyn Fn()>;
pub type TextChangedCallback = Rc<dyn Fn(&str)>;
pub type ValueChangedCallback = Rc<dyn Fn(f32)>;

/// Everything the renderers and the dispatcher know about one widget.
///
/// `layout` is relative to the parent's content origin and is written by the
/// external layout pass; nothing in this crate changes it. Colors left fully
/// transparent fall back to the theme.
#[derive(Clone, WithBuilders)]
pub struct ViewData {
    pub kind: WidgetKind,
    pub layout: Rect,
    pub corner_radius: f32,
    pub background: Color,
    pub foreground: Color,
    pub border_color: Color,
    pub border_width: f32,
    pub font_size: f32,
    #[with_builders(into)]
    pub text: String,
    #[with_builders(into)]
    pub placeholder: String,
    pub is_accent: bool,
    pub disabled: bool,
    pub checked: bool,

    // Slider
    pub value: f32,
    pub min: f32,
    pub max: f32,
    /// Snap increment, 0 for continuous
    pub step: f32,

    // Scroll view
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub content_size: Size,
    pub h_scrollbar: ScrollBarVisibility,
    pub v_scrollbar: ScrollBarVisibility,

    // Text box, char indices. `selection_end` is the caret.
    pub selection_start: usize,
    pub selection_end: usize,
    pub composition: Option<Composition>,

    /// Radio buttons sharing a parent and group name are mutually exclusive
    #[with_builders(into)]
    pub group_name: String,

    #[with_builders(skip)]
    pub on_click: Option<ClickCallback>,
    #[with_builders(skip)]
    pub on_text_changed: Option<TextChangedCallback>,
    #[with_builders(skip)]
    pub on_value_changed: Option<ValueChangedCallback>,
}

impl ViewData {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            layout: Rect::default(),
            corner_radius: 4.0,
            background: Color::transparent(),
            foreground: Color::transparent(),
            border_color: Color::transparent(),
            border_width: 0.0,
            font_size: 14.0,
            text: String::new(),
            placeholder: String::new(),
            is_accent: false,
            disabled: false,
            checked: false,
            value: 0.0,
            min: 0.0,
            max: 100.0,
            step: 0.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            content_size: Size::zero(),
            h_scrollbar: ScrollBarVisibility::Auto,
            v_scrollbar: ScrollBarVisibility::Auto,
            selection_start: 0,
            selection_end: 0,
            composition: None,
            group_name: String::new(),
            on_click: None,
            on_text_changed: None,
            on_value_changed: None,
        }
    }

    /// Shorthand for `.with_layout(Rect::from_xywh(..))`
    pub fn with_bounds(self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.with_layout(Rect::from_xywh(x, y, width, height))
    }

    pub fn on_click(mut self, f: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    pub fn on_text_changed(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_text_changed = Some(Rc::new(f));
        self
    }

    pub fn on_value_changed(mut self, f: impl Fn(f32) + 'static) -> Self {
        self.on_value_changed = Some(Rc::new(f));
        self
    }

    pub fn scroll_offset(&self) -> Point {
        Point::new(self.scroll_x, self.scroll_y)
    }

    pub fn caret(&self) -> usize {
        self.selection_end
    }

    /// Ordered selection bounds, clamped to the text
    pub fn selection_range(&self) -> Range<usize> {
        let len = self.text.chars().count();
        let a = self.selection_start.min(len);
        let b = self.selection_end.min(len);
        a.min(b)..a.max(b)
    }

    pub fn has_selection(&self) -> bool {
        !self.selection_range().is_empty()
    }
}

impl Default for ViewData {
    fn default() -> Self {
        Self::new(WidgetKind::Container)
    }
}

impl fmt::Debug for ViewData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewData")
            .field("kind", &self.kind)
            .field("layout", &self.layout)
            .field("text", &self.text)
            .field("disabled", &self.disabled)
            .field("checked", &self.checked)
            .field("value", &self.value)
            .field("scroll", &(self.scroll_x, self.scroll_y))
            .field("on_click", &self.on_click.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct WidgetNode {
    data: ViewData,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
}

/// Owning tree of widgets. Children are kept in z-order, last is topmost.
#[derive(Debug)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
    root: WidgetId,
}

impl WidgetTree {
    pub fn new(root: ViewData) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(WidgetNode {
            data: root,
            parent: None,
            children: Vec::new(),
        });
        Self { nodes, root }
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&ViewData> {
        self.nodes.get(id).map(|node| &node.data)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut ViewData> {
        self.nodes.get_mut(id).map(|node| &mut node.data)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children in z-order; empty for unknown ids
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Append `data` as the topmost child of `parent`.
    pub fn append_child(&mut self, parent: WidgetId, data: ViewData) -> Result<WidgetId, TreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::UnknownParent(parent));
        }
        let id = self.nodes.insert(WidgetNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        }
        Ok(id)
    }

    /// Remove `id` and its whole subtree, returning the removed node's data.
    pub fn remove(&mut self, id: WidgetId) -> Result<ViewData, TreeError> {
        if id == self.root {
            return Err(TreeError::RootRemoval);
        }
        let parent = self
            .nodes
            .get(id)
            .ok_or(TreeError::UnknownWidget(id))?
            .parent;

        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|&child| child != id);
        }

        let mut doomed = self.children(id).to_vec();
        while let Some(child) = doomed.pop() {
            if let Some(node) = self.nodes.remove(child) {
                doomed.extend(node.children);
            }
        }

        self.nodes
            .remove(id)
            .map(|node| node.data)
            .ok_or(TreeError::UnknownWidget(id))
    }

    /// Strict ancestors, nearest first
    pub fn ancestors(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Other children of the same parent
    pub fn siblings(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
        self.parent(id)
            .map(|p| self.children(p))
            .unwrap_or(&[])
            .iter()
            .copied()
            .filter(move |&s| s != id)
    }

    /// `id` and all of its descendants in pre-order (paint order)
    pub fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// The widget itself if it scrolls, otherwise its nearest scrolling ancestor.
    pub fn nearest_scroll_container(&self, id: WidgetId) -> Option<WidgetId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&w| self.get(w).is_some_and(|d| d.kind.is_scroll_container()))
    }

    /// Absolute origin that `id`'s children are laid out against.
    pub fn content_origin(&self, id: WidgetId) -> Option<Point> {
        let bounds = self.absolute_bounds(id)?;
        let data = self.get(id)?;
        let mut origin = bounds.min_point();
        if data.kind.is_scroll_container() {
            origin = origin - data.scroll_offset();
        }
        Some(origin)
    }

    /// Screen-space bounds, accumulating parent origins and scroll offsets.
    pub fn absolute_bounds(&self, id: WidgetId) -> Option<Rect> {
        let data = self.get(id)?;
        let origin = match self.parent(id) {
            Some(parent) => self.content_origin(parent)?,
            None => Point::zero(),
        };
        Some(data.layout.translate(origin.x, origin.y))
    }
}
