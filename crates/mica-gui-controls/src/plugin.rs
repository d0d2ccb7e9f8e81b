//! Renderers for [`WidgetKind::Custom`](mica_gui::WidgetKind::Custom) widgets
//!
//! Applications register a [`CustomRenderer`] under the key their custom
//! widgets carry. A widget whose key has no renderer is skipped, and the
//! miss is logged once per key.

use crate::frame::RenderFrame;
use mica_gui::{Rect, ViewData, WidgetId, WidgetState};
use std::collections::{HashMap, HashSet};

/// A renderer for one custom widget kind
///
/// Follows the same contract as the built-in renderers: `render` is called
/// once per widget per frame between `begin_frame` and `end_frame`, and
/// returns whether that widget is still animating.
pub trait CustomRenderer {
    fn render(
        &mut self,
        frame: &mut RenderFrame<'_>,
        id: WidgetId,
        data: &ViewData,
        bounds: Rect,
        state: &WidgetState,
    ) -> bool;

    fn begin_frame(&mut self) {}

    /// Returns whether anything is still animating.
    fn end_frame(&mut self) -> bool {
        false
    }
}

#[derive(Default)]
pub struct PluginRegistry {
    renderers: HashMap<String, Box<dyn CustomRenderer>>,
    logged_missing: HashSet<String>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `renderer` under `key`, replacing any previous one.
    pub fn register(&mut self, key: impl Into<String>, renderer: Box<dyn CustomRenderer>) {
        let key = key.into();
        self.logged_missing.remove(&key);
        if self.renderers.insert(key.clone(), renderer).is_some() {
            log::debug!("replaced custom renderer '{}'", key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.renderers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    pub fn begin_frame(&mut self) {
        for renderer in self.renderers.values_mut() {
            renderer.begin_frame();
        }
    }

    pub fn end_frame(&mut self) -> bool {
        self.renderers
            .values_mut()
            .fold(false, |animating, renderer| renderer.end_frame() || animating)
    }

    /// Draw with the renderer registered under `key`. Returns `None` when
    /// there is none.
    pub fn render(
        &mut self,
        key: &str,
        frame: &mut RenderFrame<'_>,
        id: WidgetId,
        data: &ViewData,
        bounds: Rect,
        state: &WidgetState,
    ) -> Option<bool> {
        match self.renderers.get_mut(key) {
            Some(renderer) => Some(renderer.render(frame, id, data, bounds, state)),
            None => {
                if self.logged_missing.insert(key.to_string()) {
                    log::debug!("no custom renderer for '{}', skipping draw", key);
                }
                None
            }
        }
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.renderers.keys().collect();
        keys.sort();
        f.debug_struct("PluginRegistry")
            .field("renderers", &keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_gui::{
        Clock, Color, ControlMetrics, DrawList, ManualClock, MonospaceMeasurer, Theme, WidgetKind,
        WidgetTree,
    };
    use std::cell::Cell;
    use std::rc::Rc;

    struct Swatch {
        frames: Rc<Cell<u32>>,
    }

    impl CustomRenderer for Swatch {
        fn render(
            &mut self,
            frame: &mut RenderFrame<'_>,
            _id: WidgetId,
            _data: &ViewData,
            bounds: Rect,
            _state: &WidgetState,
        ) -> bool {
            frame
                .surface
                .fill_rounded_rect(bounds, 0.0, Color::from_rgb_hex(0x00FF00));
            true
        }

        fn end_frame(&mut self) -> bool {
            self.frames.set(self.frames.get() + 1);
            false
        }
    }

    #[test]
    fn test_registered_plugin_draws_and_missing_is_skipped() {
        let mut tree = WidgetTree::new(ViewData::default());
        let root = tree.root();
        let id = tree
            .append_child(
                root,
                ViewData::new(WidgetKind::Custom("swatch".into())).with_bounds(0.0, 0.0, 10.0, 10.0),
            )
            .unwrap();
        let frames = Rc::new(Cell::new(0));
        let mut registry = PluginRegistry::new();
        registry.register(
            "swatch",
            Box::new(Swatch {
                frames: frames.clone(),
            }),
        );
        assert!(registry.contains("swatch"));
        assert_eq!(registry.len(), 1);

        let theme = Theme::dark();
        let metrics = ControlMetrics::default();
        let measurer = MonospaceMeasurer::default();
        let mut surface = DrawList::default();
        let mut frame = RenderFrame {
            surface: &mut surface,
            theme: &theme,
            metrics: &metrics,
            measurer: &measurer,
            now: ManualClock::new().now(),
        };
        let data = tree.get(id).unwrap();
        registry.begin_frame();
        let drawn = registry.render("swatch", &mut frame, id, data, data.layout, &WidgetState::default());
        let missing = registry.render("gauge", &mut frame, id, data, data.layout, &WidgetState::default());
        assert!(!registry.end_frame());

        assert_eq!(drawn, Some(true));
        assert_eq!(missing, None);
        assert_eq!(frames.get(), 1);
        assert_eq!(surface.commands().len(), 1);
    }
}
