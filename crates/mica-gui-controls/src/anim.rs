//! Per-widget state that lives exactly as long as the widget keeps being drawn.
//!
//! Every frame starts with `begin_frame`, touches the entries of the widgets
//! it draws, and ends with `end_frame`, which drops whatever was not touched.
//! Removed or hidden widgets therefore release their state one frame later.

use mica_gui::{Animatable, Transition, TransitionState, WidgetId};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Mark-and-sweep map keyed by widget.
#[derive(Debug, Clone)]
pub struct FrameStore<V> {
    entries: HashMap<WidgetId, V>,
    seen: HashSet<WidgetId>,
}

impl<V> FrameStore<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            seen: HashSet::new(),
        }
    }

    pub fn begin_frame(&mut self) {
        self.seen.clear();
    }

    /// Entry for `id`, created with `default` if missing. Marks `id` as seen.
    pub fn entry(&mut self, id: WidgetId, default: impl FnOnce() -> V) -> &mut V {
        self.seen.insert(id);
        self.entries.entry(id).or_insert_with(default)
    }

    pub fn get(&self, id: WidgetId) -> Option<&V> {
        self.entries.get(&id)
    }

    /// Drop every entry not seen this frame. Returns how many were dropped.
    pub fn end_frame(&mut self) -> usize {
        let before = self.entries.len();
        let seen = &self.seen;
        self.entries.retain(|id, _| seen.contains(id));
        let swept = before - self.entries.len();
        if swept > 0 {
            log::trace!("swept {} stale widget entries", swept);
        }
        swept
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for FrameStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// One animated property for every widget drawn by a renderer.
#[derive(Debug, Clone)]
pub struct AnimationStore<T> {
    states: FrameStore<TransitionState<T>>,
    animating: bool,
}

impl<T: Animatable + Default> AnimationStore<T> {
    pub fn new() -> Self {
        Self {
            states: FrameStore::new(),
            animating: false,
        }
    }

    pub fn begin_frame(&mut self) {
        self.states.begin_frame();
        self.animating = false;
    }

    /// Linear transition of `id`'s value toward `target` over `duration` seconds.
    pub fn animate(&mut self, id: WidgetId, target: T, duration: f32, now: Instant) -> T {
        self.animate_with(id, target, Transition::linear(duration), now)
    }

    pub fn animate_with(
        &mut self,
        id: WidgetId,
        target: T,
        transition: Transition,
        now: Instant,
    ) -> T {
        let (value, active) = self
            .states
            .entry(id, TransitionState::default)
            .update(target, transition, now);
        self.animating |= active;
        value
    }

    /// Sweep unseen widgets; true if any animation is still running.
    pub fn end_frame(&mut self) -> bool {
        self.states.end_frame();
        self.animating
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether `id`'s transition is still in flight
    pub fn is_active(&self, id: WidgetId) -> bool {
        self.states.get(id).is_some_and(|t| t.is_active())
    }

    pub fn get(&self, id: WidgetId) -> Option<&TransitionState<T>> {
        self.states.get(id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.states.contains(id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<T: Animatable + Default> Default for AnimationStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_gui::{Clock, ManualClock, ViewData, WidgetTree};

    fn ids(n: usize) -> (WidgetTree, Vec<WidgetId>) {
        let mut tree = WidgetTree::new(ViewData::default());
        let root = tree.root();
        let ids = (0..n)
            .map(|_| tree.append_child(root, ViewData::default()).unwrap())
            .collect();
        (tree, ids)
    }

    #[test]
    fn test_first_animate_snaps_to_target() {
        let (_tree, ids) = ids(1);
        let clock = ManualClock::new();
        let mut store = AnimationStore::<f32>::new();
        store.begin_frame();
        assert_eq!(store.animate(ids[0], 0.7, 0.2, clock.now()), 0.7);
        assert!(!store.end_frame());
    }

    #[test]
    fn test_unseen_entries_are_swept() {
        let (_tree, ids) = ids(2);
        let clock = ManualClock::new();
        let mut store = AnimationStore::<f32>::new();

        store.begin_frame();
        store.animate(ids[0], 1.0, 0.2, clock.now());
        store.animate(ids[1], 1.0, 0.2, clock.now());
        store.end_frame();
        assert_eq!(store.len(), 2);

        store.begin_frame();
        store.animate(ids[1], 1.0, 0.2, clock.now());
        store.end_frame();
        assert!(!store.contains(ids[0]));
        assert!(store.contains(ids[1]));
    }

    #[test]
    fn test_activity_is_aggregated_until_done() {
        let (_tree, ids) = ids(2);
        let clock = ManualClock::new();
        let mut store = AnimationStore::<f32>::new();

        store.begin_frame();
        store.animate(ids[0], 0.0, 0.2, clock.now());
        store.animate(ids[1], 0.0, 0.2, clock.now());
        store.end_frame();

        clock.advance_secs(0.05);
        store.begin_frame();
        store.animate(ids[0], 1.0, 0.2, clock.now());
        store.animate(ids[1], 0.0, 0.2, clock.now());
        assert!(store.end_frame());

        clock.advance_secs(0.5);
        store.begin_frame();
        assert_eq!(store.animate(ids[0], 1.0, 0.2, clock.now()), 1.0);
        store.animate(ids[1], 0.0, 0.2, clock.now());
        assert!(!store.end_frame());
    }

    #[test]
    fn test_frame_store_keeps_value_between_frames() {
        let (_tree, ids) = ids(1);
        let mut store = FrameStore::<f32>::new();
        store.begin_frame();
        *store.entry(ids[0], || 0.0) = 12.0;
        assert_eq!(store.end_frame(), 0);

        store.begin_frame();
        assert_eq!(*store.entry(ids[0], || 0.0), 12.0);
        store.end_frame();

        store.begin_frame();
        assert_eq!(store.end_frame(), 1);
        assert!(store.is_empty());
    }
}
