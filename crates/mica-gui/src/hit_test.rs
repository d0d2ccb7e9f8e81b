//! Hit-testing module for finding the widget under a point
//!
//! The walk mirrors paint order: parents before children, later siblings on
//! top, scroll offsets shifting the origin of scrolled content.

use crate::config::ControlMetrics;
use crate::geometry::scroll_layout_for;
use crate::primitives::{Point, Rect};
use crate::tree::{WidgetId, WidgetTree};

/// Part of the widget that was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitRegion {
    #[default]
    Content,
    VerticalScrollBar,
    HorizontalScrollBar,
}

impl HitRegion {
    pub fn is_scrollbar(&self) -> bool {
        !matches!(self, HitRegion::Content)
    }
}

/// Result of a hit test against the tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestResult {
    pub widget: WidgetId,
    /// Absolute bounds of the hit widget
    pub bounds: Rect,
    /// Position relative to the widget's top-left corner
    pub local: Point,
    pub region: HitRegion,
}

/// Find the deepest widget at `point`.
///
/// Containers are valid results too; callers look at the kind to decide
/// whether the hit matters. Returns `None` only when the point is outside
/// the root.
pub fn hit_test(tree: &WidgetTree, point: Point, metrics: &ControlMetrics) -> Option<HitTestResult> {
    hit_test_recursive(tree, tree.root(), Point::zero(), point, metrics)
}

/// Recursive helper for hit testing
///
/// `origin` is the absolute content origin of `id`'s parent.
fn hit_test_recursive(
    tree: &WidgetTree,
    id: WidgetId,
    origin: Point,
    point: Point,
    metrics: &ControlMetrics,
) -> Option<HitTestResult> {
    let data = tree.get(id)?;
    let bounds = data.layout.translate(origin.x, origin.y);

    // Children cannot be hit outside their parent
    if !bounds.contains(point) {
        return None;
    }

    let mut child_origin = bounds.min_point();

    if data.kind.is_scroll_container() {
        let layout = scroll_layout_for(data, bounds, &metrics.scroll);
        let region = if layout.vertical.visible && layout.vertical.track.contains(point) {
            Some(HitRegion::VerticalScrollBar)
        } else if layout.horizontal.visible && layout.horizontal.track.contains(point) {
            Some(HitRegion::HorizontalScrollBar)
        } else {
            None
        };
        if let Some(region) = region {
            return Some(HitTestResult {
                widget: id,
                bounds,
                local: point - bounds.min_point(),
                region,
            });
        }
        child_origin = child_origin - data.scroll_offset();
    }

    for &child in tree.children(id).iter().rev() {
        if let Some(hit) = hit_test_recursive(tree, child, child_origin, point, metrics) {
            return Some(hit);
        }
    }

    Some(HitTestResult {
        widget: id,
        bounds,
        local: point - bounds.min_point(),
        region: HitRegion::Content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::slider_layout;
    use crate::primitives::Size;
    use crate::tree::{ViewData, WidgetKind};

    fn root() -> WidgetTree {
        WidgetTree::new(ViewData::default().with_bounds(0.0, 0.0, 800.0, 600.0))
    }

    #[test]
    fn test_button_hit_with_local_position() {
        let mut tree = root();
        let button = tree
            .append_child(
                tree.root(),
                ViewData::new(WidgetKind::Button).with_bounds(0.0, 0.0, 100.0, 40.0),
            )
            .unwrap();
        let hit = hit_test(&tree, Point::new(50.0, 20.0), &ControlMetrics::default()).unwrap();
        assert_eq!(hit.widget, button);
        assert_eq!(hit.local, Point::new(50.0, 20.0));
        assert_eq!(hit.region, HitRegion::Content);
    }

    #[test]
    fn test_topmost_sibling_wins() {
        let mut tree = root();
        let r = tree.root();
        tree.append_child(r, ViewData::new(WidgetKind::Button).with_bounds(0.0, 0.0, 100.0, 100.0))
            .unwrap();
        let top = tree
            .append_child(r, ViewData::new(WidgetKind::Button).with_bounds(50.0, 50.0, 100.0, 100.0))
            .unwrap();
        let hit = hit_test(&tree, Point::new(75.0, 75.0), &ControlMetrics::default()).unwrap();
        assert_eq!(hit.widget, top);
    }

    #[test]
    fn test_children_outside_parent_are_pruned() {
        let mut tree = root();
        let panel = tree
            .append_child(tree.root(), ViewData::default().with_bounds(0.0, 0.0, 50.0, 50.0))
            .unwrap();
        tree.append_child(panel, ViewData::new(WidgetKind::Button).with_bounds(60.0, 0.0, 40.0, 40.0))
            .unwrap();
        let hit = hit_test(&tree, Point::new(70.0, 10.0), &ControlMetrics::default()).unwrap();
        assert_eq!(hit.widget, tree.root());
    }

    #[test]
    fn test_scroll_offset_shifts_children() {
        let mut tree = root();
        let scroll = tree
            .append_child(
                tree.root(),
                ViewData::new(WidgetKind::ScrollView)
                    .with_bounds(0.0, 0.0, 200.0, 200.0)
                    .with_content_size(Size::new(200.0, 200.0))
                    .with_scroll_y(100.0),
            )
            .unwrap();
        let item = tree
            .append_child(scroll, ViewData::new(WidgetKind::Button).with_bounds(0.0, 150.0, 100.0, 30.0))
            .unwrap();
        let hit = hit_test(&tree, Point::new(20.0, 60.0), &ControlMetrics::default()).unwrap();
        assert_eq!(hit.widget, item);
        assert_eq!(hit.bounds, Rect::from_xywh(0.0, 50.0, 100.0, 30.0));
    }

    #[test]
    fn test_scrollbar_beats_content() {
        let mut tree = root();
        let scroll = tree
            .append_child(
                tree.root(),
                ViewData::new(WidgetKind::ScrollView)
                    .with_bounds(0.0, 0.0, 200.0, 200.0)
                    .with_content_size(Size::new(200.0, 1000.0)),
            )
            .unwrap();
        tree.append_child(scroll, ViewData::new(WidgetKind::Button).with_bounds(0.0, 0.0, 200.0, 200.0))
            .unwrap();
        let hit = hit_test(&tree, Point::new(194.0, 100.0), &ControlMetrics::default()).unwrap();
        assert_eq!(hit.widget, scroll);
        assert_eq!(hit.region, HitRegion::VerticalScrollBar);
    }

    #[test]
    fn test_point_inside_slider_thumb_hits_slider() {
        let metrics = ControlMetrics::default();
        let mut tree = root();
        let panel = tree
            .append_child(tree.root(), ViewData::default().with_bounds(30.0, 40.0, 300.0, 100.0))
            .unwrap();
        let slider = tree
            .append_child(
                panel,
                ViewData::new(WidgetKind::Slider)
                    .with_bounds(10.0, 10.0, 200.0, 20.0)
                    .with_value(37.0),
            )
            .unwrap();
        let bounds = tree.absolute_bounds(slider).unwrap();
        let data = tree.get(slider).unwrap();
        let layout = slider_layout(bounds, data.value, data.min, data.max, &metrics.slider);
        for (fx, fy) in [(0.5, 0.5), (0.1, 0.1), (0.9, 0.9), (0.2, 0.8)] {
            let p = Point::new(
                layout.thumb.min[0] + fx * layout.thumb.width(),
                layout.thumb.min[1] + fy * layout.thumb.height(),
            );
            assert_eq!(hit_test(&tree, p, &metrics).unwrap().widget, slider);
        }
    }

    #[test]
    fn test_outside_root_is_none() {
        let tree = root();
        assert!(hit_test(&tree, Point::new(-1.0, 5.0), &ControlMetrics::default()).is_none());
    }
}
