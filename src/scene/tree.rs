//! The layer arena: ownership, topology, and coordinate transforms.
//!
//! Layers live in a slot map and refer to each other by [`LayerId`]. The
//! child collection owns the relationship; the parent back-link is a plain
//! copyable key used only for coordinate transforms and removal, so there is
//! no second owner and no cycle.

use slotmap::SlotMap;

use crate::event::PointerEvent;
use crate::geometry::Point;
use crate::scene::layer::{Layer, LayerId, LayerKind};
use crate::style::Style;

/// Storage and topology for every layer of a scene.
#[derive(Debug, Default)]
pub struct LayerTree {
    layers: SlotMap<LayerId, Layer>,
}

impl LayerTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, kind: LayerKind, style: Style) -> LayerId {
        self.layers.insert(Layer::new(kind, style))
    }

    /// Shared access to a layer; `None` once destroyed.
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    /// Mutable access to a layer; `None` once destroyed.
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(id)
    }

    /// Whether the id refers to a live layer.
    pub fn contains_layer(&self, id: LayerId) -> bool {
        self.layers.contains_key(id)
    }

    /// Number of live layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    // -- Topology --

    /// Attach `child` to `container`, appending it to the child collection.
    ///
    /// # Panics
    ///
    /// If `container` is not a container kind, or `child` already has a
    /// parent. Moving a layer requires an explicit detach first.
    pub fn add_child(&mut self, container: LayerId, child: LayerId) {
        assert!(
            self[container].kind.is_container(),
            "add target is not a container layer"
        );
        let layer = &mut self[child];
        assert!(layer.parent.is_none(), "layer already has a parent");
        layer.parent = Some(container);
        self[container].children.push(child);
    }

    /// Detach `child` from `container`.
    ///
    /// # Panics
    ///
    /// If `child`'s parent is not exactly `container`.
    pub fn remove_child(&mut self, container: LayerId, child: LayerId) {
        assert!(
            self[child].parent == Some(container),
            "layer is not a child of this container"
        );
        self[child].parent = None;
        let children = &mut self[container].children;
        let index = children
            .iter()
            .position(|&c| c == child)
            .expect("child collection out of sync with parent link");
        children.remove(index);
    }

    /// Detach a layer from its parent, if it has one. The layer survives
    /// and can be re-attached.
    pub fn remove(&mut self, id: LayerId) {
        if let Some(parent) = self[id].parent {
            self.remove_child(parent, id);
        }
    }

    /// Detach a layer and free it and its entire subtree.
    pub fn destroy(&mut self, id: LayerId) {
        self.remove(id);
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(layer) = self.layers.remove(next) {
                stack.extend(layer.children);
            }
        }
    }

    // -- Coordinate transforms --

    /// Resolve local coordinates of `id` to root-relative coordinates by
    /// summing ancestor offsets. O(depth).
    pub fn to_global_xy(&self, id: LayerId, x: f64, y: f64) -> Point {
        let mut point = Point::new(x, y);
        let mut current = Some(id);
        while let Some(layer_id) = current {
            let layer = &self[layer_id];
            point.x += layer.x;
            point.y += layer.y;
            current = layer.parent;
        }
        point
    }

    /// The root-relative position of a layer's origin.
    pub fn to_global(&self, id: LayerId) -> Point {
        self.to_global_xy(id, 0.0, 0.0)
    }

    /// Express a global point in a layer's local coordinates.
    pub fn to_local(&self, id: LayerId, point: Point) -> Point {
        let origin = self.to_global(id);
        Point::new(point.x - origin.x, point.y - origin.y)
    }

    /// Express an event's global position in a layer's local coordinates.
    pub fn to_local_event(&self, id: LayerId, event: &PointerEvent) -> Point {
        self.to_local(id, event.to_global())
    }

    /// Whether a global point falls inside a layer, bounds inclusive.
    /// Rotation is not applied to hit-testing.
    pub fn contains(&self, id: LayerId, point: Point) -> bool {
        let local = self.to_local(id, point);
        self[id].contains_local_xy(local.x, local.y)
    }

    /// [`contains`](Self::contains) with bare global coordinates.
    pub fn contains_xy(&self, id: LayerId, x: f64, y: f64) -> bool {
        self.contains(id, Point::new(x, y))
    }
}

impl std::ops::Index<LayerId> for LayerTree {
    type Output = Layer;

    fn index(&self, id: LayerId) -> &Layer {
        self.layers.get(id).expect("stale layer id")
    }
}

impl std::ops::IndexMut<LayerId> for LayerTree {
    fn index_mut(&mut self, id: LayerId) -> &mut Layer {
        self.layers.get_mut(id).expect("stale layer id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_root() -> (LayerTree, LayerId) {
        let mut tree = LayerTree::new();
        let root = tree.insert(LayerKind::Group, Style::default());
        (tree, root)
    }

    #[test]
    fn test_add_sets_backlink_and_collection() {
        let (mut tree, root) = tree_with_root();
        let child = tree.insert(LayerKind::Plain, Style::default());

        tree.add_child(root, child);
        assert_eq!(tree[child].parent(), Some(root));
        assert_eq!(
            tree[root].children().iter().filter(|&&c| c == child).count(),
            1
        );

        tree.remove_child(root, child);
        assert_eq!(tree[child].parent(), None);
        assert!(tree[root].children().is_empty());
    }

    #[test]
    #[should_panic(expected = "already has a parent")]
    fn test_add_attached_layer_panics() {
        let (mut tree, root) = tree_with_root();
        let other = tree.insert(LayerKind::Group, Style::default());
        let child = tree.insert(LayerKind::Plain, Style::default());
        tree.add_child(root, child);
        tree.add_child(other, child);
    }

    #[test]
    #[should_panic(expected = "not a child of this container")]
    fn test_remove_from_wrong_parent_panics() {
        let (mut tree, root) = tree_with_root();
        let other = tree.insert(LayerKind::Group, Style::default());
        let child = tree.insert(LayerKind::Plain, Style::default());
        tree.add_child(root, child);
        tree.remove_child(other, child);
    }

    #[test]
    #[should_panic(expected = "not a container")]
    fn test_add_to_leaf_panics() {
        let (mut tree, _root) = tree_with_root();
        let leaf = tree.insert(LayerKind::Plain, Style::default());
        let child = tree.insert(LayerKind::Plain, Style::default());
        tree.add_child(leaf, child);
    }

    #[test]
    fn test_detached_remove_is_noop() {
        let (mut tree, _root) = tree_with_root();
        let loose = tree.insert(LayerKind::Plain, Style::default());
        tree.remove(loose);
        assert!(tree.contains_layer(loose));
    }

    #[test]
    fn test_global_local_round_trip() {
        let (mut tree, root) = tree_with_root();
        let mid = tree.insert(LayerKind::Group, Style::default());
        let leaf = tree.insert(LayerKind::Plain, Style::default());
        tree.add_child(root, mid);
        tree.add_child(mid, leaf);

        tree[root].x = 5.0;
        tree[root].y = 7.0;
        tree[mid].x = 10.0;
        tree[mid].y = 20.0;
        tree[leaf].x = 1.0;
        tree[leaf].y = 2.0;

        let global = tree.to_global_xy(leaf, 3.0, 4.0);
        assert_eq!(global, Point::new(19.0, 33.0));

        let back = tree.to_local(leaf, global);
        assert_eq!(back, Point::new(3.0, 4.0));
    }

    #[test]
    fn test_contains_uses_summed_offsets() {
        let (mut tree, root) = tree_with_root();
        let leaf = tree.insert(LayerKind::Plain, Style::default());
        tree.add_child(root, leaf);
        tree[leaf].x = 10.0;
        tree[leaf].y = 10.0;
        tree[leaf].width = 5.0;
        tree[leaf].height = 5.0;

        assert!(tree.contains_xy(leaf, 10.0, 10.0));
        assert!(tree.contains_xy(leaf, 15.0, 15.0));
        assert!(!tree.contains_xy(leaf, 9.9, 10.0));
        assert!(!tree.contains_xy(leaf, 15.1, 15.0));
    }

    #[test]
    fn test_destroy_frees_subtree() {
        let (mut tree, root) = tree_with_root();
        let mid = tree.insert(LayerKind::Group, Style::default());
        let leaf = tree.insert(LayerKind::Plain, Style::default());
        tree.add_child(root, mid);
        tree.add_child(mid, leaf);

        tree.destroy(mid);
        assert!(!tree.contains_layer(mid));
        assert!(!tree.contains_layer(leaf));
        assert!(tree[root].children().is_empty());
    }
}
