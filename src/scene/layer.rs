//! The layer: one rectangular node of the scene graph.

use slotmap::new_key_type;

use crate::delegate::{Capabilities, Delegate};
use crate::geometry::Rect;
use crate::style::Style;

new_key_type! {
    /// Handle to a layer in the scene's arena.
    ///
    /// Ids are generational: a destroyed layer's handle goes stale instead
    /// of aliasing a reused slot.
    pub struct LayerId;
}

/// Rotations closer to zero than this are not applied when painting.
pub(crate) const ROTATION_EPSILON: f64 = 1e-3;

/// Text state carried by [`LayerKind::Text`].
#[derive(Debug, Clone, Default)]
pub struct TextState {
    /// The string to render.
    pub(crate) text: String,
    /// Copy of the string as of the last measurement; measurement reruns
    /// only when `text` no longer matches.
    pub(crate) measured: Option<String>,
}

/// The variants of a layer.
#[derive(Debug, Clone)]
pub enum LayerKind {
    /// A leaf with no children.
    Plain,
    /// A container with no flow positioning of its own.
    Group,
    /// A container flowing children top to bottom.
    Column,
    /// A container flowing children left to right.
    Row,
    /// A leaf that renders a measured string.
    Text(TextState),
}

impl LayerKind {
    /// Whether this kind may own children.
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Group | Self::Column | Self::Row)
    }
}

/// A rectangular node in the scene graph.
///
/// Position is relative to the parent. `z` orders painting among siblings
/// (ties broken by insertion order); it does not affect hit-testing.
/// Rotation affects painting only; hit-testing ignores it.
#[derive(Debug)]
pub struct Layer {
    /// X position relative to the parent.
    pub x: f64,
    /// Y position relative to the parent.
    pub y: f64,
    /// Paint-order key among siblings; highest paints last.
    pub z: i32,
    /// Width of the layer.
    pub width: f64,
    /// Height of the layer.
    pub height: f64,
    /// Rotation in radians, applied only when painting.
    pub rotation: f64,
    /// Visual style and layout hints.
    pub style: Style,

    pub(crate) kind: LayerKind,
    pub(crate) delegate: Option<Delegate>,
    pub(crate) interactive: bool,
    pub(crate) parent: Option<LayerId>,
    pub(crate) children: Vec<LayerId>,
}

impl Layer {
    pub(crate) fn new(kind: LayerKind, style: Style) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            style,
            kind,
            delegate: None,
            interactive: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// The kind of this layer.
    pub const fn kind(&self) -> &LayerKind {
        &self.kind
    }

    /// The owning parent, if attached.
    pub const fn parent(&self) -> Option<LayerId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[LayerId] {
        &self.children
    }

    /// Whether the delegate handles any input.
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// The text of a [`LayerKind::Text`] layer.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            LayerKind::Text(state) => Some(&state.text),
            _ => None,
        }
    }

    /// Replace the text of a [`LayerKind::Text`] layer. No-op on other
    /// kinds. Measurement reruns on the next layout pass if the string
    /// changed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if let LayerKind::Text(state) = &mut self.kind {
            state.text = text.into();
        }
    }

    /// The layer's rectangle in its parent's coordinates.
    #[inline]
    pub const fn frame(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// `true` if local coordinates (`x`, `y`) fall inside this layer,
    /// bounds inclusive.
    #[inline]
    pub fn contains_local_xy(&self, x: f64, y: f64) -> bool {
        Rect::from_size(self.width, self.height).contains(x, y)
    }

    /// Minimum width used by flow measurement: the style override, else the
    /// current width. Text layers always report their measured width.
    pub fn min_width(&self) -> f64 {
        match self.kind {
            LayerKind::Text(_) => self.width,
            _ => self.style.min_width.unwrap_or(self.width),
        }
    }

    /// Minimum height used by flow measurement: the style override, else
    /// the current height. Text layers always report their measured height.
    pub fn min_height(&self) -> f64 {
        match self.kind {
            LayerKind::Text(_) => self.height,
            _ => self.style.min_height.unwrap_or(self.height),
        }
    }

    /// Install (or clear) the delegate and recompute the interactive flag.
    /// Returns the new capability set.
    pub(crate) fn install_delegate(&mut self, delegate: Option<Delegate>) -> Capabilities {
        let caps = delegate
            .as_ref()
            .map(Delegate::capabilities)
            .unwrap_or_default();
        self.interactive = caps.intersects(Capabilities::INPUT);
        self.delegate = delegate;
        caps
    }

    pub(crate) fn delegate_capabilities(&self) -> Capabilities {
        self.delegate
            .as_ref()
            .map(Delegate::capabilities)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::{Capabilities, Delegate, LayerDelegate};

    struct Mover;

    impl LayerDelegate for Mover {
        fn capabilities(&self) -> Capabilities {
            Capabilities::MOVE | Capabilities::DRAW
        }
    }

    #[test]
    fn test_contains_local_inclusive() {
        let mut layer = Layer::new(LayerKind::Plain, Style::default());
        layer.width = 20.0;
        layer.height = 10.0;
        assert!(layer.contains_local_xy(0.0, 0.0));
        assert!(layer.contains_local_xy(20.0, 10.0));
        assert!(!layer.contains_local_xy(20.5, 5.0));
        assert!(!layer.contains_local_xy(5.0, -0.5));
    }

    #[test]
    fn test_min_size_prefers_style_override() {
        let mut layer = Layer::new(LayerKind::Plain, Style::default());
        layer.width = 50.0;
        layer.height = 30.0;
        assert!((layer.min_width() - 50.0).abs() < f64::EPSILON);
        layer.style.min_width = Some(80.0);
        layer.style.min_height = Some(40.0);
        assert!((layer.min_width() - 80.0).abs() < f64::EPSILON);
        assert!((layer.min_height() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_min_size_ignores_style_override() {
        let mut layer = Layer::new(LayerKind::Text(TextState::default()), Style::default());
        layer.width = 120.0;
        layer.style.min_width = Some(10.0);
        assert!((layer.min_width() - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_install_delegate_sets_interactive() {
        let mut layer = Layer::new(LayerKind::Plain, Style::default());
        assert!(!layer.is_interactive());

        let caps = layer.install_delegate(Some(Delegate::object(Mover)));
        assert!(caps.contains(Capabilities::MOVE));
        assert!(layer.is_interactive());

        // A bare paint delegate is not interactive.
        layer.install_delegate(Some(Delegate::paint(|_, _| {})));
        assert!(!layer.is_interactive());

        layer.install_delegate(None);
        assert!(!layer.is_interactive());
        assert_eq!(layer.delegate_capabilities(), Capabilities::empty());
    }
}
