//! Layer delegates: pluggable drawing, layout, and input behavior.
//!
//! A delegate is either a bare paint closure or an object implementing any
//! subset of the [`LayerDelegate`] hooks. A trait object cannot be probed
//! for which hooks it overrides, so each delegate declares them up front
//! via [`Capabilities`]; the scene derives the layer's interactive flag and
//! the raw event kinds it must listen for from that set.

use bitflags::bitflags;

use crate::event::{EventCtx, PointerEvent};
use crate::scene::{Layer, LayerId};
use crate::surface::Surface;

bitflags! {
    /// The hooks a delegate implements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Capabilities: u8 {
        /// Custom drawing on top of the layer background.
        const DRAW = 1 << 0;
        /// A pre-layout hook invoked before flow positioning.
        const LAYOUT = 1 << 1;
        /// Pointer/touch press handling.
        const DOWN = 1 << 2;
        /// Pointer/touch release handling.
        const UP = 1 << 3;
        /// Pointer/touch motion handling.
        const MOVE = 1 << 4;

        /// Any input hook; a layer with one of these is interactive.
        const INPUT = Self::DOWN.bits() | Self::UP.bits() | Self::MOVE.bits();
    }
}

/// What an input hook wants done with the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventOutcome {
    /// Stop here; the event is handled.
    #[default]
    Consume,
    /// Let ancestor layers see the event too.
    Bubble,
}

/// Behavior attached to a layer.
///
/// Every hook has an empty default; implementors override the ones named in
/// their [`capabilities`](Self::capabilities). A hook that is not declared
/// is never invoked, so an undeclared-but-overridden hook is dead code.
pub trait LayerDelegate {
    /// The hooks this delegate implements.
    fn capabilities(&self) -> Capabilities;

    /// Draw on top of the layer's background. The surface arrives with a
    /// fresh path and the layer's local transform applied.
    fn draw(&mut self, surface: &mut dyn Surface, layer: &Layer) {
        let _ = (surface, layer);
    }

    /// Adjust the layer before its parent positions it.
    fn layout(&mut self, layer: &mut Layer) {
        let _ = layer;
    }

    /// A press landed on this layer.
    fn on_down(&mut self, event: &PointerEvent, ctx: &mut EventCtx<'_>) -> EventOutcome {
        let _ = (event, ctx);
        EventOutcome::Consume
    }

    /// A release landed on this layer.
    fn on_up(&mut self, event: &PointerEvent, ctx: &mut EventCtx<'_>) -> EventOutcome {
        let _ = (event, ctx);
        EventOutcome::Consume
    }

    /// The pointer moved over this layer.
    fn on_move(&mut self, event: &PointerEvent, ctx: &mut EventCtx<'_>) -> EventOutcome {
        let _ = (event, ctx);
        EventOutcome::Consume
    }
}

/// A delegate slot: either a bare paint function or a full delegate object.
pub enum Delegate {
    /// Just custom drawing; never interactive.
    Paint(Box<dyn FnMut(&mut dyn Surface, &Layer)>),
    /// An object with any subset of the [`LayerDelegate`] hooks.
    Object(Box<dyn LayerDelegate>),
}

impl Delegate {
    /// Wrap a paint closure.
    pub fn paint(f: impl FnMut(&mut dyn Surface, &Layer) + 'static) -> Self {
        Self::Paint(Box::new(f))
    }

    /// Wrap a delegate object.
    pub fn object(d: impl LayerDelegate + 'static) -> Self {
        Self::Object(Box::new(d))
    }

    /// The capability set of this delegate.
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Self::Paint(_) => Capabilities::DRAW,
            Self::Object(d) => d.capabilities(),
        }
    }
}

impl std::fmt::Debug for Delegate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paint(_) => f.write_str("Delegate::Paint"),
            Self::Object(d) => write!(f, "Delegate::Object({:?})", d.capabilities()),
        }
    }
}

/// An object that provides both a layer and its behavior.
///
/// [`crate::Scene::add_component`] attaches the component's layer to a
/// container and, if the layer has no delegate yet, installs the component
/// itself as the delegate: one object doubling as child-provider and
/// handler.
pub trait Component: LayerDelegate {
    /// The layer this component owns.
    fn layer(&self) -> LayerId;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DownOnly;

    impl LayerDelegate for DownOnly {
        fn capabilities(&self) -> Capabilities {
            Capabilities::DOWN
        }
    }

    #[test]
    fn test_paint_delegate_capabilities() {
        let d = Delegate::paint(|_, _| {});
        assert_eq!(d.capabilities(), Capabilities::DRAW);
        assert!(!d.capabilities().intersects(Capabilities::INPUT));
    }

    #[test]
    fn test_object_delegate_capabilities() {
        let d = Delegate::object(DownOnly);
        assert!(d.capabilities().contains(Capabilities::DOWN));
        assert!(d.capabilities().intersects(Capabilities::INPUT));
        assert!(!d.capabilities().contains(Capabilities::DRAW));
    }
}
