//! Input events and the gesture dispatcher.
//!
//! Raw host input ([`RawInput`]) enters through [`crate::Scene::dispatch`].
//! The dispatcher hit-tests the layer tree for the deepest interactive
//! layer, hands the delegate a [`PointerEvent`] snapshot, and, when a
//! handler starts a follow, routes the rest of that pointer's stream
//! straight to the follow callback until release.

mod dispatch;
mod input;

pub use dispatch::{EventCtx, EventKind};
pub use input::{
    MouseButton, MouseInput, PointerIdentity, RawEventKinds, RawInput, TouchId, TouchInput,
};

pub(crate) use dispatch::Dispatcher;
pub(crate) use input::kinds_for;

use crate::geometry::{Point, Vec2};
use crate::scene::LayerId;

/// An immutable snapshot of one dispatched input.
///
/// Produced fresh per dispatch; never mutated afterwards. Coordinates come
/// in both frames: `x`/`y` relative to [`target`](Self::target), and
/// `global_x`/`global_y` relative to the root.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    /// X coordinate relative to the target layer.
    pub x: f64,
    /// Y coordinate relative to the target layer.
    pub y: f64,
    /// X coordinate relative to the scene root.
    pub global_x: f64,
    /// Y coordinate relative to the scene root.
    pub global_y: f64,
    /// The layer this event was delivered to.
    pub target: LayerId,
    /// The underlying raw input record.
    pub source: RawInput,
    /// `true` only on the final event of a follow (the release).
    pub last: bool,
    /// Cumulative offset from the first position of a follow.
    pub delta: Option<Vec2>,
}

impl PointerEvent {
    /// The event position as a global point.
    pub fn to_global(&self) -> Point {
        Point::new(self.global_x, self.global_y)
    }
}
