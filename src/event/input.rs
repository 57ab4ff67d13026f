//! Raw input records delivered by the host.
//!
//! The host converts whatever its event source produces (DOM pointer and
//! touch events, a test script) into these records and feeds them to
//! [`crate::Scene::dispatch`]. Coordinates are surface-relative; touches
//! carry a stable per-touch identity for the lifetime of the contact.

use bitflags::bitflags;

use crate::delegate::Capabilities;
use crate::geometry::Point;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left (primary) mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

/// Stable identity of one touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(pub u64);

/// Mouse event details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    /// Surface-relative x coordinate.
    pub x: f64,
    /// Surface-relative y coordinate.
    pub y: f64,
    /// Button involved, if any (motion carries none).
    pub button: Option<MouseButton>,
}

/// Touch event details.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchInput {
    /// Identity of the contact across its start/move/end sequence.
    pub id: TouchId,
    /// Surface-relative x coordinate.
    pub x: f64,
    /// Surface-relative y coordinate.
    pub y: f64,
}

/// One raw input record from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput {
    /// Mouse button pressed.
    MouseDown(MouseInput),
    /// Mouse button released.
    MouseUp(MouseInput),
    /// Mouse moved.
    MouseMove(MouseInput),
    /// Touch contact started.
    TouchStart(TouchInput),
    /// Touch contact moved.
    TouchMove(TouchInput),
    /// Touch contact lifted.
    TouchEnd(TouchInput),
    /// Touch contact cancelled by the host.
    TouchCancel(TouchInput),
}

/// The pointer identity an input belongs to, used to key follow gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerIdentity {
    /// The single mouse pointer.
    Mouse,
    /// One touch contact.
    Touch(TouchId),
}

impl RawInput {
    /// Surface-relative position of the record.
    pub fn position(&self) -> Point {
        match *self {
            Self::MouseDown(m) | Self::MouseUp(m) | Self::MouseMove(m) => Point::new(m.x, m.y),
            Self::TouchStart(t) | Self::TouchMove(t) | Self::TouchEnd(t) | Self::TouchCancel(t) => {
                Point::new(t.x, t.y)
            }
        }
    }

    /// The pointer identity carrying this record.
    pub fn identity(&self) -> PointerIdentity {
        match *self {
            Self::MouseDown(_) | Self::MouseUp(_) | Self::MouseMove(_) => PointerIdentity::Mouse,
            Self::TouchStart(t) | Self::TouchMove(t) | Self::TouchEnd(t) | Self::TouchCancel(t) => {
                PointerIdentity::Touch(t.id)
            }
        }
    }

    pub(crate) fn kind_flag(&self) -> RawEventKinds {
        match self {
            Self::MouseDown(_) => RawEventKinds::MOUSE_DOWN,
            Self::MouseUp(_) => RawEventKinds::MOUSE_UP,
            Self::MouseMove(_) => RawEventKinds::MOUSE_MOVE,
            Self::TouchStart(_) => RawEventKinds::TOUCH_START,
            Self::TouchMove(_) => RawEventKinds::TOUCH_MOVE,
            Self::TouchEnd(_) => RawEventKinds::TOUCH_END,
            Self::TouchCancel(_) => RawEventKinds::TOUCH_CANCEL,
        }
    }
}

bitflags! {
    /// The raw event kinds a scene needs delivered.
    ///
    /// Installing a delegate with input capabilities merges the kinds that
    /// delegate implies into the scene's mask (idempotent per kind); the
    /// host reads the mask via [`crate::Scene::required_events`] and
    /// subscribes to exactly those sources.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RawEventKinds: u8 {
        /// Mouse press.
        const MOUSE_DOWN = 1 << 0;
        /// Mouse release.
        const MOUSE_UP = 1 << 1;
        /// Mouse motion.
        const MOUSE_MOVE = 1 << 2;
        /// Touch start.
        const TOUCH_START = 1 << 3;
        /// Touch motion.
        const TOUCH_MOVE = 1 << 4;
        /// Touch lift.
        const TOUCH_END = 1 << 5;
        /// Touch cancel.
        const TOUCH_CANCEL = 1 << 6;
    }
}

/// The raw kinds implied by a delegate capability set.
///
/// A press handler also needs the touch move/end/cancel stream so a follow
/// started from it keeps receiving input; release and motion handlers pull
/// in their counterparts the same way.
pub(crate) fn kinds_for(caps: Capabilities) -> RawEventKinds {
    let mut kinds = RawEventKinds::empty();
    if caps.contains(Capabilities::DOWN) {
        kinds |= RawEventKinds::MOUSE_DOWN
            | RawEventKinds::TOUCH_START
            | RawEventKinds::TOUCH_MOVE
            | RawEventKinds::TOUCH_END
            | RawEventKinds::TOUCH_CANCEL;
    }
    if caps.contains(Capabilities::UP) {
        kinds |= RawEventKinds::MOUSE_UP | RawEventKinds::TOUCH_END | RawEventKinds::TOUCH_CANCEL;
    }
    if caps.contains(Capabilities::MOVE) {
        kinds |= RawEventKinds::MOUSE_MOVE
            | RawEventKinds::TOUCH_MOVE
            | RawEventKinds::TOUCH_END
            | RawEventKinds::TOUCH_CANCEL;
    }
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_per_source() {
        let mouse = RawInput::MouseMove(MouseInput {
            x: 1.0,
            y: 2.0,
            button: None,
        });
        assert_eq!(mouse.identity(), PointerIdentity::Mouse);

        let touch = RawInput::TouchStart(TouchInput {
            id: TouchId(7),
            x: 1.0,
            y: 2.0,
        });
        assert_eq!(touch.identity(), PointerIdentity::Touch(TouchId(7)));
        assert_eq!(touch.position(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_kinds_for_down_includes_follow_stream() {
        let kinds = kinds_for(Capabilities::DOWN);
        assert!(kinds.contains(RawEventKinds::MOUSE_DOWN));
        assert!(kinds.contains(RawEventKinds::TOUCH_START));
        assert!(kinds.contains(RawEventKinds::TOUCH_END));
        assert!(!kinds.contains(RawEventKinds::MOUSE_MOVE));
    }

    #[test]
    fn test_kinds_merge_is_idempotent() {
        let once = kinds_for(Capabilities::DOWN | Capabilities::MOVE);
        let mut twice = once;
        twice |= kinds_for(Capabilities::DOWN);
        assert_eq!(once, twice);
    }
}
