//! Hit-testing dispatch and follow (drag) gesture routing.
//!
//! Per scene the dispatcher is a small state machine: **idle**, where every
//! press walks the tree root-down for the deepest interactive layer under
//! the point, and **following**, where one pointer identity's stream
//! bypasses the tree and goes straight to a registered callback until the
//! release. Touch identities follow independently of each other and of the
//! mouse.

use std::collections::HashMap;

use crate::delegate::{Capabilities, Delegate, EventOutcome};
use crate::event::input::{MouseButton, PointerIdentity, RawInput, TouchId};
use crate::event::PointerEvent;
use crate::geometry::Point;
use crate::scene::{LayerId, Scene};

/// Upper bound on concurrently followed touches. Exceeding it means follow
/// registrations are leaking, so it is an invariant assertion.
pub(crate) const MAX_TOUCH_FOLLOWS: usize = 10;

/// The class of input hook an event dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Press: `on_down`.
    Down,
    /// Release: `on_up`.
    Up,
    /// Motion: `on_move`.
    Move,
}

impl EventKind {
    const fn capability(self) -> Capabilities {
        match self {
            Self::Down => Capabilities::DOWN,
            Self::Up => Capabilities::UP,
            Self::Move => Capabilities::MOVE,
        }
    }
}

type FollowHandler = Box<dyn FnMut(&PointerEvent, &mut EventCtx<'_>)>;

/// One registered follow: the callback, the layer the gesture started on,
/// and where it started in global coordinates.
struct Follow {
    handler: FollowHandler,
    target: LayerId,
    start: Point,
}

/// Dispatcher state owned by the scene.
#[derive(Default)]
pub(crate) struct Dispatcher {
    mouse_follow: Option<Follow>,
    touch_follows: HashMap<TouchId, Follow>,
}

impl Dispatcher {
    pub(crate) fn is_following(&self, identity: PointerIdentity) -> bool {
        match identity {
            PointerIdentity::Mouse => self.mouse_follow.is_some(),
            PointerIdentity::Touch(id) => self.touch_follows.contains_key(&id),
        }
    }
}

/// Handler-side access to the scene during an input or follow callback.
///
/// Besides scene mutation, this is where a handler starts a follow: the
/// context knows which pointer identity and target layer the current event
/// belongs to.
pub struct EventCtx<'a> {
    pub(crate) scene: &'a mut Scene,
    target: LayerId,
    identity: PointerIdentity,
    position: Point,
}

impl EventCtx<'_> {
    /// The scene, for mutation from inside a handler.
    pub fn scene(&mut self) -> &mut Scene {
        self.scene
    }

    /// The layer the current event was delivered to.
    pub const fn target(&self) -> LayerId {
        self.target
    }

    /// Ask for a frame regardless of whether the event is consumed.
    pub fn request_redraw(&mut self) {
        self.scene.schedule();
    }

    /// Route the rest of this pointer's input stream to `handler`.
    ///
    /// The callback receives every subsequent move for the same pointer
    /// identity with coordinates relative to the current target and a
    /// cumulative delta from this event's position; the release arrives
    /// once more with `last` set, after which normal tree routing resumes.
    ///
    /// # Panics
    ///
    /// If more than `MAX_TOUCH_FOLLOWS` touch follows would be live.
    pub fn follow(&mut self, handler: impl FnMut(&PointerEvent, &mut EventCtx<'_>) + 'static) {
        let follow = Follow {
            handler: Box::new(handler),
            target: self.target,
            start: self.position,
        };
        match self.identity {
            PointerIdentity::Mouse => self.scene.dispatcher.mouse_follow = Some(follow),
            PointerIdentity::Touch(id) => {
                let follows = &mut self.scene.dispatcher.touch_follows;
                assert!(
                    follows.len() < MAX_TOUCH_FOLLOWS,
                    "too many concurrent touch follows"
                );
                follows.insert(id, follow);
            }
        }
    }
}

impl Scene {
    /// Feed one raw input record through the dispatcher.
    ///
    /// Returns `true` when the event was consumed by a hit test or routed
    /// to a follow callback; the host should then suppress its default
    /// behavior. Any handled input also requests a redraw.
    pub fn dispatch(&mut self, input: &RawInput) -> bool {
        let handled = match *input {
            RawInput::MouseDown(m) => {
                // Only the primary button starts a press dispatch.
                m.button == Some(MouseButton::Left)
                    && self.dispatch_tree(input, EventKind::Down, m.x, m.y)
            }
            RawInput::MouseMove(m) => {
                if self.dispatcher.is_following(PointerIdentity::Mouse) {
                    self.run_mouse_follow(input, m.x, m.y, false)
                } else {
                    self.dispatch_tree(input, EventKind::Move, m.x, m.y)
                }
            }
            RawInput::MouseUp(m) => {
                if self.dispatcher.is_following(PointerIdentity::Mouse) {
                    self.run_mouse_follow(input, m.x, m.y, true)
                } else {
                    self.dispatch_tree(input, EventKind::Up, m.x, m.y)
                }
            }
            RawInput::TouchStart(t) => self.dispatch_tree(input, EventKind::Down, t.x, t.y),
            RawInput::TouchMove(t) => {
                if self.dispatcher.is_following(PointerIdentity::Touch(t.id)) {
                    self.run_touch_follow(input, t.id, t.x, t.y, false)
                } else {
                    self.dispatch_tree(input, EventKind::Move, t.x, t.y)
                }
            }
            RawInput::TouchEnd(t) | RawInput::TouchCancel(t) => {
                if self.dispatcher.is_following(PointerIdentity::Touch(t.id)) {
                    self.run_touch_follow(input, t.id, t.x, t.y, true)
                } else {
                    self.dispatch_tree(input, EventKind::Up, t.x, t.y)
                }
            }
        };
        if handled {
            self.schedule();
        }
        handled
    }

    fn dispatch_tree(&mut self, input: &RawInput, kind: EventKind, x: f64, y: f64) -> bool {
        // Kinds nothing listens for were never subscribed to.
        if !self.listens.contains(input.kind_flag()) {
            return false;
        }
        let root = self.root();
        // The root sits at the origin, so local and global coincide.
        self.fire_event(root, x, y, x, y, input, kind)
    }

    /// Hit-test `id`'s subtree and dispatch `kind` to the deepest match.
    ///
    /// Children are probed in reverse insertion order (last added is
    /// topmost); z order is deliberately not consulted, diverging from
    /// paint order. The first child to consume the event wins; otherwise
    /// the layer itself is tested. Fails closed: a non-interactive layer or
    /// a point outside local bounds consumes nothing.
    pub fn fire_event(
        &mut self,
        id: LayerId,
        x: f64,
        y: f64,
        global_x: f64,
        global_y: f64,
        input: &RawInput,
        kind: EventKind,
    ) -> bool {
        let Some(layer) = self.tree.get(id) else {
            return false;
        };
        let children = layer.children().to_vec();
        for &child in children.iter().rev() {
            // Re-read per probe: an earlier handler may have moved or
            // detached a sibling.
            let Some(l) = self.tree.get(child) else { continue };
            if l.parent() != Some(id) {
                continue;
            }
            let (cx, cy) = (l.x, l.y);
            if self.fire_event(child, x - cx, y - cy, global_x, global_y, input, kind) {
                return true;
            }
        }
        let Some(layer) = self.tree.get(id) else {
            return false;
        };
        if !layer.is_interactive() || !layer.contains_local_xy(x, y) {
            return false;
        }
        self.run_event(id, x, y, global_x, global_y, input, kind)
    }

    /// Invoke the matching delegate hook on one layer. Consumption is the
    /// default; a handler returning [`EventOutcome::Bubble`] lets ancestors
    /// see the event.
    fn run_event(
        &mut self,
        id: LayerId,
        x: f64,
        y: f64,
        global_x: f64,
        global_y: f64,
        input: &RawInput,
        kind: EventKind,
    ) -> bool {
        if !self.tree[id]
            .delegate_capabilities()
            .contains(kind.capability())
        {
            return false;
        }
        let Some(mut delegate) = self.tree[id].delegate.take() else {
            return false;
        };
        let event = PointerEvent {
            x,
            y,
            global_x,
            global_y,
            target: id,
            source: *input,
            last: false,
            delta: None,
        };
        let outcome = if let Delegate::Object(d) = &mut delegate {
            let mut ctx = EventCtx {
                scene: self,
                target: id,
                identity: input.identity(),
                position: Point::new(global_x, global_y),
            };
            match kind {
                EventKind::Down => d.on_down(&event, &mut ctx),
                EventKind::Up => d.on_up(&event, &mut ctx),
                EventKind::Move => d.on_move(&event, &mut ctx),
            }
        } else {
            EventOutcome::Bubble
        };
        if let Some(layer) = self.tree.get_mut(id) {
            if layer.delegate.is_none() {
                layer.delegate = Some(delegate);
            }
        }
        outcome == EventOutcome::Consume
    }

    fn run_mouse_follow(&mut self, input: &RawInput, x: f64, y: f64, last: bool) -> bool {
        let Some(mut follow) = self.dispatcher.mouse_follow.take() else {
            return false;
        };
        self.invoke_follow(&mut follow, input, x, y, last);
        // Keep the registration unless this was the release or the callback
        // installed a replacement.
        if !last && self.dispatcher.mouse_follow.is_none() {
            self.dispatcher.mouse_follow = Some(follow);
        }
        true
    }

    fn run_touch_follow(
        &mut self,
        input: &RawInput,
        id: TouchId,
        x: f64,
        y: f64,
        last: bool,
    ) -> bool {
        let Some(mut follow) = self.dispatcher.touch_follows.remove(&id) else {
            return false;
        };
        self.invoke_follow(&mut follow, input, x, y, last);
        if !last && !self.dispatcher.touch_follows.contains_key(&id) {
            self.dispatcher.touch_follows.insert(id, follow);
        }
        true
    }

    fn invoke_follow(&mut self, follow: &mut Follow, input: &RawInput, x: f64, y: f64, last: bool) {
        let target = follow.target;
        assert!(
            self.tree.contains_layer(target),
            "follow target no longer exists"
        );
        let origin = self.tree.to_global(target);
        let event = PointerEvent {
            x: x - origin.x,
            y: y - origin.y,
            global_x: x,
            global_y: y,
            target,
            source: *input,
            last,
            delta: Some(Point::new(x, y).delta_from(follow.start)),
        };
        let mut ctx = EventCtx {
            scene: self,
            target,
            identity: input.identity(),
            position: Point::new(x, y),
        };
        (follow.handler)(&event, &mut ctx);
    }
}
