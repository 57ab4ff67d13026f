//! # Lamina
//!
//! A retained-mode scene graph for 2D canvas rendering.
//!
//! Lamina maintains a tree of rectangular layers, each with a visual style
//! and an optional delegate supplying custom drawing and input handling.
//! The tree is laid out with flexbox-like row/column flow, painted
//! back-to-front in z order, and hit-tested to route pointer and touch
//! input to the deepest interactive layer, including a modal "follow"
//! stream for drag gestures.
//!
//! ## Core Concepts
//!
//! - **Layers in an arena**: nodes are [`LayerId`] handles into the scene's
//!   slot map; the parent back-link is a key, never a second owner
//! - **Delegates**: a bare paint closure or an object with any subset of
//!   draw/layout/input hooks, declared via [`Capabilities`]
//! - **Coalesced frames**: any number of changes between frames collapse
//!   into one scheduled render pass
//! - **External collaborators**: the drawing surface, asset loader, frame
//!   scheduler, and raw input source are traits the host implements
//!
//! ## Example
//!
//! ```rust,ignore
//! use lamina::{Color, Scene, SceneConfig, Style};
//!
//! let mut scene = Scene::new(SceneConfig::default(), scheduler, loader);
//! let root = scene.root();
//!
//! let column = scene.new_column(Style::default());
//! scene.add(root, column);
//!
//! let badge = scene.new_layer(Style::with_background(Color::from_u32(0xFF5500)));
//! scene.layer_mut(badge).height = 40.0;
//! scene.add(column, badge);
//!
//! scene.mount();
//! // Host frame callback:
//! scene.render(&mut surface);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod assets;
pub mod delegate;
pub mod event;
pub mod geometry;
pub mod scene;
pub mod style;
pub mod surface;

mod layout;
mod render;

#[cfg(test)]
pub(crate) mod testutil;

// Re-exports for convenience
pub use assets::{ImageId, ImageState};
pub use delegate::{Capabilities, Component, Delegate, EventOutcome, LayerDelegate};
pub use event::{
    EventCtx, EventKind, MouseButton, MouseInput, PointerEvent, PointerIdentity, RawEventKinds,
    RawInput, TouchId, TouchInput,
};
pub use geometry::{Point, Rect, Vec2};
pub use scene::{
    AssetLoader, FrameScheduler, Layer, LayerId, LayerKind, LayerTree, Scene, SceneConfig,
    TextState,
};
pub use style::{Align, Color, Justify, Position, Style};
pub use surface::Surface;
