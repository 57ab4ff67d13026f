//! Image assets and readiness accounting.
//!
//! Loading is the only asynchronous boundary in the crate. The scene hands
//! the actual fetch to an external [`AssetLoader`](crate::scene::AssetLoader)
//! and tracks one pending count across everything outstanding; the count
//! reaching zero is the "ready" edge. A failed load is logged and counted as
//! done; readiness is never blocked by one bad asset.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use tracing::{debug, warn};

new_key_type! {
    /// Handle to an image registered with the scene.
    pub struct ImageId;
}

/// Lifecycle state of a registered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    /// The loader has not reported back yet.
    Loading,
    /// Loaded and drawable.
    Ready,
    /// The load failed; the image is never drawn.
    Failed,
}

#[derive(Debug)]
struct ImageEntry {
    url: String,
    state: ImageState,
}

/// Registry of images plus the pending-asset counter.
#[derive(Debug, Default)]
pub(crate) struct Assets {
    images: SlotMap<ImageId, ImageEntry>,
    by_url: HashMap<String, ImageId>,
    pending: usize,
}

impl Assets {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of outstanding completion signals.
    pub(crate) fn pending(&self) -> usize {
        self.pending
    }

    /// Count one more outstanding asset.
    pub(crate) fn begin_pending(&mut self) {
        self.pending += 1;
    }

    /// Count one completion signal. Returns `true` on the edge where the
    /// pending count reaches zero. A signal arriving with nothing pending is
    /// logged and ignored rather than underflowing.
    pub(crate) fn complete_one(&mut self) -> bool {
        if self.pending == 0 {
            warn!("spurious asset completion signal with nothing pending");
            return false;
        }
        self.pending -= 1;
        self.pending == 0
    }

    /// Existing handle for a URL, if it was registered before.
    pub(crate) fn lookup(&self, url: &str) -> Option<ImageId> {
        self.by_url.get(url).copied()
    }

    /// Register a fresh URL. The new entry starts `Loading` and counts as
    /// pending.
    pub(crate) fn insert(&mut self, url: &str) -> ImageId {
        let id = self.images.insert(ImageEntry {
            url: url.to_owned(),
            state: ImageState::Loading,
        });
        self.by_url.insert(url.to_owned(), id);
        self.pending += 1;
        id
    }

    /// Record the loader's verdict for an image.
    pub(crate) fn mark(&mut self, id: ImageId, state: ImageState) {
        if let Some(entry) = self.images.get_mut(id) {
            match state {
                ImageState::Ready => debug!(url = %entry.url, "image loaded"),
                ImageState::Failed => warn!(url = %entry.url, "error loading image"),
                ImageState::Loading => {}
            }
            entry.state = state;
        } else {
            warn!("completion signal for unknown image handle");
        }
    }

    /// Current state of an image, if the handle is live.
    pub(crate) fn state(&self, id: ImageId) -> Option<ImageState> {
        self.images.get(id).map(|e| e.state)
    }

    /// Whether an image may be drawn.
    pub(crate) fn is_ready(&self, id: ImageId) -> bool {
        self.state(id) == Some(ImageState::Ready)
    }

    /// The URL an image was registered under.
    pub(crate) fn url(&self, id: ImageId) -> Option<&str> {
        self.images.get(id).map(|e| e.url.as_str())
    }
}
