//! The scene: one mounted layer tree plus its frame, asset, and input
//! bookkeeping.
//!
//! A [`Scene`] is the context everything else is explicit about: layers are
//! created through its factories, attached through its `add` operations,
//! and rendered/dispatched through it. There is no process-wide current
//! scene. The host supplies two collaborators at construction, a
//! [`FrameScheduler`] it asks for display-refresh callbacks and an
//! [`AssetLoader`] that fetches images, and feeds raw input and frame
//! callbacks back in.

mod layer;
mod tree;

pub use layer::{Layer, LayerId, LayerKind, TextState};
pub use tree::LayerTree;

pub(crate) use layer::ROTATION_EPSILON;

use tracing::trace;

use crate::assets::{Assets, ImageId, ImageState};
use crate::delegate::{Component, Delegate};
use crate::event::{kinds_for, Dispatcher, RawEventKinds};
use crate::layout;
use crate::render;
use crate::style::Style;
use crate::surface::Surface;

/// Host callback scheduler: invokes the scene's render once per display
/// refresh after a request. The scene requests at most one outstanding
/// callback at a time.
pub trait FrameScheduler {
    /// Ask for one frame callback.
    fn request_frame(&mut self);
}

/// Host asset fetcher. `load` must eventually be answered by exactly one
/// [`Scene::image_loaded`] or [`Scene::image_failed`] for the id.
pub trait AssetLoader {
    /// Begin fetching `url` for the given handle.
    fn load(&mut self, id: ImageId, url: &str);
}

/// Configuration for a scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Default font descriptor, assigned to the surface every frame and
    /// used by text layers without their own font.
    pub font: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 300.0,
            font: "24px Arial".to_owned(),
        }
    }
}

/// A mounted scene graph.
///
/// The scene counts as one pending asset from construction until
/// [`mount`](Self::mount), so readiness cannot fire before the host has a
/// surface attached. Renders are skipped, not deferred, while anything is
/// pending.
pub struct Scene {
    pub(crate) tree: LayerTree,
    root: LayerId,
    config: SceneConfig,
    width: f64,
    height: f64,
    scheduled: bool,
    mounted: bool,
    pub(crate) assets: Assets,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) listens: RawEventKinds,
    ready_hook: Option<Box<dyn FnOnce(&mut Self)>>,
    render_hook: Option<Box<dyn FnMut(&mut Self)>>,
    scheduler: Box<dyn FrameScheduler>,
    loader: Box<dyn AssetLoader>,
}

impl Scene {
    /// Create a scene with a root group sized to the configured viewport.
    ///
    /// An initial frame is requested immediately; it will be skipped until
    /// [`mount`](Self::mount) clears the construction-time pending token.
    pub fn new(
        config: SceneConfig,
        scheduler: impl FrameScheduler + 'static,
        loader: impl AssetLoader + 'static,
    ) -> Self {
        let mut tree = LayerTree::new();
        let root = tree.insert(LayerKind::Group, Style::default());
        tree[root].width = config.width;
        tree[root].height = config.height;

        let mut assets = Assets::new();
        // The mount itself is the first pending asset.
        assets.begin_pending();

        let mut scene = Self {
            tree,
            root,
            width: config.width,
            height: config.height,
            config,
            scheduled: false,
            mounted: false,
            assets,
            dispatcher: Dispatcher::default(),
            listens: RawEventKinds::empty(),
            ready_hook: None,
            render_hook: None,
            scheduler: Box::new(scheduler),
            loader: Box::new(loader),
        };
        scene.schedule();
        scene
    }

    // -- Introspection --

    /// The root layer.
    pub const fn root(&self) -> LayerId {
        self.root
    }

    /// Viewport width.
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Viewport height.
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// The layer tree.
    pub const fn tree(&self) -> &LayerTree {
        &self.tree
    }

    /// The layer tree, mutably.
    pub fn tree_mut(&mut self) -> &mut LayerTree {
        &mut self.tree
    }

    /// Shared access to one layer.
    ///
    /// # Panics
    ///
    /// On a stale id.
    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.tree[id]
    }

    /// Mutable access to one layer.
    ///
    /// # Panics
    ///
    /// On a stale id.
    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.tree[id]
    }

    /// The raw event kinds the host should subscribe to, derived from the
    /// delegates installed so far.
    pub const fn required_events(&self) -> RawEventKinds {
        self.listens
    }

    /// Whether a frame request is outstanding.
    pub const fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Whether every pending asset (including the mount) has settled.
    pub fn is_ready(&self) -> bool {
        self.assets.pending() == 0
    }

    /// Number of outstanding asset completions.
    pub fn pending_assets(&self) -> usize {
        self.assets.pending()
    }

    // -- Construction --

    /// Create a detached plain layer.
    pub fn new_layer(&mut self, style: Style) -> LayerId {
        self.tree.insert(LayerKind::Plain, style)
    }

    /// Create a detached group container.
    pub fn new_group(&mut self, style: Style) -> LayerId {
        self.tree.insert(LayerKind::Group, style)
    }

    /// Create a detached column container.
    pub fn new_column(&mut self, style: Style) -> LayerId {
        self.tree.insert(LayerKind::Column, style)
    }

    /// Create a detached row container.
    pub fn new_row(&mut self, style: Style) -> LayerId {
        self.tree.insert(LayerKind::Row, style)
    }

    /// Create a detached text layer. It sizes itself at the next layout.
    pub fn new_text(&mut self, text: impl Into<String>, style: Style) -> LayerId {
        self.tree.insert(
            LayerKind::Text(TextState {
                text: text.into(),
                measured: None,
            }),
            style,
        )
    }

    /// Install or clear a layer's delegate, updating the interactive flag
    /// and merging the delegate's raw event kinds into the scene's mask.
    pub fn set_delegate(&mut self, id: LayerId, delegate: Option<Delegate>) {
        let caps = self.tree[id].install_delegate(delegate);
        self.listens |= kinds_for(caps);
    }

    /// Attach `child` to `container`.
    ///
    /// # Panics
    ///
    /// If `container` is not a container or `child` already has a parent.
    pub fn add(&mut self, container: LayerId, child: LayerId) {
        self.tree.add_child(container, child);
    }

    /// Attach a component's layer to `container`. If the layer has no
    /// delegate yet, the component becomes its delegate.
    pub fn add_component<C: Component + 'static>(
        &mut self,
        container: LayerId,
        component: C,
    ) -> LayerId {
        let id = component.layer();
        assert!(
            self.tree.contains_layer(id),
            "component layer does not exist"
        );
        if self.tree[id].delegate.is_none() {
            self.set_delegate(id, Some(Delegate::Object(Box::new(component))));
        }
        self.tree.add_child(container, id);
        id
    }

    /// Detach `child` from `container`.
    ///
    /// # Panics
    ///
    /// If `child`'s parent is not `container`.
    pub fn remove_child(&mut self, container: LayerId, child: LayerId) {
        self.tree.remove_child(container, child);
    }

    /// Detach a layer from its parent, if any. It can be re-added later.
    pub fn remove(&mut self, id: LayerId) {
        self.tree.remove(id);
    }

    /// Detach a layer and free its whole subtree.
    pub fn destroy(&mut self, id: LayerId) {
        self.tree.destroy(id);
    }

    // -- Frames --

    /// Request a render. Harmless to call any number of times between
    /// frames: requests coalesce into at most one outstanding callback.
    pub fn schedule(&mut self) {
        if self.scheduled {
            return;
        }
        self.scheduled = true;
        self.scheduler.request_frame();
    }

    /// Resize the viewport; the root is re-pinned to it next frame.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.schedule();
    }

    /// Run before every non-skipped render, ahead of layout.
    pub fn on_render(&mut self, hook: impl FnMut(&mut Self) + 'static) {
        self.render_hook = Some(Box::new(hook));
    }

    /// Render one frame: layout, then paint, through the given surface.
    ///
    /// Called by the host from the frame callback it granted via
    /// [`FrameScheduler::request_frame`]. Skipped outright while assets
    /// are pending.
    pub fn render(&mut self, g: &mut dyn Surface) {
        self.scheduled = false;
        if self.assets.pending() > 0 {
            trace!(
                pending = self.assets.pending(),
                "render skipped while assets load"
            );
            return;
        }
        if let Some(mut hook) = self.render_hook.take() {
            hook(self);
            if self.render_hook.is_none() {
                self.render_hook = Some(hook);
            }
        }

        let root = self.root;
        {
            let r = &mut self.tree[root];
            r.x = 0.0;
            r.y = 0.0;
            r.width = self.width;
            r.height = self.height;
        }
        layout::run(&mut self.tree, root, g, &self.config.font);

        g.set_font(&self.config.font);
        g.save();
        render::draw_layer(&mut self.tree, &self.assets, g, root, &self.config.font);
        g.restore();
    }

    // -- Assets & readiness --

    /// Signal that the host attached its surface. Counts down the
    /// construction-time pending token; a second call is ignored.
    pub fn mount(&mut self) {
        if self.mounted {
            tracing::warn!("scene mounted twice");
            return;
        }
        self.mounted = true;
        self.asset_done();
    }

    /// Register an image by URL. Returns the existing handle for a URL
    /// already seen; otherwise starts a load through the asset loader and
    /// counts it pending.
    pub fn load_image(&mut self, url: &str) -> ImageId {
        if let Some(id) = self.assets.lookup(url) {
            return id;
        }
        let id = self.assets.insert(url);
        self.loader.load(id, url);
        id
    }

    /// The loader finished an image successfully.
    pub fn image_loaded(&mut self, id: ImageId) {
        self.assets.mark(id, ImageState::Ready);
        self.asset_done();
    }

    /// The loader failed an image. Logged and counted as done so readiness
    /// is never blocked by one bad asset.
    pub fn image_failed(&mut self, id: ImageId) {
        self.assets.mark(id, ImageState::Failed);
        self.asset_done();
    }

    /// Current state of a registered image.
    pub fn image_state(&self, id: ImageId) -> Option<ImageState> {
        self.assets.state(id)
    }

    /// The URL an image was registered under.
    pub fn image_url(&self, id: ImageId) -> Option<&str> {
        self.assets.url(id)
    }

    /// Run once everything pending has settled. Fires exactly once, even
    /// if further completion signals arrive.
    pub fn when_ready(&mut self, hook: impl FnOnce(&mut Self) + 'static) {
        self.ready_hook = Some(Box::new(hook));
    }

    fn asset_done(&mut self) {
        if !self.assets.complete_one() {
            return;
        }
        self.schedule();
        if let Some(hook) = self.ready_hook.take() {
            hook(self);
        }
    }
}
