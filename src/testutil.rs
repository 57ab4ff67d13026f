//! Shared test doubles: a recording surface with deterministic metrics, a
//! counting frame scheduler, and a no-op asset loader.

use std::cell::Cell;
use std::rc::Rc;

use unicode_width::UnicodeWidthStr;

use crate::assets::ImageId;
use crate::scene::{AssetLoader, FrameScheduler, Scene, SceneConfig};
use crate::style::Color;
use crate::surface::Surface;

/// Pixels per text column in [`RecordingSurface`] metrics.
const GLYPH_PX: f64 = 10.0;

/// A surface that logs every call as a formatted op string.
pub(crate) struct RecordingSurface {
    /// Every op in call order.
    pub(crate) ops: Vec<String>,
    measures: usize,
}

impl RecordingSurface {
    pub(crate) fn new() -> Self {
        Self {
            ops: Vec::new(),
            measures: 0,
        }
    }

    /// How many `measure_text` calls have been made.
    pub(crate) fn measure_count(&self) -> usize {
        self.measures
    }
}

impl Surface for RecordingSurface {
    fn begin_path(&mut self) {
        self.ops.push("begin_path".to_owned());
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(format!("move_to({x}, {y})"));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(format!("line_to({x}, {y})"));
    }

    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.ops.push(format!("quad_to({cx}, {cy}, {x}, {y})"));
    }

    fn close_path(&mut self) {
        self.ops.push("close_path".to_owned());
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(format!("rect({x}, {y}, {width}, {height})"));
    }

    fn fill(&mut self, color: Color) {
        self.ops.push(format!("fill {color:?}"));
    }

    fn stroke(&mut self, color: Color, line_width: f64) {
        self.ops.push(format!("stroke {color:?} {line_width}"));
    }

    fn save(&mut self) {
        self.ops.push("save".to_owned());
    }

    fn restore(&mut self) {
        self.ops.push("restore".to_owned());
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(format!("translate({dx}, {dy})"));
    }

    fn rotate(&mut self, radians: f64) {
        self.ops.push(format!("rotate({radians})"));
    }

    fn draw_image(&mut self, _image: ImageId, x: f64, y: f64, width: f64, height: f64) {
        self.ops
            .push(format!("draw_image({x}, {y}, {width}, {height})"));
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(format!("set_font {font}"));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        self.ops
            .push(format!("fill_text \"{text}\" ({x}, {y}) {color:?}"));
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.measures += 1;
        text.width() as f64 * GLYPH_PX
    }
}

/// A scheduler that counts frame requests into a shared cell.
pub(crate) struct CountingScheduler {
    requests: Rc<Cell<usize>>,
}

impl CountingScheduler {
    pub(crate) fn new(requests: &Rc<Cell<usize>>) -> Self {
        Self {
            requests: requests.clone(),
        }
    }
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requests.set(self.requests.get() + 1);
    }
}

/// A loader that never answers; tests signal completion directly.
pub(crate) struct NoopLoader;

impl AssetLoader for NoopLoader {
    fn load(&mut self, _id: ImageId, _url: &str) {}
}

/// A mounted 400x300 scene with a counting scheduler, its pending frame
/// already consumed so the next `schedule()` requests visibly.
pub(crate) fn test_scene() -> (Scene, Rc<Cell<usize>>) {
    let frames = Rc::new(Cell::new(0usize));
    let mut scene = Scene::new(
        SceneConfig::default(),
        CountingScheduler::new(&frames),
        NoopLoader,
    );
    scene.mount();
    let mut g = RecordingSurface::new();
    scene.render(&mut g);
    (scene, frames)
}
