//! The external 2D drawing surface.
//!
//! The core never talks to a real canvas; it emits draw calls through this
//! trait and the host maps them onto whatever immediate-mode 2D API it has
//! (an HTML canvas context, a software rasterizer, a recording buffer in
//! tests). Paint state is explicit: fills and strokes take their color per
//! call instead of relying on ambient surface state.

use crate::assets::ImageId;
use crate::style::Color;

/// An immediate-mode 2D drawing surface.
///
/// Path construction calls accumulate into the surface's current path;
/// [`fill`](Self::fill) and [`stroke`](Self::stroke) consume it. The render
/// pass always begins a fresh path before handing the surface to a delegate.
pub trait Surface {
    /// Reset the current path.
    fn begin_path(&mut self);

    /// Move the path cursor without drawing.
    fn move_to(&mut self, x: f64, y: f64);

    /// Add a straight segment to the current path.
    fn line_to(&mut self, x: f64, y: f64);

    /// Add a quadratic curve through control point (`cx`, `cy`).
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);

    /// Close the current subpath.
    fn close_path(&mut self);

    /// Add an axis-aligned rectangle subpath.
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fill the current path.
    fn fill(&mut self, color: Color);

    /// Stroke the current path.
    fn stroke(&mut self, color: Color, line_width: f64);

    /// Push the current transform state.
    fn save(&mut self);

    /// Pop back to the most recently saved transform state.
    fn restore(&mut self);

    /// Translate subsequent drawing.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Rotate subsequent drawing around the current origin.
    fn rotate(&mut self, radians: f64);

    /// Blit a loaded image into the given rectangle.
    fn draw_image(&mut self, image: ImageId, x: f64, y: f64, width: f64, height: f64);

    /// Set the font descriptor used by text fill and measurement.
    fn set_font(&mut self, font: &str);

    /// Fill a run of text at the given baseline position.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color);

    /// Measure the advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f64;
}
