//! Visual style and layout hints attached to layers.
//!
//! A [`Style`] is a plain attribute bag. Unset options fall back to the
//! defaults the render and layout passes apply (no background, 1.0 stroke
//! width, `Stretch` item alignment, `Center` content justification).

use crate::assets::ImageId;

/// True-color RGBA representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0-255, 255 = opaque)
    pub a: u8,
}

impl Color {
    /// Create a new opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color with an explicit alpha channel.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create an opaque color from a 24-bit hex value (e.g. `0xFF5500`).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// Cross-axis alignment of a child inside a flow container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Pin to the start edge of the cross axis.
    Start,
    /// Leaves the cross-axis position untouched. This is not true
    /// centering; scenes rely on the position passing through unchanged.
    Center,
    /// Pin to the end edge of the cross axis.
    End,
    /// Pin to the start edge and force the child to the container's
    /// cross-axis size.
    #[default]
    Stretch,
}

/// Main-axis distribution of leftover space when no child grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    /// Children packed at the start, leftover after them.
    Start,
    /// Leftover split evenly before and after the children.
    #[default]
    Center,
    /// Children packed at the end, leftover before them.
    End,
}

/// Whether a layer takes part in flow layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Positioned by the parent's flow pass.
    #[default]
    Flow,
    /// Excluded from flow; stays wherever the caller put it.
    Absolute,
}

/// Visual style and layout hints for a layer.
///
/// All fields are optional in spirit: `Style::default()` renders nothing
/// and flows with no padding, no gutter, and no growth.
#[derive(Debug, Clone, Default)]
pub struct Style {
    /// Background fill color.
    pub background: Option<Color>,
    /// Border stroke color.
    pub border: Option<Color>,
    /// Border stroke width; strokes default to 1.0 when unset.
    pub border_width: Option<f64>,
    /// Corner radius for the background/border path.
    pub corner_radius: f64,
    /// Background image, stretched over the layer bounds once loaded.
    pub background_image: Option<ImageId>,
    /// Inner padding applied by flow containers and the text layer.
    pub padding: f64,
    /// Space between consecutive flow children.
    pub gutter: f64,
    /// Share of leftover main-axis space this layer absorbs.
    pub grow: f64,
    /// Per-child override of the container's item alignment.
    pub align_self: Option<Align>,
    /// Cross-axis alignment applied to children of this container.
    pub align_items: Align,
    /// Main-axis distribution of leftover space (ignored once any child
    /// has a positive grow factor).
    pub justify_content: Justify,
    /// Minimum width override used by flow measurement.
    pub min_width: Option<f64>,
    /// Minimum height override used by flow measurement.
    pub min_height: Option<f64>,
    /// Skip this layer (and its subtree) when painting.
    pub hidden: bool,
    /// Flow participation.
    pub position: Position,
    /// Text fill color; black when unset.
    pub color: Option<Color>,
    /// Font descriptor for text layers; the scene default when unset.
    pub font: Option<String>,
    /// When set, text is first painted offset by (-1, -1) in this color.
    pub shadow_color: Option<Color>,
}

impl Style {
    /// Style with just a background fill.
    pub fn with_background(color: Color) -> Self {
        Self {
            background: Some(color),
            ..Self::default()
        }
    }

    /// Effective border stroke width.
    #[inline]
    pub fn stroke_width(&self) -> f64 {
        self.border_width.unwrap_or(1.0)
    }
}
