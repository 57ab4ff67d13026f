//! The paint pass: one back-to-front walk of the layer tree per frame.
//!
//! Every layer paints inside its own transform frame (translate, then
//! rotate when the rotation is non-negligible): background fill/stroke,
//! then the text run for text layers, then the delegate's custom drawing
//! on a freshly reset path, then children in ascending z order.

use std::borrow::Cow;

use crate::assets::Assets;
use crate::delegate::{Capabilities, Delegate};
use crate::layout;
use crate::scene::{Layer, LayerId, LayerKind, LayerTree, TextState, ROTATION_EPSILON};
use crate::style::Color;
use crate::surface::Surface;

/// Children of `id` in paint order: ascending z, stable for equal keys.
///
/// When every child shares the first child's z the slice is returned
/// borrowed and no sort runs: insertion order is already paint order.
pub(crate) fn z_ordered(tree: &LayerTree, id: LayerId) -> Cow<'_, [LayerId]> {
    let children = tree[id].children();
    let Some((&first, rest)) = children.split_first() else {
        return Cow::Borrowed(children);
    };
    let z = tree[first].z;
    if rest.iter().all(|&c| tree[c].z == z) {
        return Cow::Borrowed(children);
    }
    let mut sorted = children.to_vec();
    sorted.sort_by_key(|&c| tree[c].z);
    Cow::Owned(sorted)
}

/// Trace a rounded rectangle into the surface's current path.
pub(crate) fn rounded_rect(g: &mut dyn Surface, x: f64, y: f64, width: f64, height: f64, r: f64) {
    g.begin_path();
    g.move_to(x + r, y);
    g.line_to(x + width - r, y);
    g.quad_to(x + width, y, x + width, y + r);
    g.line_to(x + width, y + height - r);
    g.quad_to(x + width, y + height, x + width - r, y + height);
    g.line_to(x + r, y + height);
    g.quad_to(x, y + height, x, y + height - r);
    g.line_to(x, y + r);
    g.quad_to(x, y, x + r, y);
    g.close_path();
}

/// Paint one layer and its subtree inside its transform frame. Hidden
/// layers (and their subtrees) are skipped entirely.
pub(crate) fn draw_layer(
    tree: &mut LayerTree,
    assets: &Assets,
    g: &mut dyn Surface,
    id: LayerId,
    default_font: &str,
) {
    let Some(layer) = tree.get(id) else { return };
    if layer.style.hidden {
        return;
    }
    let (x, y, rotation) = (layer.x, layer.y, layer.rotation);
    g.save();
    g.translate(x, y);
    if rotation.abs() >= ROTATION_EPSILON {
        g.rotate(rotation);
    }
    draw_content(tree, assets, g, id, default_font);
    g.restore();
}

fn draw_content(
    tree: &mut LayerTree,
    assets: &Assets,
    g: &mut dyn Surface,
    id: LayerId,
    default_font: &str,
) {
    // A text edit between layout and paint still renders measured.
    if matches!(tree[id].kind, LayerKind::Text(_)) {
        layout::measure_text(tree, id, g, default_font);
    }

    {
        let layer = &tree[id];
        draw_background(layer, assets, g);
        if let LayerKind::Text(state) = &layer.kind {
            draw_text(layer, state, g, default_font);
        }
    }

    // Delegate drawing happens on a freshly reset path. The delegate is
    // lifted out of its slot for the call so it can borrow the layer.
    let caps = tree[id].delegate_capabilities();
    if let Some(mut delegate) = tree[id].delegate.take() {
        match &mut delegate {
            Delegate::Paint(f) => {
                g.begin_path();
                f(g, &tree[id]);
            }
            Delegate::Object(d) if caps.contains(Capabilities::DRAW) => {
                g.begin_path();
                d.draw(g, &tree[id]);
            }
            Delegate::Object(_) => {}
        }
        let layer = &mut tree[id];
        if layer.delegate.is_none() {
            layer.delegate = Some(delegate);
        }
    }

    let order = z_ordered(tree, id).into_owned();
    for child in order {
        draw_layer(tree, assets, g, child, default_font);
    }
}

fn draw_background(layer: &Layer, assets: &Assets, g: &mut dyn Surface) {
    let style = &layer.style;
    if style.background.is_some() || style.border.is_some() {
        if style.corner_radius > 0.0 {
            rounded_rect(g, 0.0, 0.0, layer.width, layer.height, style.corner_radius);
        } else {
            g.begin_path();
            g.rect(0.0, 0.0, layer.width, layer.height);
        }
        if let Some(color) = style.background {
            g.fill(color);
        }
        if let Some(color) = style.border {
            g.stroke(color, style.stroke_width());
        }
    }
    if let Some(image) = style.background_image {
        if assets.is_ready(image) {
            g.draw_image(image, 0.0, 0.0, layer.width, layer.height);
        }
    }
}

fn draw_text(layer: &Layer, state: &TextState, g: &mut dyn Surface, default_font: &str) {
    g.set_font(layer.style.font.as_deref().unwrap_or(default_font));
    let padding = layer.style.padding;
    let x = padding;
    let y = padding + (layer.height - padding * 2.0) * 0.8;
    if let Some(shadow) = layer.style.shadow_color {
        g.fill_text(&state.text, x - 1.0, y - 1.0, shadow);
    }
    g.fill_text(&state.text, x, y, layer.style.color.unwrap_or(Color::BLACK));
}
