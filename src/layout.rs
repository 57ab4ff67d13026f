//! The flow layout engine.
//!
//! Layout is stateless: every pass recomputes child geometry purely from the
//! current styles and container size. Column and Row are the same algorithm
//! transposed, so one function parameterized by [`Axis`] implements both:
//!
//! 1. Run the container's own delegate layout hook.
//! 2. Recurse into children, summing flow children's main-axis minimums and
//!    grow weights (absolutely-positioned children are skipped entirely).
//! 3. Add gutter spacing, compute leftover space.
//! 4. Zero grow weight: distribute leftover per `justify_content`. Nonzero:
//!    distribute leftover proportionally to grow factors instead.
//! 5. Position each flow child at the floored cursor, resolve cross-axis
//!    alignment, expand growing children, advance the cursor.
//!
//! Overflow is allowed: negative leftover produces overlapping or negative
//! offsets without clamping.

use crate::delegate::{Capabilities, Delegate};
use crate::scene::{Layer, LayerId, LayerKind, LayerTree};
use crate::style::{Align, Justify, Position};
use crate::surface::Surface;

/// The main axis of a flow container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    /// Column: flows along y, aligns along x.
    Vertical,
    /// Row: flows along x, aligns along y.
    Horizontal,
}

impl Axis {
    fn main_size(self, layer: &Layer) -> f64 {
        match self {
            Self::Vertical => layer.height,
            Self::Horizontal => layer.width,
        }
    }

    fn set_main_size(self, layer: &mut Layer, size: f64) {
        match self {
            Self::Vertical => layer.height = size,
            Self::Horizontal => layer.width = size,
        }
    }

    fn cross_size(self, layer: &Layer) -> f64 {
        match self {
            Self::Vertical => layer.width,
            Self::Horizontal => layer.height,
        }
    }

    fn set_cross_size(self, layer: &mut Layer, size: f64) {
        match self {
            Self::Vertical => layer.width = size,
            Self::Horizontal => layer.height = size,
        }
    }

    fn min_main(self, layer: &Layer) -> f64 {
        match self {
            Self::Vertical => layer.min_height(),
            Self::Horizontal => layer.min_width(),
        }
    }

    fn set_main_pos(self, layer: &mut Layer, pos: f64) {
        match self {
            Self::Vertical => layer.y = pos,
            Self::Horizontal => layer.x = pos,
        }
    }

    fn set_cross_pos(self, layer: &mut Layer, pos: f64) {
        match self {
            Self::Vertical => layer.x = pos,
            Self::Horizontal => layer.y = pos,
        }
    }
}

/// Lay out a layer and its subtree. The surface supplies text metrics.
pub(crate) fn run(tree: &mut LayerTree, id: LayerId, g: &mut dyn Surface, default_font: &str) {
    let Some(layer) = tree.get(id) else { return };
    match layer.kind {
        LayerKind::Plain => delegate_hook(tree, id),
        LayerKind::Group => {
            // A plain container only recurses; it has no flow pass and does
            // not run its own delegate hook.
            let children = tree[id].children.clone();
            for child in children {
                run(tree, child, g, default_font);
            }
        }
        LayerKind::Column => flow(tree, id, g, Axis::Vertical, default_font),
        LayerKind::Row => flow(tree, id, g, Axis::Horizontal, default_font),
        LayerKind::Text(_) => measure_text(tree, id, g, default_font),
    }
}

/// Run the delegate's layout hook, if it declares one.
fn delegate_hook(tree: &mut LayerTree, id: LayerId) {
    let Some(layer) = tree.get_mut(id) else { return };
    if !layer.delegate_capabilities().contains(Capabilities::LAYOUT) {
        return;
    }
    let Some(mut delegate) = layer.delegate.take() else {
        return;
    };
    if let Delegate::Object(d) = &mut delegate {
        d.layout(&mut tree[id]);
    }
    let layer = &mut tree[id];
    if layer.delegate.is_none() {
        layer.delegate = Some(delegate);
    }
}

fn flow(tree: &mut LayerTree, id: LayerId, g: &mut dyn Surface, axis: Axis, default_font: &str) {
    delegate_hook(tree, id);

    let children = tree[id].children.clone();
    let padding = tree[id].style.padding;
    let gutter = tree[id].style.gutter;

    let mut grow_total = 0.0_f64;
    let mut content = padding * 2.0;
    for &child in &children {
        run(tree, child, g, default_font);
        let layer = &tree[child];
        if layer.style.position == Position::Absolute {
            continue;
        }
        content += axis.min_main(layer);
        grow_total += layer.style.grow.max(0.0);
    }
    content += gutter * children.len().saturating_sub(1) as f64;

    let container = &tree[id];
    let main_extent = axis.main_size(container);
    let cross_extent = axis.cross_size(container);
    let parent_align = container.style.align_items;
    let justify = container.style.justify_content;

    let mut cursor = padding;
    let leftover = main_extent - content;
    let mut grow_unit = 0.0_f64;
    if grow_total == 0.0 {
        match justify {
            Justify::Start => {}
            Justify::End => cursor += leftover,
            Justify::Center => cursor += leftover / 2.0,
        }
    } else {
        grow_unit = leftover / grow_total;
    }

    for &child in &children {
        if tree[child].style.position == Position::Absolute {
            continue;
        }
        let layer = &mut tree[child];
        match layer.style.align_self.unwrap_or(parent_align) {
            Align::Start => axis.set_cross_pos(layer, 0.0),
            // See Align::Center: the cross-axis position is left untouched.
            Align::Center => {}
            Align::End => {
                let pos = cross_extent - axis.cross_size(layer);
                axis.set_cross_pos(layer, pos);
            }
            Align::Stretch => {
                axis.set_cross_pos(layer, 0.0);
                axis.set_cross_size(layer, cross_extent);
            }
        }
        axis.set_main_pos(layer, cursor.floor());
        if grow_unit != 0.0 && layer.style.grow > 0.0 {
            let grown = (axis.min_main(layer) + layer.style.grow * grow_unit).floor();
            axis.set_main_size(layer, grown);
        }
        cursor += axis.main_size(layer) + gutter;
    }
}

/// Re-measure a text layer if its string changed since the last pass.
pub(crate) fn measure_text(
    tree: &mut LayerTree,
    id: LayerId,
    g: &mut dyn Surface,
    default_font: &str,
) {
    let (width, height, text) = {
        let layer = &tree[id];
        let LayerKind::Text(state) = &layer.kind else {
            return;
        };
        if state.measured.as_ref() == Some(&state.text) {
            return;
        }
        let padding = layer.style.padding;
        g.set_font(layer.style.font.as_deref().unwrap_or(default_font));
        let width = g.measure_text(&state.text) + padding * 2.0;
        // No portable access to ascent/descent metrics; a reference glyph
        // approximates the line height.
        let height = 2.0 + g.measure_text("W") + padding * 2.0;
        (width, height, state.text.clone())
    };
    let layer = &mut tree[id];
    layer.width = width;
    layer.height = height;
    if let LayerKind::Text(state) = &mut layer.kind {
        state.measured = Some(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::LayerDelegate;
    use crate::style::Style;
    use crate::testutil::RecordingSurface;

    fn column(tree: &mut LayerTree, height: f64) -> LayerId {
        let id = tree.insert(LayerKind::Column, Style::default());
        tree[id].width = 100.0;
        tree[id].height = height;
        id
    }

    fn child(tree: &mut LayerTree, parent: LayerId, height: f64) -> LayerId {
        let id = tree.insert(LayerKind::Plain, Style::default());
        tree[id].width = 40.0;
        tree[id].height = height;
        tree.add_child(parent, id);
        id
    }

    fn layout(tree: &mut LayerTree, id: LayerId) {
        let mut g = RecordingSurface::new();
        run(tree, id, &mut g, "24px Arial");
    }

    #[test]
    fn test_column_centers_leftover_by_default() {
        let mut tree = LayerTree::new();
        let col = column(&mut tree, 100.0);
        let a = child(&mut tree, col, 20.0);
        let b = child(&mut tree, col, 30.0);

        layout(&mut tree, col);

        // leftover = 100 - 50, half of it before the first child.
        assert!((tree[a].y - 25.0).abs() < f64::EPSILON);
        assert!((tree[b].y - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_column_justify_start_and_end() {
        let mut tree = LayerTree::new();
        let col = column(&mut tree, 100.0);
        let a = child(&mut tree, col, 20.0);
        tree[col].style.justify_content = Justify::Start;
        layout(&mut tree, col);
        assert!((tree[a].y - 0.0).abs() < f64::EPSILON);

        tree[col].style.justify_content = Justify::End;
        layout(&mut tree, col);
        assert!((tree[a].y - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_column_grow_distribution() {
        let mut tree = LayerTree::new();
        let col = column(&mut tree, 100.0);
        let a = child(&mut tree, col, 10.0);
        let b = child(&mut tree, col, 10.0);
        tree[a].style.grow = 1.0;
        tree[b].style.grow = 3.0;

        layout(&mut tree, col);

        // leftover = 80, unit = 20: heights floor(10 + g * 20).
        assert!((tree[a].height - 30.0).abs() < f64::EPSILON);
        assert!((tree[b].height - 70.0).abs() < f64::EPSILON);
        assert!(tree[b].height > tree[a].height);
        // Growing children start at the top; justify is ignored.
        assert!((tree[a].y - 0.0).abs() < f64::EPSILON);
        assert!((tree[b].y - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stretch_forces_cross_size() {
        let mut tree = LayerTree::new();
        let col = column(&mut tree, 100.0);
        let a = child(&mut tree, col, 20.0);
        layout(&mut tree, col);
        assert!((tree[a].x - 0.0).abs() < f64::EPSILON);
        assert!((tree[a].width - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_align_end_and_center() {
        let mut tree = LayerTree::new();
        let col = column(&mut tree, 100.0);
        let a = child(&mut tree, col, 20.0);
        tree[a].style.align_self = Some(Align::End);
        layout(&mut tree, col);
        assert!((tree[a].x - 60.0).abs() < f64::EPSILON);
        assert!((tree[a].width - 40.0).abs() < f64::EPSILON);

        // Center leaves the cross-axis position where it was.
        tree[a].x = 13.0;
        tree[a].style.align_self = Some(Align::Center);
        layout(&mut tree, col);
        assert!((tree[a].x - 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_absolute_children_skipped() {
        let mut tree = LayerTree::new();
        let col = column(&mut tree, 100.0);
        let a = child(&mut tree, col, 20.0);
        let abs = child(&mut tree, col, 20.0);
        tree[abs].style.position = Position::Absolute;
        tree[abs].x = 7.0;
        tree[abs].y = 7.0;
        tree[col].style.justify_content = Justify::Start;

        layout(&mut tree, col);

        assert!((tree[a].y - 0.0).abs() < f64::EPSILON);
        // Untouched by flow.
        assert!((tree[abs].x - 7.0).abs() < f64::EPSILON);
        assert!((tree[abs].y - 7.0).abs() < f64::EPSILON);
        assert!((tree[abs].width - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gutter_and_padding() {
        let mut tree = LayerTree::new();
        let col = column(&mut tree, 100.0);
        tree[col].style.padding = 5.0;
        tree[col].style.gutter = 4.0;
        tree[col].style.justify_content = Justify::Start;
        let a = child(&mut tree, col, 10.0);
        let b = child(&mut tree, col, 10.0);

        layout(&mut tree, col);

        assert!((tree[a].y - 5.0).abs() < f64::EPSILON);
        assert!((tree[b].y - 19.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overflow_not_clamped() {
        let mut tree = LayerTree::new();
        let col = column(&mut tree, 10.0);
        let a = child(&mut tree, col, 20.0);
        let b = child(&mut tree, col, 20.0);

        layout(&mut tree, col);

        // leftover = -30, centered: the first child starts above the top.
        assert!(tree[a].y < 0.0);
        assert!(tree[b].y > tree[a].y);
    }

    #[test]
    fn test_empty_column_is_noop() {
        let mut tree = LayerTree::new();
        let col = column(&mut tree, 100.0);
        layout(&mut tree, col);
        assert!((tree[col].height - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_row_is_the_transpose() {
        let mut tree = LayerTree::new();
        let row = tree.insert(LayerKind::Row, Style::default());
        tree[row].width = 100.0;
        tree[row].height = 50.0;
        let a = tree.insert(LayerKind::Plain, Style::default());
        tree[a].width = 20.0;
        tree[a].height = 10.0;
        let b = tree.insert(LayerKind::Plain, Style::default());
        tree[b].width = 30.0;
        tree[b].height = 10.0;
        tree.add_child(row, a);
        tree.add_child(row, b);

        layout(&mut tree, row);

        assert!((tree[a].x - 25.0).abs() < f64::EPSILON);
        assert!((tree[b].x - 45.0).abs() < f64::EPSILON);
        // Stretch applies to the cross axis (height).
        assert!((tree[a].height - 50.0).abs() < f64::EPSILON);
    }

    struct Shrink;

    impl LayerDelegate for Shrink {
        fn capabilities(&self) -> Capabilities {
            Capabilities::LAYOUT
        }

        fn layout(&mut self, layer: &mut Layer) {
            layer.height = 64.0;
        }
    }

    #[test]
    fn test_flow_runs_delegate_hook_first() {
        let mut tree = LayerTree::new();
        let col = column(&mut tree, 100.0);
        tree[col].install_delegate(Some(Delegate::object(Shrink)));
        let a = child(&mut tree, col, 20.0);
        tree[col].style.justify_content = Justify::Start;

        layout(&mut tree, col);

        // The hook resized the container before flow measured leftover.
        assert!((tree[col].height - 64.0).abs() < f64::EPSILON);
        assert!((tree[a].y - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_measurement_formula_and_cache() {
        let mut tree = LayerTree::new();
        let text = tree.insert(
            LayerKind::Text(crate::scene::TextState {
                text: "hello".to_owned(),
                measured: None,
            }),
            Style {
                padding: 3.0,
                ..Style::default()
            },
        );

        let mut g = RecordingSurface::new();
        measure_text(&mut tree, text, &mut g, "24px Arial");
        // RecordingSurface: 10px per column; "hello" = 50, "W" = 10.
        assert!((tree[text].width - 56.0).abs() < f64::EPSILON);
        assert!((tree[text].height - 18.0).abs() < f64::EPSILON);
        let measured_calls = g.measure_count();

        // Unchanged text: no re-measurement.
        measure_text(&mut tree, text, &mut g, "24px Arial");
        assert_eq!(g.measure_count(), measured_calls);

        // Changed text: measured again.
        tree[text].set_text("hi");
        measure_text(&mut tree, text, &mut g, "24px Arial");
        assert!(g.measure_count() > measured_calls);
        assert!((tree[text].width - 26.0).abs() < f64::EPSILON);
    }
}
