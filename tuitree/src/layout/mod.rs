//! Two-pass measure/arrange layout.
//!
//! `measure` runs top-down with an upper bound and returns each control's
//! desired size bottom-up; `arrange` hands every control its final
//! rectangle and fixes its bounds.

mod grid;
mod panel;

use log::debug;

pub use grid::{draw_grid_lines, junction_glyph, size_tracks, GridCell, GridDefinition, TrackSize};

use crate::control::{ControlId, ControlTree};
use crate::error::Result;
use crate::types::{HorizontalAlignment, Orientation, Point, Rect, Size, VerticalAlignment};

/// Composition rule of a control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Layout {
    /// No children; size comes from the widget.
    #[default]
    Leaf,
    /// Zero or one child filling the content box, honouring its alignment.
    Single,
    /// Children one after another along the orientation axis.
    Stack(Orientation),
    /// Children docked to edges; the last one takes the rest when
    /// `last_child_fill` is set.
    Dock { last_child_fill: bool },
    Grid(GridDefinition),
    /// Children placed at their own position without margin reduction.
    Canvas,
}

/// How many children a layout rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    None,
    Single,
    Multiple,
}

impl Layout {
    pub fn content_shape(&self) -> ContentShape {
        match self {
            Layout::Leaf => ContentShape::None,
            Layout::Single => ContentShape::Single,
            _ => ContentShape::Multiple,
        }
    }
}

/// Measure and arrange the tree below `root` for a screen of `screen` cells.
pub fn update_layout(tree: &mut ControlTree, root: ControlId, screen: Size) -> Result<()> {
    measure(tree, root, screen)?;
    arrange(tree, root, Rect::from_size(screen), true)?;
    Ok(())
}

/// Compute how much space `id` wants within `available`.
pub fn measure(tree: &mut ControlTree, id: ControlId, available: Size) -> Result<Size> {
    let node = tree.node(id)?;
    let chrome = node.margin + node.padding;
    let (width, height, auto_size) = (node.width, node.height, node.auto_size);
    let layout = node.layout.clone();
    let children = node.children.clone();

    let mut content = available.deflate(chrome);
    if let Some(w) = width {
        content = Size::saturating(w, content.height());
    }
    if let Some(h) = height {
        content = Size::saturating(content.width(), h);
    }

    let natural = match &layout {
        Layout::Leaf => tree.node(id)?.widget.measure_content(content),
        Layout::Single => match children.first() {
            Some(child) => measure(tree, *child, content)?,
            None => Size::EMPTY,
        },
        Layout::Stack(orientation) => panel::measure_stack(tree, *orientation, &children, content)?,
        Layout::Dock { .. } => panel::measure_dock(tree, &children, content)?,
        Layout::Grid(def) => grid::measure_grid(tree, def, &children, content)?,
        Layout::Canvas => panel::measure_canvas(tree, &children, content)?,
    };

    let mut used = if auto_size { natural } else { content };
    if let Some(w) = width {
        used = Size::saturating(w, used.height());
    }
    if let Some(h) = height {
        used = Size::saturating(used.width(), h);
    }
    let desired = used.inflate(chrome).min(available);

    let node = tree.node_mut(id)?;
    node.desired_size = desired;
    node.measure_valid = true;
    Ok(desired)
}

/// Place `id` inside `final_rect` and arrange its children.
///
/// Canvas children pass `reduce_margin = false` so their rectangle is used
/// as is.
pub fn arrange(
    tree: &mut ControlTree,
    id: ControlId,
    final_rect: Rect,
    reduce_margin: bool,
) -> Result<Rect> {
    let node = tree.node(id)?;
    let padding = node.padding;
    let mut bounds = if reduce_margin {
        final_rect.reduce(node.margin)
    } else {
        final_rect
    };
    if let Some(w) = node.width {
        let width = bounds.width().min(w.saturating_add(padding.horizontal()));
        bounds = Rect::at(bounds.top_left(), Size::saturating(width, bounds.height()));
    }
    if let Some(h) = node.height {
        let height = bounds.height().min(h.saturating_add(padding.vertical()));
        bounds = Rect::at(bounds.top_left(), Size::saturating(bounds.width(), height));
    }
    let layout = node.layout.clone();
    let children = node.children.clone();

    let node = tree.node_mut(id)?;
    if node.bounds != bounds {
        debug!("arranged {id:?}: {:?} -> {:?}", node.bounds, bounds);
    }
    node.bounds = bounds;
    node.visual_valid = false;

    let content = bounds.reduce(padding);
    match &layout {
        Layout::Leaf => {}
        Layout::Single => {
            if let Some(child) = children.first() {
                let child_node = tree.node(*child)?;
                let rect = align(
                    content,
                    child_node.desired_size,
                    child_node.horizontal_alignment,
                    child_node.vertical_alignment,
                );
                arrange(tree, *child, rect, true)?;
            }
        }
        Layout::Stack(orientation) => panel::arrange_stack(tree, *orientation, &children, content)?,
        Layout::Dock { last_child_fill } => {
            panel::arrange_dock(tree, *last_child_fill, &children, content)?
        }
        Layout::Grid(def) => grid::arrange_grid(tree, def, &children, content)?,
        Layout::Canvas => panel::arrange_canvas(tree, &children, content)?,
    }
    Ok(bounds)
}

/// Position a child of `desired` size inside `slot`.
pub fn align(
    slot: Rect,
    desired: Size,
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
) -> Rect {
    let (x, width) = match horizontal {
        HorizontalAlignment::Stretch => (slot.x(), slot.width()),
        other => {
            let width = desired.width().min(slot.width());
            let spare = slot.width() - width;
            let x = match other {
                HorizontalAlignment::Center => slot.x() + spare / 2,
                HorizontalAlignment::Right => slot.x() + spare,
                _ => slot.x(),
            };
            (x, width)
        }
    };
    let (y, height) = match vertical {
        VerticalAlignment::Stretch => (slot.y(), slot.height()),
        other => {
            let height = desired.height().min(slot.height());
            let spare = slot.height() - height;
            let y = match other {
                VerticalAlignment::Center => slot.y() + spare / 2,
                VerticalAlignment::Bottom => slot.y() + spare,
                _ => slot.y(),
            };
            (y, height)
        }
    };
    Rect::at(Point::new(x, y), Size::saturating(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_center_and_end() {
        let slot = Rect::new(0, 0, 10, 5).unwrap();
        let desired = Size::new(4, 1).unwrap();
        let centered = align(slot, desired, HorizontalAlignment::Center, VerticalAlignment::Bottom);
        assert_eq!(centered, Rect::new(3, 4, 4, 1).unwrap());
        let stretched = align(slot, desired, HorizontalAlignment::Stretch, VerticalAlignment::Top);
        assert_eq!(stretched, Rect::new(0, 0, 10, 1).unwrap());
    }

    #[test]
    fn align_clamps_oversized_desire() {
        let slot = Rect::new(2, 2, 3, 3).unwrap();
        let desired = Size::new(8, 8).unwrap();
        let rect = align(slot, desired, HorizontalAlignment::Right, VerticalAlignment::Center);
        assert_eq!(rect, slot);
    }
}
