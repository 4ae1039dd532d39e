//! Stack, dock and canvas rules.

use super::{align, arrange, measure};
use crate::control::{ControlId, ControlTree};
use crate::error::Result;
use crate::types::{Dock, HorizontalAlignment, Orientation, Point, Rect, Size, VerticalAlignment};

/// Main-axis and cross-axis components of a size.
fn split(orientation: Orientation, size: Size) -> (i32, i32) {
    match orientation {
        Orientation::Horizontal => (size.width(), size.height()),
        Orientation::Vertical => (size.height(), size.width()),
    }
}

fn join(orientation: Orientation, main: i32, cross: i32) -> Size {
    match orientation {
        Orientation::Horizontal => Size::saturating(main, cross),
        Orientation::Vertical => Size::saturating(cross, main),
    }
}

pub(crate) fn measure_stack(
    tree: &mut ControlTree,
    orientation: Orientation,
    children: &[ControlId],
    content: Size,
) -> Result<Size> {
    let (extent, cross_extent) = split(orientation, content);
    let mut main = 0;
    let mut cross = 0;
    for child in children {
        let available = join(orientation, extent - main, cross_extent);
        let (child_main, child_cross) = split(orientation, measure(tree, *child, available)?);
        main += child_main;
        cross = cross.max(child_cross);
    }
    Ok(join(orientation, main, cross))
}

pub(crate) fn arrange_stack(
    tree: &mut ControlTree,
    orientation: Orientation,
    children: &[ControlId],
    content: Rect,
) -> Result<()> {
    let (extent, cross_extent) = split(orientation, content.size());
    let mut offset = 0;
    for child in children {
        let node = tree.node(*child)?;
        let (desired_main, _) = split(orientation, node.desired_size);
        let main = desired_main.min(extent - offset).max(0);
        let slot = match orientation {
            Orientation::Horizontal => Rect::at(
                Point::new(content.x() + offset, content.y()),
                join(orientation, main, cross_extent),
            ),
            Orientation::Vertical => Rect::at(
                Point::new(content.x(), content.y() + offset),
                join(orientation, main, cross_extent),
            ),
        };
        // Only the cross axis is aligned; the main axis is the slot itself.
        let (horizontal, vertical) = match orientation {
            Orientation::Horizontal => (HorizontalAlignment::Stretch, node.vertical_alignment),
            Orientation::Vertical => (node.horizontal_alignment, VerticalAlignment::Stretch),
        };
        let rect = align(slot, node.desired_size, horizontal, vertical);
        arrange(tree, *child, rect, true)?;
        offset += main;
    }
    Ok(())
}

pub(crate) fn measure_dock(
    tree: &mut ControlTree,
    children: &[ControlId],
    content: Size,
) -> Result<Size> {
    let (mut used_width, mut used_height) = (0, 0);
    let (mut max_width, mut max_height) = (0, 0);
    for child in children {
        let available =
            Size::saturating(content.width() - used_width, content.height() - used_height);
        let desired = measure(tree, *child, available)?;
        match tree.node(*child)?.dock {
            Dock::Left | Dock::Right => {
                max_height = max_height.max(used_height + desired.height());
                used_width += desired.width();
            }
            Dock::Top | Dock::Bottom => {
                max_width = max_width.max(used_width + desired.width());
                used_height += desired.height();
            }
        }
    }
    Ok(Size::saturating(
        max_width.max(used_width),
        max_height.max(used_height),
    ))
}

pub(crate) fn arrange_dock(
    tree: &mut ControlTree,
    last_child_fill: bool,
    children: &[ControlId],
    content: Rect,
) -> Result<()> {
    let mut remaining = content;
    for (index, child) in children.iter().enumerate() {
        let node = tree.node(*child)?;
        let desired = node.desired_size;
        let fill = last_child_fill && index + 1 == children.len();
        let slot = if fill {
            remaining
        } else {
            let width = desired.width().min(remaining.width());
            let height = desired.height().min(remaining.height());
            match node.dock {
                Dock::Left => {
                    let slot =
                        Rect::at(remaining.top_left(), Size::saturating(width, remaining.height()));
                    remaining = Rect::at(
                        Point::new(remaining.x() + width, remaining.y()),
                        Size::saturating(remaining.width() - width, remaining.height()),
                    );
                    slot
                }
                Dock::Right => {
                    let slot = Rect::at(
                        Point::new(remaining.right() - width, remaining.y()),
                        Size::saturating(width, remaining.height()),
                    );
                    remaining = Rect::at(
                        remaining.top_left(),
                        Size::saturating(remaining.width() - width, remaining.height()),
                    );
                    slot
                }
                Dock::Top => {
                    let slot =
                        Rect::at(remaining.top_left(), Size::saturating(remaining.width(), height));
                    remaining = Rect::at(
                        Point::new(remaining.x(), remaining.y() + height),
                        Size::saturating(remaining.width(), remaining.height() - height),
                    );
                    slot
                }
                Dock::Bottom => {
                    let slot = Rect::at(
                        Point::new(remaining.x(), remaining.bottom() - height),
                        Size::saturating(remaining.width(), height),
                    );
                    remaining = Rect::at(
                        remaining.top_left(),
                        Size::saturating(remaining.width(), remaining.height() - height),
                    );
                    slot
                }
            }
        };
        let rect = align(slot, desired, node.horizontal_alignment, node.vertical_alignment);
        arrange(tree, *child, rect, true)?;
    }
    Ok(())
}

pub(crate) fn measure_canvas(
    tree: &mut ControlTree,
    children: &[ControlId],
    content: Size,
) -> Result<Size> {
    let mut extent = Size::EMPTY;
    for child in children {
        let desired = measure(tree, *child, content)?;
        let position = tree.node(*child)?.position;
        extent = extent.max(Size::saturating(
            position.x.saturating_add(desired.width()),
            position.y.saturating_add(desired.height()),
        ));
    }
    Ok(extent)
}

pub(crate) fn arrange_canvas(
    tree: &mut ControlTree,
    children: &[ControlId],
    content: Rect,
) -> Result<()> {
    for child in children {
        let node = tree.node(*child)?;
        let rect = Rect::at(content.top_left() + node.position, node.desired_size);
        arrange(tree, *child, rect, false)?;
    }
    Ok(())
}
