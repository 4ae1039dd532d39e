//! The retained control tree.
//!
//! Controls live in an arena keyed by [`ControlId`]. A container owns its
//! children through the arena; children refer back to their parent by id.

mod node;
mod widget;

use log::debug;
use slotmap::SlotMap;

pub use node::ControlNode;
pub use widget::{AsAny, ChildPlacement, Focusable, Measurable, PaintScope, Paintable, Widget};

use crate::error::{Error, Result};
use crate::layout::{ContentShape, GridCell, Layout};
use crate::types::{Color, Dock, HorizontalAlignment, Point, Thickness, VerticalAlignment};

slotmap::new_key_type! {
    /// Stable identity of a control, assigned at construction.
    pub struct ControlId;
}

/// Notifications the host drains after each loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    FocusEnter(ControlId),
    FocusLeave(ControlId),
}

#[derive(Debug, Default)]
pub struct ControlTree {
    nodes: SlotMap<ControlId, ControlNode>,
    root: Option<ControlId>,
    events: Vec<ControlEvent>,
}

impl ControlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached leaf control.
    pub fn create(&mut self, widget: impl Widget + 'static) -> ControlId {
        self.insert(Box::new(widget), Layout::Leaf)
    }

    /// Create a detached container control with the given layout rule.
    pub fn create_container(&mut self, widget: impl Widget + 'static, layout: Layout) -> ControlId {
        self.insert(Box::new(widget), layout)
    }

    pub fn insert(&mut self, widget: Box<dyn Widget>, layout: Layout) -> ControlId {
        let id = self.nodes.insert(ControlNode::new(widget, layout));
        debug!("created {} as {:?}", self.nodes[id].widget.name(), id);
        id
    }

    pub fn root(&self) -> Option<ControlId> {
        self.root
    }

    /// Make a detached control the root of the tree.
    pub fn set_root(&mut self, id: ControlId) -> Result<()> {
        if self.node(id)?.parent.is_some() {
            return Err(Error::invariant("the root control cannot have a parent"));
        }
        self.root = Some(id);
        self.invalidate_measure(id)
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: ControlId) -> Result<&ControlNode> {
        self.nodes.get(id).ok_or(Error::UnknownControl(id))
    }

    pub(crate) fn node_mut(&mut self, id: ControlId) -> Result<&mut ControlNode> {
        self.nodes.get_mut(id).ok_or(Error::UnknownControl(id))
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Whether `id` is the root or hangs below it.
    pub fn is_attached(&self, id: ControlId) -> bool {
        self.root.is_some_and(|root| self.ancestors_or_self(id).any(|a| a == root))
    }

    /// `id` followed by its parent chain up to the root.
    pub fn ancestors_or_self(&self, id: ControlId) -> impl Iterator<Item = ControlId> + '_ {
        std::iter::successors(self.contains(id).then_some(id), move |current| {
            self.parent(*current)
        })
    }

    /// Nearest ancestor (excluding `id`) matching `predicate`.
    pub fn find_ancestor(
        &self,
        id: ControlId,
        mut predicate: impl FnMut(ControlId, &ControlNode) -> bool,
    ) -> Option<ControlId> {
        self.ancestors_or_self(id)
            .skip(1)
            .find(|a| self.nodes.get(*a).is_some_and(|n| predicate(*a, n)))
    }

    /// Number of ancestors above `id`.
    pub fn depth(&self, id: ControlId) -> usize {
        self.ancestors_or_self(id).count().saturating_sub(1)
    }

    /// Pre-order walk of the subtree at `id`.
    pub fn descendants(&self, id: ControlId) -> Vec<ControlId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            out.push(current);
            for child in self.children(current).iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    pub fn widget<T: Widget>(&self, id: ControlId) -> Option<&T> {
        let widget: &dyn Widget = self.nodes.get(id)?.widget.as_ref();
        widget.as_any().downcast_ref::<T>()
    }

    /// Mutable access to a widget. Callers request the matching invalidation.
    pub fn widget_mut<T: Widget>(&mut self, id: ControlId) -> Option<&mut T> {
        let widget: &mut dyn Widget = self.nodes.get_mut(id)?.widget.as_mut();
        widget.as_any_mut().downcast_mut::<T>()
    }

    /// Attach a detached control as content of `parent`.
    ///
    /// Single-content containers accept one child; leaves accept none. A
    /// control that already has a parent must be removed first.
    pub fn add_content(&mut self, parent: ControlId, child: ControlId) -> Result<()> {
        if parent == child {
            return Err(Error::invariant("a control cannot contain itself"));
        }
        let child_node = self.node(child)?;
        if child_node.parent.is_some() {
            return Err(Error::invariant(format!(
                "{child:?} already has a parent; remove it first"
            )));
        }
        if self.root == Some(child) {
            return Err(Error::invariant("the root control cannot become content"));
        }
        if self.ancestors_or_self(parent).any(|a| a == child) {
            return Err(Error::invariant("adding the control would create a cycle"));
        }
        let parent_node = self.node(parent)?;
        match parent_node.layout.content_shape() {
            ContentShape::None => {
                return Err(Error::invariant(format!("{parent:?} cannot hold content")));
            }
            ContentShape::Single if !parent_node.children.is_empty() => {
                return Err(Error::invariant(format!(
                    "{parent:?} already holds its single content"
                )));
            }
            _ => {}
        }

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        debug!("attached {child:?} to {parent:?}");
        self.invalidate_measure(child)?;
        self.invalidate_measure(parent)
    }

    /// Detach `child` from `parent`, which must own it.
    pub fn remove_content(&mut self, parent: ControlId, child: ControlId) -> Result<()> {
        let owned = self.node(parent)?.children.contains(&child);
        if !owned || self.node(child)?.parent != Some(parent) {
            return Err(Error::invariant(format!(
                "{parent:?} does not own {child:?}"
            )));
        }
        self.node_mut(parent)?.children.retain(|c| *c != child);
        let node = self.node_mut(child)?;
        node.parent = None;
        node.measure_valid = false;
        node.visual_valid = false;
        debug!("detached {child:?} from {parent:?}");
        self.invalidate_measure(parent)
    }

    /// Release a detached control and its whole subtree.
    pub fn destroy(&mut self, id: ControlId) -> Result<()> {
        if self.node(id)?.parent.is_some() {
            return Err(Error::invariant(format!(
                "{id:?} must be detached before it is destroyed"
            )));
        }
        if self.root == Some(id) {
            self.root = None;
        }
        for node in self.descendants(id) {
            self.nodes.remove(node);
        }
        Ok(())
    }

    pub fn invalidate_measure(&mut self, id: ControlId) -> Result<()> {
        self.node_mut(id)?.measure_valid = false;
        self.invalidate_visual(id)
    }

    pub fn invalidate_visual(&mut self, id: ControlId) -> Result<()> {
        self.node_mut(id)?.visual_valid = false;
        Ok(())
    }

    /// Re-layout auto-sized controls, repaint the rest.
    pub fn invalidate_measure_if_auto_size(&mut self, id: ControlId) -> Result<()> {
        if self.node(id)?.auto_size {
            self.invalidate_measure(id)
        } else {
            self.invalidate_visual(id)
        }
    }

    /// Invalidate `id` and, for attached properties, the parent that reads them.
    fn invalidate_placement(&mut self, id: ControlId) -> Result<()> {
        self.invalidate_measure(id)?;
        if let Some(parent) = self.parent(id) {
            self.invalidate_measure(parent)?;
        }
        Ok(())
    }

    pub fn set_layout(&mut self, id: ControlId, layout: Layout) -> Result<()> {
        let node = self.node_mut(id)?;
        let count = node.children.len();
        let fits = match layout.content_shape() {
            ContentShape::None => count == 0,
            ContentShape::Single => count <= 1,
            ContentShape::Multiple => true,
        };
        if !fits {
            return Err(Error::invariant(format!(
                "{id:?} has {count} children, too many for {layout:?}"
            )));
        }
        node.layout = layout;
        self.invalidate_measure(id)
    }

    pub fn set_margin(&mut self, id: ControlId, margin: Thickness) -> Result<()> {
        self.node_mut(id)?.margin = margin;
        self.invalidate_placement(id)
    }

    pub fn set_padding(&mut self, id: ControlId, padding: Thickness) -> Result<()> {
        self.node_mut(id)?.padding = padding;
        self.invalidate_placement(id)
    }

    /// Explicit content width; `None` restores content sizing.
    pub fn set_width(&mut self, id: ControlId, width: Option<i32>) -> Result<()> {
        if let Some(w) = width.filter(|w| *w < 0) {
            return Err(Error::InvalidGeometry {
                width: w,
                height: self.node(id)?.height.unwrap_or(0),
            });
        }
        self.node_mut(id)?.width = width;
        self.invalidate_placement(id)
    }

    /// Explicit content height; `None` restores content sizing.
    pub fn set_height(&mut self, id: ControlId, height: Option<i32>) -> Result<()> {
        if let Some(h) = height.filter(|h| *h < 0) {
            return Err(Error::InvalidGeometry {
                width: self.node(id)?.width.unwrap_or(0),
                height: h,
            });
        }
        self.node_mut(id)?.height = height;
        self.invalidate_placement(id)
    }

    pub fn set_auto_size(&mut self, id: ControlId, auto_size: bool) -> Result<()> {
        self.node_mut(id)?.auto_size = auto_size;
        self.invalidate_placement(id)
    }

    pub fn set_horizontal_alignment(
        &mut self,
        id: ControlId,
        alignment: HorizontalAlignment,
    ) -> Result<()> {
        self.node_mut(id)?.horizontal_alignment = alignment;
        self.invalidate_placement(id)
    }

    pub fn set_vertical_alignment(
        &mut self,
        id: ControlId,
        alignment: VerticalAlignment,
    ) -> Result<()> {
        self.node_mut(id)?.vertical_alignment = alignment;
        self.invalidate_placement(id)
    }

    pub fn set_dock(&mut self, id: ControlId, dock: Dock) -> Result<()> {
        self.node_mut(id)?.dock = dock;
        self.invalidate_placement(id)
    }

    pub fn set_grid_cell(&mut self, id: ControlId, cell: GridCell) -> Result<()> {
        self.node_mut(id)?.grid_cell = cell;
        self.invalidate_placement(id)
    }

    /// Offset inside a canvas container (top-level window placement).
    pub fn set_position(&mut self, id: ControlId, position: Point) -> Result<()> {
        self.node_mut(id)?.position = position;
        self.invalidate_placement(id)
    }

    pub fn set_background(&mut self, id: ControlId, color: Option<Color>) -> Result<()> {
        self.node_mut(id)?.background = color;
        self.invalidate_visual(id)
    }

    pub fn set_foreground(&mut self, id: ControlId, color: Option<Color>) -> Result<()> {
        self.node_mut(id)?.foreground = color;
        self.invalidate_visual(id)
    }

    pub(crate) fn set_focused(&mut self, id: ControlId, focused: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.focused == focused {
            return Ok(());
        }
        node.focused = focused;
        self.events.push(if focused {
            ControlEvent::FocusEnter(id)
        } else {
            ControlEvent::FocusLeave(id)
        });
        self.invalidate_visual(id)
    }

    /// Drain pending notifications.
    pub fn take_events(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }
}
