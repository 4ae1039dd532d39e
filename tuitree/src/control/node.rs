use super::{ControlId, Widget};
use crate::drawing::DrawingContext;
use crate::layout::{GridCell, Layout};
use crate::types::{
    Color, Dock, HorizontalAlignment, Point, Rect, Size, Thickness, VerticalAlignment,
};

/// One record of the control arena.
///
/// The tree owns every node; `parent` is a plain index used for lookups
/// (inherited colours, ancestor search) and never implies ownership.
pub struct ControlNode {
    pub(crate) widget: Box<dyn Widget>,
    pub(crate) layout: Layout,
    pub(crate) parent: Option<ControlId>,
    pub(crate) children: Vec<ControlId>,

    // Layout results
    pub(crate) bounds: Rect,
    pub(crate) desired_size: Size,

    // Box model
    pub(crate) margin: Thickness,
    pub(crate) padding: Thickness,
    pub(crate) width: Option<i32>,
    pub(crate) height: Option<i32>,
    pub(crate) auto_size: bool,

    // Attached properties read by the parent's layout rule
    pub(crate) horizontal_alignment: HorizontalAlignment,
    pub(crate) vertical_alignment: VerticalAlignment,
    pub(crate) dock: Dock,
    pub(crate) grid_cell: GridCell,
    pub(crate) position: Point,

    // Visual
    pub(crate) background: Option<Color>,
    pub(crate) foreground: Option<Color>,
    pub(crate) focused: bool,

    // Validity
    pub(crate) measure_valid: bool,
    pub(crate) visual_valid: bool,

    pub(crate) context: Option<DrawingContext>,
}

impl std::fmt::Debug for ControlNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlNode")
            .field("widget", &self.widget.name())
            .field("layout", &self.layout)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("bounds", &self.bounds)
            .field("desired_size", &self.desired_size)
            .field("measure_valid", &self.measure_valid)
            .field("visual_valid", &self.visual_valid)
            .finish_non_exhaustive()
    }
}

impl ControlNode {
    pub(crate) fn new(widget: Box<dyn Widget>, layout: Layout) -> Self {
        Self {
            widget,
            layout,
            parent: None,
            children: Vec::new(),
            bounds: Rect::EMPTY,
            desired_size: Size::EMPTY,
            margin: Thickness::EMPTY,
            padding: Thickness::EMPTY,
            width: None,
            height: None,
            auto_size: true,
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            dock: Dock::default(),
            grid_cell: GridCell::default(),
            position: Point::ORIGIN,
            background: None,
            foreground: None,
            focused: false,
            measure_valid: false,
            visual_valid: false,
            context: None,
        }
    }

    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    pub fn children(&self) -> &[ControlId] {
        &self.children
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn desired_size(&self) -> Size {
        self.desired_size
    }

    pub fn margin(&self) -> Thickness {
        self.margin
    }

    pub fn padding(&self) -> Thickness {
        self.padding
    }

    pub fn width(&self) -> Option<i32> {
        self.width
    }

    pub fn height(&self) -> Option<i32> {
        self.height
    }

    pub fn auto_size(&self) -> bool {
        self.auto_size
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn dock(&self) -> Dock {
        self.dock
    }

    pub fn grid_cell(&self) -> GridCell {
        self.grid_cell
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_measure_valid(&self) -> bool {
        self.measure_valid
    }

    pub fn is_visual_valid(&self) -> bool {
        self.visual_valid
    }

    /// The context built by the last repaint.
    pub fn context(&self) -> Option<&DrawingContext> {
        self.context.as_ref()
    }

    pub fn can_focus(&self) -> bool {
        self.widget.focusable().is_some_and(|f| f.can_focus())
    }

    pub fn tab_index(&self) -> i32 {
        self.widget.focusable().map_or(0, |f| f.tab_index())
    }
}
