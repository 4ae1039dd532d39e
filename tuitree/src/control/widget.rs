use std::any::Any;

use super::ControlId;
use crate::drawing::DrawingContext;
use crate::error::Result;
use crate::layout::{GridCell, Layout};
use crate::types::{Color, Point, Rect, Size, Thickness};

/// Downcasting support so hosts can reach their concrete widget types.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Natural content size of a leaf control.
pub trait Measurable {
    /// `available` is the content box left after margin and padding.
    fn measure_content(&self, available: Size) -> Size {
        let _ = available;
        Size::EMPTY
    }
}

/// Paint callback.
pub trait Paintable {
    /// Fill a freshly created context sized exactly to the control's bounds.
    ///
    /// Implementations are expected to start with [`DrawingContext::release`].
    fn on_paint(&self, ctx: &mut DrawingContext, scope: &PaintScope<'_>) -> Result<()>;
}

/// Tab-order participation.
pub trait Focusable {
    fn can_focus(&self) -> bool {
        true
    }

    /// Higher values come first among controls at the same depth.
    fn tab_index(&self) -> i32 {
        0
    }
}

/// A visual node's behaviour, composed from the capability traits.
pub trait Widget: Measurable + Paintable + AsAny {
    /// Display name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn focusable(&self) -> Option<&dyn Focusable> {
        None
    }
}

/// Where a child was placed by the last arrange pass.
#[derive(Debug, Clone, Copy)]
pub struct ChildPlacement {
    pub id: ControlId,
    pub bounds: Rect,
    pub grid_cell: GridCell,
}

/// Read-only view of a control's base state handed to its paint callback.
#[derive(Debug)]
pub struct PaintScope<'a> {
    pub id: ControlId,
    pub bounds: Rect,
    pub padding: Thickness,
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub focused: bool,
    pub layout: &'a Layout,
    pub children: Vec<ChildPlacement>,
}

impl PaintScope<'_> {
    /// Padding-reduced area in local coordinates.
    pub fn content_rect(&self) -> Rect {
        Rect::from_size(self.bounds.size()).reduce(self.padding)
    }

    /// Translate a screen rectangle into this control's local coordinates.
    pub fn to_local(&self, rect: Rect) -> Rect {
        rect.offset(Point::ORIGIN - self.bounds.top_left())
    }
}
