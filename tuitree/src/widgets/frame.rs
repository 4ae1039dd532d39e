use crate::control::{ControlId, ControlTree, Measurable, PaintScope, Paintable, Widget};
use crate::drawing::DrawingContext;
use crate::error::Result;
use crate::layout::Layout;
use crate::text::truncate_to_width;
use crate::types::{Border, Point, Rect, Size, Thickness};

/// Bordered single-content surface with an optional title in the top edge.
#[derive(Debug, Clone)]
pub struct Frame {
    title: String,
    border: Border,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new("")
    }
}

impl Frame {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            border: Border::Single,
        }
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Create the frame as a single-content container padded for its border.
    pub fn create(self, tree: &mut ControlTree) -> Result<ControlId> {
        let inset = i32::from(self.border.glyphs().is_some());
        let id = tree.create_container(self, Layout::Single);
        tree.set_padding(id, Thickness::uniform(inset))?;
        Ok(id)
    }
}

impl Measurable for Frame {}

impl Paintable for Frame {
    fn on_paint(&self, ctx: &mut DrawingContext, scope: &PaintScope<'_>) -> Result<()> {
        ctx.release(scope.background, scope.foreground);
        let Some((tl, tr, bl, br, h, v)) = self.border.glyphs() else {
            return Ok(());
        };
        let local = Rect::from_size(Size::saturating(ctx.width(), ctx.height()));
        if local.width() < 2 || local.height() < 2 {
            return Ok(());
        }
        let (right, bottom) = (local.right() - 1, local.bottom() - 1);

        for x in 1..right {
            ctx.put_char(Point::new(x, 0), h, None, None)?;
            ctx.put_char(Point::new(x, bottom), h, None, None)?;
        }
        for y in 1..bottom {
            ctx.put_char(Point::new(0, y), v, None, None)?;
            ctx.put_char(Point::new(right, y), v, None, None)?;
        }
        ctx.put_char(Point::new(0, 0), tl, None, None)?;
        ctx.put_char(Point::new(right, 0), tr, None, None)?;
        ctx.put_char(Point::new(0, bottom), bl, None, None)?;
        ctx.put_char(Point::new(right, bottom), br, None, None)?;

        // " title " after the top-left corner, leaving the top-right corner intact.
        if !self.title.is_empty() && local.width() > 4 {
            let title = truncate_to_width(&format!(" {} ", self.title), local.width() - 3);
            ctx.set_cursor_pos(Point::new(2, 0))?;
            ctx.draw_text(&title, None, None);
        }
        Ok(())
    }
}

impl Widget for Frame {
    fn name(&self) -> &'static str {
        "Frame"
    }
}
