use crate::control::{Measurable, PaintScope, Paintable, Widget};
use crate::drawing::DrawingContext;
use crate::error::Result;
use crate::layout::{draw_grid_lines, Layout};

/// Plain surface: fills its bounds with its colours.
///
/// Under a grid layout with lines enabled it also draws the grid lines.
#[derive(Debug, Clone, Default)]
pub struct Panel;

impl Panel {
    pub fn new() -> Self {
        Self
    }
}

impl Measurable for Panel {}

impl Paintable for Panel {
    fn on_paint(&self, ctx: &mut DrawingContext, scope: &PaintScope<'_>) -> Result<()> {
        ctx.release(scope.background, scope.foreground);
        if let Layout::Grid(def) = scope.layout {
            draw_grid_lines(ctx, def, scope)?;
        }
        Ok(())
    }
}

impl Widget for Panel {
    fn name(&self) -> &'static str {
        "Panel"
    }
}
