use crate::control::{ControlId, ControlTree, Focusable, Measurable, PaintScope, Paintable, Widget};
use crate::drawing::DrawingContext;
use crate::error::Result;
use crate::text::{align_offset, display_width, truncate_to_width};
use crate::types::{Point, Size, TextAlign};

/// Single line of text.
///
/// A label with a tab stop takes part in focus traversal and paints with
/// its colours swapped while focused.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
    align: TextAlign,
    tab_stop: Option<i32>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Join the tab order with the given index.
    pub fn tab_stop(mut self, tab_index: i32) -> Self {
        self.tab_stop = Some(tab_index);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text of the label at `id` and request the matching relayout.
    pub fn set_text(tree: &mut ControlTree, id: ControlId, text: impl Into<String>) -> Result<()> {
        if let Some(label) = tree.widget_mut::<Label>(id) {
            label.text = text.into();
        }
        tree.invalidate_measure_if_auto_size(id)
    }

    /// Change the alignment; only the visual is affected.
    pub fn set_align(tree: &mut ControlTree, id: ControlId, align: TextAlign) -> Result<()> {
        if let Some(label) = tree.widget_mut::<Label>(id) {
            label.align = align;
        }
        tree.invalidate_visual(id)
    }
}

impl Measurable for Label {
    fn measure_content(&self, available: Size) -> Size {
        Size::saturating(display_width(&self.text), 1).min(available)
    }
}

impl Paintable for Label {
    fn on_paint(&self, ctx: &mut DrawingContext, scope: &PaintScope<'_>) -> Result<()> {
        if scope.focused {
            ctx.release(scope.foreground, scope.background);
        } else {
            ctx.release(scope.background, scope.foreground);
        }
        let content = scope.content_rect();
        if content.is_empty() {
            return Ok(());
        }
        let text = truncate_to_width(&self.text, content.width());
        let x = content.x() + align_offset(display_width(&text), content.width(), self.align);
        ctx.set_cursor_pos(Point::new(x, content.y()))?;
        ctx.draw_text(&text, None, None);
        Ok(())
    }
}

impl Focusable for Label {
    fn can_focus(&self) -> bool {
        self.tab_stop.is_some()
    }

    fn tab_index(&self) -> i32 {
        self.tab_stop.unwrap_or(0)
    }
}

impl Widget for Label {
    fn name(&self) -> &'static str {
        "Label"
    }

    fn focusable(&self) -> Option<&dyn Focusable> {
        self.tab_stop.map(|_| self as &dyn Focusable)
    }
}
