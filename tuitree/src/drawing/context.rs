use std::cell::OnceCell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use unicode_width::UnicodeWidthChar;

use super::Grid;
use crate::control::ControlId;
use crate::error::{Error, Result};
use crate::render::RenderSessionId;
use crate::types::{Color, ColorPoint, Point, Rect};

/// Marker stored in the cell covered by the right half of a wide character.
pub const CONTINUATION: char = '\0';

/// Hashed in place of the parent identity for root contexts.
const ROOT_SENTINEL: u64 = 0x726f_6f74;

/// A control's private off-screen buffer for one repaint.
///
/// Coordinates passed to the drawing operations are local: `(0, 0)` is the
/// top-left cell of the control's bounds. [`DrawingContext::rect`] gives the
/// placement on screen.
#[derive(Debug, Clone)]
pub struct DrawingContext {
    owner: ControlId,
    parent: Option<ControlId>,
    rect: Rect,
    children: u64,
    session: RenderSessionId,
    chars: Grid<char>,
    foreground: Grid<Option<Color>>,
    background: Grid<Option<Color>>,
    cursor: Point,
    current: ColorPoint,
    hash: OnceCell<u64>,
}

impl DrawingContext {
    pub fn new(
        owner: ControlId,
        parent: Option<ControlId>,
        rect: Rect,
        children: &[ControlId],
        session: RenderSessionId,
    ) -> Self {
        let (w, h) = (rect.width(), rect.height());
        Self {
            owner,
            parent,
            rect,
            children: fingerprint(children),
            session,
            chars: Grid::new(w, h, ' '),
            foreground: Grid::new(w, h, None),
            background: Grid::new(w, h, None),
            cursor: Point::ORIGIN,
            current: ColorPoint::default(),
            hash: OnceCell::new(),
        }
    }

    pub fn owner(&self) -> ControlId {
        self.owner
    }

    /// The control whose context this one composes onto.
    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    /// Placement on screen.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn width(&self) -> i32 {
        self.rect.width()
    }

    pub fn height(&self) -> i32 {
        self.rect.height()
    }

    pub fn session(&self) -> RenderSessionId {
        self.session
    }

    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// The pair used when a drawing call omits colours.
    pub fn current_colors(&self) -> ColorPoint {
        self.current
    }

    fn local_rect(&self) -> Rect {
        Rect::from_size(self.rect.size())
    }

    fn check(&self, point: Point) -> Result<()> {
        if self.local_rect().contains(point) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                point,
                bounds: self.local_rect(),
            })
        }
    }

    fn touch(&mut self) {
        self.hash.take();
    }

    fn write_cell(&mut self, x: i32, y: i32, ch: char) {
        self.chars.set(x, y, ch);
        self.background.set(x, y, self.current.background);
        self.foreground.set(x, y, self.current.foreground);
    }

    /// Erase the whole buffer to one colour pair and character.
    pub fn release(&mut self, background: Option<Color>, foreground: Option<Color>) {
        self.release_with(background, foreground, ' ');
    }

    pub fn release_with(&mut self, background: Option<Color>, foreground: Option<Color>, ch: char) {
        self.touch();
        self.current = ColorPoint::new(background, foreground);
        self.cursor = Point::ORIGIN;
        self.chars.fill(ch);
        self.background.fill(background);
        self.foreground.fill(foreground);
    }

    pub fn set_cursor_pos(&mut self, point: Point) -> Result<()> {
        self.check(point)?;
        self.cursor = point;
        Ok(())
    }

    /// Write `text` at the cursor, clipped to the right edge.
    ///
    /// Omitted colours keep the last-set pair; given colours become the new
    /// current pair. When the text reaches or passes the right edge the
    /// cursor stays on the last column.
    pub fn draw_text(&mut self, text: &str, background: Option<Color>, foreground: Option<Color>) {
        if let Some(bg) = background {
            self.current.background = Some(bg);
        }
        if let Some(fg) = foreground {
            self.current.foreground = Some(fg);
        }
        if self.is_empty() {
            return;
        }
        self.touch();

        let width = self.width();
        let y = self.cursor.y;
        let mut x = self.cursor.x;
        let mut clipped = false;
        for ch in text.chars() {
            let cells = ch.width().unwrap_or(0) as i32;
            if cells == 0 {
                continue;
            }
            if x + cells > width {
                clipped = true;
                break;
            }
            self.write_cell(x, y, ch);
            if cells == 2 {
                self.write_cell(x + 1, y, CONTINUATION);
            }
            x += cells;
        }
        self.cursor.x = if clipped || x >= width { width - 1 } else { x };
    }

    /// Set a single cell. `None` colours keep the current pair.
    pub fn put_char(
        &mut self,
        point: Point,
        ch: char,
        background: Option<Color>,
        foreground: Option<Color>,
    ) -> Result<()> {
        self.check(point)?;
        self.touch();
        self.chars.set(point.x, point.y, ch);
        self.background
            .set(point.x, point.y, background.or(self.current.background));
        self.foreground
            .set(point.x, point.y, foreground.or(self.current.foreground));
        Ok(())
    }

    /// Fill a local rectangle with `ch` in the current colours, clipped.
    pub fn fill_rect(&mut self, rect: Rect, ch: char) {
        self.touch();
        for point in rect.points() {
            if self.local_rect().contains(point) {
                self.write_cell(point.x, point.y, ch);
            }
        }
    }

    pub fn get_char(&self, col: i32, row: i32) -> Result<char> {
        self.check(Point::new(col, row))?;
        Ok(self.chars.get(col, row).copied().unwrap_or(' '))
    }

    pub fn get_color_point(&self, col: i32, row: i32) -> Result<ColorPoint> {
        self.check(Point::new(col, row))?;
        Ok(ColorPoint::new(
            self.background.get(col, row).copied().flatten(),
            self.foreground.get(col, row).copied().flatten(),
        ))
    }

    /// Cell at an absolute screen position, if this context covers it.
    pub(crate) fn cell_at(&self, screen: Point) -> Option<(char, ColorPoint)> {
        if !self.rect.contains(screen) {
            return None;
        }
        let x = screen.x - self.rect.x();
        let y = screen.y - self.rect.y();
        let ch = *self.chars.get(x, y)?;
        let colors = ColorPoint::new(
            self.background.get(x, y).copied().flatten(),
            self.foreground.get(x, y).copied().flatten(),
        );
        Some((ch, colors))
    }

    /// Fingerprint of parent, children, placement, owner and content.
    ///
    /// Memoized until the next mutation.
    pub fn structural_hash(&self) -> u64 {
        *self.hash.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            match self.parent {
                Some(parent) => parent.hash(&mut hasher),
                None => ROOT_SENTINEL.hash(&mut hasher),
            }
            self.children.hash(&mut hasher);
            self.rect.hash(&mut hasher);
            self.owner.hash(&mut hasher);
            self.chars.hash(&mut hasher);
            self.foreground.hash(&mut hasher);
            self.background.hash(&mut hasher);
            hasher.finish()
        })
    }

    /// Structural equality by hash.
    pub fn structurally_equals(&self, other: &DrawingContext) -> bool {
        self.structural_hash() == other.structural_hash()
    }
}

fn fingerprint(children: &[ControlId]) -> u64 {
    let mut hasher = DefaultHasher::new();
    children.len().hash(&mut hasher);
    for child in children {
        child.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(n: usize) -> Vec<ControlId> {
        let mut map: SlotMap<ControlId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn context(width: i32, height: i32) -> DrawingContext {
        let owner = ids(1)[0];
        DrawingContext::new(
            owner,
            None,
            Rect::new(0, 0, width, height).unwrap(),
            &[],
            RenderSessionId::default(),
        )
    }

    #[test]
    fn release_fills_every_cell() {
        let mut ctx = context(3, 2);
        ctx.release_with(Some(Color::Blue), Some(Color::White), '.');
        assert_eq!(ctx.get_char(2, 1).unwrap(), '.');
        assert_eq!(
            ctx.get_color_point(0, 1).unwrap(),
            ColorPoint::new(Some(Color::Blue), Some(Color::White))
        );
    }

    #[test]
    fn cursor_outside_is_out_of_bounds() {
        let mut ctx = context(4, 2);
        assert!(ctx.set_cursor_pos(Point::new(3, 1)).is_ok());
        assert!(matches!(
            ctx.set_cursor_pos(Point::new(4, 0)),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(ctx.set_cursor_pos(Point::new(0, -1)).is_err());
    }

    #[test]
    fn draw_text_truncates_and_pins_cursor() {
        let mut ctx = context(5, 1);
        ctx.release(Some(Color::Black), Some(Color::White));
        ctx.set_cursor_pos(Point::new(2, 0)).unwrap();
        ctx.draw_text("hello", None, None);
        assert_eq!(ctx.get_char(2, 0).unwrap(), 'h');
        assert_eq!(ctx.get_char(4, 0).unwrap(), 'l');
        assert_eq!(ctx.cursor(), Point::new(4, 0));
    }

    #[test]
    fn draw_text_advances_cursor_when_it_fits() {
        let mut ctx = context(10, 1);
        ctx.draw_text("ab", None, None);
        assert_eq!(ctx.cursor(), Point::new(2, 0));
    }

    #[test]
    fn omitted_colors_reuse_last_pair() {
        let mut ctx = context(6, 1);
        ctx.release(Some(Color::Black), Some(Color::White));
        ctx.draw_text("ab", Some(Color::Red), Some(Color::Yellow));
        ctx.draw_text("cd", None, None);
        assert_eq!(
            ctx.get_color_point(3, 0).unwrap(),
            ColorPoint::new(Some(Color::Red), Some(Color::Yellow))
        );
        assert_eq!(
            ctx.get_color_point(5, 0).unwrap(),
            ColorPoint::new(Some(Color::Black), Some(Color::White))
        );
    }

    #[test]
    fn wide_characters_take_two_cells() {
        let mut ctx = context(3, 1);
        ctx.draw_text("日本", None, None);
        assert_eq!(ctx.get_char(0, 0).unwrap(), '日');
        assert_eq!(ctx.get_char(1, 0).unwrap(), CONTINUATION);
        assert_eq!(ctx.get_char(2, 0).unwrap(), ' ');
        assert_eq!(ctx.cursor(), Point::new(2, 0));
    }

    #[test]
    fn hash_tracks_mutation() {
        let mut ctx = context(4, 1);
        ctx.release(None, None);
        let before = ctx.structural_hash();
        assert_eq!(before, ctx.structural_hash());
        ctx.draw_text("x", None, None);
        assert_ne!(before, ctx.structural_hash());
    }

    #[test]
    fn hash_depends_on_child_order() {
        let all = ids(3);
        let rect = Rect::new(0, 0, 2, 2).unwrap();
        let session = RenderSessionId::default();
        let a = DrawingContext::new(all[0], None, rect, &[all[1], all[2]], session);
        let b = DrawingContext::new(all[0], None, rect, &[all[2], all[1]], session);
        assert!(!a.structurally_equals(&b));
        let c = DrawingContext::new(all[0], None, rect, &[all[1], all[2]], session);
        assert!(a.structurally_equals(&c));
    }

    #[test]
    fn empty_context_ignores_text() {
        let mut ctx = context(0, 1);
        ctx.draw_text("abc", None, None);
        assert!(ctx.is_empty());
        assert!(ctx.set_cursor_pos(Point::ORIGIN).is_err());
    }
}
