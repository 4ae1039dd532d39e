//! Grid container: track sizing, cell placement and grid-line glyphs.

use super::{align, arrange, measure};
use crate::control::{ControlId, ControlTree, PaintScope};
use crate::drawing::DrawingContext;
use crate::error::Result;
use crate::types::{Point, Rect, Size};

/// Declared size of one row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSize {
    /// Fixed number of cells.
    Absolute(i32),
    /// Percentage of the extent left after absolute tracks.
    Percent(i32),
    /// Even share of whatever is left at the end.
    AutoSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridDefinition {
    pub columns: Vec<TrackSize>,
    pub rows: Vec<TrackSize>,
    /// Draw a border and one-cell separators between tracks.
    pub show_lines: bool,
}

impl GridDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = TrackSize>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = TrackSize>) -> Self {
        self.rows = rows.into_iter().collect();
        self
    }

    pub fn with_lines(mut self) -> Self {
        self.show_lines = true;
        self
    }

    fn effective(tracks: &[TrackSize]) -> Vec<TrackSize> {
        if tracks.is_empty() {
            vec![TrackSize::AutoSize]
        } else {
            tracks.to_vec()
        }
    }

    fn line_width(&self) -> i32 {
        i32::from(self.show_lines)
    }
}

/// Cell a child occupies, with optional spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
}

impl Default for GridCell {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl GridCell {
    pub const fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            row_span: 1,
            column_span: 1,
        }
    }

    pub const fn span(mut self, rows: usize, columns: usize) -> Self {
        self.row_span = rows;
        self.column_span = columns;
        self
    }
}

/// Split `extent` between `tracks`.
///
/// Absolute tracks are served first (never past the extent), percent tracks
/// share the remainder as `remainder * p / max(100, Σp)`, auto tracks split
/// what is left evenly. Integer truncation drops rounding remainders, so
/// the result may sum to less than `extent`; it never sums to more and never
/// holds a negative size.
pub fn size_tracks(tracks: &[TrackSize], extent: i32) -> Vec<i32> {
    let mut sizes = vec![0; tracks.len()];
    let mut remaining = extent.max(0);

    for (size, track) in sizes.iter_mut().zip(tracks) {
        if let TrackSize::Absolute(n) = track {
            *size = (*n).clamp(0, remaining);
            remaining -= *size;
        }
    }

    let percent_total: i64 = tracks
        .iter()
        .filter_map(|t| match t {
            TrackSize::Percent(p) => Some(i64::from((*p).max(0))),
            _ => None,
        })
        .sum();
    let base = i64::from(remaining);
    let divisor = percent_total.max(100);
    for (size, track) in sizes.iter_mut().zip(tracks) {
        if let TrackSize::Percent(p) = track {
            *size = (base * i64::from((*p).max(0)) / divisor) as i32;
            remaining -= *size;
        }
    }

    let autos = tracks
        .iter()
        .filter(|t| matches!(t, TrackSize::AutoSize))
        .count() as i32;
    if autos > 0 {
        let share = remaining / autos;
        for (size, track) in sizes.iter_mut().zip(tracks) {
            if matches!(track, TrackSize::AutoSize) {
                *size = share;
            }
        }
    }

    sizes
}

/// Resolved track geometry for one content rectangle.
#[derive(Debug, Clone)]
pub(crate) struct Tracks {
    columns: Vec<i32>,
    rows: Vec<i32>,
    column_starts: Vec<i32>,
    row_starts: Vec<i32>,
    line: i32,
}

impl Tracks {
    pub(crate) fn compute(def: &GridDefinition, content: Rect) -> Self {
        let column_defs = GridDefinition::effective(&def.columns);
        let row_defs = GridDefinition::effective(&def.rows);
        let line = def.line_width();

        let column_extent = content.width() - line * (column_defs.len() as i32 + 1);
        let row_extent = content.height() - line * (row_defs.len() as i32 + 1);
        let columns = size_tracks(&column_defs, column_extent);
        let rows = size_tracks(&row_defs, row_extent);

        Self {
            column_starts: starts(&columns, content.x() + line, line),
            row_starts: starts(&rows, content.y() + line, line),
            columns,
            rows,
            line,
        }
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Extent covered by tracks and lines.
    pub(crate) fn total(&self) -> Size {
        let lines = |n: usize| self.line * (n as i32 + 1);
        Size::saturating(
            self.columns.iter().sum::<i32>() + lines(self.column_count()),
            self.rows.iter().sum::<i32>() + lines(self.row_count()),
        )
    }

    /// Rectangle of a (possibly spanning) cell; out-of-range cells clamp to
    /// the last track.
    pub(crate) fn cell_rect(&self, cell: GridCell) -> Rect {
        let (x, width) =
            span_extent(&self.column_starts, &self.columns, cell.column, cell.column_span);
        let (y, height) = span_extent(&self.row_starts, &self.rows, cell.row, cell.row_span);
        Rect::at(Point::new(x, y), Size::saturating(width, height))
    }

    /// Position of the vertical line left of column `index` (`index == len`
    /// is the right border).
    fn column_line(&self, index: usize) -> i32 {
        line_position(&self.column_starts, &self.columns, index)
    }

    fn row_line(&self, index: usize) -> i32 {
        line_position(&self.row_starts, &self.rows, index)
    }
}

fn starts(sizes: &[i32], origin: i32, line: i32) -> Vec<i32> {
    let mut out = Vec::with_capacity(sizes.len());
    let mut at = origin;
    for size in sizes {
        out.push(at);
        at += size + line;
    }
    out
}

fn span_extent(starts: &[i32], sizes: &[i32], index: usize, span: usize) -> (i32, i32) {
    let first = index.min(sizes.len() - 1);
    let last = index.saturating_add(span.max(1)).min(sizes.len()).max(first + 1) - 1;
    let begin = starts[first];
    let end = starts[last] + sizes[last];
    (begin, end - begin)
}

fn line_position(starts: &[i32], sizes: &[i32], index: usize) -> i32 {
    if index == 0 {
        starts[0] - 1
    } else {
        starts[index - 1] + sizes[index - 1]
    }
}

pub(crate) fn measure_grid(
    tree: &mut ControlTree,
    def: &GridDefinition,
    children: &[ControlId],
    content: Size,
) -> Result<Size> {
    let tracks = Tracks::compute(def, Rect::from_size(content));
    for child in children {
        let cell = tree.node(*child)?.grid_cell;
        measure(tree, *child, tracks.cell_rect(cell).size())?;
    }
    Ok(tracks.total())
}

pub(crate) fn arrange_grid(
    tree: &mut ControlTree,
    def: &GridDefinition,
    children: &[ControlId],
    content: Rect,
) -> Result<()> {
    let tracks = Tracks::compute(def, content);
    for child in children {
        let node = tree.node(*child)?;
        let slot = tracks.cell_rect(node.grid_cell);
        let rect = align(
            slot,
            node.desired_size,
            node.horizontal_alignment,
            node.vertical_alignment,
        );
        arrange(tree, *child, rect, true)?;
    }
    Ok(())
}

/// Pick the glyph for a line intersection from the arms that leave it.
pub fn junction_glyph(up: bool, down: bool, left: bool, right: bool) -> char {
    match (up, down, left, right) {
        (true, true, true, true) => '┼',
        (true, true, false, true) => '├',
        (true, true, true, false) => '┤',
        (false, true, true, true) => '┬',
        (true, false, true, true) => '┴',
        (false, true, false, true) => '┌',
        (false, true, true, false) => '┐',
        (true, false, false, true) => '└',
        (true, false, true, false) => '┘',
        (true, true, false, false) => '│',
        (false, false, true, true) => '─',
        (true, false, false, false) | (false, true, false, false) => '│',
        (false, false, true, false) | (false, false, false, true) => '─',
        (false, false, false, false) => ' ',
    }
}

/// Which span a grid cell belongs to. Everything outside the grid is one
/// shared span, so the border falls out of the same neighbour rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Outside,
    Empty(usize, usize),
    Child(usize),
}

struct SpanMap {
    rows: usize,
    columns: usize,
    cells: Vec<Option<usize>>,
}

impl SpanMap {
    fn new(rows: usize, columns: usize, placements: impl Iterator<Item = GridCell>) -> Self {
        let mut cells = vec![None; rows * columns];
        for (index, cell) in placements.enumerate() {
            let row_end = cell.row.saturating_add(cell.row_span.max(1)).min(rows);
            let column_end = cell.column.saturating_add(cell.column_span.max(1)).min(columns);
            for row in cell.row.min(rows)..row_end {
                for column in cell.column.min(columns)..column_end {
                    cells[row * columns + column] = Some(index);
                }
            }
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    fn owner(&self, row: isize, column: isize) -> Owner {
        if row < 0 || column < 0 || row as usize >= self.rows || column as usize >= self.columns {
            return Owner::Outside;
        }
        let (row, column) = (row as usize, column as usize);
        match self.cells[row * self.columns + column] {
            Some(child) => Owner::Child(child),
            None => Owner::Empty(row, column),
        }
    }

    /// Arms at the intersection above-left of cell `(row, column)`.
    fn junction(&self, row: usize, column: usize) -> char {
        let (r, c) = (row as isize, column as isize);
        let top_left = self.owner(r - 1, c - 1);
        let top_right = self.owner(r - 1, c);
        let bottom_left = self.owner(r, c - 1);
        let bottom_right = self.owner(r, c);
        junction_glyph(
            top_left != top_right,
            bottom_left != bottom_right,
            top_left != bottom_left,
            top_right != bottom_right,
        )
    }
}

/// Draw the border and separators of a grid with lines enabled.
///
/// Separators inside a merged span are left blank.
pub fn draw_grid_lines(
    ctx: &mut DrawingContext,
    def: &GridDefinition,
    scope: &PaintScope<'_>,
) -> Result<()> {
    if !def.show_lines || ctx.is_empty() {
        return Ok(());
    }
    let tracks = Tracks::compute(def, scope.content_rect());
    let spans = SpanMap::new(
        tracks.row_count(),
        tracks.column_count(),
        scope.children.iter().map(|c| c.grid_cell),
    );
    let local = Rect::from_size(ctx.rect().size());
    let put = |ctx: &mut DrawingContext, x: i32, y: i32, ch: char| -> Result<()> {
        let point = Point::new(x, y);
        if local.contains(point) {
            ctx.put_char(point, ch, None, None)?;
        }
        Ok(())
    };

    for row in 0..=tracks.row_count() {
        let y = tracks.row_line(row);
        for column in 0..=tracks.column_count() {
            let x = tracks.column_line(column);
            put(ctx, x, y, spans.junction(row, column))?;
        }
        for column in 0..tracks.column_count() {
            let above = spans.owner(row as isize - 1, column as isize);
            let below = spans.owner(row as isize, column as isize);
            let ch = if above != below { '─' } else { ' ' };
            let start = tracks.column_starts[column];
            for x in start..start + tracks.columns[column] {
                put(ctx, x, y, ch)?;
            }
        }
    }

    for column in 0..=tracks.column_count() {
        let x = tracks.column_line(column);
        for row in 0..tracks.row_count() {
            let left = spans.owner(row as isize, column as isize - 1);
            let right = spans.owner(row as isize, column as isize);
            let ch = if left != right { '│' } else { ' ' };
            let start = tracks.row_starts[row];
            for y in start..start + tracks.rows[row] {
                put(ctx, x, y, ch)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::TrackSize::{Absolute, AutoSize, Percent};

    #[test]
    fn absolute_then_percent_then_auto() {
        let sizes = size_tracks(&[Absolute(10), Percent(50), AutoSize, AutoSize], 50);
        // 40 left after the absolute track: 20 for the percent track, 10 + 10 auto.
        assert_eq!(sizes, vec![10, 20, 10, 10]);
    }

    #[test]
    fn percent_truncation_drops_remainder() {
        let sizes = size_tracks(&[Percent(33), Percent(33), Percent(34)], 10);
        assert_eq!(sizes, vec![3, 3, 3]);
        assert!(sizes.iter().sum::<i32>() <= 10);
    }

    #[test]
    fn oversubscribed_percent_is_scaled() {
        let sizes = size_tracks(&[Percent(100), Percent(100)], 10);
        assert_eq!(sizes, vec![5, 5]);
    }

    #[test]
    fn absolute_tracks_never_exceed_extent() {
        let sizes = size_tracks(&[Absolute(8), Absolute(8), AutoSize], 10);
        assert_eq!(sizes, vec![8, 2, 0]);
    }

    #[test]
    fn huge_cell_indices_clamp_to_last_track() {
        let def = GridDefinition::new()
            .columns([Absolute(3), Absolute(4)])
            .rows([Absolute(1), Absolute(1)])
            .with_lines();
        let tracks = Tracks::compute(&def, Rect::new(0, 0, 10, 5).unwrap());
        let cell = GridCell::new(usize::MAX, usize::MAX).span(usize::MAX, usize::MAX);
        assert_eq!(tracks.cell_rect(cell), Rect::new(5, 3, 4, 1).unwrap());

        let spans = SpanMap::new(2, 2, std::iter::once(cell));
        assert_eq!(spans.junction(1, 1), '┼');
    }

    #[test]
    fn negative_declarations_are_clamped() {
        let sizes = size_tracks(&[Absolute(-4), Percent(-20), AutoSize], 6);
        assert_eq!(sizes, vec![0, 0, 6]);
    }

    #[test]
    fn cell_rect_covers_spanned_tracks_and_lines() {
        let def = GridDefinition::new()
            .columns([Absolute(3), Absolute(4)])
            .rows([Absolute(1), Absolute(1)])
            .with_lines();
        let tracks = Tracks::compute(&def, Rect::new(0, 0, 10, 5).unwrap());
        assert_eq!(tracks.cell_rect(GridCell::new(0, 1)), Rect::new(5, 1, 4, 1).unwrap());
        assert_eq!(
            tracks.cell_rect(GridCell::new(0, 0).span(2, 2)),
            Rect::new(1, 1, 8, 3).unwrap()
        );
        assert_eq!(tracks.total(), Size::new(10, 5).unwrap());
    }

    #[test]
    fn junction_glyphs() {
        assert_eq!(junction_glyph(true, true, true, true), '┼');
        assert_eq!(junction_glyph(true, true, false, true), '├');
        assert_eq!(junction_glyph(false, true, true, true), '┬');
        assert_eq!(junction_glyph(false, true, false, true), '┌');
        assert_eq!(junction_glyph(true, false, true, false), '┘');
    }

    #[test]
    fn span_map_resolves_borders_and_merges() {
        // 2x2 grid, top row merged into one span.
        let spans = SpanMap::new(
            2,
            2,
            [GridCell::new(0, 0).span(1, 2), GridCell::new(1, 0), GridCell::new(1, 1)].into_iter(),
        );
        assert_eq!(spans.junction(0, 0), '┌');
        assert_eq!(spans.junction(0, 1), '─');
        assert_eq!(spans.junction(0, 2), '┐');
        assert_eq!(spans.junction(1, 0), '├');
        assert_eq!(spans.junction(1, 1), '┬');
        assert_eq!(spans.junction(2, 1), '┴');
        assert_eq!(spans.junction(2, 2), '┘');
    }

    #[test]
    fn unmerged_interior_is_a_cross() {
        let spans = SpanMap::new(2, 2, std::iter::empty());
        assert_eq!(spans.junction(1, 1), '┼');
        assert_eq!(spans.junction(1, 2), '┤');
    }
}
