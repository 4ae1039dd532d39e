//! Frame patch assembly and run emission.

use std::io;

use crate::console::Console;
use crate::control::{ControlId, ControlTree};
use crate::drawing::{Grid, CONTINUATION};
use crate::types::{ColorPair, ColorPoint, Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PatchCell {
    pub ch: char,
    pub colors: ColorPair,
}

/// Screen-sized scratch buffer holding only the cells written this frame.
#[derive(Debug)]
pub(crate) struct Patch {
    cells: Grid<Option<PatchCell>>,
    written: Vec<Rect>,
}

impl Patch {
    pub(crate) fn new(screen: Size) -> Self {
        Self {
            cells: Grid::new(screen.width(), screen.height(), None),
            written: Vec::new(),
        }
    }

    fn screen(&self) -> Rect {
        Rect::from_size(Size::saturating(self.cells.width(), self.cells.height()))
    }

    /// Whether an earlier write this frame touched `rect`.
    pub(crate) fn overlaps(&self, rect: &Rect) -> bool {
        self.written.iter().any(|w| w.intersects(rect))
    }

    fn cell(&self, x: i32, y: i32) -> Option<PatchCell> {
        self.cells.get(x, y).copied().flatten()
    }

    fn put(&mut self, point: Point, cell: PatchCell) {
        let (x, y) = (point.x, point.y);
        if cell.ch != CONTINUATION {
            // Overwriting half of a wide character orphans the other half.
            if self.cell(x, y).is_some_and(|c| c.ch == CONTINUATION) {
                if let Some(lead) = self.cell(x - 1, y) {
                    self.cells.set(x - 1, y, Some(PatchCell { ch: ' ', ..lead }));
                }
            }
            if let Some(next) = self.cell(x + 1, y).filter(|c| c.ch == CONTINUATION) {
                self.cells.set(x + 1, y, Some(PatchCell { ch: ' ', ..next }));
            }
        }
        self.cells.set(x, y, Some(cell));
    }

    /// Copy a control's context into the patch, resolving unset colours.
    pub(crate) fn compose(&mut self, tree: &ControlTree, id: ControlId, defaults: ColorPair) {
        let Some(ctx) = tree.node(id).ok().and_then(|n| n.context()) else {
            return;
        };
        let screen = self.screen();
        let rect = ctx.rect();
        for point in rect.points().filter(|p| screen.contains(*p)) {
            if let Some((ch, colors)) = ctx.cell_at(point) {
                let colors = resolve(tree, ctx.parent(), point, colors, defaults);
                self.put(point, PatchCell { ch, colors });
            }
        }
        self.written.push(rect);
    }

    /// Repaint cells of `previous` that `current` no longer covers.
    ///
    /// Each exposed cell comes from the topmost context covering it in paint
    /// order, ignoring `mover` and its subtree, so siblings that grew into the
    /// area this frame keep their new content.
    pub(crate) fn backfill(
        &mut self,
        tree: &ControlTree,
        order: &[ControlId],
        mover: ControlId,
        previous: Rect,
        current: Rect,
        defaults: ColorPair,
    ) {
        let screen = self.screen();
        let candidates: Vec<ControlId> = order
            .iter()
            .copied()
            .filter(|id| !tree.ancestors_or_self(*id).any(|a| a == mover))
            .collect();
        for point in previous.points() {
            if current.contains(point) || !screen.contains(point) {
                continue;
            }
            let covering = candidates.iter().rev().find_map(|id| {
                let ctx = tree.node(*id).ok()?.context()?;
                ctx.cell_at(point).map(|cell| (ctx.parent(), cell))
            });
            let cell = match covering {
                Some((parent, (ch, colors))) => PatchCell {
                    ch,
                    colors: resolve(tree, parent, point, colors, defaults),
                },
                None => PatchCell {
                    ch: ' ',
                    colors: defaults,
                },
            };
            self.put(point, cell);
        }
        self.written.push(previous);
    }

    /// Write the patch row by row as runs of one colour pair.
    ///
    /// Returns the number of runs emitted.
    pub(crate) fn emit(&self, console: &mut impl Console) -> io::Result<usize> {
        let mut runs = 0;
        for y in 0..self.cells.height() {
            let mut x = 0;
            while x < self.cells.width() {
                let Some(first) = self.cell(x, y) else {
                    x += 1;
                    continue;
                };
                if first.ch == CONTINUATION {
                    x += 1;
                    continue;
                }
                let start = x;
                let mut text = String::new();
                while let Some(cell) = self.cell(x, y) {
                    if cell.colors != first.colors {
                        break;
                    }
                    if cell.ch != CONTINUATION {
                        text.push(cell.ch);
                    }
                    x += 1;
                }
                console.set_cursor_position(start, y)?;
                console.set_background_color(Some(first.colors.background))?;
                console.set_foreground_color(Some(first.colors.foreground))?;
                console.write(&text)?;
                runs += 1;
            }
        }
        Ok(runs)
    }
}

/// Fill unset colour components from the contexts of `start` and its
/// ancestors, then from `defaults`.
///
/// An ancestor contributes only where its context covers `point`. Stops as
/// soon as both components are set.
pub(crate) fn resolve(
    tree: &ControlTree,
    start: Option<ControlId>,
    point: Point,
    mut colors: ColorPoint,
    defaults: ColorPair,
) -> ColorPair {
    if let Some(start) = start {
        for ancestor in tree.ancestors_or_self(start) {
            if colors.is_resolved() {
                break;
            }
            let inherited = tree
                .node(ancestor)
                .ok()
                .and_then(|n| n.context())
                .and_then(|ctx| ctx.cell_at(point));
            if let Some((_, parent_colors)) = inherited {
                colors = colors.or(parent_colors);
            }
        }
    }
    ColorPair::new(
        colors.background.unwrap_or(defaults.background),
        colors.foreground.unwrap_or(defaults.foreground),
    )
}
