//! Dirty detection, repaint and minimal-write screen synchronisation.

mod compose;
mod invalidate;

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

pub use invalidate::{FrameStats, InvalidateParameters, RenderSessionId};

use compose::Patch;

use crate::console::Console;
use crate::control::{ChildPlacement, ControlId, ControlTree, PaintScope};
use crate::drawing::DrawingContext;
use crate::error::Result;
use crate::layout::update_layout;
use crate::types::{ColorPair, Size};

/// Turns the control tree into console writes, one frame at a time.
///
/// The renderer keeps one [`InvalidateParameters`] record per composed
/// control and uses it to skip repaints that would not change the screen.
#[derive(Debug)]
pub struct Renderer {
    cache: HashMap<ControlId, InvalidateParameters>,
    session: RenderSessionId,
    defaults: ColorPair,
    screen: Option<Size>,
    force_clear: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(ColorPair::default())
    }
}

#[derive(Debug, Default)]
struct Dirty {
    measure: bool,
    visual: bool,
}

impl Renderer {
    /// `defaults` resolve colours no control in the chain sets.
    pub fn new(defaults: ColorPair) -> Self {
        Self {
            cache: HashMap::new(),
            session: RenderSessionId::default(),
            defaults,
            screen: None,
            force_clear: false,
        }
    }

    pub fn defaults(&self) -> ColorPair {
        self.defaults
    }

    /// Change the screen defaults; the next frame redraws everything.
    pub fn set_defaults(&mut self, defaults: ColorPair) {
        if self.defaults != defaults {
            self.defaults = defaults;
            self.force_clear = true;
        }
    }

    /// Drop all cached state so the next frame clears and redraws.
    pub fn invalidate(&mut self) {
        self.cache.clear();
        self.force_clear = true;
    }

    pub fn parameters(&self, id: ControlId) -> Option<&InvalidateParameters> {
        self.cache.get(&id)
    }

    /// Session of the most recent paint pass.
    pub fn session(&self) -> RenderSessionId {
        self.session
    }

    /// Bring the console up to date with the tree.
    ///
    /// Returns idle stats without touching the console when nothing is dirty.
    pub fn render_frame(
        &mut self,
        tree: &mut ControlTree,
        console: &mut impl Console,
    ) -> Result<FrameStats> {
        let mut stats = FrameStats::default();
        let Some(root) = tree.root() else {
            return Ok(stats);
        };

        let screen = console.window_size()?;
        let resized = self.screen != Some(screen);
        let dirty = detect(tree, root);
        if !dirty.measure && !dirty.visual && !resized && !self.force_clear {
            return Ok(stats);
        }

        let mut clear = self.force_clear;
        if resized {
            debug!("screen size {:?} -> {screen:?}", self.screen);
            self.screen = Some(screen);
            tree.invalidate_measure(root)?;
            clear = true;
        }
        if resized || dirty.measure {
            update_layout(tree, root, screen)?;
            stats.laid_out = true;
        }

        self.session = self.session.next();
        let session = self.session;
        let (painted, surface_moved) = self.paint(tree, root, session)?;
        stats.painted = painted;
        clear |= surface_moved;

        if clear {
            console.clear()?;
            self.cache.clear();
            self.force_clear = false;
            stats.cleared = true;
        }

        let order = tree.descendants(root);
        let mut patch = Patch::new(screen);
        for id in &order {
            if self.compose_one(tree, &order, *id, session, clear, &mut patch)? {
                stats.composed += 1;
            }
        }

        let reachable: HashSet<ControlId> = order.iter().copied().collect();
        self.cache.retain(|id, _| reachable.contains(id));

        stats.runs = patch.emit(console)?;
        if stats.runs > 0 || stats.cleared {
            console.flush()?;
        }
        trace!("frame {session:?}: {stats:?}");
        Ok(stats)
    }

    /// Rebuild the contexts of dirty controls and of every child below a
    /// rebuilt parent.
    ///
    /// Returns the number of repainted controls and whether a top-level
    /// surface changed its rectangle.
    fn paint(
        &self,
        tree: &mut ControlTree,
        root: ControlId,
        session: RenderSessionId,
    ) -> Result<(usize, bool)> {
        let mut painted = 0;
        let mut surface_moved = false;
        let mut stack = vec![(root, false)];
        while let Some((id, parent_repainted)) = stack.pop() {
            let node = tree.node(id)?;
            let repaint = parent_repainted || !node.visual_valid;
            let children = node.children.clone();
            for child in children.iter().rev() {
                stack.push((*child, repaint));
            }
            if !repaint {
                continue;
            }

            let top_level = id == root || node.parent == Some(root);
            if top_level {
                if let Some(cached) = self.cache.get(&id) {
                    if cached.painted_rect != node.bounds {
                        debug!(
                            "surface {id:?} moved {:?} -> {:?}",
                            cached.painted_rect, node.bounds
                        );
                        surface_moved = true;
                    }
                }
            }

            let ctx = repaint_one(tree, id, &children, session)?;
            let node = tree.node_mut(id)?;
            node.context = Some(ctx);
            node.visual_valid = true;
            painted += 1;
        }
        Ok((painted, surface_moved))
    }

    /// Compose one control's context if it can have changed the screen.
    fn compose_one(
        &mut self,
        tree: &ControlTree,
        order: &[ControlId],
        id: ControlId,
        session: RenderSessionId,
        cleared: bool,
        patch: &mut Patch,
    ) -> Result<bool> {
        let node = tree.node(id)?;
        let Some(ctx) = node.context() else {
            return Ok(false);
        };
        let rect = ctx.rect();
        let fresh = ctx.session() == session;
        // An earlier write this frame may have covered our cells.
        let forced = cleared || patch.overlaps(&rect);
        if !fresh && !forced {
            return Ok(false);
        }

        let hash = ctx.structural_hash();
        let parent_hash = node
            .parent
            .and_then(|p| tree.node(p).ok())
            .and_then(|p| p.context())
            .map_or(0, DrawingContext::structural_hash);
        let params = InvalidateParameters {
            structural_hash: hash,
            parent_hash,
            session,
            painted_rect: rect,
            screen_location: rect.top_left(),
        };

        let previous = self.cache.insert(id, params);
        if !forced && previous.is_some_and(|p| p.matches(hash, parent_hash)) {
            return Ok(false);
        }

        if let Some(previous) = previous.filter(|_| node.parent.is_some()) {
            if !rect.contains_rect(&previous.painted_rect) {
                let exposed = previous.painted_rect;
                patch.backfill(tree, order, id, exposed, rect, self.defaults);
            }
        }
        patch.compose(tree, id, self.defaults);
        Ok(true)
    }
}

/// Walk the tree for invalid flags, not descending below a control whose
/// measure is already invalid.
fn detect(tree: &ControlTree, root: ControlId) -> Dirty {
    let mut dirty = Dirty::default();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Ok(node) = tree.node(id) else {
            continue;
        };
        if !node.measure_valid {
            dirty.measure = true;
            continue;
        }
        if !node.visual_valid {
            dirty.visual = true;
        }
        stack.extend(node.children.iter().copied());
    }
    dirty
}

/// Build a fresh context for `id` and run its paint callback.
fn repaint_one(
    tree: &ControlTree,
    id: ControlId,
    children: &[ControlId],
    session: RenderSessionId,
) -> Result<DrawingContext> {
    let node = tree.node(id)?;
    let mut ctx = DrawingContext::new(id, node.parent, node.bounds, children, session);
    if ctx.is_empty() {
        return Ok(ctx);
    }

    let placements = children
        .iter()
        .map(|child| {
            tree.node(*child).map(|c| ChildPlacement {
                id: *child,
                bounds: c.bounds,
                grid_cell: c.grid_cell,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let scope = PaintScope {
        id,
        bounds: node.bounds,
        padding: node.padding,
        background: node.background,
        foreground: node.foreground,
        focused: node.focused,
        layout: &node.layout,
        children: placements,
    };
    node.widget.on_paint(&mut ctx, &scope)?;
    Ok(ctx)
}
