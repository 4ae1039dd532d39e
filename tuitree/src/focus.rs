use log::debug;

use crate::control::{ControlId, ControlTree};
use crate::error::Result;

/// Tracks which control is focused and moves focus in tab order.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<ControlId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused control.
    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    /// Programmatically focus a control.
    /// Returns true if focus changed.
    pub fn focus(&mut self, tree: &mut ControlTree, id: ControlId) -> Result<bool> {
        if self.focused == Some(id) {
            return Ok(false);
        }
        self.transition(tree, Some(id))?;
        Ok(true)
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self, tree: &mut ControlTree) -> Result<bool> {
        if self.focused.is_none() {
            return Ok(false);
        }
        self.transition(tree, None)?;
        Ok(true)
    }

    /// Focus the next focusable control below `scope` (Tab navigation).
    /// Returns the newly focused control if focus changed.
    pub fn focus_next(
        &mut self,
        tree: &mut ControlTree,
        scope: ControlId,
    ) -> Result<Option<ControlId>> {
        let focusable = collect_focusable(tree, scope);
        if focusable.is_empty() {
            return Ok(None);
        }

        let new_focus = match self.position_in(&focusable) {
            Some(i) => focusable[(i + 1) % focusable.len()],
            None => focusable[0],
        };
        self.move_to(tree, new_focus)
    }

    /// Focus the previous focusable control below `scope` (Shift+Tab navigation).
    /// Returns the newly focused control if focus changed.
    pub fn focus_prev(
        &mut self,
        tree: &mut ControlTree,
        scope: ControlId,
    ) -> Result<Option<ControlId>> {
        let focusable = collect_focusable(tree, scope);
        if focusable.is_empty() {
            return Ok(None);
        }

        let last = focusable.len() - 1;
        let new_focus = match self.position_in(&focusable) {
            Some(0) | None => focusable[last],
            Some(i) => focusable[i - 1],
        };
        self.move_to(tree, new_focus)
    }

    /// Forget a focused control that left the tree, without events.
    pub fn forget_detached(&mut self, tree: &ControlTree) {
        if self.focused.is_some_and(|id| !tree.is_attached(id)) {
            self.focused = None;
        }
    }

    fn position_in(&self, focusable: &[ControlId]) -> Option<usize> {
        let current = self.focused?;
        focusable.iter().position(|id| *id == current)
    }

    fn move_to(&mut self, tree: &mut ControlTree, id: ControlId) -> Result<Option<ControlId>> {
        if self.focused == Some(id) {
            return Ok(None);
        }
        self.transition(tree, Some(id))?;
        Ok(Some(id))
    }

    fn transition(&mut self, tree: &mut ControlTree, next: Option<ControlId>) -> Result<()> {
        debug!("focus {:?} -> {next:?}", self.focused);
        if let Some(previous) = self.focused.take() {
            // The previous control may have been destroyed since.
            if tree.contains(previous) {
                tree.set_focused(previous, false)?;
            }
        }
        if let Some(next) = next {
            tree.set_focused(next, true)?;
        }
        self.focused = next;
        Ok(())
    }
}

/// Focusable controls below `scope` in tab order.
///
/// Shallower controls come first; at equal depth higher tab indices come
/// first; ties keep tree order.
pub fn collect_focusable(tree: &ControlTree, scope: ControlId) -> Vec<ControlId> {
    let base = tree.depth(scope);
    let mut entries: Vec<(usize, i32, ControlId)> = tree
        .descendants(scope)
        .into_iter()
        .filter_map(|id| {
            let node = tree.node(id).ok()?;
            node.can_focus()
                .then(|| (tree.depth(id) - base, node.tab_index(), id))
        })
        .collect();
    // Stable sort keeps depth-first order among equal keys.
    entries.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    entries.into_iter().map(|(_, _, id)| id).collect()
}
