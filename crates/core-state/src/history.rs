//! Grouped, reversible edit history.
//!
//! Every buffer mutation is described abstractly by an [`Action`] carrying
//! enough text to invert it; actions batch into [`ActionGroup`]s that undo
//! and redo as one unit (one group per user-perceptible edit, e.g. a typed
//! run in Insert mode or a single `dd`). The history never loses an edit:
//! recording without an open group wraps the action in a singleton group
//! rather than asserting on mismanaged bracketing.

use tracing::trace;

/// The kind of one atomic, reversible buffer edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    InsertChar,
    DeleteChar,
    SplitLine,
    JoinLines,
    DeleteLine,
    InsertLine,
    SetLine,
}

/// One atomic buffer edit: where it happened, the text it added, the text
/// it replaced, and the cursor position immediately before it (restored on
/// undo).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub row: usize,
    pub col: usize,
    pub text: String,
    pub prev_text: String,
    pub cursor_before: (usize, usize),
}

impl Action {
    pub fn new(kind: ActionKind, row: usize, col: usize, cursor_before: (usize, usize)) -> Self {
        Self {
            kind,
            row,
            col,
            text: String::new(),
            prev_text: String::new(),
            cursor_before,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_prev_text(mut self, prev: impl Into<String>) -> Self {
        self.prev_text = prev.into();
        self
    }
}

/// An ordered run of actions forming one undo/redo unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionGroup {
    pub actions: Vec<Action>,
}

/// Bounded undo/redo stacks of action groups plus the optionally-open
/// in-progress group.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<ActionGroup>,
    redo_stack: Vec<ActionGroup>,
    current: Option<ActionGroup>,
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            current: None,
            max_depth: max_depth.max(1),
        }
    }

    /// Open a fresh group. A dangling previous group is dropped; callers
    /// must not nest.
    pub fn begin_group(&mut self) {
        self.current = Some(ActionGroup::default());
    }

    /// Close the open group and push it. Empty groups are discarded so
    /// undo never presents a no-op step.
    pub fn end_group(&mut self) {
        let Some(group) = self.current.take() else {
            return;
        };
        if group.actions.is_empty() {
            return;
        }
        self.push_group(group);
    }

    /// Record one action. Clears the redo stack first: new edits
    /// invalidate redo history unconditionally. Appends to the open group,
    /// or pushes a singleton group when none is open.
    pub fn record(&mut self, action: Action) {
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.history", "redo_cleared_on_new_edit");
        }
        match &mut self.current {
            Some(group) => group.actions.push(action),
            None => self.push_group(ActionGroup {
                actions: vec![action],
            }),
        }
    }

    fn push_group(&mut self, group: ActionGroup) {
        self.undo_stack.push(group);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
            trace!(target: "state.history", "undo_stack_trimmed");
        }
        trace!(
            target: "state.history",
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "group_pushed"
        );
    }

    /// Pop the most recent group for reversal. The caller applies each
    /// action's inverse in reverse order and restores the stored
    /// pre-action cursor. Closes a non-empty open group first.
    pub fn undo(&mut self) -> Option<ActionGroup> {
        self.end_group();
        let group = self.undo_stack.pop()?;
        self.redo_stack.push(group.clone());
        trace!(
            target: "state.history",
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "undo_pop"
        );
        Some(group)
    }

    /// Pop from the redo stack for forward re-application.
    pub fn redo(&mut self) -> Option<ActionGroup> {
        let group = self.redo_stack.pop()?;
        self.undo_stack.push(group.clone());
        trace!(
            target: "state.history",
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "redo_pop"
        );
        Some(group)
    }

    /// True when there is anything to undo, counting a non-empty open
    /// group.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
            || self
                .current
                .as_ref()
                .is_some_and(|g| !g.actions.is_empty())
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}
