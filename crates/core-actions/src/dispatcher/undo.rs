//! Undo / redo application.
//!
//! The history hands back whole groups; this module inverts each action in
//! reverse order for undo, re-applies forward for redo, and places the
//! cursor: undo restores the first action's pre-action position, redo the
//! natural post-action position of the last action. Inversion failures are
//! engine bugs (the records describe mutations that were applied) and
//! propagate.

use anyhow::{Context, Result};
use core_state::{Action, ActionKind};
use core_text::{Buffer, OutOfBounds};
use tracing::trace;

use crate::Engine;

pub(crate) fn handle_undo(eng: &mut Engine) -> Result<()> {
    let Some(group) = eng.state.history.undo() else {
        eng.state.set_status("Already at oldest change");
        return Ok(());
    };
    for action in group.actions.iter().rev() {
        revert(&mut eng.state.buffer, action)
            .with_context(|| format!("undo of {:?} at {}:{}", action.kind, action.row, action.col))?;
    }
    if let Some(first) = group.actions.first() {
        let (row, col) = first.cursor_before;
        eng.cursor.move_to(row, col, &eng.state.buffer);
    }
    trace!(target: "actions.dispatch", op = "undo", actions = group.actions.len(), "group_reverted");
    Ok(())
}

pub(crate) fn handle_redo(eng: &mut Engine) -> Result<()> {
    let Some(group) = eng.state.history.redo() else {
        eng.state.set_status("Already at newest change");
        return Ok(());
    };
    for action in &group.actions {
        apply(&mut eng.state.buffer, action)
            .with_context(|| format!("redo of {:?} at {}:{}", action.kind, action.row, action.col))?;
    }
    if let Some(last) = group.actions.last() {
        let (row, col) = cursor_after(last);
        eng.cursor.move_to(row, col, &eng.state.buffer);
    }
    trace!(target: "actions.dispatch", op = "redo", actions = group.actions.len(), "group_reapplied");
    Ok(())
}

/// Apply the inverse of one recorded action.
fn revert(buf: &mut Buffer, a: &Action) -> Result<(), OutOfBounds> {
    match a.kind {
        ActionKind::InsertChar => buf.delete_char(a.row, a.col),
        ActionKind::DeleteChar => match a.prev_text.chars().next() {
            Some(ch) => buf.insert_char(a.row, a.col, ch),
            None => Ok(()),
        },
        ActionKind::SplitLine => buf.join_lines(a.row),
        ActionKind::JoinLines => buf.split_line(a.row, a.col),
        ActionKind::DeleteLine => buf.insert_line_with(a.row, a.prev_text.clone()),
        ActionKind::InsertLine => buf.delete_line(a.row),
        ActionKind::SetLine => buf.set_line(a.row, a.prev_text.clone()),
    }
}

/// Re-apply one recorded action in the forward direction.
fn apply(buf: &mut Buffer, a: &Action) -> Result<(), OutOfBounds> {
    match a.kind {
        ActionKind::InsertChar => match a.text.chars().next() {
            Some(ch) => buf.insert_char(a.row, a.col, ch),
            None => Ok(()),
        },
        ActionKind::DeleteChar => buf.delete_char(a.row, a.col),
        ActionKind::SplitLine => buf.split_line(a.row, a.col),
        ActionKind::JoinLines => buf.join_lines(a.row),
        ActionKind::DeleteLine => buf.delete_line(a.row),
        ActionKind::InsertLine => buf.insert_line_with(a.row, a.text.clone()),
        ActionKind::SetLine => buf.set_line(a.row, a.text.clone()),
    }
}

/// Where the cursor naturally lands right after an action is applied.
fn cursor_after(a: &Action) -> (usize, usize) {
    match a.kind {
        ActionKind::InsertChar => (a.row, a.col + 1),
        ActionKind::DeleteChar => (a.row, a.col),
        ActionKind::SplitLine => (a.row + 1, 0),
        ActionKind::JoinLines => (a.row, a.col),
        ActionKind::DeleteLine | ActionKind::InsertLine | ActionKind::SetLine => (a.row, 0),
    }
}
