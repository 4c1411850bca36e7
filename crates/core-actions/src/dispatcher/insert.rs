//! Insert mode: text entry recorded into the open undo group.
//!
//! The group was opened on the Normal-mode transition; every mutation here
//! appends to it, and Escape closes it, so a whole typed run undoes as one
//! step. Navigation keys move the cursor without leaving the mode or
//! splitting the group.

use anyhow::Result;
use core_input::KeyEvent;
use core_state::{Action, ActionKind, Mode};

use crate::{DispatchOutcome, Engine};

pub(crate) fn handle_key(
    eng: &mut Engine,
    key: KeyEvent,
    page_rows: usize,
) -> Result<DispatchOutcome> {
    match key {
        KeyEvent::Escape => {
            eng.state.history.end_group();
            eng.state.mode = Mode::Normal;
        }
        KeyEvent::Char(ch) => insert_char(eng, ch)?,
        KeyEvent::Tab => insert_char(eng, '\t')?,
        KeyEvent::Enter => {
            let (row, col) = eng.cursor.position();
            eng.state
                .history
                .record(Action::new(ActionKind::SplitLine, row, col, (row, col)));
            eng.state.buffer.split_line(row, col)?;
            eng.cursor.move_to(row + 1, 0, &eng.state.buffer);
        }
        KeyEvent::Backspace => backspace(eng)?,
        KeyEvent::Delete => delete_under(eng)?,

        KeyEvent::ArrowLeft => eng.cursor.move_left(&eng.state.buffer),
        KeyEvent::ArrowRight => eng.cursor.move_right(&eng.state.buffer),
        KeyEvent::ArrowUp => eng.cursor.move_up(&eng.state.buffer),
        KeyEvent::ArrowDown => eng.cursor.move_down(&eng.state.buffer),
        KeyEvent::Home => eng.cursor.move_to_line_start(),
        KeyEvent::End => eng.cursor.move_to_line_end(&eng.state.buffer),
        KeyEvent::PageUp => eng.cursor.page_up(&eng.state.buffer, page_rows),
        KeyEvent::PageDown => eng.cursor.page_down(&eng.state.buffer, page_rows),

        _ => {}
    }
    Ok(DispatchOutcome::none())
}

fn insert_char(eng: &mut Engine, ch: char) -> Result<()> {
    let (row, col) = eng.cursor.position();
    eng.state.history.record(
        Action::new(ActionKind::InsertChar, row, col, (row, col)).with_text(ch.to_string()),
    );
    eng.state.buffer.insert_char(row, col, ch)?;
    eng.cursor.move_to(row, col + 1, &eng.state.buffer);
    Ok(())
}

fn backspace(eng: &mut Engine) -> Result<()> {
    let (row, col) = eng.cursor.position();
    if row == 0 && col == 0 {
        return Ok(());
    }
    if col == 0 {
        let seam = eng.state.buffer.line_len(row - 1)?;
        eng.state
            .history
            .record(Action::new(ActionKind::JoinLines, row - 1, seam, (row, col)));
    } else if let Some(prev) = eng.state.buffer.line(row)?.chars().nth(col - 1) {
        eng.state.history.record(
            Action::new(ActionKind::DeleteChar, row, col - 1, (row, col))
                .with_prev_text(prev.to_string()),
        );
    }
    let (new_row, new_col) = eng.state.buffer.backspace(row, col)?;
    eng.cursor.move_to(new_row, new_col, &eng.state.buffer);
    Ok(())
}

fn delete_under(eng: &mut Engine) -> Result<()> {
    let (row, col) = eng.cursor.position();
    let line_len = eng.state.buffer.line_len(row)?;
    if col >= line_len {
        return Ok(());
    }
    if let Some(ch) = eng.state.buffer.line(row)?.chars().nth(col) {
        eng.state.history.record(
            Action::new(ActionKind::DeleteChar, row, col, (row, col))
                .with_prev_text(ch.to_string()),
        );
        eng.state.buffer.delete_char(row, col)?;
    }
    Ok(())
}
