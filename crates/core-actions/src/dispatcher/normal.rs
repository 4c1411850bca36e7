//! Normal mode: navigation, operators, and register commands.
//!
//! Multi-key sequences (count prefixes, `dd`, `yy`, `gg`) accumulate in
//! the engine's pending state across calls. A digit extends the count
//! (`0` only once a count is open; bare `0` is the line-start motion); an
//! operator key parks itself and waits for its completion; any
//! unrecognized continuation aborts the pending sequence without side
//! effects.

use anyhow::Result;
use core_input::KeyEvent;
use core_state::{Action, ActionKind, Mode};

use super::{search, undo};
use crate::{DispatchOutcome, Engine};

pub(crate) fn handle_key(
    eng: &mut Engine,
    key: KeyEvent,
    page_rows: usize,
) -> Result<DispatchOutcome> {
    if let KeyEvent::Char(c) = key {
        if c.is_ascii_digit()
            && eng.pending.op.is_none()
            && (c != '0' || eng.pending.count.is_some())
        {
            eng.pending.push_digit((c as u8 - b'0') as usize);
            return Ok(DispatchOutcome::none());
        }
    }

    if let Some(op) = eng.pending.op {
        let count = eng.pending.take_count();
        eng.pending.clear();
        match (op, key) {
            ('d', KeyEvent::Char('d')) => delete_lines(eng, count)?,
            ('y', KeyEvent::Char('y')) => yank_lines(eng, count)?,
            ('g', KeyEvent::Char('g')) => eng.cursor.move_to_first_line(),
            _ => {} // unrecognized continuation aborts the sequence
        }
        return Ok(DispatchOutcome::none());
    }

    // Operator starters park themselves without disturbing the count.
    if let KeyEvent::Char(c @ ('d' | 'y' | 'g')) = key {
        eng.pending.op = Some(c);
        return Ok(DispatchOutcome::none());
    }

    let count = eng.pending.take_count();
    eng.pending.clear();

    match key {
        KeyEvent::Char('h') | KeyEvent::ArrowLeft => {
            for _ in 0..count {
                eng.cursor.move_left(&eng.state.buffer);
            }
        }
        KeyEvent::Char('j') | KeyEvent::ArrowDown => {
            for _ in 0..count {
                eng.cursor.move_down(&eng.state.buffer);
            }
        }
        KeyEvent::Char('k') | KeyEvent::ArrowUp => {
            for _ in 0..count {
                eng.cursor.move_up(&eng.state.buffer);
            }
        }
        KeyEvent::Char('l') | KeyEvent::ArrowRight => {
            for _ in 0..count {
                eng.cursor.move_right(&eng.state.buffer);
            }
        }
        KeyEvent::Char('0') | KeyEvent::Home => eng.cursor.move_to_line_start(),
        KeyEvent::Char('$') | KeyEvent::End => eng.cursor.move_to_line_end(&eng.state.buffer),
        KeyEvent::Char('G') => eng.cursor.move_to_last_line(&eng.state.buffer),
        KeyEvent::PageUp => eng.cursor.page_up(&eng.state.buffer, page_rows),
        KeyEvent::PageDown => eng.cursor.page_down(&eng.state.buffer, page_rows),

        KeyEvent::Char('i') => enter_insert(eng),
        KeyEvent::Char('a') => {
            let (row, col) = eng.cursor.position();
            eng.cursor.move_to(row, col + 1, &eng.state.buffer);
            enter_insert(eng);
        }
        KeyEvent::Char('A') => {
            eng.cursor.move_to_line_end(&eng.state.buffer);
            enter_insert(eng);
        }
        KeyEvent::Char('o') => open_line(eng, true)?,
        KeyEvent::Char('O') => open_line(eng, false)?,

        KeyEvent::Char('x') | KeyEvent::Delete => delete_under(eng, count)?,
        KeyEvent::Char('p') => paste(eng, true)?,
        KeyEvent::Char('P') => paste(eng, false)?,
        KeyEvent::Char('J') => join_below(eng)?,

        KeyEvent::Char('u') => undo::handle_undo(eng)?,
        KeyEvent::Ctrl('r') => undo::handle_redo(eng)?,

        KeyEvent::Char(':') => {
            eng.state.command_line.begin();
            eng.state.mode = Mode::Command;
        }
        KeyEvent::Char('/') => enter_search(eng, false),
        KeyEvent::Char('?') => enter_search(eng, true),
        KeyEvent::Char('n') => search::repeat(eng, false),
        KeyEvent::Char('N') => search::repeat(eng, true),

        // Escape (and anything unbound) just aborted any pending sequence.
        _ => {}
    }
    Ok(DispatchOutcome::none())
}

fn enter_insert(eng: &mut Engine) {
    eng.state.history.begin_group();
    eng.state.mode = Mode::Insert;
}

/// `o` / `O`: open a line below/above and enter Insert mode. The line
/// insertion is recorded inside the Insert run's group so the whole edit
/// undoes as one step.
fn open_line(eng: &mut Engine, below: bool) -> Result<()> {
    let row = eng.cursor.row();
    let at = if below { row + 1 } else { row };
    let cursor_before = eng.cursor.position();
    enter_insert(eng);
    eng.state
        .history
        .record(Action::new(ActionKind::InsertLine, at, 0, cursor_before));
    eng.state.buffer.insert_line(at)?;
    eng.cursor.move_to(at, 0, &eng.state.buffer);
    Ok(())
}

/// `x`: delete up to `count` chars under the cursor into the register.
/// Nothing under the cursor (end of line) is a no-op.
fn delete_under(eng: &mut Engine, count: usize) -> Result<()> {
    let (row, col) = eng.cursor.position();
    let line_len = eng.state.buffer.line_len(row)?;
    if col >= line_len {
        return Ok(());
    }
    let n = count.min(line_len - col);
    let removed: String = eng
        .state
        .buffer
        .line(row)?
        .chars()
        .skip(col)
        .take(n)
        .collect();
    eng.state.history.begin_group();
    for ch in removed.chars() {
        eng.state.history.record(
            Action::new(ActionKind::DeleteChar, row, col, (row, col))
                .with_prev_text(ch.to_string()),
        );
        eng.state.buffer.delete_char(row, col)?;
    }
    eng.state.history.end_group();
    eng.state.register.set_charwise(removed);
    eng.cursor.move_to(row, col, &eng.state.buffer);
    Ok(())
}

/// `dd`: delete `count` whole lines into the register (linewise). On the
/// document's only line the recorded action is the clearing `SetLine`,
/// preserving the minimum-one-line invariant.
fn delete_lines(eng: &mut Engine, count: usize) -> Result<()> {
    let row = eng.cursor.row();
    let cursor_before = eng.cursor.position();
    let n = count.min(eng.state.buffer.line_count() - row);
    let mut yanked = Vec::with_capacity(n);
    for r in row..row + n {
        yanked.push(eng.state.buffer.line(r)?.to_string());
    }
    eng.state.register.set_linewise(yanked.join("\n"));

    eng.state.history.begin_group();
    for text in &yanked {
        if eng.state.buffer.line_count() == 1 {
            eng.state.history.record(
                Action::new(ActionKind::SetLine, row, 0, cursor_before)
                    .with_prev_text(text.clone()),
            );
            eng.state.buffer.set_line(row, String::new())?;
        } else {
            eng.state.history.record(
                Action::new(ActionKind::DeleteLine, row, 0, cursor_before)
                    .with_prev_text(text.clone()),
            );
            eng.state.buffer.delete_line(row)?;
        }
    }
    eng.state.history.end_group();
    eng.cursor.move_to(row, 0, &eng.state.buffer);
    if n > 1 {
        eng.state.set_status(format!("{n} fewer lines"));
    }
    Ok(())
}

/// `yy`: yank `count` whole lines into the register without mutating.
fn yank_lines(eng: &mut Engine, count: usize) -> Result<()> {
    let row = eng.cursor.row();
    let n = count.min(eng.state.buffer.line_count() - row);
    let mut yanked = Vec::with_capacity(n);
    for r in row..row + n {
        yanked.push(eng.state.buffer.line(r)?.to_string());
    }
    eng.state.register.set_linewise(yanked.join("\n"));
    if n > 1 {
        eng.state.set_status(format!("{n} lines yanked"));
    }
    Ok(())
}

/// `p` / `P`: paste the register after/before the cursor. Linewise
/// entries insert whole lines and land on the first of them; charwise
/// entries splice into the current line and land on the last pasted char.
fn paste(eng: &mut Engine, after: bool) -> Result<()> {
    let register = eng.state.register.clone();
    if register.is_empty() {
        return Ok(());
    }
    let (row, col) = eng.cursor.position();
    let cursor_before = (row, col);
    eng.state.history.begin_group();
    if register.linewise {
        let base = if after { row + 1 } else { row };
        for (i, line) in register.text.split('\n').enumerate() {
            eng.state.history.record(
                Action::new(ActionKind::InsertLine, base + i, 0, cursor_before).with_text(line),
            );
            eng.state
                .buffer
                .insert_line_with(base + i, line.to_string())?;
        }
        eng.state.history.end_group();
        eng.cursor.move_to(base, 0, &eng.state.buffer);
    } else {
        let line_len = eng.state.buffer.line_len(row)?;
        let base = if after { (col + 1).min(line_len) } else { col };
        let mut at = base;
        for ch in register.text.chars() {
            eng.state.history.record(
                Action::new(ActionKind::InsertChar, row, at, cursor_before)
                    .with_text(ch.to_string()),
            );
            eng.state.buffer.insert_char(row, at, ch)?;
            at += 1;
        }
        eng.state.history.end_group();
        eng.cursor
            .move_to(row, at.saturating_sub(1), &eng.state.buffer);
    }
    Ok(())
}

/// `J`: join the current line with the next; cursor lands on the seam.
fn join_below(eng: &mut Engine) -> Result<()> {
    let row = eng.cursor.row();
    if row + 1 >= eng.state.buffer.line_count() {
        return Ok(());
    }
    let seam = eng.state.buffer.line_len(row)?;
    eng.state.history.record(Action::new(
        ActionKind::JoinLines,
        row,
        seam,
        eng.cursor.position(),
    ));
    eng.state.buffer.join_lines(row)?;
    eng.cursor.move_to(row, seam, &eng.state.buffer);
    Ok(())
}

fn enter_search(eng: &mut Engine, backward: bool) {
    eng.state.search_line.begin();
    eng.search_entry_backward = backward;
    eng.state.mode = Mode::Search;
}
