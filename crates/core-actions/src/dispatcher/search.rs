//! Search mode and the repeat-search motion.
//!
//! Patterns are literal substrings. A committed forward search starts one
//! char right of the cursor, a backward search strictly left; both wrap
//! around the document. Committing an empty pattern repeats the previous
//! one. Columns are char indices; matching works on bytes internally and
//! converts at the boundary.

use anyhow::Result;
use core_input::KeyEvent;
use core_state::Mode;
use core_text::Buffer;

use crate::{DispatchOutcome, Engine};

pub(crate) fn handle_key(eng: &mut Engine, key: KeyEvent) -> Result<DispatchOutcome> {
    match key {
        KeyEvent::Escape => {
            eng.state.search_line.clear();
            eng.state.mode = Mode::Normal;
        }
        KeyEvent::Backspace => {
            if !eng.state.search_line.backspace() {
                eng.state.mode = Mode::Normal;
            }
        }
        KeyEvent::Enter => commit(eng),
        KeyEvent::Char(ch) => eng.state.search_line.push(ch),
        _ => {}
    }
    Ok(DispatchOutcome::none())
}

fn commit(eng: &mut Engine) {
    let pattern = eng.state.search_line.take();
    eng.state.mode = Mode::Normal;
    if !pattern.is_empty() {
        eng.state.search.pattern = pattern;
        eng.state.search.backward = eng.search_entry_backward;
    }
    if eng.state.search.pattern.is_empty() {
        return;
    }
    jump(eng, eng.state.search.backward);
}

/// `n` / `N`: repeat the last committed search, optionally reversed.
pub(crate) fn repeat(eng: &mut Engine, reverse: bool) {
    if eng.state.search.pattern.is_empty() {
        eng.state.set_status("No previous search");
        return;
    }
    let backward = eng.state.search.backward != reverse;
    jump(eng, backward);
}

fn jump(eng: &mut Engine, backward: bool) {
    let pattern = eng.state.search.pattern.clone();
    let (row, col) = eng.cursor.position();
    let found = if backward {
        find_backward(&eng.state.buffer, &pattern, row, col)
    } else {
        find_forward(&eng.state.buffer, &pattern, row, col)
    };
    match found {
        Some((r, c)) => eng.cursor.move_to(r, c, &eng.state.buffer),
        None => eng.state.set_status(format!("Pattern not found: {pattern}")),
    }
}

/// First match strictly after `(row, col)`, wrapping around the document.
pub(crate) fn find_forward(
    buf: &Buffer,
    pattern: &str,
    row: usize,
    col: usize,
) -> Option<(usize, usize)> {
    if pattern.is_empty() {
        return None;
    }
    if let Ok(line) = buf.line(row) {
        if let Some(c) = find_from(line, pattern, col + 1) {
            return Some((row, c));
        }
    }
    for r in (row + 1..buf.line_count()).chain(0..=row) {
        if let Ok(line) = buf.line(r) {
            if let Some(c) = find_from(line, pattern, 0) {
                return Some((r, c));
            }
        }
    }
    None
}

/// Last match starting strictly before `(row, col)`, wrapping backwards.
pub(crate) fn find_backward(
    buf: &Buffer,
    pattern: &str,
    row: usize,
    col: usize,
) -> Option<(usize, usize)> {
    if pattern.is_empty() {
        return None;
    }
    if let Ok(line) = buf.line(row) {
        if let Some(c) = rfind_before(line, pattern, col) {
            return Some((row, c));
        }
    }
    for r in (0..row).rev().chain((row..buf.line_count()).rev()) {
        if let Ok(line) = buf.line(r) {
            if let Some(c) = rfind_last(line, pattern) {
                return Some((r, c));
            }
        }
    }
    None
}

/// First match at or after char index `from`; returns a char index.
fn find_from(line: &str, pattern: &str, from: usize) -> Option<usize> {
    let start = char_to_byte(line, from)?;
    line[start..]
        .find(pattern)
        .map(|b| byte_to_char(line, start + b))
}

/// Last match starting strictly before char index `before`.
fn rfind_before(line: &str, pattern: &str, before: usize) -> Option<usize> {
    let limit = char_to_byte(line, before).unwrap_or(line.len());
    line.match_indices(pattern)
        .take_while(|(b, _)| *b < limit)
        .last()
        .map(|(b, _)| byte_to_char(line, b))
}

fn rfind_last(line: &str, pattern: &str) -> Option<usize> {
    line.rfind(pattern).map(|b| byte_to_char(line, b))
}

/// Byte offset of char index `col`; `None` when `col` is past the line
/// end (there is nothing to search from there).
fn char_to_byte(line: &str, col: usize) -> Option<usize> {
    if col == 0 {
        return Some(0);
    }
    let mut chars = 0;
    for (b, _) in line.char_indices() {
        if chars == col {
            return Some(b);
        }
        chars += 1;
    }
    (col == chars).then_some(line.len())
}

fn byte_to_char(line: &str, byte: usize) -> usize {
    line[..byte].chars().count()
}
