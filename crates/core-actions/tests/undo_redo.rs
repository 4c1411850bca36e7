//! Undo/redo properties exercised end to end: group granularity, cursor
//! restoration, and redo invalidation.

mod common;

use common::{chars, engine_with, feed, lines};
use core_input::KeyEvent;

#[test]
fn typed_run_undoes_as_one_step() {
    let mut eng = engine_with(&[""]);
    feed(&mut eng, chars("ihello"));
    feed(&mut eng, [KeyEvent::Escape]);
    feed(&mut eng, chars("u"));
    assert_eq!(lines(&eng), vec![""]);
    assert_eq!(eng.cursor.position(), (0, 0));
}

#[test]
fn redo_after_undo_restores_buffer_and_cursor() {
    let mut eng = engine_with(&[""]);
    feed(&mut eng, chars("iab"));
    feed(&mut eng, [KeyEvent::Escape]);
    feed(&mut eng, chars("u"));
    assert_eq!(lines(&eng), vec![""]);
    feed(&mut eng, [KeyEvent::Ctrl('r')]);
    assert_eq!(lines(&eng), vec!["ab"]);
    assert_eq!(eng.cursor.position(), (0, 2));
}

#[test]
fn undo_restores_cursor_to_pre_edit_position() {
    let mut eng = engine_with(&["hello"]);
    feed(&mut eng, chars("lliX"));
    feed(&mut eng, [KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["heXllo"]);
    feed(&mut eng, chars("u"));
    assert_eq!(lines(&eng), vec!["hello"]);
    assert_eq!(eng.cursor.position(), (0, 2));
}

#[test]
fn undo_redo_identity_over_multiple_groups() {
    let mut eng = engine_with(&["abcdef"]);
    // Three discrete single-char deletes, each its own group.
    feed(&mut eng, chars("xxx"));
    assert_eq!(lines(&eng), vec!["def"]);
    let cursor_after = eng.cursor.position();

    for _ in 0..3 {
        feed(&mut eng, chars("u"));
    }
    assert_eq!(lines(&eng), vec!["abcdef"]);
    assert_eq!(eng.cursor.position(), (0, 0));

    for _ in 0..3 {
        feed(&mut eng, [KeyEvent::Ctrl('r')]);
    }
    assert_eq!(lines(&eng), vec!["def"]);
    assert_eq!(eng.cursor.position(), cursor_after);
}

#[test]
fn new_edit_after_undo_clears_redo() {
    let mut eng = engine_with(&[""]);
    feed(&mut eng, chars("ia"));
    feed(&mut eng, [KeyEvent::Escape]);
    feed(&mut eng, chars("u"));
    feed(&mut eng, chars("ib"));
    feed(&mut eng, [KeyEvent::Escape]);
    feed(&mut eng, [KeyEvent::Ctrl('r')]);
    assert_eq!(lines(&eng), vec!["b"]);
    assert_eq!(eng.state.status_text(), "Already at newest change");
}

#[test]
fn undo_on_empty_history_reports_status() {
    let mut eng = engine_with(&["x"]);
    feed(&mut eng, chars("u"));
    assert_eq!(lines(&eng), vec!["x"]);
    assert_eq!(eng.state.status_text(), "Already at oldest change");
}

#[test]
fn undo_dd_restores_line_and_cursor() {
    let mut eng = engine_with(&["one", "two", "three"]);
    feed(&mut eng, chars("jdd"));
    assert_eq!(lines(&eng), vec!["one", "three"]);
    feed(&mut eng, chars("u"));
    assert_eq!(lines(&eng), vec!["one", "two", "three"]);
    assert_eq!(eng.cursor.position(), (1, 0));
}

#[test]
fn undo_dd_on_only_line_restores_content() {
    let mut eng = engine_with(&["solo"]);
    feed(&mut eng, chars("dd"));
    assert_eq!(lines(&eng), vec![""]);
    feed(&mut eng, chars("u"));
    assert_eq!(lines(&eng), vec!["solo"]);
}

#[test]
fn undo_split_and_join_inverse_pair() {
    let mut eng = engine_with(&["abcd"]);
    feed(&mut eng, chars("lli"));
    feed(&mut eng, [KeyEvent::Enter, KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["ab", "cd"]);
    feed(&mut eng, chars("u"));
    assert_eq!(lines(&eng), vec!["abcd"]);
    assert_eq!(eng.cursor.position(), (0, 2));
    feed(&mut eng, [KeyEvent::Ctrl('r')]);
    assert_eq!(lines(&eng), vec!["ab", "cd"]);
    assert_eq!(eng.cursor.position(), (1, 0));
}

#[test]
fn undo_join_restores_two_lines() {
    let mut eng = engine_with(&["ab", "cd"]);
    feed(&mut eng, chars("J"));
    assert_eq!(lines(&eng), vec!["abcd"]);
    feed(&mut eng, chars("u"));
    assert_eq!(lines(&eng), vec!["ab", "cd"]);
    assert_eq!(eng.cursor.position(), (0, 0));
}

#[test]
fn undo_paste_removes_pasted_lines() {
    let mut eng = engine_with(&["one", "two"]);
    feed(&mut eng, chars("yyp"));
    assert_eq!(lines(&eng), vec!["one", "one", "two"]);
    feed(&mut eng, chars("u"));
    assert_eq!(lines(&eng), vec!["one", "two"]);
}

#[test]
fn open_line_undoes_with_its_typed_text() {
    let mut eng = engine_with(&["top"]);
    feed(&mut eng, chars("onew line"));
    feed(&mut eng, [KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["top", "new line"]);
    // One undo removes both the typed text and the opened line.
    feed(&mut eng, chars("u"));
    assert_eq!(lines(&eng), vec!["top"]);
}

#[test]
fn backspace_join_inside_insert_run_undoes_cleanly() {
    let mut eng = engine_with(&["ab", "cd"]);
    feed(&mut eng, chars("ji"));
    feed(&mut eng, [KeyEvent::Backspace]);
    feed(&mut eng, chars("X"));
    feed(&mut eng, [KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["abXcd"]);
    feed(&mut eng, chars("u"));
    assert_eq!(lines(&eng), vec!["ab", "cd"]);
    assert_eq!(eng.cursor.position(), (1, 0));
}
