//! Normal/Insert mode editing scenarios end to end through the dispatcher.

mod common;

use common::{chars, engine_with, feed, lines};
use core_input::KeyEvent;
use core_state::Mode;

#[test]
fn insert_mode_types_a_word() {
    let mut eng = engine_with(&[""]);
    feed(&mut eng, chars("ihello"));
    assert_eq!(eng.state.mode, Mode::Insert);
    feed(&mut eng, [KeyEvent::Escape]);
    assert_eq!(eng.state.mode, Mode::Normal);
    assert_eq!(lines(&eng), vec!["hello"]);
    assert_eq!(eng.cursor.position(), (0, 5));
    assert!(eng.state.buffer.is_modified());
}

#[test]
fn enter_splits_line_at_cursor() {
    let mut eng = engine_with(&["abcd"]);
    feed(&mut eng, chars("lli"));
    feed(&mut eng, [KeyEvent::Enter, KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["ab", "cd"]);
    assert_eq!(eng.cursor.position(), (1, 0));
}

#[test]
fn backspace_at_line_start_joins_lines() {
    let mut eng = engine_with(&["ab", "cd"]);
    feed(&mut eng, chars("ji"));
    feed(&mut eng, [KeyEvent::Backspace, KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["abcd"]);
    assert_eq!(eng.cursor.position(), (0, 2));
}

#[test]
fn backspace_at_document_start_is_noop() {
    let mut eng = engine_with(&["x"]);
    feed(&mut eng, chars("i"));
    feed(&mut eng, [KeyEvent::Backspace, KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["x"]);
    assert_eq!(eng.cursor.position(), (0, 0));
}

#[test]
fn append_inserts_after_cursor() {
    let mut eng = engine_with(&["ab"]);
    feed(&mut eng, chars("aX"));
    feed(&mut eng, [KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["aXb"]);
}

#[test]
fn append_at_line_end() {
    let mut eng = engine_with(&["ab"]);
    feed(&mut eng, chars("A!"));
    feed(&mut eng, [KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["ab!"]);
}

#[test]
fn open_line_below_and_above() {
    let mut eng = engine_with(&["mid"]);
    feed(&mut eng, chars("obelow"));
    feed(&mut eng, [KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["mid", "below"]);

    feed(&mut eng, chars("ggOabove"));
    feed(&mut eng, [KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["above", "mid", "below"]);
}

#[test]
fn x_deletes_under_cursor_into_register() {
    let mut eng = engine_with(&["abc"]);
    feed(&mut eng, chars("x"));
    assert_eq!(lines(&eng), vec!["bc"]);
    assert_eq!(eng.state.register.text, "a");
    assert!(!eng.state.register.linewise);
}

#[test]
fn x_at_line_end_is_noop() {
    let mut eng = engine_with(&["ab"]);
    feed(&mut eng, chars("$x"));
    assert_eq!(lines(&eng), vec!["ab"]);
}

#[test]
fn charwise_paste_lands_after_cursor() {
    let mut eng = engine_with(&["abc"]);
    feed(&mut eng, chars("xp"));
    assert_eq!(lines(&eng), vec!["bac"]);
    assert_eq!(eng.cursor.position(), (0, 1));
}

#[test]
fn dd_deletes_line_and_linewise_paste_restores_it() {
    let mut eng = engine_with(&["one", "two"]);
    feed(&mut eng, chars("dd"));
    assert_eq!(lines(&eng), vec!["two"]);
    assert_eq!(eng.state.register.text, "one");
    assert!(eng.state.register.linewise);
    feed(&mut eng, chars("p"));
    assert_eq!(lines(&eng), vec!["two", "one"]);
    assert_eq!(eng.cursor.position(), (1, 0));
}

#[test]
fn capital_p_pastes_line_above() {
    let mut eng = engine_with(&["one", "two"]);
    feed(&mut eng, chars("yyjP"));
    assert_eq!(lines(&eng), vec!["one", "one", "two"]);
}

#[test]
fn dd_on_only_line_clears_it() {
    let mut eng = engine_with(&["solo"]);
    feed(&mut eng, chars("dd"));
    assert_eq!(lines(&eng), vec![""]);
    assert_eq!(eng.state.register.text, "solo");
}

#[test]
fn count_applies_to_motions_and_dd() {
    let mut eng = engine_with(&["a", "b", "c", "d", "e"]);
    feed(&mut eng, chars("3j"));
    assert_eq!(eng.cursor.row(), 3);
    feed(&mut eng, chars("2k"));
    assert_eq!(eng.cursor.row(), 1);
    feed(&mut eng, chars("2dd"));
    assert_eq!(lines(&eng), vec!["a", "d", "e"]);
    assert_eq!(eng.state.register.text, "b\nc");
    // Cursor sits on "d"; pasting above restores the original order.
    feed(&mut eng, chars("P"));
    assert_eq!(lines(&eng), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn zero_is_motion_without_count_and_digit_with() {
    let mut eng = engine_with(&["abcdefghijklm", "x"]);
    feed(&mut eng, chars("$0"));
    assert_eq!(eng.cursor.position(), (0, 0));
    feed(&mut eng, chars("10l"));
    assert_eq!(eng.cursor.position(), (0, 10));
}

#[test]
fn gg_and_g_jump_to_extremes() {
    let mut eng = engine_with(&["a", "b", "c"]);
    feed(&mut eng, chars("G"));
    assert_eq!(eng.cursor.row(), 2);
    feed(&mut eng, chars("gg"));
    assert_eq!(eng.cursor.row(), 0);
}

#[test]
fn join_command_lands_on_seam() {
    let mut eng = engine_with(&["ab", "cd"]);
    feed(&mut eng, chars("J"));
    assert_eq!(lines(&eng), vec!["abcd"]);
    assert_eq!(eng.cursor.position(), (0, 2));
}

#[test]
fn join_on_last_line_is_noop() {
    let mut eng = engine_with(&["ab"]);
    feed(&mut eng, chars("J"));
    assert_eq!(lines(&eng), vec!["ab"]);
}

#[test]
fn unrecognized_operator_continuation_aborts() {
    let mut eng = engine_with(&["abc"]);
    feed(&mut eng, chars("dk"));
    assert_eq!(lines(&eng), vec!["abc"]);
    assert!(!eng.pending().is_active());
    // The next key is interpreted fresh.
    feed(&mut eng, chars("x"));
    assert_eq!(lines(&eng), vec!["bc"]);
}

#[test]
fn multibyte_text_round_trips_through_dispatch() {
    let mut eng = engine_with(&[""]);
    feed(&mut eng, chars("ia€b"));
    feed(&mut eng, [KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["a€b"]);
    feed(&mut eng, chars("0lx"));
    assert_eq!(lines(&eng), vec!["ab"]);
    assert_eq!(eng.state.register.text, "€");
}

#[test]
fn delete_key_works_in_both_modes() {
    let mut eng = engine_with(&["abc"]);
    feed(&mut eng, [KeyEvent::Delete]);
    assert_eq!(lines(&eng), vec!["bc"]);
    feed(&mut eng, chars("i"));
    feed(&mut eng, [KeyEvent::Delete, KeyEvent::Escape]);
    assert_eq!(lines(&eng), vec!["c"]);
}
