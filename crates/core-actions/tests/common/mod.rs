#![allow(dead_code)] // Shared across integration tests; each binary uses a subset of helpers.

use core_actions::{Engine, EngineOptions};
use core_input::KeyEvent;
use core_state::EditorState;
use core_text::Buffer;

pub const PAGE: usize = 20;

pub fn engine_with(lines: &[&str]) -> Engine {
    let buffer = Buffer::from_lines(lines.iter().map(|s| s.to_string()).collect(), None);
    Engine::new(EditorState::new(buffer, 100), EngineOptions::default())
}

/// Feed keys through the engine; returns true if any dispatch requested
/// quit.
pub fn feed(eng: &mut Engine, keys: impl IntoIterator<Item = KeyEvent>) -> bool {
    let mut quit = false;
    for key in keys {
        quit |= eng.handle_key(key, PAGE).expect("dispatch").quit;
    }
    quit
}

pub fn chars(s: &str) -> Vec<KeyEvent> {
    s.chars().map(KeyEvent::Char).collect()
}

pub fn lines(eng: &Engine) -> Vec<String> {
    eng.state.buffer.lines().to_vec()
}
