//! Per-mode key dispatch.
//!
//! One focused sub-module per mode plus the undo group applier:
//! * `normal`  - navigation, operators, register commands
//! * `insert`  - text entry recording into the open undo group
//! * `command` - `:` line editing and execution
//! * `search`  - `/` and `?` pattern entry and repeat motion
//! * `undo`    - group inversion / re-application
//!
//! Handlers mutate the buffer only through `core-text` primitives and
//! record every mutation into the history, so any dispatch path is
//! reversible. Coordinates handed to the buffer always come from the
//! clamped cursor; an out-of-bounds error escaping a handler is an engine
//! bug and propagates.

use anyhow::Result;
use core_input::KeyEvent;
use core_state::Mode;

use crate::{DispatchOutcome, Engine};

mod command;
mod insert;
mod normal;
mod search;
pub(crate) mod undo;

pub fn dispatch(eng: &mut Engine, key: KeyEvent, page_rows: usize) -> Result<DispatchOutcome> {
    tracing::trace!(target: "actions.dispatch", mode = %eng.state.mode, ?key, "dispatch");
    match eng.state.mode {
        Mode::Normal => normal::handle_key(eng, key, page_rows),
        Mode::Insert => insert::handle_key(eng, key, page_rows),
        Mode::Command => command::handle_key(eng, key),
        Mode::Search => search::handle_key(eng, key),
    }
}
