//! The editing engine: mode dispatch over decoded keys.
//!
//! [`Engine`] owns the editor state (buffer, history, mode) and the
//! viewport cursor, consumes [`core_input::KeyEvent`]s, and applies
//! mutations to the buffer while recording inverses into the history.
//! One handler per mode; multi-key Normal-mode sequences accumulate in
//! [`Pending`] until they resolve or an unrecognized key aborts them.

use anyhow::Result;
use core_input::KeyEvent;
use core_model::Cursor;
use core_state::{EditorState, HISTORY_DEPTH_DEFAULT};

pub mod command_parser;
pub mod dispatcher;
pub mod io_ops;

/// Result of dispatching one key. `quit` is a flag the run loop checks
/// once per iteration; it is not a mode transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub quit: bool,
}

impl DispatchOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn quit() -> Self {
        Self { quit: true }
    }
}

/// A partially-typed Normal-mode command: an optional count prefix and an
/// optional operator waiting for its second key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pending {
    count: Option<usize>,
    op: Option<char>,
}

impl Pending {
    fn push_digit(&mut self, d: usize) {
        let cur = self.count.unwrap_or(0);
        self.count = Some(cur.saturating_mul(10).saturating_add(d));
    }

    /// Consume the accumulated count, defaulting to 1.
    fn take_count(&mut self) -> usize {
        self.count.take().unwrap_or(1).max(1)
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.count.is_some() || self.op.is_some()
    }
}

/// Engine knobs sourced from configuration at startup.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// Undo history depth (also applied to replacement buffers on `:e`).
    pub history_depth: usize,
    /// Write a `file~` sibling before each overwrite.
    pub backup: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            history_depth: HISTORY_DEPTH_DEFAULT,
            backup: true,
        }
    }
}

/// The orchestrator: one buffer, one cursor, one history, plus transient
/// mode state. Single-threaded; the sole mutator of everything it owns.
pub struct Engine {
    pub state: EditorState,
    pub cursor: Cursor,
    pending: Pending,
    /// Direction chosen when Search mode was entered, applied to the
    /// committed pattern.
    search_entry_backward: bool,
    opts: EngineOptions,
}

impl Engine {
    pub fn new(state: EditorState, opts: EngineOptions) -> Self {
        Self {
            state,
            cursor: Cursor::new(),
            pending: Pending::default(),
            search_entry_backward: false,
            opts,
        }
    }

    pub fn options(&self) -> EngineOptions {
        self.opts
    }

    pub fn pending(&self) -> Pending {
        self.pending
    }

    /// The prompt Search mode was entered with (`/` forward, `?` backward),
    /// for the echo line.
    pub fn search_prompt(&self) -> char {
        if self.search_entry_backward {
            '?'
        } else {
            '/'
        }
    }

    /// Dispatch one key according to the current mode. `page_rows` is the
    /// viewport text height, used by page motions.
    pub fn handle_key(&mut self, key: KeyEvent, page_rows: usize) -> Result<DispatchOutcome> {
        dispatcher::dispatch(self, key, page_rows)
    }
}
