//! Editor state: mode, register, search state, transient line inputs, and
//! the edit history.
//!
//! `EditorState` is the single mutable hub the dispatcher operates on. The
//! cursor deliberately lives outside it (in `core-model`) so movement stays
//! a pure function of buffer bounds, and the buffer mutation primitives
//! stay in `core-text`; this crate owns everything mode-shaped.

use core_text::Buffer;

pub mod history;
pub use history::{Action, ActionGroup, ActionKind, History};

/// Default undo history depth when configuration does not override it.
pub const HISTORY_DEPTH_DEFAULT: usize = 1000;

/// The editor's mutually exclusive input modes; exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation and commands.
    #[default]
    Normal,
    /// Text entry.
    Insert,
    /// `:` command line entry.
    Command,
    /// `/` and `?` pattern entry.
    Search,
}

impl Mode {
    /// Short status-segment rendering.
    pub fn short_str(&self) -> &'static str {
        match self {
            Mode::Normal => "NOR",
            Mode::Insert => "INS",
            Mode::Command => "CMD",
            Mode::Search => "SRCH",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
            Mode::Search => "SEARCH",
        };
        f.write_str(s)
    }
}

/// The most recently yanked or deleted text. Linewise entries (whole-line
/// deletes and yanks) paste as lines; charwise entries splice at the
/// cursor.
#[derive(Debug, Clone, Default)]
pub struct Register {
    pub text: String,
    pub linewise: bool,
}

impl Register {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_charwise(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.linewise = false;
    }

    pub fn set_linewise(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.linewise = true;
    }
}

/// Last committed search, used by the repeat commands (`n` / `N`).
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub pattern: String,
    pub backward: bool,
}

/// Transient text accumulated while in Command or Search mode; discarded
/// on commit or cancel.
#[derive(Debug, Clone, Default)]
pub struct LineInput {
    buf: String,
}

impl LineInput {
    pub fn begin(&mut self) {
        self.buf.clear();
    }

    pub fn push(&mut self, ch: char) {
        self.buf.push(ch);
    }

    /// Remove the last char. Returns false when the buffer was already
    /// empty (callers treat that as "cancel out of the mode").
    pub fn backspace(&mut self) -> bool {
        self.buf.pop().is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

/// Transient user-visible status text; replaced wholesale by the latest
/// event worth reporting.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
}

/// The mutable hub: document, mode, history, and the per-mode transient
/// state.
#[derive(Debug)]
pub struct EditorState {
    pub buffer: Buffer,
    pub mode: Mode,
    pub history: History,
    pub register: Register,
    pub search: SearchState,
    pub command_line: LineInput,
    pub search_line: LineInput,
    pub status: Option<StatusMessage>,
}

impl EditorState {
    pub fn new(buffer: Buffer, history_depth: usize) -> Self {
        Self {
            buffer,
            mode: Mode::Normal,
            history: History::new(history_depth),
            register: Register::default(),
            search: SearchState::default(),
            command_line: LineInput::default(),
            search_line: LineInput::default(),
            status: None,
        }
    }

    /// Replace the document wholesale (file load). History and transient
    /// inputs reset; mode returns to Normal.
    pub fn replace_buffer(&mut self, buffer: Buffer, history_depth: usize) {
        self.buffer = buffer;
        self.history = History::new(history_depth);
        self.mode = Mode::Normal;
        self.command_line.clear();
        self.search_line.clear();
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into() });
    }

    pub fn status_text(&self) -> &str {
        self.status.as_ref().map(|m| m.text.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_renderings() {
        assert_eq!(Mode::Normal.to_string(), "NORMAL");
        assert_eq!(Mode::Search.short_str(), "SRCH");
    }

    #[test]
    fn line_input_backspace_reports_empty() {
        let mut li = LineInput::default();
        li.push('w');
        assert!(li.backspace());
        assert!(!li.backspace());
        assert!(li.is_empty());
    }

    #[test]
    fn line_input_take_clears() {
        let mut li = LineInput::default();
        li.begin();
        li.push('w');
        li.push('q');
        assert_eq!(li.take(), "wq");
        assert!(li.is_empty());
    }

    #[test]
    fn replace_buffer_resets_mode_and_history() {
        let mut st = EditorState::new(Buffer::new(), 10);
        st.mode = Mode::Insert;
        st.history.record(
            Action::new(ActionKind::InsertChar, 0, 0, (0, 0)).with_text("a"),
        );
        st.replace_buffer(Buffer::from_lines(vec!["x".into()], None), 10);
        assert_eq!(st.mode, Mode::Normal);
        assert!(!st.history.can_undo());
        assert_eq!(st.buffer.line(0).unwrap(), "x");
    }

    #[test]
    fn register_modes() {
        let mut r = Register::default();
        assert!(r.is_empty());
        r.set_linewise("a line");
        assert!(r.linewise);
        r.set_charwise("ch");
        assert!(!r.linewise);
        assert_eq!(r.text, "ch");
    }
}
