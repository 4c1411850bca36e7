//! Command mode: `:` line editing and execution.
//!
//! Chars accumulate in the state's command line; Escape cancels with no
//! side effects and backspacing past an empty buffer falls back to Normal
//! mode. Enter hands the buffer to the parser and executes the result.
//! IO failures become status messages; the in-memory document survives a
//! failed write untouched.

use anyhow::Result;
use core_input::KeyEvent;
use core_model::Cursor;
use core_state::Mode;
use core_text::Buffer;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::command_parser::{self, ParsedCommand};
use crate::io_ops;
use crate::{DispatchOutcome, Engine};

pub(crate) fn handle_key(eng: &mut Engine, key: KeyEvent) -> Result<DispatchOutcome> {
    match key {
        KeyEvent::Escape => {
            eng.state.command_line.clear();
            eng.state.mode = Mode::Normal;
        }
        KeyEvent::Backspace => {
            if !eng.state.command_line.backspace() {
                eng.state.mode = Mode::Normal;
            }
        }
        KeyEvent::Enter => {
            let raw = eng.state.command_line.take();
            eng.state.mode = Mode::Normal;
            return execute(eng, &raw);
        }
        KeyEvent::Char(ch) => eng.state.command_line.push(ch),
        _ => {}
    }
    Ok(DispatchOutcome::none())
}

fn execute(eng: &mut Engine, raw: &str) -> Result<DispatchOutcome> {
    let parsed = command_parser::parse(raw);
    info!(target: "actions.command", input = raw, command = ?parsed, "execute");
    match parsed {
        ParsedCommand::Noop => Ok(DispatchOutcome::none()),
        ParsedCommand::Quit { force } => {
            if !force && eng.state.buffer.is_modified() {
                eng.state
                    .set_status("No write since last change (add ! to override)");
                Ok(DispatchOutcome::none())
            } else {
                Ok(DispatchOutcome::quit())
            }
        }
        ParsedCommand::Write { path } => {
            write_buffer(eng, path.as_deref());
            Ok(DispatchOutcome::none())
        }
        ParsedCommand::WriteQuit => {
            if write_buffer(eng, None) {
                Ok(DispatchOutcome::quit())
            } else {
                Ok(DispatchOutcome::none())
            }
        }
        ParsedCommand::Edit(path) => {
            edit_file(eng, &path);
            Ok(DispatchOutcome::none())
        }
        ParsedCommand::Unknown(s) => {
            eng.state.set_status(format!("Not an editor command: {s}"));
            Ok(DispatchOutcome::none())
        }
    }
}

/// Save the buffer to `target` (or its bound path). Returns true on a
/// completed write.
fn write_buffer(eng: &mut Engine, target: Option<&Path>) -> bool {
    let path: PathBuf = match target.or_else(|| eng.state.buffer.path()) {
        Some(p) => p.to_path_buf(),
        None => {
            eng.state.set_status("No file name");
            return false;
        }
    };
    if eng.opts.backup {
        if let Err(e) = io_ops::backup(&path) {
            error!(target: "io", error = %e, file = %path.display(), "backup_failed");
            eng.state.set_status(format!("Backup failed: {e}"));
            return false;
        }
    }
    match io_ops::save(&path, eng.state.buffer.lines()) {
        Ok(()) => {
            eng.state.buffer.set_modified(false);
            if eng.state.buffer.path().is_none() {
                eng.state.buffer.set_path(&path);
            }
            let lines = eng.state.buffer.line_count();
            eng.state
                .set_status(format!("\"{}\" {}L written", path.display(), lines));
            true
        }
        Err(e) => {
            error!(target: "io", error = %e, file = %path.display(), "write_failed");
            eng.state.set_status(format!("Write failed: {e}"));
            false
        }
    }
}

/// `:e` — replace the document wholesale. A missing path binds a fresh
/// buffer to it instead of erroring.
fn edit_file(eng: &mut Engine, path: &Path) {
    if io_ops::exists(path) {
        match io_ops::load(path) {
            Ok(lines) => {
                let buffer = Buffer::from_lines(lines, Some(path.to_path_buf()));
                let line_count = buffer.line_count();
                eng.state.replace_buffer(buffer, eng.opts.history_depth);
                eng.cursor = Cursor::new();
                eng.state
                    .set_status(format!("\"{}\" {}L", path.display(), line_count));
            }
            Err(e) => {
                error!(target: "io", error = %e, file = %path.display(), "open_failed");
                eng.state.set_status(format!("Open failed: {e}"));
            }
        }
    } else {
        let mut buffer = Buffer::new();
        buffer.set_path(path);
        eng.state.replace_buffer(buffer, eng.opts.history_depth);
        eng.cursor = Cursor::new();
        eng.state
            .set_status(format!("\"{}\" [New File]", path.display()));
    }
}
