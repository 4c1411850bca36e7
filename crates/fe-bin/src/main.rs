//! Ferrite entrypoint.

use anyhow::Result;
use clap::Parser;
use core_actions::{io_ops, Engine, EngineOptions};
use core_input::{read_key, DecodeError};
use core_render::{Frame, Screen};
use core_state::EditorState;
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalGuard};
use core_text::Buffer;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "ferrite", version, about = "Ferrite editor")]
struct Args {
    /// Optional path to open at startup. A path that does not exist yet
    /// starts an empty buffer bound to it.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of
    /// `ferrite.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    /// Route tracing to `ferrite.log`; stdout belongs to the renderer.
    fn configure_logging(&mut self) -> Result<()> {
        let file_appender = tracing_appender::rolling::never(".", "ferrite.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Open the session buffer: load the file when it exists, else bind a
/// fresh buffer to the path. Returns the buffer and an optional startup
/// status message.
fn open_buffer(path: Option<&Path>) -> Result<(Buffer, Option<String>)> {
    let Some(path) = path else {
        return Ok((Buffer::new(), None));
    };
    if io_ops::exists(path) {
        let lines = io_ops::load(path)?;
        let buffer = Buffer::from_lines(lines, Some(path.to_path_buf()));
        let status = format!("\"{}\" {}L", path.display(), buffer.line_count());
        Ok((buffer, Some(status)))
    } else {
        let mut buffer = Buffer::new();
        buffer.set_path(path);
        let status = format!("\"{}\" [New File]", path.display());
        Ok((buffer, Some(status)))
    }
}

fn build_frame<'a>(engine: &'a Engine) -> Frame<'a> {
    Frame {
        lines: engine.state.buffer.lines(),
        row_offset: engine.cursor.row_offset(),
        col_offset: engine.cursor.col_offset(),
        cursor: engine.cursor.position(),
        mode: engine.state.mode,
        file_name: engine.state.buffer.file_name(),
        modified: engine.state.buffer.is_modified(),
        command_echo: format!(":{}", engine.state.command_line.as_str()),
        search_echo: format!("{}{}", engine.search_prompt(), engine.state.search_line.as_str()),
        status: engine.state.status_text().to_string(),
    }
}

/// One iteration per key: scroll, render, block on the next key, dispatch,
/// check the quit flag. Decoder errors are session-level events, never
/// process-fatal: exhausted input ends the session, undecodable input is
/// skipped with a status message.
fn run_loop(engine: &mut Engine, guard: &TerminalGuard<'_>) -> Result<()> {
    let mut stdin = io::stdin().lock();
    loop {
        let (cols, rows) = guard.size()?;
        let screen = Screen::new(cols, rows);
        engine
            .cursor
            .update_scroll(screen.text_rows(), screen.text_cols());
        screen.paint(&build_frame(engine))?;

        match read_key(&mut stdin) {
            Ok(key) => {
                if engine.handle_key(key, screen.text_rows())?.quit {
                    info!(target: "runtime", "quit_requested");
                    return Ok(());
                }
            }
            Err(DecodeError::NoData) => {
                info!(target: "runtime", "input_exhausted");
                return Ok(());
            }
            Err(DecodeError::InvalidEncoding(e)) => {
                error!(target: "runtime", error = %e, "keystroke_skipped");
                engine.state.set_status(format!("Undecodable input ({e})"));
            }
            Err(DecodeError::Io(e)) => return Err(e.into()),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut app = AppStartup::new();
    app.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let config = core_config::load_from(args.config.clone())?;
    let (buffer, startup_status) = open_buffer(args.path.as_deref())?;
    let mut state = EditorState::new(buffer, config.history.max_depth);
    if let Some(status) = startup_status {
        state.set_status(status);
    }
    let mut engine = Engine::new(
        state,
        EngineOptions {
            history_depth: config.history.max_depth,
            backup: config.file.backup,
        },
    );

    app.backend.set_title("ferrite")?;
    let guard = app.backend.enter_guard()?;
    let result = run_loop(&mut engine, &guard);
    drop(guard);
    info!(target: "runtime", "shutdown");
    result
}
