//! Frame assembly and terminal painting.
//!
//! The run loop hands [`Screen::paint`] a read-only [`Frame`] snapshot of
//! the editor. The whole frame is serialized into one in-memory buffer
//! (crossterm commands queued into a `Vec<u8>`) and written with a single
//! `write_all`, which keeps repaints flicker-free without any diffing.
//! Nothing here reads editor state directly; the snapshot is the entire
//! contract.

use anyhow::Result;
use core_state::Mode;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::{stdout, Write};

pub mod status;

use status::StatusContext;

/// Read-only snapshot of everything one repaint needs.
pub struct Frame<'a> {
    /// All document lines; the painter selects the visible window.
    pub lines: &'a [String],
    pub row_offset: usize,
    pub col_offset: usize,
    /// Absolute buffer position `(row, col)` in char columns. The caller
    /// has already scrolled so this lies inside the visible window.
    pub cursor: (usize, usize),
    pub mode: Mode,
    pub file_name: String,
    pub modified: bool,
    pub command_echo: String,
    pub search_echo: String,
    pub status: String,
}

/// Paints frames onto a terminal of a known size. Layout: `rows - 2` text
/// rows, then the inverted status bar, then the message/echo line.
pub struct Screen {
    cols: u16,
    rows: u16,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn text_rows(&self) -> usize {
        self.rows.saturating_sub(2) as usize
    }

    pub fn text_cols(&self) -> usize {
        self.cols as usize
    }

    /// Serialize one frame and write it in a single operation.
    pub fn paint(&self, frame: &Frame<'_>) -> Result<()> {
        let buf = self.compose(frame)?;
        let mut out = stdout().lock();
        out.write_all(&buf)?;
        out.flush()?;
        Ok(())
    }

    /// Build the frame's full byte stream: hide cursor, repaint every row,
    /// status + message lines, then place and show the cursor.
    fn compose(&self, frame: &Frame<'_>) -> Result<Vec<u8>> {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        queue!(buf, Hide, MoveTo(0, 0))?;

        for i in 0..self.text_rows() {
            let row = frame.row_offset + i;
            match frame.lines.get(row) {
                Some(line) => {
                    let visible = visible_slice(line, frame.col_offset, self.text_cols());
                    queue!(buf, Print(visible))?;
                }
                // Rows past the end of the document.
                None => queue!(buf, Print("~"))?,
            }
            queue!(buf, Clear(ClearType::UntilNewLine), Print("\r\n"))?;
        }

        let status = status::format_status(
            &StatusContext {
                mode: frame.mode,
                file_name: &frame.file_name,
                modified: frame.modified,
                line_count: frame.lines.len(),
                cursor: frame.cursor,
            },
            self.text_cols(),
        );
        queue!(
            buf,
            SetAttribute(Attribute::Reverse),
            Print(status),
            SetAttribute(Attribute::Reset),
            Print("\r\n")
        )?;

        let message = status::format_message(
            frame.mode,
            &frame.command_echo,
            &frame.search_echo,
            &frame.status,
            self.text_cols(),
        );
        queue!(buf, Print(message), Clear(ClearType::UntilNewLine))?;

        let cx = frame.cursor.1.saturating_sub(frame.col_offset) as u16;
        let cy = frame.cursor.0.saturating_sub(frame.row_offset) as u16;
        queue!(buf, MoveTo(cx, cy), Show)?;
        Ok(buf)
    }
}

/// The window of `line` starting at char column `col_offset`, at most
/// `cols` chars wide.
fn visible_slice(line: &str, col_offset: usize, cols: usize) -> String {
    line.chars().skip(col_offset).take(cols).collect()
}
