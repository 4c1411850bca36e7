//! Viewport cursor: position, desired column, and scroll offsets.
//!
//! The cursor reads buffer bounds but never mutates the buffer. After any
//! operation `row` is a valid line index and `col` is within
//! `0..=line_len(row)`. `desired_col` remembers the intended horizontal
//! position across vertical moves, so traversing a short line and coming
//! back restores the original column.

use core_text::Buffer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    row: usize,
    col: usize,
    desired_col: usize,
    row_offset: usize,
    col_offset: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    pub fn col_offset(&self) -> usize {
        self.col_offset
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn line_len(buf: &Buffer, row: usize) -> usize {
        buf.line_len(row).unwrap_or(0)
    }

    /// Reclamp the column after a vertical move: the cursor lands on
    /// `desired_col` when the current row is long enough, else the line end.
    fn clamp_column(&mut self, buf: &Buffer) {
        let len = Self::line_len(buf, self.row);
        self.col = self.desired_col.min(len);
    }

    /// Move to an absolute position, clamping both coordinates into the
    /// current buffer bounds. Sets the desired column.
    pub fn move_to(&mut self, row: usize, col: usize, buf: &Buffer) {
        self.row = row.min(buf.line_count().saturating_sub(1));
        self.col = col.min(Self::line_len(buf, self.row));
        self.desired_col = self.col;
    }

    /// Reconcile with the buffer after a mutation the cursor did not drive
    /// (undo/redo, wholesale buffer replacement).
    pub fn clamp_to(&mut self, buf: &Buffer) {
        if self.row >= buf.line_count() {
            self.row = buf.line_count() - 1;
        }
        let len = Self::line_len(buf, self.row);
        if self.col > len {
            self.col = len;
        }
    }

    pub fn move_up(&mut self, buf: &Buffer) {
        if self.row > 0 {
            self.row -= 1;
            self.clamp_column(buf);
        }
    }

    pub fn move_down(&mut self, buf: &Buffer) {
        if self.row + 1 < buf.line_count() {
            self.row += 1;
            self.clamp_column(buf);
        }
    }

    /// One column left; at the line start wraps to the end of the previous
    /// line.
    pub fn move_left(&mut self, buf: &Buffer) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = Self::line_len(buf, self.row);
        }
        self.desired_col = self.col;
    }

    /// One column right; past the line end wraps to column 0 of the next
    /// line.
    pub fn move_right(&mut self, buf: &Buffer) {
        let len = Self::line_len(buf, self.row);
        if self.col < len {
            self.col += 1;
        } else if self.row + 1 < buf.line_count() {
            self.row += 1;
            self.col = 0;
        }
        self.desired_col = self.col;
    }

    pub fn move_to_line_start(&mut self) {
        self.col = 0;
        self.desired_col = 0;
    }

    pub fn move_to_line_end(&mut self, buf: &Buffer) {
        let len = Self::line_len(buf, self.row);
        self.col = len;
        self.desired_col = len;
    }

    pub fn move_to_first_line(&mut self) {
        self.row = 0;
        self.col = 0;
        self.desired_col = 0;
    }

    pub fn move_to_last_line(&mut self, buf: &Buffer) {
        self.row = buf.line_count().saturating_sub(1);
        self.col = 0;
        self.desired_col = 0;
    }

    pub fn page_up(&mut self, buf: &Buffer, page: usize) {
        self.row = self.row.saturating_sub(page);
        self.clamp_column(buf);
    }

    pub fn page_down(&mut self, buf: &Buffer, page: usize) {
        self.row = (self.row + page).min(buf.line_count().saturating_sub(1));
        self.clamp_column(buf);
    }

    /// Adjust scroll offsets by the minimal amount that keeps the cursor
    /// inside a `text_rows` x `text_cols` window. Call after every cursor
    /// move and viewport resize, before rendering.
    pub fn update_scroll(&mut self, text_rows: usize, text_cols: usize) {
        if text_rows == 0 || text_cols == 0 {
            return;
        }
        if self.row < self.row_offset {
            self.row_offset = self.row;
        }
        if self.row >= self.row_offset + text_rows {
            self.row_offset = self.row - text_rows + 1;
        }
        if self.col < self.col_offset {
            self.col_offset = self.col;
        }
        if self.col >= self.col_offset + text_cols {
            self.col_offset = self.col - text_cols + 1;
        }
    }
}
