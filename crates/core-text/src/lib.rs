//! Line-vector text buffer abstraction.
//!
//! The document is an ordered sequence of lines; every mutation is a small
//! splice on one or two lines. Column indices count chars (Unicode scalar
//! values), not bytes, and a line's end (`col == line_len`) is a valid
//! insertion point. A buffer never has fewer than one line.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Row or column outside the document bounds. Always a caller bug: the
/// dispatch layer derives coordinates from a clamped cursor, so these
/// errors propagate instead of being silently corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OutOfBounds {
    #[error("row {row} out of bounds (0..{line_count})")]
    Row { row: usize, line_count: usize },
    #[error("col {col} out of bounds (0..={line_len})")]
    Col { col: usize, line_len: usize },
}

/// In-memory text document plus modification/source metadata.
///
/// Not safe for concurrent access; the editor guarantees a single mutator.
#[derive(Debug, Clone)]
pub struct Buffer {
    lines: Vec<String>,
    modified: bool,
    path: Option<PathBuf>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// An empty unsaved document: one empty line, unmodified, no path.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            modified: false,
            path: None,
        }
    }

    /// Build a buffer from externally supplied lines (e.g. a loaded file).
    /// An empty sequence is coerced to the minimum single empty line.
    pub fn from_lines(lines: Vec<String>, path: Option<PathBuf>) -> Self {
        let lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        Self {
            lines,
            modified: false,
            path,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Result<&str, OutOfBounds> {
        self.lines
            .get(row)
            .map(String::as_str)
            .ok_or(OutOfBounds::Row {
                row,
                line_count: self.lines.len(),
            })
    }

    /// Length of the given line in chars.
    pub fn line_len(&self, row: usize) -> Result<usize, OutOfBounds> {
        Ok(self.line(row)?.chars().count())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole document as text, lines joined by `\n`.
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Display name for the status line: the file name component of the
    /// source path, or `[No Name]` for an unbound buffer.
    pub fn file_name(&self) -> String {
        match &self.path {
            Some(p) => p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.to_string_lossy().into_owned()),
            None => "[No Name]".to_string(),
        }
    }

    /// True for a never-touched empty document (single empty line, no edits).
    pub fn is_pristine(&self) -> bool {
        !self.modified && self.lines.len() == 1 && self.lines[0].is_empty()
    }

    fn check_row(&self, row: usize) -> Result<(), OutOfBounds> {
        if row >= self.lines.len() {
            return Err(OutOfBounds::Row {
                row,
                line_count: self.lines.len(),
            });
        }
        Ok(())
    }

    /// Byte offset of char index `col` within `line`. `col == char count`
    /// maps to `line.len()` (the end-of-line insertion point).
    fn byte_at(line: &str, col: usize) -> Result<usize, OutOfBounds> {
        let mut chars = 0;
        for (byte, _) in line.char_indices() {
            if chars == col {
                return Ok(byte);
            }
            chars += 1;
        }
        if col == chars {
            return Ok(line.len());
        }
        Err(OutOfBounds::Col {
            col,
            line_len: chars,
        })
    }

    /// Splice a single character into the line at `col`.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) -> Result<(), OutOfBounds> {
        self.check_row(row)?;
        let line = &mut self.lines[row];
        let byte = Self::byte_at(line, col)?;
        line.insert(byte, ch);
        self.modified = true;
        Ok(())
    }

    /// Remove the character at `col`. Deleting at the end of the line is a
    /// no-op rather than an error (there is nothing under the cursor).
    pub fn delete_char(&mut self, row: usize, col: usize) -> Result<(), OutOfBounds> {
        self.check_row(row)?;
        let line = &mut self.lines[row];
        let byte = Self::byte_at(line, col)?;
        if byte == line.len() {
            return Ok(());
        }
        line.remove(byte);
        self.modified = true;
        Ok(())
    }

    /// Insert a new empty line at `row`, shifting subsequent lines down.
    /// `row == line_count` appends.
    pub fn insert_line(&mut self, row: usize) -> Result<(), OutOfBounds> {
        self.insert_line_with(row, String::new())
    }

    /// Insert a line with the given content at `row`; `row == line_count`
    /// appends.
    pub fn insert_line_with(&mut self, row: usize, text: String) -> Result<(), OutOfBounds> {
        if row > self.lines.len() {
            return Err(OutOfBounds::Row {
                row,
                line_count: self.lines.len(),
            });
        }
        self.lines.insert(row, text);
        self.modified = true;
        Ok(())
    }

    /// Remove the line at `row`. The last remaining line is cleared to
    /// empty instead of removed: a document always has at least one line.
    pub fn delete_line(&mut self, row: usize) -> Result<(), OutOfBounds> {
        self.check_row(row)?;
        if self.lines.len() == 1 {
            self.lines[0].clear();
        } else {
            self.lines.remove(row);
        }
        self.modified = true;
        Ok(())
    }

    /// Split the line at `col`: the suffix becomes a new line immediately
    /// below.
    pub fn split_line(&mut self, row: usize, col: usize) -> Result<(), OutOfBounds> {
        self.check_row(row)?;
        let line = &mut self.lines[row];
        let byte = Self::byte_at(line, col)?;
        let suffix = line.split_off(byte);
        self.lines.insert(row + 1, suffix);
        self.modified = true;
        Ok(())
    }

    /// Append line `row + 1` onto `row` and remove it. Joining the last
    /// line is an error (there is nothing below it).
    pub fn join_lines(&mut self, row: usize) -> Result<(), OutOfBounds> {
        if row + 1 >= self.lines.len() {
            return Err(OutOfBounds::Row {
                row,
                line_count: self.lines.len(),
            });
        }
        let next = self.lines.remove(row + 1);
        self.lines[row].push_str(&next);
        self.modified = true;
        Ok(())
    }

    /// Delete the character before `(row, col)` and return the resulting
    /// cursor position. At column 0 this joins with the previous line and
    /// the returned position is the join seam; at the document start it is
    /// a no-op.
    pub fn backspace(&mut self, row: usize, col: usize) -> Result<(usize, usize), OutOfBounds> {
        self.check_row(row)?;
        if row == 0 && col == 0 {
            return Ok((0, 0));
        }
        if col == 0 {
            let prev_len = self.line_len(row - 1)?;
            self.join_lines(row - 1)?;
            return Ok((row - 1, prev_len));
        }
        let line_len = self.line_len(row)?;
        let col = col.min(line_len);
        self.delete_char(row, col - 1)?;
        Ok((row, col - 1))
    }

    /// Wholesale line replacement.
    pub fn set_line(&mut self, row: usize, text: String) -> Result<(), OutOfBounds> {
        self.check_row(row)?;
        self.lines[row] = text;
        self.modified = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_has_single_empty_line() {
        let b = Buffer::new();
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0).unwrap(), "");
        assert!(!b.is_modified());
        assert!(b.is_pristine());
    }

    #[test]
    fn from_lines_coerces_empty_input() {
        let b = Buffer::from_lines(vec![], None);
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0).unwrap(), "");
    }

    #[test]
    fn insert_then_delete_round_trips() {
        let mut b = Buffer::from_lines(vec!["hello".into()], None);
        b.insert_char(0, 2, 'X').unwrap();
        assert_eq!(b.line(0).unwrap(), "heXllo");
        b.delete_char(0, 2).unwrap();
        assert_eq!(b.line(0).unwrap(), "hello");
    }

    #[test]
    fn insert_at_line_end_and_out_of_bounds() {
        let mut b = Buffer::from_lines(vec!["ab".into()], None);
        b.insert_char(0, 2, 'c').unwrap();
        assert_eq!(b.line(0).unwrap(), "abc");
        assert!(matches!(
            b.insert_char(0, 9, 'x'),
            Err(OutOfBounds::Col { col: 9, .. })
        ));
        assert!(matches!(
            b.insert_char(5, 0, 'x'),
            Err(OutOfBounds::Row { row: 5, .. })
        ));
    }

    #[test]
    fn delete_at_line_end_is_noop() {
        let mut b = Buffer::from_lines(vec!["hi".into()], None);
        b.delete_char(0, 2).unwrap();
        assert_eq!(b.line(0).unwrap(), "hi");
    }

    #[test]
    fn multibyte_chars_use_char_columns() {
        let mut b = Buffer::from_lines(vec!["a€b".into()], None);
        assert_eq!(b.line_len(0).unwrap(), 3);
        b.insert_char(0, 2, 'é').unwrap();
        assert_eq!(b.line(0).unwrap(), "a€éb");
        b.delete_char(0, 1).unwrap();
        assert_eq!(b.line(0).unwrap(), "aéb");
    }

    #[test]
    fn split_then_join_restores_line() {
        let mut b = Buffer::from_lines(vec!["hello world".into()], None);
        b.split_line(0, 5).unwrap();
        assert_eq!(b.line(0).unwrap(), "hello");
        assert_eq!(b.line(1).unwrap(), " world");
        b.join_lines(0).unwrap();
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0).unwrap(), "hello world");
    }

    #[test]
    fn join_last_line_is_error() {
        let mut b = Buffer::from_lines(vec!["a".into(), "b".into()], None);
        assert!(b.join_lines(1).is_err());
    }

    #[test]
    fn delete_line_keeps_minimum_one() {
        let mut b = Buffer::from_lines(vec!["only".into()], None);
        b.delete_line(0).unwrap();
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0).unwrap(), "");

        let mut b = Buffer::from_lines(vec!["a".into(), "b".into()], None);
        b.delete_line(0).unwrap();
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0).unwrap(), "b");
    }

    #[test]
    fn insert_line_append_form() {
        let mut b = Buffer::from_lines(vec!["a".into()], None);
        b.insert_line_with(1, "b".into()).unwrap();
        assert_eq!(b.lines(), &["a".to_string(), "b".to_string()]);
        assert!(b.insert_line(3).is_err());
    }

    #[test]
    fn backspace_mid_line() {
        let mut b = Buffer::from_lines(vec!["abc".into()], None);
        let pos = b.backspace(0, 2).unwrap();
        assert_eq!(pos, (0, 1));
        assert_eq!(b.line(0).unwrap(), "ac");
    }

    #[test]
    fn backspace_at_line_start_joins() {
        let mut b = Buffer::from_lines(vec!["ab".into(), "cd".into()], None);
        let pos = b.backspace(1, 0).unwrap();
        assert_eq!(pos, (0, 2));
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0).unwrap(), "abcd");
    }

    #[test]
    fn backspace_at_origin_is_noop() {
        let mut b = Buffer::from_lines(vec!["x".into()], None);
        let pos = b.backspace(0, 0).unwrap();
        assert_eq!(pos, (0, 0));
        assert_eq!(b.line(0).unwrap(), "x");
        assert!(!b.is_modified());
    }

    #[test]
    fn contents_joins_with_newlines() {
        let b = Buffer::from_lines(vec!["a".into(), "b".into(), "c".into()], None);
        assert_eq!(b.contents(), "a\nb\nc");
    }

    #[test]
    fn file_name_fallback() {
        let b = Buffer::new();
        assert_eq!(b.file_name(), "[No Name]");
        let b = Buffer::from_lines(vec!["".into()], Some("/tmp/notes.txt".into()));
        assert_eq!(b.file_name(), "notes.txt");
    }
}
