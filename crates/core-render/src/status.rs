//! Status and message line composition.
//!
//! The status bar shows ` MODE  name [+] ... row:col ` padded to the full
//! terminal width; the message line below it shows either the command or
//! search echo (while those modes are active) or the latest transient
//! status message. Padding counts display cells, not bytes, so wide
//! characters in file names keep the right-hand segment aligned.

use core_state::Mode;
use unicode_width::UnicodeWidthStr;

/// What the status line needs to render one frame.
pub struct StatusContext<'a> {
    pub mode: Mode,
    pub file_name: &'a str,
    pub modified: bool,
    pub line_count: usize,
    /// 0-based cursor position; displayed 1-based.
    pub cursor: (usize, usize),
}

/// Compose the status bar, padded (or truncated) to `width` cells.
pub fn format_status(ctx: &StatusContext<'_>, width: usize) -> String {
    let dirty = if ctx.modified { " [+]" } else { "" };
    let left = format!(
        " {}  {}{} - {} lines",
        ctx.mode.short_str(),
        ctx.file_name,
        dirty,
        ctx.line_count
    );
    let right = format!("{}:{} ", ctx.cursor.0 + 1, ctx.cursor.1 + 1);
    pad_between(&left, &right, width)
}

/// The line below the status bar: a live command/search echo while one of
/// those modes is active, the transient status message otherwise.
pub fn format_message(
    mode: Mode,
    command_echo: &str,
    search_echo: &str,
    status: &str,
    width: usize,
) -> String {
    let text = match mode {
        Mode::Command => command_echo,
        Mode::Search => search_echo,
        _ => status,
    };
    truncate_cells(text, width).to_string()
}

/// Join `left` and `right` with enough spaces to fill `width` cells. When
/// they do not fit, the left segment is truncated first.
fn pad_between(left: &str, right: &str, width: usize) -> String {
    let right_w = right.width();
    if right_w >= width {
        return truncate_cells(right, width).to_string();
    }
    let left = truncate_cells(left, width - right_w);
    let gap = width - left.width() - right_w;
    let mut s = String::with_capacity(width);
    s.push_str(left);
    for _ in 0..gap {
        s.push(' ');
    }
    s.push_str(right);
    s
}

/// Longest prefix of `s` that fits in `max` display cells.
fn truncate_cells(s: &str, max: usize) -> &str {
    let mut cells = 0;
    for (byte, ch) in s.char_indices() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if cells + w > max {
            return &s[..byte];
        }
        cells += w;
    }
    s
}
