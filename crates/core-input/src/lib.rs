//! Raw terminal input decoding.
//!
//! Turns the byte stream a raw-mode terminal delivers into discrete
//! [`KeyEvent`]s: printable runes (including multi-byte UTF-8), control
//! keys, and the CSI escape sequences for navigation keys. The decoder is
//! stateless between calls; each call reads exactly the bytes of one key.
//! Blocking semantics belong to the byte source: a dangling ESC degrades
//! to a bare Escape only when the lookahead read returns no data, never
//! via a timer.

use std::io::Read;
use thiserror::Error;
use tracing::trace;

/// One decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Char(char),
    Ctrl(char),
    Alt(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    /// Zero-byte read on the first byte: the source is exhausted.
    #[error("no input available")]
    NoData,
    /// Malformed UTF-8 lead byte, or continuation bytes missing/invalid.
    #[error("invalid input encoding: {0}")]
    InvalidEncoding(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Read one key from the byte source. Exactly one event per call.
pub fn read_key(r: &mut impl Read) -> Result<KeyEvent, DecodeError> {
    let mut first = [0u8; 1];
    let n = r.read(&mut first)?;
    if n == 0 {
        return Err(DecodeError::NoData);
    }
    let b = first[0];

    let key = match b {
        0x1b => parse_escape_sequence(r)?,
        0x7f => KeyEvent::Backspace,
        0x0d => KeyEvent::Enter,
        0x09 => KeyEvent::Tab,
        0x08 => KeyEvent::Backspace,
        0x01..=0x1a => KeyEvent::Ctrl((b'a' + b - 1) as char),
        _ if b < 0x80 => KeyEvent::Char(b as char),
        _ => parse_utf8(r, b)?,
    };
    trace!(target: "input.decode", ?key, "key_decoded");
    Ok(key)
}

/// Decode the tail of an ESC-initiated sequence: up to two lookahead bytes
/// for CSI arrows/home/end, one more for the `~`-terminated page/delete
/// forms, or an Alt+letter chord. Anything unrecognized degrades to a bare
/// Escape, never an error.
fn parse_escape_sequence(r: &mut impl Read) -> Result<KeyEvent, DecodeError> {
    let mut buf = [0u8; 2];
    let n = match r.read(&mut buf) {
        Ok(n) => n,
        Err(_) => return Ok(KeyEvent::Escape),
    };
    if n == 0 {
        // Lone ESC: no more bytes were available.
        return Ok(KeyEvent::Escape);
    }

    if buf[0] == b'[' && n > 1 {
        match buf[1] {
            b'A' => return Ok(KeyEvent::ArrowUp),
            b'B' => return Ok(KeyEvent::ArrowDown),
            b'C' => return Ok(KeyEvent::ArrowRight),
            b'D' => return Ok(KeyEvent::ArrowLeft),
            b'H' => return Ok(KeyEvent::Home),
            b'F' => return Ok(KeyEvent::End),
            b'5' | b'6' | b'3' => {
                let mut tilde = [0u8; 1];
                if matches!(r.read(&mut tilde), Ok(1)) && tilde[0] == b'~' {
                    return Ok(match buf[1] {
                        b'5' => KeyEvent::PageUp,
                        b'6' => KeyEvent::PageDown,
                        _ => KeyEvent::Delete,
                    });
                }
            }
            _ => {}
        }
    }

    // ESC followed by a plain letter is an Alt chord.
    if buf[0].is_ascii_lowercase() {
        return Ok(KeyEvent::Alt(buf[0] as char));
    }

    Ok(KeyEvent::Escape)
}

/// Decode a multi-byte UTF-8 character whose lead byte has already been
/// consumed. The lead byte's high bits give the continuation count.
fn parse_utf8(r: &mut impl Read, first: u8) -> Result<KeyEvent, DecodeError> {
    let total = match first {
        b if b >> 5 == 0b110 => 2,
        b if b >> 4 == 0b1110 => 3,
        b if b >> 3 == 0b11110 => 4,
        b => {
            return Err(DecodeError::InvalidEncoding(format!(
                "invalid UTF-8 lead byte 0x{b:02x}"
            )));
        }
    };

    let mut bytes = [0u8; 4];
    bytes[0] = first;
    let mut filled = 1;
    while filled < total {
        let n = r.read(&mut bytes[filled..total])?;
        if n == 0 {
            return Err(DecodeError::InvalidEncoding(
                "truncated UTF-8 sequence".to_string(),
            ));
        }
        filled += n;
    }

    match std::str::from_utf8(&bytes[..total]) {
        Ok(s) => match s.chars().next() {
            Some(ch) => Ok(KeyEvent::Char(ch)),
            None => Err(DecodeError::InvalidEncoding(
                "empty UTF-8 sequence".to_string(),
            )),
        },
        Err(_) => Err(DecodeError::InvalidEncoding(format!(
            "invalid UTF-8 sequence {:02x?}",
            &bytes[..total]
        ))),
    }
}
