//! Byte arrays of mostly invariant characters, e.g. NUL-terminated name tables.
//!
//! Control bytes are written in decimal and everything else as a quoted character
//! literal. Lines are broken at terminator and control-byte boundaries so that small
//! data changes move as few lines as possible.

use std::fmt;

use crate::array::render_len_template;
use crate::diagnostics::Diagnostic;

/// Hard limit on elements per line.
pub const MAX_BYTES_PER_LINE: usize = 32;
const BREAK_AFTER_NUL_COL: usize = 24;
const BREAK_BEFORE_CONTROL_COL: usize = 16;

/// Column and the two previous bytes of one byte-array emission.
#[derive(Debug, Default, Clone, Copy)]
struct LineCursor {
    col: usize,
    prev: Option<u8>,
    prev2: Option<u8>,
}

impl LineCursor {
    fn should_break(&self, c: u8) -> bool {
        if self.col >= MAX_BYTES_PER_LINE {
            return true;
        }
        // Printable byte then NUL: the previous string just ended.
        if self.col >= BREAK_AFTER_NUL_COL
            && matches!(self.prev2, Some(p) if p >= 0x20)
            && self.prev == Some(0)
        {
            return true;
        }
        self.col >= BREAK_BEFORE_CONTROL_COL
            && matches!(self.prev, Some(p) if p == 0 || p >= 0x20)
            && 0 < c
            && c < 0x20
    }

    fn advance(&mut self, c: u8) {
        self.prev2 = self.prev;
        self.prev = Some(c);
        self.col += 1;
    }
}

pub fn write_byte_array<W: fmt::Write + ?Sized>(
    out: &mut W,
    prefix: Option<&str>,
    bytes: &[u8],
    postfix: Option<&str>,
) -> Result<(), Diagnostic> {
    if let Some(prefix) = prefix {
        out.write_str(&render_len_template(prefix, bytes.len()))?;
    }
    let mut cursor = LineCursor::default();
    for (i, &c) in bytes.iter().enumerate() {
        if i > 0 {
            if cursor.should_break(c) {
                out.write_str(",\n")?;
                cursor.col = 0;
            } else {
                out.write_char(',')?;
            }
        }
        write_byte(out, c)?;
        cursor.advance(c);
    }
    if let Some(postfix) = postfix {
        out.write_str(postfix)?;
    }
    Ok(())
}

fn write_byte<W: fmt::Write + ?Sized>(out: &mut W, c: u8) -> fmt::Result {
    match c {
        0x00..=0x1f => write!(out, "{c}"),
        b'\'' => out.write_str("'\\''"),
        b'\\' => out.write_str("'\\\\'"),
        0x20..=0x7e => write!(out, "'{}'", c as char),
        _ => write!(out, "'\\x{c:02x}'"),
    }
}
