//! UTF-16 text as quoted 7-bit source strings.

use std::fmt;

use crate::diagnostics::{Diagnostic, DiagnosticCode};

/// Decides which code points must be escaped and how.
pub trait Printability {
    fn is_unprintable(&self, cp: u32) -> bool;

    /// UTF-16 escape sequence for an unprintable code point.
    fn escape(&self, cp: u32) -> Vec<u16>;
}

/// Printable ASCII passes through; everything else becomes `\uXXXX` or `\UXXXXXXXX`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcuUtilityEscaper;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

impl Printability for IcuUtilityEscaper {
    fn is_unprintable(&self, cp: u32) -> bool {
        !(0x20..=0x7e).contains(&cp)
    }

    fn escape(&self, cp: u32) -> Vec<u16> {
        let (marker, digits) = if cp > 0xffff { (b'U', 8) } else { (b'u', 4) };
        let mut out = Vec::with_capacity(2 + digits);
        out.push(u16::from(b'\\'));
        out.push(u16::from(marker));
        for shift in (0..digits).rev() {
            let nibble = (cp >> (shift * 4)) & 0xf;
            out.push(u16::from(HEX_DIGITS[nibble as usize]));
        }
        out
    }
}

/// Writes `units` as a double-quoted string of 7-bit characters.
///
/// Surrogate pairs are decoded; an unpaired surrogate is treated as its own code
/// point and handed to `printability` like any other.
pub fn write_string_as_ascii<W: fmt::Write + ?Sized>(
    out: &mut W,
    units: &[u16],
    printability: &dyn Printability,
) -> Result<(), Diagnostic> {
    out.write_char('"')?;
    for decoded in char::decode_utf16(units.iter().copied()) {
        let cp = match decoded {
            Ok(ch) => u32::from(ch),
            Err(err) => u32::from(err.unpaired_surrogate()),
        };
        if cp == u32::from('"') {
            out.write_str("\\\"")?;
        } else if printability.is_unprintable(cp) {
            write_escape(out, cp, &printability.escape(cp))?;
        } else if cp < 0x80 {
            out.write_char(cp as u8 as char)?;
        } else {
            return Err(Diagnostic::new(
                DiagnosticCode::X7S0130UnescapedNonAscii,
                format!("U+{cp:04X} is printable but outside the 7-bit range"),
            ));
        }
    }
    out.write_char('"')?;
    Ok(())
}

fn write_escape<W: fmt::Write + ?Sized>(
    out: &mut W,
    cp: u32,
    escape: &[u16],
) -> Result<(), Diagnostic> {
    let text = String::from_utf16(escape).map_err(|_| {
        Diagnostic::new(
            DiagnosticCode::X7S0130UnescapedNonAscii,
            format!("escape sequence for U+{cp:04X} is not valid UTF-16"),
        )
    })?;
    if !text.is_ascii() {
        return Err(Diagnostic::new(
            DiagnosticCode::X7S0130UnescapedNonAscii,
            format!("escape sequence for U+{cp:04X} is not 7-bit: {text:?}"),
        ));
    }
    out.write_str(&text)?;
    Ok(())
}
