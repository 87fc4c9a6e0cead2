//! Fixed-width numeric array literals with line wrapping.
//!
//! Values `<= 9` are written in decimal, everything else as `0x`-prefixed lowercase
//! hex. A line break plus indent is inserted after every [`VALUES_PER_LINE`] values so
//! that regenerated tables produce small diffs.

use std::fmt;

use crate::diagnostics::{Diagnostic, DiagnosticCode};

pub const VALUES_PER_LINE: usize = 16;

/// Placeholder replaced by the element count in array prefixes.
pub const LEN_PLACEHOLDER: &str = "{len}";

/// A borrowed integer sequence of one element width. 64-bit values are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elements<'a> {
    U8(&'a [u8]),
    U16(&'a [u16]),
    U32(&'a [u32]),
    I64(&'a [i64]),
}

impl<'a> Elements<'a> {
    pub fn bits(&self) -> u32 {
        match self {
            Elements::U8(_) => 8,
            Elements::U16(_) => 16,
            Elements::U32(_) => 32,
            Elements::I64(_) => 64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Elements::U8(xs) => xs.len(),
            Elements::U16(xs) => xs.len(),
            Elements::U32(xs) => xs.len(),
            Elements::I64(xs) => xs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The first `len` elements, or `None` if there are fewer.
    pub fn head(&self, len: usize) -> Option<Elements<'a>> {
        Some(match *self {
            Elements::U8(xs) => Elements::U8(xs.get(..len)?),
            Elements::U16(xs) => Elements::U16(xs.get(..len)?),
            Elements::U32(xs) => Elements::U32(xs.get(..len)?),
            Elements::I64(xs) => Elements::I64(xs.get(..len)?),
        })
    }

    pub fn values(&self) -> Box<dyn Iterator<Item = i64> + 'a> {
        match *self {
            Elements::U8(xs) => Box::new(xs.iter().map(|&v| i64::from(v))),
            Elements::U16(xs) => Box::new(xs.iter().map(|&v| i64::from(v))),
            Elements::U32(xs) => Box::new(xs.iter().map(|&v| i64::from(v))),
            Elements::I64(xs) => Box::new(xs.iter().copied()),
        }
    }
}

/// Text around an array. `prefix` may contain [`LEN_PLACEHOLDER`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayLayout<'a> {
    pub prefix: Option<&'a str>,
    pub indent: &'a str,
    pub postfix: Option<&'a str>,
}

pub fn is_recognized_width(width: u32) -> bool {
    matches!(width, 8 | 16 | 32 | 64)
}

pub fn render_len_template(template: &str, len: usize) -> String {
    template.replace(LEN_PLACEHOLDER, &len.to_string())
}

/// Writes `elements` as an array declared with element `width`.
///
/// An unrecognized width pushes a warning onto `diags` and writes nothing at all, not
/// even the prefix. A recognized width that disagrees with the element type is an
/// input-contract violation.
pub fn write_array<W: fmt::Write + ?Sized>(
    out: &mut W,
    diags: &mut Vec<Diagnostic>,
    width: u32,
    elements: Elements<'_>,
    layout: &ArrayLayout<'_>,
) -> Result<(), Diagnostic> {
    if !is_recognized_width(width) {
        diags.push(Diagnostic::new(
            DiagnosticCode::X7S0100UnrecognizedWidth,
            format!("write_array(width={width}) unrecognized width"),
        ));
        return Ok(());
    }
    if width != elements.bits() {
        return Err(Diagnostic::new(
            DiagnosticCode::X7S0102WidthMismatch,
            format!(
                "write_array(width={width}) given {}-bit elements",
                elements.bits()
            ),
        ));
    }
    write_values(out, layout, elements.len(), elements.values())?;
    Ok(())
}

/// Writes `elements` using their own width.
pub fn write_elements<W: fmt::Write + ?Sized>(
    out: &mut W,
    elements: Elements<'_>,
    layout: &ArrayLayout<'_>,
) -> Result<(), Diagnostic> {
    write_values(out, layout, elements.len(), elements.values())?;
    Ok(())
}

pub(crate) fn write_values<W, I>(
    out: &mut W,
    layout: &ArrayLayout<'_>,
    len: usize,
    values: I,
) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    I: IntoIterator<Item = i64>,
{
    if let Some(prefix) = layout.prefix {
        out.write_str(&render_len_template(prefix, len))?;
    }
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            if i % VALUES_PER_LINE != 0 {
                out.write_char(',')?;
            } else {
                out.write_str(",\n")?;
                out.write_str(layout.indent)?;
            }
        }
        write_value(out, value)?;
    }
    if let Some(postfix) = layout.postfix {
        out.write_str(postfix)?;
    }
    Ok(())
}

fn write_value<W: fmt::Write + ?Sized>(out: &mut W, value: i64) -> fmt::Result {
    if value <= 9 {
        write!(out, "{value}")
    } else {
        write!(out, "{value:#x}")
    }
}
