//! Range listings of code point maps and sets.
//!
//! Both listings are TOML-only. The map listing trusts the map's run boundaries; it
//! never merges or splits runs itself.

use std::fmt;

use crate::cpmap::{CodePointMap, SetItem, UnicodeSetSource, ValueNameGetter, MAX_CODE_POINT};
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::escape::{write_string_as_ascii, IcuUtilityEscaper, Printability};
use crate::syntax::TargetSyntax;

fn require_toml(what: &str, syntax: TargetSyntax) -> Result<(), Diagnostic> {
    if syntax == TargetSyntax::Toml {
        return Ok(());
    }
    Err(Diagnostic::new(
        DiagnosticCode::X7S0110UnsupportedSyntax,
        format!("{what} cannot be written as {syntax}"),
    ))
}

/// Writes `ranges = [...]` with one `{a, b, v[, name]}` table per run, starting at
/// code point 0.
pub fn write_cp_map<W: fmt::Write + ?Sized>(
    out: &mut W,
    map: &dyn CodePointMap,
    names: Option<&dyn ValueNameGetter>,
    syntax: TargetSyntax,
) -> Result<(), Diagnostic> {
    require_toml("code point map", syntax)?;
    out.write_str("# Code points `a` through `b` have value `v`, corresponding to `name`.\n")?;
    out.write_str("ranges = [\n")?;
    let mut start = 0u32;
    while let Some((end, value)) = map.get_range(start) {
        if end < start || end > MAX_CODE_POINT {
            return Err(Diagnostic::new(
                DiagnosticCode::X7S0121RangeOutOfOrder,
                format!("map run starting at {start:#x} ends at {end:#x}"),
            ));
        }
        match names {
            Some(names) => {
                write!(out, "  {{a={start:#x}, b={end:#x}, v={value}, name=")?;
                write_value_name(out, names.value_name(value).unwrap_or(""))?;
                out.write_str("},\n")?;
            }
            None => writeln!(out, "  {{a={start:#x}, b={end:#x}, v={value}}},")?,
        }
        if end == MAX_CODE_POINT {
            break;
        }
        start = end + 1;
    }
    out.write_str("]\n")?;
    Ok(())
}

/// Writes `name` as a TOML basic string: `"` and `\` are backslash-escaped and
/// everything outside printable ASCII becomes a `\u`/`\U` escape.
fn write_value_name<W: fmt::Write + ?Sized>(out: &mut W, name: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in name.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            _ if IcuUtilityEscaper.is_unprintable(u32::from(ch)) => {
                let escape = IcuUtilityEscaper.escape(u32::from(ch));
                out.write_str(&String::from_utf16_lossy(&escape))?;
            }
            _ => out.write_char(ch)?,
        }
    }
    out.write_char('"')
}

/// Writes `ranges = [...]` of inclusive `[start, end]` pairs and, if the set has any,
/// a `strings = [...]` list.
pub fn write_unicode_set<W: fmt::Write + ?Sized>(
    out: &mut W,
    set: &dyn UnicodeSetSource,
    syntax: TargetSyntax,
    printability: &dyn Printability,
) -> Result<(), Diagnostic> {
    require_toml("unicode set", syntax)?;
    out.write_str("# Inclusive ranges of the code points in the set.\n")?;
    out.write_str("ranges = [\n")?;
    let mut seen_first_string = false;
    let mut next_start = 0u32;
    for item in set.set_items() {
        match item {
            SetItem::String(units) => {
                if !seen_first_string {
                    seen_first_string = true;
                    out.write_str("]\nstrings = [\n")?;
                }
                out.write_str("  ")?;
                write_string_as_ascii(out, &units, printability)?;
                out.write_str(",\n")?;
            }
            SetItem::Range { start, end } => {
                if seen_first_string {
                    return Err(Diagnostic::new(
                        DiagnosticCode::X7S0120StringBeforeRange,
                        format!("range [{start:#x}, {end:#x}] follows a string"),
                    ));
                }
                if start < next_start || end < start || end > MAX_CODE_POINT {
                    return Err(Diagnostic::new(
                        DiagnosticCode::X7S0121RangeOutOfOrder,
                        format!("set range [{start:#x}, {end:#x}] is out of order"),
                    ));
                }
                writeln!(out, "  [{start:#x}, {end:#x}],")?;
                next_start = end.saturating_add(1);
            }
        }
    }
    out.write_str("]\n")?;
    Ok(())
}
