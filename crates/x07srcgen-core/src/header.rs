//! Copyright notice and "machine-generated" banner at the top of generated files.

use std::fmt;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::syntax::TargetSyntax;

/// Last year that also carries the IBM copyright block.
pub const LEGACY_COPYRIGHT_LAST_YEAR: i32 = 2016;

pub fn write_copyright_header<W: fmt::Write + ?Sized>(
    out: &mut W,
    prefix: &str,
    copyright_year: i32,
) -> fmt::Result {
    writeln!(
        out,
        "{prefix} Copyright (C) {copyright_year} and later: Unicode, Inc. and others."
    )?;
    writeln!(
        out,
        "{prefix} License & terms of use: http://www.unicode.org/copyright.html"
    )?;
    if copyright_year <= LEGACY_COPYRIGHT_LAST_YEAR {
        writeln!(
            out,
            "{prefix} Copyright (C) 1999-2016, International Business Machines"
        )?;
        writeln!(out, "{prefix} Corporation and others.  All Rights Reserved.")?;
    }
    Ok(())
}

/// Writes the file name banner. Without a generator tag the banner carries today's
/// date, which makes the output time-dependent.
pub fn write_file_name_generated_by<W: fmt::Write + ?Sized>(
    out: &mut W,
    prefix: &str,
    filename: &str,
    generator: Option<&str>,
) -> Result<(), Diagnostic> {
    let today;
    let generated_by = match generator {
        Some(g) => g,
        None => {
            today = today_iso_date()?;
            today.as_str()
        }
    };
    write!(
        out,
        "{prefix}\n{prefix} file name: {filename}\n{prefix}\n{prefix} machine-generated by: {generated_by}\n\n"
    )?;
    Ok(())
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Today's local date as `YYYY-MM-DD` (UTC when the local offset is unknown).
pub fn today_iso_date() -> Result<String, Diagnostic> {
    now()
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| {
            Diagnostic::new(
                DiagnosticCode::X7S0901InternalBug,
                format!("format today's date: {e}"),
            )
        })
}

pub fn current_year() -> i32 {
    now().year()
}

/// Everything written ahead of the generated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub comment_prefix: &'static str,
    pub copyright_year: i32,
    pub generator: Option<String>,
}

impl FileHeader {
    /// `//` comments, for C sources.
    pub fn source(copyright_year: i32, generator: Option<String>) -> Self {
        FileHeader {
            comment_prefix: TargetSyntax::CCode.comment_prefix(),
            copyright_year,
            generator,
        }
    }

    /// `#` comments, for TOML data files.
    pub fn text_data(copyright_year: i32, generator: Option<String>) -> Self {
        FileHeader {
            comment_prefix: TargetSyntax::Toml.comment_prefix(),
            copyright_year,
            generator,
        }
    }

    pub fn for_syntax(syntax: TargetSyntax, copyright_year: i32, generator: Option<String>) -> Self {
        match syntax {
            TargetSyntax::CCode => FileHeader::source(copyright_year, generator),
            TargetSyntax::Toml => FileHeader::text_data(copyright_year, generator),
        }
    }

    pub fn write<W: fmt::Write + ?Sized>(&self, out: &mut W, filename: &str) -> Result<(), Diagnostic> {
        write_copyright_header(out, self.comment_prefix, self.copyright_year)?;
        write_file_name_generated_by(
            out,
            self.comment_prefix,
            filename,
            self.generator.as_deref(),
        )
    }
}
