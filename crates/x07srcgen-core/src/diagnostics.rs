use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Input,
    Emit,
    Sink,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticCode {
    X7S0001SinkWrite,
    X7S0100UnrecognizedWidth,
    X7S0101UnrecognizedValueWidth,
    X7S0102WidthMismatch,
    X7S0103LengthOutOfRange,
    X7S0110UnsupportedSyntax,
    X7S0120StringBeforeRange,
    X7S0121RangeOutOfOrder,
    X7S0130UnescapedNonAscii,
    X7S0200InvalidInput,
    X7S0201SchemaVersionMismatch,
    X7S0300SinkOpen,
    X7S0901InternalBug,
}

impl DiagnosticCode {
    pub fn code_str(self) -> &'static str {
        match self {
            DiagnosticCode::X7S0001SinkWrite => "X7S0001",
            DiagnosticCode::X7S0100UnrecognizedWidth => "X7S0100",
            DiagnosticCode::X7S0101UnrecognizedValueWidth => "X7S0101",
            DiagnosticCode::X7S0102WidthMismatch => "X7S0102",
            DiagnosticCode::X7S0103LengthOutOfRange => "X7S0103",
            DiagnosticCode::X7S0110UnsupportedSyntax => "X7S0110",
            DiagnosticCode::X7S0120StringBeforeRange => "X7S0120",
            DiagnosticCode::X7S0121RangeOutOfOrder => "X7S0121",
            DiagnosticCode::X7S0130UnescapedNonAscii => "X7S0130",
            DiagnosticCode::X7S0200InvalidInput => "X7S0200",
            DiagnosticCode::X7S0201SchemaVersionMismatch => "X7S0201",
            DiagnosticCode::X7S0300SinkOpen => "X7S0300",
            DiagnosticCode::X7S0901InternalBug => "X7S0901",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            DiagnosticCode::X7S0001SinkWrite => "failed to write to output sink",
            DiagnosticCode::X7S0100UnrecognizedWidth => "unrecognized array element width",
            DiagnosticCode::X7S0101UnrecognizedValueWidth => "unrecognized trie value width tag",
            DiagnosticCode::X7S0102WidthMismatch => {
                "array data does not match its declared element width"
            }
            DiagnosticCode::X7S0103LengthOutOfRange => "declared length exceeds the array",
            DiagnosticCode::X7S0110UnsupportedSyntax => {
                "structure is not supported for the target syntax"
            }
            DiagnosticCode::X7S0120StringBeforeRange => {
                "set iteration yielded a code point range after a string"
            }
            DiagnosticCode::X7S0121RangeOutOfOrder => {
                "ranges are not strictly increasing and non-overlapping"
            }
            DiagnosticCode::X7S0130UnescapedNonAscii => {
                "non-ASCII code point was not flagged for escaping"
            }
            DiagnosticCode::X7S0200InvalidInput => "invalid input document",
            DiagnosticCode::X7S0201SchemaVersionMismatch => "input schema_version mismatch",
            DiagnosticCode::X7S0300SinkOpen => "unable to create file",
            DiagnosticCode::X7S0901InternalBug => "internal x07srcgen bug",
        }
    }

    pub fn default_help(self) -> Option<&'static str> {
        match self {
            DiagnosticCode::X7S0101UnrecognizedValueWidth => Some(
                "The data array is skipped. Valid tags are 0 (16-bit), 1 (32-bit) and 2 (8-bit).",
            ),
            DiagnosticCode::X7S0110UnsupportedSyntax => Some(
                "Legacy tries are emitted as C only; code point maps and sets as TOML only.",
            ),
            DiagnosticCode::X7S0120StringBeforeRange => {
                Some("The upstream set builder is broken: strings must follow all ranges.")
            }
            DiagnosticCode::X7S0130UnescapedNonAscii => {
                Some("The printability collaborator must flag every non-ASCII code point.")
            }
            DiagnosticCode::X7S0901InternalBug => Some(
                "This is a bug in x07srcgen. Please report it with the input document.",
            ),
            _ => None,
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            DiagnosticCode::X7S0001SinkWrite | DiagnosticCode::X7S0300SinkOpen => Phase::Sink,
            DiagnosticCode::X7S0200InvalidInput | DiagnosticCode::X7S0201SchemaVersionMismatch => {
                Phase::Input
            }
            DiagnosticCode::X7S0901InternalBug => Phase::Internal,
            _ => Phase::Emit,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::X7S0100UnrecognizedWidth
            | DiagnosticCode::X7S0101UnrecognizedValueWidth => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub phase: Phase,
    pub severity: Severity,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            phase: code.phase(),
            severity: code.severity(),
            message: message.into(),
            help: code.default_help().map(|s| s.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {:?}: {}",
            self.code.code_str(),
            self.phase,
            self.severity,
            self.message
        )?;
        if let Some(help) = &self.help {
            write!(f, "\n  help: {help}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

impl From<fmt::Error> for Diagnostic {
    fn from(_: fmt::Error) -> Self {
        Diagnostic::new(
            DiagnosticCode::X7S0001SinkWrite,
            DiagnosticCode::X7S0001SinkWrite.default_message(),
        )
    }
}

pub fn render_diagnostics_md() -> String {
    let mut rows: Vec<(String, Phase, Severity, String, String)> = Vec::new();
    for &code in all_codes() {
        rows.push((
            code.code_str().to_string(),
            code.phase(),
            code.severity(),
            code.default_message().to_string(),
            code.default_help().unwrap_or("").to_string(),
        ));
    }
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = String::new();
    out.push_str("# x07srcgen diagnostics catalog\n\n");
    out.push_str("This document is generated from `crates/x07srcgen-core/src/diagnostics.rs`.\n\n");
    out.push_str("| Code | Phase | Severity | Message | Help |\n");
    out.push_str("| ---- | ----- | -------- | ------- | ---- |\n");
    for (code, phase, sev, msg, help) in rows {
        out.push_str(&format!(
            "| {code} | {phase:?} | {sev:?} | {msg} | {help} |\n"
        ));
    }
    out
}

pub fn all_codes() -> &'static [DiagnosticCode] {
    &[
        DiagnosticCode::X7S0001SinkWrite,
        DiagnosticCode::X7S0100UnrecognizedWidth,
        DiagnosticCode::X7S0101UnrecognizedValueWidth,
        DiagnosticCode::X7S0102WidthMismatch,
        DiagnosticCode::X7S0103LengthOutOfRange,
        DiagnosticCode::X7S0110UnsupportedSyntax,
        DiagnosticCode::X7S0120StringBeforeRange,
        DiagnosticCode::X7S0121RangeOutOfOrder,
        DiagnosticCode::X7S0130UnescapedNonAscii,
        DiagnosticCode::X7S0200InvalidInput,
        DiagnosticCode::X7S0201SchemaVersionMismatch,
        DiagnosticCode::X7S0300SinkOpen,
        DiagnosticCode::X7S0901InternalBug,
    ]
}
