use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write as _};
use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::header::FileHeader;

/// A generated file opened for writing.
///
/// Implements [`fmt::Write`]; the first I/O error is kept and reported by
/// [`SourceFile::finish`].
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    out: BufWriter<File>,
    io_error: Option<io::Error>,
}

impl SourceFile {
    /// Creates `dir/filename` (or `filename` alone) and writes `header` if given.
    /// Fails before any text is written when the file cannot be created.
    pub fn create(
        dir: Option<&Path>,
        filename: &str,
        header: Option<&FileHeader>,
    ) -> Result<Self, Diagnostic> {
        let path = match dir {
            Some(dir) => dir.join(filename),
            None => PathBuf::from(filename),
        };
        let file = File::create(&path).map_err(|e| {
            Diagnostic::new(
                DiagnosticCode::X7S0300SinkOpen,
                format!(
                    "create({}, {filename}): unable to create file: {e}",
                    dir.map(|d| d.display().to_string()).unwrap_or_default()
                ),
            )
        })?;
        let mut sink = SourceFile {
            path,
            out: BufWriter::new(file),
            io_error: None,
        };
        if let Some(header) = header {
            header.write(&mut sink, filename)?;
        }
        Ok(sink)
    }

    pub fn finish(mut self) -> Result<PathBuf, Diagnostic> {
        if self.io_error.is_none() {
            if let Err(e) = self.out.flush() {
                self.io_error = Some(e);
            }
        }
        match self.io_error {
            None => Ok(self.path),
            Some(e) => Err(Diagnostic::new(
                DiagnosticCode::X7S0001SinkWrite,
                format!("write {}: {e}", self.path.display()),
            )),
        }
    }
}

impl fmt::Write for SourceFile {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.io_error.is_some() {
            return Err(fmt::Error);
        }
        self.out.write_all(s.as_bytes()).map_err(|e| {
            self.io_error = Some(e);
            fmt::Error
        })
    }
}
