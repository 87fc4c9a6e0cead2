use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use x07_contracts::{X07SRCGEN_MANIFEST_SCHEMA_VERSION, X07SRCGEN_REPORT_SCHEMA_VERSION};
use x07srcgen_core::diagnostics::{render_diagnostics_md, Diagnostic};
use x07srcgen_core::document::{parse_document, render_document};
use x07srcgen_core::header::{current_year, FileHeader};
use x07srcgen_core::sink::SourceFile;
use x07srcgen_core::util::sha256_hex;
use x07srcgen_core::TargetSyntax;

#[derive(Parser, Debug)]
#[command(name = "x07srcgen")]
#[command(about = "Deterministic source generator: Unicode tries/maps/sets -> C or TOML.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one input document into one output file.
    Emit {
        #[arg(long)]
        r#in: PathBuf,
        /// Output file; its extension selects the syntax unless --syntax is given.
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum)]
        syntax: Option<TargetSyntax>,
        #[command(flatten)]
        header: HeaderArgs,
        /// If set, fail if output differs; do not write.
        #[arg(long, default_value_t = false)]
        check: bool,
        /// Emit a machine-readable JSON report to stdout.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Render every entry of a manifest.
    Batch {
        #[arg(long)]
        manifest: PathBuf,
        /// If set, fail if any output differs; do not write.
        #[arg(long, default_value_t = false)]
        check: bool,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the diagnostics catalog as markdown.
    Diagnostics,
}

#[derive(clap::Args, Debug, Clone)]
struct HeaderArgs {
    /// Copyright year (defaults to the current year).
    #[arg(long)]
    year: Option<i32>,
    /// Banner tag; today's date is used when absent.
    #[arg(long)]
    generator: Option<String>,
    /// Omit the copyright notice and banner.
    #[arg(long, default_value_t = false)]
    no_header: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum OutputStatus {
    Written,
    Unchanged,
    Differs,
}

#[derive(Debug, Serialize)]
struct OutputEntry {
    path: String,
    syntax: String,
    bytes: usize,
    sha256: String,
    status: OutputStatus,
}

#[derive(Debug, Serialize)]
struct Report {
    schema_version: String,
    ok: bool,
    outputs: Vec<OutputEntry>,
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    fn new() -> Self {
        Report {
            schema_version: X07SRCGEN_REPORT_SCHEMA_VERSION.to_string(),
            ok: true,
            outputs: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Keeps `d` in the report and returns it as an error with `context`.
    fn record(&mut self, d: Diagnostic, context: String) -> anyhow::Error {
        self.diagnostics.push(d.clone());
        anyhow::Error::new(d).context(context)
    }
}

fn main() -> Result<()> {
    try_main().map_err(|err| {
        eprintln!("{err:#}");
        err
    })
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Emit {
            r#in,
            out,
            syntax,
            header,
            check,
            json,
        } => {
            let mut report = Report::new();
            let res = run_emit(&r#in, &out, syntax, &header, check, &mut report);
            finish(report, json, res)
        }
        Command::Batch {
            manifest,
            check,
            json,
        } => {
            let mut report = Report::new();
            let res = run_batch(&manifest, check, &mut report);
            finish(report, json, res)
        }
        Command::Diagnostics => {
            print!("{}", render_diagnostics_md());
            Ok(())
        }
    }
}

fn finish(mut report: Report, json: bool, res: Result<()>) -> Result<()> {
    let differs: Vec<&str> = report
        .outputs
        .iter()
        .filter(|o| o.status == OutputStatus::Differs)
        .map(|o| o.path.as_str())
        .collect();
    report.ok = res.is_ok()
        && differs.is_empty()
        && report.diagnostics.iter().all(|d| !d.is_error());
    if json {
        println!("{}", serde_json::to_string(&report)?);
    }
    res?;
    if let Some(path) = differs.first() {
        anyhow::bail!("generated output differs: {path}");
    }
    Ok(())
}

fn run_emit(
    in_path: &Path,
    out_path: &Path,
    syntax: Option<TargetSyntax>,
    header: &HeaderArgs,
    check: bool,
    report: &mut Report,
) -> Result<()> {
    let file_name = out_path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("output path has no file name: {}", out_path.display()))?;
    let syntax = match syntax.or_else(|| TargetSyntax::from_file_name(file_name)) {
        Some(s) => s,
        None => anyhow::bail!(
            "cannot infer syntax from {:?}; pass --syntax c or --syntax toml",
            file_name
        ),
    };

    let bytes =
        std::fs::read(in_path).with_context(|| format!("read input: {}", in_path.display()))?;
    let doc = parse_document(&bytes).map_err(|d| {
        report.record(d, format!("parse input document: {}", in_path.display()))
    })?;

    let mut text = String::new();
    if !header.no_header {
        let year = header.year.unwrap_or_else(current_year);
        FileHeader::for_syntax(syntax, year, header.generator.clone())
            .write(&mut text, file_name)
            .map_err(|d| report.record(d, format!("write header for {file_name}")))?;
    }
    let mut diags: Vec<Diagnostic> = Vec::new();
    let rendered = render_document(&doc, syntax, &mut text, &mut diags);
    for d in &diags {
        eprintln!("warning: {}: {d}", in_path.display());
    }
    report.diagnostics.extend(diags);
    if let Err(d) = rendered {
        return Err(report.record(d, format!("render {}", in_path.display())));
    }

    let status = write_output(out_path, &text, check, report)?;
    report.outputs.push(OutputEntry {
        path: out_path.display().to_string(),
        syntax: syntax.as_str().to_string(),
        bytes: text.len(),
        sha256: sha256_hex(text.as_bytes()),
        status,
    });
    Ok(())
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    schema_version: String,
    entries: Vec<ManifestEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct ManifestEntry {
    input: String,
    out: String,
    #[serde(default)]
    syntax: Option<String>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    generator: Option<String>,
    #[serde(default)]
    no_header: bool,
}

fn run_batch(manifest_path: &Path, check: bool, report: &mut Report) -> Result<()> {
    let bytes = std::fs::read(manifest_path)
        .with_context(|| format!("read manifest: {}", manifest_path.display()))?;
    let m: Manifest = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse manifest JSON: {}", manifest_path.display()))?;
    if m.schema_version.trim() != X07SRCGEN_MANIFEST_SCHEMA_VERSION {
        anyhow::bail!(
            "manifest schema_version mismatch: expected {X07SRCGEN_MANIFEST_SCHEMA_VERSION} got {:?}",
            m.schema_version
        );
    }

    // Relative paths in a manifest are relative to the manifest itself.
    let base = manifest_path.parent().unwrap_or_else(|| Path::new(""));
    for (idx, e) in m.entries.iter().enumerate() {
        let syntax = match e.syntax.as_deref() {
            None => None,
            Some(s) => match TargetSyntax::parse(s) {
                Some(s) => Some(s),
                None => anyhow::bail!(
                    "manifest entry[{idx}] has unknown syntax {:?} (expected 'c' or 'toml')",
                    s
                ),
            },
        };
        let header = HeaderArgs {
            year: e.year,
            generator: e.generator.clone(),
            no_header: e.no_header,
        };
        run_emit(
            &base.join(&e.input),
            &base.join(&e.out),
            syntax,
            &header,
            check,
            report,
        )
        .with_context(|| format!("manifest entry[{idx}]"))?;
    }
    Ok(())
}

fn write_output(
    out_path: &Path,
    src: &str,
    check: bool,
    report: &mut Report,
) -> Result<OutputStatus> {
    if check {
        let cur = std::fs::read_to_string(out_path)
            .with_context(|| format!("read existing output: {}", out_path.display()))?;
        return Ok(if cur == src {
            OutputStatus::Unchanged
        } else {
            OutputStatus::Differs
        });
    }

    let dir = out_path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir: {}", dir.display()))?;
    }
    let file_name = out_path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("output path has no file name: {}", out_path.display()))?;
    let context = || format!("write output: {}", out_path.display());
    let mut sink =
        SourceFile::create(dir, file_name, None).map_err(|d| report.record(d, context()))?;
    let written = std::fmt::Write::write_str(&mut sink, src);
    // finish() carries the underlying I/O error, if any.
    sink.finish().map_err(|d| report.record(d, context()))?;
    written.with_context(context)?;
    Ok(OutputStatus::Written)
}
