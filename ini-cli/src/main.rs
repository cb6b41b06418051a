//! ini-check
//!
//! Scans one INI input (a file or standard input) and reports whether it is
//! valid, cut short, or corrupt. The exit status carries the verdict so the
//! tool can drive fuzzers and shell scripts.

mod verdict;

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use ini_core::{parse_bytes, BufferMode, Config, Dialect, Entry, Outcome, OwnedEntry};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::verdict::{physical_lines, Verdict};

/// Largest input accepted, in bytes. Larger input exits like an
/// incomplete one (255), as the fuzzing harness this tool replaces did.
const MAX_INPUT: usize = 100 * 1024;

#[derive(Error, Debug)]
#[error("input exceeds {limit} bytes")]
struct InputTooLarge {
    limit: usize,
}

#[derive(Parser, Debug)]
#[command(name = "ini-check", version)]
#[command(about = "Check an INI file and report the first bad line", long_about = None)]
struct Cli {
    /// Input file; standard input when omitted
    input: Option<PathBuf>,

    /// Option preset (default, inih, python, strict)
    #[arg(short, long, default_value = "default")]
    dialect: String,

    /// Stop at the first malformed or rejected line
    #[arg(long)]
    stop_on_first_error: bool,

    /// Treat indented lines as ordinary lines
    #[arg(long)]
    no_multiline: bool,

    /// Do not strip inline comments from values
    #[arg(long)]
    no_inline_comments: bool,

    /// Keep a leading UTF-8 byte order mark as data
    #[arg(long)]
    no_bom: bool,

    /// Line buffer strategy
    #[arg(long, value_enum)]
    buffer: Option<BufferArg>,

    /// Hard cap on one line's length in bytes
    #[arg(long)]
    max_line_length: Option<usize>,

    /// Largest input accepted, in bytes
    #[arg(long, default_value_t = MAX_INPUT)]
    max_input: usize,

    /// Print every entry as it is delivered
    #[arg(short, long)]
    events: bool,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BufferArg {
    Fixed,
    Growable,
}

impl From<BufferArg> for BufferMode {
    fn from(arg: BufferArg) -> Self {
        match arg {
            BufferArg::Fixed => BufferMode::Fixed,
            BufferArg::Growable => BufferMode::Growable,
        }
    }
}

impl Cli {
    /// Dialect preset with command-line overrides applied.
    fn config(&self) -> Result<Config> {
        let mut config = Dialect::from_name(&self.dialect)?.config();
        if self.stop_on_first_error {
            config = config.stop_on_first_error(true);
        }
        if self.no_multiline {
            config = config.multiline(false);
        }
        if self.no_inline_comments {
            config = config.inline_comments(false);
        }
        if self.no_bom {
            config = config.allow_bom(false);
        }
        if let Some(mode) = self.buffer {
            config = config.buffer(mode.into());
        }
        if let Some(max) = self.max_line_length {
            let initial = config.initial_line_capacity.min(max);
            config = config.max_line_length(max).initial_line_capacity(initial);
        }
        config.validate().context("invalid parser options")?;
        Ok(config)
    }

    fn input_name(&self) -> String {
        self.input
            .as_deref()
            .map_or_else(|| "-".to_string(), |p| p.display().to_string())
    }
}

#[derive(Debug, Serialize)]
struct Report {
    input: String,
    verdict: Verdict,
    code: i32,
    total_lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<OwnedEntry>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(verdict) => ExitCode::from(verdict.exit_code()),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(failure_exit_code(&e))
        }
    }
}

/// Exit status for a run that produced no report.
fn failure_exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<InputTooLarge>() {
        Some(_) => Verdict::Incomplete.exit_code(),
        None => Verdict::Incorrect.exit_code(),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

fn run(cli: &Cli) -> Result<Verdict> {
    let config = cli.config()?;
    let input = match &cli.input {
        Some(path) => read_file(path, cli.max_input)?,
        None => read_limited(io::stdin().lock(), cli.max_input).context("reading standard input")?,
    };
    debug!(bytes = input.len(), dialect = %cli.dialect, "scanning");

    let report = check(&input, &config, cli);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report).context("writing report")?;
        writeln!(out)?;
    } else {
        write_text(&mut out, &report, cli.events)?;
    }
    Ok(report.verdict)
}

/// Scan `input` and build the report. Fatal scan errors count as incorrect.
fn check(input: &[u8], config: &Config, cli: &Cli) -> Report {
    let total_lines = physical_lines(input);
    let mut entries = Vec::new();
    let result = parse_bytes(
        input,
        |e: &Entry<'_>| {
            if cli.events || cli.json {
                entries.push(OwnedEntry::from(e));
            }
            true
        },
        config,
    );

    let (verdict, code, outcome, error) = match result {
        Ok(outcome) => (
            Verdict::from_outcome(&outcome, total_lines),
            outcome.code(),
            Some(outcome),
            None,
        ),
        Err(e) => {
            error!(code = e.code(), "scan failed: {}", e);
            (Verdict::Incorrect, e.code(), None, Some(e.to_string()))
        }
    };

    Report {
        input: cli.input_name(),
        verdict,
        code,
        total_lines,
        outcome,
        error,
        entries,
    }
}

fn write_text(out: &mut impl Write, report: &Report, events: bool) -> io::Result<()> {
    if events {
        for entry in &report.entries {
            let op = match entry.kind {
                ini_core::EntryKind::Pair => "=",
                ini_core::EntryKind::Continuation => "+=",
            };
            writeln!(
                out,
                "{:>5}: [{}] {} {} {}",
                entry.line, entry.section, entry.name, op, entry.value
            )?;
        }
    }
    writeln!(out, "lineno {}/{}", report.code, report.total_lines)?;
    if let Some(e) = &report.error {
        writeln!(out, "error: {}", e)?;
    }
    writeln!(out, "{}: {}", report.input, report.verdict)
}

fn read_file(path: &Path, limit: usize) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_limited(file, limit).with_context(|| format!("reading {}", path.display()))
}

/// Read everything, failing if more than `limit` bytes arrive.
fn read_limited(reader: impl Read, limit: usize) -> Result<Vec<u8>> {
    let mut input = Vec::new();
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut input)?;
    if input.len() > limit {
        return Err(InputTooLarge { limit }.into());
    }
    Ok(input)
}
