use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use ndn_mgmt_core::dataset::{DatasetError, DatasetKind};
use ndn_mgmt_core::tlv::{TlvReader, layout};
use ndn_mgmt_core::{DEFAULT_GENERATED_AT, Report, build_report};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("NDNMGMT_BUILD_COMMIT"),
    ", built ",
    env!("NDNMGMT_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  ndnmgmt dataset decode faces.bin --kind faces -o faces.json\n  ndnmgmt dataset decode fib.hex --kind fib --stdout --pretty\n  ndnmgmt tlv inspect status.bin";

#[derive(Parser, Debug)]
#[command(name = "ndnmgmt")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Offline decoder for NFD management datasets (NDN TLV).",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on management dataset payloads.
    Dataset {
        #[command(subcommand)]
        command: DatasetCommands,
    },
    /// Low-level TLV tools.
    Tlv {
        #[command(subcommand)]
        command: TlvCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DatasetCommands {
    /// Decode a dataset payload and generate a versioned JSON report.
    #[command(after_help = EXAMPLES)]
    Decode {
        /// Path to the payload (binary, or hex text)
        input: PathBuf,

        /// Dataset kind: status, faces, channels, fib, rib, strategy-choice
        #[arg(short = 'k', long)]
        kind: String,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Treat the input as hex text (implied by a .hex extension)
        #[arg(long)]
        hex: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TlvCommands {
    /// List top-level elements as `offset type length`.
    Inspect {
        /// Path to the payload (binary, or hex text)
        input: PathBuf,

        /// Treat the input as hex text (implied by a .hex extension)
        #[arg(long)]
        hex: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Dataset { command } => match command {
            DatasetCommands::Decode {
                input,
                kind,
                report,
                stdout,
                hex,
                pretty,
                compact,
                quiet,
            } => cmd_dataset_decode(DecodeArgs {
                input,
                kind,
                report,
                stdout,
                hex,
                pretty,
                compact,
                quiet,
            }),
        },
        Commands::Tlv { command } => match command {
            TlvCommands::Inspect { input, hex } => cmd_tlv_inspect(input, hex),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<DatasetError> for CliError {
    fn from(err: DatasetError) -> Self {
        let hint = match &err {
            DatasetError::UnknownKind { .. } => {
                "expected one of: status, faces, channels, fib, rib, strategy-choice"
            }
            DatasetError::Record { .. } => "check that --kind matches the payload",
        };
        CliError::new(err.to_string(), Some(hint.to_string()))
    }
}

struct DecodeArgs {
    input: PathBuf,
    kind: String,
    report: Option<PathBuf>,
    stdout: bool,
    hex: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
}

fn cmd_dataset_decode(args: DecodeArgs) -> Result<(), CliError> {
    let kind: DatasetKind = args.kind.parse()?;
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;

    let report_path = if args.stdout {
        None
    } else {
        Some(args.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };
    if let Some(report_path) = report_path.as_ref() {
        ensure_distinct_paths(&resolved_input, report_path)?;
    }

    let payload = read_payload(&resolved_input, args.hex)?;
    tracing::debug!(
        input = %resolved_input.display(),
        bytes = payload.len(),
        %kind,
        "decoding dataset payload"
    );
    let mut rep = build_report(&resolved_input.display().to_string(), &payload, kind)?;
    rep.generated_at = now_rfc3339();
    let json = serialize_report(&rep, args.pretty, args.compact)?;

    let Some(report_path) = report_path else {
        print!("{}", json);
        return Ok(());
    };

    if let Some(parent) = report_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&report_path, json)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;

    if !args.quiet {
        eprintln!(
            "OK: {} {} records -> {}",
            rep.dataset.records,
            kind,
            report_path.display()
        );
    }
    Ok(())
}

fn cmd_tlv_inspect(input: PathBuf, hex: bool) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let payload = read_payload(&resolved_input, hex)?;

    let mut reader = TlvReader::new(&payload);
    let mut lines = Vec::new();
    while !reader.is_at_end() {
        let offset = reader.position();
        let header = reader.skip_element().map_err(|err| {
            CliError::new(
                format!("malformed TLV at offset {offset}: {err}"),
                Some("input is not a sequence of NDN TLV elements".to_string()),
            )
        })?;
        let marker = if layout::is_critical(header.tlv_type) {
            " critical"
        } else {
            ""
        };
        lines.push(format!(
            "{offset} 0x{:x} {}{marker}",
            header.tlv_type, header.length
        ));
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| DEFAULT_GENERATED_AT.to_string())
}

fn read_payload(input: &Path, hex: bool) -> Result<Vec<u8>, CliError> {
    let is_hex = hex || has_extension(input, "hex");
    if !is_hex {
        return fs::read(input)
            .with_context(|| format!("Failed to read input file: {}", input.display()))
            .map_err(Into::into);
    }
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&digits).map_err(|err| {
        CliError::new(
            format!("invalid hex input '{}': {}", input.display(), err),
            Some("hex input must be pairs of hex digits; whitespace is ignored".to_string()),
        )
    })
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}

fn ensure_distinct_paths(input: &Path, report_path: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_dir = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent),
        _ => fs::canonicalize("."),
    };
    // a missing output directory is created later and cannot hold the input
    let Ok(report_dir) = report_dir else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a dataset payload file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a dataset payload file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single payload file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
