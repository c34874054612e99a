use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "splice")]
#[command(version)]
#[command(
    about = "Decoder for SPLICE drum-machine pattern files.",
    long_about = None,
    after_help = "Examples:\n  splice decode pattern_1.splice\n  splice decode pattern_1.splice -o pattern_1.txt\n  splice show 'patterns/*.splice' --format json --pretty"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a .splice file and print its pattern report.
    #[command(alias = "show")]
    Decode {
        /// Path (or glob pattern matching one file) to a .splice file
        input: PathBuf,

        /// Output path
        #[arg(short = 'o', long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write to stdout (default when no output path is given)
        #[arg(long)]
        stdout: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable pattern report
    Text,
    /// Decoded structure as JSON
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            input,
            output,
            stdout,
            format,
            pretty,
            quiet,
        } => cmd_decode(input, output, stdout, format, pretty, quiet),
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

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn hinted(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            message: format!("{:#}", err),
            hint: None,
        }
    }
}

fn cmd_decode(
    input: PathBuf,
    output: Option<PathBuf>,
    stdout: bool,
    format: OutputFormat,
    pretty: bool,
    quiet: bool,
) -> Result<(), CliError> {
    if pretty && format != OutputFormat::Json {
        return Err(CliError::hinted(
            "--pretty only applies to JSON output",
            "add --format json or drop --pretty",
        ));
    }
    let input = locate_input(&input)?;
    let output = output.filter(|_| !stdout);
    if let Some(output) = &output {
        ensure_output_is_not_input(&input, output)?;
    }

    debug!(input = %input.display(), ?format, "decoding");
    let file = splice_core::decode_file(&input).map_err(|err| {
        CliError::hinted(
            format!("failed to decode {}: {}", input.display(), err),
            decode_hint(&err),
        )
    })?;
    let text = serialize_output(&file, format, pretty)?;

    match output {
        None => print!("{}", text),
        Some(output) => {
            write_output(&output, &text)?;
            if !quiet {
                eprintln!("OK: output written -> {}", output.display());
            }
        }
    }
    Ok(())
}

fn serialize_output(
    file: &splice_core::SpliceFile,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, CliError> {
    let json = match format {
        OutputFormat::Text => return Ok(splice_core::render(file)),
        OutputFormat::Json if pretty => serde_json::to_string_pretty(file),
        OutputFormat::Json => serde_json::to_string(file),
    };
    Ok(json.context("JSON serialization failed")?)
}

fn write_output(output: &Path, text: &str) -> Result<(), CliError> {
    let parent = output.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }
    fs::write(output, text)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;
    Ok(())
}

fn decode_hint(err: &splice_core::SourceError) -> &'static str {
    use splice_core::{SourceError, SpliceError};

    match err {
        SourceError::Io(_) => "check that the file is readable",
        SourceError::Format(SpliceError::InvalidMagic { .. }) => {
            "the file does not start with the SPLICE signature"
        }
        SourceError::Format(SpliceError::TruncatedInput { .. }) => {
            "the file is shorter than its declared payload; it may be truncated"
        }
        SourceError::Format(_) => "the payload is malformed; the file may be corrupt",
    }
}

/// Resolve the `INPUT` argument to one existing `.splice` file.
fn locate_input(input: &Path) -> Result<PathBuf, CliError> {
    let raw = input.to_string_lossy();
    let path = if raw.contains(['*', '?', '[']) {
        single_glob_match(&raw)?
    } else {
        input.to_path_buf()
    };

    if !path.is_file() {
        let what = if path.exists() {
            "input is not a file"
        } else {
            "input file not found"
        };
        return Err(CliError::hinted(
            format!("{what}: {}", path.display()),
            "pass the path of a .splice file",
        ));
    }
    let is_splice = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("splice"));
    if !is_splice {
        return Err(CliError::hinted(
            format!("unsupported input format '{}'", path.display()),
            "expected a .splice file",
        ));
    }
    Ok(path)
}

fn single_glob_match(pattern: &str) -> Result<PathBuf, CliError> {
    let invalid = |detail: String| {
        CliError::hinted(
            format!("invalid input pattern '{pattern}'"),
            format!("pattern error: {detail}"),
        )
    };
    let mut files = Vec::new();
    for entry in glob(pattern).map_err(|err| invalid(err.msg.to_string()))? {
        let path = entry.map_err(|err| invalid(err.to_string()))?;
        if path.is_file() {
            files.push(path);
        }
    }

    match files.len() {
        0 => Err(CliError::hinted(
            format!("no files match pattern '{pattern}'"),
            "check the path or quote the pattern",
        )),
        1 => Ok(files.remove(0)),
        count => {
            let mut shown: Vec<String> =
                files.iter().take(3).map(|p| p.display().to_string()).collect();
            if count > shown.len() {
                shown.push("...".to_string());
            }
            Err(CliError::hinted(
                format!(
                    "multiple files match pattern '{pattern}' ({count} matches): {}",
                    shown.join(", ")
                ),
                "pass a single pattern file, or run once per file",
            ))
        }
    }
}

fn ensure_output_is_not_input(input: &Path, output: &Path) -> Result<(), CliError> {
    let same = match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(input), Ok(output)) => input == output,
        // A missing output file cannot alias the input.
        _ => false,
    };
    if same {
        return Err(CliError::hinted(
            format!("output path must differ from input: {}", output.display()),
            "choose a different output path",
        ));
    }
    Ok(())
}
