//! CLI binary for tex2rst.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tex2rst::{convert_file, write_documents, ConversionConfig};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a manual into the current directory
  tex2rst manual.tex

  # Convert into a build directory
  tex2rst manual.tex -o build/rst

  # Name the pre-chapter document and allow wider blank runs
  tex2rst --default-document index --blank-allowance 2 manual.tex

  # Structured JSON (documents + stats) on stdout, nothing written
  tex2rst --json manual.tex > conversion.json

  # Debug logging for a conversion that aborts
  tex2rst -v manual.tex

ERRORS:
  The converter aborts on the first structural inconsistency — an unmatched
  \begin/\end pair, a table row that does not parse, an emphasis span that
  never closes. The diagnostic carries the offending line number and the
  last lines of emitted output; fix the source document and rerun.

ENVIRONMENT VARIABLES:
  TEX2RST_OUTPUT_DIR   Default output directory
  TEX2RST_EXTENSION    Default output extension
  RUST_LOG             Override the log filter (tracing env-filter syntax)
"#;

/// Convert LaTeX manual sources to multi-file reStructuredText.
#[derive(Parser, Debug)]
#[command(
    name = "tex2rst",
    version,
    about = "Convert LaTeX manual sources to multi-file reStructuredText",
    long_about = "Convert a linear LaTeX manual into one reStructuredText document per \
chapter, with a generated toctree, ready for Sphinx. The conversion is a fixed sequence \
of deterministic line-rewriting passes; structural inconsistencies in the source abort \
with a diagnostic.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// LaTeX source file.
    input: PathBuf,

    /// Directory to write output documents into.
    #[arg(short, long, env = "TEX2RST_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Name for content preceding the first chapter.
    #[arg(long, default_value = "manual")]
    default_document: String,

    /// Output file extension (without the dot).
    #[arg(long, env = "TEX2RST_EXTENSION", default_value = "rst")]
    extension: String,

    /// Maximum consecutive blank lines kept in output.
    #[arg(long, default_value_t = 1)]
    blank_allowance: usize,

    /// :maxdepth: value for the generated toctree.
    #[arg(long, default_value_t = 2)]
    toc_maxdepth: u32,

    /// Output structured JSON (documents + stats) instead of writing files.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = ConversionConfig::builder()
        .default_document(cli.default_document.as_str())
        .extension(cli.extension.as_str())
        .blank_allowance(cli.blank_allowance)
        .toc_maxdepth(cli.toc_maxdepth)
        .build()
        .context("Invalid configuration")?;

    // ── Convert ──────────────────────────────────────────────────────────
    let output = convert_file(&cli.input, &config).with_context(|| {
        format!("Conversion failed for '{}'", cli.input.display())
    })?;

    // ── JSON mode: print and stop ────────────────────────────────────────
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise output")?
        );
        return Ok(());
    }

    // ── Write documents ──────────────────────────────────────────────────
    let paths = write_documents(&output, &cli.output_dir, &config)
        .with_context(|| format!("Failed to write into '{}'", cli.output_dir.display()))?;

    if !cli.quiet {
        for (doc, path) in output.documents.iter().zip(&paths) {
            eprintln!(
                "  {} {}  {}",
                green("✓"),
                path.display(),
                dim(&format!("{:>5} lines", doc.lines.len())),
            );
        }
        let stats = &output.stats;
        eprintln!(
            "{} {} documents written  {}",
            green("✔"),
            bold(&stats.documents.to_string()),
            dim(&format!(
                "{} → {} lines, {}ms",
                stats.input_lines, stats.output_lines, stats.duration_ms
            )),
        );
        if stats.dropped_documents > 0 {
            eprintln!(
                "{} {} empty document(s) dropped",
                red("⚠"),
                stats.dropped_documents
            );
        }
    }

    Ok(())
}
