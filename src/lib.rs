//! # tex2rst
//!
//! Convert a linear LaTeX manual source into a set of reStructuredText
//! documents suitable for Sphinx.
//!
//! ## Why this crate?
//!
//! Hand-maintained manuals written against an old LaTeX help toolchain carry
//! their structure in commands (`\chapter`, `\begin{verbatim}`,
//! `\helpref{...}{...}`) that no reStructuredText tool understands. Instead
//! of parsing LaTeX properly — overkill for a document that only ever uses a
//! fixed command vocabulary — this crate runs a fixed sequence of
//! line-rewriting passes, each small enough to verify by eye, and splits the
//! result into one document per chapter.
//!
//! ## Pipeline Overview
//!
//! ```text
//! .tex source
//!  │
//!  ├─ 1. Input    read into right-trimmed lines
//!  ├─ 2. Inline   boilerplate removal, bullets, metadata fields, links
//!  ├─ 3. Headers  titles + underlines, file-boundary markers
//!  ├─ 4. Labels   anchors and index entries hoisted onto their own lines
//!  ├─ 5. Markup   single-line bold/italic/literal/cross-reference tokens
//!  ├─ 6. Blocks   verbatim, enumerations, multi-line emphasis, tables
//!  ├─ 7. Polish   figures, double colons, blank-line collapse
//!  └─ 8. Split    named documents + generated table of contents
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tex2rst::{convert_to_dir, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let stats = convert_to_dir("manual.tex", "out", &config)?;
//!     eprintln!("{} documents, {} lines", stats.documents, stats.output_lines);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `tex2rst` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! tex2rst = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_file, convert_to_dir, write_documents};
pub use error::Tex2RstError;
pub use output::{ConversionOutput, ConversionStats, OutputDocument};
