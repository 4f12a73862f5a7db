//! Error types for the tex2rst library.
//!
//! Everything here is **fatal**: the pipeline is a deterministic batch
//! transform, so there is nothing sensible to retry. A structural error means
//! the source document is inconsistent (an unmatched `\begin`/`\end` pair, a
//! table row that does not parse) and must be edited before rerunning.
//!
//! Structural variants carry the offending 1-based line number plus a window
//! of the most recently emitted output lines, so the fault can be located in
//! the source without reproducing the run under a debugger.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the tex2rst library.
#[derive(Debug, Error)]
pub enum Tex2RstError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but could not be read (bad encoding, I/O failure).
    #[error("failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Structural errors ─────────────────────────────────────────────────
    /// An end marker appeared while no block of that kind was open.
    #[error(
        "stray '{marker}' end marker at line {line}\n\
         Recently emitted output:\n{context}"
    )]
    StrayEndMarker {
        marker: &'static str,
        line: usize,
        context: String,
    },

    /// A begin marker appeared while a block of the same kind was still open.
    #[error(
        "nested '{marker}' begin marker at line {line} — the previous block was never closed\n\
         Recently emitted output:\n{context}"
    )]
    NestedBeginMarker {
        marker: &'static str,
        line: usize,
        context: String,
    },

    /// Input ended with a block still open.
    #[error("unclosed '{marker}' block at end of input")]
    UnclosedBlock { marker: &'static str },

    /// A tabular column spec is not one of the supported 2/3-column forms.
    #[error("unsupported tabular column spec at line {line}: {spec:?}")]
    UnsupportedColumnSpec { line: usize, spec: String },

    /// A line inside a tabular block did not match the expected row pattern.
    #[error(
        "malformed table row at line {line}: {row:?}\n\
         Recently emitted output:\n{context}"
    )]
    MalformedTableRow {
        line: usize,
        row: String,
        context: String,
    },

    /// A multi-line emphasis token closes on its own line — the single-line
    /// rewriter should already have consumed it.
    #[error("'{token}' closes on its own line {line}, yet survived single-line rewriting: {text:?}")]
    EmphasisClosesOnOpeningLine {
        token: &'static str,
        line: usize,
        text: String,
    },

    /// A multi-line emphasis span did not close within the scan bound.
    #[error("'{token}' span opened at line {line} did not close within {limit} lines")]
    UnclosedEmphasis {
        token: &'static str,
        line: usize,
        limit: usize,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output document.
    #[error("failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Join the last `n` emitted lines into a diagnostic window.
///
/// Mirrors what a human does when a conversion blows up: look at what was
/// just written to figure out where in the source the scanner is.
pub(crate) fn tail_context(emitted: &[String], n: usize) -> String {
    let start = emitted.len().saturating_sub(n);
    emitted[start..].join("\n")
}
