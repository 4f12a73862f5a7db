//! Conversion entry points.
//!
//! The driver runs every pass in the fixed pipeline order and nothing else:
//! each pass takes the full line sequence by value and returns a new one, so
//! the data flow reads top to bottom with no shared mutable state. Later
//! passes depend on the normalised output of earlier ones — block markers
//! must never be misidentified as headings, bullets must exist before lists
//! are renumbered — which is why the order lives here in one place.

use crate::config::ConversionConfig;
use crate::error::Tex2RstError;
use crate::output::{ConversionOutput, ConversionStats, OutputDocument};
use crate::pipeline::{
    blocks, emphasis, headers, inline, input, labels, markup, postprocess, split, tables,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Convert in-memory LaTeX source to a set of reStructuredText documents.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Returns `Err(Tex2RstError)` on any structural inconsistency in the
/// source (unmatched block markers, malformed table rows, unbalanced
/// emphasis spans). There is no partial output: the pipeline is
/// deterministic, so failures are fixed by editing the source and rerunning.
pub fn convert(source: &str, config: &ConversionConfig) -> Result<ConversionOutput, Tex2RstError> {
    run_pipeline(input::lines_from_str(source), config)
}

/// Convert a LaTeX source file to a set of reStructuredText documents.
pub fn convert_file(
    path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Tex2RstError> {
    let path = path.as_ref();
    info!("Starting conversion: {}", path.display());
    run_pipeline(input::read_lines(path)?, config)
}

/// Convert a source file and write one output file per surviving document.
///
/// Files are named `<document>.<extension>` under `out_dir` and written
/// atomically (temp file + rename) so a failed run never leaves a partial
/// document behind.
pub fn convert_to_dir(
    path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Tex2RstError> {
    let output = convert_file(path, config)?;
    write_documents(&output, out_dir, config)?;
    Ok(output.stats)
}

/// Write every document in `output` under `out_dir`, returning the paths.
pub fn write_documents(
    output: &ConversionOutput,
    out_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<Vec<PathBuf>, Tex2RstError> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir).map_err(|e| Tex2RstError::OutputWriteFailed {
        path: out_dir.to_path_buf(),
        source: e,
    })?;

    let mut written = Vec::with_capacity(output.documents.len());
    for doc in &output.documents {
        let path = out_dir.join(format!("{}.{}", doc.name, config.extension));
        let tmp = out_dir.join(format!("{}.{}.tmp", doc.name, config.extension));
        write_document(doc, &path, &tmp)?;
        written.push(path);
    }
    Ok(written)
}

fn write_document(doc: &OutputDocument, path: &Path, tmp: &Path) -> Result<(), Tex2RstError> {
    let io_err = |e: std::io::Error| Tex2RstError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    std::fs::write(tmp, doc.render()).map_err(io_err)?;
    std::fs::rename(tmp, path).map_err(io_err)?;
    debug!("Wrote {} ({} lines)", path.display(), doc.lines.len());
    Ok(())
}

/// Run every pass in pipeline order over the line sequence.
fn run_pipeline(
    lines: Vec<String>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Tex2RstError> {
    let start = Instant::now();
    let input_lines = lines.len();
    let ctx = config.context_lines;

    // ── Step 1: inline directives ────────────────────────────────────────
    let lines = inline::rewrite_directives(lines);

    // ── Step 2: structural headers ───────────────────────────────────────
    let lines = headers::detect_headers(lines);

    // ── Step 3: labels and index entries ─────────────────────────────────
    let lines = labels::extract_labels(lines);

    // ── Step 4: single-line markup ───────────────────────────────────────
    let lines = markup::rewrite_markup(lines);

    // ── Step 5: block-mode passes ────────────────────────────────────────
    let lines = blocks::replace_verbatim(lines, ctx)?;
    let lines = blocks::renumber_enumerations(lines, ctx)?;
    let lines = emphasis::spread_emphasis(lines, config)?;
    let lines = tables::reflow_tables(lines, ctx)?;

    // ── Step 6: post-processing ──────────────────────────────────────────
    let lines = postprocess::promote_figures(lines);
    let lines = postprocess::merge_double_colons(lines);
    let lines = postprocess::collapse_blank_lines(lines, config.blank_allowance);

    // ── Step 7: split into documents ─────────────────────────────────────
    let (documents, dropped) = split::split_documents(lines, config);

    let stats = ConversionStats {
        input_lines,
        output_lines: documents.iter().map(|d| d.lines.len()).sum(),
        documents: documents.len(),
        dropped_documents: dropped,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} documents ({} dropped), {} → {} lines, {}ms",
        stats.documents, stats.dropped_documents, stats.input_lines, stats.output_lines,
        stats.duration_ms
    );

    Ok(ConversionOutput { documents, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_document_converts() {
        let out = convert(
            "\\chapter{Intro}%\nSome text.\n",
            &ConversionConfig::default(),
        )
        .unwrap();
        assert_eq!(out.documents.len(), 1);
        assert_eq!(out.documents[0].name, "intro");
        assert_eq!(out.stats.documents, 1);
        assert_eq!(out.stats.input_lines, 2);
    }

    #[test]
    fn structural_error_propagates() {
        let err = convert("\\end{verbatim}\n", &ConversionConfig::default());
        assert!(matches!(err, Err(Tex2RstError::StrayEndMarker { .. })));
    }

    #[test]
    fn empty_source_produces_no_documents() {
        let out = convert("", &ConversionConfig::default()).unwrap();
        assert!(out.documents.is_empty());
        assert_eq!(out.stats.output_lines, 0);
    }
}
