//! File splitting: partition the final line sequence into named documents
//! and expand the table-of-contents placeholder.
//!
//! The "current document" during the walk is an explicit accumulator value,
//! not module state: the fold carries (current name, name order, name → lines)
//! and nothing outlives the call.

use crate::config::ConversionConfig;
use crate::output::OutputDocument;
use crate::pipeline::inline::TOC_PLACEHOLDER;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

static RE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\.\. ### Start file "(.*)"$"#).unwrap());

/// Split the line sequence into trimmed, non-empty documents.
///
/// Returns the surviving documents in first-seen order plus the number of
/// documents dropped for trimming down to nothing.
pub fn split_documents(
    lines: Vec<String>,
    config: &ConversionConfig,
) -> (Vec<OutputDocument>, usize) {
    let mut order: Vec<String> = Vec::new();
    let mut accum: HashMap<String, Vec<String>> = HashMap::new();
    let mut current = config.default_document.clone();

    for line in lines {
        if let Some(m) = RE_BOUNDARY.captures(&line) {
            // The marker switches context and is never copied to output.
            current = m[1].to_string();
            continue;
        }
        accum
            .entry(current.clone())
            .or_insert_with(|| {
                order.push(current.clone());
                Vec::new()
            })
            .push(line);
    }

    let mut documents = Vec::with_capacity(order.len());
    let mut dropped = 0usize;
    for name in order {
        let mut doc_lines = accum.remove(&name).unwrap_or_default();
        while doc_lines.last().is_some_and(|l| l.is_empty()) {
            doc_lines.pop();
        }
        let lead = doc_lines
            .iter()
            .position(|l| !l.is_empty())
            .unwrap_or(doc_lines.len());
        doc_lines.drain(..lead);

        if doc_lines.is_empty() {
            debug!("Dropping empty document '{name}'");
            dropped += 1;
            continue;
        }
        documents.push(OutputDocument {
            name,
            lines: doc_lines,
        });
    }

    expand_toc(&mut documents, config);
    (documents, dropped)
}

/// Replace the toctree placeholder with references to sibling documents.
///
/// Runs after empty documents have been dropped so the listing can never
/// point at a document that does not exist; the hosting document itself is
/// excluded too.
fn expand_toc(documents: &mut [OutputDocument], config: &ConversionConfig) {
    let names: Vec<String> = documents.iter().map(|d| d.name.clone()).collect();

    for doc in documents.iter_mut() {
        if !doc.lines.iter().any(|l| l == TOC_PLACEHOLDER) {
            continue;
        }
        let mut expanded = Vec::with_capacity(doc.lines.len() + names.len() + 3);
        for line in &doc.lines {
            if line != TOC_PLACEHOLDER {
                expanded.push(line.clone());
                continue;
            }
            expanded.push(TOC_PLACEHOLDER.to_string());
            expanded.push(format!("   :maxdepth: {}", config.toc_maxdepth));
            expanded.push(String::new());
            for name in names.iter().filter(|n| **n != doc.name) {
                expanded.push(format!("   {name}"));
            }
            expanded.push(String::new());
        }
        doc.lines = expanded;
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
