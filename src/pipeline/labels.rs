//! Label/index extraction: anchors and index entries embedded mid-line are
//! hoisted onto their own directive lines.
//!
//! The emitted shape is fixed — blank, anchor, blank, index block, blank,
//! residual line — because converted documents get re-run through the
//! pipeline and a stable shape is what keeps that round trip quiet.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\label\{([^}]+)\}").unwrap());
// The character class is deliberately narrow: it matches what index entries
// actually contain and nothing brace-like, so a malformed entry falls
// through as ordinary text instead of being half-extracted.
static RE_INDEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\index\{([- _:,A-Z()*#0-9a-z.]+)\}").unwrap());

/// Apply label/index extraction to the whole document.
pub fn extract_labels(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    for line in &lines {
        out.extend(extract_line(line));
    }
    out
}

/// Hoist the anchor and index entries out of one line.
fn extract_line(line: &str) -> Vec<String> {
    let mut residual = line.to_string();
    let mut hoisted: Vec<String> = Vec::new();

    // At most one anchor per line; the first match wins.
    if let Some(m) = RE_LABEL.captures(&residual) {
        let whole = m.get(0).unwrap();
        hoisted.push(format!(".. _{}:", &m[1]));
        residual = format!("{}{}", &residual[..whole.start()], &residual[whole.end()..]);
    }

    // Index entries may repeat; commas inside an entry separate sub-terms in
    // the source but would read as entry separators downstream, so they are
    // translated to semicolons.
    let mut entries: Vec<String> = Vec::new();
    while let Some(m) = RE_INDEX.captures(&residual) {
        let whole = m.get(0).unwrap();
        entries.push(format!("   {}", m[1].replace(',', ";")));
        residual = format!("{}{}", &residual[..whole.start()], &residual[whole.end()..]);
    }

    if !entries.is_empty() {
        hoisted.push(String::new());
        hoisted.push(".. index::".to_string());
        hoisted.extend(entries);
    }

    if hoisted.is_empty() {
        return vec![residual];
    }

    let mut out = Vec::with_capacity(hoisted.len() + 3);
    out.push(String::new());
    out.extend(hoisted);
    out.push(String::new());
    out.push(residual);
    out
}

// ── Tests ────────────────────────────────────────────────────────────────────
