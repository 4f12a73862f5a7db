//! Post-processing: deterministic cleanup after the structural passes.
//!
//! Three rules run here, in order: figure promotion (before blank handling so
//! a caption's position relative to its image is still meaningful), the
//! double-colon merge (which deletes blank lines between a paragraph and its
//! literal block), and last the blank-line collapse, which owns whitespace
//! policy for the whole pipeline — earlier passes pad freely and rely on it.

use once_cell::sync::Lazy;
use regex::Regex;

// ── Rule 1: figure promotion ─────────────────────────────────────────────────

// The escaped form the help-file preprocessor uses for embedded image tags.
static RE_FIGURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^LTSSimg src="([^"]*)" GTSS"#).unwrap());

/// Replace embedded image tags with figure directives, pulling a following
/// non-blank line in as the caption.
pub fn promote_figures(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let Some(m) = RE_FIGURE.captures(&lines[i]) else {
            out.push(lines[i].clone());
            i += 1;
            continue;
        };
        out.push(String::new());
        out.push(format!(".. figure:: {}", &m[1]));
        i += 1;
        if let Some(caption) = lines.get(i) {
            if !caption.is_empty() {
                out.push(String::new());
                out.push(format!("   {caption}"));
                i += 1;
            }
        }
    }
    out
}

// ── Rule 2: double-colon merge ───────────────────────────────────────────────

/// Merge a standalone `::` opener backward into the preceding paragraph.
///
/// `text:` + `::` is the reStructuredText double-colon idiom `text::`; a
/// paragraph already ending in `::` absorbs the opener without duplication.
/// With no preceding paragraph to attach to, the opener stands alone.
pub fn merge_double_colons(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if line != "::" {
            out.push(line);
            continue;
        }
        // Nearest preceding non-blank line, if any.
        let mut idx = out.len();
        while idx > 0 && out[idx - 1].is_empty() {
            idx -= 1;
        }
        if idx > 0 {
            let last = &out[idx - 1];
            if last.ends_with("::") {
                out.truncate(idx);
                continue;
            }
            if last.ends_with(':') {
                out.truncate(idx);
                out.last_mut().unwrap().push(':');
                continue;
            }
        }
        out.push(line);
    }
    out
}

// ── Rule 3: blank-line collapse ──────────────────────────────────────────────

/// Right-trim every line and collapse blank runs longer than `allowance`.
pub fn collapse_blank_lines(lines: Vec<String>, allowance: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut run = 0usize;
    for line in lines {
        let line = line.trim_end().to_string();
        if line.is_empty() {
            if run >= allowance {
                continue;
            }
            run += 1;
        } else {
            run = 0;
        }
        out.push(line);
    }
    out
}

// ── Tests ────────────────────────────────────────────────────────────────────
