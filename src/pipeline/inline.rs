//! Inline rewriter, directive phase: per-line rules applied before any
//! structural pass.
//!
//! Contract: one line in, zero or more lines out. Rules are evaluated in
//! priority order and the first match wins; a line matching no rule passes
//! through unchanged, which makes the pass idempotent on text it does not
//! recognise.
//!
//! Boilerplate directives are replaced by a single empty line rather than
//! removed outright — the blank-line collapse pass at the end of the
//! pipeline owns whitespace policy, not this one.

use once_cell::sync::Lazy;
use regex::Regex;

/// The table-of-contents placeholder. Emitted here, expanded by the file
/// splitter once the set of surviving documents is known.
pub(crate) const TOC_PLACEHOLDER: &str = ".. toctree::";

/// Bullet prefix emitted for list items. The enumerated-list block pass
/// recognises the same prefix when renumbering items.
pub(crate) const BULLET: &str = "* ";

/// Apply the directive-phase rules to the whole document.
pub fn rewrite_directives(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    for line in &lines {
        out.extend(rewrite_line(line));
    }
    out
}

// ── Rule 1: boilerplate deletion ─────────────────────────────────────────────

/// Prologue and page-furniture commands with no reStructuredText counterpart.
const DELETED_PREFIXES: &[&str] = &[
    "\\documentstyle[",
    "%\\input{",
    "\\newcommand{",
    "\\parskip=",
    "\\parindent=",
    "\\backgroundcolour{",
    "\\maketitle",
    "\\makeindex",
    "\\bibliographystyle",
    "\\pagestyle{",
    "\\pagenumbering",
    "\\setheader{",
    "\\setfooter{",
    "\\begin{document}",
    "\\end{document}",
];

/// Itemize brackets vanish entirely; their items carry the structure.
const DELETED_EXACT: &[&str] = &[
    "\\begin{itemize}",
    "\\begin{itemize}\\itemsep=0pt",
    "\\begin{itemize}\\itemsep=10pt",
    "\\end{itemize}",
];

// ── Rules 2-4: metadata and link regexes ─────────────────────────────────────

static RE_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\\title\{(.*)\}%$").unwrap());
static RE_AUTHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\\author\{(.*)\}%$").unwrap());

static RE_URLREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)\\urlref\{(.*)\}\{(.*)\}$").unwrap());
// Variant with a trailing period after the closing brace; the period is not
// carried into the output.
static RE_URLREF_DOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)\\urlref\{(.*)\}\{(.*)\}\.$").unwrap());

/// Rewrite one line into its replacement lines.
fn rewrite_line(line: &str) -> Vec<String> {
    if DELETED_PREFIXES.iter().any(|p| line.starts_with(p)) {
        return vec![String::new()];
    }

    if line.starts_with("\\tableofcontents") {
        return vec![String::new(), TOC_PLACEHOLDER.to_string()];
    }

    if line == "\\fcol{red}{Example:}" {
        return vec!["Example:".to_string()];
    }

    if DELETED_EXACT.contains(&line) {
        return vec![String::new()];
    }

    if let Some(rest) = line.strip_prefix("\\item ") {
        return vec![format!("{BULLET}{rest}")];
    }

    if let Some(m) = RE_TITLE.captures(line) {
        return vec![format!(":title: {}", &m[1])];
    }
    if let Some(m) = RE_AUTHOR.captures(line) {
        return vec![format!(":author: {}", &m[1])];
    }

    // Try the plain form first; it fails when the line ends in a period
    // because the closing brace is then not the last character.
    if let Some(m) = RE_URLREF.captures(line) {
        return vec![format_urlref(&m[1], &m[2], &m[3])];
    }
    if let Some(m) = RE_URLREF_DOT.captures(line) {
        return vec![format_urlref(&m[1], &m[2], &m[3])];
    }

    vec![line.to_string()]
}

/// Render a labelled link, forcing an explicit scheme on the target.
fn format_urlref(prefix: &str, text: &str, target: &str) -> String {
    let target = if target.starts_with("http:") {
        target.to_string()
    } else {
        format!("http:{target}")
    };
    format!("{prefix}:ref:`{text} <{target}>`")
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn one(line: &str) -> Vec<String> {
        rewrite_line(line)
    }

    #[test]
    fn boilerplate_becomes_blank() {
        assert_eq!(one("\\maketitle"), vec![""]);
        assert_eq!(one("\\documentstyle[11pt]{report}"), vec![""]);
        assert_eq!(one("\\setheader{{\\bf left}}{}{}{}{}{{\\bf right}}"), vec![""]);
        assert_eq!(one("\\begin{document}"), vec![""]);
    }

    #[test]
    fn itemize_brackets_vanish() {
        assert_eq!(one("\\begin{itemize}"), vec![""]);
        assert_eq!(one("\\begin{itemize}\\itemsep=0pt"), vec![""]);
        assert_eq!(one("\\end{itemize}"), vec![""]);
    }

    #[test]
    fn toc_expands_to_placeholder() {
        assert_eq!(one("\\tableofcontents"), vec!["", ".. toctree::"]);
    }

    #[test]
    fn item_becomes_bullet() {
        assert_eq!(one("\\item first thing"), vec!["* first thing"]);
    }

    #[test]
    fn title_author_fields() {
        assert_eq!(one("\\title{My Manual}%"), vec![":title: My Manual"]);
        assert_eq!(one("\\author{Someone}%"), vec![":author: Someone"]);
    }

    #[test]
    fn title_without_comment_char_passes_through() {
        assert_eq!(one("\\title{My Manual}"), vec!["\\title{My Manual}"]);
    }

    #[test]
    fn urlref_gains_scheme() {
        assert_eq!(
            one("see \\urlref{the site}{//example.com}"),
            vec!["see :ref:`the site <http://example.com>`"]
        );
    }

    #[test]
    fn urlref_keeps_existing_scheme() {
        assert_eq!(
            one("\\urlref{x}{http://example.com}"),
            vec![":ref:`x <http://example.com>`"]
        );
    }

    #[test]
    fn urlref_trailing_period_dropped() {
        assert_eq!(
            one("see \\urlref{the site}{//example.com}."),
            vec!["see :ref:`the site <http://example.com>`"]
        );
    }

    #[test]
    fn unrecognised_line_is_untouched() {
        assert_eq!(one("plain prose."), vec!["plain prose."]);
        // Idempotence: the output of a rule never matches another rule.
        assert_eq!(one(":title: My Manual"), vec![":title: My Manual"]);
        assert_eq!(one("* first thing"), vec!["* first thing"]);
    }

    #[test]
    fn whole_document_helper_flattens() {
        let doc = vec!["\\maketitle".to_string(), "text".to_string()];
        assert_eq!(rewrite_directives(doc), vec!["", "text"]);
    }
}
