//! Structural header detection: heading commands become title/underline
//! pairs, and top-level headings open a new output file.
//!
//! Classification is an ordered list of (pattern → variant) checks returning
//! the first match, kept separate from line generation so the two halves can
//! be tested on their own.
//!
//! This pass runs before the block-mode passes, so it tracks verbatim and
//! tabular spans itself: a line inside either span is literal text and must
//! never be classified, no matter how much it looks like a heading. Pairing
//! errors are not diagnosed here — the block passes own that.

use once_cell::sync::Lazy;
use regex::Regex;

/// Heading levels, top to bottom.
///
/// Underline marker characters are distinct per level so adjacent levels can
/// never collide in the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeadingLevel {
    /// `\chapter` — starts a new output file.
    Chapter,
    /// `\section`
    Section,
    /// `\subsection`
    Subsection,
    /// Full-line bold or `\subsubsection*` used as a run-in heading.
    Pseudo,
}

impl HeadingLevel {
    fn marker(self) -> char {
        match self {
            HeadingLevel::Chapter => '#',
            HeadingLevel::Section => '=',
            HeadingLevel::Subsection => '-',
            HeadingLevel::Pseudo => '.',
        }
    }

    fn starts_file(self) -> bool {
        matches!(self, HeadingLevel::Chapter)
    }
}

/// A recognised heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Heading {
    pub level: HeadingLevel,
    pub title: String,
    /// Trailing text captured after the closing brace (anchors, indices);
    /// appended to the title line but never underlined.
    pub suffix: String,
}

// Chapters and subsections require the trailing comment char the manual
// source consistently carries; `\section` tolerates its absence. The starred
// variants differ the same way the source does.
static RE_CHAPTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\chapter\{([^}]+)\}(.*)%$").unwrap());
static RE_CHAPTER_STAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\chapter\*\{([^}]+)\}(.*)%$").unwrap());
static RE_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\section\{([^}]+)\}(.*)%?$").unwrap());
static RE_SECTION_STAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\section\*\{([^}]+)\}(.*)%?$").unwrap());
static RE_SUBSECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\subsection\{([^}]+)\}(.*)%$").unwrap());
static RE_SUBSECTION_STAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\subsection\*\{([^}]+)\}(.*)$").unwrap());
// The restricted character class keeps ordinary bold spans (which may carry
// arbitrary markup) out of the pseudo-heading rule.
static RE_BOLD_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\\bf\{([-:"'A-Z0-9a-z ]+)\}$"#).unwrap());
static RE_SUBSUBSECTION_STAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\subsubsection\*\{([^}]+)\}(.*)$").unwrap());

/// Classify a line, returning the first matching heading form.
pub(crate) fn classify(line: &str) -> Option<Heading> {
    let table: &[(&Lazy<Regex>, HeadingLevel)] = &[
        (&RE_CHAPTER, HeadingLevel::Chapter),
        (&RE_CHAPTER_STAR, HeadingLevel::Chapter),
        (&RE_SECTION, HeadingLevel::Section),
        (&RE_SECTION_STAR, HeadingLevel::Section),
        (&RE_SUBSECTION, HeadingLevel::Subsection),
        (&RE_SUBSECTION_STAR, HeadingLevel::Subsection),
    ];
    for (re, level) in table {
        if let Some(m) = re.captures(line) {
            return Some(Heading {
                level: *level,
                title: m[1].to_string(),
                suffix: m[2].to_string(),
            });
        }
    }

    if let Some(m) = RE_BOLD_HEADING.captures(line) {
        return Some(Heading {
            level: HeadingLevel::Pseudo,
            title: m[1].to_string(),
            suffix: String::new(),
        });
    }
    if let Some(m) = RE_SUBSUBSECTION_STAR.captures(line) {
        return Some(Heading {
            level: HeadingLevel::Pseudo,
            title: m[1].to_string(),
            suffix: m[2].to_string(),
        });
    }

    None
}

/// Derive the output file name for a chapter title.
fn file_name(title: &str) -> String {
    title.to_lowercase().replace(' ', "-").replace('.', "_")
}

/// Render the file-boundary marker consumed later by the splitter.
pub(crate) fn boundary_marker(name: &str) -> String {
    format!(".. ### Start file \"{name}\"")
}

/// Emit the replacement lines for one heading.
fn emit(h: &Heading) -> Vec<String> {
    let mut out = Vec::with_capacity(3);
    if h.level.starts_file() {
        out.push(boundary_marker(&file_name(&h.title)));
    }
    out.push(format!("{}{}", h.title, h.suffix));
    // Underline covers the title only; the suffix is directive text that the
    // label pass will hoist away.
    let width = h.title.chars().count();
    out.push(h.level.marker().to_string().repeat(width));
    out
}

// Literal-span tracking. Recognition mirrors what the block passes use so
// the two stages agree on where a span starts and ends.
static RE_VERBATIM_BEGIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ *\\begin\{verbatim\}").unwrap());
static RE_VERBATIM_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *\\end\{verbatim\}").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LiteralSpan {
    None,
    Verbatim,
    Tabular,
}

/// Apply header detection to the whole document.
pub fn detect_headers(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut span = LiteralSpan::None;
    for line in &lines {
        match span {
            LiteralSpan::Verbatim => {
                if RE_VERBATIM_END.is_match(line) {
                    span = LiteralSpan::None;
                }
                out.push(line.clone());
            }
            LiteralSpan::Tabular => {
                if line.starts_with("\\end{tabular}") {
                    span = LiteralSpan::None;
                }
                out.push(line.clone());
            }
            LiteralSpan::None => {
                if RE_VERBATIM_BEGIN.is_match(line) {
                    span = LiteralSpan::Verbatim;
                    out.push(line.clone());
                } else if line.starts_with("\\begin{tabular}") {
                    span = LiteralSpan::Tabular;
                    out.push(line.clone());
                } else {
                    match classify(line) {
                        Some(h) => out.extend(emit(&h)),
                        None => out.push(line.clone()),
                    }
                }
            }
        }
    }
    out
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_emits_boundary_and_underline() {
        let out = detect_headers(vec!["\\chapter{Getting Started}%".to_string()]);
        assert_eq!(
            out,
            vec![
                ".. ### Start file \"getting-started\"",
                "Getting Started",
                "###############",
            ]
        );
    }

    #[test]
    fn chapter_title_dots_become_underscores() {
        let out = detect_headers(vec!["\\chapter{Upgrading to 2.0}%".to_string()]);
        assert_eq!(out[0], ".. ### Start file \"upgrading-to-2_0\"");
    }

    #[test]
    fn chapter_without_comment_char_is_plain_text() {
        let line = "\\chapter{Getting Started}";
        assert!(classify(line).is_none());
        assert_eq!(detect_headers(vec![line.to_string()]), vec![line]);
    }

    #[test]
    fn section_tolerates_missing_comment_char() {
        let out = detect_headers(vec!["\\section{Scripting}".to_string()]);
        assert_eq!(out, vec!["Scripting", "========="]);
    }

    #[test]
    fn section_suffix_rides_on_title_line() {
        let out = detect_headers(vec!["\\section{Scripting}\\label{script}%".to_string()]);
        // Greedy capture keeps the trailing comment char; the markup phase
        // strips it after labels are hoisted.
        assert_eq!(out[0], "Scripting\\label{script}%");
        assert_eq!(out[1], "=========");
    }

    #[test]
    fn subsection_and_starred_variants() {
        let out = detect_headers(vec!["\\subsection{Events}%".to_string()]);
        assert_eq!(out, vec!["Events", "------"]);
        let out = detect_headers(vec!["\\subsection*{Events}".to_string()]);
        assert_eq!(out, vec!["Events", "------"]);
    }

    #[test]
    fn full_line_bold_is_pseudo_heading() {
        let out = detect_headers(vec!["\\bf{NOTE: read this}".to_string()]);
        assert_eq!(out, vec!["NOTE: read this", "..............."]);
    }

    #[test]
    fn bold_with_markup_chars_is_not_a_heading() {
        assert!(classify("\\bf{uses *stars*}").is_none());
    }

    #[test]
    fn subsubsection_star_is_pseudo_heading() {
        let out = detect_headers(vec!["\\subsubsection*{Details}".to_string()]);
        assert_eq!(out, vec!["Details", "......."]);
    }

    #[test]
    fn verbatim_interiors_are_never_classified() {
        let out = detect_headers(vec![
            "\\begin{verbatim}".to_string(),
            "\\section{Not a heading}".to_string(),
            "\\end{verbatim}".to_string(),
            "\\section{Real heading}".to_string(),
        ]);
        assert_eq!(
            out,
            vec![
                "\\begin{verbatim}",
                "\\section{Not a heading}",
                "\\end{verbatim}",
                "Real heading",
                "============",
            ]
        );
    }

    #[test]
    fn tabular_interiors_are_never_classified() {
        let out = detect_headers(vec![
            "\\begin{tabular}{|l|l|}".to_string(),
            "\\bf{NOT A HEADING}".to_string(),
            "\\end{tabular}".to_string(),
        ]);
        assert_eq!(
            out,
            vec![
                "\\begin{tabular}{|l|l|}",
                "\\bf{NOT A HEADING}",
                "\\end{tabular}",
            ]
        );
    }

    #[test]
    fn levels_use_distinct_markers() {
        use HeadingLevel::*;
        let markers: Vec<char> = [Chapter, Section, Subsection, Pseudo]
            .iter()
            .map(|l| l.marker())
            .collect();
        let mut dedup = markers.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(markers.len(), dedup.len());
    }
}
