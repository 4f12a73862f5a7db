//! Block-mode scanning: a reusable two-state machine shared by every pass
//! that rewrites a begin/end-bracketed span as a unit.
//!
//! Each concrete pass supplies marker recognition and per-block emit logic
//! through [`BlockRewriter`]; the [`run_block_pass`] driver owns the state
//! machine and the three structural invariants every block pass shares:
//!
//! * an end marker while `Outside` is fatal,
//! * a begin marker while `Inside` is fatal,
//! * the machine must be back `Outside` when input ends.
//!
//! This module also hosts the two simplest rewriters (verbatim and
//! enumerated list); the tabular rewriter lives in [`crate::pipeline::tables`]
//! because its row handling dwarfs the scanning part.

use crate::error::{tail_context, Tex2RstError};
use crate::pipeline::inline::BULLET;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pass-local scanning state. Exists only during one pass's traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Outside,
    Inside,
}

/// One block-mode pass's marker recognition and emit logic.
pub(crate) trait BlockRewriter {
    /// Short marker name used in diagnostics ("verbatim", "tabular", ...).
    fn marker(&self) -> &'static str;

    /// Called while `Outside`. If `line` opens a block, push the begin
    /// replacement onto `out` and return `true`.
    fn try_begin(
        &mut self,
        line: &str,
        line_no: usize,
        out: &mut Vec<String>,
    ) -> Result<bool, Tex2RstError>;

    /// Called while `Outside`: loose end-marker test for stray-end detection.
    fn is_stray_end(&self, line: &str) -> bool;

    /// Called while `Inside`: begin-marker test for nesting detection.
    fn is_nested_begin(&self, line: &str) -> bool;

    /// Called while `Inside`. If `line` closes the block, push the end
    /// replacement onto `out` and return `true`.
    fn try_end(&mut self, line: &str, out: &mut Vec<String>) -> bool;

    /// Called while `Inside` for non-marker lines.
    fn interior(
        &mut self,
        line: &str,
        line_no: usize,
        out: &mut Vec<String>,
        context_lines: usize,
    ) -> Result<(), Tex2RstError>;
}

/// Fold one rewriter over the line sequence.
pub(crate) fn run_block_pass<R: BlockRewriter>(
    lines: Vec<String>,
    rw: &mut R,
    context_lines: usize,
) -> Result<Vec<String>, Tex2RstError> {
    let mut out = Vec::with_capacity(lines.len());
    let mut state = BlockState::Outside;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        match state {
            BlockState::Outside => {
                if rw.is_stray_end(line) {
                    return Err(Tex2RstError::StrayEndMarker {
                        marker: rw.marker(),
                        line: line_no,
                        context: tail_context(&out, context_lines),
                    });
                }
                if rw.try_begin(line, line_no, &mut out)? {
                    state = BlockState::Inside;
                } else {
                    out.push(line.clone());
                }
            }
            BlockState::Inside => {
                if rw.is_nested_begin(line) {
                    return Err(Tex2RstError::NestedBeginMarker {
                        marker: rw.marker(),
                        line: line_no,
                        context: tail_context(&out, context_lines),
                    });
                }
                if rw.try_end(line, &mut out) {
                    state = BlockState::Outside;
                } else {
                    rw.interior(line, line_no, &mut out, context_lines)?;
                }
            }
        }
    }

    if state == BlockState::Inside {
        return Err(Tex2RstError::UnclosedBlock {
            marker: rw.marker(),
        });
    }
    Ok(out)
}

// ── Verbatim ─────────────────────────────────────────────────────────────────

static RE_VERBATIM_BEGIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ *\\begin\{verbatim\}").unwrap());
static RE_VERBATIM_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *\\end\{verbatim\}").unwrap());

/// The literal-block indent applied to verbatim interiors.
const LITERAL_INDENT: &str = "   ";

struct VerbatimRewriter;

impl BlockRewriter for VerbatimRewriter {
    fn marker(&self) -> &'static str {
        "verbatim"
    }

    fn try_begin(
        &mut self,
        line: &str,
        _line_no: usize,
        out: &mut Vec<String>,
    ) -> Result<bool, Tex2RstError> {
        if !RE_VERBATIM_BEGIN.is_match(line) {
            return Ok(false);
        }
        out.push(String::new());
        out.push("::".to_string());
        out.push(String::new());
        Ok(true)
    }

    fn is_stray_end(&self, line: &str) -> bool {
        line.contains("\\end{verbatim}")
    }

    fn is_nested_begin(&self, line: &str) -> bool {
        line.contains("\\begin{verbatim}")
    }

    fn try_end(&mut self, line: &str, out: &mut Vec<String>) -> bool {
        if !RE_VERBATIM_END.is_match(line) {
            return false;
        }
        out.push(String::new());
        true
    }

    fn interior(
        &mut self,
        line: &str,
        _line_no: usize,
        out: &mut Vec<String>,
        _context_lines: usize,
    ) -> Result<(), Tex2RstError> {
        // Interior lines are literal text; indentation is the only change.
        out.push(format!("{LITERAL_INDENT}{line}"));
        Ok(())
    }
}

/// Rewrite verbatim environments into indented literal blocks.
pub fn replace_verbatim(
    lines: Vec<String>,
    context_lines: usize,
) -> Result<Vec<String>, Tex2RstError> {
    run_block_pass(lines, &mut VerbatimRewriter, context_lines)
}

// ── Enumerated lists ─────────────────────────────────────────────────────────

struct EnumerateRewriter {
    counter: usize,
}

impl BlockRewriter for EnumerateRewriter {
    fn marker(&self) -> &'static str {
        "enumerate"
    }

    fn try_begin(
        &mut self,
        line: &str,
        _line_no: usize,
        out: &mut Vec<String>,
    ) -> Result<bool, Tex2RstError> {
        if line != "\\begin{enumerate}" {
            return Ok(false);
        }
        // Counter restarts for every list regardless of earlier lists.
        self.counter = 1;
        out.push(String::new());
        Ok(true)
    }

    fn is_stray_end(&self, line: &str) -> bool {
        line.starts_with("\\end{enumerate}")
    }

    fn is_nested_begin(&self, line: &str) -> bool {
        line.starts_with("\\begin{enumerate}")
    }

    fn try_end(&mut self, line: &str, out: &mut Vec<String>) -> bool {
        if line != "\\end{enumerate}" {
            return false;
        }
        out.push(String::new());
        true
    }

    fn interior(
        &mut self,
        line: &str,
        _line_no: usize,
        out: &mut Vec<String>,
        _context_lines: usize,
    ) -> Result<(), Tex2RstError> {
        // Items arrive as bullets, already rewritten by the inline phase.
        if let Some(rest) = line.strip_prefix(BULLET) {
            out.push(format!("{}. {}", self.counter, rest.trim_start()));
            self.counter += 1;
        } else if line.is_empty() || line.starts_with(LITERAL_INDENT) {
            out.push(line.to_string());
        } else {
            out.push(format!("{LITERAL_INDENT}{}", line.trim_start()));
        }
        Ok(())
    }
}

/// Renumber enumerated lists, indenting continuation lines.
pub fn renumber_enumerations(
    lines: Vec<String>,
    context_lines: usize,
) -> Result<Vec<String>, Tex2RstError> {
    run_block_pass(lines, &mut EnumerateRewriter { counter: 1 }, context_lines)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn verbatim_block_is_indented() {
        let out = replace_verbatim(
            doc(&["before", "\\begin{verbatim}", "code here", "\\end{verbatim}", "after"]),
            20,
        )
        .unwrap();
        assert_eq!(
            out,
            doc(&["before", "", "::", "", "   code here", "", "after"])
        );
    }

    #[test]
    fn verbatim_protects_heading_lookalikes() {
        let out = replace_verbatim(
            doc(&["\\begin{verbatim}", "\\section{Not a heading}%", "\\end{verbatim}"]),
            20,
        )
        .unwrap();
        assert!(out.contains(&"   \\section{Not a heading}%".to_string()));
    }

    #[test]
    fn verbatim_markers_tolerate_indentation() {
        let out = replace_verbatim(
            doc(&["  \\begin{verbatim}", "x", "  \\end{verbatim}"]),
            20,
        )
        .unwrap();
        assert_eq!(out, doc(&["", "::", "", "   x", ""]));
    }

    #[test]
    fn stray_verbatim_end_is_fatal() {
        let err = replace_verbatim(doc(&["text", "\\end{verbatim}"]), 20);
        assert!(matches!(err, Err(Tex2RstError::StrayEndMarker { line: 2, .. })));
    }

    #[test]
    fn nested_verbatim_begin_is_fatal() {
        let err = replace_verbatim(
            doc(&["\\begin{verbatim}", "\\begin{verbatim}", "\\end{verbatim}"]),
            20,
        );
        assert!(matches!(
            err,
            Err(Tex2RstError::NestedBeginMarker { line: 2, .. })
        ));
    }

    #[test]
    fn unclosed_verbatim_is_fatal() {
        let err = replace_verbatim(doc(&["\\begin{verbatim}", "code"]), 20);
        assert!(matches!(err, Err(Tex2RstError::UnclosedBlock { .. })));
    }

    #[test]
    fn documents_without_markers_pass_through() {
        let input = doc(&["a", "", "b"]);
        assert_eq!(replace_verbatim(input.clone(), 20).unwrap(), input);
        assert_eq!(renumber_enumerations(input.clone(), 20).unwrap(), input);
    }

    #[test]
    fn enumeration_numbers_items() {
        let out = renumber_enumerations(
            doc(&["\\begin{enumerate}", "* first", "* second", "\\end{enumerate}"]),
            20,
        )
        .unwrap();
        assert_eq!(out, doc(&["", "1. first", "2. second", ""]));
    }

    #[test]
    fn enumeration_counter_restarts_per_list() {
        let out = renumber_enumerations(
            doc(&[
                "\\begin{enumerate}",
                "* a",
                "* b",
                "\\end{enumerate}",
                "\\begin{enumerate}",
                "* c",
                "\\end{enumerate}",
            ]),
            20,
        )
        .unwrap();
        assert!(out.contains(&"2. b".to_string()));
        assert!(out.contains(&"1. c".to_string()));
    }

    #[test]
    fn enumeration_indents_continuation_lines() {
        let out = renumber_enumerations(
            doc(&["\\begin{enumerate}", "* item", "continuation", "\\end{enumerate}"]),
            20,
        )
        .unwrap();
        assert_eq!(out, doc(&["", "1. item", "   continuation", ""]));
    }

    #[test]
    fn enumeration_keeps_blank_interior_lines_blank() {
        let out = renumber_enumerations(
            doc(&["\\begin{enumerate}", "* a", "", "* b", "\\end{enumerate}"]),
            20,
        )
        .unwrap();
        assert_eq!(out, doc(&["", "1. a", "", "2. b", ""]));
    }

    #[test]
    fn stray_enumerate_end_is_fatal() {
        let err = renumber_enumerations(doc(&["\\end{enumerate}"]), 20);
        assert!(matches!(err, Err(Tex2RstError::StrayEndMarker { line: 1, .. })));
    }
}
