//! Tabular reflow: LaTeX `tabular` environments become grid tables with
//! `=` separator rules and alignment-aware cell padding.
//!
//! The pass has two halves. A pre-scan merges rows that were wrapped across
//! physical lines back into one logical line per row; the block scan proper
//! then parses the column spec, accumulates rows, and renders the table when
//! the end marker arrives.
//!
//! Row merging is a heuristic, not a parser: a `\row{` line absorbs
//! following lines until it ends with the balanced `} }` suffix. Cell text
//! containing braces can defeat it; the malformed-row error downstream is
//! what surfaces such documents.

use crate::error::{tail_context, Tex2RstError};
use crate::pipeline::blocks::{run_block_pass, BlockRewriter};
use once_cell::sync::Lazy;
use regex::Regex;

/// Column alignment codes from the tabular spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn from_code(code: &str) -> Align {
        match code {
            "l" => Align::Left,
            "c" => Align::Center,
            _ => Align::Right,
        }
    }
}

// ── Row merging ──────────────────────────────────────────────────────────────

static RE_ROW_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *\\row\{").unwrap());
static RE_ROW_CLOSED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\} *\}$").unwrap());
static RE_TABULAR_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *\\end\{tabular\}").unwrap());

/// Join physically wrapped rows into one logical line per row.
fn merge_rows(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if out.is_empty()
            || RE_ROW_START.is_match(&line)
            || RE_TABULAR_END.is_match(&line)
        {
            out.push(line);
            continue;
        }
        let last = out.last().unwrap();
        if RE_ROW_START.is_match(last) && !RE_ROW_CLOSED.is_match(last) {
            let merged = format!("{} {}", last, line.trim_start());
            *out.last_mut().unwrap() = merged;
            continue;
        }
        out.push(line);
    }
    out
}

// ── Block scan ───────────────────────────────────────────────────────────────

// Two- and three-column specs are the only ones the manual source uses; a
// fourth column would need a new row pattern anyway, so anything else is
// rejected loudly rather than guessed at.
static RE_BEGIN_2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\begin\{tabular\}\{\|([clr])\|([clr])\|\}$").unwrap());
static RE_BEGIN_2_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\begin\{tabular\}\{\|([clr])@\{ \}([clr])\|\}$").unwrap());
static RE_BEGIN_3: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\\begin\{tabular\}\{\|([clr])\|([clr])\|([clr])\|\}$").unwrap());

static RE_ROW_2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ *\\row\{ *\{(.*)\} *& *\{(.*)\} *\}$").unwrap());
static RE_ROW_3: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ *\\row\{ *\{(.*)\} *& *\{(.*)\} *& *\{(.*)\} *\}$").unwrap());

struct TabularRewriter {
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl TabularRewriter {
    fn new() -> Self {
        Self {
            aligns: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn separator(&self, widths: &[usize]) -> String {
        widths
            .iter()
            .map(|w| "=".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths = vec![0usize; self.aligns.len()];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }
}

impl BlockRewriter for TabularRewriter {
    fn marker(&self) -> &'static str {
        "tabular"
    }

    fn try_begin(
        &mut self,
        line: &str,
        line_no: usize,
        _out: &mut Vec<String>,
    ) -> Result<bool, Tex2RstError> {
        if !line.starts_with("\\begin{tabular}") {
            return Ok(false);
        }
        let codes: Vec<String> = if let Some(m) = RE_BEGIN_2.captures(line) {
            vec![m[1].to_string(), m[2].to_string()]
        } else if let Some(m) = RE_BEGIN_2_GAP.captures(line) {
            vec![m[1].to_string(), m[2].to_string()]
        } else if let Some(m) = RE_BEGIN_3.captures(line) {
            vec![m[1].to_string(), m[2].to_string(), m[3].to_string()]
        } else {
            return Err(Tex2RstError::UnsupportedColumnSpec {
                line: line_no,
                spec: line.to_string(),
            });
        };
        self.aligns = codes.iter().map(|c| Align::from_code(c)).collect();
        self.rows.clear();
        // The begin marker itself leaves no trace in the output.
        Ok(true)
    }

    fn is_stray_end(&self, line: &str) -> bool {
        line.starts_with("\\end{tabular}")
    }

    fn is_nested_begin(&self, line: &str) -> bool {
        line.starts_with("\\begin{tabular}")
    }

    fn try_end(&mut self, line: &str, out: &mut Vec<String>) -> bool {
        if line != "\\end{tabular}" {
            return false;
        }
        let widths = self.widths();
        let sep = self.separator(&widths);

        out.push(String::new());
        out.push(sep.clone());
        for (ridx, row) in self.rows.iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .zip(&self.aligns)
                .zip(&widths)
                .map(|((cell, align), width)| pad_cell(cell, *align, *width))
                .collect();
            out.push(cells.join("  "));
            // Row 0 is the header row.
            if ridx == 0 {
                out.push(sep.clone());
            }
        }
        out.push(sep);
        out.push(String::new());

        self.rows.clear();
        true
    }

    fn interior(
        &mut self,
        line: &str,
        line_no: usize,
        out: &mut Vec<String>,
        context_lines: usize,
    ) -> Result<(), Tex2RstError> {
        let re = if self.aligns.len() == 2 {
            &RE_ROW_2
        } else {
            &RE_ROW_3
        };
        let Some(m) = re.captures(line) else {
            return Err(Tex2RstError::MalformedTableRow {
                line: line_no,
                row: line.to_string(),
                context: tail_context(out, context_lines),
            });
        };
        self.rows.push(
            (1..=self.aligns.len())
                .map(|i| m[i].trim().to_string())
                .collect(),
        );
        Ok(())
    }
}

/// Pad one cell to its column width according to the column's alignment.
fn pad_cell(cell: &str, align: Align, width: usize) -> String {
    let spare = width.saturating_sub(cell.chars().count());
    match align {
        Align::Left => format!("{cell}{}", " ".repeat(spare)),
        Align::Right => format!("{}{cell}", " ".repeat(spare)),
        Align::Center => {
            // Longer half of an odd remainder goes right.
            let left = spare / 2;
            let right = spare - left;
            format!("{}{cell}{}", " ".repeat(left), " ".repeat(right))
        }
    }
}

/// Reflow tabular environments into grid tables.
pub fn reflow_tables(
    lines: Vec<String>,
    context_lines: usize,
) -> Result<Vec<String>, Tex2RstError> {
    let lines = merge_rows(lines);
    run_block_pass(lines, &mut TabularRewriter::new(), context_lines)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn merge_joins_wrapped_rows() {
        let out = merge_rows(doc(&[
            "\\begin{tabular}{|l|l|}",
            "\\row{ {a} &",
            "   {b} }",
            "\\end{tabular}",
        ]));
        assert_eq!(out[1], "\\row{ {a} & {b} }");
    }

    #[test]
    fn merge_leaves_closed_rows_alone() {
        let input = doc(&["\\row{ {a} & {b} }", "plain text"]);
        assert_eq!(merge_rows(input.clone()), input);
    }

    #[test]
    fn merge_absorbs_multiple_continuations() {
        let out = merge_rows(doc(&["\\row{ {a} &", "{long", "cell} }"]));
        assert_eq!(out, doc(&["\\row{ {a} & {long cell} }"]));
    }

    #[test]
    fn mixed_alignment_table_reflow() {
        // l/c/r columns, two rows — widths [4,2,3], separators after the
        // header row and around the table.
        let out = reflow_tables(
            doc(&[
                "\\begin{tabular}{|l|c|r|}",
                "\\row{ {a} & {bb} & {ccc} }",
                "\\row{ {dddd} & {e} & {f} }",
                "\\end{tabular}",
            ]),
            20,
        )
        .unwrap();
        assert_eq!(
            out,
            doc(&[
                "",
                "====  ==  ===",
                "a     bb  ccc",
                "====  ==  ===",
                "dddd  e     f",
                "====  ==  ===",
                "",
            ])
        );
    }

    #[test]
    fn center_padding_favours_the_right() {
        assert_eq!(pad_cell("e", Align::Center, 2), "e ");
        assert_eq!(pad_cell("e", Align::Center, 4), " e  ");
        assert_eq!(pad_cell("ab", Align::Center, 5), " ab  ");
    }

    #[test]
    fn left_and_right_padding() {
        assert_eq!(pad_cell("x", Align::Left, 3), "x  ");
        assert_eq!(pad_cell("x", Align::Right, 3), "  x");
    }

    #[test]
    fn two_column_gap_spec() {
        let out = reflow_tables(
            doc(&[
                "\\begin{tabular}{|l@{ }l|}",
                "\\row{ {k} & {v} }",
                "\\end{tabular}",
            ]),
            20,
        )
        .unwrap();
        assert!(out.contains(&"k  v".to_string()));
    }

    #[test]
    fn unsupported_spec_is_fatal() {
        let err = reflow_tables(
            doc(&["\\begin{tabular}{|l|l|l|l|}", "\\end{tabular}"]),
            20,
        );
        assert!(matches!(
            err,
            Err(Tex2RstError::UnsupportedColumnSpec { line: 1, .. })
        ));
    }

    #[test]
    fn malformed_row_is_fatal() {
        let err = reflow_tables(
            doc(&[
                "\\begin{tabular}{|l|l|}",
                "\\row{ not a pair }",
                "\\end{tabular}",
            ]),
            20,
        );
        assert!(matches!(
            err,
            Err(Tex2RstError::MalformedTableRow { line: 2, .. })
        ));
    }

    #[test]
    fn stray_tabular_end_is_fatal() {
        let err = reflow_tables(doc(&["text", "\\end{tabular}"]), 20);
        assert!(matches!(err, Err(Tex2RstError::StrayEndMarker { .. })));
    }

    #[test]
    fn cells_are_trimmed_before_width_measurement() {
        let out = reflow_tables(
            doc(&[
                "\\begin{tabular}{|l|l|}",
                "\\row{ {  a  } & {bb} }",
                "\\end{tabular}",
            ]),
            20,
        )
        .unwrap();
        assert!(out.contains(&"a  bb".to_string()));
    }

    #[test]
    fn table_free_documents_pass_through() {
        let input = doc(&["no", "tables", "here"]);
        assert_eq!(reflow_tables(input.clone(), 20).unwrap(), input);
    }
}
