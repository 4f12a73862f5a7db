//! Output types: the converted document set and run statistics.

use serde::{Deserialize, Serialize};

/// One converted reStructuredText document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDocument {
    /// Document name as carved out of the boundary markers (no extension).
    pub name: String,
    /// Final line sequence, already trimmed of leading/trailing blanks.
    pub lines: Vec<String>,
}

impl OutputDocument {
    /// Render the document as a single string, one trailing newline per line.
    pub fn render(&self) -> String {
        let mut s = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            s.push_str(line);
            s.push('\n');
        }
        s
    }
}

/// The full result of a conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Surviving documents in first-seen order.
    pub documents: Vec<OutputDocument>,
    /// Summary statistics for the run.
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// Look up a document by name.
    pub fn document(&self, name: &str) -> Option<&OutputDocument> {
        self.documents.iter().find(|d| d.name == name)
    }
}

/// Statistics describing a conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Lines read from the source document.
    pub input_lines: usize,
    /// Lines across all surviving output documents.
    pub output_lines: usize,
    /// Number of surviving output documents.
    pub documents: usize,
    /// Documents dropped because they trimmed to nothing.
    pub dropped_documents: usize,
    /// Wall-clock duration of the conversion in milliseconds.
    pub duration_ms: u64,
}
