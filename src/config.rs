//! Configuration types for LaTeX-to-reStructuredText conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to serialise a run's settings for logging and to diff two runs
//! to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A many-field constructor is unreadable and breaks on every new field. The
//! builder lets callers set only what they care about and rely on documented
//! defaults for the rest.

use crate::error::Tex2RstError;
use serde::{Deserialize, Serialize};

/// Configuration for one LaTeX-to-reStructuredText conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use tex2rst::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .default_document("handbook")
///     .blank_allowance(2)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Name for content that precedes the first file-boundary marker. Default: `"manual"`.
    ///
    /// The preamble of a manual (title/author fields, the table-of-contents
    /// directive) sits before the first chapter and therefore before the
    /// first boundary marker; it still has to land somewhere.
    pub default_document: String,

    /// File extension for written output documents, without the dot. Default: `"rst"`.
    pub extension: String,

    /// Maximum consecutive blank lines surviving the collapse pass. Default: 1.
    ///
    /// Every structural pass pads its output with blank lines for readability,
    /// and adjacent passes frequently pad the same spot twice. One trailing
    /// collapse keeps the result tidy without each pass having to care.
    pub blank_allowance: usize,

    /// `:maxdepth:` value emitted into the generated toctree. Default: 2.
    pub toc_maxdepth: u32,

    /// Maximum number of lines a multi-line emphasis span may cover. Default: 20.
    ///
    /// An unclosed `\bf{` would otherwise swallow the rest of the document
    /// before failing; bounding the scan turns a far-away missing brace into
    /// an error that points near the opening token.
    pub emphasis_span_limit: usize,

    /// Number of recently emitted lines included in structural diagnostics. Default: 20.
    pub context_lines: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            default_document: "manual".to_string(),
            extension: "rst".to_string(),
            blank_allowance: 1,
            toc_maxdepth: 2,
            emphasis_span_limit: 20,
            context_lines: 20,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn default_document(mut self, name: impl Into<String>) -> Self {
        self.config.default_document = name.into();
        self
    }

    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.config.extension = ext.into();
        self
    }

    pub fn blank_allowance(mut self, n: usize) -> Self {
        self.config.blank_allowance = n;
        self
    }

    pub fn toc_maxdepth(mut self, depth: u32) -> Self {
        self.config.toc_maxdepth = depth.max(1);
        self
    }

    pub fn emphasis_span_limit(mut self, n: usize) -> Self {
        self.config.emphasis_span_limit = n;
        self
    }

    pub fn context_lines(mut self, n: usize) -> Self {
        self.config.context_lines = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Tex2RstError> {
        let c = &self.config;
        if c.default_document.trim().is_empty() {
            return Err(Tex2RstError::InvalidConfig(
                "default document name must not be empty".into(),
            ));
        }
        if c.extension.trim().is_empty() || c.extension.starts_with('.') {
            return Err(Tex2RstError::InvalidConfig(format!(
                "extension must be non-empty and given without the dot, got {:?}",
                c.extension
            )));
        }
        if c.emphasis_span_limit == 0 {
            return Err(Tex2RstError::InvalidConfig(
                "emphasis span limit must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
