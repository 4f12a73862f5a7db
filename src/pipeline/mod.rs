//! Pipeline stages for LaTeX-to-reStructuredText conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets a stage be reworked
//! without touching its neighbours.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ inline ──▶ headers ──▶ labels ──▶ markup ──▶ blocks/emphasis/tables ──▶ postprocess ──▶ split
//! (lines)  (directives) (titles)   (anchors)  (tokens)   (bracketed spans)           (cleanup)      (documents)
//! ```
//!
//! The order is load-bearing (and fixed):
//!
//! 1. [`input`]   — read the source into right-trimmed lines
//! 2. [`inline`]  — directive-phase rewriting; emits bullets and the toctree
//!    placeholder later passes rely on
//! 3. [`headers`] — heading classification; must precede the block passes so
//!    literal text inside blocks is never read as structure, and precede
//!    [`markup`] so a full-line bold can become a pseudo-heading
//! 4. [`labels`]  — anchor/index hoisting
//! 5. [`markup`]  — single-line token substitution
//! 6. [`blocks`], [`emphasis`], [`tables`] — begin/end-bracketed spans,
//!    rewritten as units under a shared two-state scanner
//! 7. [`postprocess`] — figure promotion, double-colon merge, blank collapse
//! 8. [`split`]   — partition into named documents, expand the toctree

pub mod blocks;
pub mod emphasis;
pub mod headers;
pub mod inline;
pub mod input;
pub mod labels;
pub mod markup;
pub mod postprocess;
pub mod split;
pub mod tables;
