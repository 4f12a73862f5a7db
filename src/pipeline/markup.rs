//! Inline rewriter, markup phase: single-line token substitution.
//!
//! Runs after the header detector and label extractor. The ordering matters
//! twice over: a full-line bold command must still look like a command when
//! the header pass classifies pseudo-headings, and hoisted anchor lines must
//! not be re-scanned for markup.
//!
//! Contract: one line in, one line out. Tokens whose closing brace sits on a
//! later line are left for the multi-line emphasis pass.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_BF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\bf\{([^}]+)\}").unwrap());
static RE_IT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\it\{([^}]+)\}").unwrap());
static RE_HELPREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\helpref\{([^}]+)\}\{([^}]+)\}").unwrap());
// `\helprefn` allows empty display text.
static RE_HELPREFN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\helprefn\{([^}]*)\}\{([^}]+)\}").unwrap());
static RE_VERB_PIPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\verb\|([^|]+)\|").unwrap());
static RE_VERB_BANG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\verb!([^!]+)!").unwrap());
static RE_VERB_CARET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\verb\^([^^]+)\^").unwrap());
static RE_VERB_DOLLAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\verb\$([^$]+)\$").unwrap());

/// Apply single-line markup substitution to the whole document.
pub fn rewrite_markup(lines: Vec<String>) -> Vec<String> {
    lines.into_iter().map(|l| rewrite_line(&l)).collect()
}

/// Rewrite one line.
fn rewrite_line(line: &str) -> String {
    // Full-line size wrappers unwrap to their bare content and take no
    // further substitution.
    if let Some(inner) = line
        .strip_prefix("\\Large{")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        return inner.to_string();
    }
    if let Some(inner) = line
        .strip_prefix("\\large{")
        .and_then(|rest| rest.strip_suffix("}\\hrule"))
    {
        return inner.to_string();
    }

    let line = line.strip_suffix('%').unwrap_or(line);

    let line = RE_BF.replace_all(line, |c: &Captures<'_>| {
        format!("**{}**", pad_emphasis(&c[1]))
    });
    let line = RE_IT.replace_all(&line, |c: &Captures<'_>| {
        format!("*{}*", pad_emphasis(&c[1]))
    });

    let line = RE_HELPREF.replace_all(&line, ":ref:`$1 <$2>`");
    let line = RE_HELPREFN.replace_all(&line, ":ref:`$1 <$2>`");

    let line = RE_VERB_PIPE.replace_all(&line, "``$1``");
    let line = RE_VERB_BANG.replace_all(&line, "``$1``");
    let line = RE_VERB_CARET.replace_all(&line, "``$1``");
    let line = RE_VERB_DOLLAR.replace_all(&line, "``$1``");

    line.into_owned()
}

/// Trim emphasis content and keep a star at either edge from fusing with
/// the emphasis markers into `***`.
fn pad_emphasis(content: &str) -> String {
    let trimmed = content.trim();
    let mut s = String::with_capacity(trimmed.len() + 2);
    if trimmed.starts_with('*') {
        s.push(' ');
    }
    s.push_str(trimmed);
    if trimmed.ends_with('*') {
        s.push(' ');
    }
    s
}

// ── Tests ────────────────────────────────────────────────────────────────────
