//! Multi-line emphasis: bold and italic commands whose closing brace sits on
//! a later line.
//!
//! The single-line markup phase has already consumed every span that opens
//! and closes on one line, so by the time this pass runs, a start token with
//! a `}` later on the same line is a pipeline inconsistency rather than an
//! input variant — it aborts instead of guessing.
//!
//! The forward scan for the closing brace is bounded. An unclosed span would
//! otherwise be reported at the far end of the document; the bound turns it
//! into an error pointing near the opening token.

use crate::config::ConversionConfig;
use crate::error::Tex2RstError;

/// Spread italic, then bold, emphasis across line boundaries.
pub fn spread_emphasis(
    lines: Vec<String>,
    config: &ConversionConfig,
) -> Result<Vec<String>, Tex2RstError> {
    let lines = spread_token(lines, "\\it{", "*", config.emphasis_span_limit)?;
    spread_token(lines, "\\bf{", "**", config.emphasis_span_limit)
}

fn spread_token(
    lines: Vec<String>,
    token: &'static str,
    emphasis: &str,
    limit: usize,
) -> Result<Vec<String>, Tex2RstError> {
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        let Some(j) = line.find(token) else {
            out.push(line.clone());
            i += 1;
            continue;
        };

        if line[j..].contains('}') {
            return Err(Tex2RstError::EmphasisClosesOnOpeningLine {
                token,
                line: i + 1,
                text: line.clone(),
            });
        }

        // Find the first following line carrying a closing brace.
        let mut k = 1;
        loop {
            match lines.get(i + k) {
                Some(l) if l.contains('}') => break,
                Some(_) => {
                    k += 1;
                    if k >= limit {
                        return Err(Tex2RstError::UnclosedEmphasis {
                            token,
                            line: i + 1,
                            limit,
                        });
                    }
                }
                None => {
                    return Err(Tex2RstError::UnclosedEmphasis {
                        token,
                        line: i + 1,
                        limit,
                    });
                }
            }
        }

        let close = &lines[i + k];
        let n = close.find('}').unwrap();

        out.push(format!("{}{}{}", &line[..j], emphasis, &line[j + token.len()..]));
        for p in 1..k {
            out.push(lines[i + p].clone());
        }
        out.push(format!("{}{}{}", &close[..n], emphasis, &close[n + 1..]));
        i += k + 1;
    }

    Ok(out)
}

// ── Tests ────────────────────────────────────────────────────────────────────
