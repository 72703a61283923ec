//! Inline span tokenizer.
//!
//! Scans one logical line left to right and produces an ordered sequence of
//! styled runs. At each position an ordered list of matchers is tried
//! (bold+italic, bold, italic, strikethrough, inline code, link); the first
//! match wins and its content is taken literally, so emphasis does not nest.
//! Everything that matches nothing accumulates into plain runs.

/// A contiguous span of text sharing one inline style.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

impl InlineRun {
    pub fn plain(text: impl Into<String>) -> Self {
        InlineRun { text: text.into(), bold: false, italic: false, code: false }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        InlineRun { text: text.into(), bold: true, italic: false, code: false }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        InlineRun { text: text.into(), bold: false, italic: true, code: false }
    }

    pub fn bold_italic(text: impl Into<String>) -> Self {
        InlineRun { text: text.into(), bold: true, italic: true, code: false }
    }

    pub fn code(text: impl Into<String>) -> Self {
        InlineRun { text: text.into(), bold: false, italic: false, code: true }
    }
}

enum Piece {
    Run(InlineRun),
    /// Matched syntax whose content degrades to plain text (strikethrough
    /// bodies, link labels).
    Literal(String),
}

/// Match `marker …body… marker` at the start of `rest`. The body must be
/// non-empty; an unpaired marker is left for the literal fallback.
fn match_pair(rest: &str, marker: &str) -> Option<(String, usize)> {
    let inner = rest.strip_prefix(marker)?;
    let end = inner.find(marker)?;
    if end == 0 {
        return None;
    }
    Some((inner[..end].to_string(), marker.len() * 2 + end))
}

/// Match `[label](url)` at the start of `rest`. The destination is consumed
/// but dropped: the paginated output carries the visible label only.
fn match_link(rest: &str) -> Option<(String, usize)> {
    let inner = rest.strip_prefix('[')?;
    let close = inner.find(']')?;
    if close == 0 {
        return None;
    }
    let after = &inner[close + 1..];
    let url = after.strip_prefix('(')?;
    let url_end = url.find(')')?;
    Some((inner[..close].to_string(), 1 + close + 2 + url_end + 1))
}

/// Try every matcher at the current position, highest priority first.
fn match_at(rest: &str) -> Option<(Piece, usize)> {
    if let Some((body, len)) = match_pair(rest, "***") {
        return Some((Piece::Run(InlineRun::bold_italic(body)), len));
    }
    if let Some((body, len)) = match_pair(rest, "**") {
        return Some((Piece::Run(InlineRun::bold(body)), len));
    }
    // Single-asterisk matching is permissive; "3 * 4 * 5" will emphasize.
    if let Some((body, len)) = match_pair(rest, "*") {
        return Some((Piece::Run(InlineRun::italic(body)), len));
    }
    if let Some((body, len)) = match_pair(rest, "~~") {
        return Some((Piece::Literal(body), len));
    }
    if let Some((body, len)) = match_pair(rest, "`") {
        return Some((Piece::Run(InlineRun::code(body)), len));
    }
    if let Some((label, len)) = match_link(rest) {
        return Some((Piece::Literal(label), len));
    }
    None
}

fn flush_plain(runs: &mut Vec<InlineRun>, plain: &mut String) {
    if !plain.is_empty() {
        runs.push(InlineRun::plain(std::mem::take(plain)));
    }
}

/// Tokenize one logical line into styled runs. Total: any input produces a
/// (possibly empty) run sequence, and unmatched markers fall through as
/// literal text.
pub fn tokenize(line: &str) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        match match_at(rest) {
            Some((Piece::Run(run), consumed)) => {
                flush_plain(&mut runs, &mut plain);
                runs.push(run);
                rest = &rest[consumed..];
            }
            Some((Piece::Literal(text), consumed)) => {
                plain.push_str(&text);
                rest = &rest[consumed..];
            }
            None => {
                let ch = match rest.chars().next() {
                    Some(c) => c,
                    None => break,
                };
                plain.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    flush_plain(&mut runs, &mut plain);
    runs
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn plain_text_round_trips_as_single_run(s in "[a-zA-Z0-9 .,;:!?-]{1,300}") {
            // no markdown syntax: exactly one plain run equal to the input
            let runs = tokenize(&s);
            prop_assert_eq!(runs, vec![InlineRun::plain(s)]);
        }

        #[test]
        fn tokenize_never_panics(s in "\\PC{0,500}") {
            let _ = tokenize(&s);
        }

        #[test]
        fn output_never_longer_than_input(s in "\\PC{0,500}") {
            let runs = tokenize(&s);
            let total: usize = runs.iter().map(|r| r.text.len()).sum();
            prop_assert!(total <= s.len());
        }

        #[test]
        fn bold_body_survives(body in "[a-zA-Z0-9 ]{1,80}") {
            let line = format!("**{}**", body);
            let runs = tokenize(&line);
            prop_assert_eq!(runs, vec![InlineRun::bold(body)]);
        }
    }
}
