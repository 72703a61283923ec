//! Block classifier and line-oriented parser state.
//!
//! Walks the document line by line, classifying each line into a block kind
//! and threading explicit state across lines: the open code fence, its
//! accumulated lines, and the per-level ordered-list counters. Ordered
//! numbering is derived from that state, not from the literal source digits,
//! so `1. / 2.` restarts at 1 after a blank line.

use log::debug;
use regex::Regex;

/// A classified unit of document structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Bullet { level: u8, text: String },
    Ordered { level: u8, number: u32, text: String },
    Quote { text: String },
    CodeBlock { language: String, lines: Vec<String> },
    Rule,
    Blank,
}

/// Per-level ordered-list counters. Truncated when indentation decreases,
/// cleared on blank lines and non-list content.
#[derive(Debug, Default)]
struct ListState {
    ordered_counters: Vec<u32>,
}

impl ListState {
    fn reset(&mut self) {
        self.ordered_counters.clear();
    }

    /// Advance and return the counter for an item at `level`.
    fn next_ordered(&mut self, level: usize) -> u32 {
        self.ordered_counters.truncate(level + 1);
        while self.ordered_counters.len() < level {
            self.ordered_counters.push(1);
        }
        if self.ordered_counters.len() == level + 1 {
            let counter = &mut self.ordered_counters[level];
            *counter += 1;
            *counter
        } else {
            self.ordered_counters.push(1);
            1
        }
    }
}

/// All state the line driver threads through the walk.
#[derive(Debug, Default)]
struct ParserState {
    in_code_block: bool,
    code_language: String,
    code_lines: Vec<String>,
    list: ListState,
}

/// Nesting level from leading whitespace: characters / 2, floored.
fn indent_level(line: &str) -> u8 {
    let indent = line.len() - line.trim_start().len();
    (indent / 2).min(u8::MAX as usize) as u8
}

/// Classify raw markdown into an ordered block sequence.
///
/// A fence marker seen while a fence is open always closes it; a fence left
/// open at end of input never flushes, so its accumulated lines are dropped.
pub fn parse_markdown(markdown: &str) -> Vec<Block> {
    let ordered_re = Regex::new(r"^\d+\.\s+(.+)$").unwrap();
    let mut blocks = Vec::new();
    let mut state = ParserState::default();

    for line in markdown.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            if state.in_code_block {
                blocks.push(Block::CodeBlock {
                    language: std::mem::take(&mut state.code_language),
                    lines: std::mem::take(&mut state.code_lines),
                });
                state.in_code_block = false;
            } else {
                state.in_code_block = true;
                state.code_language = trimmed[3..].trim().to_string();
            }
            state.list.reset();
            continue;
        }

        if state.in_code_block {
            state.code_lines.push(line.to_string());
            continue;
        }

        if trimmed.is_empty() {
            state.list.reset();
            blocks.push(Block::Blank);
            continue;
        }

        if trimmed == "---" || trimmed == "***" {
            state.list.reset();
            blocks.push(Block::Rule);
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("### ") {
            state.list.reset();
            blocks.push(Block::Heading { level: 3, text: rest.trim().to_string() });
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("## ") {
            state.list.reset();
            blocks.push(Block::Heading { level: 2, text: rest.trim().to_string() });
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("# ") {
            state.list.reset();
            blocks.push(Block::Heading { level: 1, text: rest.trim().to_string() });
            continue;
        }

        if trimmed.starts_with("- ") || trimmed.starts_with("* ") || trimmed.starts_with("+ ") {
            blocks.push(Block::Bullet {
                level: indent_level(line),
                text: trimmed[2..].to_string(),
            });
            continue;
        }

        if let Some(caps) = ordered_re.captures(trimmed) {
            let level = indent_level(line);
            let number = state.list.next_ordered(level as usize);
            blocks.push(Block::Ordered {
                level,
                number,
                text: caps[1].to_string(),
            });
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("> ") {
            state.list.reset();
            blocks.push(Block::Quote { text: rest.to_string() });
            continue;
        }

        state.list.reset();
        blocks.push(Block::Paragraph { text: trimmed.to_string() });
    }

    debug!("classified {} blocks from {} lines", blocks.len(), markdown.lines().count());
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        let blocks = parse_markdown("# One\n## Two\n### Three");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, text: "One".into() },
                Block::Heading { level: 2, text: "Two".into() },
                Block::Heading { level: 3, text: "Three".into() },
            ]
        );
    }

    #[test]
    fn test_deep_heading_is_paragraph() {
        let blocks = parse_markdown("#### Four");
        assert_eq!(blocks, vec![Block::Paragraph { text: "#### Four".into() }]);
    }

    #[test]
    fn test_heading_without_space_is_paragraph() {
        let blocks = parse_markdown("#NoSpace");
        assert_eq!(blocks, vec![Block::Paragraph { text: "#NoSpace".into() }]);
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(parse_markdown("---"), vec![Block::Rule]);
        assert_eq!(parse_markdown("***"), vec![Block::Rule]);
        // underscores are not a rule in this syntax set
        assert_eq!(
            parse_markdown("___"),
            vec![Block::Paragraph { text: "___".into() }]
        );
    }

    #[test]
    fn test_bullet_markers_and_nesting() {
        let blocks = parse_markdown("- top\n  * nested\n    + deep");
        assert_eq!(
            blocks,
            vec![
                Block::Bullet { level: 0, text: "top".into() },
                Block::Bullet { level: 1, text: "nested".into() },
                Block::Bullet { level: 2, text: "deep".into() },
            ]
        );
    }

    #[test]
    fn test_ordered_counters_are_state_derived() {
        // literal digits are ignored; consecutive items count up
        let blocks = parse_markdown("7. a\n7. b\n7. c");
        let numbers: Vec<u32> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Ordered { number, .. } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_ordered_counter_resets_on_blank() {
        let blocks = parse_markdown("1. a\n2. b\n\n1. c");
        let numbers: Vec<u32> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Ordered { number, .. } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![1, 2, 1]);
    }

    #[test]
    fn test_ordered_counter_resets_on_non_list_content() {
        let blocks = parse_markdown("1. a\n2. b\nplain paragraph\n1. c");
        let numbers: Vec<u32> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Ordered { number, .. } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![1, 2, 1]);
    }

    #[test]
    fn test_nested_ordered_counters() {
        let md = "1. a\n  1. a1\n  1. a2\n1. b\n  1. b1";
        let blocks = parse_markdown(md);
        let pairs: Vec<(u8, u32)> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Ordered { level, number, .. } => Some((*level, *number)),
                _ => None,
            })
            .collect();
        // dedent truncates the nested counter, so b1 restarts at 1
        assert_eq!(pairs, vec![(0, 1), (1, 1), (1, 2), (0, 2), (1, 1)]);
    }

    #[test]
    fn test_bullets_preserve_ordered_counters() {
        let blocks = parse_markdown("1. a\n- note\n2. b");
        let numbers: Vec<u32> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Ordered { number, .. } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_code_fence() {
        let blocks = parse_markdown("```rust\nfn main() {}\n```");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: "rust".into(),
                lines: vec!["fn main() {}".into()],
            }]
        );
    }

    #[test]
    fn test_code_fence_preserves_raw_lines() {
        let md = "```\n# not a heading\n- not a bullet\n\n  indented\n```";
        let blocks = parse_markdown(md);
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: String::new(),
                lines: vec![
                    "# not a heading".into(),
                    "- not a bullet".into(),
                    "".into(),
                    "  indented".into(),
                ],
            }]
        );
    }

    #[test]
    fn test_unterminated_fence_never_flushes() {
        let blocks = parse_markdown("before\n```\ntrailing code");
        assert_eq!(blocks, vec![Block::Paragraph { text: "before".into() }]);
    }

    #[test]
    fn test_fence_inside_fence_closes() {
        let blocks = parse_markdown("```a\nx\n```\n```b\ny\n```");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], Block::CodeBlock { language, .. } if language == "a"));
        assert!(matches!(&blocks[1], Block::CodeBlock { language, .. } if language == "b"));
    }

    #[test]
    fn test_blockquote() {
        let blocks = parse_markdown("> quoted words");
        assert_eq!(blocks, vec![Block::Quote { text: "quoted words".into() }]);
    }

    #[test]
    fn test_blank_lines() {
        let blocks = parse_markdown("a\n\nb");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph { text: "a".into() },
                Block::Blank,
                Block::Paragraph { text: "b".into() },
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_markdown("").is_empty());
    }

    #[test]
    fn test_list_item_keeps_inline_markers_for_tokenizer() {
        // gutter treatment first; the remainder is tokenized later
        let blocks = parse_markdown("- has **bold** text");
        assert_eq!(
            blocks,
            vec![Block::Bullet { level: 0, text: "has **bold** text".into() }]
        );
    }
}
