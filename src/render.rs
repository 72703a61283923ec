//! Top-level conversion pipeline.
//!
//! Validate the configuration, classify blocks, lay them out onto a
//! paginated canvas, decorate every page, then serialize to PDF bytes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::blocks::{self, Block};
use crate::canvas::Canvas;
use crate::config::{ConfigError, RenderConfig};
use crate::furniture;
use crate::inline;
use crate::layout::LayoutEngine;
use crate::writer;

/// Render markdown onto a decorated canvas without serializing it.
///
/// The returned canvas holds the positioned draw ops for every page; useful
/// for inspecting layout decisions directly.
pub fn render(markdown: &str, config: &RenderConfig) -> Result<Canvas, ConfigError> {
    config.validate()?;

    let parsed = blocks::parse_markdown(markdown);
    let mut engine = LayoutEngine::new(config);
    for block in &parsed {
        engine.render_block(block);
    }
    let mut canvas = engine.finish();
    furniture::decorate(&mut canvas, config);
    info!(
        "rendered {} blocks onto {} pages",
        parsed.len(),
        canvas.page_count()
    );
    Ok(canvas)
}

/// Convert markdown text to finished PDF bytes.
///
/// # Example
/// ```rust
/// use mdpress::{convert, RenderConfig};
///
/// let bytes = convert("# Hello\n\nSome text.", &RenderConfig::default()).unwrap();
/// assert!(bytes.starts_with(b"%PDF"));
/// ```
pub fn convert(markdown: &str, config: &RenderConfig) -> Result<Vec<u8>, ConfigError> {
    convert_with_title(markdown, config, None)
}

/// Convert with an optional document title stored in the PDF metadata.
pub fn convert_with_title(
    markdown: &str,
    config: &RenderConfig,
    title: Option<&str>,
) -> Result<Vec<u8>, ConfigError> {
    let canvas = render(markdown, config)?;
    Ok(writer::write_pdf(&canvas, title))
}

/// Read a markdown file, convert it, and write the PDF next to it.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &RenderConfig,
    title: Option<&str>,
) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();
    let markdown = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let bytes = convert_with_title(&markdown, config, title)?;
    fs::write(output, &bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {} bytes to {}", bytes.len(), output.display());
    Ok(())
}

/// Render the classified block stream back to plain text.
///
/// Preview/debug aid: headings and list gutters keep a textual marker,
/// inline styling is reduced to its visible text.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();
    for block in blocks::parse_markdown(markdown) {
        match block {
            Block::Heading { text: t, .. } => {
                text.push_str(&strip_inline(&t));
                text.push('\n');
            }
            Block::Paragraph { text: t } => {
                text.push_str(&strip_inline(&t));
                text.push('\n');
            }
            Block::Bullet { level, text: t } => {
                text.push_str(&"  ".repeat(level as usize));
                text.push_str("• ");
                text.push_str(&strip_inline(&t));
                text.push('\n');
            }
            Block::Ordered { level, number, text: t } => {
                text.push_str(&"  ".repeat(level as usize));
                text.push_str(&format!("{}. ", number));
                text.push_str(&strip_inline(&t));
                text.push('\n');
            }
            Block::Quote { text: t } => {
                text.push_str("> ");
                text.push_str(&strip_inline(&t));
                text.push('\n');
            }
            Block::CodeBlock { lines, .. } => {
                text.push('\n');
                for line in &lines {
                    text.push_str(line);
                    text.push('\n');
                }
                text.push('\n');
            }
            Block::Rule => text.push_str("---\n"),
            Block::Blank => text.push('\n'),
        }
    }
    text
}

fn strip_inline(text: &str) -> String {
    inline::tokenize(text).into_iter().map(|r| r.text).collect()
}
