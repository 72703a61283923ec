//! # mdpress
//!
//! A Markdown to PDF renderer: a single-pass line-oriented parser that
//! emits positioned drawing primitives onto a paginated canvas, with
//! themes, heading styles, page borders, headers/footers, page numbers
//! and a watermark.
//!
//! Supported markdown: headings (1–3), paragraphs with inline bold /
//! italic / code / strikethrough / links, bullet and ordered lists with
//! nesting, blockquotes, fenced code blocks, and horizontal rules.
//! Tables, images, footnotes and nested blockquotes are out of scope.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdpress::{convert, RenderConfig};
//!
//! let markdown = "# Hello\n\nSome **bold** text.\n\n- item one\n- item two";
//! let pdf = convert(markdown, &RenderConfig::default()).expect("valid config");
//! assert!(pdf.starts_with(b"%PDF"));
//! ```
//!
//! ## Styling
//!
//! ```rust
//! use mdpress::config::{RenderConfig, ThemeColor, TitleStyle, BorderStyle};
//!
//! let config = RenderConfig::default()
//!     .with_theme(ThemeColor::Indigo)
//!     .with_title_style(TitleStyle::Underline)
//!     .with_borders(BorderStyle::Rounded)
//!     .with_header("Project Notes")
//!     .with_watermark(true);
//! let pdf = mdpress::convert("# Styled", &config).unwrap();
//! assert!(!pdf.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`config`]: render options, themes and validation
//! - [`blocks`]: line-oriented block classification
//! - [`inline`]: inline span tokenizer
//! - [`layout`]: wrapping, cursor and pagination
//! - [`furniture`]: borders, header/footer, page numbers, watermark
//! - [`canvas`]: the paginated draw-op surface
//! - [`writer`]: PDF serialization
//! - [`parallel`]: batch conversion across files

pub mod blocks;
pub mod canvas;
pub mod config;
pub mod furniture;
pub mod inline;
pub mod layout;
pub mod metrics;
pub mod parallel;
pub mod render;
pub mod writer;

pub use config::{ConfigError, RenderConfig};
pub use render::{convert, convert_file, convert_with_title, markdown_to_text, render};

#[cfg(test)]
mod tests {
    use crate::render::markdown_to_text;

    #[test]
    fn test_markdown_to_text_smoke() {
        let markdown = "# Header\n\nThis is **bold** and *italic* text.\n\n- Item 1\n- Item 2";
        let expected = "Header\n\nThis is bold and italic text.\n\n• Item 1\n• Item 2\n";
        assert_eq!(markdown_to_text(markdown), expected);
    }

    #[test]
    fn test_convert_smoke() {
        let pdf = crate::convert("hello", &crate::RenderConfig::default()).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.4"));
    }
}
