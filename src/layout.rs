//! Layout and pagination.
//!
//! Consumes classified blocks, computes wrapped line breaks against the
//! content width, and emits positioned draw calls while advancing a
//! vertical cursor. A page break is triggered whenever the next measured
//! chunk would overflow the bottom margin: per block for blocks with a
//! computable height (headings, rules, code blocks, quotes), per wrapped
//! line for paragraphs.

use log::debug;

use crate::blocks::Block;
use crate::canvas::{Canvas, Color, FontId};
use crate::config::{RenderConfig, TitleStyle, PAGE_WIDTH};
use crate::inline::{self, InlineRun};
use crate::metrics::{text_width, PT_TO_MM};

/// Greedy word-wrap against `max_width`. A word wider than the limit is
/// placed alone on its own line, never split mid-word.
pub fn measure_wrap(text: &str, max_width: f32, font: FontId, size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0f32;

    for word in text.split_whitespace() {
        let word_width = text_width(word, font, size);
        let space_width = text_width(" ", font, size);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space_width + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space_width + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// One styled segment of a visual line being assembled.
struct LineSeg {
    text: String,
    font: FontId,
    size: f32,
    color: Color,
}

/// Owns the canvas and cursor for one conversion.
pub struct LayoutEngine<'a> {
    config: &'a RenderConfig,
    canvas: Canvas,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        LayoutEngine {
            config,
            canvas: Canvas::new(config.margin_top),
        }
    }

    /// Hand the finished canvas to the furniture pass.
    pub fn finish(self) -> Canvas {
        self.canvas
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn theme(&self) -> Color {
        Color::from_triple(self.config.theme_color.rgb())
    }

    fn line_advance(&self, size: f32) -> f32 {
        size * PT_TO_MM * self.config.line_height
    }

    /// Open a new page when `needed` vertical units no longer fit.
    fn ensure_page(&mut self, needed: f32) {
        if self.canvas.cursor() + needed > self.config.bottom_limit() {
            self.canvas.new_page(self.config.margin_top);
            debug!("content overflow, now on page {}", self.canvas.page_count());
        }
    }

    /// Inline markers reduced to their visible text, for blocks rendered
    /// in a single uniform style.
    fn plain_text(text: &str) -> String {
        inline::tokenize(text).into_iter().map(|r| r.text).collect()
    }

    pub fn render_block(&mut self, block: &Block) {
        match block {
            Block::Blank => self.canvas.advance(self.config.paragraph_spacing),
            Block::Rule => self.rule(),
            Block::Heading { level, text } => self.heading(*level, text),
            Block::Paragraph { text } => {
                let runs = inline::tokenize(text);
                let x = self.config.margin_left;
                self.flow_runs(&runs, x, self.config.content_width());
            }
            Block::Bullet { level, text } => self.bullet_item(*level, text),
            Block::Ordered { level, number, text } => self.ordered_item(*level, *number, text),
            Block::Quote { text } => self.quote(text),
            Block::CodeBlock { lines, .. } => self.code_block(lines),
        }
    }

    fn style_of(&self, run: &InlineRun) -> (FontId, f32, Color) {
        if run.code {
            (FontId::Courier, self.config.font_size, Color::CODE_TEXT)
        } else {
            (
                FontId::for_style(run.bold, run.italic),
                self.config.font_size,
                Color::TEXT,
            )
        }
    }

    /// Flow styled runs into wrapped visual lines starting at `x_start`.
    ///
    /// Words are merged one at a time into the line buffer; a style change
    /// switches segments but never forces a break on its own; only width
    /// overflow flushes the buffer.
    fn flow_runs(&mut self, runs: &[InlineRun], x_start: f32, width: f32) {
        let mut segs: Vec<LineSeg> = Vec::new();
        let mut line_width = 0.0f32;

        for run in runs {
            let (font, size, color) = self.style_of(run);
            for word in run.text.split_whitespace() {
                let word_width = text_width(word, font, size);
                let space_width = text_width(" ", font, size);
                if segs.is_empty() {
                    segs.push(LineSeg { text: word.to_string(), font, size, color });
                    line_width = word_width;
                } else if line_width + space_width + word_width <= width {
                    match segs.last_mut() {
                        Some(last) if last.font == font && last.color == color => {
                            last.text.push(' ');
                            last.text.push_str(word);
                        }
                        _ => segs.push(LineSeg { text: word.to_string(), font, size, color }),
                    }
                    line_width += space_width + word_width;
                } else {
                    self.flush_line(&segs, x_start);
                    segs.clear();
                    segs.push(LineSeg { text: word.to_string(), font, size, color });
                    line_width = word_width;
                }
            }
        }
        self.flush_line(&segs, x_start);
    }

    /// Emit one assembled visual line, breaking the page first if needed.
    fn flush_line(&mut self, segs: &[LineSeg], x_start: f32) {
        if segs.is_empty() {
            return;
        }
        let advance = self.line_advance(self.config.font_size);
        self.ensure_page(advance);
        let baseline = self.canvas.cursor() + self.config.font_size * PT_TO_MM;
        let mut x = x_start;
        for (i, seg) in segs.iter().enumerate() {
            if i > 0 {
                x += text_width(" ", seg.font, seg.size);
            }
            self.canvas
                .draw_text(x, baseline, &seg.text, seg.font, seg.size, seg.color);
            x += text_width(&seg.text, seg.font, seg.size);
        }
        self.canvas.advance(advance);
    }

    fn heading(&mut self, level: u8, text: &str) {
        let size = match level {
            1 => self.config.title_size,
            2 => self.config.subtitle_size,
            _ => self.config.font_size + 2.0,
        };
        let text = Self::plain_text(text);
        let advance = self.line_advance(size);
        self.canvas.advance(2.0);
        self.ensure_page(advance + 3.0);

        let theme = self.theme();
        let font = FontId::HelveticaBold;
        let cap = size * PT_TO_MM;
        let x = self.config.margin_left;
        let baseline = self.canvas.cursor() + cap;
        let measured = text_width(&text, font, size);

        match self.config.title_style {
            TitleStyle::Background => {
                self.canvas.draw_rect(
                    x - 2.0,
                    self.canvas.cursor() - 1.5,
                    measured + 7.0,
                    cap + 4.5,
                    theme,
                    true,
                );
                self.canvas
                    .draw_text(x + 1.5, baseline, &text, font, size, Color::WHITE);
            }
            TitleStyle::Underline => {
                self.canvas.draw_text(x, baseline, &text, font, size, theme);
                self.canvas
                    .draw_line(x, baseline + 1.5, x + measured, baseline + 1.5, theme, 0.5);
            }
            TitleStyle::Bold => {
                self.canvas.draw_text(x, baseline, &text, font, size, theme);
            }
        }
        self.canvas.advance(advance + 3.0);
    }

    fn rule(&mut self) {
        self.ensure_page(6.0);
        let y = self.canvas.cursor() + 3.0;
        self.canvas.draw_line(
            self.config.margin_left,
            y,
            PAGE_WIDTH - self.config.margin_right,
            y,
            Color::RULE,
            0.4,
        );
        self.canvas.advance(6.0);
    }

    fn bullet_item(&mut self, level: u8, text: &str) {
        let gutter = self.config.margin_left + level as f32 * 10.0;
        let text_x = gutter + 8.0;
        let advance = self.line_advance(self.config.font_size);
        self.ensure_page(advance);

        let font_mm = self.config.font_size * PT_TO_MM;
        let baseline = self.canvas.cursor() + font_mm;
        self.canvas
            .draw_circle(gutter, baseline - font_mm * 0.35, 0.8, Color::TEXT, true);

        let runs = inline::tokenize(text);
        let width = PAGE_WIDTH - self.config.margin_right - text_x;
        self.flow_runs(&runs, text_x, width);
    }

    fn ordered_item(&mut self, level: u8, number: u32, text: &str) {
        let gutter = self.config.margin_left + level as f32 * 10.0;
        let text_x = gutter + 12.0;
        let advance = self.line_advance(self.config.font_size);
        self.ensure_page(advance);

        let baseline = self.canvas.cursor() + self.config.font_size * PT_TO_MM;
        self.canvas.draw_text(
            gutter,
            baseline,
            &format!("{number}."),
            FontId::Helvetica,
            self.config.font_size,
            Color::TEXT,
        );

        let runs = inline::tokenize(text);
        let width = PAGE_WIDTH - self.config.margin_right - text_x;
        self.flow_runs(&runs, text_x, width);
    }

    fn quote(&mut self, text: &str) {
        let size = (self.config.font_size - 1.0).max(6.0);
        let font = FontId::HelveticaOblique;
        let text = Self::plain_text(text);
        let advance = self.line_advance(size);
        let inner_width = self.config.content_width() - 10.0;
        let lines = measure_wrap(&text, inner_width, font, size);
        let box_height = lines.len() as f32 * advance + 5.0;
        self.ensure_page(box_height + 2.0);

        let top = self.canvas.cursor();
        let x = self.config.margin_left;
        let theme = self.theme();
        self.canvas.draw_rect(
            x,
            top,
            self.config.content_width(),
            box_height,
            theme.lighten(0.88),
            true,
        );
        self.canvas.draw_rect(x, top, 1.8, box_height, theme, true);

        let mut baseline = top + 2.5 + size * PT_TO_MM;
        for line in &lines {
            self.canvas
                .draw_text(x + 5.0, baseline, line, font, size, Color::QUOTE_TEXT);
            baseline += advance;
        }
        self.canvas.advance(box_height + 3.0);
    }

    fn code_block(&mut self, lines: &[String]) {
        let step = self.config.font_size * 0.5;
        let height = (lines.len() as f32 + 1.0) * step + 8.0;
        self.ensure_page(height);

        let top = self.canvas.cursor();
        let x = self.config.margin_left;
        self.canvas
            .draw_rect(x, top, self.config.content_width(), height, Color::CODE_BG, true);

        let mut baseline = top + 6.0;
        for line in lines {
            self.canvas
                .draw_text(x + 3.0, baseline, line, FontId::Courier, 9.0, Color::CODE_TEXT);
            baseline += step;
        }
        self.canvas.advance(height + 3.0);
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn wrapped_lines_never_exceed_width(
            words in proptest::collection::vec("[a-z]{1,6}", 1..60),
            max in 25.0f32..120.0,
        ) {
            let text = words.join(" ");
            let lines = measure_wrap(&text, max, FontId::Helvetica, 11.0);
            for line in &lines {
                // every word fits alone at this width, so every line must fit
                prop_assert!(text_width(line, FontId::Helvetica, 11.0) <= max);
            }
        }

        #[test]
        fn wrapping_preserves_all_words(
            words in proptest::collection::vec("[a-zA-Z]{1,20}", 0..80),
        ) {
            let text = words.join(" ");
            let lines = measure_wrap(&text, 45.0, FontId::Helvetica, 11.0);
            let rejoined = lines.join(" ");
            prop_assert_eq!(rejoined, words.join(" "));
        }
    }
}
