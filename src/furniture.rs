//! Page furniture: borders, running header/footer, page numbers and the
//! watermark.
//!
//! Runs once after all content blocks are laid out, when the total page
//! count is final, and stamps every page uniformly. The watermark goes on
//! the background layer so it sits beneath content.

use crate::canvas::{Canvas, Color, DrawOp, FontId, Page};
use crate::config::{BorderStyle, PageNumberPosition, RenderConfig, PAGE_HEIGHT, PAGE_WIDTH};
use crate::metrics::text_width;

const FURNITURE_SIZE: f32 = 9.0;
const WATERMARK_TEXT: &str = "Markdown to PDF";
const WATERMARK_SIZE: f32 = 40.0;

/// Stamp borders, header/footer, page numbers and watermark on every page.
pub fn decorate(canvas: &mut Canvas, config: &RenderConfig) {
    let total = canvas.page_count();
    let theme = Color::from_triple(config.theme_color.rgb());

    for index in 0..total {
        let page = canvas.page_mut(index);

        if config.add_borders {
            draw_border(page, config.border_style, theme);
        }

        if !config.header_text.is_empty() {
            let width = text_width(&config.header_text, FontId::Helvetica, FURNITURE_SIZE);
            page.push_content(text_op(
                (PAGE_WIDTH - width) / 2.0,
                12.0,
                &config.header_text,
            ));
        }

        if !config.footer_text.is_empty() {
            let width = text_width(&config.footer_text, FontId::Helvetica, FURNITURE_SIZE);
            page.push_content(text_op(
                (PAGE_WIDTH - width) / 2.0,
                PAGE_HEIGHT - 6.0,
                &config.footer_text,
            ));
        }

        if config.add_page_numbers {
            let label = format!("Page {} / {}", index + 1, total);
            let width = text_width(&label, FontId::Helvetica, FURNITURE_SIZE);
            let x = match config.page_number_position {
                PageNumberPosition::Center => (PAGE_WIDTH - width) / 2.0,
                PageNumberPosition::Left => config.margin_left,
                PageNumberPosition::Right => PAGE_WIDTH - config.margin_right - width,
            };
            page.push_content(text_op(x, PAGE_HEIGHT - 10.0, &label));
        }

        if config.add_watermark {
            draw_watermark(page);
        }
    }
}

fn text_op(x: f32, y: f32, text: &str) -> DrawOp {
    DrawOp::Text {
        x,
        y,
        text: text.to_string(),
        font: FontId::Helvetica,
        size: FURNITURE_SIZE,
        color: Color::MUTED,
        angle: 0.0,
    }
}

/// Diagonal watermark centered on the page, beneath content.
fn draw_watermark(page: &mut Page) {
    let width = text_width(WATERMARK_TEXT, FontId::HelveticaBold, WATERMARK_SIZE);
    // shift the anchor down-left along the 45° diagonal so the text body
    // straddles the page center
    let offset = width * 0.354;
    page.push_background(DrawOp::Text {
        x: PAGE_WIDTH / 2.0 - offset,
        y: PAGE_HEIGHT / 2.0 + offset,
        text: WATERMARK_TEXT.to_string(),
        font: FontId::HelveticaBold,
        size: WATERMARK_SIZE,
        color: Color::WATERMARK,
        angle: 45.0,
    });
}

fn stroke_rect(inset: f32, color: Color, line_width: f32) -> DrawOp {
    DrawOp::Rect {
        x: inset,
        y: inset,
        width: PAGE_WIDTH - inset * 2.0,
        height: PAGE_HEIGHT - inset * 2.0,
        color,
        fill: false,
        line_width,
    }
}

fn draw_border(page: &mut Page, style: BorderStyle, theme: Color) {
    match style {
        BorderStyle::Simple => {
            page.push_content(stroke_rect(10.0, theme, 0.5));
        }
        BorderStyle::Double => {
            page.push_content(stroke_rect(10.0, theme, 0.8));
            page.push_content(stroke_rect(12.0, theme, 0.3));
        }
        BorderStyle::Rounded => draw_rounded_border(page, theme),
        BorderStyle::Decorative => {
            page.push_content(stroke_rect(10.0, theme, 0.5));
            // filled dots in each corner
            for (cx, cy) in [
                (10.0, 10.0),
                (PAGE_WIDTH - 10.0, 10.0),
                (10.0, PAGE_HEIGHT - 10.0),
                (PAGE_WIDTH - 10.0, PAGE_HEIGHT - 10.0),
            ] {
                page.push_content(DrawOp::Circle {
                    cx,
                    cy,
                    radius: 2.0,
                    color: theme,
                    fill: true,
                });
            }
        }
        BorderStyle::Gradient => {
            // five nested rectangles fading toward white to fake depth
            for step in 0..5 {
                let inset = 8.0 + step as f32 * 1.5;
                let faded = theme.lighten(step as f32 * 0.18);
                page.push_content(stroke_rect(inset, faded, 0.3));
            }
        }
    }
}

/// Arcs simulated with short diagonal segments at each corner; the four
/// edges stop short of the corner by the cut length.
fn draw_rounded_border(page: &mut Page, theme: Color) {
    let inset = 9.0;
    let cut = 6.0;
    let left = inset;
    let right = PAGE_WIDTH - inset;
    let top = inset;
    let bottom = PAGE_HEIGHT - inset;
    let width = 0.5;

    let edges = [
        (left + cut, top, right - cut, top),
        (left + cut, bottom, right - cut, bottom),
        (left, top + cut, left, bottom - cut),
        (right, top + cut, right, bottom - cut),
    ];
    let corners = [
        (left, top + cut, left + cut, top),
        (right - cut, top, right, top + cut),
        (right, bottom - cut, right - cut, bottom),
        (left + cut, bottom, left, bottom - cut),
    ];
    for (x1, y1, x2, y2) in edges.into_iter().chain(corners) {
        page.push_content(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color: theme,
            width,
        });
    }
}
