//! Paginated drawing surface.
//!
//! The layout engine emits absolute-positioned draw ops onto the current
//! page; the furniture pass stamps every page afterwards; the PDF writer
//! serializes the finished canvas. Pages are append-only and carry two
//! layers so the watermark can sit beneath content.

/// An RGB color, 0–255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Body text.
    pub const TEXT: Color = Color::rgb(40, 40, 40);
    /// Code block text.
    pub const CODE_TEXT: Color = Color::rgb(60, 60, 60);
    /// Code block background fill.
    pub const CODE_BG: Color = Color::rgb(240, 240, 240);
    /// Header, footer and page-number text.
    pub const MUTED: Color = Color::rgb(130, 130, 130);
    /// Horizontal rules.
    pub const RULE: Color = Color::rgb(180, 180, 180);
    /// Blockquote text.
    pub const QUOTE_TEXT: Color = Color::rgb(80, 80, 80);
    /// Watermark text.
    pub const WATERMARK: Color = Color::rgb(224, 224, 224);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn from_triple(rgb: (u8, u8, u8)) -> Self {
        Color::rgb(rgb.0, rgb.1, rgb.2)
    }

    /// Blend toward white; `amount` 0.0 keeps the color, 1.0 is white.
    pub fn lighten(self, amount: f32) -> Color {
        let mix = |c: u8| -> u8 {
            let c = c as f32;
            (c + (255.0 - c) * amount).round().clamp(0.0, 255.0) as u8
        };
        Color::rgb(mix(self.r), mix(self.g), mix(self.b))
    }
}

/// The built-in Type1 fonts every page's resource dictionary exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontId {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
}

impl FontId {
    pub const ALL: [FontId; 5] = [
        FontId::Helvetica,
        FontId::HelveticaBold,
        FontId::HelveticaOblique,
        FontId::HelveticaBoldOblique,
        FontId::Courier,
    ];

    /// Resource name used in content streams (/F1../F5).
    pub fn resource_name(self) -> &'static str {
        match self {
            FontId::Helvetica => "F1",
            FontId::HelveticaBold => "F2",
            FontId::HelveticaOblique => "F3",
            FontId::HelveticaBoldOblique => "F4",
            FontId::Courier => "F5",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            FontId::Helvetica => "Helvetica",
            FontId::HelveticaBold => "Helvetica-Bold",
            FontId::HelveticaOblique => "Helvetica-Oblique",
            FontId::HelveticaBoldOblique => "Helvetica-BoldOblique",
            FontId::Courier => "Courier",
        }
    }

    pub fn is_mono(self) -> bool {
        matches!(self, FontId::Courier)
    }

    /// Pick the Helvetica variant for an inline style.
    pub fn for_style(bold: bool, italic: bool) -> FontId {
        match (bold, italic) {
            (true, true) => FontId::HelveticaBoldOblique,
            (true, false) => FontId::HelveticaBold,
            (false, true) => FontId::HelveticaOblique,
            (false, false) => FontId::Helvetica,
        }
    }
}

/// One positioned drawing primitive. Coordinates are canvas units from the
/// page's top-left corner; text `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        font: FontId,
        size: f32,
        color: Color,
        /// Counter-clockwise rotation in degrees around (x, y).
        angle: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        fill: bool,
        /// Stroke width; ignored for filled rects.
        line_width: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        width: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
        fill: bool,
    },
}

/// One page: a background layer (rendered first) and a content layer.
#[derive(Debug, Default)]
pub struct Page {
    background: Vec<DrawOp>,
    content: Vec<DrawOp>,
}

impl Page {
    pub fn push_content(&mut self, op: DrawOp) {
        self.content.push(op);
    }

    pub fn push_background(&mut self, op: DrawOp) {
        self.background.push(op);
    }

    /// All ops in paint order, background first.
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.background.iter().chain(self.content.iter())
    }

    pub fn background_ops(&self) -> &[DrawOp] {
        &self.background
    }

    pub fn content_ops(&self) -> &[DrawOp] {
        &self.content
    }
}

/// The document under construction: append-only pages plus the layout
/// cursor (current page is always the last; `y` grows downward).
#[derive(Debug)]
pub struct Canvas {
    pages: Vec<Page>,
    cursor_y: f32,
}

impl Canvas {
    /// Start with a single empty page and the cursor at the top margin.
    pub fn new(margin_top: f32) -> Self {
        Canvas {
            pages: vec![Page::default()],
            cursor_y: margin_top,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_mut(&mut self, index: usize) -> &mut Page {
        &mut self.pages[index]
    }

    /// Append a fresh page and reset the cursor to the top margin.
    pub fn new_page(&mut self, margin_top: f32) {
        self.pages.push(Page::default());
        self.cursor_y = margin_top;
    }

    pub fn cursor(&self) -> f32 {
        self.cursor_y
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor_y += dy;
    }

    fn current(&mut self) -> &mut Page {
        // pages is never empty
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn draw_text(&mut self, x: f32, y: f32, text: &str, font: FontId, size: f32, color: Color) {
        self.current().push_content(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font,
            size,
            color,
            angle: 0.0,
        });
    }

    pub fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color, fill: bool) {
        self.current().push_content(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
            fill,
            line_width: 0.4,
        });
    }

    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, width: f32) {
        self.current().push_content(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
        });
    }

    pub fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color, fill: bool) {
        self.current().push_content(DrawOp::Circle {
            cx,
            cy,
            radius,
            color,
            fill,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_starts_with_one_page() {
        let canvas = Canvas::new(20.0);
        assert_eq!(canvas.page_count(), 1);
        assert_eq!(canvas.cursor(), 20.0);
    }

    #[test]
    fn test_new_page_resets_cursor() {
        let mut canvas = Canvas::new(20.0);
        canvas.advance(200.0);
        assert_eq!(canvas.cursor(), 220.0);
        canvas.new_page(20.0);
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.cursor(), 20.0);
    }

    #[test]
    fn test_draw_goes_to_last_page() {
        let mut canvas = Canvas::new(20.0);
        canvas.draw_text(10.0, 30.0, "first", FontId::Helvetica, 11.0, Color::TEXT);
        canvas.new_page(20.0);
        canvas.draw_text(10.0, 30.0, "second", FontId::Helvetica, 11.0, Color::TEXT);
        assert_eq!(canvas.pages()[0].content_ops().len(), 1);
        assert_eq!(canvas.pages()[1].content_ops().len(), 1);
    }

    #[test]
    fn test_background_layer_paints_first() {
        let mut canvas = Canvas::new(20.0);
        canvas.draw_text(10.0, 30.0, "content", FontId::Helvetica, 11.0, Color::TEXT);
        canvas.page_mut(0).push_background(DrawOp::Text {
            x: 50.0,
            y: 150.0,
            text: "mark".into(),
            font: FontId::HelveticaBold,
            size: 40.0,
            color: Color::WATERMARK,
            angle: 45.0,
        });
        let ops: Vec<_> = canvas.pages()[0].ops().collect();
        assert!(matches!(ops[0], DrawOp::Text { text, .. } if text == "mark"));
        assert!(matches!(ops[1], DrawOp::Text { text, .. } if text == "content"));
    }

    #[test]
    fn test_lighten() {
        assert_eq!(Color::rgb(0, 0, 0).lighten(1.0), Color::WHITE);
        assert_eq!(Color::rgb(100, 100, 100).lighten(0.0), Color::rgb(100, 100, 100));
        let tint = Color::rgb(6, 182, 212).lighten(0.85);
        assert!(tint.r > 200 && tint.g > 240);
    }

    #[test]
    fn test_font_for_style() {
        assert_eq!(FontId::for_style(false, false), FontId::Helvetica);
        assert_eq!(FontId::for_style(true, false), FontId::HelveticaBold);
        assert_eq!(FontId::for_style(false, true), FontId::HelveticaOblique);
        assert_eq!(FontId::for_style(true, true), FontId::HelveticaBoldOblique);
    }
}
