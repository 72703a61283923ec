//! Rendering options: page styling, theme colors, and their defaults.
//!
//! All layout math runs in canvas units (millimetres on an A4 page, origin
//! top-left); font sizes are in points. The configuration is pure data;
//! behavior lives in the layout and furniture passes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A4 page width in canvas units.
pub const PAGE_WIDTH: f32 = 210.0;
/// A4 page height in canvas units.
pub const PAGE_HEIGHT: f32 = 297.0;

/// Named theme colors, each a fixed RGB triple applied to headings,
/// borders and blockquote accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    Blue,
    Cyan,
    Purple,
    Green,
    Orange,
    Red,
    Pink,
    Yellow,
    Indigo,
    Teal,
}

impl ThemeColor {
    /// The RGB triple this theme denotes.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ThemeColor::Blue => (59, 130, 246),
            ThemeColor::Cyan => (6, 182, 212),
            ThemeColor::Purple => (139, 92, 246),
            ThemeColor::Green => (16, 185, 129),
            ThemeColor::Orange => (249, 115, 22),
            ThemeColor::Red => (239, 68, 68),
            ThemeColor::Pink => (236, 72, 153),
            ThemeColor::Yellow => (234, 179, 8),
            ThemeColor::Indigo => (99, 102, 241),
            ThemeColor::Teal => (20, 184, 166),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "blue" => Some(ThemeColor::Blue),
            "cyan" => Some(ThemeColor::Cyan),
            "purple" => Some(ThemeColor::Purple),
            "green" => Some(ThemeColor::Green),
            "orange" => Some(ThemeColor::Orange),
            "red" => Some(ThemeColor::Red),
            "pink" => Some(ThemeColor::Pink),
            "yellow" => Some(ThemeColor::Yellow),
            "indigo" => Some(ThemeColor::Indigo),
            "teal" => Some(ThemeColor::Teal),
            _ => None,
        }
    }
}

/// How headings are decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleStyle {
    /// Bold colored text, no extra primitive.
    Bold,
    /// A rule under the text, sized to the measured text width.
    Underline,
    /// A filled rectangle behind the text.
    Background,
}

impl TitleStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(TitleStyle::Bold),
            "underline" => Some(TitleStyle::Underline),
            "background" => Some(TitleStyle::Background),
            _ => None,
        }
    }
}

/// Page border construction, drawn by the furniture pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Simple,
    Double,
    Rounded,
    Decorative,
    Gradient,
}

impl BorderStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "simple" => Some(BorderStyle::Simple),
            "double" => Some(BorderStyle::Double),
            "rounded" => Some(BorderStyle::Rounded),
            "decorative" => Some(BorderStyle::Decorative),
            "gradient" => Some(BorderStyle::Gradient),
            _ => None,
        }
    }
}

/// Horizontal placement of the "Page i / total" label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageNumberPosition {
    Center,
    Left,
    Right,
}

impl PageNumberPosition {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "center" => Some(PageNumberPosition::Center),
            "left" => Some(PageNumberPosition::Left),
            "right" => Some(PageNumberPosition::Right),
            _ => None,
        }
    }
}

/// The full set of recognized render options.
///
/// Unset fields take the documented defaults, both in `Default::default`
/// and when deserializing a partial JSON options file.
///
/// # Example
/// ```rust
/// use mdpress::config::{RenderConfig, ThemeColor, BorderStyle};
///
/// let config = RenderConfig::default()
///     .with_theme(ThemeColor::Purple)
///     .with_borders(BorderStyle::Double)
///     .with_header("Quarterly Report");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    pub font_size: f32,
    /// Line advance multiplier applied to the font size.
    pub line_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// H1 size in points.
    pub title_size: f32,
    /// H2 size in points.
    pub subtitle_size: f32,
    pub add_page_numbers: bool,
    pub page_number_position: PageNumberPosition,
    pub add_watermark: bool,
    pub theme_color: ThemeColor,
    pub title_style: TitleStyle,
    /// Vertical gap advanced on blank lines.
    pub paragraph_spacing: f32,
    pub add_borders: bool,
    pub border_style: BorderStyle,
    /// Stamped centered near the top edge of every page when non-empty.
    pub header_text: String,
    /// Stamped centered near the bottom edge of every page when non-empty.
    pub footer_text: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            font_size: 11.0,
            line_height: 1.6,
            margin_top: 20.0,
            margin_bottom: 20.0,
            margin_left: 20.0,
            margin_right: 20.0,
            title_size: 20.0,
            subtitle_size: 14.0,
            add_page_numbers: true,
            page_number_position: PageNumberPosition::Center,
            add_watermark: false,
            theme_color: ThemeColor::Cyan,
            title_style: TitleStyle::Bold,
            paragraph_spacing: 5.0,
            add_borders: false,
            border_style: BorderStyle::Simple,
            header_text: String::new(),
            footer_text: String::new(),
        }
    }
}

/// Rejected configuration. Raised before any layout work; the engine never
/// clamps values or emits partial output.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("vertical margins ({top} + {bottom}) exceed the page height {page}")]
    MarginsTooTall { top: f32, bottom: f32, page: f32 },
    #[error("horizontal margins ({left} + {right}) exceed the page width {page}")]
    MarginsTooWide { left: f32, right: f32, page: f32 },
}

impl RenderConfig {
    /// Check every numeric field before layout starts.
    ///
    /// Margins that consume a whole page dimension would otherwise make
    /// `ensure_page` open pages forever, so they are rejected here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives: [(&'static str, f32); 9] = [
            ("fontSize", self.font_size),
            ("lineHeight", self.line_height),
            ("marginTop", self.margin_top),
            ("marginBottom", self.margin_bottom),
            ("marginLeft", self.margin_left),
            ("marginRight", self.margin_right),
            ("titleSize", self.title_size),
            ("subtitleSize", self.subtitle_size),
            ("paragraphSpacing", self.paragraph_spacing),
        ];
        for (field, value) in positives {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.margin_top + self.margin_bottom >= PAGE_HEIGHT {
            return Err(ConfigError::MarginsTooTall {
                top: self.margin_top,
                bottom: self.margin_bottom,
                page: PAGE_HEIGHT,
            });
        }
        if self.margin_left + self.margin_right >= PAGE_WIDTH {
            return Err(ConfigError::MarginsTooWide {
                left: self.margin_left,
                right: self.margin_right,
                page: PAGE_WIDTH,
            });
        }
        Ok(())
    }

    /// Width available to content between the side margins.
    pub fn content_width(&self) -> f32 {
        PAGE_WIDTH - self.margin_left - self.margin_right
    }

    /// Lowest cursor position content may reach.
    pub fn bottom_limit(&self) -> f32 {
        PAGE_HEIGHT - self.margin_bottom
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_line_height(mut self, factor: f32) -> Self {
        self.line_height = factor;
        self
    }

    /// Set all four margins at once.
    pub fn with_margins(mut self, margin: f32) -> Self {
        self.margin_top = margin;
        self.margin_bottom = margin;
        self.margin_left = margin;
        self.margin_right = margin;
        self
    }

    pub fn with_theme(mut self, theme: ThemeColor) -> Self {
        self.theme_color = theme;
        self
    }

    pub fn with_title_style(mut self, style: TitleStyle) -> Self {
        self.title_style = style;
        self
    }

    /// Enable borders in the given style.
    pub fn with_borders(mut self, style: BorderStyle) -> Self {
        self.add_borders = true;
        self.border_style = style;
        self
    }

    pub fn with_watermark(mut self, on: bool) -> Self {
        self.add_watermark = on;
        self
    }

    pub fn with_page_numbers(mut self, on: bool, position: PageNumberPosition) -> Self {
        self.add_page_numbers = on;
        self.page_number_position = position;
        self
    }

    pub fn with_header(mut self, text: &str) -> Self {
        self.header_text = text.to_string();
        self
    }

    pub fn with_footer(mut self, text: &str) -> Self {
        self.footer_text = text.to_string();
        self
    }
}
