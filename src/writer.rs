//! Minimal PDF 1.4 writer.
//!
//! Serializes a finished canvas into PDF bytes: one content stream per
//! page, shared Type1 font resources, xref table and trailer. Canvas
//! coordinates (millimetres, origin top-left) are converted to PDF points
//! with the y-axis flip at emission time.

use std::fmt::Write as _;

use crate::canvas::{Canvas, Color, DrawOp, FontId};
use crate::config::{PAGE_HEIGHT, PAGE_WIDTH};

const MM_TO_PT: f32 = 72.0 / 25.4;
/// Circle approximation constant for cubic Bézier quarter arcs.
const KAPPA: f32 = 0.552_285;

// --- Low-level PDF object model ---

struct PdfObj {
    id: u32,
    content: String,
    stream_data: Option<Vec<u8>>,
}

struct PdfWriter {
    objects: Vec<PdfObj>,
    next_id: u32,
}

impl PdfWriter {
    fn new() -> Self {
        PdfWriter { objects: Vec::new(), next_id: 1 }
    }

    fn add_object(&mut self, content: String) -> u32 {
        let id = self.next_id;
        self.objects.push(PdfObj { id, content, stream_data: None });
        self.next_id += 1;
        id
    }

    fn add_stream_object(&mut self, dictionary: String, data: Vec<u8>) -> u32 {
        let id = self.next_id;
        self.objects.push(PdfObj { id, content: dictionary, stream_data: Some(data) });
        self.next_id += 1;
        id
    }

    fn into_bytes(self, root_id: u32, info_id: u32) -> Vec<u8> {
        let mut pdf = Vec::new();
        pdf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::new();
        for obj in &self.objects {
            offsets.push(pdf.len() as u32);
            pdf.extend_from_slice(format!("{} 0 obj\n", obj.id).as_bytes());
            pdf.extend_from_slice(obj.content.as_bytes());
            if let Some(data) = &obj.stream_data {
                pdf.extend_from_slice(b"stream\n");
                pdf.extend_from_slice(data);
                pdf.extend_from_slice(b"\nendstream\n");
            }
            pdf.extend_from_slice(b"endobj\n");
        }

        let xref_offset = pdf.len() as u32;
        pdf.extend_from_slice(format!("xref\n0 {}\n", self.objects.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }

        pdf.extend_from_slice(b"trailer\n<<\n");
        pdf.extend_from_slice(format!("/Size {}\n", self.objects.len() + 1).as_bytes());
        pdf.extend_from_slice(format!("/Root {} 0 R\n", root_id).as_bytes());
        pdf.extend_from_slice(format!("/Info {} 0 R\n", info_id).as_bytes());
        pdf.extend_from_slice(b">>\nstartxref\n");
        pdf.extend_from_slice(format!("{}\n", xref_offset).as_bytes());
        pdf.extend_from_slice(b"%%EOF\n");
        pdf
    }
}

// --- Coordinate and operand helpers ---

fn x_pt(x: f32) -> f32 {
    x * MM_TO_PT
}

fn y_pt(y: f32) -> f32 {
    (PAGE_HEIGHT - y) * MM_TO_PT
}

fn channels(color: Color) -> (f32, f32, f32) {
    (
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
    )
}

fn escape_pdf_string(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
}

// --- Content stream serialization ---

fn serialize_op(out: &mut String, op: &DrawOp) {
    match op {
        DrawOp::Text { x, y, text, font, size, color, angle } => {
            let (r, g, b) = channels(*color);
            let _ = writeln!(out, "q\nBT\n/{} {:.2} Tf", font.resource_name(), size);
            let _ = writeln!(out, "{:.3} {:.3} {:.3} rg", r, g, b);
            if *angle == 0.0 {
                let _ = writeln!(out, "{:.2} {:.2} Td", x_pt(*x), y_pt(*y));
            } else {
                let rad = angle.to_radians();
                let (sin, cos) = rad.sin_cos();
                let _ = writeln!(
                    out,
                    "{:.4} {:.4} {:.4} {:.4} {:.2} {:.2} Tm",
                    cos, sin, -sin, cos, x_pt(*x), y_pt(*y)
                );
            }
            let _ = writeln!(out, "({}) Tj\nET\nQ", escape_pdf_string(text));
        }
        DrawOp::Rect { x, y, width, height, color, fill, line_width } => {
            let (r, g, b) = channels(*color);
            if *fill {
                let _ = writeln!(out, "q\n{:.3} {:.3} {:.3} rg", r, g, b);
                let _ = writeln!(
                    out,
                    "{:.2} {:.2} {:.2} {:.2} re\nf\nQ",
                    x_pt(*x),
                    y_pt(*y + *height),
                    width * MM_TO_PT,
                    height * MM_TO_PT
                );
            } else {
                let _ = writeln!(out, "q\n{:.3} {:.3} {:.3} RG\n{:.2} w", r, g, b, line_width * MM_TO_PT);
                let _ = writeln!(
                    out,
                    "{:.2} {:.2} {:.2} {:.2} re\nS\nQ",
                    x_pt(*x),
                    y_pt(*y + *height),
                    width * MM_TO_PT,
                    height * MM_TO_PT
                );
            }
        }
        DrawOp::Line { x1, y1, x2, y2, color, width } => {
            let (r, g, b) = channels(*color);
            let _ = writeln!(out, "q\n{:.3} {:.3} {:.3} RG\n{:.2} w", r, g, b, width * MM_TO_PT);
            let _ = writeln!(
                out,
                "{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ",
                x_pt(*x1),
                y_pt(*y1),
                x_pt(*x2),
                y_pt(*y2)
            );
        }
        DrawOp::Circle { cx, cy, radius, color, fill } => {
            serialize_circle(out, *cx, *cy, *radius, *color, *fill);
        }
    }
}

/// Four cubic Bézier quarter arcs approximating a circle.
fn serialize_circle(out: &mut String, cx: f32, cy: f32, radius: f32, color: Color, fill: bool) {
    let (r, g, b) = channels(color);
    let x = x_pt(cx);
    let y = y_pt(cy);
    let rad = radius * MM_TO_PT;
    let k = rad * KAPPA;

    if fill {
        let _ = writeln!(out, "q\n{:.3} {:.3} {:.3} rg", r, g, b);
    } else {
        let _ = writeln!(out, "q\n{:.3} {:.3} {:.3} RG", r, g, b);
    }
    let _ = writeln!(out, "{:.2} {:.2} m", x + rad, y);
    let _ = writeln!(
        out,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
        x + rad, y + k, x + k, y + rad, x, y + rad
    );
    let _ = writeln!(
        out,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
        x - k, y + rad, x - rad, y + k, x - rad, y
    );
    let _ = writeln!(
        out,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
        x - rad, y - k, x - k, y - rad, x, y - rad
    );
    let _ = writeln!(
        out,
        "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
        x + k, y - rad, x + rad, y - k, x + rad, y
    );
    let _ = writeln!(out, "{}\nQ", if fill { "f" } else { "S" });
}

fn serialize_page(page: &crate::canvas::Page) -> Vec<u8> {
    let mut out = String::new();
    for op in page.ops() {
        serialize_op(&mut out, op);
    }
    out.into_bytes()
}

// --- Document assembly ---

/// Serialize the canvas into a complete PDF document.
pub fn write_pdf(canvas: &Canvas, title: Option<&str>) -> Vec<u8> {
    let mut writer = PdfWriter::new();

    for font in FontId::ALL {
        writer.add_object(format!(
            "<< /Type /Font\n/Subtype /Type1\n/BaseFont /{}\n/Encoding /WinAnsiEncoding\n>>\n",
            font.base_font()
        ));
    }

    let page_count = canvas.page_count() as u32;
    // layout: 5 font objects, then (content, page) per page
    let pages_obj_id = 5 + 2 * page_count + 1;
    let media_width = PAGE_WIDTH * MM_TO_PT;
    let media_height = PAGE_HEIGHT * MM_TO_PT;

    let mut page_ids = Vec::new();
    for page in canvas.pages() {
        let stream = serialize_page(page);
        let content_id =
            writer.add_stream_object(format!("<< /Length {} >>\n", stream.len()), stream);
        let page_dict = format!(
            "<< /Type /Page\n\
             /Parent {} 0 R\n\
             /MediaBox [0 0 {:.2} {:.2}]\n\
             /Contents {} 0 R\n\
             /Resources << /Font << /F1 1 0 R /F2 2 0 R /F3 3 0 R /F4 4 0 R /F5 5 0 R >> >>\n\
             >>\n",
            pages_obj_id, media_width, media_height, content_id
        );
        page_ids.push(writer.add_object(page_dict));
    }

    let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
    let actual_pages_id = writer.add_object(format!(
        "<< /Type /Pages\n/Kids [{}]\n/Count {}\n>>\n",
        kids.join(" "),
        page_ids.len()
    ));
    assert_eq!(actual_pages_id, pages_obj_id);

    let catalog_id = writer.add_object(format!(
        "<< /Type /Catalog\n/Pages {} 0 R\n>>\n",
        actual_pages_id
    ));

    let mut info = String::from("<< /Producer (mdpress)\n");
    if let Some(title) = title {
        let _ = writeln!(info, "/Title ({})", escape_pdf_string(title));
    }
    info.push_str(">>\n");
    let info_id = writer.add_object(info);

    writer.into_bytes(catalog_id, info_id)
}

// --- Byte-level validation (test support) ---

/// Result of a structural scan over raw PDF bytes.
#[derive(Debug)]
pub struct PdfValidation {
    pub valid: bool,
    pub page_count: usize,
    pub object_count: usize,
    pub errors: Vec<String>,
}

/// Cheap structural checks over generated bytes; not a full parser.
pub fn validate_pdf_bytes(bytes: &[u8]) -> PdfValidation {
    let text = String::from_utf8_lossy(bytes);
    let mut errors = Vec::new();

    if !text.starts_with("%PDF-") {
        errors.push("missing PDF header".to_string());
    }
    if !text.contains("%%EOF") {
        errors.push("missing EOF marker".to_string());
    }
    if !text.contains("xref") {
        errors.push("missing xref table".to_string());
    }
    if !text.contains("/Type /Catalog") {
        errors.push("missing document catalog".to_string());
    }
    if !text.contains("/Type /Pages") {
        errors.push("missing pages tree".to_string());
    }

    let page_count = text.matches("/Type /Page\n").count();
    let object_count = text.matches("endobj").count();
    if page_count == 0 {
        errors.push("no pages".to_string());
    }

    PdfValidation {
        valid: errors.is_empty(),
        page_count,
        object_count,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    fn sample_canvas() -> Canvas {
        let mut canvas = Canvas::new(20.0);
        canvas.draw_text(20.0, 30.0, "hello (pdf)", FontId::Helvetica, 11.0, Color::TEXT);
        canvas.draw_rect(20.0, 40.0, 100.0, 20.0, Color::CODE_BG, true);
        canvas.draw_line(20.0, 70.0, 190.0, 70.0, Color::RULE, 0.4);
        canvas.draw_circle(25.0, 80.0, 0.8, Color::TEXT, true);
        canvas.new_page(20.0);
        canvas.draw_text(20.0, 30.0, "page two", FontId::HelveticaBold, 14.0, Color::TEXT);
        canvas
    }

    #[test]
    fn test_write_pdf_structure() {
        let bytes = write_pdf(&sample_canvas(), None);
        assert!(bytes.starts_with(b"%PDF-1.4"));
        let validation = validate_pdf_bytes(&bytes);
        assert!(validation.valid, "errors: {:?}", validation.errors);
        assert_eq!(validation.page_count, 2);
        // 5 fonts + 2*(content+page) + pages + catalog + info
        assert_eq!(validation.object_count, 12);
    }

    #[test]
    fn test_text_escaped_in_stream() {
        let bytes = write_pdf(&sample_canvas(), None);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(hello \\(pdf\\)) Tj"));
    }

    #[test]
    fn test_title_metadata() {
        let bytes = write_pdf(&sample_canvas(), Some("My (nice) Doc"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Producer (mdpress)"));
        assert!(text.contains("/Title (My \\(nice\\) Doc)"));
    }

    #[test]
    fn test_media_box_is_a4() {
        let bytes = write_pdf(&sample_canvas(), None);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/MediaBox [0 0 595.28 841.89]"));
    }

    #[test]
    fn test_y_axis_flip() {
        // a baseline near the top of the canvas lands near the top of the
        // PDF coordinate space (large y)
        assert!(y_pt(20.0) > 700.0);
        assert!(y_pt(280.0) < 100.0);
    }

    #[test]
    fn test_circle_emits_four_curves() {
        let mut out = String::new();
        serialize_circle(&mut out, 25.0, 80.0, 0.8, Color::TEXT, true);
        assert_eq!(out.matches(" c\n").count(), 4);
        assert!(out.contains("f\nQ"));
    }

    #[test]
    fn test_rotated_text_uses_matrix() {
        let mut canvas = Canvas::new(20.0);
        canvas.page_mut(0).push_background(DrawOp::Text {
            x: 60.0,
            y: 180.0,
            text: "DRAFT".into(),
            font: FontId::HelveticaBold,
            size: 40.0,
            color: Color::WATERMARK,
            angle: 45.0,
        });
        let bytes = write_pdf(&canvas, None);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Tm"));
        assert!(text.contains("0.7071"));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let validation = validate_pdf_bytes(b"not a pdf at all");
        assert!(!validation.valid);
        assert!(!validation.errors.is_empty());
    }
}
