//! PDF object serialization.
//!
//! Writes a laid-out document as a complete PDF 1.4 file: header,
//! catalog, page tree, Type1 font dictionaries for the two Helvetica
//! faces, one uncompressed content stream per page, link annotations,
//! cross-reference table and trailer.

use std::fmt::Write as _;

use mdpress_compose::{FontFamily, Rgb};

use crate::layout::{Layout, Page};

/// Reserved object ids: catalog, page tree, regular font, bold font.
const FIRST_PAGE_OBJECT: u32 = 5;

/// Serialize a layout into PDF bytes.
pub(crate) fn write_pdf(layout: &Layout) -> Vec<u8> {
    let mut pdf = PdfBuffer::new();

    // Object ids are assigned up front: each page takes one page object,
    // one content stream, and one object per link annotation.
    let mut page_ids = Vec::with_capacity(layout.pages.len());
    let mut next_id = FIRST_PAGE_OBJECT;
    for page in &layout.pages {
        page_ids.push(next_id);
        next_id += 2 + u32::try_from(page.links.len()).unwrap_or(0);
    }
    let object_count = next_id - 1;

    pdf.begin_object(1);
    pdf.push_str("<< /Type /Catalog /Pages 2 0 R >>\n");
    pdf.end_object();

    pdf.begin_object(2);
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");
    pdf.push_str(&format!(
        "<< /Type /Pages /Kids [{kids}] /Count {} >>\n",
        layout.pages.len()
    ));
    pdf.end_object();

    pdf.begin_object(3);
    pdf.push_str(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\n",
    );
    pdf.end_object();

    pdf.begin_object(4);
    pdf.push_str(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>\n",
    );
    pdf.end_object();

    for (page, &page_id) in layout.pages.iter().zip(&page_ids) {
        let content_id = page_id + 1;
        let annot_ids: Vec<u32> = (0..page.links.len())
            .map(|i| content_id + 1 + u32::try_from(i).unwrap_or(0))
            .collect();

        pdf.begin_object(page_id);
        let mut dict = format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {content_id} 0 R",
            fmt_num(layout.width),
            fmt_num(layout.height),
        );
        if !annot_ids.is_empty() {
            let refs = annot_ids
                .iter()
                .map(|id| format!("{id} 0 R"))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = write!(dict, " /Annots [{refs}]");
        }
        dict.push_str(" >>\n");
        pdf.push_str(&dict);
        pdf.end_object();

        let stream = content_stream(page);
        pdf.begin_object(content_id);
        pdf.push_str(&format!("<< /Length {} >>\nstream\n", stream.len()));
        pdf.push_bytes(&stream);
        pdf.push_str("endstream\n");
        pdf.end_object();

        for (link, &annot_id) in page.links.iter().zip(&annot_ids) {
            pdf.begin_object(annot_id);
            let [x1, y1, x2, y2] = link.rect;
            pdf.push_str(&format!(
                "<< /Type /Annot /Subtype /Link /Rect [{} {} {} {}] /Border [0 0 0] \
                 /A << /S /URI /URI (",
                fmt_num(x1),
                fmt_num(y1),
                fmt_num(x2),
                fmt_num(y2),
            ));
            pdf.push_bytes(&escape_string(link.href.as_bytes()));
            pdf.push_str(") >> >>\n");
            pdf.end_object();
        }
    }

    pdf.finish(object_count)
}

/// Build the uncompressed content stream for one page.
fn content_stream(page: &Page) -> Vec<u8> {
    let mut stream = Vec::new();

    for rule in &page.rules {
        stream.extend_from_slice(
            format!(
                "q {} {} {} {} {} re f Q\n",
                color_ops(rule.color),
                fmt_num(rule.x),
                fmt_num(rule.y),
                fmt_num(rule.width),
                fmt_num(rule.height),
            )
            .as_bytes(),
        );
    }

    for text in &page.texts {
        let font = match text.font {
            FontFamily::Helvetica => "F1",
            FontFamily::HelveticaBold => "F2",
        };
        stream.extend_from_slice(
            format!(
                "BT /{font} {} Tf {} {} {} Td (",
                fmt_num(text.size),
                color_ops(text.color),
                fmt_num(text.x),
                fmt_num(text.y),
            )
            .as_bytes(),
        );
        stream.extend_from_slice(&escape_string(&crate::metrics::encode_winansi(&text.text)));
        stream.extend_from_slice(b") Tj ET\n");
    }

    stream
}

/// `r g b rg` fill color operator with components in 0..1.
fn color_ops(color: Rgb) -> String {
    format!(
        "{} {} {} rg",
        fmt_num(f32::from(color.r) / 255.0),
        fmt_num(f32::from(color.g) / 255.0),
        fmt_num(f32::from(color.b) / 255.0),
    )
}

/// Format a number with two decimals, trimming trailing zeros.
fn fmt_num(value: f32) -> String {
    let mut s = format!("{value:.2}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/// Escape a byte string for a PDF literal string: backslash-escape the
/// delimiters, octal-escape control bytes.
fn escape_string(bytes: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => {
                escaped.push(b'\\');
                escaped.push(byte);
            }
            0x00..=0x1f => {
                escaped.extend_from_slice(format!("\\{byte:03o}").as_bytes());
            }
            _ => escaped.push(byte),
        }
    }
    escaped
}

/// Accumulates objects and their byte offsets, then emits xref + trailer.
struct PdfBuffer {
    buf: Vec<u8>,
    offsets: Vec<(u32, usize)>,
}

impl PdfBuffer {
    fn new() -> Self {
        let mut buf = Vec::with_capacity(4096);
        buf.extend_from_slice(b"%PDF-1.4\n");
        // Binary marker comment so transports treat the file as binary
        buf.extend_from_slice(&[b'%', 0xe2, 0xe3, 0xcf, 0xd3, b'\n']);
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn begin_object(&mut self, id: u32) {
        self.offsets.push((id, self.buf.len()));
        self.push_str(&format!("{id} 0 obj\n"));
    }

    fn end_object(&mut self) {
        self.push_str("endobj\n");
    }

    fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn finish(mut self, object_count: u32) -> Vec<u8> {
        self.offsets.sort_unstable_by_key(|&(id, _)| id);

        let xref_start = self.buf.len();
        self.push_str(&format!("xref\n0 {}\n", object_count + 1));
        self.push_str("0000000000 65535 f \n");
        for i in 0..self.offsets.len() {
            let offset = self.offsets[i].1;
            self.push_str(&format!("{offset:010} 00000 n \n"));
        }
        self.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
            object_count + 1
        ));
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::lay_out;
    use crate::PageSize;
    use mdpress_compose::{StyleSheet, tokenize, transduce};

    fn pdf_for(markdown: &str, size: PageSize) -> Vec<u8> {
        let styles = StyleSheet::default();
        let tree = transduce(&tokenize(markdown), &styles);
        write_pdf(&lay_out(&tree, size))
    }

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_file_framing() {
        let bytes = pdf_for("# Hello", PageSize::Letter);
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));

        let text = as_text(&bytes);
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Type /Pages"));
        assert!(text.contains("startxref"));
    }

    #[test]
    fn test_letter_media_box() {
        let text = as_text(&pdf_for("x", PageSize::Letter));
        assert!(text.contains("/MediaBox [0 0 612 792]"));
    }

    #[test]
    fn test_a4_media_box() {
        let text = as_text(&pdf_for("x", PageSize::A4));
        assert!(text.contains("/MediaBox [0 0 595.28 841.89]"));
    }

    #[test]
    fn test_text_reaches_stream() {
        let text = as_text(&pdf_for("Hello world", PageSize::Letter));
        assert!(text.contains("(Hello world) Tj"));
        assert!(text.contains("/F1 12 Tf"));
    }

    #[test]
    fn test_heading_uses_bold_font() {
        let text = as_text(&pdf_for("# Big", PageSize::Letter));
        assert!(text.contains("/F2 24 Tf"));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
    }

    #[test]
    fn test_link_annotation_written() {
        let text = as_text(&pdf_for("[go](http://example.com/x)", PageSize::Letter));
        assert!(text.contains("/Subtype /Link"));
        assert!(text.contains("/URI (http://example.com/x)"));
        // Underline rule for the link run
        assert!(text.contains("re f"));
    }

    #[test]
    fn test_bullet_byte_in_stream() {
        let bytes = pdf_for("- item", PageSize::Letter);
        // WinAnsi bullet inside a literal string
        assert!(contains_bytes(&bytes, &[b'(', 0x95, b' ']));
    }

    #[test]
    fn test_delimiters_escaped() {
        let text = as_text(&pdf_for("a (parenthetical) remark", PageSize::Letter));
        assert!(text.contains(r"\(parenthetical\)"));
    }

    #[test]
    fn test_pagination_grows_page_count() {
        let doc = "a paragraph of filler text\n\n".repeat(120);
        let text = as_text(&pdf_for(&doc, PageSize::Letter));
        let pages = text.matches("/Type /Page ").count();
        assert!(pages > 1, "expected multiple pages, got {pages}");
        assert!(text.contains(&format!("/Count {pages}")));
    }

    #[test]
    fn test_xref_entry_count_matches_objects() {
        let bytes = pdf_for("# T\n\npara", PageSize::Letter);
        let text = as_text(&bytes);
        let objects = text.matches(" 0 obj").count();
        assert!(text.contains(&format!("/Size {}", objects + 1)));
    }

    #[test]
    fn test_fmt_num_trims() {
        assert_eq!(fmt_num(612.0), "612");
        assert_eq!(fmt_num(595.28), "595.28");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(0.0), "0");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string(b"a(b)c"), b"a\\(b\\)c".to_vec());
        assert_eq!(escape_string(b"back\\slash"), b"back\\\\slash".to_vec());
        assert_eq!(escape_string(&[0x01]), b"\\001".to_vec());
    }
}
