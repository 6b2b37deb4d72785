//! Minimal, deterministic PDF writer for laid-out letters.
//!
//! Output uses the standard Times faces with WinAnsi encoding and uncompressed
//! content streams, so identical input always yields identical bytes.

use std::fmt::Write as _;

use crate::font_metrics::{FontFace, MM_PER_PT};
use crate::layout::{LaidOutLetter, TextLine};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfMetadata {
    pub title: String,
    /// PDF date string such as `D:20240101120000Z`. Omitted when empty.
    pub creation_date: String,
}

const PRODUCER: &str = "CoverCraft";
const FIRST_PAGE_OBJECT: usize = 6;

pub fn write_pdf(letter: &LaidOutLetter, metadata: &PdfMetadata) -> Vec<u8> {
    let page_width_pt = letter.settings.width_mm / MM_PER_PT;
    let page_height_pt = letter.settings.height_mm / MM_PER_PT;
    let page_count = letter.pages.len().max(1);

    let mut objects: Vec<Vec<u8>> = Vec::with_capacity(FIRST_PAGE_OBJECT - 1 + page_count * 2);

    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

    let kids: Vec<String> = (0..page_count)
        .map(|index| format!("{} 0 R", FIRST_PAGE_OBJECT + index * 2))
        .collect();
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} /MediaBox [0 0 {} {}] >>",
            kids.join(" "),
            page_count,
            format_number(page_width_pt),
            format_number(page_height_pt)
        )
        .into_bytes(),
    );

    for face in [FontFace::TimesRoman, FontFace::TimesBold] {
        objects.push(
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                face.base_font()
            )
            .into_bytes(),
        );
    }

    let mut info = b"<< /Title ".to_vec();
    info.extend(encode_string(&metadata.title));
    info.extend(b" /Producer ");
    info.extend(encode_string(PRODUCER));
    if !metadata.creation_date.is_empty() {
        info.extend(b" /CreationDate ");
        info.extend(encode_string(&metadata.creation_date));
    }
    info.extend(b" >>");
    objects.push(info);

    for index in 0..page_count {
        let lines: &[TextLine] = letter
            .pages
            .get(index)
            .map(|page| page.lines.as_slice())
            .unwrap_or(&[]);
        let content = content_stream(lines, page_height_pt);
        let content_object = FIRST_PAGE_OBJECT + index * 2 + 1;

        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /Resources << /Font << /{} 3 0 R /{} 4 0 R >> >> /Contents {} 0 R >>",
                FontFace::TimesRoman.resource_name(),
                FontFace::TimesBold.resource_name(),
                content_object
            )
            .into_bytes(),
        );

        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend(&content);
        stream.extend(b"\nendstream");
        objects.push(stream);
    }

    serialize(objects)
}

fn serialize(objects: Vec<Vec<u8>>) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend(format!("{} 0 obj\n", index + 1).into_bytes());
        out.extend(body);
        out.extend(b"\nendobj\n");
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = writeln!(xref, "{offset:010} 00000 n ");
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );
    out.extend(xref.into_bytes());
    out
}

fn content_stream(lines: &[TextLine], page_height_pt: f32) -> Vec<u8> {
    let mut out = Vec::new();
    for line in lines.iter().filter(|line| !line.text.trim().is_empty()) {
        let x = line.x_mm / MM_PER_PT;
        let y = page_height_pt - line.y_mm / MM_PER_PT;
        out.extend(
            format!(
                "BT /{} {} Tf {} {} Td ",
                line.face.resource_name(),
                format_number(line.size_pt),
                format_number(x),
                format_number(y)
            )
            .into_bytes(),
        );
        out.extend(encode_string(&line.text));
        out.extend(b" Tj ET\n");
    }
    out
}

fn format_number(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.2}")
    }
}

/// Literal string in WinAnsi encoding. Unmappable characters become `?`.
fn encode_string(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            ' '..='~' => out.push(c as u8),
            '\t' => out.push(b' '),
            _ => match win_ansi_byte(c) {
                Some(byte) => out.extend(format!("\\{byte:03o}").into_bytes()),
                None => out.push(b'?'),
            },
        }
    }
    out.push(b')');
    out
}

const WIN_ANSI_HIGH: [(char, u8); 13] = [
    ('\u{20AC}', 0x80),
    ('\u{2026}', 0x85),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{2122}', 0x99),
    ('\u{0160}', 0x8A),
    ('\u{0161}', 0x9A),
    ('\u{0152}', 0x8C),
];

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    if (0xA0..=0xFF).contains(&code) {
        return u8::try_from(code).ok();
    }
    WIN_ANSI_HIGH
        .iter()
        .find(|(mapped, _)| *mapped == c)
        .map(|(_, byte)| *byte)
}

fn win_ansi_char(byte: u8) -> char {
    if byte >= 0xA0 {
        return char::from(byte);
    }
    WIN_ANSI_HIGH
        .iter()
        .find(|(_, mapped)| *mapped == byte)
        .map(|(c, _)| *c)
        .unwrap_or('?')
}

/// Reads back the shown text of a document produced by [`write_pdf`], one entry
/// per text line, in drawing order.
pub fn read_text_lines(pdf: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pos = 0;
    while let Some(start) = pdf[pos..].iter().position(|b| *b == b'(') {
        let open = pos + start;
        let (text, close) = decode_string(pdf, open + 1);
        pos = close + 1;
        if pdf[pos.min(pdf.len())..].starts_with(b" Tj") {
            lines.push(text);
        }
        if pos >= pdf.len() {
            break;
        }
    }
    lines
}

/// Decodes a literal string body starting at `pos`. Returns the text and the
/// index of the closing parenthesis.
fn decode_string(pdf: &[u8], mut pos: usize) -> (String, usize) {
    let mut text = String::new();
    let mut depth = 0usize;
    while pos < pdf.len() {
        let byte = pdf[pos];
        match byte {
            b'\\' if pos + 1 < pdf.len() => {
                let next = pdf[pos + 1];
                if next.is_ascii_digit() {
                    let digits: Vec<u8> = pdf[pos + 1..]
                        .iter()
                        .take(3)
                        .take_while(|b| (b'0'..=b'7').contains(b))
                        .copied()
                        .collect();
                    let value = digits
                        .iter()
                        .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
                    text.push(win_ansi_char(u8::try_from(value).unwrap_or(b'?')));
                    pos += 1 + digits.len();
                } else {
                    text.push(char::from(next));
                    pos += 2;
                }
                continue;
            }
            b'(' => depth += 1,
            b')' if depth == 0 => return (text, pos),
            b')' => depth -= 1,
            _ => {}
        }
        text.push(if byte < 0x80 {
            char::from(byte)
        } else {
            win_ansi_char(byte)
        });
        pos += 1;
    }
    (text, pos)
}
