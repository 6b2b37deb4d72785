use covercraft_core::{LetterField, LetterRecord};

use crate::font_metrics::FontFace;

/// Page geometry and type sizes, in millimetres and points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    /// Baseline of the first line on every page.
    pub top_mm: f32,
    pub bottom_margin_mm: f32,
    pub name_size_pt: f32,
    pub text_size_pt: f32,
    pub body_line_mm: f32,
}

impl Default for PageSettings {
    fn default() -> Self {
        // A4 portrait.
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 15.0,
            top_mm: 20.0,
            bottom_margin_mm: 15.0,
            name_size_pt: 18.0,
            text_size_pt: 10.0,
            body_line_mm: 5.0,
        }
    }
}

impl PageSettings {
    pub fn text_width_mm(&self) -> f32 {
        self.width_mm - self.margin_mm * 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One line of text at an absolute position. `x_mm` is always the left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub face: FontFace,
    pub size_pt: f32,
    pub align: Align,
    pub field: LetterField,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutLetter {
    pub settings: PageSettings,
    pub pages: Vec<Page>,
}

impl LaidOutLetter {
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }

    /// Text of one field with its wrapped lines rejoined by single spaces.
    pub fn field_text(&self, field: LetterField) -> String {
        let parts: Vec<&str> = self
            .lines()
            .filter(|line| line.field == field)
            .map(|line| line.text.trim())
            .filter(|text| !text.is_empty())
            .collect();
        parts.join(" ")
    }

    /// Body lines grouped into paragraphs, split at blank lines.
    pub fn body_blocks(&self) -> Vec<Vec<&str>> {
        let mut blocks: Vec<Vec<&str>> = Vec::new();
        let mut current = Vec::new();
        for line in self.lines().filter(|line| line.field == LetterField::Body) {
            if line.text.trim().is_empty() {
                if !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
            } else {
                current.push(line.text.as_str());
            }
        }
        if !current.is_empty() {
            blocks.push(current);
        }
        blocks
    }
}

struct Cursor<'a> {
    settings: &'a PageSettings,
    pages: Vec<Page>,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(settings: &'a PageSettings) -> Self {
        Self {
            settings,
            pages: vec![Page::default()],
            y: settings.top_mm,
        }
    }

    fn place(
        &mut self,
        field: LetterField,
        text: &str,
        face: FontFace,
        size_pt: f32,
        align: Align,
    ) {
        if self.y > self.settings.height_mm - self.settings.bottom_margin_mm {
            self.pages.push(Page::default());
            self.y = self.settings.top_mm;
        }
        let x_mm = match align {
            Align::Left => self.settings.margin_mm,
            Align::Right => {
                self.settings.width_mm
                    - self.settings.margin_mm
                    - face.text_width_mm(text, size_pt)
            }
        };
        let line = TextLine {
            text: text.to_string(),
            x_mm,
            y_mm: self.y,
            face,
            size_pt,
            align,
            field,
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
    }

    /// Places each line of a multi-line field, `line_mm` apart.
    fn place_lines(
        &mut self,
        field: LetterField,
        text: &str,
        face: FontFace,
        size_pt: f32,
        align: Align,
        line_mm: f32,
    ) {
        let text = text.replace("\r\n", "\n");
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                self.advance(line_mm);
            }
            self.place(field, line, face, size_pt, align);
        }
    }

    fn advance(&mut self, dy_mm: f32) {
        self.y += dy_mm;
    }
}

/// Lays a letter out on pages. Absent fields render as empty lines; never fails.
pub fn layout_letter(letter: &LetterRecord, settings: &PageSettings) -> LaidOutLetter {
    use FontFace::{TimesBold, TimesRoman};
    use LetterField::*;

    let size = settings.text_size_pt;
    let mut cursor = Cursor::new(settings);

    let line = settings.body_line_mm;
    let name_size = settings.name_size_pt;
    cursor.place_lines(SenderName, letter.text(SenderName), TimesBold, name_size, Align::Right, 7.0);
    cursor.advance(7.0);
    let job_title = letter.text(SenderJobTitle);
    if !job_title.trim().is_empty() {
        cursor.place_lines(SenderJobTitle, job_title, TimesRoman, size, Align::Right, line);
        cursor.advance(5.0);
    }
    cursor.place_lines(SenderAddress, letter.text(SenderAddress), TimesRoman, size, Align::Right, line);
    cursor.advance(5.0);
    cursor.place_lines(SenderContact, letter.text(SenderContact), TimesRoman, size, Align::Right, line);
    cursor.advance(15.0);

    cursor.place_lines(Date, letter.text(Date), TimesRoman, size, Align::Left, line);
    cursor.advance(10.0);

    cursor.place_lines(RecipientName, letter.text(RecipientName), TimesBold, size, Align::Left, line);
    cursor.advance(5.0);
    for field in [RecipientTitle, CompanyName] {
        cursor.place_lines(field, letter.text(field), TimesRoman, size, Align::Left, line);
        cursor.advance(5.0);
    }
    cursor.place_lines(CompanyAddress, letter.text(CompanyAddress), TimesRoman, size, Align::Left, line);
    cursor.advance(15.0);

    cursor.place_lines(Salutation, letter.text(Salutation), TimesBold, size, Align::Left, line);
    cursor.advance(10.0);

    let body = prepare_body(letter.text(Body));
    let body_lines = wrap_text(&body, TimesRoman, size, settings.text_width_mm());
    for body_line in &body_lines {
        cursor.place(Body, body_line, TimesRoman, size, Align::Left);
        cursor.advance(line);
    }
    cursor.advance(10.0);

    cursor.place_lines(Closing, letter.text(Closing), TimesRoman, size, Align::Left, line);
    cursor.advance(10.0);
    cursor.place_lines(Signature, letter.text(Signature), TimesRoman, size, Align::Left, line);

    LaidOutLetter {
        settings: settings.clone(),
        pages: cursor.pages,
    }
}

/// Keeps paragraph breaks visible after wrapping by giving them a line of their own.
fn prepare_body(body: &str) -> String {
    body.replace("\r\n", "\n").replace("\n\n", "\n \n")
}

/// Greedy word wrap. Explicit newlines always break; words wider than the
/// line are split by character.
pub fn wrap_text(text: &str, face: FontFace, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut out = Vec::new();
    for raw_line in text.split('\n') {
        if raw_line.trim().is_empty() {
            out.push(raw_line.to_string());
            continue;
        }
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if face.text_width_mm(&candidate, size_pt) <= max_width_mm {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            if face.text_width_mm(word, size_pt) <= max_width_mm {
                current = word.to_string();
            } else {
                current = split_long_word(word, face, size_pt, max_width_mm, &mut out);
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    out
}

/// Pushes full-width chunks of `word` to `out` and returns the remainder.
fn split_long_word(
    word: &str,
    face: FontFace,
    size_pt: f32,
    max_width_mm: f32,
    out: &mut Vec<String>,
) -> String {
    let mut chunk = String::new();
    for c in word.chars() {
        chunk.push(c);
        if face.text_width_mm(&chunk, size_pt) > max_width_mm && chunk.chars().count() > 1 {
            chunk.pop();
            out.push(std::mem::take(&mut chunk));
            chunk.push(c);
        }
    }
    chunk
}
