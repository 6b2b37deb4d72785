/// Stem used when the letter carries no sender name.
pub const DEFAULT_STEM: &str = "cover_letter";
pub const FILENAME_SUFFIX: &str = "_Cover_Letter.pdf";

const MAX_STEM_CHARS: usize = 80;

/// Filesystem-safe download name: `{sender}_Cover_Letter.pdf`.
pub fn export_filename(sender_name: Option<&str>) -> String {
    let stem = sanitize_stem(sender_name.unwrap_or(""));
    format!("{stem}{FILENAME_SUFFIX}")
}

fn sanitize_stem(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.trim().chars() {
        let c = if c.is_whitespace() || is_forbidden(c) {
            '_'
        } else {
            c
        };
        // Collapse multiple underscores
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        cleaned.push(c);
    }

    let mut stem: String = cleaned
        .trim_matches(&['_', '.'][..])
        .chars()
        .take(MAX_STEM_CHARS)
        .collect();
    if stem.is_empty() {
        stem = DEFAULT_STEM.to_string();
    }
    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
