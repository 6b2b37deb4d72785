use std::path::Path;

use covercraft_core::{LetterField, LetterRecord};
use covercraft_logging::craft_info;

use crate::filename::export_filename;
use crate::layout::{layout_letter, LaidOutLetter, PageSettings};
use crate::pdf::{write_pdf, PdfMetadata};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::ExportSummary;

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub page: PageSettings,
    /// PDF date string stamped into the document info. Empty leaves it out.
    pub creation_date: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Letter rendered in memory, before it touches the filesystem.
#[derive(Debug, Clone)]
pub struct RenderedLetter {
    pub filename: String,
    pub layout: LaidOutLetter,
    pub bytes: Vec<u8>,
}

/// Lays out and serialises `letter`. Pure: same letter and options, same bytes.
pub fn render_letter(letter: &LetterRecord, options: &ExportOptions) -> RenderedLetter {
    let sender = letter.get(LetterField::SenderName);
    let filename = export_filename(sender);
    let layout = layout_letter(letter, &options.page);
    let title = match sender.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Cover Letter - {name}"),
        None => "Cover Letter".to_string(),
    };
    let bytes = write_pdf(
        &layout,
        &PdfMetadata {
            title,
            creation_date: options.creation_date.clone(),
        },
    );
    RenderedLetter {
        filename,
        layout,
        bytes,
    }
}

/// Renders `letter` and writes it into `output_dir` under its derived filename.
pub fn export_letter(
    letter: &LetterRecord,
    output_dir: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let rendered = render_letter(letter, options);
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let output_path = writer.write(&rendered.filename, &rendered.bytes)?;
    craft_info!(
        "exported {} ({} pages, {} bytes)",
        output_path.display(),
        rendered.layout.pages.len(),
        rendered.bytes.len()
    );
    Ok(ExportSummary {
        filename: rendered.filename,
        output_path,
        page_count: rendered.layout.pages.len(),
        byte_len: rendered.bytes.len() as u64,
    })
}
