use std::sync::Arc;

use crate::WizardError;

/// Largest resume accepted by the wizard.
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;
/// The only document type the generation API can read.
pub const ACCEPTED_MIME_TYPE: &str = "application/pdf";

pub type UploadId = u64;

/// A file handed over by the picker or a drag-and-drop surface.
#[derive(Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub contents: Arc<[u8]>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: contents.len() as u64,
            mime_type: mime_type.into(),
            contents: contents.into(),
        }
    }

    /// Size checks run first, so an oversized file of the wrong type reports its size.
    pub fn validate(&self) -> Result<(), WizardError> {
        if self.size_bytes > MAX_RESUME_BYTES {
            return Err(WizardError::FileTooLarge);
        }
        if self.mime_type != ACCEPTED_MIME_TYPE {
            return Err(WizardError::InvalidFileType);
        }
        Ok(())
    }
}

// The contents can be megabytes; keep Debug output readable.
impl std::fmt::Debug for FileCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCandidate")
            .field("name", &self.name)
            .field("size_bytes", &self.size_bytes)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadState {
    pub file: Option<FileCandidate>,
    pub progress: u8,
    pub is_uploading: bool,
    /// Id of the live upload; callbacks carrying any other id are stale.
    pub upload_id: Option<UploadId>,
}

impl UploadState {
    /// Applies a progress report. Returns true when this report finished the upload.
    pub(crate) fn advance(&mut self, upload_id: UploadId, percent: u8) -> bool {
        if !self.is_current(upload_id) || !self.is_uploading {
            return false;
        }
        self.progress = self.progress.max(percent.min(100));
        if self.progress == 100 {
            self.is_uploading = false;
            return true;
        }
        false
    }

    pub(crate) fn is_current(&self, upload_id: UploadId) -> bool {
        self.upload_id == Some(upload_id)
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.file.is_some() && !self.is_uploading && self.progress == 100
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Human readable size, e.g. `2 MB` or `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}
