use std::fmt;
use std::path::PathBuf;

use covercraft_core::{LetterRecord, RequestId, UploadId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadProgress {
        upload_id: UploadId,
        percent: u8,
    },
    UploadCompleted {
        upload_id: UploadId,
    },
    AutoAdvanceDue {
        upload_id: UploadId,
    },
    GenerationCompleted {
        request_id: RequestId,
        result: Result<LetterRecord, GenerationError>,
    },
    ExportCompleted {
        result: Result<ExportSummary, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub filename: String,
    pub output_path: PathBuf,
    pub page_count: usize,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerationError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GenerationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidRequest,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidResponse => write!(f, "invalid response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
