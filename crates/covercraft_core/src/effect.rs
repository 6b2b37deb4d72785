use std::time::Duration;

use crate::{FileCandidate, LetterRecord, RequestId, Tone, UploadId};

/// Pause between a finished upload and the automatic move to the job details step.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartUpload { upload_id: UploadId, size_bytes: u64 },
    CancelUpload { upload_id: UploadId },
    ScheduleAutoAdvance { upload_id: UploadId, delay: Duration },
    RequestGeneration {
        request_id: RequestId,
        request: GenerationRequest,
    },
    /// The PDF has a single layout; templates only shape the preview.
    ExportLetter { letter: LetterRecord },
    Notify(Notification),
}

/// Inputs sent to the generation API in a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub resume: FileCandidate,
    pub job_description: String,
    pub tone: Tone,
    pub user_skills: String,
    pub company_info: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    LetterGenerated,
}

impl Notification {
    pub fn message(self) -> &'static str {
        match self {
            Notification::LetterGenerated => "Cover letter generated. Review it below.",
        }
    }
}
