//! CoverCraft core: pure wizard state machine and view-model helpers.
mod effect;
mod error;
mod letter;
mod msg;
mod state;
mod template;
mod update;
mod upload;
mod view_model;

pub use effect::{Effect, GenerationRequest, Notification, AUTO_ADVANCE_DELAY};
pub use error::WizardError;
pub use letter::{LetterField, LetterRecord};
pub use msg::Msg;
pub use state::{AppState, FormField, RequestId, WizardStep};
pub use template::{HeaderStyle, ParseChoiceError, TemplateId, Tone};
pub use update::update;
pub use upload::{
    format_file_size, FileCandidate, UploadId, UploadState, ACCEPTED_MIME_TYPE, MAX_RESUME_BYTES,
};
pub use view_model::{AppViewModel, HeaderBlock, LetterPreview, RecipientBlock};
