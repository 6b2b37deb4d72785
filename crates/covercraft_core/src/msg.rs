use crate::{FileCandidate, FormField, LetterField, LetterRecord, RequestId, TemplateId, Tone};
use crate::{UploadId, WizardStep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked or dropped a resume file.
    FileSelected(FileCandidate),
    /// User removed the selected file.
    FileRemoved,
    /// User typed into one of the form inputs.
    FieldEdited { field: FormField, value: String },
    /// User picked a tone.
    ToneSelected(Tone),
    /// User pressed a step button in the wizard navigation.
    StepSelected(WizardStep),
    /// User clicked Generate.
    GenerateClicked,
    /// User clicked Edit or Save on the generated letter.
    EditToggled,
    /// User edited a field of the letter while in edit mode.
    LetterFieldEdited { field: LetterField, value: String },
    /// User picked a presentation template.
    TemplateSelected(TemplateId),
    /// User asked for the document download.
    DownloadClicked,
    /// Upload reporter progress.
    UploadProgressed { upload_id: UploadId, percent: u8 },
    /// Upload reporter finished.
    UploadCompleted { upload_id: UploadId },
    /// The post-upload delay elapsed.
    AutoAdvanceDue { upload_id: UploadId },
    /// Generation API returned a letter.
    GenerationSucceeded {
        request_id: RequestId,
        letter: LetterRecord,
    },
    /// Generation API call failed; `reason` is for logs only.
    GenerationFailed { request_id: RequestId, reason: String },
    /// Export finished with the written file name, or an error description.
    ExportFinished { result: Result<String, String> },
}
