use crate::upload::{UploadId, UploadState};
use crate::view_model::{AppViewModel, LetterPreview};
use crate::{format_file_size, LetterRecord, TemplateId, Tone, WizardError};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Upload = 1,
    JobDetails = 2,
    Customize = 3,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Upload,
        WizardStep::JobDetails,
        WizardStep::Customize,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    pub fn name(self) -> &'static str {
        match self {
            WizardStep::Upload => "Upload",
            WizardStep::JobDetails => "Job Details",
            WizardStep::Customize => "Customize",
        }
    }
}

/// Text inputs of the wizard form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    JobDescription,
    UserSkills,
    CompanyInfo,
}

/// The whole wizard session. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    step: WizardStep,
    upload: UploadState,
    job_description: String,
    tone: Tone,
    user_skills: String,
    company_info: String,
    generated_letter: Option<LetterRecord>,
    editable_letter: Option<LetterRecord>,
    is_editing: bool,
    selected_template: TemplateId,
    is_loading: bool,
    in_flight: Option<RequestId>,
    error: Option<WizardError>,
    last_export: Option<String>,
    next_upload_id: UploadId,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let file = self.upload.file.as_ref();
        AppViewModel {
            step: self.step,
            file_name: file.map(|f| f.name.clone()),
            file_size: file.map(|f| format_file_size(f.size_bytes)),
            upload_progress: self.upload.progress,
            is_uploading: self.upload.is_uploading,
            job_description: self.job_description.clone(),
            tone: self.tone,
            user_skills: self.user_skills.clone(),
            company_info: self.company_info.clone(),
            can_generate: self.can_generate(),
            is_loading: self.is_loading,
            is_editing: self.is_editing,
            error_message: self.error.as_ref().map(ToString::to_string),
            template: self.selected_template,
            preview: self
                .editable_letter
                .as_ref()
                .filter(|_| !self.is_loading)
                .map(|letter| LetterPreview::build(letter, self.selected_template, self.is_editing)),
            last_export: self.last_export.clone(),
            dirty: self.dirty,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn upload(&self) -> &UploadState {
        &self.upload
    }

    pub fn error(&self) -> Option<&WizardError> {
        self.error.as_ref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn generated_letter(&self) -> Option<&LetterRecord> {
        self.generated_letter.as_ref()
    }

    pub fn editable_letter(&self) -> Option<&LetterRecord> {
        self.editable_letter.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn selected_template(&self) -> TemplateId {
        self.selected_template
    }

    pub fn last_export(&self) -> Option<&str> {
        self.last_export.as_deref()
    }

    /// The generate control is shown on the last step and enabled only with complete inputs.
    pub fn can_generate(&self) -> bool {
        self.step == WizardStep::Customize
            && self.upload.file.is_some()
            && !self.job_description.trim().is_empty()
            && !self.is_loading
    }

    /// Returns and clears the re-render flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_step(&mut self, step: WizardStep) {
        if self.step != step {
            self.step = step;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_error(&mut self, error: WizardError) {
        self.error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn upload_mut(&mut self) -> &mut UploadState {
        &mut self.upload
    }

    pub(crate) fn allocate_upload_id(&mut self) -> UploadId {
        self.next_upload_id += 1;
        self.next_upload_id
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub(crate) fn set_form_field(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::JobDescription => &mut self.job_description,
            FormField::UserSkills => &mut self.user_skills,
            FormField::CompanyInfo => &mut self.company_info,
        };
        if *slot != value {
            *slot = value;
            self.mark_dirty();
        }
    }

    pub(crate) fn form_field(&self, field: FormField) -> &str {
        match field {
            FormField::JobDescription => &self.job_description,
            FormField::UserSkills => &self.user_skills,
            FormField::CompanyInfo => &self.company_info,
        }
    }

    pub(crate) fn set_tone(&mut self, tone: Tone) {
        if self.tone != tone {
            self.tone = tone;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_template(&mut self, template: TemplateId) {
        if self.selected_template != template {
            self.selected_template = template;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_generation(&mut self, request_id: RequestId) {
        self.is_loading = true;
        self.in_flight = Some(request_id);
        self.error = None;
        self.generated_letter = None;
        self.editable_letter = None;
        self.is_editing = false;
        self.mark_dirty();
    }

    /// Ends the in-flight request if `request_id` is the one being waited for.
    pub(crate) fn finish_generation(&mut self, request_id: RequestId) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        self.is_loading = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn store_letter(&mut self, letter: LetterRecord) {
        self.generated_letter = Some(letter.clone());
        self.editable_letter = Some(letter);
    }

    pub(crate) fn editable_letter_mut(&mut self) -> Option<&mut LetterRecord> {
        self.editable_letter.as_mut()
    }

    /// Flips edit mode. Leaving edit mode commits the draft.
    pub(crate) fn toggle_editing(&mut self) -> bool {
        if self.editable_letter.is_none() {
            return false;
        }
        if self.is_editing {
            self.generated_letter = self.editable_letter.clone();
        }
        self.is_editing = !self.is_editing;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_last_export(&mut self, filename: String) {
        self.last_export = Some(filename);
        self.mark_dirty();
    }
}
