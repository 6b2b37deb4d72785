use crate::effect::AUTO_ADVANCE_DELAY;
use crate::{
    AppState, Effect, FileCandidate, FormField, GenerationRequest, Msg, Notification, UploadState,
    WizardError, WizardStep,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(candidate) => select_file(&mut state, candidate),
        Msg::FileRemoved => {
            let upload = state.upload_mut();
            let cancelled = upload.upload_id.filter(|_| upload.is_uploading);
            let had_file = upload.file.is_some() || upload.progress > 0;
            upload.clear();
            if had_file {
                state.mark_dirty();
            }
            cancelled
                .map(|upload_id| vec![Effect::CancelUpload { upload_id }])
                .unwrap_or_default()
        }
        Msg::FieldEdited { field, value } => {
            state.set_form_field(field, value);
            Vec::new()
        }
        Msg::ToneSelected(tone) => {
            state.set_tone(tone);
            Vec::new()
        }
        Msg::StepSelected(step) => {
            state.set_step(step);
            Vec::new()
        }
        Msg::GenerateClicked => generate(&mut state),
        Msg::EditToggled => {
            state.toggle_editing();
            Vec::new()
        }
        Msg::LetterFieldEdited { field, value } => {
            if state.is_editing() {
                if let Some(letter) = state.editable_letter_mut() {
                    if letter.get(field) != Some(value.as_str()) {
                        letter.set(field, value);
                        state.mark_dirty();
                    }
                }
            }
            Vec::new()
        }
        Msg::TemplateSelected(template) => {
            state.set_template(template);
            Vec::new()
        }
        Msg::DownloadClicked => match state.editable_letter().cloned() {
            Some(letter) => {
                state.clear_error();
                vec![Effect::ExportLetter { letter }]
            }
            None => Vec::new(),
        },
        Msg::UploadProgressed { upload_id, percent } => {
            let before = state.upload().progress;
            let finished = state.upload_mut().advance(upload_id, percent);
            if state.upload().progress != before {
                state.mark_dirty();
            }
            if finished {
                vec![Effect::ScheduleAutoAdvance {
                    upload_id,
                    delay: AUTO_ADVANCE_DELAY,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::UploadCompleted { upload_id } => {
            if state.upload_mut().advance(upload_id, 100) {
                state.mark_dirty();
                vec![Effect::ScheduleAutoAdvance {
                    upload_id,
                    delay: AUTO_ADVANCE_DELAY,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::AutoAdvanceDue { upload_id } => {
            let upload = state.upload();
            if upload.is_current(upload_id) && upload.is_complete() {
                state.set_step(WizardStep::JobDetails);
            }
            Vec::new()
        }
        Msg::GenerationSucceeded { request_id, letter } => {
            if state.finish_generation(request_id) {
                state.store_letter(letter.normalized());
                vec![Effect::Notify(Notification::LetterGenerated)]
            } else {
                Vec::new()
            }
        }
        Msg::GenerationFailed { request_id, .. } => {
            if state.finish_generation(request_id) {
                state.set_error(WizardError::GenerationFailed);
            }
            Vec::new()
        }
        Msg::ExportFinished { result } => {
            match result {
                Ok(filename) => {
                    state.clear_error();
                    state.set_last_export(filename);
                }
                Err(reason) => state.set_error(WizardError::ExportFailed(reason)),
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn select_file(state: &mut AppState, candidate: FileCandidate) -> Vec<Effect> {
    state.clear_error();
    if let Err(error) = candidate.validate() {
        state.set_error(error);
        return Vec::new();
    }

    let mut effects = Vec::with_capacity(2);
    let previous = state.upload();
    if let Some(upload_id) = previous.upload_id.filter(|_| previous.is_uploading) {
        effects.push(Effect::CancelUpload { upload_id });
    }

    let upload_id = state.allocate_upload_id();
    let size_bytes = candidate.size_bytes;
    *state.upload_mut() = UploadState {
        file: Some(candidate),
        progress: 0,
        is_uploading: true,
        upload_id: Some(upload_id),
    };
    state.mark_dirty();
    effects.push(Effect::StartUpload {
        upload_id,
        size_bytes,
    });
    effects
}

fn generate(state: &mut AppState) -> Vec<Effect> {
    // The control is not rendered before the last step and is disabled while loading.
    if state.is_loading() || state.step() != WizardStep::Customize {
        return Vec::new();
    }
    let Some(resume) = state.upload().file.clone() else {
        state.set_error(WizardError::MissingResume);
        return Vec::new();
    };
    if state.job_description().trim().is_empty() {
        state.set_error(WizardError::MissingJobDescription);
        return Vec::new();
    }

    let request = GenerationRequest {
        resume,
        job_description: state.job_description().to_string(),
        tone: state.tone(),
        user_skills: state.form_field(FormField::UserSkills).to_string(),
        company_info: state.form_field(FormField::CompanyInfo).to_string(),
    };
    let request_id = state.allocate_request_id();
    state.begin_generation(request_id);
    vec![Effect::RequestGeneration {
        request_id,
        request,
    }]
}
