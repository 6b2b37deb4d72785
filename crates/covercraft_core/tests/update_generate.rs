use std::sync::Once;

use covercraft_core::{
    update, AppState, Effect, FileCandidate, FormField, LetterField, LetterRecord, Msg,
    Notification, RequestId, Tone, WizardError, WizardStep,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(covercraft_logging::initialize_for_tests);
}

fn pdf() -> FileCandidate {
    FileCandidate::new("resume.pdf", "application/pdf", b"%PDF-1.4 resume".to_vec())
}

fn edit(state: AppState, field: FormField, value: &str) -> AppState {
    update(
        state,
        Msg::FieldEdited {
            field,
            value: value.to_string(),
        },
    )
    .0
}

fn ready_state() -> AppState {
    let (state, _) = update(AppState::new(), Msg::FileSelected(pdf()));
    let state = edit(state, FormField::JobDescription, "Build reliable Rust services.");
    update(state, Msg::StepSelected(WizardStep::Customize)).0
}

fn request_id(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::RequestGeneration { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("generation request")
}

fn sample_letter() -> LetterRecord {
    let mut letter = LetterRecord::default();
    letter.set(LetterField::SenderName, "Ada Lovelace");
    letter.set(LetterField::Salutation, "Dear Hiring Team,");
    letter.set(LetterField::Body, "First.\n\nSecond.");
    letter.set(LetterField::Closing, "Sincerely,");
    letter
}

#[test]
fn generate_sends_all_inputs_once() {
    init_logging();
    let state = ready_state();
    let state = edit(state, FormField::UserSkills, "Rust, SQL");
    let state = edit(state, FormField::CompanyInfo, "Makes engines");
    let (state, _) = update(state, Msg::ToneSelected(Tone::Formal));
    assert!(state.view().can_generate);

    let (state, effects) = update(state, Msg::GenerateClicked);
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::RequestGeneration { request, .. } => {
            assert_eq!(request.resume.name, "resume.pdf");
            assert_eq!(request.job_description, "Build reliable Rust services.");
            assert_eq!(request.tone, Tone::Formal);
            assert_eq!(request.user_skills, "Rust, SQL");
            assert_eq!(request.company_info, "Makes engines");
        }
        other => panic!("unexpected effect {other:?}"),
    }
    assert!(state.is_loading());
    assert!(!state.view().can_generate);
}

#[test]
fn empty_job_description_never_requests() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FileSelected(pdf()));
    let state = edit(state, FormField::JobDescription, "   ");
    let (state, _) = update(state, Msg::StepSelected(WizardStep::Customize));
    assert!(!state.view().can_generate);

    let (state, effects) = update(state, Msg::GenerateClicked);
    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(state.error(), Some(&WizardError::MissingJobDescription));
    assert_eq!(
        state.view().error_message.as_deref(),
        Some("Please provide the job description.")
    );
}

#[test]
fn missing_resume_is_reported_first() {
    init_logging();
    let state = edit(AppState::new(), FormField::JobDescription, "");
    let (state, _) = update(state, Msg::StepSelected(WizardStep::Customize));
    let (state, effects) = update(state, Msg::GenerateClicked);
    assert!(effects.is_empty());
    assert_eq!(state.error(), Some(&WizardError::MissingResume));
}

#[test]
fn generate_outside_customize_step_is_ignored() {
    init_logging();
    let state = ready_state();
    let (state, _) = update(state, Msg::StepSelected(WizardStep::JobDetails));
    let (state, effects) = update(state, Msg::GenerateClicked);
    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(state.error(), None);
}

#[test]
fn rapid_clicks_issue_a_single_request() {
    init_logging();
    let (mut state, first) = update(ready_state(), Msg::GenerateClicked);
    assert_eq!(first.len(), 1);
    for _ in 0..5 {
        let (next, effects) = update(state, Msg::GenerateClicked);
        assert!(effects.is_empty());
        state = next;
    }
    assert!(state.is_loading());
}

#[test]
fn success_stores_normalized_letter_and_notifies() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::GenerateClicked);
    let request_id = request_id(&effects);

    let (state, effects) = update(
        state,
        Msg::GenerationSucceeded {
            request_id,
            letter: sample_letter(),
        },
    );

    assert_eq!(effects, vec![Effect::Notify(Notification::LetterGenerated)]);
    assert!(!state.is_loading());
    let expected = sample_letter().normalized();
    assert_eq!(state.generated_letter(), Some(&expected));
    assert_eq!(state.editable_letter(), Some(&expected));
    assert!(state.editable_letter().map(LetterRecord::is_complete).unwrap_or(false));
    assert!(state.view().preview.is_some());
}

#[test]
fn failure_sets_generic_error_and_keeps_inputs() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::GenerateClicked);
    let request_id = request_id(&effects);

    let (state, effects) = update(
        state,
        Msg::GenerationFailed {
            request_id,
            reason: "http status 500".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(state.error(), Some(&WizardError::GenerationFailed));
    assert_eq!(state.job_description(), "Build reliable Rust services.");
    assert!(state.upload().file.is_some());
    assert_eq!(state.editable_letter(), None);

    // The attempt can be retried.
    let (state, effects) = update(state, Msg::GenerateClicked);
    assert_eq!(effects.len(), 1);
    assert_eq!(state.error(), None);
}

#[test]
fn regenerate_clears_previous_letter_and_ignores_stale_results() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::GenerateClicked);
    let first = request_id(&effects);
    let (state, _) = update(
        state,
        Msg::GenerationSucceeded {
            request_id: first,
            letter: sample_letter(),
        },
    );

    let (state, effects) = update(state, Msg::GenerateClicked);
    let second = request_id(&effects);
    assert_ne!(first, second);
    assert_eq!(state.generated_letter(), None);
    assert_eq!(state.view().preview, None);

    let (state, effects) = update(
        state,
        Msg::GenerationSucceeded {
            request_id: first,
            letter: sample_letter(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.is_loading());
    assert_eq!(state.editable_letter(), None);
}
