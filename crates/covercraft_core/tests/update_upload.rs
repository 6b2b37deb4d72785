use std::sync::Once;

use covercraft_core::{
    update, AppState, Effect, FileCandidate, Msg, UploadId, WizardError, WizardStep,
    AUTO_ADVANCE_DELAY, MAX_RESUME_BYTES,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(covercraft_logging::initialize_for_tests);
}

fn pdf(size: usize) -> FileCandidate {
    FileCandidate::new("resume.pdf", "application/pdf", vec![b'%'; size])
}

fn select(state: AppState, file: FileCandidate) -> (AppState, UploadId) {
    let (state, effects) = update(state, Msg::FileSelected(file));
    let upload_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::StartUpload { upload_id, .. } => Some(*upload_id),
            _ => None,
        })
        .expect("start upload effect");
    (state, upload_id)
}

fn run_ticks(mut state: AppState, upload_id: UploadId, up_to: u8) -> (AppState, Vec<Effect>) {
    let mut last = Vec::new();
    let mut percent = 0;
    while percent < up_to {
        percent = (percent + 10).min(up_to);
        let (next, effects) = update(state, Msg::UploadProgressed { upload_id, percent });
        state = next;
        last = effects;
    }
    (state, last)
}

#[test]
fn oversized_file_is_rejected_and_not_stored() {
    init_logging();
    let mut big = pdf(8);
    big.size_bytes = MAX_RESUME_BYTES + 1;

    let (state, effects) = update(AppState::new(), Msg::FileSelected(big));

    assert!(effects.is_empty());
    assert!(state.upload().file.is_none());
    assert_eq!(state.error(), Some(&WizardError::FileTooLarge));
    assert_eq!(state.step(), WizardStep::Upload);
}

#[test]
fn wrong_mime_type_is_rejected() {
    init_logging();
    for mime in ["text/plain", "image/png", "application/x-pdf", ""] {
        let file = FileCandidate::new("resume", mime, vec![1, 2, 3]);
        let (state, effects) = update(AppState::new(), Msg::FileSelected(file));
        assert!(effects.is_empty());
        assert!(state.upload().file.is_none());
        assert_eq!(state.error(), Some(&WizardError::InvalidFileType));
    }
}

#[test]
fn each_attempt_clears_the_previous_error() {
    init_logging();
    let bad = FileCandidate::new("notes.txt", "text/plain", vec![1]);
    let (state, _) = update(AppState::new(), Msg::FileSelected(bad));
    assert!(state.error().is_some());

    let (state, _) = select(state, pdf(64));
    assert_eq!(state.error(), None);
}

#[test]
fn rejected_file_keeps_existing_upload() {
    init_logging();
    let (state, _) = select(AppState::new(), pdf(64));
    let bad = FileCandidate::new("notes.txt", "text/plain", vec![1]);
    let (state, _) = update(state, Msg::FileSelected(bad));

    assert_eq!(
        state.upload().file.as_ref().map(|f| f.name.as_str()),
        Some("resume.pdf")
    );
    assert_eq!(state.error(), Some(&WizardError::InvalidFileType));
}

#[test]
fn completed_upload_schedules_advance_to_job_details() {
    init_logging();
    let (state, upload_id) = select(AppState::new(), pdf(2 * 1024 * 1024));
    assert!(state.upload().is_uploading);
    assert_eq!(state.upload().progress, 0);

    let (state, effects) = run_ticks(state, upload_id, 100);
    assert!(!state.upload().is_uploading);
    assert_eq!(state.upload().progress, 100);
    assert_eq!(
        effects,
        vec![Effect::ScheduleAutoAdvance {
            upload_id,
            delay: AUTO_ADVANCE_DELAY,
        }]
    );
    assert_eq!(state.step(), WizardStep::Upload);

    // The completion callback after 100% must not finish the upload a second time.
    let (state, effects) = update(state, Msg::UploadCompleted { upload_id });
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::AutoAdvanceDue { upload_id });
    assert_eq!(state.step(), WizardStep::JobDetails);
}

#[test]
fn completion_callback_finishes_a_partial_upload() {
    init_logging();
    let (state, upload_id) = select(AppState::new(), pdf(32));
    let (state, _) = run_ticks(state, upload_id, 40);

    let (state, effects) = update(state, Msg::UploadCompleted { upload_id });
    assert_eq!(state.upload().progress, 100);
    assert!(!state.upload().is_uploading);
    assert_eq!(effects.len(), 1);
}

#[test]
fn remove_after_partial_upload_resets_and_cancels() {
    init_logging();
    let (state, upload_id) = select(AppState::new(), pdf(32));
    let (state, _) = run_ticks(state, upload_id, 30);
    assert_eq!(state.upload().progress, 30);

    let (state, effects) = update(state, Msg::FileRemoved);
    assert_eq!(effects, vec![Effect::CancelUpload { upload_id }]);
    assert!(state.upload().file.is_none());
    assert_eq!(state.upload().progress, 0);
    assert!(!state.upload().is_uploading);

    // Late timer callbacks are ignored.
    let (state, effects) = update(state, Msg::UploadProgressed { upload_id, percent: 40 });
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::UploadCompleted { upload_id });
    assert!(effects.is_empty());
    let (state, _) = update(state, Msg::AutoAdvanceDue { upload_id });
    assert_eq!(state.upload().progress, 0);
    assert_eq!(state.step(), WizardStep::Upload);
}

#[test]
fn remove_does_not_change_step() {
    init_logging();
    let (state, upload_id) = select(AppState::new(), pdf(32));
    let (state, _) = run_ticks(state, upload_id, 100);
    let (state, _) = update(state, Msg::AutoAdvanceDue { upload_id });
    assert_eq!(state.step(), WizardStep::JobDetails);

    let (state, effects) = update(state, Msg::FileRemoved);
    assert!(effects.is_empty());
    assert_eq!(state.step(), WizardStep::JobDetails);
    assert_eq!(state.upload().progress, 0);
}

#[test]
fn reselecting_cancels_the_running_upload() {
    init_logging();
    let (state, first) = select(AppState::new(), pdf(32));
    let (state, effects) = update(state, Msg::FileSelected(pdf(48)));

    let second = match effects.as_slice() {
        [Effect::CancelUpload { upload_id }, Effect::StartUpload { upload_id: next, .. }] => {
            assert_eq!(*upload_id, first);
            *next
        }
        other => panic!("unexpected effects {other:?}"),
    };
    assert_ne!(first, second);

    let (state, _) = update(state, Msg::UploadProgressed { upload_id: first, percent: 90 });
    assert_eq!(state.upload().progress, 0);
    let (state, _) = update(state, Msg::UploadProgressed { upload_id: second, percent: 10 });
    assert_eq!(state.upload().progress, 10);
}

#[test]
fn step_navigation_is_unrestricted() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::StepSelected(WizardStep::Customize));
    assert_eq!(state.step(), WizardStep::Customize);
    let (state, _) = update(state, Msg::StepSelected(WizardStep::Upload));
    assert_eq!(state.step(), WizardStep::Upload);
    let (mut state, _) = update(state, Msg::StepSelected(WizardStep::JobDetails));
    assert_eq!(state.step(), WizardStep::JobDetails);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn view_reports_upload_status() {
    init_logging();
    let (state, upload_id) = select(AppState::new(), pdf(2 * 1024 * 1024));
    let view = state.view();
    assert_eq!(view.file_name.as_deref(), Some("resume.pdf"));
    assert_eq!(view.file_size.as_deref(), Some("2 MB"));
    assert_eq!(view.upload_status(), Some("Uploading..."));

    let (state, _) = run_ticks(state, upload_id, 100);
    assert_eq!(state.view().upload_status(), Some("Upload Complete!"));
}
