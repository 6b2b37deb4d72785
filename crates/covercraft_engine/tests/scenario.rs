use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use covercraft_core::{
    update, AppState, Effect, FileCandidate, FormField, GenerationRequest, LetterField,
    LetterRecord, Msg, WizardStep,
};
use covercraft_engine::{
    read_text_lines, EngineConfig, EngineEvent, EngineHandle, GenerationError, LetterGenerator,
    UploadSettings,
};
use pretty_assertions::assert_eq;

struct FixedGenerator {
    letter: LetterRecord,
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl LetterGenerator for FixedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<LetterRecord, GenerationError> {
        assert!(!request.job_description.trim().is_empty());
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.letter.clone())
    }
}

fn mock_letter() -> LetterRecord {
    let mut letter = LetterRecord::default();
    letter.set(LetterField::SenderName, "Grace Hopper");
    letter.set(LetterField::SenderAddress, "Arlington, VA");
    letter.set(LetterField::SenderContact, "grace@example.com");
    letter.set(LetterField::SenderJobTitle, "Rear Admiral");
    letter.set(LetterField::Date, "October 18, 2026");
    letter.set(LetterField::RecipientName, "Howard Aiken");
    letter.set(LetterField::RecipientTitle, "Director");
    letter.set(LetterField::CompanyName, "Harvard Computation Lab");
    letter.set(LetterField::CompanyAddress, "Cambridge, MA");
    letter.set(LetterField::Salutation, "Dear Professor Aiken,");
    letter.set(
        LetterField::Body,
        "I would like to join the Mark I team.\n\nI enclose my resume.",
    );
    letter.set(LetterField::Closing, "Sincerely,");
    letter.set(LetterField::Signature, "Grace Hopper");
    letter
}

/// Drives the pure state machine against a live engine, the way the app does.
struct Session {
    state: AppState,
    engine: EngineHandle,
    notifications: usize,
}

impl Session {
    fn new(engine: EngineHandle) -> Self {
        Self {
            state: AppState::new(),
            engine,
            notifications: 0,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            match effect {
                Effect::StartUpload { upload_id, .. } => self.engine.start_upload(upload_id),
                Effect::CancelUpload { upload_id } => self.engine.cancel_upload(upload_id),
                Effect::ScheduleAutoAdvance { upload_id, .. } => self
                    .engine
                    .schedule_auto_advance(upload_id, Duration::from_millis(10)),
                Effect::RequestGeneration {
                    request_id,
                    request,
                } => self.engine.generate(request_id, request),
                Effect::ExportLetter { letter } => self.engine.export(letter),
                Effect::Notify(_) => self.notifications += 1,
            }
        }
    }

    fn pump_until(&mut self, done: impl Fn(&AppState) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !done(&self.state) {
            assert!(Instant::now() < deadline, "timed out waiting for engine");
            if let Some(event) = self.engine.recv_timeout(Duration::from_millis(100)) {
                self.dispatch(to_msg(event));
            }
        }
    }
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadProgress { upload_id, percent } => {
            Msg::UploadProgressed { upload_id, percent }
        }
        EngineEvent::UploadCompleted { upload_id } => Msg::UploadCompleted { upload_id },
        EngineEvent::AutoAdvanceDue { upload_id } => Msg::AutoAdvanceDue { upload_id },
        EngineEvent::GenerationCompleted { request_id, result } => match result {
            Ok(letter) => Msg::GenerationSucceeded { request_id, letter },
            Err(err) => Msg::GenerationFailed {
                request_id,
                reason: err.to_string(),
            },
        },
        EngineEvent::ExportCompleted { result } => Msg::ExportFinished {
            result: result.map(|summary| summary.output_path.display().to_string()),
        },
    }
}

fn engine_for(output_dir: PathBuf, generator: Arc<FixedGenerator>) -> EngineHandle {
    let mut config = EngineConfig::default_with_output(output_dir);
    config.upload = UploadSettings {
        step_percent: 10,
        interval: Duration::from_millis(2),
    };
    config.clock = Arc::new(|| "D:20261018120000Z".to_string());
    EngineHandle::with_generator(config, generator).unwrap()
}

#[test]
fn full_wizard_session_exports_edited_letter() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Arc::new(FixedGenerator {
        letter: mock_letter(),
        calls: AtomicUsize::new(0),
    });
    let mut session = Session::new(engine_for(dir.path().to_path_buf(), generator.clone()));

    let resume = FileCandidate::new("resume.pdf", "application/pdf", vec![0u8; 2 * 1024 * 1024]);
    session.dispatch(Msg::FileSelected(resume));
    assert!(session.state.upload().is_uploading);

    session.pump_until(|state| state.step() == WizardStep::JobDetails);
    assert!(!session.state.upload().is_uploading);
    assert_eq!(session.state.upload().progress, 100);

    session.dispatch(Msg::FieldEdited {
        field: FormField::JobDescription,
        value: "Programmer for the Mark I.".to_string(),
    });
    session.dispatch(Msg::StepSelected(WizardStep::Customize));
    session.dispatch(Msg::GenerateClicked);
    session.dispatch(Msg::GenerateClicked);
    assert!(session.state.is_loading());

    session.pump_until(|state| state.editable_letter().is_some());
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.notifications, 1);
    assert_eq!(session.state.editable_letter(), Some(&mock_letter()));

    session.dispatch(Msg::EditToggled);
    session.dispatch(Msg::LetterFieldEdited {
        field: LetterField::Closing,
        value: "Warm regards,".to_string(),
    });
    session.dispatch(Msg::EditToggled);
    assert_eq!(
        session
            .state
            .generated_letter()
            .map(|letter| letter.text(LetterField::Closing)),
        Some("Warm regards,")
    );

    session.dispatch(Msg::DownloadClicked);
    session.pump_until(|state| state.last_export().is_some() || state.error().is_some());
    assert_eq!(session.state.error(), None);

    let path = dir.path().join("Grace_Hopper_Cover_Letter.pdf");
    assert_eq!(session.state.last_export(), Some(path.display().to_string().as_str()));
    let text = read_text_lines(&std::fs::read(&path).unwrap());
    assert!(text.iter().any(|line| line == "Warm regards,"));
    assert!(!text.iter().any(|line| line == "Sincerely,"));
}

#[test]
fn removing_file_mid_upload_stops_progress() {
    let dir = tempfile::tempdir().unwrap();
    let generator = Arc::new(FixedGenerator {
        letter: mock_letter(),
        calls: AtomicUsize::new(0),
    });
    let mut config = EngineConfig::default_with_output(dir.path().to_path_buf());
    config.upload = UploadSettings {
        step_percent: 10,
        interval: Duration::from_millis(30),
    };
    let engine = EngineHandle::with_generator(config, generator).unwrap();
    let mut session = Session::new(engine);

    session.dispatch(Msg::FileSelected(FileCandidate::new(
        "resume.pdf",
        "application/pdf",
        vec![1u8; 1024],
    )));
    session.pump_until(|state| state.upload().progress >= 20);
    session.dispatch(Msg::FileRemoved);
    assert_eq!(session.state.upload().progress, 0);

    let settle = Instant::now() + Duration::from_millis(500);
    while Instant::now() < settle {
        if let Some(event) = session.engine.recv_timeout(Duration::from_millis(50)) {
            session.dispatch(to_msg(event));
        }
    }
    assert_eq!(session.state.upload().progress, 0);
    assert!(session.state.upload().file.is_none());
    assert_eq!(session.state.step(), WizardStep::Upload);
}
