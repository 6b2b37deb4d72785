use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use covercraft_core::{
    update, AppState, FileCandidate, FormField, Msg, WizardStep, ACCEPTED_MIME_TYPE,
};
use covercraft_logging::{craft_info, craft_warn};

use super::cli::Cli;
use super::effects::EffectRunner;
use super::logging;
use super::render;
use super::settings::{load_settings, save_settings, AppSettings};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);
const EXPORT_TIMEOUT: Duration = Duration::from_secs(30);

pub fn run_app() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_settings(&cli.config);
    let mut settings = match &loaded {
        Ok(Some(settings)) => settings.clone(),
        _ => AppSettings::default(),
    };
    if let Some(api_url) = &cli.api_url {
        settings.api_base_url = api_url.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        settings.output_dir = output_dir.clone();
    }

    logging::initialize(settings.log_destination, cli.verbose);
    if let Err(err) = &loaded {
        craft_warn!("{}; using default settings", err);
    }

    if cli.init_config {
        let path = save_settings(&cli.config, &settings)?;
        println!("Wrote settings to {}", path.display());
        return Ok(());
    }

    let resume_path = cli.resume.as_deref().context("--resume is required")?;
    let resume = read_resume(resume_path)?;
    let job_description = match (&cli.job_description, &cli.job_description_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read job description: {}", path.display()))?,
        (None, None) => String::new(),
    };

    let runner = EffectRunner::new(&settings).context("Failed to start engine")?;
    let mut session = Session::new(runner);

    session.dispatch(Msg::FileSelected(resume));
    session.check_error()?;
    session.wait_for(Some(UPLOAD_TIMEOUT), |state| {
        state.step() == WizardStep::JobDetails
    })?;

    session.dispatch(Msg::FieldEdited {
        field: FormField::JobDescription,
        value: job_description,
    });
    session.dispatch(Msg::FieldEdited {
        field: FormField::UserSkills,
        value: cli.skills.clone(),
    });
    session.dispatch(Msg::FieldEdited {
        field: FormField::CompanyInfo,
        value: cli.company_info.clone(),
    });
    session.dispatch(Msg::ToneSelected(cli.tone));
    session.dispatch(Msg::TemplateSelected(cli.template));
    session.dispatch(Msg::StepSelected(WizardStep::Customize));

    session.dispatch(Msg::GenerateClicked);
    session.check_error()?;
    // No deadline: generation has no timeout unless one is configured.
    session.wait_for(None, |state| !state.is_loading())?;
    session.check_error()?;

    if !cli.edits.is_empty() {
        session.dispatch(Msg::EditToggled);
        for (field, value) in &cli.edits {
            session.dispatch(Msg::LetterFieldEdited {
                field: *field,
                value: value.clone(),
            });
        }
        session.dispatch(Msg::EditToggled);
    }

    if let Some(preview) = session.state.view().preview {
        print!("\n{}", render::render_preview(&preview));
    }

    if cli.no_export {
        return Ok(());
    }
    session.dispatch(Msg::DownloadClicked);
    session.wait_for(Some(EXPORT_TIMEOUT), |state| {
        state.last_export().is_some() || state.error().is_some()
    })?;
    session.check_error()?;
    if let Some(path) = session.state.last_export() {
        println!("\nSaved {path}");
    }
    Ok(())
}

/// Owns the wizard state and feeds it messages, one at a time.
struct Session {
    state: AppState,
    runner: EffectRunner,
    last_status: String,
}

impl Session {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            last_status: String::new(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for notification in self.runner.enqueue(effects) {
            println!("{}", notification.message());
        }

        if self.state.consume_dirty() {
            let status = render::status_line(&self.state.view());
            if status != self.last_status {
                eprintln!("{status}");
                self.last_status = status;
            }
        }
    }

    fn wait_for(
        &mut self,
        timeout: Option<Duration>,
        done: impl Fn(&AppState) -> bool,
    ) -> Result<()> {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        while !done(&self.state) {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                bail!("Timed out at step {}", self.state.step().name());
            }
            if let Some(msg) = self.runner.next_msg(POLL_INTERVAL) {
                self.dispatch(msg);
            }
        }
        Ok(())
    }

    fn check_error(&self) -> Result<()> {
        match self.state.error() {
            Some(error) => bail!("{error}"),
            None => Ok(()),
        }
    }
}

fn read_resume(path: &Path) -> Result<FileCandidate> {
    let contents =
        fs::read(path).with_context(|| format!("Failed to read resume: {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = detect_mime_type(path, &contents);
    craft_info!("Read resume {} ({} bytes, {})", name, contents.len(), mime_type);
    Ok(FileCandidate::new(name, mime_type, contents))
}

/// Extension first, then the `%PDF-` signature.
fn detect_mime_type(path: &Path, contents: &[u8]) -> &'static str {
    let is_pdf_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf_extension || contents.starts_with(b"%PDF-") {
        ACCEPTED_MIME_TYPE
    } else {
        "application/octet-stream"
    }
}
