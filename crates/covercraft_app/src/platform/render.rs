use covercraft_core::{AppViewModel, HeaderBlock, LetterPreview, WizardStep};

const PREVIEW_WIDTH: usize = 72;

/// One-line summary of the wizard, printed whenever the view changes.
pub fn status_line(view: &AppViewModel) -> String {
    let mut parts = vec![format!(
        "[{}/{} {}]",
        view.step.number(),
        WizardStep::ALL.len(),
        view.step.name()
    )];

    if let (Some(name), Some(size)) = (&view.file_name, &view.file_size) {
        parts.push(format!("{name} ({size})"));
    }
    if let Some(status) = view.upload_status() {
        if view.is_uploading {
            parts.push(format!("{status} {}%", view.upload_progress));
        } else {
            parts.push(status.to_string());
        }
    }
    if view.is_loading {
        parts.push("Generating...".to_string());
    }
    if let Some(error) = &view.error_message {
        parts.push(format!("error: {error}"));
    }
    parts.join(" ")
}

/// Plain-text rendering of a letter as arranged by its template.
pub fn render_preview(preview: &LetterPreview) -> String {
    let mut lines: Vec<String> = Vec::new();

    match &preview.header {
        HeaderBlock::Standard {
            name,
            address,
            contact,
        } => {
            for text in [name, address, contact] {
                lines.push(right_align(text));
            }
        }
        HeaderBlock::Corporate {
            name,
            job_title,
            contact,
        } => {
            lines.push(join_nonempty(&[name, job_title], " | "));
            lines.push(right_align(contact));
        }
        HeaderBlock::Elegant {
            name,
            job_title,
            contact,
        } => {
            for text in [name, job_title, contact] {
                lines.push(center(text));
            }
            lines.push("-".repeat(PREVIEW_WIDTH));
        }
        HeaderBlock::Creative { name, job_title } => {
            lines.push("=".repeat(PREVIEW_WIDTH));
            lines.push(center(&name.to_uppercase()));
            lines.push(center(job_title));
            lines.push("=".repeat(PREVIEW_WIDTH));
        }
    }
    lines.push(String::new());

    lines.push(preview.date.clone());
    lines.push(String::new());

    let recipient = &preview.recipient;
    for text in [
        &recipient.name,
        &recipient.title,
        &recipient.company,
        &recipient.address,
    ] {
        if !text.trim().is_empty() {
            lines.push(text.clone());
        }
    }
    lines.push(String::new());

    lines.push(preview.salutation.clone());
    lines.push(String::new());
    for paragraph in &preview.paragraphs {
        lines.push(paragraph.clone());
        lines.push(String::new());
    }

    lines.push(preview.closing.clone());
    lines.push(preview.signature.clone());

    let mut out = lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

fn right_align(text: &str) -> String {
    format!("{text:>PREVIEW_WIDTH$}")
}

fn center(text: &str) -> String {
    format!("{text:^PREVIEW_WIDTH$}")
}

fn join_nonempty(parts: &[&String], separator: &str) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
