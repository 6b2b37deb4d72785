use std::path::PathBuf;

use clap::Parser;
use covercraft_core::{LetterField, TemplateId, Tone};

use super::settings::DEFAULT_SETTINGS_FILE;

#[derive(Debug, Parser)]
#[command(
    name = "covercraft",
    version,
    about = "Generate a tailored cover letter PDF from a resume and a job description"
)]
pub struct Cli {
    /// Resume to upload (PDF, at most 10 MB)
    #[arg(long, required_unless_present = "init_config")]
    pub resume: Option<PathBuf>,

    /// Job description text
    #[arg(long, conflicts_with = "job_description_file")]
    pub job_description: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,

    /// Writing tone (professional, enthusiastic, formal, creative)
    #[arg(long, default_value_t = Tone::Professional)]
    pub tone: Tone,

    /// Skills to highlight
    #[arg(long, default_value = "")]
    pub skills: String,

    /// Notes about the company
    #[arg(long, default_value = "")]
    pub company_info: String,

    /// Presentation template used for the preview
    #[arg(long, default_value_t = TemplateId::Standard)]
    pub template: TemplateId,

    /// Edit a letter field before export, e.g. `--set "closing=Warm regards,"`
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_field_edit)]
    pub edits: Vec<(LetterField, String)>,

    /// Settings file
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// Base URL of the letter generation service
    #[arg(long, env = "COVERCRAFT_API_BASE_URL")]
    pub api_url: Option<String>,

    /// Directory that receives the PDF
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Print the preview without writing a PDF
    #[arg(long)]
    pub no_export: bool,

    /// Write the effective settings to the settings file and exit
    #[arg(long)]
    pub init_config: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_field_edit(raw: &str) -> Result<(LetterField, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))?;
    let field = LetterField::from_key(key.trim()).ok_or_else(|| {
        let known: Vec<&str> = LetterField::ALL.iter().map(|field| field.key()).collect();
        format!("unknown letter field `{}` (known: {})", key.trim(), known.join(", "))
    })?;
    Ok((field, value.replace("\\n", "\n")))
}
