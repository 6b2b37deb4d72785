/// Problems surfaced to the user as inline text. None of them end the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("File is too large. Max size is 10MB.")]
    FileTooLarge,
    #[error("Invalid file type. Please upload a PDF.")]
    InvalidFileType,
    #[error("Please upload your resume.")]
    MissingResume,
    #[error("Please provide the job description.")]
    MissingJobDescription,
    #[error("Letter generation failed. Is the backend server reachable?")]
    GenerationFailed,
    #[error("Could not save the cover letter: {0}")]
    ExportFailed(String),
}

impl WizardError {
    /// Validation problems are caught locally, before any request is made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WizardError::FileTooLarge
                | WizardError::InvalidFileType
                | WizardError::MissingResume
                | WizardError::MissingJobDescription
        )
    }
}
