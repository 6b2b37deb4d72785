use crate::{HeaderStyle, LetterField, LetterRecord, TemplateId, Tone, WizardStep};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub step: WizardStep,
    pub file_name: Option<String>,
    pub file_size: Option<String>,
    pub upload_progress: u8,
    pub is_uploading: bool,
    pub job_description: String,
    pub tone: Tone,
    pub user_skills: String,
    pub company_info: String,
    pub can_generate: bool,
    pub is_loading: bool,
    pub is_editing: bool,
    pub error_message: Option<String>,
    pub template: TemplateId,
    /// Present once a letter exists and no request is running.
    pub preview: Option<LetterPreview>,
    pub last_export: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn upload_status(&self) -> Option<&'static str> {
        self.file_name.as_ref()?;
        Some(if self.is_uploading {
            "Uploading..."
        } else {
            "Upload Complete!"
        })
    }
}

/// Sender block as arranged by one header style. Each variant carries only what it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderBlock {
    Standard {
        name: String,
        address: String,
        contact: String,
    },
    Corporate {
        name: String,
        job_title: String,
        contact: String,
    },
    Elegant {
        name: String,
        job_title: String,
        contact: String,
    },
    Creative {
        name: String,
        job_title: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipientBlock {
    pub name: String,
    pub title: String,
    pub company: String,
    pub address: String,
}

/// A letter arranged for display by a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterPreview {
    pub template: TemplateId,
    pub header: HeaderBlock,
    pub date: String,
    pub recipient: RecipientBlock,
    pub salutation: String,
    pub paragraphs: Vec<String>,
    pub closing: String,
    pub signature: String,
    pub editable: bool,
}

impl LetterPreview {
    pub fn build(letter: &LetterRecord, template: TemplateId, editable: bool) -> Self {
        let text = |field| letter.text(field).to_string();
        let header = match template.header_style() {
            HeaderStyle::Standard => HeaderBlock::Standard {
                name: text(LetterField::SenderName),
                address: text(LetterField::SenderAddress),
                contact: text(LetterField::SenderContact),
            },
            HeaderStyle::Corporate => HeaderBlock::Corporate {
                name: text(LetterField::SenderName),
                job_title: text(LetterField::SenderJobTitle),
                contact: text(LetterField::SenderContact),
            },
            HeaderStyle::Elegant => HeaderBlock::Elegant {
                name: text(LetterField::SenderName),
                job_title: text(LetterField::SenderJobTitle),
                contact: text(LetterField::SenderContact),
            },
            HeaderStyle::Creative => HeaderBlock::Creative {
                name: text(LetterField::SenderName),
                job_title: text(LetterField::SenderJobTitle),
            },
        };

        Self {
            template,
            header,
            date: text(LetterField::Date),
            recipient: RecipientBlock {
                name: text(LetterField::RecipientName),
                title: text(LetterField::RecipientTitle),
                company: text(LetterField::CompanyName),
                address: text(LetterField::CompanyAddress),
            },
            salutation: text(LetterField::Salutation),
            paragraphs: letter.paragraphs(),
            closing: text(LetterField::Closing),
            signature: text(LetterField::Signature),
            editable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HeaderBlock, LetterPreview};
    use crate::{LetterField, LetterRecord, TemplateId};

    fn letter() -> LetterRecord {
        let mut letter = LetterRecord::default();
        letter.set(LetterField::SenderName, "Ada Lovelace");
        letter.set(LetterField::SenderJobTitle, "Analyst");
        letter.set(LetterField::SenderContact, "ada@example.com");
        letter.set(LetterField::Body, "One.\n\nTwo.");
        letter
    }

    #[test]
    fn corporate_header_carries_job_title() {
        let preview = LetterPreview::build(&letter(), TemplateId::Corporate, false);
        assert_eq!(
            preview.header,
            HeaderBlock::Corporate {
                name: "Ada Lovelace".to_string(),
                job_title: "Analyst".to_string(),
                contact: "ada@example.com".to_string(),
            }
        );
    }

    #[test]
    fn standard_family_templates_share_the_standard_header() {
        let preview = LetterPreview::build(&letter(), TemplateId::Vintage, false);
        assert!(matches!(preview.header, HeaderBlock::Standard { ref address, .. } if address.is_empty()));
        assert_eq!(preview.paragraphs, vec!["One.", "Two."]);
        assert_eq!(preview.closing, "");
    }
}
