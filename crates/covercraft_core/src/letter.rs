use std::fmt;

/// Structured text of a cover letter as produced by the generation API.
///
/// Every field is optional until a generation succeeds; after that the
/// wizard only ever holds [`LetterRecord::normalized`] records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LetterRecord {
    pub sender_name: Option<String>,
    pub sender_address: Option<String>,
    pub sender_contact: Option<String>,
    pub sender_job_title: Option<String>,
    pub date: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_title: Option<String>,
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub salutation: Option<String>,
    /// Paragraphs separated by a blank line.
    pub body: Option<String>,
    pub closing: Option<String>,
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterField {
    SenderName,
    SenderAddress,
    SenderContact,
    SenderJobTitle,
    Date,
    RecipientName,
    RecipientTitle,
    CompanyName,
    CompanyAddress,
    Salutation,
    Body,
    Closing,
    Signature,
}

impl LetterField {
    pub const ALL: [LetterField; 13] = [
        LetterField::SenderName,
        LetterField::SenderAddress,
        LetterField::SenderContact,
        LetterField::SenderJobTitle,
        LetterField::Date,
        LetterField::RecipientName,
        LetterField::RecipientTitle,
        LetterField::CompanyName,
        LetterField::CompanyAddress,
        LetterField::Salutation,
        LetterField::Body,
        LetterField::Closing,
        LetterField::Signature,
    ];

    /// Wire name used by the generation API.
    pub fn key(self) -> &'static str {
        match self {
            LetterField::SenderName => "senderName",
            LetterField::SenderAddress => "senderAddress",
            LetterField::SenderContact => "senderContact",
            LetterField::SenderJobTitle => "senderJobTitle",
            LetterField::Date => "date",
            LetterField::RecipientName => "recipientName",
            LetterField::RecipientTitle => "recipientTitle",
            LetterField::CompanyName => "companyName",
            LetterField::CompanyAddress => "companyAddress",
            LetterField::Salutation => "salutation",
            LetterField::Body => "body",
            LetterField::Closing => "closing",
            LetterField::Signature => "signature",
        }
    }

    /// Accepts the wire name or a snake_case spelling.
    pub fn from_key(key: &str) -> Option<Self> {
        let wanted: String = key
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect();
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(&wanted))
    }
}

impl fmt::Display for LetterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl LetterRecord {
    pub fn get(&self, field: LetterField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Field text, with absent fields rendered as the empty string.
    pub fn text(&self, field: LetterField) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn set(&mut self, field: LetterField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Copy with every absent field replaced by an empty string.
    pub fn normalized(mut self) -> Self {
        for field in LetterField::ALL {
            let slot = self.slot_mut(field);
            if slot.is_none() {
                *slot = Some(String::new());
            }
        }
        self
    }

    pub fn is_complete(&self) -> bool {
        LetterField::ALL
            .into_iter()
            .all(|field| self.get(field).is_some())
    }

    /// Body split into its blank-line separated paragraphs.
    pub fn paragraphs(&self) -> Vec<String> {
        let body = self.text(LetterField::Body).replace("\r\n", "\n");
        if body.is_empty() {
            return Vec::new();
        }
        body.split("\n\n").map(str::to_string).collect()
    }

    fn slot(&self, field: LetterField) -> &Option<String> {
        match field {
            LetterField::SenderName => &self.sender_name,
            LetterField::SenderAddress => &self.sender_address,
            LetterField::SenderContact => &self.sender_contact,
            LetterField::SenderJobTitle => &self.sender_job_title,
            LetterField::Date => &self.date,
            LetterField::RecipientName => &self.recipient_name,
            LetterField::RecipientTitle => &self.recipient_title,
            LetterField::CompanyName => &self.company_name,
            LetterField::CompanyAddress => &self.company_address,
            LetterField::Salutation => &self.salutation,
            LetterField::Body => &self.body,
            LetterField::Closing => &self.closing,
            LetterField::Signature => &self.signature,
        }
    }

    fn slot_mut(&mut self, field: LetterField) -> &mut Option<String> {
        match field {
            LetterField::SenderName => &mut self.sender_name,
            LetterField::SenderAddress => &mut self.sender_address,
            LetterField::SenderContact => &mut self.sender_contact,
            LetterField::SenderJobTitle => &mut self.sender_job_title,
            LetterField::Date => &mut self.date,
            LetterField::RecipientName => &mut self.recipient_name,
            LetterField::RecipientTitle => &mut self.recipient_title,
            LetterField::CompanyName => &mut self.company_name,
            LetterField::CompanyAddress => &mut self.company_address,
            LetterField::Salutation => &mut self.salutation,
            LetterField::Body => &mut self.body,
            LetterField::Closing => &mut self.closing,
            LetterField::Signature => &mut self.signature,
        }
    }
}
