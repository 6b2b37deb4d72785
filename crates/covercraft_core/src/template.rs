use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseChoiceError {
    #[error("unknown tone '{0}'")]
    Tone(String),
    #[error("unknown template '{0}'")]
    Template(String),
}

/// Writing tone requested from the generation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Professional,
    Enthusiastic,
    Formal,
    Creative,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Enthusiastic,
        Tone::Formal,
        Tone::Creative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Enthusiastic => "Enthusiastic",
            Tone::Formal => "Formal",
            Tone::Creative => "Creative",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseChoiceError::Tone(s.to_string()))
    }
}

/// Visual arrangement of a letter. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateId {
    #[default]
    Standard,
    Corporate,
    Elegant,
    ModernMinimal,
    BusinessFormal,
    Creative,
    Tech,
    Minimalist,
    Academic,
    Executive,
    ProfessionalAccent,
    Vintage,
}

/// How the sender block is arranged above the shared letter layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Name, address and contact stacked in the letter header.
    Standard,
    /// Name and job title on the left, contact on the right.
    Corporate,
    /// Name, job title and contact above a horizontal rule.
    Elegant,
    /// Centred banner with name and job title.
    Creative,
}

impl TemplateId {
    pub const ALL: [TemplateId; 12] = [
        TemplateId::Standard,
        TemplateId::Corporate,
        TemplateId::Elegant,
        TemplateId::ModernMinimal,
        TemplateId::BusinessFormal,
        TemplateId::Creative,
        TemplateId::Tech,
        TemplateId::Minimalist,
        TemplateId::Academic,
        TemplateId::Executive,
        TemplateId::ProfessionalAccent,
        TemplateId::Vintage,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TemplateId::Standard => "standard",
            TemplateId::Corporate => "corporate",
            TemplateId::Elegant => "elegant",
            TemplateId::ModernMinimal => "modern-minimal",
            TemplateId::BusinessFormal => "business-formal",
            TemplateId::Creative => "creative",
            TemplateId::Tech => "tech",
            TemplateId::Minimalist => "minimalist",
            TemplateId::Academic => "academic",
            TemplateId::Executive => "executive",
            TemplateId::ProfessionalAccent => "professional-accent",
            TemplateId::Vintage => "vintage",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TemplateId::Standard => "Standard",
            TemplateId::Corporate => "Corporate",
            TemplateId::Elegant => "Elegant",
            TemplateId::ModernMinimal => "Modern Minimal",
            TemplateId::BusinessFormal => "Business Formal",
            TemplateId::Creative => "Creative",
            TemplateId::Tech => "Tech",
            TemplateId::Minimalist => "Minimalist",
            TemplateId::Academic => "Academic",
            TemplateId::Executive => "Executive",
            TemplateId::ProfessionalAccent => "Pro Accent",
            TemplateId::Vintage => "Vintage",
        }
    }

    /// The single place where a template decides its header arrangement.
    pub fn header_style(self) -> HeaderStyle {
        match self {
            TemplateId::Corporate => HeaderStyle::Corporate,
            TemplateId::Elegant => HeaderStyle::Elegant,
            TemplateId::Creative => HeaderStyle::Creative,
            TemplateId::Standard
            | TemplateId::ModernMinimal
            | TemplateId::BusinessFormal
            | TemplateId::Tech
            | TemplateId::Minimalist
            | TemplateId::Academic
            | TemplateId::Executive
            | TemplateId::ProfessionalAccent
            | TemplateId::Vintage => HeaderStyle::Standard,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TemplateId {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|template| template.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseChoiceError::Template(s.to_string()))
    }
}
