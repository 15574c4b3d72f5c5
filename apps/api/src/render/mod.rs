//! Resume rendering. The final resume object becomes one of two visually
//! equivalent fixed-layout A4 documents: an editable DOCX (the default
//! attachment) or a fixed-appearance PDF. Both renderers share the section
//! order, bullet caps, and line composition defined here, so the two formats
//! cannot drift apart.

mod docx;
mod pdf;

pub use docx::render_resume_docx;
pub use pdf::render_resume_pdf;

use thiserror::Error;

use crate::models::resume::{ContactInfo, EducationEntry, ResumeObject};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("DOCX generation failed: {0}")]
    Docx(#[from] docx_rs::DocxError),

    #[error("render buffer error: {0}")]
    Buffer(String),
}

/// Attachment format requested by the client. DOCX is the editable default;
/// PDF is the fixed-appearance twin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Docx,
    Pdf,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pdf => "application/pdf",
        }
    }
}

/// Renders the resume in the requested format.
pub fn render_resume(resume: &ResumeObject, format: OutputFormat) -> Result<Vec<u8>, RenderError> {
    match format {
        OutputFormat::Docx => render_resume_docx(resume),
        OutputFormat::Pdf => render_resume_pdf(resume),
    }
}

const MAX_EXPERIENCE_BULLETS: usize = 2;
const MAX_PROJECT_BULLETS: usize = 3;

/// Collapses newlines — every field renders as a single flowed string.
fn flatten(text: &str) -> String {
    text.replace(['\n', '\r'], " ").trim().to_string()
}

/// Drops the `Address: ` label some drafts put on the location field.
fn strip_address_label(location: &str) -> String {
    flatten(location)
        .trim_start_matches("Address: ")
        .to_string()
}

/// Removes a leading bullet marker the model sometimes includes in the
/// bullet text itself.
fn clean_bullet_text(text: &str) -> String {
    let text = text.trim();
    for marker in ["- ", "\u{2022} ", "* "] {
        if let Some(rest) = text.strip_prefix(marker) {
            return rest.trim().to_string();
        }
    }
    for marker in ["-", "\u{2022}", "*"] {
        if let Some(rest) = text.strip_prefix(marker) {
            return rest.trim().to_string();
        }
    }
    text.to_string()
}

/// `contact line | location`, tolerating either side being empty.
fn contact_info_line(info: &ContactInfo) -> String {
    let location = strip_address_label(&info.location);
    match (info.contact_line.is_empty(), location.is_empty()) {
        (false, false) => format!("{} | {}", flatten(&info.contact_line), location),
        (false, true) => flatten(&info.contact_line),
        (true, _) => location,
    }
}

/// `degree, institution-head | GPA: x` — the institution is truncated at its
/// first comma because the dates tail renders on its own line.
fn education_line(edu: &EducationEntry) -> String {
    let institution = flatten(&edu.institution_and_dates);
    let institution_head = institution.split(',').next().unwrap_or(&institution).trim();
    let mut line = format!("{}, {}", flatten(&edu.degree), institution_head);
    if !edu.gpa.is_empty() {
        line.push_str(&format!(" | GPA: {}", flatten(&edu.gpa)));
    }
    line
}
