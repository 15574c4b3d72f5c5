//! Structured resume types — the camelCase wire format the transform prompt
//! instructs the model to emit. The object is mutated in place across pipeline
//! stages (draft → QA-corrected → keyword-reconciled → partitioned); each
//! stage must leave fields it does not target untouched, which `serde(default)`
//! and full round-tripping guarantee.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact_line: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company_location: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(default)]
    pub title_and_tech: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution_and_dates: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub gpa: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// The transformed resume. `skills` is a single comma-joined string until the
/// partitioning pass replaces it with the visible/invisible split.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeObject {
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub professional_summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub skills: String,
    #[serde(default, rename = "skills_visible", skip_serializing_if = "String::is_empty")]
    pub skills_visible: String,
    #[serde(default, rename = "skills_invisible", skip_serializing_if = "String::is_empty")]
    pub skills_invisible: String,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

/// Full stage-3 output: the resume plus illustrative score/summary blocks.
/// Scores are carried as opaque JSON — logged and echoed, never validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformEnvelope {
    #[serde(default)]
    pub initial_scores: Value,
    #[serde(default)]
    pub transformed_resume: TransformedResume,
    #[serde(default)]
    pub final_scores: Value,
    #[serde(default)]
    pub transformation_summary: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedResume {
    #[serde(default)]
    pub suggested_filename: String,
    #[serde(default)]
    pub resume_object: Option<ResumeObject>,
}

impl TransformEnvelope {
    /// Base output filename: the model's suggestion with any `.pdf` suffix
    /// dropped, falling back to `resume`.
    pub fn base_filename(&self) -> String {
        let name = self
            .transformed_resume
            .suggested_filename
            .trim_end_matches(".pdf")
            .trim();
        if name.is_empty() {
            "resume".to_string()
        } else {
            name.to_string()
        }
    }
}
