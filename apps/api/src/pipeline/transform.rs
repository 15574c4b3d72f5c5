//! Stages 3 and 4: the draft-generating master transform and the final
//! brute-force QA correction.
//!
//! The draft is fatal on failure (there is nothing to fall back to). QA is
//! best-effort: a failed or unparseable QA response keeps the draft, never
//! degrades it.

use tracing::{info, warn};

use crate::llm_client::{
    generate_json, normalize, GenerationMode, LlmError, TextGenerator,
};
use crate::models::resume::{ResumeObject, TransformEnvelope};
use crate::pipeline::analysis::JdAnalysisReport;
use crate::pipeline::keywords::KeywordSet;
use crate::pipeline::prompts;

const VALID_MULTIPLIERS: [u32; 3] = [2, 3, 5];
const DEFAULT_WEEKS: u32 = 2;
const DEFAULT_MULTIPLIER: u32 = 2;

/// Project-scaling knobs for the transform prompt, normalized to the values
/// the prompt's workflow allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    pub time_in_weeks: u32,
    pub ai_multiplier: u32,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            time_in_weeks: DEFAULT_WEEKS,
            ai_multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

impl TransformOptions {
    /// Normalizes raw client input: absent or non-positive weeks fall back
    /// to 2, and multipliers outside {2, 3, 5} fall back to 2.
    pub fn from_raw(weeks: Option<i64>, multiplier: Option<i64>) -> Self {
        let time_in_weeks = match weeks {
            Some(w) if w >= 1 => w as u32,
            _ => DEFAULT_WEEKS,
        };
        let ai_multiplier = match multiplier {
            Some(m) if VALID_MULTIPLIERS.contains(&(m.max(0) as u32)) => m as u32,
            _ => DEFAULT_MULTIPLIER,
        };
        Self {
            time_in_weeks,
            ai_multiplier,
        }
    }
}

/// Stage 3: generate the draft envelope. Text mode — the transform prompt
/// predates JSON mode and asks for a fenced block, so the response runs
/// through the full normalizer. A missing resume object is fatal.
pub async fn generate_draft(
    llm: &dyn TextGenerator,
    resume_text: &str,
    job_description: &str,
    options: TransformOptions,
    model_override: Option<&str>,
) -> Result<TransformEnvelope, LlmError> {
    let prompt = prompts::build_transform_prompt(&prompts::TransformInputs {
        resume_text,
        job_description,
        time_in_weeks: options.time_in_weeks,
        ai_multiplier: options.ai_multiplier,
    });

    let response = llm
        .generate(&prompt, GenerationMode::Text, model_override)
        .await?;
    let text = response.first_text().ok_or(LlmError::EmptyContent)?;
    let envelope: TransformEnvelope =
        normalize::parse_json_payload(text).map_err(|e| LlmError::Parse(e.to_string()))?;

    let resume = envelope
        .transformed_resume
        .resume_object
        .as_ref()
        .ok_or_else(|| LlmError::Parse("draft response missing resumeObject".to_string()))?;
    info!(
        experiences = resume.experience.len(),
        projects = resume.projects.len(),
        education = resume.education.len(),
        "draft resume generated"
    );
    Ok(envelope)
}

/// Stage 4: QA-correct the draft against the master keyword list. Returns
/// the corrected resume, or the draft unchanged when the call or parse fails.
pub async fn finalize_draft(
    llm: &dyn TextGenerator,
    draft: &ResumeObject,
    report: &JdAnalysisReport,
    master_list: &KeywordSet,
    target_job_title: &str,
    model_override: Option<&str>,
) -> ResumeObject {
    let draft_json = match serde_json::to_string(draft) {
        Ok(j) => j,
        Err(e) => {
            warn!("could not serialize draft for QA, keeping draft: {e}");
            return draft.clone();
        }
    };

    let prompt = prompts::build_final_qa_prompt(&prompts::QaInputs {
        required_keywords: &master_list.join(),
        resume_skills: &draft.skills,
        target_job_title,
        company_name: report.company_or_default(),
        draft_resume_json: &draft_json,
    });

    match generate_json::<ResumeObject>(llm, &prompt, model_override).await {
        Ok(corrected) => {
            info!(
                summary_len = corrected.professional_summary.len(),
                skills_len = corrected.skills.len(),
                "final QA applied"
            );
            corrected
        }
        Err(e) => {
            warn!("final QA failed, keeping draft resume: {e}");
            draft.clone()
        }
    }
}
