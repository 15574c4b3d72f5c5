//! Job-description analysis: the structured report from stage 1 and the
//! verification sweep from stage 2, combined into the master keyword list
//! that drives QA and reconciliation.
//!
//! Stage 1 is fatal — without a report the pipeline has nothing to optimize
//! against. Stage 2 is advisory: any failure there degrades to "no extra
//! keywords found" and the pipeline continues on the stage-1 list alone.

use serde::Deserialize;
use tracing::{info, warn};

use crate::llm_client::{generate_json, TextGenerator};
use crate::pipeline::keywords::KeywordSet;
use crate::pipeline::prompts;

/// Structured requirements extracted from the job description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JdAnalysisReport {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub keywords: KeywordTiers,
    #[serde(default)]
    pub explicit_requirements: ExplicitRequirements,
    #[serde(default)]
    pub metric_indicators: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordTiers {
    #[serde(default)]
    pub hard_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub domain_phrases: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplicitRequirements {
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub experience_level: String,
}

#[derive(Debug, Deserialize)]
struct VerificationResponse {
    #[serde(default)]
    missing_keywords: Vec<String>,
}

impl JdAnalysisReport {
    /// Flattens all four tiers into one deduplicated list, in tier order:
    /// hard skills, tools, domain phrases, soft skills.
    pub fn all_keywords(&self) -> KeywordSet {
        let mut set = KeywordSet::new();
        set.extend(&self.keywords.hard_skills);
        set.extend(&self.keywords.tools);
        set.extend(&self.keywords.domain_phrases);
        set.extend(&self.keywords.soft_skills);
        set
    }

    /// The company name with the fallback the QA prompt expects.
    pub fn company_or_default(&self) -> &str {
        match self.company_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Target Company",
        }
    }
}

/// Stage 1: extract the structured requirements report. Errors propagate —
/// the caller aborts the pipeline.
pub async fn analyze_job_description(
    llm: &dyn TextGenerator,
    job_description: &str,
    model_override: Option<&str>,
) -> Result<JdAnalysisReport, crate::llm_client::LlmError> {
    let prompt = prompts::build_jd_analysis_prompt(job_description);
    let report: JdAnalysisReport = generate_json(llm, &prompt, model_override).await?;
    info!(
        company = report.company_or_default(),
        keywords = report.all_keywords().len(),
        "JD analysis complete"
    );
    Ok(report)
}

/// Stage 2: ask for keywords the analyzer missed. Never fails — an API
/// error or unparseable response yields an empty list.
pub async fn verify_keywords(
    llm: &dyn TextGenerator,
    job_description: &str,
    known_keywords: &KeywordSet,
    model_override: Option<&str>,
) -> Vec<String> {
    let keyword_list_json = serde_json::to_string(&known_keywords.iter().collect::<Vec<_>>())
        .unwrap_or_else(|_| "[]".to_string());
    let prompt = prompts::build_keyword_verification_prompt(&prompts::VerificationInputs {
        job_description,
        keyword_list_json: &keyword_list_json,
    });

    match generate_json::<VerificationResponse>(llm, &prompt, model_override).await {
        Ok(response) => {
            info!(
                missing = response.missing_keywords.len(),
                "keyword verification complete"
            );
            response.missing_keywords
        }
        Err(e) => {
            warn!("keyword verification failed, continuing with analyzer list: {e}");
            Vec::new()
        }
    }
}

/// Unions the stage-1 keywords with the verification additions into the
/// master list every later stage works from.
pub fn build_master_list(report: &JdAnalysisReport, missing: &[String]) -> KeywordSet {
    let mut master = report.all_keywords();
    master.extend(missing);
    master
}
