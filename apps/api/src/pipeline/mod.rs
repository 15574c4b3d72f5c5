//! The transformation pipeline: four sequential LLM stages followed by the
//! deterministic post-processing chain.
//!
//! Stage failure policy:
//!   1. JD analysis          — fatal
//!   2. keyword verification — degrades to no additions
//!   3. draft transform      — fatal
//!   4. final QA             — degrades to the draft
//! Post-processing always runs and never fails.

pub mod analysis;
pub mod handlers;
pub mod keywords;
pub mod prompts;
pub mod transform;

use tracing::info;

use crate::llm_client::{LlmError, TextGenerator};
use crate::models::resume::TransformEnvelope;
use crate::postprocess::{self, partition::PartitionPolicy};
use transform::TransformOptions;

pub struct PipelineInputs<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub target_job_title: &'a str,
    pub options: TransformOptions,
    pub model_override: Option<&'a str>,
}

/// Runs the full pipeline and returns the stage-3 envelope with the final,
/// post-processed resume object inside it.
pub async fn run_pipeline(
    llm: &dyn TextGenerator,
    inputs: PipelineInputs<'_>,
) -> Result<TransformEnvelope, LlmError> {
    let report =
        analysis::analyze_job_description(llm, inputs.job_description, inputs.model_override)
            .await?;

    let missing = analysis::verify_keywords(
        llm,
        inputs.job_description,
        &report.all_keywords(),
        inputs.model_override,
    )
    .await;
    let master_list = analysis::build_master_list(&report, &missing);
    if master_list.is_empty() {
        tracing::warn!("master keyword list is empty, reconciliation will be a no-op");
    }
    info!(keywords = master_list.len(), "master keyword list built");

    let mut envelope = transform::generate_draft(
        llm,
        inputs.resume_text,
        inputs.job_description,
        inputs.options,
        inputs.model_override,
    )
    .await?;
    // generate_draft guarantees the object is present.
    let draft = envelope
        .transformed_resume
        .resume_object
        .take()
        .ok_or_else(|| LlmError::Parse("draft resume object missing".to_string()))?;

    let mut resume = transform::finalize_draft(
        llm,
        &draft,
        &report,
        &master_list,
        inputs.target_job_title,
        inputs.model_override,
    )
    .await;

    postprocess::apply_postprocessing(
        &mut resume,
        &report,
        &master_list,
        PartitionPolicy::default(),
    );
    resume.skills.clear();

    envelope.transformed_resume.resume_object = Some(resume);
    info!("pipeline complete");
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::{
        Candidate, CandidateContent, GenerateContentResponse, GenerationMode, TextPart,
    };

    /// Replays one scripted response per call, in order. `Err` entries
    /// simulate an exhausted-retries API failure at that stage.
    struct Script(Mutex<Vec<Result<String, ()>>>);

    impl Script {
        fn new(stages: Vec<Result<&str, ()>>) -> Self {
            Self(Mutex::new(
                stages
                    .into_iter()
                    .rev()
                    .map(|r| r.map(String::from))
                    .collect(),
            ))
        }
    }

    #[async_trait]
    impl TextGenerator for Script {
        async fn generate(
            &self,
            _prompt: &str,
            _mode: GenerationMode,
            _model_override: Option<&str>,
        ) -> Result<GenerateContentResponse, LlmError> {
            let next = self.0.lock().unwrap().pop().expect("script exhausted");
            match next {
                Ok(text) => Ok(GenerateContentResponse {
                    candidates: vec![Candidate {
                        content: Some(CandidateContent {
                            parts: vec![TextPart { text: Some(text) }],
                        }),
                    }],
                }),
                Err(()) => Err(LlmError::RetriesExhausted { attempts: 5 }),
            }
        }
    }

    const ANALYSIS: &str = r#"{"company_name": "Acme", "keywords": {"hard_skills": ["SQL"], "soft_skills": ["communication"], "tools": ["Tableau"], "domain_phrases": []}}"#;
    const VERIFY_EMPTY: &str = r#"{"missing_keywords": []}"#;
    const DRAFT: &str = r#"{"transformedResume": {"suggestedFilename": "Ada_Analyst_Resume.pdf", "resumeObject": {"contactInfo": {"contactLine": "linkedin.com/in/ada"}, "skills": "SQL, Python"}}}"#;
    const QA: &str = r#"{"contactInfo": {"contactLine": "linkedin.com/in/ada"}, "skills": "SQL, Python, communication"}"#;

    fn inputs() -> PipelineInputs<'static> {
        PipelineInputs {
            resume_text: "resume",
            job_description: "jd",
            target_job_title: "Analyst",
            options: TransformOptions::default(),
            model_override: None,
        }
    }

    #[tokio::test]
    async fn test_happy_path_produces_postprocessed_resume() {
        let llm = Script::new(vec![Ok(ANALYSIS), Ok(VERIFY_EMPTY), Ok(DRAFT), Ok(QA)]);
        let envelope = run_pipeline(&llm, inputs()).await.unwrap();

        assert_eq!(envelope.base_filename(), "Ada_Analyst_Resume");
        let resume = envelope.transformed_resume.resume_object.unwrap();
        assert_eq!(
            resume.contact_info.contact_line,
            "https://linkedin.com/in/ada"
        );
        // Tableau from the analyzer's tools tier is appended and invisible.
        assert_eq!(resume.skills_visible, "SQL, communication");
        assert!(resume.skills_invisible.contains("Python"));
        assert!(resume.skills_invisible.contains("Tableau"));
        assert!(resume.skills.is_empty());
    }

    #[tokio::test]
    async fn test_analysis_failure_aborts_pipeline() {
        let llm = Script::new(vec![Err(())]);
        assert!(run_pipeline(&llm, inputs()).await.is_err());
    }

    #[tokio::test]
    async fn test_verification_failure_does_not_abort() {
        let llm = Script::new(vec![Ok(ANALYSIS), Err(()), Ok(DRAFT), Ok(QA)]);
        let envelope = run_pipeline(&llm, inputs()).await.unwrap();
        assert!(envelope.transformed_resume.resume_object.is_some());
    }

    #[tokio::test]
    async fn test_draft_failure_aborts_pipeline() {
        let llm = Script::new(vec![Ok(ANALYSIS), Ok(VERIFY_EMPTY), Err(())]);
        assert!(run_pipeline(&llm, inputs()).await.is_err());
    }

    #[tokio::test]
    async fn test_qa_failure_falls_back_to_postprocessed_draft() {
        let llm = Script::new(vec![Ok(ANALYSIS), Ok(VERIFY_EMPTY), Ok(DRAFT), Err(())]);
        let envelope = run_pipeline(&llm, inputs()).await.unwrap();

        let resume = envelope.transformed_resume.resume_object.unwrap();
        // Draft skills were "SQL, Python"; reconciliation still guarantees
        // the master list lands in the final output.
        let all_skills = format!("{}, {}", resume.skills_visible, resume.skills_invisible);
        for kw in ["SQL", "communication", "Tableau"] {
            assert!(all_skills.contains(kw), "missing {kw} in {all_skills}");
        }
    }

    #[tokio::test]
    async fn test_verification_additions_survive_to_final_skills() {
        let verify = r#"{"missing_keywords": ["Power BI"]}"#;
        let llm = Script::new(vec![Ok(ANALYSIS), Ok(verify), Ok(DRAFT), Ok(QA)]);
        let envelope = run_pipeline(&llm, inputs()).await.unwrap();

        let resume = envelope.transformed_resume.resume_object.unwrap();
        assert!(resume.skills_invisible.contains("Power BI"));
    }
}
