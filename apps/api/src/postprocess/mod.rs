//! Deterministic post-processing over the QA-corrected resume. Runs
//! unconditionally after the LLM stages, in a fixed order: link
//! normalization, cliche filtering, keyword reconciliation, then skill
//! partitioning. Every pass is pure and infallible — the pipeline never
//! fails after the last LLM call.

pub mod links;
pub mod partition;
pub mod reconcile;

use tracing::info;

use crate::models::resume::ResumeObject;
use crate::pipeline::analysis::JdAnalysisReport;
use crate::pipeline::keywords::KeywordSet;
use partition::PartitionPolicy;

/// Applies all deterministic passes to the resume in place.
pub fn apply_postprocessing(
    resume: &mut ResumeObject,
    report: &JdAnalysisReport,
    master_list: &KeywordSet,
    policy: PartitionPolicy,
) {
    resume.contact_info.contact_line =
        links::normalize_contact_links(&resume.contact_info.contact_line);

    let filtered = reconcile::filter_cliches(&resume.skills);
    let reconciled = reconcile::reconcile_keywords(&filtered, master_list);

    let (visible, invisible) = partition::partition_skills(&reconciled, report, policy);
    resume.skills = reconciled;
    resume.skills_visible = visible;
    resume.skills_invisible = invisible;

    info!(
        skills_visible = resume.skills_visible.len(),
        skills_invisible = resume.skills_invisible.len(),
        "post-processing complete"
    );
}
