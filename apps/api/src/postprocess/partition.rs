//! Skill partitioning: the reconciled skills list is split into a visible
//! part (keywords a reviewer should see — the analyzer's hard and soft skill
//! tiers) and an invisible part (everything appended purely for ATS
//! matching, rendered in a near-invisible style).

use tracing::info;

use crate::pipeline::analysis::JdAnalysisReport;
use crate::pipeline::keywords::fold;

/// Which analyzer tiers count as visible. Default keeps hard and soft
/// skills in front of human eyes; tools and domain phrases sink.
#[derive(Debug, Clone, Copy)]
pub struct PartitionPolicy {
    pub hard_skills_visible: bool,
    pub soft_skills_visible: bool,
    pub tools_visible: bool,
    pub domain_phrases_visible: bool,
}

impl Default for PartitionPolicy {
    fn default() -> Self {
        Self {
            hard_skills_visible: true,
            soft_skills_visible: true,
            tools_visible: false,
            domain_phrases_visible: false,
        }
    }
}

impl PartitionPolicy {
    fn visible_set(&self, report: &JdAnalysisReport) -> Vec<String> {
        let mut set = Vec::new();
        let tiers = [
            (self.hard_skills_visible, &report.keywords.hard_skills),
            (self.soft_skills_visible, &report.keywords.soft_skills),
            (self.tools_visible, &report.keywords.tools),
            (self.domain_phrases_visible, &report.keywords.domain_phrases),
        ];
        for (visible, tier) in tiers {
            if visible {
                set.extend(tier.iter().map(|s| fold(s)).filter(|s| !s.is_empty()));
            }
        }
        set
    }
}

/// Splits a comma-separated skills string into (visible, invisible) strings.
/// An empty input yields two empty strings.
pub fn partition_skills(
    skills: &str,
    report: &JdAnalysisReport,
    policy: PartitionPolicy,
) -> (String, String) {
    if skills.trim().is_empty() {
        return (String::new(), String::new());
    }

    let visible_set = policy.visible_set(report);
    let mut visible = Vec::new();
    let mut invisible = Vec::new();

    for skill in skills.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if visible_set.contains(&fold(skill)) {
            visible.push(skill);
        } else {
            invisible.push(skill);
        }
    }

    info!(
        visible = visible.len(),
        invisible = invisible.len(),
        "skills partitioned"
    );
    (visible.join(", "), invisible.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analysis::KeywordTiers;

    fn report() -> JdAnalysisReport {
        JdAnalysisReport {
            keywords: KeywordTiers {
                hard_skills: vec!["SQL".into(), "Python".into()],
                soft_skills: vec!["communication".into()],
                tools: vec!["Tableau".into()],
                domain_phrases: vec!["product analytics".into()],
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_default_policy_keeps_hard_and_soft_visible() {
        let (visible, invisible) =
            partition_skills("SQL, Tableau, Communication, product analytics, Firebase", &report(), PartitionPolicy::default());
        assert_eq!(visible, "SQL, Communication");
        assert_eq!(invisible, "Tableau, product analytics, Firebase");
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let input = "SQL, Tableau, Communication, Firebase";
        let (visible, invisible) = partition_skills(input, &report(), PartitionPolicy::default());

        let mut all: Vec<&str> = visible.split(", ").chain(invisible.split(", ")).collect();
        all.sort_unstable();
        let mut expected: Vec<&str> = input.split(", ").collect();
        expected.sort_unstable();
        assert_eq!(all, expected);

        for v in visible.split(", ") {
            assert!(!invisible.split(", ").any(|i| i == v));
        }
    }

    #[test]
    fn test_empty_skills_yield_empty_strings() {
        let (visible, invisible) = partition_skills("  ", &report(), PartitionPolicy::default());
        assert_eq!(visible, "");
        assert_eq!(invisible, "");
    }

    #[test]
    fn test_empty_report_sinks_everything() {
        let (visible, invisible) = partition_skills(
            "SQL, Python",
            &JdAnalysisReport::default(),
            PartitionPolicy::default(),
        );
        assert_eq!(visible, "");
        assert_eq!(invisible, "SQL, Python");
    }

    #[test]
    fn test_all_tiers_visible_policy() {
        let policy = PartitionPolicy {
            hard_skills_visible: true,
            soft_skills_visible: true,
            tools_visible: true,
            domain_phrases_visible: true,
        };
        let (visible, invisible) =
            partition_skills("SQL, Tableau, product analytics", &report(), policy);
        assert_eq!(visible, "SQL, Tableau, product analytics");
        assert_eq!(invisible, "");
    }
}
