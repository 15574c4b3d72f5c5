//! Deterministic keyword reconciliation. The QA model promises 100%
//! coverage but cannot be trusted to deliver it, so this pass re-checks the
//! skills string against the master list and appends whatever is still
//! missing. Coverage after this pass is guaranteed, not probabilistic.

use tracing::{debug, info};

use crate::pipeline::keywords::{fold, KeywordSet};

/// Filler phrases that add no ATS signal. Matched exactly (case-insensitive,
/// trimmed) against individual skill entries, never as substrings.
pub const PROHIBITED_CLICHES: [&str; 14] = [
    "action and results oriented",
    "team player",
    "a quick and agile learner",
    "self-motivated",
    "innovative thinker",
    "go-getter",
    "detail-oriented",
    "results-driven",
    "passionate professional",
    "hard worker",
    "think outside the box",
    "proactive",
    "willingness to take initiative",
    "process driven",
];

fn split_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Removes prohibited cliches from a comma-separated skills string,
/// preserving the casing and order of everything else.
pub fn filter_cliches(skills: &str) -> String {
    let entries = split_skills(skills);
    let kept: Vec<String> = entries
        .into_iter()
        .filter(|s| !PROHIBITED_CLICHES.contains(&fold(s).as_str()))
        .collect();
    kept.join(", ")
}

/// Appends every master-list keyword missing from the skills string, then
/// sorts and deduplicates the whole list.
///
/// Comparison is on lowercased, trimmed text; appended entries keep the
/// master list's casing, and case-variant duplicates already in the skills
/// string collapse to a single entry. A keyword the cliche filter just removed will be
/// re-appended here if the master list carries it — coverage wins that
/// conflict.
pub fn reconcile_keywords(skills: &str, master_list: &KeywordSet) -> String {
    let current = split_skills(skills);

    let missing: Vec<&str> = master_list
        .iter()
        .filter(|kw| !current.iter().any(|s| fold(s) == fold(kw)))
        .collect();

    if missing.is_empty() {
        debug!("skills already cover the master list");
        return skills.trim().to_string();
    }
    info!(appended = missing.len(), "appending missing keywords to skills");

    let mut merged: Vec<String> = current;
    merged.extend(missing.iter().map(|s| s.to_string()));
    // Sort on the folded key so case variants land adjacent and collapse;
    // the lexicographic tie-break keeps the surviving form deterministic.
    merged.sort_unstable_by(|a, b| fold(a).cmp(&fold(b)).then_with(|| a.cmp(b)));
    merged.dedup_by(|a, b| fold(a) == fold(b));
    merged.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_master_keyword_present_after_reconcile() {
        let master = KeywordSet::from_phrases(["python", "Tableau", "SQL"]);
        let out = reconcile_keywords("Python, SQL", &master);

        for kw in master.iter() {
            let present = out
                .split(',')
                .map(str::trim)
                .any(|s| fold(s) == fold(kw));
            assert!(present, "missing {kw:?} in {out:?}");
        }
    }

    #[test]
    fn test_each_keyword_appears_exactly_once_with_first_seen_case() {
        let master = KeywordSet::from_phrases(["python", "Tableau", "SQL"]);
        let out = reconcile_keywords("Python, SQL", &master);

        let entries: Vec<&str> = out.split(", ").collect();
        // "Python" came from the resume, "Tableau" from the master list.
        assert_eq!(entries.iter().filter(|s| fold(s) == "python").count(), 1);
        assert!(entries.contains(&"Python"));
        assert!(entries.contains(&"Tableau"));
        assert_eq!(entries.iter().filter(|s| fold(s) == "sql").count(), 1);
    }

    #[test]
    fn test_case_variant_duplicates_collapse_on_merge() {
        let master = KeywordSet::from_phrases(["Python"]);
        let out = reconcile_keywords("SQL, Tableau, sql", &master);
        assert_eq!(out, "Python, SQL, Tableau");
    }

    #[test]
    fn test_full_coverage_leaves_skills_untouched() {
        let master = KeywordSet::from_phrases(["SQL"]);
        assert_eq!(reconcile_keywords("SQL, Python", &master), "SQL, Python");
    }

    #[test]
    fn test_empty_skills_becomes_sorted_master_list() {
        let master = KeywordSet::from_phrases(["Tableau", "SQL"]);
        assert_eq!(reconcile_keywords("", &master), "SQL, Tableau");
    }

    #[test]
    fn test_filter_cliches_exact_match_only() {
        let out = filter_cliches("SQL, Team Player, Detail-Oriented, Python");
        assert_eq!(out, "SQL, Python");
    }

    #[test]
    fn test_filter_cliches_does_not_match_substrings() {
        // "team player mindset" is not an exact cliche entry.
        let out = filter_cliches("team player mindset, SQL");
        assert_eq!(out, "team player mindset, SQL");
    }

    #[test]
    fn test_filter_cliches_empty_input() {
        assert_eq!(filter_cliches(""), "");
    }

    #[test]
    fn test_coverage_beats_cliche_filter() {
        // A master-list keyword that happens to be a cliche comes back.
        let master = KeywordSet::from_phrases(["proactive", "SQL"]);
        let filtered = filter_cliches("SQL, proactive");
        assert_eq!(filtered, "SQL");
        let out = reconcile_keywords(&filtered, &master);
        assert!(out.split(", ").any(|s| s == "proactive"));
    }
}
