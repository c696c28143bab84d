// SPDX-License-Identifier: PMPL-1.0-or-later
//! Weighted compliance scoring.
//!
//! The score reflects which checks failed, not how often: a check with
//! fifty violations weighs the same as one with a single violation. Each
//! check contributes its severity weight to the total; checks with no
//! issues contribute the same weight to the passed side, and the score is
//! the passed share of the total, rounded to an integer percentage.

use crate::checks::Check;
use crate::issue::Issue;
use std::collections::BTreeSet;

/// Compute the 0-100 compliance score for one scan.
///
/// Deterministic: the same catalog and issue list always produce the same
/// integer. An empty catalog scores 100.
pub fn compliance_score(catalog: &[&dyn Check], issues: &[Issue]) -> u8 {
    if catalog.is_empty() {
        return 100;
    }

    let failed_ids: BTreeSet<&str> = issues.iter().map(|i| i.check_id.as_str()).collect();

    let mut total_weight = 0.0;
    let mut passed_weight = 0.0;

    for check in catalog {
        let weight = check.severity().weight();
        total_weight += weight;
        if !failed_ids.contains(check.id()) {
            passed_weight += weight;
        }
    }

    if total_weight == 0.0 {
        return 100;
    }

    (passed_weight / total_weight * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{builtin_checks, Category, Severity};
    use crate::dom::Document;
    use crate::registry::CheckRegistry;
    use crate::WcagLevel;

    struct OneCheck;

    impl Check for OneCheck {
        fn id(&self) -> &'static str {
            "only-check"
        }
        fn name(&self) -> &'static str {
            "Only Check"
        }
        fn wcag(&self) -> &'static str {
            "1.1.1"
        }
        fn severity(&self) -> Severity {
            Severity::Critical
        }
        fn category(&self) -> Category {
            Category::Images
        }
        fn is_fixable(&self) -> bool {
            false
        }
        fn fix_hint(&self) -> &'static str {
            ""
        }
        fn run(&self, _doc: &Document, _issues: &mut Vec<Issue>) {}
    }

    #[test]
    fn test_empty_catalog_scores_100() {
        assert_eq!(compliance_score(&[], &[]), 100);
    }

    #[test]
    fn test_single_check_all_or_nothing() {
        let check = OneCheck;
        let catalog: Vec<&dyn Check> = vec![&check];

        assert_eq!(compliance_score(&catalog, &[]), 100);

        let issue = Issue::new(&check, "failed");
        assert_eq!(compliance_score(&catalog, &[issue]), 0);
    }

    #[test]
    fn test_issue_count_does_not_change_score() {
        let check = OneCheck;
        let catalog: Vec<&dyn Check> = vec![&check];
        let one = vec![Issue::new(&check, "a")];
        let many: Vec<Issue> = (0..50).map(|i| Issue::new(&check, format!("{i}"))).collect();
        assert_eq!(
            compliance_score(&catalog, &one),
            compliance_score(&catalog, &many)
        );
    }

    #[test]
    fn test_score_is_deterministic_and_bounded() {
        let checks = builtin_checks();
        let catalog: Vec<&dyn Check> = checks.iter().map(|c| c.as_ref()).collect();

        let issues = vec![
            Issue::new(catalog[0], "a"),
            Issue::new(catalog[3], "b"),
            Issue::new(catalog[3], "c"),
        ];

        let first = compliance_score(&catalog, &issues);
        for _ in 0..10 {
            assert_eq!(compliance_score(&catalog, &issues), first);
        }
        assert!(first <= 100);
    }

    #[test]
    fn test_severity_weighting() {
        // Failing the critical check must cost more than failing the minor
        // one against the same catalog.
        let registry = CheckRegistry::with_builtin_checks();
        let catalog = registry.checks_at_level(WcagLevel::A);

        let critical = registry.get("img-alt").unwrap();
        let minor = registry.get("landmarks").unwrap();

        let critical_failure = vec![Issue::new(critical, "x")];
        let minor_failure = vec![Issue::new(minor, "x")];

        assert!(
            compliance_score(&catalog, &critical_failure)
                < compliance_score(&catalog, &minor_failure)
        );
    }

    #[test]
    fn test_unknown_check_id_in_issues_does_not_underflow() {
        let check = OneCheck;
        let catalog: Vec<&dyn Check> = vec![&check];
        let mut stray = Issue::new(&check, "x");
        stray.check_id = "not-in-catalog".to_string();
        // A stray issue from outside the catalog leaves all catalog checks
        // passing.
        assert_eq!(compliance_score(&catalog, &[stray]), 100);
    }
}
