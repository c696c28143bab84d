// SPDX-License-Identifier: PMPL-1.0-or-later
//! One completed scan.

use crate::checks::{Check, Severity};
use crate::issue::Issue;
use crate::score::compliance_score;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The outcome of scanning one document: the issues found plus derived
/// counts and the compliance score, all computed once at construction and
/// never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// The scanned URL (or file path).
    pub url: String,
    /// Every issue found, in check-execution order.
    pub issues: Vec<Issue>,
    /// Weighted 0-100 compliance score.
    pub score: u8,
    pub critical_count: usize,
    pub serious_count: usize,
    pub moderate_count: usize,
    pub minor_count: usize,
    /// Wall-clock duration of the check loop, in seconds.
    pub duration_seconds: f64,
    /// When the scan finished.
    pub completed_at: DateTime<Utc>,
}

impl ScanResult {
    /// Build a result from a finished scan. `catalog` is the full set of
    /// checks that were eligible to run; the score is a pure function of it
    /// and the issues.
    pub fn new(
        url: impl Into<String>,
        issues: Vec<Issue>,
        duration_seconds: f64,
        catalog: &[&dyn Check],
    ) -> Self {
        let mut critical_count = 0;
        let mut serious_count = 0;
        let mut moderate_count = 0;
        let mut minor_count = 0;

        for issue in &issues {
            match issue.severity {
                Severity::Critical => critical_count += 1,
                Severity::Serious => serious_count += 1,
                Severity::Moderate => moderate_count += 1,
                Severity::Minor => minor_count += 1,
            }
        }

        let score = compliance_score(catalog, &issues);

        ScanResult {
            url: url.into(),
            issues,
            score,
            critical_count,
            serious_count,
            moderate_count,
            minor_count,
            duration_seconds,
            completed_at: Utc::now(),
        }
    }

    /// Total number of issues.
    pub fn total_issues(&self) -> usize {
        self.issues.len()
    }

    /// Issues of one severity.
    pub fn issues_with_severity(&self, severity: Severity) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .collect()
    }

    /// Whether any critical issues were found.
    pub fn has_critical_issues(&self) -> bool {
        self.critical_count > 0
    }
}
