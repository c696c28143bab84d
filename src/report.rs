// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for scan results.
//!
//! Two formats: human-readable text with issues grouped by severity, and
//! structured JSON for programmatic consumption.

use crate::checks::Severity;
use crate::result::ScanResult;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Structured JSON.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {other}")),
        }
    }
}

/// Render a scan result in the requested format.
pub fn generate_report(result: &ScanResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(result),
        OutputFormat::Json => generate_json_report(result),
    }
}

fn generate_text_report(result: &ScanResult) -> String {
    let mut output = String::new();

    output.push_str("=== Accessibility Scan Report ===\n\n");
    output.push_str(&format!("URL:   {}\n", result.url));
    output.push_str(&format!("Score: {}/100\n", result.score));
    output.push_str(&format!(
        "Found {} issue(s): {} critical, {} serious, {} moderate, {} minor\n",
        result.total_issues(),
        result.critical_count,
        result.serious_count,
        result.moderate_count,
        result.minor_count
    ));
    output.push_str(&format!("Duration: {:.2}s\n\n", result.duration_seconds));

    if result.issues.is_empty() {
        output.push_str("No accessibility issues found. All checks passed.\n");
        return output;
    }

    for severity in [
        Severity::Critical,
        Severity::Serious,
        Severity::Moderate,
        Severity::Minor,
    ] {
        let issues = result.issues_with_severity(severity);
        if issues.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, issues.len()));

        for issue in issues {
            output.push_str(&format!("[{}] {}\n", issue.check_id, issue.message));
            if !issue.selector.is_empty() {
                output.push_str(&format!("  Selector: {}\n", issue.selector));
            }
            output.push_str(&format!("  WCAG: {}\n", issue.wcag));
            if !issue.fix_hint.is_empty() {
                output.push_str(&format!("  Fix: {}\n", issue.fix_hint));
            }
            output.push('\n');
        }
    }

    output
}

fn generate_json_report(result: &ScanResult) -> String {
    serde_json::to_string_pretty(result)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize scan result: {e}\"}}"))
}
