// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests: full scans over HTML fixtures.

use a11y_scanner::report::{generate_report, OutputFormat};
use a11y_scanner::store::{IssueStatus, JsonStore, ScanStore};
use a11y_scanner::{CheckRegistry, Scanner, Severity};
use std::collections::BTreeSet;

const ACCESSIBLE: &str = include_str!("fixtures/accessible.html");
const INACCESSIBLE: &str = include_str!("fixtures/inaccessible.html");

fn scan(html: &str) -> a11y_scanner::ScanResult {
    let registry = CheckRegistry::with_builtin_checks();
    Scanner::new(&registry).scan("https://example.com/", html)
}

#[test]
fn test_accessible_fixture_is_clean() {
    let result = scan(ACCESSIBLE);
    assert_eq!(
        result.total_issues(),
        0,
        "accessible fixture should be clean, got: {:?}",
        result
            .issues
            .iter()
            .map(|i| (&i.check_id, &i.message))
            .collect::<Vec<_>>()
    );
    assert_eq!(result.score, 100);
}

#[test]
fn test_inaccessible_fixture_fails_broadly() {
    let result = scan(INACCESSIBLE);

    let failed: BTreeSet<&str> = result.issues.iter().map(|i| i.check_id.as_str()).collect();
    for expected in [
        "img-alt",
        "img-alt-empty",
        "form-labels",
        "document-lang",
        "empty-links",
        "page-title",
        "duplicate-ids",
        "heading-structure",
        "iframe-title",
        "landmarks",
        "autoplay-media",
        "table-headers",
        "tabindex",
        "skip-nav",
        "empty-th",
        "aria-references",
        "aria-roles",
        "link-new-window",
        "color-contrast",
        "color-contrast-large",
    ] {
        assert!(failed.contains(expected), "expected a {expected} issue");
    }

    assert!(result.score < 50, "score should be low, got {}", result.score);
    assert!(result.has_critical_issues());
}

#[test]
fn test_severity_counts_partition_issues() {
    for html in [ACCESSIBLE, INACCESSIBLE, "", "<div>fragment</div>"] {
        let result = scan(html);
        assert_eq!(
            result.critical_count
                + result.serious_count
                + result.moderate_count
                + result.minor_count,
            result.total_issues()
        );
    }
}

#[test]
fn test_score_is_deterministic() {
    let first = scan(INACCESSIBLE).score;
    for _ in 0..5 {
        assert_eq!(scan(INACCESSIBLE).score, first);
    }
    assert!(first <= 100);
}

#[test]
fn test_score_counts_failed_checks_not_issue_counts() {
    // Two unlabeled inputs fail one check; the score matches a single
    // unlabeled input.
    let one = scan(r##"<html lang="en"><head><title>t</title></head><body>
        <a href="#m">Skip to content</a><main id="m"><h1>h</h1>
        <input type="text"></main></body></html>"##);
    let two = scan(r##"<html lang="en"><head><title>t</title></head><body>
        <a href="#m">Skip to content</a><main id="m"><h1>h</h1>
        <input type="text"><input type="email"></main></body></html>"##);

    assert_eq!(one.issues.len(), 1);
    assert_eq!(two.issues.len(), 2);
    assert_eq!(one.score, two.score);
}

#[test]
fn test_ignored_checks_do_not_produce_issues() {
    let registry = CheckRegistry::with_builtin_checks();
    let result = Scanner::new(&registry)
        .ignore_checks(["img-alt", "document-lang", "page-title"])
        .scan("https://example.com/", INACCESSIBLE);

    let failed: BTreeSet<&str> = result.issues.iter().map(|i| i.check_id.as_str()).collect();
    assert!(!failed.contains("img-alt"));
    assert!(!failed.contains("document-lang"));
    assert!(!failed.contains("page-title"));
    assert!(failed.contains("autoplay-media"));
}

#[test]
fn test_issue_fields_are_populated() {
    let result = scan(INACCESSIBLE);
    for issue in &result.issues {
        assert!(!issue.check_id.is_empty());
        assert!(!issue.message.is_empty());
        assert!(!issue.wcag.is_empty());
        assert!(issue.context.chars().count() <= 203);
    }

    let img_issue = result
        .issues
        .iter()
        .find(|i| i.check_id == "img-alt")
        .expect("img-alt issue");
    assert!(img_issue.element.contains("logo.png"));
    assert!(img_issue.selector.contains("img"));
    assert_eq!(img_issue.severity, Severity::Critical);
}

#[test]
fn test_duplicate_id_message_carries_count() {
    let result = scan(INACCESSIBLE);
    let dup = result
        .issues
        .iter()
        .find(|i| i.check_id == "duplicate-ids")
        .expect("duplicate-ids issue");
    assert!(dup.message.contains('2'));
    assert_eq!(dup.selector, "#dup");
}

#[test]
fn test_json_report_round_trips() {
    let result = scan(INACCESSIBLE);
    let report = generate_report(&result, OutputFormat::Json);
    let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");

    assert_eq!(parsed["url"], "https://example.com/");
    assert_eq!(
        parsed["issues"].as_array().unwrap().len(),
        result.total_issues()
    );
    assert_eq!(parsed["score"].as_u64().unwrap(), u64::from(result.score));
}

#[test]
fn test_text_report_lists_every_failed_check() {
    let result = scan(INACCESSIBLE);
    let report = generate_report(&result, OutputFormat::Text);
    for issue in &result.issues {
        assert!(report.contains(&issue.check_id));
    }
}

#[test]
fn test_store_round_trip_and_status_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonStore::new(dir.path());

    let result = scan(INACCESSIBLE);
    let scan_id = store.save_scan(&result).unwrap();

    let loaded = store.load_scan(scan_id).unwrap();
    assert_eq!(loaded.score, result.score);
    assert_eq!(loaded.total_issues, result.total_issues());

    let issue_id = loaded.issues[0].id;
    store
        .set_issue_status(scan_id, issue_id, IssueStatus::Fixed)
        .unwrap();
    let reloaded = store.load_scan(scan_id).unwrap();
    assert_eq!(reloaded.issues[0].status, IssueStatus::Fixed);
    // Scores are persisted facts; a status change does not rescore.
    assert_eq!(reloaded.score, result.score);
}

#[test]
fn test_fragment_scan_observes_structural_absence() {
    // A fragment has no <html> or <body>, so document-lang and skip-nav
    // stay silent while page-title, heading-structure, and landmarks fire.
    let result = scan("<div><p>Just a fragment</p></div>");
    let failed: BTreeSet<&str> = result.issues.iter().map(|i| i.check_id.as_str()).collect();

    assert!(!failed.contains("document-lang"));
    assert!(!failed.contains("skip-nav"));
    assert!(failed.contains("page-title"));
    assert!(failed.contains("heading-structure"));
    assert!(failed.contains("landmarks"));
}
