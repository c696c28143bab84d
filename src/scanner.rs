// SPDX-License-Identifier: PMPL-1.0-or-later
//! Scan orchestration.
//!
//! A scan is synchronous and single-threaded: parse the document, run every
//! enabled level-A check against the same immutable tree, score the
//! findings. Checks are independent, so execution order never affects the
//! issue set; it only determines issue ordering in the result.

use crate::checks::WcagLevel;
use crate::dom::Document;
use crate::fetch::PageFetcher;
use crate::issue::Issue;
use crate::registry::CheckRegistry;
use crate::result::ScanResult;
use crate::settings::Settings;
use crate::Result;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info};

/// Runs checks from a registry against documents.
pub struct Scanner<'a> {
    registry: &'a CheckRegistry,
    ignored_checks: BTreeSet<String>,
}

impl<'a> Scanner<'a> {
    /// A scanner over the given registry with nothing ignored.
    pub fn new(registry: &'a CheckRegistry) -> Self {
        Scanner {
            registry,
            ignored_checks: BTreeSet::new(),
        }
    }

    /// A scanner configured from settings (ignored check ids).
    pub fn with_settings(registry: &'a CheckRegistry, settings: &Settings) -> Self {
        Scanner {
            registry,
            ignored_checks: settings.ignored_checks.clone(),
        }
    }

    /// Ignore the given check ids. Unknown ids are tolerated.
    pub fn ignore_checks<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_checks.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Scan already-fetched HTML. Never fails: malformed markup degrades to
    /// a best-effort tree and checks that find nothing stay silent.
    pub fn scan(&self, url: &str, html: &str) -> ScanResult {
        let start = Instant::now();

        let doc = Document::parse(html);
        let catalog = self.registry.checks_at_level(WcagLevel::A);
        let mut issues: Vec<Issue> = Vec::new();

        for check in &catalog {
            if self.ignored_checks.contains(check.id()) {
                debug!(check = check.id(), "skipping ignored check");
                continue;
            }
            let before = issues.len();
            check.run(&doc, &mut issues);
            debug!(
                check = check.id(),
                found = issues.len() - before,
                "check complete"
            );
        }

        let duration = start.elapsed().as_secs_f64();
        let result = ScanResult::new(url, issues, duration, &catalog);

        info!(
            url,
            score = result.score,
            issues = result.total_issues(),
            duration_seconds = result.duration_seconds,
            "scan complete"
        );

        result
    }

    /// Fetch a URL through the given fetcher and scan the returned HTML.
    /// Network and HTTP-status failures abort the scan.
    pub fn scan_url(&self, fetcher: &PageFetcher, url: &str) -> Result<ScanResult> {
        let html = fetcher.fetch(url)?;
        Ok(self.scan(url, &html))
    }
}
