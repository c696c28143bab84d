// SPDX-License-Identifier: PMPL-1.0-or-later
//! The issue record produced by rule checks.

use crate::checks::{Check, Severity};
use crate::dom::ElementRef;
use serde::{Deserialize, Serialize};

/// Maximum length of the context excerpt, in characters.
const CONTEXT_LIMIT: usize = 200;

/// One detected violation instance.
///
/// Created during a single check's execution and never mutated afterwards;
/// downstream fix/ignore workflows operate on persisted copies, not on this
/// in-memory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Stable id of the check that produced this issue.
    pub check_id: String,
    /// Serialized HTML of the offending node; empty for document-level
    /// issues with no single element.
    pub element: String,
    /// Best-effort CSS-like path to the element.
    pub selector: String,
    /// Human-readable description with concrete values interpolated.
    pub message: String,
    /// Severity, fixed per check.
    pub severity: Severity,
    /// WCAG criterion reference (e.g. "1.1.1"), or "advisory".
    pub wcag: String,
    /// Static remediation text for the check.
    pub fix_hint: String,
    /// Element snapshot truncated to 200 characters.
    pub context: String,
}

impl Issue {
    /// Build an issue carrying the check's fixed metadata. The element
    /// snapshot fields start empty (document-level issue).
    pub fn new(check: &dyn Check, message: impl Into<String>) -> Self {
        Issue {
            check_id: check.id().to_string(),
            element: String::new(),
            selector: String::new(),
            message: message.into(),
            severity: check.severity(),
            wcag: check.wcag().to_string(),
            fix_hint: check.fix_hint().to_string(),
            context: String::new(),
        }
    }

    /// Attach an offending element: snapshot, selector, and truncated
    /// context are derived from the node.
    pub fn for_element(mut self, element: &ElementRef<'_>) -> Self {
        let html = element.html();
        self.selector = element.selector();
        self.context = truncate_context(&html);
        self.element = html;
        self
    }

    /// Override the element snapshot with a literal string (used by
    /// document-level issues that still point at a well-known node).
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = element.into();
        self
    }

    /// Override the selector.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Override the context excerpt.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

fn truncate_context(html: &str) -> String {
    if html.chars().count() > CONTEXT_LIMIT {
        let truncated: String = html.chars().take(CONTEXT_LIMIT).collect();
        format!("{truncated}...")
    } else {
        html.to_string()
    }
}
