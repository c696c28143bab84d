// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-scanner - WCAG accessibility audit engine
//!
//! Audits a single HTML document against a fixed battery of independent,
//! stateless WCAG level-A rule checks and aggregates the findings into a
//! weighted 0-100 compliance score.
//!
//! ## Components
//!
//! - [`dom`] - tolerant HTML parsing and tree traversal (never raises on
//!   malformed markup, never synthesizes `<html>`/`<head>`/`<body>`)
//! - [`style`] - inline-style extraction, CSS color/length parsing, WCAG
//!   luminance and contrast math
//! - [`name`] - accessible-name computation shared by structural checks
//! - [`checks`] - the rule checks and the [`checks::Check`] trait
//! - [`registry`] - the check catalog, keyed by stable check id
//! - [`scanner`] - runs the enabled checks over one document
//! - [`score`] - severity-weighted compliance scoring
//! - [`fetch`] - HTTP collaborator that retrieves page HTML
//! - [`store`] - persistence collaborator for finished scan results
//!
//! ## Usage
//!
//! ```rust
//! use a11y_scanner::{CheckRegistry, Scanner};
//!
//! let registry = CheckRegistry::with_builtin_checks();
//! let scanner = Scanner::new(&registry);
//! let result = scanner.scan("https://example.com/", "<html lang=\"en\">...</html>");
//! println!("score: {}", result.score);
//! ```

pub mod checks;
pub mod dom;
pub mod fetch;
pub mod issue;
pub mod name;
pub mod registry;
pub mod report;
pub mod result;
pub mod scanner;
pub mod score;
pub mod settings;
pub mod store;
pub mod style;

pub use checks::{Category, Check, Severity, WcagLevel};
pub use issue::Issue;
pub use registry::CheckRegistry;
pub use result::ScanResult;
pub use scanner::Scanner;
pub use settings::Settings;

use thiserror::Error;

/// Errors from scanning, fetching, and persistence operations
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("HTTP error {0}")]
    HttpStatus(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("scan not found: {0}")]
    ScanNotFound(uuid::Uuid),

    #[error("issue not found: {0}")]
    IssueNotFound(uuid::Uuid),

    #[error("invalid issue status transition: {from} -> {to}")]
    InvalidTransition {
        from: store::IssueStatus,
        to: store::IssueStatus,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScanError>;
