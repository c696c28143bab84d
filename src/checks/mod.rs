// SPDX-License-Identifier: PMPL-1.0-or-later
//! The WCAG rule checks.
//!
//! Each check is a stateless unit type implementing [`Check`]: fixed
//! metadata plus a `run` that appends zero or more issues. Checks are
//! independent; running any subset in any order over the same document
//! yields the same total issue set. Files group checks by category, one
//! file per category.

pub mod aria;
pub mod color;
pub mod forms;
pub mod images;
pub mod media;
pub mod navigation;
pub mod structure;
pub mod tables;

use crate::dom::Document;
use crate::issue::Issue;
use serde::{Deserialize, Serialize};

/// Issue severity, fixed per check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Serious,
    Moderate,
    Minor,
}

impl Severity {
    /// Weight used by the scoring engine.
    pub fn weight(self) -> f64 {
        match self {
            Severity::Critical => 3.0,
            Severity::Serious => 2.0,
            Severity::Moderate => 1.0,
            Severity::Minor => 0.5,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Serious => write!(f, "serious"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::Minor => write!(f, "minor"),
        }
    }
}

/// WCAG conformance level. Ordering follows conformance rank (A < AA < AAA).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    A,
    AA,
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// Check category, used for grouping in reports and the catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Images,
    Forms,
    Structure,
    Navigation,
    Aria,
    Media,
    Color,
    Tables,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Images => write!(f, "images"),
            Category::Forms => write!(f, "forms"),
            Category::Structure => write!(f, "structure"),
            Category::Navigation => write!(f, "navigation"),
            Category::Aria => write!(f, "aria"),
            Category::Media => write!(f, "media"),
            Category::Color => write!(f, "color"),
            Category::Tables => write!(f, "tables"),
        }
    }
}

/// One WCAG rule check.
///
/// Metadata accessors are constant per check. `run` must tolerate any
/// document shape - absence of expected elements means zero issues, never
/// an error - and must not depend on other checks having run.
pub trait Check: Send + Sync {
    /// Stable identifier, unique across the catalog.
    fn id(&self) -> &'static str;

    /// Human-readable display name.
    fn name(&self) -> &'static str;

    /// WCAG success-criterion reference, or "advisory".
    fn wcag(&self) -> &'static str;

    /// WCAG conformance level of the criterion.
    fn level(&self) -> WcagLevel {
        WcagLevel::A
    }

    /// Severity assigned to every issue this check produces.
    fn severity(&self) -> Severity;

    /// Grouping category.
    fn category(&self) -> Category;

    /// Whether the issue lends itself to automated fixing. Advisory only;
    /// the scanner never rewrites markup.
    fn is_fixable(&self) -> bool;

    /// Static remediation text attached to every issue.
    fn fix_hint(&self) -> &'static str;

    /// Run the check, appending issues for each violation found.
    fn run(&self, doc: &Document, issues: &mut Vec<Issue>);
}

/// The full builtin catalog: one instance of every check, built once at
/// startup. The set is closed; there is no runtime discovery.
pub fn builtin_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(images::ImgAlt),
        Box::new(images::ImgAltEmpty),
        Box::new(forms::FormLabels),
        Box::new(structure::DocumentLang),
        Box::new(navigation::EmptyLinks),
        Box::new(navigation::EmptyButtons),
        Box::new(structure::PageTitle),
        Box::new(structure::DuplicateIds),
        Box::new(structure::HeadingStructure),
        Box::new(structure::IframeTitle),
        Box::new(structure::Landmarks),
        Box::new(media::AutoplayMedia),
        Box::new(tables::TableHeaders),
        Box::new(navigation::Tabindex),
        Box::new(navigation::SkipNav),
        Box::new(structure::TitleRedundant),
        Box::new(tables::EmptyTh),
        Box::new(aria::AriaReferences),
        Box::new(aria::AriaRoles),
        Box::new(navigation::LinkNewWindow),
        Box::new(color::ColorContrast),
        Box::new(color::ColorContrastLarge),
    ]
}
