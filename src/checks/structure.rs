// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document-structure checks: language, page title, heading hierarchy,
//! duplicate ids, iframe titles, landmarks, redundant title attributes.

use crate::checks::{Category, Check, Severity};
use crate::dom::Document;
use crate::issue::Issue;
use std::collections::HashMap;

/// Missing `lang` attribute on `<html>` - WCAG 3.1.1.
///
/// Only fires when an `<html>` element actually exists; the DOM layer never
/// synthesizes one, so fragments stay silent.
pub struct DocumentLang;

impl Check for DocumentLang {
    fn id(&self) -> &'static str {
        "document-lang"
    }

    fn name(&self) -> &'static str {
        "Document Language"
    }

    fn wcag(&self) -> &'static str {
        "3.1.1"
    }

    fn severity(&self) -> Severity {
        Severity::Serious
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn is_fixable(&self) -> bool {
        true
    }

    fn fix_hint(&self) -> &'static str {
        "Add a lang attribute to the <html> element, e.g. <html lang=\"en\">"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let Some(html) = doc.elements_by_tag("html").into_iter().next() else {
            return;
        };

        if html.attr("lang").is_some_and(|v| !v.is_empty()) {
            return;
        }

        issues.push(
            Issue::new(
                self,
                "Document is missing a lang attribute on the <html> element",
            )
            .with_element("<html>")
            .with_selector("html")
            .with_context("<html>"),
        );
    }
}

/// Missing or empty `<title>` inside `<head>` - WCAG 2.4.2.
pub struct PageTitle;

impl Check for PageTitle {
    fn id(&self) -> &'static str {
        "page-title"
    }

    fn name(&self) -> &'static str {
        "Page Title"
    }

    fn wcag(&self) -> &'static str {
        "2.4.2"
    }

    fn severity(&self) -> Severity {
        Severity::Serious
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Add a descriptive <title> element inside <head>"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let title = doc
            .elements_by_tag("head")
            .into_iter()
            .flat_map(|head| head.child_elements())
            .find(|el| el.tag() == "title");

        let missing = match title {
            Some(t) => t.text().trim().is_empty(),
            None => true,
        };

        if missing {
            issues.push(
                Issue::new(self, "Page is missing a title or title is empty")
                    .with_element("<title>")
                    .with_selector("head > title")
                    .with_context("<head>...</head>"),
            );
        }
    }
}

/// Id values used more than once - WCAG 4.1.1. One issue per duplicated
/// value, reporting the first occurrence and the total count.
pub struct DuplicateIds;

impl Check for DuplicateIds {
    fn id(&self) -> &'static str {
        "duplicate-ids"
    }

    fn name(&self) -> &'static str {
        "Duplicate IDs"
    }

    fn wcag(&self) -> &'static str {
        "4.1.1"
    }

    fn severity(&self) -> Severity {
        Severity::Moderate
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Ensure each id attribute value is unique on the page"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let mut seen_order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first: HashMap<&str, crate::dom::ElementRef<'_>> = HashMap::new();

        for el in doc.elements() {
            let Some(id) = el.attr("id") else { continue };
            if id.is_empty() {
                continue;
            }
            let count = counts.entry(id).or_insert(0);
            if *count == 0 {
                seen_order.push(id);
                first.insert(id, el);
            }
            *count += 1;
        }

        for id in seen_order {
            let count = counts[id];
            if count > 1 {
                issues.push(
                    Issue::new(self, format!("ID \"{id}\" is used {count} times on this page"))
                        .for_element(&first[id])
                        .with_selector(format!("#{id}")),
                );
            }
        }
    }
}

/// Missing h1 and skipped heading levels - WCAG 1.3.1.
pub struct HeadingStructure;

impl Check for HeadingStructure {
    fn id(&self) -> &'static str {
        "heading-structure"
    }

    fn name(&self) -> &'static str {
        "Heading Structure"
    }

    fn wcag(&self) -> &'static str {
        "1.3.1"
    }

    fn severity(&self) -> Severity {
        Severity::Moderate
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Use sequential heading levels without skipping (e.g., h2 should follow h1, not h3)"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let headings: Vec<(u32, crate::dom::ElementRef<'_>)> = doc
            .elements()
            .filter_map(|el| heading_level(el.tag()).map(|level| (level, el)))
            .collect();

        if !headings.iter().any(|&(level, _)| level == 1) {
            issues.push(
                Issue::new(self, "Page is missing a first-level heading (h1)")
                    .with_selector("h1"),
            );
        }

        // Only increasing jumps flag; returning to a shallower level is fine.
        for pair in headings.windows(2) {
            let (previous, _) = pair[0];
            let (current, element) = pair[1];
            if current > previous + 1 {
                issues.push(
                    Issue::new(
                        self,
                        format!(
                            "Heading level h{current} skips from h{previous} (should not skip levels)"
                        ),
                    )
                    .for_element(&element),
                );
            }
        }
    }
}

fn heading_level(tag: &str) -> Option<u32> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Iframes without a title attribute - WCAG 4.1.2. Hidden iframes are
/// exempt.
pub struct IframeTitle;

impl Check for IframeTitle {
    fn id(&self) -> &'static str {
        "iframe-title"
    }

    fn name(&self) -> &'static str {
        "Iframe Title"
    }

    fn wcag(&self) -> &'static str {
        "4.1.2"
    }

    fn severity(&self) -> Severity {
        Severity::Moderate
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Add a title attribute that describes the content of the iframe"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        for iframe in doc.elements_by_tag("iframe") {
            if iframe.attr("title").is_some_and(|v| !v.is_empty()) {
                continue;
            }
            if iframe.attr("aria-hidden") == Some("true") {
                continue;
            }
            if iframe.has_attr("hidden") {
                continue;
            }
            issues.push(
                Issue::new(self, "Iframe is missing a title attribute").for_element(&iframe),
            );
        }
    }
}

/// No `<main>` or `role="main"` landmark anywhere - WCAG 1.3.1.
pub struct Landmarks;

impl Check for Landmarks {
    fn id(&self) -> &'static str {
        "landmarks"
    }

    fn name(&self) -> &'static str {
        "Landmark Regions"
    }

    fn wcag(&self) -> &'static str {
        "1.3.1"
    }

    fn severity(&self) -> Severity {
        Severity::Minor
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Add a <main> element to wrap the primary content of the page"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let found = doc
            .elements()
            .any(|el| el.tag() == "main" || el.attr("role") == Some("main"));

        if !found {
            issues.push(
                Issue::new(self, "Page is missing a main landmark region").with_selector("main"),
            );
        }
    }
}

/// Title attributes that duplicate the element's visible text or
/// aria-label. Advisory, not a WCAG failure.
pub struct TitleRedundant;

impl Check for TitleRedundant {
    fn id(&self) -> &'static str {
        "title-redundant"
    }

    fn name(&self) -> &'static str {
        "Redundant Title Attributes"
    }

    fn wcag(&self) -> &'static str {
        "advisory"
    }

    fn severity(&self) -> Severity {
        Severity::Minor
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn is_fixable(&self) -> bool {
        true
    }

    fn fix_hint(&self) -> &'static str {
        "Remove the redundant title attribute, or provide additional useful information in it"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        for el in doc.find_all(|el| el.has_attr("title")) {
            let title = el.attr("title").unwrap_or("").trim().to_lowercase();
            if title.is_empty() {
                continue;
            }

            let text = el.text();
            let text = text.trim().to_lowercase();
            let mut redundant = !text.is_empty() && text == title;

            if !redundant {
                if let Some(aria_label) = el.attr("aria-label") {
                    let aria_label = aria_label.trim().to_lowercase();
                    redundant = !aria_label.is_empty() && aria_label == title;
                }
            }

            if redundant {
                issues.push(
                    Issue::new(
                        self,
                        "Element has a title attribute that duplicates its visible text or aria-label",
                    )
                    .for_element(&el),
                );
            }
        }
    }
}
