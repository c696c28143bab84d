// SPDX-License-Identifier: PMPL-1.0-or-later
//! Navigation checks: link and button names, tab order, skip links, and
//! new-window warnings.

use crate::checks::{Category, Check, Severity};
use crate::dom::{Document, ElementRef};
use crate::issue::Issue;
use crate::name::has_accessible_name;

/// Links with an href but no accessible name - WCAG 2.4.4.
pub struct EmptyLinks;

impl Check for EmptyLinks {
    fn id(&self) -> &'static str {
        "empty-links"
    }

    fn name(&self) -> &'static str {
        "Empty Links"
    }

    fn wcag(&self) -> &'static str {
        "2.4.4"
    }

    fn severity(&self) -> Severity {
        Severity::Serious
    }

    fn category(&self) -> Category {
        Category::Navigation
    }

    fn is_fixable(&self) -> bool {
        true
    }

    fn fix_hint(&self) -> &'static str {
        "Add text content, aria-label, or an alt attribute to an image inside the link"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        for link in doc.find_all(|el| el.tag() == "a" && el.has_attr("href")) {
            if has_accessible_name(&link) {
                continue;
            }
            issues.push(Issue::new(self, "Link has no accessible text").for_element(&link));
        }
    }
}

/// Buttons (native or role="button") with no accessible name - WCAG 4.1.2.
pub struct EmptyButtons;

impl Check for EmptyButtons {
    fn id(&self) -> &'static str {
        "empty-buttons"
    }

    fn name(&self) -> &'static str {
        "Empty Buttons"
    }

    fn wcag(&self) -> &'static str {
        "4.1.2"
    }

    fn severity(&self) -> Severity {
        Severity::Serious
    }

    fn category(&self) -> Category {
        Category::Navigation
    }

    fn is_fixable(&self) -> bool {
        true
    }

    fn fix_hint(&self) -> &'static str {
        "Add text content, aria-label, or title to the button"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let buttons =
            doc.find_all(|el| el.tag() == "button" || el.attr("role") == Some("button"));

        for button in buttons {
            if has_accessible_name(&button) {
                continue;
            }
            // An input acting as a button is named by its value.
            if button.tag() == "input"
                && button.attr("value").is_some_and(|v| !v.trim().is_empty())
            {
                continue;
            }
            issues.push(Issue::new(self, "Button has no accessible name").for_element(&button));
        }
    }
}

/// Positive tabindex values - WCAG 2.4.3.
pub struct Tabindex;

impl Check for Tabindex {
    fn id(&self) -> &'static str {
        "tabindex"
    }

    fn name(&self) -> &'static str {
        "Positive Tabindex"
    }

    fn wcag(&self) -> &'static str {
        "2.4.3"
    }

    fn severity(&self) -> Severity {
        Severity::Moderate
    }

    fn category(&self) -> Category {
        Category::Navigation
    }

    fn is_fixable(&self) -> bool {
        true
    }

    fn fix_hint(&self) -> &'static str {
        "Remove the tabindex attribute or set it to 0 or -1 to maintain natural document tab order"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        for el in doc.find_all(|el| el.has_attr("tabindex")) {
            let value = leading_int(el.attr("tabindex").unwrap_or(""));
            if value <= 0 {
                continue;
            }
            issues.push(
                Issue::new(
                    self,
                    format!(
                        "Element has a positive tabindex value of {value}, which disrupts natural tab order"
                    ),
                )
                .for_element(&el),
            );
        }
    }
}

fn leading_int(s: &str) -> i64 {
    let t = s.trim_start();
    let (sign, digits) = match t.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, t.strip_prefix('+').unwrap_or(t)),
    };
    let run: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    run.parse::<i64>().map_or(0, |n| sign * n)
}

/// No skip-navigation link among the first links in the body - WCAG 2.4.1.
pub struct SkipNav;

const SKIP_KEYWORDS: &[&str] = &["skip", "main", "content"];

/// How many leading links are searched for a skip link.
const SKIP_LINK_WINDOW: usize = 10;

impl Check for SkipNav {
    fn id(&self) -> &'static str {
        "skip-nav"
    }

    fn name(&self) -> &'static str {
        "Skip Navigation"
    }

    fn wcag(&self) -> &'static str {
        "2.4.1"
    }

    fn severity(&self) -> Severity {
        Severity::Moderate
    }

    fn category(&self) -> Category {
        Category::Navigation
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Add a skip navigation link as the first focusable element in the body, e.g. <a href=\"#main-content\">Skip to content</a>"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let Some(body) = doc.elements_by_tag("body").into_iter().next() else {
            return;
        };

        let has_skip_link = body
            .descendants_by_tag("a")
            .iter()
            .take(SKIP_LINK_WINDOW)
            .any(|link| is_skip_link(link));

        if has_skip_link {
            return;
        }

        issues.push(
            Issue::new(self, "Page is missing a skip navigation link")
                .for_element(&body)
                .with_element("<body>")
                .with_selector("body"),
        );
    }
}

fn is_skip_link(link: &ElementRef<'_>) -> bool {
    let Some(href) = link.attr("href") else {
        return false;
    };
    if !href.starts_with('#') || href == "#" {
        return false;
    }

    let text = link.text().trim().to_lowercase();
    if SKIP_KEYWORDS.iter().any(|k| text.contains(k)) {
        return true;
    }

    let aria_label = link.attr("aria-label").unwrap_or("").trim().to_lowercase();
    !aria_label.is_empty() && SKIP_KEYWORDS.iter().any(|k| aria_label.contains(k))
}

/// Links opening a new window without saying so - WCAG 2.4.4.
pub struct LinkNewWindow;

const WARNING_PATTERNS: &[&str] = &["new window", "new tab", "opens in", "external"];

impl Check for LinkNewWindow {
    fn id(&self) -> &'static str {
        "link-new-window"
    }

    fn name(&self) -> &'static str {
        "Links Opening in New Window"
    }

    fn wcag(&self) -> &'static str {
        "2.4.4"
    }

    fn severity(&self) -> Severity {
        Severity::Moderate
    }

    fn category(&self) -> Category {
        Category::Navigation
    }

    fn is_fixable(&self) -> bool {
        true
    }

    fn fix_hint(&self) -> &'static str {
        "Add screen reader text such as \"(opens in a new tab)\" or an aria-label indicating the link opens in a new window"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        for link in doc.find_all(|el| el.tag() == "a" && el.attr("target") == Some("_blank")) {
            if has_new_window_warning(&link) {
                continue;
            }
            issues.push(
                Issue::new(self, "Link opens in a new window without warning").for_element(&link),
            );
        }
    }
}

fn has_new_window_warning(link: &ElementRef<'_>) -> bool {
    let contains_warning =
        |text: &str| WARNING_PATTERNS.iter().any(|pattern| text.contains(pattern));

    if contains_warning(&link.text().trim().to_lowercase()) {
        return true;
    }

    let aria_label = link.attr("aria-label").unwrap_or("").trim().to_lowercase();
    if !aria_label.is_empty() && contains_warning(&aria_label) {
        return true;
    }

    // Visually hidden screen-reader text inside the link.
    link.descendants().iter().any(|el| {
        el.attr("class").is_some_and(|class| {
            class.contains("screen-reader-text") || class.contains("sr-only")
        }) && contains_warning(&el.text().trim().to_lowercase())
    })
}
