// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image checks - WCAG 1.1.1 Non-text Content (Level A)

use crate::checks::{Category, Check, Severity};
use crate::dom::Document;
use crate::issue::Issue;

/// Keywords in an image src that suggest the image is informative, not
/// decorative.
const INFORMATIVE_SRC_KEYWORDS: &[&str] = &["logo", "banner", "hero", "product", "team", "photo"];

/// Images without an `alt` attribute.
pub struct ImgAlt;

impl Check for ImgAlt {
    fn id(&self) -> &'static str {
        "img-alt"
    }

    fn name(&self) -> &'static str {
        "Image Alt Text"
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
        true
    }

    fn fix_hint(&self) -> &'static str {
        "Add an alt attribute describing the image content"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        for img in doc.elements_by_tag("img") {
            if img.has_attr("alt") {
                continue;
            }
            // Tracking pixels and tiny spacers are exempt, but a literal "0"
            // dimension still flags.
            if is_tiny_dimension(img.attr("width")) || is_tiny_dimension(img.attr("height")) {
                continue;
            }
            issues.push(Issue::new(self, "Image is missing alt text").for_element(&img));
        }
    }
}

/// An attribute value counts as a tiny dimension when present, not the
/// literal string "0", and its leading integer is <= 1. Non-numeric strings
/// parse as 0 and are therefore exempt.
fn is_tiny_dimension(value: Option<&str>) -> bool {
    match value {
        Some(v) if !v.is_empty() && v != "0" => leading_int(v) <= 1,
        _ => false,
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

/// Images with an empty `alt` that look informative: keyword in the src, or
/// placed inside a link, figure, or article.
pub struct ImgAltEmpty;

impl Check for ImgAltEmpty {
    fn id(&self) -> &'static str {
        "img-alt-empty"
    }

    fn name(&self) -> &'static str {
        "Empty Alt on Informative Images"
    }

    fn wcag(&self) -> &'static str {
        "1.1.1"
    }

    fn severity(&self) -> Severity {
        Severity::Serious
    }

    fn category(&self) -> Category {
        Category::Images
    }

    fn is_fixable(&self) -> bool {
        true
    }

    fn fix_hint(&self) -> &'static str {
        "Add descriptive alt text that conveys the image content, or ensure the image is truly decorative"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        for img in doc.elements_by_tag("img") {
            if img.attr("alt") != Some("") {
                continue;
            }

            let src = img.attr("src").unwrap_or("").to_lowercase();
            let mut flagged = INFORMATIVE_SRC_KEYWORDS.iter().any(|k| src.contains(k));

            if !flagged {
                flagged = img
                    .ancestors()
                    .any(|el| matches!(el.tag(), "a" | "figure" | "article"));
            }

            if !flagged {
                continue;
            }

            issues.push(
                Issue::new(
                    self,
                    "Image appears to be informative but has an empty alt attribute",
                )
                .for_element(&img),
            );
        }
    }
}
