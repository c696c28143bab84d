// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast checks - WCAG 1.4.3 Contrast Minimum (Level A in this
//! catalog)
//!
//! Both checks only judge elements that declare their colors inline; when
//! either color (or, for the large-text variant, the font size) is absent or
//! unparsable, the element is skipped silently rather than guessed at.

use crate::checks::{Category, Check, Severity};
use crate::dom::Document;
use crate::issue::Issue;
use crate::style::{
    contrast_ratio, extract_style_property, is_large_text, parse_color, relative_luminance,
};

/// Minimum ratio for normal text.
const MIN_RATIO_NORMAL: f64 = 4.5;

/// Minimum ratio for large text.
const MIN_RATIO_LARGE: f64 = 3.0;

/// Compute the contrast ratio declared by an inline style, if both a
/// foreground and a background color are present and parsable. The
/// `background` shorthand is consulted when `background-color` is absent.
fn inline_contrast_ratio(style: &str) -> Option<f64> {
    let fg = extract_style_property(style, "color")?;
    let bg = extract_style_property(style, "background-color")
        .or_else(|| extract_style_property(style, "background"))?;

    let fg = parse_color(&fg)?;
    let bg = parse_color(&bg)?;

    Some(contrast_ratio(
        relative_luminance(fg),
        relative_luminance(bg),
    ))
}

/// Insufficient contrast on normal text declared inline.
pub struct ColorContrast;

impl Check for ColorContrast {
    fn id(&self) -> &'static str {
        "color-contrast"
    }

    fn name(&self) -> &'static str {
        "Color Contrast (Normal Text)"
    }

    fn wcag(&self) -> &'static str {
        "1.4.3"
    }

    fn severity(&self) -> Severity {
        Severity::Serious
    }

    fn category(&self) -> Category {
        Category::Color
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Increase the contrast between the text color and background color to at least 4.5:1"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let styled = doc.find_all(|el| el.attr("style").is_some_and(|s| s.contains("color")));

        for el in styled {
            let style = el.attr("style").unwrap_or("");
            let Some(ratio) = inline_contrast_ratio(style) else {
                continue;
            };
            if ratio >= MIN_RATIO_NORMAL {
                continue;
            }
            issues.push(
                Issue::new(
                    self,
                    format!(
                        "Color contrast ratio is {ratio:.2}:1, which is below the required 4.5:1 for normal text"
                    ),
                )
                .for_element(&el),
            );
        }
    }
}

/// Insufficient contrast on large text declared inline. Large text gets the
/// relaxed 3:1 threshold, so an element must declare an inline font-size to
/// qualify.
pub struct ColorContrastLarge;

impl Check for ColorContrastLarge {
    fn id(&self) -> &'static str {
        "color-contrast-large"
    }

    fn name(&self) -> &'static str {
        "Color Contrast (Large Text)"
    }

    fn wcag(&self) -> &'static str {
        "1.4.3"
    }

    fn severity(&self) -> Severity {
        Severity::Serious
    }

    fn category(&self) -> Category {
        Category::Color
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Increase the contrast between the text color and background color to at least 3:1 for large text"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let styled = doc.find_all(|el| el.attr("style").is_some_and(|s| s.contains("color")));

        for el in styled {
            let style = el.attr("style").unwrap_or("");
            if extract_style_property(style, "font-size").is_none() {
                continue;
            }
            if !is_large_text(style) {
                continue;
            }
            let Some(ratio) = inline_contrast_ratio(style) else {
                continue;
            };
            if ratio >= MIN_RATIO_LARGE {
                continue;
            }
            issues.push(
                Issue::new(
                    self,
                    format!(
                        "Color contrast ratio is {ratio:.2}:1, which is below the required 3.0:1 for large text"
                    ),
                )
                .for_element(&el),
            );
        }
    }
}
