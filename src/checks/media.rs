// SPDX-License-Identifier: PMPL-1.0-or-later
//! Media checks - WCAG 1.4.2 Audio Control (Level A)

use crate::checks::{Category, Check, Severity};
use crate::dom::Document;
use crate::issue::Issue;

/// Video or audio elements set to auto-play.
pub struct AutoplayMedia;

impl Check for AutoplayMedia {
    fn id(&self) -> &'static str {
        "autoplay-media"
    }

    fn name(&self) -> &'static str {
        "Auto-playing Media"
    }

    fn wcag(&self) -> &'static str {
        "1.4.2"
    }

    fn severity(&self) -> Severity {
        Severity::Serious
    }

    fn category(&self) -> Category {
        Category::Media
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Remove the autoplay attribute or provide a mechanism to pause or stop the media"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let media = doc.find_all(|el| {
            matches!(el.tag(), "video" | "audio") && el.has_attr("autoplay")
        });

        for el in media {
            issues.push(
                Issue::new(self, format!("<{}> element is set to auto-play", el.tag()))
                    .for_element(&el),
            );
        }
    }
}
