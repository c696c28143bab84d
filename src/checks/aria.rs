// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA checks - WCAG 4.1.2 Name, Role, Value (Level A)

use crate::checks::{Category, Check, Severity};
use crate::dom::Document;
use crate::issue::Issue;

/// The closed set of valid WAI-ARIA role tokens.
const VALID_ROLES: &[&str] = &[
    "alert",
    "alertdialog",
    "application",
    "article",
    "banner",
    "button",
    "cell",
    "checkbox",
    "columnheader",
    "combobox",
    "complementary",
    "contentinfo",
    "definition",
    "dialog",
    "directory",
    "document",
    "feed",
    "figure",
    "form",
    "grid",
    "gridcell",
    "group",
    "heading",
    "img",
    "link",
    "list",
    "listbox",
    "listitem",
    "log",
    "main",
    "marquee",
    "math",
    "menu",
    "menubar",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "navigation",
    "none",
    "note",
    "option",
    "presentation",
    "progressbar",
    "radio",
    "radiogroup",
    "region",
    "row",
    "rowgroup",
    "rowheader",
    "scrollbar",
    "search",
    "searchbox",
    "separator",
    "slider",
    "spinbutton",
    "status",
    "switch",
    "tab",
    "table",
    "tablist",
    "tabpanel",
    "term",
    "textbox",
    "timer",
    "toolbar",
    "tooltip",
    "tree",
    "treegrid",
    "treeitem",
];

/// aria-labelledby / aria-describedby values referencing ids that do not
/// exist anywhere in the document.
pub struct AriaReferences;

impl Check for AriaReferences {
    fn id(&self) -> &'static str {
        "aria-references"
    }

    fn name(&self) -> &'static str {
        "Broken ARIA References"
    }

    fn wcag(&self) -> &'static str {
        "4.1.2"
    }

    fn severity(&self) -> Severity {
        Severity::Serious
    }

    fn category(&self) -> Category {
        Category::Aria
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Ensure all IDs referenced by aria-labelledby and aria-describedby exist in the document"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let elements = doc.find_all(|el| {
            el.has_attr("aria-labelledby") || el.has_attr("aria-describedby")
        });

        for el in elements {
            let mut missing: Vec<&str> = Vec::new();

            for attr in ["aria-labelledby", "aria-describedby"] {
                let Some(value) = el.attr(attr) else { continue };
                for ref_id in value.split_whitespace() {
                    if doc.element_by_id(ref_id).is_none() {
                        missing.push(ref_id);
                    }
                }
            }

            if missing.is_empty() {
                continue;
            }

            issues.push(
                Issue::new(
                    self,
                    format!("ARIA attribute references missing ID(s): {}", missing.join(", ")),
                )
                .for_element(&el),
            );
        }
    }
}

/// Role attributes whose value is not a valid WAI-ARIA role token.
pub struct AriaRoles;

impl Check for AriaRoles {
    fn id(&self) -> &'static str {
        "aria-roles"
    }

    fn name(&self) -> &'static str {
        "Invalid ARIA Roles"
    }

    fn wcag(&self) -> &'static str {
        "4.1.2"
    }

    fn severity(&self) -> Severity {
        Severity::Serious
    }

    fn category(&self) -> Category {
        Category::Aria
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Use a valid WAI-ARIA role or remove the role attribute"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        for el in doc.find_all(|el| el.has_attr("role")) {
            let role = el.attr("role").unwrap_or("").trim().to_lowercase();
            // Empty role values are not evaluated.
            if role.is_empty() {
                continue;
            }
            if VALID_ROLES.contains(&role.as_str()) {
                continue;
            }
            issues.push(
                Issue::new(self, format!("Element has an invalid ARIA role: \"{role}\""))
                    .for_element(&el),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_check(check: &dyn Check, html: &str) -> Vec<Issue> {
        let doc = Document::parse(html);
        let mut issues = Vec::new();
        check.run(&doc, &mut issues);
        issues
    }

    #[test]
    fn test_resolved_references_pass() {
        let html = r#"<html><body>
            <span id="lbl">Name</span>
            <input type="text" aria-labelledby="lbl">
        </body></html>"#;
        assert!(run_check(&AriaReferences, html).is_empty());
    }

    #[test]
    fn test_broken_reference_flags() {
        let html = r#"<html><body><input type="text" aria-labelledby="missing"></body></html>"#;
        let issues = run_check(&AriaReferences, html);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("missing"));
    }

    #[test]
    fn test_multiple_missing_ids_in_one_issue() {
        let html = r#"<html><body>
            <div aria-labelledby="a b" aria-describedby="c">x</div>
        </body></html>"#;
        let issues = run_check(&AriaReferences, html);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("a, b, c"));
    }

    #[test]
    fn test_partially_resolved_lists_only_missing() {
        let html = r#"<html><body>
            <span id="a">x</span>
            <div aria-labelledby="a b">y</div>
        </body></html>"#;
        let issues = run_check(&AriaReferences, html);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains('b'));
        assert!(!issues[0].message.contains("a,"));
    }

    #[test]
    fn test_valid_role_passes() {
        let html = r#"<html><body><div role="navigation">x</div></body></html>"#;
        assert!(run_check(&AriaRoles, html).is_empty());
    }

    #[test]
    fn test_invalid_role_flags() {
        let html = r#"<html><body><div role="foobar">x</div></body></html>"#;
        let issues = run_check(&AriaRoles, html);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("foobar"));
    }

    #[test]
    fn test_empty_role_is_not_evaluated() {
        let html = r#"<html><body><div role="">x</div></body></html>"#;
        assert!(run_check(&AriaRoles, html).is_empty());
    }

    #[test]
    fn test_role_comparison_is_case_insensitive() {
        let html = r#"<html><body><div role="BUTTON">x</div></body></html>"#;
        assert!(run_check(&AriaRoles, html).is_empty());
    }
}
