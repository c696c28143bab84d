// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form checks - WCAG 1.3.1 Info and Relationships (Level A)

use crate::checks::{Category, Check, Severity};
use crate::dom::Document;
use crate::issue::Issue;

/// Input types that take no visible label.
const EXCLUDED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "image"];

/// Form fields without an associated label.
pub struct FormLabels;

impl Check for FormLabels {
    fn id(&self) -> &'static str {
        "form-labels"
    }

    fn name(&self) -> &'static str {
        "Form Labels"
    }

    fn wcag(&self) -> &'static str {
        "1.3.1"
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn category(&self) -> Category {
        Category::Forms
    }

    fn is_fixable(&self) -> bool {
        true
    }

    fn fix_hint(&self) -> &'static str {
        "Add a <label> element with a matching \"for\" attribute, or use aria-label"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        let fields = doc.find_all(|el| match el.tag() {
            "select" | "textarea" => true,
            "input" => {
                let input_type = el.attr("type").unwrap_or("").to_lowercase();
                !EXCLUDED_INPUT_TYPES.contains(&input_type.as_str())
            }
            _ => false,
        });

        for field in fields {
            if ["aria-label", "aria-labelledby", "title"]
                .iter()
                .any(|a| field.attr(a).is_some_and(|v| !v.is_empty()))
            {
                continue;
            }

            // <label for="..."> association.
            if let Some(id) = field.attr("id").filter(|v| !v.is_empty()) {
                if doc
                    .elements()
                    .any(|el| el.tag() == "label" && el.attr("for") == Some(id))
                {
                    continue;
                }
            }

            // Wrapped in a <label>.
            if field.ancestors().any(|el| el.tag() == "label") {
                continue;
            }

            issues.push(
                Issue::new(self, "Form input is missing an associated label").for_element(&field),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_check(html: &str) -> Vec<Issue> {
        let doc = Document::parse(html);
        let mut issues = Vec::new();
        FormLabels.run(&doc, &mut issues);
        issues
    }

    #[test]
    fn test_pass_with_label_for() {
        let html = r#"<html><body><label for="name">Name</label><input type="text" id="name"></body></html>"#;
        assert!(run_check(html).is_empty());
    }

    #[test]
    fn test_pass_with_wrapping_label() {
        let html = r#"<html><body><label>Name <input type="text"></label></body></html>"#;
        assert!(run_check(html).is_empty());
    }

    #[test]
    fn test_pass_with_aria_label() {
        let html = r#"<html><body><input type="text" aria-label="Search"></body></html>"#;
        assert!(run_check(html).is_empty());
    }

    #[test]
    fn test_pass_with_aria_labelledby() {
        let html = r#"<html><body><span id="lbl">Name</span><input type="text" aria-labelledby="lbl"></body></html>"#;
        assert!(run_check(html).is_empty());
    }

    #[test]
    fn test_pass_with_title() {
        let html = r#"<html><body><input type="text" title="Enter name"></body></html>"#;
        assert!(run_check(html).is_empty());
    }

    #[test]
    fn test_skip_hidden_and_button_like_inputs() {
        let html = r#"<html><body>
            <input type="hidden" name="token" value="abc">
            <input type="submit" value="Go">
            <input type="button" value="Click">
            <input type="reset" value="Reset">
            <input type="image" src="go.png">
        </body></html>"#;
        assert!(run_check(html).is_empty());
    }

    #[test]
    fn test_fail_missing_label() {
        let html = r#"<html><body><input type="text"></body></html>"#;
        let issues = run_check(html);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].check_id, "form-labels");
    }

    #[test]
    fn test_fail_typeless_input() {
        let html = r#"<html><body><input name="q"></body></html>"#;
        assert_eq!(run_check(html).len(), 1);
    }

    #[test]
    fn test_fail_select_and_textarea() {
        let html = r#"<html><body><select><option>A</option></select><textarea></textarea></body></html>"#;
        assert_eq!(run_check(html).len(), 2);
    }

    #[test]
    fn test_fail_label_for_mismatch() {
        let html = r#"<html><body><label for="other">Name</label><input type="text" id="name"></body></html>"#;
        assert_eq!(run_check(html).len(), 1);
    }

    #[test]
    fn test_fail_multiple_unlabeled() {
        let html = r#"<html><body><input type="text"><input type="email"><select><option>X</option></select></body></html>"#;
        assert_eq!(run_check(html).len(), 3);
    }
}
