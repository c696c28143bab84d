// SPDX-License-Identifier: PMPL-1.0-or-later
//! Table checks - WCAG 1.3.1 Info and Relationships (Level A)

use crate::checks::{Category, Check, Severity};
use crate::dom::Document;
use crate::issue::Issue;

/// Data tables (at least one `<td>`) without any `<th>` header cells.
pub struct TableHeaders;

impl Check for TableHeaders {
    fn id(&self) -> &'static str {
        "table-headers"
    }

    fn name(&self) -> &'static str {
        "Table Headers"
    }

    fn wcag(&self) -> &'static str {
        "1.3.1"
    }

    fn severity(&self) -> Severity {
        Severity::Serious
    }

    fn category(&self) -> Category {
        Category::Tables
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Add <th> elements to identify row and column headers in the table"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        for table in doc.elements_by_tag("table") {
            // Layout-only tables without data cells are not judged here.
            if table.descendants_by_tag("td").is_empty() {
                continue;
            }
            if !table.descendants_by_tag("th").is_empty() {
                continue;
            }
            issues.push(
                Issue::new(self, "Data table is missing header cells").for_element(&table),
            );
        }
    }
}

/// Header cells with no text content.
pub struct EmptyTh;

impl Check for EmptyTh {
    fn id(&self) -> &'static str {
        "empty-th"
    }

    fn name(&self) -> &'static str {
        "Empty Table Headers"
    }

    fn wcag(&self) -> &'static str {
        "1.3.1"
    }

    fn severity(&self) -> Severity {
        Severity::Moderate
    }

    fn category(&self) -> Category {
        Category::Tables
    }

    fn is_fixable(&self) -> bool {
        false
    }

    fn fix_hint(&self) -> &'static str {
        "Add descriptive text to the table header cell"
    }

    fn run(&self, doc: &Document, issues: &mut Vec<Issue>) {
        for th in doc.elements_by_tag("th") {
            if !th.text().trim().is_empty() {
                continue;
            }
            issues.push(Issue::new(self, "Table header is empty").for_element(&th));
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
    fn test_table_with_headers_passes() {
        let html = r#"<html><body><table>
            <tr><th>Name</th><th>Value</th></tr>
            <tr><td>A</td><td>1</td></tr>
        </table></body></html>"#;
        assert!(run_check(&TableHeaders, html).is_empty());
    }

    #[test]
    fn test_data_table_without_headers_flags() {
        let html = r#"<html><body><table>
            <tr><td>A</td><td>1</td></tr>
        </table></body></html>"#;
        let issues = run_check(&TableHeaders, html);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].check_id, "table-headers");
    }

    #[test]
    fn test_table_without_data_cells_is_ignored() {
        let html = r#"<html><body><table><tr></tr></table></body></html>"#;
        assert!(run_check(&TableHeaders, html).is_empty());
    }

    #[test]
    fn test_one_issue_per_headerless_table() {
        let html = r#"<html><body>
            <table><tr><td>a</td></tr></table>
            <table><tr><td>b</td></tr></table>
        </body></html>"#;
        assert_eq!(run_check(&TableHeaders, html).len(), 2);
    }

    #[test]
    fn test_empty_th_flags() {
        let html = r#"<html><body><table>
            <tr><th></th><th>Value</th></tr>
            <tr><td>A</td><td>1</td></tr>
        </table></body></html>"#;
        let issues = run_check(&EmptyTh, html);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].check_id, "empty-th");
    }

    #[test]
    fn test_whitespace_only_th_flags() {
        let html = r#"<html><body><table><tr><th>   </th></tr></table></body></html>"#;
        assert_eq!(run_check(&EmptyTh, html).len(), 1);
    }

    #[test]
    fn test_th_with_text_passes() {
        let html = r#"<html><body><table><tr><th>Name</th></tr></table></body></html>"#;
        assert!(run_check(&EmptyTh, html).is_empty());
    }
}
