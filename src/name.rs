// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessible-name computation.
//!
//! Shared predicate for "would a screen reader announce something for this
//! element". Sources, any of which suffices: aria-label, aria-labelledby
//! (attribute presence with content; resolution of the referenced ids is a
//! separate check's concern), title, trimmed text content, a descendant
//! `<img>` with non-empty alt, or a descendant `<svg>` with a `<title>`
//! child.

use crate::dom::ElementRef;

/// Whether the element has a non-empty accessible name.
pub fn has_accessible_name(element: &ElementRef<'_>) -> bool {
    for attr in ["aria-label", "aria-labelledby", "title"] {
        if element
            .attr(attr)
            .is_some_and(|v| !v.trim().is_empty())
        {
            return true;
        }
    }

    if !element.text().trim().is_empty() {
        return true;
    }

    if element.descendants_by_tag("img").iter().any(|img| {
        img.attr("alt").is_some_and(|alt| !alt.trim().is_empty())
    }) {
        return true;
    }

    element
        .descendants_by_tag("svg")
        .iter()
        .any(|svg| svg.child_elements().iter().any(|c| c.tag() == "title"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn first_link(doc: &Document) -> ElementRef<'_> {
        doc.elements_by_tag("a")[0]
    }

    #[test]
    fn test_text_content_names() {
        let doc = Document::parse("<a href=\"/\">Home</a>");
        assert!(has_accessible_name(&first_link(&doc)));
    }

    #[test]
    fn test_aria_label_names() {
        let doc = Document::parse("<a href=\"/\" aria-label=\"Home\"></a>");
        assert!(has_accessible_name(&first_link(&doc)));
    }

    #[test]
    fn test_whitespace_aria_label_does_not_name() {
        let doc = Document::parse("<a href=\"/\" aria-label=\"   \"></a>");
        assert!(!has_accessible_name(&first_link(&doc)));
    }

    #[test]
    fn test_title_names() {
        let doc = Document::parse("<a href=\"/\" title=\"Home\"></a>");
        assert!(has_accessible_name(&first_link(&doc)));
    }

    #[test]
    fn test_descendant_img_alt_names() {
        let doc = Document::parse("<a href=\"/\"><img src=\"logo.png\" alt=\"Home\"></a>");
        assert!(has_accessible_name(&first_link(&doc)));
    }

    #[test]
    fn test_descendant_img_empty_alt_does_not_name() {
        let doc = Document::parse("<a href=\"/\"><img src=\"logo.png\" alt=\"\"></a>");
        assert!(!has_accessible_name(&first_link(&doc)));
    }

    #[test]
    fn test_descendant_svg_title_names() {
        let doc =
            Document::parse("<a href=\"/\"><svg><title>Home</title><path d=\"\"></path></svg></a>");
        assert!(has_accessible_name(&first_link(&doc)));
    }

    #[test]
    fn test_bare_element_has_no_name() {
        let doc = Document::parse("<a href=\"/\"><svg><path d=\"\"></path></svg></a>");
        assert!(!has_accessible_name(&first_link(&doc)));
    }
}
