// SPDX-License-Identifier: PMPL-1.0-or-later
//! DOM access layer: tolerant HTML parsing and tree traversal.
//!
//! Parses HTML text into an immutable arena tree and exposes the tree-walk
//! query helpers the rule checks are written against. Two guarantees the
//! checks depend on:
//!
//! - Malformed input (unclosed tags, stray `<`, missing quotes) never fails;
//!   the parser always yields a best-effort tree.
//! - Missing structural elements are never synthesized: parsing
//!   `<div>text</div>` yields a tree whose only element is the `div`, so
//!   checks can observe the absence of `<html>`, `<head>`, and `<body>`.

/// Index of a node in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeData {
    Root,
    Element { name: String, attrs: Vec<(String, String)> },
    Text(String),
    Comment(String),
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// A parsed, mutation-free HTML document.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

/// Elements whose start tag never has content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

impl Document {
    /// Parse HTML text into a document tree. Never fails; parse errors are
    /// tolerated and the result is a best-effort tree.
    pub fn parse(html: &str) -> Document {
        Parser::new(html).run()
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        // Nodes are appended in the order the parser encounters them, so the
        // arena index order is document (pre-order) position.
        (0..self.nodes.len()).filter_map(move |i| {
            let id = NodeId(i);
            self.as_element(id)
        })
    }

    /// All elements with the given (lowercase) tag name, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<ElementRef<'_>> {
        self.elements().filter(|el| el.tag() == tag).collect()
    }

    /// All elements matching a predicate, in document order.
    pub fn find_all<P>(&self, pred: P) -> Vec<ElementRef<'_>>
    where
        P: Fn(ElementRef<'_>) -> bool,
    {
        self.elements().filter(|el| pred(*el)).collect()
    }

    /// First element whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|el| el.attr("id") == Some(id))
    }

    fn as_element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        match self.nodes[id.0].data {
            NodeData::Element { .. } => Some(ElementRef { doc: self, id }),
            _ => None,
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        if let NodeData::Text(ref t) = node.data {
            out.push_str(t);
        }
        for &child in &node.children {
            self.collect_text(child, out);
        }
    }

    fn collect_elements(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[id.0].children {
            if matches!(self.nodes[child.0].data, NodeData::Element { .. }) {
                out.push(child);
            }
            self.collect_elements(child, out);
        }
    }

    fn serialize_node(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        match node.data {
            NodeData::Root => {
                for &child in &node.children {
                    self.serialize_node(child, out);
                }
            }
            NodeData::Text(ref t) => out.push_str(&escape_text(t)),
            NodeData::Comment(ref c) => {
                out.push_str("<!--");
                out.push_str(c);
                out.push_str("-->");
            }
            NodeData::Element { ref name, ref attrs } => {
                out.push('<');
                out.push_str(name);
                for (k, v) in attrs {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(v));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&name.as_str()) {
                    return;
                }
                for &child in &node.children {
                    self.serialize_node(child, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

/// A borrowed reference to one element in a [`Document`].
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> ElementRef<'a> {
    /// Lowercase tag name.
    pub fn tag(&self) -> &'a str {
        match self.doc.nodes[self.id.0].data {
            NodeData::Element { ref name, .. } => name,
            _ => unreachable!("ElementRef always points at an element"),
        }
    }

    /// Attribute value by (lowercase) name. Valueless attributes yield
    /// `Some("")`, so presence and value are distinguishable.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match self.doc.nodes[self.id.0].data {
            NodeData::Element { ref attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Whether the attribute is present at all.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Concatenated text content of this element's subtree.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.doc.collect_text(self.id, &mut out);
        out
    }

    /// Parent element, if the parent node is an element.
    pub fn parent_element(&self) -> Option<ElementRef<'a>> {
        let parent = self.doc.nodes[self.id.0].parent?;
        self.doc.as_element(parent)
    }

    /// Ancestor elements, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = ElementRef<'a>> {
        std::iter::successors(self.parent_element(), |el| el.parent_element())
    }

    /// Child elements in order.
    pub fn child_elements(&self) -> Vec<ElementRef<'a>> {
        self.doc.nodes[self.id.0]
            .children
            .iter()
            .filter_map(|&c| self.doc.as_element(c))
            .collect()
    }

    /// Descendant elements in document order.
    pub fn descendants(&self) -> Vec<ElementRef<'a>> {
        let mut ids = Vec::new();
        self.doc.collect_elements(self.id, &mut ids);
        ids.iter()
            .filter_map(|&id| self.doc.as_element(id))
            .collect()
    }

    /// Descendant elements with the given tag name, in document order.
    pub fn descendants_by_tag(&self, tag: &str) -> Vec<ElementRef<'a>> {
        self.descendants()
            .into_iter()
            .filter(|el| el.tag() == tag)
            .collect()
    }

    /// Serialized HTML of this element and its subtree.
    pub fn html(&self) -> String {
        let mut out = String::new();
        self.doc.serialize_node(self.id, &mut out);
        out
    }

    /// Best-effort CSS-like path from the root to this element: `tag#id`
    /// where an id exists (and the walk stops there), else the tag plus up
    /// to two classes, segments joined with `" > "`.
    pub fn selector(&self) -> String {
        let mut parts = Vec::new();
        let mut current = Some(*self);

        while let Some(el) = current {
            let tag = el.tag();
            if let Some(id) = el.attr("id").filter(|v| !v.is_empty()) {
                parts.push(format!("{tag}#{id}"));
                break;
            }

            let mut part = tag.to_string();
            if let Some(class) = el.attr("class") {
                let classes: Vec<&str> = class.split_whitespace().take(2).collect();
                if !classes.is_empty() {
                    part = format!("{}.{}", tag, classes.join("."));
                }
            }
            parts.push(part);
            current = el.parent_element();
        }

        parts.reverse();
        parts.join(" > ")
    }
}

impl std::fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ElementRef(<{}>)", self.tag())
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    nodes: Vec<Node>,
    stack: Vec<NodeId>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Root,
        };
        Parser {
            src,
            pos: 0,
            nodes: vec![root],
            stack: vec![NodeId(0)],
        }
    }

    fn run(mut self) -> Document {
        let len = self.src.len();
        while self.pos < len {
            match self.src[self.pos..].find('<') {
                Some(rel) => {
                    let lt = self.pos + rel;
                    if lt > self.pos {
                        self.append_text(self.pos, lt);
                    }
                    self.pos = lt;
                    self.consume_markup();
                }
                None => {
                    self.append_text(self.pos, len);
                    self.pos = len;
                }
            }
        }
        Document { nodes: self.nodes }
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn current_parent(&self) -> NodeId {
        *self.stack.last().unwrap_or(&NodeId(0))
    }

    fn append_node(&mut self, data: NodeData) -> NodeId {
        let parent = self.current_parent();
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn append_text(&mut self, start: usize, end: usize) {
        let decoded = decode_entities(&self.src[start..end]);
        if !decoded.is_empty() {
            self.append_node(NodeData::Text(decoded));
        }
    }

    fn consume_markup(&mut self) {
        let rest = &self.bytes()[self.pos..];
        if rest.starts_with(b"<!--") {
            self.consume_comment();
        } else if rest.starts_with(b"<!") || rest.starts_with(b"<?") {
            // Doctype and processing instructions carry no tree content.
            match self.src[self.pos..].find('>') {
                Some(rel) => self.pos += rel + 1,
                None => self.pos = self.src.len(),
            }
        } else if rest.starts_with(b"</") {
            self.consume_end_tag();
        } else if rest.len() > 1 && rest[1].is_ascii_alphabetic() {
            self.consume_start_tag();
        } else {
            // A stray '<' is literal text.
            self.append_node(NodeData::Text("<".to_string()));
            self.pos += 1;
        }
    }

    fn consume_comment(&mut self) {
        let body_start = self.pos + 4;
        match self.src.get(body_start..).and_then(|s| s.find("-->")) {
            Some(rel) => {
                let body = self.src[body_start..body_start + rel].to_string();
                self.append_node(NodeData::Comment(body));
                self.pos = body_start + rel + 3;
            }
            None => {
                // Unterminated comment swallows the rest of the input.
                let body = self.src.get(body_start..).unwrap_or("").to_string();
                self.append_node(NodeData::Comment(body));
                self.pos = self.src.len();
            }
        }
    }

    fn consume_end_tag(&mut self) {
        let bytes = self.bytes();
        let mut i = self.pos + 2;
        let name_start = i;
        while i < bytes.len() && is_name_byte(bytes[i]) {
            i += 1;
        }
        let name = self.src[name_start..i].to_ascii_lowercase();

        match self.src[i..].find('>') {
            Some(rel) => self.pos = i + rel + 1,
            None => self.pos = self.src.len(),
        }

        if name.is_empty() {
            return;
        }

        // Close the nearest matching open element; unmatched end tags are
        // ignored.
        let matching = self.stack.iter().rposition(|&id| {
            matches!(self.nodes[id.0].data, NodeData::Element { name: ref n, .. } if n == &name)
        });
        if let Some(idx) = matching {
            self.stack.truncate(idx);
        }
    }

    fn consume_start_tag(&mut self) {
        let bytes = self.bytes();
        let len = bytes.len();
        let mut i = self.pos + 1;
        let name_start = i;
        while i < len && is_name_byte(bytes[i]) {
            i += 1;
        }
        let name = self.src[name_start..i].to_ascii_lowercase();

        let mut attrs: Vec<(String, String)> = Vec::new();
        let mut self_closing = false;

        loop {
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= len {
                break;
            }
            match bytes[i] {
                b'>' => {
                    i += 1;
                    break;
                }
                b'/' => {
                    if i + 1 < len && bytes[i + 1] == b'>' {
                        self_closing = true;
                        i += 2;
                        break;
                    }
                    i += 1;
                }
                _ => {
                    let attr_start = i;
                    while i < len && !bytes[i].is_ascii_whitespace()
                        && bytes[i] != b'=' && bytes[i] != b'>' && bytes[i] != b'/'
                    {
                        i += 1;
                    }
                    if i == attr_start {
                        i += 1;
                        continue;
                    }
                    let attr_name = self.src[attr_start..i].to_ascii_lowercase();

                    while i < len && bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    let mut value = String::new();
                    if i < len && bytes[i] == b'=' {
                        i += 1;
                        while i < len && bytes[i].is_ascii_whitespace() {
                            i += 1;
                        }
                        if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
                            let quote = bytes[i];
                            let value_start = i + 1;
                            match bytes[value_start..].iter().position(|&b| b == quote) {
                                Some(rel) => {
                                    value = decode_entities(
                                        &self.src[value_start..value_start + rel],
                                    );
                                    i = value_start + rel + 1;
                                }
                                None => {
                                    // Unterminated quote: take the rest.
                                    value = decode_entities(&self.src[value_start..]);
                                    i = len;
                                }
                            }
                        } else {
                            let value_start = i;
                            while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                                i += 1;
                            }
                            value = decode_entities(&self.src[value_start..i]);
                        }
                    }
                    // First occurrence of a duplicated attribute wins.
                    if !attrs.iter().any(|(k, _)| k == &attr_name) {
                        attrs.push((attr_name, value));
                    }
                }
            }
        }
        self.pos = i;

        // Implied end tags: <li><li>, <p> closed by block content, table
        // cell/row sequences, <dt>/<dd>, <option>.
        while let Some(&top) = self.stack.last() {
            let closes = match self.nodes[top.0].data {
                NodeData::Element { name: ref open, .. } => closes_implied(open, &name),
                _ => false,
            };
            if !closes || self.stack.len() <= 1 {
                break;
            }
            self.stack.pop();
        }

        let id = self.append_node(NodeData::Element {
            name: name.clone(),
            attrs,
        });

        if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            return;
        }

        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            self.consume_raw_text(id, &name);
            return;
        }

        self.stack.push(id);
    }

    /// Capture everything up to the matching end tag as a single text child;
    /// `<` inside script/style content is not markup.
    fn consume_raw_text(&mut self, element: NodeId, name: &str) {
        let close = format!("</{name}");
        let lower = self.src[self.pos..].to_ascii_lowercase();
        match lower.find(&close) {
            Some(rel) => {
                let raw = &self.src[self.pos..self.pos + rel];
                if !raw.is_empty() {
                    let id = NodeId(self.nodes.len());
                    self.nodes.push(Node {
                        parent: Some(element),
                        children: Vec::new(),
                        data: NodeData::Text(raw.to_string()),
                    });
                    self.nodes[element.0].children.push(id);
                }
                let after = self.pos + rel;
                match self.src[after..].find('>') {
                    Some(gt) => self.pos = after + gt + 1,
                    None => self.pos = self.src.len(),
                }
            }
            None => {
                let raw = &self.src[self.pos..];
                if !raw.is_empty() {
                    let id = NodeId(self.nodes.len());
                    self.nodes.push(Node {
                        parent: Some(element),
                        children: Vec::new(),
                        data: NodeData::Text(raw.to_string()),
                    });
                    self.nodes[element.0].children.push(id);
                }
                self.pos = self.src.len();
            }
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b':'
}

fn closes_implied(open: &str, incoming: &str) -> bool {
    match open {
        "li" => incoming == "li",
        "p" => matches!(
            incoming,
            "p" | "div" | "ul" | "ol" | "li" | "dl" | "table" | "section" | "article"
                | "aside" | "header" | "footer" | "nav" | "main" | "form" | "h1" | "h2"
                | "h3" | "h4" | "h5" | "h6" | "blockquote" | "pre" | "figure" | "hr"
                | "fieldset" | "address"
        ),
        "td" | "th" => matches!(incoming, "td" | "th" | "tr"),
        "tr" => incoming == "tr",
        "dt" | "dd" => matches!(incoming, "dt" | "dd"),
        "option" => matches!(incoming, "option" | "optgroup"),
        _ => false,
    }
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let semi = tail[1..].find(';').map(|i| i + 1).filter(|&i| i <= 10);
        match semi {
            Some(semi) => {
                let entity = &tail[1..semi];
                let decoded = match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                        u32::from_str_radix(&entity[2..], 16)
                            .ok()
                            .and_then(char::from_u32)
                    }
                    _ if entity.starts_with('#') => {
                        entity[1..].parse::<u32>().ok().and_then(char::from_u32)
                    }
                    _ => None,
                };
                match decoded {
                    Some(c) => {
                        out.push(c);
                        rest = &tail[semi + 1..];
                    }
                    None => {
                        out.push('&');
                        rest = &tail[1..];
                    }
                }
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
