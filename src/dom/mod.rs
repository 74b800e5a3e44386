//! Owned snapshot of a rendered page
//!
//! Extraction never walks a live DOM directly. A snapshot is taken first,
//! either from saved HTML ([`html::parse_document`]) or from the browser
//! (`crate::web::snapshot`), and the extractor only sees these types. Every
//! element carries its preorder position, which is the document-order key
//! used to merge turns.

pub mod html;

pub use html::parse_document;

/// Tags whose content never renders as text
const HIDDEN_TAGS: &[&str] = &["script", "style", "template", "noscript", "head"];

/// Tags rendered on their own line
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary",
    "table", "tr", "ul",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
    position: usize,
    rendered_text: Option<String>,
}

impl Element {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self {
            tag: tag.as_ref().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
            position: 0,
            rendered_text: None,
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.push_attr(name, value);
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    pub fn push_attr(&mut self, name: &str, value: &str) {
        self.attrs.push((name.to_ascii_lowercase(), value.to_string()));
    }

    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Text the browser reported for this element; used by [`Element::inner_text`]
    pub fn set_rendered_text(&mut self, text: String) {
        self.rendered_text = Some(text);
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn class_attr(&self) -> &str {
        self.attr("class").unwrap_or("")
    }

    /// Exact class token match, as in `.name`
    pub fn has_class(&self, class: &str) -> bool {
        self.class_attr().split_whitespace().any(|c| c == class)
    }

    /// Substring match on the class attribute, as in `[class*="fragment"]`
    pub fn class_contains(&self, fragment: &str) -> bool {
        self.class_attr().contains(fragment)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Preorder position inside its document
    pub fn position(&self) -> usize {
        self.position
    }

    /// All descendant elements in document order, excluding `self`
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(&mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            found.push(child);
            child.collect_descendants(found);
        }
    }

    /// First descendant element (document order) matching `predicate`
    pub fn find_descendant(&self, predicate: impl Fn(&Element) -> bool + Copy) -> Option<&Element> {
        for child in self.child_elements() {
            if predicate(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(predicate) {
                return Some(found);
            }
        }
        None
    }

    /// Concatenated raw text of every descendant text node
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, text: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => text.push_str(t),
                Node::Element(el) => el.collect_text(text),
            }
        }
    }

    /// The browser's rendered text when the snapshot recorded it, else an
    /// approximation: block elements and `<br>` break lines, whitespace runs
    /// collapse, hidden elements vanish. Preformatted text is kept verbatim.
    pub fn inner_text(&self) -> String {
        if let Some(text) = &self.rendered_text {
            return text.clone();
        }
        let mut lines = TextLines::new();
        self.collect_inner_text(&mut lines, self.tag == "pre");
        lines.finish()
    }

    fn collect_inner_text(&self, lines: &mut TextLines, preformatted: bool) {
        for child in &self.children {
            match child {
                Node::Text(t) if preformatted => lines.push_preformatted(t),
                Node::Text(t) => lines.push_collapsed(t),
                Node::Element(el) => {
                    let tag = el.tag();
                    if HIDDEN_TAGS.contains(&tag) {
                        continue;
                    }
                    if tag == "br" {
                        lines.break_line();
                        continue;
                    }
                    let block = BLOCK_TAGS.contains(&tag);
                    if block {
                        lines.break_line();
                    }
                    el.collect_inner_text(lines, preformatted || tag == "pre");
                    if block {
                        lines.break_line();
                    } else if tag == "td" || tag == "th" {
                        lines.current().text.push('\t');
                    }
                }
            }
        }
    }
}

#[derive(Default)]
struct Line {
    text: String,
    preformatted: bool,
}

/// Line buffer for [`Element::inner_text`]; never empty
struct TextLines {
    lines: Vec<Line>,
}

impl TextLines {
    fn new() -> Self {
        Self {
            lines: vec![Line::default()],
        }
    }

    fn current(&mut self) -> &mut Line {
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    fn break_line(&mut self) {
        self.lines.push(Line::default());
    }

    fn push_preformatted(&mut self, text: &str) {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            let line = self.current();
            line.text.push_str(part);
            line.preformatted = true;
        }
    }

    /// Collapse runs of spaces and tabs; newlines inside text survive
    fn push_collapsed(&mut self, text: &str) {
        let mut pending_space = false;
        for c in text.chars() {
            if c == '\n' {
                pending_space = false;
                self.break_line();
            } else if c.is_whitespace() {
                pending_space = true;
            } else {
                let line = self.current();
                if pending_space && !line.text.is_empty() && !line.text.ends_with(' ') {
                    line.text.push(' ');
                }
                pending_space = false;
                line.text.push(c);
            }
        }
        let line = self.current();
        if pending_space && !line.text.is_empty() && !line.text.ends_with(' ') {
            line.text.push(' ');
        }
    }

    /// Trim flowed lines, keep preformatted ones, and keep at most one blank
    /// line between paragraphs
    fn finish(self) -> String {
        let mut out: Vec<String> = Vec::new();
        for line in self.lines {
            let text = if line.preformatted {
                line.text.trim_end_matches('\r').to_string()
            } else {
                line.text.trim().to_string()
            };
            let collapsible = !line.preformatted && text.is_empty();
            if collapsible && out.last().map_or(true, |prev| prev.is_empty()) {
                continue;
            }
            out.push(text);
        }
        while out.last().map_or(false, |l| l.trim().is_empty()) {
            out.pop();
        }
        out.join("\n")
    }
}

/// A snapshot: the page title and the `<body>` subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    body: Element,
}

impl Document {
    /// Wrap a body tree, numbering its elements in preorder
    pub fn new(title: impl Into<String>, mut body: Element) -> Self {
        let mut next = 0;
        assign_positions(&mut body, &mut next);
        Self {
            title: title.into(),
            body,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &Element {
        &self.body
    }
}

fn assign_positions(element: &mut Element, next: &mut usize) {
    element.position = *next;
    *next += 1;
    for child in &mut element.children {
        if let Node::Element(el) = child {
            assign_positions(el, next);
        }
    }
}
