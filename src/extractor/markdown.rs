//! Rendered-response HTML to Markdown conversion
//!
//! Each element is classified into a closed [`ElementKind`] and converted by
//! the rule for that kind. Unknown elements pass their children through
//! without adding markup, so the conversion is total over any tree.

use crate::dom::{Element, Node};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LANGUAGE_CLASS: Regex = Regex::new(r"language-(\S+)").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Paragraph,
    CodeBlock,
    InlineCode,
    Bold,
    Italic,
    Link,
    LineBreak,
    Rule,
    Heading(u8),
    Blockquote,
    List { ordered: bool },
    ListItem,
    Table,
    /// Never rendered (`script`, `style`, ...)
    Ignored,
    Unknown,
}

impl ElementKind {
    pub fn classify(tag: &str) -> Self {
        match tag {
            "p" => ElementKind::Paragraph,
            "pre" => ElementKind::CodeBlock,
            "code" => ElementKind::InlineCode,
            "strong" | "b" => ElementKind::Bold,
            "em" | "i" => ElementKind::Italic,
            "a" => ElementKind::Link,
            "br" => ElementKind::LineBreak,
            "hr" => ElementKind::Rule,
            "h1" => ElementKind::Heading(1),
            "h2" => ElementKind::Heading(2),
            "h3" => ElementKind::Heading(3),
            "h4" => ElementKind::Heading(4),
            "h5" => ElementKind::Heading(5),
            "h6" => ElementKind::Heading(6),
            "blockquote" => ElementKind::Blockquote,
            "ul" => ElementKind::List { ordered: false },
            "ol" => ElementKind::List { ordered: true },
            "li" => ElementKind::ListItem,
            "table" => ElementKind::Table,
            "script" | "style" | "template" | "noscript" => ElementKind::Ignored,
            _ => ElementKind::Unknown,
        }
    }
}

/// Convert the children of `element` to Markdown, in document order
pub fn to_markdown(element: &Element) -> String {
    let mut md = String::new();
    convert_children(element, &mut md);
    md
}

fn convert_children(element: &Element, md: &mut String) {
    for child in element.children() {
        match child {
            Node::Text(text) => push_text(md, text),
            Node::Element(el) => convert_element(el, md),
        }
    }
}

/// Source-formatting whitespace between tags collapses to at most one space
fn push_text(md: &mut String, text: &str) {
    if text.trim().is_empty() && text.contains('\n') {
        if !md.is_empty() && !md.ends_with(char::is_whitespace) {
            md.push(' ');
        }
        return;
    }
    md.push_str(text);
}

fn convert_element(el: &Element, md: &mut String) {
    match ElementKind::classify(el.tag()) {
        ElementKind::CodeBlock => convert_code_block(el, md),
        ElementKind::InlineCode => {
            let code = el.text_content();
            if !code.is_empty() {
                md.push('`');
                md.push_str(&code);
                md.push('`');
            }
        }
        ElementKind::Bold => wrap(el, "**", md),
        ElementKind::Italic => wrap(el, "*", md),
        ElementKind::Link => {
            let text = to_markdown(el);
            if text.trim().is_empty() {
                return;
            }
            match el.attr("href").filter(|href| !href.is_empty()) {
                Some(href) => md.push_str(&format!("[{}]({})", text, href)),
                None => md.push_str(&text),
            }
        }
        ElementKind::LineBreak => md.push('\n'),
        ElementKind::Rule => md.push_str("\n---\n"),
        ElementKind::Heading(level) => {
            let text = to_markdown(el);
            let text = text.trim();
            if !text.is_empty() {
                md.push_str(&format!("\n{} {}\n", "#".repeat(level as usize), text));
            }
        }
        ElementKind::Paragraph => {
            let text = to_markdown(el);
            let text = text.trim();
            if !text.is_empty() {
                md.push('\n');
                md.push_str(text);
                md.push('\n');
            }
        }
        ElementKind::Blockquote => {
            let inner = to_markdown(el);
            let inner = inner.trim();
            if inner.is_empty() {
                return;
            }
            let quoted: Vec<String> = inner
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        ">".to_string()
                    } else {
                        format!("> {}", line)
                    }
                })
                .collect();
            md.push('\n');
            md.push_str(&quoted.join("\n"));
            md.push('\n');
        }
        ElementKind::List { ordered } => convert_list(el, ordered, md),
        ElementKind::Table => convert_table(el, md),
        ElementKind::Ignored => {}
        ElementKind::ListItem | ElementKind::Unknown => convert_children(el, md),
    }
}

fn wrap(el: &Element, marker: &str, md: &mut String) {
    let inner = to_markdown(el);
    if inner.trim().is_empty() {
        md.push_str(&inner);
        return;
    }
    md.push_str(marker);
    md.push_str(&inner);
    md.push_str(marker);
}

fn code_language(el: &Element) -> Option<String> {
    LANGUAGE_CLASS
        .captures(el.class_attr())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn convert_code_block(pre: &Element, md: &mut String) {
    let code = pre.find_descendant(|e| e.tag() == "code");
    let language = code
        .and_then(code_language)
        .or_else(|| code_language(pre))
        .unwrap_or_default();

    let text = code.unwrap_or(pre).text_content();
    let text = text.strip_suffix('\n').unwrap_or(&text);
    if text.trim().is_empty() {
        return;
    }

    md.push_str(&format!("\n```{}\n{}\n```\n", language, text));
}

fn convert_list(list: &Element, ordered: bool, md: &mut String) {
    let items: Vec<String> = list
        .child_elements()
        .filter(|child| child.tag() == "li")
        .map(|li| to_markdown(li).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        return;
    }

    let start = list
        .attr("start")
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(1);

    md.push('\n');
    for (i, item) in items.iter().enumerate() {
        let bullet = if ordered {
            format!("{}. ", start + i)
        } else {
            "- ".to_string()
        };
        let indent = " ".repeat(bullet.len());

        for (n, line) in item.lines().enumerate() {
            if n == 0 {
                md.push_str(&bullet);
                md.push_str(line);
            } else if !line.is_empty() {
                md.push_str(&indent);
                md.push_str(line);
            }
            md.push('\n');
        }
    }
}

fn convert_table(table: &Element, md: &mut String) {
    let rows: Vec<Vec<String>> = table
        .descendants()
        .into_iter()
        .filter(|e| e.tag() == "tr")
        .map(|row| {
            row.descendants()
                .into_iter()
                .filter(|e| e.tag() == "th" || e.tag() == "td")
                .map(|cell| table_cell(&to_markdown(cell)))
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();

    if rows.is_empty() {
        return;
    }

    md.push('\n');
    for (i, cells) in rows.iter().enumerate() {
        md.push_str(&format!("| {} |\n", cells.join(" | ")));
        if i == 0 {
            let separator = vec!["---"; cells.len()];
            md.push_str(&format!("| {} |\n", separator.join(" | ")));
        }
    }
}

/// Cells must stay on one line and must not open a new column
fn table_cell(content: &str) -> String {
    content
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn convert(html: &str) -> String {
        let doc = parse_document(html);
        to_markdown(doc.body()).trim().to_string()
    }

    #[test_case("p", ElementKind::Paragraph)]
    #[test_case("h3", ElementKind::Heading(3))]
    #[test_case("ol", ElementKind::List { ordered: true })]
    #[test_case("b", ElementKind::Bold)]
    #[test_case("style", ElementKind::Ignored)]
    #[test_case("span", ElementKind::Unknown)]
    fn test_classify(tag: &str, kind: ElementKind) {
        assert_eq!(ElementKind::classify(tag), kind);
    }

    #[test]
    fn test_code_block_with_language() {
        assert_eq!(
            convert(r#"<pre><code class="hljs language-python">print(1)</code></pre>"#),
            "```python\nprint(1)\n```"
        );
    }

    #[test]
    fn test_code_block_without_language_keeps_text() {
        assert_eq!(
            convert("<pre><code>a &lt; b\n  indented\n</code></pre>"),
            "```\na < b\n  indented\n```"
        );
    }

    #[test]
    fn test_inline_formatting() {
        assert_eq!(
            convert(r#"<p>Use <code>cargo</code>, <strong>always</strong> <em>maybe</em> <a href="https://x.io">docs</a></p>"#),
            "Use `cargo`, **always** *maybe* [docs](https://x.io)"
        );
    }

    #[test]
    fn test_empty_elements_emit_no_markup() {
        assert_eq!(convert("<p>a<strong></strong><em> </em>b<code></code><a href=\"/x\"></a></p><p></p>"), "a b");
    }

    #[test]
    fn test_headings_paragraphs_and_rules() {
        assert_eq!(
            convert("<h2>Intro</h2><p>One</p><p>Two<br>lines</p><hr><h6>End</h6>"),
            "## Intro\n\nOne\n\nTwo\nlines\n\n---\n\n###### End"
        );
    }

    #[test]
    fn test_blockquote_prefixes_every_line() {
        assert_eq!(
            convert("<blockquote><p>first</p><p>second</p></blockquote>"),
            "> first\n>\n> second"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            convert("<ul><li>a</li><li><p>b</p></li><li></li></ul><ol start=\"3\"><li>x</li><li>y</li></ol>"),
            "- a\n- b\n\n3. x\n4. y"
        );
    }

    #[test]
    fn test_nested_list_is_indented() {
        assert_eq!(
            convert("<ol><li>outer<ul><li>inner</li></ul></li><li>next</li></ol>"),
            "1. outer\n   - inner\n2. next"
        );
    }

    #[test]
    fn test_table_gets_header_separator() {
        assert_eq!(
            convert(
                "<table><thead><tr><th>Lang</th><th>Year</th></tr></thead>\
                 <tbody><tr><td>Rust</td><td>2015</td></tr><tr><td>a|b</td><td><b>x</b></td></tr></tbody></table>"
            ),
            "| Lang | Year |\n| --- | --- |\n| Rust | 2015 |\n| a\\|b | **x** |"
        );
    }

    #[test]
    fn test_source_indentation_is_not_content() {
        assert_eq!(
            convert("<div>\n  <p>a</p>\n  <p>b <b>c</b>\n  <i>d</i></p>\n</div>"),
            "a\n\nb **c** *d*"
        );
    }

    #[test]
    fn test_unknown_elements_pass_through() {
        assert_eq!(
            convert("<div><span>plain <i>text</i></span><script>alert(1)</script></div>"),
            "plain *text*"
        );
    }
}
