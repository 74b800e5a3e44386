//! Snapshot construction from saved HTML

use super::{Document, Element, Node};
use scraper::{ElementRef, Html, Node as HtmlNode, Selector};
use tracing::debug;

/// Parse a full page (or a bare fragment, which lands in `<body>`)
pub fn parse_document(source: &str) -> Document {
    let html = Html::parse_document(source);

    let title = Selector::parse("title")
        .ok()
        .and_then(|selector| {
            html.select(&selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
        })
        .unwrap_or_default();

    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| html.select(&selector).next())
        .map(convert_element)
        .unwrap_or_else(|| convert_element(html.root_element()));

    debug!(title = %title, "parsed HTML snapshot");
    Document::new(title, body)
}

fn convert_element(source: ElementRef<'_>) -> Element {
    let mut element = Element::new(source.value().name());
    for (name, value) in source.value().attrs() {
        element.push_attr(name, value);
    }

    for child in source.children() {
        match child.value() {
            HtmlNode::Text(text) => {
                let text: &str = &text.text;
                element.push_child(Node::Text(text.to_string()));
            }
            HtmlNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    element.push_child(Node::Element(convert_element(child_element)));
                }
            }
            _ => {}
        }
    }

    element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_and_body() {
        let doc = parse_document(
            "<html><head><title> My Chat - DeepSeek </title></head>\
             <body><div class=\"a b\" id=\"x\">Hi <b>there</b></div></body></html>",
        );

        assert_eq!(doc.title(), "My Chat - DeepSeek");
        assert_eq!(doc.body().tag(), "body");
        let div = doc.body().child_elements().next().unwrap();
        assert_eq!(div.attr("id"), Some("x"));
        assert!(div.has_class("b"));
        assert_eq!(div.text_content(), "Hi there");
    }

    #[test]
    fn test_fragment_lands_in_body() {
        let doc = parse_document("<p>loose</p><!-- comment -->");
        assert_eq!(doc.title(), "");
        assert_eq!(doc.body().text_content(), "loose");
    }
}
