//! Snapshot construction from the live page

use crate::dom::{Document, Element, Node};
use crate::extractor::MESSAGE_CLASS_FRAGMENT;
use wasm_bindgen::JsCast;

/// Copy the page title and `<body>` subtree; `None` when there is no body
pub fn snapshot_document(document: &web_sys::Document) -> Option<Document> {
    let body = document.body()?;
    Some(Document::new(document.title(), convert_element(&body)))
}

fn convert_element(source: &web_sys::Element) -> Element {
    let mut element = Element::new(source.tag_name());

    let attributes = source.attributes();
    for i in 0..attributes.length() {
        if let Some(attr) = attributes.item(i) {
            element.push_attr(&attr.name(), &attr.value());
        }
    }

    // User turns are read as rendered text; take it from the browser
    if element.class_contains(MESSAGE_CLASS_FRAGMENT) {
        if let Some(html) = source.dyn_ref::<web_sys::HtmlElement>() {
            element.set_rendered_text(html.inner_text());
        }
    }

    let children = source.child_nodes();
    for i in 0..children.length() {
        let Some(child) = children.item(i) else {
            continue;
        };
        match child.node_type() {
            web_sys::Node::TEXT_NODE => {
                element.push_child(Node::Text(child.text_content().unwrap_or_default()));
            }
            web_sys::Node::ELEMENT_NODE => {
                if let Some(child_element) = child.dyn_ref::<web_sys::Element>() {
                    element.push_child(Node::Element(convert_element(child_element)));
                }
            }
            _ => {}
        }
    }

    element
}
