//! The composer field on the live page

use super::active_document;
use crate::field::{FieldKind, TextField};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventInit, EventTarget, HtmlDocument, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement, InputEvent, InputEventInit,
};

/// Candidate selectors for the message field, most specific first
pub const FIELD_SELECTORS: &[&str] = &[
    "textarea[placeholder]",
    "div[contenteditable=\"true\"][role=\"textbox\"]",
    "div[contenteditable=\"true\"]",
    "textarea",
];

/// Targets the shorthand expander reacts to
pub const EDITABLE_SELECTOR: &str = "textarea, [contenteditable=\"true\"]";

pub enum PageField {
    Value(HtmlElement),
    RichText(HtmlElement),
}

impl PageField {
    pub fn from_element(element: HtmlElement) -> Self {
        if element.is_instance_of::<HtmlTextAreaElement>() || element.is_instance_of::<HtmlInputElement>() {
            PageField::Value(element)
        } else {
            PageField::RichText(element)
        }
    }

    /// The event target as a field, when it is an editable surface
    pub fn from_target(target: &EventTarget) -> Option<Self> {
        let element = target.dyn_ref::<HtmlElement>()?;
        if element.matches(EDITABLE_SELECTOR).unwrap_or(false) {
            Some(Self::from_element(element.clone()))
        } else {
            None
        }
    }

    pub fn element(&self) -> &HtmlElement {
        match self {
            PageField::Value(el) | PageField::RichText(el) => el,
        }
    }
}

fn is_visible(element: &Element) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    match window.get_computed_style(element) {
        Ok(Some(style)) => {
            style.get_property_value("display").unwrap_or_default() != "none"
                && style.get_property_value("visibility").unwrap_or_default() != "hidden"
        }
        _ => false,
    }
}

/// First visible element matching the field selectors, in priority order
pub fn find_input_element(document: &Document) -> Option<PageField> {
    for selector in FIELD_SELECTORS {
        let Ok(nodes) = document.query_selector_all(selector) else {
            continue;
        };
        for i in 0..nodes.length() {
            let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
                continue;
            };
            if is_visible(&element) {
                return Some(PageField::from_element(element));
            }
        }
    }
    None
}

fn dispatch(target: &EventTarget, name: &str) {
    let init = EventInit::new();
    init.set_bubbles(true);
    if let Ok(event) = Event::new_with_event_init_dict(name, &init) {
        let _ = target.dispatch_event(&event);
    }
}

/// The prototype's own `value` setter, bypassing instance-level wrappers
fn native_value_setter(element: &HtmlElement) -> Option<Function> {
    let window = web_sys::window()?;
    let constructor = if element.is_instance_of::<HtmlTextAreaElement>() {
        "HTMLTextAreaElement"
    } else {
        "HTMLInputElement"
    };
    let class = Reflect::get(&window, &JsValue::from_str(constructor)).ok()?;
    let prototype = Reflect::get(&class, &JsValue::from_str("prototype")).ok()?;
    let descriptor =
        Object::get_own_property_descriptor(prototype.unchecked_ref::<Object>(), &JsValue::from_str("value"));
    Reflect::get(&descriptor, &JsValue::from_str("set"))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn read_value(element: &HtmlElement) -> String {
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else {
        String::new()
    }
}

fn write_value(element: &HtmlElement, text: &str) {
    let native = native_value_setter(element)
        .map(|setter| setter.call1(element, &JsValue::from_str(text)).is_ok())
        .unwrap_or(false);

    if !native {
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(text);
        } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(text);
        }
    }

    dispatch(element, "input");
    dispatch(element, "change");
}

fn rendered_text(element: &HtmlElement) -> String {
    let text = element.inner_text();
    if text.is_empty() {
        element.text_content().unwrap_or_default()
    } else {
        text
    }
}

/// Select everything inside `element`, or collapse the caret to its end
fn select_contents(document: &Document, element: &HtmlElement, collapse_to_end: bool) {
    let Some(selection) = web_sys::window().and_then(|w| w.get_selection().ok().flatten()) else {
        return;
    };
    let Ok(range) = document.create_range() else {
        return;
    };
    if range.select_node_contents(element).is_err() {
        return;
    }
    if collapse_to_end {
        range.collapse_with_to_start(false);
    }
    let _ = selection.remove_all_ranges();
    let _ = selection.add_range(&range);
}

fn write_rich_text(element: &HtmlElement, text: &str) {
    let Some(document) = active_document() else {
        return;
    };

    let _ = element.focus();
    select_contents(&document, element, false);

    let inserted = document
        .dyn_ref::<HtmlDocument>()
        .and_then(|doc| doc.exec_command_with_show_ui_and_value("insertText", false, text).ok())
        .unwrap_or(false);

    if !inserted || rendered_text(element).trim() != text.trim() {
        element.set_text_content(Some(text));

        let init = InputEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        init.set_input_type("insertText");
        init.set_data(Some(text));
        if let Ok(event) = InputEvent::new_with_event_init_dict("input", &init) {
            let _ = element.dispatch_event(&event);
        }
    }

    if element.last_child().is_some() {
        select_contents(&document, element, true);
    }
}

impl TextField for PageField {
    fn read(&self) -> String {
        match self {
            PageField::Value(el) => read_value(el),
            PageField::RichText(el) => rendered_text(el),
        }
    }

    fn write(&mut self, text: &str) {
        match self {
            PageField::Value(el) => write_value(el, text),
            PageField::RichText(el) => write_rich_text(el, text),
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            PageField::Value(_) => FieldKind::Value,
            PageField::RichText(_) => FieldKind::RichText,
        }
    }
}
