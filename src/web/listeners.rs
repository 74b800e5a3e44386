//! Capture-phase document listeners feeding the event router

use super::field::{find_input_element, PageField, EDITABLE_SELECTOR};
use super::{active_document, console_log};
use crate::field::TextField;
use crate::router::{ControlInfo, EventRouter, PageEvent, RouterAction};
use crate::settings::SettingsCache;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlButtonElement, HtmlElement, KeyboardEvent};

type Shared = Rc<RefCell<SettingsCache>>;

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn is_editable(element: Option<&Element>) -> bool {
    element
        .map(|el| el.matches(EDITABLE_SELECTOR).unwrap_or(false))
        .unwrap_or(false)
}

fn control_info(element: &Element) -> Option<ControlInfo> {
    let button = element.closest("button").ok().flatten()?;
    let text = match button.dyn_ref::<HtmlElement>() {
        Some(html) => html.inner_text(),
        None => button.text_content().unwrap_or_default(),
    };

    Some(ControlInfo {
        aria_label: button.get_attribute("aria-label"),
        text,
        button_type: button
            .dyn_ref::<HtmlButtonElement>()
            .map(|b| b.type_())
            .unwrap_or_default(),
        in_form: button.closest("form").ok().flatten().is_some(),
    })
}

fn page_event(kind: &str, event: &Event) -> Option<PageEvent> {
    let target = target_element(event);
    match kind {
        "input" => Some(PageEvent::Input {
            editable: is_editable(target.as_ref()),
        }),
        "keydown" => {
            let key = event.dyn_ref::<KeyboardEvent>()?;
            Some(PageEvent::KeyDown {
                key: key.key(),
                shift: key.shift_key(),
                editable: is_editable(target.as_ref()),
            })
        }
        "submit" => Some(PageEvent::Submit),
        "pointerdown" | "click" => Some(PageEvent::Pointer {
            control: target.as_ref().and_then(control_info),
        }),
        _ => None,
    }
}

/// Route one page event and run the resulting action
pub fn handle_event(settings: &Shared, page_event: &PageEvent, event: &Event) -> bool {
    let cache = settings.borrow();
    let router = EventRouter::new(&cache);

    let mut field = match router.route(page_event) {
        Some(RouterAction::ExpandShorthand) => event.target().and_then(|t| PageField::from_target(&t)),
        Some(RouterAction::EnsureDirectives) => active_document().and_then(|d| find_input_element(&d)),
        None => return false,
    };

    router.handle(page_event, field.as_mut().map(|f| f as &mut dyn TextField))
}

/// Register the input, keydown, submit, pointerdown and click listeners on
/// `document` in the capture phase
pub fn attach_listeners(document: &web_sys::Document, settings: Shared) -> Result<(), JsValue> {
    for kind in ["input", "keydown", "submit", "pointerdown", "click"] {
        let settings = Rc::clone(&settings);
        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(page_event) = page_event(kind, &event) {
                handle_event(&settings, &page_event, &event);
            }
        });
        document.add_event_listener_with_callback_and_bool(
            kind,
            listener.as_ref().unchecked_ref(),
            true,
        )?;
        listener.forget();
    }

    console_log!("deepseek-toolkit: listeners attached");
    Ok(())
}
