//! Page event routing
//!
//! The web layer reduces each captured DOM event to a [`PageEvent`]; the
//! router decides whether it should expand shorthand in the event target or
//! rewrite the directive prefix of the message field.

use crate::field::TextField;
use crate::settings::SettingsCache;
use crate::transformer::{ensure_directives, expand_shorthand};
use tracing::debug;

/// The closest `button` around a pointer target, as seen by the router
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlInfo {
    /// `None` when the attribute is absent, `Some("")` when present but empty
    pub aria_label: Option<String>,
    /// Rendered text of the button
    pub text: String,
    /// Effective `type` property (`submit`, `button`, `reset`)
    pub button_type: String,
    /// Whether the button sits inside a `form`
    pub in_form: bool,
}

impl ControlInfo {
    /// Heuristic match for the composer's send button
    pub fn is_send_control(&self) -> bool {
        let label = format!(
            "{} {}",
            self.aria_label.as_deref().unwrap_or(""),
            self.text
        )
        .to_lowercase();

        if label.contains("send") || label.contains("arrow") {
            return true;
        }

        self.in_form
            && (self.button_type.eq_ignore_ascii_case("submit")
                || self.aria_label.as_deref() == Some(""))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// `input`; `editable` when the target is a textarea or contenteditable
    Input { editable: bool },
    KeyDown { key: String, shift: bool, editable: bool },
    Submit,
    /// `pointerdown` or `click`, with the enclosing button if any
    Pointer { control: Option<ControlInfo> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterAction {
    /// Expand shorthand in the event's own target
    ExpandShorthand,
    /// Rewrite the directive prefix of the message field
    EnsureDirectives,
}

pub struct EventRouter<'a> {
    settings: &'a SettingsCache,
}

impl<'a> EventRouter<'a> {
    pub fn new(settings: &'a SettingsCache) -> Self {
        Self { settings }
    }

    pub fn route(&self, event: &PageEvent) -> Option<RouterAction> {
        match event {
            PageEvent::Input { editable: true } => Some(RouterAction::ExpandShorthand),
            PageEvent::KeyDown {
                key,
                shift: false,
                editable: true,
            } if key == "Enter" => Some(RouterAction::EnsureDirectives),
            PageEvent::Submit => Some(RouterAction::EnsureDirectives),
            PageEvent::Pointer {
                control: Some(control),
            } if control.is_send_control() => Some(RouterAction::EnsureDirectives),
            _ => None,
        }
    }

    /// Route `event` and run the action against `field`.
    ///
    /// Returns `true` when the field was rewritten. A missing field makes
    /// every action a no-op.
    pub fn handle(&self, event: &PageEvent, field: Option<&mut dyn TextField>) -> bool {
        let Some(action) = self.route(event) else {
            return false;
        };
        let Some(field) = field else {
            debug!(?action, "no message field to act on");
            return false;
        };

        match action {
            RouterAction::ExpandShorthand => expand_shorthand(field, self.settings),
            RouterAction::EnsureDirectives => ensure_directives(field, self.settings),
        }
    }
}
