//! Conversation extraction from a page snapshot
//!
//! Turns are found by independent [`TurnSource`]s, one per role, and merged
//! by document position. Assistant turns are rendered Markdown blocks outside
//! any "thinking" container; user turns are message containers that do not
//! hold such a block.

pub mod markdown;

pub use markdown::{to_markdown, ElementKind};

use crate::dom::{Document, Element};
use crate::error::ExportError;
use crate::models::{ConversationTurn, ExportDocument, ExportedChat, Role};
use crate::utils::{collapse_whitespace, truncate_with_ellipsis};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

pub const RESPONSE_CLASS: &str = "ds-markdown";
pub const THINKING_CLASS_FRAGMENT: &str = "think-content";
pub const MESSAGE_CLASS_FRAGMENT: &str = "ds-message";
pub const TITLE_CLASS_FRAGMENT: &str = "title";
pub const FALLBACK_TITLE: &str = "DeepSeek Chat";
pub const MAX_TITLE_CHARS: usize = 60;

lazy_static! {
    static ref TITLE_SUFFIX: Regex = Regex::new(r"(?i)\s*[-–|]\s*DeepSeek.*$").unwrap();
}

/// A turn container located in the snapshot
#[derive(Debug, Clone, Copy)]
pub struct DiscoveredTurn<'a> {
    pub role: Role,
    pub element: &'a Element,
}

impl DiscoveredTurn<'_> {
    pub fn position(&self) -> usize {
        self.element.position()
    }
}

/// Locates the containers of one role
pub trait TurnSource {
    fn role(&self) -> Role;

    /// Matching containers under `body`, in document order
    fn discover<'a>(&self, body: &'a Element) -> Vec<&'a Element>;
}

/// Visit every descendant with a flag telling whether it or an ancestor
/// (starting from `inside` for `root` itself) is a thinking container
fn walk<'a>(
    root: &'a Element,
    inside: bool,
    thinking_fragment: &str,
    visit: &mut dyn FnMut(&'a Element, bool),
) {
    for child in root.child_elements() {
        let thinking = inside || child.class_contains(thinking_fragment);
        visit(child, thinking);
        walk(child, thinking, thinking_fragment, visit);
    }
}

#[derive(Debug, Clone)]
pub struct AssistantSource {
    pub response_class: String,
    pub thinking_fragment: String,
}

impl Default for AssistantSource {
    fn default() -> Self {
        Self {
            response_class: RESPONSE_CLASS.to_string(),
            thinking_fragment: THINKING_CLASS_FRAGMENT.to_string(),
        }
    }
}

impl AssistantSource {
    fn responses_under<'a>(&self, root: &'a Element, inside: bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        walk(root, inside, &self.thinking_fragment, &mut |el: &'a Element, thinking: bool| {
            if !thinking && el.has_class(&self.response_class) {
                found.push(el);
            }
        });
        found
    }
}

impl TurnSource for AssistantSource {
    fn role(&self) -> Role {
        Role::Assistant
    }

    fn discover<'a>(&self, body: &'a Element) -> Vec<&'a Element> {
        let inside = body.class_contains(&self.thinking_fragment);
        self.responses_under(body, inside)
    }
}

#[derive(Debug, Clone)]
pub struct UserSource {
    pub message_fragment: String,
    pub responses: AssistantSource,
}

impl Default for UserSource {
    fn default() -> Self {
        Self {
            message_fragment: MESSAGE_CLASS_FRAGMENT.to_string(),
            responses: AssistantSource::default(),
        }
    }
}

impl TurnSource for UserSource {
    fn role(&self) -> Role {
        Role::User
    }

    fn discover<'a>(&self, body: &'a Element) -> Vec<&'a Element> {
        let mut candidates = Vec::new();
        let inside = body.class_contains(&self.responses.thinking_fragment);
        walk(body, inside, &self.responses.thinking_fragment, &mut |el: &'a Element, thinking: bool| {
            if el.class_contains(&self.message_fragment) {
                candidates.push((el, thinking));
            }
        });

        candidates
            .into_iter()
            .filter(|(el, thinking)| self.responses.responses_under(el, *thinking).is_empty())
            .map(|(el, _)| el)
            .collect()
    }
}

pub struct ConversationExtractor {
    sources: Vec<Box<dyn TurnSource>>,
}

impl Default for ConversationExtractor {
    fn default() -> Self {
        Self::with_sources(vec![
            Box::new(AssistantSource::default()),
            Box::new(UserSource::default()),
        ])
    }
}

impl ConversationExtractor {
    pub fn with_sources(sources: Vec<Box<dyn TurnSource>>) -> Self {
        Self { sources }
    }

    /// Every container from every source, in document order
    pub fn discover<'a>(&self, document: &'a Document) -> Vec<DiscoveredTurn<'a>> {
        let mut turns: Vec<DiscoveredTurn<'a>> = self
            .sources
            .iter()
            .flat_map(|source| {
                let role = source.role();
                source
                    .discover(document.body())
                    .into_iter()
                    .map(move |element| DiscoveredTurn { role, element })
            })
            .collect();
        turns.sort_by_key(|turn| turn.position());
        turns
    }

    /// Build the export document, or `None` when no turn has content
    pub fn extract(&self, document: &Document) -> Option<ExportDocument> {
        let mut turns = Vec::new();
        let mut first_user: Option<String> = None;

        for found in self.discover(document) {
            let content = match found.role {
                Role::Assistant => to_markdown(found.element).trim().to_string(),
                Role::User => found.element.inner_text().trim().to_string(),
            };
            if content.is_empty() {
                continue;
            }
            if found.role == Role::User && first_user.is_none() {
                first_user = Some(content.clone());
            }
            turns.push(ConversationTurn {
                role: found.role,
                content,
            });
        }

        if turns.is_empty() {
            debug!("no conversation turns found");
            return None;
        }

        debug!(turns = turns.len(), "extracted conversation");
        Some(ExportDocument {
            title: derive_title(document, first_user.as_deref()),
            turns,
        })
    }
}

/// Tab title without the site suffix, else an on-page title element, else
/// the first user message, else a fixed fallback; collapsed to one line and
/// at most 60 chars plus "..."
pub fn derive_title(document: &Document, first_user: Option<&str>) -> String {
    let from_tab = collapse_whitespace(&TITLE_SUFFIX.replace(document.title(), ""));
    let from_page = document
        .body()
        .find_descendant(|e| e.class_contains(TITLE_CLASS_FRAGMENT))
        .map(|e| collapse_whitespace(&e.text_content()))
        .unwrap_or_default();
    let from_message = collapse_whitespace(first_user.unwrap_or(""));

    let title = [from_tab, from_page, from_message]
        .into_iter()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    truncate_with_ellipsis(&title, MAX_TITLE_CHARS)
}

/// Scrape the snapshot into a titled Markdown export
pub fn export_chat(document: &Document) -> Result<ExportedChat, ExportError> {
    ConversationExtractor::default()
        .extract(document)
        .map(ExportDocument::into_exported)
        .ok_or(ExportError::NoConversation)
}
