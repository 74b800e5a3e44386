//! Exported conversation document and the export response shape

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Titled, ordered sequence of converted turns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub title: String,
    pub turns: Vec<ConversationTurn>,
}

impl ExportDocument {
    /// Serialize to the flat Markdown layout the exporter saves
    pub fn to_markdown(&self) -> String {
        let mut md = format!("# {}\n\n", self.title);
        for turn in &self.turns {
            md.push_str("---\n\n");
            md.push_str(&format!("## {}\n\n", turn.role));
            md.push_str(&turn.content);
            md.push_str("\n\n");
        }
        md
    }

    pub fn into_exported(self) -> ExportedChat {
        let markdown = self.to_markdown();
        ExportedChat {
            title: self.title,
            markdown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedChat {
    pub title: String,
    pub markdown: String,
}

/// What the page hands back to whoever requested an export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportResponse {
    Chat(ExportedChat),
    Error { error: String },
}

impl From<Result<ExportedChat, ExportError>> for ExportResponse {
    fn from(result: Result<ExportedChat, ExportError>) -> Self {
        match result {
            Ok(chat) => ExportResponse::Chat(chat),
            Err(e) => ExportResponse::Error {
                error: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_markdown_layout() {
        let doc = ExportDocument {
            title: "Greeting".to_string(),
            turns: vec![
                ConversationTurn { role: Role::User, content: "Hi".to_string() },
                ConversationTurn { role: Role::Assistant, content: "Hello!".to_string() },
            ],
        };

        assert_eq!(
            doc.to_markdown(),
            "# Greeting\n\n---\n\n## User\n\nHi\n\n---\n\n## Assistant\n\nHello!\n\n"
        );
    }

    #[test]
    fn test_response_shapes() {
        let ok = ExportResponse::from(Ok(ExportedChat {
            title: "t".into(),
            markdown: "# t\n\n".into(),
        }));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "title": "t", "markdown": "# t\n\n" })
        );

        let err = ExportResponse::from(Err(ExportError::NoConversation));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "error": "No conversation found on this page." })
        );
    }
}
