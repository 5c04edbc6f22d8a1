use serde::{Deserialize, Serialize};

/// Role of a message participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction; at most one per transcript, conventionally first
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
}

/// Message in a conversation transcript
///
/// Callers supply the full ordered transcript on every call; no
/// conversation state lives in this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author
    pub role: Role,
    /// Message content
    pub content: Content,
}

impl Message {
    /// Build a plain-text message
    pub fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Content::Text(content.into()),
        }
    }
}

/// Message content, either plain text or structured parts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Plain text content
    Text(String),
    /// Array of content parts (text, images)
    Parts(Vec<ContentPart>),
}

impl Content {
    /// Extract text content, joining parts if necessary
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts
                .iter()
                .filter_map(|p| match p {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::Image { .. } => None,
                })
                .collect::<Vec<_>>()
                .join(""),
        }
    }
}

/// Individual part within a multipart message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content block
    Text {
        /// The text string
        text: String,
    },
    /// Image reference
    Image {
        /// URL or base64 data URI for the image
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_text_is_joined() {
        let content = Content::Parts(vec![
            ContentPart::Text { text: "a".to_owned() },
            ContentPart::Image {
                url: "https://example.com/x.png".to_owned(),
            },
            ContentPart::Text { text: "b".to_owned() },
        ]);
        assert_eq!(content.as_text(), "ab");
    }
}
