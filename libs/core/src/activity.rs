//! Outbound activity produced by the generator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Card families an attachment can carry, serialized as their content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum CardKind {
    Adaptive,
    Hero,
    Thumbnail,
    Audio,
    Video,
    Animation,
    Media,
    Signin,
    OAuth,
}

impl CardKind {
    pub const ALL: [CardKind; 9] = [
        CardKind::Adaptive,
        CardKind::Hero,
        CardKind::Thumbnail,
        CardKind::Audio,
        CardKind::Video,
        CardKind::Animation,
        CardKind::Media,
        CardKind::Signin,
        CardKind::OAuth,
    ];

    pub fn content_type(self) -> &'static str {
        match self {
            CardKind::Adaptive => "application/vnd.microsoft.card.adaptive",
            CardKind::Hero => "application/vnd.microsoft.card.hero",
            CardKind::Thumbnail => "application/vnd.microsoft.card.thumbnail",
            CardKind::Audio => "application/vnd.microsoft.card.audio",
            CardKind::Video => "application/vnd.microsoft.card.video",
            CardKind::Animation => "application/vnd.microsoft.card.animation",
            CardKind::Media => "application/vnd.microsoft.card.media",
            CardKind::Signin => "application/vnd.microsoft.card.signin",
            CardKind::OAuth => "application/vnd.microsoft.card.oauth",
        }
    }

    pub fn from_content_type(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.content_type() == value)
    }
}

impl From<CardKind> for &'static str {
    fn from(kind: CardKind) -> Self {
        kind.content_type()
    }
}

impl TryFrom<String> for CardKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_content_type(&value).ok_or_else(|| format!("unknown card content type `{value}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<CardKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl Attachment {
    pub fn new(kind: CardKind, content: Value) -> Self {
        Self {
            content_type: Some(kind),
            content: Some(content),
        }
    }

    /// Attachment emitted in place of a card whose type is not supported.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        self.content_type.is_none() && self.content.is_none()
    }
}

/// Rendering hint for messages carrying several attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentLayout {
    #[default]
    Carousel,
    List,
}

impl AttachmentLayout {
    /// Parses a layout token (case-insensitive).
    pub fn from_token(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "list" => Some(Self::List),
            "carousel" => Some(Self::Carousel),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttachmentLayout::Carousel => "carousel",
            AttachmentLayout::List => "list",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speak: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub attachment_layout: AttachmentLayout,
}

impl Activity {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.speak.is_none() && self.attachments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_bot_framework_shape() {
        let activity = Activity {
            text: Some("Hi".into()),
            speak: Some("Hello".into()),
            attachments: vec![
                Attachment::new(CardKind::Hero, json!({"title": "t"})),
                Attachment::placeholder(),
            ],
            attachment_layout: AttachmentLayout::List,
        };
        assert_eq!(
            serde_json::to_value(&activity).unwrap(),
            json!({
                "text": "Hi",
                "speak": "Hello",
                "attachments": [
                    {"contentType": "application/vnd.microsoft.card.hero", "content": {"title": "t"}},
                    {}
                ],
                "attachmentLayout": "list"
            })
        );
    }

    #[test]
    fn content_type_matches_serde_name() {
        for kind in CardKind::ALL {
            let value = serde_json::to_value(kind).unwrap();
            assert_eq!(value, json!(kind.content_type()));
            assert_eq!(serde_json::from_value::<CardKind>(value).unwrap(), kind);
        }
        assert!(serde_json::from_value::<CardKind>(json!("text/plain")).is_err());
    }

    #[test]
    fn layout_tokens() {
        assert_eq!(AttachmentLayout::from_token("LIST"), Some(AttachmentLayout::List));
        assert_eq!(AttachmentLayout::from_token("carousel"), Some(AttachmentLayout::Carousel));
        assert_eq!(AttachmentLayout::from_token("grid"), None);
        assert_eq!(AttachmentLayout::default().as_str(), "carousel");
    }
}
