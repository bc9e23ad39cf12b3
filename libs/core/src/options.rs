//! Declarative generation options: one text template plus an ordered list of attachment
//! templates and a layout token.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::activity::AttachmentLayout;
use crate::error::ActivityError;

/// Which pipeline an attachment template goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Template output is adaptive card JSON.
    AdaptiveCard,
    /// Template output is a card body in the clause syntax.
    Card,
}

impl AttachmentKind {
    /// Parses an options key (case-insensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "adaptivecardtemplateid" => Some(Self::AdaptiveCard),
            "cardtemplateid" => Some(Self::Card),
            _ => None,
        }
    }
}

/// One `{ <kind>: <template id> }` entry of `Attachments`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Option<String>>")]
pub struct AttachmentSpec {
    pub kind: AttachmentKind,
    pub template_id: Option<String>,
}

impl AttachmentSpec {
    pub fn new(kind: AttachmentKind, template_id: impl Into<String>) -> Self {
        Self {
            kind,
            template_id: Some(template_id.into()),
        }
    }

    /// Template id to evaluate, or `None` when the entry should be skipped.
    pub fn active_template(&self) -> Option<&str> {
        self.template_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

impl TryFrom<BTreeMap<String, Option<String>>> for AttachmentSpec {
    type Error = String;

    fn try_from(entry: BTreeMap<String, Option<String>>) -> Result<Self, Self::Error> {
        if entry.len() != 1 {
            return Err(format!(
                "attachment entry must have exactly one key, found {}",
                entry.len()
            ));
        }
        let Some((key, template_id)) = entry.into_iter().next() else {
            return Err("attachment entry is empty".into());
        };
        let kind = AttachmentKind::from_key(&key)
            .ok_or_else(|| format!("unknown attachment kind `{key}`"))?;
        Ok(Self { kind, template_id })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActivityOptions {
    #[serde(rename = "TextTemplateId", default)]
    pub text_template_id: Option<String>,
    #[serde(rename = "Separtor", alias = "Separator", default)]
    pub separator: Option<String>,
    #[serde(rename = "Attachments", default, deserialize_with = "null_as_empty")]
    pub attachments: Vec<AttachmentSpec>,
    #[serde(rename = "AttachmentLayoutType", default)]
    pub attachment_layout: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<AttachmentSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<AttachmentSpec>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ActivityOptions {
    pub fn from_value(value: Value) -> Result<Self, ActivityError> {
        serde_json::from_value(value).map_err(|err| ActivityError::InvalidOptions(err.to_string()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ActivityError> {
        serde_yaml_bw::from_str(yaml).map_err(|err| ActivityError::InvalidOptions(err.to_string()))
    }

    pub fn text_template(&self) -> Option<&str> {
        self.text_template_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Layout requested by `AttachmentLayoutType`; unrecognized tokens keep the default.
    pub fn layout(&self) -> AttachmentLayout {
        let Some(token) = self.attachment_layout.as_deref() else {
            return AttachmentLayout::default();
        };
        AttachmentLayout::from_token(token).unwrap_or_else(|| {
            tracing::debug!(token, "ignoring unrecognized attachment layout");
            AttachmentLayout::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_options_map() {
        let options = ActivityOptions::from_value(json!({
            "TextTemplateId": "T",
            "Separtor": "&&",
            "Attachments": [
                {"CardTemplateId": "C1"},
                {"adaptivecardtemplateid": "C2"}
            ],
            "AttachmentLayoutType": "List"
        }))
        .unwrap();
        assert_eq!(options.text_template(), Some("T"));
        assert_eq!(options.separator.as_deref(), Some("&&"));
        assert_eq!(
            options.attachments,
            vec![
                AttachmentSpec::new(AttachmentKind::Card, "C1"),
                AttachmentSpec::new(AttachmentKind::AdaptiveCard, "C2"),
            ]
        );
        assert_eq!(options.layout(), AttachmentLayout::List);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let options = ActivityOptions::from_value(json!({})).unwrap();
        assert_eq!(options, ActivityOptions::default());
        assert_eq!(options.layout(), AttachmentLayout::Carousel);
    }

    #[test]
    fn null_values_count_as_absent() {
        let options = ActivityOptions::from_value(json!({
            "TextTemplateId": "T",
            "Separtor": null,
            "Attachments": null,
            "AttachmentLayoutType": null
        }))
        .unwrap();
        assert_eq!(options.text_template(), Some("T"));
        assert!(options.attachments.is_empty());
        assert_eq!(options.layout(), AttachmentLayout::Carousel);
    }

    #[test]
    fn unknown_layout_keeps_carousel() {
        let options = ActivityOptions {
            attachment_layout: Some("grid".into()),
            ..Default::default()
        };
        assert_eq!(options.layout(), AttachmentLayout::Carousel);
    }

    #[test]
    fn blank_and_null_template_ids_are_inactive() {
        let options = ActivityOptions::from_value(json!({
            "TextTemplateId": "  ",
            "Attachments": [{"CardTemplateId": ""}, {"CardTemplateId": null}]
        }))
        .unwrap();
        assert_eq!(options.text_template(), None);
        assert!(options.attachments.iter().all(|a| a.active_template().is_none()));
    }

    #[test]
    fn rejects_unknown_kind_and_multi_key_entries() {
        let err = ActivityOptions::from_value(json!({
            "Attachments": [{"ImageTemplateId": "x"}]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("unknown attachment kind"));

        let err = ActivityOptions::from_value(json!({
            "Attachments": [{"CardTemplateId": "a", "AdaptiveCardTemplateId": "b"}]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("exactly one key"));
    }

    #[test]
    fn parses_yaml_with_separator_alias() {
        let options = ActivityOptions::from_yaml_str(
            "TextTemplateId: Greeting\nSeparator: '&&'\nAttachments:\n  - CardTemplateId: Hero\n",
        )
        .unwrap();
        assert_eq!(options.separator.as_deref(), Some("&&"));
        assert_eq!(options.attachments.len(), 1);
    }
}
