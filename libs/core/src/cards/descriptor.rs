use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::clause::CardClause;

pub const BUTTON_ACTION_TYPE: &str = "imBack";

/// `{ "url": ... }` object used for images and media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEntry {
    pub title: String,
    #[serde(rename = "type")]
    pub action_type: String,
    pub value: String,
}

impl ButtonEntry {
    /// Button whose title and value are both the trimmed token.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        Self {
            title: token.to_string(),
            action_type: BUTTON_ACTION_TYPE.to_string(),
            value: token.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardField {
    Text(String),
    Flag(bool),
    Url(UrlRef),
    Urls(Vec<UrlRef>),
    Buttons(Vec<ButtonEntry>),
}

/// How a recognized property folds into the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyRule {
    Scalar,
    Url,
    UrlList,
    Buttons,
    Flag,
}

/// Maps a lower-cased property to the field name it is stored under and its rule.
fn property_rule(property: &str) -> Option<(&'static str, PropertyRule)> {
    let rule = match property {
        "title" => ("title", PropertyRule::Scalar),
        "subtitle" => ("subtitle", PropertyRule::Scalar),
        "text" => ("text", PropertyRule::Scalar),
        "aspect" => ("aspect", PropertyRule::Scalar),
        "value" => ("value", PropertyRule::Scalar),
        "connectionname" => ("connectionName", PropertyRule::Scalar),
        "image" => ("image", PropertyRule::Url),
        "images" => ("images", PropertyRule::UrlList),
        "media" => ("media", PropertyRule::UrlList),
        "buttons" => ("buttons", PropertyRule::Buttons),
        "autostart" => ("autostart", PropertyRule::Flag),
        "sharable" => ("sharable", PropertyRule::Flag),
        "autoloop" => ("autoloop", PropertyRule::Flag),
        _ => return None,
    };
    Some(rule)
}

/// Typed card produced from a parsed card body. Field order follows first appearance in the body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardDescriptor {
    pub card_type: String,
    pub fields: IndexMap<String, CardField>,
    /// Properties dropped because they are not part of the card vocabulary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl CardDescriptor {
    pub fn get(&self, name: &str) -> Option<&CardField> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(CardField::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.fields.get(name) {
            Some(CardField::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn buttons(&self) -> &[ButtonEntry] {
        match self.fields.get("buttons") {
            Some(CardField::Buttons(buttons)) => buttons,
            _ => &[],
        }
    }

    /// JSON object used as attachment content.
    pub fn content(&self) -> Value {
        let map = self
            .fields
            .iter()
            .map(|(name, field)| (name.clone(), field_value(field)))
            .collect();
        Value::Object(map)
    }

    fn apply(&mut self, clause: &CardClause) {
        let Some((name, rule)) = property_rule(&clause.property) else {
            tracing::warn!(
                card_type = %self.card_type,
                property = %clause.property,
                "skipping unknown card property"
            );
            lg_telemetry::record_counter(
                "card_properties_skipped",
                1,
                &lg_telemetry::GenerationLabels::new(&self.card_type)
                    .with_extra("property", clause.property.clone()),
            );
            self.skipped.push(clause.property.clone());
            return;
        };
        let value = clause.raw_value.as_str();
        match rule {
            PropertyRule::Scalar => {
                self.fields
                    .insert(name.to_string(), CardField::Text(value.to_string()));
            }
            PropertyRule::Flag => {
                self.fields.insert(
                    name.to_string(),
                    CardField::Flag(value.eq_ignore_ascii_case("true")),
                );
            }
            PropertyRule::Url => {
                self.fields.insert(
                    name.to_string(),
                    CardField::Url(UrlRef {
                        url: value.to_string(),
                    }),
                );
            }
            PropertyRule::UrlList => {
                let url = UrlRef {
                    url: value.to_string(),
                };
                match self.fields.get_mut(name) {
                    Some(CardField::Urls(urls)) => urls.push(url),
                    _ => {
                        self.fields
                            .insert(name.to_string(), CardField::Urls(vec![url]));
                    }
                }
            }
            PropertyRule::Buttons => {
                let entries = value.split('|').map(ButtonEntry::from_token);
                match self.fields.get_mut(name) {
                    Some(CardField::Buttons(buttons)) => buttons.extend(entries),
                    _ => {
                        self.fields
                            .insert(name.to_string(), CardField::Buttons(entries.collect()));
                    }
                }
            }
        }
    }
}

fn field_value(field: &CardField) -> Value {
    serde_json::to_value(field).unwrap_or(Value::Null)
}

/// Folds clauses, in order, into a [`CardDescriptor`].
pub fn build_descriptor(card_type: &str, clauses: &[CardClause]) -> CardDescriptor {
    let mut descriptor = CardDescriptor {
        card_type: card_type.to_string(),
        ..Default::default()
    };
    for clause in clauses {
        descriptor.apply(clause);
    }
    descriptor
}
