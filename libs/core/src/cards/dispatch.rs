use serde_json::Value;

use super::descriptor::CardDescriptor;
use crate::activity::{Attachment, CardKind};
use crate::error::ActivityError;

/// Card types accepted in card bodies, keyed by their case-folded token.
const CARD_TYPES: &[(&str, CardKind)] = &[
    ("herocard", CardKind::Hero),
    ("thumbnailcard", CardKind::Thumbnail),
    ("audiocard", CardKind::Audio),
    ("videocard", CardKind::Video),
    ("animationcard", CardKind::Animation),
    ("mediacard", CardKind::Media),
    ("signincard", CardKind::Signin),
    ("oauthcard", CardKind::OAuth),
];

/// Resolves a card-type token regardless of its casing (`HeroCard`, `Herocard`, `herocard`).
pub fn card_kind(token: &str) -> Option<CardKind> {
    let folded = token.trim().to_ascii_lowercase();
    CARD_TYPES
        .iter()
        .find(|(name, _)| *name == folded)
        .map(|(_, kind)| *kind)
}

/// Wraps a descriptor into an attachment. Unsupported card types yield a placeholder
/// attachment without content type or content.
pub fn dispatch(descriptor: &CardDescriptor) -> Attachment {
    match card_kind(&descriptor.card_type) {
        Some(kind) => Attachment::new(kind, descriptor.content()),
        None => {
            tracing::warn!(card_type = %descriptor.card_type, "card type is not supported");
            lg_telemetry::record_counter(
                "card_types_unsupported",
                1,
                &lg_telemetry::GenerationLabels::new(&descriptor.card_type),
            );
            Attachment::placeholder()
        }
    }
}

/// Builds an adaptive card attachment from template output that is itself the card JSON.
/// The payload is kept as authored.
pub fn adaptive_attachment(template_id: &str, rendered: &str) -> Result<Attachment, ActivityError> {
    let content: Value =
        serde_json::from_str(rendered.trim()).map_err(|err| ActivityError::AdaptiveCard {
            template_id: template_id.to_string(),
            reason: err.to_string(),
        })?;
    if !content.is_object() {
        return Err(ActivityError::AdaptiveCard {
            template_id: template_id.to_string(),
            reason: "payload must be a JSON object".into(),
        });
    }
    Ok(Attachment::new(CardKind::Adaptive, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{build_descriptor, parse_card_body};
    use serde_json::json;

    #[test]
    fn resolves_every_casing_revision() {
        assert_eq!(card_kind("HeroCard"), Some(CardKind::Hero));
        assert_eq!(card_kind("Herocard"), Some(CardKind::Hero));
        assert_eq!(card_kind(" OAuthCard "), Some(CardKind::OAuth));
        assert_eq!(card_kind("Oauthcard"), Some(CardKind::OAuth));
        assert_eq!(card_kind("AdaptiveCard"), None);
        assert_eq!(card_kind(""), None);
    }

    #[test]
    fn dispatch_wraps_descriptor_fields() {
        let body = parse_card_body("[Thumbnailcard\ntitle=Hi\nimages=a.png\n]").unwrap();
        let descriptor = build_descriptor(&body.card_type, &body.clauses);
        let attachment = dispatch(&descriptor);
        assert_eq!(attachment.content_type, Some(CardKind::Thumbnail));
        assert_eq!(
            attachment.content,
            Some(json!({"title": "Hi", "images": [{"url": "a.png"}]}))
        );
    }

    #[test]
    fn unsupported_type_yields_placeholder() {
        let descriptor = build_descriptor("ReceiptCard", &[]);
        let attachment = dispatch(&descriptor);
        assert!(attachment.is_placeholder());
    }

    #[test]
    fn adaptive_payload_is_copied_verbatim() {
        let rendered = r#"{"type":"AdaptiveCard","version":"1.6","body":[{"type":"TextBlock","text":"hi"}]}"#;
        let attachment = adaptive_attachment("Card", rendered).unwrap();
        assert_eq!(attachment.content_type, Some(CardKind::Adaptive));
        let content = attachment.content.unwrap();
        assert_eq!(serde_json::to_string(&content).unwrap(), rendered);
    }

    #[test]
    fn adaptive_payload_must_be_an_object() {
        let err = adaptive_attachment("Card", "[1, 2]").unwrap_err();
        assert_eq!(err.template_id(), Some("Card"));
        let err = adaptive_attachment("Card", "not json").unwrap_err();
        assert!(matches!(err, ActivityError::AdaptiveCard { .. }));
    }
}
