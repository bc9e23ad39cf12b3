use lg_telemetry::{GenerationLabels, with_generation_span};
use serde_json::Value;

use crate::activity::{Activity, Attachment};
use crate::cards::{adaptive_attachment, card_attachment};
use crate::error::ActivityError;
use crate::evaluator::TemplateEvaluator;
use crate::options::{ActivityOptions, AttachmentKind};
use crate::settings::GeneratorSettings;
use crate::speech::TextSpeechPair;

/// Text/speak template invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub template_id: String,
    pub scope: Value,
    /// Falls back to [`GeneratorSettings::default_separator`].
    pub separator: Option<String>,
}

impl TextRequest {
    pub fn new(template_id: impl Into<String>, scope: Value) -> Self {
        Self {
            template_id: template_id.into(),
            scope,
            separator: None,
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }
}

/// Single card template invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRequest {
    pub kind: AttachmentKind,
    pub template_id: String,
    pub scope: Value,
}

impl CardRequest {
    pub fn new(kind: AttachmentKind, template_id: impl Into<String>, scope: Value) -> Self {
        Self {
            kind,
            template_id: template_id.into(),
            scope,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectRequest {
    pub text: Option<TextRequest>,
    pub card: Option<CardRequest>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Direct(DirectRequest),
    Declarative { options: ActivityOptions, scope: Value },
}

/// Turns template output into activities. Holds no mutable state; share it freely when the
/// evaluator is `Sync`.
#[derive(Debug, Clone)]
pub struct ActivityGenerator<E> {
    evaluator: E,
    settings: GeneratorSettings,
}

impl<E: TemplateEvaluator> ActivityGenerator<E> {
    pub fn new(evaluator: E) -> Self {
        Self::with_settings(evaluator, GeneratorSettings::default())
    }

    pub fn with_settings(evaluator: E, settings: GeneratorSettings) -> Self {
        Self {
            evaluator,
            settings,
        }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn generate(&self, request: &GenerationRequest) -> Result<Activity, ActivityError> {
        match request {
            GenerationRequest::Direct(direct) => self.generate_direct(direct),
            GenerationRequest::Declarative { options, scope } => {
                self.generate_from_options(options, scope)
            }
        }
    }

    /// Text/speak only activity from one template.
    pub fn generate_activity(
        &self,
        template_id: &str,
        scope: &Value,
        separator: Option<&str>,
    ) -> Result<Activity, ActivityError> {
        let labels = GenerationLabels::new(template_id).with_kind("text");
        with_generation_span(&labels, || {
            let pair = self.text_speech(template_id, scope, separator)?;
            Ok(Activity {
                text: Some(pair.text),
                speak: Some(pair.speak),
                ..Default::default()
            })
        })
    }

    pub fn generate_adaptive_card_activity(
        &self,
        card_template_id: &str,
        card_scope: &Value,
        text: Option<&TextRequest>,
    ) -> Result<Activity, ActivityError> {
        self.generate_direct_parts(
            text,
            Some((AttachmentKind::AdaptiveCard, card_template_id, card_scope)),
        )
    }

    pub fn generate_card_activity(
        &self,
        card_template_id: &str,
        card_scope: &Value,
        text: Option<&TextRequest>,
    ) -> Result<Activity, ActivityError> {
        self.generate_direct_parts(text, Some((AttachmentKind::Card, card_template_id, card_scope)))
    }

    pub fn generate_direct(&self, request: &DirectRequest) -> Result<Activity, ActivityError> {
        let card = request
            .card
            .as_ref()
            .map(|card| (card.kind, card.template_id.as_str(), &card.scope));
        self.generate_direct_parts(request.text.as_ref(), card)
    }

    /// Assembles an activity from a declarative options map. Attachments keep the order in
    /// which they are listed; entries without a template id are skipped.
    pub fn generate_from_options(
        &self,
        options: &ActivityOptions,
        scope: &Value,
    ) -> Result<Activity, ActivityError> {
        let labels = GenerationLabels::new(options.text_template().unwrap_or("options"))
            .with_kind("options")
            .with_extra("attachments", options.attachments.len().to_string());
        with_generation_span(&labels, || {
            let mut activity = Activity {
                attachment_layout: options.layout(),
                ..Default::default()
            };
            if let Some(template_id) = options.text_template() {
                let pair = self.text_speech(template_id, scope, options.separator.as_deref())?;
                activity.text = Some(pair.text);
                activity.speak = Some(pair.speak);
            }
            for spec in &options.attachments {
                let Some(template_id) = spec.active_template() else {
                    continue;
                };
                activity
                    .attachments
                    .push(self.attachment(spec.kind, template_id, scope)?);
            }
            Ok(activity)
        })
    }

    /// Evaluates a text template and splits it into text and speak.
    pub fn text_speech(
        &self,
        template_id: &str,
        scope: &Value,
        separator: Option<&str>,
    ) -> Result<TextSpeechPair, ActivityError> {
        let separator = separator.unwrap_or(&self.settings.default_separator);
        let rendered = self.evaluate(template_id, scope)?;
        TextSpeechPair::split(&rendered, separator).map_err(|source| ActivityError::TextSpeech {
            template_id: template_id.to_string(),
            source,
        })
    }

    /// Evaluates a card template and turns it into one attachment.
    pub fn attachment(
        &self,
        kind: AttachmentKind,
        template_id: &str,
        scope: &Value,
    ) -> Result<Attachment, ActivityError> {
        let rendered = self.evaluate(template_id, scope)?;
        match kind {
            AttachmentKind::AdaptiveCard => adaptive_attachment(template_id, &rendered),
            AttachmentKind::Card => card_attachment(template_id, &rendered),
        }
    }

    fn generate_direct_parts(
        &self,
        text: Option<&TextRequest>,
        card: Option<(AttachmentKind, &str, &Value)>,
    ) -> Result<Activity, ActivityError> {
        let template_id = card
            .map(|(_, id, _)| id)
            .or(text.map(|t| t.template_id.as_str()))
            .unwrap_or("direct");
        let labels = GenerationLabels::new(template_id).with_kind("direct");
        with_generation_span(&labels, || {
            let mut activity = Activity::default();
            if let Some(text) = text.filter(|t| !t.template_id.trim().is_empty()) {
                let pair =
                    self.text_speech(&text.template_id, &text.scope, text.separator.as_deref())?;
                activity.text = Some(pair.text);
                activity.speak = Some(pair.speak);
            }
            if let Some((kind, template_id, scope)) = card {
                activity
                    .attachments
                    .push(self.attachment(kind, template_id, scope)?);
            }
            Ok(activity)
        })
    }

    fn evaluate(&self, template_id: &str, scope: &Value) -> Result<String, ActivityError> {
        self.evaluator
            .evaluate(template_id, scope)
            .map_err(|source| ActivityError::Evaluate {
                template_id: template_id.to_string(),
                source,
            })
    }
}
