//! Greentic language-generation core.
//!
//! Turns template output into outbound activities: a text/speak pair split on a separator,
//! cards written in a small `key=value` mini-language, adaptive card JSON, and declarative
//! option maps that combine them into one message. Template evaluation itself is delegated to a
//! [`TemplateEvaluator`]; a Handlebars-backed store ships behind the `handlebars` feature.
pub mod activity;
pub mod cards;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod options;
pub mod settings;
pub mod speech;

pub use activity::{Activity, Attachment, AttachmentLayout, CardKind};
pub use cards::{
    ButtonEntry, CardBody, CardClause, CardDescriptor, CardField, UrlRef, build_descriptor,
    card_attachment, card_kind, dispatch, parse_card_body, parse_descriptor,
};
pub use error::{ActivityError, BoxError, CardSyntaxError, EvaluateError, SplitError};
#[cfg(feature = "handlebars")]
pub use evaluator::HandlebarsEvaluator;
pub use evaluator::TemplateEvaluator;
pub use generator::{
    ActivityGenerator, CardRequest, DirectRequest, GenerationRequest, TextRequest,
};
pub use options::{ActivityOptions, AttachmentKind, AttachmentSpec};
pub use settings::GeneratorSettings;
pub use speech::{DEFAULT_SEPARATOR, TextSpeechPair};
