use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error produced by a template engine backend.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure reported by a [`TemplateEvaluator`](crate::evaluator::TemplateEvaluator).
#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error("template `{0}` is not registered")]
    NotFound(String),
    #[error("template store is invalid: {0}")]
    Store(String),
    #[error(transparent)]
    Engine(BoxError),
}

impl EvaluateError {
    pub fn engine<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        EvaluateError::Engine(Box::new(err))
    }
}

/// Rendered text could not be split into a text/speak pair.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("separator `{separator}` splits the output into {segments} segments, expected 1 or 2")]
    TooManySegments { separator: String, segments: usize },
}

/// Rendered card body does not follow the `[Type\nkey=value...]` syntax.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardSyntaxError {
    #[error("card body must be wrapped in a pair of delimiters")]
    NotDelimited,
    #[error("line {line} has no `=`: {text:?}")]
    MissingEquals { line: usize, text: String },
}

/// Errors surfaced by the activity generator. Every variant that originates from a template
/// names the failing template id.
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("template {template_id} failed to evaluate")]
    Evaluate {
        template_id: String,
        #[source]
        source: EvaluateError,
    },
    #[error("the format of template {template_id} is wrong")]
    TextSpeech {
        template_id: String,
        #[source]
        source: SplitError,
    },
    #[error("card template {template_id} is malformed")]
    CardSyntax {
        template_id: String,
        #[source]
        source: CardSyntaxError,
    },
    #[error("adaptive card template {template_id} is malformed: {reason}")]
    AdaptiveCard { template_id: String, reason: String },
    #[error("invalid generation options: {0}")]
    InvalidOptions(String),
}

impl ActivityError {
    /// Template id the error originates from, when there is one.
    pub fn template_id(&self) -> Option<&str> {
        match self {
            ActivityError::Evaluate { template_id, .. }
            | ActivityError::TextSpeech { template_id, .. }
            | ActivityError::CardSyntax { template_id, .. }
            | ActivityError::AdaptiveCard { template_id, .. } => Some(template_id),
            ActivityError::InvalidOptions(_) => None,
        }
    }
}
