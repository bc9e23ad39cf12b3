//! Splitting rendered output into the text shown to the user and the text spoken aloud.
//!
//! Authoring contract: the separator appears at most once. An empty separator never splits. Exactly one trailing space is
//! removed from the text half (type two to keep one) and all leading whitespace is removed
//! from the speak half.

use serde::{Deserialize, Serialize};

use crate::error::SplitError;

pub const DEFAULT_SEPARATOR: &str = "||";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpeechPair {
    pub text: String,
    pub speak: String,
}

impl TextSpeechPair {
    pub fn split(rendered: &str, separator: &str) -> Result<Self, SplitError> {
        if separator.is_empty() {
            return Ok(Self::whole(rendered));
        }

        let mut segments = rendered.splitn(3, separator);
        let left = segments.next().unwrap_or_default();
        let Some(right) = segments.next() else {
            return Ok(Self::whole(rendered));
        };
        if segments.next().is_some() {
            return Err(SplitError::TooManySegments {
                separator: separator.to_string(),
                segments: rendered.split(separator).count(),
            });
        }

        Ok(Self {
            text: left.strip_suffix(' ').unwrap_or(left).to_string(),
            speak: right.trim_start().to_string(),
        })
    }

    /// Text and speak both carry the full output.
    fn whole(rendered: &str) -> Self {
        Self {
            text: rendered.to_string(),
            speak: rendered.to_string(),
        }
    }
}
