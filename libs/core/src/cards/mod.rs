//! Card mini-language: clause parsing, descriptor building and dispatch to attachments.

mod clause;
mod descriptor;
mod dispatch;

pub use clause::{CardBody, CardClause, parse_card_body};
pub use descriptor::{
    BUTTON_ACTION_TYPE, ButtonEntry, CardDescriptor, CardField, UrlRef, build_descriptor,
};
pub use dispatch::{adaptive_attachment, card_kind, dispatch};

use crate::activity::Attachment;
use crate::error::ActivityError;

/// Parses and dispatches one rendered card body produced by `template_id`.
pub fn card_attachment(template_id: &str, rendered: &str) -> Result<Attachment, ActivityError> {
    let descriptor = parse_descriptor(template_id, rendered)?;
    Ok(dispatch(&descriptor))
}

/// Parses one rendered card body into a descriptor without dispatching it.
pub fn parse_descriptor(template_id: &str, rendered: &str) -> Result<CardDescriptor, ActivityError> {
    let body = parse_card_body(rendered).map_err(|source| ActivityError::CardSyntax {
        template_id: template_id.to_string(),
        source,
    })?;
    Ok(build_descriptor(&body.card_type, &body.clauses))
}
