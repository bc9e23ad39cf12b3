use crate::error::CardSyntaxError;

/// One `key=value` line of a card body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardClause {
    /// Lower-cased, trimmed key.
    pub property: String,
    /// Trimmed value.
    pub raw_value: String,
}

/// Card body split into its leading type token and property clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardBody {
    pub card_type: String,
    pub clauses: Vec<CardClause>,
}

/// Parses a rendered card body such as
///
/// ```text
/// [HeroCard
///     title = Weather
///     buttons = Today | Tomorrow
/// ]
/// ```
///
/// The outer delimiters are dropped without inspection. Both `\n` and `\r\n` line endings are
/// accepted. Blank lines and lines with an empty key are skipped; any other line without `=`
/// is a syntax error.
pub fn parse_card_body(rendered: &str) -> Result<CardBody, CardSyntaxError> {
    let inner = strip_delimiters(rendered.trim()).ok_or(CardSyntaxError::NotDelimited)?;

    let mut lines = inner.lines();
    let card_type = lines.next().unwrap_or_default().trim().to_string();

    let mut clauses = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(CardSyntaxError::MissingEquals {
                // the type token occupies line 1
                line: index + 2,
                text: line.trim().to_string(),
            });
        };
        let property = key.trim().to_lowercase();
        if property.is_empty() {
            continue;
        }
        clauses.push(CardClause {
            property,
            raw_value: value.trim().to_string(),
        });
    }

    Ok(CardBody { card_type, clauses })
}

fn strip_delimiters(value: &str) -> Option<&str> {
    let mut chars = value.chars();
    chars.next()?;
    chars.next_back()?;
    Some(chars.as_str())
}
