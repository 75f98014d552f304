//! Filter query parser for `ck list --filter`.
//!
//! Parses expressions into a [`FilterExpr`] for evaluation.
//!
//! # Syntax
//!
//! ```text
//! filter_expr  := field_filter (operator? field_filter)*
//! field_filter := field_name:value | field_name:"quoted value"
//! operator     := AND | OR (case-insensitive)
//! field_name   := project | tag | status | since (case-insensitive)
//! ```
//!
//! # Examples
//!
//! ```rust
//! # use contextkeeper::filters::parser::parse_filter;
//! let expr = parse_filter("project:web tag:bug").unwrap();
//! let expr = parse_filter("status:done OR status:archived").unwrap();
//! let expr = parse_filter("project:\"side project\" since:2024-01-01").unwrap();
//! ```
//!
//! Without an explicit keyword, filters on the same field are OR'd and
//! filters on different fields are AND'd.

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;

use super::ast::{FieldFilter, FilterExpr, FilterField, FilterOperator};

pub const STATUS_VALUES: &[&str] = &["active", "done", "archived"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    FieldValue { field: String, value: String },
    And,
    Or,
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let word = read_word(&mut chars);
        if word.is_empty() {
            break;
        }

        let token = match word.to_uppercase().as_str() {
            "AND" => Token::And,
            "OR" => Token::Or,
            _ => {
                let (field, value) = word.split_once(':').ok_or_else(|| {
                    anyhow!("Invalid token: '{}' (expected field:value or AND/OR)", word)
                })?;

                let value = match value.strip_prefix('"') {
                    Some(rest) => read_quoted(&mut chars, rest)?,
                    None => value.to_string(),
                };

                if field.is_empty() || value.is_empty() {
                    bail!("Invalid field:value format: {}", word);
                }

                Token::FieldValue { field: field.to_string(), value }
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn read_word(chars: &mut Chars<'_>) -> String {
    let mut word = String::new();
    while let Some(ch) = chars.next_if(|c| !c.is_whitespace()) {
        word.push(ch);
    }
    word
}

/// `started` is whatever followed the opening quote inside the current word
fn read_quoted(chars: &mut Chars<'_>, started: &str) -> Result<String> {
    if let Some((value, _)) = started.split_once('"') {
        return Ok(value.to_string());
    }

    let mut value = started.to_string();
    for ch in chars.by_ref() {
        if ch == '"' {
            return Ok(value);
        }
        value.push(ch);
    }

    Err(anyhow!("Unterminated quoted string"))
}

fn parse_field(field: &str) -> Result<FilterField> {
    match field.to_lowercase().as_str() {
        "project" => Ok(FilterField::Project),
        "tag" | "tags" => Ok(FilterField::Tag),
        "status" => Ok(FilterField::Status),
        "since" => Ok(FilterField::Since),
        _ => Err(anyhow!("Unknown field: '{}' (valid fields: project, tag, status, since)", field)),
    }
}

fn validate_value(field: &FilterField, value: &str) -> Result<()> {
    match field {
        FilterField::Status => {
            if !STATUS_VALUES.contains(&value.to_lowercase().as_str()) {
                bail!("Invalid status value: '{}' (must be one of: {})", value, STATUS_VALUES.join(", "));
            }
        }
        FilterField::Since => {
            if !is_valid_date(value) {
                bail!("Invalid date format: '{}' (expected YYYY-MM-DD)", value);
            }
        }
        FilterField::Project | FilterField::Tag => {}
    }
    Ok(())
}

/// Strict YYYY-MM-DD that also names a real day
pub(crate) fn is_valid_date(s: &str) -> bool {
    s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Parse a filter string into a [`FilterExpr`]
///
/// Blank input yields an empty expression that matches everything.
pub fn parse_filter(input: &str) -> Result<FilterExpr> {
    let tokens = tokenize(input).context("Failed to tokenize filter")?;

    let mut expr = FilterExpr::new();
    let mut pending: Option<FilterOperator> = None;

    for token in tokens {
        match token {
            Token::FieldValue { field, value } => {
                let field = parse_field(&field)?;
                validate_value(&field, &value)?;

                if let Some(previous) = expr.filters.last() {
                    let operator = pending.take().unwrap_or(if previous.field == field {
                        FilterOperator::Or
                    } else {
                        FilterOperator::And
                    });
                    expr.add_operator(operator);
                }

                expr.add_filter(FieldFilter::new(field, value));
            }
            Token::And | Token::Or => {
                if expr.is_empty() || pending.is_some() {
                    bail!("Unexpected operator (expected field:value)");
                }
                pending = Some(if token == Token::And { FilterOperator::And } else { FilterOperator::Or });
            }
        }
    }

    if pending.is_some() {
        bail!("Filter ended with operator (expected field:value)");
    }

    Ok(expr)
}
