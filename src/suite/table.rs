//! Inline Table Arguments
//!
//! Splits a single inline-table row into tokens and coerces each token to
//! the declared type of the matching test parameter.
//!
//! Fields are separated by commas. A double quote toggles quoting so a
//! field may contain commas; quotes cannot be escaped.
//!
//! Floating-point tokens use plain decimal notation with an optional
//! exponent (`-1.5`, `2e3`). Named values such as `inf` or `NaN` and
//! type suffixes such as `1.5f` are rejected.

use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::error::ErrorKind;

use super::model::{ParamType, Value};

/// Errors raised while binding an inline table to parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("inline table elements count ({tokens}) does not match method parameters ({params})")]
    Arity { tokens: usize, params: usize },

    #[error("Unsupported parameter type: {0}")]
    Unsupported(String),

    #[error("Cannot convert '{token}' to {target}: {reason}")]
    Conversion {
        token: String,
        target: String,
        reason: String,
    },
}

impl TableError {
    /// Count and type mismatches are structural; bad token text is a conversion error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Arity { .. } | Self::Unsupported(_) => ErrorKind::Structural,
            Self::Conversion { .. } => ErrorKind::Conversion,
        }
    }
}

/// Splits an inline-table row into trimmed tokens.
///
/// Always yields at least one token; an empty row yields one empty token.
pub fn split_row(row: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in row.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                tokens.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    tokens.push(current.trim().to_string());

    for token in &mut tokens {
        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            *token = token[1..token.len() - 1].to_string();
        }
    }

    tokens
}

/// Parses `row` into one value per declared parameter.
///
/// The token count is checked before any conversion, so a count mismatch
/// is always reported as [`TableError::Arity`].
pub fn bind_arguments(row: &str, params: &[ParamType]) -> Result<Vec<Value>, TableError> {
    let tokens = split_row(row);

    if tokens.len() != params.len() {
        return Err(TableError::Arity {
            tokens: tokens.len(),
            params: params.len(),
        });
    }

    let values = tokens
        .iter()
        .zip(params)
        .map(|(token, param)| convert(token, param))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Bound inline table '{}' to {:?}", row, values);
    Ok(values)
}

/// Converts one token to the given parameter type.
pub fn convert(token: &str, target: &ParamType) -> Result<Value, TableError> {
    match target {
        ParamType::Text => Ok(Value::Text(token.to_string())),
        ParamType::Byte => parse_int(token, target).map(Value::Byte),
        ParamType::Short => parse_int(token, target).map(Value::Short),
        ParamType::Int => parse_int(token, target).map(Value::Int),
        ParamType::Long => parse_int(token, target).map(Value::Long),
        ParamType::Float => parse_float(token, target).map(Value::Float),
        ParamType::Double => parse_float(token, target).map(Value::Double),
        ParamType::Bool => Ok(Value::Bool(token.eq_ignore_ascii_case("true"))),
        ParamType::Char => {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Ok(Value::Char(ch)),
                _ => Err(conversion_error(token, target, "expected exactly one character")),
            }
        }
        ParamType::Unsupported(name) => Err(TableError::Unsupported(name.clone())),
    }
}

fn parse_int<T>(token: &str, target: &ParamType) -> Result<T, TableError>
where
    T: FromStr<Err = ParseIntError>,
{
    token
        .parse::<T>()
        .map_err(|e| conversion_error(token, target, &e.to_string()))
}

fn parse_float<T>(token: &str, target: &ParamType) -> Result<T, TableError>
where
    T: FromStr<Err = ParseFloatError>,
{
    let decimal = token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal {
        return Err(conversion_error(token, target, "not a decimal number"));
    }

    token
        .parse::<T>()
        .map_err(|e| conversion_error(token, target, &e.to_string()))
}

fn conversion_error(token: &str, target: &ParamType, reason: &str) -> TableError {
    TableError::Conversion {
        token: token.to_string(),
        target: target.to_string(),
        reason: reason.to_string(),
    }
}
