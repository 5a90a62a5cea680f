//! Field validator for untyped create and update payloads.
//!
//! Rules run in a fixed order and the first failure wins. Text fields must
//! be present non-empty strings. Integer fields follow leading-integer
//! parsing: JSON numbers truncate toward zero; strings may carry leading
//! whitespace, a sign, and a `0x` hex prefix, and trailing text is ignored.
//! Zero is rejected. Dates accept the usual PostgreSQL input styles (ISO,
//! slashed, US month-first, compact, and spelled-out month) or an RFC 3339
//! timestamp.

use chrono::{DateTime, NaiveDate};
use serde_json::{Value, json};

use super::{Error, NewCity, NewState, NewTemperature};

/// Detail codes attached to validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureCode {
    MissingField,
    InvalidType,
    InvalidInteger,
    InvalidDate,
}

impl FailureCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidType => "invalid_type",
            Self::InvalidInteger => "invalid_integer",
            Self::InvalidDate => "invalid_date",
        }
    }
}

/// A validated field: its JSON key and the message reported when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field {
    name: &'static str,
    message: &'static str,
}

impl Field {
    pub(crate) const fn new(name: &'static str, message: &'static str) -> Self {
        Self { name, message }
    }

    fn reject(self, code: FailureCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.name,
            "code": code.as_str(),
        }))
    }
}

pub(crate) const ABBREV: Field = Field::new("abbrev", "Invalid abbreviation");
pub(crate) const STATE_ABBREV: Field = Field::new("state_abbrev", "Invalid abbreviation");
pub(crate) const NAME: Field = Field::new("name", "Invalid name");
pub(crate) const CLIMATE: Field = Field::new("climate", "Invalid climate");
pub(crate) const CITY: Field = Field::new("city", "Invalid city id");
pub(crate) const CITY_ID: Field = Field::new("city_id", "Invalid city id");
pub(crate) const TEMPERATURE: Field = Field::new("temperature", "Invalid temperature");
pub(crate) const DATE: Field = Field::new("date", "Invalid Date");

/// Absent, `null`, `false`, and `""` all count as missing.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

/// Require a non-empty string.
pub(crate) fn require_text(value: Option<&Value>, field: Field) -> Result<String, Error> {
    if is_missing(value) {
        return Err(field.reject(FailureCode::MissingField));
    }
    match value {
        Some(Value::String(text)) => Ok(text.clone()),
        _ => Err(field.reject(FailureCode::InvalidType)),
    }
}

/// Require a non-zero integer that fits a 32-bit column.
pub(crate) fn require_nonzero_integer(value: Option<&Value>, field: Field) -> Result<i32, Error> {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        return Err(field.reject(FailureCode::MissingField));
    };
    parse_leading_integer(value)
        .filter(|parsed| *parsed != 0)
        .and_then(|parsed| i32::try_from(parsed).ok())
        .ok_or_else(|| field.reject(FailureCode::InvalidInteger))
}

/// Require a calendar date.
pub(crate) fn require_date(value: Option<&Value>, field: Field) -> Result<NaiveDate, Error> {
    if is_missing(value) {
        return Err(field.reject(FailureCode::MissingField));
    }
    value
        .and_then(Value::as_str)
        .and_then(parse_date)
        .ok_or_else(|| field.reject(FailureCode::InvalidDate))
}

/// Input styles PostgreSQL accepts for `date` under the default `MDY` order.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%d %B %Y",
];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| parse_compact_date(raw))
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// `YYYYMMDD` with no separators.
fn parse_compact_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = raw[..4].parse().ok()?;
    let month = raw[4..6].parse().ok()?;
    let day = raw[6..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Leading-integer interpretation of a JSON value.
///
/// Returns `None` when no digits can be read or the magnitude exceeds `i64`.
pub(crate) fn parse_leading_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .map(f64::trunc)
                .filter(|truncated| truncated.is_finite() && truncated.abs() < 9.0e18)
                .map(|truncated| truncated as i64)
        }),
        Value::String(text) => parse_leading_integer_text(text),
        _ => None,
    }
}

fn parse_leading_integer_text(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (false, rest)
    } else {
        (false, trimmed)
    };
    let (radix, body) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };
    let end = body
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(body.len());
    let digits = &body[..end];
    if digits.is_empty() {
        return None;
    }
    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Validate a state create payload: `abbrev`, then `name`.
pub fn validate_new_state(input: &Value) -> Result<NewState, Error> {
    let abbrev = require_text(input.get("abbrev"), ABBREV)?;
    let name = require_text(input.get("name"), NAME)?;
    Ok(NewState { abbrev, name })
}

/// Validate a city create payload: `state_abbrev`, `name`, then `climate`.
pub fn validate_new_city(input: &Value) -> Result<NewCity, Error> {
    let state_abbrev = require_text(input.get("state_abbrev"), STATE_ABBREV)?;
    let name = require_text(input.get("name"), NAME)?;
    let climate = require_text(input.get("climate"), CLIMATE)?;
    Ok(NewCity {
        state_abbrev,
        name,
        climate,
    })
}

/// Validate a temperature create payload: `city`, `temperature`, then `date`.
pub fn validate_new_temperature(input: &Value) -> Result<NewTemperature, Error> {
    let city_id = require_nonzero_integer(input.get("city"), CITY)?;
    let temperature = require_nonzero_integer(input.get("temperature"), TEMPERATURE)?;
    let date = require_date(input.get("date"), DATE)?;
    Ok(NewTemperature {
        city_id: city_id.into(),
        temperature,
        date,
    })
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
