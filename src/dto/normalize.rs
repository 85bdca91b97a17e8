//! Serde helpers that normalize loosely-typed form input before it reaches
//! the validator: blank strings and unparseable numbers become `None`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Default unit of measurement for offered and accepted quantities.
pub const DEFAULT_UNIT_OF_MEASUREMENT: &str = "MT";

fn is_blank(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty() || trimmed == "undefined"
}

/// Trims the string; empty or literal `undefined` becomes `None`.
pub fn normalize_text(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !is_blank(s)).map(|s| s.trim().to_string())
}

/// Parses a decimal from text, returning `None` when it is blank or not a number.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if is_blank(trimmed) {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if is_blank(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            trimmed
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

pub fn blank_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(normalize_text(Some(&s))),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(&s),
        _ => None,
    })
}

pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => parse_date(&s),
        _ => None,
    })
}

/// Reads an optional list; `null` or absence yields an empty list.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a list of identifiers, dropping blank entries.
pub fn identifier_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(values)) => values,
        Some(Value::String(s)) => s
            .split(',')
            .map(|part| Value::String(part.to_string()))
            .collect(),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "expected a list of identifiers, found {}",
                other
            )))
        }
    };

    values
        .into_iter()
        .filter_map(|value| match value {
            Value::String(s) => normalize_text(Some(&s)).map(Ok),
            Value::Null => None,
            other => Some(Err(D::Error::custom(format!(
                "expected an identifier, found {}",
                other
            )))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "blank_string_as_none")]
        text: Option<String>,
        #[serde(default, deserialize_with = "lenient_decimal")]
        qty: Option<Decimal>,
        #[serde(default, deserialize_with = "lenient_date")]
        date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "identifier_list")]
        refs: Vec<String>,
    }

    fn form(json: &str) -> Form {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn blank_and_undefined_strings_become_none() {
        assert_eq!(form(r#"{"text": ""}"#).text, None);
        assert_eq!(form(r#"{"text": "   "}"#).text, None);
        assert_eq!(form(r#"{"text": "undefined"}"#).text, None);
        assert_eq!(form(r#"{"text": null}"#).text, None);
        assert_eq!(form(r#"{}"#).text, None);
        assert_eq!(form(r#"{"text": " H1 "}"#).text.as_deref(), Some("H1"));
    }

    #[test]
    fn numbers_parse_from_strings_and_numbers() {
        assert_eq!(form(r#"{"qty": 60}"#).qty, Some(dec!(60)));
        assert_eq!(form(r#"{"qty": "40.5"}"#).qty, Some(dec!(40.5)));
        assert_eq!(form(r#"{"qty": 12.25}"#).qty, Some(dec!(12.25)));
    }

    #[test]
    fn unparseable_numbers_become_none() {
        assert_eq!(form(r#"{"qty": ""}"#).qty, None);
        assert_eq!(form(r#"{"qty": "abc"}"#).qty, None);
        assert_eq!(form(r#"{"qty": "NaN"}"#).qty, None);
        assert_eq!(form(r#"{"qty": true}"#).qty, None);
    }

    #[test]
    fn dates_are_lenient() {
        assert_eq!(
            form(r#"{"date": "2025-03-09"}"#).date,
            NaiveDate::from_ymd_opt(2025, 3, 9)
        );
        assert_eq!(
            form(r#"{"date": "2025-03-09T10:00:00Z"}"#).date,
            NaiveDate::from_ymd_opt(2025, 3, 9)
        );
        assert_eq!(form(r#"{"date": ""}"#).date, None);
        assert_eq!(form(r#"{"date": "09/03/2025"}"#).date, None);
    }

    #[test]
    fn identifier_lists_drop_blanks() {
        assert_eq!(
            form(r#"{"refs": ["PROC-IC-2025-0001", "", " PROC-IC-2025-0002 "]}"#).refs,
            vec!["PROC-IC-2025-0001", "PROC-IC-2025-0002"]
        );
        assert_eq!(
            form(r#"{"refs": "PROC-IC-2025-0001,PROC-IC-2025-0003"}"#).refs,
            vec!["PROC-IC-2025-0001", "PROC-IC-2025-0003"]
        );
        assert!(form(r#"{"refs": null}"#).refs.is_empty());
    }
}
