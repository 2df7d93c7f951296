//! Serde adapters for Accela's loosely typed fields and query parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

/// Deserialize an identifier the API sends either as a string or a number.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Null,
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Null => None,
        StringOrNumber::Text(s) => Some(s),
        StringOrNumber::Integer(n) => Some(n.to_string()),
        StringOrNumber::Float(n) => Some(n.to_string()),
    })
}

/// Serialize a filter date as `YYYY-MM-DD`.
pub fn api_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
        None => serializer.serialize_none(),
    }
}

/// Serialize a boolean filter as the API's `Y` / `N` flag.
pub fn yes_no<S>(flag: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match flag {
        Some(true) => serializer.serialize_str("Y"),
        Some(false) => serializer.serialize_str("N"),
        None => serializer.serialize_none(),
    }
}

/// Serialize a field selection as a comma-joined list; empty means unset.
pub fn comma_list<S>(fields: &Option<Vec<String>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match fields {
        Some(fields) if !fields.is_empty() => serializer.serialize_str(&fields.join(",")),
        _ => serializer.serialize_none(),
    }
}
