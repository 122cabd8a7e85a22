//! Tolerant field decoders for backend snapshots.
//!
//! The backend owns the schema and older builds send loosely typed data, so a bad
//! field decodes to its neutral value and a bad element is dropped instead of
//! failing the whole response.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Elements that may arrive as values of a JSON object keyed by their identity.
pub trait Keyed {
    fn adopt_key(&mut self, key: &str);
}

/// Non-negative byte length. Negative, non-numeric and non-finite values become 0.
pub fn length<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f > 0.0)
                    .map(|f| f.floor() as u64)
            })
            .unwrap_or(0),
        _ => 0,
    })
}

/// Only a literal `true` counts.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        _ => None,
    })
}

/// A list of elements; an object is read as the list of its values. Elements that
/// do not decode are skipped.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(elements(value)
        .into_iter()
        .filter_map(|(_, item)| serde_json::from_value(item).ok())
        .collect())
}

/// Like [`seq`], but object keys are handed to each element through [`Keyed`].
pub fn keyed_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Keyed,
{
    let value = Value::deserialize(deserializer)?;
    Ok(keyed_elements(value))
}

/// Strict at the container level: anything other than an array or an object,
/// `null` included, is an error. Elements are still decoded leniently.
pub fn opt_keyed_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Keyed,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(_) | Value::Object(_) => Ok(Some(keyed_elements(value))),
        other => Err(de::Error::custom(format!(
            "expected an array or an object, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn keyed_elements<T>(value: Value) -> Vec<T>
where
    T: DeserializeOwned + Keyed,
{
    elements(value)
        .into_iter()
        .filter_map(|(key, item)| {
            let mut decoded: T = serde_json::from_value(item).ok()?;
            if let Some(key) = key {
                decoded.adopt_key(&key);
            }
            Some(decoded)
        })
        .collect()
}

fn elements(value: Value) -> Vec<(Option<String>, Value)> {
    match value {
        Value::Array(items) => items.into_iter().map(|item| (None, item)).collect(),
        Value::Object(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
        _ => Vec::new(),
    }
}
