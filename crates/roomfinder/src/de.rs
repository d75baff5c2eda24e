//! Lenient deserializers for hand-maintained JSON inputs.
//!
//! The building dataset and the labeled-classroom file are edited by people,
//! so numeric fields show up as numbers, numeric strings, or `null`.

use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use serde_json::Value;

/// Decodes a coordinate given as a number or numeric string. `null` becomes 0.0.
pub fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_coordinate(deserializer)?.unwrap_or(0.0))
}

/// Like [`coordinate`], but keeps `null` as `None` so presence can be checked.
pub fn optional_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| de::Error::custom("coordinate out of range")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&s), &"a numeric coordinate")),
        other => Err(de::Error::invalid_type(
            unexpected(&other),
            &"a number or numeric string",
        )),
    }
}

/// Decodes a string field that upstream sometimes emits as a number.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        value => Ok(value_to_text(&value)),
    }
}

/// Renders a JSON scalar the way it should appear in joined output.
///
/// Strings are taken verbatim (no surrounding quotes); everything else uses
/// its JSON rendering.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
        _ => Unexpected::Other("JSON value"),
    }
}
