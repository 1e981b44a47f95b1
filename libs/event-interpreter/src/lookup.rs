use serde_json::Value;
use thiserror::Error;

/// Walks `path` one object key at a time. Returns `None` as soon as a key is
/// absent or an intermediate value is not an object; never panics.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// A required field was absent (or null) in the event detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing field {path}")]
pub struct MissingField {
    pub path: String,
}

/// Fetches a required field and renders it as text. Strings come back as-is,
/// anything else in its JSON form.
pub fn required_text(value: &Value, path: &[&str]) -> Result<String, MissingField> {
    match lookup(value, path) {
        None | Some(Value::Null) => Err(MissingField { path: path.join(".") }),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Ok(other.to_string()),
    }
}
