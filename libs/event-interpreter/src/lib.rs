//! Turns a CloudTrail audit event (as delivered by EventBridge) into an
//! event name plus a human-readable description.
//!
//! Interpretation never fails. Recognized event names get a summary sentence,
//! anything else passes its `detail` through untouched, and a recognized
//! event that lacks a field its summary needs degrades to the raw event.

mod kind;
mod lookup;

use std::fmt;

use serde_json::Value;

pub use kind::EventKind;
pub use lookup::{lookup, required_text, MissingField};

/// Event name reported when the event carries no `detail`.
pub const UNKNOWN_EVENT: &str = "UNKNOWN EVENT";

#[derive(Debug, Clone, PartialEq)]
pub enum Description {
    /// Summary sentence for a recognized event (empty when there was no detail).
    Text(String),
    /// The `detail` of an unrecognized event, unformatted.
    Detail(Value),
    /// The whole original event, for a recognized event missing a required field.
    Raw(Value),
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Description::Text(text) => f.write_str(text),
            Description::Detail(value) | Description::Raw(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    /// `None` when `detail` exists but has no `eventName`. A non-string name
    /// is kept in its JSON form.
    pub event_name: Option<String>,
    pub description: Description,
}

impl Interpretation {
    pub fn is_degraded(&self) -> bool {
        matches!(self.description, Description::Raw(_))
    }

    /// Name used to label chat messages; falls back to [`UNKNOWN_EVENT`].
    pub fn label(&self) -> &str {
        self.event_name.as_deref().unwrap_or(UNKNOWN_EVENT)
    }

    pub fn kind(&self) -> Option<EventKind> {
        self.event_name.as_deref().and_then(EventKind::from_name)
    }
}

/// Interprets one raw event. Pure: the same input always yields the same output.
pub fn interpret(event: &Value) -> Interpretation {
    let detail = match event.get("detail") {
        Some(detail) if !is_empty(detail) => detail,
        _ => {
            return Interpretation {
                event_name: Some(UNKNOWN_EVENT.to_string()),
                description: Description::Text(String::new()),
            };
        }
    };

    let event_name = match detail.get("eventName") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.clone()),
        Some(other) => Some(other.to_string()),
    };

    let Some(kind) = event_name.as_deref().and_then(EventKind::from_name) else {
        return Interpretation {
            event_name,
            description: Description::Detail(detail.clone()),
        };
    };

    let description = match kind.describe(detail) {
        Ok(text) => Description::Text(text),
        Err(missing) => {
            tracing::debug!("Cannot summarize {} event ({}), passing raw event through", kind.name(), missing);
            Description::Raw(event.clone())
        }
    };

    Interpretation { event_name, description }
}

// A detail that is null, false, zero, or an empty string/array/object counts as absent.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
