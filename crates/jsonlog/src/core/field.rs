use std::{borrow::Cow, fmt, time::Duration};

use serde::Serialize;
use serde_json::Value;

/// A typed key/value pair attached to a log line.
///
/// Values are held as `serde_json::Value` so they encode as native JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: Cow<'static, str>,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn int(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self::new(key, value)
    }

    pub fn uint(key: impl Into<Cow<'static, str>>, value: u64) -> Self {
        Self::new(key, value)
    }

    /// Non-finite floats have no JSON form and encode as their string spelling.
    pub fn float(key: impl Into<Cow<'static, str>>, value: f64) -> Self {
        Self::new(key, float_value(value))
    }

    pub fn bool(key: impl Into<Cow<'static, str>>, value: bool) -> Self {
        Self::new(key, value)
    }

    /// Duration in seconds, as a float.
    pub fn duration(key: impl Into<Cow<'static, str>>, value: Duration) -> Self {
        Self::float(key, value.as_secs_f64())
    }

    pub fn display(key: impl Into<Cow<'static, str>>, value: impl fmt::Display) -> Self {
        Self::string(key, value.to_string())
    }

    /// An error under the conventional `error` key.
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self::display("error", err)
    }

    /// Any serializable value; serialization failures are recorded in place of the value.
    pub fn any<T: Serialize + ?Sized>(key: impl Into<Cow<'static, str>>, value: &T) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| Value::String(format!("serialization error: {e}")));
        Self::new(key, value)
    }
}

pub(crate) fn float_value(value: f64) -> Value {
    match serde_json::Number::from_f64(value) {
        Some(n) => Value::Number(n),
        None => Value::String(value.to_string()),
    }
}
