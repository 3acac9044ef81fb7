//! Structured payloads carried by explain steps.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Key/value payload of one explain step. Keys are kept sorted.
pub type StepData = BTreeMap<String, StepValue>;

/// A value inside an explain step's payload.
///
/// The set of kinds is closed so every payload can be converted to a
/// transport's dynamic value format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepValue {
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// Text.
    String(String),
    /// An ordered list.
    List(Vec<StepValue>),
    /// A nested record.
    Record(StepData),
}

impl StepValue {
    /// Convert to a JSON value.
    ///
    /// Fails with a description of the offending value if a float is NaN
    /// or infinite, since JSON has no representation for it.
    pub fn to_json(&self) -> Result<Value, String> {
        Ok(match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(n) => Value::Number((*n).into()),
            Self::Float(x) => Number::from_f64(*x)
                .map(Value::Number)
                .ok_or_else(|| format!("float {x} has no JSON representation"))?,
            Self::String(s) => Value::String(s.clone()),
            Self::List(items) => {
                Value::Array(items.iter().map(Self::to_json).collect::<Result<_, _>>()?)
            }
            Self::Record(fields) => Value::Object(record_to_json(fields)?),
        })
    }
}

/// Convert a whole payload to a JSON object.
pub fn record_to_json(data: &StepData) -> Result<Map<String, Value>, String> {
    data.iter()
        .map(|(key, value)| {
            value
                .to_json()
                .map(|v| (key.clone(), v))
                .map_err(|e| format!("{key}: {e}"))
        })
        .collect()
}

impl fmt::Display for StepValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Record(fields) => {
                let parts: Vec<String> = fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

impl From<bool> for StepValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for StepValue {
    fn from(n: i32) -> Self {
        Self::Int(n.into())
    }
}

impl From<i64> for StepValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for StepValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for StepValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for StepValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<StepValue>> From<Vec<T>> for StepValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<StepData> for StepValue {
    fn from(fields: StepData) -> Self {
        Self::Record(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_nested_values() {
        let mut inner = StepData::new();
        inner.insert("ok".into(), true.into());
        let value = StepValue::List(vec![
            1i64.into(),
            "two".into(),
            2.5.into(),
            StepValue::Record(inner),
        ]);
        assert_eq!(value.to_json().unwrap(), json!([1, "two", 2.5, {"ok": true}]));
    }

    #[test]
    fn non_finite_floats_fail() {
        assert!(StepValue::Float(f64::NAN).to_json().is_err());

        let mut data = StepData::new();
        data.insert("odds".into(), f64::INFINITY.into());
        let err = record_to_json(&data).unwrap_err();
        assert!(err.starts_with("odds:"), "{err}");
    }

    #[test]
    fn serializes_untagged() {
        let mut data = StepData::new();
        data.insert("total".into(), 14i64.into());
        data.insert("is_crit".into(), false.into());
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"is_crit": false, "total": 14})
        );
    }

    #[test]
    fn display() {
        assert_eq!(StepValue::from(vec![1i64, 2]).to_string(), "[1, 2]");
        let mut data = StepData::new();
        data.insert("a".into(), 1i64.into());
        data.insert("b".into(), "x".into());
        assert_eq!(StepValue::Record(data).to_string(), "{a=1, b=x}");
    }
}
