//! Runtime values seen by the evaluator

use serde_json::Value;

/// Shape of a runtime attribute value at the evaluation boundary
///
/// Every input maps onto exactly one of these cases, so evaluation is a
/// total match and never has to inspect the value's type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuntimeValue<'a> {
    /// No value was resolved, or it resolved to JSON `null`
    Absent,
    /// Anything that is not a sequence: bool, number, string, object
    Scalar(&'a Value),
    /// An ordered sequence of values
    Sequence(&'a [Value]),
}

impl<'a> RuntimeValue<'a> {
    /// Elements when this is a sequence
    pub fn as_sequence(&self) -> Option<&'a [Value]> {
        match *self {
            RuntimeValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value equals `other` structurally. `Absent` equals `null`.
    pub fn matches(&self, other: &Value) -> bool {
        match *self {
            RuntimeValue::Absent => other.is_null(),
            RuntimeValue::Scalar(value) => values_equal(value, other),
            RuntimeValue::Sequence(items) => match other {
                Value::Array(other_items) => sequences_equal(items, other_items),
                _ => false,
            },
        }
    }
}

impl<'a> From<&'a Value> for RuntimeValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => RuntimeValue::Absent,
            Value::Array(items) => RuntimeValue::Sequence(items),
            other => RuntimeValue::Scalar(other),
        }
    }
}

impl<'a> From<Option<&'a Value>> for RuntimeValue<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(RuntimeValue::Absent, RuntimeValue::from)
    }
}

impl<'a> From<&'a [Value]> for RuntimeValue<'a> {
    fn from(items: &'a [Value]) -> Self {
        RuntimeValue::Sequence(items)
    }
}

impl<'a> From<&'a Vec<Value>> for RuntimeValue<'a> {
    fn from(items: &'a Vec<Value>) -> Self {
        RuntimeValue::Sequence(items.as_slice())
    }
}

/// Type name used in construction errors
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_f64() {
                "float"
            } else {
                "int"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Structural equality with numeric comparison of numbers (`1 == 1.0`)
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                match (x.as_f64(), y.as_f64()) {
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                }
            }
        }
        (Value::Array(x), Value::Array(y)) => sequences_equal(x, y),
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, value)| y.get(key).is_some_and(|other| values_equal(value, other)))
        }
        _ => a == b,
    }
}

fn sequences_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
}

/// Whether `needle` is structurally equal to some element of `haystack`
pub fn contains_value(haystack: &[Value], needle: &Value) -> bool {
    haystack.iter().any(|item| values_equal(item, needle))
}
