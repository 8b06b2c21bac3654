//! Values handed over by a dynamically typed host such as Python
//!
//! The bindings translate host objects into [`HostValue`] and leave every
//! decision to this module: which host objects have a JSON form, which type
//! name a construction error reports, and how a runtime value with
//! non-JSON elements is evaluated.

use crate::condition::{CollectionCondition, ConditionKind};
use crate::error::{ConditionCreationError, Result};
use serde_json::{Map, Number, Value};

/// Host object, as seen by the bindings
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    None,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<HostValue>),
    Tuple(Vec<HostValue>),
    Dict(Vec<(HostValue, HostValue)>),
    /// Any other object, or an int too large for 64 bits; holds its type name
    Other(String),
}

impl HostValue {
    /// Host type name reported in construction errors
    pub fn type_name(&self) -> &str {
        match self {
            HostValue::None => "NoneType",
            HostValue::Bool(_) => "bool",
            HostValue::Int(_) | HostValue::UInt(_) => "int",
            HostValue::Float(_) => "float",
            HostValue::Str(_) => "str",
            HostValue::List(_) => "list",
            HostValue::Tuple(_) => "tuple",
            HostValue::Dict(_) => "dict",
            HostValue::Other(type_name) => type_name,
        }
    }

    /// JSON form, `None` when this value or anything nested in it has none
    pub fn to_json(&self) -> Option<Value> {
        match self {
            HostValue::None => Some(Value::Null),
            HostValue::Bool(flag) => Some(Value::Bool(*flag)),
            HostValue::Int(int) => Some(Value::from(*int)),
            HostValue::UInt(int) => Some(Value::from(*int)),
            HostValue::Float(float) => Number::from_f64(*float).map(Value::Number),
            HostValue::Str(text) => Some(Value::String(text.clone())),
            HostValue::List(items) | HostValue::Tuple(items) => items
                .iter()
                .map(HostValue::to_json)
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            HostValue::Dict(entries) => {
                let mut fields = Map::new();
                for (key, value) in entries {
                    let HostValue::Str(key) = key else {
                        return None;
                    };
                    fields.insert(key.clone(), value.to_json()?);
                }
                Some(Value::Object(fields))
            }
            HostValue::Other(_) => None,
        }
    }

    /// Innermost value without a JSON form
    fn first_unsupported(&self) -> Option<&HostValue> {
        match self {
            HostValue::Float(float) if !float.is_finite() => Some(self),
            HostValue::Other(_) => Some(self),
            HostValue::List(items) | HostValue::Tuple(items) => {
                items.iter().find_map(HostValue::first_unsupported)
            }
            HostValue::Dict(entries) => entries.iter().find_map(|(key, value)| match key {
                HostValue::Str(_) => value.first_unsupported(),
                _ => Some(key),
            }),
            _ => None,
        }
    }

    fn unsupported_error(&self) -> ConditionCreationError {
        let culprit = self.first_unsupported().unwrap_or(self);
        ConditionCreationError::UnsupportedElement {
            type_name: culprit.type_name().to_string(),
        }
    }
}

/// Reference collection from a constructor argument
///
/// Only lists and tuples are sequences. Anything else fails with
/// `InvalidArgumentType` naming the host type; a sequence holding an
/// element with no JSON form fails with `UnsupportedElement`.
pub fn reference_from_host(value: &HostValue) -> Result<Value> {
    match value {
        HostValue::List(items) | HostValue::Tuple(items) => items
            .iter()
            .map(|item| item.to_json().ok_or_else(|| item.unsupported_error()))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Err(ConditionCreationError::InvalidArgumentType {
            type_name: other.type_name().to_string(),
        }),
    }
}

/// Build a reference-bearing condition from a constructor argument
pub fn condition_from_host(kind: ConditionKind, value: &HostValue) -> Result<CollectionCondition> {
    CollectionCondition::with_reference(kind, reference_from_host(value)?)
}

/// Decode a condition record handed over as a host dict
pub fn record_from_host(record: &HostValue) -> Result<CollectionCondition> {
    if !matches!(record, HostValue::Dict(_)) {
        return Err(ConditionCreationError::NotARecord {
            type_name: record.type_name().to_string(),
        });
    }
    let record = record.to_json().ok_or_else(|| record.unsupported_error())?;
    CollectionCondition::from_json(&record)
}

/// Evaluate a condition against a host runtime value; never fails
///
/// Elements with no JSON form stay in the sequence as opaque items that
/// equal no reference element, so the sequence keeps its length.
pub fn evaluate_host(condition: &CollectionCondition, what: &HostValue) -> bool {
    match what {
        HostValue::List(items) | HostValue::Tuple(items) => {
            let converted: Vec<Value> = items.iter().filter_map(HostValue::to_json).collect();
            let opaque = items.len() - converted.len();
            if opaque == 0 {
                return condition.is_satisfied(converted.as_slice());
            }
            match condition.kind() {
                // An opaque element is never in the reference
                ConditionKind::AllIn => condition.reference().is_some_and(<[Value]>::is_empty),
                ConditionKind::AllNotIn => !condition.reference().is_some_and(<[Value]>::is_empty),
                ConditionKind::AnyIn | ConditionKind::AnyNotIn => {
                    condition.is_satisfied(converted.as_slice())
                }
                ConditionKind::IsIn | ConditionKind::IsEmpty => false,
                ConditionKind::IsNotIn | ConditionKind::IsNotEmpty => true,
            }
        }
        other => match other.to_json() {
            Some(value) => condition.is_satisfied(&value),
            // Not a sequence and equal to no JSON element
            None => condition.kind() == ConditionKind::IsNotIn,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object() -> HostValue {
        HostValue::Other("object".to_string())
    }

    fn ints(values: &[i64]) -> HostValue {
        HostValue::List(values.iter().copied().map(HostValue::Int).collect())
    }

    #[test]
    fn test_type_names() {
        assert_eq!(HostValue::Str("test".to_string()).type_name(), "str");
        assert_eq!(HostValue::None.type_name(), "NoneType");
        assert_eq!(HostValue::Dict(vec![]).type_name(), "dict");
        assert_eq!(HostValue::Float(1.0).type_name(), "float");
        assert_eq!(HostValue::UInt(u64::MAX).type_name(), "int");
        assert_eq!(HostValue::Other("type".to_string()).type_name(), "type");
    }

    #[test]
    fn test_to_json() {
        let value = HostValue::Dict(vec![(
            HostValue::Str("roles".to_string()),
            HostValue::Tuple(vec![HostValue::Str("admin".to_string()), HostValue::None]),
        )]);
        assert_eq!(value.to_json(), Some(json!({"roles": ["admin", null]})));

        assert_eq!(HostValue::Float(f64::NAN).to_json(), None);
        assert_eq!(HostValue::List(vec![HostValue::Int(1), object()]).to_json(), None);
        assert_eq!(HostValue::Dict(vec![(HostValue::Int(1), HostValue::None)]).to_json(), None);
    }

    #[test]
    fn test_create_error_reports_host_type() {
        let cases = [
            (HostValue::Str("test".to_string()), "str"),
            (HostValue::Int(1), "int"),
            (HostValue::Float(1.0), "float"),
            (HostValue::Dict(vec![]), "dict"),
            (HostValue::None, "NoneType"),
            (HostValue::Other("type".to_string()), "type"),
        ];

        for (value, type_name) in cases {
            let err = condition_from_host(ConditionKind::AllIn, &value).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Invalid argument type '{}' for collection condition.", type_name)
            );
        }
    }

    #[test]
    fn test_unsupported_elements_of_valid_list() {
        let nan = HostValue::List(vec![HostValue::Float(f64::NAN)]);
        let err = condition_from_host(ConditionKind::AllIn, &nan).unwrap_err();
        assert!(matches!(err, ConditionCreationError::UnsupportedElement { ref type_name } if type_name == "float"));

        let big_int = HostValue::List(vec![HostValue::Int(1), HostValue::Other("int".to_string())]);
        let err = condition_from_host(ConditionKind::IsIn, &big_int).unwrap_err();
        assert!(matches!(err, ConditionCreationError::UnsupportedElement { ref type_name } if type_name == "int"));

        let nested = HostValue::List(vec![HostValue::Dict(vec![(
            HostValue::Str("a".to_string()),
            object(),
        )])]);
        let err = condition_from_host(ConditionKind::AnyIn, &nested).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Value of type 'object' in a collection condition has no JSON form."
        );
    }

    #[test]
    fn test_tuple_reference() {
        let value = HostValue::Tuple(vec![HostValue::Int(1), HostValue::Str("a".to_string())]);
        let condition = condition_from_host(ConditionKind::IsIn, &value).unwrap();
        assert_eq!(condition, CollectionCondition::is_in(vec![json!(1), json!("a")]));
    }

    #[test]
    fn test_record_from_host() {
        let record = HostValue::Dict(vec![
            (HostValue::Str("condition".to_string()), HostValue::Str("AnyIn".to_string())),
            (HostValue::Str("value".to_string()), ints(&[1, 2])),
        ]);
        assert_eq!(
            record_from_host(&record).unwrap(),
            CollectionCondition::any_in(vec![json!(1), json!(2)])
        );

        let err = record_from_host(&ints(&[1])).unwrap_err();
        assert!(matches!(err, ConditionCreationError::NotARecord { ref type_name } if type_name == "list"));

        let record = HostValue::Dict(vec![
            (HostValue::Str("condition".to_string()), HostValue::Str("AnyIn".to_string())),
            (HostValue::Str("value".to_string()), HostValue::List(vec![object()])),
        ]);
        let err = record_from_host(&record).unwrap_err();
        assert!(matches!(err, ConditionCreationError::UnsupportedElement { .. }));
    }

    #[test]
    fn test_opaque_elements_keep_sequence_length() {
        let what = HostValue::List(vec![object()]);

        assert!(evaluate_host(&CollectionCondition::is_not_empty(), &what));
        assert!(!evaluate_host(&CollectionCondition::is_empty(), &what));
        assert!(evaluate_host(&CollectionCondition::any_not_in(vec![json!(1)]), &what));
        assert!(!evaluate_host(&CollectionCondition::any_in(vec![json!(1)]), &what));
        assert!(evaluate_host(&CollectionCondition::all_not_in(vec![json!(1)]), &what));
        assert!(!evaluate_host(&CollectionCondition::all_in(vec![json!(1)]), &what));
        assert!(!evaluate_host(&CollectionCondition::is_in(vec![json!([])]), &what));
        assert!(evaluate_host(&CollectionCondition::is_not_in(vec![json!([])]), &what));
    }

    #[test]
    fn test_opaque_elements_mixed_with_json() {
        let what = HostValue::Tuple(vec![HostValue::Int(1), object()]);

        assert!(evaluate_host(&CollectionCondition::any_in(vec![json!(1)]), &what));
        assert!(!evaluate_host(&CollectionCondition::any_not_in(vec![json!(1)]), &what));
        assert!(!evaluate_host(&CollectionCondition::all_in(vec![json!(1)]), &what));
        assert!(evaluate_host(&CollectionCondition::all_in(vec![]), &what));
        assert!(!evaluate_host(&CollectionCondition::all_not_in(vec![]), &what));
    }

    #[test]
    fn test_json_runtime_values_match_core() {
        let condition = CollectionCondition::all_in(vec![json!(1), json!(2), json!(3)]);
        assert!(evaluate_host(&condition, &ints(&[1, 2])));
        assert!(!evaluate_host(&condition, &ints(&[1, 4])));
        assert!(!evaluate_host(&condition, &HostValue::Int(1)));
        assert!(!evaluate_host(&condition, &HostValue::None));

        let is_not_in = CollectionCondition::is_not_in(vec![json!(1)]);
        assert!(evaluate_host(&is_not_in, &HostValue::None));
        assert!(evaluate_host(&is_not_in, &object()));
        assert!(!evaluate_host(&CollectionCondition::is_in(vec![json!(1)]), &object()));
    }
}
