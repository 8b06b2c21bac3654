//! Collection condition values and construction

use crate::condition::kind::ConditionKind;
use crate::condition::value::json_type_name;
use crate::error::{ConditionCreationError, Result};
use serde_json::Value;

/// A predicate comparing a runtime value against a fixed reference collection
///
/// One case per [`ConditionKind`]. Reference-bearing cases own the
/// reference elements in the order they were supplied; `IsEmpty` and
/// `IsNotEmpty` carry nothing. Instances are immutable and can be shared
/// across threads for concurrent evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionCondition {
    AllIn(Vec<Value>),
    AllNotIn(Vec<Value>),
    AnyIn(Vec<Value>),
    AnyNotIn(Vec<Value>),
    IsIn(Vec<Value>),
    IsNotIn(Vec<Value>),
    IsEmpty,
    IsNotEmpty,
}

impl CollectionCondition {
    pub fn all_in(values: Vec<Value>) -> Self {
        CollectionCondition::AllIn(values)
    }

    pub fn all_not_in(values: Vec<Value>) -> Self {
        CollectionCondition::AllNotIn(values)
    }

    pub fn any_in(values: Vec<Value>) -> Self {
        CollectionCondition::AnyIn(values)
    }

    pub fn any_not_in(values: Vec<Value>) -> Self {
        CollectionCondition::AnyNotIn(values)
    }

    pub fn is_in(values: Vec<Value>) -> Self {
        CollectionCondition::IsIn(values)
    }

    pub fn is_not_in(values: Vec<Value>) -> Self {
        CollectionCondition::IsNotIn(values)
    }

    pub fn is_empty() -> Self {
        CollectionCondition::IsEmpty
    }

    pub fn is_not_empty() -> Self {
        CollectionCondition::IsNotEmpty
    }

    /// Build a condition from an untrusted argument
    ///
    /// Reference-bearing kinds need `Some` JSON array; anything else fails
    /// with [`ConditionCreationError::InvalidArgumentType`] naming the
    /// rejected type, or [`ConditionCreationError::MissingValue`] when the
    /// argument is absent. `IsEmpty` and `IsNotEmpty` reject any argument.
    pub fn new(kind: ConditionKind, value: Option<Value>) -> Result<Self> {
        let condition = match kind {
            ConditionKind::IsEmpty | ConditionKind::IsNotEmpty => {
                if value.is_some() {
                    return Err(ConditionCreationError::UnexpectedValue { kind: kind.name() });
                }
                if kind == ConditionKind::IsEmpty {
                    CollectionCondition::IsEmpty
                } else {
                    CollectionCondition::IsNotEmpty
                }
            }
            ConditionKind::AllIn => CollectionCondition::AllIn(expect_sequence(kind, value)?),
            ConditionKind::AllNotIn => CollectionCondition::AllNotIn(expect_sequence(kind, value)?),
            ConditionKind::AnyIn => CollectionCondition::AnyIn(expect_sequence(kind, value)?),
            ConditionKind::AnyNotIn => CollectionCondition::AnyNotIn(expect_sequence(kind, value)?),
            ConditionKind::IsIn => CollectionCondition::IsIn(expect_sequence(kind, value)?),
            ConditionKind::IsNotIn => CollectionCondition::IsNotIn(expect_sequence(kind, value)?),
        };
        Ok(condition)
    }

    /// Build a reference-bearing condition from an untrusted argument
    pub fn with_reference(kind: ConditionKind, value: Value) -> Result<Self> {
        CollectionCondition::new(kind, Some(value))
    }

    pub fn kind(&self) -> ConditionKind {
        match self {
            CollectionCondition::AllIn(_) => ConditionKind::AllIn,
            CollectionCondition::AllNotIn(_) => ConditionKind::AllNotIn,
            CollectionCondition::AnyIn(_) => ConditionKind::AnyIn,
            CollectionCondition::AnyNotIn(_) => ConditionKind::AnyNotIn,
            CollectionCondition::IsIn(_) => ConditionKind::IsIn,
            CollectionCondition::IsNotIn(_) => ConditionKind::IsNotIn,
            CollectionCondition::IsEmpty => ConditionKind::IsEmpty,
            CollectionCondition::IsNotEmpty => ConditionKind::IsNotEmpty,
        }
    }

    /// Reference collection, `None` for `IsEmpty` and `IsNotEmpty`
    pub fn reference(&self) -> Option<&[Value]> {
        match self {
            CollectionCondition::AllIn(values)
            | CollectionCondition::AllNotIn(values)
            | CollectionCondition::AnyIn(values)
            | CollectionCondition::AnyNotIn(values)
            | CollectionCondition::IsIn(values)
            | CollectionCondition::IsNotIn(values) => Some(values),
            CollectionCondition::IsEmpty | CollectionCondition::IsNotEmpty => None,
        }
    }
}

fn expect_sequence(kind: ConditionKind, value: Option<Value>) -> Result<Vec<Value>> {
    match value {
        Some(Value::Array(values)) => Ok(values),
        Some(other) => Err(ConditionCreationError::InvalidArgumentType {
            type_name: json_type_name(&other).to_string(),
        }),
        None => Err(ConditionCreationError::MissingValue { kind: kind.name() }),
    }
}
