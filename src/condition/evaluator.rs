//! Condition evaluator

use crate::condition::collection::CollectionCondition;
use crate::condition::value::{contains_value, RuntimeValue};
use serde_json::Value;

/// Evaluate a condition against a runtime value
///
/// Total over every input: values of the wrong shape evaluate to `false`
/// (or `true` for `IsNotIn`), never to an error.
pub fn check(condition: &CollectionCondition, what: RuntimeValue<'_>) -> bool {
    match condition {
        CollectionCondition::AllIn(reference) => what
            .as_sequence()
            .is_some_and(|items| all_in(reference, items)),
        CollectionCondition::AllNotIn(reference) => what
            .as_sequence()
            .is_some_and(|items| !all_in(reference, items)),
        CollectionCondition::AnyIn(reference) => what
            .as_sequence()
            .is_some_and(|items| any_in(reference, items)),
        CollectionCondition::AnyNotIn(reference) => what
            .as_sequence()
            .is_some_and(|items| !any_in(reference, items)),
        CollectionCondition::IsIn(reference) => is_in(reference, what),
        CollectionCondition::IsNotIn(reference) => !is_in(reference, what),
        CollectionCondition::IsEmpty => what.as_sequence().is_some_and(<[Value]>::is_empty),
        CollectionCondition::IsNotEmpty => what.as_sequence().is_some_and(|items| !items.is_empty()),
    }
}

impl CollectionCondition {
    /// Whether `what` satisfies this condition
    ///
    /// Accepts `&Value`, `Option<&Value>`, or a slice of values. JSON
    /// `null` and `None` are both treated as an absent value.
    pub fn is_satisfied<'a>(&self, what: impl Into<RuntimeValue<'a>>) -> bool {
        check(self, what.into())
    }
}

// An empty reference disables the check.
fn all_in(reference: &[Value], items: &[Value]) -> bool {
    reference.is_empty() || items.iter().all(|item| contains_value(reference, item))
}

fn any_in(reference: &[Value], items: &[Value]) -> bool {
    items.iter().any(|item| contains_value(reference, item))
}

fn is_in(reference: &[Value], what: RuntimeValue<'_>) -> bool {
    reference.iter().any(|item| what.matches(item))
}
