//! JSON record encoding for collection conditions
//!
//! A condition is persisted as `{"condition": "<Kind>", "value": [...]}`,
//! or `{"condition": "<Kind>"}` for `IsEmpty` and `IsNotEmpty`. Decoding
//! treats the record as untrusted: the kind name, the set of keys and the
//! shape of `value` are all checked before a condition is built.

use crate::condition::collection::CollectionCondition;
use crate::condition::kind::ConditionKind;
use crate::condition::value::json_type_name;
use crate::error::{ConditionCreationError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const CONDITION_KEY: &str = "condition";
const VALUE_KEY: &str = "value";

impl CollectionCondition {
    pub fn to_json(&self) -> Value {
        let mut record = Map::new();
        record.insert(
            CONDITION_KEY.to_string(),
            Value::String(self.kind().name().to_string()),
        );
        if let Some(reference) = self.reference() {
            record.insert(VALUE_KEY.to_string(), Value::Array(reference.to_vec()));
        }
        Value::Object(record)
    }

    /// Decode a record of any collection kind
    pub fn from_json(record: &Value) -> Result<Self> {
        decode(record, None)
    }

    /// Decode a record that must name `kind`
    pub fn from_json_as(kind: ConditionKind, record: &Value) -> Result<Self> {
        decode(record, Some(kind))
    }

    /// Parse JSON text and decode it
    pub fn from_json_str(text: &str) -> Result<Self> {
        let record: Value = serde_json::from_str(text)?;
        CollectionCondition::from_json(&record)
    }
}

fn decode(record: &Value, expected: Option<ConditionKind>) -> Result<CollectionCondition> {
    let fields = record
        .as_object()
        .ok_or_else(|| ConditionCreationError::NotARecord {
            type_name: json_type_name(record).to_string(),
        })?;

    let kind: ConditionKind = fields
        .get(CONDITION_KEY)
        .and_then(Value::as_str)
        .ok_or(ConditionCreationError::MissingCondition)?
        .parse()?;

    if let Some(expected) = expected {
        if expected != kind {
            return Err(ConditionCreationError::KindMismatch {
                expected: expected.name(),
                found: kind.name(),
            });
        }
    }

    if let Some(field) = fields
        .keys()
        .find(|key| key.as_str() != CONDITION_KEY && key.as_str() != VALUE_KEY)
    {
        return Err(ConditionCreationError::UnknownField {
            kind: kind.name(),
            field: field.clone(),
        });
    }

    CollectionCondition::new(kind, fields.get(VALUE_KEY).cloned())
}

impl Serialize for CollectionCondition {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CollectionCondition {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = Value::deserialize(deserializer)?;
        CollectionCondition::from_json(&record).map_err(serde::de::Error::custom)
    }
}
