//! Collection condition kinds and their wire names

use crate::error::{ConditionCreationError, Result};
use std::fmt;
use std::str::FromStr;

/// Set relationship tested by a collection condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// Every element of the runtime sequence is in the reference
    AllIn,
    /// Negation of `AllIn` over sequences
    AllNotIn,
    /// At least one element of the runtime sequence is in the reference
    AnyIn,
    /// Negation of `AnyIn` over sequences
    AnyNotIn,
    /// The runtime value itself is an element of the reference
    IsIn,
    /// The runtime value itself is not an element of the reference
    IsNotIn,
    /// The runtime value is an empty sequence
    IsEmpty,
    /// The runtime value is a non-empty sequence
    IsNotEmpty,
}

impl ConditionKind {
    pub const ALL: [ConditionKind; 8] = [
        ConditionKind::AllIn,
        ConditionKind::AllNotIn,
        ConditionKind::AnyIn,
        ConditionKind::AnyNotIn,
        ConditionKind::IsIn,
        ConditionKind::IsNotIn,
        ConditionKind::IsEmpty,
        ConditionKind::IsNotEmpty,
    ];

    /// Name stored in the `condition` field of a serialized record
    pub const fn name(self) -> &'static str {
        match self {
            ConditionKind::AllIn => "AllIn",
            ConditionKind::AllNotIn => "AllNotIn",
            ConditionKind::AnyIn => "AnyIn",
            ConditionKind::AnyNotIn => "AnyNotIn",
            ConditionKind::IsIn => "IsIn",
            ConditionKind::IsNotIn => "IsNotIn",
            ConditionKind::IsEmpty => "IsEmpty",
            ConditionKind::IsNotEmpty => "IsNotEmpty",
        }
    }

    /// Look up a kind by its wire name
    pub fn from_name(name: &str) -> Option<ConditionKind> {
        ConditionKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether this kind carries a reference collection
    pub const fn takes_reference(self) -> bool {
        !matches!(self, ConditionKind::IsEmpty | ConditionKind::IsNotEmpty)
    }

    /// Whether evaluation only succeeds on sequence runtime values
    pub const fn requires_sequence(self) -> bool {
        matches!(
            self,
            ConditionKind::AllIn
                | ConditionKind::AllNotIn
                | ConditionKind::AnyIn
                | ConditionKind::AnyNotIn
        )
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConditionKind {
    type Err = ConditionCreationError;

    fn from_str(s: &str) -> Result<Self> {
        ConditionKind::from_name(s)
            .ok_or_else(|| ConditionCreationError::UnknownCondition(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ConditionKind::ALL {
            assert_eq!(kind.name().parse::<ConditionKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "Equals".parse::<ConditionKind>().unwrap_err();
        assert!(matches!(err, ConditionCreationError::UnknownCondition(name) if name == "Equals"));

        // Names are case sensitive
        assert!(ConditionKind::from_name("allin").is_none());
    }

    #[test]
    fn test_reference_bearing_kinds() {
        let value_less: Vec<_> = ConditionKind::ALL
            .into_iter()
            .filter(|kind| !kind.takes_reference())
            .collect();
        assert_eq!(value_less, vec![ConditionKind::IsEmpty, ConditionKind::IsNotEmpty]);
    }

    #[test]
    fn test_sequence_kinds() {
        assert!(ConditionKind::AllIn.requires_sequence());
        assert!(ConditionKind::AnyNotIn.requires_sequence());
        assert!(!ConditionKind::IsIn.requires_sequence());
        assert!(!ConditionKind::IsEmpty.requires_sequence());
    }
}
