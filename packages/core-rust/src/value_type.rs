//! Value types controlling how a [`ValueSet`](crate::ValueSet) projects its records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueSetError;

/// Projection strategy of a value set.
///
/// Wire names are `snake_case` (`"single_value"`, `"multiple_values"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// One scalar: the `value` property of the first record.
    SingleValue,
    /// A list of scalars: the `value` property of every record.
    MultipleValues,
    /// One record with all of its properties.
    MultipleProperties,
    /// The full record sequence, unprojected.
    ValueSet,
}

impl ValueType {
    pub const ALL: [ValueType; 4] = [
        ValueType::SingleValue,
        ValueType::MultipleValues,
        ValueType::MultipleProperties,
        ValueType::ValueSet,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::SingleValue => "single_value",
            ValueType::MultipleValues => "multiple_values",
            ValueType::MultipleProperties => "multiple_properties",
            ValueType::ValueSet => "value_set",
        }
    }

    /// Whether the persistence layer must emit a keepalive marker for this type.
    ///
    /// A single value stores "unset" as an empty string. Every other type needs
    /// the marker so an intentionally emptied list is told apart from an absent field.
    #[must_use]
    pub fn requires_keepalive_key(self) -> bool {
        !matches!(self, ValueType::SingleValue)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = ValueSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValueSetError::InvalidValueType {
                name: s.to_string(),
            })
    }
}
