//! Normalized, schema-bound field values.
//!
//! A [`ValueSet`] stores a field's value as a sequence of records, each record
//! holding exactly the properties of the set's [`PropertySchema`]. Input of any
//! supported shape is funneled through [`ValueSet::set`] into that canonical
//! form; [`ValueSet::get`] projects it back out according to the
//! [`ValueType`].
//!
//! # Unset vs. empty
//!
//! `records` is `None` until something is stored (or after storing null). An
//! empty record list means the field was deliberately emptied. Both count as
//! [empty](ValueSet::is_empty). The payload codec keeps them apart, and its
//! keepalive flag asks the storage layer to do the same.

use tracing::debug;

use crate::error::ValueSetError;
use crate::input::Input;
use crate::schema::{PropertySchema, VALUE_PROPERTY};
use crate::types::{Record, Value};
use crate::value_type::ValueType;

/// A field value normalized into schema-shaped records.
///
/// # Examples
///
/// ```
/// use fieldset_core::{Value, ValueSet, ValueType};
///
/// let mut set = ValueSet::new(ValueType::MultipleValues);
/// set.set(Value::Array(vec!["a".into(), "b".into()]));
///
/// assert_eq!(
///     set.get(),
///     Some(Value::Array(vec!["a".into(), "b".into()]))
/// );
/// assert_eq!(set.records().map(<[_]>::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSet {
    value_type: ValueType,
    properties: PropertySchema,
    records: Option<Vec<Record>>,
}

impl ValueSet {
    /// Creates an unset value set whose schema holds only `value`.
    #[must_use]
    pub fn new(value_type: ValueType) -> Self {
        Self::with_schema(value_type, PropertySchema::default())
    }

    /// Creates an unset value set with `additional` properties merged over
    /// `{ value: "" }`.
    pub fn with_properties<I, K, V>(value_type: ValueType, additional: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_schema(value_type, PropertySchema::new(additional))
    }

    #[must_use]
    pub fn with_schema(value_type: ValueType, properties: PropertySchema) -> Self {
        Self {
            value_type,
            properties,
            records: None,
        }
    }

    /// Creates a value set from a value type name such as `"multiple_values"`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueSetError::InvalidValueType`] if `type_name` is not one of
    /// the four known value types.
    pub fn from_type_name<I, K, V>(type_name: &str, additional: I) -> Result<Self, ValueSetError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let value_type = type_name.parse()?;
        Ok(Self::with_properties(value_type, additional))
    }

    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[must_use]
    pub fn properties(&self) -> &PropertySchema {
        &self.properties
    }

    /// See [`ValueType::requires_keepalive_key`].
    #[must_use]
    pub fn requires_keepalive_key(&self) -> bool {
        self.value_type.requires_keepalive_key()
    }

    /// `true` when unset or holding zero records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.as_ref().is_none_or(Vec::is_empty)
    }

    /// Projects the records according to the value type. `None` when unset.
    #[must_use]
    pub fn get(&self) -> Option<Value> {
        let records = self.records.as_ref()?;
        let projected = match self.value_type {
            ValueType::SingleValue => records
                .first()
                .and_then(|record| record.get(VALUE_PROPERTY).cloned())
                .unwrap_or_else(|| Value::String(String::new())),
            ValueType::MultipleValues => Value::Array(
                records
                    .iter()
                    .filter_map(|record| record.get(VALUE_PROPERTY).cloned())
                    .collect(),
            ),
            ValueType::MultipleProperties => {
                Value::Map(records.first().cloned().unwrap_or_default())
            }
            ValueType::ValueSet => Value::from(records.clone()),
        };
        Some(projected)
    }

    /// The normalized record sequence, bypassing projection.
    #[must_use]
    pub fn records(&self) -> Option<&[Record]> {
        self.records.as_deref()
    }

    /// Replaces the stored records with a normalized form of `raw`.
    ///
    /// `Value::Null` (or `None`) unsets the value set.
    pub fn set(&mut self, raw: impl Into<Value>) {
        match Input::from_value(raw.into()) {
            Some(input) => self.set_input(input),
            None => self.clear(),
        }
    }

    /// Replaces the stored records with a normalized form of an input whose
    /// shape is already known.
    pub fn set_input(&mut self, input: Input) {
        let shape = input.shape();
        let records: Vec<Record> = input
            .into_raw_records()
            .iter()
            .map(|raw| self.properties.format(raw))
            .collect();
        debug!(
            value_type = %self.value_type,
            shape,
            records = records.len(),
            "normalized value set input"
        );
        self.records = Some(records);
    }

    /// Unsets the value set.
    pub fn clear(&mut self) {
        self.records = None;
    }

    /// Takes the records out, leaving the value set unset.
    pub fn take_records(&mut self) -> Option<Vec<Record>> {
        self.records.take()
    }
}
