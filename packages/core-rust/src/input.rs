//! Accepted input shapes for [`ValueSet::set_input`](crate::ValueSet::set_input).
//!
//! Callers that know the shape of their data construct an [`Input`] directly.
//! Callers holding a dynamic [`Value`] (decoded JSON, form data) go through
//! [`Input::from_value`], the single place where shape is detected at runtime.

use crate::schema::VALUE_PROPERTY;
use crate::types::{Record, Value};

/// Closed set of input shapes a value set can normalize.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A bare scalar, stored as one record.
    Scalar(Value),
    /// A flat list. Each element becomes one record: maps carrying a `value`
    /// key are taken as records, anything else is wrapped as `{ value: v }`.
    Scalars(Vec<Value>),
    /// One record.
    Record(Record),
    /// An already-structured list of records.
    Records(Vec<Record>),
}

impl Input {
    /// Classifies a dynamic value. Returns `None` for `Value::Null`.
    ///
    /// Flat input (no array or map among its top-level values):
    /// - a map is one record;
    /// - an array is a flat list.
    ///
    /// Any other array or map is a list of records, taken from its values in
    /// order. Elements that are not maps become empty records and so carry
    /// only property defaults. Anything else is a scalar.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Map(record) if record.values().all(Value::is_scalar) => {
                Some(Input::Record(record))
            }
            Value::Map(record) => Some(Input::Records(into_records(record.into_values()))),
            Value::Array(items) if items.iter().all(Value::is_scalar) => {
                Some(Input::Scalars(items))
            }
            Value::Array(items) => Some(Input::Records(into_records(items))),
            scalar => Some(Input::Scalar(scalar)),
        }
    }

    /// Short name of the shape, used in log fields.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Input::Scalar(_) => "scalar",
            Input::Scalars(_) => "scalars",
            Input::Record(_) => "record",
            Input::Records(_) => "records",
        }
    }

    /// Converts the input into a raw (unformatted) record sequence.
    #[must_use]
    pub fn into_raw_records(self) -> Vec<Record> {
        match self {
            Input::Scalar(value) => vec![wrap(value)],
            Input::Scalars(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Map(record) if record.contains_key(VALUE_PROPERTY) => record,
                    other => wrap(other),
                })
                .collect(),
            Input::Record(record) => vec![record],
            Input::Records(records) => records,
        }
    }
}

impl From<Record> for Input {
    fn from(record: Record) -> Self {
        Input::Record(record)
    }
}

impl From<Vec<Record>> for Input {
    fn from(records: Vec<Record>) -> Self {
        Input::Records(records)
    }
}

fn into_records(items: impl IntoIterator<Item = Value>) -> Vec<Record> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Map(record) => record,
            _ => Record::new(),
        })
        .collect()
}

fn wrap(value: Value) -> Record {
    let mut record = Record::with_capacity(1);
    record.insert(VALUE_PROPERTY.to_string(), value);
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn null_is_unset() {
        assert_eq!(Input::from_value(Value::Null), None);
    }

    #[test]
    fn scalar_classified() {
        assert_eq!(
            Input::from_value(Value::from("x")),
            Some(Input::Scalar(Value::from("x")))
        );
        assert_eq!(
            Input::from_value(Value::Int(0)).map(|i| i.shape()),
            Some("scalar")
        );
    }

    #[test]
    fn flat_array_is_scalars() {
        let input = Input::from_value(json(r#"["a", 1, null]"#)).unwrap();
        assert_eq!(input.shape(), "scalars");
    }

    #[test]
    fn nested_array_is_records() {
        let input = Input::from_value(json(r#"[{"value":"a"}, "b", ["c"]]"#)).unwrap();
        assert_eq!(input.shape(), "records");
        let records = input.into_raw_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["value"], Value::from("a"));
        assert!(records[1].is_empty());
        assert!(records[2].is_empty());
    }

    #[test]
    fn flat_map_is_one_record() {
        let input = Input::from_value(json(r#"{"value":"a","label":"L"}"#)).unwrap();
        assert_eq!(input.shape(), "record");
        assert_eq!(input.into_raw_records().len(), 1);
    }

    #[test]
    fn keyed_map_of_records_is_records() {
        let input =
            Input::from_value(json(r#"{"0":{"value":"a"},"1":{"value":"b"}}"#)).unwrap();
        assert_eq!(input.shape(), "records");
        let records = input.into_raw_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["value"], Value::from("a"));
        assert_eq!(records[1]["value"], Value::from("b"));
    }

    #[test]
    fn scalars_keep_maps_with_value_key() {
        let mut keyed = Record::new();
        keyed.insert("value".to_string(), Value::from("k"));
        keyed.insert("label".to_string(), Value::from("K"));
        let mut unkeyed = Record::new();
        unkeyed.insert("label".to_string(), Value::from("U"));

        let records = Input::Scalars(vec![
            Value::Map(keyed.clone()),
            Value::Map(unkeyed.clone()),
            Value::from("s"),
        ])
        .into_raw_records();

        assert_eq!(records[0], keyed);
        assert_eq!(records[1]["value"], Value::Map(unkeyed));
        assert_eq!(records[2]["value"], Value::from("s"));
    }

    #[test]
    fn empty_array_yields_no_records() {
        let input = Input::from_value(Value::Array(Vec::new())).unwrap();
        assert!(input.into_raw_records().is_empty());
    }
}
