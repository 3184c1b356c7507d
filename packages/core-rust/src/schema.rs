use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{Record, Value};

/// Name of the property every schema carries.
pub const VALUE_PROPERTY: &str = "value";

/// Ordered property schema of a value set: property name to default value.
///
/// Always contains [`VALUE_PROPERTY`] as its first key. Additional properties
/// keep their supplied order; a repeated name overrides the earlier default
/// without moving its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, String>",
    into = "IndexMap<String, String>"
)]
pub struct PropertySchema {
    defaults: IndexMap<String, String>,
}

impl PropertySchema {
    /// Builds a schema by merging `additional` over `{ value: "" }`.
    pub fn new<I, K, V>(additional: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut defaults = IndexMap::new();
        defaults.insert(VALUE_PROPERTY.to_string(), String::new());
        for (name, default) in additional {
            defaults.insert(name.into(), default.into());
        }
        Self { defaults }
    }

    /// Default value of a property, or `None` if it is not declared.
    #[must_use]
    pub fn default_of(&self, name: &str) -> Option<&str> {
        self.defaults.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    /// Property names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defaults.keys().map(String::as_str)
    }

    /// `(name, default)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defaults.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// Never true: the `value` property is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// Produces a record holding exactly the schema's keys, in schema order.
    ///
    /// Values present in `raw` are copied; absent or null values take the
    /// property default. Undeclared keys in `raw` are dropped.
    #[must_use]
    pub fn format(&self, raw: &Record) -> Record {
        self.defaults
            .iter()
            .map(|(name, default)| {
                let value = match raw.get(name) {
                    Some(v) if !v.is_null() => v.clone(),
                    _ => Value::String(default.clone()),
                };
                (name.clone(), value)
            })
            .collect()
    }

    /// A record holding only defaults.
    #[must_use]
    pub fn default_record(&self) -> Record {
        self.format(&Record::new())
    }
}

impl Default for PropertySchema {
    fn default() -> Self {
        Self::new(std::iter::empty::<(String, String)>())
    }
}

impl From<IndexMap<String, String>> for PropertySchema {
    fn from(map: IndexMap<String, String>) -> Self {
        Self::new(map)
    }
}

impl From<PropertySchema> for IndexMap<String, String> {
    fn from(schema: PropertySchema) -> Self {
        schema.defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn default_schema_has_only_value() {
        let schema = PropertySchema::default();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["value"]);
        assert_eq!(schema.default_of("value"), Some(""));
        assert!(!schema.is_empty());
    }

    #[test]
    fn additional_properties_follow_value_in_order() {
        let schema = PropertySchema::new([("label", "none"), ("color", "red")]);
        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            vec!["value", "label", "color"]
        );
        assert_eq!(schema.default_of("color"), Some("red"));
    }

    #[test]
    fn override_keeps_position() {
        let schema = PropertySchema::new([("label", "a"), ("value", "x"), ("label", "b")]);
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["value", "label"]);
        assert_eq!(schema.default_of("value"), Some("x"));
        assert_eq!(schema.default_of("label"), Some("b"));
    }

    #[test]
    fn format_fills_defaults_and_drops_extra_keys() {
        let schema = PropertySchema::new([("label", "L")]);
        let raw = record(&[("extra", Value::from("1")), ("value", Value::from("a"))]);
        let formatted = schema.format(&raw);
        assert_eq!(
            formatted,
            record(&[("value", Value::from("a")), ("label", Value::from("L"))])
        );
    }

    #[test]
    fn format_treats_null_as_missing() {
        let schema = PropertySchema::new([("label", "L")]);
        let raw = record(&[("value", Value::Null), ("label", Value::Null)]);
        assert_eq!(schema.format(&raw), schema.default_record());
    }

    #[test]
    fn format_keeps_non_string_values() {
        let schema = PropertySchema::default();
        let raw = record(&[("value", Value::Int(7))]);
        assert_eq!(schema.format(&raw)["value"], Value::Int(7));
    }

    #[test]
    fn deserialize_restores_value_property() {
        let schema: PropertySchema = serde_json::from_str(r#"{"label":"x"}"#).unwrap();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["value", "label"]);
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r#"{"value":"","label":"x"}"#);
    }
}
