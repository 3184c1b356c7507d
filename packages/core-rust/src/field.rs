//! Field kinds and the registry mapping field names to value-set schemas.
//!
//! Every field definition fixes a [`ValueType`] and a [`PropertySchema`]; the
//! registry hands out fresh [`ValueSet`]s for a field by name.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ValueSetError;
use crate::schema::PropertySchema;
use crate::value_set::ValueSet;
use crate::value_type::ValueType;

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Built-in field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Checkbox,
    Color,
    Html,
    Radio,
    RadioImage,
    Select,
    Set,
    Text,
}

impl FieldKind {
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Checkbox,
        FieldKind::Color,
        FieldKind::Html,
        FieldKind::Radio,
        FieldKind::RadioImage,
        FieldKind::Select,
        FieldKind::Set,
        FieldKind::Text,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Checkbox => "checkbox",
            FieldKind::Color => "color",
            FieldKind::Html => "html",
            FieldKind::Radio => "radio",
            FieldKind::RadioImage => "radio_image",
            FieldKind::Select => "select",
            FieldKind::Set => "set",
            FieldKind::Text => "text",
        }
    }

    /// `set` picks any number of options; every other kind holds one value.
    #[must_use]
    pub fn value_type(self) -> ValueType {
        match self {
            FieldKind::Set => ValueType::MultipleValues,
            _ => ValueType::SingleValue,
        }
    }

    #[must_use]
    pub fn definition(self) -> FieldDefinition {
        FieldDefinition::new(self.as_str(), self.value_type(), PropertySchema::default())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = ValueSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ValueSetError::UnknownFieldKind {
                name: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// FieldDefinition
// ---------------------------------------------------------------------------

/// Name, value type, and property schema of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub value_type: ValueType,
    #[serde(default)]
    pub properties: PropertySchema,
}

impl FieldDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType, properties: PropertySchema) -> Self {
        Self {
            name: name.into(),
            value_type,
            properties,
        }
    }

    /// A fresh, unset value set for this field.
    #[must_use]
    pub fn value_set(&self) -> ValueSet {
        ValueSet::with_schema(self.value_type, self.properties.clone())
    }
}

// ---------------------------------------------------------------------------
// FieldRegistry
// ---------------------------------------------------------------------------

/// Registry of field definitions, keyed by name.
///
/// Iteration follows registration order. Registering an existing name replaces
/// its definition in place.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    definitions: IndexMap<String, FieldDefinition>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every [`FieldKind`].
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for kind in FieldKind::ALL {
            registry.register(kind.definition());
        }
        registry
    }

    /// Registers a definition, returning the one it replaced.
    pub fn register(&mut self, definition: FieldDefinition) -> Option<FieldDefinition> {
        let replaced = self
            .definitions
            .insert(definition.name.clone(), definition);
        if let Some(ref old) = replaced {
            warn!(field = %old.name, "field definition replaced");
        }
        replaced
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.definitions.get(name)
    }

    /// Looks up a field and creates an unset value set for it.
    ///
    /// # Errors
    ///
    /// Returns [`ValueSetError::UnknownFieldKind`] if no field is registered
    /// under `name`.
    pub fn value_set(&self, name: &str) -> Result<ValueSet, ValueSetError> {
        self.get(name)
            .map(FieldDefinition::value_set)
            .ok_or_else(|| ValueSetError::UnknownFieldKind {
                name: name.to_string(),
            })
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn kind_names_round_trip() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.as_str().parse::<FieldKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_fails() {
        let err = "textarea".parse::<FieldKind>().unwrap_err();
        assert!(matches!(err, ValueSetError::UnknownFieldKind { ref name } if name == "textarea"));
    }

    #[test]
    fn only_set_holds_multiple_values() {
        for kind in FieldKind::ALL {
            let expected = if kind == FieldKind::Set {
                ValueType::MultipleValues
            } else {
                ValueType::SingleValue
            };
            assert_eq!(kind.value_type(), expected, "{kind}");
        }
    }

    #[test]
    fn builtins_registered_in_order() {
        let registry = FieldRegistry::with_builtins();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec![
                "checkbox",
                "color",
                "html",
                "radio",
                "radio_image",
                "select",
                "set",
                "text"
            ]
        );
    }

    #[test]
    fn value_set_for_registered_field() {
        let registry = FieldRegistry::with_builtins();
        let mut set = registry.value_set("set").unwrap();
        assert!(set.requires_keepalive_key());
        set.set("one");
        assert_eq!(set.get(), Some(Value::Array(vec![Value::from("one")])));
    }

    #[test]
    fn value_set_for_unknown_field_fails() {
        let registry = FieldRegistry::with_builtins();
        assert!(matches!(
            registry.value_set("map"),
            Err(ValueSetError::UnknownFieldKind { .. })
        ));
    }

    #[test]
    fn custom_definition_registers_and_replaces() {
        let mut registry = FieldRegistry::with_builtins();
        let association = FieldDefinition::new(
            "association",
            ValueType::ValueSet,
            PropertySchema::new([("type", ""), ("subtype", ""), ("id", "")]),
        );
        assert!(registry.register(association.clone()).is_none());
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.get("association"), Some(&association));

        let replacement = FieldDefinition::new(
            "text",
            ValueType::MultipleProperties,
            PropertySchema::default(),
        );
        let old = registry.register(replacement).unwrap();
        assert_eq!(old.value_type, ValueType::SingleValue);
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.names().last(), Some("association"));
    }

    #[test]
    fn definition_deserializes_with_default_schema() {
        let def: FieldDefinition =
            serde_json::from_str(r#"{"name":"tags","value_type":"multiple_values"}"#).unwrap();
        assert_eq!(def.value_type, ValueType::MultipleValues);
        assert_eq!(def.properties, PropertySchema::default());
    }
}
