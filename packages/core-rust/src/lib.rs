//! `fieldset` Core — value sets, record normalization, field registry, and payload codec.

pub mod codec;
pub mod error;
pub mod field;
pub mod input;
pub mod schema;
pub mod types;
pub mod value_set;
pub mod value_type;

pub use codec::FieldPayload;
pub use error::ValueSetError;
pub use field::{FieldDefinition, FieldKind, FieldRegistry};
pub use input::Input;
pub use schema::{PropertySchema, VALUE_PROPERTY};
pub use types::{Record, Value};
pub use value_set::ValueSet;
pub use value_type::ValueType;

