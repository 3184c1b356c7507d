use crate::value_type::ValueType;

/// Errors returned by value-set construction, field lookup, and the payload codec.
#[derive(Debug, thiserror::Error)]
pub enum ValueSetError {
    #[error("invalid value type: {name:?}")]
    InvalidValueType { name: String },
    #[error("unknown field kind: {name:?}")]
    UnknownFieldKind { name: String },
    #[error("payload value type {found} does not match value set type {expected}")]
    ValueTypeMismatch { expected: ValueType, found: ValueType },
    #[error("failed to encode payload: {0}")]
    Encode(String),
    #[error("failed to decode payload: {0}")]
    Decode(String),
}

impl From<rmp_serde::encode::Error> for ValueSetError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        ValueSetError::Encode(err.to_string())
    }
}

impl From<rmp_serde::decode::Error> for ValueSetError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        ValueSetError::Decode(err.to_string())
    }
}
