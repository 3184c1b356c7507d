//! Payload exchanged with the persistence layer.
//!
//! A [`FieldPayload`] carries the canonical record sequence of a value set
//! together with its value type and keepalive flag. `MsgPack` output uses
//! `rmp_serde::to_vec_named()` so records keep their property names.

use serde::{Deserialize, Serialize};

use crate::error::ValueSetError;
use crate::types::Record;
use crate::value_set::ValueSet;
use crate::value_type::ValueType;

/// Serialized form of a [`ValueSet`].
///
/// `records` is `None` for an unset value set and `Some(vec![])` for one that
/// was deliberately emptied. `keepalive` tells the storage layer to emit its
/// marker key so the empty case survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPayload {
    pub value_type: ValueType,
    pub keepalive: bool,
    pub records: Option<Vec<Record>>,
}

impl FieldPayload {
    /// # Errors
    ///
    /// Returns [`ValueSetError::Encode`] if serialization fails.
    pub fn to_msgpack(&self) -> Result<Vec<u8>, ValueSetError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    /// # Errors
    ///
    /// Returns [`ValueSetError::Decode`] if `bytes` is not a valid payload.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, ValueSetError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }

    /// # Errors
    ///
    /// Returns [`ValueSetError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ValueSetError> {
        serde_json::to_string(self).map_err(|e| ValueSetError::Encode(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`ValueSetError::Decode`] if `json` is not a valid payload.
    pub fn from_json(json: &str) -> Result<Self, ValueSetError> {
        serde_json::from_str(json).map_err(|e| ValueSetError::Decode(e.to_string()))
    }
}

impl ValueSet {
    #[must_use]
    pub fn to_payload(&self) -> FieldPayload {
        FieldPayload {
            value_type: self.value_type(),
            keepalive: self.requires_keepalive_key(),
            records: self.records().map(<[Record]>::to_vec),
        }
    }

    /// Replaces the records with those of `payload`, normalized against this
    /// value set's schema.
    ///
    /// # Errors
    ///
    /// Returns [`ValueSetError::ValueTypeMismatch`] if the payload was written
    /// for a different value type. The value set is left unchanged.
    pub fn load_payload(&mut self, payload: FieldPayload) -> Result<(), ValueSetError> {
        if payload.value_type != self.value_type() {
            return Err(ValueSetError::ValueTypeMismatch {
                expected: self.value_type(),
                found: payload.value_type,
            });
        }
        match payload.records {
            Some(records) => self.set_input(records.into()),
            None => self.clear(),
        }
        Ok(())
    }
}
