//! Attribute boundary
//!
//! The orchestrator hands nested blocks over as lists of loosely typed maps.
//! They are decoded into typed blocks here, once, so a wrong type or an
//! unknown key surfaces as [`MapperError::InvalidAttribute`] instead of a
//! failed assertion deep inside a conversion.

use crate::error::{MapperError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode every element of a nested block attribute into `T`
///
/// `attribute` is the attribute name used in error messages
/// (e.g. `listener`); the element index is appended.
pub fn decode_blocks<T: DeserializeOwned>(attribute: &str, raw: &[Value]) -> Result<Vec<T>> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| {
            T::deserialize(value).map_err(|e| MapperError::InvalidAttribute {
                attribute: format!("{}.{}", attribute, index),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Decode a single (at most one) block attribute
pub fn decode_block<T: DeserializeOwned>(attribute: &str, raw: &Value) -> Result<T> {
    T::deserialize(raw).map_err(|e| MapperError::InvalidAttribute {
        attribute: attribute.to_string(),
        reason: e.to_string(),
    })
}

/// Encode typed blocks back into the loosely typed attribute form
pub fn encode_blocks<T: Serialize>(attribute: &str, blocks: &[T]) -> Result<Vec<Value>> {
    blocks
        .iter()
        .map(|block| {
            serde_json::to_value(block).map_err(|e| MapperError::InvalidAttribute {
                attribute: attribute.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
