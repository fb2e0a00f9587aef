//! JSON codec used to turn entities into request bodies and responses back
//! into typed values.
//!
//! The [`Codec`] trait works on [`serde_json::Value`] so that it stays object
//! safe; the typed `encode`/`decode`/`decode_list` helpers on `dyn Codec`
//! bridge to concrete entity types through serde.
//!
//! # Example
//!
//! ```rust
//! use odata_client::odata::{Codec, JsonCodec};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Item {
//!     id: String,
//! }
//!
//! let codec: &dyn Codec = &JsonCodec;
//! let items: Vec<Item> = codec
//!     .decode_list(br#"{"value":[{"Id":"1"},{"Id":"2"}]}"#)
//!     .unwrap();
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[1].id, "2");
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while encoding or decoding payloads.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload is not valid JSON, or does not match the target type.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is not valid UTF-8.
    #[error("Payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The payload is valid JSON with the wrong overall shape.
    #[error("Unexpected payload shape: expected {expected}")]
    UnexpectedShape {
        /// Description of the accepted shape.
        expected: &'static str,
    },
}

/// Serializes request bodies and deserializes response payloads.
pub trait Codec: Send + Sync {
    /// Serializes a JSON value into its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the value cannot be written.
    fn serialize(&self, value: &Value) -> Result<String, CodecError>;

    /// Parses a single object payload.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the payload cannot be parsed.
    fn deserialize(&self, payload: &str) -> Result<Value, CodecError>;

    /// Parses a collection payload into its elements, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the payload cannot be parsed or is not a
    /// collection.
    fn deserialize_list(&self, payload: &str) -> Result<Vec<Value>, CodecError>;
}

impl<'a> dyn Codec + 'a {
    /// Serializes an entity into request body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the entity cannot be serialized.
    pub fn encode<T: Serialize + ?Sized>(&self, entity: &T) -> Result<Vec<u8>, CodecError> {
        let value = serde_json::to_value(entity)?;
        Ok(self.serialize(&value)?.into_bytes())
    }

    /// Decodes a single entity from response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the bytes are not UTF-8, not JSON, or do not
    /// match `T`.
    pub fn decode<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<T, CodecError> {
        let text = std::str::from_utf8(payload)?;
        let value = self.deserialize(text)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Decodes a sequence of entities from response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the payload is not a collection or any
    /// element does not match `T`.
    pub fn decode_list<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<Vec<T>, CodecError> {
        let text = std::str::from_utf8(payload)?;
        self.deserialize_list(text)?
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(CodecError::from))
            .collect()
    }
}

/// The default serde_json codec.
///
/// Collections are accepted either as a bare JSON array or wrapped in the
/// OData envelope `{"value": [...]}`. OData annotations such as
/// `@odata.context` are ignored by the entity types' serde derives.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn serialize(&self, value: &Value) -> Result<String, CodecError> {
        Ok(serde_json::to_string(value)?)
    }

    fn deserialize(&self, payload: &str) -> Result<Value, CodecError> {
        Ok(serde_json::from_str(payload)?)
    }

    fn deserialize_list(&self, payload: &str) -> Result<Vec<Value>, CodecError> {
        match serde_json::from_str(payload)? {
            Value::Array(items) => Ok(items),
            Value::Object(mut envelope) => match envelope.remove("value") {
                Some(Value::Array(items)) => Ok(items),
                _ => Err(CodecError::UnexpectedShape {
                    expected: "an object with a 'value' array",
                }),
            },
            _ => Err(CodecError::UnexpectedShape {
                expected: "a JSON array or an object with a 'value' array",
            }),
        }
    }
}

// Verify CodecError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CodecError>();
    assert_send_sync::<JsonCodec>();
};
