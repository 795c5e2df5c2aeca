//! Codec types and traits
//!
//! A codec turns request values into bytes and response bytes back into
//! values. The client never touches a wire format directly.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Codec failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("encode failed ({codec}): {detail}")]
    Encode { codec: String, detail: String },

    #[error("decode failed ({codec}, {len} bytes): {detail}")]
    Decode {
        codec: String,
        len: usize,
        detail: String,
    },
}

/// Serializes request bodies and deserializes response bodies
pub trait Codec: Send + Sync {
    /// Codec name, used in diagnostics
    fn name(&self) -> &str;

    /// MIME type sent as `content-type` / `accept`
    fn content_type(&self) -> &str;

    /// Encode a value into a request body
    fn encode(&self, value: &Value) -> Result<Bytes, CodecError>;

    /// Decode a response body into a value
    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError>;
}

/// Typed helpers over any [`Codec`]
pub trait CodecExt: Codec {
    /// Serialize `value` through the intermediate JSON model and encode it
    fn encode_as<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, CodecError> {
        let value = serde_json::to_value(value).map_err(|e| CodecError::Encode {
            codec: self.name().to_string(),
            detail: e.to_string(),
        })?;
        self.encode(&value)
    }

    /// Decode `bytes` and deserialize into `T`
    fn decode_as<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let value = self.decode(bytes)?;
        from_value(self.name(), bytes.len(), value)
    }
}

impl<C: Codec + ?Sized> CodecExt for C {}

/// Deserialize an already decoded value, reporting failures as decode errors
pub fn from_value<T: DeserializeOwned>(
    codec: &str,
    len: usize,
    value: Value,
) -> Result<T, CodecError> {
    serde_json::from_value(value).map_err(|e| CodecError::Decode {
        codec: codec.to_string(),
        len,
        detail: e.to_string(),
    })
}
