//! JSON codec

use super::types::{Codec, CodecError};
use bytes::Bytes;
use serde_json::Value;

/// serde_json-backed [`Codec`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &str {
        "json"
    }

    fn content_type(&self) -> &str {
        "application/json; odata=minimalmetadata"
    }

    fn encode(&self, value: &Value) -> Result<Bytes, CodecError> {
        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(|e| CodecError::Encode {
                codec: self.name().to_string(),
                detail: e.to_string(),
            })
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode {
            codec: self.name().to_string(),
            len: bytes.len(),
            detail: e.to_string(),
        })
    }
}
