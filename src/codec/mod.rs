//! Codec module
//!
//! Request/response body serialization behind the [`Codec`] trait.
//! Ships with [`JsonCodec`].

mod json;
mod types;

pub use json::JsonCodec;
pub use types::{from_value, Codec, CodecError, CodecExt};
