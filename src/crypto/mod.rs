//! Crypto module
//!
//! Cipher capability interfaces and AES key wrap parameter handling. The
//! primitives themselves come from a caller-supplied [`CryptoProvider`].

mod key_wrap;
mod types;

pub use key_wrap::{KeyWrapAlgorithm, KeyWrapCipher, DEFAULT_IV};
pub use types::{Cipher, CryptoProvider, Direction, Transform, TransformRequest};
