//! Cipher capability traits
//!
//! The crate implements no cryptographic primitive itself. A
//! [`CryptoProvider`] supplies the actual [`Transform`]s; a [`Cipher`]
//! validates parameters for one algorithm and asks the provider for them.

use crate::error::Result;
use std::fmt;

/// Which way a transform runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encrypt => f.write_str("encrypt"),
            Direction::Decrypt => f.write_str("decrypt"),
        }
    }
}

/// One encrypt or decrypt pass
pub trait Transform: Send + Sync {
    fn transform(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Parameters handed to a [`CryptoProvider`], already validated
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TransformRequest<'a> {
    /// Algorithm name, e.g. `A256KW`
    pub algorithm: &'a str,
    pub direction: Direction,
    pub key: &'a [u8],
    pub iv: &'a [u8],
}

// Key material stays out of logs
impl fmt::Debug for TransformRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRequest")
            .field("algorithm", &self.algorithm)
            .field("direction", &self.direction)
            .field("key_len", &self.key.len())
            .field("iv_len", &self.iv.len())
            .finish()
    }
}

/// Source of concrete transforms
pub trait CryptoProvider: Send + Sync {
    /// Provider name, used in diagnostics
    fn name(&self) -> &str;

    fn create(&self, request: &TransformRequest<'_>) -> Result<Box<dyn Transform>>;
}

/// An algorithm that can produce encrypt and decrypt transforms
pub trait Cipher: Send + Sync {
    /// Algorithm name
    fn name(&self) -> &str;

    /// Transform that encrypts with `key`, using the algorithm's default IV
    /// when `iv` is `None`
    fn encryptor(&self, key: &[u8], iv: Option<&[u8]>) -> Result<Box<dyn Transform>>;

    /// Transform that decrypts with `key`
    fn decryptor(&self, key: &[u8], iv: Option<&[u8]>) -> Result<Box<dyn Transform>>;
}
