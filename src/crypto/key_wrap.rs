//! AES key wrap (RFC 3394) parameter handling

use super::types::{Cipher, CryptoProvider, Direction, Transform, TransformRequest};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Default initial value from RFC 3394 section 2.2.3.1
pub const DEFAULT_IV: [u8; 8] = [0xA6; 8];

/// Supported key wrap algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyWrapAlgorithm {
    Aes128Kw,
    Aes192Kw,
    Aes256Kw,
}

impl KeyWrapAlgorithm {
    pub const ALL: [KeyWrapAlgorithm; 3] = [
        KeyWrapAlgorithm::Aes128Kw,
        KeyWrapAlgorithm::Aes192Kw,
        KeyWrapAlgorithm::Aes256Kw,
    ];

    /// JWA name
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyWrapAlgorithm::Aes128Kw => "A128KW",
            KeyWrapAlgorithm::Aes192Kw => "A192KW",
            KeyWrapAlgorithm::Aes256Kw => "A256KW",
        }
    }

    /// Required key-encryption-key length in bytes
    pub fn key_len(&self) -> usize {
        match self {
            KeyWrapAlgorithm::Aes128Kw => 16,
            KeyWrapAlgorithm::Aes192Kw => 24,
            KeyWrapAlgorithm::Aes256Kw => 32,
        }
    }
}

impl fmt::Display for KeyWrapAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyWrapAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::crypto(format!("unsupported key wrap algorithm '{s}'")))
    }
}

/// [`Cipher`] for one [`KeyWrapAlgorithm`], backed by a provider
#[derive(Clone)]
pub struct KeyWrapCipher {
    algorithm: KeyWrapAlgorithm,
    provider: Arc<dyn CryptoProvider>,
}

impl KeyWrapCipher {
    pub fn new(algorithm: KeyWrapAlgorithm, provider: Arc<dyn CryptoProvider>) -> Self {
        Self {
            algorithm,
            provider,
        }
    }

    /// Look up the algorithm by JWA name
    pub fn by_name(name: &str, provider: Arc<dyn CryptoProvider>) -> Result<Self> {
        Ok(Self::new(name.parse()?, provider))
    }

    pub fn algorithm(&self) -> KeyWrapAlgorithm {
        self.algorithm
    }

    fn create(&self, direction: Direction, key: &[u8], iv: Option<&[u8]>) -> Result<Box<dyn Transform>> {
        if key.len() != self.algorithm.key_len() {
            return Err(Error::crypto(format!(
                "{} requires a {}-byte key, got {}",
                self.algorithm,
                self.algorithm.key_len(),
                key.len()
            )));
        }

        let iv = iv.unwrap_or(&DEFAULT_IV);
        if iv.len() != DEFAULT_IV.len() {
            return Err(Error::crypto(format!(
                "{} requires an 8-byte IV, got {}",
                self.algorithm,
                iv.len()
            )));
        }

        let request = TransformRequest {
            algorithm: self.algorithm.as_str(),
            direction,
            key,
            iv,
        };
        debug!(
            "creating {} transform via provider '{}'",
            direction,
            self.provider.name()
        );
        self.provider.create(&request)
    }
}

impl Cipher for KeyWrapCipher {
    fn name(&self) -> &str {
        self.algorithm.as_str()
    }

    fn encryptor(&self, key: &[u8], iv: Option<&[u8]>) -> Result<Box<dyn Transform>> {
        self.create(Direction::Encrypt, key, iv)
    }

    fn decryptor(&self, key: &[u8], iv: Option<&[u8]>) -> Result<Box<dyn Transform>> {
        self.create(Direction::Decrypt, key, iv)
    }
}

impl fmt::Debug for KeyWrapCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyWrapCipher")
            .field("algorithm", &self.algorithm)
            .field("provider", &self.provider.name())
            .finish()
    }
}
