//! Resource model types
//!
//! Wire field names follow the service's camelCase JSON. Attributes this
//! crate does not model are preserved verbatim in [`Resource::attributes`].

use crate::error::{Error, Result};
use crate::types::JsonObject;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Resource Key
// ============================================================================

/// Compound key identifying a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    /// Fingerprint algorithm (e.g. `sha1`)
    pub algorithm: String,
    /// Fingerprint value
    pub fingerprint: String,
}

impl ResourceKey {
    /// Build a key, rejecting blank components
    pub fn new(algorithm: impl Into<String>, fingerprint: impl Into<String>) -> Result<Self> {
        let algorithm = require("algorithm", algorithm.into())?;
        let fingerprint = require("fingerprint", fingerprint.into())?;
        Ok(Self {
            algorithm,
            fingerprint,
        })
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "algorithm={},fingerprint={}",
            self.algorithm, self.fingerprint
        )
    }
}

/// Return the value if it is not blank, otherwise a validation error
pub(crate) fn require(parameter: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        Err(Error::blank(parameter))
    } else {
        Ok(value)
    }
}

// ============================================================================
// Resource State
// ============================================================================

/// Lifecycle state of a stored resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceState {
    /// Available for use
    Active,
    /// Deletion in progress
    Deleting,
    /// Deletion failed; see `Resource::delete_error`
    DeleteFailed,
    /// A state this client does not know about
    Unknown(String),
}

impl ResourceState {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceState::Active => "active",
            ResourceState::Deleting => "deleting",
            ResourceState::DeleteFailed => "deletefailed",
            ResourceState::Unknown(s) => s,
        }
    }
}

impl From<&str> for ResourceState {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "active" => ResourceState::Active,
            "deleting" => ResourceState::Deleting,
            "deletefailed" => ResourceState::DeleteFailed,
            _ => ResourceState::Unknown(s.to_string()),
        }
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResourceState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ResourceState::from(s.as_str()))
    }
}

// ============================================================================
// Resource
// ============================================================================

/// Name/value detail attached to a [`DeleteError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValuePair {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Why the last deletion attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteError {
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub values: Vec<NameValuePair>,
}

/// A stored resource as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "thumbprintAlgorithm", alias = "algorithm")]
    pub algorithm: String,

    #[serde(rename = "thumbprint", alias = "fingerprint")]
    pub fingerprint: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ResourceState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_transition_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<ResourceState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_state_transition_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_data: Option<String>,

    #[serde(
        rename = "deleteCertificateError",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delete_error: Option<DeleteError>,

    /// Everything else the server sent
    #[serde(flatten)]
    pub attributes: JsonObject,
}

impl Resource {
    /// The compound key of this resource
    pub fn key(&self) -> ResourceKey {
        ResourceKey {
            algorithm: self.algorithm.clone(),
            fingerprint: self.fingerprint.clone(),
        }
    }
}

// ============================================================================
// Add Spec
// ============================================================================

/// Encoding of the payload in a [`ResourceAddSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceFormat {
    /// PKCS#12 bundle, password protected
    Pfx,
    /// Base64-encoded public certificate
    Cer,
}

/// Payload required to create a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAddSpec {
    #[serde(rename = "thumbprintAlgorithm")]
    pub algorithm: String,

    #[serde(rename = "thumbprint")]
    pub fingerprint: String,

    /// Base64 payload
    pub data: String,

    #[serde(rename = "certificateFormat", skip_serializing_if = "Option::is_none")]
    pub format: Option<ResourceFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ResourceAddSpec {
    pub fn new(
        algorithm: impl Into<String>,
        fingerprint: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            fingerprint: fingerprint.into(),
            data: data.into(),
            format: None,
            password: None,
        }
    }

    /// Build a spec from raw payload bytes, base64-encoding them
    pub fn from_bytes(
        algorithm: impl Into<String>,
        fingerprint: impl Into<String>,
        payload: &[u8],
    ) -> Self {
        Self::new(algorithm, fingerprint, STANDARD.encode(payload))
    }

    #[must_use]
    pub fn with_format(mut self, format: ResourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Check required fields before anything is sent
    pub fn validate(&self) -> Result<()> {
        require("algorithm", self.algorithm.clone())?;
        require("fingerprint", self.fingerprint.clone())?;
        require("data", self.data.clone())?;

        STANDARD
            .decode(self.data.trim())
            .map_err(|e| Error::validation("data", format!("not valid base64: {e}")))?;

        let has_password = self
            .password
            .as_deref()
            .is_some_and(|p| !p.is_empty());
        match self.format {
            Some(ResourceFormat::Pfx) if !has_password => Err(Error::validation(
                "password",
                "required when format is pfx",
            )),
            Some(ResourceFormat::Cer) if self.password.is_some() => Err(Error::validation(
                "password",
                "must not be set when format is cer",
            )),
            _ => Ok(()),
        }
    }
}
