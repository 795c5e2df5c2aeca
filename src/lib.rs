// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Resource Client
//!
//! A client for remote resource collections (certificate stores and the
//! like) that offers every operation in two call styles.
//!
//! ## Features
//!
//! - **Dual-mode operations**: blocking calls, or callback calls returning a
//!   cancellable [`PendingOperation`]
//! - **Cursor pagination**: lazy iterators and streams that follow
//!   continuation cursors one page at a time
//! - **Typed errors**: validation, serialization, remote and cancellation
//!   failures reported through one [`Error`] type
//! - **Pluggable seams**: swap the [`Transport`](transport::Transport) or
//!   [`Codec`](codec::Codec)
//! - **Key wrap capability**: parameter-checked AES key wrap ciphers over a
//!   caller-supplied crypto provider
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resource_client::{ClientConfig, ListOptions, Result};
//!
//! fn main() -> Result<()> {
//!     let config = ClientConfig::from_file("client.yaml")?;
//!     let client = config.build_client()?;
//!
//!     // One resource
//!     let outcome = client.get("sha1", "94c4f1", None)?;
//!     println!("{:?} (etag {:?})", outcome.body.state, outcome.metadata.etag);
//!
//!     // Every active resource, page by page
//!     let options = ListOptions::new().filter("state eq 'active'");
//!     for resource in client.iter(Some(&options)) {
//!         println!("{}", resource?.fingerprint);
//!     }
//!
//!     // Callback style
//!     let pending = client.delete_async(
//!         "sha1",
//!         "94c4f1",
//!         None,
//!         Some(Box::new(|result: Result<_>| println!("delete finished: {:?}", result.is_ok()))),
//!     )?;
//!     pending.wait()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       ResourceClient                         │
//! │  add / get / delete / cancel_deletion / list / list_next     │
//! │  blocking form ─┐                    ┌─ _async form          │
//! │                 └──── ClientCore ────┘  (PendingOperation)   │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌───────────┬──────────────────┼──────────────┬────────────────┐
//! │   Codec   │    Transport     │  Pagination  │     Crypto     │
//! ├───────────┼──────────────────┼──────────────┼────────────────┤
//! │ JSON      │ reqwest          │ Page/cursor  │ Cipher         │
//! │           │ Retry, backoff   │ Pager        │ KeyWrap        │
//! │           │ Rate limit       │ item_stream  │ Provider       │
//! └───────────┴──────────────────┴──────────────┴────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Request/response transport with retry and rate limiting
pub mod transport;

/// Request and response body codecs
pub mod codec;

/// Resource entities and payloads
pub mod model;

/// Cursor pagination
pub mod pagination;

/// Dual-mode resource client
pub mod client;

/// Cipher capability and key wrap
pub mod crypto;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{
    Completion, GetOptions, ListOptions, OperationOutcome, OperationStatus, PendingOperation,
    RequestOptions, ResourceClient, ResourcePager, ResponseMetadata,
};
pub use config::ClientConfig;
pub use error::{Error, ErrorKind, Result};
pub use model::{Resource, ResourceAddSpec, ResourceKey};
pub use pagination::Page;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
