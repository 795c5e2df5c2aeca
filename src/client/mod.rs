//! Client module
//!
//! Dual-mode operations over a remote resource collection.
//!
//! # Overview
//!
//! [`ResourceClient`] exposes `add`, `get`, `delete`, `cancel_deletion`,
//! `list` and `list_next`, each as a blocking call returning an
//! [`OperationOutcome`] and as an `_async` call that reports through a
//! [`Completion`] handler and returns a cancellable [`PendingOperation`].
//!
//! ```no_run
//! use resource_client::client::ResourceClient;
//! use resource_client::transport::{HttpTransport, HttpTransportConfig};
//! use std::sync::Arc;
//!
//! # fn main() -> resource_client::Result<()> {
//! let transport = HttpTransport::new(HttpTransportConfig::builder("https://acct.example").build())?;
//! let client = ResourceClient::new(Arc::new(transport))?;
//!
//! for resource in client.iter(None) {
//!     println!("{}", resource?.fingerprint);
//! }
//! # Ok(())
//! # }
//! ```

mod operation;
mod dispatch;
mod options;
mod pending;
mod types;

pub use operation::DEFAULT_COLLECTION;
pub use dispatch::{ResourceClient, ResourceClientBuilder, ResourcePager, DEFAULT_WORKER_THREADS};
pub use options::{GetOptions, ListOptions, RequestOptions, MAX_EXPRESSION_LEN, MAX_RESULTS_LIMIT};
pub use pending::{Completion, OperationStatus, PendingOperation};
pub use types::{OperationOutcome, ResponseMetadata};

#[cfg(test)]
mod tests;
