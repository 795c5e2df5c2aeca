//! The public client
//!
//! Each operation is offered twice. The blocking form drives the shared
//! async path on the client's own runtime and returns the outcome; the
//! `_async` form spawns the same future and hands its result to a
//! completion handler. Both forms build their future in one place, so
//! their results and errors are identical.

use super::operation::{ClientCore, CoreSettings, Decode, ListSource, Operation};
use super::options::{GetOptions, ListOptions, RequestOptions};
use super::pending::{Completion, PendingOperation};
use super::types::OperationOutcome;
use crate::codec::{Codec, JsonCodec};
use crate::error::{Error, RequestContext, Result};
use crate::model::{Resource, ResourceAddSpec, ResourceKey};
use crate::pagination::{item_stream, Page, PageLayout, Pager};
use crate::transport::Transport;
use futures::future::BoxFuture;
use futures::Stream;
use std::sync::Arc;
use tokio::runtime::{Handle, Runtime};
use tracing::debug;

/// Default number of runtime worker threads
pub const DEFAULT_WORKER_THREADS: usize = 2;

/// Blocking iterator over every resource of a listing
pub type ResourcePager = Pager<Resource>;

/// Owns the runtime; shuts it down without blocking once the last owner
/// goes away, which may happen on one of its own worker threads.
///
/// Clients, pagers and in-flight operations each hold an owner, so work
/// they started keeps running after the client itself is dropped.
pub(crate) struct Executor {
    runtime: Option<Runtime>,
    handle: Handle,
}

impl Executor {
    fn new(worker_threads: usize) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("resource-client")
            .enable_all()
            .build()
            .map_err(|e| Error::runtime(format!("failed to start runtime: {e}")))?;
        let handle = runtime.handle().clone();
        Ok(Self {
            runtime: Some(runtime),
            handle,
        })
    }

    pub(crate) fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Client for a remote resource collection.
///
/// Cheap to clone; clones share the transport, codec and runtime.
#[derive(Clone)]
pub struct ResourceClient {
    core: Arc<ClientCore>,
    executor: Arc<Executor>,
}

impl ResourceClient {
    pub fn builder() -> ResourceClientBuilder {
        ResourceClientBuilder::default()
    }

    /// Client over `transport` with default settings
    pub fn new(transport: Arc<dyn Transport>) -> Result<Self> {
        Self::builder().transport(transport).build()
    }

    pub fn collection(&self) -> &str {
        self.core.collection()
    }

    // ========================================================================
    // add
    // ========================================================================

    /// Create a resource
    pub fn add(
        &self,
        spec: ResourceAddSpec,
        options: Option<&RequestOptions>,
    ) -> Result<OperationOutcome<()>> {
        self.execute(Operation::Add {
            spec,
            options: options.cloned().unwrap_or_default(),
        })
    }

    pub fn add_async(
        &self,
        spec: ResourceAddSpec,
        options: Option<&RequestOptions>,
        on_complete: Option<Completion<OperationOutcome<()>>>,
    ) -> Result<PendingOperation> {
        self.execute_async(
            Operation::Add {
                spec,
                options: options.cloned().unwrap_or_default(),
            },
            on_complete,
        )
    }

    // ========================================================================
    // get
    // ========================================================================

    /// Fetch one resource by key
    pub fn get(
        &self,
        algorithm: &str,
        fingerprint: &str,
        options: Option<&GetOptions>,
    ) -> Result<OperationOutcome<Resource>> {
        self.execute(Operation::Get {
            key: key(algorithm, fingerprint),
            options: options.cloned().unwrap_or_default(),
        })
    }

    pub fn get_async(
        &self,
        algorithm: &str,
        fingerprint: &str,
        options: Option<&GetOptions>,
        on_complete: Option<Completion<OperationOutcome<Resource>>>,
    ) -> Result<PendingOperation> {
        self.execute_async(
            Operation::Get {
                key: key(algorithm, fingerprint),
                options: options.cloned().unwrap_or_default(),
            },
            on_complete,
        )
    }

    // ========================================================================
    // delete
    // ========================================================================

    /// Start deleting a resource; the server completes deletion later
    pub fn delete(
        &self,
        algorithm: &str,
        fingerprint: &str,
        options: Option<&RequestOptions>,
    ) -> Result<OperationOutcome<()>> {
        self.execute(Operation::Delete {
            key: key(algorithm, fingerprint),
            options: options.cloned().unwrap_or_default(),
        })
    }

    pub fn delete_async(
        &self,
        algorithm: &str,
        fingerprint: &str,
        options: Option<&RequestOptions>,
        on_complete: Option<Completion<OperationOutcome<()>>>,
    ) -> Result<PendingOperation> {
        self.execute_async(
            Operation::Delete {
                key: key(algorithm, fingerprint),
                options: options.cloned().unwrap_or_default(),
            },
            on_complete,
        )
    }

    // ========================================================================
    // cancel_deletion
    // ========================================================================

    /// Abort a pending or failed deletion, returning the resource to active
    pub fn cancel_deletion(
        &self,
        algorithm: &str,
        fingerprint: &str,
        options: Option<&RequestOptions>,
    ) -> Result<OperationOutcome<()>> {
        self.execute(Operation::CancelDeletion {
            key: key(algorithm, fingerprint),
            options: options.cloned().unwrap_or_default(),
        })
    }

    pub fn cancel_deletion_async(
        &self,
        algorithm: &str,
        fingerprint: &str,
        options: Option<&RequestOptions>,
        on_complete: Option<Completion<OperationOutcome<()>>>,
    ) -> Result<PendingOperation> {
        self.execute_async(
            Operation::CancelDeletion {
                key: key(algorithm, fingerprint),
                options: options.cloned().unwrap_or_default(),
            },
            on_complete,
        )
    }

    // ========================================================================
    // list / list_next
    // ========================================================================

    /// Fetch the first page of the collection
    pub fn list(&self, options: Option<&ListOptions>) -> Result<OperationOutcome<Page<Resource>>> {
        self.execute(Operation::List {
            options: options.cloned().unwrap_or_default(),
        })
    }

    pub fn list_async(
        &self,
        options: Option<&ListOptions>,
        on_complete: Option<Completion<OperationOutcome<Page<Resource>>>>,
    ) -> Result<PendingOperation> {
        self.execute_async(
            Operation::List {
                options: options.cloned().unwrap_or_default(),
            },
            on_complete,
        )
    }

    /// Fetch the page named by a cursor from a previous page
    pub fn list_next(
        &self,
        cursor: &str,
        options: Option<&RequestOptions>,
    ) -> Result<OperationOutcome<Page<Resource>>> {
        self.execute(Operation::ListNext {
            cursor: cursor.to_string(),
            options: options.cloned().unwrap_or_default(),
        })
    }

    pub fn list_next_async(
        &self,
        cursor: &str,
        options: Option<&RequestOptions>,
        on_complete: Option<Completion<OperationOutcome<Page<Resource>>>>,
    ) -> Result<PendingOperation> {
        self.execute_async(
            Operation::ListNext {
                cursor: cursor.to_string(),
                options: options.cloned().unwrap_or_default(),
            },
            on_complete,
        )
    }

    /// Lazily iterate every resource, following cursors as needed
    pub fn iter(&self, options: Option<&ListOptions>) -> ResourcePager {
        Pager::new(self.list_source(options), self.executor.handle.clone())
            .keep_alive(self.executor.clone())
    }

    /// Async counterpart of [`ResourceClient::iter`], driven by the caller's
    /// runtime
    pub fn stream(
        &self,
        options: Option<&ListOptions>,
    ) -> impl Stream<Item = Result<Resource>> + Send + 'static {
        item_stream(self.list_source(options))
    }

    fn list_source(&self, options: Option<&ListOptions>) -> Arc<ListSource> {
        Arc::new(ListSource::new(
            self.core.clone(),
            options.cloned().unwrap_or_default(),
        ))
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    fn call<T: Decode>(
        &self,
        operation: Operation,
    ) -> (RequestContext, BoxFuture<'static, Result<OperationOutcome<T>>>) {
        let core = self.core.clone();
        let context = core.context(&operation);
        (context, Box::pin(async move { core.run(operation).await }))
    }

    fn execute<T: Decode>(&self, operation: Operation) -> Result<OperationOutcome<T>> {
        if Handle::try_current().is_ok() {
            return Err(Error::runtime(
                "blocking call made from inside an async runtime; use the _async form",
            ));
        }
        let (_, call) = self.call(operation);
        self.executor.handle.block_on(call)
    }

    fn execute_async<T: Decode>(
        &self,
        operation: Operation,
        on_complete: Option<Completion<OperationOutcome<T>>>,
    ) -> Result<PendingOperation> {
        let on_complete = on_complete
            .ok_or_else(|| Error::validation("on_complete", "a completion handler is required"))?;
        let (context, call) = self.call(operation);
        debug!("spawning {}", context);
        Ok(PendingOperation::spawn(
            &self.executor,
            context,
            call,
            on_complete,
        ))
    }
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("collection", &self.collection())
            .finish_non_exhaustive()
    }
}

/// Keys are checked inside the operation so both call styles report the
/// same error
fn key(algorithm: &str, fingerprint: &str) -> ResourceKey {
    ResourceKey {
        algorithm: algorithm.to_string(),
        fingerprint: fingerprint.to_string(),
    }
}

/// Builder for [`ResourceClient`]
pub struct ResourceClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    codec: Arc<dyn Codec>,
    settings: CoreSettings,
    worker_threads: usize,
}

impl Default for ResourceClientBuilder {
    fn default() -> Self {
        Self {
            transport: None,
            codec: Arc::new(JsonCodec),
            settings: CoreSettings::default(),
            worker_threads: DEFAULT_WORKER_THREADS,
        }
    }
}

impl ResourceClientBuilder {
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = codec;
        self
    }

    /// Collection path segment (default `certificates`)
    #[must_use]
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.settings.collection = collection.into();
        self
    }

    /// Value sent as `api-version` on every non-cursor request
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.settings.api_version = Some(version.into());
        self
    }

    #[must_use]
    pub fn page_layout(mut self, layout: PageLayout) -> Self {
        self.settings.page_layout = layout;
        self
    }

    #[must_use]
    pub fn worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    pub fn build(self) -> Result<ResourceClient> {
        let transport = self
            .transport
            .ok_or_else(|| Error::config("a transport is required"))?;

        let collection = self.settings.collection.trim_matches('/').to_string();
        if collection.trim().is_empty() {
            return Err(Error::config("collection must not be empty"));
        }
        if self.worker_threads == 0 {
            return Err(Error::config("worker_threads must be at least 1"));
        }

        let settings = CoreSettings {
            collection,
            ..self.settings
        };

        Ok(ResourceClient {
            core: Arc::new(ClientCore::new(transport, self.codec, settings)),
            executor: Arc::new(Executor::new(self.worker_threads)?),
        })
    }
}
