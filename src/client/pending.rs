//! Handles for in-flight callback operations

use super::dispatch::Executor;
use crate::error::{Error, RequestContext, Result};
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::debug;

/// Completion handler for a callback-style operation.
///
/// Invoked exactly once, on a runtime worker thread, with the same value the
/// blocking form would have returned.
pub type Completion<T> = Box<dyn FnOnce(Result<T>) + Send + 'static>;

/// Lifecycle of a [`PendingOperation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OperationStatus {
    /// Not finished yet; the handler has not run
    Pending = 0,
    /// Finished with a result (success or failure) before any cancel
    Completed = 1,
    /// Cancelled; the handler received a cancellation error
    Cancelled = 2,
}

impl OperationStatus {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => OperationStatus::Completed,
            2 => OperationStatus::Cancelled,
            _ => OperationStatus::Pending,
        }
    }
}

/// An operation running on the client's runtime.
///
/// Dropping the handle does not cancel the operation, and the operation
/// runs to completion even if every client clone is dropped first.
pub struct PendingOperation {
    context: RequestContext,
    cancel: Arc<Notify>,
    status: Arc<AtomicU8>,
    task: JoinHandle<()>,
    executor: Arc<Executor>,
}

impl PendingOperation {
    /// Spawn `call` on the executor's runtime; `on_complete` receives its
    /// result or a cancellation error, whichever comes first.
    pub(crate) fn spawn<T: Send + 'static>(
        executor: &Arc<Executor>,
        context: RequestContext,
        call: BoxFuture<'static, Result<T>>,
        on_complete: Completion<T>,
    ) -> Self {
        let cancel = Arc::new(Notify::new());
        let status = Arc::new(AtomicU8::new(OperationStatus::Pending as u8));

        let task = executor.handle().spawn({
            let cancel = cancel.clone();
            let status = status.clone();
            let context = context.clone();
            let executor = executor.clone();
            async move {
                // Released only after the handler returns
                let _executor = executor;
                let (result, outcome) = tokio::select! {
                    biased;
                    () = cancel.notified() => {
                        debug!("{} cancelled", context);
                        (Err(Error::cancelled(context)), OperationStatus::Cancelled)
                    }
                    result = call => (result, OperationStatus::Completed),
                };
                status.store(outcome as u8, Ordering::SeqCst);
                on_complete(result);
            }
        });

        Self {
            context,
            cancel,
            status,
            task,
            executor: executor.clone(),
        }
    }

    /// Request cancellation.
    ///
    /// Has no effect once the operation finished. Otherwise the in-flight
    /// request is dropped and the handler receives [`Error::Cancelled`].
    pub fn cancel(&self) {
        if !self.is_finished() {
            self.cancel.notify_one();
        }
    }

    pub fn status(&self) -> OperationStatus {
        OperationStatus::from_u8(self.status.load(Ordering::SeqCst))
    }

    /// True once the handler has returned
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Block until the handler has run.
    ///
    /// Fails with [`Error::Runtime`] when called from inside an async runtime.
    pub fn wait(self) -> Result<OperationStatus> {
        if Handle::try_current().is_ok() {
            return Err(Error::runtime(
                "PendingOperation::wait called from inside an async runtime; use finished()",
            ));
        }
        let executor = self.executor.clone();
        Ok(executor.handle().block_on(self.finished()))
    }

    /// Resolve once the handler has run
    pub async fn finished(self) -> OperationStatus {
        if let Err(e) = self.task.await {
            debug!("{} task ended abnormally: {}", self.context, e);
        }
        OperationStatus::from_u8(self.status.load(Ordering::SeqCst))
    }
}

impl std::fmt::Debug for PendingOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingOperation")
            .field("context", &self.context)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
