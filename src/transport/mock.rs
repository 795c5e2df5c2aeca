//! In-memory transport
//!
//! Replays queued responses in order and records every request it receives.
//! Used by the test suites and handy for demos without a live server.

use super::types::{RawRequest, RawResponse, Transport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Scripted {
    Response(RawResponse),
    Failure(TransportError),
}

/// A [`Transport`] that answers from a queue
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RawRequest>>,
    delay: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response by `delay`
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a response
    #[must_use]
    pub fn with_response(self, response: RawResponse) -> Self {
        self.push_response(response);
        self
    }

    /// Queue a transport failure
    #[must_use]
    pub fn with_failure(self, error: TransportError) -> Self {
        self.push_failure(error);
        self
    }

    pub fn push_response(&self, response: RawResponse) {
        lock(&self.script).push_back(Scripted::Response(response));
    }

    pub fn push_failure(&self, error: TransportError) {
        lock(&self.script).push_back(Scripted::Failure(error));
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<RawRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Number of queued answers not yet consumed
    pub fn remaining(&self) -> usize {
        lock(&self.script).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: RawRequest) -> Result<RawResponse, TransportError> {
        lock(&self.requests).push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match lock(&self.script).pop_front() {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::Failure(error)) => Err(error),
            None => Err(TransportError::Other("no scripted response left".to_string())),
        }
    }
}
