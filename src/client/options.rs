//! Per-call options
//!
//! Every field is optional; an absent field leaves the server or transport
//! default in place.

use crate::error::{Error, Result};
use crate::transport::RawRequest;
use crate::types::{OptionStringExt, StringMap};
use std::time::Duration;

/// Largest page size a list call may request
pub const MAX_RESULTS_LIMIT: u32 = 1000;

/// Longest `filter` / `select` expression accepted, in bytes
pub const MAX_EXPRESSION_LEN: usize = 4096;

/// Options shared by every operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Call deadline handed to the transport
    pub timeout: Option<Duration>,
    /// Caller-generated id, sent as `client-request-id`
    pub client_request_id: Option<String>,
    /// Ask the server to echo `client-request-id` back
    pub return_client_request_id: bool,
    /// Headers passed through verbatim
    pub extra_headers: StringMap,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn client_request_id(mut self, id: impl Into<String>) -> Self {
        self.client_request_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn return_client_request_id(mut self, value: bool) -> Self {
        self.return_client_request_id = value;
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout == Some(Duration::ZERO) {
            return Err(Error::validation("timeout", "must be greater than zero"));
        }
        if let Some(id) = &self.client_request_id {
            if id.trim().is_empty() {
                return Err(Error::blank("client_request_id"));
            }
        }
        if self.extra_headers.keys().any(|k| k.trim().is_empty()) {
            return Err(Error::validation("extra_headers", "header names must not be empty"));
        }
        Ok(())
    }

    /// Copy timeout and headers onto an outgoing request
    pub(crate) fn apply(&self, mut request: RawRequest) -> RawRequest {
        request.timeout = self.timeout;
        if let Some(id) = &self.client_request_id {
            request = request.header("client-request-id", id.as_str());
        }
        if self.return_client_request_id {
            request = request.header("return-client-request-id", "true");
        }
        for (key, value) in &self.extra_headers {
            request = request.header(key.as_str(), value.as_str());
        }
        request
    }
}

/// Options for `get`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Projection of returned attributes (`$select`)
    pub select: Option<String>,
    pub request: RequestOptions,
}

impl GetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    #[must_use]
    pub fn request(mut self, request: RequestOptions) -> Self {
        self.request = request;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_expression("select", self.select.as_deref())?;
        self.request.validate()
    }
}

/// Options for `list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Server-side selection (`$filter`)
    pub filter: Option<String>,
    /// Projection of returned attributes (`$select`)
    pub select: Option<String>,
    /// Page size cap (`maxresults`)
    pub max_results: Option<u32>,
    pub request: RequestOptions,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    #[must_use]
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    #[must_use]
    pub fn request(mut self, request: RequestOptions) -> Self {
        self.request = request;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_expression("filter", self.filter.as_deref())?;
        check_expression("select", self.select.as_deref())?;
        if let Some(max) = self.max_results {
            if max == 0 || max > MAX_RESULTS_LIMIT {
                return Err(Error::validation(
                    "max_results",
                    format!("must be between 1 and {MAX_RESULTS_LIMIT}, got {max}"),
                ));
            }
        }
        self.request.validate()
    }

    /// Query parameters for the first page; blank expressions are omitted
    pub(crate) fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(filter) = self.filter.clone().none_if_blank() {
            query.push(("$filter".to_string(), filter));
        }
        if let Some(select) = self.select.clone().none_if_blank() {
            query.push(("$select".to_string(), select));
        }
        if let Some(max) = self.max_results {
            query.push(("maxresults".to_string(), max.to_string()));
        }
        query
    }
}

fn check_expression(parameter: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v.len() > MAX_EXPRESSION_LEN => Err(Error::validation(
            parameter,
            format!("longer than {MAX_EXPRESSION_LEN} bytes"),
        )),
        _ => Ok(()),
    }
}
