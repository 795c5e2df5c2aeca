//! Outcome and response metadata types

use crate::transport::RawResponse;
use crate::types::StringMap;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata taken from the response headers of a successful call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseMetadata {
    /// HTTP status code
    pub status: u16,
    /// Server-assigned request id (`request-id`)
    pub request_id: Option<String>,
    /// Echoed caller request id (`client-request-id`)
    pub client_request_id: Option<String>,
    /// Entity tag (`etag`)
    pub etag: Option<String>,
    /// Last modification time (`last-modified`)
    pub last_modified: Option<DateTime<Utc>>,
    /// Identifier of the created or affected entity (`dataserviceid`)
    pub data_service_id: Option<String>,
    /// All response headers, keys lowercased
    #[serde(skip)]
    pub headers: StringMap,
}

impl ResponseMetadata {
    pub fn from_response(response: &RawResponse) -> Self {
        let header = |name: &str| response.header_value(name).map(str::to_string);

        Self {
            status: response.status,
            request_id: header("request-id"),
            client_request_id: header("client-request-id"),
            etag: header("etag"),
            last_modified: response
                .header_value("last-modified")
                .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            data_service_id: header("dataserviceid"),
            headers: response.headers.clone(),
        }
    }
}

/// A successful call: typed body plus response metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationOutcome<T, M = ResponseMetadata> {
    pub body: T,
    pub metadata: M,
}

impl<T, M> OperationOutcome<T, M> {
    pub fn new(body: T, metadata: M) -> Self {
        Self { body, metadata }
    }

    pub fn into_body(self) -> T {
        self.body
    }

    /// Replace the body, keeping the metadata
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationOutcome<U, M> {
        OperationOutcome {
            body: f(self.body),
            metadata: self.metadata,
        }
    }
}
