//! Single async execution path shared by both call styles
//!
//! Every public operation becomes an [`Operation`], which
//! [`ClientCore::run`] turns into one transport exchange and a typed
//! [`OperationOutcome`].

use super::options::{GetOptions, ListOptions, RequestOptions};
use super::types::{OperationOutcome, ResponseMetadata};
use crate::codec::{from_value, Codec, CodecExt};
use crate::error::{Error, ErrorPayload, RequestContext, Result};
use crate::model::{Resource, ResourceAddSpec, ResourceKey};
use crate::pagination::{Page, PageLayout, PageSource};
use crate::transport::{RawRequest, RawResponse, Transport};
use crate::types::Method;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Default collection path segment
pub const DEFAULT_COLLECTION: &str = "certificates";

/// One logical remote operation
#[derive(Debug, Clone)]
pub(crate) enum Operation {
    Add {
        spec: ResourceAddSpec,
        options: RequestOptions,
    },
    Get {
        key: ResourceKey,
        options: GetOptions,
    },
    Delete {
        key: ResourceKey,
        options: RequestOptions,
    },
    CancelDeletion {
        key: ResourceKey,
        options: RequestOptions,
    },
    List {
        options: ListOptions,
    },
    ListNext {
        cursor: String,
        options: RequestOptions,
    },
}

impl Operation {
    fn method(&self) -> Method {
        match self {
            Operation::Add { .. } | Operation::CancelDeletion { .. } => Method::POST,
            Operation::Get { .. } | Operation::List { .. } | Operation::ListNext { .. } => {
                Method::GET
            }
            Operation::Delete { .. } => Method::DELETE,
        }
    }

    fn request_options(&self) -> &RequestOptions {
        match self {
            Operation::Add { options, .. }
            | Operation::Delete { options, .. }
            | Operation::CancelDeletion { options, .. }
            | Operation::ListNext { options, .. } => options,
            Operation::Get { options, .. } => &options.request,
            Operation::List { options } => &options.request,
        }
    }

    /// Argument checks; nothing has been sent when this fails
    fn validate(&self) -> Result<()> {
        match self {
            Operation::Add { spec, options } => {
                spec.validate()?;
                options.validate()
            }
            Operation::Get { key, options } => {
                check_key(key)?;
                options.validate()
            }
            Operation::Delete { key, options } | Operation::CancelDeletion { key, options } => {
                check_key(key)?;
                options.validate()
            }
            Operation::List { options } => options.validate(),
            Operation::ListNext { cursor, options } => {
                if cursor.trim().is_empty() {
                    return Err(Error::blank("cursor"));
                }
                options.validate()
            }
        }
    }
}

fn check_key(key: &ResourceKey) -> Result<()> {
    ResourceKey::new(key.algorithm.as_str(), key.fingerprint.as_str()).map(|_| ())
}

/// Settings fixed at client construction
#[derive(Debug, Clone)]
pub(crate) struct CoreSettings {
    pub collection: String,
    pub api_version: Option<String>,
    pub page_layout: PageLayout,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            api_version: None,
            page_layout: PageLayout::default(),
        }
    }
}

/// Shared state behind every client clone
pub(crate) struct ClientCore {
    transport: Arc<dyn Transport>,
    codec: Arc<dyn Codec>,
    settings: CoreSettings,
}

impl ClientCore {
    pub fn new(transport: Arc<dyn Transport>, codec: Arc<dyn Codec>, settings: CoreSettings) -> Self {
        Self {
            transport,
            codec,
            settings,
        }
    }

    pub fn collection(&self) -> &str {
        &self.settings.collection
    }

    /// Identity of the resource an operation addresses, for diagnostics
    pub fn context(&self, operation: &Operation) -> RequestContext {
        let resource = match operation {
            Operation::Add { .. } | Operation::List { .. } => self.settings.collection.clone(),
            Operation::Get { key, .. }
            | Operation::Delete { key, .. }
            | Operation::CancelDeletion { key, .. } => {
                format!("{}({})", self.settings.collection, key)
            }
            Operation::ListNext { cursor, .. } => cursor.clone(),
        };
        RequestContext::new(operation.method().as_str(), resource)
    }

    /// Validate, send, and decode one operation
    pub async fn run<T: Decode>(&self, operation: Operation) -> Result<OperationOutcome<T>> {
        operation.validate()?;
        let context = self.context(&operation);
        let request = self.build_request(&operation)?;

        debug!("dispatching {} {}", request.method, request.path);
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| Error::remote(context.clone(), None, None, e.to_string()))?;

        if !response.is_success() {
            return Err(self.remote_failure(context, &response));
        }

        let metadata = ResponseMetadata::from_response(&response);
        let body = T::decode(self, &context, &response)?;
        Ok(OperationOutcome::new(body, metadata))
    }

    fn build_request(&self, operation: &Operation) -> Result<RawRequest> {
        let collection = format!("/{}", self.settings.collection);
        let keyed = |key: &ResourceKey| format!("{collection}({})", key_segment(key));

        let mut request = match operation {
            Operation::Add { spec, .. } => {
                let body = self
                    .codec
                    .encode_as(spec)
                    .map_err(|e| Error::serialization(e.to_string()))?;
                RawRequest::new(Method::POST, &collection)
                    .header("content-type", self.codec.content_type())
                    .body(body)
            }
            Operation::Get { key, options } => {
                let mut request = RawRequest::new(Method::GET, keyed(key));
                if let Some(select) = options.select.as_deref().filter(|s| !s.trim().is_empty()) {
                    request = request.query("$select", select);
                }
                request
            }
            Operation::Delete { key, .. } => RawRequest::new(Method::DELETE, keyed(key)),
            Operation::CancelDeletion { key, .. } => {
                RawRequest::new(Method::POST, format!("{}/canceldelete", keyed(key)))
            }
            Operation::List { options } => {
                let mut request = RawRequest::new(Method::GET, &collection);
                for (k, v) in options.query() {
                    request = request.query(k, v);
                }
                request
            }
            // The cursor already names everything the server needs
            Operation::ListNext { cursor, .. } => RawRequest::new(Method::GET, cursor.as_str()),
        };

        if !matches!(operation, Operation::ListNext { .. }) {
            if let Some(version) = &self.settings.api_version {
                request = request.query("api-version", version.as_str());
            }
        }

        request = request.header("accept", self.codec.content_type());
        Ok(operation.request_options().apply(request))
    }

    fn remote_failure(&self, context: RequestContext, response: &RawResponse) -> Error {
        let payload = self
            .codec
            .decode(&response.body)
            .ok()
            .and_then(|body| ErrorPayload::from_json(&body));

        let message = payload
            .as_ref()
            .and_then(|p| p.message.clone())
            .or_else(|| {
                let text = response.text();
                (!text.trim().is_empty()).then_some(text)
            })
            .unwrap_or_else(|| format!("unexpected status {}", response.status));

        Error::remote(context, Some(response.status), payload, message)
    }

    fn decode_failure(context: &RequestContext, response: &RawResponse, detail: impl ToString) -> Error {
        Error::remote(
            context.clone(),
            Some(response.status),
            None,
            format!("undecodable response body: {}", detail.to_string()),
        )
    }
}

/// Turns a successful response into an operation's result type
pub(crate) trait Decode: Sized + Send + 'static {
    fn decode(core: &ClientCore, context: &RequestContext, response: &RawResponse) -> Result<Self>;
}

impl Decode for () {
    fn decode(_: &ClientCore, _: &RequestContext, _: &RawResponse) -> Result<Self> {
        Ok(())
    }
}

impl Decode for Resource {
    fn decode(core: &ClientCore, context: &RequestContext, response: &RawResponse) -> Result<Self> {
        core.codec
            .decode_as(&response.body)
            .map_err(|e| ClientCore::decode_failure(context, response, e))
    }
}

impl Decode for Page<Resource> {
    fn decode(core: &ClientCore, context: &RequestContext, response: &RawResponse) -> Result<Self> {
        let fail = |detail: String| ClientCore::decode_failure(context, response, detail);

        let body = if response.body.is_empty() {
            serde_json::Value::Null
        } else {
            core.codec.decode(&response.body).map_err(|e| fail(e.to_string()))?
        };

        let page = core.settings.page_layout.extract(&body).map_err(fail)?;
        let len = response.body.len();
        page.try_map(|item| from_value(core.codec.name(), len, item))
            .map_err(|e| fail(e.to_string()))
    }
}

/// `algorithm=..,fingerprint=..` with each value percent-encoded
fn key_segment(key: &ResourceKey) -> String {
    format!(
        "algorithm={},fingerprint={}",
        percent_encode(&key.algorithm),
        percent_encode(&key.fingerprint)
    )
}

/// Percent-encode a key value so that the separators of the key segment
/// (`=`, `,`, parentheses) and spaces never appear literally
fn percent_encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect()
}

/// Pages of one `list` call, continued through `list_next`
pub(crate) struct ListSource {
    core: Arc<ClientCore>,
    options: ListOptions,
}

impl ListSource {
    pub fn new(core: Arc<ClientCore>, options: ListOptions) -> Self {
        Self { core, options }
    }
}

#[async_trait]
impl PageSource<Resource> for ListSource {
    async fn first_page(&self) -> Result<Page<Resource>> {
        let operation = Operation::List {
            options: self.options.clone(),
        };
        Ok(self.core.run::<Page<Resource>>(operation).await?.into_body())
    }

    async fn next_page(&self, cursor: &str) -> Result<Page<Resource>> {
        let operation = Operation::ListNext {
            cursor: cursor.to_string(),
            options: self.options.request.clone(),
        };
        Ok(self.core.run::<Page<Resource>>(operation).await?.into_body())
    }
}
