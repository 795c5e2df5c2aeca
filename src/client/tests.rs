//! Tests for client module

use super::*;
use crate::codec::{Codec, CodecError};
use crate::error::{Error, ErrorKind, RequestContext};
use crate::model::{ResourceAddSpec, ResourceFormat, ResourceState};
use crate::pagination::PageLayout;
use crate::transport::{RawResponse, ScriptedTransport, TransportError};
use crate::types::Method;
use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use test_case::test_case;

const WAIT: Duration = Duration::from_secs(5);

fn client(transport: &Arc<ScriptedTransport>) -> ResourceClient {
    ResourceClient::new(transport.clone()).unwrap()
}

fn resource_json(fingerprint: &str) -> Value {
    json!({
        "thumbprintAlgorithm": "sha1",
        "thumbprint": fingerprint,
        "state": "active",
        "url": format!("https://acct.example/certificates(thumbprintAlgorithm=sha1,thumbprint={fingerprint})")
    })
}

fn page_json(fingerprints: &[&str], next: Option<&str>) -> Value {
    let items: Vec<Value> = fingerprints.iter().map(|f| resource_json(f)).collect();
    match next {
        Some(cursor) => json!({"value": items, "odata.nextLink": cursor}),
        None => json!({"value": items}),
    }
}

fn ok_json(status: u16, body: &Value) -> RawResponse {
    RawResponse::new(status).json(body)
}

/// Completion handler that forwards its result over a channel
fn channel_handler<T: Send + 'static>() -> (Option<Completion<T>>, mpsc::Receiver<crate::Result<T>>) {
    let (tx, rx) = mpsc::channel();
    let handler: Completion<T> = Box::new(move |result| {
        let _ = tx.send(result);
    });
    (Some(handler), rx)
}

fn fingerprints(items: &[crate::model::Resource]) -> Vec<&str> {
    items.iter().map(|r| r.fingerprint.as_str()).collect()
}

// ============================================================================
// Validation
// ============================================================================

#[test_case("", "abc", "algorithm" ; "blank algorithm")]
#[test_case("sha1", "  ", "fingerprint" ; "blank fingerprint")]
fn test_get_rejects_blank_key_without_sending(algorithm: &str, fingerprint: &str, parameter: &str) {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(&transport);

    let err = client.get(algorithm, fingerprint, None).unwrap_err();

    assert_eq!(err, Error::blank(parameter));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_async_validation_error_goes_to_handler() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(&transport);

    let (handler, rx) = channel_handler();
    let pending = client.delete_async("sha1", "", None, handler).unwrap();

    assert_eq!(rx.recv_timeout(WAIT).unwrap().unwrap_err(), Error::blank("fingerprint"));
    assert_eq!(pending.wait().unwrap(), OperationStatus::Completed);
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_missing_handler_is_rejected_immediately() {
    let transport = Arc::new(ScriptedTransport::new().with_response(RawResponse::new(202)));
    let client = client(&transport);

    let err = client.delete_async("sha1", "abc", None, None).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(err, Error::Validation { ref parameter, .. } if parameter == "on_complete"));
    assert_eq!(transport.request_count(), 0);
    assert_eq!(transport.remaining(), 1);
}

#[test]
fn test_add_rejects_invalid_spec() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(&transport);

    let spec = ResourceAddSpec::from_bytes("sha1", "abc", b"pkcs12").with_format(ResourceFormat::Pfx);
    let err = client.add(spec, None).unwrap_err();

    assert_eq!(err, Error::validation("password", "required when format is pfx"));
    assert_eq!(transport.request_count(), 0);
}

#[test_case(ListOptions::new().max_results(0), "max_results" ; "zero page size")]
#[test_case(ListOptions::new().max_results(MAX_RESULTS_LIMIT + 1), "max_results" ; "page size too large")]
#[test_case(ListOptions::new().filter("x".repeat(MAX_EXPRESSION_LEN + 1)), "filter" ; "filter too long")]
#[test_case(ListOptions::new().request(RequestOptions::new().client_request_id(" ")), "client_request_id" ; "blank request id")]
fn test_list_options_validation(options: ListOptions, parameter: &str) {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(&transport);

    let err = client.list(Some(&options)).unwrap_err();

    assert!(matches!(err, Error::Validation { parameter: ref p, .. } if p == parameter));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_blank_cursor_is_rejected() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(&transport);

    assert_eq!(client.list_next(" ", None).unwrap_err(), Error::blank("cursor"));
    assert_eq!(transport.request_count(), 0);
}

struct BrokenCodec;

impl Codec for BrokenCodec {
    fn name(&self) -> &str {
        "broken"
    }

    fn content_type(&self) -> &str {
        "application/broken"
    }

    fn encode(&self, _: &Value) -> std::result::Result<Bytes, CodecError> {
        Err(CodecError::Encode {
            codec: "broken".to_string(),
            detail: "cannot encode".to_string(),
        })
    }

    fn decode(&self, bytes: &[u8]) -> std::result::Result<Value, CodecError> {
        Err(CodecError::Decode {
            codec: "broken".to_string(),
            len: bytes.len(),
            detail: "cannot decode".to_string(),
        })
    }
}

#[test]
fn test_encode_failure_is_serialization_error() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = ResourceClient::builder()
        .transport(transport.clone())
        .codec(Arc::new(BrokenCodec))
        .build()
        .unwrap();

    let err = client
        .add(ResourceAddSpec::from_bytes("sha1", "abc", b"der"), None)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Serialization);
    assert_eq!(transport.request_count(), 0);
}

// ============================================================================
// Wire Mapping
// ============================================================================

#[test]
fn test_add_request_shape() {
    let transport = Arc::new(ScriptedTransport::new().with_response(RawResponse::new(201)));
    let client = ResourceClient::builder()
        .transport(transport.clone())
        .api_version("2024-07-01")
        .build()
        .unwrap();

    let spec = ResourceAddSpec::from_bytes("sha1", "abc", b"der").with_format(ResourceFormat::Cer);
    let outcome = client.add(spec, None).unwrap();
    assert_eq!(outcome.metadata.status, 201);

    let requests = transport.requests();
    let request = &requests[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/certificates");
    assert_eq!(request.query_value("api-version"), Some("2024-07-01"));
    assert_eq!(
        request.headers.get("content-type").map(String::as_str),
        Some("application/json; odata=minimalmetadata")
    );

    let body: Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "thumbprintAlgorithm": "sha1",
            "thumbprint": "abc",
            "data": "ZGVy",
            "certificateFormat": "cer"
        })
    );
}

#[test]
fn test_keyed_paths() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_response(ok_json(200, &resource_json("ab cd")))
            .with_response(RawResponse::new(202))
            .with_response(RawResponse::new(204)),
    );
    let client = client(&transport);

    let get = GetOptions::new().select("thumbprint,state");
    client.get("sha1", "ab cd", Some(&get)).unwrap();
    client.delete("sha1", "ab cd", None).unwrap();
    client.cancel_deletion("sha1", "ab cd", None).unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/certificates(algorithm=sha1,fingerprint=ab%20cd)");
    assert_eq!(requests[0].query_value("$select"), Some("thumbprint,state"));
    assert_eq!(requests[1].method, Method::DELETE);
    assert_eq!(requests[1].path, "/certificates(algorithm=sha1,fingerprint=ab%20cd)");
    assert_eq!(requests[2].method, Method::POST);
    assert_eq!(
        requests[2].path,
        "/certificates(algorithm=sha1,fingerprint=ab%20cd)/canceldelete"
    );
}

#[test]
fn test_key_separators_are_encoded() {
    let transport = Arc::new(ScriptedTransport::new().with_response(RawResponse::new(202)));
    let client = client(&transport);

    client.delete("sha-1", "a,b=(c)+d", None).unwrap();

    assert_eq!(
        transport.requests()[0].path,
        "/certificates(algorithm=sha-1,fingerprint=a%2Cb%3D%28c%29%2Bd)"
    );
}

#[test]
fn test_request_options_are_applied() {
    let transport = Arc::new(ScriptedTransport::new().with_response(ok_json(200, &page_json(&[], None))));
    let client = ResourceClient::builder()
        .transport(transport.clone())
        .collection("/keys/")
        .build()
        .unwrap();

    let options = ListOptions::new()
        .filter("state eq 'active'")
        .select("thumbprint")
        .max_results(50)
        .request(
            RequestOptions::new()
                .timeout(Duration::from_secs(7))
                .client_request_id("req-1")
                .return_client_request_id(true)
                .header("x-trace", "t1"),
        );
    client.list(Some(&options)).unwrap();

    let requests = transport.requests();
    let request = &requests[0];
    assert_eq!(request.path, "/keys");
    assert_eq!(request.query_value("$filter"), Some("state eq 'active'"));
    assert_eq!(request.query_value("$select"), Some("thumbprint"));
    assert_eq!(request.query_value("maxresults"), Some("50"));
    assert_eq!(request.timeout, Some(Duration::from_secs(7)));
    assert_eq!(request.headers.get("client-request-id").map(String::as_str), Some("req-1"));
    assert_eq!(
        request.headers.get("return-client-request-id").map(String::as_str),
        Some("true")
    );
    assert_eq!(request.headers.get("x-trace").map(String::as_str), Some("t1"));
}

#[test]
fn test_list_next_sends_cursor_verbatim() {
    let transport = Arc::new(ScriptedTransport::new().with_response(ok_json(200, &page_json(&["z"], None))));
    let client = ResourceClient::builder()
        .transport(transport.clone())
        .api_version("2024-07-01")
        .build()
        .unwrap();

    let cursor = "https://acct.example/certificates?$skiptoken=abc&api-version=2024-07-01";
    let page = client.list_next(cursor, None).unwrap().into_body();
    assert_eq!(fingerprints(page.items()), vec!["z"]);

    let requests = transport.requests();
    let request = &requests[0];
    assert_eq!(request.path, cursor);
    assert!(request.query.is_empty());
}

// ============================================================================
// Responses and Errors
// ============================================================================

#[test]
fn test_get_decodes_resource_and_metadata() {
    let response = ok_json(200, &resource_json("abc"))
        .header("request-id", "srv-1")
        .header("client-request-id", "req-1")
        .header("ETag", "0x8D")
        .header("Last-Modified", "Tue, 15 Nov 1994 08:12:31 GMT")
        .header("DataServiceId", "https://acct.example/certificates(abc)");
    let transport = Arc::new(ScriptedTransport::new().with_response(response));
    let client = client(&transport);

    let outcome = client.get("sha1", "abc", None).unwrap();

    assert_eq!(outcome.body.fingerprint, "abc");
    assert_eq!(outcome.body.state, Some(ResourceState::Active));
    assert_eq!(outcome.metadata.status, 200);
    assert_eq!(outcome.metadata.request_id.as_deref(), Some("srv-1"));
    assert_eq!(outcome.metadata.client_request_id.as_deref(), Some("req-1"));
    assert_eq!(outcome.metadata.etag.as_deref(), Some("0x8D"));
    assert_eq!(
        outcome.metadata.last_modified.map(|t| t.to_rfc3339()),
        Some("1994-11-15T08:12:31+00:00".to_string())
    );
    assert_eq!(
        outcome.metadata.data_service_id.as_deref(),
        Some("https://acct.example/certificates(abc)")
    );
}

#[test]
fn test_error_status_becomes_remote_error_with_payload() {
    let body = json!({
        "odata.error": {
            "code": "CertificateNotFound",
            "message": {"lang": "en-US", "value": "The specified certificate does not exist."}
        }
    });
    let transport = Arc::new(ScriptedTransport::new().with_response(ok_json(404, &body)));
    let client = client(&transport);

    let err = client.get("sha1", "missing", None).unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.context(),
        Some(&RequestContext::new("GET", "certificates(algorithm=sha1,fingerprint=missing)"))
    );
    match err {
        Error::Remote {
            payload, message, ..
        } => {
            let payload = payload.unwrap();
            assert_eq!(payload.code.as_deref(), Some("CertificateNotFound"));
            assert_eq!(message, "The specified certificate does not exist.");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[test]
fn test_error_without_payload_keeps_raw_text() {
    let transport = Arc::new(
        ScriptedTransport::new().with_response(RawResponse::new(503).body("service unavailable")),
    );
    let client = client(&transport);

    let err = client.delete("sha1", "abc", None).unwrap_err();

    assert_eq!(
        err,
        Error::remote(
            RequestContext::new("DELETE", "certificates(algorithm=sha1,fingerprint=abc)"),
            Some(503),
            None,
            "service unavailable",
        )
    );
    assert!(err.is_retryable());
}

#[test]
fn test_transport_failure_is_remote_without_status() {
    let transport = Arc::new(
        ScriptedTransport::new().with_failure(TransportError::Connect("connection refused".to_string())),
    );
    let client = client(&transport);

    let err = client.list(None).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.status(), None);
    assert_eq!(err.context(), Some(&RequestContext::new("GET", "certificates")));
}

#[test]
fn test_undecodable_body_is_remote_error() {
    let transport = Arc::new(ScriptedTransport::new().with_response(RawResponse::new(200).body("not json")));
    let client = client(&transport);

    let err = client.get("sha1", "abc", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn test_blocking_call_inside_runtime_is_refused() {
    let transport = Arc::new(ScriptedTransport::new().with_response(RawResponse::new(202)));
    let client = client(&transport);

    let err = client.delete("sha1", "abc", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert_eq!(transport.request_count(), 0);
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_iter_follows_cursors_in_order() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_response(ok_json(200, &page_json(&["a", "b"], Some("c1"))))
            .with_response(ok_json(200, &page_json(&["c"], None))),
    );
    let client = client(&transport);

    let options = ListOptions::new().filter("state eq 'active'");
    let items: Vec<_> = client
        .iter(Some(&options))
        .collect::<crate::Result<_>>()
        .unwrap();

    assert_eq!(fingerprints(&items), vec!["a", "b", "c"]);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "/certificates");
    assert_eq!(requests[0].query_value("$filter"), Some("state eq 'active'"));
    assert_eq!(requests[1].path, "c1");
    assert_eq!(requests[1].query_value("$filter"), None);
}

#[test]
fn test_iter_failure_mid_sequence() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_response(ok_json(200, &page_json(&["a", "b"], Some("c1"))))
            .with_response(RawResponse::new(500).body("boom")),
    );
    let client = client(&transport);

    let mut pager = client.iter(None);
    assert_eq!(pager.next().unwrap().unwrap().fingerprint, "a");
    assert_eq!(pager.next().unwrap().unwrap().fingerprint, "b");

    let err = pager.next().unwrap().unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.context(), Some(&RequestContext::new("GET", "c1")));

    assert!(pager.next().is_none());
    assert_eq!(transport.request_count(), 2);
}

#[test]
fn test_iter_empty_first_page() {
    let transport = Arc::new(ScriptedTransport::new().with_response(ok_json(200, &json!({"value": []}))));
    let client = client(&transport);

    assert_eq!(client.iter(None).count(), 0);
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn test_iter_is_lazy() {
    let transport = Arc::new(ScriptedTransport::new().with_response(ok_json(200, &page_json(&["a"], None))));
    let client = client(&transport);

    let pager = client.iter(None);
    assert_eq!(transport.request_count(), 0);
    drop(pager);
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_stream_matches_iter() {
    use futures::StreamExt;

    let transport = Arc::new(
        ScriptedTransport::new()
            .with_response(ok_json(200, &page_json(&["a", "b"], Some("c1"))))
            .with_response(ok_json(200, &page_json(&["c"], None))),
    );
    let client = client(&transport);

    let results: Vec<_> = tokio_test::block_on(client.stream(None).collect::<Vec<_>>());
    let items: Vec<_> = results.into_iter().collect::<crate::Result<_>>().unwrap();

    assert_eq!(fingerprints(&items), vec!["a", "b", "c"]);
    assert_eq!(transport.request_count(), 2);
}

#[test]
fn test_custom_page_layout() {
    let body = json!({"data": {"items": [resource_json("a")]}, "next": null});
    let transport = Arc::new(ScriptedTransport::new().with_response(ok_json(200, &body)));
    let client = ResourceClient::builder()
        .transport(transport.clone())
        .page_layout(PageLayout::new("data.items", "next"))
        .build()
        .unwrap();

    let page = client.list(None).unwrap().into_body();
    assert_eq!(fingerprints(page.items()), vec!["a"]);
    assert!(page.is_last());
}

// ============================================================================
// Dual Mode
// ============================================================================

#[test]
fn test_blocking_and_async_results_match() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_response(ok_json(200, &resource_json("abc")).header("etag", "e1"))
            .with_response(ok_json(200, &resource_json("abc")).header("etag", "e1")),
    );
    let client = client(&transport);

    let blocking = client.get("sha1", "abc", None);

    let (handler, rx) = channel_handler();
    client.get_async("sha1", "abc", None, handler).unwrap();
    let callback = rx.recv_timeout(WAIT).unwrap();

    assert_eq!(blocking, callback);
    assert_eq!(transport.requests()[0], transport.requests()[1]);
}

#[test]
fn test_blocking_and_async_errors_match() {
    let body = json!({"error": {"code": "Conflict", "message": "already exists"}});
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_response(ok_json(409, &body))
            .with_response(ok_json(409, &body)),
    );
    let client = client(&transport);
    let spec = ResourceAddSpec::from_bytes("sha1", "abc", b"der");

    let blocking = client.add(spec.clone(), None).unwrap_err();

    let (handler, rx) = channel_handler();
    client.add_async(spec, None, handler).unwrap();
    let callback = rx.recv_timeout(WAIT).unwrap().unwrap_err();

    assert_eq!(blocking, callback);
    assert_eq!(blocking.status(), Some(409));
}

#[test]
fn test_handler_runs_once_on_worker_thread() {
    let transport = Arc::new(ScriptedTransport::new().with_response(RawResponse::new(204)));
    let client = client(&transport);

    let (tx, rx) = mpsc::channel();
    let handler: Completion<OperationOutcome<()>> = Box::new(move |result| {
        let thread = std::thread::current().name().map(str::to_string);
        let _ = tx.send((thread, result.is_ok()));
    });
    let pending = client
        .cancel_deletion_async("sha1", "abc", None, Some(handler))
        .unwrap();

    let (thread, ok) = rx.recv_timeout(WAIT).unwrap();
    assert_eq!(thread.as_deref(), Some("resource-client"));
    assert!(ok);
    assert_eq!(pending.wait().unwrap(), OperationStatus::Completed);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_list_async_delivers_first_page() {
    let transport = Arc::new(ScriptedTransport::new().with_response(ok_json(200, &page_json(&["a"], Some("c1")))));
    let client = client(&transport);

    let (handler, rx) = channel_handler();
    client.list_async(None, handler).unwrap();

    let page = rx.recv_timeout(WAIT).unwrap().unwrap().into_body();
    assert_eq!(fingerprints(page.items()), vec!["a"]);
    assert_eq!(page.cursor(), Some("c1"));
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_cancel_in_flight_operation() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_delay(Duration::from_secs(30))
            .with_response(ok_json(200, &resource_json("abc"))),
    );
    let client = client(&transport);

    let (handler, rx) = channel_handler();
    let pending = client.get_async("sha1", "abc", None, handler).unwrap();
    assert_eq!(pending.status(), OperationStatus::Pending);

    pending.cancel();

    let err = rx.recv_timeout(WAIT).unwrap().unwrap_err();
    assert_eq!(
        err,
        Error::cancelled(RequestContext::new(
            "GET",
            "certificates(algorithm=sha1,fingerprint=abc)"
        ))
    );
    assert_eq!(pending.wait().unwrap(), OperationStatus::Cancelled);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_cancel_after_completion_has_no_effect() {
    let transport = Arc::new(ScriptedTransport::new().with_response(RawResponse::new(202)));
    let client = client(&transport);

    let (handler, rx) = channel_handler();
    let pending = client.delete_async("sha1", "abc", None, handler).unwrap();
    assert!(rx.recv_timeout(WAIT).unwrap().is_ok());

    let status = pending.wait().unwrap();
    assert_eq!(status, OperationStatus::Completed);
}

#[test]
fn test_dropping_handle_does_not_cancel() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_delay(Duration::from_millis(20))
            .with_response(RawResponse::new(202)),
    );
    let client = client(&transport);

    let (handler, rx) = channel_handler();
    drop(client.delete_async("sha1", "abc", None, handler).unwrap());

    assert!(rx.recv_timeout(WAIT).unwrap().is_ok());
}

#[test]
fn test_operation_outlives_client() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_delay(Duration::from_millis(50))
            .with_response(ok_json(200, &resource_json("abc"))),
    );

    let (handler, rx) = channel_handler();
    let pending = client(&transport)
        .get_async("sha1", "abc", None, handler)
        .unwrap();

    assert_eq!(pending.wait().unwrap(), OperationStatus::Completed);
    let outcome = rx.recv_timeout(WAIT).unwrap().unwrap();
    assert_eq!(outcome.body.fingerprint, "abc");
}

#[test]
fn test_dropped_handle_and_client_still_run_handler() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_delay(Duration::from_millis(50))
            .with_response(RawResponse::new(202)),
    );

    let (handler, rx) = channel_handler();
    drop(
        client(&transport)
            .delete_async("sha1", "abc", None, handler)
            .unwrap(),
    );

    let outcome = rx.recv_timeout(WAIT).unwrap().unwrap();
    assert_eq!(outcome.metadata.status, 202);
}

#[test]
fn test_pager_outlives_client() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_delay(Duration::from_millis(10))
            .with_response(ok_json(200, &page_json(&["a"], Some("next-1"))))
            .with_response(ok_json(200, &page_json(&["b"], None))),
    );

    let pager = client(&transport).iter(None);
    let items: Vec<_> = pager.collect::<crate::Result<_>>().unwrap();

    assert_eq!(fingerprints(&items), vec!["a", "b"]);
    assert_eq!(transport.request_count(), 2);
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_builder_requires_transport() {
    let err = ResourceClient::builder().build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test_case(ResourceClient::builder().collection("  ") ; "blank collection")]
#[test_case(ResourceClient::builder().worker_threads(0) ; "no workers")]
fn test_builder_rejects_bad_settings(builder: ResourceClientBuilder) {
    let transport: Arc<ScriptedTransport> = Arc::new(ScriptedTransport::new());
    let err = builder.transport(transport).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_clones_share_transport() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .with_response(RawResponse::new(202))
            .with_response(RawResponse::new(202)),
    );
    let first = client(&transport);
    let second = first.clone();
    drop(first);

    second.delete("sha1", "a", None).unwrap();
    second.delete("sha1", "b", None).unwrap();
    assert_eq!(transport.request_count(), 2);
    assert_eq!(second.collection(), DEFAULT_COLLECTION);
}
