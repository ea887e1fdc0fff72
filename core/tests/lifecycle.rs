//! Lifecycle tests for the fetcher factory: action ordering, key
//! correlation, defaults, deferred success and failure paths.

#![allow(clippy::unwrap_used)] // Test code can unwrap

use fetchkit_core::{
    make_fetcher, FetchBody, FetchError, FetchPhase, FetcherConfig, HttpTransport,
    RequestOptions, ResponseType, SuccessDispatch,
};
use fetchkit_testing::{RecordingDispatch, StubTransport};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn friends_config(_success: SuccessDispatch<String>) -> FetcherConfig<String> {
    FetcherConfig::new(|key: &String| format!("/api/{key}/friends/"))
}

#[tokio::test]
async fn success_dispatches_request_then_success_with_key_preserved() {
    let transport = Arc::new(StubTransport::ok_json(json!(["bob", "carol"])));
    let dispatch = Arc::new(RecordingDispatch::new());

    let fetcher = make_fetcher("FETCH_FRIENDS", friends_config).with_transport(transport);
    fetcher.run("alice".to_string(), dispatch.clone()).await;

    let actions = dispatch.actions();
    assert_eq!(actions.len(), 2);

    assert_eq!(actions[0].kind(), "FETCH_FRIENDS_REQUEST");
    assert_eq!(actions[0].key(), "alice");
    assert!(actions[0].result().is_none());

    assert_eq!(actions[1].kind(), "FETCH_FRIENDS_SUCCESS");
    assert_eq!(actions[1].key(), "alice");
    assert_eq!(
        actions[1].result().unwrap().as_json(),
        Some(&json!(["bob", "carol"]))
    );
}

#[tokio::test]
async fn transport_failure_dispatches_request_then_failure() {
    let transport = Arc::new(StubTransport::err("ECONNRESET"));
    let dispatch = Arc::new(RecordingDispatch::new());

    let fetcher = make_fetcher("FETCH_FRIENDS", friends_config).with_transport(transport);
    fetcher.run("alice".to_string(), dispatch.clone()).await;

    let actions = dispatch.actions();
    assert_eq!(
        dispatch.kinds(),
        ["FETCH_FRIENDS_REQUEST", "FETCH_FRIENDS_FAILURE"]
    );
    assert_eq!(actions[1].key(), "alice");
    assert_eq!(
        actions[1].error(),
        Some(&FetchError::Transport("ECONNRESET".to_string()))
    );
    assert!(actions[1].result().is_none());
}

#[tokio::test]
async fn decode_failure_dispatches_failure_with_decode_error() {
    let transport = Arc::new(StubTransport::ok_bytes(&b"not json at all"[..]));
    let dispatch = Arc::new(RecordingDispatch::new());

    let fetcher = make_fetcher("FETCH_FRIENDS", friends_config).with_transport(transport);
    fetcher.run("alice".to_string(), dispatch.clone()).await;

    let actions = dispatch.actions();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[1].phase(), FetchPhase::Failure);
    assert!(matches!(
        actions[1].error(),
        Some(FetchError::Decode(_))
    ));
}

#[tokio::test]
async fn parse_response_transforms_the_decoded_body() {
    let transport = Arc::new(StubTransport::ok_json(json!(["bob", "carol"])));
    let dispatch = Arc::new(RecordingDispatch::new());

    let fetcher = make_fetcher("FETCH_FRIENDS", |_success: SuccessDispatch<String>| {
        FetcherConfig::new(|key: &String| format!("/api/{key}/friends/")).with_parse(|body| {
            let count = body
                .as_json()
                .and_then(serde_json::Value::as_array)
                .map_or(0, Vec::len);
            FetchBody::Json(json!({ "count": count }))
        })
    })
    .with_transport(transport);
    fetcher.run("alice".to_string(), dispatch.clone()).await;

    let actions = dispatch.actions();
    assert_eq!(
        actions[1].result().unwrap().as_json(),
        Some(&json!({ "count": 2 }))
    );
}

#[tokio::test]
async fn deferred_success_suppresses_the_immediate_success_action() {
    let transport = Arc::new(StubTransport::ok_json(json!({ "id": 7 })));
    let dispatch = Arc::new(RecordingDispatch::new());

    let capability: Arc<Mutex<Option<SuccessDispatch<String>>>> = Arc::new(Mutex::new(None));
    let deferred_body: Arc<Mutex<Option<FetchBody>>> = Arc::new(Mutex::new(None));

    let capability_slot = Arc::clone(&capability);
    let body_slot = Arc::clone(&deferred_body);
    let fetcher = make_fetcher("LOAD_PROFILE", move |success: SuccessDispatch<String>| {
        *capability_slot.lock().unwrap() = Some(success);
        let body_slot = Arc::clone(&body_slot);
        FetcherConfig::new(|key: &String| format!("/api/{key}"))
            .with_deferred_success(move |body| {
                *body_slot.lock().unwrap() = Some(body);
            })
    })
    .with_transport(transport);
    fetcher.run("alice".to_string(), dispatch.clone()).await;

    // Only the request action so far; the decoded body went to the deferred
    // path instead of a success dispatch.
    assert_eq!(dispatch.kinds(), ["LOAD_PROFILE_REQUEST"]);
    let decoded = deferred_body.lock().unwrap().take().unwrap();
    assert_eq!(decoded.as_json(), Some(&json!({ "id": 7 })));

    // Invoking the capability later emits the success action with exactly
    // the argument it was given.
    let success = capability.lock().unwrap().take().unwrap();
    success.send(FetchBody::Json(json!({ "id": 7, "enriched": true })));

    let actions = dispatch.actions();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[1].kind(), "LOAD_PROFILE_SUCCESS");
    assert_eq!(actions[1].key(), "alice");
    assert_eq!(
        actions[1].result().unwrap().as_json(),
        Some(&json!({ "id": 7, "enriched": true }))
    );
}

#[tokio::test]
async fn missing_url_fn_is_a_no_op_with_no_network_activity() {
    let transport = Arc::new(StubTransport::ok_json(json!([])));
    let dispatch = Arc::new(RecordingDispatch::new());

    let fetcher = make_fetcher("FETCH_FRIENDS", |_success: SuccessDispatch<String>| {
        FetcherConfig::default()
    })
    .with_transport(Arc::clone(&transport) as Arc<dyn fetchkit_core::Transport>);
    fetcher.run("alice".to_string(), dispatch.clone()).await;

    assert!(dispatch.is_empty());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn empty_prefix_is_a_no_op_with_no_network_activity() {
    let transport = Arc::new(StubTransport::ok_json(json!([])));
    let dispatch = Arc::new(RecordingDispatch::new());

    let fetcher =
        make_fetcher("", friends_config).with_transport(Arc::clone(&transport) as Arc<dyn fetchkit_core::Transport>);
    fetcher.run("alice".to_string(), dispatch.clone()).await;

    assert!(dispatch.is_empty());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn concurrent_invocations_stay_independent() {
    let transport = Arc::new(StubTransport::with_responses([
        Ok(fetchkit_core::TransportResponse {
            status: 200,
            body: serde_json::to_vec(&json!(["bob"])).unwrap().into(),
        }),
        Err(FetchError::Transport("ECONNRESET".to_string())),
    ]));
    let dispatch = Arc::new(RecordingDispatch::new());

    let fetcher = make_fetcher("FETCH_FRIENDS", friends_config).with_transport(transport);
    fetcher.run("alice".to_string(), dispatch.clone()).await;
    fetcher.run("bob".to_string(), dispatch.clone()).await;

    let actions = dispatch.actions();
    assert_eq!(actions.len(), 4);
    // Each invocation carries its own key end to end.
    assert_eq!(actions[0].key(), "alice");
    assert_eq!(actions[1].key(), "alice");
    assert_eq!(actions[1].phase(), FetchPhase::Success);
    assert_eq!(actions[2].key(), "bob");
    assert_eq!(actions[3].key(), "bob");
    assert_eq!(actions[3].phase(), FetchPhase::Failure);
}

#[tokio::test]
async fn text_and_bytes_response_types_decode_accordingly() {
    for (response_type, raw, probe) in [
        (ResponseType::Text, &b"hello"[..], "text"),
        (ResponseType::Bytes, &b"\x01\x02"[..], "bytes"),
    ] {
        let transport = Arc::new(StubTransport::ok_bytes(raw));
        let dispatch = Arc::new(RecordingDispatch::new());

        let fetcher = make_fetcher("LOAD_RAW", move |_success: SuccessDispatch<String>| {
            FetcherConfig::new(|key: &String| format!("/raw/{key}"))
                .with_response_type(response_type)
        })
        .with_transport(transport);
        fetcher.run("k".to_string(), dispatch.clone()).await;

        let actions = dispatch.actions();
        assert_eq!(actions[1].phase(), FetchPhase::Success, "case {probe}");
        match response_type {
            ResponseType::Text => {
                assert_eq!(actions[1].result().unwrap().as_text(), Some("hello"));
            },
            _ => {
                assert_eq!(
                    actions[1].result().unwrap().as_bytes().map(AsRef::as_ref),
                    Some(&b"\x01\x02"[..])
                );
            },
        }
    }
}

#[tokio::test]
async fn http_transport_round_trip_against_a_live_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alice/friends/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["bob", "carol"])))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    let dispatch = Arc::new(RecordingDispatch::new());
    let fetcher = make_fetcher("FETCH_FRIENDS", move |_success: SuccessDispatch<String>| {
        let base = base.clone();
        FetcherConfig::new(move |key: &String| format!("{base}/api/{key}/friends/"))
    })
    .with_transport(Arc::new(HttpTransport::new()));
    fetcher.run("alice".to_string(), dispatch.clone()).await;

    assert_eq!(
        dispatch.kinds(),
        ["FETCH_FRIENDS_REQUEST", "FETCH_FRIENDS_SUCCESS"]
    );
    assert_eq!(
        dispatch.actions()[1].result().unwrap().as_json(),
        Some(&json!(["bob", "carol"]))
    );
}

#[tokio::test]
async fn fetch_options_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/alice"))
        .and(header("x-trace", "test"))
        .and(body_string("payload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    let dispatch = Arc::new(RecordingDispatch::new());
    let fetcher = make_fetcher("SAVE_PROFILE", move |_success: SuccessDispatch<String>| {
        let base = base.clone();
        FetcherConfig::new(move |key: &String| format!("{base}/api/{key}")).with_options(|_key| {
            RequestOptions::get()
                .with_method(fetchkit_core::Method::POST)
                .with_header("x-trace", "test")
                .with_body(&b"payload"[..])
        })
    })
    .with_transport(Arc::new(HttpTransport::new()));
    fetcher.run("alice".to_string(), dispatch.clone()).await;

    assert_eq!(dispatch.kinds(), ["SAVE_PROFILE_REQUEST", "SAVE_PROFILE_SUCCESS"]);
}

#[tokio::test]
async fn http_transport_connection_refused_surfaces_as_failure() {
    let dispatch = Arc::new(RecordingDispatch::new());
    // Reserved discard port with nothing listening.
    let fetcher = make_fetcher("FETCH_FRIENDS", |_success: SuccessDispatch<String>| {
        FetcherConfig::new(|key: &String| format!("http://127.0.0.1:9/api/{key}/friends/"))
    })
    .with_transport(Arc::new(HttpTransport::new()));
    fetcher.run("alice".to_string(), dispatch.clone()).await;

    let actions = dispatch.actions();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[1].phase(), FetchPhase::Failure);
    assert!(matches!(
        actions[1].error(),
        Some(FetchError::Transport(_))
    ));
}
