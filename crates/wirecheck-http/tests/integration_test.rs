//! Adapter and runner tests against in-process Axum servers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use wirecheck_core::{check, Method, RequestDescriptor, ResponseBody, ScenarioState};
use wirecheck_http::{CheckStep, Client, HarnessConfig, RequestStep, Scenario, StepError};

async fn json_item() -> impl IntoResponse {
    Json(serde_json::json!({ "title": "Walk the dog", "completed": false }))
}

async fn plain_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

async fn server_error() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn custom_header() -> impl IntoResponse {
    ([("X-Request-Id", "abc-123")], "ok")
}

async fn slow() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_millis(500)).await;
    "late"
}

async fn counted(State(counter): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    counter.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT
}

/// Start a test server and return its address
async fn start_test_server(counter: Arc<AtomicUsize>) -> SocketAddr {
    let app = Router::new()
        .route("/item", get(json_item))
        .route("/missing", get(plain_not_found))
        .route("/broken", get(server_error))
        .route("/headers", get(custom_header))
        .route("/slow", get(slow))
        .route("/counted", get(counted))
        .with_state(counter);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(Duration::from_millis(10)).await;

    addr
}

fn test_client() -> Client {
    Client::from_config(&HarnessConfig::default()).unwrap()
}

fn get_descriptor(addr: SocketAddr, path: &str) -> RequestDescriptor {
    RequestDescriptor::builder(Method::Get, format!("http://{}{}", addr, path)).build()
}

#[tokio::test]
async fn test_json_body_is_parsed() {
    let addr = start_test_server(Arc::default()).await;
    let envelope = test_client()
        .send(&get_descriptor(addr, "/item"))
        .await
        .unwrap();

    assert_eq!(envelope.status(), 200);
    assert_eq!(
        envelope.body().as_json(),
        Some(&serde_json::json!({ "title": "Walk the dog", "completed": false }))
    );
}

#[tokio::test]
async fn test_non_json_body_kept_raw() {
    let addr = start_test_server(Arc::default()).await;
    let envelope = test_client()
        .send(&get_descriptor(addr, "/missing"))
        .await
        .unwrap();

    assert_eq!(envelope.status(), 404);
    assert_eq!(envelope.body(), &ResponseBody::Raw(b"Not Found".to_vec()));
}

#[tokio::test]
async fn test_error_status_resolves_not_rejects() {
    let addr = start_test_server(Arc::default()).await;
    let envelope = test_client()
        .send(&get_descriptor(addr, "/broken"))
        .await
        .unwrap();

    assert_eq!(envelope.status(), 500);
}

#[tokio::test]
async fn test_header_names_are_lowercased() {
    let addr = start_test_server(Arc::default()).await;
    let envelope = test_client()
        .send(&get_descriptor(addr, "/headers"))
        .await
        .unwrap();

    assert_eq!(envelope.header("x-request-id"), Some("abc-123"));
    assert_eq!(envelope.header("X-Request-Id"), Some("abc-123"));
    assert!(envelope.headers().contains_key("x-request-id"));
    assert!(!envelope.headers().contains_key("X-Request-Id"));
}

#[tokio::test]
async fn test_send_issues_exactly_one_call() {
    let counter = Arc::new(AtomicUsize::new(0));
    let addr = start_test_server(counter.clone()).await;

    let envelope = test_client()
        .send(&get_descriptor(addr, "/counted"))
        .await
        .unwrap();

    assert_eq!(envelope.status(), 204);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    let addr = start_test_server(Arc::default()).await;
    let config = HarnessConfig::default().with_timeout(Duration::from_millis(50));
    let client = Client::from_config(&config).unwrap();

    let result = client.send(&get_descriptor(addr, "/slow")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_unroutable_address_is_a_transport_error() {
    let client = test_client();
    let descriptor = RequestDescriptor::builder(Method::Get, "http://127.0.0.1:1/item").build();

    assert!(client.send(&descriptor).await.is_err());
}

#[tokio::test]
async fn test_scenario_passes_and_reports_steps() {
    let addr = start_test_server(Arc::default()).await;
    let client = test_client();

    let report = Scenario::new("fetch item")
        .step(RequestStep::new("get item", move |_cx| {
            Ok(get_descriptor(addr, "/item"))
        }))
        .step(CheckStep::new("ok status", |envelope| {
            check::expect_status(envelope, 200)
        }))
        .step(CheckStep::new("title present", |envelope| {
            check::expect_body_field(envelope, "/title", &serde_json::json!("Walk the dog"))
        }))
        .run(&client)
        .await;

    assert!(report.is_passed(), "{report}");
    assert_eq!(report.state, ScenarioState::Passed);
    assert_eq!(report.steps_completed, 3);
    assert!(report.failure.is_none());
}

#[tokio::test]
async fn test_failed_check_names_step_and_values() {
    let addr = start_test_server(Arc::default()).await;
    let client = test_client();

    let report = Scenario::new("expect created")
        .step(RequestStep::new("get item", move |_cx| {
            Ok(get_descriptor(addr, "/item"))
        }))
        .step(CheckStep::new("created status", |envelope| {
            check::expect_status(envelope, 201)
        }))
        .run(&client)
        .await;

    assert_eq!(report.state, ScenarioState::Failed);
    assert_eq!(report.steps_completed, 1);

    let failure = report.failure.expect("failure recorded");
    assert_eq!(failure.step, "created status");
    assert!(!failure.error.is_transport());
    assert_eq!(
        failure.error.to_string(),
        "assertion failed: status mismatch: expected 201, got 200"
    );
}

#[tokio::test]
async fn test_transport_failure_fails_scenario_distinctly() {
    let client = test_client();

    let report = Scenario::new("unreachable server")
        .step(RequestStep::new("get item", |_cx| {
            Ok(RequestDescriptor::builder(Method::Get, "http://127.0.0.1:1/item").build())
        }))
        .run(&client)
        .await;

    assert_eq!(report.state, ScenarioState::Failed);
    let failure = report.failure.expect("failure recorded");
    assert_eq!(failure.step, "get item");
    assert!(failure.error.is_transport());
}

#[tokio::test]
async fn test_check_before_any_request_fails() {
    let client = test_client();

    let report = Scenario::new("check first")
        .step(CheckStep::new("premature check", |envelope| {
            check::expect_status(envelope, 200)
        }))
        .run(&client)
        .await;

    let failure = report.failure.expect("failure recorded");
    assert!(matches!(failure.error, StepError::NoResponse));
}

#[tokio::test]
async fn test_step_needing_location_without_capture_fails() {
    let addr = start_test_server(Arc::default()).await;
    let client = test_client();

    let report = Scenario::new("missing location")
        .step(RequestStep::new("get item", move |_cx| {
            Ok(get_descriptor(addr, "/item"))
        }))
        .step(RequestStep::new("follow location", |cx| {
            Ok(RequestDescriptor::builder(Method::Get, cx.location()?).build())
        }))
        .run(&client)
        .await;

    assert_eq!(report.steps_completed, 1);
    let failure = report.failure.expect("failure recorded");
    assert_eq!(failure.step, "follow location");
    assert!(matches!(failure.error, StepError::MissingLocation));
}
