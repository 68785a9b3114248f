//! HTTP surface tests: routes, status bodies, problem responses.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use smoke_runner::http::HttpServer;
use smoke_runner::lifecycle::Shutdown;
use smoke_runner::paths::StaticPathSource;

mod common;

use common::RecordingNotifier;

fn server(notifier: RecordingNotifier) -> HttpServer {
    let config = common::test_config(20);
    let paths = StaticPathSource::new().with_dataset("api-v3", ["/v3/a", "/v3/b"]);
    let orchestrator = Arc::new(common::orchestrator(&config, paths, notifier));
    HttpServer::with_orchestrator(config, orchestrator)
}

async fn call(server: &HttpServer, method: Method, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = server
        .router()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let server = server(RecordingNotifier::default());
    let (status, _, body) = call(&server, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_missing_parameters_is_a_problem() {
    let notifier = RecordingNotifier::default();
    let server = server(notifier.clone());

    let (status, content_type, body) =
        call(&server, Method::GET, "/smoke-test?HOST=example.com&PROTO=http").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["title"], "Missing Parameters");
    assert_eq!(body["status"], 400);
    assert_eq!(notifier.events().len(), 1);
}

#[tokio::test]
async fn test_invalid_duration_and_service() {
    let server = server(RecordingNotifier::default());

    let (status, _, body) = call(
        &server,
        Method::POST,
        "/smoke-test?HOST=127.0.0.1&PROTO=http&PORT=1&DURATION=notaduration",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Invalid Duration");

    let (status, _, body) = call(
        &server,
        Method::GET,
        "/generate-load?HOST=127.0.0.1&PROTO=http&PORT=1&DURATION=1s&SERVICE=nope",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Invalid service");
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Can't find url file:"));
}

#[tokio::test]
async fn test_accept_then_debounce_across_aliases() {
    let backend = common::start_fixed_backend(200).await;
    let server = server(RecordingNotifier::default());
    let query = format!(
        "HOST=127.0.0.1&PROTO=http&PORT={}&DURATION=500ms&THREADS=2",
        backend.port()
    );

    let (status, _, body) = call(&server, Method::GET, &format!("/smoke-test?{}", query)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "ok"}));

    let (status, _, body) =
        call(&server, Method::POST, &format!("/generate-load?{}", query)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["status"],
        format!("already running against http://127.0.0.1:{}", backend.port())
    );
}

#[tokio::test]
async fn test_server_serves_until_shutdown() {
    let server = server(RecordingNotifier::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let task = tokio::spawn(server.run(listener, shutdown.clone()));

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();
    let res = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .expect("runner unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}
