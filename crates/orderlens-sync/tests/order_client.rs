//! Integration tests for `OrderClient` against a local `wiremock` server.
//!
//! Covers page requests, the session probe, and the error variants a single
//! page fetch can produce.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orderlens_sync::{OrderClient, OrderSource, ProbeOutcome, SyncError};

fn test_client(server: &MockServer, cookie: Option<&str>) -> OrderClient {
    let endpoint = format!("{}/webroutes/user/orders", server.uri());
    OrderClient::new(&endpoint, 5, "orderlens-test/0.1", cookie)
        .expect("failed to build test OrderClient")
}

// ---------------------------------------------------------------------------
// fetch_page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_page_returns_decoded_body() {
    let server = MockServer::start().await;
    let body = json!({ "entities": { "ORDER": { "1": { "totalCost": "₹120" } } } });

    Mock::given(method("GET"))
        .and(path("/webroutes/user/orders"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let result = client.fetch_page(3).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(result.unwrap(), body);
}

#[tokio::test]
async fn fetch_page_sends_session_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webroutes/user/orders"))
        .and(header("cookie", "zat=abc123; PHPSESSID=xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("zat=abc123; PHPSESSID=xyz"));
    let result = client.fetch_page(1).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn fetch_page_non_success_status_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webroutes/user/orders"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let result = client.fetch_page(2).await;

    match result {
        Err(SyncError::UnexpectedStatus { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("page=2"), "unexpected url: {url}");
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_page_html_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webroutes/user/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>Log in</body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let result = client.fetch_page(1).await;

    let err = result.expect_err("expected Deserialize error");
    assert!(matches!(err, SyncError::Deserialize { .. }), "got: {err:?}");
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn fetch_page_connection_refused_is_http_error() {
    // Port 1 is reserved and never has a listener in the test environment.
    let client = OrderClient::new("http://127.0.0.1:1/orders", 5, "orderlens-test/0.1", None)
        .expect("failed to build test OrderClient");

    let result = client.fetch_page(1).await;

    assert!(
        matches!(result, Err(SyncError::Http(_))),
        "expected Http error, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// probe
// ---------------------------------------------------------------------------

#[tokio::test]
async fn probe_success_is_reachable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webroutes/user/orders"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let outcome = OrderSource::probe(&client).await.unwrap();

    assert_eq!(outcome, ProbeOutcome::Reachable { status: 200 });
}

#[tokio::test]
async fn probe_forbidden_is_not_authenticated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webroutes/user/orders"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let outcome = client.probe().await.unwrap();

    assert!(
        matches!(outcome, ProbeOutcome::NotAuthenticated { .. }),
        "expected NotAuthenticated, got: {outcome:?}"
    );
}

#[tokio::test]
async fn probe_redirect_to_login_is_not_authenticated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webroutes/user/orders"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", "/login?next=orders"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let outcome = client.probe().await.unwrap();

    match outcome {
        ProbeOutcome::NotAuthenticated { url } => {
            assert!(url.contains("/login"), "unexpected url: {url}");
        }
        other => panic!("expected NotAuthenticated, got: {other:?}"),
    }
}

#[tokio::test]
async fn probe_redirect_with_login_in_query_is_not_authenticated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webroutes/user/orders"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/auth?next=login"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let outcome = client.probe().await.unwrap();

    match outcome {
        ProbeOutcome::NotAuthenticated { url } => {
            assert!(url.ends_with("/auth?next=login"), "unexpected url: {url}");
        }
        other => panic!("expected NotAuthenticated, got: {other:?}"),
    }
}

#[tokio::test]
async fn probe_server_error_is_still_reachable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webroutes/user/orders"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let outcome = client.probe().await.unwrap();

    assert_eq!(outcome, ProbeOutcome::Reachable { status: 503 });
}
