//! Integration tests for the WebDriver session and scroll collector using
//! wiremock HTTP mocks.

use std::time::Duration;

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stocksent_scraper::{scroll_and_collect, BrowserSession, ScraperError, ScrollOptions};

const SESSION_ID: &str = "f0e1d2c3";

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client construction should not fail")
}

async fn mount_session_create(server: &MockServer) {
    let body = serde_json::json!({
        "value": { "sessionId": SESSION_ID, "capabilities": {} }
    });
    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn acquire_parses_session_id() {
    let server = MockServer::start().await;
    mount_session_create(&server).await;

    let session = BrowserSession::acquire(&http_client(), &server.uri())
        .await
        .expect("session should be created");
    assert_eq!(session.session_id(), SESSION_ID);
}

#[tokio::test]
async fn acquire_maps_endpoint_failure_to_session_creation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(500).set_body_string("chrome failed to start"))
        .mount(&server)
        .await;

    let err = BrowserSession::acquire(&http_client(), &server.uri())
        .await
        .expect_err("acquire should fail");
    assert!(matches!(err, ScraperError::SessionCreation { .. }));
}

#[tokio::test]
async fn acquire_rejects_response_without_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": {}})))
        .mount(&server)
        .await;

    let err = BrowserSession::acquire(&http_client(), &server.uri())
        .await
        .expect_err("acquire should fail");
    assert!(
        matches!(err, ScraperError::SessionCreation { ref reason } if reason.contains("sessionId"))
    );
}

#[tokio::test]
async fn navigate_posts_url_to_session() {
    let server = MockServer::start().await;
    mount_session_create(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("/session/{SESSION_ID}/url")))
        .and(body_string_contains("stocktwits.com/symbol/TSLA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": null})))
        .expect(1)
        .mount(&server)
        .await;

    let session = BrowserSession::acquire(&http_client(), &server.uri())
        .await
        .unwrap();
    session
        .navigate("https://stocktwits.com/symbol/TSLA")
        .await
        .expect("navigate should succeed");
}

#[tokio::test]
async fn scroll_stops_once_height_stops_growing() {
    let server = MockServer::start().await;
    mount_session_create(&server).await;

    let execute_path = format!("/session/{SESSION_ID}/execute/sync");

    // First height read returns 1000, every later read returns 2000: the
    // loop should scroll twice (growth, then no growth) and stop.
    Mock::given(method("POST"))
        .and(path(execute_path.as_str()))
        .and(body_string_contains("return document.body.scrollHeight"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 1000})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(execute_path.as_str()))
        .and(body_string_contains("return document.body.scrollHeight"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 2000})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(execute_path.as_str()))
        .and(body_string_contains("scrollTo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": null})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/session/{SESSION_ID}/source")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"value": "<html>rendered</html>"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = BrowserSession::acquire(&http_client(), &server.uri())
        .await
        .unwrap();
    let html = scroll_and_collect(
        &session,
        ScrollOptions {
            max_attempts: 15,
            pause: Duration::from_millis(1),
        },
    )
    .await
    .expect("collect should succeed");

    assert_eq!(html, "<html>rendered</html>");
}

#[tokio::test]
async fn scroll_respects_attempt_cap_when_height_keeps_growing() {
    let server = MockServer::start().await;
    mount_session_create(&server).await;

    let execute_path = format!("/session/{SESSION_ID}/execute/sync");
    let mut height = 1000_i64;
    // Heights strictly increase on every read, so only the cap stops the loop.
    for _ in 0..4 {
        Mock::given(method("POST"))
            .and(path(execute_path.as_str()))
            .and(body_string_contains("return document.body.scrollHeight"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": height})),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        height += 500;
    }
    Mock::given(method("POST"))
        .and(path(execute_path.as_str()))
        .and(body_string_contains("scrollTo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": null})))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/session/{SESSION_ID}/source")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": "<html/>"})),
        )
        .mount(&server)
        .await;

    let session = BrowserSession::acquire(&http_client(), &server.uri())
        .await
        .unwrap();
    scroll_and_collect(
        &session,
        ScrollOptions {
            max_attempts: 3,
            pause: Duration::from_millis(1),
        },
    )
    .await
    .expect("collect should succeed");
}

#[tokio::test]
async fn release_tolerates_dead_session() {
    let server = MockServer::start().await;
    mount_session_create(&server).await;

    Mock::given(method("DELETE"))
        .and(path(format!("/session/{SESSION_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_string("invalid session id"))
        .expect(1)
        .mount(&server)
        .await;

    let session = BrowserSession::acquire(&http_client(), &server.uri())
        .await
        .unwrap();
    // Must not panic or error even though the endpoint reports the session gone.
    session.release().await;
}
