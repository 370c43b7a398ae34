use std::sync::Arc;
use std::time::Duration;

use postbrief::clipboard::ClipboardSink;
use postbrief::{
    ClientError, HttpSummarizationClient, Phase, SummarizationClient, SummaryController,
    SummaryOutcome, FAILURE_FALLBACK, FALLBACK_ERROR,
};
use serde_json::json;
use tokio::runtime::Handle;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct NullClipboard;

impl ClipboardSink for NullClipboard {
    fn set_text(&mut self, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

async fn mount_summarize(server: &MockServer, url: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .and(body_json(json!({ "url": url })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// An address nothing is listening on.
async fn dead_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn success_body_yields_summary() {
    let server = MockServer::start().await;
    mount_summarize(
        &server,
        "https://linkedin.com/post/123",
        ResponseTemplate::new(200)
            .set_body_json(json!({ "success": true, "summary": "Short summary." })),
    )
    .await;

    let client = HttpSummarizationClient::new(server.uri());
    let outcome = client
        .summarize("https://linkedin.com/post/123")
        .await
        .expect("summarize ok");
    assert_eq!(outcome, SummaryOutcome::Summary("Short summary.".into()));
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let server = MockServer::start().await;
    mount_summarize(
        &server,
        "https://a.example",
        ResponseTemplate::new(200).set_body_json(json!({ "success": true, "summary": "ok" })),
    )
    .await;

    let client = HttpSummarizationClient::new(format!("{}/", server.uri()));
    assert_eq!(client.base_url(), server.uri());
    assert!(client.summarize("https://a.example").await.is_ok());
}

#[tokio::test]
async fn failure_body_yields_structured_failure() {
    let server = MockServer::start().await;
    mount_summarize(
        &server,
        "bad-url",
        ResponseTemplate::new(200).set_body_json(json!({
            "summary": "",
            "success": false,
            "error": "Invalid LinkedIn URL"
        })),
    )
    .await;

    let client = HttpSummarizationClient::new(server.uri());
    let outcome = client.summarize("bad-url").await.unwrap();
    assert_eq!(
        outcome,
        SummaryOutcome::Failure(Some("Invalid LinkedIn URL".into()))
    );
}

#[tokio::test]
async fn missing_success_flag_counts_as_failure() {
    let server = MockServer::start().await;
    mount_summarize(
        &server,
        "https://a.example",
        ResponseTemplate::new(200).set_body_json(json!({ "error": "Rate limited" })),
    )
    .await;

    let client = HttpSummarizationClient::new(server.uri());
    let outcome = client.summarize("https://a.example").await.unwrap();
    assert_eq!(outcome, SummaryOutcome::Failure(Some("Rate limited".into())));
}

/// Runs one submit against `body` (served with 200) and returns the message shown.
async fn message_for_ok_body(body: serde_json::Value) -> Option<String> {
    let server = MockServer::start().await;
    mount_summarize(
        &server,
        "https://a.example",
        ResponseTemplate::new(200).set_body_json(body),
    )
    .await;

    let client = Arc::new(HttpSummarizationClient::new(server.uri()));
    let mut controller = SummaryController::new(client, Box::new(NullClipboard), Handle::current());
    controller.insert_str("https://a.example");
    assert!(controller.submit());
    controller.next_event().await;
    assert_eq!(controller.request().result(), None);
    controller.request().error_message().map(str::to_string)
}

#[tokio::test]
async fn ok_bodies_without_success_show_service_error_or_fallback() {
    assert_eq!(
        message_for_ok_body(json!({ "error": "Rate limited" })).await.as_deref(),
        Some("Rate limited")
    );
    assert_eq!(
        message_for_ok_body(json!({})).await.as_deref(),
        Some(FAILURE_FALLBACK)
    );
    assert_eq!(
        message_for_ok_body(json!({ "summary": "" })).await.as_deref(),
        Some(FAILURE_FALLBACK)
    );
}

#[tokio::test]
async fn success_without_summary_text_is_a_failure() {
    let server = MockServer::start().await;
    mount_summarize(
        &server,
        "https://a.example",
        ResponseTemplate::new(200).set_body_json(json!({ "success": true })),
    )
    .await;
    mount_summarize(
        &server,
        "https://b.example",
        ResponseTemplate::new(200).set_body_json(json!({ "success": true, "summary": "  " })),
    )
    .await;

    let client = HttpSummarizationClient::new(server.uri());
    for url in ["https://a.example", "https://b.example"] {
        assert_eq!(
            client.summarize(url).await.unwrap(),
            SummaryOutcome::Failure(None)
        );
    }
    assert_eq!(
        message_for_ok_body(json!({ "success": true })).await.as_deref(),
        Some(FAILURE_FALLBACK)
    );
}

#[tokio::test]
async fn failure_body_on_error_status_is_still_structured() {
    let server = MockServer::start().await;
    mount_summarize(
        &server,
        "https://a.example",
        ResponseTemplate::new(400)
            .set_body_json(json!({ "success": false, "error": "No meaningful text" })),
    )
    .await;

    let client = HttpSummarizationClient::new(server.uri());
    let outcome = client.summarize("https://a.example").await.unwrap();
    assert_eq!(outcome, SummaryOutcome::Failure(Some("No meaningful text".into())));
}

#[tokio::test]
async fn error_status_with_detail_is_a_transport_fault() {
    let server = MockServer::start().await;
    mount_summarize(
        &server,
        "https://a.example",
        ResponseTemplate::new(500).set_body_json(json!({ "detail": "Internal server error" })),
    )
    .await;

    let client = HttpSummarizationClient::new(server.uri());
    let err = client.summarize("https://a.example").await.unwrap_err();
    assert_eq!(err.detail(), Some("Internal server error"));
}

#[tokio::test]
async fn unparseable_bodies_are_faults_without_detail() {
    let server = MockServer::start().await;
    mount_summarize(
        &server,
        "https://a.example",
        ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
    )
    .await;
    mount_summarize(
        &server,
        "https://b.example",
        ResponseTemplate::new(502).set_body_string("Bad Gateway"),
    )
    .await;

    let client = HttpSummarizationClient::new(server.uri());
    for url in ["https://a.example", "https://b.example"] {
        let err = client.summarize(url).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { detail: None, .. }));
    }
}

#[tokio::test]
async fn unreachable_service_is_a_fault() {
    let client = HttpSummarizationClient::new(dead_address().await);
    let err = client.summarize("https://a.example").await.unwrap_err();
    assert_eq!(err.detail(), None);
    assert!(client.health().await.is_err());
}

#[tokio::test]
async fn health_reports_reachability() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .mount(&server)
        .await;

    let client = HttpSummarizationClient::new(server.uri());
    assert!(client.health().await.is_ok());
}

#[tokio::test]
async fn slow_health_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let client =
        HttpSummarizationClient::new(server.uri()).with_health_timeout(Duration::from_millis(50));
    assert!(client.health().await.is_err());
}

#[tokio::test]
async fn end_to_end_success_then_reset() {
    let server = MockServer::start().await;
    mount_summarize(
        &server,
        "https://linkedin.com/post/123",
        ResponseTemplate::new(200)
            .set_body_json(json!({ "success": true, "summary": "Short summary." })),
    )
    .await;

    let client = Arc::new(HttpSummarizationClient::new(server.uri()));
    let mut controller = SummaryController::new(client, Box::new(NullClipboard), Handle::current());
    controller.insert_str("https://linkedin.com/post/123");
    assert!(controller.submit());
    controller.next_event().await;

    assert_eq!(controller.request().result(), Some("Short summary."));
    assert!(controller.copy_result());
    assert!(controller.reset());
    assert_eq!(controller.phase(), &Phase::Idle);
}

#[tokio::test]
async fn end_to_end_network_drop_shows_generic_error() {
    let client = Arc::new(HttpSummarizationClient::new(dead_address().await));
    let mut controller = SummaryController::new(client, Box::new(NullClipboard), Handle::current());
    controller.insert_str("https://linkedin.com/post/123");
    assert!(controller.submit());
    controller.next_event().await;

    assert_eq!(
        controller.phase(),
        &Phase::Failed {
            message: FALLBACK_ERROR.into()
        }
    );
}
