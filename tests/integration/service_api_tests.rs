/*!
 * HTTP service tests
 *
 * Drive the router directly with tower's oneshot so no listener is bound;
 * the extractor behind it runs against the mock fetcher.
 */

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use ytscribe::app_config::ExtractionConfig;
use ytscribe::caption_extractor::{CaptionExtractor, ExtractionResult};
use ytscribe::service::{create_router, AppState};

use crate::common::fixtures;
use crate::common::mock_fetcher::MockFetcher;

fn router_with(mock: MockFetcher) -> axum::Router {
    let state = Arc::new(AppState {
        extractor: CaptionExtractor::with_fetcher(ExtractionConfig::default(), Arc::new(mock)),
    });
    create_router(state)
}

async fn post_transcribe(app: axum::Router, body: &str) -> (StatusCode, ExtractionResult) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/transcribe")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let result: ExtractionResult = serde_json::from_slice(&bytes).unwrap();
    (status, result)
}

#[tokio::test]
async fn test_health_shouldAnswerOk() {
    let app = router_with(MockFetcher::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "ok");
}

#[tokio::test]
async fn test_transcribe_withCaptionedVideo_shouldReturnTranscript() {
    let body = fixtures::timedtext(&[("0", "1.5", "Hello"), ("1.5", "2", "world")]);
    let mock = MockFetcher::new()
        .with_page(fixtures::WATCH_URL, &fixtures::two_track_page())
        .with_page(fixtures::EN_TRACK_URL, &body);

    let (status, result) =
        post_transcribe(router_with(mock), r#"{"video_id": "abc123"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result.success);
    assert_eq!(result.video_id, "abc123");
    assert_eq!(result.language.as_deref(), Some("en"));
    assert_eq!(result.transcript.len(), 2);
}

#[tokio::test]
async fn test_transcribe_withLanguage_shouldPassItThrough() {
    let body = fixtures::timedtext(&[("0", "1", "hola")]);
    let mock = MockFetcher::new()
        .with_page(fixtures::WATCH_URL, &fixtures::two_track_page())
        .with_page(fixtures::ES_TRACK_URL, &body);

    let (status, result) = post_transcribe(
        router_with(mock),
        r#"{"video_id": "abc123", "language": "es"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(result.success);
    assert_eq!(result.language.as_deref(), Some("es"));
}

#[tokio::test]
async fn test_transcribe_withUncaptionedVideo_shouldReturnInBandFailure() {
    let mock = MockFetcher::new()
        .with_page(fixtures::WATCH_URL, &fixtures::watch_page_without_captions());

    let (status, result) =
        post_transcribe(router_with(mock), r#"{"video_id": "abc123"}"#).await;

    // Failures stay in-band: still 200, success=false with a message
    assert_eq!(status, StatusCode::OK);
    assert!(!result.success);
    assert!(result.error.as_deref().unwrap().contains("No captions data found"));
    assert!(result.transcript.is_empty());
}

#[tokio::test]
async fn test_transcribe_withMissingVideoId_shouldRejectRequest() {
    let app = router_with(MockFetcher::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/transcribe")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"language": "en"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
