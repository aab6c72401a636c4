/*!
 * HTTP surface of the extractor.
 *
 * A single POST /transcribe route accepting `{"video_id", "language"?}`
 * and answering with the `ExtractionResult` JSON. Failures are in-band:
 * every outcome class comes back as 200 with `success` set accordingly.
 * A /health route is provided for supervisors.
 */

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde::Deserialize;

use crate::app_config::Config;
use crate::caption_extractor::{CaptionExtractor, ExtractionResult};

/// Shared state handed to every request handler
pub struct AppState {
    /// The extractor serving all requests; owns no mutable state
    pub extractor: CaptionExtractor,
}

/// Body of a POST /transcribe request
#[derive(Debug, Clone, Deserialize)]
pub struct TranscribeRequest {
    /// Video identifier, passed through opaquely
    pub video_id: String,

    /// Optional language preference, matched exactly against track codes
    #[serde(default)]
    pub language: Option<String>,
}

/// Build the service router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/transcribe", post(transcribe))
        .route("/health", get(health))
        .with_state(state)
}

/// POST /transcribe
async fn transcribe(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranscribeRequest>,
) -> Json<ExtractionResult> {
    let result = state
        .extractor
        .extract(&request.video_id, request.language.as_deref())
        .await;

    Json(result)
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Run the HTTP service until the process is stopped
pub async fn run_server(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .server
        .socket_addr()
        .parse()
        .context("Invalid server bind address")?;

    let state = Arc::new(AppState {
        extractor: CaptionExtractor::new(config.extraction),
    });
    let app = create_router(state);

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app)
        .await
        .context("HTTP server terminated")?;

    Ok(())
}
