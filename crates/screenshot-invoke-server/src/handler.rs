//! `POST /invoke` routing and dispatch

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use screenshot_core::capture::CaptureOrchestrator;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::{
    error::ApiError,
    protocol::{CallToolResponse, ContentItem, InvokeMethod, ListToolsResponse, normalize_params},
    tools::{CAPTURE_TOOL, CaptureArguments, list_tools},
};

/// Shared state of the HTTP layer
#[derive(Clone)]
pub struct AppState {
    /// Runs capture requests
    pub orchestrator: Arc<CaptureOrchestrator>,
}

impl AppState {
    /// Creates the state around an orchestrator
    pub fn new(orchestrator: CaptureOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Builds the application router.
///
/// Only `POST /invoke` is routed; everything else gets axum's defaults.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/invoke", post(invoke))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn invoke(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?;

    match InvokeMethod::from_body(&body).ok_or_else(ApiError::unsupported)? {
        InvokeMethod::ListTools => {
            debug!("listing tools");
            Ok(Json(ListToolsResponse {
                tools: list_tools(),
            })
            .into_response())
        }
        InvokeMethod::CallTool => call_tool(&state, body.get("params")).await,
    }
}

async fn call_tool(state: &AppState, params: Option<&Value>) -> Result<Response, ApiError> {
    let call = normalize_params(params);
    if call.name.as_deref() != Some(CAPTURE_TOOL) {
        return Err(ApiError::unsupported());
    }

    let request = CaptureArguments::from_value(call.arguments)
        .map_err(|e| ApiError::BadRequest(format!("Invalid arguments: {e}")))?
        .into_request()?;

    // Detached: a dropped connection must not stop the sequence mid-fullscreen
    let orchestrator = Arc::clone(&state.orchestrator);
    let artifact = tokio::spawn(async move { orchestrator.capture_artifact(&request).await })
        .await
        .map_err(|e| {
            error!(error = %e, "capture task did not complete");
            ApiError::Internal(format!("Capture task failed: {e}"))
        })?
        .map_err(|e| {
            error!(
                error = %e,
                step = e.step().map(|s| s.as_str()).unwrap_or("encode"),
                hint = e.remediation_hint(),
                "capture request failed"
            );
            ApiError::from(e)
        })?;

    info!(
        path = %artifact.file_path.display(),
        inline = artifact.image_base64.is_some(),
        "capture request served"
    );

    let mut content = vec![ContentItem::text(format!(
        "Screenshot saved to: {}",
        artifact.file_path.display()
    ))];
    if let Some(data) = artifact.image_base64 {
        content.push(ContentItem::base64_image(data));
    }

    Ok(Json(CallToolResponse { content }).into_response())
}
