//! HTTP API for prompt generation, health checks, and the landing page.

use crate::traits::ModelRunner;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use raffaello_core::{GenerateRequest, GenerateResponse, RunFailure, format_elapsed};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, instrument, warn};

/// API server state.
#[derive(Clone)]
pub struct ApiState {
    /// Runner invoked for each generation request.
    pub runner: Arc<dyn ModelRunner>,
    /// Model used when a request does not name one.
    pub model: String,
    /// Page served at the root route.
    pub index_page: PathBuf,
}

impl ApiState {
    /// Creates a new API state.
    pub fn new(runner: Arc<dyn ModelRunner>, model: String, index_page: PathBuf) -> Self {
        Self {
            runner,
            model,
            index_page,
        }
    }
}

/// Errors a request handler surfaces to the caller.
#[derive(Debug, Clone, derive_more::Display)]
pub enum ApiError {
    /// The request body failed validation.
    #[display("prompt must not be empty")]
    EmptyPrompt,
    /// The run failed; the body carries what the process left behind.
    #[display("Ollama run failed")]
    RunFailed(RunFailure),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::EmptyPrompt => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "prompt must not be empty" })),
            )
                .into_response(),
            ApiError::RunFailed(failure) => {
                (StatusCode::BAD_GATEWAY, Json(failure)).into_response()
            }
        }
    }
}

/// Creates the API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/generate", post(generate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Serves the landing page.
#[instrument(skip_all)]
async fn index(State(state): State<ApiState>) -> Response {
    match tokio::fs::read_to_string(&state.index_page).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            warn!(page = %state.index_page.display(), "Index page not readable: {}", e);
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "index page not found" })),
            )
                .into_response()
        }
    }
}

/// Runs a prompt through the model runner and reports the outcome.
///
/// Successful runs return the captured standard output with timing
/// metadata. A run that exits non-zero, times out, or never launches
/// comes back as 502 with whatever the process left behind.
#[instrument(skip_all)]
async fn generate(
    State(state): State<ApiState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if request.prompt().is_empty() {
        return Err(ApiError::EmptyPrompt);
    }

    let model = request
        .model()
        .clone()
        .unwrap_or_else(|| state.model.clone());

    let started_at = Utc::now();
    let start = Instant::now();
    info!(
        model = %model,
        prompt_chars = request.prompt().len(),
        "Starting run"
    );

    let result = state.runner.run(&model, request.prompt()).await;
    let duration_ms = round_ms(start.elapsed().as_secs_f64() * 1000.0);

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            error!(model = %model, duration_ms, "Run aborted: {}", e);
            return Err(ApiError::RunFailed(RunFailure::aborted()));
        }
    };

    if !output.success() {
        warn!(
            model = %model,
            exit_code = output.exit_code(),
            duration_ms,
            "Run failed"
        );
        return Err(ApiError::RunFailed(RunFailure::from_run(
            output.stderr().clone(),
            *output.exit_code(),
        )));
    }

    info!(
        model = %model,
        duration_ms,
        output_chars = output.stdout().len(),
        "Run complete"
    );

    let response = GenerateResponse::builder()
        .output(output.stdout().clone())
        .model(model)
        .start_time_human(started_at.to_rfc3339())
        .start_time_unix(started_at.timestamp_micros() as f64 / 1_000_000.0)
        .duration_ms(duration_ms)
        .duration_human(format_elapsed(duration_ms))
        .build()
        .expect("Valid GenerateResponse");

    Ok(Json(response))
}

/// Rounds a millisecond measurement to two decimal places.
fn round_ms(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_ms_two_decimals() {
        assert_eq!(round_ms(1234.5678), 1234.57);
        assert_eq!(round_ms(0.004), 0.0);
        assert_eq!(round_ms(99.996), 100.0);
    }
}
