//! End-to-end tests for the HTTP API, exercised over fake runners.

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use raffaello_core::{RunOutput, format_elapsed};
use raffaello_error::{RunnerError, RunnerErrorKind, RunnerResult};
use raffaello_server::{ApiState, ModelRunner, create_router};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tower::ServiceExt;

/// Runner that returns a fixed output without spawning anything.
struct FixedRunner {
    output: RunOutput,
}

#[async_trait]
impl ModelRunner for FixedRunner {
    async fn run(&self, _model: &str, _prompt: &str) -> RunnerResult<RunOutput> {
        Ok(self.output.clone())
    }
}

/// Runner that counts how many times it was invoked.
struct CountingRunner {
    calls: AtomicUsize,
}

#[async_trait]
impl ModelRunner for CountingRunner {
    async fn run(&self, _model: &str, _prompt: &str) -> RunnerResult<RunOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RunOutput::new(0, "counted", ""))
    }
}

/// Runner that sleeps for the number of milliseconds given as the prompt,
/// standing in for models with different run times.
struct SleepyRunner;

#[async_trait]
impl ModelRunner for SleepyRunner {
    async fn run(&self, _model: &str, prompt: &str) -> RunnerResult<RunOutput> {
        let delay = prompt.parse::<u64>().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(RunOutput::new(0, "slept", ""))
    }
}

/// Runner whose invocations never complete.
struct AbortingRunner;

#[async_trait]
impl ModelRunner for AbortingRunner {
    async fn run(&self, _model: &str, _prompt: &str) -> RunnerResult<RunOutput> {
        Err(RunnerError::new(RunnerErrorKind::Timeout(300)))
    }
}

fn state_with(runner: Arc<dyn ModelRunner>) -> ApiState {
    ApiState::new(
        runner,
        "gpt-oss:20b".to_string(),
        PathBuf::from("static/index.html"),
    )
}

async fn post_generate(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("Valid request"),
        )
        .await
        .expect("Request handled");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Body bytes");
    let value = serde_json::from_slice(&bytes).expect("JSON body");
    (status, value)
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("Valid request"),
    )
    .await
    .expect("Request handled")
}

#[tokio::test]
async fn test_generate_returns_output_with_timing() {
    let runner = FixedRunner {
        output: RunOutput::new(0, "Hello from the model", ""),
    };
    let app = create_router(state_with(Arc::new(runner)));

    let (status, body) = post_generate(app, json!({"prompt": "Say hello"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"], "Hello from the model");
    assert_eq!(body["model"], "gpt-oss:20b");

    let duration_ms = body["duration_ms"].as_f64().expect("duration_ms number");
    assert!(duration_ms >= 0.0);
    assert_eq!(body["duration_human"], format_elapsed(duration_ms));

    let start_human = body["start_time_human"].as_str().expect("start_time_human");
    chrono::DateTime::parse_from_rfc3339(start_human).expect("RFC 3339 start time");
    assert!(body["start_time_unix"].as_f64().expect("start_time_unix") > 0.0);
}

#[tokio::test]
async fn test_generate_reports_requested_model() {
    let runner = FixedRunner {
        output: RunOutput::new(0, "ok", ""),
    };
    let app = create_router(state_with(Arc::new(runner)));

    let (status, body) =
        post_generate(app, json!({"prompt": "hi", "model": "llama3.2:1b"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "llama3.2:1b");
}

#[tokio::test]
async fn test_empty_prompt_rejected_before_any_run() {
    let counting = Arc::new(CountingRunner {
        calls: AtomicUsize::new(0),
    });
    let app = create_router(state_with(counting.clone()));

    let (status, body) = post_generate(app, json!({"prompt": ""})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "prompt must not be empty");
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_prompt_field_rejected() {
    let counting = Arc::new(CountingRunner {
        calls: AtomicUsize::new(0),
    });
    let app = create_router(state_with(counting.clone()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .expect("Valid request"),
        )
        .await
        .expect("Request handled");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_nonzero_exit_maps_to_bad_gateway() {
    let runner = FixedRunner {
        output: RunOutput::new(1, "", "model error"),
    };
    let app = create_router(state_with(Arc::new(runner)));

    let (status, body) = post_generate(app, json!({"prompt": "hi"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({
            "error": "Ollama run failed",
            "stderr": "model error",
            "return_code": 1,
        })
    );
}

#[tokio::test]
async fn test_failure_with_empty_stderr_gets_placeholder() {
    let runner = FixedRunner {
        output: RunOutput::new(3, "partial output", ""),
    };
    let app = create_router(state_with(Arc::new(runner)));

    let (status, body) = post_generate(app, json!({"prompt": "hi"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["stderr"], "(no stderr)");
    assert_eq!(body["return_code"], 3);
}

#[tokio::test]
async fn test_aborted_run_maps_to_sentinel_exit_code() {
    let app = create_router(state_with(Arc::new(AbortingRunner)));

    let (status, body) = post_generate(app, json!({"prompt": "hi"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({
            "error": "Ollama run failed",
            "stderr": "(no stderr)",
            "return_code": -1,
        })
    );
}

#[tokio::test]
async fn test_concurrent_runs_do_not_serialize() {
    let app = create_router(state_with(Arc::new(SleepyRunner)));

    let start = Instant::now();
    let (a, b, c) = tokio::join!(
        post_generate(app.clone(), json!({"prompt": "200"})),
        post_generate(app.clone(), json!({"prompt": "200"})),
        post_generate(app, json!({"prompt": "200"})),
    );
    let elapsed = start.elapsed();

    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);
    assert_eq!(c.0, StatusCode::OK);
    // Three 200ms runs in series would need 600ms
    assert!(
        elapsed < Duration::from_millis(500),
        "requests serialized: {elapsed:?}"
    );
}

#[tokio::test]
async fn test_concurrent_durations_stay_independent() {
    let app = create_router(state_with(Arc::new(SleepyRunner)));

    let (slow, fast) = tokio::join!(
        post_generate(app.clone(), json!({"prompt": "400"})),
        post_generate(app, json!({"prompt": "50"})),
    );

    assert_eq!(slow.0, StatusCode::OK);
    assert_eq!(fast.0, StatusCode::OK);

    let slow_ms = slow.1["duration_ms"].as_f64().expect("duration_ms number");
    let fast_ms = fast.1["duration_ms"].as_f64().expect("duration_ms number");
    assert!(slow_ms >= 350.0, "slow run undercounted: {slow_ms}ms");
    // The fast run must not absorb the slow run's 400ms
    assert!(fast_ms < 300.0, "fast run inflated: {fast_ms}ms");
}

#[tokio::test]
async fn test_health_endpoint_reports_ok() {
    let runner = FixedRunner {
        output: RunOutput::new(0, "", ""),
    };
    let app = create_router(state_with(Arc::new(runner)));

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Body bytes");
    let body: Value = serde_json::from_slice(&bytes).expect("JSON body");
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_index_serves_page_when_present() {
    let dir = tempfile::tempdir().expect("Create temp dir");
    let page = dir.path().join("index.html");
    std::fs::write(&page, "<h1>Raffaello</h1>").expect("Write page");

    let runner = FixedRunner {
        output: RunOutput::new(0, "", ""),
    };
    let state = ApiState::new(Arc::new(runner), "gpt-oss:20b".to_string(), page);
    let app = create_router(state);

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .expect("Content type")
        .to_str()
        .expect("Header text");
    assert!(content_type.starts_with("text/html"));

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Body bytes");
    assert_eq!(&bytes[..], b"<h1>Raffaello</h1>");
}

#[tokio::test]
async fn test_index_missing_page_is_not_found() {
    let dir = tempfile::tempdir().expect("Create temp dir");
    let runner = FixedRunner {
        output: RunOutput::new(0, "", ""),
    };
    let state = ApiState::new(
        Arc::new(runner),
        "gpt-oss:20b".to_string(),
        dir.path().join("missing.html"),
    );
    let app = create_router(state);

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
