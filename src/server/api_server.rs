//! REST API server for word-count uploads

use anyhow::Result;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::input::decode_lines;
use crate::mapreduce::{MapReduceError, WordCountPipeline};
use crate::report::WordCountReport;

/// Largest accepted request body
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// API server for the word-count endpoint
pub struct ApiServer {
    pipeline: WordCountPipeline,
    bind: String,
    static_dir: Option<PathBuf>,
}

impl ApiServer {
    /// Create new API server
    pub fn new(pipeline: WordCountPipeline, config: &ServerConfig) -> Self {
        Self {
            pipeline,
            bind: config.bind.clone(),
            static_dir: config.static_dir.clone(),
        }
    }

    /// Bind the configured address and serve until the process exits
    pub async fn start(self) -> Result<()> {
        let listener = TcpListener::bind(&self.bind).await?;
        info!("Starting word count API server on {}", listener.local_addr()?);
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve_on(self, listener: TcpListener) -> Result<()> {
        let app = self.build_router();
        axum::serve(listener, app).await?;
        Ok(())
    }

    /// Build API router
    pub fn build_router(self) -> Router {
        let shared_state = Arc::new(ApiState {
            pipeline: self.pipeline,
        });

        let mut router = Router::new()
            .route("/api/health", get(health_check))
            .route("/api/wordcount", post(word_count));

        if let Some(dir) = self.static_dir {
            debug!("Serving static files from {}", dir.display());
            router = router.fallback_service(ServeDir::new(dir));
        }

        router
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
            .layer(CorsLayer::permissive())
            .with_state(shared_state)
    }
}

/// Shared API state
struct ApiState {
    pipeline: WordCountPipeline,
}

/// Rejections surfaced to the client as plain text
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        warn!("Rejected malformed upload: {}", err);
        ApiError::BadRequest(err.body_text())
    }
}

impl From<MapReduceError> for ApiError {
    fn from(err: MapReduceError) -> Self {
        if err.is_constraint_violation() {
            ApiError::BadRequest(err.user_message())
        } else {
            error!("Word count request failed: {}", err);
            ApiError::Internal(err.user_message())
        }
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Parse the `threads` form field; absent means one thread
fn parse_threads(raw: Option<&str>) -> Result<usize, ApiError> {
    let Some(raw) = raw else {
        return Ok(1);
    };
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 1 => {
            usize::try_from(value).map_err(|_| invalid_thread_count())
        }
        _ => Err(invalid_thread_count()),
    }
}

fn invalid_thread_count() -> ApiError {
    ApiError::BadRequest("Invalid thread count".to_string())
}

/// Count the words of an uploaded `file`, sequentially and with `threads`
/// concurrent tasks
async fn word_count(
    State(state): State<Arc<ApiState>>,
    mut multipart: Multipart,
) -> Result<Json<WordCountReport>, ApiError> {
    let mut file = None;
    let mut threads = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => file = Some(field.bytes().await?),
            "threads" => threads = Some(field.text().await?),
            _ => {}
        }
    }

    let Some(file) = file else {
        return Err(ApiError::BadRequest("Missing file".to_string()));
    };
    let threads = parse_threads(threads.as_deref())?;

    let (lines, encoding) = tokio::task::spawn_blocking(move || decode_lines(file.to_vec()))
        .await
        .map_err(|e| {
            error!("Decoding upload failed: {}", e);
            ApiError::Internal("Word count failed".to_string())
        })?;
    debug!(
        "Counting {} uploaded lines ({:?}) with {} threads",
        lines.len(),
        encoding,
        threads
    );

    let comparison = state.pipeline.compare(lines, threads).await?;
    if !comparison.counts_match() {
        warn!("Concurrent counts differ from the sequential baseline");
    }
    Ok(Json(WordCountReport::from(comparison)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threads_default() {
        assert_eq!(parse_threads(None).unwrap(), 1);
    }

    #[test]
    fn test_parse_threads_valid() {
        assert_eq!(parse_threads(Some("4")).unwrap(), 4);
        assert_eq!(parse_threads(Some(" 12 ")).unwrap(), 12);
    }

    #[test]
    fn test_parse_threads_rejects_invalid() {
        for raw in ["0", "-2", "abc", "", "1.5"] {
            assert!(
                matches!(parse_threads(Some(raw)), Err(ApiError::BadRequest(ref m)) if m == "Invalid thread count"),
                "accepted {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_task_failure_message_is_generic() {
        let err = ApiError::from(MapReduceError::TaskFailed {
            phase: crate::mapreduce::PhaseType::Reduce,
            index: 3,
            reason: "boom".to_string(),
        });
        match err {
            ApiError::Internal(message) => {
                assert_eq!(message, "Word count failed");
                assert!(!message.contains('3'));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
