use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Failure classes of the ingestion and ask pipelines.
///
/// Ingestion-time errors are caught per source unit and logged; request-time
/// errors propagate to the caller as a single failure response.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("extraction failed: {0}")]
    Extraction(String),
    #[error("embedding failed: {0}")]
    Embedding(String),
    #[error("vector store failed: {0}")]
    Store(String),
    #[error("generation failed: {0}")]
    Generation(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Extraction(msg) => ApiError::Internal(msg),
            PipelineError::Embedding(msg)
            | PipelineError::Store(msg)
            | PipelineError::Generation(msg) => ApiError::Upstream(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_failures_map_to_upstream() {
        let err: ApiError = PipelineError::Generation("model rejected options".to_string()).into();
        assert!(matches!(err, ApiError::Upstream(_)));

        let err: ApiError = PipelineError::Store("db gone".to_string()).into();
        assert!(matches!(err, ApiError::Upstream(_)));
    }

    #[test]
    fn extraction_failure_maps_to_internal() {
        let err: ApiError = PipelineError::Extraction("not a pdf".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
