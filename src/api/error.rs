//! Unified API error handling
//!
//! This module provides a consistent error response format across all API
//! endpoints. Bodies keep the exact shape the frontend expects: always an
//! `error` field, plus `details` for upstream failures.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::service::nvd::NvdError;

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error
/// handling.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No NVD API key was configured at startup (500)
    #[error("Missing NVD API Key.")]
    MissingApiKey,

    /// Outbound request to the NVD failed or returned a non-success status (500)
    #[error("Request to NVD API failed: {0}")]
    UpstreamFailed(String),

    /// Upstream responded 2xx with an undeserializable body (500)
    #[error("NVD response was malformed: {0}")]
    MalformedUpstream(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingApiKey
            | ApiError::UpstreamFailed(_)
            | ApiError::MalformedUpstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        tracing::error!(
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        let body = match self {
            ApiError::MissingApiKey => serde_json::json!({
                "error": "Missing NVD API Key.",
            }),
            ApiError::UpstreamFailed(details) => serde_json::json!({
                "error": "Request to NVD API failed.",
                "details": details,
            }),
            ApiError::MalformedUpstream(details) => serde_json::json!({
                "error": "NVD response was malformed.",
                "details": details,
            }),
        };

        HttpResponse::build(status).json(body)
    }
}

impl From<NvdError> for ApiError {
    fn from(err: NvdError) -> Self {
        match err {
            NvdError::MissingApiKey => ApiError::MissingApiKey,
            NvdError::HttpError(e) => ApiError::UpstreamFailed(e.to_string()),
            NvdError::UpstreamStatus { .. } => ApiError::UpstreamFailed(err.to_string()),
            NvdError::MalformedResponse(msg) => ApiError::MalformedUpstream(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_body_is_exact() {
        let response = ApiError::MissingApiKey.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Missing NVD API Key."}));
    }

    #[tokio::test]
    async fn test_upstream_failure_carries_details() {
        let err = ApiError::from(NvdError::UpstreamStatus {
            status: reqwest::StatusCode::FORBIDDEN,
            body: "rate limited".to_string(),
        });
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Request to NVD API failed.");
        assert!(!json["details"].as_str().unwrap().is_empty());
    }
}
