//! Error types for the broker HTTP surface
//!
//! Every remote-call failure is caught at the handler boundary and converted
//! to one of these variants; callers only ever see the short mapped body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::spotify::SpotifyError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request from the local caller (400); no remote call was made
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Search yielded no result (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Token exchange against the accounts service failed (500)
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// A remote command call failed at the network or parse level (500)
    #[error("Upstream call failed: {0}")]
    Upstream(String),
}

impl ApiError {
    /// Map a client error from the token exchange path.
    pub fn token_exchange(err: SpotifyError) -> Self {
        ApiError::TokenExchange(err.to_string())
    }

    /// Map a client error from a command call.
    pub fn upstream(err: SpotifyError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                warn!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::NotFound(msg) => {
                warn!("{}", msg);
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::TokenExchange(details) => {
                error!("Token exchange failed: {}", details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to refresh token", "details": details })),
                )
                    .into_response()
            }
            ApiError::Upstream(msg) => {
                error!("Upstream call failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": msg })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[tokio::test]
    async fn bad_request_maps_to_400() {
        let response = ApiError::BadRequest("Missing query".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing query");
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let response = ApiError::NotFound("No track found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn token_exchange_maps_to_500_with_details() {
        let response = ApiError::TokenExchange("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to refresh token");
        assert_eq!(body["details"], "connection refused");
    }

    #[tokio::test]
    async fn upstream_maps_to_500() {
        let response = ApiError::Upstream("Network error: timed out".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Network error: timed out");
    }
}
