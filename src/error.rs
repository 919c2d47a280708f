//! Unified API error handling
//!
//! Provides consistent error responses across all endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message shown for every failed estimate, whatever the cause.
pub const ESTIMATE_FAILED_MESSAGE: &str = "Failed to generate estimate. Please try again later.";

/// Failures of the estimation exchange.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// Input rejected before any outbound call.
    #[error("Invalid estimation request: {0}")]
    Validation(String),

    #[error("No response from AI service")]
    EmptyResponse,

    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    #[error("AI service transport error: {0}")]
    Transport(String),
}

impl EstimateError {
    /// Only network-level failures are worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Estimate(#[from] EstimateError),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Estimate(EstimateError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Estimate(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Estimate(_) => "ESTIMATE_FAILED",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Unauthorized(msg) => msg.clone(),
            Self::BadRequest(msg) => msg.clone(),
            // Every estimate failure looks the same to the caller
            Self::Estimate(_) => ESTIMATE_FAILED_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Estimate(EstimateError::Validation(reason)) => {
                tracing::warn!(reason = %reason, "Estimate request rejected");
            }
            Self::Estimate(e) => {
                tracing::error!(error = %e, "Estimation failed");
            }
            _ => {
                tracing::warn!(error = %self, "API error");
            }
        }

        let status = self.status_code();
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_errors_are_transient() {
        assert!(EstimateError::Transport("reset".into()).is_transient());
        assert!(!EstimateError::EmptyResponse.is_transient());
        assert!(!EstimateError::MalformedResponse("x".into()).is_transient());
        assert!(!EstimateError::Validation("x".into()).is_transient());
    }

    #[test]
    fn estimate_errors_share_one_public_message() {
        let errors = [
            EstimateError::Validation("location is required".into()),
            EstimateError::EmptyResponse,
            EstimateError::MalformedResponse("missing field `breakdown`".into()),
            EstimateError::Transport("connection refused".into()),
        ];

        for e in errors {
            let api: ApiError = e.into();
            assert_eq!(api.error_code(), "ESTIMATE_FAILED");
            assert_eq!(api.public_message(), ESTIMATE_FAILED_MESSAGE);
        }
    }

    #[test]
    fn validation_is_a_client_error_and_the_rest_are_gateway_errors() {
        let validation: ApiError = EstimateError::Validation("x".into()).into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        let transport: ApiError = EstimateError::Transport("x".into()).into();
        assert_eq!(transport.status_code(), StatusCode::BAD_GATEWAY);

        let empty: ApiError = EstimateError::EmptyResponse.into();
        assert_eq!(empty.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn upstream_detail_stays_out_of_the_message() {
        let api: ApiError = EstimateError::Transport("dns error: api.internal".into()).into();
        assert!(!api.public_message().contains("api.internal"));
    }
}
