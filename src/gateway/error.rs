use std::time::Duration;

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::approval::ApprovalError;
use crate::session::SessionError;

use super::TENDER_STATUS_HEADER;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::Session(SessionError::Matching(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_options")
            }
            GatewayError::Session(SessionError::Approval(ApprovalError::UnknownMatch { .. })) => {
                (StatusCode::NOT_FOUND, "unknown_match")
            }
            GatewayError::Session(SessionError::Approval(
                ApprovalError::InvalidThreshold { .. },
            )) => (StatusCode::BAD_REQUEST, "invalid_threshold"),
            GatewayError::Session(SessionError::NoRun) => (StatusCode::CONFLICT, "no_run"),
            GatewayError::Session(SessionError::Cancelled) => {
                (StatusCode::GATEWAY_TIMEOUT, "timeout")
            }
            GatewayError::Session(_) => (StatusCode::INTERNAL_SERVER_ERROR, "session_error"),
            GatewayError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, tender_status) = self.classify();

        let mut headers = HeaderMap::new();
        headers.insert(
            TENDER_STATUS_HEADER,
            HeaderValue::from_static(tender_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
