use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::constants::is_unit_interval;
use crate::matching::MatchKey;

use super::error::GatewayError;
use super::payload::{
    ApprovedQuery, ApprovedResponse, BulkApproveRequest, BulkApproveResponse, MatchRequest,
    MatchesResponse, StatusUpdate,
};
use super::state::AppState;
use super::{TENDER_STATUS_HEADER, TENDER_STATUS_OK};

/// Bounds every request by [`AppState::request_timeout`].
pub async fn timeout_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    match tokio::time::timeout(state.request_timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(path = %path, timeout_secs = state.request_timeout.as_secs(), "Request timed out");
            GatewayError::Timeout(state.request_timeout).into_response()
        }
    }
}

#[instrument(skip(state))]
pub async fn catalog_handler(State(state): State<AppState>) -> Response {
    ok_json(&state.session.catalog_summary())
}

#[instrument(skip(state, body), fields(requirements = tracing::field::Empty))]
pub async fn run_matches_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: MatchRequest = parse_value(body)?;
    request.validate()?;
    tracing::Span::current().record("requirements", request.requirements.len());

    let options = request.options(state.session.settings().options);
    let session = Arc::clone(&state.session);

    // Set when this future is dropped, e.g. by the timeout middleware.
    let guard = CancelOnDrop::default();
    let cancelled = Arc::clone(&guard.0);

    let run = tokio::task::spawn_blocking(move || {
        session.run_unless_cancelled(&request.requirements, Some(options), &cancelled)
    })
    .await
    .map_err(|e| GatewayError::InternalError(format!("matching task failed: {e}")))??;
    drop(guard);

    info!(run_id = %run.run_id, matches = run.matches.len(), "Matching run served");
    Ok(ok_json(&run))
}

#[derive(Default)]
pub(crate) struct CancelOnDrop(pub(crate) Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

#[instrument(skip(state))]
pub async fn list_matches_handler(State(state): State<AppState>) -> Response {
    let session = &state.session;
    ok_json(&MatchesResponse {
        run_id: session.last_run_id(),
        matches: session.matches(),
        summary: session.approval_summary(),
    })
}

#[instrument(skip(state))]
pub async fn coverage_handler(State(state): State<AppState>) -> Response {
    ok_json(&state.session.coverage())
}

#[instrument(skip(state, body))]
pub async fn set_status_handler(
    State(state): State<AppState>,
    Path((requirement_id, service_id)): Path<(String, String)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let update: StatusUpdate = parse_value(body)?;
    let key = MatchKey::new(requirement_id, service_id);

    let updated = state.session.set_status(&key, update.status)?;
    debug!(key = %key, status = %update.status, "Approval status updated");
    Ok(ok_json(&updated))
}

#[instrument(skip(state, body))]
pub async fn bulk_approve_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let request: BulkApproveRequest = if body.is_empty() {
        BulkApproveRequest::default()
    } else {
        parse_bytes(&body)?
    };

    let threshold = request
        .threshold
        .unwrap_or(state.session.settings().approval_threshold);
    let approved = state.session.approve_above_threshold(Some(threshold))?;

    Ok(ok_json(&BulkApproveResponse {
        threshold,
        approved,
        summary: state.session.approval_summary(),
    }))
}

#[instrument(skip(state))]
pub async fn approved_matches_handler(
    State(state): State<AppState>,
    Query(query): Query<ApprovedQuery>,
) -> Result<Response, GatewayError> {
    let min_score = query.min_score.unwrap_or(0.0);
    if !is_unit_interval(min_score) {
        return Err(GatewayError::InvalidRequest(format!(
            "minScore must be within [0, 1], got {min_score}"
        )));
    }

    Ok(ok_json(&ApprovedResponse {
        min_score,
        matches: state.session.approved_matches(min_score),
    }))
}

#[instrument(skip(state))]
pub async fn export_handler(State(state): State<AppState>) -> Result<Response, GatewayError> {
    let snapshot = state.session.export()?;
    Ok(ok_json(&snapshot))
}

pub(crate) fn parse_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, GatewayError> {
    serde_json::from_value(value)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {e}")))
}

pub(crate) fn parse_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(bytes)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request body: {e}")))
}

pub(crate) fn ok_json<T: Serialize>(body: &T) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        TENDER_STATUS_HEADER,
        HeaderValue::from_static(TENDER_STATUS_OK),
    );
    (StatusCode::OK, headers, Json(body)).into_response()
}
