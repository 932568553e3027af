//! HTTP gateway (Axum) over a [`MatchingSession`](crate::session::MatchingSession).
//!
//! This module is primarily used by the `tender` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{
    approved_matches_handler, bulk_approve_handler, catalog_handler, coverage_handler,
    export_handler, list_matches_handler, run_matches_handler, set_status_handler,
    timeout_middleware,
};
pub use state::AppState;

pub const TENDER_STATUS_HEADER: &str = "X-Tender-Status";
pub const TENDER_STATUS_HEALTHY: &str = "healthy";
pub const TENDER_STATUS_READY: &str = "ready";
pub const TENDER_STATUS_NOT_READY: &str = "not_ready";
pub const TENDER_STATUS_OK: &str = "ok";

pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/catalog", get(catalog_handler))
        .route(
            "/v1/matches",
            get(list_matches_handler).post(run_matches_handler),
        )
        .route("/v1/coverage", get(coverage_handler))
        .route("/v1/approvals", get(approved_matches_handler))
        .route("/v1/approvals/bulk", post(bulk_approve_handler))
        .route(
            "/v1/approvals/{requirement_id}/{service_id}",
            put(set_status_handler),
        )
        .route("/v1/export", get(export_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            timeout_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStatus {
    pub http: &'static str,
    pub catalog: &'static str,
    pub vector_space: &'static str,
    pub services: usize,
    pub vocabulary: usize,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        TENDER_STATUS_HEADER,
        HeaderValue::from_static(TENDER_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let session = &state.session;
    let space = session.matcher().space();

    let catalog_status = if session.catalog().is_empty() {
        TENDER_STATUS_NOT_READY
    } else {
        TENDER_STATUS_READY
    };
    let space_status = if space.is_degenerate() {
        TENDER_STATUS_NOT_READY
    } else {
        TENDER_STATUS_READY
    };

    let components = ComponentStatus {
        http: TENDER_STATUS_READY,
        catalog: catalog_status,
        vector_space: space_status,
        services: session.catalog().len(),
        vocabulary: space.dimension(),
    };

    let is_ready = session.is_ready();
    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready { "ok" } else { "pending" };

    let mut headers = HeaderMap::new();
    headers.insert(TENDER_STATUS_HEADER, HeaderValue::from_static(status_msg));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
