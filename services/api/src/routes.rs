use crate::infra::{AppState, BoardServices};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use talentdesk::board::applications::application_router;
use talentdesk::board::jobs::{board_router, job_management_router};
use talentdesk::board::resumes::resume_router;
use talentdesk::board::stats::stats_router;
use talentdesk::board::users::directory_router;

/// Every board endpoint plus the operational surface, over one service graph.
pub(crate) fn board_routes(services: &BoardServices) -> axum::Router {
    directory_router(services.directory.clone())
        .merge(resume_router(services.resumes.clone()))
        .merge(board_router(services.jobs.clone()))
        .merge(job_management_router(services.jobs.clone()))
        .merge(application_router(services.applications.clone()))
        .merge(stats_router(services.stats.clone()))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
