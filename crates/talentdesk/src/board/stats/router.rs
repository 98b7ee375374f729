use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::rates::RatePeriod;
use super::service::{StatsError, StatsService};
use crate::board::applications::ApplicationRepository;
use crate::board::jobs::JobRepository;
use crate::board::resumes::ResumeRepository;
use crate::board::users::{UserId, UserRepository};

#[derive(Debug, Deserialize)]
pub(crate) struct RateQuery {
    pub(crate) period: Option<String>,
    /// Override of the series' reference day, mostly for reproducible reads.
    pub(crate) today: Option<NaiveDate>,
}

/// Statistics endpoints: dashboard counters and the two rate series.
pub fn stats_router<U, R, J, A>(service: Arc<StatsService<U, R, J, A>>) -> Router
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/admin/stats", get(admin_stats_handler::<U, R, J, A>))
        .route(
            "/api/v1/recruiter/:user_id/stats",
            get(recruiter_stats_handler::<U, R, J, A>),
        )
        .route(
            "/api/v1/candidate/:user_id/stats",
            get(candidate_stats_handler::<U, R, J, A>),
        )
        .route(
            "/api/v1/stats/cv-registration-rate",
            get(registration_rate_handler::<U, R, J, A>),
        )
        .route(
            "/api/v1/stats/application-rate",
            get(application_rate_handler::<U, R, J, A>),
        )
        .with_state(service)
}

pub(crate) async fn admin_stats_handler<U, R, J, A>(
    State(service): State<Arc<StatsService<U, R, J, A>>>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.admin_summary() {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => stats_error(error),
    }
}

pub(crate) async fn recruiter_stats_handler<U, R, J, A>(
    State(service): State<Arc<StatsService<U, R, J, A>>>,
    Path(user_id): Path<String>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.recruiter_summary(&UserId(user_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => stats_error(error),
    }
}

pub(crate) async fn candidate_stats_handler<U, R, J, A>(
    State(service): State<Arc<StatsService<U, R, J, A>>>,
    Path(user_id): Path<String>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.candidate_summary(&UserId(user_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => stats_error(error),
    }
}

pub(crate) async fn registration_rate_handler<U, R, J, A>(
    State(service): State<Arc<StatsService<U, R, J, A>>>,
    Query(query): Query<RateQuery>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let (period, today) = resolve_rate_query(query);
    match service.registration_rate(period, today) {
        Ok(points) => (StatusCode::OK, Json(points)).into_response(),
        Err(error) => stats_error(error),
    }
}

pub(crate) async fn application_rate_handler<U, R, J, A>(
    State(service): State<Arc<StatsService<U, R, J, A>>>,
    Query(query): Query<RateQuery>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let (period, today) = resolve_rate_query(query);
    match service.application_rate(period, today) {
        Ok(points) => (StatusCode::OK, Json(points)).into_response(),
        Err(error) => stats_error(error),
    }
}

fn resolve_rate_query(query: RateQuery) -> (RatePeriod, NaiveDate) {
    let period = RatePeriod::parse(query.period.as_deref().unwrap_or("week"));
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    (period, today)
}

fn stats_error(error: StatsError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": error.to_string() })),
    )
        .into_response()
}
