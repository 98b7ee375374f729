use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::domain::{BoardFilter, JobPostingId, JobPostingUpdate, NewJobPosting};
use super::repository::JobRepository;
use super::service::{JobError, JobService};
use crate::board::applications::repository::ApplicationRepository;
use crate::board::pagination::PageRequest;
use crate::board::users::UserId;

#[derive(Debug, Deserialize)]
pub(crate) struct BoardQuery {
    pub(crate) keywords: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ManagedQuery {
    pub(crate) search: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) page: Option<usize>,
    pub(crate) page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdminCreateRequest {
    pub(crate) recruiter: String,
    #[serde(flatten)]
    pub(crate) posting: NewJobPosting,
}

/// Visitor-facing board endpoints.
pub fn board_router<J, A>(service: Arc<JobService<J, A>>) -> Router
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/job-postings", get(board_handler::<J, A>))
        .route("/api/v1/job-postings/latest", get(latest_handler::<J, A>))
        .route("/api/v1/job-postings/:job_id", get(detail_handler::<J, A>))
        .route("/api/v1/locations", get(locations_handler::<J, A>))
        .route("/api/v1/categories", get(categories_handler::<J, A>))
        .route(
            "/api/v1/candidate/:user_id/jobs",
            get(candidate_jobs_handler::<J, A>),
        )
        .with_state(service)
}

/// Recruiter and admin posting management.
pub fn job_management_router<J, A>(service: Arc<JobService<J, A>>) -> Router
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/recruiter/:user_id/jobs",
            get(recruiter_jobs_handler::<J, A>).post(recruiter_create_handler::<J, A>),
        )
        .route(
            "/api/v1/recruiter/:user_id/jobs/:job_id",
            axum::routing::put(recruiter_update_handler::<J, A>)
                .delete(recruiter_delete_handler::<J, A>),
        )
        .route(
            "/api/v1/admin/jobs",
            get(admin_jobs_handler::<J, A>).post(admin_create_handler::<J, A>),
        )
        .route(
            "/api/v1/admin/jobs/:job_id",
            get(admin_detail_handler::<J, A>)
                .put(admin_update_handler::<J, A>)
                .delete(admin_delete_handler::<J, A>),
        )
        .with_state(service)
}

pub(crate) async fn board_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Query(query): Query<BoardQuery>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let filter = BoardFilter {
        keywords: query.keywords,
        location: query.location,
        category: query.category,
    };
    match service.board(&filter) {
        Ok(postings) => (StatusCode::OK, Json(postings)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn latest_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.latest() {
        Ok(postings) => (StatusCode::OK, Json(postings)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn detail_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.fetch_open(&JobPostingId(job_id)) {
        Ok(posting) => (StatusCode::OK, Json(posting)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn locations_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.locations() {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn categories_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.categories() {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn candidate_jobs_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Path(_user_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.board(&BoardFilter::default()) {
        Ok(postings) => (StatusCode::OK, Json(postings)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn recruiter_jobs_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Path(user_id): Path<String>,
    Query(query): Query<ManagedQuery>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let owner = UserId(user_id);
    let page = PageRequest::from_query(query.page, query.page_size);
    match service.managed(
        Some(&owner),
        query.search.as_deref(),
        query.location.as_deref(),
        query.category.as_deref(),
        page,
    ) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn recruiter_create_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Path(user_id): Path<String>,
    Json(posting): Json<NewJobPosting>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let created_on = Local::now().date_naive();
    match service.create(&UserId(user_id), posting, created_on) {
        Ok(posting) => (StatusCode::CREATED, Json(posting)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn recruiter_update_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Path((user_id, job_id)): Path<(String, String)>,
    Json(update): Json<JobPostingUpdate>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let acting = UserId(user_id);
    match service.update(Some(&acting), &JobPostingId(job_id), update) {
        Ok(posting) => (StatusCode::OK, Json(posting)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn recruiter_delete_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Path((user_id, job_id)): Path<(String, String)>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let acting = UserId(user_id);
    match service.delete(Some(&acting), &JobPostingId(job_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn admin_jobs_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Query(query): Query<ManagedQuery>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let page = PageRequest::from_query(query.page, query.page_size);
    match service.managed(
        None,
        query.search.as_deref(),
        query.location.as_deref(),
        query.category.as_deref(),
        page,
    ) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn admin_create_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Json(payload): Json<AdminCreateRequest>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let created_on = Local::now().date_naive();
    match service.create(&UserId(payload.recruiter), payload.posting, created_on) {
        Ok(posting) => (StatusCode::CREATED, Json(posting)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn admin_detail_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.fetch(&JobPostingId(job_id)) {
        Ok(posting) => (StatusCode::OK, Json(posting)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn admin_update_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Path(job_id): Path<String>,
    Json(update): Json<JobPostingUpdate>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.update(None, &JobPostingId(job_id), update) {
        Ok(posting) => (StatusCode::OK, Json(posting)).into_response(),
        Err(error) => job_error(error),
    }
}

pub(crate) async fn admin_delete_handler<J, A>(
    State(service): State<Arc<JobService<J, A>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.delete(None, &JobPostingId(job_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => job_error(error),
    }
}

fn job_error(error: JobError) -> Response {
    let (status, body) = match &error {
        JobError::UnknownPosting(_) => (StatusCode::NOT_FOUND, json!({ "detail": error.to_string() })),
        JobError::NotOwner => (StatusCode::FORBIDDEN, json!({ "detail": error.to_string() })),
        JobError::Repository(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": error.to_string() }),
        ),
    };

    (status, Json(body)).into_response()
}
