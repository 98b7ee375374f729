use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::domain::ApplicationId;
use super::repository::ApplicationRepository;
use super::service::{ApplicationError, ApplicationService};
use crate::board::jobs::{JobPostingId, JobRepository};
use crate::board::resumes::ResumeRepository;
use crate::board::users::{UserId, UserRepository};

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateStatusRequest {
    #[serde(default)]
    pub(crate) status: Option<String>,
}

/// Application endpoints: the review queue, the status transition, and the
/// candidate-side intake.
pub fn application_router<A, J, U, R>(service: Arc<ApplicationService<A, J, U, R>>) -> Router
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
{
    Router::new()
        .route("/api/v1/applications", get(list_handler::<A, J, U, R>))
        .route(
            "/api/v1/applications/:application_id",
            get(show_handler::<A, J, U, R>),
        )
        .route(
            "/api/v1/applications/:application_id/update_status",
            patch(update_status_handler::<A, J, U, R>),
        )
        .route(
            "/api/v1/candidate/:user_id/apply/:job_id",
            post(apply_handler::<A, J, U, R>),
        )
        .route(
            "/api/v1/candidate/:user_id/applications",
            get(candidate_applications_handler::<A, J, U, R>),
        )
        .route(
            "/api/v1/candidate/:user_id/check_application/:job_id",
            get(check_application_handler::<A, J, U, R>),
        )
        .route(
            "/api/v1/admin/jobs/:job_id/applicants",
            get(admin_applicants_handler::<A, J, U, R>),
        )
        .route(
            "/api/v1/recruiter/:user_id/jobs/:job_id/applicants",
            get(recruiter_applicants_handler::<A, J, U, R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<A, J, U, R>(
    State(service): State<Arc<ApplicationService<A, J, U, R>>>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
{
    match service.all() {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(error) => application_error(error),
    }
}

pub(crate) async fn show_handler<A, J, U, R>(
    State(service): State<Arc<ApplicationService<A, J, U, R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => application_error(error),
    }
}

pub(crate) async fn update_status_handler<A, J, U, R>(
    State(service): State<Arc<ApplicationService<A, J, U, R>>>,
    Path(application_id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.update_status(&id, payload.status.as_deref()) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => application_error(error),
    }
}

pub(crate) async fn apply_handler<A, J, U, R>(
    State(service): State<Arc<ApplicationService<A, J, U, R>>>,
    Path((user_id, job_id)): Path<(String, String)>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
{
    let applied_on = Local::now().date_naive();
    match service.apply(&UserId(user_id), &JobPostingId(job_id), applied_on) {
        Ok(view) => (
            StatusCode::CREATED,
            Json(json!({
                "detail": "Your application has been submitted successfully",
                "data": view,
            })),
        )
            .into_response(),
        Err(error) => application_error(error),
    }
}

pub(crate) async fn candidate_applications_handler<A, J, U, R>(
    State(service): State<Arc<ApplicationService<A, J, U, R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
{
    match service.for_candidate(&UserId(user_id)) {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(error) => application_error(error),
    }
}

pub(crate) async fn check_application_handler<A, J, U, R>(
    State(service): State<Arc<ApplicationService<A, J, U, R>>>,
    Path((user_id, job_id)): Path<(String, String)>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
{
    match service.has_applied(&UserId(user_id), &JobPostingId(job_id)) {
        Ok(has_applied) => (StatusCode::OK, Json(json!({ "has_applied": has_applied }))).into_response(),
        Err(error) => application_error(error),
    }
}

pub(crate) async fn admin_applicants_handler<A, J, U, R>(
    State(service): State<Arc<ApplicationService<A, J, U, R>>>,
    Path(job_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
{
    match service.for_job(&JobPostingId(job_id), None) {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(error) => application_error(error),
    }
}

pub(crate) async fn recruiter_applicants_handler<A, J, U, R>(
    State(service): State<Arc<ApplicationService<A, J, U, R>>>,
    Path((user_id, job_id)): Path<(String, String)>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
{
    let acting = UserId(user_id);
    match service.for_job(&JobPostingId(job_id), Some(&acting)) {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(error) => application_error(error),
    }
}

fn application_error(error: ApplicationError) -> Response {
    let (status, body) = match &error {
        ApplicationError::MissingStatus | ApplicationError::InvalidStatus(_) => {
            (StatusCode::BAD_REQUEST, json!({ "error": error.to_string() }))
        }
        ApplicationError::AlreadyApplied => {
            (StatusCode::BAD_REQUEST, json!({ "detail": error.to_string() }))
        }
        ApplicationError::UnknownApplication(_)
        | ApplicationError::UnknownJob(_)
        | ApplicationError::UnknownUser(_)
        | ApplicationError::MissingResume => {
            (StatusCode::NOT_FOUND, json!({ "detail": error.to_string() }))
        }
        ApplicationError::NotOwner => {
            (StatusCode::FORBIDDEN, json!({ "detail": error.to_string() }))
        }
        ApplicationError::Repository(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": error.to_string() }),
        ),
    };

    (status, Json(body)).into_response()
}
