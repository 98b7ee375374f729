use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::domain::{ResumeFieldsUpdate, ResumeTextExtractor};
use super::repository::ResumeRepository;
use super::service::{ResumeError, ResumeService};
use crate::board::pagination::PageRequest;
use crate::board::users::{UserId, UserRepository};

#[derive(Debug, Deserialize)]
pub(crate) struct UploadRequest {
    #[serde(default)]
    pub(crate) file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkUploadRequest {
    #[serde(default)]
    pub(crate) files: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportRequest {
    pub(crate) csv: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PoolQuery {
    pub(crate) search: Option<String>,
    pub(crate) education: Option<String>,
    pub(crate) page: Option<usize>,
    pub(crate) page_size: Option<usize>,
}

/// Candidate self-service résumé endpoints plus the admin pool.
pub fn resume_router<R, U, X>(service: Arc<ResumeService<R, U, X>>) -> Router
where
    R: ResumeRepository + 'static,
    U: UserRepository + 'static,
    X: ResumeTextExtractor + 'static,
{
    Router::new()
        .route(
            "/api/v1/candidate/:user_id/my_resume",
            get(my_resume_handler::<R, U, X>).put(update_resume_handler::<R, U, X>),
        )
        .route(
            "/api/v1/candidate/:user_id/upload_resume",
            post(upload_resume_handler::<R, U, X>),
        )
        .route("/api/v1/admin/resumes", get(pool_handler::<R, U, X>))
        .route(
            "/api/v1/admin/resumes/upload",
            post(bulk_upload_handler::<R, U, X>),
        )
        .route(
            "/api/v1/admin/resumes/import",
            post(import_handler::<R, U, X>),
        )
        .with_state(service)
}

pub(crate) async fn my_resume_handler<R, U, X>(
    State(service): State<Arc<ResumeService<R, U, X>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ResumeRepository + 'static,
    U: UserRepository + 'static,
    X: ResumeTextExtractor + 'static,
{
    match service.my_resume(&UserId(user_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => resume_error(error),
    }
}

pub(crate) async fn update_resume_handler<R, U, X>(
    State(service): State<Arc<ResumeService<R, U, X>>>,
    Path(user_id): Path<String>,
    Json(update): Json<ResumeFieldsUpdate>,
) -> Response
where
    R: ResumeRepository + 'static,
    U: UserRepository + 'static,
    X: ResumeTextExtractor + 'static,
{
    let today = Local::now().date_naive();
    match service.update_fields(&UserId(user_id), update, today) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => resume_error(error),
    }
}

pub(crate) async fn upload_resume_handler<R, U, X>(
    State(service): State<Arc<ResumeService<R, U, X>>>,
    Path(user_id): Path<String>,
    Json(payload): Json<UploadRequest>,
) -> Response
where
    R: ResumeRepository + 'static,
    U: UserRepository + 'static,
    X: ResumeTextExtractor + 'static,
{
    let Some(file_name) = payload
        .file_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "No file provided" })),
        )
            .into_response();
    };

    let today = Local::now().date_naive();
    match service.upload_for_candidate(&UserId(user_id), file_name, today) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(error) => resume_error(error),
    }
}

pub(crate) async fn pool_handler<R, U, X>(
    State(service): State<Arc<ResumeService<R, U, X>>>,
    Query(query): Query<PoolQuery>,
) -> Response
where
    R: ResumeRepository + 'static,
    U: UserRepository + 'static,
    X: ResumeTextExtractor + 'static,
{
    let page = PageRequest::from_query(query.page, query.page_size);
    match service.directory(query.search.as_deref(), query.education.as_deref(), page) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(error) => resume_error(error),
    }
}

pub(crate) async fn bulk_upload_handler<R, U, X>(
    State(service): State<Arc<ResumeService<R, U, X>>>,
    Json(payload): Json<BulkUploadRequest>,
) -> Response
where
    R: ResumeRepository + 'static,
    U: UserRepository + 'static,
    X: ResumeTextExtractor + 'static,
{
    let today = Local::now().date_naive();
    match service.bulk_upload(&payload.files, today) {
        Ok(pool) => (StatusCode::CREATED, Json(pool)).into_response(),
        Err(error) => resume_error(error),
    }
}

pub(crate) async fn import_handler<R, U, X>(
    State(service): State<Arc<ResumeService<R, U, X>>>,
    Json(payload): Json<ImportRequest>,
) -> Response
where
    R: ResumeRepository + 'static,
    U: UserRepository + 'static,
    X: ResumeTextExtractor + 'static,
{
    let today = Local::now().date_naive();
    match service.import_records(Cursor::new(payload.csv.into_bytes()), today) {
        Ok(count) => (StatusCode::CREATED, Json(json!({ "imported": count }))).into_response(),
        Err(error) => resume_error(error),
    }
}

fn resume_error(error: ResumeError) -> Response {
    let (status, body) = match &error {
        ResumeError::NoResume | ResumeError::UnknownUser(_) => {
            (StatusCode::NOT_FOUND, json!({ "detail": error.to_string() }))
        }
        ResumeError::NoFiles => (StatusCode::BAD_REQUEST, json!({ "detail": error.to_string() })),
        ResumeError::Import(_) => (StatusCode::BAD_REQUEST, json!({ "error": error.to_string() })),
        ResumeError::Extract(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": error.to_string() }),
        ),
        ResumeError::Repository(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": error.to_string() }),
        ),
    };

    (status, Json(body)).into_response()
}
