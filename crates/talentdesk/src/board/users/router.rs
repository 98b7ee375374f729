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

use super::domain::{NewUserAccount, UserId, UserRole};
use super::repository::UserRepository;
use super::service::{DirectoryError, UserDirectoryService};
use crate::board::applications::repository::ApplicationRepository;
use crate::board::jobs::repository::JobRepository;
use crate::board::pagination::PageRequest;
use crate::board::resumes::repository::ResumeRepository;
use crate::board::RepositoryError;

#[derive(Debug, Deserialize)]
pub(crate) struct DirectoryQuery {
    pub(crate) search: Option<String>,
    pub(crate) page: Option<usize>,
    pub(crate) page_size: Option<usize>,
}

/// Admin directory endpoints, one collection per role.
pub fn directory_router<U, R, J, A>(service: Arc<UserDirectoryService<U, R, J, A>>) -> Router
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/admin/candidates",
            get(list_candidates::<U, R, J, A>).post(create_candidate::<U, R, J, A>),
        )
        .route(
            "/api/v1/admin/candidates/:user_id",
            get(show_candidate::<U, R, J, A>).delete(delete_candidate::<U, R, J, A>),
        )
        .route(
            "/api/v1/admin/recruiters",
            get(list_recruiters::<U, R, J, A>).post(create_recruiter::<U, R, J, A>),
        )
        .route(
            "/api/v1/admin/recruiters/:user_id",
            get(show_recruiter::<U, R, J, A>).delete(delete_recruiter::<U, R, J, A>),
        )
        .with_state(service)
}

pub(crate) async fn list_candidates<U, R, J, A>(
    State(service): State<Arc<UserDirectoryService<U, R, J, A>>>,
    Query(query): Query<DirectoryQuery>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    list_accounts(&service, UserRole::Candidate, query)
}

pub(crate) async fn create_candidate<U, R, J, A>(
    State(service): State<Arc<UserDirectoryService<U, R, J, A>>>,
    Json(payload): Json<NewUserAccount>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    create_account(&service, UserRole::Candidate, payload)
}

pub(crate) async fn show_candidate<U, R, J, A>(
    State(service): State<Arc<UserDirectoryService<U, R, J, A>>>,
    Path(user_id): Path<String>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    show_account(&service, UserRole::Candidate, &UserId(user_id))
}

pub(crate) async fn delete_candidate<U, R, J, A>(
    State(service): State<Arc<UserDirectoryService<U, R, J, A>>>,
    Path(user_id): Path<String>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    delete_account(&service, UserRole::Candidate, &UserId(user_id))
}

pub(crate) async fn list_recruiters<U, R, J, A>(
    State(service): State<Arc<UserDirectoryService<U, R, J, A>>>,
    Query(query): Query<DirectoryQuery>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    list_accounts(&service, UserRole::Recruiter, query)
}

pub(crate) async fn create_recruiter<U, R, J, A>(
    State(service): State<Arc<UserDirectoryService<U, R, J, A>>>,
    Json(payload): Json<NewUserAccount>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    create_account(&service, UserRole::Recruiter, payload)
}

pub(crate) async fn show_recruiter<U, R, J, A>(
    State(service): State<Arc<UserDirectoryService<U, R, J, A>>>,
    Path(user_id): Path<String>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    show_account(&service, UserRole::Recruiter, &UserId(user_id))
}

pub(crate) async fn delete_recruiter<U, R, J, A>(
    State(service): State<Arc<UserDirectoryService<U, R, J, A>>>,
    Path(user_id): Path<String>,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    delete_account(&service, UserRole::Recruiter, &UserId(user_id))
}

fn list_accounts<U, R, J, A>(
    service: &UserDirectoryService<U, R, J, A>,
    role: UserRole,
    query: DirectoryQuery,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let page = PageRequest::from_query(query.page, query.page_size);
    match service.list(role, query.search.as_deref(), page) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(error) => directory_error(error),
    }
}

fn create_account<U, R, J, A>(
    service: &UserDirectoryService<U, R, J, A>,
    role: UserRole,
    payload: NewUserAccount,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let joined_on = Local::now().date_naive();
    match service.create(role, payload, joined_on) {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(DirectoryError::Repository(RepositoryError::Conflict)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "A user with this email already exists" })),
        )
            .into_response(),
        Err(error) => directory_error(error),
    }
}

fn show_account<U, R, J, A>(
    service: &UserDirectoryService<U, R, J, A>,
    role: UserRole,
    id: &UserId,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.fetch(id) {
        Ok(account) if account.role == role => (StatusCode::OK, Json(account)).into_response(),
        Ok(_) => not_found(),
        Err(error) => directory_error(error),
    }
}

fn delete_account<U, R, J, A>(
    service: &UserDirectoryService<U, R, J, A>,
    role: UserRole,
    id: &UserId,
) -> Response
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.fetch(id) {
        Ok(account) if account.role == role => match service.remove(id) {
            Ok(()) => StatusCode::NO_CONTENT.into_response(),
            Err(error) => directory_error(error),
        },
        Ok(_) => not_found(),
        Err(error) => directory_error(error),
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Not found." })),
    )
        .into_response()
}

fn directory_error(error: DirectoryError) -> Response {
    match error {
        DirectoryError::UnknownUser(_) => not_found(),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": other.to_string() })),
        )
            .into_response(),
    }
}
