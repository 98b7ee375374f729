//! Integration specifications for application intake and status review.
//!
//! Scenarios run through the public service facade and the HTTP router so
//! the whole path from request payload to persisted status is exercised
//! without reaching into private modules.

mod common {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use talentdesk::board::applications::{application_router, ApplicationService};
    use talentdesk::board::jobs::{JobPosting, JobPostingId, JobRepository};
    use talentdesk::board::memory::{
        InMemoryApplicationRepository, InMemoryJobRepository, InMemoryResumeRepository,
        InMemoryUserRepository,
    };
    use talentdesk::board::resumes::{ResumeId, ResumeRecord, ResumeRepository};
    use talentdesk::board::users::{UserAccount, UserId, UserRepository, UserRole};

    pub(crate) type Service = ApplicationService<
        InMemoryApplicationRepository,
        InMemoryJobRepository,
        InMemoryUserRepository,
        InMemoryResumeRepository,
    >;

    pub(crate) fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, dom).expect("valid date")
    }

    pub(crate) fn candidate_id() -> UserId {
        UserId("candidate-0001".to_string())
    }

    pub(crate) fn job_id() -> JobPostingId {
        JobPostingId("job-0001".to_string())
    }

    pub(crate) fn build_service() -> (Arc<Service>, Arc<InMemoryApplicationRepository>) {
        let users = Arc::new(InMemoryUserRepository::default());
        let resumes = Arc::new(InMemoryResumeRepository::default());
        let jobs = Arc::new(InMemoryJobRepository::default());
        let applications = Arc::new(InMemoryApplicationRepository::default());

        let recruiter = UserId("recruiter-0001".to_string());
        users
            .insert(UserAccount {
                id: recruiter.clone(),
                email: "sara@atlasworks.example".to_string(),
                name: "Sara Alaoui".to_string(),
                role: UserRole::Recruiter,
                joined_on: day(2025, 10, 6),
                company: Some("Atlasworks".to_string()),
                position: Some("Hiring Manager".to_string()),
            })
            .expect("recruiter stored");

        users
            .insert(UserAccount {
                id: candidate_id(),
                email: "nadia@example.com".to_string(),
                name: "Nadia Mansouri".to_string(),
                role: UserRole::Candidate,
                joined_on: day(2026, 1, 5),
                company: None,
                position: None,
            })
            .expect("candidate stored");

        resumes
            .insert(ResumeRecord {
                id: ResumeId("resume-0001".to_string()),
                user: Some(candidate_id()),
                file_name: Some("nadia-mansouri.pdf".to_string()),
                name: Some("Nadia Mansouri".to_string()),
                email: Some("nadia@example.com".to_string()),
                mobile_number: Some("+212600000002".to_string()),
                education: Some("Ingénieur d'état".to_string()),
                skills: Some("Rust, Kubernetes".to_string()),
                experience: Some("4 years backend".to_string()),
                uploaded_on: day(2026, 1, 8),
            })
            .expect("resume stored");

        jobs.insert(JobPosting {
            id: job_id(),
            recruiter,
            title: "Platform Engineer".to_string(),
            description: "Keep the hiring platform healthy".to_string(),
            kind: Some("Full-time".to_string()),
            city: Some("Rabat".to_string()),
            category: Some("Engineering".to_string()),
            company: Some("Atlasworks".to_string()),
            created_on: day(2026, 1, 22),
            open: true,
            headcount: 1,
        })
        .expect("job stored");

        let service = Arc::new(ApplicationService::new(
            applications.clone(),
            jobs,
            users,
            resumes,
        ));
        (service, applications)
    }

    pub(crate) fn build_router() -> (axum::Router, Arc<Service>) {
        let (service, _) = build_service();
        (application_router(service.clone()), service)
    }
}

mod transitions {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use talentdesk::board::applications::ApplicationStatus;
    use tower::ServiceExt;

    async fn patch_status(router: axum::Router, application_id: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("PATCH")
            .uri(format!("/api/v1/applications/{application_id}/update_status"))
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&bytes).expect("json");
        (status, payload)
    }

    #[tokio::test]
    async fn accepting_a_pending_application_returns_the_joined_view() {
        let (router, service) = build_router();
        let created = service
            .apply(&candidate_id(), &job_id(), day(2026, 2, 2))
            .expect("application filed");

        let (status, payload) = patch_status(router, &created.id.0, json!({ "status": "AC" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.get("status"), Some(&json!("AC")));
        assert_eq!(payload.get("status_label"), Some(&json!("Accepted")));
        assert_eq!(payload.get("job_title"), Some(&json!("Platform Engineer")));
        assert_eq!(
            payload.get("candidate_email"),
            Some(&json!("nadia@example.com"))
        );
    }

    #[tokio::test]
    async fn invalid_code_is_a_bad_request_and_state_is_unchanged() {
        let (router, service) = build_router();
        let created = service
            .apply(&candidate_id(), &job_id(), day(2026, 2, 2))
            .expect("application filed");

        let (status, payload) =
            patch_status(router, &created.id.0, json!({ "status": "XX" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload.get("error"), Some(&json!("Invalid status")));

        let unchanged = service.get(&created.id).expect("still readable");
        assert_eq!(unchanged.status, ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn omitted_status_is_a_bad_request() {
        let (router, service) = build_router();
        let created = service
            .apply(&candidate_id(), &job_id(), day(2026, 2, 2))
            .expect("application filed");

        let (status, payload) = patch_status(router, &created.id.0, json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload.get("error"), Some(&json!("status is required")));
    }

    #[tokio::test]
    async fn repeating_the_current_status_succeeds() {
        let (router, service) = build_router();
        let created = service
            .apply(&candidate_id(), &job_id(), day(2026, 2, 2))
            .expect("application filed");
        service
            .update_status(&created.id, Some("AC"))
            .expect("first transition");

        let (status, payload) =
            patch_status(router, &created.id.0, json!({ "status": "AC" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.get("status"), Some(&json!("AC")));
    }

    #[tokio::test]
    async fn unknown_application_is_not_found() {
        let (router, _) = build_router();
        let (status, payload) =
            patch_status(router, "app-missing", json!({ "status": "AC" })).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(payload.get("detail").is_some());
    }
}

mod intake {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn post(router: axum::Router, uri: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        let response = router.oneshot(request).await.expect("router dispatch");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&bytes).expect("json");
        (status, payload)
    }

    #[tokio::test]
    async fn applying_over_http_files_a_pending_application() {
        let (router, _) = build_router();
        let uri = format!(
            "/api/v1/candidate/{}/apply/{}",
            candidate_id().0,
            job_id().0
        );

        let (status, payload) = post(router, uri).await;

        assert_eq!(status, StatusCode::CREATED);
        let data = payload.get("data").expect("payload data");
        assert_eq!(data.get("status"), Some(&Value::String("PE".to_string())));
        assert_eq!(
            data.get("job_title"),
            Some(&Value::String("Platform Engineer".to_string()))
        );
    }

    #[tokio::test]
    async fn double_application_is_rejected() {
        let (router, service) = build_router();
        service
            .apply(&candidate_id(), &job_id(), day(2026, 2, 2))
            .expect("first application filed");

        let uri = format!(
            "/api/v1/candidate/{}/apply/{}",
            candidate_id().0,
            job_id().0
        );
        let (status, payload) = post(router, uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            payload.get("detail"),
            Some(&Value::String(
                "You have already applied for this job".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn applying_to_a_missing_job_is_not_found() {
        let (router, _) = build_router();
        let uri = format!("/api/v1/candidate/{}/apply/job-missing", candidate_id().0);

        let (status, _) = post(router, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn check_application_round_trips() {
        let (router, service) = build_router();
        let uri = format!(
            "/api/v1/candidate/{}/check_application/{}",
            candidate_id().0,
            job_id().0
        );

        let (status, payload) = {
            let request = Request::builder()
                .method("GET")
                .uri(uri.clone())
                .body(Body::empty())
                .expect("request");
            let response = router
                .clone()
                .oneshot(request)
                .await
                .expect("router dispatch");
            let status = response.status();
            let bytes = to_bytes(response.into_body(), 1024 * 1024)
                .await
                .expect("body");
            (status, serde_json::from_slice::<Value>(&bytes).expect("json"))
        };
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.get("has_applied"), Some(&Value::Bool(false)));

        service
            .apply(&candidate_id(), &job_id(), day(2026, 2, 2))
            .expect("application filed");

        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(payload.get("has_applied"), Some(&Value::Bool(true)));
    }
}
