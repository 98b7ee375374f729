//! Integration specifications for the public board, posting management, and
//! the directory cascades that keep the board consistent.

mod common {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use talentdesk::board::applications::ApplicationService;
    use talentdesk::board::jobs::{JobPosting, JobPostingId, JobRepository, JobService};
    use talentdesk::board::memory::{
        InMemoryApplicationRepository, InMemoryJobRepository, InMemoryResumeRepository,
        InMemoryUserRepository,
    };
    use talentdesk::board::resumes::{ResumeId, ResumeRecord, ResumeRepository};
    use talentdesk::board::users::{UserAccount, UserDirectoryService, UserId, UserRepository, UserRole};

    pub(crate) type Jobs = JobService<InMemoryJobRepository, InMemoryApplicationRepository>;
    pub(crate) type Applications = ApplicationService<
        InMemoryApplicationRepository,
        InMemoryJobRepository,
        InMemoryUserRepository,
        InMemoryResumeRepository,
    >;
    pub(crate) type Directory = UserDirectoryService<
        InMemoryUserRepository,
        InMemoryResumeRepository,
        InMemoryJobRepository,
        InMemoryApplicationRepository,
    >;

    pub(crate) struct Fixture {
        pub(crate) jobs: Arc<Jobs>,
        pub(crate) applications: Arc<Applications>,
        pub(crate) directory: Arc<Directory>,
        pub(crate) recruiter: UserId,
        pub(crate) other_recruiter: UserId,
        pub(crate) candidate: UserId,
    }

    pub(crate) fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, dom).expect("valid date")
    }

    fn posting(
        n: usize,
        recruiter: &UserId,
        title: &str,
        city: Option<&str>,
        category: Option<&str>,
        created_on: NaiveDate,
        open: bool,
    ) -> JobPosting {
        JobPosting {
            id: JobPostingId(format!("job-board-{n:04}")),
            recruiter: recruiter.clone(),
            title: title.to_string(),
            description: format!("{title} role on the hiring board"),
            kind: Some("Full-time".to_string()),
            city: city.map(str::to_string),
            category: category.map(str::to_string),
            company: Some("Atlasworks".to_string()),
            created_on,
            open,
            headcount: 1,
        }
    }

    pub(crate) fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::default());
        let resumes = Arc::new(InMemoryResumeRepository::default());
        let jobs_repo = Arc::new(InMemoryJobRepository::default());
        let applications_repo = Arc::new(InMemoryApplicationRepository::default());

        let recruiter = UserId("recruiter-board-1".to_string());
        let other_recruiter = UserId("recruiter-board-2".to_string());
        let candidate = UserId("candidate-board-1".to_string());

        users
            .insert(UserAccount {
                id: recruiter.clone(),
                email: "youssef@atlasworks.example".to_string(),
                name: "Youssef Amrani".to_string(),
                role: UserRole::Recruiter,
                joined_on: day(2025, 9, 1),
                company: Some("Atlasworks".to_string()),
                position: Some("Recruiter".to_string()),
            })
            .expect("recruiter stored");
        users
            .insert(UserAccount {
                id: other_recruiter.clone(),
                email: "imane@nordsud.example".to_string(),
                name: "Imane Raji".to_string(),
                role: UserRole::Recruiter,
                joined_on: day(2025, 9, 15),
                company: Some("NordSud".to_string()),
                position: Some("HR".to_string()),
            })
            .expect("recruiter stored");
        users
            .insert(UserAccount {
                id: candidate.clone(),
                email: "karim@example.com".to_string(),
                name: "Karim Ziani".to_string(),
                role: UserRole::Candidate,
                joined_on: day(2026, 1, 2),
                company: None,
                position: None,
            })
            .expect("candidate stored");

        resumes
            .insert(ResumeRecord {
                id: ResumeId("resume-board-1".to_string()),
                user: Some(candidate.clone()),
                file_name: Some("karim-ziani.pdf".to_string()),
                name: Some("Karim Ziani".to_string()),
                email: Some("karim@example.com".to_string()),
                mobile_number: None,
                education: Some("Licence".to_string()),
                skills: Some("Python, Rust".to_string()),
                experience: None,
                uploaded_on: day(2026, 1, 4),
            })
            .expect("resume stored");

        let listings = [
            posting(1, &recruiter, "Backend Engineer", Some("Casablanca"), Some("Engineering"), day(2026, 1, 10), true),
            posting(2, &recruiter, "Data Analyst", Some("Casablanca"), Some("Data"), day(2026, 1, 12), true),
            posting(3, &recruiter, "Office Manager", Some("Rabat"), Some("Operations"), day(2026, 1, 14), false),
            posting(4, &other_recruiter, "Frontend Engineer", Some("Rabat"), Some("Engineering"), day(2026, 1, 16), true),
            posting(5, &other_recruiter, "Backend Team Lead", Some("Tangier"), Some("Engineering"), day(2026, 1, 18), true),
            posting(6, &other_recruiter, "QA Engineer", Some("Casablanca"), Some("Engineering"), day(2026, 1, 20), true),
            posting(7, &other_recruiter, "Product Designer", None, Some("Design"), day(2026, 1, 22), true),
            posting(8, &other_recruiter, "Support Agent", Some("Rabat"), None, day(2026, 1, 24), true),
        ];
        for listing in listings {
            jobs_repo.insert(listing).expect("posting stored");
        }

        let jobs = Arc::new(JobService::new(jobs_repo.clone(), applications_repo.clone()));
        let applications = Arc::new(ApplicationService::new(
            applications_repo.clone(),
            jobs_repo.clone(),
            users.clone(),
            resumes.clone(),
        ));
        let directory = Arc::new(UserDirectoryService::new(
            users,
            resumes,
            jobs_repo,
            applications_repo,
        ));

        Fixture {
            jobs,
            applications,
            directory,
            recruiter,
            other_recruiter,
            candidate,
        }
    }
}

mod board {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use talentdesk::board::jobs::{board_router, BoardFilter};
    use tower::ServiceExt;

    #[tokio::test]
    async fn keyword_search_spans_title_and_description() {
        let fx = fixture();
        let hits = fx
            .jobs
            .board(&BoardFilter {
                keywords: Some("backend".to_string()),
                ..BoardFilter::default()
            })
            .expect("board listing");

        let titles: Vec<&str> = hits.iter().map(|posting| posting.title.as_str()).collect();
        assert_eq!(titles, ["Backend Team Lead", "Backend Engineer"]);
    }

    #[tokio::test]
    async fn closed_postings_never_reach_the_public_board() {
        let fx = fixture();
        let hits = fx.jobs.board(&BoardFilter::default()).expect("board listing");
        assert_eq!(hits.len(), 7);
        assert!(hits.iter().all(|posting| posting.open));

        // Newest first.
        for pair in hits.windows(2) {
            assert!(pair[0].created_on >= pair[1].created_on);
        }
    }

    #[tokio::test]
    async fn location_filter_is_case_insensitive_equality() {
        let fx = fixture();
        let hits = fx
            .jobs
            .board(&BoardFilter {
                location: Some("CASABLANCA".to_string()),
                ..BoardFilter::default()
            })
            .expect("board listing");
        assert_eq!(hits.len(), 3);
        assert!(hits
            .iter()
            .all(|posting| posting.city.as_deref() == Some("Casablanca")));
    }

    #[tokio::test]
    async fn latest_is_capped_at_six_open_postings() {
        let fx = fixture();
        let latest = fx.jobs.latest().expect("latest listing");
        assert_eq!(latest.len(), 6);
        assert_eq!(latest[0].title, "Support Agent");
    }

    #[tokio::test]
    async fn facets_rank_values_by_posting_count() {
        let fx = fixture();

        let locations = fx.jobs.locations().expect("locations facet");
        let names: Vec<&str> = locations.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["Casablanca", "Rabat", "Tangier"]);
        assert_eq!(locations[0].id, "1");

        let categories = fx.jobs.categories().expect("categories facet");
        assert_eq!(categories[0].name, "Engineering");
    }

    #[tokio::test]
    async fn the_board_is_served_over_http() {
        let fx = fixture();
        let router = board_router(fx.jobs.clone());

        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/job-postings?keywords=designer")
            .body(Body::empty())
            .expect("request");
        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Vec<Value> = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(payload.len(), 1);
        assert_eq!(
            payload[0].get("title"),
            Some(&Value::String("Product Designer".to_string()))
        );
        assert_eq!(
            payload[0].get("type"),
            Some(&Value::String("Full-time".to_string()))
        );
    }
}

mod management {
    use super::common::*;
    use talentdesk::board::jobs::{JobError, JobPostingId, JobPostingUpdate};
    use talentdesk::board::pagination::PageRequest;

    #[tokio::test]
    async fn recruiters_see_only_their_own_postings_paginated() {
        let fx = fixture();
        let page = fx
            .jobs
            .managed(
                Some(&fx.other_recruiter),
                None,
                None,
                None,
                PageRequest::from_query(Some(1), Some(3)),
            )
            .expect("managed listing");

        assert_eq!(page.count, 5);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.results.len(), 3);
        assert!(page
            .results
            .iter()
            .all(|posting| posting.recruiter == fx.other_recruiter));
    }

    #[tokio::test]
    async fn the_all_sentinel_disables_facet_filters() {
        let fx = fixture();
        let page = fx
            .jobs
            .managed(
                Some(&fx.recruiter),
                None,
                Some("All"),
                Some("all"),
                PageRequest::default(),
            )
            .expect("managed listing");
        assert_eq!(page.count, 3);
    }

    #[tokio::test]
    async fn updating_someone_elses_posting_is_forbidden() {
        let fx = fixture();
        let error = fx
            .jobs
            .update(
                Some(&fx.recruiter),
                &JobPostingId("job-board-0004".to_string()),
                JobPostingUpdate {
                    open: Some(false),
                    ..JobPostingUpdate::default()
                },
            )
            .expect_err("ownership enforced");
        assert!(matches!(error, JobError::NotOwner));
    }

    #[tokio::test]
    async fn admin_updates_skip_the_ownership_check() {
        let fx = fixture();
        let updated = fx
            .jobs
            .update(
                None,
                &JobPostingId("job-board-0004".to_string()),
                JobPostingUpdate {
                    open: Some(false),
                    ..JobPostingUpdate::default()
                },
            )
            .expect("admin update");
        assert!(!updated.open);
    }

    #[tokio::test]
    async fn deleting_a_posting_cascades_to_its_applications() {
        let fx = fixture();
        let job = JobPostingId("job-board-0001".to_string());
        fx.applications
            .apply(&fx.candidate, &job, day(2026, 2, 1))
            .expect("application filed");

        fx.jobs
            .delete(Some(&fx.recruiter), &job)
            .expect("posting removed");

        let remaining = fx
            .applications
            .for_candidate(&fx.candidate)
            .expect("listing");
        assert!(remaining.is_empty());
    }
}

mod directory {
    use super::common::*;
    use talentdesk::board::jobs::BoardFilter;
    use talentdesk::board::pagination::PageRequest;
    use talentdesk::board::users::UserRole;

    #[tokio::test]
    async fn recruiter_search_spans_company_and_position() {
        let fx = fixture();
        let page = fx
            .directory
            .list(UserRole::Recruiter, Some("nordsud"), PageRequest::default())
            .expect("directory listing");
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].name, "Imane Raji");
    }

    #[tokio::test]
    async fn removing_a_recruiter_takes_their_postings_and_applicants_along() {
        let fx = fixture();
        let job = talentdesk::board::jobs::JobPostingId("job-board-0004".to_string());
        fx.applications
            .apply(&fx.candidate, &job, day(2026, 2, 1))
            .expect("application filed");

        fx.directory
            .remove(&fx.other_recruiter)
            .expect("recruiter removed");

        let board = fx.jobs.board(&BoardFilter::default()).expect("board listing");
        assert!(board
            .iter()
            .all(|posting| posting.recruiter != fx.other_recruiter));
        assert!(fx
            .applications
            .for_candidate(&fx.candidate)
            .expect("listing")
            .is_empty());
    }

    #[tokio::test]
    async fn removing_a_candidate_drops_their_resume_and_applications() {
        let fx = fixture();
        let job = talentdesk::board::jobs::JobPostingId("job-board-0001".to_string());
        fx.applications
            .apply(&fx.candidate, &job, day(2026, 2, 1))
            .expect("application filed");

        fx.directory.remove(&fx.candidate).expect("candidate removed");

        assert!(fx
            .applications
            .for_candidate(&fx.candidate)
            .expect("listing")
            .is_empty());
        let page = fx
            .directory
            .list(UserRole::Candidate, None, PageRequest::default())
            .expect("directory listing");
        assert_eq!(page.count, 0);
    }
}
