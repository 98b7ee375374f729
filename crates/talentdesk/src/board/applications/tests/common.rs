use std::sync::Arc;

use chrono::NaiveDate;

use crate::board::applications::service::ApplicationService;
use crate::board::jobs::{JobPosting, JobPostingId, JobRepository};
use crate::board::memory::{
    InMemoryApplicationRepository, InMemoryJobRepository, InMemoryResumeRepository,
    InMemoryUserRepository,
};
use crate::board::resumes::{ResumeId, ResumeRecord, ResumeRepository};
use crate::board::users::{UserAccount, UserId, UserRepository, UserRole};

pub(super) type Service = ApplicationService<
    InMemoryApplicationRepository,
    InMemoryJobRepository,
    InMemoryUserRepository,
    InMemoryResumeRepository,
>;

pub(super) struct Fixture {
    pub(super) service: Service,
    pub(super) applications: Arc<InMemoryApplicationRepository>,
    pub(super) candidate: UserId,
    pub(super) job: JobPostingId,
}

pub(super) fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).expect("valid date")
}

/// One recruiter with an open posting and one candidate with a résumé on
/// file, which is the minimum the intake path needs.
pub(super) fn fixture() -> Fixture {
    let users = Arc::new(InMemoryUserRepository::default());
    let resumes = Arc::new(InMemoryResumeRepository::default());
    let jobs = Arc::new(InMemoryJobRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());

    let recruiter = UserId("recruiter-tests-1".to_string());
    users
        .insert(UserAccount {
            id: recruiter.clone(),
            email: "laila@atlasworks.example".to_string(),
            name: "Laila Berrada".to_string(),
            role: UserRole::Recruiter,
            joined_on: day(2025, 11, 3),
            company: Some("Atlasworks".to_string()),
            position: Some("Talent Lead".to_string()),
        })
        .expect("recruiter stored");

    let candidate = UserId("candidate-tests-1".to_string());
    users
        .insert(UserAccount {
            id: candidate.clone(),
            email: "omar@example.com".to_string(),
            name: "Omar Haddad".to_string(),
            role: UserRole::Candidate,
            joined_on: day(2026, 1, 12),
            company: None,
            position: None,
        })
        .expect("candidate stored");

    resumes
        .insert(ResumeRecord {
            id: ResumeId("resume-tests-1".to_string()),
            user: Some(candidate.clone()),
            file_name: Some("omar-haddad.pdf".to_string()),
            name: Some("Omar Haddad".to_string()),
            email: Some("omar@example.com".to_string()),
            mobile_number: Some("+212600000001".to_string()),
            education: Some("Master".to_string()),
            skills: Some("Rust, SQL".to_string()),
            experience: None,
            uploaded_on: day(2026, 1, 15),
        })
        .expect("resume stored");

    let job = JobPostingId("job-tests-1".to_string());
    jobs.insert(JobPosting {
        id: job.clone(),
        recruiter,
        title: "Backend Engineer".to_string(),
        description: "Own the hiring pipeline services".to_string(),
        kind: Some("Full-time".to_string()),
        city: Some("Casablanca".to_string()),
        category: Some("Engineering".to_string()),
        company: Some("Atlasworks".to_string()),
        created_on: day(2026, 1, 20),
        open: true,
        headcount: 2,
    })
    .expect("job stored");

    let service = ApplicationService::new(
        applications.clone(),
        jobs.clone(),
        users.clone(),
        resumes.clone(),
    );

    Fixture {
        service,
        applications,
        candidate,
        job,
    }
}
