use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;

use talentdesk::board::applications::ApplicationService;
use talentdesk::board::jobs::JobService;
use talentdesk::board::memory::{
    InMemoryApplicationRepository, InMemoryJobRepository, InMemoryResumeRepository,
    InMemoryUserRepository,
};
use talentdesk::board::resumes::{ExtractError, ExtractedResume, ResumeService, ResumeTextExtractor};
use talentdesk::board::stats::StatsService;
use talentdesk::board::users::UserDirectoryService;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Extractor used until a real parsing engine is wired in: it derives the
/// candidate name from the file stem and leaves every other field empty, so
/// the intake path stays exercisable end to end.
#[derive(Default, Clone)]
pub(crate) struct FileNameExtractor;

impl ResumeTextExtractor for FileNameExtractor {
    fn extract(&self, file_name: &str) -> Result<ExtractedResume, ExtractError> {
        let stem = file_name
            .rsplit('/')
            .next()
            .unwrap_or(file_name)
            .trim_end_matches(".pdf")
            .trim_end_matches(".docx");
        if stem.is_empty() {
            return Err(ExtractError::Unreadable(file_name.to_string()));
        }

        let name = stem
            .split(['-', '_', ' '])
            .filter(|part| !part.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(ExtractedResume {
            name: (!name.is_empty()).then_some(name),
            ..ExtractedResume::default()
        })
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub(crate) type Users = UserDirectoryService<
    InMemoryUserRepository,
    InMemoryResumeRepository,
    InMemoryJobRepository,
    InMemoryApplicationRepository,
>;
pub(crate) type Resumes =
    ResumeService<InMemoryResumeRepository, InMemoryUserRepository, FileNameExtractor>;
pub(crate) type Jobs = JobService<InMemoryJobRepository, InMemoryApplicationRepository>;
pub(crate) type Applications = ApplicationService<
    InMemoryApplicationRepository,
    InMemoryJobRepository,
    InMemoryUserRepository,
    InMemoryResumeRepository,
>;
pub(crate) type Stats = StatsService<
    InMemoryUserRepository,
    InMemoryResumeRepository,
    InMemoryJobRepository,
    InMemoryApplicationRepository,
>;

/// The whole service graph over one set of in-memory stores.
pub(crate) struct BoardServices {
    pub(crate) directory: Arc<Users>,
    pub(crate) resumes: Arc<Resumes>,
    pub(crate) jobs: Arc<Jobs>,
    pub(crate) applications: Arc<Applications>,
    pub(crate) stats: Arc<Stats>,
}

pub(crate) fn build_board() -> BoardServices {
    let users = Arc::new(InMemoryUserRepository::default());
    let resumes = Arc::new(InMemoryResumeRepository::default());
    let jobs = Arc::new(InMemoryJobRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let extractor = Arc::new(FileNameExtractor);

    BoardServices {
        directory: Arc::new(UserDirectoryService::new(
            users.clone(),
            resumes.clone(),
            jobs.clone(),
            applications.clone(),
        )),
        resumes: Arc::new(ResumeService::new(
            resumes.clone(),
            users.clone(),
            extractor,
        )),
        jobs: Arc::new(JobService::new(jobs.clone(), applications.clone())),
        applications: Arc::new(ApplicationService::new(
            applications.clone(),
            jobs.clone(),
            users.clone(),
            resumes.clone(),
        )),
        stats: Arc::new(StatsService::new(users, resumes, jobs, applications)),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
