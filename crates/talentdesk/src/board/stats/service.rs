use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use super::rates::{compute_rate_series, RatePeriod, RateSeriesPoint};
use super::views::{AdminStatsView, CandidateStatsView, RecruiterStatsView};
use crate::board::applications::{ApplicationRepository, ApplicationStatus};
use crate::board::jobs::JobRepository;
use crate::board::resumes::ResumeRepository;
use crate::board::users::{UserId, UserRepository, UserRole};
use crate::board::RepositoryError;

const NO_APPLICANTS_FALLBACK: &str = "No candidates have applied yet";
const NO_APPLICATIONS_FALLBACK: &str = "No applications have been submitted yet";

/// Read-only aggregation over the hiring board. Both rate series share one
/// generator and differ only in which event source feeds it; "today" is
/// always supplied by the caller so the series stays reproducible.
pub struct StatsService<U, R, J, A> {
    users: Arc<U>,
    resumes: Arc<R>,
    jobs: Arc<J>,
    applications: Arc<A>,
}

impl<U, R, J, A> StatsService<U, R, J, A>
where
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(users: Arc<U>, resumes: Arc<R>, jobs: Arc<J>, applications: Arc<A>) -> Self {
        Self {
            users,
            resumes,
            jobs,
            applications,
        }
    }

    /// Daily share of résumé uploads within the cumulative pool.
    pub fn registration_rate(
        &self,
        period: RatePeriod,
        today: NaiveDate,
    ) -> Result<Vec<RateSeriesPoint>, StatsError> {
        let events = self.resumes.upload_dates()?;
        Ok(compute_rate_series(events, period, today))
    }

    /// Daily share of filed applications within the cumulative total.
    pub fn application_rate(
        &self,
        period: RatePeriod,
        today: NaiveDate,
    ) -> Result<Vec<RateSeriesPoint>, StatsError> {
        let events = self.applications.applied_dates()?;
        Ok(compute_rate_series(events, period, today))
    }

    pub fn admin_summary(&self) -> Result<AdminStatsView, StatsError> {
        Ok(AdminStatsView {
            admins_count: self.users.by_role(UserRole::Admin)?.len(),
            recruiters_count: self.users.by_role(UserRole::Recruiter)?.len(),
            candidates_count: self.users.by_role(UserRole::Candidate)?.len(),
            resumes_count: self.resumes.all()?.len(),
            offers_count: self.jobs.all()?.len(),
            applications_count: self.applications.all()?.len(),
        })
    }

    pub fn recruiter_summary(&self, user: &UserId) -> Result<RecruiterStatsView, StatsError> {
        let postings = self.jobs.for_recruiter(user)?;
        let open_offers_count = postings.iter().filter(|posting| posting.open).count();
        let closed_offers_count = postings.len() - open_offers_count;

        let mut applications_count = 0;
        let mut popularity: Vec<(String, usize)> = Vec::new();
        for posting in &postings {
            let applicants = self.applications.for_job(&posting.id)?.len();
            applications_count += applicants;
            if applicants > 0 {
                popularity.push((posting.title.clone(), applicants));
            }
        }

        popularity.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let most_popular_job_title = popularity
            .first()
            .map(|(title, _)| title.clone())
            .unwrap_or_else(|| NO_APPLICANTS_FALLBACK.to_string());
        let least_popular_job_title = popularity
            .last()
            .map(|(title, _)| title.clone())
            .unwrap_or_else(|| NO_APPLICANTS_FALLBACK.to_string());

        Ok(RecruiterStatsView {
            offers_count: postings.len(),
            applications_count,
            open_offers_count,
            closed_offers_count,
            most_popular_job_title,
            least_popular_job_title,
        })
    }

    pub fn candidate_summary(&self, user: &UserId) -> Result<CandidateStatsView, StatsError> {
        let applications = self.applications.for_candidate(user)?;

        let count_with = |status: ApplicationStatus| {
            applications
                .iter()
                .filter(|record| record.status == status)
                .count()
        };

        let mut categories: HashMap<String, usize> = HashMap::new();
        let mut cities: HashMap<String, usize> = HashMap::new();
        for record in &applications {
            if let Some(posting) = self.jobs.fetch(&record.job)? {
                if let Some(category) = posting.category {
                    *categories.entry(category).or_default() += 1;
                }
                if let Some(city) = posting.city {
                    *cities.entry(city).or_default() += 1;
                }
            }
        }

        Ok(CandidateStatsView {
            applications_count: applications.len(),
            accepted_applications_count: count_with(ApplicationStatus::Accepted),
            rejected_applications_count: count_with(ApplicationStatus::Rejected),
            pending_applications_count: count_with(ApplicationStatus::Pending),
            most_applied_job_category: top_entry(categories),
            most_applied_job_city: top_entry(cities),
        })
    }
}

fn top_entry(counts: HashMap<String, usize>) -> String {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .next()
        .map(|(name, _)| name)
        .unwrap_or_else(|| NO_APPLICATIONS_FALLBACK.to_string())
}

/// Error raised by the statistics read side.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
