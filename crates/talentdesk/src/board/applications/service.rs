use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationView};
use super::repository::ApplicationRepository;
use crate::board::jobs::{JobPostingId, JobRepository};
use crate::board::resumes::ResumeRepository;
use crate::board::users::{UserId, UserRepository};
use crate::board::RepositoryError;

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Application intake and review: candidates apply, reviewers move the
/// status through its closed vocabulary.
pub struct ApplicationService<A, J, U, R> {
    applications: Arc<A>,
    jobs: Arc<J>,
    users: Arc<U>,
    resumes: Arc<R>,
}

impl<A, J, U, R> ApplicationService<A, J, U, R>
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserRepository + 'static,
    R: ResumeRepository + 'static,
{
    pub fn new(applications: Arc<A>, jobs: Arc<J>, users: Arc<U>, resumes: Arc<R>) -> Self {
        Self {
            applications,
            jobs,
            users,
            resumes,
        }
    }

    /// Files a new application. The posting must exist, the candidate must
    /// have a résumé on record, and only one application per candidate+job
    /// pair is allowed.
    pub fn apply(
        &self,
        candidate: &UserId,
        job: &JobPostingId,
        applied_on: NaiveDate,
    ) -> Result<ApplicationView, ApplicationError> {
        let posting = self
            .jobs
            .fetch(job)?
            .ok_or_else(|| ApplicationError::UnknownJob(job.clone()))?;
        let resume = self
            .resumes
            .for_user(candidate)?
            .ok_or(ApplicationError::MissingResume)?;

        if self.applications.exists(job, candidate)? {
            return Err(ApplicationError::AlreadyApplied);
        }

        let record = self
            .applications
            .insert(ApplicationRecord {
                id: next_application_id(),
                job: posting.id.clone(),
                candidate: candidate.clone(),
                resume: resume.id.clone(),
                applied_on,
                status: ApplicationStatus::Pending,
            })
            .map_err(|error| match error {
                RepositoryError::Conflict => ApplicationError::AlreadyApplied,
                other => ApplicationError::Repository(other),
            })?;

        self.view(&record)
    }

    /// Moves an application to the requested status.
    ///
    /// The write is a flat overwrite: any status may replace any other,
    /// including itself, and concurrent updates resolve last-write-wins at
    /// the store. Validation covers presence and vocabulary membership only.
    pub fn update_status(
        &self,
        id: &ApplicationId,
        requested: Option<&str>,
    ) -> Result<ApplicationView, ApplicationError> {
        let raw = requested
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or(ApplicationError::MissingStatus)?;
        let status = ApplicationStatus::from_code(raw)
            .ok_or_else(|| ApplicationError::InvalidStatus(raw.to_string()))?;

        let mut record = self
            .applications
            .fetch(id)?
            .ok_or_else(|| ApplicationError::UnknownApplication(id.clone()))?;

        record.status = status;
        self.applications.update(record.clone())?;
        self.view(&record)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<ApplicationView, ApplicationError> {
        let record = self
            .applications
            .fetch(id)?
            .ok_or_else(|| ApplicationError::UnknownApplication(id.clone()))?;
        self.view(&record)
    }

    /// Every application on the board, for the review queue.
    pub fn all(&self) -> Result<Vec<ApplicationView>, ApplicationError> {
        let mut records = self.applications.all()?;
        records.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        records.iter().map(|record| self.view(record)).collect()
    }

    pub fn for_candidate(
        &self,
        candidate: &UserId,
    ) -> Result<Vec<ApplicationView>, ApplicationError> {
        let mut records = self.applications.for_candidate(candidate)?;
        records.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        records.iter().map(|record| self.view(record)).collect()
    }

    /// Applicants for one posting. When `acting` is given (recruiter routes)
    /// the posting must belong to them.
    pub fn for_job(
        &self,
        job: &JobPostingId,
        acting: Option<&UserId>,
    ) -> Result<Vec<ApplicationView>, ApplicationError> {
        let posting = self
            .jobs
            .fetch(job)?
            .ok_or_else(|| ApplicationError::UnknownJob(job.clone()))?;
        if let Some(user) = acting {
            if posting.recruiter != *user {
                return Err(ApplicationError::NotOwner);
            }
        }

        let mut records = self.applications.for_job(job)?;
        records.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        records.iter().map(|record| self.view(record)).collect()
    }

    pub fn has_applied(
        &self,
        candidate: &UserId,
        job: &JobPostingId,
    ) -> Result<bool, ApplicationError> {
        self.jobs
            .fetch(job)?
            .ok_or_else(|| ApplicationError::UnknownJob(job.clone()))?;
        Ok(self.applications.exists(job, candidate)?)
    }

    fn view(&self, record: &ApplicationRecord) -> Result<ApplicationView, ApplicationError> {
        let posting = self
            .jobs
            .fetch(&record.job)?
            .ok_or_else(|| ApplicationError::UnknownJob(record.job.clone()))?;
        let candidate = self
            .users
            .fetch(&record.candidate)?
            .ok_or_else(|| ApplicationError::UnknownUser(record.candidate.clone()))?;
        let resume = self.resumes.for_user(&record.candidate)?;

        Ok(ApplicationView {
            id: record.id.clone(),
            resume,
            job_title: posting.title,
            candidate_name: candidate.name,
            candidate_email: candidate.email,
            status: record.status,
            status_label: record.status.label(),
            applied_on: record.applied_on,
        })
    }
}

/// Error raised by application workflows.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("status is required")]
    MissingStatus,
    #[error("Invalid status")]
    InvalidStatus(String),
    #[error("application {0} was not found")]
    UnknownApplication(ApplicationId),
    #[error("The job posting {0} was not found")]
    UnknownJob(JobPostingId),
    #[error("user {0} was not found")]
    UnknownUser(UserId),
    #[error("No resume found for your profile. Please add a resume first")]
    MissingResume,
    #[error("You have already applied for this job")]
    AlreadyApplied,
    #[error("You do not have permission to view applicants for this job posting")]
    NotOwner,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
