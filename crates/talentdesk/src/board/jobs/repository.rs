use super::domain::{JobPosting, JobPostingId};
use crate::board::users::UserId;
use crate::board::RepositoryError;

/// Storage abstraction for job postings.
pub trait JobRepository: Send + Sync {
    fn insert(&self, posting: JobPosting) -> Result<JobPosting, RepositoryError>;
    fn update(&self, posting: JobPosting) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &JobPostingId) -> Result<Option<JobPosting>, RepositoryError>;
    fn delete(&self, id: &JobPostingId) -> Result<(), RepositoryError>;
    fn all(&self) -> Result<Vec<JobPosting>, RepositoryError>;
    fn for_recruiter(&self, recruiter: &UserId) -> Result<Vec<JobPosting>, RepositoryError>;
}
