use chrono::NaiveDate;

use super::domain::{ApplicationId, ApplicationRecord};
use crate::board::jobs::JobPostingId;
use crate::board::users::UserId;
use crate::board::RepositoryError;

/// Storage abstraction for applications.
///
/// `insert` must reject a second application for the same candidate+job pair
/// with [`RepositoryError::Conflict`]. `update` is a whole-record overwrite;
/// under concurrent writers the last one wins, which is the documented
/// contract for status updates. `applied_dates` feeds the application-rate
/// series and returns every record's submission day, in no particular order.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn for_candidate(&self, candidate: &UserId) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn for_job(&self, job: &JobPostingId) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn exists(&self, job: &JobPostingId, candidate: &UserId) -> Result<bool, RepositoryError>;
    fn delete_for_candidate(&self, candidate: &UserId) -> Result<(), RepositoryError>;
    fn delete_for_job(&self, job: &JobPostingId) -> Result<(), RepositoryError>;
    fn applied_dates(&self) -> Result<Vec<NaiveDate>, RepositoryError>;
}
