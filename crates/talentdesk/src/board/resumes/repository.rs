use chrono::NaiveDate;

use super::domain::{ResumeId, ResumeRecord};
use crate::board::users::UserId;
use crate::board::RepositoryError;

/// Storage abstraction for the résumé pool.
///
/// At most one résumé exists per owning user; `for_user` resolves it.
/// `upload_dates` feeds the registration-rate series and must return the
/// upload day of every record, assigned or not, in no particular order.
pub trait ResumeRepository: Send + Sync {
    fn insert(&self, record: ResumeRecord) -> Result<ResumeRecord, RepositoryError>;
    fn update(&self, record: ResumeRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ResumeId) -> Result<Option<ResumeRecord>, RepositoryError>;
    fn for_user(&self, user: &UserId) -> Result<Option<ResumeRecord>, RepositoryError>;
    fn all(&self) -> Result<Vec<ResumeRecord>, RepositoryError>;
    fn delete_for_user(&self, user: &UserId) -> Result<(), RepositoryError>;
    fn upload_dates(&self) -> Result<Vec<NaiveDate>, RepositoryError>;
}
