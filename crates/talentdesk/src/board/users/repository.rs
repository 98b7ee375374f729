use super::domain::{UserAccount, UserId, UserRole};
use crate::board::RepositoryError;

/// Storage abstraction for the user directory.
///
/// `insert` must reject a duplicate id or a duplicate email with
/// [`RepositoryError::Conflict`]; `delete` reports a missing account with
/// [`RepositoryError::NotFound`].
pub trait UserRepository: Send + Sync {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError>;
    fn delete(&self, id: &UserId) -> Result<(), RepositoryError>;
    fn by_role(&self, role: UserRole) -> Result<Vec<UserAccount>, RepositoryError>;
}
