use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{NewUserAccount, UserAccount, UserId, UserRole};
use super::repository::UserRepository;
use crate::board::applications::repository::ApplicationRepository;
use crate::board::jobs::repository::JobRepository;
use crate::board::pagination::{paginate, Page, PageRequest};
use crate::board::resumes::repository::ResumeRepository;
use crate::board::RepositoryError;

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    let id = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    UserId(format!("user-{id:06}"))
}

/// Admin-facing directory service. Removal cascades through the account's
/// owned records so no résumé, posting, or application outlives its owner.
pub struct UserDirectoryService<U, R, J, A> {
    users: Arc<U>,
    resumes: Arc<R>,
    jobs: Arc<J>,
    applications: Arc<A>,
}

impl<U, R, J, A> UserDirectoryService<U, R, J, A>
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

    /// Registers an account under the given role, assigning a fresh id.
    pub fn create(
        &self,
        role: UserRole,
        account: NewUserAccount,
        joined_on: NaiveDate,
    ) -> Result<UserAccount, DirectoryError> {
        let stored = self.users.insert(UserAccount {
            id: next_user_id(),
            email: account.email,
            name: account.name,
            role,
            joined_on,
            company: account.company,
            position: account.position,
        })?;
        Ok(stored)
    }

    pub fn fetch(&self, id: &UserId) -> Result<UserAccount, DirectoryError> {
        self.users
            .fetch(id)?
            .ok_or_else(|| DirectoryError::UnknownUser(id.clone()))
    }

    /// Lists accounts of one role, optionally narrowed by a free-text search
    /// over name and email (plus company and position for recruiters).
    pub fn list(
        &self,
        role: UserRole,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<UserAccount>, DirectoryError> {
        let mut accounts = self.users.by_role(role)?;
        if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
            let needle = term.to_lowercase();
            accounts.retain(|account| matches_search(account, &needle));
        }
        accounts.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(paginate(accounts, page))
    }

    /// Deletes an account and everything hanging off it: a candidate's résumé
    /// and applications, or a recruiter's postings and their applications.
    pub fn remove(&self, id: &UserId) -> Result<(), DirectoryError> {
        let account = self.fetch(id)?;

        match account.role {
            UserRole::Candidate => {
                self.applications.delete_for_candidate(id)?;
                self.resumes.delete_for_user(id)?;
            }
            UserRole::Recruiter => {
                for posting in self.jobs.for_recruiter(id)? {
                    self.applications.delete_for_job(&posting.id)?;
                    self.jobs.delete(&posting.id)?;
                }
            }
            UserRole::Admin => {}
        }

        self.users.delete(id)?;
        Ok(())
    }
}

fn matches_search(account: &UserAccount, needle: &str) -> bool {
    let hit = |value: &str| value.to_lowercase().contains(needle);
    hit(&account.name)
        || hit(&account.email)
        || account.company.as_deref().is_some_and(|value| hit(value))
        || account.position.as_deref().is_some_and(|value| hit(value))
}

/// Error raised by the directory service.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("user {0} was not found")]
    UnknownUser(UserId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
