//! In-memory repository adapters backing the bundled service, the CLI demo,
//! and the test suites. Each serializes access with a `Mutex`, so the
//! stricter of the documented guarantees (last-write-wins on status updates)
//! holds trivially.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::board::applications::{ApplicationId, ApplicationRecord, ApplicationRepository};
use crate::board::jobs::{JobPosting, JobPostingId, JobRepository};
use crate::board::resumes::{ResumeId, ResumeRecord, ResumeRepository};
use crate::board::users::{UserAccount, UserId, UserRepository, UserRole};
use crate::board::RepositoryError;

#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    records: Arc<Mutex<HashMap<UserId, UserAccount>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let email_taken = guard
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&account.email));
        if guard.contains_key(&account.id) || email_taken {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn by_role(&self, role: UserRole) -> Result<Vec<UserAccount>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|account| account.role == role)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryResumeRepository {
    records: Arc<Mutex<HashMap<ResumeId, ResumeRecord>>>,
}

impl ResumeRepository for InMemoryResumeRepository {
    fn insert(&self, record: ResumeRecord) -> Result<ResumeRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let owner_taken = record.user.as_ref().is_some_and(|user| {
            guard
                .values()
                .any(|existing| existing.user.as_ref() == Some(user))
        });
        if guard.contains_key(&record.id) || owner_taken {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ResumeRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ResumeId) -> Result<Option<ResumeRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_user(&self, user: &UserId) -> Result<Option<ResumeRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|record| record.user.as_ref() == Some(user))
            .cloned())
    }

    fn all(&self) -> Result<Vec<ResumeRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn delete_for_user(&self, user: &UserId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.retain(|_, record| record.user.as_ref() != Some(user));
        Ok(())
    }

    fn upload_dates(&self) -> Result<Vec<NaiveDate>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().map(|record| record.uploaded_on).collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryJobRepository {
    records: Arc<Mutex<HashMap<JobPostingId, JobPosting>>>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, posting: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&posting.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(posting.id.clone(), posting.clone());
        Ok(posting)
    }

    fn update(&self, posting: JobPosting) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&posting.id) {
            guard.insert(posting.id.clone(), posting);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &JobPostingId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &JobPostingId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn for_recruiter(&self, recruiter: &UserId) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|posting| posting.recruiter == *recruiter)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let pair_taken = guard
            .values()
            .any(|existing| existing.job == record.job && existing.candidate == record.candidate);
        if guard.contains_key(&record.id) || pair_taken {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn for_candidate(&self, candidate: &UserId) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.candidate == *candidate)
            .cloned()
            .collect())
    }

    fn for_job(&self, job: &JobPostingId) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.job == *job)
            .cloned()
            .collect())
    }

    fn exists(&self, job: &JobPostingId, candidate: &UserId) -> Result<bool, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .any(|record| record.job == *job && record.candidate == *candidate))
    }

    fn delete_for_candidate(&self, candidate: &UserId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.retain(|_, record| record.candidate != *candidate);
        Ok(())
    }

    fn delete_for_job(&self, job: &JobPostingId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.retain(|_, record| record.job != *job);
        Ok(())
    }

    fn applied_dates(&self) -> Result<Vec<NaiveDate>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().map(|record| record.applied_on).collect())
    }
}
