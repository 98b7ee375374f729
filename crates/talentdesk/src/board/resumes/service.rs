use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{
    education_terms, ExtractError, ResumeFieldsUpdate, ResumeId, ResumeRecord, ResumeTextExtractor,
};
use super::import::{AtsResumeImporter, ResumeImportError};
use super::repository::ResumeRepository;
use crate::board::pagination::{paginate, Page, PageRequest};
use crate::board::users::{UserId, UserRepository};
use crate::board::RepositoryError;

static RESUME_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_resume_id() -> ResumeId {
    let id = RESUME_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ResumeId(format!("resume-{id:06}"))
}

/// Résumé workflows: the candidate's own record plus the admin pool.
pub struct ResumeService<R, U, X> {
    resumes: Arc<R>,
    users: Arc<U>,
    extractor: Arc<X>,
}

impl<R, U, X> ResumeService<R, U, X>
where
    R: ResumeRepository + 'static,
    U: UserRepository + 'static,
    X: ResumeTextExtractor + 'static,
{
    pub fn new(resumes: Arc<R>, users: Arc<U>, extractor: Arc<X>) -> Self {
        Self {
            resumes,
            users,
            extractor,
        }
    }

    pub fn my_resume(&self, user: &UserId) -> Result<ResumeRecord, ResumeError> {
        self.resumes.for_user(user)?.ok_or(ResumeError::NoResume)
    }

    /// Edits the parsed fields in place, creating an empty record when the
    /// candidate has none yet.
    pub fn update_fields(
        &self,
        user: &UserId,
        update: ResumeFieldsUpdate,
        today: NaiveDate,
    ) -> Result<ResumeRecord, ResumeError> {
        let mut record = match self.resumes.for_user(user)? {
            Some(record) => record,
            None => self.resumes.insert(ResumeRecord {
                id: next_resume_id(),
                user: Some(user.clone()),
                file_name: None,
                name: None,
                email: None,
                mobile_number: None,
                education: None,
                skills: None,
                experience: None,
                uploaded_on: today,
            })?,
        };

        apply_update(&mut record, update);
        self.resumes.update(record.clone())?;
        Ok(record)
    }

    /// Candidate self-service upload: replaces the stored document, runs the
    /// extractor, and stores the joined fields. The displayed name stays the
    /// account name rather than whatever the extractor recovered.
    pub fn upload_for_candidate(
        &self,
        user: &UserId,
        file_name: &str,
        uploaded_on: NaiveDate,
    ) -> Result<ResumeRecord, ResumeError> {
        let account = self
            .users
            .fetch(user)?
            .ok_or_else(|| ResumeError::UnknownUser(user.clone()))?;
        let extracted = self.extractor.extract(file_name)?;

        let mut record = match self.resumes.for_user(user)? {
            Some(record) => record,
            None => self.resumes.insert(ResumeRecord {
                id: next_resume_id(),
                user: Some(user.clone()),
                file_name: None,
                name: None,
                email: None,
                mobile_number: None,
                education: None,
                skills: None,
                experience: None,
                uploaded_on,
            })?,
        };

        record.file_name = Some(file_name.to_string());
        record.name = Some(account.name);
        record.email = extracted.email.clone();
        record.mobile_number = extracted.mobile_number.clone();
        record.education = extracted.education_text();
        record.skills = extracted.skills_text();
        record.experience = extracted.experience_text();
        record.uploaded_on = uploaded_on;

        self.resumes.update(record.clone())?;
        Ok(record)
    }

    /// Admin bulk intake of unassigned résumés. Every file runs through the
    /// extractor; the response mirrors the original behavior of returning
    /// the whole pool afterwards.
    pub fn bulk_upload(
        &self,
        file_names: &[String],
        uploaded_on: NaiveDate,
    ) -> Result<Vec<ResumeRecord>, ResumeError> {
        if file_names.is_empty() {
            return Err(ResumeError::NoFiles);
        }

        for file_name in file_names {
            let extracted = self.extractor.extract(file_name)?;
            self.resumes.insert(ResumeRecord {
                id: next_resume_id(),
                user: None,
                file_name: Some(file_name.clone()),
                name: extracted.name.clone(),
                email: extracted.email.clone(),
                mobile_number: extracted.mobile_number.clone(),
                education: extracted.education_text(),
                skills: extracted.skills_text(),
                experience: extracted.experience_text(),
                uploaded_on,
            })?;
        }

        let mut pool = self.resumes.all()?;
        pool.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(pool)
    }

    /// Seeds the pool from an ATS CSV export. Returns how many records were
    /// stored.
    pub fn import_records<T: Read>(
        &self,
        reader: T,
        fallback_day: NaiveDate,
    ) -> Result<usize, ResumeError> {
        let imported = AtsResumeImporter::from_reader(reader, fallback_day)?;
        let count = imported.len();

        for row in imported {
            self.resumes.insert(ResumeRecord {
                id: next_resume_id(),
                user: None,
                file_name: Some(row.file_name),
                name: row.name,
                email: row.email,
                mobile_number: row.mobile_number,
                education: row.education,
                skills: row.skills,
                experience: row.experience,
                uploaded_on: row.uploaded_on,
            })?;
        }

        Ok(count)
    }

    /// The admin pool, narrowed by free-text search and the education-level
    /// buckets, newest ids last.
    pub fn directory(
        &self,
        search: Option<&str>,
        education_level: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<ResumeRecord>, ResumeError> {
        let mut pool = self.resumes.all()?;

        if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
            let needle = term.to_lowercase();
            pool.retain(|record| matches_search(record, &needle));
        }

        if let Some(terms) = education_level.and_then(education_terms) {
            pool.retain(|record| {
                record.education.as_deref().is_some_and(|education| {
                    let education = education.to_lowercase();
                    terms
                        .iter()
                        .any(|term| education.contains(&term.to_lowercase()))
                })
            });
        }

        pool.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(paginate(pool, page))
    }
}

fn apply_update(record: &mut ResumeRecord, update: ResumeFieldsUpdate) {
    if let Some(name) = update.name {
        record.name = Some(name);
    }
    if let Some(email) = update.email {
        record.email = Some(email);
    }
    if let Some(mobile_number) = update.mobile_number {
        record.mobile_number = Some(mobile_number);
    }
    if let Some(education) = update.education {
        record.education = Some(education);
    }
    if let Some(skills) = update.skills {
        record.skills = Some(skills);
    }
    if let Some(experience) = update.experience {
        record.experience = Some(experience);
    }
}

fn matches_search(record: &ResumeRecord, needle: &str) -> bool {
    let hit = |value: &Option<String>| {
        value
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(needle))
    };
    hit(&record.name)
        || hit(&record.email)
        || hit(&record.skills)
        || hit(&record.education)
        || hit(&record.experience)
}

/// Error raised by résumé workflows.
#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    #[error("You do not have a resume yet")]
    NoResume,
    #[error("No files provided")]
    NoFiles,
    #[error("user {0} was not found")]
    UnknownUser(UserId),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Import(#[from] ResumeImportError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
