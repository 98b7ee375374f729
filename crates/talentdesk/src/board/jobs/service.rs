use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{
    BoardFilter, FacetEntry, JobPosting, JobPostingId, JobPostingUpdate, NewJobPosting,
};
use super::repository::JobRepository;
use crate::board::applications::repository::ApplicationRepository;
use crate::board::pagination::{paginate, Page, PageRequest};
use crate::board::users::UserId;
use crate::board::RepositoryError;

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobPostingId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobPostingId(format!("job-{id:06}"))
}

const LATEST_BOARD_LIMIT: usize = 6;

/// Job-posting workflows: the public board plus recruiter/admin management.
pub struct JobService<J, A> {
    jobs: Arc<J>,
    applications: Arc<A>,
}

impl<J, A> JobService<J, A>
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(jobs: Arc<J>, applications: Arc<A>) -> Self {
        Self { jobs, applications }
    }

    pub fn create(
        &self,
        recruiter: &UserId,
        posting: NewJobPosting,
        created_on: NaiveDate,
    ) -> Result<JobPosting, JobError> {
        let stored = self.jobs.insert(JobPosting {
            id: next_job_id(),
            recruiter: recruiter.clone(),
            title: posting.title,
            description: posting.description,
            kind: posting.kind,
            city: posting.city,
            category: posting.category,
            company: posting.company,
            created_on,
            open: posting.open,
            headcount: posting.headcount,
        })?;
        Ok(stored)
    }

    /// Applies a partial update. When `acting` is given (recruiter routes)
    /// the posting must belong to them; admin routes pass `None`.
    pub fn update(
        &self,
        acting: Option<&UserId>,
        id: &JobPostingId,
        update: JobPostingUpdate,
    ) -> Result<JobPosting, JobError> {
        let mut posting = self.fetch(id)?;
        if let Some(user) = acting {
            if posting.recruiter != *user {
                return Err(JobError::NotOwner);
            }
        }

        apply_update(&mut posting, update);
        self.jobs.update(posting.clone())?;
        Ok(posting)
    }

    /// Removes a posting and every application filed against it.
    pub fn delete(&self, acting: Option<&UserId>, id: &JobPostingId) -> Result<(), JobError> {
        let posting = self.fetch(id)?;
        if let Some(user) = acting {
            if posting.recruiter != *user {
                return Err(JobError::NotOwner);
            }
        }

        self.applications.delete_for_job(id)?;
        self.jobs.delete(id)?;
        Ok(())
    }

    pub fn fetch(&self, id: &JobPostingId) -> Result<JobPosting, JobError> {
        self.jobs
            .fetch(id)?
            .ok_or_else(|| JobError::UnknownPosting(id.clone()))
    }

    /// An open posting for the public detail view; closed postings 404.
    pub fn fetch_open(&self, id: &JobPostingId) -> Result<JobPosting, JobError> {
        let posting = self.fetch(id)?;
        if posting.open {
            Ok(posting)
        } else {
            Err(JobError::UnknownPosting(id.clone()))
        }
    }

    /// Open postings for the public board, newest first.
    pub fn board(&self, filter: &BoardFilter) -> Result<Vec<JobPosting>, JobError> {
        let mut postings = self.jobs.all()?;
        postings.retain(|posting| posting.open);

        if let Some(keywords) = normalized(&filter.keywords) {
            postings.retain(|posting| {
                posting.title.to_lowercase().contains(&keywords)
                    || posting.description.to_lowercase().contains(&keywords)
            });
        }
        if let Some(location) = normalized(&filter.location) {
            postings.retain(|posting| field_equals(&posting.city, &location));
        }
        if let Some(category) = normalized(&filter.category) {
            postings.retain(|posting| field_equals(&posting.category, &category));
        }

        sort_newest_first(&mut postings);
        Ok(postings)
    }

    /// The newest handful of open postings for the landing page.
    pub fn latest(&self) -> Result<Vec<JobPosting>, JobError> {
        let mut postings = self.jobs.all()?;
        postings.retain(|posting| posting.open);
        sort_newest_first(&mut postings);
        postings.truncate(LATEST_BOARD_LIMIT);
        Ok(postings)
    }

    /// Recruiter/admin listing: every posting (any status), optionally owned
    /// by one recruiter, with search and the `all`-aware facet filters.
    pub fn managed(
        &self,
        owner: Option<&UserId>,
        search: Option<&str>,
        location: Option<&str>,
        category: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<JobPosting>, JobError> {
        let mut postings = match owner {
            Some(user) => self.jobs.for_recruiter(user)?,
            None => self.jobs.all()?,
        };

        if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
            let needle = term.to_lowercase();
            postings.retain(|posting| {
                posting.title.to_lowercase().contains(&needle)
                    || posting.description.to_lowercase().contains(&needle)
                    || posting
                        .city
                        .as_deref()
                        .is_some_and(|city| city.to_lowercase().contains(&needle))
                    || posting
                        .category
                        .as_deref()
                        .is_some_and(|category| category.to_lowercase().contains(&needle))
            });
        }

        if let Some(location) = facet_filter(location) {
            postings.retain(|posting| field_equals(&posting.city, &location));
        }
        if let Some(category) = facet_filter(category) {
            postings.retain(|posting| field_equals(&posting.category, &category));
        }

        sort_newest_first(&mut postings);
        Ok(paginate(postings, page))
    }

    pub fn locations(&self) -> Result<Vec<FacetEntry>, JobError> {
        self.facet(|posting| posting.city.clone())
    }

    pub fn categories(&self) -> Result<Vec<FacetEntry>, JobError> {
        self.facet(|posting| posting.category.clone())
    }

    fn facet<F>(&self, value_of: F) -> Result<Vec<FacetEntry>, JobError>
    where
        F: Fn(&JobPosting) -> Option<String>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for posting in self.jobs.all()? {
            if let Some(value) = value_of(&posting).filter(|value| !value.trim().is_empty()) {
                *counts.entry(value).or_default() += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(ranked
            .into_iter()
            .enumerate()
            .map(|(index, (name, _))| FacetEntry {
                id: (index + 1).to_string(),
                name,
            })
            .collect())
    }
}

fn apply_update(posting: &mut JobPosting, update: JobPostingUpdate) {
    if let Some(title) = update.title {
        posting.title = title;
    }
    if let Some(description) = update.description {
        posting.description = description;
    }
    if let Some(kind) = update.kind {
        posting.kind = Some(kind);
    }
    if let Some(city) = update.city {
        posting.city = Some(city);
    }
    if let Some(category) = update.category {
        posting.category = Some(category);
    }
    if let Some(company) = update.company {
        posting.company = Some(company);
    }
    if let Some(open) = update.open {
        posting.open = open;
    }
    if let Some(headcount) = update.headcount {
        posting.headcount = headcount;
    }
}

fn sort_newest_first(postings: &mut [JobPosting]) {
    postings.sort_by(|a, b| {
        b.created_on
            .cmp(&a.created_on)
            .then_with(|| b.id.0.cmp(&a.id.0))
    });
}

fn normalized(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

/// Management filters treat the literal `all` as "no filter".
fn facet_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("all"))
        .map(str::to_lowercase)
}

fn field_equals(field: &Option<String>, expected_lowercase: &str) -> bool {
    field
        .as_deref()
        .is_some_and(|value| value.to_lowercase() == expected_lowercase)
}

/// Error raised by posting workflows.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("job posting {0} was not found")]
    UnknownPosting(JobPostingId),
    #[error("You do not have permission to modify this job posting")]
    NotOwner,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
