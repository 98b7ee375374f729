//! Job postings: the public board, facets, and recruiter/admin management.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    BoardFilter, FacetEntry, JobPosting, JobPostingId, JobPostingUpdate, NewJobPosting,
};
pub use repository::JobRepository;
pub use router::{board_router, job_management_router};
pub use service::{JobError, JobService};
