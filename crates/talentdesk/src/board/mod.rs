//! The hiring board domain: user directory, résumé pool, job postings,
//! applications, and the statistics read side.
//!
//! Every sub-module keeps the same layering: `domain` types, a `repository`
//! port the durable store implements, a `service` facade holding the
//! use-cases, and a `router` exposing them over HTTP.

pub mod applications;
pub mod jobs;
pub mod memory;
pub mod pagination;
pub mod resumes;
pub mod stats;
pub mod users;

/// Error enumeration for repository failures, shared by every storage port.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
