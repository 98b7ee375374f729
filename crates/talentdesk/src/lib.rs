//! Job-board backend library.
//!
//! The `board` module holds the hiring domain (users, résumés, job postings,
//! applications, statistics), each sub-module split into domain types, a
//! repository port, a service facade, and an axum router. Storage adapters
//! live with the deployable service; everything here is exercised against
//! in-memory implementations of the repository traits.

pub mod board;
pub mod config;
pub mod error;
pub mod telemetry;
