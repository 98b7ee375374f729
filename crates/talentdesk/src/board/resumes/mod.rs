//! Résumé pool: candidate records, the extraction port, and ATS CSV intake.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    education_terms, ExtractError, ExtractedResume, ResumeFieldsUpdate, ResumeId, ResumeRecord,
    ResumeTextExtractor,
};
pub use import::{AtsResumeImporter, ImportedResume, ResumeImportError};
pub use repository::ResumeRepository;
pub use router::resume_router;
pub use service::{ResumeError, ResumeService};
