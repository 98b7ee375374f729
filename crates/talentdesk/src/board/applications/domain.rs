use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::board::jobs::JobPostingId;
use crate::board::resumes::{ResumeId, ResumeRecord};
use crate::board::users::UserId;

/// Identifier wrapper for job applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review status of an application. The two-letter wire codes are the
/// persisted vocabulary; nothing outside these three values is
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[serde(rename = "PE")]
    Pending,
    #[serde(rename = "AC")]
    Accepted,
    #[serde(rename = "RE")]
    Rejected,
}

impl ApplicationStatus {
    pub const fn code(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PE",
            ApplicationStatus::Accepted => "AC",
            ApplicationStatus::Rejected => "RE",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Resolves a wire code. Anything outside the closed vocabulary is
    /// rejected; there is no lenient fallback here.
    pub fn from_code(raw: &str) -> Option<Self> {
        match raw {
            "PE" => Some(ApplicationStatus::Pending),
            "AC" => Some(ApplicationStatus::Accepted),
            "RE" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

/// Persisted application row. One exists per candidate+job pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub job: JobPostingId,
    pub candidate: UserId,
    pub resume: ResumeId,
    pub applied_on: NaiveDate,
    pub status: ApplicationStatus,
}

/// Read-through view joining the application with its job title, candidate
/// identity, and the candidate's current résumé.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub resume: Option<ResumeRecord>,
    pub job_title: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub status: ApplicationStatus,
    pub status_label: &'static str,
    pub applied_on: NaiveDate,
}
