use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::board::users::UserId;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobPostingId(pub String);

impl std::fmt::Display for JobPostingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A published job offer. `open` postings are visible on the public board;
/// closed ones survive only for the recruiter's own views and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobPostingId,
    pub recruiter: UserId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub company: Option<String>,
    pub created_on: NaiveDate,
    pub open: bool,
    pub headcount: u32,
}

/// Payload for creating a posting.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJobPosting {
    pub title: String,
    pub description: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default = "default_open")]
    pub open: bool,
    #[serde(default = "default_headcount")]
    pub headcount: u32,
}

fn default_open() -> bool {
    true
}

fn default_headcount() -> u32 {
    1
}

/// Partial update applied to a posting; only supplied fields are replaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPostingUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub open: Option<bool>,
    #[serde(default)]
    pub headcount: Option<u32>,
}

/// Visitor-facing board filter. `keywords` is a substring match over title
/// or description; `location` and `category` are case-insensitive equality.
#[derive(Debug, Clone, Default)]
pub struct BoardFilter {
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
}

/// One entry of the locations/categories facet listings, ranked by how many
/// postings carry the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetEntry {
    pub id: String,
    pub name: String,
}
