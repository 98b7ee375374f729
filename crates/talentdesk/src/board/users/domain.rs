use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for directory accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role held by an account. The wire codes are stable and used by the
/// statistics read side to partition counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Recruiter,
    Candidate,
}

impl UserRole {
    pub const fn code(self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Recruiter => "RECRUITER",
            UserRole::Candidate => "CANDIDATE",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Recruiter => "Recruiter",
            UserRole::Candidate => "Candidate",
        }
    }
}

/// A directory account. The `company`/`position` fields only carry data for
/// recruiters; they stay `None` for everyone else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub joined_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// Payload for admin-driven account creation. The role is forced by the
/// collection the request lands on, never by the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUserAccount {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}
