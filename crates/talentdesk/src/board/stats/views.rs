use serde::Serialize;

/// Board-wide counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStatsView {
    pub admins_count: usize,
    pub recruiters_count: usize,
    pub candidates_count: usize,
    pub resumes_count: usize,
    pub offers_count: usize,
    pub applications_count: usize,
}

/// One recruiter's slice of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecruiterStatsView {
    pub offers_count: usize,
    pub applications_count: usize,
    pub open_offers_count: usize,
    pub closed_offers_count: usize,
    pub most_popular_job_title: String,
    pub least_popular_job_title: String,
}

/// One candidate's application history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateStatsView {
    pub applications_count: usize,
    pub accepted_applications_count: usize,
    pub rejected_applications_count: usize,
    pub pending_applications_count: usize,
    pub most_applied_job_category: String,
    pub most_applied_job_city: String,
}
