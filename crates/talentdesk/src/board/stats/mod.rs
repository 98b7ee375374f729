//! The statistics read side: dashboard counters plus the cumulative
//! event-rate time series shared by résumé uploads and applications.

pub mod rates;
pub mod router;
pub mod service;
pub mod views;

pub use rates::{compute_rate_series, RatePeriod, RateSeriesPoint};
pub use router::stats_router;
pub use service::{StatsError, StatsService};
pub use views::{AdminStatsView, CandidateStatsView, RecruiterStatsView};
