use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Trailing window the rate series is computed over, ending "today"
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatePeriod {
    Week,
    Month,
    Year,
}

impl RatePeriod {
    pub const fn window_days(self) -> i64 {
        match self {
            RatePeriod::Week => 7,
            RatePeriod::Month => 30,
            RatePeriod::Year => 365,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RatePeriod::Week => "week",
            RatePeriod::Month => "month",
            RatePeriod::Year => "year",
        }
    }

    /// Resolves a query-string value. Unrecognized input falls back to a
    /// week-long window; leniency here is deliberate and callers rely on it.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "month" => RatePeriod::Month,
            "year" => RatePeriod::Year,
            _ => RatePeriod::Week,
        }
    }
}

/// One day of the series. `rate` is a percentage in [0, 100] rounded to two
/// decimals; the serialized date reads `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateSeriesPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Builds the daily event-rate series over the trailing window.
///
/// The rate is the share of that day's events within the *running* cumulative
/// total: "what fraction of all events to date arrived today". Events before
/// the window only feed the starting cumulative count; events after `today`
/// are ignored. A day with a zero cumulative total reports a rate of 0, which
/// also covers the empty-input case. Early days over a sparse history are
/// intentionally volatile (one event after zero history reads 100%).
pub fn compute_rate_series<I>(events: I, period: RatePeriod, today: NaiveDate) -> Vec<RateSeriesPoint>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let window = period.window_days();
    let start = today - Duration::days(window - 1);

    let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut baseline: u64 = 0;
    for day in events {
        if day < start {
            baseline += 1;
        } else if day <= today {
            *daily.entry(day).or_insert(0) += 1;
        }
    }

    let mut points = Vec::with_capacity(window as usize);
    let mut cumulative = baseline;
    for offset in 0..window {
        let date = start + Duration::days(offset);
        let count = daily.get(&date).copied().unwrap_or(0);
        cumulative += count;
        let rate = if cumulative == 0 {
            0.0
        } else {
            round2(count as f64 * 100.0 / cumulative as f64)
        };
        points.push(RateSeriesPoint { date, rate });
    }

    points
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, dom).expect("valid date")
    }

    #[test]
    fn period_parsing_falls_back_to_week() {
        assert_eq!(RatePeriod::parse("week"), RatePeriod::Week);
        assert_eq!(RatePeriod::parse("MONTH"), RatePeriod::Month);
        assert_eq!(RatePeriod::parse(" year "), RatePeriod::Year);
        assert_eq!(RatePeriod::parse("quarter"), RatePeriod::Week);
        assert_eq!(RatePeriod::parse(""), RatePeriod::Week);
    }

    #[test]
    fn window_is_fully_materialized_in_order() {
        let today = day(2026, 3, 10);
        for (period, expected_len) in [
            (RatePeriod::Week, 7),
            (RatePeriod::Month, 30),
            (RatePeriod::Year, 365),
        ] {
            let points = compute_rate_series(Vec::new(), period, today);
            assert_eq!(points.len(), expected_len);
            assert_eq!(points.last().expect("non-empty").date, today);
            for pair in points.windows(2) {
                assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
            }
        }
    }

    #[test]
    fn empty_history_reports_zero_everywhere() {
        let points = compute_rate_series(Vec::new(), RatePeriod::Week, day(2026, 3, 10));
        assert!(points.iter().all(|point| point.rate == 0.0));
    }

    #[test]
    fn running_share_matches_the_documented_scenario() {
        // Two events, a quiet day, then three more: 2/2, 0/2, 3/5.
        let today = day(2026, 3, 10);
        let events = vec![
            day(2026, 3, 8),
            day(2026, 3, 8),
            day(2026, 3, 10),
            day(2026, 3, 10),
            day(2026, 3, 10),
        ];

        let points = compute_rate_series(events, RatePeriod::Week, today);
        assert_eq!(points.len(), 7);
        assert!(points[..4].iter().all(|point| point.rate == 0.0));
        assert_eq!(points[4].date, day(2026, 3, 8));
        assert_eq!(points[4].rate, 100.0);
        assert_eq!(points[5].rate, 0.0);
        assert_eq!(points[6].rate, 60.0);
    }

    #[test]
    fn baseline_only_history_keeps_rates_at_zero() {
        let today = day(2026, 3, 10);
        let events: Vec<NaiveDate> = (0..10).map(|_| day(2025, 6, 1)).collect();

        let points = compute_rate_series(events, RatePeriod::Week, today);
        assert!(points.iter().all(|point| point.rate == 0.0));
    }

    #[test]
    fn baseline_dampens_the_first_window_day() {
        let today = day(2026, 3, 10);
        let mut events: Vec<NaiveDate> = (0..3).map(|_| day(2025, 6, 1)).collect();
        events.push(today - Duration::days(6));

        let points = compute_rate_series(events, RatePeriod::Week, today);
        assert_eq!(points[0].rate, 25.0);
    }

    #[test]
    fn events_after_today_are_ignored() {
        let today = day(2026, 3, 10);
        let events = vec![day(2026, 3, 11), day(2026, 3, 12)];

        let points = compute_rate_series(events, RatePeriod::Week, today);
        assert!(points.iter().all(|point| point.rate == 0.0));
    }

    #[test]
    fn rates_stay_in_percentage_bounds_and_round_to_two_decimals() {
        let today = day(2026, 3, 10);
        let mut events = Vec::new();
        for offset in 0..7 {
            for _ in 0..=offset {
                events.push(today - Duration::days(offset));
            }
        }

        let points = compute_rate_series(events.clone(), RatePeriod::Week, today);
        for point in &points {
            assert!(point.rate >= 0.0 && point.rate <= 100.0);
            assert_eq!((point.rate * 100.0).round() / 100.0, point.rate);
        }

        // A single fresh event after no history reads as a 100% day.
        assert_eq!(points[0].rate, 100.0);
        // 1/(7+6+5+4+3+2+1) on the last day, rounded.
        assert_eq!(points[6].rate, 3.57);
    }

    #[test]
    fn series_agrees_with_a_prefix_sum_oracle() {
        let today = day(2026, 3, 10);
        let counts = [3u64, 0, 1, 5, 0, 0, 2];
        let mut events = Vec::new();
        for (offset, count) in counts.iter().rev().enumerate() {
            for _ in 0..*count {
                events.push(today - Duration::days(offset as i64));
            }
        }

        let points = compute_rate_series(events, RatePeriod::Week, today);
        let mut cumulative = 0u64;
        let mut previous_cumulative = 0u64;
        for (point, count) in points.iter().zip(counts) {
            cumulative += count;
            assert!(cumulative >= previous_cumulative);
            previous_cumulative = cumulative;

            let expected = if cumulative == 0 {
                0.0
            } else {
                (count as f64 * 100.0 / cumulative as f64 * 100.0).round() / 100.0
            };
            assert_eq!(point.rate, expected);
        }
    }

    #[test]
    fn identical_inputs_produce_identical_series() {
        let today = day(2026, 3, 10);
        let events = vec![day(2026, 3, 9), day(2026, 3, 9), day(2026, 3, 10)];

        let first = compute_rate_series(events.clone(), RatePeriod::Month, today);
        let second = compute_rate_series(events, RatePeriod::Month, today);
        assert_eq!(first, second);
    }
}
