//! Reporting window arithmetic.
//!
//! # Responsibility
//! - Derive inclusive weekly/monthly date windows from a reference date.
//! - Provide the datetime bounds used by storage range queries.
//!
//! # Invariants
//! - Weekly windows start on a Monday and span exactly 7 days.
//! - Monthly windows span the full calendar month regardless of length.
//! - Both boundaries are inclusive; the lower bound is start-of-day and the
//!   upper bound is end-of-day.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Inclusive date window for one reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// Window for the ISO week containing `day` (Monday through Sunday).
    pub fn weekly_for(day: NaiveDate) -> Self {
        let start = day - Duration::days(i64::from(day.weekday().num_days_from_monday()));
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Window for the calendar month containing `day`.
    pub fn monthly_for(day: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(day.year(), day.month(), 1)
            .expect("first day of a valid month exists");
        let (next_year, next_month) = if day.month() == 12 {
            (day.year() + 1, 1)
        } else {
            (day.year(), day.month() + 1)
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("first day of a valid month exists")
            - Duration::days(1);
        Self { start, end }
    }

    /// Whether a calendar date falls inside the window, boundaries included.
    pub fn contains_date(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Start-of-day lower bound for timestamp range queries.
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// End-of-day upper bound for timestamp range queries.
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.end
            .and_time(NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).expect("valid time"))
    }

    /// `YYYY-MM` key for the month containing the window start.
    pub fn month_key(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }
}
