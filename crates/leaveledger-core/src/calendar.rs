//! Local calendar date arithmetic.
//!
//! All dates are plain `NaiveDate` values: the planner works in the user's
//! local calendar and never touches timezones or times of day.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Parse a strict `YYYY-MM-DD` date. Returns `None` for anything else.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's date in the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days from `a` to `b`, clamped at zero when `b` precedes `a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().max(0)
}

/// Whole calendar months from `a` to `b`, decremented by one when `b`'s
/// day-of-month has not yet reached `a`'s. This is what "elapsed whole
/// periods" means for monthly accrual.
pub fn months_between(a: NaiveDate, b: NaiveDate) -> i64 {
    let months =
        (b.year() as i64 - a.year() as i64) * 12 + (b.month() as i64 - a.month() as i64);
    if b.day() < a.day() {
        months - 1
    } else {
        months
    }
}

/// The last calendar day of a month, e.g. 29 for February 2024.
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    month_end(year, month).day()
}

/// The month-end date for `(year, month)`, with `month` in `1..=12`.
pub fn month_end(year: i32, month: u32) -> NaiveDate {
    let month = month.clamp(1, 12);
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MIN)
}

/// The day before `date`.
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// Step a date forward by a number of days.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Format an hour amount for display, rounded half-up to two decimals.
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", (hours * 100.0).round() / 100.0)
}
