//! Accrual event scheduler.
//!
//! Produces the ordered accrual event dates for a calendar year, and pairs
//! each date with its computed amount and its posted amount (the manual
//! override for that date-key when one exists).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::accrual::accrual_between;
use crate::calendar::{add_days, format_date, month_end};
use crate::plan::{Mode, Period, Policy};

/// One scheduled grant of hours. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualEvent {
    pub date: NaiveDate,
    /// Lookup key for overrides: the event date as `YYYY-MM-DD`.
    pub key: String,
    /// Policy-determined amount for the span ending at this event.
    pub computed: f64,
    /// Amount actually posted: the override for `key` when set, else
    /// `computed`.
    pub posted: f64,
}

/// Ascending, duplicate-free accrual event dates for `year`, each on or
/// before Dec 31 of that year.
///
/// Month-end schedules filter out dates before `start`. Stepped schedules
/// (weekly, biweekly, custom) walk forward from `start` and always close the
/// year with a terminal Dec 31 event, even mid-step; a start date outside
/// `year` contributes only that terminal event.
pub fn accrual_event_dates(policy: &Policy, year: i32, start: NaiveDate) -> Vec<NaiveDate> {
    let eoy = month_end(year, 12);
    match (policy.mode, policy.period) {
        (Mode::PerYear, _) | (Mode::PerPeriod, Period::Monthly) => (1..=12)
            .map(|month| month_end(year, month))
            .filter(|d| *d >= start && *d <= eoy)
            .collect(),
        (Mode::PerPeriod, Period::SemiMonthly) => {
            let mut events = Vec::with_capacity(24);
            for month in 1..=12 {
                if let Some(mid) = NaiveDate::from_ymd_opt(year, month, 15) {
                    if mid >= start && mid <= eoy {
                        events.push(mid);
                    }
                }
                let last = month_end(year, month);
                if last >= start && last <= eoy {
                    events.push(last);
                }
            }
            events.sort();
            events
        }
        (Mode::PerPeriod, period) => {
            let step = period.step_days(policy.custom_days);
            let mut events = Vec::new();
            let mut date = start;
            while date.year() == year && date <= eoy {
                date = add_days(date, step);
                if date > eoy {
                    break;
                }
                events.push(date);
            }
            if events.last().map_or(true, |last| *last < eoy) {
                events.push(eoy);
            }
            events
        }
    }
}

/// Accrual events for `year` with computed and posted amounts. Each event's
/// computed amount covers the span from the previous event (or `start` for
/// the first) to its date. Pure and deterministic.
pub fn scheduled_events(policy: &Policy, year: i32, start: NaiveDate) -> Vec<AccrualEvent> {
    let mut last_cut = start;
    accrual_event_dates(policy, year, start)
        .into_iter()
        .map(|date| {
            let computed = accrual_between(policy, last_cut, date);
            last_cut = date;
            let key = format_date(date);
            let posted = policy.overrides.get(&key).copied().unwrap_or(computed);
            AccrualEvent {
                date,
                key,
                computed,
                posted,
            }
        })
        .collect()
}
