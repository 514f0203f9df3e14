//! Accrual rate calculator.
//!
//! Computes the hours accrued between two dates under the active policy.
//! The `PerYear` mode uses an inclusive day count (the start day counts),
//! which is intentional and load-bearing for window balances.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{days_between, month_end, months_between};
use crate::plan::{Mode, Period, Policy};

/// Hours accrued from `start` to `end` under `policy`.
pub fn accrual_between(policy: &Policy, start: NaiveDate, end: NaiveDate) -> f64 {
    match policy.mode {
        Mode::PerYear => {
            // inclusive: the start day itself accrues
            let days = days_between(start, end) + 1;
            policy.hours_per_year / 365.0 * days as f64
        }
        Mode::PerPeriod => {
            let rate = policy.hours_per_period;
            match policy.period {
                Period::SemiMonthly => rate * count_semi_monthly(start, end) as f64,
                period => rate * periods_between(period, policy.custom_days, start, end) as f64,
            }
        }
    }
}

/// Elapsed whole periods from `start` to `end` for non-semi-monthly periods.
pub fn periods_between(
    period: Period,
    custom_days: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> i64 {
    match period {
        Period::Monthly => months_between(start, end).max(0),
        period => days_between(start, end) / period.step_days(custom_days),
    }
}

/// Count semi-monthly anchors (the 15th and the month's last day) that fall
/// strictly after `start` and on/before `end`.
pub fn count_semi_monthly(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut count = 0;
    let mut year = start.year();
    let mut month = start.month();
    while year < end.year() || (year == end.year() && month <= end.month()) {
        if let Some(mid) = NaiveDate::from_ymd_opt(year, month, 15) {
            if mid > start && mid <= end {
                count += 1;
            }
        }
        let last = month_end(year, month);
        if last > start && last <= end {
            count += 1;
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    count
}
