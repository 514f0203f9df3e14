//! Carryover cap applied at an annual reset boundary.

use chrono::{Datelike, Duration, NaiveDate};

use crate::calendar::parse_date;
use crate::plan::Policy;

/// Cap `balance` at the policy's carryover cap once `as_of` has reached this
/// year's reset boundary. Without a cap, or before the boundary, the balance
/// passes through unchanged.
pub fn apply_carryover(policy: &Policy, balance: f64, as_of: NaiveDate) -> f64 {
    let Some(cap) = policy.carry_cap else {
        return balance;
    };
    let (month, day) = match parse_date(&policy.carry_reset) {
        Some(reset) => (reset.month(), reset.day()),
        None => (1, 1),
    };
    if as_of >= reset_boundary(as_of.year(), month, day) {
        balance.min(cap)
    } else {
        balance
    }
}

/// The reset boundary for a given year. A day count past the month's end
/// rolls forward into the next month (Feb 29 in a non-leap year means Mar 1).
fn reset_boundary(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first + Duration::days(day as i64 - 1))
        .unwrap_or(NaiveDate::MIN)
}
