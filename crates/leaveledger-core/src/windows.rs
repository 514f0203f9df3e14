//! Window builder.
//!
//! Partitions the year into accrual-bounded windows. Each window runs from
//! one accrual event to the next, half-open: an entry dated exactly on an
//! accrual date belongs to the window that starts on that date, because the
//! accrual posts before same-day debits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::accrual::accrual_between;
use crate::calendar::{format_date, month_end, previous_day};
use crate::carryover::apply_carryover;
use crate::plan::{Entry, Plan};
use crate::schedule::scheduled_events;

/// One accrual-bounded window of the year. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRow {
    /// Inclusive window start, `YYYY-MM-DD`.
    pub start: String,
    /// Display end: the day before the accrual date.
    pub end_display: String,
    /// The accrual event date closing this window.
    pub accrual_date: String,
    /// Balance at the window start, after the previous event posted.
    pub start_bal: f64,
    /// Entries dated in `[start, accrual_date)`.
    pub items: Vec<Entry>,
    /// Sum of member entry hours.
    pub used: f64,
    /// Policy-computed accrual for the event (override-detection display).
    pub computed: f64,
    /// Override lookup key: the accrual date.
    pub key: String,
    /// Balance at the accrual date, before its accrual posts.
    pub end_bal: f64,
}

/// Entries with parseable dates, ascending by date, stable for ties.
pub fn entries_sorted(plan: &Plan) -> Vec<Entry> {
    dated_entries(plan).into_iter().map(|(_, e)| e).collect()
}

pub(crate) fn dated_entries(plan: &Plan) -> Vec<(NaiveDate, Entry)> {
    let mut dated: Vec<(NaiveDate, Entry)> = plan
        .entries
        .iter()
        .filter_map(|e| e.parsed_date().map(|d| (d, e.clone())))
        .collect();
    dated.sort_by_key(|(date, _)| *date);
    dated
}

/// Build the accrual windows for `year`.
///
/// The first window always starts on Dec 31 of the previous year, a fixed
/// display convention independent of the policy start date. An unparseable
/// policy start date yields no windows.
pub fn build_windows(plan: &Plan, year: i32) -> Vec<WindowRow> {
    let policy = &plan.policy;
    let Some(start_date) = policy.parsed_start_date() else {
        return Vec::new();
    };
    let events = scheduled_events(policy, year, start_date);
    let entries = dated_entries(plan);

    let mut window_start = month_end(year - 1, 12);
    let mut balance = apply_carryover(
        policy,
        policy.start_bal + accrual_between(policy, start_date, window_start),
        window_start,
    );

    let mut out = Vec::with_capacity(events.len());
    for event in &events {
        let items: Vec<Entry> = entries
            .iter()
            .filter(|(date, _)| *date >= window_start && *date < event.date)
            .map(|(_, entry)| entry.clone())
            .collect();
        let used: f64 = items.iter().map(|e| e.hours).sum();
        let before = balance - used;

        out.push(WindowRow {
            start: format_date(window_start),
            end_display: format_date(previous_day(event.date)),
            accrual_date: format_date(event.date),
            start_bal: balance,
            items,
            used,
            computed: event.computed,
            key: event.key.clone(),
            end_bal: apply_carryover(policy, before, event.date),
        });

        // the next window begins on the accrual date: accrual posts first
        window_start = event.date;
        balance = apply_carryover(policy, before + event.posted, event.date);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Mode, Period, Policy};

    fn semi_monthly_plan() -> Plan {
        Plan {
            policy: Policy {
                start_bal: 40.0,
                start_date: "2024-01-01".into(),
                mode: Mode::PerPeriod,
                hours_per_period: 5.0,
                period: Period::SemiMonthly,
                ..Policy::default()
            },
            entries: Vec::new(),
        }
    }

    fn entry(id: &str, date: &str, hours: f64) -> Entry {
        Entry {
            id: id.into(),
            date: date.into(),
            hours,
            note: String::new(),
        }
    }

    #[test]
    fn test_first_window_starts_previous_dec_31() {
        let windows = build_windows(&semi_monthly_plan(), 2024);
        assert_eq!(windows.len(), 24);
        assert_eq!(windows[0].start, "2023-12-31");
        assert_eq!(windows[0].accrual_date, "2024-01-15");
        assert_eq!(windows[0].end_display, "2024-01-14");
        assert_eq!(windows[0].start_bal, 40.0);
    }

    #[test]
    fn test_windows_are_contiguous() {
        let mut plan = semi_monthly_plan();
        plan.entries.push(entry("e1", "2024-04-02", 8.0));
        let windows = build_windows(&plan, 2024);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].accrual_date, pair[1].start);
        }
    }

    #[test]
    fn test_balances_chain_through_events() {
        let mut plan = semi_monthly_plan();
        plan.entries.push(entry("e1", "2024-01-20", 8.0));
        let windows = build_windows(&plan, 2024);

        // window 1: [12-31, 01-15), no entries, accrual 5 posts at its end
        assert_eq!(windows[0].used, 0.0);
        assert_eq!(windows[0].end_bal, 40.0);
        // window 2: [01-15, 01-31), holds the Jan 20 entry
        assert_eq!(windows[1].start_bal, 45.0);
        assert_eq!(windows[1].items.len(), 1);
        assert_eq!(windows[1].used, 8.0);
        assert_eq!(windows[1].end_bal, 37.0);
        // window 3 starts with the Jan 31 accrual posted
        assert_eq!(windows[2].start_bal, 42.0);
    }

    #[test]
    fn test_entry_on_accrual_date_belongs_to_next_window() {
        let mut plan = semi_monthly_plan();
        plan.entries.push(entry("e1", "2024-01-15", 8.0));
        let windows = build_windows(&plan, 2024);

        assert!(windows[0].items.is_empty());
        assert_eq!(windows[1].start, "2024-01-15");
        assert_eq!(windows[1].items.len(), 1);
        assert_eq!(windows[1].items[0].id, "e1");
    }

    #[test]
    fn test_override_replaces_posted_amount_only() {
        let mut plan = semi_monthly_plan();
        plan.policy.overrides.insert("2024-01-15".into(), 0.0);
        let windows = build_windows(&plan, 2024);

        // computed stays for override detection, posted drives the balance
        assert_eq!(windows[0].computed, 5.0);
        assert_eq!(windows[1].start_bal, 40.0);
        assert_eq!(windows[2].start_bal, 45.0);
    }

    #[test]
    fn test_unparseable_entry_dates_are_dropped() {
        let mut plan = semi_monthly_plan();
        plan.entries.push(entry("bad", "someday", 99.0));
        plan.entries.push(entry("e1", "2024-02-01", 8.0));
        let windows = build_windows(&plan, 2024);

        assert!(windows.iter().all(|w| w.items.iter().all(|e| e.id != "bad")));
        let total_used: f64 = windows.iter().map(|w| w.used).sum();
        assert_eq!(total_used, 8.0);
        assert_eq!(entries_sorted(&plan).len(), 1);
    }

    #[test]
    fn test_unparseable_start_date_yields_no_windows() {
        let mut plan = semi_monthly_plan();
        plan.policy.start_date = "never".into();
        assert!(build_windows(&plan, 2024).is_empty());
    }

    #[test]
    fn test_build_windows_is_pure() {
        let mut plan = semi_monthly_plan();
        plan.policy.carry_cap = Some(60.0);
        plan.entries.push(entry("e1", "2024-03-01", 12.0));
        plan.entries.push(entry("e2", "2024-03-01", 4.0));
        assert_eq!(build_windows(&plan, 2024), build_windows(&plan, 2024));
    }

    #[test]
    fn test_carryover_caps_window_balances_after_reset() {
        let mut plan = semi_monthly_plan();
        plan.policy.carry_cap = Some(42.0);
        plan.policy.carry_reset = "2024-01-01".into();
        let windows = build_windows(&plan, 2024);

        // every post-reset balance stays at or below the cap
        assert!(windows.iter().skip(1).all(|w| w.start_bal <= 42.0));
        assert_eq!(windows[1].start_bal, 42.0);
    }
}
