//! Aggregate calculators: planned totals, end-of-year balance replay, and
//! per-entry running balances.
//!
//! The replays walk entries and accrual events in date order with one
//! tie-break: when an entry falls exactly on an accrual date, the accrual
//! posts first, then the entry debits. This matches the windows' half-open
//! `[start, event)` membership.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::accrual::accrual_between;
use crate::carryover::apply_carryover;
use crate::plan::Plan;
use crate::schedule::{scheduled_events, AccrualEvent};
use crate::windows::dated_entries;

/// Running balance around one entry's debit. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowCalc {
    pub entry_id: String,
    /// Balance immediately before the debit.
    pub before: f64,
    /// Balance immediately after the debit.
    pub after: f64,
    /// Advisory flag: the debit never gets blocked, only flagged.
    pub ok: bool,
}

/// Sum of hours of valid entries dated on or before `cutoff_inclusive`.
pub fn compute_total_planned(plan: &Plan, cutoff_inclusive: NaiveDate) -> f64 {
    dated_entries(plan)
        .iter()
        .filter(|(date, _)| *date <= cutoff_inclusive)
        .map(|(_, entry)| entry.hours)
        .sum()
}

/// Replay the full timeline from the policy start date: carryover at every
/// accrual post, every entry debited in date order, and a final carryover at
/// `year_end_exclusive`. An unparseable policy start date yields zero.
pub fn compute_eoy_balance(plan: &Plan, year: i32, year_end_exclusive: NaiveDate) -> f64 {
    let policy = &plan.policy;
    let Some(start) = policy.parsed_start_date() else {
        return 0.0;
    };
    let events: Vec<AccrualEvent> = scheduled_events(policy, year, start)
        .into_iter()
        .filter(|ev| ev.date <= year_end_exclusive)
        .collect();

    let mut running = apply_carryover(
        policy,
        policy.start_bal + accrual_between(policy, start, start),
        start,
    );

    let mut next_event = 0;
    for (date, entry) in &dated_entries(plan) {
        while next_event < events.len() && events[next_event].date <= *date {
            let event = &events[next_event];
            running = apply_carryover(policy, running + event.posted, event.date);
            next_event += 1;
        }
        running -= entry.hours;
    }
    while next_event < events.len() {
        let event = &events[next_event];
        running = apply_carryover(policy, running + event.posted, event.date);
        next_event += 1;
    }
    apply_carryover(policy, running, year_end_exclusive)
}

/// Running balance before and after each entry's debit, in date order, with
/// an advisory overdraft flag.
pub fn compute_row_calcs(plan: &Plan, year: i32) -> Vec<RowCalc> {
    let policy = &plan.policy;
    let Some(start) = policy.parsed_start_date() else {
        return Vec::new();
    };
    let events = scheduled_events(policy, year, start);
    let entries = dated_entries(plan);

    let mut running = apply_carryover(
        policy,
        policy.start_bal + accrual_between(policy, start, start),
        start,
    );

    let mut out = Vec::with_capacity(entries.len());
    let mut next_event = 0;
    for (date, entry) in &entries {
        while next_event < events.len() && events[next_event].date <= *date {
            let event = &events[next_event];
            running = apply_carryover(policy, running + event.posted, event.date);
            next_event += 1;
        }
        let before = running;
        let after = before - entry.hours;
        out.push(RowCalc {
            entry_id: entry.id.clone(),
            before,
            after,
            ok: after >= 0.0,
        });
        running = after;
    }
    out
}
