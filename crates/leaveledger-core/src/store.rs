//! Plan snapshot store.
//!
//! Holds the current immutable [`Plan`] snapshot plus a monotonic version
//! counter. Every mutation clones the snapshot, applies the change, and swaps
//! it in wholesale; derived views are recomputed from the current snapshot on
//! demand and never stored. Single-threaded, synchronous, no I/O: callers own
//! persistence, retry, and debounce policy entirely.

use chrono::NaiveDate;

use crate::calendar::{month_end, parse_date, previous_day};
use crate::error::Result;
use crate::plan::{new_entry_id, Entry, Mode, Period, Plan};
use crate::summary::{compute_eoy_balance, compute_row_calcs, compute_total_planned, RowCalc};
use crate::windows::{build_windows, WindowRow};

/// Display start of a planning year: Dec 31 of the previous year.
pub fn year_start(year: i32) -> NaiveDate {
    month_end(year - 1, 12)
}

/// Display end of a planning year: Dec 30.
pub fn year_end_display(year: i32) -> NaiveDate {
    previous_day(month_end(year, 12))
}

/// Exclusive end of a planning year: Dec 31, so the terminal accrual counts.
pub fn year_end_exclusive(year: i32) -> NaiveDate {
    month_end(year, 12)
}

/// Snapshot holder with copy-on-write mutations and a generation counter.
#[derive(Debug, Clone, Default)]
pub struct PlanStore {
    plan: Plan,
    version: u64,
}

impl PlanStore {
    /// Create a store with the default plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store over an existing snapshot.
    pub fn with_plan(plan: Plan) -> Self {
        Self { plan, version: 0 }
    }

    /// The current snapshot.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Generation counter; increments on every snapshot replacement.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn update(&mut self, mutate: impl FnOnce(&mut Plan)) {
        let mut next = self.plan.clone();
        mutate(&mut next);
        self.plan = next;
        self.version += 1;
    }

    // entry mutations

    /// Add an entry with a fresh id; returns the id.
    pub fn add_entry(&mut self, date: &str, hours: f64, note: &str) -> String {
        let id = new_entry_id();
        self.add_entry_raw(Entry {
            id: id.clone(),
            date: date.to_string(),
            hours,
            note: note.to_string(),
        });
        id
    }

    /// Add a fully-formed entry as-is.
    pub fn add_entry_raw(&mut self, entry: Entry) {
        self.update(|plan| plan.entries.push(entry));
    }

    /// Replace the entry with the same id. Returns false when no entry
    /// matches.
    pub fn update_entry(&mut self, entry: Entry) -> bool {
        let mut found = false;
        self.update(|plan| {
            if let Some(slot) = plan.entries.iter_mut().find(|e| e.id == entry.id) {
                *slot = entry;
                found = true;
            }
        });
        found
    }

    /// Delete an entry by id. Returns false when no entry matches.
    pub fn delete_entry(&mut self, id: &str) -> bool {
        let mut found = false;
        self.update(|plan| {
            let len = plan.entries.len();
            plan.entries.retain(|e| e.id != id);
            found = plan.entries.len() != len;
        });
        found
    }

    // policy mutations

    pub fn set_start_bal(&mut self, hours: f64) {
        self.update(|plan| plan.policy.start_bal = hours);
    }

    pub fn set_start_date(&mut self, date: &str) {
        self.update(|plan| plan.policy.start_date = date.to_string());
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.update(|plan| plan.policy.mode = mode);
    }

    pub fn set_hours_per_year(&mut self, hours: f64) {
        self.update(|plan| plan.policy.hours_per_year = hours);
    }

    pub fn set_hours_per_period(&mut self, hours: f64) {
        self.update(|plan| plan.policy.hours_per_period = hours);
    }

    pub fn set_period(&mut self, period: Period) {
        self.update(|plan| plan.policy.period = period);
    }

    /// Set the custom step length, clamped to at least one day.
    pub fn set_custom_days(&mut self, days: i64) {
        self.update(|plan| plan.policy.custom_days = days.max(1));
    }

    /// Set or clear the carryover cap.
    pub fn set_carry_cap(&mut self, cap: Option<f64>) {
        self.update(|plan| plan.policy.carry_cap = cap);
    }

    pub fn set_carry_reset(&mut self, date: &str) {
        self.update(|plan| plan.policy.carry_reset = date.to_string());
    }

    // overrides

    /// The posted amount for an event key: the override when set, else the
    /// caller-computed fallback.
    pub fn get_override(&self, key: &str, computed_fallback: f64) -> f64 {
        self.plan
            .policy
            .overrides
            .get(key)
            .copied()
            .unwrap_or(computed_fallback)
    }

    /// Set a manual accrual amount for an event key, or remove it with
    /// `None`. A key matching no scheduled event is silently inert.
    pub fn set_override(&mut self, key: &str, value: Option<f64>) {
        self.update(|plan| match value {
            Some(amount) => {
                plan.policy.overrides.insert(key.to_string(), amount);
            }
            None => {
                plan.policy.overrides.remove(key);
            }
        });
    }

    // persistence contract

    /// Serialize the current snapshot to pretty JSON.
    pub fn serialize(&self) -> Result<String> {
        self.plan.to_json()
    }

    /// Replace the snapshot from serialized JSON, merging missing fields
    /// with defaults and assigning ids to entries that lack them.
    pub fn load_json(&mut self, raw: &str) -> Result<()> {
        let plan = Plan::from_json(raw)?;
        self.plan = plan;
        self.version += 1;
        Ok(())
    }

    // derived views, recomputed from the current snapshot

    pub fn windows(&self, year: i32) -> Vec<WindowRow> {
        build_windows(&self.plan, year)
    }

    /// Total planned hours through the year's display end (Dec 30).
    pub fn total_planned(&self, year: i32) -> f64 {
        compute_total_planned(&self.plan, year_end_display(year))
    }

    /// End-of-year balance, including the terminal Dec 31 accrual.
    pub fn eoy_balance(&self, year: i32) -> f64 {
        compute_eoy_balance(&self.plan, year, year_end_exclusive(year))
    }

    pub fn row_calcs(&self, year: i32) -> Vec<RowCalc> {
        compute_row_calcs(&self.plan, year)
    }

    /// Whether a date string falls in the year's display range,
    /// `[Dec 31 of year-1, Dec 30 of year]`.
    pub fn in_year_range(&self, date: &str, year: i32) -> bool {
        parse_date(date)
            .map(|d| d >= year_start(year) && d <= year_end_display(year))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_boundaries() {
        assert_eq!(year_start(2024), parse_date("2023-12-31").unwrap());
        assert_eq!(year_end_display(2024), parse_date("2024-12-30").unwrap());
        assert_eq!(year_end_exclusive(2024), parse_date("2024-12-31").unwrap());
    }

    #[test]
    fn test_version_bumps_on_every_mutation() {
        let mut store = PlanStore::new();
        assert_eq!(store.version(), 0);
        let id = store.add_entry("2024-06-01", 8.0, "");
        store.set_start_bal(10.0);
        store.set_override("2024-01-15", Some(5.0));
        store.delete_entry(&id);
        assert_eq!(store.version(), 4);
    }

    #[test]
    fn test_entry_crud() {
        let mut store = PlanStore::new();
        let id = store.add_entry("2024-06-01", 8.0, "dentist");
        assert_eq!(store.plan().entries.len(), 1);

        let mut entry = store.plan().entries[0].clone();
        entry.hours = 4.0;
        assert!(store.update_entry(entry));
        assert_eq!(store.plan().entries[0].hours, 4.0);

        assert!(!store.update_entry(Entry {
            id: "missing".into(),
            date: "2024-06-01".into(),
            hours: 1.0,
            note: String::new(),
        }));

        assert!(store.delete_entry(&id));
        assert!(!store.delete_entry(&id));
        assert!(store.plan().entries.is_empty());
    }

    #[test]
    fn test_override_set_get_clear() {
        let mut store = PlanStore::new();
        assert_eq!(store.get_override("2024-01-15", 5.0), 5.0);
        store.set_override("2024-01-15", Some(2.0));
        assert_eq!(store.get_override("2024-01-15", 5.0), 2.0);
        store.set_override("2024-01-15", None);
        assert_eq!(store.get_override("2024-01-15", 5.0), 5.0);
    }

    #[test]
    fn test_custom_days_clamped() {
        let mut store = PlanStore::new();
        store.set_custom_days(-3);
        assert_eq!(store.plan().policy.custom_days, 1);
        store.set_custom_days(21);
        assert_eq!(store.plan().policy.custom_days, 21);
    }

    #[test]
    fn test_serialize_load_round_trip() {
        let mut store = PlanStore::new();
        store.set_period(Period::Biweekly);
        store.add_entry("2024-06-01", 8.0, "trip");
        let json = store.serialize().unwrap();

        let mut loaded = PlanStore::new();
        loaded.load_json(&json).unwrap();
        assert_eq!(loaded.plan(), store.plan());
    }

    #[test]
    fn test_load_assigns_missing_entry_ids() {
        let mut store = PlanStore::new();
        store
            .load_json(r#"{"entries":[{"date":"2024-06-01","hours":8},{"date":"2024-06-02","hours":4}]}"#)
            .unwrap();
        let entries = &store.plan().entries;
        assert!(entries.iter().all(|e| !e.id.is_empty()));
        assert_ne!(entries[0].id, entries[1].id);
    }

    #[test]
    fn test_in_year_range() {
        let store = PlanStore::new();
        assert!(store.in_year_range("2023-12-31", 2024));
        assert!(store.in_year_range("2024-12-30", 2024));
        assert!(!store.in_year_range("2024-12-31", 2024));
        assert!(!store.in_year_range("2023-12-30", 2024));
        assert!(!store.in_year_range("garbage", 2024));
    }

    #[test]
    fn test_derived_views_recompute_from_snapshot() {
        let mut store = PlanStore::new();
        store.set_start_date("2024-01-01");
        store.set_mode(Mode::PerPeriod);
        store.set_period(Period::SemiMonthly);
        store.set_hours_per_period(5.0);
        store.set_start_bal(40.0);

        let before = store.eoy_balance(2024);
        store.add_entry("2024-06-01", 24.0, "");
        let after = store.eoy_balance(2024);
        assert!((before - after - 24.0).abs() < 1e-9);
        assert_eq!(store.windows(2024).len(), 24);
        assert_eq!(store.row_calcs(2024).len(), 1);
    }
}
