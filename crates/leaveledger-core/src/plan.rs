//! Plan data model and JSON mapping.
//!
//! A [`Plan`] is one immutable snapshot of the accrual policy plus the dated
//! debit entries. It serializes to the flat camelCase JSON document consumed
//! by persistence layers, and deserializes with default-merging: any missing
//! or malformed field falls back to its default rather than failing. Only a
//! non-object input is rejected.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::calendar;
use crate::error::{CoreError, Result};

/// How the accrual rate is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    PerYear,
    PerPeriod,
}

/// Accrual period kind for `PerPeriod` policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    Weekly,
    Biweekly,
    Monthly,
    SemiMonthly,
    Custom,
}

impl Period {
    /// Step length in days for stepped periods. A zero custom length falls
    /// back to 14; anything else is clamped to at least one day.
    pub fn step_days(&self, custom_days: i64) -> i64 {
        match self {
            Period::Weekly => 7,
            Period::Biweekly => 14,
            _ => {
                if custom_days == 0 {
                    14
                } else {
                    custom_days.max(1)
                }
            }
        }
    }
}

/// One dated debit against the balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub note: String,
}

impl Entry {
    /// The entry's calendar date, if parseable. Entries with unparseable
    /// dates are excluded from every computation.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        calendar::parse_date(&self.date)
    }
}

/// The accrual configuration, including manual overrides of computed
/// accrual amounts keyed by accrual-event date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Balance in hours at the policy start date.
    pub start_bal: f64,
    /// Policy start date, ISO `YYYY-MM-DD`.
    pub start_date: String,
    pub mode: Mode,
    /// Annual hour rate, used when `mode` is `PerYear`.
    pub hours_per_year: f64,
    /// Per-period hour rate, used when `mode` is `PerPeriod`.
    pub hours_per_period: f64,
    pub period: Period,
    /// Step length in days for the `Custom` period.
    pub custom_days: i64,
    /// Carryover cap in hours; `None` disables carryover entirely.
    pub carry_cap: Option<f64>,
    /// Carryover reset anniversary; only month and day are used.
    pub carry_reset: String,
    /// Manual accrual amounts keyed by event date (`YYYY-MM-DD`).
    pub overrides: BTreeMap<String, f64>,
}

impl Policy {
    /// The policy start date, if parseable.
    pub fn parsed_start_date(&self) -> Option<NaiveDate> {
        calendar::parse_date(&self.start_date)
    }
}

impl Default for Policy {
    fn default() -> Self {
        let now = calendar::today();
        Self {
            start_bal: 40.0,
            start_date: calendar::format_date(now),
            mode: Mode::PerYear,
            hours_per_year: 120.0,
            hours_per_period: 10.0,
            period: Period::SemiMonthly,
            custom_days: 14,
            carry_cap: None,
            carry_reset: format!("{}-01-01", now.year()),
            overrides: BTreeMap::new(),
        }
    }
}

/// One immutable snapshot of policy plus entries. Replaced wholesale on
/// every mutation; derived structures are recomputed from it on demand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Plan {
    #[serde(flatten)]
    pub policy: Policy,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Plan {
    /// Serialize the plan to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a plan from JSON text with default-merging.
    ///
    /// # Errors
    /// Fails with [`CoreError::Json`] on malformed JSON and
    /// [`CoreError::InvalidInput`] when the document is not an object.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_json_value(&value)
    }

    /// Build a plan from a parsed JSON value, merging missing or malformed
    /// fields with their defaults. Non-numeric hour values coerce to zero,
    /// and entries without ids get fresh ones.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or(CoreError::InvalidInput)?;
        let base = Policy::default();

        let policy = Policy {
            start_bal: number_or(obj.get("startBal"), base.start_bal),
            start_date: string_or(obj.get("startDate"), &base.start_date),
            mode: enum_or(obj.get("mode"), base.mode),
            hours_per_year: number_or(obj.get("hoursPerYear"), base.hours_per_year),
            hours_per_period: number_or(obj.get("hoursPerPeriod"), base.hours_per_period),
            period: enum_or(obj.get("period"), base.period),
            custom_days: {
                let days = number_or(obj.get("customDays"), base.custom_days as f64) as i64;
                // zero means "unset" and falls back to the default step
                if days == 0 {
                    14
                } else {
                    days.max(1)
                }
            },
            carry_cap: match obj.get("carryCap") {
                Some(v) => coerce_number(v),
                None => base.carry_cap,
            },
            carry_reset: string_or(obj.get("carryReset"), &base.carry_reset),
            overrides: obj
                .get("overrides")
                .and_then(Value::as_object)
                .map(|map| {
                    map.iter()
                        .map(|(k, v)| (k.clone(), coerce_number(v).unwrap_or(0.0)))
                        .collect()
                })
                .unwrap_or_default(),
        };

        let entries = obj
            .get("entries")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(entry_from_value).collect())
            .unwrap_or_default();

        Ok(Plan { policy, entries })
    }
}

/// Generate a fresh entry id.
pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

fn entry_from_value(value: &Value) -> Option<Entry> {
    let obj = value.as_object()?;
    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(new_entry_id);
    Some(Entry {
        id,
        date: string_or(obj.get("date"), ""),
        hours: obj.get("hours").and_then(coerce_number).unwrap_or(0.0),
        note: string_or(obj.get("note"), ""),
    })
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn number_or(value: Option<&Value>, default: f64) -> f64 {
    value.and_then(coerce_number).unwrap_or(default)
}

fn string_or(value: Option<&Value>, default: &str) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

fn enum_or<T: serde::de::DeserializeOwned>(value: Option<&Value>, default: T) -> T {
    value
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or(default)
}
