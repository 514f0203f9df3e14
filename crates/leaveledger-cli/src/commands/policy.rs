//! Accrual policy commands for CLI.

use std::path::Path;

use clap::Subcommand;
use leaveledger_core::{Mode, Period};

use super::common::{load_store, save_store};

#[derive(Subcommand)]
pub enum PolicyAction {
    /// Show the current policy
    Show,
    /// Set policy fields
    Set {
        /// Starting balance in hours
        #[arg(long)]
        start_bal: Option<f64>,
        /// Policy start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// Accrual mode: perYear or perPeriod
        #[arg(long)]
        mode: Option<String>,
        /// Annual hour rate
        #[arg(long)]
        hours_per_year: Option<f64>,
        /// Per-period hour rate
        #[arg(long)]
        hours_per_period: Option<f64>,
        /// Period: weekly, biweekly, monthly, semiMonthly, or custom
        #[arg(long)]
        period: Option<String>,
        /// Custom step length in days
        #[arg(long)]
        custom_days: Option<i64>,
        /// Carryover cap in hours, or "none" to disable
        #[arg(long)]
        carry_cap: Option<String>,
        /// Carryover reset anniversary (YYYY-MM-DD)
        #[arg(long)]
        carry_reset: Option<String>,
    },
}

fn parse_mode(text: &str) -> Result<Mode, String> {
    match text {
        "perYear" | "per-year" => Ok(Mode::PerYear),
        "perPeriod" | "per-period" => Ok(Mode::PerPeriod),
        other => Err(format!("unknown mode: {other}")),
    }
}

fn parse_period(text: &str) -> Result<Period, String> {
    match text {
        "weekly" => Ok(Period::Weekly),
        "biweekly" => Ok(Period::Biweekly),
        "monthly" => Ok(Period::Monthly),
        "semiMonthly" | "semi-monthly" => Ok(Period::SemiMonthly),
        "custom" => Ok(Period::Custom),
        other => Err(format!("unknown period: {other}")),
    }
}

fn parse_cap(text: &str) -> Result<Option<f64>, String> {
    match text {
        "" | "none" | "null" => Ok(None),
        other => other
            .parse()
            .map(Some)
            .map_err(|_| format!("invalid carry cap: {other}")),
    }
}

pub fn run(action: PolicyAction, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store(path)?;

    match action {
        PolicyAction::Show => {
            println!("{}", serde_json::to_string_pretty(&store.plan().policy)?);
        }
        PolicyAction::Set {
            start_bal,
            start_date,
            mode,
            hours_per_year,
            hours_per_period,
            period,
            custom_days,
            carry_cap,
            carry_reset,
        } => {
            if let Some(v) = start_bal {
                store.set_start_bal(v);
            }
            if let Some(v) = start_date {
                store.set_start_date(&v);
            }
            if let Some(v) = mode {
                store.set_mode(parse_mode(&v)?);
            }
            if let Some(v) = hours_per_year {
                store.set_hours_per_year(v);
            }
            if let Some(v) = hours_per_period {
                store.set_hours_per_period(v);
            }
            if let Some(v) = period {
                store.set_period(parse_period(&v)?);
            }
            if let Some(v) = custom_days {
                store.set_custom_days(v);
            }
            if let Some(v) = carry_cap {
                store.set_carry_cap(parse_cap(&v)?);
            }
            if let Some(v) = carry_reset {
                store.set_carry_reset(&v);
            }
            save_store(path, &store)?;
            println!("ok");
        }
    }
    Ok(())
}
