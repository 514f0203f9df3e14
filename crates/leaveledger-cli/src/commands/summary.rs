//! Summary metric commands for CLI.

use std::path::Path;

use clap::Subcommand;
use leaveledger_core::calendar::format_hours;
use serde_json::json;

use super::common::{current_year, load_store};

#[derive(Subcommand)]
pub enum SummaryAction {
    /// Planned totals and end-of-year balance
    Metrics {
        /// Calendar year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Per-entry running balances
    Rows {
        /// Calendar year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },
}

pub fn run(action: SummaryAction, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(path)?;

    match action {
        SummaryAction::Metrics { year } => {
            let year = year.unwrap_or_else(current_year);
            let metrics = json!({
                "year": year,
                "totalPlanned": format_hours(store.total_planned(year)),
                "eoyBalance": format_hours(store.eoy_balance(year)),
            });
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        SummaryAction::Rows { year } => {
            let year = year.unwrap_or_else(current_year);
            let calcs = store.row_calcs(year);
            println!("{}", serde_json::to_string_pretty(&calcs)?);
        }
    }
    Ok(())
}
