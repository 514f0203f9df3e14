//! Manual accrual override commands for CLI.

use std::path::Path;

use chrono::Datelike;
use clap::Subcommand;
use leaveledger_core::calendar::{format_hours, parse_date};
use leaveledger_core::schedule::scheduled_events;

use super::common::{load_store, save_store};

#[derive(Subcommand)]
pub enum OverrideAction {
    /// Show the posted amount for an accrual date
    Get {
        /// Accrual event date (YYYY-MM-DD)
        key: String,
    },
    /// Set a manual accrual amount for an event date
    Set {
        /// Accrual event date (YYYY-MM-DD)
        key: String,
        /// Posted hours
        value: f64,
    },
    /// Remove a manual override
    Clear {
        /// Accrual event date (YYYY-MM-DD)
        key: String,
    },
}

pub fn run(action: OverrideAction, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store(path)?;

    match action {
        OverrideAction::Get { key } => {
            let computed = computed_for_key(&store.plan().policy, &key);
            println!("{}", format_hours(store.get_override(&key, computed)));
        }
        OverrideAction::Set { key, value } => {
            store.set_override(&key, Some(value));
            save_store(path, &store)?;
            println!("ok");
        }
        OverrideAction::Clear { key } => {
            store.set_override(&key, None);
            save_store(path, &store)?;
            println!("ok");
        }
    }
    Ok(())
}

/// The computed amount of the scheduled event matching `key`, or zero when
/// no event falls on that date.
fn computed_for_key(policy: &leaveledger_core::Policy, key: &str) -> f64 {
    let Some(date) = parse_date(key) else {
        return 0.0;
    };
    let Some(start) = policy.parsed_start_date() else {
        return 0.0;
    };
    scheduled_events(policy, date.year(), start)
        .iter()
        .find(|ev| ev.key == key)
        .map(|ev| ev.computed)
        .unwrap_or(0.0)
}
