//! Plan import/export commands for CLI.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use leaveledger_core::PlanStore;

use super::common::{load_store, save_store};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Print the current plan JSON
    Export,
    /// Replace the plan from a JSON file
    Import {
        /// Source JSON file
        source: PathBuf,
    },
    /// Reset the plan to defaults
    Reset,
}

pub fn run(action: PlanAction, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Export => {
            let store = load_store(path)?;
            println!("{}", store.serialize()?);
        }
        PlanAction::Import { source } => {
            let raw = fs::read_to_string(&source)?;
            let mut store = load_store(path)?;
            store.load_json(&raw)?;
            save_store(path, &store)?;
            println!("ok");
        }
        PlanAction::Reset => {
            let store = PlanStore::new();
            save_store(path, &store)?;
            println!("plan reset to defaults");
        }
    }
    Ok(())
}
