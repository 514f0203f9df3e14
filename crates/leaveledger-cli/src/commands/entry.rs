//! Time-off entry commands for CLI.

use std::path::Path;

use clap::Subcommand;
use leaveledger_core::windows::entries_sorted;

use super::common::{load_store, save_store};

#[derive(Subcommand)]
pub enum EntryAction {
    /// Add a new entry
    Add {
        /// Entry date (YYYY-MM-DD)
        date: String,
        /// Hours debited
        hours: f64,
        /// Free-text note
        #[arg(default_value = "")]
        note: String,
    },
    /// List entries in date order
    List,
    /// Update an entry
    Update {
        /// Entry ID
        id: String,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// New hours
        #[arg(long)]
        hours: Option<f64>,
        /// New note
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

pub fn run(action: EntryAction, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store(path)?;

    match action {
        EntryAction::Add { date, hours, note } => {
            let id = store.add_entry(&date, hours, &note);
            save_store(path, &store)?;
            println!("Entry created: {id}");
        }
        EntryAction::List => {
            let entries = entries_sorted(store.plan());
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        EntryAction::Update {
            id,
            date,
            hours,
            note,
        } => {
            let Some(mut entry) = store.plan().entries.iter().find(|e| e.id == id).cloned()
            else {
                return Err(format!("unknown entry: {id}").into());
            };
            if let Some(date) = date {
                entry.date = date;
            }
            if let Some(hours) = hours {
                entry.hours = hours;
            }
            if let Some(note) = note {
                entry.note = note;
            }
            store.update_entry(entry);
            save_store(path, &store)?;
            println!("ok");
        }
        EntryAction::Delete { id } => {
            if !store.delete_entry(&id) {
                return Err(format!("unknown entry: {id}").into());
            }
            save_store(path, &store)?;
            println!("ok");
        }
    }
    Ok(())
}
