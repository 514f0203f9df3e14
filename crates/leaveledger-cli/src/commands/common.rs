//! Shared helpers for CLI commands: plan file resolution and load/save.
//!
//! The engine never touches the filesystem; this layer owns persistence of
//! the plan JSON document.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use leaveledger_core::{calendar, PlanStore};

/// Default plan location under the user data dir.
pub fn default_plan_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("leaveledger")
        .join("plan.json")
}

pub fn resolve_path(file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(default_plan_path)
}

/// Load a store from the plan file, or start fresh when none exists yet.
pub fn load_store(path: &Path) -> Result<PlanStore, Box<dyn std::error::Error>> {
    let mut store = PlanStore::new();
    if path.exists() {
        let raw = fs::read_to_string(path)?;
        store.load_json(&raw)?;
    }
    Ok(store)
}

pub fn save_store(path: &Path, store: &PlanStore) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, store.serialize()?)?;
    Ok(())
}

pub fn current_year() -> i32 {
    calendar::today().year()
}
