//! Accrual window table for CLI.

use std::path::Path;

use super::common::{current_year, load_store};

pub fn run(year: Option<i32>, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(path)?;
    let year = year.unwrap_or_else(current_year);
    let windows = store.windows(year);
    println!("{}", serde_json::to_string_pretty(&windows)?);
    Ok(())
}
