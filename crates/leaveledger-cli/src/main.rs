use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "leaveledger-cli", version, about = "Leaveledger CLI")]
struct Cli {
    /// Path to the plan JSON file (defaults to the user data dir)
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time-off entry management
    Entry {
        #[command(subcommand)]
        action: commands::entry::EntryAction,
    },
    /// Accrual policy management
    Policy {
        #[command(subcommand)]
        action: commands::policy::PolicyAction,
    },
    /// Accrual windows for a year
    Windows {
        /// Calendar year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Summary metrics
    Summary {
        #[command(subcommand)]
        action: commands::summary::SummaryAction,
    },
    /// Manual accrual amount overrides
    Override {
        #[command(subcommand)]
        action: commands::overrides::OverrideAction,
    },
    /// Plan import/export
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let path = commands::common::resolve_path(cli.file);
    let result = match cli.command {
        Commands::Entry { action } => commands::entry::run(action, &path),
        Commands::Policy { action } => commands::policy::run(action, &path),
        Commands::Windows { year } => commands::windows::run(year, &path),
        Commands::Summary { action } => commands::summary::run(action, &path),
        Commands::Override { action } => commands::overrides::run(action, &path),
        Commands::Plan { action } => commands::plan::run(action, &path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
