mod controller;
mod db;
mod error;
mod logging;
mod models;
mod run;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let data_dir = get_data_dir()?;
    logging::init(&data_dir.join("budget-tracker.log"))?;

    let store = db::LedgerStore::open(&data_dir.join("budget.db"))?;
    let mut controller = controller::Controller::open(store)?;
    run::as_tui(&mut controller)
}

fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budget-tracker", "BudgetTracker")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
