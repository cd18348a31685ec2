mod analytics;
mod config;
mod error;
mod export;
mod import;
mod logging;
mod models;
mod predict;
mod risk;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let config = config::Config::from_env()?;
    config.ensure_dirs()?;
    logging::init(&config)?;

    let mut store = store::SqliteStore::open(&config.db_path)
        .with_context(|| format!("Failed to open database: {}", config.db_path.display()))?;

    if args.len() == 1 {
        run::as_tui(&mut store)
    } else {
        run::as_cli(&args, &mut store, &mut std::io::stdout().lock())
    }
}
