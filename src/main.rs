//! Carnet - Main entry point
//!
//! Loads the contacts document named by the environment and prints a
//! summary of the directory to stdout.

use anyhow::Result;
use carnet::{Config, JsonStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load configuration first so it can name the default log level
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return Err(e.into());
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Configuration loaded successfully");
    info!("Contacts file: {}", config.file.display());

    let mut store = JsonStore::new(&config.file);
    let directory = match store.load() {
        Ok(directory) => directory,
        Err(e) => {
            error!("Failed to load contacts: {}", e);
            return Err(e.into());
        }
    };

    if let Some(date) = store.date() {
        println!("Contacts as of {}:", date.format("%Y/%m/%d"));
    }
    for (_, contact) in directory.iter() {
        println!("  {} ({})", contact.display_name(), contact.contact_type());
    }
    println!("{} contacts total", directory.len());

    Ok(())
}
