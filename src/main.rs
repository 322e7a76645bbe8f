use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use evac_portal::backend::session::{FileStore, SharedStore};
use evac_portal::backend::utils::config::AppConfig;
use evac_portal::backend::utils::paths::default_session_file;
use evac_portal::frontend::Portal;
use evac_portal::frontend::cli::run_interactive;
use evac_portal::utils::logging::LogFacade;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    // Optional JSON config file as the only argument
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(&PathBuf::from(path)).context("Failed to load config")?,
        None => AppConfig::from_env().context("Failed to read configuration")?,
    };

    let session_file = config
        .session_file
        .clone()
        .unwrap_or_else(default_session_file);
    log::info!("Using session file {}", session_file.display());
    let store: SharedStore = Arc::new(FileStore::open(session_file));

    let mut portal = Portal::new(config, store, Arc::new(LogFacade))?;
    run_interactive(&mut portal).await
}
