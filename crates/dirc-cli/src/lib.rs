//! DirC CLI library.
//!
//! Loads the settings file and watch list, then hands both to the janitor
//! for a single cleanup pass.

pub mod cli;
pub mod error;
pub mod settings;
pub mod watchlist;

pub use cli::Cli;
pub use error::{ConfigError, Result};
pub use settings::Settings;
pub use watchlist::{load_watch_list, load_watch_list_or_empty};

use dirc_janitor::{Janitor, JanitorMetrics};
use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr.
///
/// `filter` wins over `RUST_LOG`; without either the level is `info`.
pub fn init_logging(filter: Option<&str>) -> anyhow::Result<()> {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

/// Run one cleanup pass over every watch entry named by `settings`.
///
/// Loading problems are logged and result in an empty run.
pub fn run_cleanup(settings: &Settings, dry_run: bool) -> JanitorMetrics {
    let entries = load_watch_list_or_empty(&settings.db_location);
    tracing::info!("Directories count: {}", entries.len());

    let mut janitor = Janitor::new(settings.janitor_config(dry_run));
    janitor.sweep(&entries)
}
