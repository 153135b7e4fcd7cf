//! Command-line argument parsing.

use crate::settings::DEFAULT_SETTINGS_PATH;
use clap::Parser;
use std::path::PathBuf;

/// DirC - remove expired entries from watched directories.
#[derive(Debug, Parser)]
#[command(name = "dirc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (JSON, or TOML with a .toml extension)
    #[arg(short, long, env = "DIRC_SETTINGS", default_value = DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,

    /// Log what would be deleted without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log filter, e.g. "info" or "dirc_janitor=debug" (overrides RUST_LOG)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["dirc"]);
        assert!(!cli.dry_run);
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::parse_from([
            "dirc",
            "--settings",
            "/etc/dirc/settings.toml",
            "--dry-run",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.settings, PathBuf::from("/etc/dirc/settings.toml"));
        assert!(cli.dry_run);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
