//! DirC - Directory Cleaner.

use clap::Parser;
use dirc_cli::{Cli, Settings};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dirc_cli::init_logging(cli.log_level.as_deref())?;

    tracing::info!("DirC: Directory Cleaner {}", env!("CARGO_PKG_VERSION"));
    if cli.dry_run {
        tracing::info!("Dry run: nothing will be deleted");
    }

    let settings = Settings::load_or_empty(&cli.settings);
    let metrics = dirc_cli::run_cleanup(&settings, cli.dry_run);

    println!("{}", metrics.summary());
    Ok(())
}
