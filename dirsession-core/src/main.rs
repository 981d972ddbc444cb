//! src/main.rs
//! `ds`: interactive directory session on the terminal.

use std::{io, panic::PanicHookInfo, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use dirsession_core::{
    Logger, Session,
    config::Config,
    host::{Launcher, Repl, TerminalHost},
};

#[derive(Debug, Parser)]
#[command(name = "ds", version, about = "Browse and manage one directory at a time")]
struct Cli {
    /// Start here instead of the configured start_dir.
    path: Option<PathBuf>,

    /// Read configuration from this file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = Cli::parse();

    let mut config: Config = match &cli.config {
        Some(path) => Config::load_from(path).await,
        None => Config::load().await,
    }
    .context("Failed to load configuration")?;

    if let Some(path) = cli.path {
        config.start_dir = Some(path);
    }

    let _guard = Logger::init_tracing(&config.logging).context("Failed to initialize logging")?;
    setup_panic_handler();

    info!(start_dir = ?config.start_dir, "Starting directory session");

    // The session is synchronous; keep it off the async worker threads.
    tokio::task::spawn_blocking(move || run_session(&config))
        .await
        .context("Session thread panicked")??;

    info!("Application exited cleanly");
    Ok(())
}

fn run_session(config: &Config) -> Result<()> {
    let session: Session = Session::from_config(config).context("Failed to open start directory")?;

    let host = TerminalHost::new(
        io::stdin().lock(),
        io::stdout(),
        Launcher::new(config.opener_cmd.as_deref()),
    );

    Repl::new(session, host, config)
        .run()
        .context("Terminal I/O failed")
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
