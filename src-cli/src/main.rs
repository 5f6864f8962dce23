//! Vecdraw - Command line vector drawing editor
//!
//! Reads editing commands from standard input, one per line, and applies
//! them to the current window's document.

mod commands;
mod state;

use anyhow::Context;
use state::{Outcome, Session};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use store::SettingsManager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CONFIG_DIR_ENV: &str = "VECDRAW_CONFIG_DIR";

fn config_dir() -> anyhow::Result<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config-dir" {
            let dir = args.next().context("--config-dir needs a directory")?;
            return Ok(PathBuf::from(dir));
        }
        if !arg.starts_with('-') {
            return Ok(PathBuf::from(arg));
        }
        anyhow::bail!("unknown option '{}'", arg);
    }
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => std::env::current_dir().context("Failed to read the current directory"),
    }
}

fn main() -> anyhow::Result<()> {
    let config_dir = config_dir()?;
    let mut settings = SettingsManager::new(&config_dir);
    let filter = settings
        .load()
        .with_context(|| format!("Failed to read settings in {}", config_dir.display()))?
        .logging
        .filter
        .clone();

    // RUST_LOG wins over the settings file
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&filter))
        .with_context(|| format!("Invalid log filter '{}'", filter))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    tracing::info!("Starting vecdraw with settings from {}", settings.settings_path().display());

    let mut session = Session::new(settings);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, "{}", session.prompt())?;
        stdout.flush()?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                tracing::error!("Failed to read input: {}", e);
                return Err(e).context("Failed to read a command");
            }
            None => break,
        };

        let request = match commands::parse_line(&line) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(message) => {
                writeln!(stdout, "error: {}", message)?;
                continue;
            }
        };

        match session.handle(request) {
            Outcome::Reply(message) => writeln!(stdout, "{}", message)?,
            Outcome::Warning(message) => writeln!(stdout, "warning: {}", message)?,
            Outcome::Failed(message) => writeln!(stdout, "error: {}", message)?,
            Outcome::Quit => break,
        }
    }

    tracing::info!("Exiting vecdraw");
    Ok(())
}
