//! Shared startup for the `fetch-airtable` and `check-cache-setup` binaries.

use anyhow::{anyhow, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Flags common to both binaries. Neither is required.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Site project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

impl CommonArgs {
    pub fn project_root(&self) -> PathBuf {
        self.project_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over `--debug` when set.
pub fn init_logging(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

/// Load `<root>/.env` into the process environment.
///
/// Variables already set are left alone. A missing file is not an error.
pub fn load_env(project_root: &Path) {
    let path = project_root.join(".env");
    match dotenvy::from_path(&path) {
        Ok(()) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file at {}", path.display()),
        Err(e) => warn!("Ignoring unreadable {}: {}", path.display(), e),
    }
}
