use crate::config::{self, LOG_FILTER_ENV};
use crate::error::CatalogError;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log file in the user cache dir.
pub fn default_log_path() -> Result<PathBuf, CatalogError> {
    Ok(config::project_dirs()?.cache_dir().join("movie-catalog.log"))
}

/// Install the global subscriber writing to `path`.
///
/// The terminal is owned by the UI, so nothing is ever logged to stdout or
/// stderr. `MOVIE_CATALOG_LOG` takes precedence over `default_filter`.
pub fn init(default_filter: &str, path: &Path) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| CatalogError::Config(format!("invalid log filter: {}", e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| CatalogError::Config(format!("logging already initialised: {}", e)))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = %path.display(), "logging started");
    Ok(())
}
