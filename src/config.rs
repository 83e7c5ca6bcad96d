use crate::error::CatalogError;
use crate::filter::SearchFields;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_URL_ENV: &str = "MOVIE_CATALOG_API_URL";
pub const LOG_FILTER_ENV: &str = "MOVIE_CATALOG_LOG";
const CONFIG_FILE_NAME: &str = "config.json";

/// Search behaviour of the list filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub match_year: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { match_year: true }
    }
}

/// Runtime configuration, read from `config.json` in the user config dir.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server root; the `/movies` resource lives directly under it.
    pub api_url: String,
    pub search: SearchConfig,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            search: SearchConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

pub fn project_dirs() -> Result<directories::ProjectDirs, CatalogError> {
    directories::ProjectDirs::from("org", "moviecatalog", "movie-catalog")
        .ok_or_else(|| CatalogError::Config("Could not determine home directory".to_string()))
}

/// Default location of the config file.
pub fn default_config_path() -> Result<PathBuf, CatalogError> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

impl Config {
    /// Load configuration. An explicit `path` must exist; the default
    /// location is optional and falls back to defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = default_config_path()?;
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| CatalogError::Config(format!("invalid {}: {}", path.display(), e)))
    }

    /// Apply environment overrides through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    pub fn search_fields(&self) -> SearchFields {
        SearchFields {
            year: self.search.match_year,
        }
    }
}
