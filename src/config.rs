/// Configuration: the static project registry (projects.toml) and the
/// dashboard source settings.
///
/// The "other projects" shown next to the scraped figures are not on the
/// dashboard page. Keeping them in a TOML file makes it easy to update a
/// percentage or add a project without recompiling the service.

use crate::ingest::coct::{DASHBOARD_URL, REQUEST_TIMEOUT};
use crate::model::Project;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Project registry file, relative to the working directory.
pub const PROJECTS_FILE: &str = "projects.toml";

/// Overrides the dashboard URL (e.g. to point at a mirror).
pub const URL_ENV: &str = "COCT_DASHBOARD_URL";

/// Overrides the request timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "COCT_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid project #{index} in {path}: {reason}")]
    InvalidProject {
        path: String,
        index: usize,
        reason: String,
    },

    #[error("invalid {name} value {value:?}: expected whole seconds greater than zero")]
    InvalidTimeout { name: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// Project registry
// ---------------------------------------------------------------------------

/// Root structure for TOML parsing
#[derive(Debug, Deserialize)]
struct ProjectRegistry {
    #[serde(default)]
    project: Vec<Project>,
}

/// Loads the project registry from `path`, in file order.
pub fn load_projects(path: impl AsRef<Path>) -> Result<Vec<Project>, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;

    parse_projects(&contents, &display)
}

/// Loads `projects.toml` from the current working directory (project root
/// when running via `cargo run`).
pub fn load_default_projects() -> Result<Vec<Project>, ConfigError> {
    load_projects(PROJECTS_FILE)
}

/// Parses and validates registry contents. `origin` names the source in
/// error messages.
pub fn parse_projects(contents: &str, origin: &str) -> Result<Vec<Project>, ConfigError> {
    let registry: ProjectRegistry = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: origin.to_string(),
        source,
    })?;

    for (index, project) in registry.project.iter().enumerate() {
        let reason = if project.description.trim().is_empty() {
            Some("description must not be empty".to_string())
        } else if project.percentage > 100 {
            Some(format!("percentage {} exceeds 100", project.percentage))
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(ConfigError::InvalidProject {
                path: origin.to_string(),
                index,
                reason,
            });
        }
    }

    Ok(registry.project)
}

// ---------------------------------------------------------------------------
// Dashboard source
// ---------------------------------------------------------------------------

/// Where and how long to fetch the dashboard page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DASHBOARD_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl SourceConfig {
    /// Defaults, with `COCT_DASHBOARD_URL` / `COCT_TIMEOUT_SECS` applied when
    /// set. Call `dotenv::dotenv()` first to pick them up from `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.url = url.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    name: TIMEOUT_ENV,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
