//! YAML configuration.
//!
//! # Lookup order
//!
//! ```text
//! --config <path>              (must exist when given)
//! ./config.yaml
//! ~/.roster/config.yaml
//! ```
//!
//! # API pattern
//!
//! [`load_at`] takes the working directory and home directory explicitly and
//! is what tests call; [`load`] derives both from the process environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Username;

/// File name searched for in the working directory and `~/.roster/`.
pub const CONFIG_FILE: &str = "config.yaml";

/// Organization, naming prefix and declared users.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    pub organization: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub users: Vec<Username>,
}

impl Config {
    /// Apply the naming prefix to `name`.
    ///
    /// Returns the final name and whether the prefix was already present (in
    /// which case it is stripped once before being re-added).
    pub fn prefixed_name(&self, name: &str) -> (String, bool) {
        let name = name.trim();
        if self.prefix.is_empty() {
            return (name.to_owned(), false);
        }
        match name.strip_prefix(self.prefix.as_str()) {
            Some(rest) => (format!("{}{}", self.prefix, rest), true),
            None => (format!("{}{}", self.prefix, name), false),
        }
    }
}

/// Candidate paths in lookup order (explicit path excluded).
pub fn search_paths(cwd: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![cwd.join(CONFIG_FILE)];
    if let Some(home) = home {
        paths.push(home.join(".roster").join(CONFIG_FILE));
    }
    paths
}

/// Load the configuration, resolving relative lookups against `cwd` and `home`.
pub fn load_at(
    explicit: Option<&Path>,
    cwd: &Path,
    home: Option<&Path>,
) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    searched: vec![path.to_path_buf()],
                });
            }
            path.to_path_buf()
        }
        None => {
            let searched = search_paths(cwd, home);
            match searched.iter().find(|p| p.exists()) {
                Some(found) => found.clone(),
                None => return Err(ConfigError::NotFound { searched }),
            }
        }
    };
    load_file(&path)
}

/// `load_at` convenience wrapper using the current directory and `dirs::home_dir()`.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
        path: PathBuf::from("."),
        source: e,
    })?;
    let home = dirs::home_dir();
    load_at(explicit, &cwd, home.as_deref())
}

/// Parse and validate a single config file.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    if config.organization.trim().is_empty() {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: "`organization` must not be empty".to_string(),
        });
    }
    let malformed: Vec<&str> = config
        .users
        .iter()
        .map(Username::as_str)
        .filter(|u| !Username::is_valid_login(u))
        .collect();
    if !malformed.is_empty() {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: format!("`users` contains invalid usernames: {}", malformed.join(", ")),
        });
    }
    tracing::debug!(
        "loaded config from {} ({} declared users)",
        path.display(),
        config.users.len()
    );
    Ok(config)
}
