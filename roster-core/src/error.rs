//! Error types for roster-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating or parsing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, etc.).
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error, with file path and serde_yaml line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// No config file exists at any of the searched locations.
    #[error("config file not found (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    /// The file parsed but holds an unusable value.
    #[error("invalid config at {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

/// Failures reported by a [`crate::hosting::HostingApi`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostingError {
    /// Missing or rejected credential. Always fatal.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// The repository, user or permission record does not exist.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Network, rate-limit or other API failure. Never retried.
    #[error("request failed: {message}")]
    Transient { message: String },

    /// The response could not be decoded.
    #[error("unexpected response: {message}")]
    Decode { message: String },
}

impl HostingError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HostingError::NotFound { .. })
    }
}

/// Failures of the interactive input source.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The terminal could not be read or written.
    #[error("prompt I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The user interrupted the prompt (e.g. Ctrl-C or Esc).
    #[error("prompt interrupted")]
    Interrupted,

    /// The prompt was given nothing to choose from.
    #[error("no options to choose from: {prompt}")]
    NoOptions { prompt: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
