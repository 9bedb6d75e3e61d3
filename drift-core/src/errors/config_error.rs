//! Configuration loading and validation errors.

use super::error_code::{self, DriftErrorCode};

/// Errors raised while loading or validating a `Configuration`.
///
/// All of these are fatal at startup: a malformed rule set is never
/// silently downgraded to "match nothing", since that would make the
/// analysis quietly stop reporting real sinks.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("axis {axis:?} of {rule} specifies both a literal and a regex; expected only one")]
    ConflictingAxisRule { rule: &'static str, axis: &'static str },

    #[error("invalid regex {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("could not read configuration file {path:?}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse configuration TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),
}

impl DriftErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
