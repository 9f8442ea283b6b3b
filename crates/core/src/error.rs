//! Error type of the transformation core.

use thiserror::Error;

/// Result alias used throughout the transformation core.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that stop a generation run.
///
/// Naming anomalies are never errors: they are repaired and logged. The
/// only naming failure is running out of truncation counters.
#[derive(Debug, Error)]
pub enum Error {
    /// Every disambiguation counter value is already taken by another truncated name.
    #[error(
        "Failed to truncate '{name}' (suffix '{suffix}'): all {attempts} disambiguation counters are in use"
    )]
    TruncationExhausted {
        /// Name that was being truncated.
        name: String,
        /// Suffix appended before the counter.
        suffix: String,
        /// Counter values tried.
        attempts: u32,
    },

    /// The generator config is not valid TOML or has an unknown value.
    #[error("Failed to parse generator config: {0}")]
    Config(#[from] toml::de::Error),

    /// The source document is not valid JSON or does not match the document shape.
    #[error("Failed to parse source document: {0}")]
    Document(#[from] serde_json::Error),
}
