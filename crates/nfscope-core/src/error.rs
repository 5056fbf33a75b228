//! Configuration errors, reported before any scanning starts

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "invalid test type '{0}': must be one of 'function', 'process', 'workflow', 'pipeline'"
    )]
    InvalidTestType(String),

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
