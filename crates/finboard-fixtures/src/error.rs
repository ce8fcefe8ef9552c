//! Error types for fixtures.

use thiserror::Error;

/// Fixture loading and lookup errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture document did not match the record shapes.
    #[error("failed to parse fixtures: {0}")]
    Parse(#[from] serde_json::Error),

    /// No user with this id.
    #[error("unknown user: {0}")]
    UnknownUser(u32),
}

/// Result type alias for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;
