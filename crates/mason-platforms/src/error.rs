//! Error types for platform profile operations.

use std::path::PathBuf;

/// Errors that can occur while loading or writing platform profiles.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing profile files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile file not found.
    #[error("profile file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
