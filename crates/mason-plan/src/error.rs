//! Plan resolution errors.

use std::path::PathBuf;

use thiserror::Error;

use mason_core::CoreError;

/// Errors that can occur during plan resolution.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A literal source directory does not exist.
    #[error("source directory not found: {}", path.display())]
    SourceDirNotFound {
        /// The directory that was not found.
        path: PathBuf,
    },

    /// A glob matched no files and strict mode is on.
    #[error("glob '{pattern}' matched no files")]
    EmptyGlob {
        /// The expanded pattern.
        pattern: String,
    },

    /// A library declared no source locations at all.
    #[error("library '{name}' declares no source locations")]
    EmptyLibrary {
        /// The offending library name.
        name: String,
    },

    /// Placeholder expansion or declaration error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error while collecting sources.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error while matching a glob.
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON encoding of the plan failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML encoding of the plan failed.
    #[error("TOML encoding failed: {0}")]
    TomlSer(#[from] toml::ser::Error),
}
