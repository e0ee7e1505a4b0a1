//! Error types for the build-description model.

/// Errors produced while evaluating a build description.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A placeholder referenced a setting that was never defined.
    #[error("undefined setting '{name}' referenced by a placeholder")]
    UndefinedSetting {
        /// The setting name inside `$(...)`.
        name: String,
    },

    /// A `$(` placeholder was opened but never closed.
    #[error("unclosed placeholder in '{input}'")]
    UnclosedPlaceholder {
        /// The full string being expanded.
        input: String,
    },

    /// Two libraries were declared under the same name.
    #[error("duplicate library declaration '{name}'")]
    DuplicateLibrary {
        /// The conflicting library name.
        name: String,
    },
}

/// Result type for description operations.
pub type Result<T> = std::result::Result<T, CoreError>;
