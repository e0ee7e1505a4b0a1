//! Build-description data model for Mason.
//!
//! A build description is a settings table plus declarative records: a
//! project context, static-library artifacts (include paths, source
//! locations, preprocessor defines), and additional registered build
//! targets. The description is populated once at evaluation time and
//! consumed read-only by the plan pipeline in `mason-plan`.

pub mod error;
pub mod library;
pub mod project;
pub mod settings;

pub use error::CoreError;
pub use library::{SourceSpec, StaticLibrary};
pub use project::Project;
pub use settings::Settings;
