//! Project context and target registration.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::library::StaticLibrary;

/// The enclosing project context: the registered compiled artifacts and any
/// additional build targets, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project name.
    pub name: String,
    /// Registered static libraries.
    #[serde(default)]
    pub libraries: Vec<StaticLibrary>,
    /// Additional build targets registered by path (e.g. a dependency
    /// project and a tests project). Entries may carry `$(NAME)`
    /// placeholders.
    #[serde(default)]
    pub targets: Vec<String>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            libraries: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Register an additional build target by path.
    pub fn target(&mut self, path: impl Into<String>) {
        self.targets.push(path.into());
    }

    /// Register a compiled-artifact declaration. Library names must be
    /// unique within a project.
    pub fn add_library(&mut self, library: StaticLibrary) -> Result<()> {
        if self.libraries.iter().any(|l| l.name == library.name) {
            return Err(CoreError::DuplicateLibrary { name: library.name });
        }
        self.libraries.push(library);
        Ok(())
    }

    /// Look up a registered library by name.
    pub fn library(&self, name: &str) -> Option<&StaticLibrary> {
        self.libraries.iter().find(|l| l.name == name)
    }

    /// Mutable lookup, for appending source directories after registration.
    pub fn library_mut(&mut self, name: &str) -> Option<&mut StaticLibrary> {
        self.libraries.iter_mut().find(|l| l.name == name)
    }
}
