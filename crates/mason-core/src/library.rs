//! Static-library declarations.
//!
//! A static library is a named compiled artifact: an include-path list, a
//! source-location list mixing literal directories and glob patterns, and a
//! preprocessor-define list. Declarations are built up during evaluation and
//! read-only once handed to the plan pipeline.

use serde::{Deserialize, Serialize};

/// A single source location: a literal directory, or a glob pattern when it
/// contains a `*` wildcard.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceSpec(String);

impl SourceSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the location is a glob pattern rather than a literal
    /// directory.
    pub fn is_glob(&self) -> bool {
        self.0.contains('*')
    }
}

impl std::fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named static-library artifact declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticLibrary {
    /// Artifact name.
    pub name: String,
    /// Include-path list, relative to the project root.
    #[serde(default)]
    pub includes: Vec<String>,
    /// Source locations: directories and glob patterns, in declaration
    /// order. Entries may carry `$(NAME)` placeholders.
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
    /// Preprocessor defines. Entries may carry `$(NAME)` placeholders.
    #[serde(default)]
    pub defines: Vec<String>,
}

impl StaticLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            includes: Vec::new(),
            sources: Vec::new(),
            defines: Vec::new(),
        }
    }

    /// Append include directories.
    pub fn include<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Append source locations.
    pub fn sources<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources
            .extend(specs.into_iter().map(SourceSpec::new));
        self
    }

    /// Append preprocessor defines.
    pub fn defines<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defines.extend(values.into_iter().map(Into::into));
        self
    }

    /// Append further source directories to an existing declaration.
    pub fn dirs<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources
            .extend(paths.into_iter().map(SourceSpec::new));
    }
}
