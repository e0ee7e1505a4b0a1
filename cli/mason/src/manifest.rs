//! `mason.toml` manifest parsing and evaluation into the description model.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mason_core::{Project, Settings, StaticLibrary};

/// The top-level manifest structure for a Mason project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasonManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Platform selection.
    #[serde(default)]
    pub platforms: Option<PlatformsConfig>,
    /// Project-wide settings overlaid on the selected platform profile.
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
    /// Static-library declarations.
    #[serde(default)]
    pub libraries: Vec<LibraryConfig>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Project version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
    /// Author list.
    #[serde(default)]
    pub authors: Vec<String>,
    /// License identifier.
    #[serde(default)]
    pub license: Option<String>,
    /// Additional build targets registered by path.
    #[serde(default)]
    pub targets: Vec<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Platform selection section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformsConfig {
    /// Default platform name for `mason plan` without `--platform`.
    #[serde(default)]
    pub default: Option<String>,
}

/// A single `[[libraries]]` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Artifact name.
    pub name: String,
    /// Include directories.
    #[serde(default)]
    pub include: Vec<String>,
    /// Source locations (directories and glob patterns).
    #[serde(default)]
    pub sources: Vec<String>,
    /// Preprocessor defines.
    #[serde(default)]
    pub defines: Vec<String>,
}

impl MasonManifest {
    /// Search upward from `start_dir` for a `mason.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("mason.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: MasonManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing mason.toml")
    }

    /// Resolve the default platform name from the manifest.
    pub fn default_platform(&self) -> Option<&str> {
        self.platforms.as_ref().and_then(|p| p.default.as_deref())
    }

    /// The `[settings]` overlay as a settings table.
    pub fn extra_settings(&self) -> Settings {
        let mut settings = Settings::new();
        for (name, value) in &self.settings {
            settings.set(name, value);
        }
        settings
    }

    /// Evaluate the declarations into the description model: one library
    /// registration per `[[libraries]]` entry, one target registration per
    /// `[project] targets` element.
    pub fn to_project(&self) -> Result<Project> {
        let mut project = Project::new(&self.project.name);
        for lib in &self.libraries {
            let library = StaticLibrary::new(&lib.name)
                .include(lib.include.iter().cloned())
                .sources(lib.sources.iter().cloned())
                .defines(lib.defines.iter().cloned());
            project
                .add_library(library)
                .with_context(|| format!("registering library '{}'", lib.name))?;
        }
        for target in &self.project.targets {
            project.target(target);
        }
        Ok(project)
    }

    /// Generate the default template for `mason init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
version = "0.1.0"

[platforms]
default = "macos"

[[libraries]]
name = "{name}"
sources = ["src"]
"#
        )
    }
}
