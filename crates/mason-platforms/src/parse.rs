//! TOML parsing, serialization, validation, and discovery for platform
//! profiles.
//!
//! Project-defined profiles are stored as `<name>.platform.toml` files in
//! the `platforms/` directory. A project file shadows a built-in profile of
//! the same name.

use std::path::{Path, PathBuf};

use crate::error::{ProfileError, Result};
use crate::profile::PlatformProfile;

/// A validation issue found in a profile definition.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Load a profile from a `.platform.toml` file.
pub fn load_profile_toml(path: &Path) -> Result<PlatformProfile> {
    if !path.exists() {
        return Err(ProfileError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_profile_toml(&content)
}

/// Parse a profile from a TOML string.
pub fn parse_profile_toml(toml_str: &str) -> Result<PlatformProfile> {
    let profile: PlatformProfile = toml::from_str(toml_str)?;
    Ok(profile)
}

/// Serialize a profile to pretty TOML.
pub fn profile_to_toml(profile: &PlatformProfile) -> Result<String> {
    let toml_str = toml::to_string_pretty(profile)?;
    Ok(toml_str)
}

/// Validate a profile definition for structural correctness.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
pub fn validate_profile(profile: &PlatformProfile) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if profile.name.trim().is_empty() {
        issues.push(ValidationIssue {
            severity: "error",
            message: "profile has an empty name".into(),
        });
    }

    if profile.settings.is_empty() {
        issues.push(ValidationIssue {
            severity: "error",
            message: format!("profile '{}' defines no settings", profile.name),
        });
    }

    for (name, value) in profile.settings.iter() {
        if !is_setting_name(name) {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!(
                    "setting name '{name}' is not an UPPER_SNAKE identifier"
                ),
            });
        }
        if value.is_empty() {
            issues.push(ValidationIssue {
                severity: "warning",
                message: format!("setting '{name}' has an empty value"),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Setting names are placeholder-referenceable identifiers: an ASCII
/// uppercase letter followed by uppercase letters, digits, or underscores.
fn is_setting_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Generate a template `.platform.toml` for a new profile.
///
/// Seeds from the macos builtin with the given custom name.
pub fn generate_template(name: &str) -> Result<String> {
    let mut profile = PlatformProfile::macos();
    profile.name = name.into();
    profile.description = "Custom platform profile".into();
    profile_to_toml(&profile)
}

/// Discover all `.platform.toml` files in a project's `platforms/`
/// directory.
///
/// Returns a list of (platform_name, file_path) pairs, sorted by name.
pub fn discover_profiles(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let platforms_dir = project_dir.join("platforms");
    if !platforms_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut profiles = Vec::new();
    for entry in std::fs::read_dir(&platforms_dir)? {
        let entry = entry?;
        let path = entry.path();
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if let Some(name) = file_name.strip_suffix(".platform.toml") {
                profiles.push((name.to_string(), path));
            }
        }
    }
    profiles.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(profiles)
}

/// Resolve a platform name: a project-defined profile first, then the
/// builtins. Returns `None` for an unrecognized platform.
pub fn find_profile(project_dir: &Path, name: &str) -> Result<Option<PlatformProfile>> {
    let candidate = project_dir
        .join("platforms")
        .join(format!("{name}.platform.toml"));
    if candidate.is_file() {
        return load_profile_toml(&candidate).map(Some);
    }
    Ok(PlatformProfile::builtin(name))
}
