//! `mason platform` — profile listing, description, and management.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use mason_platforms::{
    discover_profiles, find_profile, generate_template, load_profile_toml, profile_to_toml,
    validate_profile, PlatformProfile,
};

/// List built-in and project-defined platforms.
pub fn list(project_dir: &Path) -> Result<()> {
    println!("Built-in platforms:");
    println!();
    for (name, description) in PlatformProfile::builtin_names() {
        println!("  {name:<16} {description}");
    }

    let discovered = discover_profiles(project_dir)?;
    if !discovered.is_empty() {
        println!();
        println!("Project platforms (platforms/):");
        println!();
        for (name, path) in discovered {
            println!("  {name:<16} {}", path.display());
        }
    }

    println!();
    println!("Use 'mason platform describe <name>' for details.");
    Ok(())
}

/// Describe a specific platform profile in detail.
pub fn describe(project_dir: &Path, name: &str, format: Option<&str>) -> Result<()> {
    let profile = match find_profile(project_dir, name)? {
        Some(profile) => profile,
        None => bail!(
            "unknown platform: '{name}'. Use 'mason platform list' to see available platforms."
        ),
    };

    if format == Some("toml") {
        print!("{}", profile_to_toml(&profile)?);
        return Ok(());
    }

    println!("=== Platform: {} ===", profile.name);
    if !profile.description.is_empty() {
        println!("{}", profile.description);
    }
    println!();
    println!("--- Settings ---");
    for (name, value) in profile.settings.iter() {
        println!("  {name:<12} = {value}");
    }

    Ok(())
}

/// Write a template profile file under `platforms/`.
pub fn add(project_dir: &Path, name: &str) -> Result<()> {
    let platforms_dir = project_dir.join("platforms");
    fs::create_dir_all(&platforms_dir)
        .with_context(|| format!("creating {}", platforms_dir.display()))?;

    let path = platforms_dir.join(format!("{name}.platform.toml"));
    if path.exists() {
        bail!("profile already exists: {}", path.display());
    }

    let template = generate_template(name)?;
    fs::write(&path, template).with_context(|| format!("writing {}", path.display()))?;

    println!("Created {}", path.display());
    println!("Edit the [settings] table, then run 'mason platform validate {name}'.");
    Ok(())
}

/// Validate a project-defined profile file and print any issues.
pub fn validate(project_dir: &Path, name: &str) -> Result<()> {
    let path = project_dir
        .join("platforms")
        .join(format!("{name}.platform.toml"));
    let profile = load_profile_toml(&path)?;

    match validate_profile(&profile) {
        Ok(()) => {
            println!("{}: OK", path.display());
            Ok(())
        }
        Err(issues) => {
            let mut has_errors = false;
            for issue in &issues {
                println!("{}: {}", issue.severity, issue.message);
                has_errors |= issue.severity == "error";
            }
            if has_errors {
                bail!("profile '{name}' failed validation");
            }
            println!("{}: OK (with warnings)", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_runs_without_project_profiles() {
        let dir = tempfile::tempdir().unwrap();
        list(dir.path()).unwrap();
    }

    #[test]
    fn describe_known_platform() {
        let dir = tempfile::tempdir().unwrap();
        describe(dir.path(), "macos", None).unwrap();
        describe(dir.path(), "ios", Some("toml")).unwrap();
    }

    #[test]
    fn describe_unknown_platform() {
        let dir = tempfile::tempdir().unwrap();
        assert!(describe(dir.path(), "amiga", None).is_err());
    }

    #[test]
    fn add_then_validate() {
        let dir = tempfile::tempdir().unwrap();
        add(dir.path(), "android").unwrap();
        validate(dir.path(), "android").unwrap();

        // The new profile is now discoverable and describable.
        let discovered = discover_profiles(dir.path()).unwrap();
        assert_eq!(discovered.len(), 1);
        describe(dir.path(), "android", None).unwrap();
    }

    #[test]
    fn add_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        add(dir.path(), "android").unwrap();
        assert!(add(dir.path(), "android").is_err());
    }

    #[test]
    fn validate_missing_profile() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate(dir.path(), "ghost").is_err());
    }

    #[test]
    fn validate_rejects_bad_settings() {
        let dir = tempfile::tempdir().unwrap();
        let platforms_dir = dir.path().join("platforms");
        fs::create_dir_all(&platforms_dir).unwrap();
        fs::write(
            platforms_dir.join("odd.platform.toml"),
            "name = \"odd\"\n\n[settings]\nlowercase = \"x\"\n",
        )
        .unwrap();

        assert!(validate(dir.path(), "odd").is_err());
    }
}
