//! `mason settings` — print the resolved settings table.

use std::path::Path;

use anyhow::{bail, Result};

use mason_platforms::find_profile;

use crate::commands::plan::known_platforms;
use crate::manifest::MasonManifest;

/// Print the settings a platform resolves to, with the project overlay
/// applied when a manifest is present.
pub fn run(
    project_dir: &Path,
    manifest: Option<&MasonManifest>,
    platform: Option<&str>,
) -> Result<()> {
    let name = match platform.or_else(|| manifest.and_then(|m| m.default_platform())) {
        Some(name) => name,
        None => bail!(
            "no platform selected (set [platforms] default in mason.toml or pass --platform)"
        ),
    };

    let profile = match find_profile(project_dir, name)? {
        Some(profile) => profile,
        None => bail!(
            "unknown platform: '{name}'. Available: {}",
            known_platforms(project_dir)?.join(", ")
        ),
    };

    let mut settings = profile.settings.clone();
    if let Some(manifest) = manifest {
        settings.merge(&manifest.extra_settings());
    }

    println!("=== Settings: {} ===", profile.name);
    if !profile.description.is_empty() {
        println!("{}", profile.description);
    }
    println!();
    if settings.is_empty() {
        println!("  (no settings defined)");
    }
    for (name, value) in settings.iter() {
        println!("  {name:<12} = {value}");
    }

    Ok(())
}
