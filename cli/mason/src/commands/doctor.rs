//! `mason doctor` — project and tool diagnostics.

use std::path::Path;

use anyhow::Result;

use mason_core::SourceSpec;
use mason_platforms::{discover_profiles, PlatformProfile};

use crate::manifest::MasonManifest;

/// Print diagnostic information about the tool and the current project.
pub fn run(project_dir: &Path) -> Result<()> {
    println!("=== Mason Doctor ===");
    println!();

    println!("Mason version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Project Status ---");
    match MasonManifest::find_and_load(project_dir) {
        Ok(Some((manifest, dir))) => {
            println!("  mason.toml: found at {}", dir.display());
            println!("  Project:    {}", manifest.project.name);
            match semver::Version::parse(&manifest.project.version) {
                Ok(version) => println!("  Version:    {version}"),
                Err(_) => println!(
                    "  Version:    {} (not valid semver)",
                    manifest.project.version
                ),
            }
            match manifest.default_platform() {
                Some(default) => println!("  Default platform: {default}"),
                None => println!("  Default platform: (none)"),
            }
            println!();
            print_library_status(&dir, &manifest);
        }
        Ok(None) => {
            println!("  mason.toml: not found");
        }
        Err(e) => {
            println!("  mason.toml: error: {e:#}");
        }
    }
    println!();

    println!("--- Platforms ---");
    println!("  Built-in: {}", PlatformProfile::builtin_names().len());
    match discover_profiles(project_dir) {
        Ok(discovered) => println!("  Project:  {}", discovered.len()),
        Err(e) => println!("  Project:  error: {e}"),
    }

    Ok(())
}

fn print_library_status(project_dir: &Path, manifest: &MasonManifest) {
    println!("--- Libraries ---");
    if manifest.libraries.is_empty() {
        println!("  (none declared)");
        return;
    }
    for lib in &manifest.libraries {
        let missing: Vec<&str> = lib
            .sources
            .iter()
            .filter(|location| {
                // Placeholder-bearing and glob locations are only checkable
                // at plan time.
                let spec = SourceSpec::new(location.as_str());
                !spec.is_glob()
                    && !spec.as_str().contains("$(")
                    && !project_dir.join(spec.as_str()).is_dir()
            })
            .map(|location| location.as_str())
            .collect();

        if missing.is_empty() {
            println!("  {}: {} source locations", lib.name, lib.sources.len());
        } else {
            println!(
                "  {}: {} source locations, missing: {}",
                lib.name,
                lib.sources.len(),
                missing.join(", ")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_runs_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
    }

    #[test]
    fn doctor_runs_with_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("mason.toml"),
            r#"
[project]
name = "engine"
version = "not-a-version"

[[libraries]]
name = "Core"
sources = ["src", "lib/*", "threads/$(THREADING)"]
"#,
        )
        .unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();

        // "src" exists, the glob and placeholder entries are skipped, and
        // the invalid version is reported without failing.
        run(dir.path()).unwrap();
    }
}
