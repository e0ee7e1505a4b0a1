//! `mason plan` — resolve the description and emit a build plan.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;

use mason_plan::{PlanConfig, ResolvedPlan};
use mason_platforms::{discover_profiles, find_profile, load_profile_toml, PlatformProfile};

use crate::manifest::MasonManifest;

/// Run plan resolution.
#[allow(clippy::too_many_arguments)]
pub fn run(
    project_dir: &Path,
    manifest: &MasonManifest,
    platform: Option<&str>,
    all_platforms: bool,
    format: Option<&str>,
    output: Option<&str>,
    stdout: bool,
    strict: bool,
) -> Result<()> {
    let profiles = resolve_profiles(platform, all_platforms, manifest, project_dir)?;
    let project = manifest.to_project()?;

    for profile in profiles {
        info!("resolving plan for platform '{}'", profile.name);

        let mut config = PlanConfig::new(profile, project_dir);
        config.extra_settings = manifest.extra_settings();
        config.fail_on_empty_glob = strict;

        let resolved = mason_plan::resolve(&project, &config)
            .with_context(|| format!("resolving plan for '{}'", config.profile.name))?;

        print!("{}", resolved.report);
        println!("Fingerprint: {}", resolved.plan.fingerprint()?);

        if stdout {
            println!();
            println!("{}", encode(&resolved.plan, format)?);
        } else {
            let path = write_plan(project_dir, &resolved.plan, format, output)?;
            println!("Plan: {}", path.display());
        }
        println!();
    }

    Ok(())
}

fn encode(plan: &ResolvedPlan, format: Option<&str>) -> Result<String> {
    match format.unwrap_or("json") {
        "json" => Ok(plan.to_json_pretty()?),
        "toml" => Ok(plan.to_toml()?),
        other => bail!("unknown plan format: '{other}'. Choose: json, toml"),
    }
}

fn write_plan(
    project_dir: &Path,
    plan: &ResolvedPlan,
    format: Option<&str>,
    output: Option<&str>,
) -> Result<PathBuf> {
    let encoded = encode(plan, format)?;
    let extension = format.unwrap_or("json");

    let path = match output {
        Some(path) => project_dir.join(path),
        None => project_dir
            .join("out")
            .join(&plan.platform)
            .join(format!("plan.{extension}")),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&path, encoded).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Select the profiles to resolve for: `--platform` flag first, then
/// `--all-platforms`, then the manifest default.
fn resolve_profiles(
    platform: Option<&str>,
    all_platforms: bool,
    manifest: &MasonManifest,
    project_dir: &Path,
) -> Result<Vec<PlatformProfile>> {
    if let Some(name) = platform {
        return match find_profile(project_dir, name)? {
            Some(profile) => Ok(vec![profile]),
            None => bail!(
                "unknown platform: '{name}'. Available: {}",
                known_platforms(project_dir)?.join(", ")
            ),
        };
    }

    if all_platforms {
        let mut profiles: Vec<PlatformProfile> = Vec::new();
        if let Some(default_name) = manifest.default_platform() {
            if let Some(profile) = find_profile(project_dir, default_name)? {
                profiles.push(profile);
            }
        }
        for (name, path) in discover_profiles(project_dir)? {
            if profiles.iter().any(|p| p.name == name) {
                continue;
            }
            profiles.push(load_profile_toml(&path)?);
        }
        if profiles.is_empty() {
            bail!("--all-platforms: no platform profiles found");
        }
        return Ok(profiles);
    }

    match manifest.default_platform() {
        Some(name) => match find_profile(project_dir, name)? {
            Some(profile) => Ok(vec![profile]),
            None => bail!(
                "default platform '{name}' is not defined. Available: {}",
                known_platforms(project_dir)?.join(", ")
            ),
        },
        None => bail!(
            "no platform selected (set [platforms] default in mason.toml or pass --platform)"
        ),
    }
}

/// All platform names visible from a project: builtins plus discovered
/// profiles, sorted and deduplicated.
pub(crate) fn known_platforms(project_dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = PlatformProfile::builtin_names()
        .into_iter()
        .map(|(name, _)| name.to_string())
        .collect();
    for (name, _) in discover_profiles(project_dir)? {
        names.push(name);
    }
    names.sort();
    names.dedup();
    Ok(names)
}
