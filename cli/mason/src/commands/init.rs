//! `mason init` — project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::MasonManifest;

/// Create a new Mason project at the given path.
///
/// `name` is the project name. The directory `name` is created relative to
/// cwd.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    fs::create_dir_all(project_dir.join("src")).context("creating src/ directory")?;
    fs::create_dir_all(project_dir.join("platforms"))
        .context("creating platforms/ directory")?;

    let manifest_content = MasonManifest::template(name);
    fs::write(project_dir.join("mason.toml"), &manifest_content)
        .context("writing mason.toml")?;

    // A starter compile unit so a fresh project resolves to a non-empty
    // plan.
    fs::write(
        project_dir.join("src").join("lib.c"),
        "int project_version(void) { return 1; }\n",
    )
    .context("writing src/lib.c")?;

    fs::write(project_dir.join(".gitignore"), "out/\n").context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/mason.toml");
    println!("  {name}/src/lib.c");
    println!("  {name}/platforms/");
    println!("  {name}/.gitignore");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_project_structure() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("fresh");

        create_project(&project_path, "fresh").unwrap();

        assert!(project_path.join("mason.toml").is_file());
        assert!(project_path.join("src/lib.c").is_file());
        assert!(project_path.join("platforms").is_dir());
        assert!(project_path.join(".gitignore").is_file());
    }

    #[test]
    fn init_generates_valid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("valid");

        create_project(&project_path, "valid").unwrap();

        let content = fs::read_to_string(project_path.join("mason.toml")).unwrap();
        let manifest = MasonManifest::from_str(&content).unwrap();
        assert_eq!(manifest.project.name, "valid");
        assert_eq!(manifest.default_platform(), Some("macos"));
    }

    #[test]
    fn init_refuses_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("existing");
        fs::create_dir(&project_path).unwrap();

        let result = create_project(&project_path, "existing");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }
}
