//! `mason clean` — remove emitted plans.

use std::fs;
use std::path::Path;

use anyhow::Result;

/// Remove the `out/` directory with the emitted plans.
pub fn run(project_dir: &Path) -> Result<()> {
    let out_dir = project_dir.join("out");
    if out_dir.exists() {
        fs::remove_dir_all(&out_dir)?;
        println!("Removed {}", out_dir.display());
    } else {
        println!("Already clean: {} does not exist", out_dir.display());
    }
    Ok(())
}
