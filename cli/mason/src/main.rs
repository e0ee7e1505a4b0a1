//! Mason CLI — declarative build descriptions resolved into build plans.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use manifest::MasonManifest;

#[derive(Parser)]
#[command(name = "mason", version, about = "Declarative build-description tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Mason project
    Init {
        /// Project name
        name: String,
    },
    /// Resolve the build description into a plan for a platform
    Plan {
        /// Platform name (e.g. macos, ios, or a platforms/ profile)
        #[arg(long)]
        platform: Option<String>,
        /// Resolve for the default platform plus every discovered profile
        #[arg(long)]
        all_platforms: bool,
        /// Plan encoding (json, toml)
        #[arg(long)]
        format: Option<String>,
        /// Output file path (default: out/<platform>/plan.<format>)
        #[arg(long)]
        output: Option<String>,
        /// Print the plan instead of writing a file
        #[arg(long)]
        stdout: bool,
        /// Treat a glob that matches nothing as an error
        #[arg(long)]
        strict: bool,
    },
    /// Show the resolved settings table for a platform
    Settings {
        /// Platform name (default: the manifest default)
        #[arg(long)]
        platform: Option<String>,
    },
    /// Manage platform profiles
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },
    /// Check tool and project status
    Doctor,
    /// Remove emitted plans
    Clean,
}

#[derive(Subcommand)]
enum PlatformAction {
    /// List built-in and project-defined platforms
    List,
    /// Show details of a platform profile
    Describe {
        /// Platform name
        name: String,
        /// Output format (default: human-readable, "toml" for TOML)
        #[arg(long)]
        format: Option<String>,
    },
    /// Write a template profile under platforms/
    Add {
        /// Platform name
        name: String,
    },
    /// Validate a project-defined profile file
    Validate {
        /// Platform name
        name: String,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Plan {
            platform,
            all_platforms,
            format,
            output,
            stdout,
            strict,
        } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::plan::run(
                &project_dir,
                &manifest,
                platform.as_deref(),
                all_platforms,
                format.as_deref(),
                output.as_deref(),
                stdout,
                strict,
            )
        }

        Commands::Settings { platform } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            commands::settings::run(&project_dir, manifest.as_ref(), platform.as_deref())
        }

        Commands::Platform { action } => {
            let (_, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            match action {
                PlatformAction::List => commands::platform::list(&project_dir),
                PlatformAction::Describe { name, format } => {
                    commands::platform::describe(&project_dir, &name, format.as_deref())
                }
                PlatformAction::Add { name } => commands::platform::add(&project_dir, &name),
                PlatformAction::Validate { name } => {
                    commands::platform::validate(&project_dir, &name)
                }
            }
        }

        Commands::Doctor => {
            let (_, project_dir) = load_manifest_optional(&cwd)?;
            commands::doctor::run(&project_dir.unwrap_or(cwd))
        }

        Commands::Clean => {
            let (_, project_dir) = load_manifest_optional(&cwd)?;
            commands::clean::run(&project_dir.unwrap_or(cwd))
        }
    }
}

/// Load manifest, returning an error if not found.
fn load_manifest_required(cwd: &Path) -> anyhow::Result<(MasonManifest, PathBuf)> {
    match MasonManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((manifest, dir)),
        None => anyhow::bail!("no mason.toml found (run `mason init` first)"),
    }
}

/// Try to load a manifest from the current directory upward. Returns
/// (None, None) if not found.
fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<MasonManifest>, Option<PathBuf>)> {
    match MasonManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}
