//! Plan resolution pipeline.
//!
//! Runs exactly once per invocation, single-threaded: the settings table is
//! written before the pass and read-only during it.

use std::path::PathBuf;
use std::time::Instant;

use log::warn;

use mason_core::{Project, Settings, SourceSpec, StaticLibrary};
use mason_platforms::PlatformProfile;

use crate::collect::collect_sources;
use crate::error::PlanError;
use crate::plan::{ResolvedLibrary, ResolvedPlan};
use crate::report::PlanReport;

/// Configuration for a plan resolution run.
pub struct PlanConfig {
    /// Platform profile supplying the settings table.
    pub profile: PlatformProfile,
    /// Directory all source locations are resolved against.
    pub project_root: PathBuf,
    /// Extra settings overlaid on the profile (project configuration).
    pub extra_settings: Settings,
    /// Treat a glob that matches nothing as an error instead of a warning.
    pub fail_on_empty_glob: bool,
}

impl PlanConfig {
    pub fn new(profile: PlatformProfile, project_root: impl Into<PathBuf>) -> Self {
        Self {
            profile,
            project_root: project_root.into(),
            extra_settings: Settings::new(),
            fail_on_empty_glob: false,
        }
    }
}

/// Output of a successful resolution run.
#[derive(Debug)]
pub struct PlanOutput {
    /// The resolved plan.
    pub plan: ResolvedPlan,
    /// Run statistics.
    pub report: PlanReport,
}

/// Resolve a build description against a platform profile:
/// settings overlay -> placeholder substitution -> source collection ->
/// assembled plan.
pub fn resolve(project: &Project, config: &PlanConfig) -> Result<PlanOutput, PlanError> {
    let start = Instant::now();

    let mut settings = config.profile.settings.clone();
    settings.merge(&config.extra_settings);

    let mut libraries = Vec::with_capacity(project.libraries.len());
    let mut compile_units = 0usize;
    for library in &project.libraries {
        let resolved = resolve_library(library, &settings, config)?;
        compile_units += resolved.sources.len();
        libraries.push(resolved);
    }

    let mut targets = Vec::with_capacity(project.targets.len());
    for target in &project.targets {
        let path = settings.expand(target)?;
        // Registered targets may live in sibling checkouts this machine
        // does not have.
        if !config.project_root.join(&path).exists() {
            warn!("registered target '{path}' does not exist on disk");
        }
        targets.push(path);
    }

    let report = PlanReport {
        platform: config.profile.name.clone(),
        libraries: libraries.len(),
        compile_units,
        targets: targets.len(),
        settings: settings.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };
    let plan = ResolvedPlan {
        platform: config.profile.name.clone(),
        targets,
        settings,
        libraries,
    };

    Ok(PlanOutput { plan, report })
}

fn resolve_library(
    library: &StaticLibrary,
    settings: &Settings,
    config: &PlanConfig,
) -> Result<ResolvedLibrary, PlanError> {
    if library.sources.is_empty() {
        return Err(PlanError::EmptyLibrary {
            name: library.name.clone(),
        });
    }

    let mut include_dirs = Vec::with_capacity(library.includes.len());
    for include in &library.includes {
        include_dirs.push(settings.expand(include)?);
    }

    let mut defines = Vec::with_capacity(library.defines.len());
    for define in &library.defines {
        defines.push(settings.expand(define)?);
    }

    let mut sources = Vec::new();
    for spec in &library.sources {
        let expanded = SourceSpec::new(settings.expand(spec.as_str())?);
        let files = collect_sources(&config.project_root, &expanded)?;
        if files.is_empty() && expanded.is_glob() {
            if config.fail_on_empty_glob {
                return Err(PlanError::EmptyGlob {
                    pattern: expanded.as_str().to_string(),
                });
            }
            warn!(
                "glob '{}' matched no files under {}",
                expanded.as_str(),
                config.project_root.display()
            );
        }
        sources.extend(files.into_iter().map(|p| p.to_string_lossy().into_owned()));
    }
    sources.sort();
    sources.dedup();

    Ok(ResolvedLibrary {
        name: library.name.clone(),
        include_dirs,
        defines,
        sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
    }

    /// Source tree shaped like a small engine: top-level files, a lib/
    /// directory, and per-backend threading/sound/renderer directories.
    fn engine_tree(root: &Path) {
        touch(root, "Log.cpp");
        touch(root, "Log.h");
        touch(root, "lib/Format.cpp");
        touch(root, "lib/Buffer.cpp");
        touch(root, "threads/Thread.cpp");
        touch(root, "threads/Task/TaskQueue.cpp");
        touch(root, "threads/Posix/PosixThread.cpp");
        touch(root, "sound/Mixer.cpp");
        touch(root, "sound/Drivers/Driver.cpp");
        touch(root, "sound/Decoders/WavDecoder.cpp");
        touch(root, "sound/Drivers/OpenAL/OpenAlDriver.cpp");
        touch(root, "renderer/RenderContext.cpp");
        touch(root, "renderer/OpenGL/GlContext.cpp");
        fs::create_dir_all(root.join("tests")).unwrap();
    }

    fn engine_project() -> Project {
        let mut project = Project::new("engine");
        let mut core = StaticLibrary::new("Core")
            .include(["../dependency"])
            .sources([".", "lib/*", "threads", "threads/Task", "threads/$(THREADING)"])
            .defines([
                "BUILD_STATIC_LIB",
                "THREADING_$(THREADING)",
                "SOUND_$(SOUND)",
            ]);
        core.dirs(["sound", "sound/Drivers", "sound/Decoders", "sound/Drivers/$(SOUND)"]);
        core.dirs(["renderer", "renderer/$(RENDERER)"]);
        project.add_library(core).unwrap();
        project.target("../dependency");
        project.target("tests");
        project
    }

    #[test]
    fn resolve_for_macos() {
        let dir = tempfile::tempdir().unwrap();
        engine_tree(dir.path());

        let config = PlanConfig::new(PlatformProfile::macos(), dir.path());
        let output = resolve(&engine_project(), &config).unwrap();

        let plan = &output.plan;
        assert_eq!(plan.platform, "macos");
        assert_eq!(plan.settings.get("MACOS_SDK"), Some("macosx10.10"));
        assert_eq!(plan.targets, vec!["../dependency", "tests"]);

        let core = &plan.libraries[0];
        assert_eq!(core.include_dirs, vec!["../dependency"]);
        assert_eq!(
            core.defines,
            vec!["BUILD_STATIC_LIB", "THREADING_Posix", "SOUND_OpenAL"]
        );
        // Backend directories follow the substituted settings.
        assert!(core.sources.contains(&"threads/Posix/PosixThread.cpp".to_string()));
        assert!(core
            .sources
            .contains(&"sound/Drivers/OpenAL/OpenAlDriver.cpp".to_string()));
        assert!(core.sources.contains(&"renderer/OpenGL/GlContext.cpp".to_string()));
        // Literal directories and globs contribute their files once each.
        assert!(core.sources.contains(&"Log.cpp".to_string()));
        assert!(core.sources.contains(&"lib/Buffer.cpp".to_string()));
        assert_eq!(core.sources.len(), 12);

        assert_eq!(output.report.libraries, 1);
        assert_eq!(output.report.compile_units, 12);
        assert_eq!(output.report.targets, 2);
        assert_eq!(output.report.settings, 4);
    }

    #[test]
    fn resolve_for_ios() {
        let dir = tempfile::tempdir().unwrap();
        engine_tree(dir.path());

        let config = PlanConfig::new(PlatformProfile::ios(), dir.path());
        let output = resolve(&engine_project(), &config).unwrap();

        assert_eq!(output.plan.platform, "ios");
        assert_eq!(output.plan.settings.get("IOS_SDK"), Some("iphoneos8.0"));
        assert_eq!(output.plan.settings.get("MACOS_SDK"), None);
        // Both mobile and desktop share the Posix/OpenAL/OpenGL backends,
        // and the same two targets are registered either way.
        assert_eq!(output.plan.libraries[0].sources.len(), 12);
        assert_eq!(output.plan.targets.len(), 2);
    }

    #[test]
    fn unset_setting_fails_resolution() {
        let dir = tempfile::tempdir().unwrap();
        engine_tree(dir.path());

        // A profile that never defines THREADING leaves the description's
        // `threads/$(THREADING)` location unresolvable.
        let profile = PlatformProfile::new("headless", "");
        let config = PlanConfig::new(profile, dir.path());
        let err = resolve(&engine_project(), &config).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Core(mason_core::CoreError::UndefinedSetting { ref name }) if name == "THREADING"
        ));
    }

    #[test]
    fn extra_settings_overlay_profile() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "sound/Mixer.cpp");
        touch(dir.path(), "sound/Drivers/Null/NullDriver.cpp");

        let mut project = Project::new("engine");
        project
            .add_library(
                StaticLibrary::new("Sound").sources(["sound", "sound/Drivers/$(SOUND)"]),
            )
            .unwrap();

        let mut config = PlanConfig::new(PlatformProfile::macos(), dir.path());
        config.extra_settings.set("SOUND", "Null");
        let output = resolve(&project, &config).unwrap();

        assert_eq!(output.plan.settings.get("SOUND"), Some("Null"));
        assert!(output.plan.libraries[0]
            .sources
            .contains(&"sound/Drivers/Null/NullDriver.cpp".to_string()));
    }

    #[test]
    fn empty_library_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = Project::new("engine");
        project.add_library(StaticLibrary::new("Hollow")).unwrap();

        let config = PlanConfig::new(PlatformProfile::macos(), dir.path());
        let err = resolve(&project, &config).unwrap_err();
        assert!(matches!(err, PlanError::EmptyLibrary { name } if name == "Hollow"));
    }

    #[test]
    fn empty_glob_warns_by_default() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Log.cpp");

        let mut project = Project::new("engine");
        project
            .add_library(StaticLibrary::new("Core").sources([".", "plugins/*"]))
            .unwrap();

        let config = PlanConfig::new(PlatformProfile::macos(), dir.path());
        let output = resolve(&project, &config).unwrap();
        assert_eq!(output.plan.libraries[0].sources, vec!["Log.cpp"]);
    }

    #[test]
    fn empty_glob_errors_in_strict_mode() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Log.cpp");

        let mut project = Project::new("engine");
        project
            .add_library(StaticLibrary::new("Core").sources([".", "plugins/*"]))
            .unwrap();

        let mut config = PlanConfig::new(PlatformProfile::macos(), dir.path());
        config.fail_on_empty_glob = true;
        let err = resolve(&project, &config).unwrap_err();
        assert!(matches!(err, PlanError::EmptyGlob { pattern } if pattern == "plugins/*"));
    }

    #[test]
    fn missing_source_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = Project::new("engine");
        project
            .add_library(StaticLibrary::new("Core").sources(["renderer"]))
            .unwrap();

        let config = PlanConfig::new(PlatformProfile::macos(), dir.path());
        let err = resolve(&project, &config).unwrap_err();
        assert!(matches!(err, PlanError::SourceDirNotFound { .. }));
    }

    #[test]
    fn overlapping_locations_deduplicate() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "lib/Format.cpp");

        let mut project = Project::new("engine");
        project
            .add_library(StaticLibrary::new("Core").sources(["lib", "lib/*"]))
            .unwrap();

        let config = PlanConfig::new(PlatformProfile::macos(), dir.path());
        let output = resolve(&project, &config).unwrap();
        assert_eq!(output.plan.libraries[0].sources, vec!["lib/Format.cpp"]);
        assert_eq!(output.report.compile_units, 1);
    }

    #[test]
    fn plan_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        engine_tree(dir.path());

        let config = PlanConfig::new(PlatformProfile::macos(), dir.path());
        let project = engine_project();
        let a = resolve(&project, &config).unwrap().plan;
        let b = resolve(&project, &config).unwrap().plan;
        assert_eq!(a, b);
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }
}
