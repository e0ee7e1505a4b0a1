//! Source collection: expanding source locations into compile units.
//!
//! A literal directory contributes its immediate source files. A glob
//! pattern is matched against project-root-relative file paths: `*` matches
//! within one path segment, `**` matches any number of whole segments.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use mason_core::SourceSpec;

use crate::error::PlanError;

/// File extensions treated as compile units.
pub const SOURCE_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "m", "mm"];

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SOURCE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Expand one source location relative to `root`.
///
/// Returns project-root-relative paths, sorted. A missing literal directory
/// is an error; an empty glob result is left to the caller to warn about or
/// reject.
pub fn collect_sources(root: &Path, spec: &SourceSpec) -> Result<Vec<PathBuf>, PlanError> {
    if spec.is_glob() {
        collect_glob(root, spec.as_str())
    } else {
        collect_dir(root, spec.as_str())
    }
}

fn collect_dir(root: &Path, dir: &str) -> Result<Vec<PathBuf>, PlanError> {
    let full = if dir == "." {
        root.to_path_buf()
    } else {
        root.join(dir)
    };
    if !full.is_dir() {
        return Err(PlanError::SourceDirNotFound { path: full });
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(&full)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() || !is_source_file(&entry.path()) {
            continue;
        }
        let rel = if dir == "." {
            PathBuf::from(entry.file_name())
        } else {
            Path::new(dir).join(entry.file_name())
        };
        files.push(rel);
    }
    files.sort();
    Ok(files)
}

fn collect_glob(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, PlanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_source_file(entry.path()) {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if path_matches(pattern, &rel.to_string_lossy()) {
            files.push(rel.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Match a root-relative path against a glob pattern.
///
/// Matching is segment-wise on `/`-separated components. There is no escape
/// syntax.
pub fn path_matches(pattern: &str, path: &str) -> bool {
    let pat: Vec<&str> = pattern.split('/').collect();
    let segs: Vec<&str> = path.split('/').collect();
    match_segments(&pat, &segs)
}

fn match_segments(pat: &[&str], segs: &[&str]) -> bool {
    match pat.first() {
        None => segs.is_empty(),
        Some(&"**") => (0..=segs.len()).any(|k| match_segments(&pat[1..], &segs[k..])),
        Some(p) => match segs.first() {
            Some(s) if segment_matches(p, s) => match_segments(&pat[1..], &segs[1..]),
            _ => false,
        },
    }
}

/// Match one path segment against one pattern segment, where `*` matches
/// any run of characters.
fn segment_matches(pat: &str, seg: &str) -> bool {
    let parts: Vec<&str> = pat.split('*').collect();
    if parts.len() == 1 {
        return pat == seg;
    }

    let mut rest = seg;
    match rest.strip_prefix(parts[0]) {
        Some(stripped) => rest = stripped,
        None => return false,
    }
    let last = parts[parts.len() - 1];
    match rest.strip_suffix(last) {
        Some(stripped) => rest = stripped,
        None => return false,
    }
    for middle in &parts[1..parts.len() - 1] {
        if middle.is_empty() {
            continue;
        }
        match rest.find(middle) {
            Some(idx) => rest = &rest[idx + middle.len()..],
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
    }

    #[test]
    fn segment_wildcards() {
        assert!(segment_matches("*", "anything.cpp"));
        assert!(segment_matches("*.cpp", "Mixer.cpp"));
        assert!(!segment_matches("*.cpp", "Mixer.h"));
        assert!(segment_matches("Gl*Context", "GlRenderContext"));
        assert!(!segment_matches("Gl*Context", "VkRenderContext"));
        assert!(segment_matches("exact", "exact"));
        assert!(!segment_matches("exact", "inexact"));
    }

    #[test]
    fn path_matching() {
        assert!(path_matches("lib/*", "lib/Format.cpp"));
        assert!(!path_matches("lib/*", "lib/sub/Format.cpp"));
        assert!(!path_matches("lib/*", "other/Format.cpp"));
        assert!(path_matches("**/*.cpp", "a/b/c.cpp"));
        assert!(path_matches("**/*.cpp", "c.cpp"));
        assert!(path_matches("src/**", "src/deep/nested/file.c"));
        assert!(!path_matches("src/**", "other/file.c"));
    }

    #[test]
    fn collect_dir_immediate_sources_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "threads/Thread.cpp");
        touch(dir.path(), "threads/Thread.h");
        touch(dir.path(), "threads/Posix/PosixThread.cpp");

        let files = collect_sources(dir.path(), &SourceSpec::new("threads")).unwrap();
        assert_eq!(files, vec![PathBuf::from("threads/Thread.cpp")]);
    }

    #[test]
    fn collect_dot_is_project_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Log.cpp");
        touch(dir.path(), "lib/Format.cpp");

        let files = collect_sources(dir.path(), &SourceSpec::new(".")).unwrap();
        assert_eq!(files, vec![PathBuf::from("Log.cpp")]);
    }

    #[test]
    fn collect_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_sources(dir.path(), &SourceSpec::new("renderer")).unwrap_err();
        assert!(matches!(err, PlanError::SourceDirNotFound { .. }));
    }

    #[test]
    fn collect_glob_matches_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "lib/Format.cpp");
        touch(dir.path(), "lib/Buffer.cpp");
        touch(dir.path(), "lib/Buffer.h");
        touch(dir.path(), "lib/detail/Inner.cpp");

        let files = collect_sources(dir.path(), &SourceSpec::new("lib/*")).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("lib/Buffer.cpp"),
                PathBuf::from("lib/Format.cpp"),
            ]
        );
    }

    #[test]
    fn collect_recursive_glob() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "sound/Mixer.cpp");
        touch(dir.path(), "sound/Decoders/WavDecoder.cpp");

        let files = collect_sources(dir.path(), &SourceSpec::new("sound/**")).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn collect_glob_empty_is_ok_here() {
        // Emptiness policy belongs to the pipeline; collection itself just
        // returns the matches.
        let dir = tempfile::tempdir().unwrap();
        let files = collect_sources(dir.path(), &SourceSpec::new("lib/*")).unwrap();
        assert!(files.is_empty());
    }
}
