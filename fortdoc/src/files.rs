//! Input discovery: files, directories and glob patterns.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// A discovered input file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    /// Path as found on disk.
    pub path: PathBuf,
    /// Path below the directory or glob root it was found under, or the bare
    /// file name for a file named directly. Used to place output files.
    pub relative: PathBuf,
}

impl SourceFile {
    fn new(path: PathBuf, root: &Path) -> Self {
        let relative = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => path
                .file_name()
                .map_or_else(|| path.clone(), PathBuf::from),
        };
        Self { path, relative }
    }
}

/// True if `path` ends in one of `extensions`, compared case-insensitively.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// Expand command-line paths into a sorted list of source files.
///
/// Files are taken as given, whatever their extension. Directories are scanned
/// for files with one of `extensions`, descending into subdirectories when
/// `recursive` is set; symbolic links are not followed. Anything else is
/// treated as a glob pattern.
pub fn expand_paths(
    patterns: &[String],
    extensions: &[String],
    recursive: bool,
) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            let parent = path.parent().unwrap_or(Path::new(""));
            files.push(SourceFile::new(path.to_path_buf(), parent));
            continue;
        }
        if path.is_dir() {
            scan_dir(path, extensions, recursive, &mut files)?;
            continue;
        }
        let root = glob_root(pattern);
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .map(|p| SourceFile::new(p, &root))
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup_by(|a, b| a.path == b.path);
    Ok(files)
}

fn scan_dir(
    dir: &Path,
    extensions: &[String],
    recursive: bool,
    files: &mut Vec<SourceFile>,
) -> Result<()> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .min_depth(1)
        .max_depth(max_depth)
    {
        let entry =
            entry.with_context(|| format!("failed to read directory: {}", dir.display()))?;
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(SourceFile::new(entry.into_path(), dir));
        }
    }
    Ok(())
}

/// Leading components of a glob pattern that contain no wildcard.
fn glob_root(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .take_while(|c| !c.as_os_str().to_string_lossy().contains(['*', '?', '[']))
        .collect()
}

/// Fail if two inputs would be written to the same place under an output directory.
pub fn check_distinct_targets(files: &[SourceFile]) -> Result<()> {
    let mut seen: HashMap<&Path, &Path> = HashMap::new();
    for file in files {
        if let Some(first) = seen.insert(&file.relative, &file.path) {
            bail!(
                "{} and {} would both be written to {}",
                first.display(),
                file.path.display(),
                file.relative.display()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        vec!["f90".to_string(), "f".to_string()]
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "").unwrap();
        path
    }

    fn arg(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    fn paths(files: &[SourceFile]) -> Vec<PathBuf> {
        files.iter().map(|f| f.path.clone()).collect()
    }

    fn relatives(files: &[SourceFile]) -> Vec<PathBuf> {
        files.iter().map(|f| f.relative.clone()).collect()
    }

    #[test]
    fn extension_match_ignores_case() {
        assert!(has_extension(Path::new("a/B.F90"), &exts()));
        assert!(has_extension(Path::new("old.f"), &exts()));
        assert!(!has_extension(Path::new("x.f77"), &exts()));
        assert!(!has_extension(Path::new("Makefile"), &exts()));
    }

    #[test]
    fn directory_scan_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.f90");
        let b = touch(dir.path(), "b.F");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "sub/c.f90");

        let files = expand_paths(&[arg(dir.path())], &exts(), false).unwrap();
        assert_eq!(paths(&files), vec![a, b]);
    }

    #[test]
    fn recursive_scan_descends_and_keeps_layout() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.f90");
        let c = touch(dir.path(), "sub/deeper/c.f90");

        let files = expand_paths(&[arg(dir.path())], &exts(), true).unwrap();
        assert_eq!(paths(&files), vec![a, c]);
        assert_eq!(
            relatives(&files),
            vec![PathBuf::from("a.f90"), Path::new("sub").join("deeper").join("c.f90")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_lists_each_file_once() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.f90");
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub").join("loop")).unwrap();

        let files = expand_paths(&[arg(dir.path())], &exts(), true).unwrap();
        assert_eq!(paths(&files), vec![a]);
    }

    #[test]
    fn explicit_file_ignores_extension_list() {
        let dir = TempDir::new().unwrap();
        let odd = touch(dir.path(), "legacy.for");
        let files = expand_paths(&[arg(&odd)], &exts(), false).unwrap();
        assert_eq!(paths(&files), vec![odd]);
        assert_eq!(relatives(&files), vec![PathBuf::from("legacy.for")]);
    }

    #[test]
    fn globs_are_expanded_sorted_and_deduped() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "b.f90");
        let a = touch(dir.path(), "a.f90");
        let pattern = format!("{}/*.f90", dir.path().display());

        let files = expand_paths(&[pattern, arg(&a)], &exts(), false).unwrap();
        assert_eq!(paths(&files), vec![a, b]);
    }

    #[test]
    fn glob_matches_are_relative_to_the_wildcard() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/x/util.f90");
        touch(dir.path(), "src/y/util.f90");
        let pattern = format!("{}/src/*/util.f90", dir.path().display());

        let files = expand_paths(&[pattern], &exts(), false).unwrap();
        assert_eq!(
            relatives(&files),
            vec![Path::new("x").join("util.f90"), Path::new("y").join("util.f90")]
        );
        check_distinct_targets(&files).unwrap();
    }

    #[test]
    fn unmatched_glob_is_empty() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.f90", dir.path().display());
        assert!(expand_paths(&[pattern], &exts(), false).unwrap().is_empty());
    }

    #[test]
    fn same_name_from_two_places_collides() {
        let dir = TempDir::new().unwrap();
        let x = touch(dir.path(), "x/util.f90");
        let y = touch(dir.path(), "y/util.f90");

        let files = expand_paths(&[arg(&x), arg(&y)], &exts(), false).unwrap();
        let err = check_distinct_targets(&files).unwrap_err();
        assert!(err.to_string().contains("would both be written to util.f90"));
    }
}
