//! Filesystem check source.
//!
//! Discovers files on disk and reads them safely for the check pipeline.
//! Security properties enforced here:
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Resolved paths must remain within the scan root
//! - Device files, pipes, and sockets are skipped
//! - Maximum directory depth bounds the traversal
//! - Bounded streaming reads cap memory per file

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::FsSourceConfig;
use crate::error::{ScanError, ScanErrorKind};

/// Directories never descended into. These are generated or vendored trees
/// in JavaScript/TypeScript projects; scanning them drowns real findings.
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".next",
    "target",
];

/// Outcome of attempting to read a file for scanning.
pub enum ReadOutcome {
    /// File was read successfully; contains the UTF-8 content.
    Content(String),
    /// File could not be read or decoded; contains the scan error.
    Failed(ScanError),
}

/// Check if a path matches any of the exclude patterns, either as a full
/// path or by file name alone.
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// `WalkDir::filter_entry` predicate: `true` when the entry should be
/// **included** (i.e. is NOT a skip directory).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

/// Check if the file's extension is in the configured scan set.
fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Verify that `file_path` resolves inside `canonical_root`.
///
/// Catches symlink escapes even when `follow_links` is enabled; any path
/// resolving outside the scan root is a scan error, not a silent skip.
fn enforce_root_boundary(file_path: &Path, canonical_root: &Path) -> Result<(), ScanError> {
    match file_path.canonicalize() {
        Ok(canonical_path) if canonical_path.starts_with(canonical_root) => Ok(()),
        Ok(canonical_path) => Err(ScanError {
            file: file_path.to_path_buf(),
            kind: ScanErrorKind::OutsideRoot,
            message: format!(
                "Path resolves outside scan root: {} -> {}",
                file_path.display(),
                canonical_path.display()
            ),
        }),
        Err(e) => Err(ScanError {
            file: file_path.to_path_buf(),
            kind: ScanErrorKind::IoError,
            message: format!("Failed to canonicalize path: {e}"),
        }),
    }
}

/// Find all files to scan in the configured paths.
///
/// Returns `(files, scan_errors)`:
/// - `files`: sorted, deduplicated paths that passed every filter.
/// - `scan_errors`: walk errors (permission denied, loop, etc.), boundary
///   violations, and invalid exclude globs. Never silently discarded.
pub fn find_files(config: &FsSourceConfig) -> (Vec<PathBuf>, Vec<ScanError>) {
    let mut files = Vec::new();
    let mut scan_errors = Vec::new();

    let mut exclude_patterns = Vec::with_capacity(config.exclude.len());
    for pat_str in &config.exclude {
        match Pattern::new(pat_str) {
            Ok(pat) => exclude_patterns.push(pat),
            Err(e) => {
                scan_errors.push(ScanError {
                    file: PathBuf::from(pat_str),
                    kind: ScanErrorKind::InvalidExcludePattern,
                    message: format!("Invalid exclude glob pattern '{pat_str}': {e}"),
                });
            }
        }
    }

    for root in &config.paths {
        // Canonicalize each root once so the boundary holds for every entry.
        let canonical_root = match root.canonicalize() {
            Ok(resolved) => resolved,
            Err(e) => {
                scan_errors.push(ScanError {
                    file: root.clone(),
                    kind: ScanErrorKind::IoError,
                    message: format!("Failed to canonicalize root path: {e}"),
                });
                continue;
            }
        };

        if root.is_file() {
            if matches_extension(root, &config.extensions)
                && !matches_exclude(root, &exclude_patterns)
            {
                files.push(root.clone());
            }
            continue;
        }

        if !root.is_dir() {
            continue;
        }

        for entry_result in WalkDir::new(root)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
            .into_iter()
            .filter_entry(is_not_skip_dir)
        {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    scan_errors.push(ScanError {
                        file: path,
                        kind: ScanErrorKind::WalkError,
                        message: format!("Directory traversal error: {walk_err}"),
                    });
                    continue;
                }
            };

            let file_path = entry.path();

            if !file_path.is_file() || !matches_extension(file_path, &config.extensions) {
                continue;
            }

            if matches_exclude(file_path, &exclude_patterns) {
                continue;
            }

            if let Err(boundary_err) = enforce_root_boundary(file_path, &canonical_root) {
                scan_errors.push(boundary_err);
                continue;
            }

            // Only regular files — never devices, pipes, or sockets.
            #[cfg(unix)]
            {
                use std::os::unix::fs::FileTypeExt;
                if let Ok(file_type) = entry.metadata().map(|m| m.file_type())
                    && (file_type.is_block_device()
                        || file_type.is_char_device()
                        || file_type.is_fifo()
                        || file_type.is_socket())
                {
                    continue;
                }
            }

            files.push(file_path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!(
        files = files.len(),
        errors = scan_errors.len(),
        "file discovery complete"
    );
    (files, scan_errors)
}

/// Read a file with a bounded streaming read, enforcing `max_file_size`.
///
/// Uses `Read::take` so the size check and the read are one operation: no
/// TOCTOU window, no unbounded `read_to_string` on an arbitrary handle. The
/// file handle is scoped to this function and released on every exit path.
///
/// Returns [`ReadOutcome::Failed`] if:
/// - The file exceeds `max_file_size`
/// - An I/O error occurs
/// - The content is not valid UTF-8
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> ReadOutcome {
    let file = match std::fs::File::open(path) {
        Ok(handle) => handle,
        Err(e) => {
            return ReadOutcome::Failed(ScanError {
                file: path.to_owned(),
                kind: ScanErrorKind::IoError,
                message: format!("Failed to open file: {e}"),
            });
        }
    };

    // One extra byte distinguishes "exactly at the limit" from "over it".
    let mut buffer = Vec::new();
    if let Err(e) = file.take(max_file_size + 1).read_to_end(&mut buffer) {
        return ReadOutcome::Failed(ScanError {
            file: path.to_owned(),
            kind: ScanErrorKind::IoError,
            message: format!("Failed to read file: {e}"),
        });
    }

    if buffer.len() as u64 > max_file_size {
        return ReadOutcome::Failed(ScanError {
            file: path.to_owned(),
            kind: ScanErrorKind::FileTooLarge,
            message: format!("File exceeds maximum size of {max_file_size} bytes"),
        });
    }

    match String::from_utf8(buffer) {
        Ok(content) => ReadOutcome::Content(content),
        Err(_) => ReadOutcome::Failed(ScanError {
            file: path.to_owned(),
            kind: ScanErrorKind::InvalidEncoding,
            message: "File is not valid UTF-8".to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> FsSourceConfig {
        let mut config = FsSourceConfig::default();
        config.paths = vec![root.to_path_buf()];
        config
    }

    #[test]
    fn test_find_files_matches_extensions_only() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("app.ts"), "let x = 1;").unwrap();
        fs::write(tmp.path().join("notes.md"), "# notes").unwrap();
        fs::write(tmp.path().join("index.js"), "f();").unwrap();

        let (files, errors) = find_files(&config_for(tmp.path()));
        assert!(errors.is_empty(), "unexpected: {errors:?}");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_owned())
            .collect();
        assert_eq!(names, vec!["app.ts", "index.js"]);
    }

    #[test]
    fn test_find_files_skips_node_modules() {
        let tmp = TempDir::new().unwrap();
        let dep_dir = tmp.path().join("node_modules").join("dep");
        fs::create_dir_all(&dep_dir).unwrap();
        fs::write(dep_dir.join("dep.js"), "x(").unwrap();
        fs::write(tmp.path().join("own.js"), "f();").unwrap();

        let (files, _) = find_files(&config_for(tmp.path()));
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("own.js"));
    }

    #[test]
    fn test_find_files_applies_exclude_globs() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bundle.min.js"), "(((").unwrap();
        fs::write(tmp.path().join("app.js"), "f();").unwrap();

        let mut config = config_for(tmp.path());
        config.exclude = vec!["*.min.js".to_owned()];
        let (files, errors) = find_files(&config);
        assert!(errors.is_empty());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }

    #[test]
    fn test_find_files_invalid_exclude_reported() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_for(tmp.path());
        config.exclude = vec!["[".to_owned()];
        let (_, errors) = find_files(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ScanErrorKind::InvalidExcludePattern);
    }

    #[test]
    fn test_find_files_single_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("one.tsx");
        fs::write(&file, "<App />").unwrap();

        let mut config = FsSourceConfig::default();
        config.paths = vec![file.clone()];
        let (files, errors) = find_files(&config);
        assert!(errors.is_empty());
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_read_file_bounded_enforces_limit() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("big.js");
        fs::write(&file, "x".repeat(100)).unwrap();

        match read_file_bounded(&file, 10) {
            ReadOutcome::Failed(err) => assert_eq!(err.kind, ScanErrorKind::FileTooLarge),
            ReadOutcome::Content(_) => panic!("oversized file must not read"),
        }
    }

    #[test]
    fn test_read_file_bounded_exactly_at_limit() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("edge.js");
        fs::write(&file, "x".repeat(10)).unwrap();

        match read_file_bounded(&file, 10) {
            ReadOutcome::Content(content) => assert_eq!(content.len(), 10),
            ReadOutcome::Failed(err) => panic!("limit is inclusive: {err}"),
        }
    }

    #[test]
    fn test_read_file_bounded_rejects_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("bin.js");
        fs::write(&file, [0xff, 0xfe, 0x00]).unwrap();

        match read_file_bounded(&file, 1024) {
            ReadOutcome::Failed(err) => assert_eq!(err.kind, ScanErrorKind::InvalidEncoding),
            ReadOutcome::Content(_) => panic!("invalid UTF-8 must not decode"),
        }
    }
}
