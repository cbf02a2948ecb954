//! # paircheck
//!
//! Bracket and template-literal balance checking for JavaScript/TypeScript
//! sources.
//!
//! The core is [`scan`]: a pure, total function over file text that tracks
//! open brackets on one combined stack and reports unmatched, mismatched,
//! and unclosed brackets with line/column positions. [`check_fs`] wires the
//! scanner to filesystem discovery, bounded reads, and a run-level report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use paircheck::{check_fs, CheckConfig, FsSourceConfig};
//!
//! let mut fs_config = FsSourceConfig::default();
//! fs_config.paths = vec![PathBuf::from("src"), PathBuf::from("backend/src")];
//! fs_config.exclude = vec!["*.min.js".to_owned()];
//!
//! let report = check_fs(&fs_config, &CheckConfig::default()).unwrap();
//! println!("Files scanned: {}", report.scanned_files);
//! println!("Diagnostics: {}", report.diagnostics_count());
//! println!("Scan errors: {}", report.scan_errors.len());
//! println!("OK: {}", report.ok);
//! ```
//!
//! Scans share no state, so callers that want parallelism can run
//! [`scan`] per file on their own worker pool with no coordination.

mod config;
mod error;
pub mod output;
mod patterns;
mod report;
mod scanner;
mod strategy;

pub use config::{CheckConfig, DEFAULT_EXTENSIONS, FsSourceConfig};
pub use error::{Diagnostic, DiagnosticKind, ScanError, ScanErrorKind};
pub use patterns::{Note, scan_notes};
pub use report::{CheckReport, FileReport};
pub use scanner::{BracketCounts, BracketFamily, scan};

use strategy::fs::{ReadOutcome, find_files, read_file_bounded};

/// Check bracket balance in files on disk.
///
/// This is the primary public API.
///
/// # Arguments
///
/// * `fs_config` - Filesystem-specific source options (paths, exclude,
///   extensions, size limits)
/// * `check_config` - Core check config (informational notes on/off)
///
/// # Errors
///
/// Returns an error if `fs_config.paths` is empty or if any provided path
/// does not exist. Returns `Ok` with `scanned_files: 0` if paths exist but
/// contain no matching files. Per-file failures (unreadable, oversized,
/// non-UTF-8) land in `report.scan_errors` and never abort the run.
pub fn check_fs(
    fs_config: &FsSourceConfig,
    check_config: &CheckConfig,
) -> anyhow::Result<CheckReport> {
    if fs_config.paths.is_empty() {
        anyhow::bail!("No paths provided to check");
    }

    for path in &fs_config.paths {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    let (files, mut scan_errors) = find_files(fs_config);

    let mut reports = Vec::with_capacity(files.len());
    let mut scanned_files: usize = 0;
    // Discovery-stage failures (walk errors, boundary violations, bad globs)
    // are already in scan_errors; they count as failed files upfront.
    let mut failed_files: usize = scan_errors.len();
    let mut total_bytes: u64 = 0;

    for file_path in &files {
        if scanned_files + failed_files >= fs_config.max_files {
            scan_errors.push(ScanError {
                file: file_path.clone(),
                kind: ScanErrorKind::LimitExceeded,
                message: format!(
                    "Scan aborted: max_files limit ({}) reached; remaining files not scanned",
                    fs_config.max_files
                ),
            });
            failed_files += 1;
            break;
        }

        let content = match read_file_bounded(file_path, fs_config.max_file_size) {
            ReadOutcome::Content(content) => content,
            ReadOutcome::Failed(err) => {
                scan_errors.push(err);
                failed_files += 1;
                continue;
            }
        };

        let file_bytes = content.len() as u64;
        if total_bytes.saturating_add(file_bytes) > fs_config.max_total_bytes {
            scan_errors.push(ScanError {
                file: file_path.clone(),
                kind: ScanErrorKind::LimitExceeded,
                message: format!(
                    "Scan aborted: max_total_bytes limit ({}) reached; remaining files not scanned",
                    fs_config.max_total_bytes
                ),
            });
            failed_files += 1;
            break;
        }
        total_bytes = total_bytes.saturating_add(file_bytes);

        let (counts, diagnostics) = scan(&content);
        let notes = if check_config.notes {
            scan_notes(&content)
        } else {
            Vec::new()
        };

        tracing::debug!(
            path = %file_path.display(),
            diagnostics = diagnostics.len(),
            "scanned file"
        );

        scanned_files += 1;
        reports.push(FileReport {
            path: file_path.clone(),
            counts,
            diagnostics,
            notes,
        });
    }

    let ok = scan_errors.is_empty() && reports.iter().all(FileReport::is_clean);
    Ok(CheckReport {
        scanned_files,
        failed_files,
        ok,
        files: reports,
        scan_errors,
    })
}
