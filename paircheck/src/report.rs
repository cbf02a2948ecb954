//! Check report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Diagnostic, ScanError};
use crate::patterns::Note;
use crate::scanner::BracketCounts;

/// Per-file result: raw bracket tallies plus everything found in the text.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct FileReport {
    /// The scanned file.
    pub path: PathBuf,
    /// Raw per-family open/close tallies and the backtick total.
    pub counts: BracketCounts,
    /// Bracket-balance defects, in encounter order.
    pub diagnostics: Vec<Diagnostic>,
    /// Informational pattern notes (opt-in; never affect `ok`).
    pub notes: Vec<Note>,
}

impl FileReport {
    /// True when the file produced no diagnostics. Notes do not count.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Result of a check run.
///
/// CI pipelines must check both per-file diagnostics and `scan_errors`.
/// A non-empty `scan_errors` means some files were never scanned —
/// treat this as a failure regardless of the diagnostics.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct CheckReport {
    /// Number of files successfully read and scanned.
    pub scanned_files: usize,
    /// Number of files that could not be scanned (read/decode failures).
    pub failed_files: usize,
    /// Whether every scanned file is clean AND no scan errors occurred.
    pub ok: bool,
    /// Per-file reports, in deterministic (sorted) path order.
    pub files: Vec<FileReport>,
    /// Scan-level errors: files that could not be read or decoded.
    pub scan_errors: Vec<ScanError>,
}

impl CheckReport {
    /// Total number of files attempted (scanned + failed).
    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.scanned_files + self.failed_files
    }

    /// Total number of diagnostics across all scanned files.
    #[must_use]
    pub fn diagnostics_count(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }

    /// Scanned files that produced at least one diagnostic.
    pub fn files_with_issues(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.is_clean())
    }
}
