//! Error and diagnostic types for bracket checking.

use std::path::PathBuf;

use serde::Serialize;

/// The kind of scan-level failure that prevented a file from being checked.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The resolved path is outside the scan root (symlink escape).
    OutsideRoot,
    /// A resource limit (`max_files` or `max_total_bytes`) was reached, truncating the scan.
    LimitExceeded,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A scan-level error: a file that could not be checked at all.
///
/// These are distinct from [`Diagnostic`] (a bracket defect found in text the
/// scanner did read). A `ScanError` means the file never reached the scanner,
/// so the run must not report it as balanced — CI treats these as failures.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, thiserror::Error)]
#[error("{}: [scan error] {message}", .file.display())]
#[non_exhaustive]
pub struct ScanError {
    /// The file path that could not be scanned.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

/// Classification of a single bracket-balance defect.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// A closing bracket with no open bracket left on the stack.
    UnmatchedClose,
    /// A closing bracket whose family differs from the most recent open.
    Mismatched,
    /// An opening bracket still on the stack at end of file.
    UnclosedOpen,
    /// The file's total backtick count is odd.
    OddBacktickCount,
}

/// A single bracket-balance defect found in a scanned file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Line number (1-indexed); 0 for whole-file diagnostics (backtick parity).
    pub line: usize,
    /// Column offset within the line (0-indexed, in characters).
    pub column: usize,
    /// Human-readable description of the defect.
    pub message: String,
    /// The source line the defect sits on, trimmed and truncated.
    pub context: String,
}

impl Diagnostic {
    /// Format the diagnostic for human-readable output.
    ///
    /// Positioned: `line {line}, col {column}: {message}`.
    /// Whole-file (line 0): just the message.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        if self.line > 0 {
            format!("line {}, col {}: {}", self.line, self.column, self.message)
        } else {
            self.message.clone()
        }
    }
}
