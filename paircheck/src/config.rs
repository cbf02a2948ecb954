//! Configuration types for bracket checking.
//!
//! Split into core check config (universal) and source-specific config (how
//! content is discovered). The core API must not leak filesystem concerns.

use std::path::PathBuf;

/// File extensions scanned when [`FsSourceConfig::extensions`] is left at its
/// default: the JavaScript/TypeScript family, without the leading dot.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Core check config — applies regardless of input source.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct CheckConfig {
    /// Collect informational pattern notes alongside diagnostics (default: off).
    ///
    /// Notes are observations, not defects; they never affect the run outcome.
    pub notes: bool,
}

/// Filesystem-specific source options.
///
/// NOTE: `paths` is required and must be non-empty. Defaulting to the current
/// directory is a CLI/wrapper concern, not baked into the library.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Paths to scan (files or directories). Required, must be non-empty.
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format).
    pub exclude: Vec<String>,
    /// File extensions to scan, without the leading dot.
    pub extensions: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links.
    ///
    /// **Defaults to `false`** — following symlinks allows escaping the scan
    /// root and traversing system directories in CI environments. Only enable
    /// if you explicitly trust all symlinks in the tree.
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
    /// Maximum total number of files to scan (default: `100_000`).
    pub max_files: usize,
    /// Maximum total bytes to read across all files (default: 512 MB).
    pub max_total_bytes: u64,
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_owned()).collect(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
            max_files: 100_000,
            max_total_bytes: 536_870_912,
        }
    }
}
