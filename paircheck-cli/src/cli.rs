//! Command-line interface for the bracket balance checker.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use paircheck::{CheckConfig, CheckReport, FsSourceConfig, check_fs, output};

/// Check bracket and template-literal balance across JavaScript/TypeScript
/// source trees.
///
/// Exit status: 0 when every file is balanced, 1 when any file has a
/// bracket issue or could not be read, 2 on usage errors.
#[derive(Debug, Parser)]
#[command(name = "paircheck", version, about)]
pub struct Cli {
    /// Files or directories to check.
    #[arg(value_name = "PATH", default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Glob patterns to exclude (repeatable).
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// File extensions to scan, without the leading dot
    /// (repeatable; replaces the default js/jsx/ts/tsx/mjs/cjs set).
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Collect informational pattern notes alongside diagnostics.
    #[arg(long)]
    pub notes: bool,

    /// Maximum file size in bytes.
    #[arg(long, value_name = "BYTES", default_value_t = 10_485_760)]
    pub max_file_size: u64,

    /// Follow symbolic links during traversal.
    #[arg(long)]
    pub follow_links: bool,

    /// Suppress per-file progress lines.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text summary with per-file sections.
    Human,
    /// The full report as pretty-printed JSON.
    Json,
}

/// Parse arguments, run the check, print the report.
///
/// Returns the process exit code: 0 for a clean run, 1 for findings.
///
/// # Errors
///
/// Returns an error on invalid input paths or if writing the report fails.
pub fn run() -> anyhow::Result<i32> {
    init_tracing();
    let cli = Cli::parse();
    let report = run_check(&cli)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Human => {
            if !cli.quiet {
                print_progress(&report, &mut out)?;
            }
            output::write_human(&report, &mut out)?;
        }
        OutputFormat::Json => output::write_json(&report, &mut out)?,
    }

    Ok(i32::from(!report.ok))
}

fn run_check(cli: &Cli) -> anyhow::Result<CheckReport> {
    let mut fs_config = FsSourceConfig::default();
    fs_config.paths = cli.paths.clone();
    fs_config.exclude = cli.exclude.clone();
    fs_config.max_file_size = cli.max_file_size;
    fs_config.follow_links = cli.follow_links;
    if !cli.extensions.is_empty() {
        fs_config.extensions = cli.extensions.clone();
    }

    let mut check_config = CheckConfig::default();
    check_config.notes = cli.notes;

    check_fs(&fs_config, &check_config).context("bracket check failed")
}

/// One line per file, lint-runner style: green `ok` or red `ISSUES`.
fn print_progress(report: &CheckReport, out: &mut dyn Write) -> anyhow::Result<()> {
    for file in &report.files {
        if file.is_clean() {
            writeln!(out, "{} {}", "ok".green(), file.path.display())?;
        } else {
            writeln!(
                out,
                "{} {} ({})",
                "ISSUES".red().bold(),
                file.path.display(),
                file.diagnostics.len()
            )?;
        }
    }
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["paircheck"]);
        assert_eq!(cli.paths, vec![PathBuf::from(".")]);
        assert!(cli.exclude.is_empty());
        assert!(cli.extensions.is_empty());
        assert_eq!(cli.format, OutputFormat::Human);
        assert!(!cli.notes);
        assert!(!cli.follow_links);
    }

    #[test]
    fn test_cli_parses_repeatable_flags() {
        let cli = Cli::parse_from([
            "paircheck",
            "src",
            "backend",
            "--exclude",
            "*.min.js",
            "--exclude",
            "vendor/*",
            "--ext",
            "ts",
            "--ext",
            "tsx",
            "--format",
            "json",
            "--notes",
        ]);
        assert_eq!(cli.paths.len(), 2);
        assert_eq!(cli.exclude, vec!["*.min.js", "vendor/*"]);
        assert_eq!(cli.extensions, vec!["ts", "tsx"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.notes);
    }
}
