//! Shared output formatting for check reports.
//!
//! JSON and plain-text formatters for `CheckReport`. Color/terminal
//! formatting is intentionally excluded from this module — that concern
//! belongs to the CLI layer.

use std::io::Write;

use crate::report::{CheckReport, FileReport};

/// Format a `CheckReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `CheckReport` as human-readable plain text to a writer.
///
/// Only files with findings are listed; clean files appear in the totals.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  BRACKET BALANCE REPORT")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Files scanned:  {}", report.scanned_files)?;
    writeln!(writer, "  Files failed:   {}", report.failed_files)?;
    writeln!(writer, "  Issues found:   {}", report.diagnostics_count())?;
    writeln!(writer)?;

    if !report.scan_errors.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  SCAN ERRORS (files that could not be checked)")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for scan_err in &report.scan_errors {
            writeln!(writer, "{scan_err}")?;
        }
        writeln!(writer)?;
    }

    let mut any_issues = false;
    for file in report.files_with_issues() {
        if !any_issues {
            writeln!(writer, "{}", "-".repeat(80))?;
            writeln!(writer, "  BRACKET ISSUES")?;
            writeln!(writer, "{}", "-".repeat(80))?;
            any_issues = true;
        }
        write_file_section(file, writer)?;
    }
    if any_issues {
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All {} files balanced",
            report.scanned_files
        )?;
    } else {
        if !report.scan_errors.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} file(s) could not be checked \u{2014} treat this as a failure",
                report.failed_files
            )?;
        }
        let unbalanced = report.files_with_issues().count();
        if unbalanced > 0 {
            writeln!(
                writer,
                "\u{2717} {} bracket issue(s) in {} file(s)",
                report.diagnostics_count(),
                unbalanced
            )?;
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}

fn write_file_section(file: &FileReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer, "{}", file.path.display())?;
    let counts = &file.counts;
    writeln!(
        writer,
        "  counts: () {}/{}, [] {}/{}, {{}} {}/{}, `` {}",
        counts.round.0,
        counts.round.1,
        counts.square.0,
        counts.square.1,
        counts.curly.0,
        counts.curly.1,
        counts.backticks
    )?;
    for diag in &file.diagnostics {
        writeln!(writer, "  - {}", diag.format_human_readable())?;
        if !diag.context.is_empty() {
            writeln!(writer, "      {}", diag.context)?;
        }
    }
    for note in &file.notes {
        writeln!(writer, "  ~ line {}: {} (info)", note.line, note.message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan;
    use crate::{CheckReport, FileReport, ScanError, ScanErrorKind};
    use std::path::PathBuf;

    fn report_for(text: &str) -> CheckReport {
        let (counts, diagnostics) = scan(text);
        let ok = diagnostics.is_empty();
        CheckReport {
            scanned_files: 1,
            failed_files: 0,
            ok,
            files: vec![FileReport {
                path: PathBuf::from("src/app.js"),
                counts,
                diagnostics,
                notes: vec![],
            }],
            scan_errors: vec![],
        }
    }

    #[test]
    fn test_write_human_clean_run() {
        let mut out = Vec::new();
        write_human(&report_for("f(a[0]);"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("All 1 files balanced"), "got: {text}");
        assert!(!text.contains("BRACKET ISSUES"));
    }

    #[test]
    fn test_write_human_lists_findings_with_counts() {
        let mut out = Vec::new();
        write_human(&report_for("f(a[0);"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("src/app.js"), "got: {text}");
        assert!(text.contains("counts: () 1/1, [] 1/0"), "got: {text}");
        assert!(text.contains("Mismatched bracket"), "got: {text}");
    }

    #[test]
    fn test_write_human_scan_errors_section() {
        let mut report = report_for("ok();");
        report.failed_files = 1;
        report.ok = false;
        report.scan_errors.push(ScanError {
            file: PathBuf::from("src/broken.js"),
            kind: ScanErrorKind::InvalidEncoding,
            message: "File is not valid UTF-8".to_owned(),
        });

        let mut out = Vec::new();
        write_human(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("SCAN ERRORS"), "got: {text}");
        assert!(text.contains("src/broken.js"), "got: {text}");
        assert!(text.contains("1 file(s) could not be checked"), "got: {text}");
    }

    #[test]
    fn test_write_json_round_trips_schema() {
        let mut out = Vec::new();
        write_json(&report_for("(]"), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["scanned_files"], 1);
        assert_eq!(value["ok"], false);
        assert_eq!(value["files"][0]["path"], "src/app.js");
        assert_eq!(value["files"][0]["counts"]["round"][0], 1);
        assert_eq!(
            value["files"][0]["diagnostics"][0]["kind"],
            "mismatched"
        );
    }
}
