//! Informational pattern notes.
//!
//! Line-level observations that often accompany real bracket damage but are
//! not defects on their own (minified code trips them constantly). Notes are
//! opt-in and never affect the pass/fail outcome.
//!
//! The per-line quote-parity heuristic that earlier ad-hoc checkers carried
//! was removed: counting `\'` occurrences miscounts escaped backslashes
//! (`"\\"` ends the string, yet naive counting treats the quote as escaped).

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static RUN_OF_OPENERS: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"[(\[{]{3,}") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid opener-run regex: {err}"),
    }
});

static RUN_OF_CLOSERS: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"[)\]}]{3,}") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid closer-run regex: {err}"),
    }
});

/// An informational, non-failing observation about one line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Note {
    /// Line number (1-indexed).
    pub line: usize,
    /// Human-readable description of the pattern.
    pub message: String,
}

/// Scan `text` for informational patterns, line by line.
#[must_use]
pub fn scan_notes(text: &str) -> Vec<Note> {
    let mut notes = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line_number = line_idx + 1;

        if RUN_OF_OPENERS.is_match(line) {
            notes.push(Note {
                line: line_number,
                message: "Run of 3+ consecutive opening brackets".to_owned(),
            });
        }

        if RUN_OF_CLOSERS.is_match(line) {
            notes.push(Note {
                line: line_number,
                message: "Run of 3+ consecutive closing brackets".to_owned(),
            });
        }

        // A single backtick next to brackets usually means a template literal
        // continues across lines; its interior is not bracket-validated.
        if line.matches('`').count() == 1 && line.contains(['(', '[', '{']) {
            notes.push(Note {
                line: line_number,
                message: "Lone backtick on a line with brackets; template literal may span lines"
                    .to_owned(),
            });
        }
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_empty_for_plain_code() {
        let notes = scan_notes("const x = f(a, b);\nreturn x[0];\n");
        assert!(notes.is_empty(), "unexpected: {notes:?}");
    }

    #[test]
    fn test_notes_opener_run() {
        let notes = scan_notes("matrix[[[0]]]\n");
        assert!(
            notes.iter().any(|n| n.line == 1 && n.message.contains("opening")),
            "got: {notes:?}"
        );
    }

    #[test]
    fn test_notes_closer_run() {
        let notes = scan_notes("f(g(h(x)));\nreturn a)))\n");
        let closer_lines: Vec<usize> = notes
            .iter()
            .filter(|n| n.message.contains("closing"))
            .map(|n| n.line)
            .collect();
        assert_eq!(closer_lines, vec![1, 2]);
    }

    #[test]
    fn test_notes_lone_backtick_with_brackets() {
        let notes = scan_notes("const q = `SELECT (\n");
        assert!(
            notes.iter().any(|n| n.message.contains("backtick")),
            "got: {notes:?}"
        );
    }

    #[test]
    fn test_notes_paired_backticks_not_flagged() {
        let notes = scan_notes("const s = `a(b)`;\n");
        assert!(
            !notes.iter().any(|n| n.message.contains("backtick")),
            "got: {notes:?}"
        );
    }

    #[test]
    fn test_notes_mixed_family_runs_count() {
        // Runs are cross-family: "(})" style sequences still form a run.
        let notes = scan_notes("x = ([{y\n");
        assert!(
            notes.iter().any(|n| n.message.contains("opening")),
            "got: {notes:?}"
        );
    }
}
