//! Bracket balance scanner.
//!
//! A single left-to-right pass over file text that tracks open brackets on
//! one combined stack and reports unmatched, mismatched, and unclosed
//! brackets with line/column positions. The combined stack (rather than one
//! stack per family) is what makes cross-family errors like `(]` detectable.

use serde::Serialize;

use crate::error::{Diagnostic, DiagnosticKind};

/// Character width diagnostics truncate their context snippet to.
const SNIPPET_WIDTH: usize = 50;

/// One of the three bracket families tracked by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketFamily {
    Round,
    Square,
    Curly,
}

impl BracketFamily {
    /// The opening character of this family.
    #[must_use]
    pub const fn open_char(self) -> char {
        match self {
            Self::Round => '(',
            Self::Square => '[',
            Self::Curly => '{',
        }
    }

    /// The closing character of this family.
    #[must_use]
    pub const fn close_char(self) -> char {
        match self {
            Self::Round => ')',
            Self::Square => ']',
            Self::Curly => '}',
        }
    }

    const fn from_open(ch: char) -> Option<Self> {
        match ch {
            '(' => Some(Self::Round),
            '[' => Some(Self::Square),
            '{' => Some(Self::Curly),
            _ => None,
        }
    }

    const fn from_close(ch: char) -> Option<Self> {
        match ch {
            ')' => Some(Self::Round),
            ']' => Some(Self::Square),
            '}' => Some(Self::Curly),
            _ => None,
        }
    }
}

/// Raw per-family character tallies, independent of nesting correctness.
///
/// Serializes as `{"round":[o,c],"square":[o,c],"curly":[o,c],"backticks":n}`.
/// Useful as a fast pre-check: unequal tallies guarantee diagnostics, but
/// equal tallies do not guarantee their absence (`")("` counts as 1/1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BracketCounts {
    /// `(` and `)` tallies.
    pub round: (usize, usize),
    /// `[` and `]` tallies.
    pub square: (usize, usize),
    /// `{` and `}` tallies.
    pub curly: (usize, usize),
    /// Total backtick occurrences (a toggle, so only parity matters).
    pub backticks: usize,
}

impl BracketCounts {
    fn tally_open(&mut self, family: BracketFamily) {
        match family {
            BracketFamily::Round => self.round.0 += 1,
            BracketFamily::Square => self.square.0 += 1,
            BracketFamily::Curly => self.curly.0 += 1,
        }
    }

    fn tally_close(&mut self, family: BracketFamily) {
        match family {
            BracketFamily::Round => self.round.1 += 1,
            BracketFamily::Square => self.square.1 += 1,
            BracketFamily::Curly => self.curly.1 += 1,
        }
    }

    /// True when every family has equal open/close tallies and the backtick
    /// total is even. Necessary but not sufficient for a clean scan.
    #[must_use]
    pub const fn is_paired(&self) -> bool {
        self.round.0 == self.round.1
            && self.square.0 == self.square.1
            && self.curly.0 == self.curly.1
            && self.backticks % 2 == 0
    }
}

/// An open bracket waiting for its closer on the combined stack.
#[derive(Debug, Clone)]
struct OpenBracket {
    family: BracketFamily,
    line: usize,
    column: usize,
    snippet: String,
}

/// Scan `text` for bracket and template-literal balance.
///
/// Returns raw character tallies plus diagnostics in encounter order:
/// scan-order findings first, then unclosed opens (oldest first), then the
/// whole-file backtick parity check. Lines are 1-indexed; columns are
/// 0-indexed character offsets within the line.
///
/// The scan is total: any character sequence produces a result, and
/// malformed bracket structure is reported as data, never as an error.
/// Backtick parity is the only template-literal validation performed —
/// brackets inside string or template content are counted like any others.
#[must_use]
pub fn scan(text: &str) -> (BracketCounts, Vec<Diagnostic>) {
    let mut counts = BracketCounts::default();
    let mut stack: Vec<OpenBracket> = Vec::new();
    let mut diagnostics = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line_number = line_idx + 1;
        for (column, ch) in line.chars().enumerate() {
            if ch == '`' {
                counts.backticks += 1;
            } else if let Some(family) = BracketFamily::from_open(ch) {
                counts.tally_open(family);
                stack.push(OpenBracket {
                    family,
                    line: line_number,
                    column,
                    snippet: snippet(line),
                });
            } else if let Some(family) = BracketFamily::from_close(ch) {
                counts.tally_close(family);
                match stack.pop() {
                    None => diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::UnmatchedClose,
                        line: line_number,
                        column,
                        message: format!("Unmatched closing '{ch}'"),
                        context: snippet(line),
                    }),
                    Some(top) if top.family == family => {}
                    // Popping the mismatched open consumes it, so one stray
                    // bracket cannot cascade into false positives downstream.
                    Some(top) => diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::Mismatched,
                        line: line_number,
                        column,
                        message: format!(
                            "Mismatched bracket: expected '{}' closing '{}' from line {}, found '{ch}'",
                            top.family.close_char(),
                            top.family.open_char(),
                            top.line
                        ),
                        context: snippet(line),
                    }),
                }
            }
        }
    }

    for open in &stack {
        diagnostics.push(Diagnostic {
            kind: DiagnosticKind::UnclosedOpen,
            line: open.line,
            column: open.column,
            message: format!("Unclosed opening '{}'", open.family.open_char()),
            context: open.snippet.clone(),
        });
    }

    if counts.backticks % 2 != 0 {
        diagnostics.push(Diagnostic {
            kind: DiagnosticKind::OddBacktickCount,
            line: 0,
            column: 0,
            message: format!(
                "Odd number of backticks: {} total; a template literal is likely unterminated",
                counts.backticks
            ),
            context: String::new(),
        });
    }

    (counts, diagnostics)
}

/// Trimmed copy of `line`, cut to [`SNIPPET_WIDTH`] characters.
fn snippet(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.chars().nth(SNIPPET_WIDTH).is_none() {
        return trimmed.to_owned();
    }
    let mut cut: String = trimmed.chars().take(SNIPPET_WIDTH).collect();
    cut.push_str("...");
    cut
}
