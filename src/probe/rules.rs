//! Output-classification rules for probe results.
//!
//! A rule turns raw probe output into one of three shapes: `Ok(true)` (the
//! expectation holds), `Ok(false)` (the expected state is definitely
//! absent), or `Err(ParseError)` (the output matched no known shape). The
//! distinction between `Ok(false)` and `Err` is load-bearing: a missing
//! subject is a definite fail, never an error.

use crate::application::ports::ExecOutput;
use crate::domain::error::ParseError;

/// Closed set of output-classification rules.
///
/// Matched exhaustively; adding an expectation kind means adding (or
/// reusing) a variant here, checked at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRule {
    /// Exit 0 passes; a listed exit code is a definite fail; anything else
    /// is an unrecognized shape.
    ExitStatus { fail_codes: Vec<i32> },
    /// `dpkg-query` status text must report `install ok installed`.
    DebianPackageStatus,
    /// Whitespace-split stdout must contain the word.
    StdoutHasWord { word: String, fail_codes: Vec<i32> },
    /// First stdout line, trimmed, must equal the expected string.
    StdoutEquals {
        expected: String,
        fail_codes: Vec<i32>,
    },
    /// First stdout line parsed as octal must equal the expected mode, so
    /// `0755` and `755` compare equal.
    OctalMode { mode: u32, fail_codes: Vec<i32> },
    /// `grep -q` exit codes: 0 match, 1 no match, 2 with a missing-file
    /// message means the subject is absent.
    GrepLine,
}

impl OutputRule {
    /// Classifies raw probe output against this rule.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the output matches no expected shape.
    pub fn apply(&self, out: &ExecOutput) -> Result<bool, ParseError> {
        match self {
            Self::ExitStatus { fail_codes } => match out.exit_code {
                0 => Ok(true),
                code if fail_codes.contains(&code) => Ok(false),
                _ => Err(unrecognized(out)),
            },
            Self::DebianPackageStatus => {
                if out.exit_code == 0 {
                    return Ok(out.stdout.contains("install ok installed"));
                }
                // dpkg-query exits 1 with "no packages found matching ..."
                // for a package the database has never seen.
                if out.exit_code == 1 && out.stderr.contains("no packages found") {
                    return Ok(false);
                }
                Err(unrecognized(out))
            }
            Self::StdoutHasWord { word, fail_codes } => match out.exit_code {
                0 => Ok(out.stdout.split_whitespace().any(|w| w == word)),
                code if fail_codes.contains(&code) => Ok(false),
                _ => Err(unrecognized(out)),
            },
            Self::StdoutEquals {
                expected,
                fail_codes,
            } => match out.exit_code {
                0 => Ok(first_line(&out.stdout) == expected.as_str()),
                code if fail_codes.contains(&code) => Ok(false),
                _ => Err(unrecognized(out)),
            },
            Self::OctalMode { mode, fail_codes } => match out.exit_code {
                0 => u32::from_str_radix(first_line(&out.stdout), 8)
                    .map(|got| got == *mode)
                    .map_err(|_| unrecognized(out)),
                code if fail_codes.contains(&code) => Ok(false),
                _ => Err(unrecognized(out)),
            },
            Self::GrepLine => match out.exit_code {
                0 => Ok(true),
                1 => Ok(false),
                2 if out.stderr.contains("No such file") => Ok(false),
                _ => Err(unrecognized(out)),
            },
        }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}

fn unrecognized(out: &ExecOutput) -> ParseError {
    ParseError {
        exit_code: out.exit_code,
        detail: out.detail(),
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
