//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator at the application edges.

use thiserror::Error;

use crate::domain::assertion::{OsFamily, SubjectKind};

// ── Transport errors ──────────────────────────────────────────────────────────

/// Transport-layer failures, as reported by the remote execution channel.
///
/// Distinct from probe `Fail` outcomes: a transport error means the probe
/// could not run or complete, not that the expected state is absent. The two
/// classes must never be conflated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("timed out: {0}")]
    Timeout(String),
}

// ── Probe errors ──────────────────────────────────────────────────────────────

/// Probe resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no probe for '{expectation}' on a {kind} subject ({os} hosts)")]
    UnsupportedExpectation {
        kind: SubjectKind,
        expectation: String,
        os: OsFamily,
    },
}

/// Probe output did not match any expected shape.
///
/// Treated as an `Error` verdict, not a `Fail`: an unrecognized shape means
/// an environment/assumption mismatch rather than a confirmed absence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized probe output (exit status {exit_code}): {detail}")]
pub struct ParseError {
    pub exit_code: i32,
    pub detail: String,
}

// ── Assertion errors ──────────────────────────────────────────────────────────

/// Violations of the assertion invariants.
#[derive(Debug, Error)]
pub enum AssertionError {
    #[error("assertion has an empty identifier")]
    EmptyIdentifier,

    #[error("assertion '{0}' has no expectations")]
    NoExpectations(String),
}

// ── Checkfile errors ──────────────────────────────────────────────────────────

/// Violations of the declarative checkfile rules.
#[derive(Debug, Error)]
pub enum CheckfileError {
    #[error("check #{index} names no subject (expected one of: package, user, file, directory, path)")]
    MissingSubject { index: usize },

    #[error("check #{index} names more than one subject")]
    AmbiguousSubject { index: usize },

    #[error("check #{index}: invalid mode '{value}' (expected octal digits, e.g. \"755\")")]
    InvalidMode { index: usize, value: String },

    #[error("check #{index}: {source}")]
    Invalid {
        index: usize,
        source: AssertionError,
    },

    #[error("checkfile contains no checks")]
    Empty,
}
