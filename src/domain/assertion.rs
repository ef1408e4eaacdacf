//! Assertion domain types — subjects, expectations, OS families.

use std::fmt;

use serde::Deserialize;

use crate::domain::error::AssertionError;

// ── Subjects ──────────────────────────────────────────────────────────────────

/// Kind of remote subject an assertion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    Package,
    User,
    File,
    Directory,
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Package => "package",
            Self::User => "user",
            Self::File => "file",
            Self::Directory => "directory",
        })
    }
}

/// Package-command family of the target host.
///
/// Selects which package-query command the probe resolver emits; every other
/// probe is plain POSIX and identical across families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    #[default]
    Debian,
    #[value(name = "redhat")]
    RedHat,
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Debian => "debian",
            Self::RedHat => "redhat",
        })
    }
}

// ── Expectations ──────────────────────────────────────────────────────────────

/// One concrete expected condition within an assertion.
///
/// Immutable once constructed. The probe resolver matches exhaustively on
/// this enum, so adding a variant is a compile-time-checked extension point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Installed,
    Exists,
    BelongsToGroup(String),
    IsFile,
    IsDirectory,
    /// Octal permission bits, e.g. `0o755`.
    ModeEquals(u32),
    OwnedBy(String),
    ContainsLine(String),
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed => f.write_str("is installed"),
            Self::Exists => f.write_str("exists"),
            Self::BelongsToGroup(group) => write!(f, "belongs to group '{group}'"),
            Self::IsFile => f.write_str("is a file"),
            Self::IsDirectory => f.write_str("is a directory"),
            Self::ModeEquals(mode) => write!(f, "has mode {mode:o}"),
            Self::OwnedBy(user) => write!(f, "is owned by '{user}'"),
            Self::ContainsLine(line) => write!(f, "contains line '{line}'"),
        }
    }
}

// ── Assertions ────────────────────────────────────────────────────────────────

/// A declared expected-state check against one subject on the remote host.
///
/// Invariants (enforced by [`Assertion::new`]): the identifier is non-empty
/// and there is at least one expectation.
#[derive(Debug, Clone)]
pub struct Assertion {
    kind: SubjectKind,
    identifier: String,
    expectations: Vec<Expectation>,
}

impl Assertion {
    /// Builds a validated assertion.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or no expectation is
    /// given.
    pub fn new(
        kind: SubjectKind,
        identifier: impl Into<String>,
        expectations: Vec<Expectation>,
    ) -> Result<Self, AssertionError> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(AssertionError::EmptyIdentifier);
        }
        if expectations.is_empty() {
            return Err(AssertionError::NoExpectations(identifier));
        }
        Ok(Self {
            kind,
            identifier,
            expectations,
        })
    }

    #[must_use]
    pub fn kind(&self) -> SubjectKind {
        self.kind
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
