//! Declarative checkfile loading — YAML document to validated assertions.
//!
//! The core consumes an already-parsed assertion list; this loader is the
//! boundary that produces it. Each entry names exactly one subject
//! (`package`, `user`, `file`, `directory` or `path`) plus its expectations.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Deserialize;

use crate::domain::assertion::{Assertion, Expectation, OsFamily, SubjectKind};
use crate::domain::error::CheckfileError;

/// Top-level checkfile document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckFile {
    /// Package-command family of the target host. A `--os-family` flag on
    /// the command line wins over this value.
    #[serde(default)]
    pub os_family: Option<OsFamily>,
    #[serde(default)]
    checks: Vec<CheckEntry>,
}

/// One declarative check.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CheckEntry {
    package: Option<String>,
    user: Option<String>,
    file: Option<String>,
    directory: Option<String>,
    /// Bare existence check, without implying a file or directory type.
    path: Option<String>,
    #[serde(default)]
    groups: Vec<String>,
    /// Octal digits, e.g. `"755"` or `"0644"`.
    mode: Option<String>,
    owner: Option<String>,
    #[serde(default)]
    contains: Vec<String>,
}

/// Loads and validates a checkfile from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML.
pub fn load(path: &Path) -> Result<CheckFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read checkfile {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid checkfile {}", path.display()))
}

/// Parses checkfile YAML.
///
/// # Errors
///
/// Returns an error if the document is not valid YAML or has unknown keys.
pub fn parse(text: &str) -> Result<CheckFile> {
    serde_yaml::from_str(text).context("parse YAML")
}

impl CheckFile {
    /// Converts the document into the assertion list the runner consumes.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckfileError`] when an entry names no subject or more
    /// than one, carries an invalid mode, or the document holds no checks.
    pub fn into_assertions(self) -> Result<Vec<Assertion>, CheckfileError> {
        if self.checks.is_empty() {
            return Err(CheckfileError::Empty);
        }
        self.checks
            .into_iter()
            .enumerate()
            .map(|(index, entry)| entry.into_assertion(index))
            .collect()
    }
}

impl CheckEntry {
    fn into_assertion(self, index: usize) -> Result<Assertion, CheckfileError> {
        let CheckEntry {
            package,
            user,
            file,
            directory,
            path,
            groups,
            mode,
            owner,
            contains,
        } = self;

        let mut subjects: Vec<(SubjectKind, String, Expectation)> = Vec::new();
        if let Some(id) = package {
            subjects.push((SubjectKind::Package, id, Expectation::Installed));
        }
        if let Some(id) = user {
            subjects.push((SubjectKind::User, id, Expectation::Exists));
        }
        if let Some(id) = file {
            subjects.push((SubjectKind::File, id, Expectation::IsFile));
        }
        if let Some(id) = directory {
            subjects.push((SubjectKind::Directory, id, Expectation::IsDirectory));
        }
        if let Some(id) = path {
            subjects.push((SubjectKind::File, id, Expectation::Exists));
        }

        if subjects.len() > 1 {
            return Err(CheckfileError::AmbiguousSubject { index });
        }
        let Some((kind, identifier, implied)) = subjects.pop() else {
            return Err(CheckfileError::MissingSubject { index });
        };

        let mut expectations = vec![implied];
        for group in groups {
            expectations.push(Expectation::BelongsToGroup(group));
        }
        if let Some(mode) = mode {
            let bits = u32::from_str_radix(&mode, 8)
                .map_err(|_| CheckfileError::InvalidMode {
                    index,
                    value: mode.clone(),
                })?;
            expectations.push(Expectation::ModeEquals(bits));
        }
        if let Some(owner) = owner {
            expectations.push(Expectation::OwnedBy(owner));
        }
        for line in contains {
            expectations.push(Expectation::ContainsLine(line));
        }

        Assertion::new(kind, identifier, expectations)
            .map_err(|source| CheckfileError::Invalid { index, source })
    }
}
