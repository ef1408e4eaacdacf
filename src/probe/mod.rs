//! Probe resolution — maps (subject kind, expectation, OS family) to a
//! concrete remote command plus an output-classification rule.
//!
//! All probe commands are read-only; the resolver never emits anything that
//! mutates remote state.

mod rules;
mod shell;

pub use rules::OutputRule;

use crate::domain::assertion::{Expectation, OsFamily, SubjectKind};
use crate::domain::error::ResolveError;

/// A concrete remote command plus the rule that interprets its output.
///
/// Derived deterministically from the (subject kind, expectation, OS family)
/// triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub command: String,
    pub rule: OutputRule,
}

/// Resolves one expectation into its probe.
///
/// Identifiers and expectation parameters are shell-quoted before being
/// interpolated into the command string.
///
/// # Errors
///
/// Returns [`ResolveError::UnsupportedExpectation`] when no mapping exists
/// for the triple; the caller surfaces this as an `Error` verdict for that
/// single expectation.
pub fn resolve(
    kind: SubjectKind,
    identifier: &str,
    expectation: &Expectation,
    os: OsFamily,
) -> Result<Probe, ResolveError> {
    use Expectation as E;
    use SubjectKind as K;

    let id = shell::quote(identifier);
    let probe = match (kind, expectation) {
        (K::Package, E::Installed) => match os {
            OsFamily::Debian => Probe {
                command: format!("dpkg-query -W -f='${{Status}}' -- {id}"),
                rule: OutputRule::DebianPackageStatus,
            },
            OsFamily::RedHat => Probe {
                command: format!("rpm -q -- {id}"),
                rule: OutputRule::ExitStatus { fail_codes: vec![1] },
            },
        },
        // getent exits 2 when the key is not present in the database.
        (K::User, E::Exists) => Probe {
            command: format!("getent passwd {id}"),
            rule: OutputRule::ExitStatus { fail_codes: vec![2] },
        },
        (K::User, E::BelongsToGroup(group)) => Probe {
            command: format!("id -Gn {id}"),
            rule: OutputRule::StdoutHasWord {
                word: group.clone(),
                fail_codes: vec![1],
            },
        },
        (K::File | K::Directory, E::Exists) => Probe {
            command: format!("test -e {id}"),
            rule: OutputRule::ExitStatus { fail_codes: vec![1] },
        },
        (K::File | K::Directory, E::IsFile) => Probe {
            command: format!("test -f {id}"),
            rule: OutputRule::ExitStatus { fail_codes: vec![1] },
        },
        (K::File | K::Directory, E::IsDirectory) => Probe {
            command: format!("test -d {id}"),
            rule: OutputRule::ExitStatus { fail_codes: vec![1] },
        },
        (K::File | K::Directory, E::ModeEquals(mode)) => Probe {
            command: format!("stat -c %a -- {id}"),
            rule: OutputRule::OctalMode {
                mode: *mode,
                fail_codes: vec![1],
            },
        },
        (K::File | K::Directory, E::OwnedBy(user)) => Probe {
            command: format!("stat -c %U -- {id}"),
            rule: OutputRule::StdoutEquals {
                expected: user.clone(),
                fail_codes: vec![1],
            },
        },
        (K::File | K::Directory, E::ContainsLine(line)) => Probe {
            command: format!("grep -F -x -q -e {} -- {id}", shell::quote(line)),
            rule: OutputRule::GrepLine,
        },
        _ => {
            return Err(ResolveError::UnsupportedExpectation {
                kind,
                expectation: expectation.to_string(),
                os,
            });
        }
    };
    Ok(probe)
}

// ── Unit tests ────────────────────────────────────────────────────────────────
