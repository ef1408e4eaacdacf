//! Verdicts and the run report.
//!
//! A report is built once per run, consumed for printing and exit-code
//! derivation, then discarded. It exclusively owns its verdicts; verdicts
//! back-reference assertions by index for reporting only.

use crate::domain::assertion::Assertion;

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// Outcome of evaluating one expectation.
///
/// `Fail` means the probe ran and the expected state is definitely absent;
/// `Error` means the expectation could not be checked (transport fault,
/// unsupported expectation, unrecognized output). Diagnostic details are
/// timestamp-free so repeated runs against unchanged state produce identical
/// reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail { detail: String },
    Error { detail: String },
}

impl Outcome {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// The outcome of one (assertion, expectation) pair.
#[derive(Debug, Clone)]
pub struct Verdict {
    /// Index of the assertion in the run's input order.
    pub assertion: usize,
    /// Index of the expectation within the assertion.
    pub expectation: usize,
    pub outcome: Outcome,
}

// ── Report ────────────────────────────────────────────────────────────────────

/// Counts by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub pass: usize,
    pub fail: usize,
    pub error: usize,
}

/// Ordered verdicts for one run.
///
/// Verdict order always equals input order (assertion index, then
/// expectation index) regardless of how the run was scheduled — an
/// observable contract required for stable report diffs.
#[derive(Debug)]
pub struct Report {
    assertions: Vec<Assertion>,
    verdicts: Vec<Verdict>,
}

impl Report {
    /// Builds a report, restoring verdict order to input order.
    #[must_use]
    pub fn new(assertions: Vec<Assertion>, mut verdicts: Vec<Verdict>) -> Self {
        verdicts.sort_by_key(|v| (v.assertion, v.expectation));
        Self {
            assertions,
            verdicts,
        }
    }

    #[must_use]
    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    #[must_use]
    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    /// Verdicts for the assertion at `index`, in expectation order.
    pub fn verdicts_for(&self, index: usize) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(move |v| v.assertion == index)
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for verdict in &self.verdicts {
            match verdict.outcome {
                Outcome::Pass => summary.pass += 1,
                Outcome::Fail { .. } => summary.fail += 1,
                Outcome::Error { .. } => summary.error += 1,
            }
        }
        summary
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.verdicts.iter().all(|v| v.outcome.is_pass())
    }

    /// Process exit status for this report: `0` iff every verdict passed,
    /// `1` when any `Fail` or `Error` is present.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.all_passed())
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
