//! Assertion evaluation — one verdict per expectation.

use crate::application::ports::Transport;
use crate::application::runner::CancelFlag;
use crate::domain::assertion::{Assertion, Expectation, OsFamily};
use crate::domain::report::{Outcome, Verdict};
use crate::probe;

/// Diagnostic detail attached to expectations skipped by a cancelled run.
pub const CANCELLED: &str = "cancelled";

/// Evaluates every expectation of `assertion` against `transport`.
///
/// Produces exactly one verdict per expectation, in declaration order.
/// Expectations are fully independent: an `Error` on one never aborts the
/// rest, and no state is shared between them. Once `cancel` is set, no
/// further probes are issued and the remaining expectations are marked
/// `Error` with a `cancelled` detail.
pub async fn evaluate(
    index: usize,
    assertion: &Assertion,
    os: OsFamily,
    transport: &impl Transport,
    cancel: &CancelFlag,
) -> Vec<Verdict> {
    let mut verdicts = Vec::with_capacity(assertion.expectations().len());
    for (ei, expectation) in assertion.expectations().iter().enumerate() {
        let outcome = if cancel.is_cancelled() {
            Outcome::Error {
                detail: CANCELLED.to_string(),
            }
        } else {
            evaluate_one(assertion, expectation, os, transport).await
        };
        verdicts.push(Verdict {
            assertion: index,
            expectation: ei,
            outcome,
        });
    }
    verdicts
}

async fn evaluate_one(
    assertion: &Assertion,
    expectation: &Expectation,
    os: OsFamily,
    transport: &impl Transport,
) -> Outcome {
    let probe = match probe::resolve(assertion.kind(), assertion.identifier(), expectation, os) {
        Ok(probe) => probe,
        Err(e) => {
            return Outcome::Error {
                detail: e.to_string(),
            };
        }
    };
    match transport.execute(&probe.command).await {
        Err(e) => Outcome::Error {
            detail: format!("{}: {e}", probe.command),
        },
        Ok(out) => match probe.rule.apply(&out) {
            Ok(true) => Outcome::Pass,
            Ok(false) => Outcome::Fail {
                detail: out.detail(),
            },
            Err(e) => Outcome::Error {
                detail: format!("{}: {e}", probe.command),
            },
        },
    }
}
