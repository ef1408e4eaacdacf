//! Run orchestration — drives assertions through the evaluator and collects
//! an ordered report.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::StreamExt as _;
use futures_util::stream;

use crate::application::evaluator::{self, CANCELLED};
use crate::application::ports::{ProgressReporter, Transport};
use crate::domain::assertion::{Assertion, OsFamily};
use crate::domain::report::{Outcome, Report, Verdict};

/// Cooperative cancellation flag shared with the interrupt handler.
///
/// Setting it stops the run from issuing new probes; an in-flight probe
/// finishes on its own (or hits the transport timeout).
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Runner options.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub os_family: OsFamily,
    /// Maximum assertions probed concurrently. `1` is the sequential
    /// baseline; assertions share no mutable state, so higher values are
    /// safe and still report in input order.
    pub jobs: usize,
}

/// Evaluates all assertions and builds the run report.
///
/// Verdict order always equals input order (assertion index, then
/// expectation index) regardless of `jobs` — order stability is an
/// observable contract, not an implementation detail. A cancelled run still
/// returns a renderable report with the skipped expectations marked as
/// errors.
pub async fn run_checks(
    assertions: Vec<Assertion>,
    options: RunOptions,
    transport: &impl Transport,
    cancel: &CancelFlag,
    reporter: &impl ProgressReporter,
) -> Report {
    let jobs = options.jobs.max(1);
    let tasks = assertions.iter().enumerate().map(|(i, assertion)| {
        async move {
            if cancel.is_cancelled() {
                return cancelled_verdicts(i, assertion);
            }
            reporter.step(&format!("{} {}", assertion.kind(), assertion.identifier()));
            evaluator::evaluate(i, assertion, options.os_family, transport, cancel).await
        }
    });
    let verdicts: Vec<Verdict> = stream::iter(tasks)
        .buffer_unordered(jobs)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .flatten()
        .collect();
    Report::new(assertions, verdicts)
}

fn cancelled_verdicts(index: usize, assertion: &Assertion) -> Vec<Verdict> {
    (0..assertion.expectations().len())
        .map(|ei| Verdict {
            assertion: index,
            expectation: ei,
            outcome: Outcome::Error {
                detail: CANCELLED.to_string(),
            },
        })
        .collect()
}
