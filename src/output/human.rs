//! Human-readable report renderer.

use owo_colors::OwoColorize as _;

use crate::domain::report::{Outcome, Report};
use crate::output::OutputContext;

/// Renders a run report as human-readable terminal output.
///
/// Output is deterministic and grouped by assertion subject: one line per
/// subject, indented outcome lines per expectation, then a count summary.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the full run report.
    pub fn render_report(&self, report: &Report) {
        println!();
        for (i, assertion) in report.assertions().iter().enumerate() {
            println!(
                "  {} {}",
                assertion.kind(),
                assertion.identifier().style(self.ctx.styles.bold)
            );
            for verdict in report.verdicts_for(i) {
                let expectation = &assertion.expectations()[verdict.expectation];
                match &verdict.outcome {
                    Outcome::Pass => {
                        println!("    {} {expectation}", "✓".style(self.ctx.styles.success));
                    }
                    Outcome::Fail { detail } => {
                        println!(
                            "    {} {expectation} ({})",
                            "✗".style(self.ctx.styles.error),
                            flatten(detail),
                        );
                    }
                    Outcome::Error { detail } => {
                        println!(
                            "    {} {expectation} [error: {}]",
                            "⚠".style(self.ctx.styles.warning),
                            flatten(detail),
                        );
                    }
                }
            }
        }
        println!();

        let summary = report.summary();
        if report.all_passed() {
            println!(
                "  {} {} expectations passed",
                "✓".style(self.ctx.styles.success),
                summary.pass,
            );
        } else {
            println!(
                "  {} {} passed, {} failed, {} errors",
                "✗".style(self.ctx.styles.error),
                summary.pass,
                summary.fail,
                summary.error,
            );
        }
        println!();
    }
}

/// Collapses multi-line diagnostics to one report line.
fn flatten(detail: &str) -> String {
    detail
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}
