//! JSON output helpers.
//!
//! Provides the report serializer for `--json` runs and the error-object
//! formatter used when a `--json` command fails fatally.

use anyhow::{Context as _, Result};

use crate::domain::report::{Outcome, Report};

/// Render the full run report as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice — `serde_json` only fails on non-finite floats and maps with
/// non-string keys, neither of which appear here).
pub fn render_report(report: &Report) -> Result<String> {
    let results: Vec<serde_json::Value> = report
        .assertions()
        .iter()
        .enumerate()
        .map(|(i, assertion)| {
            let expectations: Vec<serde_json::Value> = report
                .verdicts_for(i)
                .map(|verdict| {
                    let expectation = &assertion.expectations()[verdict.expectation];
                    match &verdict.outcome {
                        Outcome::Pass => serde_json::json!({
                            "expectation": expectation.to_string(),
                            "outcome": "pass",
                        }),
                        Outcome::Fail { detail } => serde_json::json!({
                            "expectation": expectation.to_string(),
                            "outcome": "fail",
                            "detail": detail,
                        }),
                        Outcome::Error { detail } => serde_json::json!({
                            "expectation": expectation.to_string(),
                            "outcome": "error",
                            "detail": detail,
                        }),
                    }
                })
                .collect();
            serde_json::json!({
                "kind": assertion.kind().to_string(),
                "identifier": assertion.identifier(),
                "expectations": expectations,
            })
        })
        .collect();

    let summary = report.summary();
    let out = serde_json::json!({
        "status": if report.all_passed() { "passed" } else { "failed" },
        "summary": {
            "pass": summary.pass,
            "fail": summary.fail,
            "error": summary.error,
        },
        "results": results,
    });
    serde_json::to_string_pretty(&out).context("JSON serialization")
}

/// Format a JSON error object for `--json` code paths when a command fails.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
