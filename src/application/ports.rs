//! Port trait definitions for the application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::time::Duration;

use thiserror::Error;

use crate::domain::error::TransportError;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Captured result of one remote command execution.
///
/// A non-zero `exit_code` is an ordinary result (the probe ran and the
/// remote command reported a status), never a transport error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecOutput {
    /// Short diagnostic string for reports: trimmed stdout, else trimmed
    /// stderr, else the exit status.
    #[must_use]
    pub fn detail(&self) -> String {
        let out = self.stdout.trim();
        if !out.is_empty() {
            return out.to_string();
        }
        let err = self.stderr.trim();
        if !err.is_empty() {
            return err.to_string();
        }
        format!("exit status {}", self.exit_code)
    }
}

// ── Transport Port ────────────────────────────────────────────────────────────

/// Remote command-execution channel.
///
/// The session layer (authentication, key handling, multiplexing) lives
/// behind the implementation; the core only issues read-only probe commands
/// and never assumes the channel is shareable across threads beyond what the
/// implementing type's own bounds state.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Execute `command` on the remote host and capture its output.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the command could not be delivered
    /// or completed: unreachable host, rejected credentials, or deadline
    /// exceeded. A non-zero exit status from the remote command itself is
    /// not an error — it comes back in [`ExecOutput::exit_code`].
    async fn execute(&self, command: &str) -> Result<ExecOutput, TransportError>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Local process execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {secs}s")]
    TimedOut { program: String, secs: u64 },

    #[error("waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Abstracts local process execution so infrastructure can be swapped or
/// mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output, enforcing `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds
    /// `timeout`. On timeout the child process must be killed, not left
    /// orphaned.
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<std::process::Output, RunError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Unit tests ────────────────────────────────────────────────────────────────
