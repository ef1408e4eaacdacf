//! SSH transport — shells out to the `ssh` binary through the command
//! runner port.
//!
//! The session layer (key agents, known-hosts handling, password prompting)
//! stays inside `ssh` itself; this adapter only builds argument vectors,
//! enforces timeouts and classifies failures.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ExecOutput, RunError, Transport};
use crate::domain::error::TransportError;

/// Exit status `ssh` reserves for its own failures; every other status is
/// the remote command's.
const SSH_EXIT_FAILURE: i32 = 255;

/// Connection parameters, assembled once from CLI flags and environment and
/// passed down — never read ad hoc mid-run.
#[derive(Debug, Clone)]
pub struct SshConfig {
    pub host: String,
    pub user: Option<String>,
    pub port: u16,
    pub identity: Option<PathBuf>,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
    /// Let `ssh` prompt for a password instead of failing in batch mode.
    /// Prompt UX is entirely the binary's; this adapter never reads input.
    pub ask_password: bool,
    /// Retries for transient transport errors (connection, timeout). Off by
    /// default; authentication failures and probe fails are never retried.
    pub retries: u32,
}

/// Expands a leading `~/` in `path` against the user's home directory.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Remote command execution over the `ssh` binary.
pub struct SshTransport<R> {
    config: SshConfig,
    runner: R,
}

impl<R: CommandRunner> SshTransport<R> {
    /// Creates the transport and verifies the channel with a no-op probe.
    ///
    /// # Errors
    ///
    /// Returns an error when no session can be established at all — the one
    /// fatal condition, aborting before any assertion runs.
    pub async fn connect(config: SshConfig, runner: R) -> Result<Self> {
        let transport = Self { config, runner };
        if let Err(e) = transport.execute("true").await {
            anyhow::bail!("cannot reach {}: {e}", transport.config.host);
        }
        Ok(transport)
    }

    fn destination(&self) -> String {
        match &self.config.user {
            Some(user) => format!("{user}@{}", self.config.host),
            None => self.config.host.clone(),
        }
    }

    fn args(&self, command: &str) -> Vec<String> {
        let mut args = Vec::new();
        if !self.config.ask_password {
            args.push("-o".to_string());
            args.push("BatchMode=yes".to_string());
        }
        args.push("-o".to_string());
        args.push(format!(
            "ConnectTimeout={}",
            self.config.connect_timeout.as_secs()
        ));
        if let Some(identity) = &self.config.identity {
            args.push("-i".to_string());
            args.push(identity.display().to_string());
        }
        if self.config.port != 22 {
            args.push("-p".to_string());
            args.push(self.config.port.to_string());
        }
        args.push("--".to_string());
        args.push(self.destination());
        args.push(command.to_string());
        args
    }

    async fn execute_once(&self, command: &str) -> Result<ExecOutput, TransportError> {
        let args = self.args(command);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = match self
            .runner
            .run("ssh", &arg_refs, self.config.command_timeout)
            .await
        {
            Ok(output) => output,
            Err(RunError::TimedOut { secs, .. }) => {
                return Err(TransportError::Timeout(format!(
                    "no reply within {secs}s"
                )));
            }
            Err(e) => return Err(TransportError::Connection(e.to_string())),
        };
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        match output.status.code() {
            Some(SSH_EXIT_FAILURE) => Err(classify_ssh_failure(&stderr)),
            Some(exit_code) => Ok(ExecOutput {
                stdout,
                stderr,
                exit_code,
            }),
            None => Err(TransportError::Connection(
                "ssh terminated by signal".to_string(),
            )),
        }
    }
}

impl<R: CommandRunner> Transport for SshTransport<R> {
    async fn execute(&self, command: &str) -> Result<ExecOutput, TransportError> {
        let mut attempt = 0;
        loop {
            match self.execute_once(command).await {
                Err(e) if attempt < self.config.retries && is_transient(&e) => attempt += 1,
                other => return other,
            }
        }
    }
}

fn is_transient(error: &TransportError) -> bool {
    matches!(
        error,
        TransportError::Connection(_) | TransportError::Timeout(_)
    )
}

/// Maps an ssh-level failure (exit 255) to a transport error class by its
/// stderr text.
fn classify_ssh_failure(stderr: &str) -> TransportError {
    let detail = stderr.trim().to_string();
    let lower = detail.to_lowercase();
    if lower.contains("permission denied")
        || lower.contains("authentication")
        || lower.contains("host key verification failed")
    {
        TransportError::Auth(detail)
    } else if lower.contains("timed out") || lower.contains("timeout") {
        TransportError::Timeout(detail)
    } else if detail.is_empty() {
        TransportError::Connection("ssh exited with status 255".to_string())
    } else {
        TransportError::Connection(detail)
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
