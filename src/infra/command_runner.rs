//! Tokio implementation of the `CommandRunner` port.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt as _};

use crate::application::ports::{CommandRunner, RunError};

/// Production command runner — async process execution with guaranteed
/// timeout and kill.
///
/// `tokio::time::timeout` around `.output().await` does not kill the child
/// when the deadline fires — the future is dropped but the OS process keeps
/// running. This implementation uses `tokio::select!` with an explicit
/// `child.kill()` so the process is always terminated.
pub struct TokioCommandRunner;

impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<std::process::Output, RunError> {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        // Drain stdout/stderr concurrently with wait(): a child writing more
        // than the OS pipe buffer would otherwise block on write and wait()
        // would never resolve.
        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    read_all(&mut stdout_handle),
                    read_all(&mut stderr_handle),
                );
                let status = status.map_err(|source| RunError::Wait {
                    program: program.to_string(),
                    source,
                })?;
                Ok(std::process::Output { status, stdout, stderr })
            } => result,
            () = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                Err(RunError::TimedOut {
                    program: program.to_string(),
                    secs: timeout.as_secs(),
                })
            }
        }
    }
}

async fn read_all<R: AsyncRead + Unpin>(handle: &mut Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(reader) = handle {
        let _ = reader.read_to_end(&mut buf).await;
    }
    buf
}
