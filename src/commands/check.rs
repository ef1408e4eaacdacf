//! `hostspec check` — run the acceptance checks against the target host.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::application::runner::{self, CancelFlag, RunOptions};
use crate::domain::assertion::OsFamily;
use crate::infra::checkfile;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::ssh::{self, SshConfig, SshTransport};
use crate::output::reporter::{NoopReporter, TerminalReporter};
use crate::output::{self, OutputContext};

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Checkfile describing the expected host state
    #[arg(long, default_value = "hostspec.yaml")]
    pub spec: PathBuf,

    /// Target host to probe
    #[arg(long, env = "TARGET_HOST")]
    pub host: String,

    /// SSH user name
    #[arg(long, env = "SSH_USER")]
    pub user: Option<String>,

    /// SSH identity file (a leading `~` expands to the home directory)
    #[arg(long, env = "SSH_KEY")]
    pub key: Option<String>,

    /// SSH port
    #[arg(long, default_value_t = 22)]
    pub port: u16,

    /// Package-command family of the target (overrides the checkfile)
    #[arg(long, value_enum)]
    pub os_family: Option<OsFamily>,

    /// Per-probe timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Connection timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub connect_timeout: u64,

    /// Maximum assertions probed concurrently
    #[arg(long, default_value_t = 1)]
    pub jobs: usize,

    /// Retries for transient transport errors (never auth failures)
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Let ssh prompt for a password instead of failing in batch mode
    #[arg(long)]
    pub ask_password: bool,
}

/// Run `hostspec check`. Returns the process exit code: `0` when every
/// expectation passed, `1` when any failed or errored.
///
/// # Errors
///
/// Returns an error only for fatal pre-run conditions — an unreadable or
/// invalid checkfile, or a host no session can be established to. Failing
/// verdicts are reported through the exit code, not as errors.
pub async fn run(ctx: &OutputContext, json: bool, args: CheckArgs) -> Result<i32> {
    let file = checkfile::load(&args.spec)?;
    let os_family = args.os_family.or(file.os_family).unwrap_or_default();
    let assertions = file.into_assertions()?;

    let config = SshConfig {
        host: args.host.clone(),
        user: args.user,
        port: args.port,
        identity: args.key.as_deref().map(ssh::expand_tilde),
        connect_timeout: Duration::from_secs(args.connect_timeout),
        command_timeout: Duration::from_secs(args.timeout),
        ask_password: args.ask_password,
        retries: args.retries,
    };

    let pb = (!json && ctx.show_progress())
        .then(|| output::progress::spinner(&format!("connecting to {}...", args.host)));
    let transport = match SshTransport::connect(config, TokioCommandRunner).await {
        Ok(transport) => transport,
        Err(e) => {
            if let Some(pb) = pb {
                pb.finish_and_clear();
            }
            return Err(e);
        }
    };
    if let Some(pb) = pb {
        output::progress::finish_ok(&pb, &format!("connected to {}", args.host));
    }

    // Ctrl-C stops issuing new probes; the report stays renderable with the
    // skipped expectations marked as errors.
    let cancel = CancelFlag::new();
    let handler = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handler.cancel();
        }
    });

    let options = RunOptions {
        os_family,
        jobs: args.jobs,
    };
    let report = if json {
        runner::run_checks(assertions, options, &transport, &cancel, &NoopReporter).await
    } else {
        let reporter = TerminalReporter::new(ctx);
        runner::run_checks(assertions, options, &transport, &cancel, &reporter).await
    };

    if json {
        println!("{}", output::json::render_report(&report)?);
    } else {
        output::human::HumanRenderer::new(ctx).render_report(&report);
    }
    Ok(report.exit_code())
}
