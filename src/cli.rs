//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::output::OutputContext;

/// Declarative acceptance checks for provisioned hosts
#[derive(Parser)]
#[command(
    name = "hostspec",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the acceptance checks against the target host
    Check(commands::check::CheckArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command. Returns the process exit code: `0` when all
    /// checks pass, `1` when any check fails or errors.
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal pre-run failures; the caller exits
    /// with a status distinct from failing checks.
    pub async fn run(self) -> Result<i32> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
        } = self;
        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(0)
            }
            Command::Check(args) => {
                let ctx = OutputContext::new(no_color, quiet);
                let result = commands::check::run(&ctx, json, args).await;
                if json
                    && let Err(e) = &result
                {
                    println!(
                        "{}",
                        crate::output::json::format_error(&format!("{e:#}"), "fatal")?
                    );
                }
                result
            }
        }
    }
}
