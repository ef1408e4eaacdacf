//! Hostspec CLI - Declarative acceptance checks for provisioned hosts

use clap::Parser;

use hostspec_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Fatal pre-run failures exit 2, distinct from the 1 used for
            // failing checks.
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}
