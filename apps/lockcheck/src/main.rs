//! lockcheck - verify that locked dependency files match their specifications
//!
//! Loads configuration, applies CLI overrides and runs one verification pass.
//! Exits 0 when the lock files are consistent or already known good, and 1
//! with diffs on stdout and an explanation on stderr otherwise.

mod cli;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::CliError;
use clap::Parser;
use lockcheck_config::Config;
use lockcheck_verify::{Verifier, VerifyOptions};
use std::process;
use tracing::{debug, error};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("lockcheck failed: {}", e);
        eprintln!("Error: {e}");
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli);

    logging::init_tracing(&config.logs_dir(), cli.global.debug);
    debug!("Starting lockcheck v{}", env!("CARGO_PKG_VERSION"));

    let verifier = Verifier::from_config(&config, VerifyOptions { force: cli.force })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = verifier.verify(&mut out).await?;

    if cli.global.verbose {
        if report.cache_hit {
            eprintln!("Lock files already verified ({})", report.current);
        } else {
            eprintln!(
                "Lock files are consistent ({} checked)",
                verifier.layout().locks.len()
            );
        }
    }

    Ok(())
}

/// Apply CLI configuration overrides
fn apply_cli_config(config: &mut Config, cli: &Cli) {
    if let Some(dir) = &cli.paths.requirements_dir {
        config.paths.requirements_dir.clone_from(dir);
    }
    if let Some(dir) = &cli.paths.cache_dir {
        config.paths.cache_dir = Some(dir.clone());
    }
    if let Some(tool) = &cli.paths.tool {
        config.tool.program = Some(tool.clone());
    }
    if !cli.paths.locks.is_empty() {
        config.locks.names.clone_from(&cli.paths.locks);
    }
}
