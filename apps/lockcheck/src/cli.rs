//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;

/// lockcheck - verify that locked dependency files match their specifications
#[derive(Parser)]
#[command(name = "lockcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verify that locked dependency files match their specifications")]
#[command(long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub paths: PathArgs,

    /// Regenerate even if these inputs were already verified
    #[arg(long)]
    pub force: bool,
}

/// Global arguments
#[derive(Parser)]
pub struct GlobalArgs {
    /// Enable debug logging to the cache directory
    #[arg(long)]
    pub debug: bool,

    /// Print a summary line on success
    #[arg(short, long)]
    pub verbose: bool,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Overrides for the configured locations
#[derive(Parser)]
pub struct PathArgs {
    /// Directory holding specification and lock files
    #[arg(long, value_name = "DIR")]
    pub requirements_dir: Option<PathBuf>,

    /// Directory holding the hash cache
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Lock regeneration tool
    #[arg(long, value_name = "PATH")]
    pub tool: Option<PathBuf>,

    /// Lock file name to verify (repeatable, replaces configured names)
    #[arg(long = "lock", value_name = "NAME")]
    pub locks: Vec<String>,
}
