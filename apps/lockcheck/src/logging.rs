//! Tracing subscriber setup
//!
//! Standard output carries diffs only, so logs always go to stderr or to a
//! file under the cache directory.

use std::path::Path;
use tracing_subscriber::EnvFilter;

const DEBUG_FILTER: &str = "info,lockcheck=debug,lockcheck_verify=debug,lockcheck_cache=debug";
const QUIET_FILTER: &str = "off";

/// Initialize tracing/logging
pub fn init_tracing(logs_dir: &Path, debug_enabled: bool) {
    if debug_enabled {
        // Debug mode: structured JSON logs to file
        if let Err(e) = std::fs::create_dir_all(logs_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = logs_dir.join(format!(
            "lockcheck-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(env_filter(DEBUG_FILTER))
                    .init();

                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                // Fallback to stderr
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(env_filter(DEBUG_FILTER))
                    .init();
            }
        }
    } else {
        // Normal mode: stderr carries only the error report unless RUST_LOG is set
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter(QUIET_FILTER))
            .init();
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
