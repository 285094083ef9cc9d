//! Fixed names used by lockcheck
//!
//! These are not configurable so that every checkout and CI job agrees on
//! where the hash cache lives inside the cache directory.

/// Default configuration file, resolved against the working directory
pub const CONFIG_FILE_NAME: &str = "lockcheck.toml";

/// Hash cache file inside the cache directory
pub const CACHE_FILE_NAME: &str = "lock_hashes.json";

/// Debug log directory inside the cache directory
pub const LOGS_DIR_NAME: &str = "logs";

/// Fallback cache directory when the platform has no user cache directory
pub const FALLBACK_CACHE_DIR: &str = "var/tmp";

pub const ENV_CACHE_DIR: &str = "LOCKCHECK_CACHE_DIR";
pub const ENV_REQUIREMENTS_DIR: &str = "LOCKCHECK_REQUIREMENTS_DIR";
pub const ENV_TOOL: &str = "LOCKCHECK_TOOL";
