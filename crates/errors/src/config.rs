//! Configuration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: String },

    #[error("parse error: {message}")]
    ParseError { message: String },

    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },

    #[error("no lock files configured")]
    NoLockFiles,

    #[error("invalid lock file name {name:?}: {reason}")]
    InvalidLockName { name: String, reason: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => {
                Some("Create lockcheck.toml or pass an existing file with --config.")
            }
            Self::MissingField { field } => Some(match field.as_str() {
                "tool.program" => "Set [tool] program in lockcheck.toml or pass --tool.",
                _ => "Add the missing configuration field noted in the error message.",
            }),
            Self::ParseError { .. } | Self::InvalidValue { .. } => {
                Some("Fix the configuration value and retry the command.")
            }
            Self::NoLockFiles => {
                Some("List the lock files under [locks] names or pass --lock for each file.")
            }
            Self::InvalidLockName { .. } => {
                Some("Lock names are plain file names inside the requirements directory.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::NotFound { .. } => "config.not_found",
            Self::ParseError { .. } => "config.parse_error",
            Self::MissingField { .. } => "config.missing_field",
            Self::InvalidValue { .. } => "config.invalid_value",
            Self::NoLockFiles => "config.no_lock_files",
            Self::InvalidLockName { .. } => "config.invalid_lock_name",
        };
        Some(code)
    }
}
