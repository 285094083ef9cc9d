//! Lock verification error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

const REGENERATE_HINT: &str =
    "Regenerate the lock files with the configured update tool and commit the result.";

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum VerifyError {
    #[error("regeneration tool could not be started: {program}: {message}")]
    ToolSpawnFailed { program: String, message: String },

    #[error("regeneration tool error: {program} exited with {status}")]
    ToolFailed { program: String, status: String },

    #[error(
        "locked requirements out of date: {} differ from what the update tool generates; \
         regenerate them and commit the result",
        files.join(", ")
    )]
    OutOfDate { files: Vec<String> },
}

impl UserFacingError for VerifyError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ToolSpawnFailed { .. } => {
                Some("Check the [tool] program path in lockcheck.toml or pass --tool.")
            }
            Self::ToolFailed { .. } | Self::OutOfDate { .. } => Some(REGENERATE_HINT),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ToolSpawnFailed { .. } => "verify.tool_spawn_failed",
            Self::ToolFailed { .. } => "verify.tool_failed",
            Self::OutOfDate { .. } => "verify.out_of_date",
        };
        Some(code)
    }
}
