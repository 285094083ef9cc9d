//! Isolated lock regeneration
//!
//! The external update tool resolves incrementally: with no prior lock file it
//! re-resolves transitive dependencies to their latest versions. The runner
//! therefore seeds the scratch directory with the current lock files before
//! invoking the tool, so the only drift left is the one caused by the
//! specification files.

use async_trait::async_trait;
use lockcheck_config::Config;
use lockcheck_errors::{Error, StorageError, VerifyError};
use lockcheck_types::LockFileSet;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Deterministic transformation from specification files to lock files
#[async_trait]
pub trait Regenerator: Send + Sync {
    /// Write one regenerated lock file per configured name into `output_dir`
    async fn regenerate(&self, requirements_dir: &Path, output_dir: &Path) -> Result<(), Error>;
}

/// Runs the external update tool as a subprocess
#[derive(Debug, Clone)]
pub struct ToolRegenerator {
    program: PathBuf,
    args: Vec<String>,
    output_flag: String,
    working_dir: Option<PathBuf>,
}

impl ToolRegenerator {
    /// Create a regenerator invoking `program --output-dir <dir>`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            output_flag: "--output-dir".to_string(),
            working_dir: None,
        }
    }

    /// Build from the `[tool]` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if no program is configured.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut regenerator = Self::new(config.tool_program()?)
            .with_args(config.tool.args.iter().cloned())
            .with_output_flag(config.tool.output_flag.clone());
        if let Some(dir) = &config.tool.working_dir {
            regenerator = regenerator.with_working_dir(dir);
        }
        Ok(regenerator)
    }

    /// Arguments placed before the output directory flag
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Flag preceding the output directory; empty passes the directory positionally
    #[must_use]
    pub fn with_output_flag(mut self, flag: impl Into<String>) -> Self {
        self.output_flag = flag.into();
        self
    }

    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, output_dir: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if !self.output_flag.is_empty() {
            command.arg(&self.output_flag);
        }
        command
            .arg(output_dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

#[async_trait]
impl Regenerator for ToolRegenerator {
    async fn regenerate(&self, requirements_dir: &Path, output_dir: &Path) -> Result<(), Error> {
        tracing::debug!(
            program = %self.program.display(),
            requirements_dir = %requirements_dir.display(),
            output_dir = %output_dir.display(),
            "running regeneration tool"
        );

        let status = self
            .command(output_dir)
            .status()
            .await
            .map_err(|e| VerifyError::ToolSpawnFailed {
                program: self.program.display().to_string(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(VerifyError::ToolFailed {
                program: self.program.display().to_string(),
                status: status.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Seeds a scratch directory and regenerates the lock files into it
pub struct IsolatedRunner<'a, R: ?Sized> {
    regenerator: &'a R,
    locks: &'a LockFileSet,
}

impl<'a, R: Regenerator + ?Sized> IsolatedRunner<'a, R> {
    pub fn new(regenerator: &'a R, locks: &'a LockFileSet) -> Self {
        Self { regenerator, locks }
    }

    /// Copy the canonical lock files into `scratch_dir` and regenerate there
    ///
    /// # Errors
    ///
    /// Returns an error if a canonical lock file cannot be copied or the
    /// regenerator fails. Nothing is retried.
    pub async fn run(&self, canonical_dir: &Path, scratch_dir: &Path) -> Result<(), Error> {
        for name in self.locks.iter() {
            let source = canonical_dir.join(name);
            tokio::fs::copy(&source, scratch_dir.join(name))
                .await
                .map_err(|e| StorageError::from_io_with_path(&e, &source))?;
        }
        tracing::debug!(
            locks = self.locks.len(),
            scratch = %scratch_dir.display(),
            "seeded scratch directory"
        );

        self.regenerator.regenerate(canonical_dir, scratch_dir).await
    }
}
