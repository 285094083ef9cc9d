#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Lock file consistency verification
//!
//! A [`Verifier`] checks that the checked-in lock files are exactly what the
//! update tool regenerates from the current specification files:
//!
//! 1. fingerprint the spec files and canonical lock files
//! 2. stop if that fingerprint is already known good
//! 3. regenerate into a scratch directory seeded with the current locks
//! 4. compare, fingerprint the regenerated inputs and record them
//! 5. on mismatch, print unified diffs and fail
//!
//! Every step runs to completion before the next one starts.

pub mod compare;
pub mod diff;
pub mod inputs;
pub mod regen;

pub use compare::compare_locks;
pub use diff::{render_diff, write_diff};
pub use regen::{IsolatedRunner, Regenerator, ToolRegenerator};

use lockcheck_cache::{CacheStore, JsonFileCache};
use lockcheck_config::Config;
use lockcheck_errors::{Error, VerifyError};
use lockcheck_hash::Fingerprint;
use lockcheck_types::{LockFileSet, VerificationOutcome};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Where the specification and lock files live
#[derive(Debug, Clone)]
pub struct LockLayout {
    /// Directory holding spec files and the checked-in lock files
    pub requirements_dir: PathBuf,
    /// Extension of specification files, without the dot
    pub spec_extension: String,
    pub locks: LockFileSet,
}

impl LockLayout {
    #[must_use]
    pub fn new(requirements_dir: impl Into<PathBuf>, locks: LockFileSet) -> Self {
        Self {
            requirements_dir: requirements_dir.into(),
            spec_extension: "in".to_string(),
            locks,
        }
    }

    #[must_use]
    pub fn with_spec_extension(mut self, extension: impl Into<String>) -> Self {
        self.spec_extension = extension.into();
        self
    }

    /// Build from the `[paths]` and `[locks]` configuration sections
    ///
    /// # Errors
    ///
    /// Returns an error if the configured lock names are invalid.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self::new(config.paths.requirements_dir.clone(), config.lock_set()?)
            .with_spec_extension(config.locks.spec_extension.clone()))
    }
}

/// Run options
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyOptions {
    /// Regenerate even when the inputs are already known good
    pub force: bool,
}

/// Summary of a successful verification
#[derive(Debug, Clone)]
pub struct VerifyReport {
    /// The inputs were known good and nothing was regenerated
    pub cache_hit: bool,
    /// Fingerprint of the spec files and checked-in lock files
    pub current: Fingerprint,
    /// Fingerprint recorded in the cache by this run
    pub recorded: Option<Fingerprint>,
    pub outcome: VerificationOutcome,
}

/// Verification orchestrator
pub struct Verifier<C, R> {
    layout: LockLayout,
    cache: C,
    regenerator: R,
    options: VerifyOptions,
}

impl Verifier<JsonFileCache, ToolRegenerator> {
    /// Build a verifier backed by the cache file and update tool from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the lock set or tool configuration is invalid.
    pub fn from_config(config: &Config, options: VerifyOptions) -> Result<Self, Error> {
        Ok(Self::new(
            LockLayout::from_config(config)?,
            JsonFileCache::new(config.cache_file()),
            ToolRegenerator::from_config(config)?,
        )
        .with_options(options))
    }
}

impl<C: CacheStore, R: Regenerator> Verifier<C, R> {
    pub fn new(layout: LockLayout, cache: C, regenerator: R) -> Self {
        Self {
            layout,
            cache,
            regenerator,
                    options: VerifyOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: VerifyOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn layout(&self) -> &LockLayout {
        &self.layout
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    #[must_use]
    pub fn regenerator(&self) -> &R {
        &self.regenerator
    }

    /// Verify the lock files, writing diffs to `out` on mismatch
    ///
    /// The regenerated fingerprint is recorded even when the lock files turn
    /// out to be stale, so once the regenerated files are committed the next
    /// run is a cache hit.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::OutOfDate`] after printing diffs when any lock
    /// file differs. Hashing, copying, tool and cache failures abort the run
    /// before the cache is updated.
    pub async fn verify<W: Write + ?Sized>(&self, out: &mut W) -> Result<VerifyReport, Error> {
        let layout = &self.layout;

        self.cache.ensure_initialized().await?;

        let specs = inputs::spec_files(&layout.requirements_dir, &layout.spec_extension)?;
        debug!(
            specs = specs.len(),
            locks = layout.locks.len(),
            "collected fingerprint inputs"
        );
        let current = Fingerprint::of_files(&inputs::fingerprint_inputs(
            &specs,
            &layout.requirements_dir,
            &layout.locks,
        ))
        .await?;

        let mut record = self.cache.load().await?;
        if record.contains(&current) {
            if self.options.force {
                debug!(fingerprint = %current, "known good inputs, regenerating anyway");
            } else {
                info!(fingerprint = %current, "lock inputs already verified, skipping");
                return Ok(VerifyReport {
                    cache_hit: true,
                    current,
                    recorded: None,
                    outcome: VerificationOutcome::Consistent,
                });
            }
        }

        let scratch = tempfile::Builder::new()
            .prefix("lockcheck-")
            .tempdir()
            .map_err(|e| Error::io_with_path(&e, std::env::temp_dir()))?;
        IsolatedRunner::new(&self.regenerator, &layout.locks)
            .run(&layout.requirements_dir, scratch.path())
            .await?;

        let outcome =
            compare_locks(&layout.requirements_dir, scratch.path(), &layout.locks).await?;

        let valid = Fingerprint::of_files(&inputs::fingerprint_inputs(
            &specs,
            scratch.path(),
            &layout.locks,
        ))
        .await?;
        record.promote(valid);
        self.cache.save(record).await?;
        debug!(fingerprint = %valid, "recorded regenerated inputs");

        if let VerificationOutcome::Inconsistent(mismatches) = &outcome {
            for mismatch in mismatches {
                write_diff(out, mismatch).await?;
            }
            out.flush()?;

            let files = outcome.mismatched_names();
            warn!(files = ?files, "locked requirements out of date");
            return Err(VerifyError::OutOfDate { files }.into());
        }

        if let Err(e) = scratch.close() {
            warn!(error = %e, "failed to remove scratch directory");
        }

        info!(fingerprint = %current, "lock files are consistent");
        Ok(VerifyReport {
            cache_hit: false,
            current,
            recorded: Some(valid),
            outcome,
        })
    }
}
