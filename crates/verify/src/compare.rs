//! Byte-for-byte lock file comparison

use lockcheck_errors::{Error, StorageError};
use lockcheck_types::{LockFileSet, Mismatch, VerificationOutcome};
use std::path::Path;

/// Compare every named lock file in `canonical_dir` with its regenerated copy
///
/// Only content is compared; timestamps and permissions are ignored.
/// Mismatches are returned in lock set order.
///
/// # Errors
///
/// Returns an error naming the path if either copy of a lock file cannot be
/// read, including a regenerated file the tool failed to produce.
pub async fn compare_locks(
    canonical_dir: &Path,
    scratch_dir: &Path,
    locks: &LockFileSet,
) -> Result<VerificationOutcome, Error> {
    let mut mismatches = Vec::new();

    for name in locks.iter() {
        let expected = canonical_dir.join(name);
        let actual = scratch_dir.join(name);

        if read(&expected).await? == read(&actual).await? {
            tracing::debug!(lock = name, "lock file matches");
        } else {
            tracing::debug!(lock = name, "lock file differs");
            mismatches.push(Mismatch {
                name: name.to_string(),
                expected,
                actual,
            });
        }
    }

    Ok(VerificationOutcome::from_mismatches(mismatches))
}

async fn read(path: &Path) -> Result<Vec<u8>, Error> {
    tokio::fs::read(path)
        .await
        .map_err(|e| StorageError::from_io_with_path(&e, path).into())
}
