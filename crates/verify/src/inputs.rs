//! Fingerprint input collection

use lockcheck_errors::{Error, StorageError};
use lockcheck_types::LockFileSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Specification files directly inside `dir`, sorted by path
///
/// Only files whose extension equals `extension` are returned; the search
/// does not descend into subdirectories.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn spec_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if entry.file_type().is_file()
            && entry.path().extension() == Some(OsStr::new(extension))
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Spec files followed by the lock files in `lock_dir`, in lock set order
#[must_use]
pub fn fingerprint_inputs(
    spec_files: &[PathBuf],
    lock_dir: &Path,
    locks: &LockFileSet,
) -> Vec<PathBuf> {
    spec_files
        .iter()
        .cloned()
        .chain(locks.paths_in(lock_dir))
        .collect()
}

fn walk_error(dir: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(dir).to_path_buf();
    match err.into_io_error() {
        Some(io) => StorageError::from_io_with_path(&io, &path).into(),
        None => StorageError::IoError {
            message: format!("filesystem loop at {}", path.display()),
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_spec_files_are_filtered_and_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["prod.in", "dev.in", "dev.txt", "notes.md", "docs.in"] {
            std::fs::write(dir.path().join(name), name).unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.in")).unwrap();
        std::fs::write(dir.path().join("nested.in").join("deep.in"), "x").unwrap();

        let files = spec_files(dir.path(), "in").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["dev.in", "docs.in", "prod.in"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = spec_files(&dir.path().join("absent"), "in");
        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::PathNotFound { .. }))
        ));
    }

    #[test]
    fn test_inputs_put_locks_after_specs() {
        let specs = vec![PathBuf::from("/req/a.in"), PathBuf::from("/req/b.in")];
        let locks = LockFileSet::new(["prod.txt", "dev.txt"]).unwrap();

        let inputs = fingerprint_inputs(&specs, Path::new("/scratch"), &locks);
        assert_eq!(
            inputs,
            vec![
                PathBuf::from("/req/a.in"),
                PathBuf::from("/req/b.in"),
                PathBuf::from("/scratch/prod.txt"),
                PathBuf::from("/scratch/dev.txt"),
            ]
        );
    }
}
