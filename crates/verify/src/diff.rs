//! Unified diff rendering for mismatched lock files

use lockcheck_errors::{Error, StorageError};
use lockcheck_types::Mismatch;
use similar::TextDiff;
use std::io::Write;
use std::path::Path;

/// Lines of context around each change
pub const DEFAULT_CONTEXT: usize = 3;

/// Write the diff for one mismatch; neither file is modified
///
/// # Errors
///
/// Returns an error if either file cannot be read or the writer fails.
pub async fn write_diff<W: Write + ?Sized>(
    out: &mut W,
    mismatch: &Mismatch,
) -> Result<(), Error> {
    let before = read_lossy(&mismatch.expected).await?;
    let after = read_lossy(&mismatch.actual).await?;

    let rendered = render_diff(
        &mismatch.expected.display().to_string(),
        &mismatch.actual.display().to_string(),
        &before,
        &after,
    );
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

/// Render a unified diff with `--- expected` / `+++ actual` headers
#[must_use]
pub fn render_diff(expected: &str, actual: &str, before: &str, after: &str) -> String {
    let diff = TextDiff::from_lines(before, after);
    let rendered = diff
        .unified_diff()
        .context_radius(DEFAULT_CONTEXT)
        .header(expected, actual)
        .to_string();

    if rendered.is_empty() {
        // Contents differ only in bytes lost by lossy decoding
        format!("Files {expected} and {actual} differ\n")
    } else {
        rendered
    }
}

async fn read_lossy(path: &Path) -> Result<String, Error> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| StorageError::from_io_with_path(&e, path))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
