use std::path::PathBuf;

use crate::domain::AppError;

/// Sink for rendered artifacts (HTML documents and social post text).
///
/// Writes happen only after every string is fully composed, so a failed
/// run never leaves partial content behind.
pub trait ArtifactStore {
    /// Write an artifact under a base name (with extension), returning
    /// the path actually written.
    fn write_artifact(&self, name: &str, contents: &str) -> Result<PathBuf, AppError>;
}
