//! Filesystem artifact store writing timestamped output files.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;

use crate::domain::AppError;
use crate::ports::ArtifactStore;

/// Writes artifacts into an output directory, inserting a timestamp
/// between the base name and extension so repeated runs don't clobber
/// each other.
pub struct FilesystemArtifactStore {
    out_dir: PathBuf,
}

impl FilesystemArtifactStore {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }

    fn timestamped(name: &str) -> String {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        match name.rsplit_once('.') {
            Some((stem, ext)) => format!("{}-{}.{}", stem, stamp, ext),
            None => format!("{}-{}", name, stamp),
        }
    }
}

impl ArtifactStore for FilesystemArtifactStore {
    fn write_artifact(&self, name: &str, contents: &str) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(Self::timestamped(name));
        fs::write(&path, contents)?;
        Ok(path)
    }
}

/// Test double writing into a caller-owned directory without timestamps.
#[cfg(test)]
pub struct PlainArtifactStore {
    out_dir: PathBuf,
}

#[cfg(test)]
impl PlainArtifactStore {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }
}

#[cfg(test)]
impl ArtifactStore for PlainArtifactStore {
    fn write_artifact(&self, name: &str, contents: &str) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}
