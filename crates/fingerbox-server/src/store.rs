//! Artifact storage on the local filesystem.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Directory of generated cut files.
///
/// File names are content ids, so a file that already exists holds exactly
/// the bytes that would be written and is kept as is.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `contents` as `name` unless it already exists.
    ///
    /// The file is written to a temporary file in the same directory and
    /// renamed into place, so readers only ever see complete artifacts.
    pub fn put(&self, name: &str, contents: &[u8]) -> io::Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid artifact name '{name}'"),
            ));
        }

        let path = self.dir.join(name);
        if path.is_file() {
            debug!(path = %path.display(), "artifact exists, reusing");
            return Ok(path);
        }

        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
        Ok(path)
    }
}
