//! Reading and writing text documents on disk.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::crypto::{OsRandom, RandomSource};

/// A text document at a filesystem path.
///
/// Encrypted containers and decrypted text both pass through here when the
/// command line reads or writes files.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns `true` if the document exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole document as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    pub fn read_text(&self) -> Result<String> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "read document");

        String::from_utf8(bytes)
            .with_context(|| format!("{} is not valid UTF-8", self.path.display()))
    }

    /// Writes `data` so that the document holds either its old or its new content,
    /// never a partial write.
    ///
    /// The data goes to a randomly named sibling file, which is synced and then
    /// renamed over the target. The parent directory is synced afterwards so the
    /// rename survives a crash. Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails; the temporary file is removed.
    pub fn write_atomic(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let tmp_path = self.random_tmp_path()?;

        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .context("failed to create temporary file")?;

        if let Err(e) = tmp_file.write_all(data).and_then(|_| tmp_file.sync_all()) {
            drop(tmp_file);
            let _ = fs::remove_file(&tmp_path);
            return Err(e).context("failed to write temporary file");
        }
        drop(tmp_file);

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("failed to replace {}", self.path.display()));
        }

        #[cfg(unix)]
        if let Some(parent) = self.parent_dir() {
            fs::File::open(parent)?.sync_all()?;
        }

        tracing::debug!(path = %self.path.display(), bytes = data.len(), "wrote document");
        Ok(())
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    /// Sibling path `<name>.tmp.<16 hex chars>`.
    fn random_tmp_path(&self) -> Result<PathBuf> {
        let suffix = hex::encode(OsRandom.generate(8)?);

        let file_name = self
            .path
            .file_name()
            .with_context(|| format!("{} has no file name", self.path.display()))?
            .to_string_lossy();

        Ok(self.path.with_file_name(format!("{file_name}.tmp.{suffix}")))
    }
}
