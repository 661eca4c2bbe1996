use std::{
    fs::{self, File, TryLockError},
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::prelude::*;

/// Replace the file contents so that readers see either the old or the new version, never a truncated one.
#[instrument(skip_all, level = Level::DEBUG, fields(path = %path.display(), n_bytes = contents.len()))]
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result {
    let directory = parent_directory(path);
    fs::create_dir_all(directory)
        .with_context(|| format!("failed to create `{}`", directory.display()))?;
    let mut file = NamedTempFile::new_in(directory)
        .with_context(|| format!("failed to create a temporary file in `{}`", directory.display()))?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).with_context(|| format!("failed to replace `{}`", path.display()))?;
    Ok(())
}

fn parent_directory(path: &Path) -> &Path {
    path.parent().filter(|parent| !parent.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."))
}

/// Exclusive advisory lock held until dropped.
#[must_use]
pub struct Lock {
    _file: File,
    path: PathBuf,
}

impl Lock {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn acquire(path: PathBuf) -> Result<Self> {
        fs::create_dir_all(parent_directory(&path))?;
        let file = File::options()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .with_context(|| format!("failed to open `{}`", path.display()))?;
        match file.try_lock() {
            Ok(()) => {
                debug!("acquired");
                Ok(Self { _file: file, path })
            }
            Err(TryLockError::WouldBlock) => {
                bail!("`{}` is locked by another run", path.display())
            }
            Err(TryLockError::Error(error)) => {
                Err(error).with_context(|| format!("failed to lock `{}`", path.display()))
            }
        }
    }
}

impl Drop for Lock {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "releasing the lock");
    }
}
