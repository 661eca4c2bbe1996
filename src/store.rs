use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    core::Series,
    file::{Lock, write_atomically},
    prelude::*,
};

/// Durable home of the [`Series`] between runs.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted series.
    ///
    /// A missing file is the first run and yields an empty series. A file that does not parse
    /// is an error: continuing with an empty series would overwrite the history on the next persist.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Series> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!("no stored series yet, starting empty");
                return Ok(Series::default());
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read `{}`", self.path.display()));
            }
        };
        let series: Series = serde_json::from_slice(&contents).with_context(|| {
            format!("`{}` is corrupt, fix or remove it manually", self.path.display())
        })?;
        info!(n_observations = series.len(), "loaded");
        Ok(series)
    }

    #[instrument(skip_all, fields(path = %self.path.display(), n_observations = series.len()))]
    pub fn persist(&self, series: &Series) -> Result {
        let contents = serde_json::to_vec(series).context("failed to serialize the series")?;
        write_atomically(&self.path, &contents)?;
        debug!("persisted");
        Ok(())
    }

    /// Take the single-writer lock next to the data file.
    ///
    /// The lock file name extends the data file name, so it never coincides with the data file.
    pub fn lock(&self) -> Result<Lock> {
        let mut path = self.path.clone().into_os_string();
        path.push(".lock");
        Lock::acquire(path.into())
    }
}
