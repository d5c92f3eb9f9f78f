use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bot_logging::{bot_info, bot_warn};
use thiserror::Error;

use crate::persist::{write_atomic, PersistError};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cached schedule not found at {0}")]
    Missing(PathBuf),
    #[error("failed to read cached schedule: {0}")]
    Read(#[from] io::Error),
    #[error("failed to store schedule: {0}")]
    Persist(#[from] PersistError),
}

/// The last fetched schedule page, kept on disk between requests.
///
/// Not synchronized by itself; [`crate::ScheduleEngine`] serializes access.
#[derive(Debug, Clone)]
pub struct ScheduleCache {
    path: PathBuf,
    debug_copy: Option<PathBuf>,
}

impl ScheduleCache {
    pub fn new(path: PathBuf, debug_copy: Option<PathBuf>) -> Self {
        Self { path, debug_copy }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<String, CacheError> {
        match fs::read_to_string(&self.path) {
            Ok(html) => Ok(html),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(CacheError::Missing(self.path.clone()))
            }
            Err(err) => Err(CacheError::Read(err)),
        }
    }

    /// Replace the cached page. The debug copy is best effort: failing to
    /// write it is logged and does not fail the store.
    pub fn store(&self, html: &str) -> Result<(), CacheError> {
        write_atomic(&self.path, html)?;
        bot_info!("stored schedule ({} bytes) at {:?}", html.len(), self.path);

        if let Some(copy) = &self.debug_copy {
            if let Err(err) = write_atomic(copy, html) {
                bot_warn!("failed to write raw response copy to {:?}: {}", copy, err);
            }
        }
        Ok(())
    }
}
