//! Flat per-identifier cache files.

use crate::error::ResolverError;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// One `<identifier>.data` file per key under a fixed directory.
///
/// Entries are written on first successful resolution and never mutated or
/// expired afterwards. Lookup never touches the network; concurrent writes
/// for different keys go to independent files, so no locking is needed.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ResolverError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| ResolverError::CacheWrite {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.data"))
    }

    /// Look up a previously resolved value.
    pub fn get(&self, key: &str) -> Result<Option<String>, ResolverError> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(value) => {
                debug!(key = %key, "cache hit");
                Ok(Some(value))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ResolverError::CacheRead {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Persist a resolved value, durable before returning.
    ///
    /// The value goes to a temp file in the same directory and is renamed
    /// into place, so a crash mid-write never leaves a torn entry; at worst
    /// the caller repeats a fetch next run.
    pub fn put(&self, key: &str, value: &str) -> Result<(), ResolverError> {
        let tmp = self.dir.join(format!("{key}.data.tmp"));
        fs::write(&tmp, value).map_err(|source| ResolverError::CacheWrite {
            key: key.to_string(),
            source,
        })?;
        fs::rename(&tmp, self.entry_path(key)).map_err(|source| ResolverError::CacheWrite {
            key: key.to_string(),
            source,
        })?;
        Ok(())
    }
}
