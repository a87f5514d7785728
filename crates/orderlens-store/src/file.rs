use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use orderlens_core::OrderSnapshot;

use crate::{OrderStore, StoreError};

/// Stores the snapshot as one JSON document on disk.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash mid-write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl OrderStore for JsonFileStore {
    fn load(&self) -> Result<Option<OrderSnapshot>, StoreError> {
        let body = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored snapshot yet");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if body.trim().is_empty() {
            return Ok(None);
        }

        let snapshot = serde_json::from_str::<OrderSnapshot>(&body).map_err(|source| {
            StoreError::Json {
                path: self.path.display().to_string(),
                source,
            }
        })?;

        tracing::debug!(
            path = %self.path.display(),
            orders = snapshot.order_count(),
            last_updated = %snapshot.last_updated,
            "loaded stored snapshot"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &OrderSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let body = serde_json::to_vec_pretty(snapshot).map_err(|source| StoreError::Json {
            path: self.path.display().to_string(),
            source,
        })?;

        let temp = self.temp_path();
        fs::write(&temp, body).map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            // Best effort: the temp file is useless once the rename failed.
            let _ = fs::remove_file(&temp);
            return Err(self.io_error(e));
        }

        tracing::info!(
            path = %self.path.display(),
            orders = snapshot.order_count(),
            last_updated = %snapshot.last_updated,
            "persisted order snapshot"
        );
        Ok(())
    }
}
