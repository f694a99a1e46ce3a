//! Best-effort on-disk copy of the last fetched snapshot.
//!
//! Nothing here is allowed to fail the caller: unreadable or malformed files
//! behave like an empty cache and write errors are only logged.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{config::Config, model::WeatherSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedSnapshot {
    pub snapshot: WeatherSnapshot,
    pub location_name: String,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache in the platform cache directory.
    pub fn from_project_dirs() -> Result<Self> {
        Ok(Self::new(Config::cache_file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<CachedSnapshot> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "no cached snapshot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cached) => Some(cached),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring malformed snapshot cache");
                None
            }
        }
    }

    pub fn store(&self, snapshot: &WeatherSnapshot, location_name: &str) {
        let entry = CachedSnapshot {
            snapshot: snapshot.clone(),
            location_name: location_name.to_string(),
            fetched_at: Utc::now(),
        };

        if let Err(err) = self.write(&entry) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to write snapshot cache");
        }
    }

    fn write(&self, entry: &CachedSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec(entry)?)?;
        Ok(())
    }
}
