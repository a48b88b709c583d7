//! Directory-backed checkpoint store.
//!
//! The directory listing is the only record of how far a previous run got:
//! intermediate snapshots are named `<iteration>.bin` and the scan takes the
//! highest such number. There is no manifest to drift out of sync with the
//! files.

use crate::models::{LayoutError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File stem of the terminal snapshot.
pub const TERMINAL_STEM: &str = "positions";

/// Name of a snapshot within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snapshot {
    /// Intermediate snapshot taken at the given iteration.
    Iteration(u64),
    /// Final snapshot written when a run completes.
    Terminal,
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iteration(n) => write!(f, "{n}"),
            Self::Terminal => f.write_str(TERMINAL_STEM),
        }
    }
}

/// Handle on a checkpoint directory.
pub struct CheckpointStore {
    dir: PathBuf,
    iteration_file: Regex,
}

impl CheckpointStore {
    /// Open a store, creating the directory (and any missing parents) if
    /// absent. Opening an existing directory is a no-op.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| LayoutError::io("creating checkpoint dir", e))?;

        Ok(Self {
            dir,
            iteration_file: Regex::new(r"^(\d+)\.(?i:bin)$").unwrap(),
        })
    }

    /// Directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a snapshot file within the store.
    pub fn path_for(&self, snapshot: Snapshot) -> PathBuf {
        self.dir.join(format!("{snapshot}.bin"))
    }

    /// Highest iteration number with a snapshot on disk, or 0 if none.
    ///
    /// Only `<digits>.bin` entries count (extension case-insensitive); the
    /// terminal snapshot and anything else in the directory are ignored.
    pub fn latest_iteration(&self) -> Result<u64> {
        let entries =
            fs::read_dir(&self.dir).map_err(|e| LayoutError::io("listing checkpoint dir", e))?;

        let mut largest = 0;
        for entry in entries {
            let entry = entry.map_err(|e| LayoutError::io("listing checkpoint dir", e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(caps) = self.iteration_file.captures(name) else {
                continue;
            };
            if let Ok(iteration) = caps[1].parse::<u64>() {
                largest = largest.max(iteration);
            }
        }
        Ok(largest)
    }

    /// Write a snapshot, fully replacing any previous file of that name.
    ///
    /// Goes through a temp file in the same directory plus a rename, so a
    /// crash mid-write never leaves a truncated file under a valid snapshot
    /// name.
    pub fn write(&self, snapshot: Snapshot, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(snapshot);
        let tmp = self.dir.join(format!("{snapshot}.bin.tmp"));

        fs::write(&tmp, bytes).map_err(|e| LayoutError::io("writing snapshot", e))?;
        fs::rename(&tmp, &path).map_err(|e| LayoutError::io("publishing snapshot", e))?;

        debug!(path = %path.display(), bytes = bytes.len(), "Snapshot written");
        Ok(())
    }

    /// Read a snapshot's raw bytes.
    pub fn read(&self, snapshot: Snapshot) -> Result<Vec<u8>> {
        let path = self.path_for(snapshot);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LayoutError::CheckpointNotFound { path })
            }
            Err(e) => Err(LayoutError::io("reading snapshot", e)),
        }
    }
}
