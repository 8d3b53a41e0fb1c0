//! # Snapshot Persistence
//!
//! The durable record set (channels, pools, rentals with their swap history,
//! vault balances) is written as one JSON document. Writes go to a temp file
//! first and are renamed into place.

use ll_02_channel_ledger::{Channel, VaultSnapshot};
use ll_03_pool_registry::Pool;
use ll_05_rental_engine::RentalRecord;
use serde::{Deserialize, Serialize};
use shared_types::Timestamp;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 2;

/// Everything needed to rebuild the services.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseSnapshot {
    /// Format version.
    pub version: u32,
    /// Clock reading when the snapshot was taken.
    pub taken_at: Timestamp,
    /// Channel Ledger contents.
    pub channels: Vec<Channel>,
    /// Pool Registry contents.
    pub pools: Vec<Pool>,
    /// Rentals and swap histories.
    pub rentals: Vec<RentalRecord>,
    /// Escrow vault balances.
    pub vault: VaultSnapshot,
}

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Filesystem failure.
    #[error("Snapshot I/O error at {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The document is not a valid snapshot.
    #[error("Malformed snapshot: {0}")]
    Format(#[from] serde_json::Error),

    /// Written by an incompatible build.
    #[error("Unsupported snapshot version {found}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
    },
}

/// JSON snapshot file.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store backed by `path`. Nothing is touched until `save` or `load`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// File location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `snapshot`, replacing any previous file.
    pub fn save(&self, snapshot: &LeaseSnapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| self.io(parent, source))?;
        }
        let bytes = serde_json::to_vec_pretty(snapshot)?;

        let temp_path = self.path.with_extension("tmp");
        let mut file =
            std::fs::File::create(&temp_path).map_err(|source| self.io(&temp_path, source))?;
        file.write_all(&bytes)
            .and_then(|_| file.sync_all())
            .map_err(|source| self.io(&temp_path, source))?;
        std::fs::rename(&temp_path, &self.path).map_err(|source| self.io(&self.path, source))?;

        info!(
            path = %self.path.display(),
            channels = snapshot.channels.len(),
            pools = snapshot.pools.len(),
            rentals = snapshot.rentals.len(),
            bytes = bytes.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    /// Read the snapshot. `None` if no file exists yet.
    pub fn load(&self) -> Result<Option<LeaseSnapshot>, PersistenceError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot file");
                return Ok(None);
            }
            Err(source) => return Err(self.io(&self.path, source)),
        };

        let snapshot: LeaseSnapshot = serde_json::from_slice(&bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: snapshot.version,
            });
        }
        info!(
            path = %self.path.display(),
            taken_at = snapshot.taken_at,
            "Snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    fn io(&self, path: &Path, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
