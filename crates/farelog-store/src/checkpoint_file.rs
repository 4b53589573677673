//! Single-slot checkpoint file for pausing a booking in progress.
//!
//! One file, one checkpoint: every save overwrites the previous one
//! (the snapshot is not keyed by user or session), load returns the
//! saved state or "no checkpoint", and clear deletes the file after
//! completion or explicit discard.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use farelog_error::{FareError, Result};
use farelog_types::Checkpoint;
use tracing::{debug, warn};

use crate::fsutil;

/// A well-known single-checkpoint file.
#[derive(Debug, Clone)]
pub struct CheckpointFile {
    path: PathBuf,
}

impl CheckpointFile {
    /// Bind to the checkpoint's well-known path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the checkpoint with the current in-progress state.
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        let mut file = fs::File::create(&self.path).map_err(|_| FareError::CannotOpen {
            path: self.path.clone(),
        })?;
        file.write_all(&checkpoint.to_bytes())?;
        file.flush()?;
        debug!(
            stage = %checkpoint.stage,
            ticket = checkpoint.booking.ticket_id.get(),
            "checkpoint saved"
        );
        Ok(())
    }

    /// Load the saved checkpoint.
    ///
    /// Returns `None` when the file is missing or not fully readable;
    /// an unreadable checkpoint is logged and treated as absent, not
    /// as a fatal error.
    pub fn load(&self) -> Result<Option<Checkpoint>> {
        let Some(bytes) = fsutil::read_all(&self.path)? else {
            return Ok(None);
        };
        match Checkpoint::from_bytes(&bytes) {
            Ok(checkpoint) => Ok(Some(checkpoint)),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "discarding unreadable checkpoint"
                );
                Ok(None)
            }
        }
    }

    /// Delete the checkpoint. A missing file is not an error.
    ///
    /// Returns whether a checkpoint existed.
    pub fn clear(&self) -> Result<bool> {
        fsutil::remove_if_present(&self.path)
    }
}
