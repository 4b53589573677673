//! Append-only log of passenger feedback.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use farelog_error::{FareError, Result};
use farelog_types::{FeedbackRecord, FEEDBACK_RECORD_SIZE};
use tracing::warn;

use crate::fsutil;

/// Flat file of fixed-size feedback records, append-only.
#[derive(Debug, Clone)]
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    /// Bind to the log's backing file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one feedback entry.
    pub fn append(&self, record: &FeedbackRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|_| FareError::CannotOpen {
                path: self.path.clone(),
            })?;
        file.write_all(&record.to_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// Read every entry in append order. A missing file is an empty
    /// log; truncated trailing bytes are dropped with a warning.
    pub fn scan(&self) -> Result<Vec<FeedbackRecord>> {
        let Some(bytes) = fsutil::read_all(&self.path)? else {
            return Ok(Vec::new());
        };
        let mut records = Vec::with_capacity(bytes.len() / FEEDBACK_RECORD_SIZE);
        let mut chunks = bytes.chunks_exact(FEEDBACK_RECORD_SIZE);
        for chunk in &mut chunks {
            let record = FeedbackRecord::from_bytes(chunk)
                .map_err(|err| FareError::corrupt(err.to_string()))?;
            records.push(record);
        }
        if !chunks.remainder().is_empty() {
            warn!(
                path = %self.path.display(),
                trailing = chunks.remainder().len(),
                "dropping truncated trailing bytes from feedback log"
            );
        }
        Ok(records)
    }
}
