//! Durable store of finalized bookings.
//!
//! An append-only sequence of fixed-size booking records in one flat
//! file. Appends go straight to the end; modify and cancel are whole-
//! file rewrites through a sibling temp file (read every record,
//! apply a per-record decision, write survivors in original order,
//! delete-then-rename). Acceptable for the small datasets this store
//! holds; a write-ahead log is explicitly out of scope.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use farelog_error::{FareError, Result};
use farelog_types::{BookingRecord, TicketId, BOOKING_RECORD_SIZE};
use tracing::{debug, info, warn};

use crate::fsutil;

/// Per-record verdict for [`BookingStore::rewrite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDecision {
    /// Write the record through unchanged.
    Keep,
    /// Write this record in place of the original.
    Replace(BookingRecord),
    /// Omit the record from the rewritten store.
    Drop,
}

/// Counters describing one rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Records read from the store.
    pub examined: usize,
    /// Records replaced with a modified version.
    pub replaced: usize,
    /// Records omitted from the rewrite.
    pub dropped: usize,
}

/// The booking store: sole durable source of truth for reservations.
#[derive(Debug, Clone)]
pub struct BookingStore {
    path: PathBuf,
}

impl BookingStore {
    /// Bind a store to its backing file. The file is created on first
    /// append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one finalized booking.
    pub fn append(&self, record: &BookingRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|_| FareError::CannotOpen {
                path: self.path.clone(),
            })?;
        file.write_all(&record.to_bytes())?;
        file.flush()?;
        info!(
            ticket = record.ticket_id.get(),
            origin = %record.origin,
            destination = %record.destination,
            "booking appended"
        );
        Ok(())
    }

    /// Read every record in append order.
    ///
    /// A missing file is an empty store. Trailing bytes shorter than
    /// one record (a torn final append) are dropped with a warning;
    /// a full-size record that fails validation is a corruption
    /// error.
    pub fn scan(&self) -> Result<Vec<BookingRecord>> {
        let Some(bytes) = fsutil::read_all(&self.path)? else {
            return Ok(Vec::new());
        };

        let mut records = Vec::with_capacity(bytes.len() / BOOKING_RECORD_SIZE);
        let mut chunks = bytes.chunks_exact(BOOKING_RECORD_SIZE);
        for chunk in &mut chunks {
            let record = BookingRecord::from_bytes(chunk)
                .map_err(|err| FareError::corrupt(err.to_string()))?;
            records.push(record);
        }
        let trailing = chunks.remainder().len();
        if trailing != 0 {
            warn!(
                path = %self.path.display(),
                trailing,
                "dropping truncated trailing bytes from booking store"
            );
        }
        Ok(records)
    }

    /// Find a booking by ticket id.
    pub fn find(&self, ticket_id: TicketId) -> Result<Option<BookingRecord>> {
        Ok(self
            .scan()?
            .into_iter()
            .find(|r| r.ticket_id == ticket_id))
    }

    /// Rewrite the store, applying `decide` to every record.
    ///
    /// Survivors keep their original relative order. The rewrite goes
    /// through a sibling temp file and replaces the store by
    /// delete-then-rename; a failure before the rename leaves the
    /// original untouched.
    pub fn rewrite(
        &self,
        mut decide: impl FnMut(&BookingRecord) -> RecordDecision,
    ) -> Result<RewriteOutcome> {
        let records = self.scan()?;
        if records.is_empty() {
            return Ok(RewriteOutcome::default());
        }

        let mut outcome = RewriteOutcome::default();
        let mut surviving = Vec::with_capacity(records.len() * BOOKING_RECORD_SIZE);
        for record in &records {
            outcome.examined += 1;
            match decide(record) {
                RecordDecision::Keep => surviving.extend_from_slice(&record.to_bytes()),
                RecordDecision::Replace(updated) => {
                    outcome.replaced += 1;
                    surviving.extend_from_slice(&updated.to_bytes());
                }
                RecordDecision::Drop => outcome.dropped += 1,
            }
        }

        fsutil::replace_with(&self.path, &surviving)?;
        debug!(
            examined = outcome.examined,
            replaced = outcome.replaced,
            dropped = outcome.dropped,
            "booking store rewrite complete"
        );
        Ok(outcome)
    }

    /// Drop the booking with the given ticket id.
    ///
    /// Returns `false` (a normal negative result) when no record
    /// matches.
    pub fn cancel(&self, ticket_id: TicketId) -> Result<bool> {
        let outcome = self.rewrite(|record| {
            if record.ticket_id == ticket_id {
                RecordDecision::Drop
            } else {
                RecordDecision::Keep
            }
        })?;
        Ok(outcome.dropped > 0)
    }

    /// Apply `change` to the booking with the given ticket id.
    ///
    /// Returns `false` when no record matches.
    pub fn modify(
        &self,
        ticket_id: TicketId,
        mut change: impl FnMut(&mut BookingRecord),
    ) -> Result<bool> {
        let outcome = self.rewrite(|record| {
            if record.ticket_id == ticket_id {
                let mut updated = record.clone();
                change(&mut updated);
                RecordDecision::Replace(updated)
            } else {
                RecordDecision::Keep
            }
        })?;
        Ok(outcome.replaced > 0)
    }

    /// Remove the most recently appended record.
    ///
    /// Deletes the file entirely when at most one record remains.
    /// Returns `false` on an empty store.
    pub fn remove_last(&self) -> Result<bool> {
        let records = self.scan()?;
        match records.len() {
            0 => Ok(false),
            1 => {
                fsutil::remove_if_present(&self.path)?;
                Ok(true)
            }
            n => {
                let mut bytes = Vec::with_capacity((n - 1) * BOOKING_RECORD_SIZE);
                for record in &records[..n - 1] {
                    bytes.extend_from_slice(&record.to_bytes());
                }
                fsutil::replace_with(&self.path, &bytes)?;
                Ok(true)
            }
        }
    }
}
