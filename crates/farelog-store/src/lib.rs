//! Flat-file persistence for farelog.
//!
//! Four small stores share one discipline: fixed-size versioned
//! records, append or whole-file rewrite, and delete-then-rename
//! replacement through a sibling temp file.
//!
//! - [`BookingStore`]: the durable source of truth for reservations.
//! - [`CheckpointFile`]: single-slot pause/resume snapshot.
//! - [`FeedbackLog`]: append-only ratings and comments.
//! - [`LoyaltyLedger`]: per-passenger point balances.

mod fsutil;

pub mod booking_store;
pub mod checkpoint_file;
pub mod feedback_log;
pub mod loyalty_ledger;

pub use booking_store::{BookingStore, RecordDecision, RewriteOutcome};
pub use checkpoint_file::CheckpointFile;
pub use feedback_log::FeedbackLog;
pub use loyalty_ledger::LoyaltyLedger;
