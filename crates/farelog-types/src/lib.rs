//! Domain types and persisted record formats for farelog.
//!
//! Everything durable in farelog is a fixed-size, versioned binary
//! record: magic bytes, a format version, little-endian fixed-width
//! fields, NUL-padded text, and an xxh3-64 integrity trailer. This
//! crate owns those layouts plus the small newtypes the rest of the
//! workspace builds on.

pub mod booking;
pub mod checkpoint;
pub mod encoding;
pub mod feedback;
pub mod limits;
pub mod loyalty;
pub mod seatmap;

pub use booking::{
    BookingFlags, BookingRecord, BookingRecordError, TicketCategory, TransportMode,
    BOOKING_RECORD_MAGIC, BOOKING_RECORD_SIZE, BOOKING_RECORD_VERSION,
};
pub use checkpoint::{
    BookingStage, Checkpoint, CheckpointError, CHECKPOINT_MAGIC, CHECKPOINT_SIZE,
    CHECKPOINT_VERSION,
};
pub use feedback::{FeedbackRecord, FeedbackRecordError, FEEDBACK_RECORD_SIZE};
pub use loyalty::{LoyaltyAccount, LoyaltyRecordError, LOYALTY_RECORD_SIZE};
pub use seatmap::SeatMap;

use std::fmt;
use std::num::NonZeroU8;

use limits::MAX_SEATS;

/// Identifier assigned to a finalized booking.
///
/// Generation is time-seeded and not guaranteed collision-free; see
/// `farelog-core`'s generator for the caveat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct TicketId(u32);

impl TicketId {
    /// Wrap a raw ticket id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated seat number.
///
/// Seat numbers are 1-based; 0 marks an unassigned slot in the
/// persisted seat array and is not representable here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct SeatNumber(NonZeroU8);

impl SeatNumber {
    /// Create a seat number from a raw value.
    ///
    /// Returns `None` for 0 or anything above [`limits::MAX_SEATS`].
    #[must_use]
    pub const fn new(n: u8) -> Option<Self> {
        if n > MAX_SEATS {
            return None;
        }
        match NonZeroU8::new(n) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Get the raw 1-based seat number.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Bit mask for this seat's slot in a [`SeatMap`].
    #[must_use]
    pub(crate) const fn mask(self) -> u64 {
        1 << (self.0.get() - 1)
    }
}

impl fmt::Display for SeatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
