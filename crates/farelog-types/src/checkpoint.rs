//! Partial-booking checkpoint: a stage marker plus the in-progress
//! record, serialized as a single-slot file payload.

use std::fmt;

use crate::booking::{BookingRecord, BookingRecordError, BOOKING_RECORD_SIZE};

/// Magic bytes opening a checkpoint (`"FLCK"`).
pub const CHECKPOINT_MAGIC: [u8; 4] = *b"FLCK";

/// Current checkpoint format version.
pub const CHECKPOINT_VERSION: u8 = 1;

/// Total encoded size of a checkpoint.
pub const CHECKPOINT_SIZE: usize = 6 + BOOKING_RECORD_SIZE;

/// How far a paused booking transaction has progressed.
///
/// Transitions move strictly left to right; any stage may pause.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum BookingStage {
    /// Nothing entered yet.
    #[default]
    Empty = 0,
    /// Ticket id assigned.
    Identified = 1,
    /// Passenger name entered.
    NamedTraveler = 2,
    /// Route, party size, mode, and category entered.
    RouteSelected = 3,
    /// Fare computed (promo and loyalty applied).
    Priced = 4,
    /// Appended to the booking store.
    Committed = 5,
}

impl BookingStage {
    /// Decode a persisted stage byte.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Empty),
            1 => Some(Self::Identified),
            2 => Some(Self::NamedTraveler),
            3 => Some(Self::RouteSelected),
            4 => Some(Self::Priced),
            5 => Some(Self::Committed),
            _ => None,
        }
    }

    /// Stage name for logs and errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Identified => "identified",
            Self::NamedTraveler => "named-traveler",
            Self::RouteSelected => "route-selected",
            Self::Priced => "priced",
            Self::Committed => "committed",
        }
    }
}

impl fmt::Display for BookingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialized snapshot of an in-progress booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Checkpoint {
    pub stage: BookingStage,
    pub booking: BookingRecord,
}

impl Checkpoint {
    /// Serialize into the fixed checkpoint layout.
    ///
    /// The embedded record carries its own integrity trailer, so the
    /// checkpoint header stays minimal: magic, version, and stage.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(CHECKPOINT_SIZE);
        buf.extend_from_slice(&CHECKPOINT_MAGIC);
        buf.push(CHECKPOINT_VERSION);
        buf.push(self.stage as u8);
        buf.extend_from_slice(&self.booking.to_bytes());
        debug_assert_eq!(buf.len(), CHECKPOINT_SIZE);
        buf
    }

    /// Deserialize and validate a checkpoint.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CheckpointError> {
        if data.len() < CHECKPOINT_SIZE {
            return Err(CheckpointError::TooShort {
                expected: CHECKPOINT_SIZE,
                actual: data.len(),
            });
        }
        let magic: [u8; 4] = data[0..4].try_into().expect("slice length 4");
        if magic != CHECKPOINT_MAGIC {
            return Err(CheckpointError::BadMagic(magic));
        }
        let version = data[4];
        if version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion(version));
        }
        let stage = BookingStage::from_tag(data[5]).ok_or(CheckpointError::BadStage(data[5]))?;
        let booking = BookingRecord::from_bytes(&data[6..])?;
        Ok(Self { stage, booking })
    }
}

/// Validation error when deserializing a [`Checkpoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    /// Input too short for a complete checkpoint.
    TooShort { expected: usize, actual: usize },
    /// Magic bytes do not match `"FLCK"`.
    BadMagic([u8; 4]),
    /// Checkpoint format version is unsupported.
    UnsupportedVersion(u8),
    /// Stage byte is out of range.
    BadStage(u8),
    /// The embedded booking record is malformed.
    Booking(BookingRecordError),
}

impl fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { expected, actual } => {
                write!(f, "checkpoint too short: expected {expected} bytes, got {actual}")
            }
            Self::BadMagic(magic) => write!(f, "bad checkpoint magic: {magic:02x?}"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported checkpoint version: {v}"),
            Self::BadStage(tag) => write!(f, "invalid stage tag: {tag}"),
            Self::Booking(err) => write!(f, "embedded booking record: {err}"),
        }
    }
}

impl std::error::Error for CheckpointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Booking(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BookingRecordError> for CheckpointError {
    fn from(err: BookingRecordError) -> Self {
        Self::Booking(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TicketId;

    #[test]
    fn round_trip_route_selected() {
        let mut booking = BookingRecord {
            ticket_id: TicketId::new(1042),
            name: "Ravi Kumar".to_owned(),
            origin: "Chennai".to_owned(),
            destination: "Kolkata".to_owned(),
            travelers: 1,
            ..BookingRecord::default()
        };
        booking.seats[0] = 12;
        let checkpoint = Checkpoint {
            stage: BookingStage::RouteSelected,
            booking,
        };
        let decoded = Checkpoint::from_bytes(&checkpoint.to_bytes()).expect("decode");
        assert_eq!(decoded.stage, BookingStage::RouteSelected);
        assert_eq!(decoded.booking.origin, "Chennai");
        assert_eq!(decoded.booking.destination, "Kolkata");
        assert_eq!(decoded, checkpoint);
    }

    #[test]
    fn empty_checkpoint_round_trips() {
        let checkpoint = Checkpoint::default();
        let decoded = Checkpoint::from_bytes(&checkpoint.to_bytes()).expect("decode");
        assert_eq!(decoded.stage, BookingStage::Empty);
    }

    #[test]
    fn rejects_bad_stage() {
        let mut bytes = Checkpoint::default().to_bytes();
        bytes[5] = 9;
        let err = Checkpoint::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, CheckpointError::BadStage(9)));
    }

    #[test]
    fn rejects_short_input() {
        let bytes = Checkpoint::default().to_bytes();
        let err = Checkpoint::from_bytes(&bytes[..10]).unwrap_err();
        assert!(matches!(err, CheckpointError::TooShort { .. }));
    }

    #[test]
    fn stages_are_ordered() {
        assert!(BookingStage::Empty < BookingStage::Identified);
        assert!(BookingStage::Priced < BookingStage::Committed);
        assert_eq!(BookingStage::from_tag(3), Some(BookingStage::RouteSelected));
        assert_eq!(BookingStage::from_tag(6), None);
    }
}
