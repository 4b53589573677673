use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for farelog operations.
///
/// Structured variants for the failure taxonomy of the reservation
/// system: malformed user input (recovered by re-prompting), file I/O
/// failures (reported, operation aborted), record corruption, and
/// not-found lookups (normal negative results).
#[derive(Error, Debug)]
pub enum FareError {
    // === User input ===
    /// Passenger name failed validation (alphabetic plus interior
    /// spaces, at least one non-space character, no leading space).
    #[error("invalid passenger name: '{name}'")]
    InvalidName { name: String },

    /// City is not a member of the configured city table.
    #[error("unknown city: '{name}'")]
    UnknownCity { name: String },

    /// Origin and destination must differ.
    #[error("origin and destination cannot both be '{city}'")]
    SameCity { city: String },

    /// Seat number outside [1, max].
    #[error("seat {seat} out of range (1-{max})")]
    SeatOutOfRange { seat: u32, max: u32 },

    /// Seat is already booked on this route.
    #[error("seat {seat} is not available on {origin} -> {destination}")]
    SeatUnavailable {
        seat: u8,
        origin: String,
        destination: String,
    },

    /// Traveler count must be positive and bounded by the seat count.
    #[error("invalid traveler count: {count} (max {max})")]
    InvalidTravelerCount { count: u32, max: u32 },

    /// Promo code not in the configured table.
    #[error("invalid promotional code: '{code}'")]
    InvalidPromoCode { code: String },

    /// Redemption request exceeds the account balance.
    #[error("cannot redeem {requested} points: balance is {available}")]
    InsufficientPoints { requested: u32, available: u32 },

    /// Session operation applied at the wrong booking stage.
    #[error("booking stage violation: cannot {operation} while {stage}")]
    StageViolation {
        operation: &'static str,
        stage: &'static str,
    },

    // === Not found ===
    /// No booking matches the requested ticket id.
    #[error("no booking found for ticket {ticket_id}")]
    TicketNotFound { ticket_id: u32 },

    /// No loyalty account exists for the passenger.
    #[error("no loyalty points recorded for '{name}'")]
    AccountNotFound { name: String },

    // === I/O ===
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store or checkpoint file cannot be opened.
    #[error("unable to open file: '{}'", path.display())]
    CannotOpen { path: PathBuf },

    // === Corruption ===
    /// A persisted record failed envelope validation.
    #[error("store record is malformed: {detail}")]
    RecordCorrupt { detail: String },

    // === Capacity ===
    /// Route table is full; the inventory cannot track another route.
    #[error("route table is full (max {max} routes)")]
    RouteTableFull { max: usize },
}

/// Coarse classification used by callers to pick a recovery strategy:
/// re-prompt for user input, abort the operation for I/O, report a
/// negative result for not-found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range user input; recover by re-prompting.
    UserInput,
    /// Lookup miss; a normal negative result, not a failure.
    NotFound,
    /// File open/read/write failure; abort the operation.
    Io,
    /// Persisted data failed validation.
    Corruption,
    /// A fixed-capacity table overflowed.
    Capacity,
}

impl FareError {
    /// Classify this error for recovery purposes.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidName { .. }
            | Self::UnknownCity { .. }
            | Self::SameCity { .. }
            | Self::SeatOutOfRange { .. }
            | Self::SeatUnavailable { .. }
            | Self::InvalidTravelerCount { .. }
            | Self::InvalidPromoCode { .. }
            | Self::InsufficientPoints { .. }
            | Self::StageViolation { .. } => ErrorKind::UserInput,
            Self::TicketNotFound { .. } | Self::AccountNotFound { .. } => ErrorKind::NotFound,
            Self::Io(_) | Self::CannotOpen { .. } => ErrorKind::Io,
            Self::RecordCorrupt { .. } => ErrorKind::Corruption,
            Self::RouteTableFull { .. } => ErrorKind::Capacity,
        }
    }

    /// True when the caller should re-prompt instead of aborting.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::UserInput)
    }

    /// Shorthand for a corruption error with a formatted detail.
    #[must_use]
    pub fn corrupt(detail: impl Into<String>) -> Self {
        Self::RecordCorrupt {
            detail: detail.into(),
        }
    }
}

/// Convenience alias used across all farelog crates.
pub type Result<T> = std::result::Result<T, FareError>;
