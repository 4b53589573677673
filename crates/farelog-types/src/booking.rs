//! The persisted booking record and its fixed-layout binary codec.
//!
//! A booking record is a fixed 190-byte envelope: magic, format
//! version, enum tag bytes, little-endian integers, NUL-padded text
//! fields, and an xxh3-64 integrity trailer over everything before
//! it. The layout is versioned so future field additions cannot
//! silently corrupt old records.

use std::fmt;

use xxhash_rust::xxh3::xxh3_64;

use crate::encoding::{
    append_padded_text, append_u32_le, append_u64_le, read_padded_text, read_u32_le, read_u64_le,
};
use crate::limits::{MAX_CITY_BYTES, MAX_NAME_BYTES, MAX_SEATS};
use crate::{SeatNumber, TicketId};

/// Magic bytes opening every booking record (`"FLBK"`).
pub const BOOKING_RECORD_MAGIC: [u8; 4] = *b"FLBK";

/// Current booking record format version.
pub const BOOKING_RECORD_VERSION: u8 = 1;

/// Total encoded size of one booking record.
pub const BOOKING_RECORD_SIZE: usize = 190;

/// Offset of the xxh3-64 trailer (everything before it is hashed).
const CHECKSUM_OFFSET: usize = BOOKING_RECORD_SIZE - 8;

bitflags::bitflags! {
    /// Per-record flag byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BookingFlags: u8 {
        /// Round trip; the fare is doubled at pricing time.
        const RETURN_TICKET = 0x01;
    }
}

/// Ticket category, persisted as a tag byte.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum TicketCategory {
    #[default]
    Standard = 0,
    Vip = 1,
}

impl TicketCategory {
    /// Decode a persisted tag byte.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Standard),
            1 => Some(Self::Vip),
            _ => None,
        }
    }

    /// Display name, matching the menu wording.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Vip => "VIP",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport mode, persisted as a tag byte.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum TransportMode {
    #[default]
    Bus = 0,
    Train = 1,
}

impl TransportMode {
    /// Decode a persisted tag byte.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Bus),
            1 => Some(Self::Train),
            _ => None,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bus => "Bus",
            Self::Train => "Train",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finalized (or in-progress) reservation.
///
/// `seats` is a fixed-size ordered sequence of seat numbers; 0 marks
/// an unassigned slot. Every non-zero value lies in
/// `[1, MAX_SEATS]` and was available on the record's route at
/// booking time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingRecord {
    pub ticket_id: TicketId,
    pub name: String,
    pub origin: String,
    pub destination: String,
    /// Fare in whole rupees.
    pub price: u32,
    pub category: TicketCategory,
    pub mode: TransportMode,
    pub travelers: u8,
    pub return_ticket: bool,
    #[serde(with = "seats_serde")]
    pub seats: [u8; MAX_SEATS as usize],
}

/// Serde helpers for the seat array. The derive cannot handle
/// fixed arrays this long, so the field goes through a sequence.
mod seats_serde {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::limits::MAX_SEATS;

    pub(super) fn serialize<S>(
        seats: &[u8; MAX_SEATS as usize],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(seats.iter())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<[u8; MAX_SEATS as usize], D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<u8>::deserialize(deserializer)?;
        if values.len() != MAX_SEATS as usize {
            return Err(D::Error::invalid_length(values.len(), &"one slot per seat"));
        }
        let mut seats = [0_u8; MAX_SEATS as usize];
        seats.copy_from_slice(&values);
        Ok(seats)
    }
}

impl Default for BookingRecord {
    fn default() -> Self {
        Self {
            ticket_id: TicketId::new(0),
            name: String::new(),
            origin: String::new(),
            destination: String::new(),
            price: 0,
            category: TicketCategory::default(),
            mode: TransportMode::default(),
            travelers: 0,
            return_ticket: false,
            seats: [0; MAX_SEATS as usize],
        }
    }
}

impl BookingRecord {
    /// Number of assigned seats (non-zero slots).
    #[must_use]
    pub fn seat_count(&self) -> u8 {
        #[allow(clippy::cast_possible_truncation)]
        let count = self.seats.iter().filter(|&&s| s != 0).count() as u8;
        count
    }

    /// Iterate the assigned seats in slot order.
    pub fn assigned_seats(&self) -> impl Iterator<Item = SeatNumber> + '_ {
        self.seats.iter().filter_map(|&s| SeatNumber::new(s))
    }

    /// Assign `seat` to the first unassigned slot.
    ///
    /// Returns `false` if every slot is already taken.
    pub fn assign_seat(&mut self, seat: SeatNumber) -> bool {
        for slot in &mut self.seats {
            if *slot == 0 {
                *slot = seat.get();
                return true;
            }
        }
        false
    }

    /// Serialize into the fixed 190-byte record format.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(BOOKING_RECORD_SIZE);

        buf.extend_from_slice(&BOOKING_RECORD_MAGIC);
        buf.push(BOOKING_RECORD_VERSION);
        let mut flags = BookingFlags::empty();
        if self.return_ticket {
            flags |= BookingFlags::RETURN_TICKET;
        }
        buf.push(flags.bits());
        buf.push(self.category as u8);
        buf.push(self.mode as u8);
        append_u32_le(&mut buf, self.ticket_id.get());
        append_u32_le(&mut buf, self.price);
        buf.push(self.travelers);
        buf.push(self.seat_count());
        buf.extend_from_slice(&self.seats);
        append_padded_text(&mut buf, &self.name, MAX_NAME_BYTES);
        append_padded_text(&mut buf, &self.origin, MAX_CITY_BYTES);
        append_padded_text(&mut buf, &self.destination, MAX_CITY_BYTES);

        debug_assert_eq!(buf.len(), CHECKSUM_OFFSET);
        let checksum = xxh3_64(&buf);
        append_u64_le(&mut buf, checksum);

        debug_assert_eq!(buf.len(), BOOKING_RECORD_SIZE);
        buf
    }

    /// Deserialize and validate one record.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BookingRecordError> {
        if data.len() < BOOKING_RECORD_SIZE {
            return Err(BookingRecordError::TooShort {
                expected: BOOKING_RECORD_SIZE,
                actual: data.len(),
            });
        }
        let data = &data[..BOOKING_RECORD_SIZE];

        let magic: [u8; 4] = data[0..4].try_into().expect("slice length 4");
        if magic != BOOKING_RECORD_MAGIC {
            return Err(BookingRecordError::BadMagic(magic));
        }
        let version = data[4];
        if version != BOOKING_RECORD_VERSION {
            return Err(BookingRecordError::UnsupportedVersion(version));
        }

        let expected = read_u64_le(&data[CHECKSUM_OFFSET..]).expect("8-byte trailer");
        let computed = xxh3_64(&data[..CHECKSUM_OFFSET]);
        if expected != computed {
            return Err(BookingRecordError::IntegrityFailure { expected, computed });
        }

        let flags = BookingFlags::from_bits_truncate(data[5]);
        let category =
            TicketCategory::from_tag(data[6]).ok_or(BookingRecordError::BadCategoryTag(data[6]))?;
        let mode =
            TransportMode::from_tag(data[7]).ok_or(BookingRecordError::BadModeTag(data[7]))?;
        let ticket_id = TicketId::new(read_u32_le(&data[8..12]).expect("4-byte field"));
        let price = read_u32_le(&data[12..16]).expect("4-byte field");
        let travelers = data[16];
        let stored_seat_count = data[17];

        let mut seats = [0_u8; MAX_SEATS as usize];
        seats.copy_from_slice(&data[18..18 + MAX_SEATS as usize]);
        for &seat in &seats {
            if seat > MAX_SEATS {
                return Err(BookingRecordError::BadSeat(seat));
            }
        }
        #[allow(clippy::cast_possible_truncation)]
        let actual_seat_count = seats.iter().filter(|&&s| s != 0).count() as u8;
        if stored_seat_count != actual_seat_count {
            return Err(BookingRecordError::SeatCountMismatch {
                stored: stored_seat_count,
                actual: actual_seat_count,
            });
        }

        let name = read_padded_text(&data[68..118]).ok_or(BookingRecordError::BadText("name"))?;
        let origin =
            read_padded_text(&data[118..150]).ok_or(BookingRecordError::BadText("origin"))?;
        let destination =
            read_padded_text(&data[150..182]).ok_or(BookingRecordError::BadText("destination"))?;

        Ok(Self {
            ticket_id,
            name,
            origin,
            destination,
            price,
            category,
            mode,
            travelers,
            return_ticket: flags.contains(BookingFlags::RETURN_TICKET),
            seats,
        })
    }
}

/// Validation error when deserializing a [`BookingRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingRecordError {
    /// Input too short to contain a complete record.
    TooShort { expected: usize, actual: usize },
    /// Magic bytes do not match `"FLBK"`.
    BadMagic([u8; 4]),
    /// Record format version is unsupported.
    UnsupportedVersion(u8),
    /// xxh3-64 trailer check failed.
    IntegrityFailure { expected: u64, computed: u64 },
    /// Category tag byte is out of range.
    BadCategoryTag(u8),
    /// Transport mode tag byte is out of range.
    BadModeTag(u8),
    /// A seat byte exceeds the maximum seat number.
    BadSeat(u8),
    /// Stored seat count disagrees with the seat array.
    SeatCountMismatch { stored: u8, actual: u8 },
    /// A text field is not valid UTF-8.
    BadText(&'static str),
}

impl fmt::Display for BookingRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { expected, actual } => {
                write!(f, "record too short: expected {expected} bytes, got {actual}")
            }
            Self::BadMagic(magic) => write!(f, "bad record magic: {magic:02x?}"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported record version: {v}"),
            Self::IntegrityFailure { expected, computed } => write!(
                f,
                "record checksum mismatch: stored {expected:#018x}, computed {computed:#018x}"
            ),
            Self::BadCategoryTag(tag) => write!(f, "invalid category tag: {tag}"),
            Self::BadModeTag(tag) => write!(f, "invalid transport mode tag: {tag}"),
            Self::BadSeat(seat) => write!(f, "seat number {seat} exceeds {MAX_SEATS}"),
            Self::SeatCountMismatch { stored, actual } => {
                write!(f, "seat count mismatch: stored {stored}, counted {actual}")
            }
            Self::BadText(field) => write!(f, "field '{field}' is not valid UTF-8"),
        }
    }
}

impl std::error::Error for BookingRecordError {}
