//! Loyalty-point ledger records, keyed by passenger name.

use std::fmt;

use xxhash_rust::xxh3::xxh3_64;

use crate::encoding::{
    append_padded_text, append_u32_le, append_u64_le, read_padded_text, read_u32_le, read_u64_le,
};
use crate::limits::MAX_NAME_BYTES;

/// Magic bytes opening a loyalty record (`"FLLP"`).
pub const LOYALTY_RECORD_MAGIC: [u8; 4] = *b"FLLP";

/// Current loyalty record format version.
pub const LOYALTY_RECORD_VERSION: u8 = 1;

/// Total encoded size of one loyalty record.
pub const LOYALTY_RECORD_SIZE: usize = 4 + 1 + 3 + 4 + MAX_NAME_BYTES + 8;

const CHECKSUM_OFFSET: usize = LOYALTY_RECORD_SIZE - 8;

/// One passenger's accumulated points.
///
/// Name matching is byte-exact: the ledger is keyed by the name as
/// entered at booking time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoyaltyAccount {
    pub name: String,
    pub points: u32,
}

impl LoyaltyAccount {
    /// Serialize into the fixed loyalty layout.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(LOYALTY_RECORD_SIZE);
        buf.extend_from_slice(&LOYALTY_RECORD_MAGIC);
        buf.push(LOYALTY_RECORD_VERSION);
        buf.extend_from_slice(&[0, 0, 0]); // reserved
        append_u32_le(&mut buf, self.points);
        append_padded_text(&mut buf, &self.name, MAX_NAME_BYTES);

        debug_assert_eq!(buf.len(), CHECKSUM_OFFSET);
        let checksum = xxh3_64(&buf);
        append_u64_le(&mut buf, checksum);
        buf
    }

    /// Deserialize and validate one loyalty record.
    pub fn from_bytes(data: &[u8]) -> Result<Self, LoyaltyRecordError> {
        if data.len() < LOYALTY_RECORD_SIZE {
            return Err(LoyaltyRecordError::TooShort {
                expected: LOYALTY_RECORD_SIZE,
                actual: data.len(),
            });
        }
        let data = &data[..LOYALTY_RECORD_SIZE];

        let magic: [u8; 4] = data[0..4].try_into().expect("slice length 4");
        if magic != LOYALTY_RECORD_MAGIC {
            return Err(LoyaltyRecordError::BadMagic(magic));
        }
        if data[4] != LOYALTY_RECORD_VERSION {
            return Err(LoyaltyRecordError::UnsupportedVersion(data[4]));
        }

        let expected = read_u64_le(&data[CHECKSUM_OFFSET..]).expect("8-byte trailer");
        let computed = xxh3_64(&data[..CHECKSUM_OFFSET]);
        if expected != computed {
            return Err(LoyaltyRecordError::IntegrityFailure { expected, computed });
        }

        let points = read_u32_le(&data[8..12]).expect("4-byte field");
        let name = read_padded_text(&data[12..CHECKSUM_OFFSET])
            .ok_or(LoyaltyRecordError::BadText("name"))?;

        Ok(Self { name, points })
    }
}

/// Validation error when deserializing a [`LoyaltyAccount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoyaltyRecordError {
    TooShort { expected: usize, actual: usize },
    BadMagic([u8; 4]),
    UnsupportedVersion(u8),
    IntegrityFailure { expected: u64, computed: u64 },
    BadText(&'static str),
}

impl fmt::Display for LoyaltyRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { expected, actual } => {
                write!(f, "loyalty record too short: expected {expected} bytes, got {actual}")
            }
            Self::BadMagic(magic) => write!(f, "bad loyalty magic: {magic:02x?}"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported loyalty version: {v}"),
            Self::IntegrityFailure { expected, computed } => write!(
                f,
                "loyalty checksum mismatch: stored {expected:#018x}, computed {computed:#018x}"
            ),
            Self::BadText(field) => write!(f, "field '{field}' is not valid UTF-8"),
        }
    }
}

impl std::error::Error for LoyaltyRecordError {}
