//! Append-only passenger feedback records.

use std::fmt;

use xxhash_rust::xxh3::xxh3_64;

use crate::encoding::{
    append_padded_text, append_u32_le, append_u64_le, read_padded_text, read_u32_le, read_u64_le,
};
use crate::limits::{MAX_COMMENT_BYTES, MAX_NAME_BYTES, MAX_RATING};
use crate::TicketId;

/// Magic bytes opening a feedback record (`"FLFB"`).
pub const FEEDBACK_RECORD_MAGIC: [u8; 4] = *b"FLFB";

/// Current feedback record format version.
pub const FEEDBACK_RECORD_VERSION: u8 = 1;

/// Total encoded size of one feedback record.
pub const FEEDBACK_RECORD_SIZE: usize = 4 + 1 + 1 + 2 + 4 + MAX_NAME_BYTES + MAX_COMMENT_BYTES + 8;

const CHECKSUM_OFFSET: usize = FEEDBACK_RECORD_SIZE - 8;

/// One rating-plus-comment entry tied to a booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeedbackRecord {
    pub ticket_id: TicketId,
    pub name: String,
    /// 1 through 5.
    pub rating: u8,
    pub comment: String,
}

impl FeedbackRecord {
    /// Serialize into the fixed feedback layout.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(FEEDBACK_RECORD_SIZE);
        buf.extend_from_slice(&FEEDBACK_RECORD_MAGIC);
        buf.push(FEEDBACK_RECORD_VERSION);
        buf.push(self.rating);
        buf.extend_from_slice(&[0, 0]); // reserved
        append_u32_le(&mut buf, self.ticket_id.get());
        append_padded_text(&mut buf, &self.name, MAX_NAME_BYTES);
        append_padded_text(&mut buf, &self.comment, MAX_COMMENT_BYTES);

        debug_assert_eq!(buf.len(), CHECKSUM_OFFSET);
        let checksum = xxh3_64(&buf);
        append_u64_le(&mut buf, checksum);
        buf
    }

    /// Deserialize and validate one feedback record.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FeedbackRecordError> {
        if data.len() < FEEDBACK_RECORD_SIZE {
            return Err(FeedbackRecordError::TooShort {
                expected: FEEDBACK_RECORD_SIZE,
                actual: data.len(),
            });
        }
        let data = &data[..FEEDBACK_RECORD_SIZE];

        let magic: [u8; 4] = data[0..4].try_into().expect("slice length 4");
        if magic != FEEDBACK_RECORD_MAGIC {
            return Err(FeedbackRecordError::BadMagic(magic));
        }
        if data[4] != FEEDBACK_RECORD_VERSION {
            return Err(FeedbackRecordError::UnsupportedVersion(data[4]));
        }

        let expected = read_u64_le(&data[CHECKSUM_OFFSET..]).expect("8-byte trailer");
        let computed = xxh3_64(&data[..CHECKSUM_OFFSET]);
        if expected != computed {
            return Err(FeedbackRecordError::IntegrityFailure { expected, computed });
        }

        let rating = data[5];
        if rating == 0 || rating > MAX_RATING {
            return Err(FeedbackRecordError::BadRating(rating));
        }
        let ticket_id = TicketId::new(read_u32_le(&data[8..12]).expect("4-byte field"));
        let name = read_padded_text(&data[12..12 + MAX_NAME_BYTES])
            .ok_or(FeedbackRecordError::BadText("name"))?;
        let comment = read_padded_text(&data[12 + MAX_NAME_BYTES..CHECKSUM_OFFSET])
            .ok_or(FeedbackRecordError::BadText("comment"))?;

        Ok(Self {
            ticket_id,
            name,
            rating,
            comment,
        })
    }
}

/// Validation error when deserializing a [`FeedbackRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackRecordError {
    TooShort { expected: usize, actual: usize },
    BadMagic([u8; 4]),
    UnsupportedVersion(u8),
    IntegrityFailure { expected: u64, computed: u64 },
    BadRating(u8),
    BadText(&'static str),
}

impl fmt::Display for FeedbackRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { expected, actual } => {
                write!(f, "feedback record too short: expected {expected} bytes, got {actual}")
            }
            Self::BadMagic(magic) => write!(f, "bad feedback magic: {magic:02x?}"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported feedback version: {v}"),
            Self::IntegrityFailure { expected, computed } => write!(
                f,
                "feedback checksum mismatch: stored {expected:#018x}, computed {computed:#018x}"
            ),
            Self::BadRating(r) => write!(f, "rating {r} outside 1-{MAX_RATING}"),
            Self::BadText(field) => write!(f, "field '{field}' is not valid UTF-8"),
        }
    }
}

impl std::error::Error for FeedbackRecordError {}
