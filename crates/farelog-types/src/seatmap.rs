//! Per-route seat availability bitmap.

use std::fmt;

use crate::limits::MAX_SEATS;
use crate::SeatNumber;

/// Fixed-length availability bitmap for one route.
///
/// Bit `n` (0-based) corresponds to seat `n + 1`; a set bit means the
/// seat is available. Seat numbers run 1 through [`MAX_SEATS`], so
/// the map fits a single `u64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(transparent)]
pub struct SeatMap(u64);

/// Mask with one bit set per valid seat slot.
const ALL_SEATS: u64 = (1 << MAX_SEATS as u64) - 1;

impl SeatMap {
    /// A map with every seat available.
    #[must_use]
    pub const fn all_available() -> Self {
        Self(ALL_SEATS)
    }

    /// A map with every seat booked.
    #[must_use]
    pub const fn all_booked() -> Self {
        Self(0)
    }

    /// Whether the given seat is currently available.
    #[must_use]
    pub const fn is_available(self, seat: SeatNumber) -> bool {
        self.0 & seat.mask() != 0
    }

    /// Mark a seat unavailable. Idempotent.
    pub fn book(&mut self, seat: SeatNumber) {
        self.0 &= !seat.mask();
    }

    /// Mark a seat available again. Idempotent.
    pub fn free(&mut self, seat: SeatNumber) {
        self.0 |= seat.mask();
    }

    /// Number of available seats.
    #[must_use]
    pub const fn available_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate the available seats in ascending order.
    pub fn available_seats(self) -> impl Iterator<Item = SeatNumber> {
        (1..=MAX_SEATS).filter_map(SeatNumber::new).filter(move |s| self.is_available(*s))
    }
}

impl Default for SeatMap {
    fn default() -> Self {
        Self::all_available()
    }
}

impl fmt::Debug for SeatMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeatMap({available}/{max} available)", available = self.available_count(), max = MAX_SEATS)
    }
}
