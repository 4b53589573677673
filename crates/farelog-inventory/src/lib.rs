//! In-memory route/seat inventory.
//!
//! The inventory is a derived cache over the booking store: a small
//! table mapping each `(origin, destination)` pair to a per-seat
//! availability bitmap. It is process-local, never persisted, and
//! rebuilt by replaying the store at startup ([`RouteInventory::seed`]).
//!
//! Route identity is the exact, case-sensitive string pair. Entries
//! are created lazily, at most once per pair, and never deleted.

use farelog_error::{FareError, Result};
use farelog_types::limits::MAX_ROUTES;
use farelog_types::{BookingRecord, SeatMap, SeatNumber};
use tracing::{debug, warn};

/// One route's availability state.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RouteEntry {
    origin: String,
    destination: String,
    seats: SeatMap,
}

/// Table of routes and their seat bitmaps.
///
/// Linear scan is fine here: the table is capped at a small fixed
/// route count and the city set is small.
#[derive(Debug, Clone)]
pub struct RouteInventory {
    routes: Vec<RouteEntry>,
    capacity: usize,
}

impl Default for RouteInventory {
    fn default() -> Self {
        Self::new(MAX_ROUTES)
    }
}

impl RouteInventory {
    /// Create an empty inventory that tracks at most `capacity` routes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            routes: Vec::new(),
            capacity,
        }
    }

    /// Number of distinct routes currently tracked.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    fn find(&self, origin: &str, destination: &str) -> Option<usize> {
        self.routes
            .iter()
            .position(|r| r.origin == origin && r.destination == destination)
    }

    /// Create the route with every seat available if it does not
    /// already exist. No effect on an existing route.
    ///
    /// Fails with [`FareError::RouteTableFull`] once the capacity is
    /// reached, rather than silently dropping the route.
    pub fn ensure_route(&mut self, origin: &str, destination: &str) -> Result<()> {
        if self.find(origin, destination).is_some() {
            return Ok(());
        }
        if self.routes.len() >= self.capacity {
            return Err(FareError::RouteTableFull { max: self.capacity });
        }
        debug!(origin, destination, "tracking new route");
        self.routes.push(RouteEntry {
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            seats: SeatMap::all_available(),
        });
        Ok(())
    }

    /// Whether `seat` is free on the given route.
    ///
    /// An unknown route answers `false`; it is not an error.
    #[must_use]
    pub fn is_seat_available(&self, origin: &str, destination: &str, seat: SeatNumber) -> bool {
        self.find(origin, destination)
            .is_some_and(|i| self.routes[i].seats.is_available(seat))
    }

    /// Mark `seat` booked. Idempotent; no-op on an unknown route.
    pub fn book_seat(&mut self, origin: &str, destination: &str, seat: SeatNumber) {
        if let Some(i) = self.find(origin, destination) {
            self.routes[i].seats.book(seat);
        }
    }

    /// Mark `seat` available again. Idempotent; no-op on an unknown
    /// route.
    pub fn free_seat(&mut self, origin: &str, destination: &str, seat: SeatNumber) {
        if let Some(i) = self.find(origin, destination) {
            self.routes[i].seats.free(seat);
        }
    }

    /// The availability bitmap for a route, if it is tracked.
    #[must_use]
    pub fn available_seats(&self, origin: &str, destination: &str) -> Option<SeatMap> {
        self.find(origin, destination).map(|i| self.routes[i].seats)
    }

    /// Rebuild availability by replaying persisted bookings.
    ///
    /// Must run once at startup, before any interactive booking, so
    /// in-memory state matches durable history. Creates each record's
    /// route on first reference and marks its assigned seats booked.
    /// Seat bytes that do not form a valid seat number are skipped
    /// with a warning; they cannot occur in records that passed
    /// decoding.
    pub fn seed(&mut self, records: &[BookingRecord]) -> Result<()> {
        for record in records {
            self.ensure_route(&record.origin, &record.destination)?;
            for &raw in record.seats.iter().filter(|&&s| s != 0) {
                match SeatNumber::new(raw) {
                    Some(seat) => self.book_seat(&record.origin, &record.destination, seat),
                    None => warn!(
                        ticket = record.ticket_id.get(),
                        seat = raw,
                        "skipping out-of-range seat while seeding"
                    ),
                }
            }
        }
        debug!(
            records = records.len(),
            routes = self.routes.len(),
            "seeded inventory from booking store"
        );
        Ok(())
    }
}
