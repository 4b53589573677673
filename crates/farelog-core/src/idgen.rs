//! Ticket identifiers and booking reference numbers.

use std::time::{SystemTime, UNIX_EPOCH};

use farelog_types::TicketId;
use rand::Rng;

/// Generates ticket ids with the historical time-seeded scheme:
/// `(unix_time % 1234) | counter`.
///
/// This is NOT collision-free: ids repeat across runs whenever the
/// clock residue lines up, and OR-ing the counter can collide with
/// other residues within a run. Preserved for behavioral parity with
/// existing stores; a replacement would persist a monotonic counter
/// alongside the booking store.
#[derive(Debug)]
pub struct TicketIdGenerator {
    counter: u32,
    clock: fn() -> u64,
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

impl Default for TicketIdGenerator {
    fn default() -> Self {
        Self {
            counter: 0,
            clock: unix_seconds,
        }
    }
}

impl TicketIdGenerator {
    /// A generator starting at counter 0, reading the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn with_clock(clock: fn() -> u64) -> Self {
        Self { counter: 0, clock }
    }

    /// Produce the next ticket id.
    pub fn next_id(&mut self) -> TicketId {
        #[allow(clippy::cast_possible_truncation)]
        let residue = ((self.clock)() % 1234) as u32;
        let id = residue | self.counter;
        self.counter += 1;
        TicketId::new(id)
    }
}

/// Human-facing reference number printed on the receipt:
/// `REF-<ticket id>-<3-digit suffix>`.
#[must_use]
pub fn reference_number(ticket_id: TicketId) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("REF-{ticket_id}-{suffix:03}")
}
