//! The displayed departure timetable.
//!
//! The timetable is synthesized from the configured city and fare
//! tables rather than persisted: thirty daily departures cycling
//! through adjacent city pairs, alternating between available and
//! sold-out.

use farelog_types::TicketCategory;

use crate::config::SystemConfig;

/// Number of rows in the displayed timetable.
pub const SCHEDULE_DAYS: usize = 30;

/// One timetable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Departure date, `YYYY-MM-DD`.
    pub date: String,
    pub origin: String,
    pub destination: String,
    /// Standard-class train fare in rupees.
    pub standard_fare: u32,
    /// VIP-class train fare in rupees.
    pub vip_fare: u32,
    pub available: bool,
}

/// Build the thirty-day timetable from the configured tables.
#[must_use]
pub fn build_schedule(config: &SystemConfig) -> Vec<ScheduleEntry> {
    let cities = &config.cities;
    (0..SCHEDULE_DAYS)
        .map(|i| {
            let fares = &config.train_fares[i % config.train_fares.len()];
            ScheduleEntry {
                date: format!("2024-10-{:02}", i + 1),
                origin: cities[i % cities.len()].clone(),
                destination: cities[(i + 1) % cities.len()].clone(),
                standard_fare: fares.for_category(TicketCategory::Standard),
                vip_fare: fares.for_category(TicketCategory::Vip),
                available: i % 2 == 0,
            }
        })
        .collect()
}
