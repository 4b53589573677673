//! Booking workflow engine for farelog.
//!
//! Ties the domain types, inventory, and stores together: the staged
//! [`BookingSession`] transaction, the injectable [`SystemConfig`]
//! tables, ticket id generation, fare reports, and the displayed
//! timetable. The interactive front end lives in `farelog-cli`; all
//! file I/O goes through the `farelog-store` handles passed in.

pub mod config;
pub mod idgen;
pub mod reports;
pub mod schedule;
pub mod session;
pub mod validate;

pub use config::{FarePair, LoyaltyPolicy, PromoCode, SystemConfig};
pub use idgen::{reference_number, TicketIdGenerator};
pub use reports::{popular_destinations, total_revenue, DestinationCount};
pub use schedule::{build_schedule, ScheduleEntry, SCHEDULE_DAYS};
pub use session::{BookingSession, RouteChoice};
pub use validate::validate_name;
