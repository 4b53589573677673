//! Fixed capacity constants shared by every farelog crate.
//!
//! These bound the persisted record layout, so changing any of them
//! requires bumping the record format version.

/// Maximum seats per route (and per booking record).
pub const MAX_SEATS: u8 = 50;

/// Maximum number of distinct routes the inventory will track.
pub const MAX_ROUTES: usize = 100;

/// Fixed width of the passenger-name field in persisted records.
pub const MAX_NAME_BYTES: usize = 50;

/// Fixed width of each city field in persisted records.
pub const MAX_CITY_BYTES: usize = 32;

/// Fixed width of the feedback-comment field.
pub const MAX_COMMENT_BYTES: usize = 200;

/// Feedback ratings are 1 through 5 inclusive.
pub const MAX_RATING: u8 = 5;

/// Fares above this earn loyalty points.
pub const MIN_LOYALTY_FARE: u32 = 1800;

/// Points credited per qualifying booking.
pub const POINTS_PER_BOOKING: u32 = 10;

/// Rupee value of one redeemed loyalty point.
pub const POINT_VALUE: u32 = 100;
