//! Aggregate views over the booking store.

use farelog_types::BookingRecord;

/// Booking count for one destination city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationCount {
    pub city: String,
    pub bookings: usize,
}

/// Per-destination booking counts, in city-table order, omitting
/// cities nobody has booked. Destinations outside the table (from
/// records written under an older city list) are ignored.
#[must_use]
pub fn popular_destinations(records: &[BookingRecord], cities: &[String]) -> Vec<DestinationCount> {
    cities
        .iter()
        .filter_map(|city| {
            let bookings = records.iter().filter(|r| r.destination == *city).count();
            (bookings > 0).then(|| DestinationCount {
                city: city.clone(),
                bookings,
            })
        })
        .collect()
}

/// Sum of all booked fares, widened so the total cannot overflow.
#[must_use]
pub fn total_revenue(records: &[BookingRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.price)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(destination: &str, price: u32) -> BookingRecord {
        BookingRecord {
            destination: destination.to_owned(),
            price,
            ..BookingRecord::default()
        }
    }

    fn cities() -> Vec<String> {
        ["Mumbai", "Delhi", "Chennai"]
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn counts_follow_city_table_order() {
        let records = vec![
            record("Chennai", 800),
            record("Delhi", 1500),
            record("Chennai", 900),
        ];
        let counts = popular_destinations(&records, &cities());
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].city, "Delhi");
        assert_eq!(counts[0].bookings, 1);
        assert_eq!(counts[1].city, "Chennai");
        assert_eq!(counts[1].bookings, 2);
    }

    #[test]
    fn zero_count_cities_are_omitted() {
        let records = vec![record("Mumbai", 1500)];
        let counts = popular_destinations(&records, &cities());
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].city, "Mumbai");
    }

    #[test]
    fn revenue_sums_all_fares() {
        let records = vec![record("Delhi", 1500), record("Chennai", 2500)];
        assert_eq!(total_revenue(&records), 4000);
        assert_eq!(total_revenue(&[]), 0);
    }

    #[test]
    fn revenue_does_not_overflow_u32() {
        let records = vec![record("Delhi", u32::MAX), record("Delhi", u32::MAX)];
        assert_eq!(total_revenue(&records), u64::from(u32::MAX) * 2);
    }
}
