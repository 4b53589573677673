//! Runtime configuration: city table, fare tables, promo codes, and
//! the loyalty policy.
//!
//! All of it lives in one explicit struct, constructed once and
//! passed into the components that need it, so tests can substitute
//! synthetic tables.

use farelog_error::{FareError, Result};
use farelog_types::{TicketCategory, TransportMode};

/// Standard/VIP fare pair for one origin city, in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FarePair {
    pub standard: u32,
    pub vip: u32,
}

impl FarePair {
    /// Fare for the given category.
    #[must_use]
    pub const fn for_category(self, category: TicketCategory) -> u32 {
        match category {
            TicketCategory::Standard => self.standard,
            TicketCategory::Vip => self.vip,
        }
    }
}

/// A promotional code and its percentage discount.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PromoCode {
    pub code: String,
    pub discount_percent: u32,
}

/// Loyalty-point accrual and redemption rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoyaltyPolicy {
    /// Fares above this earn points.
    pub min_fare: u32,
    /// Points credited per qualifying booking.
    pub points_per_booking: u32,
    /// Rupee value of one redeemed point.
    pub point_value: u32,
}

impl LoyaltyPolicy {
    /// Points earned by a booking at the given fare, if any.
    #[must_use]
    pub const fn points_earned(&self, fare: u32) -> Option<u32> {
        if fare > self.min_fare {
            Some(self.points_per_booking)
        } else {
            None
        }
    }

    /// Rupee discount for redeeming `points`.
    #[must_use]
    pub const fn redemption_value(&self, points: u32) -> u32 {
        points * self.point_value
    }
}

/// The full injectable system configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SystemConfig {
    /// Serviced cities; routes and fares index into this table.
    pub cities: Vec<String>,
    /// Per-origin train fares, parallel to `cities`.
    pub train_fares: Vec<FarePair>,
    /// Per-origin bus fares, parallel to `cities`.
    pub bus_fares: Vec<FarePair>,
    pub promo_codes: Vec<PromoCode>,
    pub loyalty: LoyaltyPolicy,
}

impl Default for SystemConfig {
    /// The production tables: ten Indian cities with fixed fares.
    fn default() -> Self {
        let cities = [
            "Mumbai", "Delhi", "Bangalore", "Hyderabad", "Chennai", "Kolkata", "Jaipur",
            "Ahmedabad", "Pune", "Lucknow",
        ]
        .map(str::to_owned)
        .to_vec();

        let train_fares = [
            (1500, 2500),
            (1300, 2300),
            (1200, 2200),
            (1100, 2100),
            (1150, 2150),
            (1250, 2250),
            (1400, 2400),
            (1350, 2350),
            (1600, 2600),
            (900, 1900),
        ]
        .map(|(standard, vip)| FarePair { standard, vip })
        .to_vec();

        let bus_fares = [
            (800, 1500),
            (700, 1200),
            (600, 1100),
            (550, 1000),
            (600, 1100),
            (650, 1200),
            (700, 1300),
            (650, 1250),
            (800, 1400),
            (500, 1000),
        ]
        .map(|(standard, vip)| FarePair { standard, vip })
        .to_vec();

        let promo_codes = [("CLUBGAMMA", 20), ("CHARUSAT", 15), ("HECTOBERFEST", 10)]
            .map(|(code, discount_percent)| PromoCode {
                code: code.to_owned(),
                discount_percent,
            })
            .to_vec();

        Self {
            cities,
            train_fares,
            bus_fares,
            promo_codes,
            loyalty: LoyaltyPolicy {
                min_fare: 1800,
                points_per_booking: 10,
                point_value: 100,
            },
        }
    }
}

impl SystemConfig {
    /// Index of `name` in the city table. Matching is ASCII
    /// case-insensitive so typed input need not match table casing.
    #[must_use]
    pub fn city_index(&self, name: &str) -> Option<usize> {
        self.cities.iter().position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Resolve `name` to its canonical table spelling.
    pub fn resolve_city(&self, name: &str) -> Result<&str> {
        self.city_index(name)
            .map(|i| self.cities[i].as_str())
            .ok_or_else(|| FareError::UnknownCity {
                name: name.to_owned(),
            })
    }

    /// Base one-way fare for a booking out of `origin`.
    pub fn base_fare(
        &self,
        mode: TransportMode,
        origin: &str,
        category: TicketCategory,
    ) -> Result<u32> {
        let index = self.city_index(origin).ok_or_else(|| FareError::UnknownCity {
            name: origin.to_owned(),
        })?;
        let table = match mode {
            TransportMode::Train => &self.train_fares,
            TransportMode::Bus => &self.bus_fares,
        };
        Ok(table[index].for_category(category))
    }

    /// Percentage discount for a promo code, or an error for an
    /// unknown code.
    pub fn promo_discount(&self, code: &str) -> Result<u32> {
        self.promo_codes
            .iter()
            .find(|p| p.code == code)
            .map(|p| p.discount_percent)
            .ok_or_else(|| FareError::InvalidPromoCode {
                code: code.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_are_parallel() {
        let config = SystemConfig::default();
        assert_eq!(config.cities.len(), 10);
        assert_eq!(config.train_fares.len(), config.cities.len());
        assert_eq!(config.bus_fares.len(), config.cities.len());
    }

    #[test]
    fn city_lookup_is_case_insensitive() {
        let config = SystemConfig::default();
        assert_eq!(config.city_index("mumbai"), Some(0));
        assert_eq!(config.city_index("DELHI"), Some(1));
        assert_eq!(config.city_index("Atlantis"), None);
        assert_eq!(config.resolve_city("pune").unwrap(), "Pune");
    }

    #[test]
    fn fares_by_mode_and_category() {
        let config = SystemConfig::default();
        assert_eq!(
            config
                .base_fare(TransportMode::Train, "Mumbai", TicketCategory::Standard)
                .unwrap(),
            1500
        );
        assert_eq!(
            config
                .base_fare(TransportMode::Train, "Mumbai", TicketCategory::Vip)
                .unwrap(),
            2500
        );
        assert_eq!(
            config
                .base_fare(TransportMode::Bus, "Lucknow", TicketCategory::Standard)
                .unwrap(),
            500
        );
    }

    #[test]
    fn promo_codes_resolve() {
        let config = SystemConfig::default();
        assert_eq!(config.promo_discount("CLUBGAMMA").unwrap(), 20);
        let err = config.promo_discount("BOGUS").unwrap_err();
        assert!(err.is_user_error());
    }

    #[test]
    fn loyalty_policy_thresholds() {
        let policy = SystemConfig::default().loyalty;
        assert_eq!(policy.points_earned(1800), None);
        assert_eq!(policy.points_earned(1801), Some(10));
        assert_eq!(policy.redemption_value(3), 300);
    }
}
