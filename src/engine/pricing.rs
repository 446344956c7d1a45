//! Price computation over a property's calendar.
//!
//! Reservations hold no reference to their property; every price is looked up
//! on the property passed in. `Reservation::total_price` and
//! `Reservation::nightly_breakdown` differ on missing nights:
//! the total collapses to zero, the breakdown zeroes only that night.

use crate::model::*;

use super::property::Property;

impl Reservation {
    /// Sum of the final nightly prices of `[check_in, check_out)` on `property`.
    ///
    /// Returns `0.0` for the whole stay if any night is not listed.
    pub fn total_price(&self, property: &Property) -> f64 {
        let multiplier = property.multiplier();
        self.range()
            .days()
            .map(|day| property.date_by_day(day).map(|d| d.final_price(multiplier)))
            .sum::<Option<f64>>()
            .unwrap_or(0.0)
    }

    /// Final price of each night, in order; an unlisted night prices at `0.0`.
    pub fn nightly_breakdown(&self, property: &Property) -> Vec<f64> {
        nightly_prices(property, &self.range())
    }

    pub fn quote(&self, property: &Property) -> PriceQuote {
        PriceQuote {
            guest: Some(self.guest_name().to_string()),
            check_in: self.check_in(),
            check_out: self.check_out(),
            nights: self.nights(),
            nightly: self.nightly_breakdown(property),
            total: self.total_price(property),
        }
    }
}

impl Property {
    /// Sum of final prices over every reserved day.
    pub fn estimated_earnings(&self) -> f64 {
        let multiplier = self.multiplier();
        self.dates()
            .filter(|d| !d.is_available())
            .map(|d| d.final_price(multiplier))
            .sum()
    }
}

pub(crate) fn nightly_prices(property: &Property, range: &NightRange) -> Vec<f64> {
    let multiplier = property.multiplier();
    range
        .days()
        .map(|day| {
            property
                .date_by_day(day)
                .map_or(0.0, |d| d.final_price(multiplier))
        })
        .collect()
}

/// Quote an arbitrary range without booking it. Same zero-fallback as `total_price`.
pub fn quote_range(property: &Property, range: &NightRange) -> PriceQuote {
    let nightly = nightly_prices(property, range);
    let all_listed = range.days().all(|day| property.date_by_day(day).is_some());
    let total = if all_listed { nightly.iter().sum() } else { 0.0 };
    PriceQuote {
        guest: None,
        check_in: range.check_in(),
        check_out: range.check_out(),
        nights: range.nights(),
        nightly,
        total,
    }
}
