use crate::model::*;

use super::availability::{calendar_grid, is_range_available};
use super::pricing::quote_range;
use super::property::Property;
use super::{EngineError, Registry};

impl Registry {
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn property(&self, index: usize) -> Option<&Property> {
        self.properties.get(index)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    /// Exact, case-sensitive match against every property name.
    pub fn property_name_exists(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name() == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name() == name)
    }

    /// False for an unknown index.
    pub fn has_reservations(&self, index: usize) -> bool {
        self.properties
            .get(index)
            .is_some_and(Property::has_reservations)
    }

    /// Reservations of a property in creation order; empty for an unknown index.
    pub fn reservations_for_property(&self, index: usize) -> Vec<Reservation> {
        self.properties
            .get(index)
            .map(|p| p.reservations().to_vec())
            .unwrap_or_default()
    }

    pub fn reservation_count(&self) -> usize {
        self.properties.iter().map(|p| p.reservations().len()).sum()
    }

    /// True iff every night of `[check_in, check_out)` is listed and free.
    /// False for an unknown index or an invalid range.
    pub fn are_dates_available(&self, index: usize, check_in: u32, check_out: u32) -> bool {
        let Some(property) = self.properties.get(index) else {
            return false;
        };
        NightRange::new(check_in, check_out).is_ok_and(|range| is_range_available(property, &range))
    }

    pub fn estimated_earnings(&self, index: usize) -> Result<f64, EngineError> {
        Ok(self.property_ref(index)?.estimated_earnings())
    }

    pub fn calendar(&self, index: usize) -> Result<Vec<CalendarCell>, EngineError> {
        Ok(calendar_grid(self.property_ref(index)?))
    }

    /// Price breakdown of an existing reservation.
    pub fn quote(&self, index: usize, reservation_index: usize) -> Result<PriceQuote, EngineError> {
        let property = self.property_ref(index)?;
        let reservation = property
            .reservations()
            .get(reservation_index)
            .ok_or(EngineError::ReservationIndexOutOfRange(reservation_index))?;
        Ok(reservation.quote(property))
    }

    /// Price a prospective stay without booking it.
    pub fn quote_range(&self, index: usize, check_in: u32, check_out: u32) -> Result<PriceQuote, EngineError> {
        let property = self.property_ref(index)?;
        let range = NightRange::new(check_in, check_out)?;
        Ok(quote_range(property, &range))
    }

    pub fn property_info(&self, index: usize) -> Result<PropertyInfo, EngineError> {
        let p = self.property_ref(index)?;
        Ok(PropertyInfo {
            index,
            name: p.name().to_string(),
            category: p.category(),
            multiplier: p.multiplier(),
            listed_days: p.listed_count(),
            available_days: p.available_dates().len(),
            reservations: p.reservations().len(),
            estimated_earnings: p.estimated_earnings(),
        })
    }

    pub fn snapshot(&self) -> Vec<PropertyInfo> {
        (0..self.properties.len())
            .filter_map(|i| self.property_info(i).ok())
            .collect()
    }
}
