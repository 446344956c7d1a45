use std::collections::BTreeMap;

use tracing::debug;

use crate::model::*;

use super::availability::check_bookable;
use super::EngineError;

/// A listed property: a sparse calendar keyed by day plus the reservations booked on it.
///
/// Invariant: a day is reserved iff exactly one stored reservation covers it.
#[derive(Debug, Clone)]
pub struct Property {
    name: String,
    category: PropertyCategory,
    /// Listed days, keyed (and ordered) by day number.
    days: BTreeMap<Day, CalendarDay>,
    /// Active reservations in creation order.
    reservations: Vec<Reservation>,
}

impl Property {
    pub fn new(name: impl Into<String>, category: PropertyCategory) -> Self {
        Self {
            name: name.into(),
            category,
            days: BTreeMap::new(),
            reservations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn category(&self) -> PropertyCategory {
        self.category
    }

    pub(crate) fn set_category(&mut self, category: PropertyCategory) {
        self.category = category;
    }

    pub fn multiplier(&self) -> f64 {
        self.category.multiplier()
    }

    // ── Calendar ─────────────────────────────────────────────

    /// List `day`, optionally at a non-default price.
    ///
    /// Returns `Ok(false)` without touching the calendar when the day is already listed.
    pub fn add_date(&mut self, day: u32, initial_price: Option<f64>) -> Result<bool, EngineError> {
        let mut entry = CalendarDay::new(day)?;
        if let Some(price) = initial_price {
            entry.set_price(price)?;
        }
        if self.days.contains_key(&entry.day()) {
            debug!(property = %self.name, day, "date already listed");
            return Ok(false);
        }
        self.days.insert(entry.day(), entry);
        Ok(true)
    }

    /// Unlist `day`. Reserved days cannot be removed.
    pub fn remove_date(&mut self, day: u32) -> Result<CalendarDay, EngineError> {
        let day = validate_day(day)?;
        match self.days.get(&day) {
            None => Err(EngineError::DayNotListed(day)),
            Some(d) if !d.is_available() => Err(EngineError::DayReserved(day)),
            Some(_) => self.days.remove(&day).ok_or(EngineError::DayNotListed(day)),
        }
    }

    pub fn date_by_day(&self, day: Day) -> Option<&CalendarDay> {
        self.days.get(&day)
    }

    pub(crate) fn date_by_day_mut(&mut self, day: Day) -> Option<&mut CalendarDay> {
        self.days.get_mut(&day)
    }

    /// All listed days in day order.
    pub fn dates(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.values()
    }

    pub(crate) fn dates_mut(&mut self) -> impl Iterator<Item = &mut CalendarDay> {
        self.days.values_mut()
    }

    pub fn listed_count(&self) -> usize {
        self.days.len()
    }

    pub fn available_dates(&self) -> Vec<&CalendarDay> {
        self.days.values().filter(|d| d.is_available()).collect()
    }

    /// Set the base price of every listed day. The value is validated once,
    /// so either every day changes or none does.
    ///
    /// Does not look at reservations; the registry refuses this while any exist.
    pub fn update_base_price(&mut self, new_price: f64) -> Result<(), EngineError> {
        validate_price(new_price)?;
        for d in self.days.values_mut() {
            d.set_price(new_price)?;
        }
        Ok(())
    }

    // ── Reservations ─────────────────────────────────────────

    /// Book every night of `reservation`. All-or-nothing: if any night is
    /// unlisted or already reserved, nothing changes.
    pub fn add_reservation(&mut self, reservation: Reservation) -> Result<(), EngineError> {
        let range = reservation.range();
        check_bookable(&self.days, &range)?;

        for day in range.days() {
            if let Some(d) = self.days.get_mut(&day) {
                d.book();
            }
        }
        self.reservations.push(reservation);
        Ok(())
    }

    /// Remove the stored reservation equal to `reservation` (guest, check-in and
    /// check-out) and release its nights.
    pub fn remove_reservation(&mut self, reservation: &Reservation) -> Result<Reservation, EngineError> {
        let pos = self
            .reservations
            .iter()
            .position(|r| r == reservation)
            .ok_or(EngineError::ReservationNotFound)?;
        let removed = self.reservations.remove(pos);
        for day in removed.range().days() {
            if let Some(d) = self.days.get_mut(&day) {
                d.unbook();
            }
        }
        Ok(removed)
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn has_reservations(&self) -> bool {
        !self.reservations.is_empty()
    }
}
