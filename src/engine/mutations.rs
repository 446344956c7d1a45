use rand::Rng;
use tracing::info;

use crate::limits::*;
use crate::model::*;

use super::availability::listed_in;
use super::property::Property;
use super::{EngineError, Registry};

impl Registry {
    /// Run a mutation, logging and counting it if rejected.
    fn guarded<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let result = f(self);
        if let Err(ref e) = result {
            self.rejected(op, e);
        }
        result
    }

    fn validate_new_name(&self, name: &str) -> Result<(), EngineError> {
        if name.trim().is_empty() {
            return Err(EngineError::EmptyName);
        }
        if name.len() > MAX_NAME_LEN {
            return Err(EngineError::LimitExceeded("property name too long"));
        }
        if self.property_name_exists(name) {
            return Err(EngineError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    // ── Properties ───────────────────────────────────────────

    /// Create a property listing the valid days among `days` (out-of-range
    /// days are skipped, duplicates collapse). Returns its index.
    pub fn create_property(
        &mut self,
        name: &str,
        category: PropertyCategory,
        days: &[u32],
    ) -> Result<usize, EngineError> {
        self.guarded("create_property", |reg| {
            reg.validate_new_name(name)?;
            if days.is_empty() {
                return Err(EngineError::NoListedDays);
            }

            let mut property = Property::new(name, category);
            for &day in days {
                if let Err(e) = property.add_date(day, None) {
                    tracing::debug!(property = name, day, %e, "skipping day");
                }
            }
            if property.listed_count() == 0 {
                return Err(EngineError::NoListedDays);
            }

            let listed: Vec<Day> = property.dates().map(CalendarDay::day).collect();
            reg.properties.push(property);
            let index = reg.properties.len() - 1;
            info!(property = name, %category, days = listed.len(), index, "property created");
            reg.record(
                "create_property",
                Event::PropertyCreated {
                    property: name.to_string(),
                    category,
                    days: listed,
                },
            );
            Ok(index)
        })
    }

    pub fn change_property_name(&mut self, index: usize, new_name: &str) -> Result<(), EngineError> {
        self.guarded("change_property_name", |reg| {
            reg.property_ref(index)?;
            reg.validate_new_name(new_name)?;
            let property = reg.property_mut(index)?;
            let from = property.name().to_string();
            property.set_name(new_name.to_string());
            reg.record(
                "change_property_name",
                Event::PropertyRenamed {
                    from,
                    to: new_name.to_string(),
                },
            );
            Ok(())
        })
    }

    pub fn change_property_category(
        &mut self,
        index: usize,
        category: PropertyCategory,
    ) -> Result<(), EngineError> {
        self.guarded("change_property_category", |reg| {
            let property = reg.property_mut(index)?;
            property.set_category(category);
            let name = property.name().to_string();
            reg.record(
                "change_property_category",
                Event::CategoryChanged {
                    property: name,
                    category,
                },
            );
            Ok(())
        })
    }

    /// Remove a property. Refused while it holds any reservation.
    pub fn remove_property(&mut self, index: usize) -> Result<Property, EngineError> {
        self.guarded("remove_property", |reg| {
            if reg.property_ref(index)?.has_reservations() {
                return Err(EngineError::HasReservations(index));
            }
            let removed = reg.properties.remove(index);
            info!(property = removed.name(), index, "property removed");
            reg.record(
                "remove_property",
                Event::PropertyRemoved {
                    property: removed.name().to_string(),
                },
            );
            Ok(removed)
        })
    }

    // ── Prices ───────────────────────────────────────────────

    /// Set the base price of every listed day. Refused while the property
    /// holds any reservation.
    pub fn update_base_price(&mut self, index: usize, new_price: f64) -> Result<(), EngineError> {
        self.guarded("update_base_price", |reg| {
            let property = reg.property_mut(index)?;
            if property.has_reservations() {
                return Err(EngineError::HasReservations(index));
            }
            property.update_base_price(new_price)?;
            let name = property.name().to_string();
            reg.record(
                "update_base_price",
                Event::BasePriceUpdated {
                    property: name,
                    price: new_price,
                },
            );
            Ok(())
        })
    }

    /// Set the base price of one listed day. Refused while the property holds
    /// any reservation, like `update_base_price`.
    pub fn set_price_for_date(&mut self, index: usize, day: u32, price: f64) -> Result<(), EngineError> {
        self.guarded("set_price_for_date", |reg| {
            let day = validate_day(day)?;
            let property = reg.property_mut(index)?;
            if property.has_reservations() {
                return Err(EngineError::HasReservations(index));
            }
            property
                .date_by_day_mut(day)
                .ok_or(EngineError::DayNotListed(day))?
                .set_price(price)?;
            let name = property.name().to_string();
            reg.record(
                "set_price_for_date",
                Event::DatePriceSet {
                    property: name,
                    day,
                    price,
                },
            );
            Ok(())
        })
    }

    // ── Calendar ─────────────────────────────────────────────

    /// List `day` on a property. `Ok(false)` if it was already listed.
    pub fn add_date(&mut self, index: usize, day: u32, price: Option<f64>) -> Result<bool, EngineError> {
        self.guarded("add_date", |reg| {
            let property = reg.property_mut(index)?;
            if !property.add_date(day, price)? {
                return Ok(false);
            }
            let day = validate_day(day)?;
            let price = property
                .date_by_day(day)
                .map_or(DEFAULT_BASE_PRICE, CalendarDay::base_price);
            let name = property.name().to_string();
            reg.record(
                "add_date",
                Event::DateAdded {
                    property: name,
                    day,
                    price,
                },
            );
            Ok(true)
        })
    }

    /// Unlist `day`. Reserved days cannot be removed.
    pub fn remove_date(&mut self, index: usize, day: u32) -> Result<CalendarDay, EngineError> {
        self.guarded("remove_date", |reg| {
            let property = reg.property_mut(index)?;
            let removed = property.remove_date(day)?;
            let name = property.name().to_string();
            reg.record(
                "remove_date",
                Event::DateRemoved {
                    property: name,
                    day: removed.day(),
                },
            );
            Ok(removed)
        })
    }

    // ── Reservations ─────────────────────────────────────────

    /// Book `[check_in, check_out)` for `guest`. On failure neither the
    /// calendar nor the reservation list changes.
    pub fn add_reservation(
        &mut self,
        index: usize,
        guest: &str,
        check_in: u32,
        check_out: u32,
    ) -> Result<Reservation, EngineError> {
        self.guarded("add_reservation", |reg| {
            let reservation = Reservation::new(guest, check_in, check_out)?;
            let property = reg.property_mut(index)?;
            property.add_reservation(reservation.clone())?;
            let name = property.name().to_string();
            reg.record(
                "add_reservation",
                Event::ReservationAdded {
                    property: name,
                    reservation: reservation.clone(),
                },
            );
            Ok(reservation)
        })
    }

    /// Cancel the reservation at `reservation_index` (creation order) on a property.
    pub fn remove_reservation(
        &mut self,
        index: usize,
        reservation_index: usize,
    ) -> Result<Reservation, EngineError> {
        self.guarded("remove_reservation", |reg| {
            let property = reg.property_mut(index)?;
            let target = property
                .reservations()
                .get(reservation_index)
                .cloned()
                .ok_or(EngineError::ReservationIndexOutOfRange(reservation_index))?;
            let removed = property.remove_reservation(&target)?;
            let name = property.name().to_string();
            reg.record(
                "remove_reservation",
                Event::ReservationRemoved {
                    property: name,
                    reservation: removed.clone(),
                },
            );
            Ok(removed)
        })
    }

    // ── Environmental rates ──────────────────────────────────

    fn record_rates(&mut self, op: &'static str, index: usize, rates: Vec<(Day, f64)>) {
        let Some(property) = self.properties.get(index) else {
            return;
        };
        let name = property.name().to_string();
        self.record(op, Event::EnvironmentalRatesSet { property: name, rates });
    }

    pub fn set_environmental_rate_for_date(
        &mut self,
        index: usize,
        day: u32,
        rate: f64,
    ) -> Result<(), EngineError> {
        self.guarded("set_environmental_rate_for_date", |reg| {
            let day = validate_day(day)?;
            reg.property_mut(index)?
                .date_by_day_mut(day)
                .ok_or(EngineError::DayNotListed(day))?
                .set_environmental_rate(rate)?;
            reg.record_rates("set_environmental_rate_for_date", index, vec![(day, rate)]);
            Ok(())
        })
    }

    /// Set `rate` on every listed day. Returns how many days changed.
    pub fn set_environmental_rate_for_all_dates(&mut self, index: usize, rate: f64) -> Result<usize, EngineError> {
        self.guarded("set_environmental_rate_for_all_dates", |reg| {
            validate_rate(rate)?;
            let mut rates = Vec::new();
            for d in reg.property_mut(index)?.dates_mut() {
                d.set_environmental_rate(rate)?;
                rates.push((d.day(), rate));
            }
            let count = rates.len();
            reg.record_rates("set_environmental_rate_for_all_dates", index, rates);
            Ok(count)
        })
    }

    /// Set `rate` on the listed days within `start..=end`; unlisted days are
    /// skipped. Returns how many days changed.
    pub fn set_environmental_rate_for_range(
        &mut self,
        index: usize,
        start: u32,
        end: u32,
        rate: f64,
    ) -> Result<usize, EngineError> {
        self.guarded("set_environmental_rate_for_range", |reg| {
            let property = reg.property_ref(index)?;
            if start < u32::from(MIN_DAY) || end > u32::from(MAX_DAY) || start > end {
                return Err(EngineError::InvalidDayRange { start, end });
            }
            validate_rate(rate)?;
            let targets = listed_in(property, validate_day(start)?, validate_day(end)?);

            let property = reg.property_mut(index)?;
            let mut rates = Vec::with_capacity(targets.len());
            for day in targets {
                if let Some(d) = property.date_by_day_mut(day) {
                    d.set_environmental_rate(rate)?;
                    rates.push((day, rate));
                }
            }
            let count = rates.len();
            reg.record_rates("set_environmental_rate_for_range", index, rates);
            Ok(count)
        })
    }

    /// Draw a rate uniformly in `[MIN_ENVIRONMENTAL_RATE, MAX_ENVIRONMENTAL_RATE]`,
    /// rounded to two decimals, for every listed day. Returns the rates applied.
    pub fn randomize_environmental_rates<R: Rng>(
        &mut self,
        index: usize,
        rng: &mut R,
    ) -> Result<Vec<(Day, f64)>, EngineError> {
        self.guarded("randomize_environmental_rates", |reg| {
            let property = reg.property_mut(index)?;
            let mut rates = Vec::with_capacity(property.listed_count());
            for d in property.dates_mut() {
                let raw: f64 = rng.random_range(MIN_ENVIRONMENTAL_RATE..=MAX_ENVIRONMENTAL_RATE);
                let rate = (raw * 100.0).round() / 100.0;
                d.set_environmental_rate(rate)?;
                rates.push((d.day(), rate));
            }
            reg.record_rates("randomize_environmental_rates", index, rates.clone());
            Ok(rates)
        })
    }
}
