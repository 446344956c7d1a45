use std::collections::BTreeMap;

use crate::limits::*;
use crate::model::*;

use super::property::Property;
use super::EngineError;

/// Checks that every night of `range` is listed and unreserved.
///
/// Reports the first offending night in day order.
pub(crate) fn check_bookable(
    days: &BTreeMap<Day, CalendarDay>,
    range: &NightRange,
) -> Result<(), EngineError> {
    for day in range.days() {
        match days.get(&day) {
            None => return Err(EngineError::DayNotListed(day)),
            Some(d) if !d.is_available() => return Err(EngineError::DayReserved(day)),
            Some(_) => {}
        }
    }
    Ok(())
}

/// True iff `[check_in, check_out)` could be booked on `property` right now.
pub fn is_range_available(property: &Property, range: &NightRange) -> bool {
    range
        .days()
        .all(|day| property.date_by_day(day).is_some_and(CalendarDay::is_available))
}

/// Project the full `MIN_DAY..=MAX_DAY` calendar of a property into cells.
pub fn calendar_grid(property: &Property) -> Vec<CalendarCell> {
    let multiplier = property.multiplier();
    (MIN_DAY..=MAX_DAY)
        .map(|day| match property.date_by_day(day) {
            None => CalendarCell::NotListed { day },
            Some(d) => CalendarCell::Listed {
                day,
                available: d.is_available(),
                final_price: d.final_price(multiplier),
                tier: d.tier(),
            },
        })
        .collect()
}

/// Days in `start..=end` that are listed on `property`.
pub(crate) fn listed_in(property: &Property, start: Day, end: Day) -> Vec<Day> {
    (start..=end)
        .filter(|day| property.date_by_day(*day).is_some())
        .collect()
}
