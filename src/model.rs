use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::limits::*;

/// Day of the month, `MIN_DAY..=MAX_DAY`. The only date type.
pub type Day = u8;

pub(crate) fn validate_day(day: u32) -> Result<Day, EngineError> {
    match Day::try_from(day) {
        Ok(d) if (MIN_DAY..=MAX_DAY).contains(&d) => Ok(d),
        _ => Err(EngineError::InvalidDay(day)),
    }
}

/// Half-open night range `[check_in, check_out)`. Only built through
/// `NightRange::new`, so `check_in < check_out` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNightRange")]
pub struct NightRange {
    check_in: Day,
    check_out: Day,
}

#[derive(Deserialize)]
struct RawNightRange {
    check_in: u32,
    check_out: u32,
}

impl TryFrom<RawNightRange> for NightRange {
    type Error = EngineError;

    fn try_from(raw: RawNightRange) -> Result<Self, Self::Error> {
        NightRange::new(raw.check_in, raw.check_out)
    }
}

impl NightRange {
    /// Build a range, rejecting `check_out <= check_in` and days outside the calendar.
    pub fn new(check_in: u32, check_out: u32) -> Result<Self, EngineError> {
        if check_out <= check_in {
            return Err(EngineError::InvalidRange { check_in, check_out });
        }
        let check_in = validate_day(check_in)?;
        let check_out = validate_day(check_out)?;
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> Day {
        self.check_in
    }

    pub fn check_out(&self) -> Day {
        self.check_out
    }

    pub fn nights(&self) -> usize {
        usize::from(self.check_out - self.check_in)
    }

    /// Every night covered, in order.
    pub fn days(&self) -> impl Iterator<Item = Day> + use<> {
        self.check_in..self.check_out
    }
}

/// Kind of property. Each carries a fixed multiplier over the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyCategory {
    EcoApartment,
    SustainableHouse,
    GreenResort,
    EcoGlamping,
}

impl PropertyCategory {
    pub const ALL: [PropertyCategory; 4] = [
        PropertyCategory::EcoApartment,
        PropertyCategory::SustainableHouse,
        PropertyCategory::GreenResort,
        PropertyCategory::EcoGlamping,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            PropertyCategory::EcoApartment => 1.00,
            PropertyCategory::SustainableHouse => 1.20,
            PropertyCategory::GreenResort => 1.35,
            PropertyCategory::EcoGlamping => 1.50,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PropertyCategory::EcoApartment => "Eco-Apartment",
            PropertyCategory::SustainableHouse => "Sustainable House",
            PropertyCategory::GreenResort => "Green Resort",
            PropertyCategory::EcoGlamping => "Eco-Glamping",
        }
    }

    /// Map a 1-based menu choice to a category.
    pub fn from_choice(choice: u32) -> Option<Self> {
        let idx = usize::try_from(choice).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }
}

impl std::fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Environmental rate classification: below, at, or above 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateTier {
    Green,
    Neutral,
    Elevated,
}

impl RateTier {
    pub fn of(rate: f64) -> Self {
        // Truncated whole percent.
        let percent = (rate * 100.0) as i64;
        match percent.cmp(&100) {
            std::cmp::Ordering::Less => RateTier::Green,
            std::cmp::Ordering::Equal => RateTier::Neutral,
            std::cmp::Ordering::Greater => RateTier::Elevated,
        }
    }
}

/// One bookable day on a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarDay")]
pub struct CalendarDay {
    day: Day,
    base_price: f64,
    environmental_rate: f64,
    reserved: bool,
}

#[derive(Deserialize)]
struct RawCalendarDay {
    day: u32,
    base_price: f64,
    environmental_rate: f64,
    reserved: bool,
}

impl TryFrom<RawCalendarDay> for CalendarDay {
    type Error = EngineError;

    fn try_from(raw: RawCalendarDay) -> Result<Self, Self::Error> {
        let mut d = CalendarDay::with_price(raw.day, raw.base_price)?;
        d.set_environmental_rate(raw.environmental_rate)?;
        d.reserved = raw.reserved;
        Ok(d)
    }
}

impl CalendarDay {
    /// A day at the default price and rate, available.
    pub fn new(day: u32) -> Result<Self, EngineError> {
        let day = validate_day(day)?;
        Ok(Self {
            day,
            base_price: DEFAULT_BASE_PRICE,
            environmental_rate: DEFAULT_ENVIRONMENTAL_RATE,
            reserved: false,
        })
    }

    pub fn with_price(day: u32, price: f64) -> Result<Self, EngineError> {
        let mut d = Self::new(day)?;
        d.set_price(price)?;
        Ok(d)
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn environmental_rate(&self) -> f64 {
        self.environmental_rate
    }

    pub fn is_available(&self) -> bool {
        !self.reserved
    }

    pub fn tier(&self) -> RateTier {
        RateTier::of(self.environmental_rate)
    }

    /// Rejects anything below `MIN_PRICE` (and non-finite values); price is left unchanged.
    pub fn set_price(&mut self, value: f64) -> Result<(), EngineError> {
        validate_price(value)?;
        self.base_price = value;
        Ok(())
    }

    /// Rejects anything outside `[MIN_ENVIRONMENTAL_RATE, MAX_ENVIRONMENTAL_RATE]`.
    pub fn set_environmental_rate(&mut self, value: f64) -> Result<(), EngineError> {
        validate_rate(value)?;
        self.environmental_rate = value;
        Ok(())
    }

    /// `base_price × category_multiplier × environmental_rate`.
    pub fn final_price(&self, category_multiplier: f64) -> f64 {
        self.base_price * category_multiplier * self.environmental_rate
    }

    // Only the owning property calls these, and only once the range is validated.
    pub(crate) fn book(&mut self) {
        self.reserved = true;
    }

    pub(crate) fn unbook(&mut self) {
        self.reserved = false;
    }
}

pub(crate) fn validate_price(value: f64) -> Result<(), EngineError> {
    if !value.is_finite() || value < MIN_PRICE {
        return Err(EngineError::InvalidPrice(value));
    }
    Ok(())
}

pub(crate) fn validate_rate(value: f64) -> Result<(), EngineError> {
    if !(MIN_ENVIRONMENTAL_RATE..=MAX_ENVIRONMENTAL_RATE).contains(&value) {
        return Err(EngineError::InvalidRate(value));
    }
    Ok(())
}

/// A guest's claim on `[check_in, check_out)`. Immutable; compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawReservation")]
pub struct Reservation {
    guest_name: String,
    range: NightRange,
}

#[derive(Deserialize)]
struct RawReservation {
    guest_name: String,
    range: RawNightRange,
}

impl TryFrom<RawReservation> for Reservation {
    type Error = EngineError;

    fn try_from(raw: RawReservation) -> Result<Self, Self::Error> {
        Reservation::new(raw.guest_name, raw.range.check_in, raw.range.check_out)
    }
}

impl Reservation {
    pub fn new(guest_name: impl Into<String>, check_in: u32, check_out: u32) -> Result<Self, EngineError> {
        let guest_name = guest_name.into();
        if guest_name.trim().is_empty() {
            return Err(EngineError::EmptyGuestName);
        }
        if guest_name.len() > MAX_GUEST_NAME_LEN {
            return Err(EngineError::LimitExceeded("guest name too long"));
        }
        let range = NightRange::new(check_in, check_out)?;
        Ok(Self { guest_name, range })
    }

    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }

    pub fn check_in(&self) -> Day {
        self.range.check_in()
    }

    pub fn check_out(&self) -> Day {
        self.range.check_out()
    }

    pub fn range(&self) -> NightRange {
        self.range
    }

    pub fn nights(&self) -> usize {
        self.range.nights()
    }
}

/// Record of one applied registry mutation. Properties are keyed by name
/// because indices shift when a property is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    PropertyCreated {
        property: String,
        category: PropertyCategory,
        days: Vec<Day>,
    },
    PropertyRenamed {
        from: String,
        to: String,
    },
    CategoryChanged {
        property: String,
        category: PropertyCategory,
    },
    PropertyRemoved {
        property: String,
    },
    DateAdded {
        property: String,
        day: Day,
        price: f64,
    },
    DateRemoved {
        property: String,
        day: Day,
    },
    DatePriceSet {
        property: String,
        day: Day,
        price: f64,
    },
    BasePriceUpdated {
        property: String,
        price: f64,
    },
    EnvironmentalRatesSet {
        property: String,
        rates: Vec<(Day, f64)>,
    },
    ReservationAdded {
        property: String,
        reservation: Reservation,
    },
    ReservationRemoved {
        property: String,
        reservation: Reservation,
    },
}

// ── Query result types ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub index: usize,
    pub name: String,
    pub category: PropertyCategory,
    pub multiplier: f64,
    pub listed_days: usize,
    pub available_days: usize,
    pub reservations: usize,
    pub estimated_earnings: f64,
}

/// One cell of the 30-day calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalendarCell {
    NotListed {
        day: Day,
    },
    Listed {
        day: Day,
        available: bool,
        final_price: f64,
        tier: RateTier,
    },
}

impl CalendarCell {
    pub fn day(&self) -> Day {
        match self {
            CalendarCell::NotListed { day } | CalendarCell::Listed { day, .. } => *day,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub guest: Option<String>,
    pub check_in: Day,
    pub check_out: Day,
    pub nights: usize,
    pub nightly: Vec<f64>,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn night_range_basics() {
        let r = NightRange::new(3, 5).unwrap();
        assert_eq!(r.nights(), 2);
        assert_eq!(r.check_in(), 3);
        assert_eq!(r.check_out(), 5);
        assert_eq!(r.days().collect::<Vec<_>>(), vec![3, 4]); // half-open
    }

    #[test]
    fn night_range_rejects_inverted_and_empty() {
        assert!(matches!(
            NightRange::new(5, 5),
            Err(EngineError::InvalidRange { check_in: 5, check_out: 5 })
        ));
        assert!(matches!(NightRange::new(6, 2), Err(EngineError::InvalidRange { .. })));
    }

    #[test]
    fn night_range_rejects_out_of_calendar() {
        assert!(matches!(NightRange::new(0, 3), Err(EngineError::InvalidDay(0))));
        assert!(matches!(NightRange::new(29, 31), Err(EngineError::InvalidDay(31))));
        assert!(NightRange::new(1, 30).is_ok());
    }

    #[test]
    fn night_range_json_is_validated() {
        let r: NightRange = serde_json::from_str(r#"{"check_in":2,"check_out":4}"#).unwrap();
        assert_eq!(r.nights(), 2);
        assert!(serde_json::from_str::<NightRange>(r#"{"check_in":9,"check_out":2}"#).is_err());
        assert!(serde_json::from_str::<NightRange>(r#"{"check_in":0,"check_out":2}"#).is_err());
        assert!(serde_json::from_str::<NightRange>(r#"{"check_in":2,"check_out":300}"#).is_err());
    }

    #[test]
    fn category_multipliers() {
        assert_eq!(PropertyCategory::EcoApartment.multiplier(), 1.00);
        assert_eq!(PropertyCategory::SustainableHouse.multiplier(), 1.20);
        assert_eq!(PropertyCategory::GreenResort.multiplier(), 1.35);
        assert_eq!(PropertyCategory::EcoGlamping.multiplier(), 1.50);
        assert!(PropertyCategory::ALL.iter().all(|c| c.multiplier() > 0.0));
    }

    #[test]
    fn category_from_choice() {
        assert_eq!(PropertyCategory::from_choice(1), Some(PropertyCategory::EcoApartment));
        assert_eq!(PropertyCategory::from_choice(4), Some(PropertyCategory::EcoGlamping));
        assert_eq!(PropertyCategory::from_choice(0), None);
        assert_eq!(PropertyCategory::from_choice(5), None);
        assert_eq!(PropertyCategory::GreenResort.to_string(), "Green Resort");
    }

    #[test]
    fn calendar_day_defaults() {
        let d = CalendarDay::new(7).unwrap();
        assert_eq!(d.day(), 7);
        assert_eq!(d.base_price(), DEFAULT_BASE_PRICE);
        assert_eq!(d.environmental_rate(), DEFAULT_ENVIRONMENTAL_RATE);
        assert!(d.is_available());
    }

    #[test]
    fn calendar_day_rejects_bad_day() {
        assert!(matches!(CalendarDay::new(0), Err(EngineError::InvalidDay(0))));
        assert!(matches!(CalendarDay::new(31), Err(EngineError::InvalidDay(31))));
        assert!(matches!(CalendarDay::new(300), Err(EngineError::InvalidDay(300))));
    }

    #[test]
    fn set_price_below_minimum_leaves_price() {
        let mut d = CalendarDay::new(1).unwrap();
        assert!(matches!(d.set_price(99.99), Err(EngineError::InvalidPrice(_))));
        assert!(d.set_price(f64::NAN).is_err());
        assert!(d.set_price(-5.0).is_err());
        assert_eq!(d.base_price(), DEFAULT_BASE_PRICE);

        d.set_price(MIN_PRICE).unwrap();
        assert_eq!(d.base_price(), MIN_PRICE);
    }

    #[test]
    fn set_rate_bounds_inclusive() {
        let mut d = CalendarDay::new(1).unwrap();
        d.set_environmental_rate(0.80).unwrap();
        assert_eq!(d.environmental_rate(), 0.80);
        d.set_environmental_rate(1.20).unwrap();
        assert_eq!(d.environmental_rate(), 1.20);

        assert!(matches!(d.set_environmental_rate(0.79), Err(EngineError::InvalidRate(_))));
        assert!(d.set_environmental_rate(1.21).is_err());
        assert!(d.set_environmental_rate(f64::NAN).is_err());
        assert_eq!(d.environmental_rate(), 1.20);
    }

    #[test]
    fn final_price_formula() {
        let mut d = CalendarDay::with_price(2, 2000.0).unwrap();
        d.set_environmental_rate(0.90).unwrap();
        assert_eq!(d.final_price(1.35), 2000.0 * 1.35 * 0.90);
    }

    #[test]
    fn book_and_unbook() {
        let mut d = CalendarDay::new(10).unwrap();
        d.book();
        assert!(!d.is_available());
        d.unbook();
        assert!(d.is_available());
    }

    #[test]
    fn rate_tiers() {
        assert_eq!(RateTier::of(0.80), RateTier::Green);
        assert_eq!(RateTier::of(0.99), RateTier::Green);
        assert_eq!(RateTier::of(1.00), RateTier::Neutral);
        assert_eq!(RateTier::of(1.05), RateTier::Elevated);
        assert_eq!(RateTier::of(1.20), RateTier::Elevated);
    }

    #[test]
    fn reservation_validation() {
        assert!(matches!(Reservation::new("", 1, 2), Err(EngineError::EmptyGuestName)));
        assert!(matches!(Reservation::new("   ", 1, 2), Err(EngineError::EmptyGuestName)));
        assert!(matches!(Reservation::new("Alice", 4, 4), Err(EngineError::InvalidRange { .. })));
        assert!(matches!(Reservation::new("Alice", 29, 31), Err(EngineError::InvalidDay(31))));

        let r = Reservation::new("Alice", 29, 30).unwrap();
        assert_eq!(r.guest_name(), "Alice");
        assert_eq!(r.check_in(), 29);
        assert_eq!(r.check_out(), 30);
        assert_eq!(r.nights(), 1);
    }

    #[test]
    fn reservation_value_equality() {
        let a = Reservation::new("Alice", 3, 5).unwrap();
        let b = Reservation::new("Alice", 3, 5).unwrap();
        let c = Reservation::new("Alice", 3, 6).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn event_serialization_roundtrip() {
        let event = Event::ReservationAdded {
            property: "Grand Residences".into(),
            reservation: Reservation::new("Paolo", 2, 4).unwrap(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let decoded: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn reservation_json_is_validated() {
        let bad = [
            r#"{"guest_name":"","range":{"check_in":2,"check_out":4}}"#,
            r#"{"guest_name":"Alice","range":{"check_in":9,"check_out":2}}"#,
            r#"{"guest_name":"   ","range":{"check_in":9,"check_out":2}}"#,
        ];
        for json in bad {
            assert!(serde_json::from_str::<Reservation>(json).is_err(), "{json}");
        }
        let ok: Reservation =
            serde_json::from_str(r#"{"guest_name":"Alice","range":{"check_in":2,"check_out":4}}"#).unwrap();
        assert_eq!(ok, Reservation::new("Alice", 2, 4).unwrap());
    }

    #[test]
    fn calendar_day_json_is_validated() {
        let d = CalendarDay::with_price(3, 2000.0).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(serde_json::from_str::<CalendarDay>(&json).unwrap(), d);

        let cheap = r#"{"day":3,"base_price":5.0,"environmental_rate":1.0,"reserved":false}"#;
        assert!(serde_json::from_str::<CalendarDay>(cheap).is_err());
        let bad_rate = r#"{"day":3,"base_price":1500.0,"environmental_rate":2.0,"reserved":false}"#;
        assert!(serde_json::from_str::<CalendarDay>(bad_rate).is_err());
    }
}
