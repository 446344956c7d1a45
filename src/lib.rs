//! Availability, reservation and pricing engine for a small property-rental ledger.
//!
//! Each property lists up to thirty bookable days, each with its own base
//! price and environmental-impact rate. Guests reserve contiguous night ranges
//! `[check_in, check_out)`; a night's final price is
//! `base price × category multiplier × environmental rate`.

pub mod engine;
pub mod limits;
pub mod model;
pub mod observability;
pub mod seed;

pub use engine::{EngineError, Property, Registry};
pub use model::{CalendarDay, NightRange, PropertyCategory, Reservation};
