mod availability;
mod error;
mod mutations;
mod pricing;
mod property;
mod queries;

pub use availability::{calendar_grid, is_range_available};
pub use error::EngineError;
pub use pricing::quote_range;
pub use property::Property;

use tracing::debug;

use crate::model::*;
use crate::observability;

/// The property registry: owns every property and, through them, every reservation.
///
/// Reservations are stored only inside their `Property`; registry reads go
/// through `Property::reservations`, so there is a single source of truth.
#[derive(Debug, Default)]
pub struct Registry {
    properties: Vec<Property>,
    /// Every applied mutation, oldest first.
    journal: Vec<Event>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applied mutations since construction. Unbounded; nothing persists it.
    pub fn journal(&self) -> &[Event] {
        &self.journal
    }

    /// Append an applied mutation to the journal and refresh gauges.
    pub(super) fn record(&mut self, op: &'static str, event: Event) {
        debug!(op, ?event, "applied");
        metrics::counter!(observability::MUTATIONS_TOTAL, "op" => op, "status" => "ok").increment(1);
        metrics::gauge!(observability::PROPERTIES_ACTIVE).set(self.properties.len() as f64);
        metrics::gauge!(observability::RESERVATIONS_ACTIVE).set(self.reservation_count() as f64);
        self.journal.push(event);
    }

    pub(super) fn rejected(&self, op: &'static str, err: &EngineError) {
        tracing::warn!(op, %err, "rejected");
        metrics::counter!(observability::MUTATIONS_TOTAL, "op" => op, "status" => "rejected").increment(1);
    }

    pub(super) fn property_ref(&self, index: usize) -> Result<&Property, EngineError> {
        self.properties
            .get(index)
            .ok_or(EngineError::PropertyNotFound(index))
    }

    pub(super) fn property_mut(&mut self, index: usize) -> Result<&mut Property, EngineError> {
        self.properties
            .get_mut(index)
            .ok_or(EngineError::PropertyNotFound(index))
    }
}
