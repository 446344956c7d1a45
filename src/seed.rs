//! Sample data for demos and manual testing.
//!
//! Built only from public `Registry` operations, so it doubles as an
//! end-to-end exercise of the engine.

use tracing::info;

use crate::engine::{EngineError, Registry};
use crate::model::PropertyCategory;

struct SampleProperty {
    name: &'static str,
    category: PropertyCategory,
    days: &'static [(u32, u32)],
}

const PROPERTIES: &[SampleProperty] = &[
    SampleProperty {
        name: "Grand Residences",
        category: PropertyCategory::EcoApartment,
        days: &[(1, 30)],
    },
    SampleProperty {
        name: "Arasaka Tower",
        category: PropertyCategory::SustainableHouse,
        days: &[(1, 15), (21, 25)],
    },
    SampleProperty {
        name: "Bolinao Reservations",
        category: PropertyCategory::GreenResort,
        days: &[(10, 20)],
    },
    SampleProperty {
        name: "Sunset Retreat",
        category: PropertyCategory::EcoGlamping,
        days: &[(5, 25)],
    },
    SampleProperty {
        name: "Mountain Edge",
        category: PropertyCategory::SustainableHouse,
        days: &[(1, 10), (18, 28)],
    },
];

/// (offset into `PROPERTIES`, guest, check-in, check-out)
const RESERVATIONS: &[(usize, &str, u32, u32)] = &[
    (0, "Paolo", 2, 4),
    (0, "Ammiel", 5, 9),
    (1, "Johnny SilverHand", 11, 13),
    (2, "Adam Smasher", 15, 20),
    (3, "Han Helldiver", 7, 14),
    (4, "Master Chief", 1, 3),
    (4, "Fireful FlyShine", 19, 24),
];

/// (offset into `PROPERTIES`, first day, last day, rate)
const RATE_RANGES: &[(usize, u32, u32, f64)] = &[
    (0, 1, 10, 0.90),
    (0, 11, 20, 1.10),
    (1, 1, 15, 1.00),
    (1, 21, 25, 0.85),
    (2, 10, 15, 1.20),
    (2, 16, 20, 0.80),
    (3, 5, 15, 0.95),
    (3, 16, 25, 1.05),
    (4, 1, 10, 0.88),
    (4, 18, 28, 1.15),
];

/// Load the sample properties, reservations and environmental rates into `registry`.
///
/// Fails on the first rejected operation, e.g. when a sample name is already taken.
pub fn seed_sample_properties(registry: &mut Registry) -> Result<(), EngineError> {
    let mut indices = Vec::with_capacity(PROPERTIES.len());
    for sample in PROPERTIES {
        let days: Vec<u32> = sample
            .days
            .iter()
            .flat_map(|&(first, last)| first..=last)
            .collect();
        indices.push(registry.create_property(sample.name, sample.category, &days)?);
    }

    for &(offset, guest, check_in, check_out) in RESERVATIONS {
        registry.add_reservation(indices[offset], guest, check_in, check_out)?;
    }

    for &(offset, start, end, rate) in RATE_RANGES {
        registry.set_environmental_rate_for_range(indices[offset], start, end, rate)?;
    }

    info!(
        properties = registry.property_count(),
        reservations = registry.reservation_count(),
        "sample data loaded"
    );
    Ok(())
}
