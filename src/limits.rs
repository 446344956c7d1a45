// ── Calendar ─────────────────────────────────────────────

/// First bookable day of the calendar.
pub const MIN_DAY: u8 = 1;

/// Last bookable day of the calendar.
pub const MAX_DAY: u8 = 30;

// ── Pricing ──────────────────────────────────────────────

/// Lowest base price a day may carry.
pub const MIN_PRICE: f64 = 100.0;

/// Base price of a freshly listed day.
pub const DEFAULT_BASE_PRICE: f64 = 1500.0;

pub const MIN_ENVIRONMENTAL_RATE: f64 = 0.80;
pub const MAX_ENVIRONMENTAL_RATE: f64 = 1.20;
pub const DEFAULT_ENVIRONMENTAL_RATE: f64 = 1.00;

// ── Names ────────────────────────────────────────────────

pub const MAX_NAME_LEN: usize = 128;
pub const MAX_GUEST_NAME_LEN: usize = 128;
