use crate::model::Day;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    // ── validation ──
    InvalidDay(u32),
    InvalidPrice(f64),
    InvalidRate(f64),
    InvalidRange {
        check_in: u32,
        check_out: u32,
    },
    InvalidDayRange {
        start: u32,
        end: u32,
    },
    EmptyGuestName,
    EmptyName,
    DuplicateName(String),
    NoListedDays,
    LimitExceeded(&'static str),
    // ── state conflicts ──
    DayNotListed(Day),
    DayReserved(Day),
    ReservationNotFound,
    HasReservations(usize),
    // ── not found ──
    PropertyNotFound(usize),
    ReservationIndexOutOfRange(usize),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidDay(day) => write!(f, "invalid day {day}: must be 1-30"),
            EngineError::InvalidPrice(p) => write!(f, "invalid price {p}: must be at least 100"),
            EngineError::InvalidRate(r) => {
                write!(f, "invalid environmental rate {r}: must be between 0.80 and 1.20")
            }
            EngineError::InvalidRange {
                check_in,
                check_out,
            } => write!(
                f,
                "invalid stay [{check_in}, {check_out}): check-out must be after check-in"
            ),
            EngineError::InvalidDayRange { start, end } => {
                write!(f, "invalid day range {start}..={end}: need 1 <= start <= end <= 30")
            }
            EngineError::EmptyGuestName => write!(f, "guest name must not be empty"),
            EngineError::EmptyName => write!(f, "property name must not be empty"),
            EngineError::DuplicateName(name) => write!(f, "property name already exists: {name}"),
            EngineError::NoListedDays => write!(f, "property must list at least one valid day"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            EngineError::DayNotListed(day) => write!(f, "day {day} is not listed"),
            EngineError::DayReserved(day) => write!(f, "day {day} is already reserved"),
            EngineError::ReservationNotFound => write!(f, "no matching reservation"),
            EngineError::HasReservations(idx) => {
                write!(f, "property {idx} has active reservations")
            }
            EngineError::PropertyNotFound(idx) => write!(f, "no property at index {idx}"),
            EngineError::ReservationIndexOutOfRange(idx) => {
                write!(f, "no reservation at index {idx}")
            }
        }
    }
}

impl std::error::Error for EngineError {}
