//! Domain types shared between the handlers and the store layer.
//! These carry the log-query semantics (date bounds, result cap) so the
//! backends and the handlers agree on them without duplicating shapes.

mod dates;

pub use dates::{calendar_date, DateRange};

/// Number of log entries returned when the caller gives no usable `limit`.
pub const DEFAULT_LOG_LIMIT: u64 = 500;
