use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional inclusive date bounds for a log query.
///
/// An absent bound imposes no constraint, so the default range matches
/// every date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest date included, if any.
    pub from: Option<NaiveDate>,
    /// Latest date included, if any.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// True when neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

/// Render a date as the log endpoints expose it: weekday, month, day and
/// year with no time component, e.g. `Sun Jan 15 2023`.
pub fn calendar_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}
