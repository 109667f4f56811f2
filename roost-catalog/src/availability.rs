use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::listing::AvailabilityEntry;

/// The guest-supplied check-in/check-out filter.
///
/// Either side may be missing; a window with neither side set requests no
/// date filtering at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl SearchWindow {
    pub fn new(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> Self {
        Self { check_in, check_out }
    }

    pub fn between(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self::new(Some(check_in), Some(check_out))
    }

    pub fn is_unbounded(&self) -> bool {
        self.check_in.is_none() && self.check_out.is_none()
    }

    /// Does the inclusive day range `[start, end]` satisfy this window?
    pub fn accepts(&self, start: NaiveDate, end: NaiveDate) -> bool {
        match (self.check_in, self.check_out) {
            (None, None) => true,
            (Some(check_in), None) => start <= check_in && check_in <= end,
            (None, Some(check_out)) => start <= check_out && check_out <= end,
            (Some(check_in), Some(check_out)) => check_in <= end && check_out >= start,
        }
    }
}

impl AvailabilityEntry {
    /// The entry's `(start, end)` days, if both ends are real dates.
    ///
    /// Ends are returned as stored. An inverted range is still a valid entry
    /// and is left to [`SearchWindow::accepts`].
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let range = match self {
            AvailabilityEntry::Range { start_date, end_date } => {
                (start_date.to_date()?, end_date.to_date()?)
            }
            AvailabilityEntry::Slot { date, .. } => {
                let day = date.to_date()?;
                (day, day)
            }
            AvailabilityEntry::Malformed(_) => return None,
        };

        Some(range)
    }
}

/// Decide whether a listing's availability satisfies a search window.
///
/// Passes when no dates were requested. Otherwise at least one entry must
/// resolve to a valid range that the window accepts; entries that do not
/// resolve are skipped. Never fails.
pub fn matches(entries: &[AvailabilityEntry], window: &SearchWindow) -> bool {
    if window.is_unbounded() {
        return true;
    }

    entries.iter().any(|entry| match entry.date_range() {
        Some((start, end)) => window.accepts(start, end),
        None => {
            debug!(?entry, "Skipping unparseable availability entry");
            false
        }
    })
}

/// Decide whether a stay from `check_in` to `check_out` fits entirely inside
/// one availability entry.
///
/// Search only needs an overlap; a booking needs every requested day open.
pub fn covers(entries: &[AvailabilityEntry], check_in: NaiveDate, check_out: NaiveDate) -> bool {
    entries.iter().any(|entry| match entry.date_range() {
        Some((start, end)) => start <= check_in && check_out <= end,
        None => false,
    })
}
