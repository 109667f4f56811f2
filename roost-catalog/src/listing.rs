use chrono::NaiveDate;
use roost_shared::Moment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::availability::{self, SearchWindow};

/// Listing categories in the marketplace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Stays,
    Experiences,
    Services,
}

impl ListingType {
    pub const ALL: [ListingType; 3] = [
        ListingType::Stays,
        ListingType::Experiences,
        ListingType::Services,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Stays => "stays",
            ListingType::Experiences => "experiences",
            ListingType::Services => "services",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown listing type: {0}")]
pub struct ListingTypeError(pub String);

impl FromStr for ListingType {
    type Err = ListingTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stays" | "stay" => Ok(ListingType::Stays),
            "experiences" | "experience" => Ok(ListingType::Experiences),
            "services" | "service" => Ok(ListingType::Services),
            other => Err(ListingTypeError(other.to_string())),
        }
    }
}

/// One date or date range during which a listing can be booked.
///
/// Stays and services publish ranges, experiences publish single-day slots.
/// Entries that fit neither shape are kept as `Malformed` and ignored by the
/// matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvailabilityEntry {
    #[serde(rename_all = "camelCase")]
    Range { start_date: Moment, end_date: Moment },
    Slot {
        date: Moment,
        #[serde(default)]
        time: Option<String>,
    },
    Malformed(serde_json::Value),
}

/// A bookable unit owned by a host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    #[serde(default)]
    pub host_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub number_of_guests: u32,
    #[serde(default)]
    pub available_dates: Vec<AvailabilityEntry>,
    #[serde(default)]
    pub photos: Vec<String>,
    /// Category of a service listing (e.g. "catering", "photography")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

impl Listing {
    /// Does any availability entry satisfy the search window?
    pub fn is_available(&self, window: &SearchWindow) -> bool {
        availability::matches(&self.available_dates, window)
    }

    /// Is every day from `check_in` to `check_out` inside one entry?
    pub fn can_host(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        availability::covers(&self.available_dates, check_in, check_out)
    }

    /// First comma-separated segment of the location, lowercased.
    /// "Lisbon, Portugal" and "lisbon" share the locality "lisbon".
    pub fn locality(&self) -> String {
        self.location
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    }
}
