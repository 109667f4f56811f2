use chrono::NaiveDate;
use roost_catalog::{Listing, ListingType, SearchWindow};
use roost_shared::Moment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Filters derived from the search page's query parameters.
/// Recomputed on every navigation and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub location: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub service_type: Option<String>,
}

impl SearchFilters {
    /// Build filters from raw query parameters (`location`, `checkIn`,
    /// `checkOut`, `guests`, `serviceType`). Blank values are treated as absent
    /// and values that do not parse are dropped.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let text = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let date = |key: &str| {
            let raw = text(key)?;
            let parsed = Moment::Text(raw.clone()).to_date();
            if parsed.is_none() {
                warn!(param = key, value = %raw, "Ignoring unparseable date filter");
            }
            parsed
        };

        let guests = text("guests").and_then(|raw| match raw.parse::<u32>() {
            Ok(count) => Some(count),
            Err(_) => {
                warn!(value = %raw, "Ignoring unparseable guest count");
                None
            }
        });

        Self {
            location: text("location"),
            check_in: date("checkIn"),
            check_out: date("checkOut"),
            guests,
            service_type: text("serviceType"),
        }
    }

    pub fn window(&self) -> SearchWindow {
        SearchWindow::new(self.check_in, self.check_out)
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(location) = &self.location {
            if !listing
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if let Some(guests) = self.guests {
            if listing.number_of_guests < guests {
                return false;
            }
        }

        if listing.listing_type == ListingType::Services {
            if let Some(wanted) = &self.service_type {
                let offered = listing.service_type.as_deref().unwrap_or_default();
                if !offered.eq_ignore_ascii_case(wanted) {
                    return false;
                }
            }
        }

        listing.is_available(&self.window())
    }
}

/// Listings that satisfy the filters, in catalog order.
pub fn search<'a>(listings: &'a [Listing], filters: &SearchFilters) -> Vec<&'a Listing> {
    listings.iter().filter(|l| filters.matches(l)).collect()
}
