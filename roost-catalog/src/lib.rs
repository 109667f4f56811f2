pub mod listing;
pub mod availability;
pub mod review;

pub use listing::{AvailabilityEntry, Listing, ListingType, ListingTypeError};
pub use availability::SearchWindow;
pub use review::{RatingSummary, Review};
