pub mod profile;
pub mod ranker;

pub use profile::GuestProfile;
pub use ranker::{ListingRanker, Recommendation, RecommendationSet};
