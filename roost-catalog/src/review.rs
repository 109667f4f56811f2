use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A guest's review of a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub listing_id: String,
    pub guest_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Rating and review count derived from a listing's reviews
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub review_count: usize,
}

/// Summarize reviews. Ratings outside 1..=5 are not counted.
pub fn summarize(reviews: &[Review]) -> RatingSummary {
    let valid: Vec<u8> = reviews
        .iter()
        .map(|r| r.rating)
        .filter(|rating| (1..=5).contains(rating))
        .collect();

    if valid.is_empty() {
        return RatingSummary::default();
    }

    let total: u32 = valid.iter().map(|r| *r as u32).sum();
    let mean = total as f64 / valid.len() as f64;

    RatingSummary {
        average: Some((mean * 10.0).round() / 10.0),
        review_count: valid.len(),
    }
}
