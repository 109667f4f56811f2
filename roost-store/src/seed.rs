use roost_catalog::{Listing, Review};
use roost_core::booking::Booking;
use roost_core::pricing::Coupon;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Snapshot of collections, in the document store's JSON export shape
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub coupons: Vec<Coupon>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid seed document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SeedData {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SeedError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&json)
    }
}
