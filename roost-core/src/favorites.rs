use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::repository::{FavoriteRepository, ListingRepository};
use crate::session::Session;
use crate::{CoreError, CoreResult};

/// Join record between a guest and a listing they saved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub guest_id: String,
    pub listing_id: String,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(guest_id: impl Into<String>, listing_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            guest_id: guest_id.into(),
            listing_id: listing_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// Outcome of a favorite toggle
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteToggle {
    Added,
    Removed,
}

pub struct FavoriteService {
    favorites: Arc<dyn FavoriteRepository>,
    listings: Arc<dyn ListingRepository>,
}

impl FavoriteService {
    pub fn new(favorites: Arc<dyn FavoriteRepository>, listings: Arc<dyn ListingRepository>) -> Self {
        Self { favorites, listings }
    }

    /// Add the listing to the guest's favorites, or remove it if already there.
    pub async fn toggle(&self, session: &Session, listing_id: &str) -> CoreResult<FavoriteToggle> {
        if let Some(existing) = self.favorites.find_favorite(&session.uid, listing_id).await? {
            self.favorites.delete_favorite(&existing.id).await?;
            info!(guest_id = %session.uid, listing_id, "Favorite removed");
            return Ok(FavoriteToggle::Removed);
        }

        if self.listings.get_listing(listing_id).await?.is_none() {
            return Err(CoreError::NotFoundError(format!("Listing {}", listing_id)));
        }

        let stored = self
            .favorites
            .insert_favorite(&Favorite::new(session.uid.clone(), listing_id))
            .await?;
        info!(guest_id = %session.uid, listing_id, favorite_id = %stored.id, "Favorite added");

        Ok(FavoriteToggle::Added)
    }

    /// The guest's favorites, newest first
    pub async fn list(&self, session: &Session) -> CoreResult<Vec<Favorite>> {
        let mut favorites = self.favorites.list_favorites(&session.uid).await?;
        favorites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(favorites)
    }

    pub async fn is_favorite(&self, session: &Session, listing_id: &str) -> CoreResult<bool> {
        Ok(self
            .favorites
            .find_favorite(&session.uid, listing_id)
            .await?
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use crate::test_support::FakeStore;

    fn service(store: &Arc<FakeStore>) -> FavoriteService {
        FavoriteService::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let store = Arc::new(FakeStore::with_listings(vec![FakeStore::stay("loft", "Lisbon", 120.0)]));
        let favorites = service(&store);
        let guest = Session::new("guest-1", Role::Guest);

        assert_eq!(favorites.toggle(&guest, "loft").await.unwrap(), FavoriteToggle::Added);
        assert!(favorites.is_favorite(&guest, "loft").await.unwrap());
        assert_eq!(favorites.list(&guest).await.unwrap().len(), 1);

        assert_eq!(favorites.toggle(&guest, "loft").await.unwrap(), FavoriteToggle::Removed);
        assert!(!favorites.is_favorite(&guest, "loft").await.unwrap());
        assert!(favorites.list(&guest).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_favorites_are_per_guest() {
        let store = Arc::new(FakeStore::with_listings(vec![FakeStore::stay("loft", "Lisbon", 120.0)]));
        let favorites = service(&store);
        let ana = Session::new("ana", Role::Guest);
        let ben = Session::new("ben", Role::Guest);

        favorites.toggle(&ana, "loft").await.unwrap();
        assert!(!favorites.is_favorite(&ben, "loft").await.unwrap());
        assert_eq!(favorites.toggle(&ben, "loft").await.unwrap(), FavoriteToggle::Added);
    }

    #[tokio::test]
    async fn test_unknown_listing() {
        let store = Arc::new(FakeStore::default());
        let favorites = service(&store);
        let guest = Session::new("guest-1", Role::Guest);

        assert!(matches!(
            favorites.toggle(&guest, "missing").await,
            Err(CoreError::NotFoundError(_))
        ));
    }
}
