use async_trait::async_trait;
use roost_catalog::{Listing, ListingType, Review};
use roost_core::booking::Booking;
use roost_core::favorites::Favorite;
use roost_core::pricing::Coupon;
use roost_core::repository::{
    BookingRepository, CouponRepository, FavoriteRepository, ListingRepository, ReviewRepository,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::seed::SeedData;

#[derive(Default)]
struct Collections {
    listings: Vec<Listing>,
    bookings: Vec<Booking>,
    favorites: Vec<Favorite>,
    coupons: Vec<Coupon>,
    reviews: Vec<Review>,
}

/// In-process stand-in for the hosted document store.
///
/// Collections keep insertion order, so listing queries return documents in
/// catalog order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Self {
        info!(
            listings = seed.listings.len(),
            bookings = seed.bookings.len(),
            coupons = seed.coupons.len(),
            reviews = seed.reviews.len(),
            "Seeding in-memory store"
        );

        let collections = Collections {
            listings: seed.listings,
            bookings: seed.bookings,
            favorites: Vec::new(),
            coupons: seed.coupons,
            reviews: seed.reviews,
        };
        Self {
            inner: Arc::new(RwLock::new(collections)),
        }
    }

    /// Insert a listing, replacing any document with the same id in place
    pub async fn upsert_listing(&self, listing: Listing) {
        let mut data = self.inner.write().await;
        match data.listings.iter_mut().find(|l| l.id == listing.id) {
            Some(existing) => *existing = listing,
            None => data.listings.push(listing),
        }
    }

    pub async fn add_coupon(&self, coupon: Coupon) {
        self.inner.write().await.coupons.push(coupon);
    }

    pub async fn add_review(&self, review: Review) {
        self.inner.write().await.reviews.push(review);
    }
}

#[async_trait]
impl ListingRepository for MemoryStore {
    async fn list_listings(
        &self,
        listing_type: Option<ListingType>,
    ) -> Result<Vec<Listing>, Box<dyn std::error::Error + Send + Sync>> {
        let data = self.inner.read().await;
        Ok(data
            .listings
            .iter()
            .filter(|l| listing_type.map_or(true, |t| l.listing_type == t))
            .cloned()
            .collect())
    }

    async fn get_listing(
        &self,
        id: &str,
    ) -> Result<Option<Listing>, Box<dyn std::error::Error + Send + Sync>> {
        let data = self.inner.read().await;
        Ok(data.listings.iter().find(|l| l.id == id).cloned())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create_booking(
        &self,
        booking: &Booking,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let mut data = self.inner.write().await;
        if data.bookings.iter().any(|b| b.id == booking.id) {
            return Err(format!("Booking {} already exists", booking.id).into());
        }
        data.bookings.push(booking.clone());
        Ok(booking.id.clone())
    }

    async fn list_bookings_for_guest(
        &self,
        guest_id: &str,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let data = self.inner.read().await;
        Ok(data.bookings.iter().filter(|b| b.guest_id == guest_id).cloned().collect())
    }

    async fn list_bookings_for_host(
        &self,
        host_id: &str,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        let data = self.inner.read().await;
        Ok(data.bookings.iter().filter(|b| b.host_id == host_id).cloned().collect())
    }

    async fn list_bookings(
        &self,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.inner.read().await.bookings.clone())
    }
}

#[async_trait]
impl FavoriteRepository for MemoryStore {
    async fn find_favorite(
        &self,
        guest_id: &str,
        listing_id: &str,
    ) -> Result<Option<Favorite>, Box<dyn std::error::Error + Send + Sync>> {
        let data = self.inner.read().await;
        Ok(data
            .favorites
            .iter()
            .find(|f| f.guest_id == guest_id && f.listing_id == listing_id)
            .cloned())
    }

    async fn insert_favorite(
        &self,
        favorite: &Favorite,
    ) -> Result<Favorite, Box<dyn std::error::Error + Send + Sync>> {
        // One favorite per (guest, listing), checked under the write lock
        let mut data = self.inner.write().await;
        if let Some(existing) = data
            .favorites
            .iter()
            .find(|f| f.guest_id == favorite.guest_id && f.listing_id == favorite.listing_id)
        {
            return Ok(existing.clone());
        }
        data.favorites.push(favorite.clone());
        Ok(favorite.clone())
    }

    async fn delete_favorite(
        &self,
        id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.inner.write().await.favorites.retain(|f| f.id != id);
        Ok(())
    }

    async fn list_favorites(
        &self,
        guest_id: &str,
    ) -> Result<Vec<Favorite>, Box<dyn std::error::Error + Send + Sync>> {
        let data = self.inner.read().await;
        Ok(data.favorites.iter().filter(|f| f.guest_id == guest_id).cloned().collect())
    }
}

#[async_trait]
impl CouponRepository for MemoryStore {
    async fn find_coupon(
        &self,
        code: &str,
    ) -> Result<Option<Coupon>, Box<dyn std::error::Error + Send + Sync>> {
        let data = self.inner.read().await;
        Ok(data
            .coupons
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
            .cloned())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn list_reviews(
        &self,
        listing_id: &str,
    ) -> Result<Vec<Review>, Box<dyn std::error::Error + Send + Sync>> {
        let data = self.inner.read().await;
        Ok(data.reviews.iter().filter(|r| r.listing_id == listing_id).cloned().collect())
    }
}
