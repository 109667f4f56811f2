use async_trait::async_trait;
use roost_catalog::{Listing, ListingType, Review};

use crate::booking::Booking;
use crate::favorites::Favorite;
use crate::pricing::Coupon;

/// Read access to the `listings` collection
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn list_listings(
        &self,
        listing_type: Option<ListingType>,
    ) -> Result<Vec<Listing>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_listing(
        &self,
        id: &str,
    ) -> Result<Option<Listing>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for the `bookings` collection
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(
        &self,
        booking: &Booking,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_bookings_for_guest(
        &self,
        guest_id: &str,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_bookings_for_host(
        &self,
        host_id: &str,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_bookings(
        &self,
    ) -> Result<Vec<Booking>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for the `favorites` join collection
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn find_favorite(
        &self,
        guest_id: &str,
        listing_id: &str,
    ) -> Result<Option<Favorite>, Box<dyn std::error::Error + Send + Sync>>;

    /// Store a favorite. Returns the stored record, which is the existing one
    /// when the guest already favorited the listing.
    async fn insert_favorite(
        &self,
        favorite: &Favorite,
    ) -> Result<Favorite, Box<dyn std::error::Error + Send + Sync>>;

    async fn delete_favorite(
        &self,
        id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn list_favorites(
        &self,
        guest_id: &str,
    ) -> Result<Vec<Favorite>, Box<dyn std::error::Error + Send + Sync>>;
}

#[async_trait]
pub trait CouponRepository: Send + Sync {
    async fn find_coupon(
        &self,
        code: &str,
    ) -> Result<Option<Coupon>, Box<dyn std::error::Error + Send + Sync>>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn list_reviews(
        &self,
        listing_id: &str,
    ) -> Result<Vec<Review>, Box<dyn std::error::Error + Send + Sync>>;
}
