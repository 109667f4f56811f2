use async_trait::async_trait;
use roost_catalog::{AvailabilityEntry, Listing, ListingType, Review};
use roost_shared::Moment;
use std::sync::Mutex;

use crate::booking::Booking;
use crate::favorites::Favorite;
use crate::pricing::Coupon;
use crate::repository::{
    BookingRepository, CouponRepository, FavoriteRepository, ListingRepository, ReviewRepository,
};

type StoreResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Minimal document store for service tests
#[derive(Default)]
pub struct FakeStore {
    pub listings: Vec<Listing>,
    pub bookings: Mutex<Vec<Booking>>,
    pub favorites: Mutex<Vec<Favorite>>,
    pub coupons: Mutex<Vec<Coupon>>,
    pub reviews: Mutex<Vec<Review>>,
}

impl FakeStore {
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self { listings, ..Default::default() }
    }

    /// A stay owned by `host-1`, sleeping 4, open 2024-10-10..=2024-10-20
    pub fn stay(id: &str, location: &str, price: f64) -> Listing {
        Listing {
            id: id.to_string(),
            listing_type: ListingType::Stays,
            host_id: "host-1".to_string(),
            title: id.to_string(),
            location: location.to_string(),
            price,
            number_of_guests: 4,
            available_dates: vec![AvailabilityEntry::Range {
                start_date: Moment::Text("2024-10-10".to_string()),
                end_date: Moment::Text("2024-10-20".to_string()),
            }],
            photos: vec![],
            service_type: None,
        }
    }
}

#[async_trait]
impl ListingRepository for FakeStore {
    async fn list_listings(&self, listing_type: Option<ListingType>) -> StoreResult<Vec<Listing>> {
        Ok(self
            .listings
            .iter()
            .filter(|l| listing_type.map_or(true, |t| l.listing_type == t))
            .cloned()
            .collect())
    }

    async fn get_listing(&self, id: &str) -> StoreResult<Option<Listing>> {
        Ok(self.listings.iter().find(|l| l.id == id).cloned())
    }
}

#[async_trait]
impl BookingRepository for FakeStore {
    async fn create_booking(&self, booking: &Booking) -> StoreResult<String> {
        self.bookings.lock().unwrap().push(booking.clone());
        Ok(booking.id.clone())
    }

    async fn list_bookings_for_guest(&self, guest_id: &str) -> StoreResult<Vec<Booking>> {
        Ok(self.bookings.lock().unwrap().iter().filter(|b| b.guest_id == guest_id).cloned().collect())
    }

    async fn list_bookings_for_host(&self, host_id: &str) -> StoreResult<Vec<Booking>> {
        Ok(self.bookings.lock().unwrap().iter().filter(|b| b.host_id == host_id).cloned().collect())
    }

    async fn list_bookings(&self) -> StoreResult<Vec<Booking>> {
        Ok(self.bookings.lock().unwrap().clone())
    }
}

#[async_trait]
impl FavoriteRepository for FakeStore {
    async fn find_favorite(&self, guest_id: &str, listing_id: &str) -> StoreResult<Option<Favorite>> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.guest_id == guest_id && f.listing_id == listing_id)
            .cloned())
    }

    async fn insert_favorite(&self, favorite: &Favorite) -> StoreResult<Favorite> {
        self.favorites.lock().unwrap().push(favorite.clone());
        Ok(favorite.clone())
    }

    async fn delete_favorite(&self, id: &str) -> StoreResult<()> {
        self.favorites.lock().unwrap().retain(|f| f.id != id);
        Ok(())
    }

    async fn list_favorites(&self, guest_id: &str) -> StoreResult<Vec<Favorite>> {
        Ok(self.favorites.lock().unwrap().iter().filter(|f| f.guest_id == guest_id).cloned().collect())
    }
}

#[async_trait]
impl CouponRepository for FakeStore {
    async fn find_coupon(&self, code: &str) -> StoreResult<Option<Coupon>> {
        Ok(self
            .coupons
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .cloned())
    }
}

#[async_trait]
impl ReviewRepository for FakeStore {
    async fn list_reviews(&self, listing_id: &str) -> StoreResult<Vec<Review>> {
        Ok(self.reviews.lock().unwrap().iter().filter(|r| r.listing_id == listing_id).cloned().collect())
    }
}
