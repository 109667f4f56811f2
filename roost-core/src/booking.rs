use chrono::{DateTime, NaiveDate, Utc};
use roost_catalog::{Listing, ListingType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::pricing::{Coupon, PricingEngine, Quote};
use crate::repository::{BookingRepository, CouponRepository, ListingRepository};
use crate::session::{Role, Session};
use crate::{CoreError, CoreResult};

/// Booking status. Transitions past `Pending` are host actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub guest_id: String,
    #[serde(default)]
    pub host_id: String,
    pub listing_id: String,
    pub listing_type: ListingType,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_guests")]
    pub guests: u32,
    pub status: BookingStatus,
    pub grand_total: f64,
    #[serde(default)]
    pub coupon_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn default_guests() -> u32 {
    1
}

impl Booking {
    /// A new pending booking priced from a quote
    pub fn pending(guest_id: String, listing: &Listing, request: &BookingRequest, quote: &Quote) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            guest_id,
            host_id: listing.host_id.clone(),
            listing_id: listing.id.clone(),
            listing_type: listing.listing_type,
            check_in: request.check_in,
            check_out: request.check_out,
            guests: request.guests,
            status: BookingStatus::Pending,
            grand_total: quote.grand_total,
            coupon_code: quote.coupon_code.clone(),
            created_at: Utc::now(),
        }
    }
}

/// What a guest submits from the checkout page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub listing_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

pub struct BookingService {
    listings: Arc<dyn ListingRepository>,
    bookings: Arc<dyn BookingRepository>,
    coupons: Arc<dyn CouponRepository>,
    pricing: PricingEngine,
}

impl BookingService {
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        bookings: Arc<dyn BookingRepository>,
        coupons: Arc<dyn CouponRepository>,
        pricing: PricingEngine,
    ) -> Self {
        Self { listings, bookings, coupons, pricing }
    }

    /// Price a request without storing anything
    pub async fn quote(&self, request: &BookingRequest) -> CoreResult<Quote> {
        let listing = self.load_listing(&request.listing_id).await?;
        self.quote_listing(&listing, request).await
    }

    /// Validate, price and store a pending booking for the signed-in guest
    pub async fn request(&self, session: &Session, request: BookingRequest) -> CoreResult<Booking> {
        session.require_role(&[Role::Guest])?;

        let listing = self.load_listing(&request.listing_id).await?;
        if listing.host_id == session.uid {
            return Err(CoreError::ValidationError("Hosts cannot book their own listing".to_string()));
        }

        let quote = self.quote_listing(&listing, &request).await?;
        let booking = Booking::pending(session.uid.clone(), &listing, &request, &quote);
        let id = self.bookings.create_booking(&booking).await?;

        info!(
            booking_id = %id,
            guest_id = %session.uid,
            listing_id = %listing.id,
            grand_total = booking.grand_total,
            "Booking requested"
        );

        Ok(booking)
    }

    /// The signed-in guest's bookings, most recent check-in first
    pub async fn history(&self, session: &Session) -> CoreResult<Vec<Booking>> {
        let mut bookings = self.bookings.list_bookings_for_guest(&session.uid).await?;
        bookings.sort_by(|a, b| b.check_in.cmp(&a.check_in));
        Ok(bookings)
    }

    async fn load_listing(&self, listing_id: &str) -> CoreResult<Listing> {
        self.listings
            .get_listing(listing_id)
            .await?
            .ok_or_else(|| CoreError::NotFoundError(format!("Listing {}", listing_id)))
    }

    async fn quote_listing(&self, listing: &Listing, request: &BookingRequest) -> CoreResult<Quote> {
        if request.guests == 0 {
            return Err(CoreError::ValidationError("At least one guest is required".to_string()));
        }
        if request.guests > listing.number_of_guests {
            return Err(CoreError::ValidationError(format!(
                "{} accepts at most {} guests",
                listing.title, listing.number_of_guests
            )));
        }

        if !listing.can_host(request.check_in, request.check_out) {
            return Err(CoreError::ValidationError(format!(
                "{} is not available for the selected dates",
                listing.title
            )));
        }

        let coupon = self.load_coupon(request.coupon_code.as_deref()).await?;
        self.pricing.quote(
            listing,
            request.check_in,
            request.check_out,
            request.guests,
            coupon.as_ref(),
        )
    }

    async fn load_coupon(&self, code: Option<&str>) -> CoreResult<Option<Coupon>> {
        let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
            return Ok(None);
        };

        match self.coupons.find_coupon(code).await? {
            Some(coupon) => Ok(Some(coupon)),
            None => Err(CoreError::ValidationError(format!("Unknown coupon {}", code))),
        }
    }
}
