use chrono::{DateTime, Utc};
use roost_catalog::ListingType;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::booking::{Booking, BookingStatus};
use crate::repository::BookingRepository;
use crate::session::{Role, Session};
use crate::CoreResult;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub confirmed: usize,
    pub rejected: usize,
    pub completed: usize,
}

/// Aggregate booking figures for the admin and host dashboards
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingReport {
    pub generated_at: DateTime<Utc>,
    pub total_bookings: usize,
    pub by_status: StatusCounts,
    pub by_type: BTreeMap<ListingType, usize>,
    /// Grand totals of confirmed and completed bookings
    pub gross_revenue: f64,
    /// Grand totals still awaiting a host decision
    pub pending_value: f64,
    pub average_booking_value: f64,
}

impl BookingReport {
    pub fn build(bookings: &[Booking]) -> Self {
        let mut by_status = StatusCounts::default();
        let mut by_type = BTreeMap::new();
        let mut gross_revenue = 0.0;
        let mut pending_value = 0.0;

        for booking in bookings {
            *by_type.entry(booking.listing_type).or_insert(0) += 1;

            match booking.status {
                BookingStatus::Pending => {
                    by_status.pending += 1;
                    pending_value += booking.grand_total;
                }
                BookingStatus::Confirmed => {
                    by_status.confirmed += 1;
                    gross_revenue += booking.grand_total;
                }
                BookingStatus::Completed => {
                    by_status.completed += 1;
                    gross_revenue += booking.grand_total;
                }
                BookingStatus::Rejected => by_status.rejected += 1,
            }
        }

        let earning = by_status.confirmed + by_status.completed;
        let average_booking_value = if earning == 0 {
            0.0
        } else {
            round_cents(gross_revenue / earning as f64)
        };

        Self {
            generated_at: Utc::now(),
            total_bookings: bookings.len(),
            by_status,
            by_type,
            gross_revenue: round_cents(gross_revenue),
            pending_value: round_cents(pending_value),
            average_booking_value,
        }
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub struct ReportingService {
    bookings: Arc<dyn BookingRepository>,
}

impl ReportingService {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    /// Marketplace-wide report. Admins only.
    pub async fn admin_report(&self, session: &Session) -> CoreResult<BookingReport> {
        session.require_role(&[Role::Admin])?;
        let bookings = self.bookings.list_bookings().await?;
        Ok(BookingReport::build(&bookings))
    }

    /// Report over the signed-in host's own listings
    pub async fn host_report(&self, session: &Session) -> CoreResult<BookingReport> {
        session.require_role(&[Role::Host, Role::Admin])?;
        let bookings = self.bookings.list_bookings_for_host(&session.uid).await?;
        Ok(BookingReport::build(&bookings))
    }
}
