use roost_catalog::{Listing, ListingType};
use roost_core::booking::{Booking, BookingStatus};
use std::collections::{HashMap, HashSet};

/// What a guest's booking history says about their taste
#[derive(Debug, Default)]
pub struct GuestProfile {
    /// Every listing the guest has a booking for, whatever its status
    booked: HashSet<String>,
    type_counts: HashMap<ListingType, usize>,
    counted: usize,
    /// (lowercased locality, locality as the guest saw it), first booking first
    localities: Vec<(String, String)>,
    prices: HashMap<ListingType, Vec<f64>>,
}

impl GuestProfile {
    /// Rejected bookings exclude their listing but say nothing about taste.
    /// Bookings whose listing is no longer in the catalog only exclude it.
    pub fn from_history(history: &[Booking], catalog: &[Listing]) -> Self {
        let by_id: HashMap<&str, &Listing> = catalog.iter().map(|l| (l.id.as_str(), l)).collect();
        let mut profile = Self::default();

        for booking in history {
            profile.booked.insert(booking.listing_id.clone());

            if booking.status == BookingStatus::Rejected {
                continue;
            }

            let Some(listing) = by_id.get(booking.listing_id.as_str()) else {
                continue;
            };

            *profile.type_counts.entry(booking.listing_type).or_insert(0) += 1;
            profile.counted += 1;

            let locality = listing.locality();
            if !locality.is_empty() && !profile.localities.iter().any(|(known, _)| *known == locality) {
                profile.localities.push((locality, display_locality(listing)));
            }

            if listing.price > 0.0 {
                profile.prices.entry(listing.listing_type).or_default().push(listing.price);
            }
        }

        profile
    }

    pub fn is_empty(&self) -> bool {
        self.counted == 0
    }

    pub fn has_booked(&self, listing_id: &str) -> bool {
        self.booked.contains(listing_id)
    }

    /// Share of the guest's bookings that were of this type, 0.0..=1.0
    pub fn type_affinity(&self, listing_type: ListingType) -> f64 {
        if self.counted == 0 {
            return 0.0;
        }
        self.type_counts.get(&listing_type).copied().unwrap_or(0) as f64 / self.counted as f64
    }

    /// A previously booked locality the listing shares, if any
    pub fn matched_locality(&self, listing: &Listing) -> Option<&str> {
        let candidate = listing.locality();
        if candidate.is_empty() {
            return None;
        }

        self.localities
            .iter()
            .find(|(known, _)| *known == candidate)
            .or_else(|| {
                self.localities
                    .iter()
                    .find(|(known, _)| candidate.contains(known.as_str()) || known.contains(&candidate))
            })
            .map(|(_, display)| display.as_str())
    }

    /// Mean booked price for this type, or across all types when the guest
    /// never booked this type
    pub fn reference_price(&self, listing_type: ListingType) -> Option<f64> {
        if let Some(prices) = self.prices.get(&listing_type) {
            return mean(prices);
        }
        let all: Vec<f64> = self.prices.values().flatten().copied().collect();
        mean(&all)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn display_locality(listing: &Listing) -> String {
    listing.location.split(',').next().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn listing(id: &str, location: &str) -> Listing {
        Listing {
            id: id.to_string(),
            listing_type: ListingType::Stays,
            host_id: "host-1".to_string(),
            title: id.to_string(),
            location: location.to_string(),
            price: 100.0,
            number_of_guests: 2,
            available_dates: vec![],
            photos: vec![],
            service_type: None,
        }
    }

    fn booking(listing_id: &str, status: BookingStatus) -> Booking {
        Booking {
            id: format!("booking-{}", listing_id),
            guest_id: "guest-1".to_string(),
            host_id: "host-1".to_string(),
            listing_id: listing_id.to_string(),
            listing_type: ListingType::Stays,
            check_in: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 9, 3).unwrap(),
            guests: 2,
            status,
            grand_total: 200.0,
            coupon_code: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_unresolvable_history_is_empty() {
        let catalog = vec![listing("loft", "Lisbon")];
        let history = vec![
            booking("gone", BookingStatus::Completed),
            booking("loft", BookingStatus::Rejected),
        ];

        let profile = GuestProfile::from_history(&history, &catalog);
        assert!(profile.is_empty());
        assert!(profile.has_booked("gone"));
        assert!(profile.has_booked("loft"));
        assert_eq!(profile.type_affinity(ListingType::Stays), 0.0);
    }

    #[test]
    fn test_locality_fallback_prefers_earliest_booking() {
        let catalog = vec![listing("a", "Sintra"), listing("b", "Sintra Hills, Portugal")];
        let candidate = listing("c", "Sintra Hills Villa");

        let history = vec![booking("a", BookingStatus::Completed), booking("b", BookingStatus::Completed)];
        let profile = GuestProfile::from_history(&history, &catalog);
        assert_eq!(profile.matched_locality(&candidate), Some("Sintra"));

        let history = vec![booking("b", BookingStatus::Completed), booking("a", BookingStatus::Completed)];
        let profile = GuestProfile::from_history(&history, &catalog);
        assert_eq!(profile.matched_locality(&candidate), Some("Sintra Hills"));

        assert_eq!(profile.matched_locality(&listing("d", "sintra")), Some("Sintra"));
    }
}
