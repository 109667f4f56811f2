use roost_catalog::{Listing, ListingType};
use roost_core::booking::Booking;
use roost_store::app_config::RankingConfig;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::profile::GuestProfile;

/// A listing suggested to a guest, with its 0-100 similarity score
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub listing: Listing,
    pub score: u8,
    pub reason: String,
}

/// Ranked recommendations split into the home screen's rows
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationSet {
    pub stays: Vec<Recommendation>,
    pub experiences: Vec<Recommendation>,
    pub services: Vec<Recommendation>,
}

impl RecommendationSet {
    pub fn by_type(ranked: Vec<Recommendation>) -> Self {
        let mut set = Self::default();
        for rec in ranked {
            match rec.listing.listing_type {
                ListingType::Stays => set.stays.push(rec),
                ListingType::Experiences => set.experiences.push(rec),
                ListingType::Services => set.services.push(rec),
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.stays.is_empty() && self.experiences.is_empty() && self.services.is_empty()
    }
}

/// Similarity-based recommendations from booking history
pub struct ListingRanker {
    config: RankingConfig,
}

impl ListingRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// Rank catalog listings the guest has not booked by how much they resemble
    /// the guest's history.
    ///
    /// Listings sharing no trait with the history are left out. Order is by
    /// score, ties keep catalog order, and each listing type is capped at
    /// `per_type_limit`. A guest with no usable history gets nothing.
    pub fn recommend(&self, history: &[Booking], catalog: &[Listing]) -> Vec<Recommendation> {
        let profile = GuestProfile::from_history(history, catalog);
        if profile.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<Recommendation> = catalog
            .iter()
            .filter(|listing| !profile.has_booked(&listing.id))
            .filter_map(|listing| self.score(&profile, listing))
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.cmp(&a.score));

        let mut taken: HashMap<ListingType, usize> = HashMap::new();
        scored.retain(|rec| {
            let count = taken.entry(rec.listing.listing_type).or_insert(0);
            if *count >= self.config.per_type_limit {
                return false;
            }
            *count += 1;
            true
        });

        debug!(candidates = catalog.len(), recommended = scored.len(), "Ranked recommendations");
        scored
    }

    /// Score one candidate against the profile. `None` when it shares nothing.
    pub fn score(&self, profile: &GuestProfile, listing: &Listing) -> Option<Recommendation> {
        let total_weight = self.config.type_weight + self.config.location_weight + self.config.price_weight;
        if total_weight <= 0.0 {
            return None;
        }

        let mut reasons = Vec::new();

        let type_affinity = profile.type_affinity(listing.listing_type);
        if type_affinity > 0.0 {
            reasons.push(format!("You often book {}", listing.listing_type));
        }

        let locality = profile.matched_locality(listing);
        let location_match = if let Some(place) = locality {
            reasons.push(format!("In {}, where you've booked before", place));
            1.0
        } else {
            0.0
        };

        let price_proximity = match profile.reference_price(listing.listing_type) {
            Some(reference) if reference > 0.0 && listing.price >= 0.0 => {
                (1.0 - (listing.price - reference).abs() / reference).max(0.0)
            }
            _ => 0.0,
        };
        if price_proximity >= 0.5 {
            reasons.push("Priced like your past bookings".to_string());
        }

        let raw = (type_affinity * self.config.type_weight
            + location_match * self.config.location_weight
            + price_proximity * self.config.price_weight)
            / total_weight;
        let score = (raw * 100.0).round().clamp(0.0, 100.0) as u8;
        if score == 0 {
            return None;
        }

        let reason = if reasons.is_empty() {
            "Similar to places you've booked".to_string()
        } else {
            reasons.join("; ")
        };

        Some(Recommendation {
            listing: listing.clone(),
            score,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use roost_catalog::AvailabilityEntry;
    use roost_core::booking::BookingStatus;

    fn config() -> RankingConfig {
        RankingConfig {
            type_weight: 40.0,
            location_weight: 35.0,
            price_weight: 25.0,
            per_type_limit: 6,
        }
    }

    fn listing(id: &str, listing_type: ListingType, location: &str, price: f64) -> Listing {
        Listing {
            id: id.to_string(),
            listing_type,
            host_id: "host-1".to_string(),
            title: id.to_string(),
            location: location.to_string(),
            price,
            number_of_guests: 2,
            available_dates: Vec::<AvailabilityEntry>::new(),
            photos: vec![],
            service_type: None,
        }
    }

    fn booking(listing: &Listing, status: BookingStatus) -> Booking {
        Booking {
            id: format!("booking-{}", listing.id),
            guest_id: "guest-1".to_string(),
            host_id: listing.host_id.clone(),
            listing_id: listing.id.clone(),
            listing_type: listing.listing_type,
            check_in: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 9, 4).unwrap(),
            guests: 2,
            status,
            grand_total: listing.price * 3.0,
            coupon_code: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_history_no_recommendations() {
        let ranker = ListingRanker::new(config());
        let catalog = vec![listing("loft", ListingType::Stays, "Lisbon", 100.0)];
        assert!(ranker.recommend(&[], &catalog).is_empty());
    }

    #[test]
    fn test_booked_listings_are_excluded() {
        let ranker = ListingRanker::new(config());
        let loft = listing("loft", ListingType::Stays, "Lisbon", 100.0);
        let rejected = listing("villa", ListingType::Stays, "Lisbon", 100.0);
        let catalog = vec![
            loft.clone(),
            rejected.clone(),
            listing("studio", ListingType::Stays, "Lisbon", 90.0),
        ];
        let history = vec![
            booking(&loft, BookingStatus::Completed),
            booking(&rejected, BookingStatus::Rejected),
        ];

        let ranked = ranker.recommend(&history, &catalog);
        let ids: Vec<&str> = ranked.iter().map(|r| r.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["studio"]);
    }

    #[test]
    fn test_ranking_order_and_reasons() {
        let ranker = ListingRanker::new(config());
        let past = listing("past", ListingType::Stays, "Lisbon, Portugal", 100.0);
        let catalog = vec![
            past.clone(),
            listing("far-cheap", ListingType::Stays, "Berlin", 20.0),
            listing("near-same", ListingType::Stays, "Lisbon", 100.0),
            listing("near-tour", ListingType::Experiences, "lisbon", 100.0),
            listing("unrelated", ListingType::Services, "Oslo", 900.0),
        ];

        let ranked = ranker.recommend(&[booking(&past, BookingStatus::Confirmed)], &catalog);
        let ids: Vec<&str> = ranked.iter().map(|r| r.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["near-same", "near-tour", "far-cheap"]);

        assert_eq!(ranked[0].score, 100);
        assert!(ranked[0].reason.contains("You often book stays"));
        assert!(ranked[0].reason.contains("In Lisbon"));
        assert!(ranked[0].reason.contains("Priced like your past bookings"));
        assert!(ranked.iter().all(|r| r.score <= 100));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let ranker = ListingRanker::new(config());
        let past = listing("past", ListingType::Stays, "Lisbon", 100.0);
        let catalog = vec![
            past.clone(),
            listing("b", ListingType::Stays, "Lisbon", 100.0),
            listing("a", ListingType::Stays, "Lisbon", 100.0),
            listing("c", ListingType::Stays, "Lisbon", 100.0),
        ];

        let ranked = ranker.recommend(&[booking(&past, BookingStatus::Completed)], &catalog);
        let ids: Vec<&str> = ranked.iter().map(|r| r.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_per_type_cap() {
        let ranker = ListingRanker::new(config());
        let past_stay = listing("past-stay", ListingType::Stays, "Lisbon", 100.0);
        let past_tour = listing("past-tour", ListingType::Experiences, "Lisbon", 40.0);

        let mut catalog = vec![past_stay.clone(), past_tour.clone()];
        for i in 0..20 {
            catalog.push(listing(&format!("stay-{}", i), ListingType::Stays, "Lisbon", 80.0 + i as f64));
            catalog.push(listing(&format!("tour-{}", i), ListingType::Experiences, "Lisbon", 30.0 + i as f64));
        }
        catalog.push(listing("chef", ListingType::Services, "Lisbon", 200.0));

        let history = vec![
            booking(&past_stay, BookingStatus::Completed),
            booking(&past_tour, BookingStatus::Confirmed),
        ];
        let ranked = ranker.recommend(&history, &catalog);
        let set = RecommendationSet::by_type(ranked);

        assert_eq!(set.stays.len(), 6);
        assert_eq!(set.experiences.len(), 6);
        assert_eq!(set.services.len(), 1);
        assert!(set.stays.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_history_outside_catalog_gives_nothing() {
        let ranker = ListingRanker::new(config());
        let gone = listing("gone", ListingType::Experiences, "Rome", 50.0);
        let catalog = vec![listing("tour", ListingType::Experiences, "Porto", 50.0)];

        let ranked = ranker.recommend(&[booking(&gone, BookingStatus::Completed)], &catalog);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_only_resolved_history_shapes_scores() {
        let ranker = ListingRanker::new(config());
        let gone = listing("gone", ListingType::Experiences, "Rome", 50.0);
        let past = listing("past", ListingType::Stays, "Porto", 80.0);
        let catalog = vec![
            past.clone(),
            listing("tour", ListingType::Experiences, "Rome", 500.0),
            listing("flat", ListingType::Stays, "Braga", 800.0),
        ];
        let history = vec![
            booking(&gone, BookingStatus::Completed),
            booking(&past, BookingStatus::Completed),
        ];

        let ranked = ranker.recommend(&history, &catalog);
        let ids: Vec<&str> = ranked.iter().map(|r| r.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["flat"]);
        assert_eq!(ranked[0].score, 40);
    }
}
