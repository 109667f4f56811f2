use roost_core::booking::BookingService;
use roost_core::favorites::FavoriteService;
use roost_core::pricing::{PricingEngine, PricingRules};
use roost_core::reporting::ReportingService;
use roost_core::repository::{ListingRepository, ReviewRepository};
use roost_ranking::ListingRanker;
use roost_store::app_config::RankingConfig;
use roost_store::MemoryStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<dyn ListingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub favorites: Arc<FavoriteService>,
    pub bookings: Arc<BookingService>,
    pub reporting: Arc<ReportingService>,
    pub ranker: Arc<ListingRanker>,
}

impl AppState {
    /// Wire every service to the same store
    pub fn new(store: MemoryStore, ranking: RankingConfig, business_rules: PricingRules) -> Self {
        let store = Arc::new(store);

        Self {
            listings: store.clone(),
            reviews: store.clone(),
            favorites: Arc::new(FavoriteService::new(store.clone(), store.clone())),
            bookings: Arc::new(BookingService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                PricingEngine::new(business_rules),
            )),
            reporting: Arc::new(ReportingService::new(store)),
            ranker: Arc::new(ListingRanker::new(ranking)),
        }
    }
}
