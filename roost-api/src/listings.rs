use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use roost_catalog::review::summarize;
use roost_catalog::{Listing, ListingType, RatingSummary};
use roost_core::search::{search, SearchFilters};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// A listing as the browse pages render it
#[derive(Debug, Serialize)]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: Listing,
    pub rating: RatingSummary,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/listings", get(search_listings))
        .route("/v1/listings/{id}", get(get_listing))
}

/// `GET /v1/listings?type=stays&location=Lisbon&checkIn=..&checkOut=..&guests=2`
async fn search_listings(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<ListingView>>, AppError> {
    let listing_type = params
        .get("type")
        .map(|raw| raw.parse::<ListingType>())
        .transpose()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    let filters = SearchFilters::from_query(&params);

    let listings = state.listings.list_listings(listing_type).await?;
    let matched = search(&listings, &filters);
    info!(candidates = listings.len(), matched = matched.len(), "Listing search");

    let mut views = Vec::with_capacity(matched.len());
    for listing in matched {
        views.push(listing_view(&state, listing.clone()).await?);
    }
    Ok(Json(views))
}

async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ListingView>, AppError> {
    let listing = state
        .listings
        .get_listing(&id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Listing {} not found", id)))?;

    Ok(Json(listing_view(&state, listing).await?))
}

async fn listing_view(state: &AppState, listing: Listing) -> Result<ListingView, AppError> {
    let reviews = state.reviews.list_reviews(&listing.id).await?;
    Ok(ListingView {
        rating: summarize(&reviews),
        listing,
    })
}
