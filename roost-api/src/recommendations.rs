use axum::{extract::State, routing::get, Extension, Json, Router};
use roost_core::session::SessionHandle;
use roost_ranking::RecommendationSet;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/recommendations", get(recommendations))
}

async fn recommendations(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Result<Json<RecommendationSet>, AppError> {
    let history = state.bookings.history(&session).await?;
    let catalog = state.listings.list_listings(None).await?;

    let ranked = state.ranker.recommend(&history, &catalog);
    tracing::info!(uid = %session.uid, history = history.len(), recommended = ranked.len(), "Recommendations built");

    Ok(Json(RecommendationSet::by_type(ranked)))
}
