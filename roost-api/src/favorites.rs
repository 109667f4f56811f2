use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use roost_core::favorites::{Favorite, FavoriteToggle};
use roost_core::session::SessionHandle;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleResponse {
    listing_id: String,
    status: FavoriteToggle,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/favorites", get(list_favorites))
        .route("/v1/favorites/{listing_id}/toggle", post(toggle_favorite))
}

async fn list_favorites(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Result<Json<Vec<Favorite>>, AppError> {
    Ok(Json(state.favorites.list(&session).await?))
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Path(listing_id): Path<String>,
) -> Result<Json<ToggleResponse>, AppError> {
    let status = state.favorites.toggle(&session, &listing_id).await?;
    Ok(Json(ToggleResponse { listing_id, status }))
}
