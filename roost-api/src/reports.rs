use axum::{extract::State, routing::get, Extension, Json, Router};
use roost_core::reporting::BookingReport;
use roost_core::session::SessionHandle;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/report", get(admin_report))
        .route("/v1/host/report", get(host_report))
}

async fn admin_report(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Result<Json<BookingReport>, AppError> {
    Ok(Json(state.reporting.admin_report(&session).await?))
}

async fn host_report(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Result<Json<BookingReport>, AppError> {
    Ok(Json(state.reporting.host_report(&session).await?))
}
