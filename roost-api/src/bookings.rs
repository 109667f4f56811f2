use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use roost_core::booking::{Booking, BookingRequest};
use roost_core::pricing::Quote;
use roost_core::session::SessionHandle;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", get(booking_history).post(create_booking))
        .route("/v1/bookings/quote", post(quote_booking))
}

async fn quote_booking(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<Quote>, AppError> {
    Ok(Json(state.bookings.quote(&req).await?))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Json(req): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state.bookings.request(&session, req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn booking_history(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.bookings.history(&session).await?))
}
