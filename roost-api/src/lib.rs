use axum::{
    http::{HeaderName, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod error;
pub mod favorites;
pub mod listings;
pub mod middleware;
pub mod recommendations;
pub mod reports;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(middleware::session::UID_HEADER),
            HeaderName::from_static(middleware::session::ROLE_HEADER),
            HeaderName::from_static(middleware::session::EMAIL_HEADER),
            HeaderName::from_static(middleware::session::NAME_HEADER),
        ]);

    // Everything below needs a signed-in user
    let signed_in = Router::new()
        .merge(recommendations::routes())
        .merge(favorites::routes())
        .merge(bookings::routes())
        .merge(reports::routes())
        .route_layer(axum::middleware::from_fn(middleware::session_middleware));

    Router::new()
        .route("/health", get(health))
        .merge(listings::routes())
        .merge(signed_in)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
