pub mod health;

use axum::routing::put;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// PUT   /{resource}/{id}    partial update (events, pauses, cars,
/// PATCH /{resource}/{id}    prestataires, equipements)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/{resource}/{id}",
        put(handlers::update::update).patch(handlers::update::update),
    )
}
