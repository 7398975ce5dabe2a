use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use super::AppState;
use super::routes::{health, scrape};
use crate::listing::SessionLauncher;

pub fn build<L>(state: AppState<L>) -> Router
where
    L: SessionLauncher + 'static,
{
    Router::new()
        .route("/", get(health))
        .route("/api/v1/scrape", get(scrape::<L>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
