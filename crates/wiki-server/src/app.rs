//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::any;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Only the five wiki routes are registered; every other path is a 404.
/// Routes accept any method so browser forms can use GET or POST.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", any(handlers::pages::front_page))
        .route("/view/{title}", any(handlers::pages::view))
        .route("/edit/{title}", any(handlers::pages::edit))
        .route("/save/{title}", any(handlers::pages::save))
        .route("/create/", any(handlers::pages::create))
        .fallback(handlers::not_found);

    security::with_page_headers(routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
