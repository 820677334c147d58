//! Router construction.

use super::AppState;
use super::handlers::{cancellations, health, processes, scripts};
use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Versioned base path of every route.
pub const API_PREFIX: &str = "/api/1.0";

/// Builds the application router.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health::health))
        .route(
            "/processes",
            get(processes::list_processes).post(processes::create_process),
        )
        .route("/processes/:process_uid", get(processes::get_process))
        .route(
            "/processes/:process_uid/scripts",
            get(scripts::list_scripts).post(scripts::create_script),
        )
        .route(
            "/processes/:process_uid/scripts/:script_uid",
            get(scripts::get_script)
                .put(scripts::update_script)
                .delete(scripts::delete_script),
        )
        .route(
            "/canceled-requests",
            get(cancellations::list_canceled_requests)
                .post(cancellations::record_canceled_request)
                .delete(cancellations::purge_canceled_requests),
        )
        .route(
            "/canceled-requests/:app_uid",
            get(cancellations::get_canceled_request),
        );

    Router::new()
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
