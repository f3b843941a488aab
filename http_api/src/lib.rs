//! HTTP surface for the moths resource
//!
//! Routes are served both at the root and under `/api`.

pub mod error;
pub mod handlers;
pub mod observability;
pub mod query_params;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/moths", get(handlers::list).post(handlers::create))
        .route(
            "/moths/{id}",
            get(handlers::get_one)
                .put(handlers::replace)
                .patch(handlers::patch)
                .delete(handlers::delete),
        )
        .route("/health", get(handlers::health))
}

/// Build the application router
pub fn build_app(state: AppState) -> Router {
    let routes = resource_routes();

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
