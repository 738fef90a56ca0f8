//! REST API over a post record store: cursor-paginated listing,
//! fetch by id, create and partial update.

pub mod config;
pub mod dto;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod states;
pub mod store;

pub use config::Config;
pub use states::AppState;

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    middleware::from_fn_with_state,
    routing::get,
};
use tower::{ServiceBuilder, limit::GlobalConcurrencyLimitLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Builds the application router with its middleware stack.
pub fn build_router(state: AppState, config: &Config) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // `Router::layer` wraps each route separately, so the concurrency cap
    // draws from the semaphore in `AppState` to stay global.
    let limits = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(HandleErrorLayer::new(middleware::handle_layer_error))
        .timeout(config.request_timeout)
        .layer(GlobalConcurrencyLimitLayer::with_semaphore(
            state.request_slots.clone(),
        ));

    Router::new()
        .route("/health", get(routes::health_check))
        .route("/posts", get(routes::list_posts).post(routes::add_post))
        .route(
            "/posts/{id}",
            get(routes::get_post).patch(routes::update_post),
        )
        .layer(from_fn_with_state(state.clone(), middleware::rate_limit))
        .with_state(state)
        .layer(limits)
        .layer(cors)
}
