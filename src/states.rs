use crate::{config::Config, service::PostService, store::PostStore};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::sync::Arc;
use tokio::sync::Semaphore;

// ============================================================================
// APPLICATION STATE - Shared across all requests
// ============================================================================
/// Cheap to clone: the post service holds an `Arc` to the store and the
/// rate limiter and request slots are shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub rate_limiter: Arc<DefaultDirectRateLimiter>,
    /// One permit per in-flight request, shared by every route.
    pub request_slots: Arc<Semaphore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PostStore>, config: &Config) -> Self {
        let quota = Quota::per_second(config.rate_limit_per_second)
            .allow_burst(config.rate_limit_burst);

        Self {
            posts: PostService::new(store),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
            request_slots: Arc::new(Semaphore::new(config.max_concurrent_requests)),
        }
    }
}
