use std::sync::Arc;

use passgen_core::RateLimiter;

use crate::config::ServerConfig;
use crate::stats::GenerationStats;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub limiter: Arc<RateLimiter>,
    pub stats: Arc<GenerationStats>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let limiter = RateLimiter::new(config.rate_limit.clone());
        Self {
            config: Arc::new(config),
            limiter: Arc::new(limiter),
            stats: Arc::new(GenerationStats::default()),
        }
    }
}
