mod generate;
mod stats;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

use crate::middleware::rate_limit::rate_limit;
use crate::state::AppState;

/// API routes plus the static front-end fallback.
///
/// Only `/api/generate` sits behind the rate limiter; stats and static files
/// are served without consuming a client's budget.
pub fn router(state: AppState) -> Router {
    let limited = Router::new()
        .route("/generate", get(generate::generate))
        .layer(from_fn_with_state(state.clone(), rate_limit));

    let api = limited.route("/stats", get(stats::stats));

    Router::new()
        .nest("/api", api)
        .fallback(crate::static_files::static_handler)
        .with_state(state)
}
